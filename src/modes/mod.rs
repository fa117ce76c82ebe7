pub mod headless;
pub mod human;
pub mod terminal;
pub mod watch;

pub use headless::{EpisodeSummary, HeadlessMode};
pub use human::HumanMode;
pub use watch::WatchMode;
