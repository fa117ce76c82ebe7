//! Scripted drivers used by the demo and headless modes
//!
//! These stand in for an external agent so the simulation can be watched or
//! smoke-tested without one. They do not learn.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::game::{Action, GameState};

/// Something that picks the next action from the current state
pub trait Policy {
    fn select(&mut self, state: &GameState) -> Action;
}

/// Uniformly random relative actions
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded_rng(seed) }
    }
}

impl Policy for RandomPolicy {
    fn select(&mut self, _state: &GameState) -> Action {
        match self.rng.gen_range(0..Action::COUNT) {
            0 => Action::Straight,
            1 => Action::TurnRight,
            _ => Action::TurnLeft,
        }
    }
}

/// Heads for the food by Manhattan distance, never steps into an immediate
/// collision when a safe move exists. Ties are broken at random.
pub struct GreedyPolicy {
    rng: StdRng,
}

impl GreedyPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded_rng(seed) }
    }
}

impl Policy for GreedyPolicy {
    fn select(&mut self, state: &GameState) -> Action {
        let head = state.snake.head();
        let heading = state.snake.direction;

        let safe: Vec<(Action, i32)> = [Action::Straight, Action::TurnRight, Action::TurnLeft]
            .into_iter()
            .filter_map(|action| {
                let next = head.moved_in_direction(action.resolve(heading), state.block_size);
                if state.collision_at(next).is_some() {
                    return None;
                }
                let distance = state.food.map_or(0, |food| next.manhattan_distance(food));
                Some((action, distance))
            })
            .collect();

        let Some(best) = safe.iter().map(|(_, distance)| *distance).min() else {
            // Boxed in, any move loses
            return Action::Straight;
        };

        let candidates: Vec<Action> = safe
            .iter()
            .filter(|(_, distance)| *distance == best)
            .map(|(action, _)| *action)
            .collect();

        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Action::Straight)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
