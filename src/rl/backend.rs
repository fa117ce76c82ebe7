//! Backend type aliases and device management
//!
//! Observations are tiny (11 floats), so the CPU NdArray backend is all the
//! environment needs.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used to build observation tensors
pub type ObservationBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_device_calls() {
        let device1 = default_device();
        let device2 = default_device();
        assert_eq!(
            std::mem::discriminant(&device1),
            std::mem::discriminant(&device2)
        );
    }
}
