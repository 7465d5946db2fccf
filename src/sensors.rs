//! Boundary with the host simulation's sensors.
//!
//! The network never measures anything itself. A host (ray casts in a game scene, a
//! grid lookup, ...) hands over one non-negative distance per sensor, `0.0` meaning
//! nothing was detected, and may append extra scalar inputs such as the agent's speed.

use crate::{NeuralNetwork, Result};

/// Anything that can report an ordered set of sensor readings.
pub trait Sensors {
    fn readings(&self) -> Vec<f32>;
}

impl Sensors for [f32] {
    fn readings(&self) -> Vec<f32> {
        self.to_vec()
    }
}

impl Sensors for Vec<f32> {
    fn readings(&self) -> Vec<f32> {
        self.clone()
    }
}

impl NeuralNetwork {
    /// Predicts from `sensors` followed by `extras`. The combined length must equal
    /// `input_nodes`.
    pub fn predict_with_extras(&self, sensors: &[f32], extras: &[f32]) -> Result<Vec<f32>> {
        let mut input = Vec::with_capacity(sensors.len() + extras.len());
        input.extend_from_slice(sensors);
        input.extend_from_slice(extras);
        self.predict(&input)
    }

    pub fn predict_from_sensors<S: Sensors + ?Sized>(
        &self,
        sensors: &S,
        extras: &[f32],
    ) -> Result<Vec<f32>> {
        self.predict_with_extras(&sensors.readings(), extras)
    }
}
