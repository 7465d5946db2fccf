//! Genetic operators over network parameters.
//!
//! None of these touch their inputs: each returns a brand-new network that owns its
//! own matrices. Children inherit the first parent's learning rate, activation and
//! backprop order, and start with a fitness of zero.

use rand::Rng;

use crate::{Error, NeuralNetwork, Result};

/// Default weight perturbation for [`mutate_with_rng`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationConfig {
    /// Probability that any single entry is perturbed.
    pub rate: f32,
    /// Perturbations are drawn uniformly from `[-strength, strength]`.
    pub strength: f32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            strength: 0.15,
        }
    }
}

impl MutationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.rate.is_finite() && (0.0..=1.0).contains(&self.rate)) {
            return Err(Error::InvalidConfig(format!(
                "mutation rate must be in [0, 1], got {}",
                self.rate
            )));
        }
        if !(self.strength.is_finite() && self.strength >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "mutation strength must be finite and >= 0, got {}",
                self.strength
            )));
        }
        Ok(())
    }
}

/// Uniform crossover: every parameter entry comes from `a` or `b` with equal odds.
pub fn reproduce<R: Rng + ?Sized>(
    a: &NeuralNetwork,
    b: &NeuralNetwork,
    rng: &mut R,
) -> Result<NeuralNetwork> {
    if !a.is_compatible(b) {
        return Err(Error::TopologyMismatch(format!(
            "cannot cross {:?} with {:?}",
            a.topology(),
            b.topology()
        )));
    }

    let params = (
        a.weights_input_hidden()
            .blend(b.weights_input_hidden(), rng)?,
        a.weights_hidden_output()
            .blend(b.weights_hidden_output(), rng)?,
        a.bias_hidden().blend(b.bias_hidden(), rng)?,
        a.bias_output().blend(b.bias_output(), rng)?,
    );
    log::debug!(
        "reproduced {:?} (parent fitness {} x {})",
        a.topology(),
        a.fitness(),
        b.fitness()
    );
    Ok(a.with_parameters(params))
}

/// Passes every parameter entry through `f(value, row, col)`.
pub fn mutate<F>(network: &NeuralNetwork, f: F) -> NeuralNetwork
where
    F: FnMut(f32, usize, usize) -> f32,
{
    network.with_parameters(network.map_parameters(f))
}

/// Random perturbation of the parameters as described by `config`.
pub fn mutate_with_rng<R: Rng + ?Sized>(
    network: &NeuralNetwork,
    config: &MutationConfig,
    rng: &mut R,
) -> Result<NeuralNetwork> {
    config.validate()?;
    let strength = config.strength;
    let mut touched = 0_usize;
    let child = mutate(network, |v, _, _| {
        if rng.gen_bool(f64::from(config.rate)) {
            touched += 1;
            v + rng.gen_range(-strength..=strength)
        } else {
            v
        }
    });
    log::debug!("mutated {touched} parameters of {:?}", network.topology());
    Ok(child)
}

/// Independent deep copy, fitness included.
pub fn copy(network: &NeuralNetwork) -> NeuralNetwork {
    network.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_params(nn: &NeuralNetwork) -> Vec<f32> {
        [
            nn.weights_input_hidden(),
            nn.weights_hidden_output(),
            nn.bias_hidden(),
            nn.bias_output(),
        ]
        .iter()
        .flat_map(|m| m.as_slice().to_vec())
        .collect()
    }

    #[test]
    fn reproduce_takes_each_entry_from_a_parent() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = NeuralNetwork::new_with_seed(5, 7, 3, 1).unwrap();
        let b = NeuralNetwork::new_with_seed(5, 7, 3, 2).unwrap();
        let child = reproduce(&a, &b, &mut rng).unwrap();

        let (pa, pb, pc) = (all_params(&a), all_params(&b), all_params(&child));
        let mut from_a = 0;
        let mut from_b = 0;
        for ((x, y), c) in pa.iter().zip(&pb).zip(&pc) {
            assert!(c == x || c == y);
            if c == x {
                from_a += 1;
            }
            if c == y {
                from_b += 1;
            }
        }
        assert!(from_a > 0 && from_b > 0);
        assert_eq!(child.fitness(), 0.0);
    }

    #[test]
    fn reproduce_rejects_mismatched_topologies() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = NeuralNetwork::new_with_seed(2, 3, 1, 1).unwrap();
        let b = NeuralNetwork::new_with_seed(2, 4, 1, 2).unwrap();
        let (a0, b0) = (a.clone(), b.clone());
        assert!(matches!(
            reproduce(&a, &b, &mut rng),
            Err(Error::TopologyMismatch(_))
        ));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn default_mutation_stays_within_strength() {
        let mut rng = StdRng::seed_from_u64(4);
        let nn = NeuralNetwork::new_with_seed(4, 4, 2, 3).unwrap();
        let child = mutate_with_rng(&nn, &MutationConfig::default(), &mut rng).unwrap();

        let before = all_params(&nn);
        let after = all_params(&child);
        assert!(before.iter().zip(&after).any(|(x, y)| x != y));
        for (x, y) in before.iter().zip(&after) {
            assert!((y - x).abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn zero_rate_mutation_is_a_copy() {
        let mut rng = StdRng::seed_from_u64(4);
        let nn = NeuralNetwork::new_with_seed(3, 2, 2, 3).unwrap();
        let cfg = MutationConfig {
            rate: 0.0,
            strength: 0.5,
        };
        let child = mutate_with_rng(&nn, &cfg, &mut rng).unwrap();
        assert_eq!(all_params(&child), all_params(&nn));
    }

    #[test]
    fn mutation_config_validation() {
        let mut rng = StdRng::seed_from_u64(0);
        let nn = NeuralNetwork::new_with_seed(1, 1, 1, 0).unwrap();
        for cfg in [
            MutationConfig {
                rate: 1.5,
                strength: 0.1,
            },
            MutationConfig {
                rate: 0.5,
                strength: -0.1,
            },
            MutationConfig {
                rate: f32::NAN,
                strength: 0.1,
            },
        ] {
            assert!(matches!(
                mutate_with_rng(&nn, &cfg, &mut rng),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn mutate_passes_coordinates() {
        let nn = NeuralNetwork::new_uninitialized(2, 3, 1).unwrap();
        let child = mutate(&nn, |_, r, c| (r * 10 + c) as f32);
        // weights_input_hidden is 3x2.
        assert_eq!(
            child.weights_input_hidden().as_slice(),
            &[0.0, 1.0, 10.0, 11.0, 20.0, 21.0]
        );
        assert_eq!(child.bias_hidden().as_slice(), &[0.0, 10.0, 20.0]);
    }

    #[test]
    fn copy_keeps_fitness() {
        let mut nn = NeuralNetwork::new_with_seed(2, 2, 2, 0).unwrap();
        nn.set_fitness(42.0);
        assert_eq!(copy(&nn).fitness(), 42.0);
    }
}
