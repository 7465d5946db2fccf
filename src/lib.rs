//! A small neural network for evolving game agents.
//!
//! `neuroevo` implements a feedforward network with exactly one hidden layer, trained
//! either by plain online backpropagation or, more commonly, by an evolutionary loop that
//! recombines and mutates the parameters of the fittest agents.
//!
//! # Layout
//!
//! - [`Matrix`]: dense row-major `f32` matrix. Every operation returns a new matrix.
//! - [`NeuralNetwork`]: two weight matrices and two bias columns, with
//!   [`predict`](NeuralNetwork::predict) and [`train`](NeuralNetwork::train).
//! - [`genetics`]: [`reproduce`](genetics::reproduce), [`mutate`](genetics::mutate),
//!   [`mutate_with_rng`](genetics::mutate_with_rng) and [`copy`](genetics::copy).
//! - [`Sensors`] and [`DisplayColor`]: the seams towards the host simulation.
//!
//! # Errors
//!
//! All public operations validate shapes up front and return [`Result`]; a failed call
//! never leaves a network half-updated. Randomness is always passed in as an `Rng`, so
//! every operation is reproducible under a fixed seed.
//!
//! # Quick start
//!
//! ```rust
//! use neuroevo::{NeuralNetwork, genetics};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> neuroevo::Result<()> {
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut a = NeuralNetwork::new_with_rng(5, 8, 2, &mut rng)?;
//! let b = NeuralNetwork::new_with_rng(5, 8, 2, &mut rng)?;
//!
//! // Ray distances from the game, 0.0 meaning "nothing hit", plus the agent's speed.
//! let steer = a.predict_with_extras(&[0.0, 3.5, 1.2, 0.0], &[0.8])?;
//! assert_eq!(steer.len(), 2);
//!
//! a.set_fitness(12.0);
//! let child = genetics::reproduce(&a, &b, &mut rng)?;
//! let child = genetics::mutate_with_rng(&child, &genetics::MutationConfig::default(), &mut rng)?;
//! assert!(child.is_compatible(&a));
//! # Ok(())
//! # }
//! ```
//!
//! # Supervised training
//!
//! ```rust
//! use neuroevo::{Dataset, FitConfig, NetworkBuilder};
//!
//! # fn main() -> neuroevo::Result<()> {
//! let xs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
//! let ys = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
//! let data = Dataset::from_rows(&xs, &ys)?;
//!
//! let mut nn = NetworkBuilder::new(2, 4, 1)?.learning_rate(0.5)?.build_with_seed(0)?;
//! let report = nn.fit(&data, FitConfig { epochs: 100 })?;
//! assert_eq!(report.epoch_losses.len(), 100);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod data;
pub mod display;
pub mod error;
pub mod genetics;
pub mod loss;
pub(crate) mod matmul;
pub mod matrix;
pub mod network;
pub mod sensors;
pub mod train;

pub use activation::Activation;
pub use builder::{DEFAULT_LEARNING_RATE, NetworkBuilder};
pub use data::Dataset;
pub use display::DisplayColor;
pub use error::{Error, Result};
pub use genetics::MutationConfig;
pub use matrix::Matrix;
pub use network::{BackpropOrder, NeuralNetwork};
pub use sensors::Sensors;
pub use train::{FitConfig, FitReport};
