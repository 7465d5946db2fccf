//! Network builder.
//!
//! `NetworkBuilder` collects the topology and training settings, validates each one as
//! it is set, and then produces either a randomly initialized network (every weight and
//! bias uniform in `[-1, 1)`) or a zero-filled one for callers that assign parameters
//! themselves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::{Parameters, validate_learning_rate};
use crate::{Activation, BackpropOrder, Error, Matrix, NeuralNetwork, Result};

/// Learning rate used unless the builder is told otherwise.
pub const DEFAULT_LEARNING_RATE: f32 = 0.15;

#[derive(Debug, Clone)]
/// Builder for a `NeuralNetwork`.
///
/// Example:
///
/// ```rust
/// use neuroevo::{Activation, NetworkBuilder};
///
/// # fn main() -> neuroevo::Result<()> {
/// let nn = NetworkBuilder::new(4, 6, 2)?
///     .learning_rate(0.1)?
///     .activation(Activation::Tanh)?
///     .build_with_seed(0)?;
/// assert_eq!(nn.topology(), (4, 6, 2));
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    learning_rate: f32,
    activation: Activation,
    backprop: BackpropOrder,
}

impl NetworkBuilder {
    /// Start building an `input_nodes -> hidden_nodes -> output_nodes` network.
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize) -> Result<Self> {
        if input_nodes == 0 || hidden_nodes == 0 || output_nodes == 0 {
            return Err(Error::InvalidTopology(format!(
                "node counts must be > 0, got {input_nodes}-{hidden_nodes}-{output_nodes}"
            )));
        }
        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: Activation::default(),
            backprop: BackpropOrder::default(),
        })
    }

    pub fn learning_rate(mut self, learning_rate: f32) -> Result<Self> {
        self.learning_rate = validate_learning_rate(learning_rate)?;
        Ok(self)
    }

    pub fn activation(mut self, activation: Activation) -> Result<Self> {
        activation.validate()?;
        self.activation = activation;
        Ok(self)
    }

    pub fn backprop(mut self, order: BackpropOrder) -> Self {
        self.backprop = order;
        self
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<NeuralNetwork> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<NeuralNetwork> {
        let params = (
            Matrix::random(self.hidden_nodes, self.input_nodes, rng)?,
            Matrix::random(self.output_nodes, self.hidden_nodes, rng)?,
            Matrix::random(self.hidden_nodes, 1, rng)?,
            Matrix::random(self.output_nodes, 1, rng)?,
        );
        Ok(self.finish(params, "random"))
    }

    /// Build with every parameter set to zero.
    pub fn build_uninitialized(self) -> Result<NeuralNetwork> {
        let params = (
            Matrix::zeros(self.hidden_nodes, self.input_nodes)?,
            Matrix::zeros(self.output_nodes, self.hidden_nodes)?,
            Matrix::zeros(self.hidden_nodes, 1)?,
            Matrix::zeros(self.output_nodes, 1)?,
        );
        Ok(self.finish(params, "zeroed"))
    }

    fn finish(self, params: Parameters, init: &str) -> NeuralNetwork {
        log::debug!(
            "built {init} network {}-{}-{} ({:?}, lr={}, {:?})",
            self.input_nodes,
            self.hidden_nodes,
            self.output_nodes,
            self.activation,
            self.learning_rate,
            self.backprop
        );
        NeuralNetwork::from_parts(
            (self.input_nodes, self.hidden_nodes, self.output_nodes),
            params,
            self.learning_rate,
            self.activation,
            self.backprop,
        )
    }
}
