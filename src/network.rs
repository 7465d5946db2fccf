use crate::{Activation, Error, Matrix, NetworkBuilder, Result};

use rand::Rng;

/// Which copy of `weights_hidden_output` the hidden-layer error is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackpropOrder {
    /// Textbook backprop: the weights as they were before this step's update.
    #[default]
    PreUpdate,
    /// Update the output layer first, then back-propagate through the new weights.
    PostUpdate,
}

/// A feedforward network with exactly one hidden layer.
///
/// Shapes (column-vector convention, `y = W x + b`):
/// - `weights_input_hidden`: `(hidden_nodes, input_nodes)`
/// - `weights_hidden_output`: `(output_nodes, hidden_nodes)`
/// - `bias_hidden`: `(hidden_nodes, 1)`
/// - `bias_output`: `(output_nodes, 1)`
///
/// These shapes are fixed by the node counts and every setter checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    weights_input_hidden: Matrix,
    weights_hidden_output: Matrix,
    bias_hidden: Matrix,
    bias_output: Matrix,
    learning_rate: f32,
    activation: Activation,
    backprop: BackpropOrder,
    fitness: f32,
}

/// The four parameter matrices, in the order
/// `(weights_input_hidden, weights_hidden_output, bias_hidden, bias_output)`.
pub(crate) type Parameters = (Matrix, Matrix, Matrix, Matrix);

impl NeuralNetwork {
    /// Randomly initialized network with default settings and a deterministic seed.
    pub fn new_with_seed(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        seed: u64,
    ) -> Result<Self> {
        NetworkBuilder::new(input_nodes, hidden_nodes, output_nodes)?.build_with_seed(seed)
    }

    /// Randomly initialized network with default settings.
    pub fn new_with_rng<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        NetworkBuilder::new(input_nodes, hidden_nodes, output_nodes)?.build_with_rng(rng)
    }

    /// Zero-filled network; the caller assigns the parameters.
    pub fn new_uninitialized(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
    ) -> Result<Self> {
        NetworkBuilder::new(input_nodes, hidden_nodes, output_nodes)?.build_uninitialized()
    }

    /// Assemble a network. Callers guarantee the shapes match the node counts.
    pub(crate) fn from_parts(
        (input_nodes, hidden_nodes, output_nodes): (usize, usize, usize),
        (weights_input_hidden, weights_hidden_output, bias_hidden, bias_output): Parameters,
        learning_rate: f32,
        activation: Activation,
        backprop: BackpropOrder,
    ) -> Self {
        debug_assert_eq!(weights_input_hidden.shape(), (hidden_nodes, input_nodes));
        debug_assert_eq!(weights_hidden_output.shape(), (output_nodes, hidden_nodes));
        debug_assert_eq!(bias_hidden.shape(), (hidden_nodes, 1));
        debug_assert_eq!(bias_output.shape(), (output_nodes, 1));
        Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            weights_input_hidden,
            weights_hidden_output,
            bias_hidden,
            bias_output,
            learning_rate,
            activation,
            backprop,
            fitness: 0.0,
        }
    }

    /// A new network with this one's topology and settings but different parameters.
    /// Fitness starts over at zero.
    pub(crate) fn with_parameters(&self, params: Parameters) -> Self {
        Self::from_parts(
            self.topology(),
            params,
            self.learning_rate,
            self.activation,
            self.backprop,
        )
    }

    #[inline]
    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    #[inline]
    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    #[inline]
    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    /// `(input_nodes, hidden_nodes, output_nodes)`.
    #[inline]
    pub fn topology(&self) -> (usize, usize, usize) {
        (self.input_nodes, self.hidden_nodes, self.output_nodes)
    }

    /// Networks can be recombined iff all three node counts match.
    #[inline]
    pub fn is_compatible(&self, other: &NeuralNetwork) -> bool {
        self.topology() == other.topology()
    }

    #[inline]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f32) -> Result<()> {
        self.learning_rate = validate_learning_rate(learning_rate)?;
        Ok(())
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    #[inline]
    pub fn backprop_order(&self) -> BackpropOrder {
        self.backprop
    }

    /// Score assigned by an evolutionary driver. Never read by the network itself.
    #[inline]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    #[inline]
    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    #[inline]
    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.weights_input_hidden
    }

    #[inline]
    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.weights_hidden_output
    }

    #[inline]
    pub fn bias_hidden(&self) -> &Matrix {
        &self.bias_hidden
    }

    #[inline]
    pub fn bias_output(&self) -> &Matrix {
        &self.bias_output
    }

    pub fn set_weights_input_hidden(&mut self, m: Matrix) -> Result<()> {
        check_shape("weights_input_hidden", &m, (self.hidden_nodes, self.input_nodes))?;
        self.weights_input_hidden = m;
        Ok(())
    }

    pub fn set_weights_hidden_output(&mut self, m: Matrix) -> Result<()> {
        check_shape(
            "weights_hidden_output",
            &m,
            (self.output_nodes, self.hidden_nodes),
        )?;
        self.weights_hidden_output = m;
        Ok(())
    }

    pub fn set_bias_hidden(&mut self, m: Matrix) -> Result<()> {
        check_shape("bias_hidden", &m, (self.hidden_nodes, 1))?;
        self.bias_hidden = m;
        Ok(())
    }

    pub fn set_bias_output(&mut self, m: Matrix) -> Result<()> {
        check_shape("bias_output", &m, (self.output_nodes, 1))?;
        self.bias_output = m;
        Ok(())
    }

    /// Applies `f(value, row, col)` to every entry of every parameter matrix.
    pub(crate) fn map_parameters<F>(&self, mut f: F) -> Parameters
    where
        F: FnMut(f32, usize, usize) -> f32,
    {
        (
            self.weights_input_hidden.map(&mut f),
            self.weights_hidden_output.map(&mut f),
            self.bias_hidden.map(&mut f),
            self.bias_output.map(&mut f),
        )
    }

    /// Forward pass for a single sample.
    ///
    /// `input.len()` must equal `input_nodes`; returns `output_nodes` values.
    pub fn predict(&self, input: &[f32]) -> Result<Vec<f32>> {
        self.check_input(input)?;
        let inputs = Matrix::from_column(input)?;
        let (_, outputs) = self.feed_forward(&inputs)?;
        outputs.to_column_vec()
    }

    /// One step of online gradient descent on a single `(input, target)` pair.
    ///
    /// Both lengths are validated before anything is touched, and all four parameter
    /// matrices are replaced together at the end, so a failed call leaves the network
    /// unchanged.
    pub fn train(&mut self, input: &[f32], target: &[f32]) -> Result<()> {
        self.check_input(input)?;
        if target.len() != self.output_nodes {
            return Err(Error::DimensionMismatch(format!(
                "target len {} does not match output_nodes {}",
                target.len(),
                self.output_nodes
            )));
        }

        let inputs = Matrix::from_column(input)?;
        let targets = Matrix::from_column(target)?;
        let (hidden, outputs) = self.feed_forward(&inputs)?;

        // Output layer.
        let output_errors = targets.sub(&outputs)?;
        let gradient = self
            .activation
            .derivative_of(&outputs)
            .hadamard(&output_errors)?
            .scale(self.learning_rate);
        let weights_hidden_output = self
            .weights_hidden_output
            .add(&gradient.dot(&hidden.transpose())?)?;
        let bias_output = self.bias_output.add(&gradient)?;

        // Hidden layer.
        let through = match self.backprop {
            BackpropOrder::PreUpdate => &self.weights_hidden_output,
            BackpropOrder::PostUpdate => &weights_hidden_output,
        };
        let hidden_errors = through.transpose().dot(&output_errors)?;
        let hidden_gradient = self
            .activation
            .derivative_of(&hidden)
            .hadamard(&hidden_errors)?
            .scale(self.learning_rate);
        let weights_input_hidden = self
            .weights_input_hidden
            .add(&hidden_gradient.dot(&inputs.transpose())?)?;
        let bias_hidden = self.bias_hidden.add(&hidden_gradient)?;

        log::trace!(
            "train step: sq_error={} lr={}",
            output_errors.as_slice().iter().map(|e| e * e).sum::<f32>(),
            self.learning_rate
        );

        self.weights_input_hidden = weights_input_hidden;
        self.weights_hidden_output = weights_hidden_output;
        self.bias_hidden = bias_hidden;
        self.bias_output = bias_output;
        Ok(())
    }

    /// Returns `(hidden, output)` activations as column vectors.
    fn feed_forward(&self, inputs: &Matrix) -> Result<(Matrix, Matrix)> {
        let hidden = self.activation.apply(
            &self
                .weights_input_hidden
                .dot(inputs)?
                .add(&self.bias_hidden)?,
        );
        let outputs = self.activation.apply(
            &self
                .weights_hidden_output
                .dot(&hidden)?
                .add(&self.bias_output)?,
        );
        Ok((hidden, outputs))
    }

    fn check_input(&self, input: &[f32]) -> Result<()> {
        if input.len() != self.input_nodes {
            return Err(Error::DimensionMismatch(format!(
                "input len {} does not match input_nodes {}",
                input.len(),
                self.input_nodes
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_learning_rate(learning_rate: f32) -> Result<f32> {
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(Error::InvalidLearningRate(format!(
            "learning rate must be finite and > 0, got {learning_rate}"
        )));
    }
    Ok(learning_rate)
}

fn check_shape(name: &str, m: &Matrix, expected: (usize, usize)) -> Result<()> {
    if m.shape() != expected {
        return Err(Error::ShapeMismatch(format!(
            "{name} must be {}x{}, got {}x{}",
            expected.0,
            expected.1,
            m.rows(),
            m.cols()
        )));
    }
    Ok(())
}
