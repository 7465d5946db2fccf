//! Cosmetic color descriptor for visualizing a network.

use crate::NeuralNetwork;

/// Color channels derived from parameter averages. Values are raw means (roughly in
/// `[-1, 1]` for fresh networks); mapping them onto a palette is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl NeuralNetwork {
    /// `r = mean(W_ih)`, `g = mean(W_ho)`, `b = mean(b_h ⊙ b_o)`.
    ///
    /// When `hidden_nodes != output_nodes` the bias columns differ in length and `b` is
    /// the mean over the rows they share.
    pub fn display_color(&self) -> DisplayColor {
        let bias_product = match self.bias_hidden().hadamard(self.bias_output()) {
            Ok(m) => m.average(),
            Err(_) => {
                let pairs = self
                    .bias_hidden()
                    .as_slice()
                    .iter()
                    .zip(self.bias_output().as_slice());
                let n = self.hidden_nodes().min(self.output_nodes());
                pairs.map(|(h, o)| h * o).sum::<f32>() / n as f32
            }
        };
        DisplayColor {
            r: self.weights_input_hidden().average(),
            g: self.weights_hidden_output().average(),
            b: bias_product,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Matrix, NeuralNetwork};

    fn col(values: &[f32]) -> Matrix {
        Matrix::from_column(values).unwrap()
    }

    #[test]
    fn channels_are_parameter_means() {
        let mut nn = NeuralNetwork::new_uninitialized(1, 2, 2).unwrap();
        nn.set_weights_input_hidden(col(&[0.2, 0.4])).unwrap();
        nn.set_weights_hidden_output(Matrix::from_vec(2, 2, vec![1.0, 0.0, 0.0, -1.0]).unwrap())
            .unwrap();
        nn.set_bias_hidden(col(&[0.5, 2.0])).unwrap();
        nn.set_bias_output(col(&[4.0, -1.0])).unwrap();

        let c = nn.display_color();
        assert!((c.r - 0.3).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        // (0.5 * 4 + 2 * -1) / 2
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn blue_uses_shared_rows_when_bias_lengths_differ() {
        let mut nn = NeuralNetwork::new_uninitialized(1, 3, 1).unwrap();
        nn.set_bias_hidden(col(&[2.0, 5.0, 7.0])).unwrap();
        nn.set_bias_output(col(&[3.0])).unwrap();
        assert_eq!(nn.display_color().b, 6.0);
    }

    #[test]
    fn color_is_deterministic() {
        let nn = NeuralNetwork::new_with_seed(3, 3, 3, 8).unwrap();
        assert_eq!(nn.display_color(), nn.clone().display_color());
        assert!(nn.display_color().r.is_finite());
    }
}
