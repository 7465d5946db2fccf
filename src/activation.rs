//! Activation functions.
//!
//! Each layer computes `z = W x + b` and then `y = activation(z)` entry by entry. Only
//! `y` is kept, so every derivative here is written in terms of the post-activation
//! output: `dy/dz = f'(y)`. Keeping forward and derivative on the same enum variant means
//! they can never be paired incorrectly.

use crate::{Error, Matrix, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Element-wise activation function.
pub enum Activation {
    #[default]
    Sigmoid,
    Tanh,
    ReLU,
    LeakyReLU {
        alpha: f32,
    },
    Identity,
}

impl Activation {
    /// Validate activation parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Activation::LeakyReLU { alpha } => {
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "leaky ReLU alpha must be finite and >= 0, got {alpha}"
                    )));
                }
            }
            Activation::Sigmoid | Activation::Tanh | Activation::ReLU | Activation::Identity => {}
        }

        Ok(())
    }

    #[inline]
    pub fn forward(self, x: f32) -> f32 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => x.max(0.0),
            Activation::LeakyReLU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            Activation::Identity => x,
        }
    }

    /// Derivative with respect to the pre-activation input, given the output `y`.
    #[inline]
    pub fn derivative(self, y: f32) -> f32 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Tanh => 1.0 - y * y,
            Activation::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::LeakyReLU { alpha } => {
                if y > 0.0 {
                    1.0
                } else {
                    alpha
                }
            }
            Activation::Identity => 1.0,
        }
    }

    /// `forward` over every entry of `z`.
    pub(crate) fn apply(self, z: &Matrix) -> Matrix {
        z.map(|v, _, _| self.forward(v))
    }

    /// `derivative` over every entry of an already-activated `y`.
    pub(crate) fn derivative_of(self, y: &Matrix) -> Matrix {
        y.map(|v, _, _| self.derivative(v))
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
