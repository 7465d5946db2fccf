//! Supervised samples for [`NeuralNetwork::fit`](crate::NeuralNetwork::fit).
//!
//! Inputs and targets live in two contiguous row-major buffers so iterating over an
//! epoch hands out plain slices.

use crate::{Error, Result};

/// Input rows (X) paired with target rows (Y).
///
/// - `inputs.len() == len * input_dim`
/// - `targets.len() == len * target_dim`
#[derive(Debug, Clone)]
pub struct Dataset {
    inputs: Vec<f32>,
    targets: Vec<f32>,
    len: usize,
    input_dim: usize,
    target_dim: usize,
}

impl Dataset {
    /// Build from flat buffers shaped `(len, input_dim)` and `(len, target_dim)`.
    pub fn from_flat(
        inputs: Vec<f32>,
        targets: Vec<f32>,
        input_dim: usize,
        target_dim: usize,
    ) -> Result<Self> {
        if input_dim == 0 || target_dim == 0 {
            return Err(Error::InvalidConfig(format!(
                "input_dim and target_dim must be > 0, got {input_dim} and {target_dim}"
            )));
        }
        if !inputs.len().is_multiple_of(input_dim) {
            return Err(Error::InvalidConfig(format!(
                "inputs length {} is not divisible by input_dim {input_dim}",
                inputs.len()
            )));
        }

        let len = inputs.len() / input_dim;
        if targets.len() != len * target_dim {
            return Err(Error::InvalidConfig(format!(
                "targets length {} does not match len * target_dim ({len} * {target_dim})",
                targets.len()
            )));
        }

        Ok(Self {
            inputs,
            targets,
            len,
            input_dim,
            target_dim,
        })
    }

    /// Build from per-sample rows (copied into contiguous storage).
    pub fn from_rows(inputs: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(Error::InvalidConfig(format!(
                "inputs/targets length mismatch: {} vs {}",
                inputs.len(),
                targets.len()
            )));
        }
        let input_dim = inputs.first().map_or(0, Vec::len);
        let target_dim = targets.first().map_or(0, Vec::len);

        Self::from_flat(
            flatten(inputs, input_dim, "input")?,
            flatten(targets, target_dim, "target")?,
            input_dim,
            target_dim,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    pub fn target_dim(&self) -> usize {
        self.target_dim
    }

    /// Panics if `idx >= len`.
    #[inline]
    pub fn input(&self, idx: usize) -> &[f32] {
        let start = idx * self.input_dim;
        &self.inputs[start..start + self.input_dim]
    }

    /// Panics if `idx >= len`.
    #[inline]
    pub fn target(&self, idx: usize) -> &[f32] {
        let start = idx * self.target_dim;
        &self.targets[start..start + self.target_dim]
    }

    /// `(input, target)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32], &[f32])> {
        (0..self.len).map(|idx| (self.input(idx), self.target(idx)))
    }
}

fn flatten(rows: &[Vec<f32>], dim: usize, what: &str) -> Result<Vec<f32>> {
    let mut flat = Vec::with_capacity(rows.len() * dim);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(Error::InvalidConfig(format!(
                "{what} row {i} has len {}, expected {dim}",
                row.len()
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok(flat)
}
