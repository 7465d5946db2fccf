use crate::{Dataset, Error, NeuralNetwork, Result, loss};

#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    pub epochs: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self { epochs: 10 }
    }
}

impl FitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FitReport {
    /// Mean MSE over the dataset after each epoch.
    pub epoch_losses: Vec<f32>,
    pub final_loss: f32,
}

impl NeuralNetwork {
    /// Online training: `epochs` passes over `data`, one [`train`](Self::train) step per
    /// sample, in dataset order.
    pub fn fit(&mut self, data: &Dataset, cfg: FitConfig) -> Result<FitReport> {
        cfg.validate()?;
        self.check_dataset(data)?;

        let mut epoch_losses = Vec::with_capacity(cfg.epochs);
        for epoch in 0..cfg.epochs {
            for (input, target) in data.iter() {
                self.train(input, target)?;
            }
            let loss = self.evaluate_mse(data)?;
            log::debug!("epoch {}/{}: mse={loss}", epoch + 1, cfg.epochs);
            epoch_losses.push(loss);
        }

        let final_loss = epoch_losses.last().copied().unwrap_or(f32::NAN);
        Ok(FitReport {
            epoch_losses,
            final_loss,
        })
    }

    /// Mean per-sample MSE over `data`.
    pub fn evaluate_mse(&self, data: &Dataset) -> Result<f32> {
        self.check_dataset(data)?;

        let mut total = 0.0_f32;
        for (input, target) in data.iter() {
            total += loss::mse(&self.predict(input)?, target);
        }
        Ok(total / data.len() as f32)
    }

    fn check_dataset(&self, data: &Dataset) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidConfig("dataset must not be empty".to_owned()));
        }
        if data.input_dim() != self.input_nodes() {
            return Err(Error::DimensionMismatch(format!(
                "dataset input_dim {} does not match input_nodes {}",
                data.input_dim(),
                self.input_nodes()
            )));
        }
        if data.target_dim() != self.output_nodes() {
            return Err(Error::DimensionMismatch(format!(
                "dataset target_dim {} does not match output_nodes {}",
                data.target_dim(),
                self.output_nodes()
            )));
        }
        Ok(())
    }
}
