use anyhow::{bail, Context, Result};
use std::path::Path;
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::features::FEATURE_NAMES;

/// Pretrained fare regression model, scripted to TorchScript. The target was
/// log(price + 1) in USD at training time, so callers invert with
/// [`invert_log_price`] before display.
pub struct PriceModel {
    model: CModule,
    device: Device,
}

impl PriceModel {
    pub fn load(path: &Path) -> Result<Self> {
        let device = Device::Cpu;

        let model = CModule::load_on_device(path, device)
            .with_context(|| format!("failed to load TorchScript model at {}", path.display()))?;

        // Probe output shape with a dummy forward; expect one scalar per row
        let dummy = Tensor::zeros([1, FEATURE_NAMES.len() as i64], (Kind::Float, device));
        let out = model.forward_ts(&[dummy])?;
        let sz = out.size();
        if !matches!(sz.as_slice(), [1] | [1, 1]) {
            bail!("unexpected model output size: {:?}", sz);
        }

        Ok(Self { model, device })
    }

    /// Returns the raw log-price prediction for one feature vector.
    pub fn predict_log(&self, x: &[f32]) -> Result<f64> {
        if x.len() != FEATURE_NAMES.len() {
            bail!(
                "feature length mismatch: got {}, expected {}",
                x.len(),
                FEATURE_NAMES.len()
            );
        }

        let input = Tensor::from_slice(x)
            .reshape([1, x.len() as i64])
            .to_device(self.device);

        let out = self.model.forward_ts(&[input])?;
        Ok(out.squeeze().double_value(&[]))
    }
}

/// Inverts the log(price + 1) target transform, giving a price in the
/// model's native currency (USD).
pub fn invert_log_price(pred_log: f64) -> f64 {
    pred_log.exp_m1()
}

/// Two-decimal rounding for display prices.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
