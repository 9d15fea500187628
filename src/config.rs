use anyhow::{ensure, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// Geocoding results are restricted to this country.
pub const GEOCODE_COUNTRY: &str = "SE";

/// Per-request timeouts against OpenRouteService. Directions responses can
/// legitimately take longer than geocoding, hence the larger limit.
pub const GEOCODE_TIMEOUT: Duration = Duration::from_secs(30);
pub const ROUTE_TIMEOUT: Duration = Duration::from_secs(40);

/// Fixed conversion applied to the model's native USD prediction before the
/// price is reported.
pub const USD_TO_SEK: f64 = 10.5;

#[derive(Debug)]
pub struct Settings {
    pub model_path: PathBuf,
    pub train_path: PathBuf,
    pub ors_api_key: String,
    pub port: u16,
}

impl Settings {
    /// Reads process configuration once at startup. Missing credential or
    /// missing data files abort here, before any traffic is served.
    pub fn from_env() -> Result<Self> {
        let model_path = PathBuf::from(
            std::env::var("MODEL_PATH").unwrap_or_else(|_| "models/taxi_price_model.pt".to_string()),
        );
        let train_path = PathBuf::from(
            std::env::var("TRAIN_PATH").unwrap_or_else(|_| "data/df_train.csv".to_string()),
        );
        let ors_api_key = std::env::var("ORS_API_KEY").context(
            "Missing ORS_API_KEY environment variable. Set it before running the backend (do NOT hardcode keys).",
        )?;
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        ensure!(
            model_path.exists(),
            "Model not found at: {}",
            model_path.display()
        );
        ensure!(
            train_path.exists(),
            "Training data not found at: {}",
            train_path.display()
        );

        Ok(Self {
            model_path,
            train_path,
            ors_api_key,
            port,
        })
    }
}
