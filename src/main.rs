use std::net::SocketAddr;
use std::sync::Arc;

use taxi_predictor::api::{self, AppState};
use taxi_predictor::config::Settings;
use taxi_predictor::data::TrainTable;
use taxi_predictor::features::FEATURE_NAMES;
use taxi_predictor::model::PriceModel;
use taxi_predictor::ors::OrsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;

    let model = PriceModel::load(&settings.model_path)?;
    // Warmup to ensure the scripted graph runs before we accept traffic
    let _ = model.predict_log(&[0.0; FEATURE_NAMES.len()])?;
    tracing::info!(
        "loaded model from {}; {} input features",
        settings.model_path.display(),
        FEATURE_NAMES.len()
    );

    let train = TrainTable::load(&settings.train_path)?;
    tracing::info!(
        "loaded training table from {} ({} rows)",
        settings.train_path.display(),
        train.len()
    );

    let ors = OrsClient::new(settings.ors_api_key.clone());

    let state = AppState {
        model: Arc::new(model),
        train: Arc::new(train),
        ors: Arc::new(ors),
    };

    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
