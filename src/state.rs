use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{Config, PlotConfig};
use crate::dataset::Dataset;

/// Shared, read-only state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub plot: PlotConfig,
}

impl AppState {
    pub fn new(dataset: Dataset, plot: PlotConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            plot,
        }
    }

    /// Load the configured dataset off the async runtime
    pub async fn load(cfg: &Config) -> Result<Self> {
        let path = cfg.dataset.path.clone();
        let dataset = tokio::task::spawn_blocking(move || Dataset::load(path))
            .await
            .context("dataset loader panicked")??;
        Ok(Self::new(dataset, cfg.plot.clone()))
    }
}
