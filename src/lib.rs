pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::DisplayConfig;

pub use app::card::ProductCardRenderer;
pub use app::catalog::{FileCatalogProvider, HttpCatalogProvider};
pub use crate::core::{driver::CycleDriver, selector::select_batch, sequencer::PhaseSequencer};
pub use domain::model::{Card, ElementState, Phase, Product};
pub use domain::ports::{CardRenderer, CatalogProvider, CycleObserver, NoOpObserver};
pub use utils::error::{DisplayError, Result};
