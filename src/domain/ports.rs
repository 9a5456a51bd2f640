use crate::domain::model::{Card, Phase, Product};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of the product catalog. A single call is one best-effort load
/// attempt; the cycle driver degrades a failure to an empty catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load_catalog(&self) -> Result<Vec<Product>>;
}

/// Maps one product to its card presentation. Pure: no timing, no side
/// effects. A failure here skips the product, never the whole cycle.
pub trait CardRenderer: Send + Sync {
    fn render(&self, product: &Product) -> Result<Card>;
}

/// Hooks invoked by the cycle driver as the display progresses.
///
/// Implementations can mirror the display state elsewhere or record the
/// phase sequence in tests. All hooks default to no-ops.
pub trait CycleObserver: Send {
    /// A phase of the given cycle has started.
    fn on_phase(&mut self, _cycle: u64, _phase: Phase) {}

    /// The given cycle finished its exit phase and was torn down.
    fn on_cycle_complete(&mut self, _cycle: u64) {}

    /// The catalog is empty; the driver is waiting before reloading.
    fn on_no_data(&mut self) {}
}

/// Observer that ignores every event.
pub struct NoOpObserver;

impl CycleObserver for NoOpObserver {}
