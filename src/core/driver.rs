use std::time::Duration;

use tokio::time;
use tracing::{debug, info, warn};

use crate::config::toml_config::CycleConfig;
use crate::core::selector::select_batch;
use crate::core::sequencer::PhaseSequencer;
use crate::domain::model::{Card, Product};
use crate::domain::ports::{CardRenderer, CatalogProvider, CycleObserver};
use crate::utils::error::Result;

/// The outer display loop: selects a batch, presents it, advances the cycle
/// counter, forever. Owns `cycle_index` as instance state so independent
/// drivers can run side by side and tests stay deterministic.
pub struct CycleDriver<P: CatalogProvider, R: CardRenderer> {
    provider: P,
    renderer: R,
    sequencer: PhaseSequencer,
    products_per_cycle: usize,
    reload_interval: Duration,
    cycle_index: u64,
}

impl<P: CatalogProvider, R: CardRenderer> CycleDriver<P, R> {
    pub fn new(provider: P, renderer: R, sequencer: PhaseSequencer, cycle: &CycleConfig) -> Self {
        Self {
            provider,
            renderer,
            sequencer,
            products_per_cycle: cycle.products_per_cycle,
            reload_interval: Duration::from_secs_f64(cycle.reload_interval_secs),
            cycle_index: 0,
        }
    }

    pub fn cycle_index(&self) -> u64 {
        self.cycle_index
    }

    /// Runs the display loop forever.
    pub async fn run(&mut self, observer: &mut dyn CycleObserver) -> Result<()> {
        self.run_cycles(None, observer).await
    }

    /// Bounded variant of [`run`](CycleDriver::run): stops after `limit`
    /// cycles. `None` never stops.
    ///
    /// At most one sequencer pass is ever active: the loop awaits
    /// `present` before selecting the next batch. While the catalog is
    /// empty the driver holds a no-data state, keeps `cycle_index` frozen,
    /// and re-attempts the load every reload interval. A failed load is
    /// degraded to an empty catalog rather than propagated.
    pub async fn run_cycles(
        &mut self,
        limit: Option<u64>,
        observer: &mut dyn CycleObserver,
    ) -> Result<()> {
        let mut catalog = self.load_catalog().await;
        info!(products = catalog.len(), "catalog loaded");

        let mut completed: u64 = 0;
        loop {
            if let Some(limit) = limit {
                if completed >= limit {
                    return Ok(());
                }
            }

            let batch = select_batch(&catalog, self.cycle_index, self.products_per_cycle);
            if batch.is_empty() {
                observer.on_no_data();
                info!(
                    reload_in_secs = self.reload_interval.as_secs_f64(),
                    "no products to display, waiting"
                );
                time::sleep(self.reload_interval).await;
                catalog = self.load_catalog().await;
                continue;
            }

            let cards = self.render_batch(&batch);
            if cards.is_empty() {
                // a fully unrenderable batch is skipped, but the counter
                // still advances so one poisoned batch cannot stall the loop
                warn!(cycle = self.cycle_index, "no card in the batch rendered, skipping cycle");
            } else {
                self.sequencer
                    .present(self.cycle_index, cards, observer)
                    .await?;
                observer.on_cycle_complete(self.cycle_index);
                debug!(cycle = self.cycle_index, "cycle complete");
            }

            self.cycle_index += 1;
            completed += 1;
        }
    }

    async fn load_catalog(&self) -> Vec<Product> {
        match self.provider.load_catalog().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "catalog load failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn render_batch(&self, batch: &[Product]) -> Vec<Card> {
        let mut cards = Vec::with_capacity(batch.len());
        for product in batch {
            match self.renderer.render(product) {
                Ok(card) => cards.push(card),
                Err(e) => warn!(product = product.id, error = %e, "card skipped"),
            }
        }
        cards
    }
}
