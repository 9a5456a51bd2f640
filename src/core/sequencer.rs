use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use crate::config::toml_config::{CycleConfig, LayoutConfig};
use crate::core::element::VisualElement;
use crate::core::motion::{run_tween, spawn_bob, spawn_drift, Ease, Tween};
use crate::domain::model::{Card, ElementState, Phase};
use crate::domain::ports::CycleObserver;
use crate::utils::error::{DisplayError, Result};

const ENTRANCE_STAGGER: Duration = Duration::from_millis(300);
const EXIT_STAGGER: Duration = Duration::from_millis(100);

/// Staggered off-screen start positions, left of the display.
const ENTRANCE_OFFSET_X: f32 = -600.0;
const ENTRANCE_SPACING_X: f32 = 150.0;
/// Elements start slightly below the shelf, as if submerged.
const ENTRANCE_SINK_Y: f32 = 50.0;
const ENTRANCE_ROTATION: f32 = -5.0;

/// Exit travels rightward, away from the entrance side.
const EXIT_TRAVEL_X: f32 = 1500.0;
const EXIT_ROTATION: f32 = 5.0;

const REST_SCALE: f32 = 0.9;
const BOB_AMPLITUDE: f32 = 15.0;
const DRIFT_DISTANCE: f32 = 20.0;

/// Runs one batch's visual elements through the three-phase timeline:
/// entrance, hold, exit. Exactly one sequencer pass is active at a time;
/// the driver awaits [`present`](PhaseSequencer::present) before starting
/// the next batch, so no two batches' elements ever coexist.
pub struct PhaseSequencer {
    cycle: CycleConfig,
    layout: LayoutConfig,
}

impl PhaseSequencer {
    pub fn new(cycle: CycleConfig, layout: LayoutConfig) -> Self {
        Self { cycle, layout }
    }

    /// Runs one batch through Entrance → Hold → Exit.
    ///
    /// Returns once the exit animation has finished and every element has
    /// been torn down; returning is the completion signal the driver waits
    /// on. Phases never skip, reorder, or re-enter.
    pub async fn present(
        &self,
        cycle: u64,
        cards: Vec<Card>,
        observer: &mut dyn CycleObserver,
    ) -> Result<()> {
        let mut elements = self.stage(cards);

        observer.on_phase(cycle, Phase::Entrance);
        debug!(cycle, count = elements.len(), "entrance phase");
        self.entrance(&elements).await?;

        observer.on_phase(cycle, Phase::Hold);
        debug!(cycle, "hold phase");
        self.hold(&mut elements).await;

        observer.on_phase(cycle, Phase::Exit);
        debug!(cycle, "exit phase");
        self.exit(&mut elements).await?;

        // teardown: the batch's elements and their motion state end here
        drop(elements);
        Ok(())
    }

    /// Builds the batch's elements at their off-screen start states.
    fn stage(&self, cards: Vec<Card>) -> Vec<VisualElement> {
        let shelf_y = self.layout.shelf_y as f32;
        cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| {
                let initial = ElementState {
                    x: ENTRANCE_OFFSET_X - ENTRANCE_SPACING_X * i as f32,
                    y: shelf_y + ENTRANCE_SINK_Y,
                    opacity: 0.0,
                    scale: REST_SCALE,
                    rotation: ENTRANCE_ROTATION,
                };
                VisualElement::new(card, initial)
            })
            .collect()
    }

    /// On-screen target transforms: a centered row along the shelf.
    fn layout_targets(&self, count: usize) -> Vec<ElementState> {
        let card = self.layout.card_width as f32;
        let gap = self.layout.card_gap as f32;
        let total = card * count as f32 + gap * count.saturating_sub(1) as f32;
        let start_x = (self.layout.screen_width as f32 - total) / 2.0;

        (0..count)
            .map(|i| ElementState {
                x: start_x + i as f32 * (card + gap),
                y: self.layout.shelf_y as f32,
                opacity: 1.0,
                scale: 1.0,
                rotation: 0.0,
            })
            .collect()
    }

    fn transition_duration(&self) -> Duration {
        Duration::from_secs_f64(self.cycle.transition_duration_secs)
    }

    /// Cascades every element to its shelf position. Completes only after
    /// the last staggered tween has landed.
    async fn entrance(&self, elements: &[VisualElement]) -> Result<()> {
        let duration = self.transition_duration();
        let targets = self.layout_targets(elements.len());

        let motions: Vec<JoinHandle<()>> = elements
            .iter()
            .zip(targets)
            .enumerate()
            .map(|(i, (element, target))| {
                let tween = Tween {
                    to: target,
                    duration,
                    delay: ENTRANCE_STAGGER * i as u32,
                    ease: Ease::PowerOut,
                };
                tokio::spawn(run_tween(element.state_handle(), tween))
            })
            .collect();

        join_motions(motions).await
    }

    /// Keeps the batch on screen for the configured hold duration while each
    /// element runs its own cosmetic bob and drift. The idle tasks are never
    /// awaited and never advance the timeline; the hold length is measured
    /// purely by the sleep.
    async fn hold(&self, elements: &mut [VisualElement]) {
        let hold_duration = Duration::from_secs_f64(self.cycle.cycle_duration_secs);

        for (i, element) in elements.iter_mut().enumerate() {
            let period = Duration::from_secs_f64(2.5 + 0.2 * i as f64);
            let delay = Duration::from_secs_f64(rand::rng().random_range(0.0..1.0));
            let bob = spawn_bob(element.state_handle(), BOB_AMPLITUDE, period, delay);
            let drift = spawn_drift(
                element.state_handle(),
                DRIFT_DISTANCE,
                hold_duration + Duration::from_secs(3),
            );
            element.attach_idle(bob);
            element.attach_idle(drift);
        }

        time::sleep(hold_duration).await;
    }

    /// Floats every element off the right edge, fading out. Idle motion is
    /// cancelled (and awaited) first so the exit tweens snapshot a transform
    /// nothing else is writing to.
    async fn exit(&self, elements: &mut [VisualElement]) -> Result<()> {
        for element in elements.iter_mut() {
            element.cancel_idle().await;
        }

        let duration = self.transition_duration();
        let motions: Vec<JoinHandle<()>> = elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let from = element.state();
                let tween = Tween {
                    to: ElementState {
                        x: from.x + EXIT_TRAVEL_X,
                        y: from.y,
                        opacity: 0.0,
                        scale: REST_SCALE,
                        rotation: EXIT_ROTATION,
                    },
                    duration,
                    delay: EXIT_STAGGER * i as u32,
                    ease: Ease::PowerIn,
                };
                tokio::spawn(run_tween(element.state_handle(), tween))
            })
            .collect();

        join_motions(motions).await
    }
}

async fn join_motions(handles: Vec<JoinHandle<()>>) -> Result<()> {
    for handle in handles {
        handle.await.map_err(|e| DisplayError::Motion {
            message: e.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> Card {
        Card {
            name: name.to_string(),
            vendor: "Premium Collection".to_string(),
            meta: "Flower • 3.5g".to_string(),
            price: "$35.00".to_string(),
            original_price: None,
            badge: None,
            image_url: String::new(),
        }
    }

    fn fast_sequencer() -> PhaseSequencer {
        let cycle = CycleConfig {
            cycle_duration_secs: 0.2,
            transition_duration_secs: 0.1,
            ..CycleConfig::default()
        };
        PhaseSequencer::new(cycle, LayoutConfig::default())
    }

    #[derive(Default)]
    struct RecordingObserver {
        phases: Vec<(u64, Phase)>,
    }

    impl CycleObserver for RecordingObserver {
        fn on_phase(&mut self, cycle: u64, phase: Phase) {
            self.phases.push((cycle, phase));
        }
    }

    #[test]
    fn test_targets_are_centered_on_screen() {
        let sequencer = fast_sequencer();
        let targets = sequencer.layout_targets(3);

        // 3 * 380 + 2 * 60 = 1260 wide, centered on 1920
        assert_eq!(targets[0].x, 330.0);
        assert_eq!(targets[1].x, 770.0);
        assert_eq!(targets[2].x, 1210.0);
        for target in &targets {
            assert_eq!(target.y, 280.0);
            assert_eq!(target.opacity, 1.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_entrance_lands_every_element_on_target() {
        let sequencer = fast_sequencer();
        let elements = sequencer.stage(vec![card("A"), card("B"), card("C")]);
        let targets = sequencer.layout_targets(3);

        sequencer.entrance(&elements).await.unwrap();

        for (element, target) in elements.iter().zip(targets) {
            let state = element.state();
            assert!((state.x - target.x).abs() < 0.5);
            assert!((state.y - target.y).abs() < 0.5);
            assert!((state.opacity - 1.0).abs() < 1e-3);
            assert!(state.rotation.abs() < 1e-3);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_cancels_idle_and_leaves_screen() {
        let sequencer = fast_sequencer();
        let mut elements = sequencer.stage(vec![card("A"), card("B")]);

        sequencer.entrance(&elements).await.unwrap();
        sequencer.hold(&mut elements).await;
        assert!(elements.iter().all(|e| e.idle_task_count() > 0));

        sequencer.exit(&mut elements).await.unwrap();

        for element in &elements {
            assert_eq!(element.idle_task_count(), 0);
            let state = element.state();
            assert!(state.x > 1920.0, "element still on screen at x={}", state.x);
            assert!(state.opacity < 1e-3);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_present_emits_phases_in_order() {
        let sequencer = fast_sequencer();
        let mut observer = RecordingObserver::default();

        sequencer
            .present(4, vec![card("A"), card("B"), card("C")], &mut observer)
            .await
            .unwrap();

        assert_eq!(
            observer.phases,
            vec![(4, Phase::Entrance), (4, Phase::Hold), (4, Phase::Exit)]
        );
    }
}
