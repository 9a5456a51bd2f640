use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::config::toml_config::{AmbientConfig, LayoutConfig};
use crate::core::motion::{run_tween, Ease, Tween, FRAME};
use crate::domain::model::ElementState;

const RIVERBED_ZOOM: f32 = 1.15;
const RIVERBED_PERIOD: Duration = Duration::from_secs(30);
const DECOR_BOB_AMPLITUDE: f32 = 30.0;
/// Sprites start just left of the screen and leave past the right edge.
const DECOR_MARGIN: f32 = 200.0;

/// Decorative background motion, independent of the product cycle: a slow
/// riverbed parallax, two diagonal water-flow layers, and a handful of decor
/// sprites drifting across the screen. Everything here is fire-and-forget;
/// nothing interacts with the batch timeline, and dropping the scene aborts
/// every task.
pub struct AmbientScene {
    layers: Vec<AmbientLayer>,
}

struct AmbientLayer {
    name: String,
    state: Arc<Mutex<ElementState>>,
    task: JoinHandle<()>,
}

impl AmbientScene {
    pub fn launch(config: &AmbientConfig, layout: &LayoutConfig) -> Self {
        let mut layers = Vec::new();

        let riverbed = shared_state(1.0);
        layers.push(AmbientLayer {
            name: "riverbed".to_string(),
            state: Arc::clone(&riverbed),
            task: spawn_parallax(riverbed),
        });

        for (i, (dx, dy, secs)) in [(-500.0, 200.0, 40u64), (-300.0, 100.0, 60u64)]
            .into_iter()
            .enumerate()
        {
            let flow = shared_state(1.0);
            layers.push(AmbientLayer {
                name: format!("flow-layer-{}", i + 1),
                state: Arc::clone(&flow),
                task: spawn_flow_layer(flow, dx, dy, Duration::from_secs(secs)),
            });
        }

        let screen_width = layout.screen_width as f32;
        let screen_height = layout.screen_height as f32;
        for i in 0..config.decor_count {
            let sprite = shared_state(0.3);
            layers.push(AmbientLayer {
                name: format!("decor-{}", i),
                state: Arc::clone(&sprite),
                task: spawn_decor(sprite, screen_width, screen_height),
            });
        }

        debug!(layers = layers.len(), "ambient scene launched");
        Self { layers }
    }

    /// Current transforms, for a presenter or a debug overlay.
    pub fn snapshot(&self) -> Vec<(String, ElementState)> {
        self.layers
            .iter()
            .map(|layer| {
                (
                    layer.name.clone(),
                    *layer.state.lock().expect("ambient state lock"),
                )
            })
            .collect()
    }
}

impl Drop for AmbientScene {
    fn drop(&mut self) {
        for layer in &self.layers {
            layer.task.abort();
        }
    }
}

fn shared_state(scale: f32) -> Arc<Mutex<ElementState>> {
    Arc::new(Mutex::new(ElementState {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale,
        rotation: 0.0,
    }))
}

/// Very subtle zoom on the backdrop, in and out forever.
fn spawn_parallax(state: Arc<Mutex<ElementState>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let base = *state.lock().expect("ambient state lock");
        let zoomed = ElementState {
            scale: RIVERBED_ZOOM,
            ..base
        };
        loop {
            for target in [zoomed, base] {
                run_tween(
                    Arc::clone(&state),
                    Tween {
                        to: target,
                        duration: RIVERBED_PERIOD,
                        delay: Duration::ZERO,
                        ease: Ease::SineInOut,
                    },
                )
                .await;
            }
        }
    })
}

/// Diagonal texture scroll: drift to the offset, then wrap back to the
/// origin, which reads as a seamless loop on a repeating texture.
fn spawn_flow_layer(
    state: Arc<Mutex<ElementState>>,
    dx: f32,
    dy: f32,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let origin = *state.lock().expect("ambient state lock");
        let shifted = ElementState {
            x: origin.x + dx,
            y: origin.y + dy,
            ..origin
        };
        loop {
            run_tween(
                Arc::clone(&state),
                Tween {
                    to: shifted,
                    duration: period,
                    delay: Duration::ZERO,
                    ease: Ease::Linear,
                },
            )
            .await;
            *state.lock().expect("ambient state lock") = origin;
        }
    })
}

/// One decor sprite crossing the screen left to right, slowly rotating and
/// bobbing, then re-entering with a fresh placement. Single writer for the
/// whole transform, so drift and bob cannot fight over the same fields.
fn spawn_decor(
    state: Arc<Mutex<ElementState>>,
    screen_width: f32,
    screen_height: f32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let (start_y, scale, rotation, crossing_secs, bob_period) = {
                // the thread-local rng must not live across an await
                let mut rng = rand::rng();
                (
                    rng.random_range(50.0..screen_height - 130.0),
                    rng.random_range(0.2..0.5f32),
                    rng.random_range(0.0..360.0f32),
                    rng.random_range(25.0..40.0f64),
                    rng.random_range(3.0..5.0f32),
                )
            };

            *state.lock().expect("ambient state lock") = ElementState {
                x: -DECOR_MARGIN,
                y: start_y,
                opacity: 0.8,
                scale,
                rotation,
            };

            let duration = Duration::from_secs_f64(crossing_secs);
            let travel = screen_width + 2.0 * DECOR_MARGIN;
            let start = Instant::now();
            let mut ticker = time::interval(FRAME);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let elapsed = start.elapsed().as_secs_f32();
                let t = (elapsed / duration.as_secs_f32()).min(1.0);
                let bob = DECOR_BOB_AMPLITUDE
                    * 0.5
                    * (1.0 - (std::f32::consts::TAU * elapsed / bob_period).cos());
                {
                    let mut s = state.lock().expect("ambient state lock");
                    s.x = -DECOR_MARGIN + travel * t;
                    s.y = start_y + bob;
                    s.rotation = rotation + 180.0 * t;
                }
                if t >= 1.0 {
                    break;
                }
            }
        }
    })
}
