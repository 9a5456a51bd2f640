use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::domain::model::ElementState;

/// Frame step for tween and idle-motion loops.
pub const FRAME: Duration = Duration::from_millis(16);

/// Easing profiles used by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Accelerates out of the start position (quadratic).
    PowerIn,
    /// Decelerates into the final position (quadratic).
    PowerOut,
    SineInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn => t * t,
            Ease::PowerOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}

/// A timed move of one element to an absolute target state.
#[derive(Debug, Clone)]
pub struct Tween {
    pub to: ElementState,
    pub duration: Duration,
    pub delay: Duration,
    pub ease: Ease,
}

fn lerp(a: f32, b: f32, k: f32) -> f32 {
    a + (b - a) * k
}

fn blend(from: &ElementState, to: &ElementState, k: f32) -> ElementState {
    ElementState {
        x: lerp(from.x, to.x, k),
        y: lerp(from.y, to.y, k),
        opacity: lerp(from.opacity, to.opacity, k),
        scale: lerp(from.scale, to.scale, k),
        rotation: lerp(from.rotation, to.rotation, k),
    }
}

/// Drives one tween to completion, writing the shared state every frame.
///
/// The start state is snapshotted after the delay elapses, so a staggered
/// tween picks up wherever earlier writers left the element.
pub async fn run_tween(state: Arc<Mutex<ElementState>>, tween: Tween) {
    if !tween.delay.is_zero() {
        time::sleep(tween.delay).await;
    }

    let from = *state.lock().expect("element state lock");
    if tween.duration.is_zero() {
        *state.lock().expect("element state lock") = tween.to;
        return;
    }

    let start = Instant::now();
    let mut ticker = time::interval(FRAME);
    // the first interval tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let t = (start.elapsed().as_secs_f32() / tween.duration.as_secs_f32()).min(1.0);
        let next = blend(&from, &tween.to, tween.ease.apply(t));
        *state.lock().expect("element state lock") = next;
        if t >= 1.0 {
            break;
        }
    }
}

/// Spawns an endless cosine bob on the y axis around the base captured at
/// start. Never completes on its own; the owning element aborts it at the
/// next phase boundary.
pub fn spawn_bob(
    state: Arc<Mutex<ElementState>>,
    amplitude: f32,
    period: Duration,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
        let base = state.lock().expect("element state lock").y;
        let start = Instant::now();
        let mut ticker = time::interval(FRAME);
        loop {
            ticker.tick().await;
            let t = start.elapsed().as_secs_f32() / period.as_secs_f32();
            let offset = amplitude * 0.5 * (1.0 - (std::f32::consts::TAU * t).cos());
            state.lock().expect("element state lock").y = base + offset;
        }
    })
}

/// Spawns a one-shot linear drift on the x axis over `duration`.
pub fn spawn_drift(
    state: Arc<Mutex<ElementState>>,
    distance: f32,
    duration: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let base = state.lock().expect("element state lock").x;
        let start = Instant::now();
        let mut ticker = time::interval(FRAME);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let t = (start.elapsed().as_secs_f32() / duration.as_secs_f32()).min(1.0);
            state.lock().expect("element state lock").x = base + distance * t;
            if t >= 1.0 {
                break;
            }
        }
    })
}
