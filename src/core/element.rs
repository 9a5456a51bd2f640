use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::domain::model::{Card, ElementState};

/// One product's rendered presence on screen for the lifetime of a single
/// batch. Owns the shared transform written by tweens and any idle-motion
/// tasks attached during the hold phase. Never shared across batches.
pub struct VisualElement {
    pub card: Card,
    state: Arc<Mutex<ElementState>>,
    idle: Vec<JoinHandle<()>>,
}

impl VisualElement {
    pub fn new(card: Card, initial: ElementState) -> Self {
        Self {
            card,
            state: Arc::new(Mutex::new(initial)),
            idle: Vec::new(),
        }
    }

    /// Shared handle for tween and idle-motion writers.
    pub fn state_handle(&self) -> Arc<Mutex<ElementState>> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> ElementState {
        *self.state.lock().expect("element state lock")
    }

    /// Tracks a fire-and-forget idle task so it can be cancelled at the next
    /// phase boundary instead of completing naturally.
    pub fn attach_idle(&mut self, handle: JoinHandle<()>) {
        self.idle.push(handle);
    }

    pub fn idle_task_count(&self) -> usize {
        self.idle.len()
    }

    /// Aborts every idle task and waits for each to wind down, so the next
    /// phase starts from a transform nothing else is writing to.
    pub async fn cancel_idle(&mut self) {
        for handle in self.idle.drain(..) {
            handle.abort();
            // a JoinError from an aborted task carries nothing we need
            let _ = handle.await;
        }
    }
}

impl Drop for VisualElement {
    fn drop(&mut self) {
        for handle in &self.idle {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::motion::spawn_bob;
    use std::time::Duration;

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

    fn initial() -> ElementState {
        ElementState {
            x: -600.0,
            y: 330.0,
            opacity: 0.0,
            scale: 0.9,
            rotation: -5.0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_idle_drains_all_handles() {
        let mut element = VisualElement::new(card("River Haze"), initial());
        for _ in 0..2 {
            element.attach_idle(spawn_bob(
                element.state_handle(),
                15.0,
                Duration::from_millis(500),
                Duration::ZERO,
            ));
        }
        assert_eq!(element.idle_task_count(), 2);

        element.cancel_idle().await;
        assert_eq!(element.idle_task_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_writes_are_visible_through_handle() {
        let element = VisualElement::new(card("River Haze"), initial());
        element.state_handle().lock().unwrap().opacity = 1.0;
        assert_eq!(element.state().opacity, 1.0);
    }
}
