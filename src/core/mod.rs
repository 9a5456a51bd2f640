pub mod driver;
pub mod element;
pub mod motion;
pub mod selector;
pub mod sequencer;

pub use crate::domain::model::{Card, ElementState, Phase, Product};
pub use crate::domain::ports::{CardRenderer, CatalogProvider, CycleObserver, NoOpObserver};
pub use crate::utils::error::Result;
