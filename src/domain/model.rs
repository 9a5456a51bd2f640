use serde::{Deserialize, Serialize};

/// One catalog entry. Owned by the catalog provider and read-only to the
/// display core; the catalog is fixed for the lifetime of one load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    /// Absent, zero, or not-below-price means "no discount".
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "unitWeight")]
    pub unit_weight: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, rename = "strainType")]
    pub strain_type: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
}

/// Rendered presentation of one product, ready to be put on a card.
/// All formatting decisions (discount strike-through, vendor fallback)
/// happen when this is built; the animation core never looks inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub vendor: String,
    pub meta: String,
    pub price: String,
    /// Struck-through original price, present only when a discount applies.
    pub original_price: Option<String>,
    pub badge: Option<String>,
    pub image_url: String,
}

/// Stage of a batch's timeline. Strictly forward, one pass per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entrance,
    Hold,
    Exit,
}

/// Mutable on-screen transform of one visual element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementState {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
    pub rotation: f32,
}
