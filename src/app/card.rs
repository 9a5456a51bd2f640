use crate::domain::model::{Card, Product};
use crate::domain::ports::CardRenderer;
use crate::utils::error::{DisplayError, Result};

const VENDOR_FALLBACK: &str = "Premium Collection";

/// Default card presentation. Deterministic, no timing side effects;
/// everything here is string formatting.
pub struct ProductCardRenderer;

impl CardRenderer for ProductCardRenderer {
    fn render(&self, product: &Product) -> Result<Card> {
        if product.name.trim().is_empty() {
            // a nameless card is unusable on screen
            return Err(DisplayError::Render {
                product: product.id.to_string(),
                reason: "product has no display name".to_string(),
            });
        }

        let discounted = product
            .discounted_price
            .filter(|d| *d > 0.0 && *d < product.price);
        let (price, original_price) = match discounted {
            Some(d) => (format_price(d), Some(format_price(product.price))),
            None => (format_price(product.price), None),
        };

        Ok(Card {
            name: product.name.clone(),
            vendor: product
                .vendor
                .clone()
                .unwrap_or_else(|| VENDOR_FALLBACK.to_string()),
            meta: format!("{} • {}g", product.category, product.unit_weight),
            price,
            original_price,
            badge: product.strain_type.clone(),
            image_url: product.image_url.clone(),
        })
    }
}

fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}
