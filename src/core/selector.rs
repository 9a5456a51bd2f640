use crate::domain::model::Product;

/// Computes the fixed-size wrapping slice of the catalog shown in one cycle.
///
/// The batch starts at `(cycle_index * per_cycle) % len` and wraps around the
/// end of the catalog, so consecutive cycles walk the catalog round-robin.
/// Catalogs shorter than `per_cycle` repeat items within the batch. An empty
/// catalog yields an empty batch, which callers must not present.
pub fn select_batch(catalog: &[Product], cycle_index: u64, per_cycle: usize) -> Vec<Product> {
    if catalog.is_empty() || per_cycle == 0 {
        return Vec::new();
    }

    let len = catalog.len();
    let start = ((cycle_index as u128 * per_cycle as u128) % len as u128) as usize;

    (0..per_cycle)
        .map(|i| catalog[(start + i) % len].clone())
        .collect()
}
