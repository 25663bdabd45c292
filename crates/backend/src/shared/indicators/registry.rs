use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::executive;
use super::metadata::ids;
use crate::shared::data::datasets::Datasets;

type ComputeFn = fn(&Datasets, FixedCost) -> IndicatorValue;

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::revenue().0, executive::compute_revenue);
        fns.insert(ids::gross_profit().0, executive::compute_gross_profit);
        fns.insert(ids::net_profit().0, executive::compute_net_profit);
        fns.insert(ids::net_margin().0, executive::compute_net_margin);
        fns.insert(ids::break_even().0, executive::compute_break_even);
        fns.insert(ids::coupons().0, executive::compute_coupons);
        fns.insert(ids::average_ticket().0, executive::compute_average_ticket);
        fns.insert(ids::active_skus().0, executive::compute_active_skus);

        Self { fns }
    }

    /// Compute a batch of indicators, in request order.
    pub fn compute(&self, ids: &[IndicatorId], data: &Datasets, fixed_cost: FixedCost) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                results.push(compute_fn(data, fixed_cost));
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::indicators::metadata::build_catalog;

    #[test]
    fn test_every_catalog_indicator_is_registered() {
        let registry = IndicatorRegistry::new();
        let ids: Vec<IndicatorId> = build_catalog().indicators.into_iter().map(|m| m.id).collect();
        let values = registry.compute(&ids, &Datasets::default(), FixedCost::default());
        assert_eq!(values.len(), ids.len());
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let registry = IndicatorRegistry::new();
        let ids = vec![IndicatorId::new("nope"), ids::coupons()];
        let values = registry.compute(&ids, &Datasets::default(), FixedCost::default());
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].id, ids::coupons());
    }
}
