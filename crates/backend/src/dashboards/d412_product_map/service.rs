use contracts::dashboards::common::ProductLine;
use contracts::dashboards::d412_product_map::{ClassGroup, ProductMapResponse};
use contracts::projections::p912_products::ProductClass;

use crate::shared::data::datasets::Datasets;
use crate::shared::indicators::compute::primitives::reference_month;
use crate::shared::indicators::compute::products::{
    by_profit_desc, by_revenue_desc, of_class, profit_concentration_count, to_line,
};

const SHORT_LIST: usize = 15;

/// Products grouped by classification, with the ranked lists per group
pub fn get_product_map(data: &Datasets) -> ProductMapResponse {
    let products = &data.products;

    let groups = ProductClass::ALL
        .into_iter()
        .map(|class| {
            let members = of_class(products, class);
            ClassGroup {
                classification: class,
                label: class.label().to_string(),
                count: members.len(),
                profit: members.iter().map(|p| p.profit_total).sum(),
            }
        })
        .collect();

    let ranked = |class: ProductClass, by_profit: bool, limit: Option<usize>| -> Vec<ProductLine> {
        let members = of_class(products, class);
        let sorted = if by_profit {
            by_profit_desc(members)
        } else {
            by_revenue_desc(members)
        };
        sorted
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(to_line)
            .collect()
    };

    ProductMapResponse {
        reference_month: reference_month(&data.yoy),
        total_products: products.len(),
        groups,
        profit_concentration_count: profit_concentration_count(products),
        stars: ranked(ProductClass::Star, true, None),
        cash_generators: ranked(ProductClass::CashGenerator, false, None),
        opportunities: ranked(ProductClass::Opportunity, true, Some(SHORT_LIST)),
        dead_weight: ranked(ProductClass::DeadWeight, false, Some(SHORT_LIST)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::indicators::compute::products::test_products::product;

    #[test]
    fn test_groups_and_lists() {
        let mut products = vec![
            product("S1", ProductClass::Star, 100.0, 50.0),
            product("S2", ProductClass::Star, 300.0, 80.0),
            product("G1", ProductClass::CashGenerator, 900.0, 10.0),
            product("G2", ProductClass::CashGenerator, 1200.0, 5.0),
        ];
        for i in 0..20 {
            products.push(product(&format!("D{i}"), ProductClass::DeadWeight, i as f64, 0.0));
        }
        let r = get_product_map(&Datasets {
            products,
            ..Default::default()
        });

        assert_eq!(r.total_products, 24);
        let star = r.groups.iter().find(|g| g.classification == ProductClass::Star).unwrap();
        assert_eq!(star.count, 2);
        assert_eq!(star.profit, 130.0);
        assert_eq!(r.groups.len(), ProductClass::ALL.len());

        assert_eq!(r.stars[0].name, "S2");
        assert_eq!(r.cash_generators[0].name, "G2");
        assert!(r.opportunities.is_empty());
        assert_eq!(r.dead_weight.len(), 15);
        assert_eq!(r.dead_weight[0].name, "D19");
    }
}
