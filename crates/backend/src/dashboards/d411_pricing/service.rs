use contracts::dashboards::common::MarginBand;
use contracts::dashboards::d411_pricing::{CategoryMarkdown, PricingResponse};

use crate::shared::data::datasets::Datasets;
use crate::shared::indicators::compute::erosion::partition;
use crate::shared::indicators::compute::primitives::reference_month;
use crate::shared::indicators::compute::products::{low_margin_curve_a, price_opportunity};
use crate::shared::indicators::compute::profitability::weighted_markdown_pct;

/// Markdown by category plus the cost-erosion lists
pub fn get_pricing(data: &Datasets) -> PricingResponse {
    let mut category_ranking: Vec<CategoryMarkdown> = data
        .monthly_sales
        .iter()
        .map(|c| CategoryMarkdown {
            category: c.category.clone(),
            revenue: c.revenue,
            markdown_pct: c.markdown_pct,
            band: MarginBand::traffic_light(c.markdown_pct),
        })
        .collect();
    category_ranking.sort_by(|a, b| b.markdown_pct.total_cmp(&a.markdown_pct));

    let erosion = partition(&data.erosion);

    PricingResponse {
        reference_month: reference_month(&data.yoy),
        weighted_markdown_pct: weighted_markdown_pct(&data.monthly_sales),
        low_margin_curve_a_count: low_margin_curve_a(&data.products).len(),
        price_opportunity: price_opportunity(&data.products),
        category_ranking,
        cost_rose: erosion.cost_rose,
        cost_fell: erosion.cost_fell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::indicators::compute::products::test_products::product;
    use contracts::projections::p910_monthly_sales::MonthlySales;
    use contracts::projections::p912_products::{CurveClass, ProductClass};
    use contracts::projections::p915_erosion_alerts::{AlertKind, ErosionAlert};

    fn sales(category: &str, revenue: f64, markdown_pct: f64) -> MonthlySales {
        MonthlySales {
            category: category.into(),
            revenue,
            gross_profit: 0.0,
            markdown_pct,
            document_count: 0.0,
        }
    }

    fn alert(product: &str, kind: AlertKind, points: f64) -> ErosionAlert {
        ErosionAlert {
            product: product.into(),
            revenue: 0.0,
            margin_pct: 0.0,
            markdown_pct: 0.0,
            last_entry_markdown_pct: 0.0,
            erosion_points: points,
            alert: kind,
        }
    }

    #[test]
    fn test_pricing_page() {
        let mut curve_a = product("Arroz", ProductClass::CashGenerator, 2000.0, 400.0);
        curve_a.curve = CurveClass::A;
        curve_a.margin_avg = 20.0;
        let data = Datasets {
            monthly_sales: vec![sales("Bebidas", 1000.0, 50.0), sales("Açougue", 3000.0, 30.0)],
            products: vec![curve_a],
            erosion: vec![
                alert("A", AlertKind::CostRose, -2.0),
                alert("B", AlertKind::CostRose, -8.0),
                alert("C", AlertKind::CostFell, 3.0),
                alert("D", AlertKind::None, 0.0),
            ],
            ..Default::default()
        };

        let r = get_pricing(&data);
        assert!((r.weighted_markdown_pct - 35.0).abs() < 1e-9);
        assert_eq!(r.category_ranking[0].category, "Bebidas");
        assert_eq!(r.category_ranking[0].band, MarginBand::Medium);
        assert_eq!(r.category_ranking[1].band, MarginBand::Critical);
        assert_eq!(r.low_margin_curve_a_count, 1);
        assert!((r.price_opportunity - 100.0).abs() < 1e-9);
        assert_eq!(r.cost_rose.iter().map(|a| a.product.as_str()).collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(r.cost_fell.len(), 1);
    }
}
