use std::cmp::Ordering;

use contracts::dashboards::common::ProductLine;
use contracts::projections::p912_products::{CurveClass, Product, ProductClass};

/// Curve-A products below this margin are candidates for a price increase
pub const LOW_MARGIN_PCT: f64 = 35.0;
/// Assumed price adjustment when estimating the opportunity
pub const PRICE_ADJUSTMENT: f64 = 0.05;
/// Share of total profit used for the concentration count
pub const CONCENTRATION_SHARE: f64 = 0.8;

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

pub fn of_class(products: &[Product], class: ProductClass) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.classification == class)
        .collect()
}

pub fn curve_a_count(products: &[Product]) -> usize {
    products.iter().filter(|p| p.curve == CurveClass::A).count()
}

/// Products sorted by profit, best first; stable for equal profits.
pub fn by_profit_desc<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    let mut sorted: Vec<&Product> = products.into_iter().collect();
    sorted.sort_by(|a, b| descending(a.profit_total, b.profit_total));
    sorted
}

/// Products sorted by revenue, best first; stable for equal revenue.
pub fn by_revenue_desc<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    let mut sorted: Vec<&Product> = products.into_iter().collect();
    sorted.sort_by(|a, b| descending(a.revenue_total, b.revenue_total));
    sorted
}

/// How many products, best first, it takes to reach 80% of total profit.
pub fn profit_concentration_count(products: &[Product]) -> usize {
    let total: f64 = products.iter().map(|p| p.profit_total).sum();
    let threshold = total * CONCENTRATION_SHARE;
    let mut running = 0.0;
    let mut count = 0;
    for product in by_profit_desc(products) {
        running += product.profit_total;
        count += 1;
        if running >= threshold {
            break;
        }
    }
    count
}

/// Curve-A products with margin below [`LOW_MARGIN_PCT`].
pub fn low_margin_curve_a(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.curve == CurveClass::A && p.margin_avg < LOW_MARGIN_PCT)
        .collect()
}

/// Extra monthly revenue from a 5% increase on low-margin curve-A products.
pub fn price_opportunity(products: &[Product]) -> f64 {
    low_margin_curve_a(products)
        .iter()
        .map(|p| p.revenue_total)
        .sum::<f64>()
        * PRICE_ADJUSTMENT
}

pub fn to_line(product: &Product) -> ProductLine {
    ProductLine {
        name: product.name.clone(),
        days_sold: product.days_sold,
        margin_pct: product.margin_avg,
        revenue: product.revenue_total,
        profit: product.profit_total,
    }
}

#[cfg(test)]
pub(crate) mod test_products {
    use contracts::projections::p912_products::{CurveClass, Product, ProductClass};

    pub fn product(name: &str, class: ProductClass, revenue: f64, profit: f64) -> Product {
        Product {
            name: name.into(),
            category: String::new(),
            curve: CurveClass::Other,
            classification: class,
            revenue_total: revenue,
            profit_total: profit,
            margin_avg: 0.0,
            turnover: 0.0,
            days_sold: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_products::product;
    use super::*;

    fn with_profits(profits: &[f64]) -> Vec<Product> {
        profits
            .iter()
            .enumerate()
            .map(|(i, p)| product(&format!("P{i}"), ProductClass::Star, 0.0, *p))
            .collect()
    }

    #[test]
    fn test_concentration_count() {
        assert_eq!(profit_concentration_count(&with_profits(&[50.0, 30.0, 10.0, 10.0])), 2);
        assert_eq!(profit_concentration_count(&with_profits(&[10.0, 30.0, 10.0, 50.0])), 2);
        assert_eq!(profit_concentration_count(&with_profits(&[25.0, 25.0, 25.0, 25.0])), 4);
        assert_eq!(profit_concentration_count(&[]), 0);
    }

    #[test]
    fn test_price_opportunity() {
        let mut a = product("A1", ProductClass::Star, 1000.0, 200.0);
        a.curve = CurveClass::A;
        a.margin_avg = 20.0;
        let mut b = product("A2", ProductClass::Star, 4000.0, 2000.0);
        b.curve = CurveClass::A;
        b.margin_avg = 50.0;
        let mut c = product("B1", ProductClass::Star, 9000.0, 100.0);
        c.margin_avg = 10.0;
        let products = vec![a, b, c];

        assert_eq!(low_margin_curve_a(&products).len(), 1);
        assert!((price_opportunity(&products) - 50.0).abs() < 1e-9);
        assert_eq!(curve_a_count(&products), 2);
    }

    #[test]
    fn test_sorting_is_stable() {
        let products = vec![
            product("first", ProductClass::Star, 10.0, 5.0),
            product("second", ProductClass::Star, 30.0, 5.0),
            product("third", ProductClass::Star, 20.0, 9.0),
        ];
        let names: Vec<&str> = by_profit_desc(&products).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
        let names: Vec<&str> = by_revenue_desc(&products).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["second", "third", "first"]);
    }
}
