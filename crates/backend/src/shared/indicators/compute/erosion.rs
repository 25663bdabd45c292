use contracts::projections::p915_erosion_alerts::{AlertKind, ErosionAlert};

/// Alerts split by direction of the cost change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErosionPartition {
    pub cost_rose: Vec<ErosionAlert>,
    pub cost_fell: Vec<ErosionAlert>,
}

/// Partitions alerts into cost-rose / cost-fell buckets, each ascending by
/// erosion points. Stable alerts are dropped.
pub fn partition(alerts: &[ErosionAlert]) -> ErosionPartition {
    let bucket = |kind: AlertKind| {
        let mut rows: Vec<ErosionAlert> = alerts.iter().filter(|a| a.alert == kind).cloned().collect();
        rows.sort_by(|a, b| a.erosion_points.total_cmp(&b.erosion_points));
        rows
    };
    ErosionPartition {
        cost_rose: bucket(AlertKind::CostRose),
        cost_fell: bucket(AlertKind::CostFell),
    }
}

pub fn cost_rise_count(alerts: &[ErosionAlert]) -> usize {
    alerts.iter().filter(|a| a.alert == AlertKind::CostRose).count()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_partition_sorts_ascending() {
        let alerts = vec![
            alert("a", AlertKind::CostRose, 4.0),
            alert("b", AlertKind::CostFell, -1.0),
            alert("c", AlertKind::None, 0.0),
            alert("d", AlertKind::CostRose, -2.5),
            alert("e", AlertKind::CostFell, -6.0),
        ];
        let p = partition(&alerts);
        let rose: Vec<&str> = p.cost_rose.iter().map(|a| a.product.as_str()).collect();
        let fell: Vec<&str> = p.cost_fell.iter().map(|a| a.product.as_str()).collect();
        assert_eq!(rose, vec!["d", "a"]);
        assert_eq!(fell, vec!["e", "b"]);
        assert_eq!(cost_rise_count(&alerts), 2);
    }

    #[test]
    fn test_partition_empty() {
        assert_eq!(partition(&[]), ErosionPartition::default());
    }
}
