use std::collections::{BTreeSet, HashMap};

use chrono::Weekday;
use contracts::dashboards::d413_revenue_diagnosis::{HeatmapCell, WeekdayAverage};
use contracts::projections::p911_daily_sales::DailySales;

const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parses an exported weekday name, English ("Monday") or Portuguese
/// ("Segunda", "Segunda-feira", "Terça"/"Terca").
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    if let Ok(day) = name.parse::<Weekday>() {
        return Some(day);
    }
    let lower = name.to_lowercase();
    let stem = lower.split('-').next().unwrap_or_default();
    match stem {
        "segunda" => Some(Weekday::Mon),
        "terça" | "terca" => Some(Weekday::Tue),
        "quarta" => Some(Weekday::Wed),
        "quinta" => Some(Weekday::Thu),
        "sexta" => Some(Weekday::Fri),
        "sábado" | "sabado" => Some(Weekday::Sat),
        "domingo" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn pt_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Segunda",
        Weekday::Tue => "Terça",
        Weekday::Wed => "Quarta",
        Weekday::Thu => "Quinta",
        Weekday::Fri => "Sexta",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Average daily revenue per weekday, Monday → Sunday. Weekdays without
/// data are omitted, as are rows whose weekday cannot be parsed.
pub fn weekday_averages(days: &[DailySales]) -> Vec<WeekdayAverage> {
    let mut totals: HashMap<Weekday, (f64, u32)> = HashMap::new();
    for row in days {
        let Some(day) = parse_weekday(&row.weekday) else {
            tracing::debug!("Skipping daily row {} with weekday {:?}", row.date, row.weekday);
            continue;
        };
        let entry = totals.entry(day).or_insert((0.0, 0));
        entry.0 += row.revenue;
        entry.1 += 1;
    }

    MONDAY_FIRST
        .iter()
        .filter_map(|day| {
            totals.get(day).map(|(total, count)| WeekdayAverage {
                weekday: pt_label(*day).to_string(),
                days: *count,
                average_revenue: total / f64::from(*count),
            })
        })
        .collect()
}

/// Strongest and weakest weekday by average revenue; later weekdays win ties.
pub fn best_and_worst(averages: &[WeekdayAverage]) -> Option<(String, String)> {
    let best = averages
        .iter()
        .reduce(|a, b| if a.average_revenue > b.average_revenue { a } else { b })?;
    let worst = averages
        .iter()
        .reduce(|a, b| if a.average_revenue < b.average_revenue { a } else { b })?;
    Some((best.weekday.clone(), worst.weekday.clone()))
}

/// Week × weekday revenue grid. Every week is paired with every weekday
/// that appears in the data; missing combinations are 0.
pub fn heatmap(days: &[DailySales]) -> Vec<HeatmapCell> {
    let mut totals: HashMap<(u32, Weekday), f64> = HashMap::new();
    let mut weeks: BTreeSet<u32> = BTreeSet::new();
    let mut present: BTreeSet<u32> = BTreeSet::new();

    for row in days {
        let Some(day) = parse_weekday(&row.weekday) else {
            continue;
        };
        *totals.entry((row.week_number, day)).or_insert(0.0) += row.revenue;
        weeks.insert(row.week_number);
        present.insert(day.num_days_from_monday());
    }

    let mut cells = Vec::with_capacity(weeks.len() * present.len());
    for week in &weeks {
        for day in MONDAY_FIRST
            .iter()
            .filter(|d| present.contains(&d.num_days_from_monday()))
        {
            cells.push(HeatmapCell {
                week: *week,
                weekday: pt_label(*day).to_string(),
                revenue: totals.get(&(*week, *day)).copied().unwrap_or(0.0).round(),
            });
        }
    }
    cells
}
