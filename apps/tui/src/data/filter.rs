use crate::data::models::Record;
use crate::domain::{ContinentFilter, Metric};
use std::collections::HashMap;

/// Selects the rows visible to a chart for one year: matching year, enabled
/// continent, and every required metric present. Duplicate countries are
/// collapsed with last-write-wins (the later row in dataset order replaces
/// the earlier one in place, keeping the first occurrence's position).
pub fn filter_for_year(
    records: &[Record],
    year: i32,
    continents: &ContinentFilter,
    required: &[Metric],
) -> Vec<Record> {
    let mut out: Vec<Record> = Vec::new();
    let mut index_by_country: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.year != year || !continents.is_enabled(record.continent) {
            continue;
        }
        if !required
            .iter()
            .all(|metric| record.metric(*metric).is_some())
        {
            continue;
        }

        match index_by_country.get(&record.country) {
            Some(&slot) => out[slot] = record.clone(),
            None => {
                index_by_country.insert(record.country.clone(), out.len());
                out.push(record.clone());
            }
        }
    }

    out
}

/// Bar-style ordering: descending by the chart's primary metric. Rows with
/// the metric missing sort last (bar views filter them out beforehand).
pub fn sort_descending_by(rows: &mut [Record], metric: Metric) {
    rows.sort_by(|a, b| {
        let left = a.metric(metric).unwrap_or(f64::NEG_INFINITY);
        let right = b.metric(metric).unwrap_or(f64::NEG_INFINITY);
        right.partial_cmp(&left).unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::record;
    use crate::domain::Continent;
    use std::collections::HashSet;

    fn sample() -> Vec<Record> {
        vec![
            record("A", Continent::Europe, 2020, 80.0, Some(50.0)),
            record("B", Continent::Africa, 2020, 60.0, Some(10.0)),
            record("C", Continent::Asia, 2020, 70.0, None),
            record("A", Continent::Europe, 2019, 79.0, Some(48.0)),
        ]
    }

    #[test]
    fn no_duplicate_countries_in_output() {
        let mut rows = sample();
        rows.push(record("A", Continent::Europe, 2020, 81.0, Some(55.0)));

        let filtered = filter_for_year(&rows, 2020, &ContinentFilter::default(), &[]);
        let names: Vec<&str> = filtered.iter().map(|r| r.country.as_str()).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());

        // Last occurrence wins, position of the first is kept.
        assert_eq!(filtered[0].country, "A");
        assert!((filtered[0].life_expectancy - 81.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disabled_continents_are_excluded() {
        let mut continents = ContinentFilter::default();
        continents.toggle(Continent::Africa);

        let filtered = filter_for_year(&sample(), 2020, &continents, &[]);
        assert!(filtered
            .iter()
            .all(|r| continents.is_enabled(r.continent)));
        assert!(!filtered.iter().any(|r| r.country == "B"));
    }

    #[test]
    fn required_metrics_drop_rows_missing_them() {
        let filtered = filter_for_year(
            &sample(),
            2020,
            &ContinentFilter::default(),
            &[Metric::EnergyConsumption],
        );
        let names: Vec<&str> = filtered.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn zero_matches_is_a_silent_empty_result() {
        let filtered = filter_for_year(&sample(), 1890, &ContinentFilter::default(), &[]);
        assert!(filtered.is_empty());
    }

    #[test]
    fn descending_sort_orders_the_example_scenario() {
        let mut filtered = filter_for_year(&sample(), 2020, &ContinentFilter::default(), &[]);
        sort_descending_by(&mut filtered, Metric::LifeExpectancy);
        let names: Vec<&str> = filtered.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }
}
