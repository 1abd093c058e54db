use crate::data::geo::{join_features, BaseFeature, CountryFeature};
use crate::data::models::{Dataset, Record};
use crate::data::{filter_for_year, sort_descending_by};
use crate::domain::{Continent, ContinentFilter, Metric};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// One bar in a per-country bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub country: String,
    pub code: String,
    pub continent: Continent,
    pub value: f64,
}

/// View model for a bar-style chart: rows sorted descending by the chart's
/// metric, with a per-year value domain of `[0, max]`.
#[derive(Debug, Clone, Default)]
pub struct BarView {
    pub rows: Vec<BarDatum>,
    pub max_value: f64,
}

impl BarView {
    fn build(dataset: &Dataset, year: i32, continents: &ContinentFilter, metric: Metric) -> Self {
        let mut filtered = filter_for_year(&dataset.records, year, continents, &[metric]);
        sort_descending_by(&mut filtered, metric);

        let rows: Vec<BarDatum> = filtered
            .iter()
            .filter_map(|record| {
                record.metric(metric).map(|value| BarDatum {
                    country: record.country.clone(),
                    code: record.code.clone(),
                    continent: record.continent,
                    value,
                })
            })
            .collect();
        let max_value = rows.first().map_or(0.0, |row| row.value);

        Self { rows, max_value }
    }

    pub fn keyed_values(&self) -> Vec<(String, f64)> {
        self.rows
            .iter()
            .map(|row| (row.country.clone(), row.value))
            .collect()
    }

    /// Countries whose slot center falls inside the brushed slot interval.
    pub fn countries_in_interval(&self, lo: usize, hi: usize) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(index, _)| *index >= lo && *index <= hi)
            .map(|(_, row)| row.country.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub country: String,
    pub continent: Continent,
    pub energy: f64,
    pub life: f64,
}

/// Scatterplot view model; axis domains recomputed per-year from the
/// visible points (documented policy, see DESIGN.md).
#[derive(Debug, Clone, Default)]
pub struct ScatterView {
    pub points: Vec<ScatterPoint>,
    pub x_max: f64,
    pub y_max: f64,
}

impl ScatterView {
    fn build(dataset: &Dataset, year: i32, continents: &ContinentFilter) -> Self {
        let filtered = filter_for_year(
            &dataset.records,
            year,
            continents,
            &[Metric::LifeExpectancy, Metric::EnergyConsumption],
        );

        let points: Vec<ScatterPoint> = filtered
            .iter()
            .filter_map(|record| {
                record.energy_consumption.map(|energy| ScatterPoint {
                    country: record.country.clone(),
                    continent: record.continent,
                    energy,
                    life: record.life_expectancy,
                })
            })
            .collect();

        let x_max = points.iter().map(|p| p.energy).fold(0.0, f64::max);
        let y_max = points.iter().map(|p| p.life).fold(0.0, f64::max);

        Self {
            points,
            x_max: if x_max > 0.0 { x_max } else { 100.0 },
            y_max: if y_max > 0.0 { y_max } else { 100.0 },
        }
    }

    /// Countries whose (x, y) falls inside the rectangle, in data space.
    pub fn countries_in_rect(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<String> {
        let (x_lo, x_hi) = (x0.min(x1), x0.max(x1));
        let (y_lo, y_hi) = (y0.min(y1), y0.max(y1));
        self.points
            .iter()
            .filter(|p| p.energy >= x_lo && p.energy <= x_hi && p.life >= y_lo && p.life <= y_hi)
            .map(|p| p.country.clone())
            .collect()
    }
}

/// Choropleth view model: features re-joined from scratch for the year, and
/// a color domain spanning only the features that carry the metric.
#[derive(Debug, Clone)]
pub struct MapView {
    pub metric: Metric,
    pub features: Vec<CountryFeature>,
    pub domain: Option<(f64, f64)>,
}

impl MapView {
    fn build(
        dataset: &Dataset,
        world: &[BaseFeature],
        year: i32,
        continents: &ContinentFilter,
        metric: Metric,
    ) -> Self {
        let rows = filter_for_year(&dataset.records, year, continents, &[]);
        let features = join_features(world, &rows);

        let mut domain: Option<(f64, f64)> = None;
        for feature in &features {
            if let Some(value) = Self::metric_value(feature, metric) {
                domain = Some(domain.map_or((value, value), |(lo, hi)| {
                    (lo.min(value), hi.max(value))
                }));
            }
        }

        Self {
            metric,
            features,
            domain,
        }
    }

    pub fn metric_value(feature: &CountryFeature, metric: Metric) -> Option<f64> {
        let joined = feature.joined.as_ref()?;
        match metric {
            Metric::LifeExpectancy => Some(joined.life_expectancy),
            Metric::EnergyConsumption => joined.energy_consumption,
        }
    }
}

/// All five chart view models for one (year, continent-filter) pair.
/// Rebuilt only on year/continent events; selection styling is applied at
/// render time without touching these.
#[derive(Debug, Clone)]
pub struct ChartViews {
    pub life_bars: BarView,
    pub energy_bars: BarView,
    pub scatter: ScatterView,
    pub life_map: MapView,
    pub energy_map: MapView,
    /// Life-required rows for the country browser table.
    pub table_rows: Vec<Record>,
}

impl ChartViews {
    pub fn build(
        dataset: &Dataset,
        world: &[BaseFeature],
        year: i32,
        continents: &ContinentFilter,
    ) -> Self {
        let mut table_rows =
            filter_for_year(&dataset.records, year, continents, &[Metric::LifeExpectancy]);
        sort_descending_by(&mut table_rows, Metric::LifeExpectancy);

        Self {
            life_bars: BarView::build(dataset, year, continents, Metric::LifeExpectancy),
            energy_bars: BarView::build(dataset, year, continents, Metric::EnergyConsumption),
            scatter: ScatterView::build(dataset, year, continents),
            life_map: MapView::build(dataset, world, year, continents, Metric::LifeExpectancy),
            energy_map: MapView::build(dataset, world, year, continents, Metric::EnergyConsumption),
            table_rows,
        }
    }

    /// The rows the country browser shows for a search query: fuzzy-filtered
    /// by country name, best matches first. An empty query keeps the
    /// life-expectancy ordering. Input handling and rendering both resolve
    /// the cursor index against this list, so they can never disagree about
    /// which row is highlighted.
    pub fn browser_rows(&self, query: &str) -> Vec<&Record> {
        if query.is_empty() {
            return self.table_rows.iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &Record)> = self
            .table_rows
            .iter()
            .filter_map(|record| {
                matcher
                    .fuzzy_match(&record.country, query)
                    .map(|score| (score, record))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().map(|(_, record)| record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::record;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("A", Continent::Europe, 2020, 80.0, Some(50.0)),
            record("B", Continent::Africa, 2020, 60.0, Some(10.0)),
            record("C", Continent::Asia, 2020, 70.0, None),
        ])
        .unwrap()
    }

    #[test]
    fn scenario_three_countries_in_2020() {
        let views = ChartViews::build(&dataset(), &[], 2020, &ContinentFilter::default());

        // Life chart: 3 bars ordered A(80), C(70), B(60).
        let life: Vec<(&str, f64)> = views
            .life_bars
            .rows
            .iter()
            .map(|row| (row.country.as_str(), row.value))
            .collect();
        assert_eq!(life, vec![("A", 80.0), ("C", 70.0), ("B", 60.0)]);

        // Energy chart: 2 bars, C excluded.
        let energy: Vec<&str> = views
            .energy_bars
            .rows
            .iter()
            .map(|row| row.country.as_str())
            .collect();
        assert_eq!(energy, vec!["A", "B"]);

        // Scatterplot: 2 points.
        assert_eq!(views.scatter.points.len(), 2);
    }

    #[test]
    fn bar_domain_is_per_year_zero_to_max() {
        let views = ChartViews::build(&dataset(), &[], 2020, &ContinentFilter::default());
        assert!((views.life_bars.max_value - 80.0).abs() < f64::EPSILON);
        assert!((views.energy_bars.max_value - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disabling_a_continent_removes_it_from_every_view() {
        let mut continents = ContinentFilter::default();
        continents.toggle(Continent::Africa);
        let views = ChartViews::build(&dataset(), &[], 2020, &continents);

        assert!(!views.life_bars.rows.iter().any(|r| r.country == "B"));
        assert!(!views.energy_bars.rows.iter().any(|r| r.country == "B"));
        assert!(!views.scatter.points.iter().any(|p| p.country == "B"));
        assert!(!views.table_rows.iter().any(|r| r.country == "B"));
    }

    #[test]
    fn empty_year_yields_empty_views_not_errors() {
        let views = ChartViews::build(&dataset(), &[], 1900, &ContinentFilter::default());
        assert!(views.life_bars.rows.is_empty());
        assert!(views.scatter.points.is_empty());
        assert!(views.life_map.domain.is_none());
    }

    #[test]
    fn scatter_rect_selection_uses_data_space() {
        let views = ChartViews::build(&dataset(), &[], 2020, &ContinentFilter::default());
        let hit = views.scatter.countries_in_rect(40.0, 75.0, 60.0, 85.0);
        assert_eq!(hit, vec!["A".to_string()]);

        let miss = views.scatter.countries_in_rect(200.0, 95.0, 300.0, 99.0);
        assert!(miss.is_empty());
    }

    #[test]
    fn browser_rows_keep_order_for_an_empty_query() {
        let views = ChartViews::build(&dataset(), &[], 2020, &ContinentFilter::default());
        let rows = views.browser_rows("");
        let names: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn browser_rows_fuzzy_filter_drops_non_matches() {
        let records = vec![
            record("Norway", Continent::Europe, 2020, 83.0, None),
            record("Japan", Continent::Asia, 2020, 84.0, None),
        ];
        let dataset = Dataset::from_records(records).unwrap();
        let views = ChartViews::build(&dataset, &[], 2020, &ContinentFilter::default());

        let rows = views.browser_rows("nrwy");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Norway");
    }

    #[test]
    fn interval_selection_takes_slot_centers() {
        let views = ChartViews::build(&dataset(), &[], 2020, &ContinentFilter::default());
        let hit = views.life_bars.countries_in_interval(1, 2);
        assert_eq!(hit, vec!["C".to_string(), "B".to_string()]);
    }
}
