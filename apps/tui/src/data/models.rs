use crate::domain::{Continent, Metric};

/// One retained country-year row. Rows that fail the load-time invariants
/// (missing/non-positive life expectancy, unparsable year) never become a
/// `Record`; missing energy is kept as `None` so energy-specific views can
/// filter it out on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub code: String,
    pub continent: Continent,
    pub year: i32,
    pub life_expectancy: f64,
    pub energy_consumption: Option<f64>,
}

impl Record {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::LifeExpectancy => Some(self.life_expectancy),
            Metric::EnergyConsumption => self.energy_consumption,
        }
    }
}

/// The parsed dataset plus derived global domains. Loaded once, read-only
/// for the rest of the process.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub global_life_domain: (f64, f64),
    pub global_energy_domain: Option<(f64, f64)>,
    pub min_year: i32,
    pub max_year: i32,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Option<Self> {
        let first = records.first()?;

        let mut life_domain = (first.life_expectancy, first.life_expectancy);
        let mut energy_domain: Option<(f64, f64)> = None;
        let mut min_year = first.year;
        let mut max_year = first.year;

        for record in &records {
            life_domain.0 = life_domain.0.min(record.life_expectancy);
            life_domain.1 = life_domain.1.max(record.life_expectancy);
            if let Some(energy) = record.energy_consumption {
                energy_domain = Some(energy_domain.map_or((energy, energy), |(lo, hi)| {
                    (lo.min(energy), hi.max(energy))
                }));
            }
            min_year = min_year.min(record.year);
            max_year = max_year.max(record.year);
        }

        Some(Self {
            records,
            global_life_domain: life_domain,
            global_energy_domain: energy_domain,
            min_year,
            max_year,
        })
    }

    /// Slider bounds: clamped outward to at least 1950..=2023 so the slider
    /// never shrinks below the range users expect from the original data.
    pub fn year_bounds(&self) -> (i32, i32) {
        (self.min_year.min(1950), self.max_year.max(2023))
    }
}

#[cfg(test)]
pub fn record(country: &str, continent: Continent, year: i32, life: f64, energy: Option<f64>) -> Record {
    Record {
        country: country.to_string(),
        code: country.chars().take(3).collect::<String>().to_uppercase(),
        continent,
        year,
        life_expectancy: life,
        energy_consumption: energy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_domains_span_all_years() {
        let dataset = Dataset::from_records(vec![
            record("Norway", Continent::Europe, 2019, 82.0, Some(100.0)),
            record("Chad", Continent::Africa, 2020, 54.0, None),
            record("Japan", Continent::Asia, 2021, 84.5, Some(40.0)),
        ])
        .unwrap();

        assert_eq!(dataset.global_life_domain, (54.0, 84.5));
        assert_eq!(dataset.global_energy_domain, Some((40.0, 100.0)));
        assert_eq!(dataset.min_year, 2019);
        assert_eq!(dataset.max_year, 2021);
    }

    #[test]
    fn year_bounds_clamp_outward() {
        let dataset = Dataset::from_records(vec![record(
            "Norway",
            Continent::Europe,
            2000,
            80.0,
            None,
        )])
        .unwrap();
        assert_eq!(dataset.year_bounds(), (1950, 2023));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(Dataset::from_records(Vec::new()).is_none());
    }
}
