use ratatui::style::Color;

/// The seven continent buckets carried by the dataset. Rows with a blank
/// continent column are bucketed as `Unknown` at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continent {
    Asia,
    Africa,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Oceania,
    Unknown,
}

impl Continent {
    pub const ALL: [Self; 7] = [
        Self::Asia,
        Self::Africa,
        Self::Europe,
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Oceania,
        Self::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asia => "Asia",
            Self::Africa => "Africa",
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Oceania => "Oceania",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Asia),
            1 => Some(Self::Africa),
            2 => Some(Self::Europe),
            3 => Some(Self::NorthAmerica),
            4 => Some(Self::SouthAmerica),
            5 => Some(Self::Oceania),
            6 => Some(Self::Unknown),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Asia => 0,
            Self::Africa => 1,
            Self::Europe => 2,
            Self::NorthAmerica => 3,
            Self::SouthAmerica => 4,
            Self::Oceania => 5,
            Self::Unknown => 6,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Asia" => Self::Asia,
            "Africa" => Self::Africa,
            "Europe" => Self::Europe,
            "North America" => Self::NorthAmerica,
            "South America" => Self::SouthAmerica,
            "Oceania" => Self::Oceania,
            _ => Self::Unknown,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Asia => Color::Rgb(231, 76, 60),
            Self::Africa => Color::Rgb(243, 156, 18),
            Self::Europe => Color::Rgb(52, 152, 219),
            Self::NorthAmerica => Color::Rgb(246, 255, 0),
            Self::SouthAmerica => Color::Rgb(155, 89, 182),
            Self::Oceania => Color::Rgb(2, 194, 31),
            Self::Unknown => Color::Rgb(149, 165, 166),
        }
    }
}

/// The two numeric metrics the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    LifeExpectancy,
    EnergyConsumption,
}

impl Metric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LifeExpectancy => "Life Expectancy (years)",
            Self::EnergyConsumption => "Energy Consumption (per-capita)",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Self::LifeExpectancy => "Life",
            Self::EnergyConsumption => "Energy",
        }
    }
}

/// Set of continents currently toggled visible via the legend. Toggling
/// never touches the dataset, only the derived filtered views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinentFilter {
    enabled: [bool; 7],
}

impl Default for ContinentFilter {
    fn default() -> Self {
        Self { enabled: [true; 7] }
    }
}

impl ContinentFilter {
    pub const fn is_enabled(&self, continent: Continent) -> bool {
        self.enabled[continent.index()]
    }

    pub fn toggle(&mut self, continent: Continent) {
        self.enabled[continent.index()] = !self.enabled[continent.index()];
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|on| **on).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continent_index_round_trips() {
        for continent in Continent::ALL {
            assert_eq!(Continent::from_index(continent.index()), Some(continent));
        }
    }

    #[test]
    fn blank_or_unknown_continent_parses_to_unknown() {
        assert_eq!(Continent::parse(""), Continent::Unknown);
        assert_eq!(Continent::parse("Atlantis"), Continent::Unknown);
        assert_eq!(Continent::parse(" Europe "), Continent::Europe);
    }

    #[test]
    fn filter_defaults_to_all_enabled() {
        let filter = ContinentFilter::default();
        assert_eq!(filter.enabled_count(), 7);
        for continent in Continent::ALL {
            assert!(filter.is_enabled(continent));
        }
    }

    #[test]
    fn toggle_flips_membership_only() {
        let mut filter = ContinentFilter::default();
        filter.toggle(Continent::Africa);
        assert!(!filter.is_enabled(Continent::Africa));
        assert_eq!(filter.enabled_count(), 6);
        filter.toggle(Continent::Africa);
        assert!(filter.is_enabled(Continent::Africa));
    }
}
