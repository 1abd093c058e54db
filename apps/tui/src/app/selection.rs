use std::collections::HashSet;

/// Visual state of one bar/point/feature under the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Selected,
    Dimmed,
}

/// The cross-chart selection: an optional set of country names. `None`
/// means no active selection (everything renders at full emphasis). Only
/// brush-end events mutate it, and a new brush fully replaces the previous
/// set; there is no union or intersection across charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    countries: Option<HashSet<String>>,
}

impl SelectionSet {
    /// Replaces the selection. An empty set is equivalent to clearing:
    /// a brush over zero elements must not leave a set that dims everything.
    pub fn apply(&mut self, countries: HashSet<String>) {
        self.countries = if countries.is_empty() {
            None
        } else {
            Some(countries)
        };
    }

    pub fn clear(&mut self) {
        self.countries = None;
    }

    pub const fn is_active(&self) -> bool {
        self.countries.is_some()
    }

    pub fn len(&self) -> usize {
        self.countries.as_ref().map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries
            .as_ref()
            .is_some_and(|set| set.contains(country))
    }

    /// Pure function of the selection state; calling it any number of times
    /// with unchanged state yields the same answer.
    pub fn style_for(&self, country: &str) -> Highlight {
        match &self.countries {
            None => Highlight::Normal,
            Some(set) if set.contains(country) => Highlight::Selected,
            Some(_) => Highlight::Dimmed,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.countries
            .iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}
