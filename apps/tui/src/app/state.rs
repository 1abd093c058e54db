use crate::app::join::Transitions;
use crate::app::selection::SelectionSet;
use crate::app::view::ChartViews;
use crate::data::geo::BaseFeature;
use crate::data::loader::DataBundle;
use crate::data::models::Dataset;
use crate::domain::ContinentFilter;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Countries,
}

/// Which chart currently owns keyboard focus (border highlight + brush).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFocus {
    LifeBars,
    EnergyBars,
    Scatter,
    LifeMap,
    EnergyMap,
}

impl ChartFocus {
    pub const COUNT: usize = 5;

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::LifeBars),
            1 => Some(Self::EnergyBars),
            2 => Some(Self::Scatter),
            3 => Some(Self::LifeMap),
            4 => Some(Self::EnergyMap),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::LifeBars => 0,
            Self::EnergyBars => 1,
            Self::Scatter => 2,
            Self::LifeMap => 3,
            Self::EnergyMap => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LifeBars => "Life Expectancy by Country",
            Self::EnergyBars => "Energy Consumption by Country",
            Self::Scatter => "Life vs Energy",
            Self::LifeMap => "Life Expectancy Map",
            Self::EnergyMap => "Energy Consumption Map",
        }
    }

    pub const fn supports_brush(self) -> bool {
        matches!(self, Self::LifeBars | Self::EnergyBars | Self::Scatter)
    }
}

/// An in-progress brush gesture on the focused chart. Bar charts brush an
/// interval of country slots; the scatterplot brushes a rectangle expressed
/// as fractions of the per-year axis domains.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Interval { anchor: usize, cursor: usize },
    Rect { anchor: (f64, f64), cursor: (f64, f64) },
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,

    // Loaded once; read-only afterwards.
    pub dataset: Option<Dataset>,
    pub world: Vec<BaseFeature>,
    pub loading: bool,
    pub load_error: Option<String>,

    pub year: i32,
    pub year_bounds: (i32, i32),
    pub continents: ContinentFilter,
    pub selection: SelectionSet,

    /// Rebuilt only on year/continent events; never on brush events.
    pub views: Option<ChartViews>,
    pub life_transitions: Transitions,
    pub energy_transitions: Transitions,

    pub focus: ChartFocus,
    pub brush: Option<Brush>,
    /// Horizontal scroll offsets (in country slots) for the two bar charts.
    pub life_bar_scroll: usize,
    pub energy_bar_scroll: usize,

    // Country browser state.
    pub search_input: String,
    pub searching: bool,
    pub selected_row_index: usize,

    pub status_message: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            show_help: false,
            dataset: None,
            world: Vec::new(),
            loading: true,
            load_error: None,
            year: 2023,
            year_bounds: (1950, 2023),
            continents: ContinentFilter::default(),
            selection: SelectionSet::default(),
            views: None,
            life_transitions: Transitions::new(TRANSITION_DURATION),
            energy_transitions: Transitions::new(TRANSITION_DURATION),
            focus: ChartFocus::LifeBars,
            brush: None,
            life_bar_scroll: 0,
            energy_bar_scroll: 0,
            search_input: String::new(),
            searching: false,
            selected_row_index: 0,
            status_message: String::new(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber_state: ThrobberState::default(),
        }
    }

    /// Steps the animation clock once per frame and drops finished exit
    /// transitions.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.loading {
            self.throbber_state.calc_next();
        }

        self.life_transitions.prune_finished(now);
        self.energy_transitions.prune_finished(now);
    }

    /// Installs the loaded bundle: derives slider bounds, picks the initial
    /// year (requested year clamped, else the latest year with data) and
    /// builds the first set of chart views.
    pub fn install_data(&mut self, bundle: DataBundle, requested_year: Option<i32>) {
        self.year_bounds = bundle.dataset.year_bounds();
        self.year = requested_year.map_or(bundle.dataset.max_year, |year| {
            year.clamp(self.year_bounds.0, self.year_bounds.1)
        });
        self.world = bundle.world;
        self.dataset = Some(bundle.dataset);
        self.loading = false;
        self.rebuild_views();
        self.status_message = format!(
            "Loaded {} rows",
            self.dataset.as_ref().map_or(0, |d| d.records.len())
        );
    }

    /// Records a failed load: the dashboard stays inert but keeps running.
    pub fn fail_load(&mut self, message: String) {
        self.loading = false;
        self.load_error = Some(message);
    }

    /// Recomputes every chart's view model for the current year/continent
    /// state and feeds the keyed joins of both bar charts. Selection is
    /// deliberately untouched: styling is reapplied at render time.
    pub fn rebuild_views(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };

        let views = ChartViews::build(dataset, &self.world, self.year, &self.continents);
        let now = Instant::now();
        self.life_transitions.apply(&views.life_bars.keyed_values(), now);
        self.energy_transitions
            .apply(&views.energy_bars.keyed_values(), now);

        self.life_bar_scroll = self
            .life_bar_scroll
            .min(views.life_bars.rows.len().saturating_sub(1));
        self.energy_bar_scroll = self
            .energy_bar_scroll
            .min(views.energy_bars.rows.len().saturating_sub(1));
        self.selected_row_index = self
            .selected_row_index
            .min(views.table_rows.len().saturating_sub(1));

        self.views = Some(views);
        self.brush = None;
    }

    pub const fn has_data(&self) -> bool {
        self.dataset.is_some()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{record, Dataset};
    use crate::domain::Continent;

    fn bundle() -> DataBundle {
        DataBundle {
            dataset: Dataset::from_records(vec![
                record("A", Continent::Europe, 2020, 80.0, Some(50.0)),
                record("B", Continent::Africa, 2021, 60.0, Some(10.0)),
            ])
            .unwrap(),
            world: Vec::new(),
        }
    }

    #[test]
    fn install_picks_latest_year_by_default() {
        let mut app = App::new();
        app.install_data(bundle(), None);
        assert_eq!(app.year, 2021);
        assert!(app.views.is_some());
        assert!(!app.loading);
    }

    #[test]
    fn requested_year_is_clamped_to_bounds() {
        let mut app = App::new();
        app.install_data(bundle(), Some(1800));
        assert_eq!(app.year, 1950);
    }

    #[test]
    fn failed_load_leaves_an_inert_running_app() {
        let mut app = App::new();
        app.fail_load("no such file".to_string());
        assert!(app.running);
        assert!(!app.has_data());
        assert!(app.views.is_none());
        assert!(app.load_error.is_some());
    }
}
