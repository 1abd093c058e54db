use crate::app::state::App;
use crate::domain::Continent;
use std::collections::HashSet;

/// The three triggers the dashboard reacts to. Year changes and continent
/// toggles rebuild every chart's view model; brush ends only replace the
/// selection and rely on render-time styling (no rebuild, no rescale).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    YearChanged(i32),
    ContinentToggled(Continent),
    BrushEnd(Option<HashSet<String>>),
}

pub fn route(app: &mut App, event: DashboardEvent) {
    match event {
        DashboardEvent::YearChanged(year) => {
            let clamped = year.clamp(app.year_bounds.0, app.year_bounds.1);
            if clamped != app.year {
                app.year = clamped;
                app.rebuild_views();
            }
        }
        DashboardEvent::ContinentToggled(continent) => {
            app.continents.toggle(continent);
            app.rebuild_views();
            app.status_message = format!(
                "{} {}",
                continent.as_str(),
                if app.continents.is_enabled(continent) {
                    "enabled"
                } else {
                    "hidden"
                }
            );
        }
        DashboardEvent::BrushEnd(selection) => match selection {
            Some(countries) if !countries.is_empty() => {
                app.status_message = format!("Selected {} countries", countries.len());
                app.selection.apply(countries);
            }
            _ => {
                app.selection.clear();
                app.status_message = "Selection cleared".to_string();
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::selection::Highlight;
    use crate::data::loader::DataBundle;
    use crate::data::models::{record, Dataset};

    fn app_with_data() -> App {
        let mut app = App::new();
        app.install_data(
            DataBundle {
                dataset: Dataset::from_records(vec![
                    record("A", Continent::Europe, 2020, 80.0, Some(50.0)),
                    record("B", Continent::Africa, 2020, 60.0, Some(10.0)),
                    record("C", Continent::Asia, 2020, 70.0, None),
                    record("B", Continent::Africa, 2021, 61.0, Some(11.0)),
                ])
                .unwrap(),
                world: Vec::new(),
            },
            Some(2020),
        );
        app
    }

    fn selection_of(names: &[&str]) -> Option<HashSet<String>> {
        Some(names.iter().map(|name| (*name).to_string()).collect())
    }

    #[test]
    fn brush_end_propagates_to_every_chart_in_one_pass() {
        let mut app = app_with_data();
        route(&mut app, DashboardEvent::BrushEnd(selection_of(&["A"])));

        let views = app.views.as_ref().unwrap();
        for row in &views.life_bars.rows {
            let expected = if row.country == "A" {
                Highlight::Selected
            } else {
                Highlight::Dimmed
            };
            assert_eq!(app.selection.style_for(&row.country), expected);
        }
        for point in &views.scatter.points {
            let expected = if point.country == "A" {
                Highlight::Selected
            } else {
                Highlight::Dimmed
            };
            assert_eq!(app.selection.style_for(&point.country), expected);
        }
    }

    #[test]
    fn empty_brush_region_clears_rather_than_dims_everything() {
        let mut app = app_with_data();
        route(&mut app, DashboardEvent::BrushEnd(selection_of(&["A"])));
        route(&mut app, DashboardEvent::BrushEnd(Some(HashSet::new())));

        assert!(!app.selection.is_active());
        assert_eq!(app.selection.style_for("B"), Highlight::Normal);

        route(&mut app, DashboardEvent::BrushEnd(selection_of(&["A"])));
        route(&mut app, DashboardEvent::BrushEnd(None));
        assert!(!app.selection.is_active());
    }

    #[test]
    fn brush_end_does_not_rebuild_views() {
        let mut app = app_with_data();
        // A rebuild would recreate the views; dropping them first makes any
        // rebuild observable.
        app.views = None;
        route(&mut app, DashboardEvent::BrushEnd(selection_of(&["A"])));
        assert!(app.views.is_none());
        assert!(app.selection.is_active());
    }

    #[test]
    fn year_change_rebuilds_and_keeps_selection_by_name() {
        let mut app = app_with_data();
        route(&mut app, DashboardEvent::BrushEnd(selection_of(&["A"])));
        route(&mut app, DashboardEvent::YearChanged(2021));

        // 2021 only has B; A's selection is retained but styles nothing.
        let views = app.views.as_ref().unwrap();
        assert!(views.life_bars.rows.iter().all(|row| row.country != "A"));
        assert!(app.selection.contains("A"));
        assert_eq!(app.selection.style_for("B"), Highlight::Dimmed);
    }

    #[test]
    fn year_change_is_clamped_to_slider_bounds() {
        let mut app = app_with_data();
        route(&mut app, DashboardEvent::YearChanged(1700));
        assert_eq!(app.year, 1950);
        route(&mut app, DashboardEvent::YearChanged(3000));
        assert_eq!(app.year, 2023);
    }

    #[test]
    fn continent_toggle_refilters_without_reloading() {
        let mut app = app_with_data();
        let total_records = app.dataset.as_ref().unwrap().records.len();

        route(
            &mut app,
            DashboardEvent::ContinentToggled(Continent::Africa),
        );
        let views = app.views.as_ref().unwrap();
        assert!(views.life_bars.rows.iter().all(|row| row.country != "B"));
        assert!(views.scatter.points.iter().all(|p| p.country != "B"));

        // The underlying dataset is untouched.
        assert_eq!(app.dataset.as_ref().unwrap().records.len(), total_records);

        route(
            &mut app,
            DashboardEvent::ContinentToggled(Continent::Africa),
        );
        let views = app.views.as_ref().unwrap();
        assert!(views.life_bars.rows.iter().any(|row| row.country == "B"));
    }
}
