use crate::app::state::{App, AppScreen, Brush, ChartFocus};
use crate::event::router::{route, DashboardEvent};
use crate::domain::Continent;
use crossterm::event::KeyCode;
use std::collections::HashSet;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Step the scatter brush cursor takes per key press, as a fraction of the
/// axis domain.
const RECT_STEP: f64 = 0.05;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        if matches!(key, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return;
    }

    if matches!(key, KeyCode::Char('?')) {
        app.show_help = true;
        return;
    }

    match app.screen {
        AppScreen::Dashboard => handle_dashboard_input(app, key),
        AppScreen::Countries => handle_countries_input(app, key),
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    if app.brush.is_some() {
        handle_brush_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') => {
            app.screen = AppScreen::Countries;
            app.search_input.clear();
            app.searching = false;
        }
        KeyCode::Tab => {
            let next = wrap_increment(app.focus.index(), ChartFocus::COUNT);
            if let Some(focus) = ChartFocus::from_index(next) {
                app.focus = focus;
            }
        }
        KeyCode::BackTab => {
            let prev = wrap_decrement(app.focus.index(), ChartFocus::COUNT);
            if let Some(focus) = ChartFocus::from_index(prev) {
                app.focus = focus;
            }
        }
        KeyCode::Left => route(app, DashboardEvent::YearChanged(app.year - 1)),
        KeyCode::Right => route(app, DashboardEvent::YearChanged(app.year + 1)),
        KeyCode::PageDown => route(app, DashboardEvent::YearChanged(app.year - 10)),
        KeyCode::PageUp => route(app, DashboardEvent::YearChanged(app.year + 10)),
        KeyCode::Char(digit @ '1'..='7') => {
            let index = digit as usize - '1' as usize;
            if let Some(continent) = Continent::from_index(index) {
                route(app, DashboardEvent::ContinentToggled(continent));
            }
        }
        KeyCode::Char('b') => begin_brush(app),
        KeyCode::Char('x') => route(app, DashboardEvent::BrushEnd(None)),
        KeyCode::Char('h') => scroll_focused_bars(app, -1),
        KeyCode::Char('l') => scroll_focused_bars(app, 1),
        KeyCode::Esc => {
            if app.selection.is_active() {
                route(app, DashboardEvent::BrushEnd(None));
            }
        }
        _ => {}
    }
}

fn begin_brush(app: &mut App) {
    if !app.focus.supports_brush() || app.views.is_none() {
        return;
    }

    app.brush = Some(match app.focus {
        ChartFocus::Scatter => Brush::Rect {
            anchor: (0.5, 0.5),
            cursor: (0.5, 0.5),
        },
        ChartFocus::LifeBars => Brush::Interval {
            anchor: app.life_bar_scroll,
            cursor: app.life_bar_scroll,
        },
        _ => Brush::Interval {
            anchor: app.energy_bar_scroll,
            cursor: app.energy_bar_scroll,
        },
    });
    app.status_message = "Brushing: arrows extend, Enter selects, Esc cancels".to_string();
}

fn handle_brush_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            // Cancelling an in-progress brush leaves the selection as-is.
            app.brush = None;
            app.status_message.clear();
        }
        KeyCode::Enter => commit_brush(app),
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => move_brush(app, key),
        _ => {}
    }
}

fn move_brush(app: &mut App, key: KeyCode) {
    let row_count = focused_bar_row_count(app);
    let Some(brush) = app.brush.as_mut() else {
        return;
    };

    match brush {
        Brush::Interval { cursor, .. } => match key {
            KeyCode::Left => *cursor = cursor.saturating_sub(1),
            KeyCode::Right => {
                *cursor = (*cursor + 1).min(row_count.saturating_sub(1));
            }
            _ => {}
        },
        Brush::Rect { cursor, .. } => {
            match key {
                KeyCode::Left => cursor.0 -= RECT_STEP,
                KeyCode::Right => cursor.0 += RECT_STEP,
                KeyCode::Down => cursor.1 -= RECT_STEP,
                KeyCode::Up => cursor.1 += RECT_STEP,
                _ => {}
            }
            cursor.0 = cursor.0.clamp(0.0, 1.0);
            cursor.1 = cursor.1.clamp(0.0, 1.0);
        }
    }
}

fn focused_bar_row_count(app: &App) -> usize {
    let Some(views) = &app.views else { return 0 };
    match app.focus {
        ChartFocus::LifeBars => views.life_bars.rows.len(),
        ChartFocus::EnergyBars => views.energy_bars.rows.len(),
        _ => 0,
    }
}

fn commit_brush(app: &mut App) {
    let Some(brush) = app.brush.take() else {
        return;
    };
    let Some(views) = &app.views else {
        return;
    };

    let countries: Vec<String> = match (&brush, app.focus) {
        (Brush::Interval { anchor, cursor }, ChartFocus::LifeBars) => {
            let (lo, hi) = (*anchor.min(cursor), *anchor.max(cursor));
            views.life_bars.countries_in_interval(lo, hi)
        }
        (Brush::Interval { anchor, cursor }, ChartFocus::EnergyBars) => {
            let (lo, hi) = (*anchor.min(cursor), *anchor.max(cursor));
            views.energy_bars.countries_in_interval(lo, hi)
        }
        (Brush::Rect { anchor, cursor }, ChartFocus::Scatter) => {
            let scatter = &views.scatter;
            scatter.countries_in_rect(
                anchor.0 * scatter.x_max,
                anchor.1 * scatter.y_max,
                cursor.0 * scatter.x_max,
                cursor.1 * scatter.y_max,
            )
        }
        _ => Vec::new(),
    };

    let selection: HashSet<String> = countries.into_iter().collect();
    route(
        app,
        DashboardEvent::BrushEnd(if selection.is_empty() {
            None
        } else {
            Some(selection)
        }),
    );
}

fn scroll_focused_bars(app: &mut App, direction: i32) {
    let row_count = focused_bar_row_count(app);
    let scroll = match app.focus {
        ChartFocus::LifeBars => &mut app.life_bar_scroll,
        ChartFocus::EnergyBars => &mut app.energy_bar_scroll,
        _ => return,
    };

    if direction < 0 {
        *scroll = scroll.saturating_sub(1);
    } else {
        *scroll = (*scroll + 1).min(row_count.saturating_sub(1));
    }
}

fn handle_countries_input(app: &mut App, key: KeyCode) {
    if app.searching {
        match key {
            KeyCode::Esc => {
                app.searching = false;
                app.search_input.clear();
            }
            KeyCode::Enter => app.searching = false,
            KeyCode::Backspace => {
                app.search_input.pop();
            }
            KeyCode::Char(ch) => app.search_input.push(ch),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc | KeyCode::Char('c') => app.screen = AppScreen::Dashboard,
        KeyCode::Char('/') => app.searching = true,
        KeyCode::Up => {
            app.selected_row_index = app.selected_row_index.saturating_sub(1);
        }
        KeyCode::Down => {
            let len = app
                .views
                .as_ref()
                .map_or(0, |views| views.browser_rows(&app.search_input).len());
            app.selected_row_index = (app.selected_row_index + 1).min(len.saturating_sub(1));
        }
        KeyCode::Enter => select_highlighted_country(app),
        KeyCode::Char('x') => route(app, DashboardEvent::BrushEnd(None)),
        _ => {}
    }
}

/// Enter on a table row acts as a single-country brush. The cursor index is
/// resolved against the same fuzzy-filtered list the browser renders.
fn select_highlighted_country(app: &mut App) {
    let Some(views) = &app.views else { return };
    let rows = views.browser_rows(&app.search_input);
    if rows.is_empty() {
        return;
    }
    let index = app.selected_row_index.min(rows.len() - 1);
    let country = rows[index].country.clone();

    let mut selection = HashSet::new();
    selection.insert(country);
    route(app, DashboardEvent::BrushEnd(Some(selection)));
}

#[cfg(test)]
mod tests {
    use super::*;
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
                ])
                .unwrap(),
                world: Vec::new(),
            },
            Some(2020),
        );
        app
    }

    #[test]
    fn arrow_keys_step_the_year() {
        let mut app = app_with_data();
        handle_input(&mut app, KeyCode::Left);
        assert_eq!(app.year, 2019);
        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.year, 2020);
    }

    #[test]
    fn digit_keys_toggle_continents() {
        let mut app = app_with_data();
        handle_input(&mut app, KeyCode::Char('2'));
        assert!(!app.continents.is_enabled(Continent::Africa));
    }

    #[test]
    fn interval_brush_selects_bar_range() {
        let mut app = app_with_data();
        // Focused on the life chart, sorted A(80), C(70), B(60).
        handle_input(&mut app, KeyCode::Char('b'));
        assert!(app.brush.is_some());
        handle_input(&mut app, KeyCode::Right);
        handle_input(&mut app, KeyCode::Enter);

        assert!(app.brush.is_none());
        assert!(app.selection.contains("A"));
        assert!(app.selection.contains("C"));
        assert!(!app.selection.contains("B"));
    }

    #[test]
    fn cancelling_a_brush_preserves_the_selection() {
        let mut app = app_with_data();
        handle_input(&mut app, KeyCode::Char('b'));
        handle_input(&mut app, KeyCode::Enter);
        assert!(app.selection.is_active());

        handle_input(&mut app, KeyCode::Char('b'));
        handle_input(&mut app, KeyCode::Esc);
        assert!(app.brush.is_none());
        assert!(app.selection.is_active());
    }

    #[test]
    fn clear_key_empties_the_selection() {
        let mut app = app_with_data();
        handle_input(&mut app, KeyCode::Char('b'));
        handle_input(&mut app, KeyCode::Enter);
        assert!(app.selection.is_active());

        handle_input(&mut app, KeyCode::Char('x'));
        assert!(!app.selection.is_active());
    }

    #[test]
    fn enter_on_a_table_row_selects_that_country() {
        let mut app = app_with_data();
        handle_input(&mut app, KeyCode::Char('c'));
        assert_eq!(app.screen, AppScreen::Countries);

        handle_input(&mut app, KeyCode::Down);
        handle_input(&mut app, KeyCode::Enter);
        // Table is sorted by life expectancy: A, C, B.
        assert!(app.selection.contains("C"));
        assert_eq!(app.selection.len(), 1);
    }

    #[test]
    fn enter_while_searching_selects_the_displayed_row() {
        let mut app = App::new();
        app.install_data(
            DataBundle {
                dataset: Dataset::from_records(vec![
                    record("Japan", Continent::Asia, 2020, 84.0, None),
                    record("Norway", Continent::Europe, 2020, 83.0, None),
                ])
                .unwrap(),
                world: Vec::new(),
            },
            Some(2020),
        );

        // The unfiltered table orders Japan first; searching narrows the
        // visible rows to Norway only.
        handle_input(&mut app, KeyCode::Char('c'));
        handle_input(&mut app, KeyCode::Char('/'));
        for ch in "Norway".chars() {
            handle_input(&mut app, KeyCode::Char(ch));
        }
        handle_input(&mut app, KeyCode::Enter);
        assert!(!app.searching);

        handle_input(&mut app, KeyCode::Enter);
        assert!(app.selection.contains("Norway"));
        assert!(!app.selection.contains("Japan"));
        assert_eq!(app.selection.len(), 1);
    }
}
