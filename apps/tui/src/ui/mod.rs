// UI module for the life expectancy dashboard
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::layout::Margin;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    if app.show_help {
        let area = f.area().inner(Margin::new(2, 1));
        screens::dashboard::render_help_popup(f, area);
        return;
    }

    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
        AppScreen::Countries => screens::countries::render_countries_view(app, f),
    }
}
