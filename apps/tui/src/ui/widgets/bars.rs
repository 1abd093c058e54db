use crate::app::state::{App, Brush, ChartFocus};
use crate::app::view::BarView;
use crate::app::Highlight;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

const BAR_WIDTH: u16 = 4;
const BAR_GAP: u16 = 1;

/// Renders one of the two per-country bar charts. Bars are a horizontal
/// scroll window into the descending-sorted rows; values animate through the
/// chart's transition registry rather than jumping on year change.
pub fn render_bar_panel(app: &App, f: &mut Frame<'_>, area: Rect, which: ChartFocus) {
    let Some(views) = &app.views else {
        render_placeholder(f, area, which, "Loading...");
        return;
    };

    let (view, scroll) = match which {
        ChartFocus::LifeBars => (&views.life_bars, app.life_bar_scroll),
        _ => (&views.energy_bars, app.energy_bar_scroll),
    };

    if view.rows.is_empty() {
        render_placeholder(f, area, which, "No data for selected year");
        return;
    }

    let visible = visible_slots(area.width);
    let window_end = (scroll + visible).min(view.rows.len());
    let brush_range = brush_range_for(app, which);

    let bars: Vec<Bar<'_>> = view.rows[scroll..window_end]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let slot = scroll + offset;
            let animated = animated_value(app, which, &row.country, row.value);
            let mut style = match app.selection.style_for(&row.country) {
                Highlight::Normal => Style::default().fg(row.continent.color()),
                Highlight::Selected => Style::default()
                    .fg(row.continent.color())
                    .add_modifier(Modifier::BOLD),
                Highlight::Dimmed => Style::default().fg(Color::DarkGray),
            };
            if brush_range.is_some_and(|(lo, hi)| slot >= lo && slot <= hi) {
                style = style.bg(Color::Rgb(60, 60, 60));
            }

            Bar::default()
                .value(bar_value(animated))
                .label(TextLine::from(row.code.clone()))
                .style(style)
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let title = panel_title(view, which, scroll, window_end, brush_range);
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style(app, which)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(bar_value(view.max_value).max(1))
        .bar_gap(BAR_GAP)
        .bar_width(BAR_WIDTH);

    f.render_widget(chart, area);
}

fn render_placeholder(f: &mut Frame<'_>, area: Rect, which: ChartFocus, message: &str) {
    let block = Block::default()
        .title(which.label())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn panel_title(
    view: &BarView,
    which: ChartFocus,
    scroll: usize,
    window_end: usize,
    brush_range: Option<(usize, usize)>,
) -> String {
    let mut title = format!(
        "{} ({}-{} of {})",
        which.label(),
        scroll + 1,
        window_end,
        view.rows.len()
    );
    if let Some((lo, hi)) = brush_range {
        title.push_str(&format!(" [brush {}-{}]", lo + 1, hi + 1));
    }
    title
}

fn border_style(app: &App, which: ChartFocus) -> Style {
    if app.focus == which {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn brush_range_for(app: &App, which: ChartFocus) -> Option<(usize, usize)> {
    if app.focus != which {
        return None;
    }
    match &app.brush {
        Some(Brush::Interval { anchor, cursor }) => {
            Some((*anchor.min(cursor), *anchor.max(cursor)))
        }
        _ => None,
    }
}

fn animated_value(app: &App, which: ChartFocus, country: &str, fallback: f64) -> f64 {
    let transitions = match which {
        ChartFocus::LifeBars => &app.life_transitions,
        _ => &app.energy_transitions,
    };
    transitions.value(country, app.last_frame).unwrap_or(fallback)
}

const fn visible_slots(width: u16) -> usize {
    let usable = width.saturating_sub(2);
    (usable / (BAR_WIDTH + BAR_GAP)) as usize
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(value: f64) -> u64 {
    if value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_window_tracks_panel_width() {
        assert_eq!(visible_slots(52), 10);
        assert_eq!(visible_slots(2), 0);
    }

    #[test]
    fn bar_values_clamp_below_zero() {
        assert_eq!(bar_value(-1.0), 0);
        assert_eq!(bar_value(79.6), 80);
    }
}
