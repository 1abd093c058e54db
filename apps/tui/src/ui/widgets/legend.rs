use crate::app::App;
use crate::domain::{Continent, Metric};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

/// Width of the gradient swatch drawn under each choropleth, in cells.
const GRADIENT_STEPS: usize = 12;

/// One-line continent legend. Disabled continents stay visible but dimmed,
/// so the digit needed to re-enable them is always on screen.
pub fn continent_legend_line(app: &App) -> TextLine<'static> {
    let mut spans = Vec::new();

    for (index, continent) in Continent::ALL.iter().enumerate() {
        let enabled = app.continents.is_enabled(*continent);
        let swatch_style = if enabled {
            Style::default().fg(continent.color())
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label_style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        };

        spans.push(Span::styled("■ ", swatch_style));
        spans.push(Span::styled(
            format!("{}:{}", index + 1, continent.as_str()),
            label_style,
        ));
        spans.push(Span::raw("  "));
    }

    if app.selection.is_active() {
        spans.push(Span::styled(
            format!("| Selected: {} (x clears)", app.selection.len()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    TextLine::from(spans)
}

/// Gradient legend for a choropleth: a run of colored blocks between the
/// rounded domain endpoints. Collapses to a hint when the year has no data.
pub fn gradient_line(metric: Metric, domain: Option<(f64, f64)>) -> TextLine<'static> {
    let Some((lo, hi)) = domain else {
        return TextLine::from(Span::styled(
            "no data",
            Style::default().fg(Color::DarkGray),
        ));
    };

    let mut spans = vec![Span::styled(
        format!("{} ", lo.round()),
        Style::default().fg(Color::Gray),
    )];

    for step in 0..GRADIENT_STEPS {
        #[allow(clippy::cast_precision_loss)]
        let t = step as f64 / (GRADIENT_STEPS - 1) as f64;
        spans.push(Span::styled(
            "█",
            Style::default().fg(super::choropleth::ramp_color(metric, t)),
        ));
    }

    spans.push(Span::styled(
        format!(" {}", hi.round()),
        Style::default().fg(Color::Gray),
    ));

    TextLine::from(spans)
}
