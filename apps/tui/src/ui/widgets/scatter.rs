use crate::app::state::{App, Brush, ChartFocus};
use crate::app::Highlight;
use crate::domain::Continent;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

/// Energy-vs-life scatterplot. Points are grouped into one dataset per
/// continent so each keeps its legend color; dimmed points collapse into a
/// single gray dataset underneath.
pub fn render_scatter_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(views) = &app.views else {
        render_placeholder(f, area, "Loading...");
        return;
    };
    let scatter = &views.scatter;

    if scatter.points.is_empty() {
        render_placeholder(f, area, "No data for selected year");
        return;
    }

    let mut by_continent: Vec<(Continent, Vec<(f64, f64)>)> = Continent::ALL
        .iter()
        .map(|continent| (*continent, Vec::new()))
        .collect();
    let mut dimmed: Vec<(f64, f64)> = Vec::new();

    for point in &scatter.points {
        match app.selection.style_for(&point.country) {
            Highlight::Dimmed => dimmed.push((point.energy, point.life)),
            Highlight::Normal | Highlight::Selected => {
                by_continent[point.continent.index()].1.push((point.energy, point.life));
            }
        }
    }

    let brush_corners = brush_corner_points(app, scatter.x_max, scatter.y_max);

    let mut datasets = vec![Dataset::default()
        .name("filtered")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::DarkGray))
        .data(&dimmed)];

    for (continent, points) in &by_continent {
        if points.is_empty() {
            continue;
        }
        datasets.push(
            Dataset::default()
                .name(continent.as_str())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(continent.color()))
                .data(points),
        );
    }

    if let Some(corners) = &brush_corners {
        datasets.push(
            Dataset::default()
                .name("brush")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .data(corners),
        );
    }

    let x_labels = axis_labels(scatter.x_max, 2);
    let y_labels = axis_labels(scatter.y_max, 1);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(ChartFocus::Scatter.label())
                .borders(Borders::ALL)
                .border_style(border_style(app)),
        )
        .x_axis(
            Axis::default()
                .title("Energy (per-capita)")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, scatter.x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Life (years)")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, scatter.y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_placeholder(f: &mut Frame<'_>, area: Rect, message: &str) {
    let block = Block::default()
        .title(ChartFocus::Scatter.label())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn border_style(app: &App) -> Style {
    if app.focus == ChartFocus::Scatter {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

/// The in-progress scatter brush is drawn as its four rectangle corners in
/// data space; the committed selection does its own styling.
fn brush_corner_points(app: &App, x_max: f64, y_max: f64) -> Option<Vec<(f64, f64)>> {
    if app.focus != ChartFocus::Scatter {
        return None;
    }
    let Some(Brush::Rect { anchor, cursor }) = &app.brush else {
        return None;
    };

    let (x0, x1) = (anchor.0 * x_max, cursor.0 * x_max);
    let (y0, y1) = (anchor.1 * y_max, cursor.1 * y_max);
    Some(vec![(x0, y0), (x0, y1), (x1, y0), (x1, y1)])
}

fn axis_labels(max: f64, decimals: usize) -> Vec<Span<'static>> {
    vec![
        Span::raw("0"),
        Span::raw(format!("{:.decimals$}", max / 2.0)),
        Span::raw(format!("{max:.decimals$}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;

    #[test]
    fn brush_corners_only_exist_while_rect_brushing() {
        let mut app = App::new();
        assert!(brush_corner_points(&app, 100.0, 100.0).is_none());

        app.focus = ChartFocus::Scatter;
        app.brush = Some(Brush::Rect {
            anchor: (0.0, 0.0),
            cursor: (0.5, 1.0),
        });
        let corners = brush_corner_points(&app, 200.0, 90.0);
        assert_eq!(corners, Some(vec![(0.0, 0.0), (0.0, 90.0), (100.0, 0.0), (100.0, 90.0)]));
    }
}
