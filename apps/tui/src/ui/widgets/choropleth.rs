use crate::app::state::{App, ChartFocus};
use crate::app::view::MapView;
use crate::app::Highlight;
use crate::data::geo::CountryFeature;
use crate::domain::Metric;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const LIFE_RAMP: ((u8, u8, u8), (u8, u8, u8)) = ((207, 226, 242), (13, 48, 107));
const ENERGY_RAMP: ((u8, u8, u8), (u8, u8, u8)) = ((255, 245, 230), (204, 136, 0));
const NEUTRAL: Color = Color::Rgb(224, 224, 224);

/// Linear color ramp for a metric, `t` in `[0, 1]`.
pub fn ramp_color(metric: Metric, t: f64) -> Color {
    let ((r0, g0, b0), (r1, g1, b1)) = match metric {
        Metric::LifeExpectancy => LIFE_RAMP,
        Metric::EnergyConsumption => ENERGY_RAMP,
    };
    Color::Rgb(
        lerp_channel(r0, r1, t),
        lerp_channel(g0, g1, t),
        lerp_channel(b0, b1, t),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
}

/// Choropleth panel: country outlines painted on a canvas, colored by the
/// year's value through the metric's ramp. The map bounds are refit to the
/// geometry on every draw, so a resize just works.
pub fn render_map_panel(app: &App, f: &mut Frame<'_>, area: Rect, which: ChartFocus) {
    let Some(views) = &app.views else {
        render_placeholder(f, area, which, "Loading...");
        return;
    };
    let map = match which {
        ChartFocus::EnergyMap => &views.energy_map,
        _ => &views.life_map,
    };

    if map.features.is_empty() {
        render_placeholder(f, area, which, "No map data");
        return;
    }

    let Some(bounds) = fit_bounds(&map.features) else {
        render_placeholder(f, area, which, "No map data");
        return;
    };

    let block = Block::default()
        .title(which.label())
        .borders(Borders::ALL)
        .border_style(border_style(app, which));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let canvas = Canvas::default()
        .paint(|ctx| {
            for feature in &map.features {
                let color = feature_color(app, map, feature);
                for ring in &feature.rings {
                    for segment in ring.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: segment[0].0,
                            y1: segment[0].1,
                            x2: segment[1].0,
                            y2: segment[1].1,
                            color,
                        });
                    }
                }
            }
        })
        .x_bounds([bounds.0, bounds.1])
        .y_bounds([bounds.2, bounds.3]);
    f.render_widget(canvas, split[0]);

    let legend = Paragraph::new(super::legend::gradient_line(map.metric, map.domain))
        .alignment(Alignment::Center);
    f.render_widget(legend, split[1]);
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

fn border_style(app: &App, which: ChartFocus) -> Style {
    if app.focus == which {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

/// Selection takes precedence over the value ramp: selected features pop to
/// white, filtered-out ones drop to dark gray, everything else keeps its
/// ramp (or neutral) color.
fn feature_color(app: &App, map: &MapView, feature: &CountryFeature) -> Color {
    let highlight = feature
        .joined
        .as_ref()
        .map_or(Highlight::Normal, |joined| {
            app.selection.style_for(&joined.country)
        });

    match highlight {
        Highlight::Selected => Color::White,
        Highlight::Dimmed => Color::DarkGray,
        Highlight::Normal => value_color(map, feature),
    }
}

fn value_color(map: &MapView, feature: &CountryFeature) -> Color {
    let Some(value) = MapView::metric_value(feature, map.metric) else {
        return NEUTRAL;
    };
    let Some((lo, hi)) = map.domain else {
        return NEUTRAL;
    };

    let t = if hi > lo { (value - lo) / (hi - lo) } else { 1.0 };
    ramp_color(map.metric, t)
}

/// Bounding box over every ring: `(x_min, x_max, y_min, y_max)`.
fn fit_bounds(features: &[CountryFeature]) -> Option<(f64, f64, f64, f64)> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for feature in features {
        for ring in &feature.rings {
            for (x, y) in ring {
                bounds = Some(bounds.map_or((*x, *x, *y, *y), |(x0, x1, y0, y1)| {
                    (x0.min(*x), x1.max(*x), y0.min(*y), y1.max(*y))
                }));
            }
        }
    }
    bounds.filter(|(x0, x1, y0, y1)| x1 > x0 && y1 > y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_hits_both_endpoints() {
        assert_eq!(
            ramp_color(Metric::LifeExpectancy, 0.0),
            Color::Rgb(207, 226, 242)
        );
        assert_eq!(
            ramp_color(Metric::LifeExpectancy, 1.0),
            Color::Rgb(13, 48, 107)
        );
        assert_eq!(
            ramp_color(Metric::EnergyConsumption, 1.0),
            Color::Rgb(204, 136, 0)
        );
    }

    #[test]
    fn ramp_clamps_out_of_range_values() {
        assert_eq!(
            ramp_color(Metric::LifeExpectancy, -3.0),
            ramp_color(Metric::LifeExpectancy, 0.0)
        );
        assert_eq!(
            ramp_color(Metric::LifeExpectancy, 2.0),
            ramp_color(Metric::LifeExpectancy, 1.0)
        );
    }

    #[test]
    fn bounds_cover_every_ring() {
        let features = vec![CountryFeature {
            id: 1,
            name: "A".to_string(),
            iso_a3: "AAA",
            rings: vec![vec![(-10.0, 5.0), (20.0, 15.0), (0.0, -5.0)]],
            joined: None,
        }];
        assert_eq!(fit_bounds(&features), Some((-10.0, 20.0, -5.0, 15.0)));
    }

    #[test]
    fn degenerate_geometry_yields_no_bounds() {
        let features = vec![CountryFeature {
            id: 1,
            name: "A".to_string(),
            iso_a3: "AAA",
            rings: vec![vec![(1.0, 1.0), (1.0, 1.0)]],
            joined: None,
        }];
        assert_eq!(fit_bounds(&features), None);
    }
}
