use crate::app::state::ChartFocus;
use crate::app::App;
use crate::ui::widgets::bars::render_bar_panel;
use crate::ui::widgets::choropleth::render_map_panel;
use crate::ui::widgets::legend::continent_legend_line;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::scatter::render_scatter_panel;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = build_layout(f);

    render_title_section(app, f, layout[0]);
    render_legend_row(app, f, layout[1]);
    render_chart_grid(app, f, layout[2]);
    render_status_section(app, f, layout[3]);
    render_shortcuts(f, layout[4]);
}

fn build_layout(f: &Frame<'_>) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + year slider
            Constraint::Length(1), // Continent legend
            Constraint::Min(12),   // Chart grid
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec()
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Life Expectancy Dashboard ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(title_block, area);

    let inner = area.inner(Margin::new(1, 1));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(inner);

    if app.loading {
        let throbber = Throbber::default()
            .label("Loading dataset...")
            .style(Style::default().fg(Color::Cyan));
        let mut state = app.throbber_state.clone();
        f.render_stateful_widget(throbber, chunks[0], &mut state);
        return;
    }

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Life ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "& Energy",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    render_year_slider(app, f, chunks[1]);
}

/// The year slider, drawn as a gauge across the slider's bounds rather than
/// just the years that have rows.
fn render_year_slider(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (min_year, max_year) = app.year_bounds;
    let span = (max_year - min_year).max(1);
    let ratio = f64::from(app.year - min_year) / f64::from(span);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Rgb(52, 152, 219)).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(
            format!("Year: {} ({min_year}-{max_year})", app.year),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, area);
}

fn render_legend_row(app: &App, f: &mut Frame<'_>, area: Rect) {
    let legend = Paragraph::new(continent_legend_line(app)).alignment(Alignment::Left);
    f.render_widget(legend, area);
}

fn render_chart_grid(app: &App, f: &mut Frame<'_>, area: Rect) {
    if let Some(error) = &app.load_error {
        let block = Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let paragraph = Paragraph::new(format!("Failed to load data: {error}"))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    render_bar_panel(app, f, top[0], ChartFocus::LifeBars);
    render_bar_panel(app, f, top[1], ChartFocus::EnergyBars);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[1]);
    render_scatter_panel(app, f, bottom[0]);
    render_map_panel(app, f, bottom[1], ChartFocus::LifeMap);
    render_map_panel(app, f, bottom[2], ChartFocus::EnergyMap);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        Text::from(Span::styled(
            format!("Focus: {}", app.focus.label()),
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Text::from(Span::styled(&app.status_message, style))
    };

    let paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(shortcuts_line()).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn shortcuts_line() -> TextLine<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    TextLine::from(vec![
        Span::styled("?", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("←/→", key_style),
        Span::styled(": Year | ", text_style),
        Span::styled("1-7", key_style),
        Span::styled(": Continents | ", text_style),
        Span::styled("Tab", key_style),
        Span::styled(": Focus | ", text_style),
        Span::styled("b", key_style),
        Span::styled(": Brush | ", text_style),
        Span::styled("x", key_style),
        Span::styled(": Clear | ", text_style),
        Span::styled("c", key_style),
        Span::styled(": Countries | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ])
}

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let shortcut = |key: &'static str, what: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("  {key}"), key_style),
            Span::styled(format!(" - {what}"), Style::default()),
        ])
    };

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Life Expectancy Dashboard",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Explore life expectancy and per-capita energy consumption by country and year. \
             All five charts share the same year, continent filter and selection.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        shortcut("?", "Toggle this help popup"),
        shortcut("Left/Right", "Step the year slider"),
        shortcut("PgUp/PgDn", "Jump the year by 10"),
        shortcut("1-7", "Toggle a continent on/off"),
        shortcut("Tab/Shift-Tab", "Cycle chart focus"),
        shortcut("b", "Start a brush on the focused chart"),
        shortcut("Arrows", "Extend the brush"),
        shortcut("Enter", "Commit the brush as the selection"),
        shortcut("Esc", "Cancel the brush (selection kept)"),
        shortcut("x", "Clear the selection"),
        shortcut("h/l", "Scroll the focused bar chart"),
        shortcut("c", "Open the country browser"),
        shortcut("q", "Quit"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Selection:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from(
            "  A committed brush replaces the previous selection everywhere. Selected \
             countries stay highlighted across year changes; an empty brush clears.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
