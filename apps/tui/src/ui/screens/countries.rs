use crate::app::{App, Highlight};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_countries_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    render_search_bar(app, f, chunks[0]);
    render_table(app, f, chunks[1]);
    render_help_line(f, chunks[2]);
}

fn render_search_bar(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let (prompt, style) = if app.searching {
        (
            format!("/{}█", app.search_input),
            Style::default().fg(Color::Yellow),
        )
    } else if app.search_input.is_empty() {
        (
            "Press / to search".to_string(),
            Style::default().fg(Color::Gray),
        )
    } else {
        (
            format!("/{}", app.search_input),
            Style::default().fg(Color::White),
        )
    };

    let paragraph = Paragraph::new(Span::styled(prompt, style)).block(
        Block::default()
            .title(format!(" Countries - {} ", app.year))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_table(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let rows_source = app
        .views
        .as_ref()
        .map(|views| views.browser_rows(&app.search_input))
        .unwrap_or_default();

    if rows_source.is_empty() {
        let block = Block::default()
            .title("Country Table")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No countries match.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Country"),
        Cell::from("Continent"),
        Cell::from("Life"),
        Cell::from("Energy"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = rows_source.len();
    let selected = app.selected_row_index.min(total_rows - 1);
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, selected);

    let rows = rows_source
        .iter()
        .skip(offset)
        .take(max_visible_rows)
        .enumerate()
        .map(|(i, record)| {
            let is_cursor = i + offset == selected;
            let style = if is_cursor {
                Style::default()
                    .bg(Color::Rgb(52, 152, 219))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                match app.selection.style_for(&record.country) {
                    Highlight::Selected => Style::default()
                        .fg(record.continent.color())
                        .add_modifier(Modifier::BOLD),
                    Highlight::Dimmed => Style::default().fg(Color::DarkGray),
                    Highlight::Normal => Style::default().fg(record.continent.color()),
                }
            };

            Row::new(vec![
                Cell::from(record.country.clone()),
                Cell::from(record.continent.as_str()),
                Cell::from(format!("{:.1}", record.life_expectancy)),
                Cell::from(
                    record
                        .energy_consumption
                        .map_or_else(String::new, |energy| format!("{energy:.2}")),
                ),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(28),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!("Country Table ({} of {})", selected + 1, total_rows))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_help_line(f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let help_text = vec![
        Span::styled("ESC", key_style),
        Span::raw(": Back to dashboard   "),
        Span::styled("↑/↓", key_style),
        Span::raw(": Navigate   "),
        Span::styled("/", key_style),
        Span::raw(": Search   "),
        Span::styled("Enter", key_style),
        Span::raw(": Select country   "),
        Span::styled("x", key_style),
        Span::raw(": Clear selection   "),
        Span::styled("q", key_style),
        Span::raw(": Quit"),
    ];

    let paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
