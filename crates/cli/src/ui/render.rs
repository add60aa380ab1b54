use chrono::Local;
use dnswatch_application::services::MonitorSnapshot;
use dnswatch_domain::{DisplayColor, Grid};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use std::time::Duration;

const TITLE: &str = " dnswatch ";
const KEY_HELP: &str = "arrows/hjkl move  Enter history  r refresh  q quit";

pub fn color(color: DisplayColor) -> Color {
    match color {
        DisplayColor::Yellow => Color::Yellow,
        DisplayColor::Green => Color::Green,
        DisplayColor::Orange => Color::Rgb(255, 165, 0),
        DisplayColor::Blue => Color::Blue,
        DisplayColor::Purple => Color::Magenta,
        DisplayColor::Red => Color::Red,
        DisplayColor::Aqua => Color::Cyan,
        DisplayColor::White => Color::White,
    }
}

pub fn draw(
    frame: &mut Frame,
    snapshot: &MonitorSnapshot,
    elapsed: Duration,
    selected: (usize, usize),
    popup: Option<&[String]>,
) {
    let [table_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    draw_table(frame, table_area, &snapshot.grid, elapsed, selected);
    frame.render_widget(Paragraph::new(status_line(snapshot)), status_area);

    if let Some(lines) = popup {
        draw_popup(frame, lines);
    }
}

fn status_line(snapshot: &MonitorSnapshot) -> String {
    match snapshot.completed_at {
        Some(at) => format!(
            "pass {} at {}  |  {}",
            snapshot.pass,
            at.with_timezone(&Local).format("%H:%M:%S"),
            KEY_HELP
        ),
        None => format!("collecting...  |  {}", KEY_HELP),
    }
}

fn text_width(grid: &Grid, col: usize) -> u16 {
    grid.rows()
        .iter()
        .filter_map(|row| row.get(col))
        .map(|cell| cell.text.chars().count())
        .max()
        .unwrap_or(0) as u16
}

/// Data columns that fit next to the label column, keeping `selected_col`
/// in view.
fn visible_columns(grid: &Grid, inner_width: u16, selected_col: usize) -> Vec<usize> {
    let data_cols = grid.column_count().saturating_sub(1);
    let label_width = text_width(grid, 0);
    let data_width = (1..=data_cols)
        .map(|c| text_width(grid, c))
        .max()
        .unwrap_or(0);

    let available = inner_width.saturating_sub(label_width);
    let fit = usize::from((available / (data_width + 1)).max(1));

    let selected = selected_col.saturating_sub(1);
    let start = if selected >= fit { selected + 1 - fit } else { 0 };
    (start + 1..=data_cols.min(start + fit)).collect()
}

fn draw_table(frame: &mut Frame, area: Rect, grid: &Grid, elapsed: Duration, selected: (usize, usize)) {
    let block = Block::bordered().title(TITLE);

    if grid.row_count() == 0 {
        frame.render_widget(
            Paragraph::new("Waiting for the first collection pass...").block(block),
            area,
        );
        return;
    }

    let mut columns = vec![0];
    columns.extend(visible_columns(grid, area.width.saturating_sub(2), selected.1));

    let row_of = |r: usize| {
        let cells = columns.iter().filter_map(|&c| {
            let cell = grid.cell(r, c)?;
            let mut style = Style::default().fg(color(cell.color_at(elapsed)));
            if r == 0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            if (r, c) == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Some(Cell::from(cell.text.as_str()).style(style))
        });
        Row::new(cells.collect::<Vec<_>>())
    };

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|&c| Constraint::Length(text_width(grid, c)))
        .collect();

    let table = Table::new((1..grid.row_count()).map(&row_of), widths)
        .header(row_of(0))
        .column_spacing(1)
        .block(block);

    let mut state = TableState::default().with_selected(Some(selected.0.saturating_sub(1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_popup(frame: &mut Frame, lines: &[String]) {
    let area = centered(frame.area(), 70, 60);
    let text: Vec<Line> = lines.iter().map(|line| Line::from(line.as_str())).collect();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(Block::bordered().title(" History (Esc to close) "))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    area
}
