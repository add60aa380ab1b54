use dnswatch_domain::Grid;

const BLINK_MARK: char = '*';

/// Renders the grid as an aligned plain-text table. Cells that would blink
/// carry a trailing `*`.
pub fn render_table(grid: &Grid) -> String {
    let cells: Vec<Vec<String>> = grid
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.blink.should_blink {
                        format!("{}{}", cell.text, BLINK_MARK)
                    } else {
                        cell.text.clone()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..grid.column_count())
        .map(|c| {
            cells
                .iter()
                .filter_map(|row| row.get(c))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{:<width$}", text, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
