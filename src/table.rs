use std::borrow::Cow;
use std::fmt::Write as _;

/// Widest a rendered cell may be before it is cut with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 40;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers
        .iter()
        .map(|h| display_width(&clip(h)))
        .collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(&clip(cell)));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();

    let header_line = format_row(headers, &widths);
    let _ = writeln!(output, "{header_line}");

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let separator_line = format_row(&separator_cells, &separator_widths);
    let _ = writeln!(output, "{separator_line}");

    for row in rows {
        let row_line = format_row(row, &widths);
        let _ = writeln!(output, "{row_line}");
    }

    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let rendered = render_table(headers, rows);
    print!("{rendered}");
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let clipped = clip(value);
        let display = display_width(&clipped);
        let mut cell = clipped;
        let padding = widths[idx].saturating_sub(display);
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

/// Flattens control whitespace and shortens long survey answers.
fn clip(value: &str) -> String {
    let sanitized = sanitize_cell(value);
    if display_width(&sanitized) <= MAX_CELL_WIDTH {
        return sanitized.into_owned();
    }
    let mut clipped: String = sanitized.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            value
                .chars()
                .map(|ch| match ch {
                    '\n' | '\r' | '\t' => ' ',
                    other => other,
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let rendered = render_table(
            &strings(&["#", "name"]),
            &[strings(&["1", "Order"]), strings(&["10", "City"])],
        );
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "#   name");
        assert_eq!(lines[1], "---  -----");
        assert_eq!(lines[2], "1   Order");
        assert_eq!(lines[3], "10  City");
    }

    #[test]
    fn long_and_multiline_cells_are_clipped() {
        let long = "x".repeat(MAX_CELL_WIDTH + 5);
        let rendered = render_table(&strings(&["a"]), &[vec![long], strings(&["one\ntwo"])]);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[2].chars().count(), MAX_CELL_WIDTH);
        assert!(lines[2].ends_with('…'));
        assert_eq!(lines[3], "one two");
    }
}
