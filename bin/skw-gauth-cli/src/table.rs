/// Layout selected by `GOOGAUTH_STYLE`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// `0`: padded columns only
    Plain,
    /// `1`: a dashed rule under the header row
    Underlined,
    /// `2`: full `+---+` box
    #[default]
    Boxed,
    /// Anything else renders nothing
    Unknown(String),
}

impl From<&str> for TableStyle {
    fn from(value: &str) -> Self {
        match value {
            "0" => TableStyle::Plain,
            "1" => TableStyle::Underlined,
            "2" => TableStyle::Boxed,
            other => TableStyle::Unknown(other.to_string()),
        }
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|text| width(text))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// One space, the text, then padding up to the column width plus one.
fn cell(text: Option<&String>, size: usize) -> String {
    match text {
        Some(text) => format!(" {}{}", text, " ".repeat(size + 1 - width(text))),
        None => " ".repeat(size + 2),
    }
}

fn render_row(row: &[String], widths: &[usize], border: &str) -> String {
    let mut line = border.to_string();
    for (col, size) in widths.iter().enumerate() {
        line.push_str(&cell(row.get(col), *size));
        line.push_str(border);
    }
    line
}

pub fn tabulify(rows: &[Vec<String>], style: &TableStyle) -> String {
    let widths = column_widths(rows);
    if widths.is_empty() {
        return String::new();
    }

    match style {
        TableStyle::Plain => rows
            .iter()
            .map(|row| render_row(row, &widths, ""))
            .collect::<Vec<_>>()
            .join("\n"),
        TableStyle::Underlined => {
            let rule: Vec<String> = widths.iter().map(|size| "-".repeat(*size)).collect();
            let mut output = Vec::with_capacity(rows.len() + 1);
            for (y, row) in rows.iter().enumerate() {
                output.push(render_row(row, &widths, ""));
                if y == 0 {
                    output.push(render_row(&rule, &widths, ""));
                }
            }
            output.join("\n")
        },
        TableStyle::Boxed => {
            let mut sep = "+".to_string();
            for size in &widths {
                sep.push_str(&"-".repeat(size + 2));
                sep.push('+');
            }

            let mut output = vec![sep.clone()];
            for row in rows {
                output.push(render_row(row, &widths, "|"));
                output.push(sep.clone());
            }
            output.join("\n")
        },
        TableStyle::Unknown(style) => {
            log::debug!("unknown table style {:?}, nothing rendered", style);
            String::new()
        },
    }
}
