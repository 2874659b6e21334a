use colored::Colorize;
use framepace_stats::{RankedCell, RankedTable};

/// How ranked cells are highlighted in the text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marking {
    /// Green for first place, yellow for second, cyan beyond.
    Color,
    /// `*` before first place, `+` before any other ranked cell.
    Plain,
}

const COLUMN_GAP: usize = 2;

/// Render the table with left-aligned columns wide enough for every cell.
pub fn render_table(table: &RankedTable, marking: Marking) -> String {
    let id_width = table
        .rows
        .iter()
        .map(|r| r.run_id.len())
        .chain(table.header.first().map(String::len))
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;
    // One extra column for the plain marker.
    let cell_width = table
        .rows
        .iter()
        .flat_map(|r| r.cells.iter().map(|c| c.text.len() + 1))
        .chain(table.header.iter().skip(1).map(String::len))
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;

    let mut out = String::new();

    let mut line = String::new();
    for (i, heading) in table.header.iter().enumerate() {
        let width = if i == 0 { id_width } else { cell_width };
        line.push_str(&format!("{heading:<width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    for row in &table.rows {
        let mut line = format!("{:<id_width$}", row.run_id);
        for cell in &row.cells {
            line.push_str(&render_cell(cell, marking, cell_width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_cell(cell: &RankedCell, marking: Marking, width: usize) -> String {
    match marking {
        Marking::Plain => {
            let marker = match cell.tier {
                Some(0) => "*",
                Some(_) => "+",
                None => "",
            };
            format!("{:<width$}", format!("{marker}{}", cell.text))
        }
        Marking::Color => {
            let padding = " ".repeat(width.saturating_sub(cell.text.len()));
            let text = match cell.tier {
                Some(0) => cell.text.green().to_string(),
                Some(1) => cell.text.yellow().to_string(),
                Some(_) => cell.text.cyan().to_string(),
                None => cell.text.clone(),
            };
            format!("{text}{padding}")
        }
    }
}
