//! Terminal rendering of headers, tables and statistics.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;
use sheetsift_ingest::any_to_string;
use sheetsift_model::{CellValue, HeaderRow, StatsSummary};

/// Result rows printed before the table is cut off.
pub const RESULT_DISPLAY_ROWS: usize = 50;

/// Header names and cell text of the first `limit` rows.
pub fn frame_rows(df: &DataFrame, limit: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let header: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let height = df.height().min(limit);
    let rows = (0..height)
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| column.get(idx).map(any_to_string).unwrap_or_default())
                .collect()
        })
        .collect();
    (header, rows)
}

/// Label/value lines of the statistics block.
pub fn stats_lines(stats: &StatsSummary) -> Vec<(String, String)> {
    let mut lines = vec![
        ("Column".to_string(), stats.column.clone()),
        ("Count".to_string(), stats.count.to_string()),
    ];
    if let Some(numeric) = &stats.numeric {
        lines.push(("Sum".to_string(), CellValue::Float(numeric.sum).to_string()));
        lines.push(("Mean".to_string(), numeric.mean_display()));
        lines.push(("Min".to_string(), CellValue::Float(numeric.min).to_string()));
        lines.push(("Max".to_string(), CellValue::Float(numeric.max).to_string()));
    }
    lines
}

pub fn frame_table(df: &DataFrame, limit: usize) -> Table {
    let (header, rows) = frame_rows(df, limit);
    let mut table = Table::new();
    table.set_header(header.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(row);
    }
    table
}

pub fn headers_table(columns: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, name) in columns.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(name)]);
    }
    table
}

pub fn values_table(column: &str, values: &[CellValue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(column), header_cell("Type")]);
    apply_table_style(&mut table);
    for value in values {
        table.add_row(vec![Cell::new(value), dim_cell(value.kind())]);
    }
    table
}

pub fn stats_table(stats: &StatsSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value) in stats_lines(stats) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn print_headers(columns: &[String], header_row: HeaderRow) {
    println!("Detected headers (row {header_row}):");
    println!("{}", headers_table(columns));
}

pub fn print_frame(title: &str, df: &DataFrame, limit: usize) {
    println!("{title}");
    println!("{}", frame_table(df, limit));
    if df.height() > limit {
        println!("... {} more rows", df.height() - limit);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
