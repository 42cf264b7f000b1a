//! Serialization of cleaned tables.

use super::table::{Table, Value, VALUE_COLUMN, YEAR_COLUMN};
use anyhow::Error;
use serde_json::{json, Map};
use std::borrow::Cow;
use strum::{Display, EnumIter, EnumString};

/// A file format for cleaned data.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Format {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// A JSON array with one object per record.
    Json,
}

/// Render `table` in the given format.
pub fn render(table: &Table, format: Format) -> Result<String, Error> {
    match format {
        Format::Csv => Ok(render_csv(table)),
        Format::Json => render_json(table),
    }
}

fn render_csv(table: &Table) -> String {
    let mut out = String::new();
    push_csv_line(&mut out, table.columns().map(Cow::Borrowed));
    for record in &table.records {
        push_csv_line(
            &mut out,
            record
                .ids
                .iter()
                .map(|id| Cow::Borrowed(id.as_str()))
                .chain([
                    Cow::Owned(record.year.to_string()),
                    Cow::Owned(record.value.to_string()),
                ]),
        );
    }
    out
}

fn push_csv_line<'a>(out: &mut String, fields: impl Iterator<Item = Cow<'a, str>>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains(&[',', '"', '\n', '\r'][..]) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&field);
        }
    }
    out.push('\n');
}

fn render_json(table: &Table) -> Result<String, Error> {
    let rows = table
        .records
        .iter()
        .map(|record| {
            let mut row = Map::new();
            for (col, id) in table.id_columns.iter().zip(&record.ids) {
                row.insert(col.clone(), json!(id));
            }
            row.insert(YEAR_COLUMN.into(), json!(record.year));
            row.insert(
                VALUE_COLUMN.into(),
                match &record.value {
                    Value::Number(x) => json!(x),
                    Value::Raw(s) => json!(s),
                },
            );
            serde_json::Value::Object(row)
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_string_pretty(&rows)?)
}
