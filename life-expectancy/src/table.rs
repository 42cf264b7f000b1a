//! In-memory tables.
//!
//! Eurostat exports are "wide": each row is keyed by a comma-separated list of dimensions packed
//! into a single cell, followed by one column per period. For example
//!
//! ```text
//! unit,sex,age,geo\time	2021 	2020
//! YR,F,Y1,PT	81.7 	81.2 e
//! ```
//!
//! [`RawTable`] is a direct parse of that layout. [`Table`] is the "long" form produced by
//! cleaning, with one [`Record`] per (row, period) pair.

use anyhow::{bail, Error};
use std::fmt::{self, Display, Formatter};

/// Name of the column holding the period of each record in a [`Table`].
pub const YEAR_COLUMN: &str = "year";

/// Name of the column holding the observed value of each record in a [`Table`].
pub const VALUE_COLUMN: &str = "value";

/// A wide table, as exported by Eurostat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTable {
    /// Names of the dimensions packed into the first cell of each row.
    pub index_columns: Vec<String>,
    /// Header of each remaining column, with surrounding whitespace removed.
    pub periods: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// A single line of a [`RawTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    /// The value of each index column.
    pub index: Vec<String>,
    /// The raw value for each period, exactly as it appears in the file.
    pub cells: Vec<String>,
}

impl RawTable {
    /// Parse a tab-separated Eurostat export.
    ///
    /// The first header cell names the index columns followed by the name of the column axis,
    /// separated by `,` or `\` (e.g. `unit,sex,age,geo\time`). The column axis is not a column
    /// of its own and is discarded.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            bail!("TSV file is empty");
        };
        let mut header = header.split('\t');
        let mut index_columns = header
            .next()
            .unwrap_or_default()
            .replace('\\', ",")
            .split(',')
            .map(|name| name.trim().to_string())
            .collect::<Vec<_>>();
        index_columns.pop();
        if index_columns.is_empty() {
            bail!("TSV header has no index columns");
        }
        let periods = header
            .map(|period| period.trim().to_string())
            .collect::<Vec<_>>();
        if periods.is_empty() {
            bail!("TSV header has no period columns");
        }

        let rows = lines
            .map(|(line_num, line)| {
                let mut cells = line.split('\t');
                let index = cells
                    .next()
                    .unwrap_or_default()
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .collect::<Vec<_>>();
                if index.len() != index_columns.len() {
                    bail!(
                        "line {line_num} has {} index values, expected {}",
                        index.len(),
                        index_columns.len()
                    );
                }
                let cells = cells.map(String::from).collect::<Vec<_>>();
                if cells.len() != periods.len() {
                    bail!(
                        "line {line_num} has {} values, expected {}",
                        cells.len(),
                        periods.len()
                    );
                }
                Ok(RawRow { index, cells })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            index_columns,
            periods,
            rows,
        })
    }

    /// The position of the index column called `name`, if any.
    pub fn index_column(&self, name: &str) -> Option<usize> {
        self.index_columns.iter().position(|col| col == name)
    }
}

/// A long table: one record per observation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Names of the identifying columns of each record, in output order.
    pub id_columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// The position of the identifying column called `name`, if any.
    pub fn id_column(&self, name: &str) -> Option<usize> {
        self.id_columns.iter().position(|col| col == name)
    }

    /// All column names, in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.id_columns
            .iter()
            .map(String::as_str)
            .chain([YEAR_COLUMN, VALUE_COLUMN])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A single observation in a [`Table`].
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The value of each of the table's [`id_columns`](Table::id_columns).
    pub ids: Vec<String>,
    pub year: u16,
    pub value: Value,
}

/// An observed value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A cell that has not been cleaned yet, possibly carrying Eurostat flags.
    Raw(String),
    Number(f64),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Raw(s) => write!(f, "{s}"),
            // Integral values keep one decimal place.
            Self::Number(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Number(x) => write!(f, "{x}"),
        }
    }
}
