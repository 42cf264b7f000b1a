//! The cleaning pipeline.
//!
//! Cleaning is an extract-transform-load job over a wide Eurostat export:
//! 1. Extract the raw export from a [`Source`] and parse it into a [`RawTable`].
//! 2. Transform it into a long [`Table`], by
//!    * [reshaping](reshape) the per-period columns into one record per observation,
//!    * [renaming](rename) index columns,
//!    * [filtering](filter) out regions we are not interested in, and
//!    * [reformatting](reformat) raw cells into numbers, dropping missing observations.
//! 3. Load the result into a file.

use super::{
    config::{self, Options, REGION_COLUMN},
    output::{self, Format},
    region::Region,
    source::{LocalSource, Source},
    table::{RawTable, Record, Table, Value},
};
use anyhow::{Context, Error};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Matches the numeric part of a Eurostat cell, ignoring any trailing flags.
const NUMBER_PATTERN: &str = r"\d+\.\d";

/// Runs the cleaning pipeline one step at a time.
#[derive(Clone, Debug, Default)]
pub struct DataCleaner {
    raw: Option<RawTable>,
    table: Option<Table>,
}

impl DataCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a raw export.
    ///
    /// If `out` is provided, the raw export is also saved there, unmodified.
    pub async fn extract<S, P>(&mut self, source: &S, out: Option<P>) -> Result<(), Error>
    where
        S: Source + ?Sized,
        P: AsRef<Path>,
    {
        tracing::info!("extracting {}", source.describe());
        let content = source.fetch().await?;

        if let Some(out) = out {
            let out = out.as_ref();
            async_std::fs::write(out, &content)
                .await
                .with_context(|| format!("unable to save raw dataset to {}", out.display()))?;
            tracing::info!("saved raw dataset to {}", out.display());
        }

        let raw = RawTable::parse(&content)
            .with_context(|| format!("malformed dataset {}", source.describe()))?;
        tracing::info!(
            "extracted {} rows over {} periods",
            raw.rows.len(),
            raw.periods.len()
        );
        self.raw = Some(raw);
        self.table = None;
        Ok(())
    }

    /// Reshape, rename, filter and reformat the extracted data.
    ///
    /// The raw data is kept, so this can be called again with different parameters.
    pub fn transform(
        &mut self,
        id_vars: &[impl AsRef<str>],
        regions: &[Region],
        rename_cols: &HashMap<String, String>,
    ) -> Result<(), Error> {
        let raw = self
            .raw
            .as_ref()
            .ok_or_else(|| Error::msg("cannot transform before extracting data"))?;

        let mut table = reshape(raw, id_vars)?;
        tracing::info!("reshaped into {} records", table.len());
        rename(&mut table, rename_cols);
        filter(&mut table, regions)?;
        tracing::info!(
            "{} records in regions {}",
            table.len(),
            regions
                .iter()
                .map(Region::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
        reformat(&mut table)?;
        tracing::info!("{} records with values", table.len());

        self.table = Some(table);
        Ok(())
    }

    /// The transformed data, if [`transform`](Self::transform) has run.
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Write the transformed data to `path`, creating its parent directory if necessary.
    pub async fn load(&self, path: impl AsRef<Path>, format: Format) -> Result<(), Error> {
        let path = path.as_ref();
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Error::msg("cannot load before transforming data"))?;
        let rendered = output::render(table, format)?;
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            async_std::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("unable to create {}", dir.display()))?;
        }
        async_std::fs::write(path, rendered)
            .await
            .with_context(|| format!("unable to write {}", path.display()))?;
        tracing::info!("wrote {} records to {}", table.len(), path.display());
        Ok(())
    }
}

/// Clean the life expectancy dataset from `source` according to `opt`.
///
/// If `raw_out` is provided, the raw dataset is saved there as well.
pub async fn run<S, P>(source: &S, opt: &Options, raw_out: Option<P>) -> Result<(), Error>
where
    S: Source + ?Sized,
    P: AsRef<Path>,
{
    tracing::info!("cleaning {}", source.describe());
    let mut cleaner = DataCleaner::new();
    cleaner.extract(source, raw_out).await?;
    cleaner.transform(
        &config::DEFAULT_ID_VARS,
        &opt.regions,
        &config::default_rename(),
    )?;
    cleaner.load(&opt.output, opt.format).await?;
    tracing::info!("finished cleaning {}", source.describe());
    Ok(())
}

/// Clean the life expectancy dataset saved at `input`.
pub async fn clean_data(input: impl Into<PathBuf>, opt: &Options) -> Result<(), Error> {
    run(&LocalSource::open(input), opt, None::<&Path>).await
}

/// Melt the per-period columns of `raw` into one record per (row, period).
///
/// Only the index columns named in `id_vars` are kept, in that order. Records are ordered by
/// period first and then by row, both in file order.
pub fn reshape(raw: &RawTable, id_vars: &[impl AsRef<str>]) -> Result<Table, Error> {
    let positions = id_vars
        .iter()
        .map(|var| {
            let var = var.as_ref();
            raw.index_column(var).ok_or_else(|| {
                Error::msg(format!(
                    "unknown index column {var}; expected one of {}",
                    raw.index_columns.join(", ")
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let years = raw
        .periods
        .iter()
        .map(|period| {
            period
                .parse::<u16>()
                .with_context(|| format!("period {period:?} is not a year"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(raw.rows.len() * years.len());
    for (col, &year) in years.iter().enumerate() {
        for row in &raw.rows {
            records.push(Record {
                ids: positions.iter().map(|&i| row.index[i].clone()).collect(),
                year,
                value: Value::Raw(row.cells[col].clone()),
            });
        }
    }

    Ok(Table {
        id_columns: id_vars.iter().map(|var| var.as_ref().to_string()).collect(),
        records,
    })
}

/// Rename identifying columns according to `rename_cols`.
///
/// Entries which do not name a column of `table` are ignored.
pub fn rename(table: &mut Table, rename_cols: &HashMap<String, String>) {
    for col in &mut table.id_columns {
        if let Some(new) = rename_cols.get(col) {
            *col = new.clone();
        }
    }
}

/// Keep only records in one of `regions`.
pub fn filter(table: &mut Table, regions: &[Region]) -> Result<(), Error> {
    let col = table
        .id_column(REGION_COLUMN)
        .ok_or_else(|| Error::msg(format!("table has no {REGION_COLUMN} column")))?;
    table
        .records
        .retain(|record| regions.iter().any(|region| region.as_str() == record.ids[col]));
    Ok(())
}

/// Convert raw cells into numbers.
///
/// Eurostat cells are a number followed by optional flags (`81.2 e`), or `:` when there is no
/// observation. Records without a number are dropped.
pub fn reformat(table: &mut Table) -> Result<(), Error> {
    let pattern = Regex::new(NUMBER_PATTERN)?;
    table.records.retain_mut(|record| {
        let number = match &record.value {
            Value::Number(x) => Some(*x),
            Value::Raw(cell) => pattern
                .find(cell)
                .and_then(|m| m.as_str().parse::<f64>().ok()),
        };
        match number {
            Some(x) => {
                record.value = Value::Number(x);
                true
            }
            None => {
                tracing::debug!(
                    "dropping {:?} {}: no value in {:?}",
                    record.ids,
                    record.year,
                    record.value.to_string()
                );
                false
            }
        }
    });
    Ok(())
}
