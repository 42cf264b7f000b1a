#![cfg(test)]

//! This module runs test cases defined in `data/test/cases`.
//!
//! Each test case consists of two files, named in terms of `<name>`, the name of the test case:
//! * `<name>.tsv`: a raw dataset in the Eurostat export format
//! * `<name>.json`: the regions to clean for, and the expected cleaned records
//!
//! The expectation file has the form
//! ```json
//! {
//!     "regions": ["PT"],
//!     "records": [{ "unit": "YR", "sex": "F", "age": "Y1", "region": "PT", "year": 2021, "value": 82.6 }]
//! }
//! ```
//! where `"regions"` may be omitted to clean for the default region. Each dataset is cleaned with
//! the default index columns and renames, and the result is compared, in order, against
//! `"records"`.

use crate::{
    clean::DataCleaner,
    config,
    output::{self, Format},
    region::Region,
    source::LocalSource,
};
use ansi_term::Color;
use anyhow::Error;
use serde::Deserialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::path::{Path, PathBuf};

#[async_std::test]
async fn cleaning_test_cases() -> Result<(), Error> {
    crate::init_logging();

    // Discover test cases.
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap();
    let test_cases = workspace
        .join("data/test/cases")
        .read_dir()?
        .filter_map(|dirent| {
            let path = dirent.unwrap().path();
            if path.extension()?.to_str().unwrap() == "tsv" {
                Some(TestCase::new(&path).unwrap())
            } else {
                None
            }
        })
        .collect::<Vec<_>>();
    assert!(!test_cases.is_empty(), "no test cases found");

    let mut results = vec![];
    for test in test_cases {
        results.push(test.run().await);
    }
    for result in &results {
        println!("{}", result);
    }
    if results.iter().any(TestResult::failed) {
        Err(Error::msg(format!("{}", Color::Red.paint("tests failed"))))
    } else {
        println!("All test cases passed.");
        Ok(())
    }
}

/// The contents of a `<name>.json` file.
#[derive(Clone, Debug, Deserialize)]
struct Expectation {
    #[serde(default)]
    regions: Option<Vec<Region>>,
    records: Value,
}

#[derive(Clone, Debug)]
struct TestCase {
    name: OsString,
    input: PathBuf,
    regions: Vec<Region>,
    records: Value,
}

impl TestCase {
    fn new(input: impl AsRef<Path>) -> Result<Self, Error> {
        let input = input.as_ref();
        let name = input.file_stem().unwrap();
        let expectation: Expectation =
            serde_json::from_reader(File::open(input.with_extension("json"))?)?;
        Ok(Self {
            name: name.into(),
            input: input.into(),
            regions: expectation
                .regions
                .unwrap_or_else(|| vec![Region::default()]),
            records: expectation.records,
        })
    }

    async fn run(self) -> TestResult {
        TestResult {
            name: self.name,
            failure: Self::do_test(self.input, self.regions, self.records)
                .await
                .err(),
        }
    }

    async fn do_test(input: PathBuf, regions: Vec<Region>, expected: Value) -> Result<(), Error> {
        let mut cleaner = DataCleaner::new();
        cleaner
            .extract(&LocalSource::open(input), None::<&Path>)
            .await?;
        cleaner.transform(
            &config::DEFAULT_ID_VARS,
            &regions,
            &config::default_rename(),
        )?;
        let table = cleaner
            .table()
            .ok_or_else(|| Error::msg("cleaner produced no table"))?;
        let actual: Value = serde_json::from_str(&output::render(table, Format::Json)?)?;
        if actual != expected {
            Err(Error::msg(format!(
                "expected records:\n{expected}\nactual records:\n{actual}"
            )))
        } else {
            Ok(())
        }
    }
}

struct TestResult {
    name: OsString,
    failure: Option<anyhow::Error>,
}

impl TestResult {
    fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

impl Display for TestResult {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}...", self.name.to_string_lossy())?;
        if let Some(err) = &self.failure {
            writeln!(f, "{}", Color::Red.paint("FAILED"))?;
            write!(f, "{err}")?;
        } else {
            write!(f, "{}", Color::Green.paint("OK"))?;
        }
        Ok(())
    }
}
