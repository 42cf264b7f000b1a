//! Paths, defaults and command line options shared by every command.

use super::{output::Format, region::Region};
use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;

/// The raw Eurostat export, relative to the working directory.
pub const DEFAULT_INPUT: &str = "life_expectancy/data/eu_life_expectancy_raw.tsv";

/// Where the cleaned dataset is written.
pub const DEFAULT_OUTPUT: &str = "life_expectancy/data/pt_life_expectancy.csv";

/// Index columns of the life expectancy dataset which are kept in the cleaned output.
pub const DEFAULT_ID_VARS: [&str; 4] = ["unit", "sex", "age", "geo"];

/// The column used to select regions, after renaming.
pub const REGION_COLUMN: &str = "region";

/// Renames applied to the index columns of the life expectancy dataset.
pub fn default_rename() -> HashMap<String, String> {
    [("geo".to_string(), REGION_COLUMN.to_string())]
        .into_iter()
        .collect()
}

/// Cleaning options.
#[derive(Clone, Debug, Args)]
pub struct Options {
    /// Only keep observations for REGION (may be given multiple times).
    #[clap(
        short = 'r',
        long = "region",
        env = "LIFE_EXPECTANCY_REGIONS",
        value_name = "REGION",
        num_args = 1..,
        value_delimiter = ',',
        default_value = crate::region::DEFAULT_REGION
    )]
    pub regions: Vec<Region>,

    /// Write the cleaned dataset to FILE.
    #[clap(
        short,
        long,
        env = "LIFE_EXPECTANCY_OUTPUT",
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT
    )]
    pub output: PathBuf,

    /// Format of the cleaned dataset.
    #[clap(short, long, env = "LIFE_EXPECTANCY_FORMAT", default_value = "csv")]
    pub format: Format,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            regions: vec![Region::default()],
            output: DEFAULT_OUTPUT.into(),
            format: Format::default(),
        }
    }
}
