use clap::Parser;
use life_expectancy::{
    clean, config, init_logging,
    source::{Client, LocalSource, DEFAULT_DATASET},
};
use std::path::PathBuf;

/// Read a dataset with life expectancy per year, unit, sex, age and region, unpivot it, and save
/// the observations for the requested regions to a new file.
#[derive(Parser)]
enum Command {
    /// Clean a raw dataset saved in local storage.
    Clean {
        /// The raw Eurostat export, in tab-separated format.
        #[clap(
            short,
            long,
            env = "LIFE_EXPECTANCY_INPUT",
            value_name = "FILE",
            default_value = config::DEFAULT_INPUT
        )]
        input: PathBuf,

        #[clap(flatten)]
        opt: config::Options,
    },
    /// Download the latest dataset from Eurostat and clean it.
    Pull {
        /// The Eurostat code of the dataset to download.
        #[clap(
            short,
            long,
            env = "LIFE_EXPECTANCY_DATASET",
            default_value = DEFAULT_DATASET
        )]
        dataset: String,

        /// Save the raw dataset to FILE as well.
        #[clap(long, env = "LIFE_EXPECTANCY_RAW_OUT", value_name = "FILE")]
        raw_out: Option<PathBuf>,

        #[clap(flatten)]
        opt: config::Options,
    },
}

#[async_std::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging();

    match Command::parse() {
        Command::Clean { input, opt } => {
            clean::run(&LocalSource::open(input), &opt, None::<PathBuf>).await?;
        }
        Command::Pull {
            dataset,
            raw_out,
            opt,
        } => {
            let client = Client::new(dataset)?;
            clean::run(&client, &opt, raw_out).await?;
        }
    }

    Ok(())
}
