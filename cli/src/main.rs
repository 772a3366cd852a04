#[macro_use]
extern crate log;

mod report;

use anyhow::Result;
use structopt::StructOpt;

use journey::{EngineConfig, Journey, ParseMode};

#[derive(StructOpt)]
#[structopt(name = "journey", about = "Analyze the GPS trace of a single vehicle journey")]
struct Args {
    /// The path to a tab-separated file of `label, timestamp, latitude, longitude` lines
    input: String,
    /// The path to a JSON file with engine settings. Missing fields use defaults.
    #[structopt(long)]
    config: Option<String>,
    /// Overrides the nominal minutes between samples that speeds are computed from
    #[structopt(long)]
    interval_minutes: Option<f64>,
    /// Skip malformed lines instead of failing on the first one
    #[structopt(long)]
    lenient: bool,
    /// Write every derived record to this CSV file
    #[structopt(long)]
    records_csv: Option<String>,
    /// Write the route and start/end markers to this GeoJSON file
    #[structopt(long)]
    geojson: Option<String>,
    /// Print the summary as JSON instead of a report
    #[structopt(long)]
    json: bool,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match self.config {
            Some(ref path) => serde_json::from_str(&fs_err::read_to_string(path)?)?,
            None => EngineConfig::default(),
        };
        if let Some(minutes) = self.interval_minutes {
            config.nominal_interval_minutes = minutes;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let config = args.engine_config()?;
    let mode = if args.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };

    let raw = fs_err::read_to_string(&args.input)?;
    let journey = Journey::analyze_with_mode(&raw, &config, mode)?;
    if !journey.skipped.is_empty() {
        warn!(
            "Skipped {} malformed lines in {}",
            journey.skipped.len(),
            args.input
        );
    }

    if let Some(ref path) = args.records_csv {
        write_records(&journey, path)?;
        info!("Wrote {} records to {path}", journey.records.len());
    }
    if let Some(ref path) = args.geojson {
        let gj = journey::export::route_feature_collection(&journey.records);
        fs_err::write(path, serde_json::to_string_pretty(&gj)?)?;
        info!("Wrote route to {path}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&journey.summary)?);
    } else {
        println!("{}", report::render(&journey));
    }
    Ok(())
}

fn write_records(journey: &Journey, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_writer(fs_err::File::create(path)?);
    for record in &journey.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
