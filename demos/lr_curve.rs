use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use lr_policy::{LrSchedule, ScheduleConfig};

/// Print the learning rate of every iteration as CSV.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Policy name, `sgdr` or `step`.
    #[arg(long, default_value = "sgdr")]
    policy: String,
    /// YAML or JSON schedule config.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
    /// Override the configured training horizon.
    #[arg(long)]
    max_iter: Option<usize>,
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logger(verbose: bool) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(if verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Info
        })
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScheduleConfig::from_file(&cli.config)?;
    let schedule = LrSchedule::from_name(&cli.policy, config, cli.max_iter)?;
    log::info!(
        "{} schedule over {} iterations",
        schedule.policy(),
        schedule.max_iter()
    );

    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    writer.write_record(["iteration", "lr"])?;
    for (iteration, lr) in schedule.curve().enumerate() {
        writer.write_record([iteration.to_string(), lr.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = setup_logger(cli.verbose) {
        eprintln!("failed to set up logging: {err}");
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
