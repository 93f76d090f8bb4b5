// CLI binary entry point for mp3info

mod cli;

use clap::Parser;
use std::process;

use cli::commands::{command_batch, command_info, command_scan};
use cli::{CliResult, Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();
    init_logging(&config);

    match run(&config) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn init_logging(config: &Config) {
    let level = if config.verbose {
        "debug"
    } else if config.quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Run the selected command; returns the number of files that failed.
fn run(config: &Config) -> CliResult<usize> {
    let policy = config.policy();
    let options = config.scan_options()?;
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match &config.command {
        Commands::Scan { files, output } => {
            command_scan(files, output.as_deref(), policy, &options, &formatter)
        }
        Commands::Info { files, detailed } => {
            command_info(files, *detailed, policy, &options, &formatter)
        }
        Commands::Batch {
            directory,
            pattern,
            jobs,
        } => command_batch(directory, pattern, *jobs, policy, &options, &formatter),
    }
}
