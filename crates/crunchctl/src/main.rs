//! Crunchctl - CLI front-end for the number cruncher
//!
//! Runs crunch cycles against the live trivia endpoint and reports the
//! verdicts, the tummy contents, and optionally the audit log.

use anyhow::Result;
use clap::Parser;
use cruncher::{CrunchError, FactSourceConfig, NumberCruncher, NumberRequester};
use owo_colors::OwoColorize;
use tracing::{warn, Level};

#[derive(Parser)]
#[command(name = "crunchctl")]
#[command(about = "Fetch number trivia and digest the even ones", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of crunch cycles to run
    #[arg(long, default_value_t = 5)]
    count: u32,

    /// Capacity of the tummy (retained even-number facts)
    #[arg(long, default_value_t = 3)]
    tummy_size: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Print the audit log as JSON after the run
    #[arg(long)]
    show_log: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let requester = NumberRequester::over_http(FactSourceConfig {
        timeout_secs: cli.timeout,
    })?;
    let mut cruncher = NumberCruncher::new(cli.tummy_size, requester)?;

    for _ in 0..cli.count {
        match cruncher.crunch() {
            Ok(verdict) => println!("{}", verdict.green()),
            Err(CrunchError::FailedRequest { error_code }) => {
                warn!(error_code, "fact source returned an error status");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let tummy = cruncher.tummy();
    println!(
        "\nTummy ({} of {}):",
        tummy.len(),
        cli.tummy_size
    );
    for digested in &tummy {
        println!("  {} {}", digested.number.bold(), digested.fact);
    }

    if cli.show_log {
        println!("\n{}", serde_json::to_string_pretty(cruncher.log())?);
    }

    Ok(())
}
