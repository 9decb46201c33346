use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use timerange::{DurationLike, TimeParser, TimeRange};
use timerange_core::{logging::init_tracing, CoreConfig};
use tracing::debug;

mod report;

use report::{print_membership, print_ranges, print_summary, render_json, CliError, RangeReport};

#[derive(Parser)]
#[command(name = "timerange")]
#[command(about = "Split, window and shift observation time ranges", long_about = None)]
struct Cli {
    /// Tracing filter, e.g. `debug` (overrides TIMERANGE_LOG)
    #[arg(long, global = true)]
    log: Option<String>,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

/// START is an instant; END is an instant or a duration from START (`86400`, `-1d`, `12h`).
#[derive(Args)]
struct RangeArgs {
    start: String,
    #[arg(allow_hyphen_values = true)]
    end: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show start, end, center and duration
    Info(RangeArgs),
    /// Divide the range into N equal parts
    Split {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(short, long)]
        n: usize,
    },
    /// Slide a fixed-width window across the range
    Window {
        #[command(flatten)]
        range: RangeArgs,
        /// Step between snapshot starts (e.g. `12h`, `600`)
        #[arg(long)]
        cadence: String,
        /// Width of each snapshot (e.g. `10s`)
        #[arg(long)]
        size: String,
    },
    /// Test whether TIME lies inside the range (exit code 1 when it does not)
    Contains {
        #[command(flatten)]
        range: RangeArgs,
        time: String,
    },
    /// Move the range by its own length
    Shift {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value_t = false)]
        backward: bool,
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// List the calendar dates the range touches
    Dates(RangeArgs),
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = CoreConfig::from_env()?;
    let level = cli.log.as_deref().or(config.log_level());
    // a subscriber may already be installed by an embedding process
    if let Err(err) = init_tracing(level) {
        eprintln!("{} {}", "warning:".yellow().bold(), err);
    }
    let parser = config.parser();
    debug!(extra_formats = parser.extra_formats().len(), "loaded configuration");

    match cli.command {
        Commands::Info(args) => {
            let range = build(&parser, &args)?;
            if cli.json {
                println!("{}", render_json(&RangeReport::from(&range))?);
            } else {
                print_summary(&range);
            }
        }
        Commands::Split { range, n } => {
            let pieces = build(&parser, &range)?.split(n)?;
            emit(cli.json, "Split into", &pieces)?;
        }
        Commands::Window {
            range,
            cadence,
            size,
        } => {
            let snapshots = build(&parser, &range)?
                .window(DurationLike::text(cadence), DurationLike::text(size))?;
            emit(cli.json, "Snapshots", &snapshots)?;
        }
        Commands::Contains { range, time } => {
            let range = build(&parser, &range)?;
            let contained = range.contains_instant(&parser.parse(&time)?);
            if cli.json {
                println!("{}", render_json(&contained)?);
            } else {
                print_membership(&range, &time, contained);
            }
            if !contained {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Shift {
            range,
            backward,
            times,
        } => {
            let mut range = build(&parser, &range)?;
            for _ in 0..times {
                if backward {
                    range.previous()?;
                } else {
                    range.next()?;
                }
            }
            if cli.json {
                println!("{}", render_json(&RangeReport::from(&range))?);
            } else {
                print_summary(&range);
            }
        }
        Commands::Dates(args) => {
            let dates = build(&parser, &args)?.get_dates();
            if cli.json {
                println!("{}", render_json(&dates)?);
            } else {
                for date in dates {
                    println!("{}", date.format("%Y-%m-%d"));
                }
            }
        }
        Commands::Version => {
            println!("timerange v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn build(parser: &TimeParser, args: &RangeArgs) -> Result<TimeRange, CliError> {
    Ok(TimeRange::with_parser(
        parser,
        (args.start.as_str(), args.end.as_str()),
    )?)
}

fn emit(json: bool, title: &str, ranges: &[TimeRange]) -> Result<(), CliError> {
    if json {
        let reports: Vec<RangeReport> = ranges.iter().map(RangeReport::from).collect();
        println!("{}", render_json(&reports)?);
    } else {
        print_ranges(title, ranges);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_window_arguments() {
        let cli = Cli::try_parse_from([
            "timerange",
            "window",
            "2012/1/1",
            "2012/1/2",
            "--cadence",
            "12h",
            "--size",
            "10s",
            "--json",
        ])
        .expect("valid arguments");
        assert!(cli.json);
        match cli.command {
            Commands::Window {
                range,
                cadence,
                size,
            } => {
                assert_eq!(range.start, "2012/1/1");
                assert_eq!(cadence, "12h");
                assert_eq!(size, "10s");
            }
            _ => panic!("expected window command"),
        }
    }

    #[test]
    fn builds_ranges_from_duration_end() {
        let args = RangeArgs {
            start: "2012/1/2".into(),
            end: "-1d".into(),
        };
        let range = build(&TimeParser::default(), &args).expect("valid range");
        assert_eq!(range, TimeRange::new("2012/1/1", "2012/1/2").unwrap());
    }
}
