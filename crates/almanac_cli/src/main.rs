mod settings;
mod signals;

use std::path::PathBuf;

use almanac_search::{
    ExtremumKind, classify_extremum, find_critical_points, find_discrete, find_roots,
};
use almanac_time::{TimePoint, UtcTime};
use clap::{Args, Parser, Subcommand};

use crate::settings::{DEFAULT_PATH, Settings};
use crate::signals::Signal;

#[derive(Parser)]
#[command(name = "almanac", about = "Almanac event-finder diagnostics")]
struct Cli {
    /// Settings file with [root], [critical], [discrete] tables
    #[arg(long, global = true, default_value = DEFAULT_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SearchArgs {
    /// Built-in signal to search
    #[arg(long, value_enum, default_value = "sine")]
    signal: Signal,
    /// Signal period in days, also used as the rough period
    #[arg(long, default_value = "10.0")]
    period: f64,
    /// Start: Julian Date or UTC (YYYY-MM-DDThh:mm:ssZ)
    #[arg(long)]
    start: String,
    /// End: Julian Date or UTC (YYYY-MM-DDThh:mm:ssZ)
    #[arg(long)]
    end: String,
    /// Override samples per rough period
    #[arg(long)]
    samples: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Continuous zero-crossings of a signal
    Roots {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Local minima and maxima of a signal
    Extrema {
        #[command(flatten)]
        search: SearchArgs,
        /// Override the flatness tolerance (signal units per day)
        #[arg(long)]
        flatness: Option<f64>,
    },
    /// Sign changes of a signal
    Transitions {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Convert UTC to Julian Date
    Jd {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        date: String,
    },
    /// Convert Julian Date to UTC
    Utc {
        /// Julian Date
        jd: f64,
    },
    /// Write the default settings file
    InitConfig,
}

/// Parse a Julian Date number or a UTC timestamp.
fn parse_time(s: &str) -> Result<TimePoint, String> {
    if let Ok(jd) = s.parse::<f64>() {
        return Ok(TimePoint::from_jd(jd));
    }
    let utc: UtcTime = s.parse().map_err(|e| format!("{e}"))?;
    Ok(utc.to_time_point())
}

fn require_time(s: &str) -> TimePoint {
    parse_time(s).unwrap_or_else(|e| {
        eprintln!("Invalid time {s}: {e}");
        std::process::exit(1);
    })
}

fn format_time(t: TimePoint) -> String {
    format!("{} ({t})", UtcTime::from_time_point(t))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Roots { search } => {
            let settings = Settings::load_from_path(&cli.config);
            let mut config = settings.root.to_config();
            if let Some(n) = search.samples {
                config.samples_per_period = n;
            }
            let start = require_time(&search.start);
            let end = require_time(&search.end);
            let f = search.signal.function(start, search.period);

            match find_roots(start, end, &f, &config) {
                Ok(roots) => {
                    println!("{} roots", roots.len());
                    for r in roots {
                        println!("  {}  value {:+.3e}", format_time(r.time), r.value);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Extrema { search, flatness } => {
            let settings = Settings::load_from_path(&cli.config);
            let mut config = settings.critical.to_config();
            if let Some(n) = search.samples {
                config.samples_per_period = n;
            }
            if let Some(eps) = flatness {
                config.epsilon_flatness = eps;
            }
            let start = require_time(&search.start);
            let end = require_time(&search.end);
            let f = search.signal.function(start, search.period);

            match find_critical_points(start, end, &f, &config) {
                Ok(extrema) => {
                    println!("{} extrema", extrema.len());
                    for e in extrema {
                        let kind = match classify_extremum(&e) {
                            ExtremumKind::Minimum => "min",
                            ExtremumKind::Maximum => "max",
                        };
                        println!(
                            "  {kind}  {}  value {:.6}  width {:.2e} d  slope {:+.2e}",
                            format_time(e.center()),
                            e.value(),
                            e.width_days(),
                            e.mean_slope()
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Transitions { search } => {
            let settings = Settings::load_from_path(&cli.config);
            let mut config = settings.discrete.to_config();
            if let Some(n) = search.samples {
                config.samples_per_period = n;
            }
            let start = require_time(&search.start);
            let end = require_time(&search.end);
            let f = search.signal.sign_state(start, search.period);

            match find_discrete(start, end, &f, &config) {
                Ok(changes) => {
                    println!("{} transitions", changes.len());
                    for c in changes {
                        println!("  {}  {} -> {}", format_time(c.time), c.previous, c.current);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Jd { date } => {
            let utc: UtcTime = date.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            println!("{:.6}", utc.to_time_point().jd());
        }

        Commands::Utc { jd } => {
            if !jd.is_finite() {
                eprintln!("Invalid Julian Date: {jd}");
                std::process::exit(1);
            }
            println!("{}", UtcTime::from_time_point(TimePoint::from_jd(jd)));
        }

        Commands::InitConfig => {
            if cli.config.exists() {
                eprintln!("{} already exists", cli.config.display());
                std::process::exit(1);
            }
            if let Err(e) = Settings::default().save_to_path(&cli.config) {
                eprintln!("Failed to write {}: {e}", cli.config.display());
                std::process::exit(1);
            }
            println!("Wrote {}", cli.config.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jd_and_utc() {
        assert_eq!(parse_time("2451545.0").unwrap().jd(), 2_451_545.0);
        let t = parse_time("2000-01-01T12:00:00Z").unwrap();
        assert!((t.jd() - 2_451_545.0).abs() < 1e-9);
        assert!(parse_time("yesterday").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flatness_override_parses() {
        let cli = Cli::try_parse_from([
            "almanac", "extrema", "--signal", "sawtooth", "--period", "2", "--start", "0",
            "--end", "10", "--flatness", "0.01",
        ])
        .unwrap();
        match cli.command {
            Commands::Extrema { search, flatness } => {
                assert_eq!(search.signal, Signal::Sawtooth);
                assert_eq!(search.period, 2.0);
                assert_eq!(flatness, Some(0.01));
            }
            _ => panic!("expected extrema"),
        }
        assert_eq!(cli.config, PathBuf::from(DEFAULT_PATH));
    }
}
