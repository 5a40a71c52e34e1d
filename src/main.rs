use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use exifdash::config::Config;
use exifdash::report::{Dashboard, DashboardOptions};
use exifdash::logging::{self, LogTarget};
use exifdash::{Analyzer, Granularity, Scanner};

/// Command line arguments; anything set here overrides the config file.
#[derive(Debug, Default)]
struct Args {
    photos: Option<PathBuf>,
    config_path: Option<PathBuf>,
    timeline: Option<String>,
    no_recursive: bool,
    no_gps: bool,
    json: bool,
    verbose: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("exifdash {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" | "-c" | "--timeline" | "-t" => {
                let flag = args[i].clone();
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires an argument", flag);
                    std::process::exit(1);
                };
                if flag == "--config" || flag == "-c" {
                    parsed.config_path = Some(PathBuf::from(value));
                } else {
                    parsed.timeline = Some(value.clone());
                }
                i += 1;
            }
            "--no-recursive" => parsed.no_recursive = true,
            "--no-gps" => parsed.no_gps = true,
            "--json" => parsed.json = true,
            "--verbose" | "-v" => parsed.verbose = true,
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            arg => {
                if parsed.photos.is_some() {
                    eprintln!("Only one photo folder may be given");
                    std::process::exit(1);
                }
                parsed.photos = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    parsed
}

fn print_help() {
    println!(
        r#"exifdash - summarize the EXIF metadata of a photo collection

USAGE:
    exifdash [OPTIONS] <FOLDER>

OPTIONS:
    --timeline, -t G    Timeline granularity: day, week, month, year
    --no-recursive      Only scan the top level of FOLDER
    --no-gps            Leave out the photo locations section
    --json              Print the dashboard as JSON
    --verbose, -v       Log to stderr at debug level
    --config, -c PATH   Path to config file
    --version, -V       Show version
    --help, -h          Show this help message

ENVIRONMENT:
    EXIFDASH_CONFIG     Path to config file (overrides default location)
    EXIFDASH_LOG        Log level (trace, debug, info, warn, error)

Config file location: $XDG_CONFIG_HOME/exifdash/config.toml"#
    );
}

fn main() -> Result<()> {
    let args = parse_args();

    // stdout is reserved for the report
    let _ = logging::init(LogTarget::for_cli(args.verbose));

    let mut config = match args.config_path {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(timeline) = args.timeline {
        config.dashboard.timeline = timeline;
    }
    if args.no_recursive {
        config.scanner.recursive = false;
    }
    if args.no_gps {
        config.dashboard.show_gps = false;
    }

    // Reject a bad granularity before spending time on the scan
    let granularity: Granularity = config.dashboard.granularity()?;

    let Some(folder) = args.photos else {
        print_help();
        bail!("no photo folder given");
    };

    let scanner = Scanner::new(config.scanner.clone());
    let records = scanner
        .scan(&folder, config.scanner.recursive)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;

    if records.is_empty() {
        bail!("No valid photos with EXIF data found in {}", folder.display());
    }

    let analyzer = Analyzer::new(records);
    let options = DashboardOptions {
        granularity,
        show_gps: config.dashboard.show_gps,
    };
    let dashboard = Dashboard::build(&analyzer, &options);

    if args.json {
        println!("{}", dashboard.to_json()?);
    } else {
        print!("{}", dashboard);
    }

    tracing::info!(photos = analyzer.total_photos(), "Dashboard rendered");
    Ok(())
}
