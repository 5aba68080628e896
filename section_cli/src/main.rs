//! # Section CLI Application
//!
//! Terminal front-end over `section_core`:
//!
//! ```text
//! section_cli list [kind]
//! section_cli show <name>... [--units m|cm|mm] [--json] [--kv] [--search]
//!                  [--config settings.json] [--save out.json] [--verbose]
//! ```
//!
//! Logs go to stderr so `--json` and `--kv` output can be piped.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use section_core::cache::PropertyCache;
use section_core::catalog::ShapeCatalog;
use section_core::errors::SectionError;
use section_core::file_io::{load_settings, save_property};
use section_core::report::{key_values, render_table};
use section_core::settings::{CalculationSettings, PrincipalAxisMethod};
use section_core::shapes::ShapeKind;
use section_core::units::LengthUnit;
use section_core::SectionCalculator;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "\
Usage:
  section_cli list [kind]
  section_cli show <name>... [--units m|cm|mm] [--json] [--kv] [--search]
                   [--config settings.json] [--save out.json] [--verbose]

Kinds: angle, plate, tube, i, upn, t, wpg, group";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Table,
    Json,
    KeyValues,
}

#[derive(Debug, Clone, PartialEq)]
struct ShowArgs {
    names: Vec<String>,
    units: LengthUnit,
    output: Output,
    search: bool,
    config: Option<PathBuf>,
    save: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    List(Option<ShapeKind>),
    Show(ShowArgs),
    Help,
}

/// Parse the arguments after the program name.
///
/// Returns the command and whether `--verbose` was given.
fn parse_args(args: &[String]) -> Result<(Command, bool), String> {
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let mut rest = args.iter().filter(|a| *a != "--verbose" && *a != "-v");

    let command = match rest.next().map(String::as_str) {
        None | Some("help") | Some("--help") | Some("-h") => Command::Help,
        Some("list") => {
            let kind = match rest.next() {
                Some(keyword) => Some(
                    ShapeKind::from_keyword(keyword).ok_or_else(|| format!("Unknown shape kind '{}'", keyword))?,
                ),
                None => None,
            };
            if let Some(extra) = rest.next() {
                return Err(format!("Unexpected argument '{}'", extra));
            }
            Command::List(kind)
        }
        Some("show") => {
            let mut show = ShowArgs {
                names: Vec::new(),
                units: LengthUnit::Meter,
                output: Output::Table,
                search: false,
                config: None,
                save: None,
            };
            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "--units" => {
                        let value = rest.next().ok_or("--units needs a value")?;
                        show.units = value.parse().map_err(|e: SectionError| e.to_string())?;
                    }
                    "--json" => show.output = Output::Json,
                    "--kv" => show.output = Output::KeyValues,
                    "--search" => show.search = true,
                    "--config" => show.config = Some(rest.next().ok_or("--config needs a path")?.into()),
                    "--save" => show.save = Some(rest.next().ok_or("--save needs a path")?.into()),
                    flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
                    name => show.names.push(name.to_string()),
                }
            }
            if show.names.is_empty() {
                return Err("show needs at least one section name".to_string());
            }
            if show.save.is_some() && show.names.len() > 1 {
                return Err("--save takes a single section name".to_string());
            }
            Command::Show(show)
        }
        Some(other) => return Err(format!("Unknown command '{}'", other)),
    };
    Ok((command, verbose))
}

fn list(kind: Option<ShapeKind>) {
    let catalog = ShapeCatalog::standard();
    let kinds: Vec<ShapeKind> = match kind {
        Some(kind) => vec![kind],
        None => ShapeKind::ALL.to_vec(),
    };
    for kind in kinds {
        let shapes = catalog.shapes_of_kind(kind);
        if shapes.is_empty() {
            continue;
        }
        println!("{} ({})", kind, shapes.len());
        for entry in shapes {
            println!("  {}", entry.name);
        }
    }
}

fn show(args: &ShowArgs) -> Result<(), SectionError> {
    let mut settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => CalculationSettings::default(),
    };
    if args.search {
        settings.principal_axis = PrincipalAxisMethod::Search;
    }

    let catalog = ShapeCatalog::standard();
    let cache = PropertyCache::new(SectionCalculator::new(settings));

    for name in &args.names {
        let entry = catalog.entry(name).map_err(|e| {
            let similar: Vec<&str> = catalog
                .search(&name.chars().take(3).collect::<String>())
                .into_iter()
                .take(5)
                .map(|s| s.name.as_str())
                .collect();
            if !similar.is_empty() {
                eprintln!("Did you mean: {}", similar.join(", "));
            }
            e
        })?;
        let property = cache.property_of(entry)?;

        match args.output {
            Output::Table => println!("{}", render_table(&property, args.units)),
            Output::Json => println!("{}", serde_json::to_string_pretty(&property)?),
            Output::KeyValues => {
                for (key, value) in key_values(&property) {
                    println!("{} = {:e}", key, value);
                }
            }
        }

        if let Some(path) = &args.save {
            save_property(&property, path)?;
            info!(path = %path.display(), "saved section properties");
        }
    }
    Ok(())
}

/// Convert raw arguments, rejecting any that are not valid UTF-8.
fn collect_args(raw: impl IntoIterator<Item = OsString>) -> Result<Vec<String>, String> {
    raw.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|bad| format!("Argument '{}' is not valid UTF-8", bad.to_string_lossy()))
        })
        .collect()
}

fn main() -> ExitCode {
    let parsed = collect_args(std::env::args_os().skip(1)).and_then(|args| parse_args(&args));
    let (command, verbose) = match parsed {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    match command {
        Command::Help => {
            println!("{}", USAGE);
            ExitCode::SUCCESS
        }
        Command::List(kind) => {
            list(kind);
            ExitCode::SUCCESS
        }
        Command::Show(show_args) => match show(&show_args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
                ExitCode::FAILURE
            }
        },
    }
}
