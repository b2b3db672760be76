//! Command-line front end for cafetally.
//!
//! # Responsibility
//! - Forward user actions (sell, unsell, reset, import) into the core.
//! - Print menu, totals and CSV export computed by the core.
//!
//! # Invariants
//! - Every command opens state through `InventoryService::load`.
//! - `reset` never runs without `--yes` or an interactive `y` answer.
//! - Argument errors are reported by clap; runtime failures print one line
//!   to stderr and exit with status 1.

use cafetally_core::db::open_db;
use cafetally_core::{
    format_amount, init_from_config, CoreConfig, ImportSource, InventoryService,
    ResetConfirmation, SlotStore, SqliteSlotStore,
};
use clap::{ArgAction, Parser, Subcommand};
use log::{error, info};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "cafetally", version, about = "Cafe recipe and ingredient tally")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Core linkage check
    Ping,
    /// Print core version
    Version,
    /// List recipes with sold counts
    Menu {
        /// Case-insensitive name or category filter
        filter: Vec<String>,
    },
    /// Record one sold unit
    Sell { id: String },
    /// Remove one sold unit
    Unsell { id: String },
    /// Clear every sold count
    Reset {
        /// Skip the interactive confirmation
        #[arg(short = 'y', long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Print ingredient totals
    Totals,
    /// Write totals CSV to a file, or stdout when no path is given
    Export {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Merge recipes from .csv/.json files
    Import {
        #[arg(value_name = "FILE", num_args = 1.., required = true)]
        files: Vec<PathBuf>,
    },
}

fn run<S: SlotStore>(
    command: Command,
    service: &mut InventoryService<S>,
    confirm: impl FnOnce() -> bool,
    out: &mut impl Write,
) -> Result<(), String> {
    let io_err = |err: std::io::Error| format!("cannot write output: {err}");

    match command {
        Command::Ping => {
            writeln!(out, "cafetally_core ping={}", cafetally_core::ping()).map_err(io_err)
        }
        Command::Version => writeln!(
            out,
            "cafetally_core version={}",
            cafetally_core::core_version()
        )
        .map_err(io_err),
        Command::Menu { filter } => {
            let entries = service.menu(&filter.join(" "));
            for entry in &entries {
                writeln!(
                    out,
                    "{:<16} {:<24} {:<10} sold={}",
                    entry.recipe.id, entry.recipe.name, entry.recipe.category, entry.count
                )
                .map_err(io_err)?;
                for line in &entry.recipe.ingredients {
                    let amount = format_amount(line.quantity, &line.unit);
                    writeln!(out, "    {:<20} {amount}", line.name).map_err(io_err)?;
                }
            }
            writeln!(
                out,
                "{} of {} recipes, {} orders",
                entries.len(),
                service.recipe_count(),
                service.total_orders()
            )
            .map_err(io_err)
        }
        Command::Sell { id } => {
            let id = id.trim();
            let count = service.increment(id).map_err(|err| err.to_string())?;
            writeln!(out, "{id} sold={count}").map_err(io_err)
        }
        Command::Unsell { id } => {
            let id = id.trim();
            service.decrement(id).map_err(|err| err.to_string())?;
            writeln!(out, "{id} sold={}", service.count(id)).map_err(io_err)
        }
        Command::Reset { yes } => {
            let confirmation = if yes || confirm() {
                ResetConfirmation::Confirmed
            } else {
                ResetConfirmation::Declined
            };
            let changed = service.reset(confirmation).map_err(|err| err.to_string())?;
            let message = match (confirmation, changed) {
                (ResetConfirmation::Declined, _) => "reset cancelled",
                (_, true) => "all sold counts cleared",
                (_, false) => "nothing to reset",
            };
            writeln!(out, "{message}").map_err(io_err)
        }
        Command::Totals => {
            let totals = service.totals();
            if totals.is_empty() {
                return writeln!(out, "no ingredients used yet").map_err(io_err);
            }
            for total in totals {
                writeln!(
                    out,
                    "{:<24} {}",
                    total.ingredient_name,
                    format_amount(total.total, &total.unit)
                )
                .map_err(io_err)?;
            }
            Ok(())
        }
        Command::Export { path: None } => {
            write!(out, "{}", service.export_totals_csv()).map_err(io_err)
        }
        Command::Export { path: Some(path) } => {
            std::fs::write(&path, service.export_totals_csv())
                .map_err(|err| format!("cannot write `{}`: {err}", path.display()))?;
            writeln!(out, "totals written to {}", path.display()).map_err(io_err)
        }
        Command::Import { files } => {
            let report = service
                .import_sources(files.iter().map(ImportSource::from_path))
                .map_err(|err| err.to_string())?;
            for failure in &report.failures {
                writeln!(out, "failed: {}: {}", failure.file_name, failure.error)
                    .map_err(io_err)?;
            }
            writeln!(
                out,
                "imported {} file(s): {} new, {} updated, {} rejected",
                report.files_imported,
                report.merge.inserted.len(),
                report.merge.updated.len(),
                report.merge.rejected.len()
            )
            .map_err(io_err)
        }
    }
}

fn confirm_on_stdin() -> bool {
    eprint!("Reset all sold counts? [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = CoreConfig::from_env();
    if let Err(err) = init_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open `{}`: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let mut service = InventoryService::load(SqliteSlotStore::new(&conn));

    let mut stdout = std::io::stdout().lock();
    match run(cli.command, &mut service, confirm_on_stdin, &mut stdout) {
        Ok(()) => {
            info!("event=cli_command module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=cli_command module=cli status=error");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, Command};
    use cafetally_core::db::open_db_in_memory;
    use cafetally_core::{InventoryService, SqliteSlotStore};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("cafetally").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn parses_commands_and_rejects_bad_arity() {
        assert_eq!(
            parse(&["sell", "latte"]).unwrap(),
            Command::Sell {
                id: "latte".to_string()
            }
        );
        assert_eq!(
            parse(&["reset", "--yes"]).unwrap(),
            Command::Reset { yes: true }
        );
        assert_eq!(parse(&["reset", "-y"]).unwrap(), Command::Reset { yes: true });
        assert_eq!(parse(&["reset"]).unwrap(), Command::Reset { yes: false });
        assert_eq!(
            parse(&["menu", "cold", "brew"]).unwrap(),
            Command::Menu {
                filter: vec!["cold".to_string(), "brew".to_string()]
            }
        );
        assert_eq!(
            parse(&["import", "a.csv", "b.json"]).unwrap(),
            Command::Import {
                files: vec![PathBuf::from("a.csv"), PathBuf::from("b.json")]
            }
        );
        assert_eq!(parse(&["export"]).unwrap(), Command::Export { path: None });

        assert!(parse(&["sell"]).is_err());
        assert!(parse(&["sell", "latte", "mocha"]).is_err());
        assert!(parse(&["import"]).is_err());
        assert!(parse(&["export", "a.csv", "b.csv"]).is_err());
        assert!(parse(&["reset", "--force"]).is_err());
        assert!(parse(&["brew"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn sell_then_totals_prints_formatted_amounts() {
        let conn = open_db_in_memory().expect("in-memory db");
        let mut service = InventoryService::load(SqliteSlotStore::new(&conn));
        let mut out = Vec::new();

        run(
            Command::Sell {
                id: "latte".to_string(),
            },
            &mut service,
            || false,
            &mut out,
        )
        .expect("sell should succeed");
        run(Command::Totals, &mut service, || false, &mut out).expect("totals");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.contains("latte sold=1"));
        assert!(text.contains("220 ml"));
    }

    #[test]
    fn reset_without_confirmation_keeps_counts() {
        let conn = open_db_in_memory().expect("in-memory db");
        let mut service = InventoryService::load(SqliteSlotStore::new(&conn));
        service.increment("espresso").expect("increment");
        let mut out = Vec::new();

        run(
            Command::Reset { yes: false },
            &mut service,
            || false,
            &mut out,
        )
        .expect("declined reset is not an error");
        assert_eq!(service.total_orders(), 1);

        run(
            Command::Reset { yes: false },
            &mut service,
            || true,
            &mut out,
        )
        .expect("confirmed reset");
        assert_eq!(service.total_orders(), 0);

        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.contains("reset cancelled"));
        assert!(text.contains("all sold counts cleared"));
    }

    #[test]
    fn unknown_recipe_is_reported() {
        let conn = open_db_in_memory().expect("in-memory db");
        let mut service = InventoryService::load(SqliteSlotStore::new(&conn));
        let mut out = Vec::new();

        let err = run(
            Command::Unsell {
                id: "flat-white".to_string(),
            },
            &mut service,
            || false,
            &mut out,
        )
        .expect_err("unknown id must fail");
        assert!(err.contains("flat-white"));
    }
}
