use std::io;

use batch_renamer::cli::Args;
use batch_renamer::config::{base_rules, config_from_env};
use batch_renamer::logging;
use batch_renamer::output::{display_apply_result, display_preview, display_preview_simple};
use batch_renamer::progress::Progress;
use batch_renamer::{run_interactive, AppError, Session};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let env = config_from_env();
    debug!(?env, "Environment defaults loaded");

    let mut raw = base_rules(args.rules.as_deref(), &env)?;
    args.apply_rule_flags(&mut raw);
    let rules = raw.into_rule_config()?;

    if rules.is_identity() {
        info!("No rules enabled, names will stay unchanged");
    }

    let progress = Progress::for_verbosity(args.verbose > 0);
    let mut session = Session::open(&args.target_dir, rules, progress)?;
    if args.force {
        session = session.without_conflict_check();
    }

    let mut stdout = io::stdout();

    if args.interactive {
        run_interactive(&mut session, io::stdin().lock(), &mut stdout).map_err(display_error)?;
        if let Some(path) = &args.export_log {
            if !session.log().is_empty() {
                session.export_log(path)?;
            }
        }
        return Ok(());
    }

    if args.dry {
        let preview = session.preview();
        if args.plain {
            display_preview_simple(&preview, &mut stdout).map_err(display_error)?;
        } else {
            display_preview(&preview, &mut stdout).map_err(display_error)?;
            println!();
            println!("Run without --dry to apply these changes.");
        }
        return Ok(());
    }

    let records = session.apply()?;
    display_apply_result(&records, &mut stdout).map_err(display_error)?;

    if let Some(path) = &args.export_log {
        if !session.log().is_empty() {
            session.export_log(path)?;
        }
    }

    let failed = records.iter().filter(|r| !r.success).count();
    if failed > 0 {
        return Err(AppError::RenameFailures {
            failed,
            total: records.len(),
        });
    }

    Ok(())
}

fn display_error(e: io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", e))
}
