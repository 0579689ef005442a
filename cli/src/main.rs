mod report;
mod tui;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simlab_core::{calculate_hours, EventType, Phase};

#[derive(Parser)]
#[command(name = "simlab")]
#[command(about = "Simulation lab hours tracker", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the Terminal User Interface (default)
    Tui {
        /// Print the session summary after leaving the interface
        #[arg(long)]
        report_on_exit: bool,
    },
    /// Hours credited for a phase (usage: hours PLANNING NEW, hours RUN --duration 1.5)
    Hours {
        /// PLANNING, SETUP, RUN, RESET or TEARDOWN
        phase: String,
        /// NEW/EXISTING for PLANNING, FIRST/PROCEEDING for SETUP
        event_type: Option<String>,
        /// Duration in hours, used by RUN only
        #[arg(short, long, default_value = "")]
        duration: String,
    },
    /// Show the fixed hours table
    Rates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_ref(), interactive)?;

    match cli.command {
        Some(Commands::Hours { phase, event_type, duration }) => {
            let phase: Phase = phase.parse()?;
            let event_type = event_type
                .map(|t| t.parse::<EventType>())
                .transpose()?;
            let hours = calculate_hours(phase, event_type, &duration);
            log::debug!("{} {:?} '{}' -> {}", phase, event_type, duration, hours);
            println!("{}", hours);
        },
        Some(Commands::Rates) => {
            println!("{}", report::render_rates());
        },
        Some(Commands::Tui { report_on_exit }) => {
            run_session(report_on_exit)?;
        },
        None => {
            run_session(false)?;
        }
    }
    Ok(())
}

fn run_session(report_on_exit: bool) -> Result<()> {
    let summary = tui::run()?;
    if report_on_exit {
        println!("{}", report::render_summary(&summary));
    }
    Ok(())
}

/// Map the verbosity flags to a level. While the TUI owns the terminal,
/// stderr is capped at `Warn` so log lines don't land on the screen.
fn log_level(verbose: u8, quiet: bool, tui_on_stderr: bool) -> LevelFilter {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    if tui_on_stderr {
        level.min(LevelFilter::Warn)
    } else {
        level
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` still applies on top.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    use env_logger::{Builder, Target};
    use std::io::Write;

    let tui_on_stderr = interactive && log_file.is_none();
    let level = log_level(verbose, quiet, tui_on_stderr);
    if tui_on_stderr && log_level(verbose, quiet, false) > level {
        eprintln!("warning: -v is ignored in the TUI unless --log-file is given");
    }

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Could not create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(log_level(0, false, false), LevelFilter::Warn);
        assert_eq!(log_level(1, false, false), LevelFilter::Info);
        assert_eq!(log_level(2, false, false), LevelFilter::Debug);
        assert_eq!(log_level(5, false, false), LevelFilter::Trace);
        assert_eq!(log_level(3, true, false), LevelFilter::Error);
    }

    #[test]
    fn test_tui_without_log_file_caps_at_warn() {
        assert_eq!(log_level(2, false, true), LevelFilter::Warn);
        assert_eq!(log_level(0, false, true), LevelFilter::Warn);
        assert_eq!(log_level(0, true, true), LevelFilter::Error);
    }
}
