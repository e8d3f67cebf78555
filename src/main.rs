//! nagconf CLI
//!
//! Usage:
//!   nagconf [OPTIONS]
//!
//! Options:
//!   -c, --cfgdir <DIR>       Directory containing Nagios .cfg files
//!   -o, --output <FILE>      Write resolved definitions here instead of stdout
//!       --full               Emit inherited values too, not just declared ones
//!       --config <FILE>      Run configuration (TOML format)
//!   -d, --debug <LEVEL>      CRITICAL (3), ERROR (2), WARNING (1), INFO (0), DEBUG (-1)
//!   -p, --printtostdout      Print log messages to stdout
//!   -l, --logfile <FILE>     Write log messages to this file
//!       --stats              Print object counts to stderr
//!       --history            Emit the provenance report instead of definitions
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use nagconf::config::parse_level;
use nagconf::logging::init_logging;
use nagconf::{
    load_sources, process, render_history, render_objects, EmitMode, RunConfig, RunError,
};

#[derive(Parser)]
#[command(name = "nagconf")]
#[command(version, about = "Resolve Nagios object templates and write the result")]
struct Cli {
    /// Directory containing Nagios .cfg files
    #[arg(short, long, value_name = "DIR")]
    cfgdir: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit every property with a value, inherited ones included
    #[arg(long)]
    full: bool,

    /// Run configuration file (TOML format)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level: CRITICAL (3), ERROR (2), WARNING (1), INFO (0), DEBUG (-1)
    #[arg(short, long, value_name = "LEVEL", allow_hyphen_values = true)]
    debug: Option<String>,

    /// Print all log messages to stdout
    #[arg(short, long)]
    printtostdout: bool,

    /// Log file
    #[arg(short, long, value_name = "FILE")]
    logfile: Option<PathBuf>,

    /// Print object counts to stderr
    #[arg(long)]
    stats: bool,

    /// Emit the per-property provenance report instead of definitions
    #[arg(long)]
    history: bool,
}

impl Cli {
    /// Load the config file, if any, and apply command line overrides
    fn run_config(&self) -> Result<RunConfig, RunError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(dir) = &self.cfgdir {
            config.input.cfg_dir = dir.clone();
        }
        if let Some(file) = &self.output {
            config.output.file = Some(file.clone());
        }
        if self.full {
            config.output.mode = EmitMode::Full;
        }
        if let Some(level) = &self.debug {
            parse_level(level)?;
            config.logging.level = level.clone();
        }
        if self.printtostdout {
            config.logging.stdout = true;
        }
        if let Some(file) = &self.logfile {
            config.logging.file = Some(file.clone());
        }

        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let config = cli.run_config()?;
    init_logging(&config.logging)?;

    let sources = load_sources(&config.input.cfg_dir, &config.input.extension)?;
    if sources.is_empty() {
        tracing::warn!(dir = %config.input.cfg_dir.display(), "no config files found");
    }
    let store = process(&sources)?;

    if cli.stats {
        eprintln!("{}", store.stats());
    }

    let output = if cli.history {
        render_history(store.objects())
    } else {
        render_objects(store.objects(), &config.output.emit_config())
    };

    match &config.output.file {
        Some(path) => fs::write(path, output).map_err(|source| RunError::Io {
            path: path.clone(),
            source,
        })?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .map_err(|source| RunError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?,
    }

    if !store.diagnostics().is_empty() {
        tracing::warn!(count = store.diagnostics().len(), "finished with inheritance diagnostics");
    }
    Ok(())
}
