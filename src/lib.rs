// pattern-runner/src/lib.rs

// declare modules
pub mod breakpoint;
pub mod catalog;
pub mod document;
pub mod extract;
pub mod logging;
pub mod runner;
pub mod session;

// re-export key items for the binary and the integration tests
pub use anyhow::{Context, Result};
pub use clap::Parser;
pub use console::style;
pub use dotenv::dotenv;

pub use crate::breakpoint::{Breakpoint, Command, Prompt, Resume, TerminalPrompt};
pub use crate::catalog::{resolve, PATTERN_DOCS};
pub use crate::logging::init_logging;
pub use crate::runner::{execute_fragments, run_pattern, RunOptions, RunSummary};
pub use crate::session::{Binding, Session};

use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pattern-runner")]
#[command(author = "jamiehdev")]
#[command(version)]
#[command(about = "run the rhai examples embedded in a pattern note, then break into a repl", long_about = None)]
pub struct CliArgs {
    /// position of the pattern in the catalog (1-based, see --list)
    #[arg(allow_negative_numbers = true, required_unless_present = "list")]
    pub selector: Option<i64>,

    /// directory holding the pattern notes
    #[arg(short, long, env = "PATTERN_RUNNER_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// list the catalog and exit
    #[arg(short, long)]
    pub list: bool,

    /// finish after the fragments instead of stopping at the breakpoint
    #[arg(long)]
    pub no_break: bool,

    /// show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    fn run_options(&self, selector: i64) -> RunOptions {
        RunOptions {
            selector,
            notes_dir: self.dir.clone(),
            suspend: !self.no_break,
        }
    }
}

/// write the numbered catalog to `out`
pub fn print_catalog<W: Write>(mut out: W) -> Result<()> {
    writeln!(out, "{}\n", style("pattern catalog:").cyan().bold())?;
    for (index, label) in PATTERN_DOCS.iter().enumerate() {
        writeln!(out, "{} {}", style(format!("{:>3}.", index + 1)).dim(), label)?;
    }
    Ok(())
}

/// drive one run from parsed arguments against the real terminal
pub fn run_cli(args: CliArgs) -> Result<()> {
    if args.list {
        return print_catalog(io::stdout());
    }

    let selector = args
        .selector
        .context("a pattern selector is required")?;

    let mut breakpoint = Breakpoint::new(TerminalPrompt::new(), io::stdout());
    let summary = run_pattern(&args.run_options(selector), &mut breakpoint)
        .with_context(|| format!("pattern {selector} failed"))?;

    tracing::debug!(
        label = summary.label,
        fragments = summary.fragments,
        "run finished"
    );

    Ok(())
}
