// runner module - resolve, load, extract, execute, then suspend

use crate::breakpoint::{Breakpoint, Prompt, Resume};
use crate::catalog;
use crate::document;
use crate::extract::{extract_fragments, fragment_source};
use crate::session::Session;
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// everything a single run needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 1-based position in the catalog
    pub selector: i64,
    /// directory holding the pattern notes
    pub notes_dir: PathBuf,
    /// enter the breakpoint once the fragments have run
    pub suspend: bool,
}

/// what a completed run leaves behind
pub struct RunSummary {
    pub label: &'static str,
    pub fragments: usize,
    pub session: Session,
}

/// run every fragment of the selected note, then hand over to `breakpoint`
pub fn run_pattern<P: Prompt, W: Write>(
    options: &RunOptions,
    breakpoint: &mut Breakpoint<P, W>,
) -> Result<RunSummary> {
    let label = catalog::resolve(options.selector)?;
    debug!(selector = options.selector, label, "resolved pattern");

    let path = catalog::document_path(&options.notes_dir, label);
    let text = document::load_document(&path)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded pattern document");

    let mut session = Session::new();
    let fragments = execute_fragments(&mut session, &text)?;

    if options.suspend {
        match breakpoint.suspend(&mut session)? {
            Resume::Continue => debug!("continued from breakpoint"),
            Resume::Quit => bail!("run interrupted at the breakpoint"),
        }
    }

    Ok(RunSummary {
        label,
        fragments,
        session,
    })
}

/// execute the note's fragments in order against `session`, returning how many ran
pub fn execute_fragments(session: &mut Session, text: &str) -> Result<usize> {
    let fragments = extract_fragments(text);
    let total = fragments.len();

    if total == 0 {
        warn!("no rhai fragments found in pattern document");
        return Ok(0);
    }
    debug!(count = total, "extracted fragments");

    for (index, fragment) in fragments.into_iter().enumerate() {
        debug!(fragment = index + 1, bytes = fragment.len(), "executing fragment");
        let value = session
            .execute(fragment_source(fragment))
            .with_context(|| format!("fragment {} of {} failed", index + 1, total))?;
        debug!(fragment = index + 1, result = %value.type_name(), "fragment finished");
    }

    Ok(total)
}
