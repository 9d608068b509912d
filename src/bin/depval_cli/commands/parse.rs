use std::path::Path;
use anyhow::Result;
use depval::candidates_from_log;
use crate::context::Context;

/// Execute the parse command
pub fn execute(context: &mut Context, log: &Path) -> Result<()> {
    let candidates = candidates_from_log(log)?;

    if context.verbosity() > 0 {
        eprintln!("{}", context.formatter().format_info(
            &format!("{} candidates in {}", candidates.len(), log.display())));
    }

    let formatted = context.formatter().format_candidates(&candidates)?;
    println!("{}", formatted);

    Ok(())
}
