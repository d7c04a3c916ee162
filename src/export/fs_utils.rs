use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm_with, info};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Output paths must be absolute.
pub(crate) fn ensure_absolute(path: &Path) -> AppResult<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "Output file path must be absolute: {}",
            path.display()
        )))
    }
}

/// Check that `path` may be created or overwritten.
///
/// An existing file is only replaced with `force` or after the user agrees.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    let stdin = io::stdin();
    ensure_writable_with(path, force, &mut stdin.lock(), &mut io::stdout())
}

pub(crate) fn ensure_writable_with<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    input: &mut R,
    out: &mut W,
) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    let prompt = format!("The file '{}' already exists. Overwrite?", path.display());
    if confirm_with(&prompt, input, out) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "overwrite of '{}' declined",
            path.display()
        )))
    }
}
