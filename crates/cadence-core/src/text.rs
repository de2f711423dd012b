//! Line-oriented file rewriting.

use std::fs;
use std::path::Path;

use crate::CoreResult;

/// Reads a file as lines, without terminators.
pub(crate) fn read_lines(path: &Path) -> CoreResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(String::from).collect())
}

/// Writes lines back, each terminated by `\n`.
pub(crate) fn write_lines(path: &Path, lines: &[String]) -> CoreResult<()> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
