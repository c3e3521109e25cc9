//! Word count via texcount.

use std::ffi::OsStr;
use std::path::Path;

use super::{last_field_of_line, CommandRunner};
use crate::error::Error;

/// Count words in the root document, following `\input`/`\include`.
pub fn count_words(
    runner: &dyn CommandRunner,
    texcount: &str,
    source_root: &Path,
    source_filename: &str,
) -> Result<u64, Error> {
    let args = [
        OsStr::new(source_filename),
        OsStr::new("-inc"),
        OsStr::new("-total"),
        OsStr::new("-sum"),
    ];
    let output = runner.run(texcount, &args, Some(source_root))?;
    parse_sum_count(texcount, &output)
}

/// Extract the total from the `Sum count:` line of a texcount report.
pub fn parse_sum_count(tool: &str, output: &str) -> Result<u64, Error> {
    last_field_of_line(tool, output, "Sum count:")
}
