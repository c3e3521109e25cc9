//! Page count via pdfinfo.

use std::path::Path;

use super::{last_field_of_line, CommandRunner};
use crate::error::Error;

/// Count pages of the compiled document.
pub fn count_pages(runner: &dyn CommandRunner, pdfinfo: &str, pdf: &Path) -> Result<u64, Error> {
    let output = runner.run(pdfinfo, &[pdf.as_os_str()], None)?;
    parse_pages(pdfinfo, &output)
}

pub fn parse_pages(tool: &str, output: &str) -> Result<u64, Error> {
    last_field_of_line(tool, output, "Pages:")
}
