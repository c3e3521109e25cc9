//! Change count via `git diff --shortstat`.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::CommandRunner;
use crate::error::Error;

static FILES_CHANGED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) files? changed").unwrap());
static INSERTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) insertions?\(\+\)").unwrap());
static DELETIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) deletions?\(-\)").unwrap());

/// Files changed plus inserted and deleted lines between HEAD and the
/// working tree of `repo_root`.
pub fn count_diffs(runner: &dyn CommandRunner, git: &str, repo_root: &Path) -> Result<u64, Error> {
    let args = [
        OsStr::new("diff"),
        OsStr::new("HEAD"),
        OsStr::new("--shortstat"),
        OsStr::new("--"),
        OsStr::new("."),
    ];
    let output = runner.run(git, &args, Some(repo_root))?;
    Ok(parse_shortstat(&output))
}

/// Sum the numeric clauses of a shortstat line. Absent clauses count as zero,
/// so an empty diff yields 0.
pub fn parse_shortstat(output: &str) -> u64 {
    let Some(line) = output.lines().find(|line| !line.trim().is_empty()) else {
        return 0;
    };

    [&*FILES_CHANGED, &*INSERTIONS, &*DELETIONS]
        .iter()
        .filter_map(|re| re.captures(line))
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::testing::FakeRunner;

    #[test]
    fn test_full_shortstat() {
        let line = " 3 files changed, 10 insertions(+), 2 deletions(-)\n";
        assert_eq!(parse_shortstat(line), 15);
    }

    #[test]
    fn test_missing_clauses_count_zero() {
        assert_eq!(parse_shortstat(" 1 file changed\n"), 1);
        assert_eq!(parse_shortstat(" 1 file changed, 4 insertions(+)\n"), 5);
        assert_eq!(parse_shortstat(" 2 files changed, 1 deletion(-)\n"), 3);
    }

    #[test]
    fn test_no_changes() {
        assert_eq!(parse_shortstat(""), 0);
        assert_eq!(parse_shortstat("\n"), 0);
    }

    #[test]
    fn test_count_diffs_uses_runner() {
        let runner =
            FakeRunner::default().with("git", " 1 file changed, 1 insertion(+), 1 deletion(-)\n");
        assert_eq!(count_diffs(&runner, "git", Path::new(".")).unwrap(), 3);
    }
}
