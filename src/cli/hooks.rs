//! Git pre-commit hook installation and removal.
//!
//! Our lines live in a managed block so an existing hook keeps working and
//! reinstalling (e.g. switching to blocking mode) replaces only our part.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::Error;

const BLOCK_START: &str = "# >>> texprogress writing tracker (auto-installed) >>>";
const BLOCK_END: &str = "# <<< texprogress writing tracker <<<";

const SHEBANG: &str = "#!/bin/sh";

/// Check if `repo_root` has a `.git` directory.
pub fn has_git(repo_root: &Path) -> bool {
    repo_root.join(".git").is_dir()
}

fn hook_path(repo_root: &Path) -> PathBuf {
    repo_root.join(".git").join("hooks").join("pre-commit")
}

/// Check if our block is present in the pre-commit hook.
pub fn hook_installed(repo_root: &Path) -> bool {
    fs::read_to_string(hook_path(repo_root))
        .map(|content| content.contains(BLOCK_START))
        .unwrap_or(false)
}

/// Generate the managed block.
///
/// Non-blocking mode reports a failed run and lets the commit through;
/// blocking mode aborts the commit.
fn managed_block(program: &Path, config: &Path, blocking: bool) -> String {
    let command = format!(
        "{} run --config {}",
        shell_quote(&program.to_string_lossy()),
        shell_quote(&config.to_string_lossy())
    );

    let body = if blocking {
        format!(
            "if ! {}; then\n    echo \"Commit blocked: texprogress run failed.\"\n    exit 1\nfi",
            command
        )
    } else {
        format!(
            "{} || echo \"texprogress: tracking failed, commit continues.\"",
            command
        )
    };

    format!("{}\n{}\n{}", BLOCK_START, body, BLOCK_END)
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Install or refresh the pre-commit hook.
///
/// Returns the hook path.
pub fn install_hook(
    repo_root: &Path,
    program: &Path,
    config: &Path,
    blocking: bool,
) -> Result<PathBuf, Error> {
    if !has_git(repo_root) {
        return Err(Error::other(format!(
            "Not a git repository: {}",
            repo_root.display()
        )));
    }

    let path = hook_path(repo_root);
    if let Some(hooks_dir) = path.parent() {
        fs::create_dir_all(hooks_dir)?;
    }

    let block = managed_block(program, config, blocking);
    let content = if path.exists() {
        let existing = fs::read_to_string(&path)?;
        match block_range(&existing) {
            Some((start, end)) => {
                format!("{}{}{}", &existing[..start], block, &existing[end..])
            }
            None => format!("{}\n\n{}\n", existing.trim_end(), block),
        }
    } else {
        format!("{}\n\n{}\n", SHEBANG, block)
    };

    fs::write(&path, content)?;

    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)?;

    info!(path = %path.display(), blocking, "Installed pre-commit hook");
    Ok(path)
}

/// Remove our block from the pre-commit hook.
///
/// The file is deleted when nothing but the shebang is left. Returns whether
/// anything was removed.
pub fn uninstall_hook(repo_root: &Path) -> Result<bool, Error> {
    let path = hook_path(repo_root);
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(&path)?;
    let Some((start, end)) = block_range(&content) else {
        return Ok(false);
    };

    let remaining = format!(
        "{}\n{}",
        content[..start].trim_end(),
        content[end..].trim_start()
    );
    let remaining = remaining.trim();

    if remaining.is_empty() || remaining == SHEBANG {
        fs::remove_file(&path)?;
    } else {
        fs::write(&path, format!("{}\n", remaining))?;
    }

    info!(path = %path.display(), "Removed pre-commit hook");
    Ok(true)
}

/// Run `hook install`.
pub fn install(config_path: Option<&Path>, blocking: bool) -> Result<(), Error> {
    let path = fs::canonicalize(Config::locate(config_path)?)?;
    let config = Config::load(&path)?;
    let program = std::env::current_exe()?;

    let refreshed = hook_installed(&config.repo_root);
    let hook = install_hook(&config.repo_root, &program, &path, blocking)?;
    if refreshed {
        println!("Pre-commit hook refreshed at {}", hook.display());
    } else {
        println!("Pre-commit hook installed at {}", hook.display());
    }
    Ok(())
}

/// Run `hook uninstall`.
pub fn uninstall(config_path: Option<&Path>) -> Result<(), Error> {
    let config = Config::load(&Config::locate(config_path)?)?;

    if uninstall_hook(&config.repo_root)? {
        println!("Pre-commit hook removed.");
    } else {
        println!("No texprogress pre-commit hook found.");
    }
    Ok(())
}

/// Byte range of the managed block, markers included.
fn block_range(content: &str) -> Option<(usize, usize)> {
    let start = content.find(BLOCK_START)?;
    let end = content[start..].find(BLOCK_END)? + start + BLOCK_END.len();
    Some((start, end))
}
