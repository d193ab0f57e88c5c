//! vcs::process
//!
//! Subprocess execution shared by the git and mercurial backends.
//!
//! Commands are built from explicit argument vectors (never a shell) and
//! run with the working copy as their working directory. Stdout is
//! captured and returned trimmed; a non-zero exit becomes
//! [`BackendError::CommandFailed`] with the captured stderr.

use std::path::Path;
use std::process::Command;

use super::BackendError;

/// Run a VCS command in the given working copy and capture its output.
pub(super) fn run(binary: &str, args: &[&str], dir: &Path) -> Result<String, BackendError> {
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| BackendError::Spawn {
            binary: binary.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(BackendError::CommandFailed {
            command: render_command(binary, args),
            dir: dir.to_path_buf(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Render a command line for error messages.
fn render_command(binary: &str, args: &[&str]) -> String {
    let mut rendered = String::from(binary);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn captures_trimmed_stdout() {
        let dir = TempDir::new().unwrap();
        // `git --version` works anywhere, repository or not.
        let out = run("git", &["--version"], dir.path()).unwrap();
        assert!(out.starts_with("git version"));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn nonzero_exit_reports_command_and_stderr() {
        let dir = TempDir::new().unwrap();
        let err = run("git", &["rev-parse", "HEAD"], dir.path()).unwrap_err();

        match err {
            BackendError::CommandFailed {
                command,
                dir: failed_in,
                code,
                stderr,
            } => {
                assert_eq!(command, "git rev-parse HEAD");
                assert_eq!(failed_in, dir.path());
                assert!(code.is_some());
                assert!(!stderr.is_empty());
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn missing_binary_reports_spawn_failure() {
        let dir = TempDir::new().unwrap();
        let err = run("definitely-not-a-vcs-binary", &["status"], dir.path()).unwrap_err();
        assert!(matches!(err, BackendError::Spawn { .. }));
    }

    #[test]
    fn renders_full_command_line() {
        assert_eq!(
            render_command("git", &["rev-list", "--count", "HEAD"]),
            "git rev-list --count HEAD"
        );
    }
}
