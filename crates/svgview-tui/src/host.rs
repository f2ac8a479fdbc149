//! Host actions backed by the local system.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use svgview_webview::{ActionError, HostActions};

/// Carries out gallery actions with the user's editor and the system opener.
///
/// Documents open in the configured editor, then `$VISUAL`, then `$EDITOR`.
/// Without any of those the system opener is used. Revealing opens the
/// parent folder.
#[derive(Debug, Default)]
pub struct SystemHost {
    editor: Option<String>,
    deferred: bool,
    pending: Option<Command>,
}

impl SystemHost {
    /// Host that runs editor commands immediately and waits for them.
    pub fn new(editor: Option<String>) -> Self {
        Self {
            editor,
            deferred: false,
            pending: None,
        }
    }

    /// Host that queues editor commands for the caller, which must release
    /// the terminal before running them.
    pub fn deferred(editor: Option<String>) -> Self {
        Self {
            deferred: true,
            ..Self::new(editor)
        }
    }

    /// Take the queued editor command, if any.
    pub fn take_pending(&mut self) -> Option<Command> {
        self.pending.take()
    }

    fn editor_command(&self) -> Option<Command> {
        let editor = self
            .editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())?;

        // Allow "code --wait" style values.
        let mut parts = editor.split_whitespace();
        let mut cmd = Command::new(parts.next()?);
        cmd.args(parts);
        Some(cmd)
    }
}

impl HostActions for SystemHost {
    fn open_document(&mut self, path: &Path) -> Result<(), ActionError> {
        let fail = |source| ActionError::Open {
            path: path.to_path_buf(),
            source,
        };
        std::fs::metadata(path).map_err(fail)?;

        let Some(mut cmd) = self.editor_command() else {
            debug!(path = %path.display(), "opening with system handler");
            return open::that(path).map_err(fail);
        };

        cmd.arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if self.deferred {
            self.pending = Some(cmd);
            return Ok(());
        }

        let status = cmd.status().map_err(fail)?;
        if status.success() {
            Ok(())
        } else {
            Err(fail(io::Error::other(format!("editor exited with {status}"))))
        }
    }

    fn reveal_in_file_browser(&mut self, path: &Path) -> Result<(), ActionError> {
        let fail = |source| ActionError::Reveal {
            path: path.to_path_buf(),
            source,
        };
        let metadata = std::fs::metadata(path).map_err(fail)?;

        let folder = if metadata.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };
        debug!(folder = %folder.display(), "revealing");
        open::that(folder).map_err(fail)
    }

    fn open_external(&mut self, url: &str) -> Result<(), ActionError> {
        open::that(url).map_err(|source| ActionError::External {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_document_fails_before_launching() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.svg");
        let mut host = SystemHost::deferred(Some("true".to_string()));

        let err = host.open_document(&missing).unwrap_err();
        assert!(matches!(err, ActionError::Open { .. }));
        assert!(err.to_string().contains("gone.svg"));
        assert!(host.take_pending().is_none());

        let err = host.reveal_in_file_browser(&missing).unwrap_err();
        assert!(err.to_string().starts_with("Unable to locate"));
    }

    #[test]
    fn test_deferred_host_queues_editor() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.svg");
        std::fs::write(&file, "<svg/>").unwrap();

        let mut host = SystemHost::deferred(Some("hx --vsplit".to_string()));
        host.open_document(&file).unwrap();

        let cmd = host.take_pending().unwrap();
        assert_eq!(cmd.get_program(), "hx");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new("--vsplit"), file.as_os_str()]);
        assert!(host.take_pending().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_immediate_host_reports_editor_failure() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.svg");
        std::fs::write(&file, "<svg/>").unwrap();

        let mut host = SystemHost::new(Some("true".to_string()));
        host.open_document(&file).unwrap();

        let mut host = SystemHost::new(Some("false".to_string()));
        let err = host.open_document(&file).unwrap_err();
        assert!(err.to_string().contains("editor exited"));
    }
}
