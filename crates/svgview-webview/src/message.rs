//! Messages sent back by the gallery and their dispatch to the host.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const OPEN_DOCUMENT: &str = "open-svg";
const REVEAL: &str = "go-to-svg";
const OPEN_EXTERNAL: &str = "open-web";

/// Action requested by the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebviewMessage {
    /// Open the file as a document in the main editing surface.
    OpenDocument { path: PathBuf },
    /// Locate the file in the host's file browser.
    Reveal { path: PathBuf },
    /// Hand a URL to the operating system's default handler.
    OpenExternal { url: String },
}

/// Wire shape: a command tag plus whichever argument it needs.
#[derive(Debug, Deserialize)]
struct RawMessage {
    command: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl WebviewMessage {
    /// Parse a JSON message.
    ///
    /// Returns `None` for malformed JSON, unknown commands, and commands
    /// missing their argument. Such messages are ignored.
    pub fn parse(json: &str) -> Option<Self> {
        let raw: RawMessage = serde_json::from_str(json).ok()?;
        let path = raw.path.filter(|p| !p.is_empty()).map(PathBuf::from);
        let url = raw.url.filter(|u| !u.is_empty());

        match raw.command.as_str() {
            OPEN_DOCUMENT => path.map(|path| Self::OpenDocument { path }),
            REVEAL => path.map(|path| Self::Reveal { path }),
            OPEN_EXTERNAL => url.map(|url| Self::OpenExternal { url }),
            _ => None,
        }
    }

    /// Command tag of this message on the wire.
    pub fn command(&self) -> &'static str {
        match self {
            Self::OpenDocument { .. } => OPEN_DOCUMENT,
            Self::Reveal { .. } => REVEAL,
            Self::OpenExternal { .. } => OPEN_EXTERNAL,
        }
    }
}

/// Failure of a host action, worded for the user.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The file could not be opened as a document.
    #[error("Unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be located in the file browser.
    #[error("Unable to locate {}: {source}", path.display())]
    Reveal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The URL could not be handed to the system.
    #[error("Unable to open URL {url}: {source}")]
    External {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capabilities the host provides to the gallery.
pub trait HostActions {
    /// Open `path` as a document in the main editing surface.
    fn open_document(&mut self, path: &Path) -> Result<(), ActionError>;

    /// Locate `path` in the host's file browser.
    fn reveal_in_file_browser(&mut self, path: &Path) -> Result<(), ActionError>;

    /// Hand `url` to the operating system's default handler.
    fn open_external(&mut self, url: &str) -> Result<(), ActionError>;
}

/// Route `message` to the matching host action.
pub fn dispatch<H>(host: &mut H, message: &WebviewMessage) -> Result<(), ActionError>
where
    H: HostActions + ?Sized,
{
    info!(command = message.command(), "dispatching gallery message");
    match message {
        WebviewMessage::OpenDocument { path } => host.open_document(path),
        WebviewMessage::Reveal { path } => host.reveal_in_file_browser(path),
        WebviewMessage::OpenExternal { url } => host.open_external(url),
    }
}

/// Outcome of handling one raw message.
#[derive(Debug)]
pub enum Dispatch {
    /// Not a recognized message; nothing happened.
    Ignored,
    /// The host action ran.
    Handled(WebviewMessage),
    /// The host action failed; show the error to the user.
    Failed(ActionError),
}

/// Parse and dispatch a raw JSON message.
pub fn handle_raw<H>(host: &mut H, json: &str) -> Dispatch
where
    H: HostActions + ?Sized,
{
    let Some(message) = WebviewMessage::parse(json) else {
        debug!(message = json, "ignoring unrecognized gallery message");
        return Dispatch::Ignored;
    };

    match dispatch(host, &message) {
        Ok(()) => Dispatch::Handled(message),
        Err(err) => Dispatch::Failed(err),
    }
}
