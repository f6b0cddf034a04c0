use std::io;
use std::process::Command;
use std::thread;

use engine_logging::{engine_debug, engine_info};

pub const MAIL_SUBJECT: &str = "Sharing a shortened link";

/// `mailto:` URI with an encoded subject and a body carrying `short_url`.
pub fn mailto_uri(short_url: &str) -> String {
    let body = format!("I'd like to share this link with you:\n{short_url}");
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(MAIL_SUBJECT),
        urlencoding::encode(&body)
    )
}

#[derive(Debug, thiserror::Error)]
pub enum HostActionError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// OS capabilities used once a short URL exists. All of them are best effort.
pub trait HostActions {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), HostActionError>;
    fn compose_mail(&mut self, short_url: &str) -> Result<(), HostActionError>;
    /// Does nothing for empty or malformed URIs.
    fn open_in_browser(&mut self, url: &str) -> Result<(), HostActionError>;
    fn system_share(&mut self, items: &[String]) -> Result<(), HostActionError>;
}

/// Desktop implementation backed by `arboard` and the platform opener.
#[derive(Default)]
pub struct SystemHostActions {
    // Kept for the process lifetime: on X11/Wayland the selection is lost
    // once the owning clipboard handle drops.
    clipboard: Option<arboard::Clipboard>,
}

impl SystemHostActions {
    pub fn new() -> Self {
        Self::default()
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, HostActionError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.clipboard.insert(clipboard))
    }
}

impl HostActions for SystemHostActions {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), HostActionError> {
        self.clipboard()?.set_text(text)?;
        engine_info!("Copied to clipboard: {}", text);
        Ok(())
    }

    fn compose_mail(&mut self, short_url: &str) -> Result<(), HostActionError> {
        open_with_system(&mailto_uri(short_url))
    }

    fn open_in_browser(&mut self, url: &str) -> Result<(), HostActionError> {
        if url.trim().is_empty() || url::Url::parse(url).is_err() {
            engine_debug!("Not opening malformed URI {:?}", url);
            return Ok(());
        }
        open_with_system(url)
    }

    fn system_share(&mut self, items: &[String]) -> Result<(), HostActionError> {
        // No portable share sheet; hand the items over through the clipboard.
        let text = items.join("\n");
        self.clipboard()?.set_text(text.as_str())?;
        engine_info!("Shared {} item(s) via clipboard", items.len());
        Ok(())
    }
}

fn open_with_system(target: &str) -> Result<(), HostActionError> {
    let mut child = opener_command(target)
        .spawn()
        .map_err(|source| HostActionError::Open {
            target: target.to_string(),
            source,
        })?;
    // The opener exits once it has handed off; reap it so it does not linger.
    thread::spawn(move || {
        if let Err(err) = child.wait() {
            engine_debug!("Waiting for opener failed: {}", err);
        }
    });
    Ok(())
}

// The target is always passed as a single argument and never through a shell.
#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.args(["url.dll,FileProtocolHandler", target]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
