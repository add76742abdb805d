/*!
 * Clipboard support for treeclip
 *
 * Writes text to the host clipboard by piping it into whichever clipboard
 * tool the platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The command is not available on the system
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Anything that can receive the assembled text
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write(&self, text: &str) -> Result<()>;
}

/// Host clipboard tools, in no particular order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    /// tmux paste buffer
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (native or via WSL)
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    /// Program and arguments that read the new clipboard contents from stdin
    fn command(&self) -> (&'static str, Vec<&'static str>) {
        match self {
            Self::Tmux => ("tmux", vec!["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", vec!["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", vec!["-b", "-i"]),
            Self::Wayland => ("wl-copy", vec![]),
            Self::MacOS => ("pbcopy", vec![]),
            Self::Windows => ("clip.exe", vec![]),
            Self::Termux => ("termux-clipboard-set", vec![]),
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn write(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        execute_clipboard_command(cmd, &args, text)
    }
}

/// The system clipboard, resolved once at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    provider: ClipboardProvider,
}

impl SystemClipboard {
    /// Pick the first clipboard tool available on this host
    pub fn detect() -> Result<Self> {
        let provider = determine_clipboard_providers()
            .into_iter()
            .next()
            .ok_or(ClipboardError::NoClipboardFound)?;
        debug!("Using clipboard provider {:?}", provider);
        Ok(Self { provider })
    }

    /// The tool this clipboard writes through
    pub fn provider(&self) -> ClipboardProvider {
        self.provider
    }
}

impl Clipboard for SystemClipboard {
    fn write(&self, text: &str) -> Result<()> {
        self.provider.write(text)
    }
}

/// Check if a command exists on the system
pub fn command_exists(command: &str) -> bool {
    if let Some(paths) = env::var_os("PATH") {
        if env::split_paths(&paths).any(|dir| Path::new(&dir).join(command).is_file()) {
            return true;
        }
    }

    Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Spawn `cmd`, feed `text` through its stdin and wait for it to exit
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClipboardError::CommandNotFound(cmd.to_string()),
            _ => ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)),
        })?;

    // Dropping stdin at the end of the match closes it so the tool sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()).map_err(ClipboardError::from),
        None => Err(ClipboardError::CommandFailed(format!(
            "Failed to open stdin for {}",
            cmd
        ))),
    };

    // Reap the child before reporting a write failure.
    let status = child.wait()?;
    written?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn get_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "android") {
            "android"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else {
            "unknown"
        }
    })
}

/// Clipboard tools to try, most preferred first
fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(3);

    match get_platform() {
        "macos" => {
            if command_exists("pbcopy") {
                providers.push(ClipboardProvider::MacOS);
            }
        }
        "windows" | "wsl" => {
            if command_exists("clip.exe") {
                providers.push(ClipboardProvider::Windows);
            }
        }
        "linux" => {
            if env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
                providers.push(ClipboardProvider::Wayland);
            }
            if command_exists("xsel") {
                providers.push(ClipboardProvider::Xsel);
            }
            if command_exists("xclip") {
                providers.push(ClipboardProvider::Xclip);
            }
        }
        "android" => {
            if command_exists("termux-clipboard-set") {
                providers.push(ClipboardProvider::Termux);
            }
        }
        _ => {}
    }

    // tmux buffer is not the desktop clipboard; keep it last.
    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }

    providers
}
