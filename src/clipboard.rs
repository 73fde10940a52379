use std::process::Command;

use tracing::debug;

use crate::error::{NclipError, Result};

/// Read access to the host clipboard.
pub trait ClipboardSource {
    /// Current clipboard text, or `None` when the clipboard is empty.
    fn read(&mut self) -> Result<Option<Vec<u8>>>;
}

type PasteTool = (&'static str, &'static [&'static str]);

const MACOS_TOOLS: &[PasteTool] = &[("pbpaste", &[])];
const WINDOWS_TOOLS: &[PasteTool] = &[("powershell", &["-NoProfile", "-Command", "Get-Clipboard"])];
const UNIX_TOOLS: &[PasteTool] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

/// Reads the clipboard through the platform's paste tool; the first tool
/// that runs and prints something wins.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    tools: &'static [PasteTool],
}

impl Default for SystemClipboard {
    fn default() -> Self {
        let tools = if cfg!(target_os = "macos") {
            MACOS_TOOLS
        } else if cfg!(target_os = "windows") {
            WINDOWS_TOOLS
        } else {
            UNIX_TOOLS
        };
        Self { tools }
    }
}

impl ClipboardSource for SystemClipboard {
    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        let mut spawned_any = false;

        for (program, args) in self.tools {
            let output = match Command::new(program).args(*args).output() {
                Ok(output) => output,
                Err(err) => {
                    debug!(program = %program, error = %err, "paste tool unavailable");
                    continue;
                }
            };
            spawned_any = true;

            if output.status.success() && !output.stdout.is_empty() {
                return Ok(Some(output.stdout));
            }
            debug!(program = %program, status = %output.status, "paste tool returned nothing");
        }

        if spawned_any {
            Ok(None)
        } else {
            let names: Vec<_> = self.tools.iter().map(|(program, _)| *program).collect();
            Err(NclipError::Clipboard(format!(
                "no paste tool found (tried {})",
                names.join(", ")
            )))
        }
    }
}
