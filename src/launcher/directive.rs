//! Directive building for Neovim invocations.
//!
//! A directive is the editor command string embedded in the invocation
//! arguments: a jump-to-position file open, a quoted buffer list, or a typed
//! ex-command such as `:Ex`/`:wa`. The string forms are fixed; the remote side
//! parses them, so they must not drift.

use super::error::LaunchError;
use super::request::LaunchRequest;

/// How a directive reaches a running instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeMode {
    /// `--remote`: open the listed files as buffers.
    Remote,
    /// `--remote-send`: feed an ex-command as typed input.
    RemoteSend,
}

impl InvokeMode {
    pub(crate) fn flag(self) -> &'static str {
        match self {
            InvokeMode::Remote => "--remote",
            InvokeMode::RemoteSend => "--remote-send",
        }
    }
}

/// An editor command string plus the invocation mode it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub mode: InvokeMode,
    pub args: String,
}

impl Directive {
    /// Build the directive for a request.
    ///
    /// Grammar:
    /// - `+<line>:<column> "<path>"` for a file with both positions
    /// - `+<line> "<path>"` when the column is unset
    /// - `"<path>"` per file otherwise, space-separated for multiple files
    /// - `":Ex <dir><CR>"` for a directory browse
    /// - `":wa<CR>"` for save-all
    ///
    /// Paths are always quoted so paths with spaces survive argument
    /// splitting. Zero line/column values count as unset.
    pub fn build(request: &LaunchRequest) -> Result<Self, LaunchError> {
        match request {
            LaunchRequest::OpenFile { path, line, column } => {
                if path.as_os_str().is_empty() {
                    return Err(LaunchError::EmptyRequest);
                }
                let path = path.display();
                let args = match (nonzero(*line), nonzero(*column)) {
                    (Some(line), Some(column)) => format!("+{line}:{column} \"{path}\""),
                    (Some(line), None) => format!("+{line} \"{path}\""),
                    (None, _) => format!("\"{path}\""),
                };
                Ok(Directive {
                    mode: InvokeMode::Remote,
                    args,
                })
            }
            LaunchRequest::OpenFiles { paths } => {
                if paths.is_empty() || paths.iter().any(|p| p.as_os_str().is_empty()) {
                    return Err(LaunchError::EmptyRequest);
                }
                let args = paths
                    .iter()
                    .map(|p| format!("\"{}\"", p.display()))
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(Directive {
                    mode: InvokeMode::Remote,
                    args,
                })
            }
            LaunchRequest::OpenDirectory { path } => {
                if path.as_os_str().is_empty() {
                    return Err(LaunchError::EmptyRequest);
                }
                Ok(Directive {
                    mode: InvokeMode::RemoteSend,
                    args: format!("\":Ex {}<CR>\"", path.display()),
                })
            }
            LaunchRequest::SaveAll => Ok(Directive {
                mode: InvokeMode::RemoteSend,
                args: "\":wa<CR>\"".to_string(),
            }),
        }
    }

    /// Argument vector for remote-control mode.
    pub(crate) fn remote_argv(&self, server: &str) -> Vec<String> {
        let mut argv = vec![
            "--server".to_string(),
            server.to_string(),
            self.mode.flag().to_string(),
        ];
        argv.extend(split_quoted(&self.args));
        argv
    }

    /// Argument vector for a fresh instance carrying the same directive.
    ///
    /// File opens pass through unchanged. An ex-command directive becomes a
    /// `+{cmd}` startup command: `":Ex /p<CR>"` turns into `+Ex /p`.
    pub(crate) fn standalone_argv(&self) -> Vec<String> {
        match self.mode {
            InvokeMode::Remote => split_quoted(&self.args),
            InvokeMode::RemoteSend => {
                let inner = self.args.trim_matches('"');
                let inner = inner.strip_suffix("<CR>").unwrap_or(inner);
                let inner = inner.strip_prefix(':').unwrap_or(inner);
                vec![format!("+{inner}")]
            }
        }
    }
}

fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|&n| n > 0)
}

/// Split a directive string into argument elements, honoring double quotes so
/// a quoted path with spaces stays one element. Quotes themselves are
/// stripped; `std::process::Command` passes arguments without a shell.
fn split_quoted(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
