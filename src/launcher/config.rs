use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Name shown by hosts that list available accessors.
pub const DISPLAY_NAME: &str = "Neovim";
/// One-line description for the same listings.
pub const DESCRIPTION: &str = "Open source code files in Neovim";

pub(crate) const DEFAULT_PROGRAM: &str = "nvim";

/// Set by Neovim inside `:terminal` and by UIs attached over RPC.
const SERVER_ENV: &str = "NVIM";
/// Deprecated since Neovim 0.8 but still exported by older setups.
const LEGACY_SERVER_ENV: &str = "NVIM_LISTEN_ADDRESS";

/// Launcher configuration.
///
/// The server address is an explicit input rather than an ambient lookup;
/// `from_env` is the one place that touches the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Editor binary, either a bare name resolved via `$PATH` or a full path.
    pub program: String,
    /// Remote address of a running instance, if one is known.
    pub server: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            program: DEFAULT_PROGRAM.to_string(),
            server: None,
        }
    }
}

impl LauncherConfig {
    pub fn new(program: impl Into<String>, server: Option<String>) -> Self {
        LauncherConfig {
            program: program.into(),
            server,
        }
    }

    /// Configuration wired to the instance the environment advertises.
    /// An absent or empty address means no running instance is known.
    pub fn from_env() -> Self {
        let server = discover_server(|name| env::var(name).ok());
        if let Some(address) = &server {
            debug!(%address, "discovered running Neovim instance");
        }
        LauncherConfig {
            program: DEFAULT_PROGRAM.to_string(),
            server,
        }
    }

    /// Whether the configured binary resolves to an existing file.
    pub fn is_available(&self) -> bool {
        resolve_program(&self.program).is_some()
    }
}

fn discover_server(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    [SERVER_ENV, LEGACY_SERVER_ENV]
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
}

/// Resolve a program name the way the spawn primitive will: a path with
/// directory components is taken as-is, a bare name is searched on `$PATH`.
fn resolve_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
