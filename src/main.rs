use std::{path::PathBuf, sync::OnceLock};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nvim_open::{LaunchRequest, Launcher, LauncherConfig};

static LONG_VERSION: OnceLock<String> = OnceLock::new();

fn long_version() -> &'static str {
    LONG_VERSION
        .get_or_init(|| {
            // This closure is executed only once, on the first call to get_or_init
            let dirty = if env!("GIT_DIRTY") == "true" {
                "[dirty]"
            } else {
                ""
            };
            format!(
                "{} (sha:{:?}, build_time:{:?}){}",
                env!("CARGO_PKG_VERSION"),
                env!("GIT_COMMIT_SHA"),
                env!("BUILT_TIME_UTC"),
                dirty
            )
        })
        .as_str()
}

#[derive(Parser)]
#[command(version, long_version=long_version(), about, long_about = None)]
struct Cli {
    /// Files to open; with a single file, --line/--column apply
    files: Vec<PathBuf>,

    /// Jump to this line (single file only)
    #[arg(long)]
    line: Option<u32>,

    /// Jump to this column (requires --line)
    #[arg(long, requires = "line")]
    column: Option<u32>,

    /// Browse a directory instead of opening files
    #[arg(long, conflicts_with_all = ["line", "column"])]
    dir: Option<PathBuf>,

    /// Write all buffers of the running instance
    #[arg(long, conflicts_with_all = ["line", "column", "dir"])]
    save_all: bool,

    /// Remote address of a running instance (default: $NVIM)
    #[arg(long)]
    server: Option<String>,

    /// Editor binary to invoke
    #[arg(long, default_value = "nvim")]
    nvim: String,

    /// Path to the log file. If not specified, logs to stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_request(cli: &Cli) -> Result<LaunchRequest, String> {
    if cli.save_all {
        if !cli.files.is_empty() {
            return Err("--save-all takes no file arguments".to_string());
        }
        return Ok(LaunchRequest::SaveAll);
    }

    if let Some(dir) = &cli.dir {
        if !cli.files.is_empty() {
            return Err("--dir cannot be combined with file arguments".to_string());
        }
        return Ok(LaunchRequest::OpenDirectory { path: dir.clone() });
    }

    match cli.files.as_slice() {
        [] => Err("nothing to open: pass files, --dir, or --save-all".to_string()),
        [path] => Ok(LaunchRequest::open_file_at(
            path.clone(),
            cli.line.unwrap_or(0),
            cli.column.unwrap_or(0),
        )),
        files => {
            if cli.line.is_some() || cli.column.is_some() {
                return Err("--line/--column only apply to a single file".to_string());
            }
            Ok(LaunchRequest::OpenFiles {
                paths: files.to_vec(),
            })
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let env_filter = EnvFilter::from_default_env().add_directive(cli.log_level.parse()?);

    let _guard = if let Some(log_file) = &cli.log_file {
        // Log to file
        let file_appender = tracing_appender::rolling::never(
            log_file
                .parent()
                .unwrap_or_else(|| std::path::Path::new(".")),
            log_file
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("nvim-open.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(env_filter)
            .init();

        // Note: _guard is a WorkerGuard which is returned by tracing_appender::non_blocking
        // to ensure buffered logs are flushed to their output
        // in the case of abrupt terminations of a process.
        Some(guard)
    } else {
        // Log to stderr (default behavior)
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();

        None
    };

    let request = build_request(&cli)?;

    let mut config = LauncherConfig::from_env();
    config.program = cli.nvim.clone();
    if cli.server.is_some() {
        config.server = cli.server.clone();
    }

    info!(program = %config.program, server = ?config.server, "opening in Neovim");
    let launcher = Launcher::new(config);
    if !launcher.launch(&request) {
        error!("could not deliver the request to Neovim");
        std::process::exit(1);
    }

    Ok(())
}
