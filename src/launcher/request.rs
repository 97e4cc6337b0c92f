use std::path::PathBuf;

/// A single open-in-editor request.
///
/// Requests are transient values: they carry no identity beyond the call that
/// builds them. Line and column only apply to `OpenFile`; a value of zero
/// counts as unset, matching what IDE integration points tend to pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    /// Open one file, optionally jumping to a line and column.
    OpenFile {
        path: PathBuf,
        line: Option<u32>,
        column: Option<u32>,
    },
    /// Open several files as separate buffers, order-preserving.
    OpenFiles { paths: Vec<PathBuf> },
    /// Browse a directory with the editor's file explorer.
    OpenDirectory { path: PathBuf },
    /// Write all modified buffers of the running instance.
    SaveAll,
}

impl LaunchRequest {
    /// Single-file request with the zero-means-unset convention applied.
    /// A column without a line is meaningless and is dropped.
    pub fn open_file_at(path: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        LaunchRequest::OpenFile {
            path: path.into(),
            line: (line > 0).then_some(line),
            column: (line > 0 && column > 0).then_some(column),
        }
    }
}
