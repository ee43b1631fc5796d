//! Error Types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while serializing a generated unit to disk. The pass driver logs
/// these and skips emission instead of aborting the host compilation.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to create output directory `{dir}`")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write generated unit `{unit}` to `{file}`")]
    Write {
        unit: String,
        file: PathBuf,
        #[source]
        source: io::Error,
    },
}
