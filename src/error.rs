use std::io;
use thiserror::Error;

/// Failures of the partition/compute/reduce engine.
///
/// Every variant is raised before a partial total could be observed; the
/// coordinator never returns a sum that is missing a block.
#[derive(Error, Debug)]
pub enum SumError {
    #[error("number of blocks must be at least 1")]
    ZeroBlocks,

    #[error("stride must be at least 1")]
    ZeroStride,

    #[error("cannot partition an empty array into {num_blocks} block(s)")]
    EmptyArray { num_blocks: usize },

    #[error("cannot split {size} element(s) into {num_blocks} blocks")]
    TooManyBlocks { num_blocks: usize, size: usize },

    #[error("failed to spawn worker for block {block_id}: {source}")]
    Spawn {
        block_id: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker for block {block_id} panicked")]
    WorkerPanicked { block_id: usize },
}

/// Rejected run configuration, from flags or a config file.
///
/// Each variant carries a distinct process exit code; see [`ConfigError::exit_code`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Must provide an even amount of arguments")]
    MalformedArguments { detail: String },

    #[error("Number of blocks must be positive")]
    NonPositiveBlocks { value: i64 },

    #[error("Valid mode args are 0 or 1")]
    InvalidMode { value: i64 },

    #[error("Step size must be positive")]
    NonPositiveStride { value: i64 },

    #[error("Invalid flag given")]
    InvalidFlag { flag: String },

    #[error("Array size must be between 1 and 2147483647")]
    InvalidSize { value: i64 },

    #[error("Failed to load config: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to load config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Compute(#[from] SumError),
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::MalformedArguments { .. } => 1,
            ConfigError::NonPositiveBlocks { .. } => 2,
            ConfigError::InvalidMode { .. } => 3,
            ConfigError::NonPositiveStride { .. } => 4,
            ConfigError::InvalidFlag { .. } => 5,
            ConfigError::InvalidSize { .. } => 6,
            ConfigError::Io(_) | ConfigError::Parse(_) => 7,
            ConfigError::Compute(_) => 8,
        }
    }
}
