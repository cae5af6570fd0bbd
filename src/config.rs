//! Run configuration: raw values from a TOML file and/or flags, validated
//! into a [`RunConfig`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::coordinator::Coordinator;
use crate::error::ConfigError;
use crate::source::{init_array, ArrayMode, MAX_ARRAY_SIZE};

pub const DEFAULT_ARRAY_SIZE: usize = 10_000;
pub const DEFAULT_NUM_BLOCKS: usize = 1;
pub const DEFAULT_STRIDE: usize = 1;

/// Unvalidated settings. Signed so that negative input survives parsing and
/// is reported with its own error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub array_size: Option<i64>,
    pub num_blocks: Option<i64>,
    pub mode: Option<i64>,
    pub stride: Option<i64>,
    pub seed: Option<i64>,
}

impl RawConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Values set in `overrides` win; unset ones fall back to `self`.
    pub fn merge(self, overrides: RawConfig) -> RawConfig {
        RawConfig {
            array_size: overrides.array_size.or(self.array_size),
            num_blocks: overrides.num_blocks.or(self.num_blocks),
            mode: overrides.mode.or(self.mode),
            stride: overrides.stride.or(self.stride),
            seed: overrides.seed.or(self.seed),
        }
    }

    /// Check every value. A config file has no flag order, so when several
    /// values are bad the first one in field order (blocks, mode, stride,
    /// size) is reported.
    pub fn validate(&self) -> Result<RunConfig, ConfigError> {
        let num_blocks = self.num_blocks.map_or(Ok(DEFAULT_NUM_BLOCKS), check_blocks)?;
        let mode = self.mode.map_or(Ok(ArrayMode::default()), ArrayMode::from_code)?;
        let stride = self.stride.map_or(Ok(DEFAULT_STRIDE), check_stride)?;
        let array_size = self.array_size.map_or(Ok(DEFAULT_ARRAY_SIZE), check_size)?;

        Ok(RunConfig {
            array_size,
            num_blocks,
            mode,
            stride,
            seed: self.seed.map(|seed| seed as u64),
        })
    }
}

fn positive(value: i64) -> Option<usize> {
    if value > 0 {
        usize::try_from(value).ok()
    } else {
        None
    }
}

pub(crate) fn check_blocks(value: i64) -> Result<usize, ConfigError> {
    positive(value).ok_or(ConfigError::NonPositiveBlocks { value })
}

pub(crate) fn check_stride(value: i64) -> Result<usize, ConfigError> {
    positive(value).ok_or(ConfigError::NonPositiveStride { value })
}

/// Sizes above `MAX_ARRAY_SIZE` are rejected: sequential values are `i32`.
pub(crate) fn check_size(value: i64) -> Result<usize, ConfigError> {
    positive(value)
        .filter(|&size| size <= MAX_ARRAY_SIZE)
        .ok_or(ConfigError::InvalidSize { value })
}

/// Checked settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub array_size: usize,
    pub num_blocks: usize,
    pub mode: ArrayMode,
    pub stride: usize,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            array_size: DEFAULT_ARRAY_SIZE,
            num_blocks: DEFAULT_NUM_BLOCKS,
            mode: ArrayMode::Sequential,
            stride: DEFAULT_STRIDE,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn coordinator(&self) -> Coordinator {
        Coordinator::new(self.num_blocks, self.stride)
    }

    pub fn build_array(&self) -> Result<Vec<i32>, ConfigError> {
        init_array(self.array_size, self.mode, self.seed)
    }
}
