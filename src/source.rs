//! Input arrays: an ascending sequence or uniformly random values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;

/// Lower bound (inclusive) of random values.
pub const MIN_VAL: i32 = -1000;
/// Upper bound (exclusive) of random values.
pub const MAX_VAL: i32 = 1000;
/// Largest array whose sequential values `0..size` all fit in `i32`.
pub const MAX_ARRAY_SIZE: usize = i32::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMode {
    /// `0, 1, 2, ..., size - 1`
    #[default]
    Sequential,
    /// Independent values drawn from `MIN_VAL..MAX_VAL`.
    Random,
}

impl ArrayMode {
    /// Decode the numeric mode used on the command line (`0` or `1`).
    pub fn from_code(code: i64) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(ArrayMode::Sequential),
            1 => Ok(ArrayMode::Random),
            value => Err(ConfigError::InvalidMode { value }),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ArrayMode::Sequential => 0,
            ArrayMode::Random => 1,
        }
    }
}

/// Build the input array.
///
/// `seed` only affects [`ArrayMode::Random`]; without one the generator is
/// seeded from OS entropy. Sizes above [`MAX_ARRAY_SIZE`] are rejected in
/// both modes.
pub fn init_array(size: usize, mode: ArrayMode, seed: Option<u64>) -> Result<Vec<i32>, ConfigError> {
    let upper = i32::try_from(size).map_err(|_| ConfigError::InvalidSize {
        value: i64::try_from(size).unwrap_or(i64::MAX),
    })?;

    let array = match mode {
        ArrayMode::Sequential => (0..upper).collect(),
        ArrayMode::Random => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            (0..size).map(|_| rng.gen_range(MIN_VAL..MAX_VAL)).collect()
        }
    };
    Ok(array)
}
