//! Command-line surface: `-s <size> -b <blocks> -m <mode> -p <stride> -r <seed>`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ErrorKind};
use clap::Parser;

use crate::config::{check_blocks, check_size, check_stride, RawConfig, RunConfig};
use crate::error::ConfigError;
use crate::source::ArrayMode;

/// Sum an integer array across worker threads and time it
#[derive(Parser, Debug)]
#[command(name = "block-sum", version, args_override_self = true)]
pub struct Cli {
    /// Number of array elements [default: 10000]
    #[arg(short = 's', value_name = "SIZE", allow_negative_numbers = true)]
    pub array_size: Option<i64>,

    /// Number of blocks, one worker thread each [default: 1]
    #[arg(short = 'b', value_name = "BLOCKS", allow_negative_numbers = true)]
    pub num_blocks: Option<i64>,

    /// 0 = ascending values, 1 = random values in [-1000, 1000) [default: 0]
    #[arg(short = 'm', value_name = "MODE", allow_negative_numbers = true)]
    pub mode: Option<i64>,

    /// Interleaved passes each worker makes over its block [default: 1]
    #[arg(short = 'p', value_name = "STRIDE", allow_negative_numbers = true)]
    pub stride: Option<i64>,

    /// Seed for random mode
    #[arg(short = 'r', value_name = "SEED", allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// TOML file with array_size, num_blocks, mode, stride, seed; flags win
    #[arg(long, value_name = "PATH", env = "BLOCK_SUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Recompute the expected total with rayon and compare
    #[arg(long)]
    pub verify: bool,
}

/// Outcome of parsing the command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Cli),
    /// `--help` or `--version`; print and exit successfully.
    Info(clap::Error),
}

impl Cli {
    /// Parse `args` (program name first).
    ///
    /// The short flags are checked pairwise in command-line order before clap
    /// sees them, so with several bad flags the first one decides the error.
    pub fn parse_args<I, T>(args: I) -> Result<Parsed, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        check_short_flags(&args)?;

        match Cli::try_parse_from(args) {
            Ok(cli) => Ok(Parsed::Run(cli)),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(Parsed::Info(err)),
                _ => Err(classify(&err)),
            },
        }
    }

    /// Flag values only, without the config file.
    pub fn flags(&self) -> RawConfig {
        RawConfig {
            array_size: self.array_size,
            num_blocks: self.num_blocks,
            mode: self.mode,
            stride: self.stride,
            seed: self.seed,
        }
    }

    /// Config file (if any) overlaid with flags, then validated.
    pub fn resolve(&self) -> Result<RunConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                RawConfig::load(path)?
            }
            None => RawConfig::default(),
        };
        base.merge(self.flags()).validate()
    }
}

/// Walk the `-<flag> <value>` pairs after the program name.
///
/// Long options (`--verify`, `--config <path>`) and `-h`/`-V` are skipped.
/// An odd number of remaining tokens is malformed; otherwise the first pair
/// with an unknown flag or a bad value is reported.
fn check_short_flags(args: &[OsString]) -> Result<(), ConfigError> {
    let mut tokens = Vec::new();
    let mut rest = args.iter().skip(1).map(|arg| arg.to_string_lossy());
    while let Some(token) = rest.next() {
        if token == "--config" {
            rest.next();
        } else if !(token.starts_with("--") || token == "-h" || token == "-V") {
            tokens.push(token);
        }
    }

    if tokens.len() % 2 != 0 {
        return Err(ConfigError::MalformedArguments {
            detail: format!("{} flag/value token(s)", tokens.len()),
        });
    }

    for pair in tokens.chunks_exact(2) {
        let flag: &str = &pair[0];
        let value: &str = &pair[1];
        let parse = || {
            value.parse::<i64>().map_err(|_| ConfigError::MalformedArguments {
                detail: format!("{} expects an integer, got '{}'", flag, value),
            })
        };

        match flag {
            "-s" => check_size(parse()?).map(drop)?,
            "-b" => check_blocks(parse()?).map(drop)?,
            "-m" => ArrayMode::from_code(parse()?).map(drop)?,
            "-p" => check_stride(parse()?).map(drop)?,
            "-r" => parse().map(drop)?,
            _ => {
                return Err(ConfigError::InvalidFlag {
                    flag: flag.to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Map a clap parse failure onto the exit-code contract.
///
/// An unknown `-x` is an invalid flag; anything else (a flag without a value,
/// a stray value, a non-numeric value) counts as a malformed flag/value pair.
fn classify(err: &clap::Error) -> ConfigError {
    let offending = err.get(ContextKind::InvalidArg).map(ToString::to_string);

    match (err.kind(), offending) {
        (ErrorKind::UnknownArgument, Some(flag)) if flag.starts_with('-') => {
            ConfigError::InvalidFlag { flag }
        }
        _ => ConfigError::MalformedArguments {
            detail: err.render().to_string().trim().to_string(),
        },
    }
}
