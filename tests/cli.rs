use std::io::Write;
use std::process::Command;

use block_sum::cli::{Cli, Parsed};
use block_sum::{ArrayMode, ConfigError};
use tempfile::NamedTempFile;

fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("block-sum").chain(args.iter().copied());
    match Cli::parse_args(argv).unwrap() {
        Parsed::Run(cli) => cli,
        Parsed::Info(info) => panic!("unexpected info output: {}", info),
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_block-sum"));
    cmd.env_remove("BLOCK_SUM_CONFIG").env("RUST_LOG", "off");
    cmd
}

#[test]
fn config_file_values_are_used() {
    let file = config_file("array_size = 32\nnum_blocks = 4\nmode = 1\nseed = 5\n");
    let path = file.path().to_str().unwrap();

    let config = parse(&["--config", path]).resolve().unwrap();
    assert_eq!(config.array_size, 32);
    assert_eq!(config.num_blocks, 4);
    assert_eq!(config.mode, ArrayMode::Random);
    assert_eq!(config.seed, Some(5));
}

#[test]
fn flags_override_config_file() {
    let file = config_file("array_size = 32\nnum_blocks = 4\nstride = 2\n");
    let path = file.path().to_str().unwrap();

    let config = parse(&["--config", path, "-b", "8"]).resolve().unwrap();
    assert_eq!(config.num_blocks, 8);
    assert_eq!(config.stride, 2);
}

#[test]
fn invalid_mode_in_config_file() {
    let file = config_file("mode = 2\n");
    let path = file.path().to_str().unwrap();

    let err = parse(&["--config", path]).resolve().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMode { value: 2 }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn missing_config_file() {
    let err = parse(&["--config", "/nonexistent/block-sum.toml"])
        .resolve()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert_eq!(err.exit_code(), 7);
}

#[test]
fn binary_prints_report() {
    let output = binary()
        .args(["-s", "8", "-b", "2", "-p", "1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Amount of time to execute sumArray: "));
    assert!(stdout.contains("Sum of execution: 28"));
}

#[test]
fn binary_verifies_random_run() {
    let output = binary()
        .args(["-s", "1000", "-b", "3", "-m", "1", "-r", "11", "-p", "7", "--verify"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("PASSED"));
}

#[test]
fn binary_exit_codes() {
    let cases: [(&[&str], i32); 11] = [
        (&["-s"], 1),
        (&["-b", "-1"], 2),
        (&["-m", "2"], 3),
        (&["-p", "0"], 4),
        (&["-z", "1"], 5),
        (&["-s", "0"], 6),
        (&["-s", "2", "-b", "3"], 8),
        (&["-p", "-1", "-b", "-1"], 4),
        (&["-m", "5", "-b", "-1"], 3),
        (&["-b", "-1", "-x", "1"], 2),
        (&["-x"], 1),
    ];

    for (args, code) in cases {
        let status = binary().args(args).status().unwrap();
        assert_eq!(status.code(), Some(code), "args {:?}", args);
    }
}
