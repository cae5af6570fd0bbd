use std::process;

use block_sum::cli::{Cli, Parsed};
use block_sum::verify::Verification;
use block_sum::{ConfigError, RunConfig};
use colored::Colorize;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(Parsed::Run(cli)) => cli,
        Ok(Parsed::Info(info)) => info.exit(),
        Err(err) => fail(err),
    };

    let config = cli.resolve().unwrap_or_else(|err| fail(err));
    if let Err(err) = run(&config, cli.verify) {
        fail(err);
    }
}

fn run(config: &RunConfig, verify: bool) -> Result<(), ConfigError> {
    let cpus = num_cpus::get();
    if config.num_blocks > cpus {
        log::warn!(
            "{} blocks on {} logical CPUs; workers will time-share",
            config.num_blocks,
            cpus
        );
    }
    log::info!("{:?}", config);

    let array = config.build_array()?;
    let report = config.coordinator().run(&array)?;

    println!("{}", report);

    if verify {
        match Verification::check(&array, config.num_blocks, report.total) {
            Some(Verification::Passed) => println!("Verification: {}", "PASSED".green()),
            Some(Verification::Failed { expected, actual }) => {
                println!(
                    "Verification: {} (expected {}, got {})",
                    "FAILED".red(),
                    expected,
                    actual
                );
                process::exit(8);
            }
            None => {}
        }
    }

    Ok(())
}

fn fail(err: ConfigError) -> ! {
    if let ConfigError::MalformedArguments { detail } = &err {
        log::debug!("{}", detail);
    }
    eprintln!("{} {}", "error:".red().bold(), err);
    process::exit(err.exit_code());
}
