//! upack - universal package command-line tool
//!
//! Usage: `upack <command> [arguments...] [--name[=value] ...] [--] [arguments...]`

use upack::cli::tokenizer::lossy_args;
use upack::cli::{Dispatcher, Registry, INTERNAL_ERROR_CODE};
use upack::config::ConfigBuilder;
use upack::error::AppError;

fn main() {
    // Initialize logging before config loading.
    // RUST_LOG, when set, replaces the default warn level.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .parse_env(env_logger::Env::default())
        .format_timestamp(None)
        .init();
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(log::LevelFilter::Warn);
    }

    let config = ConfigBuilder::new().with_env().build();

    // Set log level based on the verbose setting
    if config.general.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let dispatcher = Dispatcher::new(Registry::builtin()).with_format(config.general.format);

    let code = match dispatcher.main(lossy_args(std::env::args_os())) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            print_error(&e);
            INTERNAL_ERROR_CODE
        }
    };

    std::process::exit(code);
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    if let AppError::Command(upack::error::CommandError::Timeout(_)) = err {
        eprintln!();
        eprintln!("Hint: Increase --timeout or check that the package path is reachable.");
    }
}
