use std::fs::OpenOptions;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::config::Config;

/// Installs the global logger.
///
/// With `log_file` set, records are appended there so they stay out of the
/// terminal; otherwise they go to stderr. A second call is a no-op.
pub fn init(config: &Config) {
    let log_config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    let result = match &config.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => WriteLogger::init(config.log_level, log_config, file),
            Err(e) => {
                eprintln!("simplesh: cannot open log file {}: {}", path.display(), e);
                TermLogger::init(config.log_level, log_config, TerminalMode::Stderr, ColorChoice::Auto)
            }
        },
        None => TermLogger::init(config.log_level, log_config, TerminalMode::Stderr, ColorChoice::Auto),
    };

    if result.is_ok() {
        log::debug!("logger ready at level {}", config.log_level);
    }
}
