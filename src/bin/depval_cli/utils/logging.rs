use env_logger::Env;
use log::LevelFilter;

/// Map the `-v` count to a default level
pub fn default_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialise the logger. `RUST_LOG` overrides the verbosity flag.
pub fn setup_logger(verbosity: u8) {
    let default = default_level(verbosity).to_string().to_lowercase();

    env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), LevelFilter::Warn);
        assert_eq!(default_level(2), LevelFilter::Debug);
        assert_eq!(default_level(9), LevelFilter::Trace);
    }
}
