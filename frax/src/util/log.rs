use log::LevelFilter;

pub const LOG_ENV_VAR: &str = "FRAX_LOG";

pub fn init_simple_logger(l: LevelFilter) -> Result<(), log::SetLoggerError> { 
    use simplelog::*;

    let mut cb = simplelog::ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    cb.set_level_color(Level::Trace, Some(Color::Green));
    let config = cb.build();

    TermLogger::init(
        l,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto
    )
}

/// Installs the terminal logger at the level named by `FRAX_LOG`
/// (`off`, `error`, `warn`, `info`, `debug`, `trace`). 
/// Unset or unparsable values leave logging off.
pub fn init_logger_from_env() -> Result<(), log::SetLoggerError> { 
    init_simple_logger(level_from_env())
}

fn level_from_env() -> LevelFilter { 
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(LevelFilter::Off)
}

fn parse_level(s: &str) -> Option<LevelFilter> { 
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn parse() { 
        assert_eq!(parse_level("trace"), Some(LevelFilter::Trace));
        assert_eq!(parse_level(" Debug "), Some(LevelFilter::Debug));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }
}
