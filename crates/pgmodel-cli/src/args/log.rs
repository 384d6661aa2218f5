use clap::ValueEnum;

/// `--log` values, each expanded to an `EnvFilter` directive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum)]
pub(crate) enum LogLevel {
    /// No logs at all
    Off,
    /// Errors from pgmodel crates
    Error,
    /// Warnings, such as columns that need a manually chosen type
    Warn,
    /// Connection target and catalog counts
    #[default]
    Info,
    /// Every catalog query with its row count
    Debug,
    /// Everything, including the postgres driver's own logs
    Trace,
}

impl LogLevel {
    pub(crate) fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "pgmodel=error,pgmodel_rustgen=error,off",
            LogLevel::Warn => "pgmodel=warn,pgmodel_rustgen=warn,off",
            LogLevel::Info => "pgmodel=info,pgmodel_rustgen=info,off",
            LogLevel::Debug => "pgmodel=debug,pgmodel_rustgen=debug,off",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_strings_parse() {
        for level in LogLevel::value_variants() {
            let filter = level.as_filter_str();
            assert!(
                tracing_subscriber::EnvFilter::try_new(filter).is_ok(),
                "{filter}"
            );
        }
    }

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::from_str("debug", true), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
