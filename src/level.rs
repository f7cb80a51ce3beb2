//! Severity levels understood by the Graylog hook.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Log severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Syslog severity code carried in the GELF `level` field.
    pub fn gelf_code(self) -> u8 {
        match self {
            Level::Panic => 0,
            Level::Fatal => 2,
            Level::Error => 3,
            Level::Warn => 4,
            Level::Info => 6,
            Level::Debug | Level::Trace => 7,
        }
    }

    /// Levels at or above `threshold`, most severe first.
    pub fn at_or_above(threshold: Level) -> Vec<Level> {
        Self::ALL
            .iter()
            .copied()
            .filter(|level| *level >= threshold)
            .collect()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        };
        f.write_str(s)
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panic" => Ok(Self::Panic),
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ConfigError::InvalidLevel(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(Level::Panic, 0)]
    #[case(Level::Fatal, 2)]
    #[case(Level::Error, 3)]
    #[case(Level::Warn, 4)]
    #[case(Level::Info, 6)]
    #[case(Level::Debug, 7)]
    #[case(Level::Trace, 7)]
    fn maps_to_syslog_codes(#[case] level: Level, #[case] code: u8) {
        assert_eq!(level.gelf_code(), code);
    }

    #[rstest]
    fn ordering_matches_severity() {
        assert!(Level::Panic > Level::Fatal);
        assert!(Level::Fatal > Level::Error);
        assert!(Level::Error > Level::Warn);
        assert!(Level::Warn > Level::Info);
        assert!(Level::Info > Level::Debug);
        assert!(Level::Debug > Level::Trace);
    }

    #[rstest]
    fn defaults_to_debug() {
        assert_eq!(Level::default(), Level::Debug);
    }

    #[rstest]
    fn at_or_above_warn() {
        assert_eq!(
            Level::at_or_above(Level::Warn),
            vec![Level::Panic, Level::Fatal, Level::Error, Level::Warn]
        );
    }

    #[rstest]
    fn rejects_unknown_name() {
        let err = "verbose".parse::<Level>().expect_err("unknown level");
        assert!(matches!(err, ConfigError::InvalidLevel(ref name) if name == "verbose"));
    }

    #[rstest]
    fn display_round_trips_through_parse() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().ok(), Some(level));
        }
    }

    fn mixed_case(name: &str, mask: u32) -> String {
        name.chars()
            .enumerate()
            .map(|(i, c)| {
                if mask & (1 << i) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn parsing_ignores_case(index in 0usize..Level::ALL.len(), mask in any::<u32>()) {
            let level = Level::ALL[index];
            let name = mixed_case(&level.to_string(), mask);
            prop_assert_eq!(name.parse::<Level>().ok(), Some(level));
        }
    }
}
