//! Log level and file format, shared by the settings file and the command line.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Minimum severity that reaches any output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Layout of lines written to the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// Case-insensitive lookup that also honours `#[value(alias)]`.
fn parse_variant<T: ValueEnum>(raw: &str, what: &str) -> Result<T, String> {
    T::from_str(raw.trim(), true).map_err(|_| {
        let choices: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        format!("unknown {what} `{raw}`, expected one of: {}", choices.join(", "))
    })
}

macro_rules! string_conversions {
    ($ty:ty, $what:literal) => {
        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                parse_variant(&raw, $what)
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_conversions!(LogLevel, "log level");
string_conversions!(LogFormat, "log format");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_accepts_any_case_and_alias() {
        assert_eq!(LogLevel::try_from("DEBUG".to_string()), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::try_from("warning".to_string()), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_unknown_level_lists_choices() {
        let err = LogLevel::try_from("chatty".to_string()).unwrap_err();
        assert!(err.contains("chatty"));
        assert!(err.contains("trace, debug, info, warn, error"));
    }

    #[test]
    fn test_format_round_trips_through_its_name() {
        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            assert_eq!(LogFormat::try_from(format.to_string()), Ok(format));
        }
        assert!(LogFormat::try_from("xml".to_string()).is_err());
    }
}
