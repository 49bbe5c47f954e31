//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    /// Every level, lowest first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// A set of handled log levels, stored as a bitmask
///
/// Unlike a minimum-level threshold, any combination can be enabled,
/// e.g. only `Debug` and `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelSet(u8);

impl LevelSet {
    const MASK: u8 = 0b1_1111;

    /// A set containing every level
    pub const fn all() -> Self {
        LevelSet(Self::MASK)
    }

    /// A set containing no level; nothing gets logged
    pub const fn empty() -> Self {
        LevelSet(0)
    }

    /// All levels at or above `min`
    pub fn at_least(min: LogLevel) -> Self {
        LogLevel::ALL.iter().filter(|l| **l >= min).copied().collect()
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        LevelSet(bits & Self::MASK)
    }

    pub(crate) const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, level: LogLevel) -> bool {
        self.0 & level.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn with(self, level: LogLevel) -> Self {
        LevelSet(self.0 | level.bit())
    }

    #[must_use]
    pub const fn without(self, level: LogLevel) -> Self {
        LevelSet(self.0 & !level.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = LogLevel> {
        LogLevel::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<LogLevel> for LevelSet {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        iter.into_iter().fold(LevelSet::empty(), LevelSet::with)
    }
}

impl<const N: usize> From<[LogLevel; N]> for LevelSet {
    fn from(levels: [LogLevel; N]) -> Self {
        levels.into_iter().collect()
    }
}

impl From<&[LogLevel]> for LevelSet {
    fn from(levels: &[LogLevel]) -> Self {
        levels.iter().copied().collect()
    }
}

impl From<LogLevel> for LevelSet {
    fn from(level: LogLevel) -> Self {
        LevelSet::empty().with(level)
    }
}
