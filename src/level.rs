//! Debug-verbosity ordering.
//!
//! Settings carry their verbosity as a plain token so that unknown values
//! survive decoding; comparisons go through the ranked [`DebugLevel`]
//! enumeration, never through string order ("verbose" sorts after "info"
//! lexically by accident, not by design).

/// The four verbosity tokens, ranked least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    /// `error`
    Error,
    /// `warning`
    Warning,
    /// `info`
    Info,
    /// `verbose`
    Verbose,
}

impl DebugLevel {
    /// Parse a token. Unknown tokens yield `None` and rank below all levels.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "verbose" => Some(Self::Verbose),
            _ => None,
        }
    }

    /// Numeric rank, `error` being 0.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
            Self::Verbose => 3,
        }
    }

    /// The canonical token for this level.
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Verbose => "verbose",
        }
    }
}

/// Whether `current` is at least as verbose as `level`.
///
/// An unknown `current` token ranks below every known level, so the answer
/// is `false`. An unknown `level` argument is treated as rank 0.
pub fn at_least(current: &str, level: &str) -> bool {
    match DebugLevel::from_token(current) {
        Some(current) => current.rank() >= DebugLevel::from_token(level).map_or(0, DebugLevel::rank),
        None => false,
    }
}
