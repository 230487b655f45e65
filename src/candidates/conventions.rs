//! Corporate email naming conventions.
//!
//! A static, ordered table mapping each convention to a pure local-part
//! renderer. Table order is the generation order and therefore the ranking:
//! the most common corporate shapes come first.

use std::fmt;

/// Supported local-part shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingConvention {
    /// `jane.smith`
    FirstDotLast,
    /// `j.smith`
    InitialDotLast,
    /// `jane.s`
    FirstDotInitial,
    /// `janesmith`
    FirstLast,
    /// `jsmith`
    InitialLast,
    /// `jane`
    First,
    /// `smith`
    Last,
    /// `jane_smith`
    FirstUnderscoreLast,
    /// `jane-smith`
    FirstHyphenLast,
    /// `smith.jane`
    LastDotFirst,
    /// `s.jane`
    LastInitialDotFirst,
}

/// Renders a local part from normalized, non-empty first and last tokens.
type Render = fn(&str, &str) -> String;

/// Generation order.
pub static CONVENTIONS: &[(NamingConvention, Render)] = &[
    (NamingConvention::FirstDotLast, |f, l| format!("{f}.{l}")),
    (NamingConvention::InitialDotLast, |f, l| format!("{}.{l}", initial(f))),
    (NamingConvention::FirstDotInitial, |f, l| format!("{f}.{}", initial(l))),
    (NamingConvention::FirstLast, |f, l| format!("{f}{l}")),
    (NamingConvention::InitialLast, |f, l| format!("{}{l}", initial(f))),
    (NamingConvention::First, |f, _| f.to_string()),
    (NamingConvention::Last, |_, l| l.to_string()),
    (NamingConvention::FirstUnderscoreLast, |f, l| format!("{f}_{l}")),
    (NamingConvention::FirstHyphenLast, |f, l| format!("{f}-{l}")),
    (NamingConvention::LastDotFirst, |f, l| format!("{l}.{f}")),
    (NamingConvention::LastInitialDotFirst, |f, l| format!("{}.{f}", initial(l))),
];

fn initial(token: &str) -> &str {
    token
        .char_indices()
        .nth(1)
        .map_or(token, |(end, _)| &token[..end])
}

impl NamingConvention {
    /// Short tag, e.g. `f.last`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::FirstDotLast => "first.last",
            Self::InitialDotLast => "f.last",
            Self::FirstDotInitial => "first.l",
            Self::FirstLast => "firstlast",
            Self::InitialLast => "flast",
            Self::First => "first",
            Self::Last => "last",
            Self::FirstUnderscoreLast => "first_last",
            Self::FirstHyphenLast => "first-last",
            Self::LastDotFirst => "last.first",
            Self::LastInitialDotFirst => "l.first",
        }
    }

    /// Render this convention's local part.
    pub fn render(&self, first: &str, last: &str) -> String {
        CONVENTIONS
            .iter()
            .find(|(convention, _)| convention == self)
            .map(|(_, render)| render(first, last))
            .unwrap_or_default()
    }

    /// All conventions in priority order.
    pub fn all() -> impl Iterator<Item = NamingConvention> {
        CONVENTIONS.iter().map(|(convention, _)| *convention)
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}
