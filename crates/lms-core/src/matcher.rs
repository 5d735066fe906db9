//! String predicates used by every selection rule
//!
//! A [`PatternMatcher`] is one of three variants: literal equality,
//! substring containment, or regular-expression search. Matching is
//! case-sensitive and regex compilation happens once, at construction.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::{Error, Result};

/// How a pattern is compared against text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `text == pattern`
    Literal,
    /// `pattern` is a substring of `text`
    Contains,
    /// `pattern` compiles as a regex that finds a match anywhere in `text`
    Regex,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Literal => "literal",
            MatchKind::Contains => "contains",
            MatchKind::Regex => "regex",
        }
    }
}

impl FromStr for MatchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(MatchKind::Literal),
            "contains" => Ok(MatchKind::Contains),
            "regex" => Ok(MatchKind::Regex),
            _ => Err(Error::InvalidPattern {
                pattern: s.to_string(),
                message: "match_type must be one of literal, contains, regex".to_string(),
            }),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    Literal,
    Contains,
    Regex(Regex),
}

/// An immutable, case-sensitive string predicate.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    compiled: Compiled,
}

impl PatternMatcher {
    /// Build a matcher of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `kind` is [`MatchKind::Regex`]
    /// and the pattern does not compile.
    pub fn new(kind: MatchKind, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let compiled = match kind {
            MatchKind::Literal => Compiled::Literal,
            MatchKind::Contains => Compiled::Contains,
            MatchKind::Regex => {
                let regex = Regex::new(&pattern).map_err(|e| Error::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                Compiled::Regex(regex)
            }
        };
        Ok(Self { pattern, compiled })
    }

    /// Build a matcher from a configuration `match_type` string.
    pub fn parse(pattern: impl Into<String>, match_type: &str) -> Result<Self> {
        Self::new(match_type.parse()?, pattern)
    }

    /// A literal-equality matcher. Never fails.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: Compiled::Literal,
        }
    }

    /// A substring matcher. Never fails.
    pub fn contains(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: Compiled::Contains,
        }
    }

    /// A regex-search matcher.
    pub fn regex(pattern: impl Into<String>) -> Result<Self> {
        Self::new(MatchKind::Regex, pattern)
    }

    pub fn kind(&self) -> MatchKind {
        match self.compiled {
            Compiled::Literal => MatchKind::Literal,
            Compiled::Contains => MatchKind::Contains,
            Compiled::Regex(_) => MatchKind::Regex,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Test `text` against the pattern.
    pub fn matches(&self, text: &str) -> bool {
        match &self.compiled {
            Compiled::Literal => text == self.pattern,
            Compiled::Contains => text.contains(self.pattern.as_str()),
            Compiled::Regex(regex) => regex.is_match(text),
        }
    }
}

impl PartialEq for PatternMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.pattern == other.pattern
    }
}

impl Eq for PatternMatcher {}

impl fmt::Display for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.pattern)
    }
}
