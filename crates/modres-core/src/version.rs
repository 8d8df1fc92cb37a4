//! Module version parsing and constraint matching.
//!
//! Module versions are plain `major.minor.patch` triples. Parsing a module's
//! own version is lenient: a missing or non-numeric segment counts as `0`, so
//! `1.0` is `1.0.0` and `1.2.3-beta` is `1.2.0`.
//!
//! Constraints are strict. The grammar is:
//! - `*` matches anything
//! - `^X.Y.Z` matches the same major line at or above `X.Y.Z`; on the `0.x`
//!   line only the same minor is compatible
//! - one or more space-separated `<op><version>` comparators, all of which
//!   must hold, where `<op>` is one of `=`, `>`, `>=`, `<`, `<=`
//!
//! Constraint versions may omit trailing segments (`^2.0` is `^2.0.0`) but
//! every segment given must be numeric. Anything else is a parse error.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// A concrete module version, ordered numerically by major, minor, patch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse a version leniently; never fails.
    pub fn parse(version: &str) -> Self {
        let mut segments = version
            .trim()
            .split('.')
            .map(|s| s.parse::<u64>().unwrap_or(0));
        let major = segments.next().unwrap_or(0);
        let minor = segments.next().unwrap_or(0);
        let patch = segments.next().unwrap_or(0);
        Self::new(major, minor, patch)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0.major, self.0.minor, self.0.patch)
    }
}

/// A comparison operator in an explicit bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Op {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Op::Eq => ord == Ordering::Equal,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Lt => "<",
            Op::Le => "<=",
        }
    }
}

/// One `<op><version>` term of an explicit bound list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

impl Comparator {
    pub fn matches(&self, version: &Version) -> bool {
        self.op.holds(version.cmp(&self.version))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// The parsed shape of a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    Any,
    Caret(Version),
    Bounds(Vec<Comparator>),
}

/// A parsed version constraint expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    expr: String,
    kind: ConstraintKind,
}

/// A malformed constraint expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version constraint `{expr}`: {kind}")]
pub struct ConstraintParseError {
    pub expr: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expression is empty")]
    Empty,
    #[error("`*` cannot be combined with other terms")]
    WildcardNotAlone,
    #[error("a `^` range cannot be combined with other terms")]
    CaretNotAlone,
    #[error("`{0}` has no comparison operator")]
    MissingOperator(String),
    #[error("`{0}` does not start with one of =, >, >=, <, <=")]
    UnknownOperator(String),
    #[error("`{0}` has an operator but no version")]
    MissingVersion(String),
    #[error("`{0}` is not a numeric major.minor.patch version")]
    InvalidVersion(String),
}

impl VersionConstraint {
    /// The unconstrained `*` expression.
    pub fn any() -> Self {
        Self {
            expr: "*".to_string(),
            kind: ConstraintKind::Any,
        }
    }

    pub fn parse(expression: &str) -> Result<Self, ConstraintParseError> {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let expr = tokens.join(" ");
        let fail = |kind| ConstraintParseError {
            expr: expression.trim().to_string(),
            kind,
        };

        let kind = match tokens.as_slice() {
            [] => return Err(fail(ParseErrorKind::Empty)),
            ["*"] => ConstraintKind::Any,
            [single] if single.starts_with('^') => {
                let version = parse_strict(&single[1..])
                    .ok_or_else(|| fail(ParseErrorKind::InvalidVersion(single.to_string())))?;
                ConstraintKind::Caret(version)
            }
            many => {
                let mut comparators = Vec::with_capacity(many.len());
                for token in many {
                    if *token == "*" {
                        return Err(fail(ParseErrorKind::WildcardNotAlone));
                    }
                    if token.starts_with('^') {
                        return Err(fail(ParseErrorKind::CaretNotAlone));
                    }
                    comparators.push(parse_comparator(token).map_err(fail)?);
                }
                ConstraintKind::Bounds(comparators)
            }
        };

        Ok(Self { expr, kind })
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn is_any(&self) -> bool {
        matches!(self.kind, ConstraintKind::Any)
    }

    /// Check a version string, parsed leniently.
    pub fn satisfied_by(&self, version: &str) -> bool {
        self.matches(&Version::parse(version))
    }

    pub fn matches(&self, version: &Version) -> bool {
        match &self.kind {
            ConstraintKind::Any => true,
            ConstraintKind::Caret(base) => {
                let same_line = if base.major() > 0 {
                    version.major() == base.major()
                } else {
                    version.major() == 0 && version.minor() == base.minor()
                };
                same_line && version >= base
            }
            ConstraintKind::Bounds(comparators) => comparators.iter().all(|c| c.matches(version)),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

impl std::str::FromStr for VersionConstraint {
    type Err = ConstraintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_comparator(token: &str) -> Result<Comparator, ParseErrorKind> {
    // Two-character operators first so `>=` is not read as `>` + `=1.0`.
    let (op, rest) = if let Some(rest) = token.strip_prefix(">=") {
        (Op::Ge, rest)
    } else if let Some(rest) = token.strip_prefix("<=") {
        (Op::Le, rest)
    } else if let Some(rest) = token.strip_prefix('>') {
        (Op::Gt, rest)
    } else if let Some(rest) = token.strip_prefix('<') {
        (Op::Lt, rest)
    } else if let Some(rest) = token.strip_prefix('=') {
        (Op::Eq, rest)
    } else if token.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseErrorKind::MissingOperator(token.to_string()));
    } else {
        return Err(ParseErrorKind::UnknownOperator(token.to_string()));
    };

    if rest.is_empty() {
        return Err(ParseErrorKind::MissingVersion(token.to_string()));
    }
    let version = parse_strict(rest)
        .ok_or_else(|| ParseErrorKind::InvalidVersion(token.to_string()))?;
    Ok(Comparator { op, version })
}

/// Parse a constraint-side version: one to three numeric segments.
fn parse_strict(version: &str) -> Option<Version> {
    let segments: Vec<&str> = version.split('.').collect();
    if segments.len() > 3 {
        return None;
    }
    let mut parts = [0u64; 3];
    for (slot, segment) in parts.iter_mut().zip(&segments) {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = segment.parse().ok()?;
    }
    Some(Version::new(parts[0], parts[1], parts[2]))
}
