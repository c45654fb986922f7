//! Value rules applied while loading a configuration.
//!
//! Per-field rules ([`Rule`]) run on each value as soon as its line is
//! parsed. Ordering rules ([`OrderingRule`]) compare two fields of the same
//! [`ConfigurationSet`] and run either at the dependent key's line or once
//! the whole file has been read, depending on the loader's
//! [`CrossFieldMode`](crate::config::loader::CrossFieldMode).

use std::num::IntErrorKind;

use crate::config::registry::FieldKey;
use crate::config::schema::{ConfigurationSet, SchedulerKind};

/// Smallest accepted memory size, in bytes.
pub const MEMORY_MIN: u64 = 2;

/// Largest accepted memory size, in bytes (2^32).
pub const MEMORY_MAX: u64 = 1 << 32;

const U32_MAX: i64 = u32::MAX as i64;

// ============================================================================
// Per-Field Rules
// ============================================================================

/// A rule a single value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Integer within an inclusive range.
    Range {
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
    },
    /// Integer equal to `2^k`, within `[MEMORY_MIN, MEMORY_MAX]`.
    PowerOfTwo,
    /// One of the scheduler literals.
    Scheduler,
}

impl Rule {
    /// Integer in `[1, u32::MAX]`.
    pub const POSITIVE: Self = Self::Range { min: 1, max: U32_MAX };

    /// Integer in `[0, u32::MAX]`.
    pub const NON_NEGATIVE: Self = Self::Range { min: 0, max: U32_MAX };

    /// Human-readable description of what the rule accepts.
    #[must_use]
    pub fn describe(&self) -> String {
        match *self {
            Self::Range { min: 0, max: U32_MAX } => "non-negative".to_string(),
            Self::Range { min: 1, max: U32_MAX } => "greater than 0".to_string(),
            Self::Range { min, max } => format!("between {min} and {max}"),
            Self::PowerOfTwo => power_of_two_phrase(),
            Self::Scheduler => format!("one of {}", quoted_list(SchedulerKind::ACCEPTED)),
        }
    }
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The value is out of bounds.
    Range {
        /// Description of the accepted range
        expected: String,
    },
    /// The value has the wrong shape.
    Format {
        /// Description of the accepted format
        expected: String,
    },
}

/// Parses a base-10 integer token.
///
/// Well-formed integers beyond `i64` saturate to `i64::MIN`/`i64::MAX`, so
/// the bound checks that follow report them as out of range.
///
/// # Errors
///
/// Returns [`Violation::Format`] if the token is not an integer.
pub fn parse_integer(token: &str) -> Result<i64, Violation> {
    token.parse::<i64>().or_else(|e| match e.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(Violation::Format {
            expected: "a base-10 integer".to_string(),
        }),
    })
}

/// Checks that `value` lies within `[min, max]`.
///
/// # Errors
///
/// Returns [`Violation::Range`] naming the violated bound.
pub fn check_range(value: i64, min: i64, max: i64) -> Result<(), Violation> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    let expected = if max == U32_MAX && value > max {
        format!("at most {max}")
    } else {
        Rule::Range { min, max }.describe()
    };
    Err(Violation::Range { expected })
}

/// Checks that `value` is a power of two within `[MEMORY_MIN, MEMORY_MAX]`.
///
/// # Errors
///
/// Returns [`Violation::Range`] if the value is outside the bounds and
/// [`Violation::Format`] if it is inside them but not a power of two.
pub fn check_power_of_two(value: i64) -> Result<u64, Violation> {
    let in_range = u64::try_from(value)
        .ok()
        .filter(|v| (MEMORY_MIN..=MEMORY_MAX).contains(v));
    let Some(v) = in_range else {
        return Err(Violation::Range {
            expected: power_of_two_phrase(),
        });
    };
    if !v.is_power_of_two() {
        return Err(Violation::Format {
            expected: power_of_two_phrase(),
        });
    }
    Ok(v)
}

/// Parses an unquoted scheduler token.
///
/// # Errors
///
/// Returns [`Violation::Format`] listing the accepted literals.
pub fn check_scheduler(token: &str) -> Result<SchedulerKind, Violation> {
    token.parse().map_err(|_| Violation::Format {
        expected: Rule::Scheduler.describe(),
    })
}

fn power_of_two_phrase() -> String {
    "a power of 2 in range [2, 2^32]".to_string()
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Cross-Field Rules
// ============================================================================

/// How the dependent field must compare to its companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// dependent <= companion
    AtMost,
    /// dependent >= companion
    AtLeast,
}

/// An ordering constraint between two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingRule {
    /// Field being checked.
    pub dependent: FieldKey,
    /// Field it is compared against.
    pub companion: FieldKey,
    /// Required relation.
    pub relation: Relation,
    /// Whether sequential mode checks the rule at the dependent key's line.
    /// Rules without this flag are only a warning in sequential mode.
    pub checked_inline: bool,
}

/// All ordering rules, in the order they are evaluated.
pub static ORDERING_RULES: [OrderingRule; 3] = [
    OrderingRule {
        dependent: FieldKey::MemPerFrame,
        companion: FieldKey::MaxOverallMem,
        relation: Relation::AtMost,
        checked_inline: true,
    },
    OrderingRule {
        dependent: FieldKey::MaxMemPerProc,
        companion: FieldKey::MinMemPerProc,
        relation: Relation::AtLeast,
        checked_inline: true,
    },
    OrderingRule {
        dependent: FieldKey::MaxIns,
        companion: FieldKey::MinIns,
        relation: Relation::AtLeast,
        checked_inline: false,
    },
];

impl OrderingRule {
    /// Returns the inline rules that apply when `key` is parsed.
    pub fn inline_for(key: FieldKey) -> impl Iterator<Item = &'static Self> {
        ORDERING_RULES
            .iter()
            .filter(move |rule| rule.checked_inline && rule.dependent == key)
    }

    /// Evaluates the rule against the current contents of `set`.
    ///
    /// Returns a description of the failure, or `None` if it holds.
    #[must_use]
    pub fn check(&self, set: &ConfigurationSet) -> Option<String> {
        let dependent = self.dependent.numeric_value(set)?;
        let companion = self.companion.numeric_value(set)?;
        let (holds, phrase, symbol) = match self.relation {
            Relation::AtMost => (dependent <= companion, "less than or equal to", '>'),
            Relation::AtLeast => (dependent >= companion, "greater than or equal to", '<'),
        };
        if holds {
            return None;
        }
        Some(format!(
            "must be {phrase} {} ({dependent} {symbol} {companion})",
            self.companion
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
