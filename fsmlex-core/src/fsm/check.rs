//! 转移条件
//!
//! A [`CharCheck`] decides whether one input character admits a transition.
//! [`TransitionCheck`] pairs it with an optional precondition over the text
//! accumulated so far in the current scan attempt.

use std::fmt;
use std::sync::Arc;

/// Guard over the value accumulated in the current attempt
pub type Precondition = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Free-form character predicate
pub type CharPredicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// Character-level admissibility test
#[derive(Clone)]
pub enum CharCheck {
    /// Exactly this character
    Char(char),
    /// Any character of the set
    Set(Vec<char>),
    /// Inclusive range
    Range(char, char),
    /// Every character
    Any,
    /// Negation of the inner check
    Not(Box<CharCheck>),
    /// At least one inner check matches
    AnyOf(Vec<CharCheck>),
    /// Every inner check matches
    AllOf(Vec<CharCheck>),
    /// Custom predicate
    Predicate(CharPredicate),
}

impl CharCheck {
    pub fn matches(&self, c: char) -> bool {
        match self {
            CharCheck::Char(expected) => c == *expected,
            CharCheck::Set(chars) => chars.contains(&c),
            CharCheck::Range(lo, hi) => (*lo..=*hi).contains(&c),
            CharCheck::Any => true,
            CharCheck::Not(inner) => !inner.matches(c),
            CharCheck::AnyOf(checks) => checks.iter().any(|check| check.matches(c)),
            CharCheck::AllOf(checks) => checks.iter().all(|check| check.matches(c)),
            CharCheck::Predicate(predicate) => predicate(c),
        }
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        CharCheck::Predicate(Arc::new(f))
    }

    pub fn negate(self) -> Self {
        match self {
            CharCheck::Not(inner) => *inner,
            other => CharCheck::Not(Box::new(other)),
        }
    }
}

impl fmt::Debug for CharCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharCheck::Char(c) => f.debug_tuple("Char").field(c).finish(),
            CharCheck::Set(chars) => f.debug_tuple("Set").field(chars).finish(),
            CharCheck::Range(lo, hi) => f.debug_tuple("Range").field(lo).field(hi).finish(),
            CharCheck::Any => write!(f, "Any"),
            CharCheck::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            CharCheck::AnyOf(checks) => f.debug_tuple("AnyOf").field(checks).finish(),
            CharCheck::AllOf(checks) => f.debug_tuple("AllOf").field(checks).finish(),
            CharCheck::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl fmt::Display for CharCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharCheck::Char(c) => write!(f, "{:?}", c),
            CharCheck::Set(chars) => {
                write!(f, "[")?;
                for c in chars {
                    write!(f, "{}", c.escape_debug())?;
                }
                write!(f, "]")
            }
            CharCheck::Range(lo, hi) => write!(f, "[{}-{}]", lo.escape_debug(), hi.escape_debug()),
            CharCheck::Any => write!(f, "."),
            CharCheck::Not(inner) => write!(f, "!{}", inner),
            CharCheck::AnyOf(checks) => write_joined(f, checks, " | "),
            CharCheck::AllOf(checks) => write_joined(f, checks, " & "),
            CharCheck::Predicate(_) => write!(f, "<predicate>"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, checks: &[CharCheck], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, check) in checks.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", check)?;
    }
    write!(f, ")")
}

/// A [`CharCheck`] optionally gated by a precondition on the accumulated value
#[derive(Clone)]
pub struct TransitionCheck {
    check: CharCheck,
    precondition: Option<Precondition>,
}

impl TransitionCheck {
    pub fn new(check: CharCheck) -> Self {
        Self {
            check,
            precondition: None,
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(CharCheck::Char(c))
    }

    pub fn set<I: IntoIterator<Item = char>>(chars: I) -> Self {
        Self::new(CharCheck::Set(chars.into_iter().collect()))
    }

    pub fn range(lo: char, hi: char) -> Self {
        Self::new(CharCheck::Range(lo, hi))
    }

    pub fn any() -> Self {
        Self::new(CharCheck::Any)
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self::new(CharCheck::predicate(f))
    }

    /// Negate the character test. The precondition is kept as is.
    pub fn negate(self) -> Self {
        Self {
            check: self.check.negate(),
            precondition: self.precondition,
        }
    }

    pub fn with_precondition<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.precondition = Some(Arc::new(f));
        self
    }

    pub fn char_check(&self) -> &CharCheck {
        &self.check
    }

    pub fn has_precondition(&self) -> bool {
        self.precondition.is_some()
    }

    /// Character-only test, ignores the precondition
    pub fn matches(&self, c: char) -> bool {
        self.check.matches(c)
    }

    /// Value-aware test used by the run loop.
    ///
    /// The character test is skipped when the precondition rejects `value`.
    pub fn check(&self, c: char, value: &str) -> bool {
        if let Some(precondition) = &self.precondition {
            if !precondition(value) {
                return false;
            }
        }
        self.check.matches(c)
    }
}

impl From<CharCheck> for TransitionCheck {
    fn from(check: CharCheck) -> Self {
        Self::new(check)
    }
}

impl From<char> for TransitionCheck {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl fmt::Debug for TransitionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionCheck")
            .field("check", &self.check)
            .field("precondition", &self.precondition.is_some())
            .finish()
    }
}

impl fmt::Display for TransitionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precondition.is_some() {
            write!(f, "[?] ")?;
        }
        write!(f, "{}", self.check)
    }
}
