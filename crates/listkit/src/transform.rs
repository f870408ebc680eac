//! Ordinal-to-token transforms.
//!
//! A [`Transform`] turns a counter value into the token displayed as an item
//! marker. The builtin set covers arabic numerals, letters, roman numerals and
//! constant bullets; hosts can add their own with [`Transform::custom`].
//!
//! | Transform | 1 | 4 | 26 | Domain |
//! |-----------|---|---|----|--------|
//! | `Arabic` | `1` | `4` | `26` | any integer |
//! | `AlphaLower` | `a` | `d` | `z` | 1..=26 |
//! | `AlphaUpper` | `A` | `D` | `Z` | 1..=26 |
//! | `RomanLower` | `i` | `iv` | `xxvi` | 1..=3999 |
//! | `RomanUpper` | `I` | `IV` | `XXVI` | 1..=3999 |
//! | `Literal("•")` | `•` | `•` | `•` | ignored |

use std::fmt;
use std::sync::Arc;

use crate::error::{ListError, Result};

/// Largest value expressible in classical roman numerals.
pub const ROMAN_MAX: i64 = 3999;

/// Number of letters available to the alphabetic transforms.
pub const ALPHA_MAX: i64 = 26;

const ROMAN_TABLE: &[(i64, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

type TransformFn = dyn Fn(i64) -> Result<String> + Send + Sync;

/// Maps an ordinal to a display token.
#[derive(Clone)]
pub enum Transform {
    /// Base-10 digits of the ordinal.
    Arabic,
    /// `a`..`z`.
    AlphaLower,
    /// `A`..`Z`.
    AlphaUpper,
    /// `i`, `ii`, `iii`, `iv`, ...
    RomanLower,
    /// `I`, `II`, `III`, `IV`, ...
    RomanUpper,
    /// A fixed symbol; the ordinal is ignored.
    Literal(String),
    /// Host-defined numbering scheme.
    Custom { name: String, func: Arc<TransformFn> },
}

impl Transform {
    /// Creates a constant-marker transform.
    pub fn literal(symbol: impl Into<String>) -> Self {
        Transform::Literal(symbol.into())
    }

    /// Creates a transform from a closure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use listkit::Transform;
    ///
    /// let doubled = Transform::custom("doubled", |n| Ok((n * 2).to_string()));
    /// assert_eq!(doubled.apply(3).unwrap(), "6");
    /// ```
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(i64) -> Result<String> + Send + Sync + 'static,
    {
        Transform::Custom {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Looks up a builtin numeric transform by its catalog name.
    ///
    /// Names are case-sensitive: `alpha`/`roman` are lower case, `Alpha`/`Roman`
    /// upper case. `identity` is accepted as a synonym for `arabic`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "arabic" | "identity" => Some(Transform::Arabic),
            "alpha" => Some(Transform::AlphaLower),
            "Alpha" => Some(Transform::AlphaUpper),
            "roman" => Some(Transform::RomanLower),
            "Roman" => Some(Transform::RomanUpper),
            _ => None,
        }
    }

    /// Returns the catalog name of this transform.
    pub fn name(&self) -> &str {
        match self {
            Transform::Arabic => "arabic",
            Transform::AlphaLower => "alpha",
            Transform::AlphaUpper => "Alpha",
            Transform::RomanLower => "roman",
            Transform::RomanUpper => "Roman",
            Transform::Literal(_) => "literal",
            Transform::Custom { name, .. } => name,
        }
    }

    /// Returns true if the token does not depend on the ordinal.
    pub fn ignores_ordinal(&self) -> bool {
        matches!(self, Transform::Literal(_))
    }

    /// Converts `ordinal` into its display token.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::TransformRange`] when the ordinal is outside the
    /// transform's domain (letters past 26, roman numerals outside 1..=3999).
    pub fn apply(&self, ordinal: i64) -> Result<String> {
        match self {
            Transform::Arabic => Ok(ordinal.to_string()),
            Transform::AlphaLower => self.alpha(ordinal, b'a'),
            Transform::AlphaUpper => self.alpha(ordinal, b'A'),
            Transform::RomanLower => self.roman(ordinal).map(|s| s.to_ascii_lowercase()),
            Transform::RomanUpper => self.roman(ordinal),
            Transform::Literal(symbol) => Ok(symbol.clone()),
            Transform::Custom { func, .. } => func(ordinal),
        }
    }

    fn alpha(&self, ordinal: i64, base: u8) -> Result<String> {
        if !(1..=ALPHA_MAX).contains(&ordinal) {
            return Err(self.out_of_range(ordinal));
        }
        Ok(char::from(base + (ordinal - 1) as u8).to_string())
    }

    fn roman(&self, ordinal: i64) -> Result<String> {
        to_roman(ordinal).ok_or_else(|| self.out_of_range(ordinal))
    }

    fn out_of_range(&self, ordinal: i64) -> ListError {
        ListError::TransformRange {
            transform: self.name().to_string(),
            ordinal,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Literal(symbol) => f.debug_tuple("Literal").field(symbol).finish(),
            Transform::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// Converts a value in 1..=3999 into upper-case roman numerals.
///
/// Uses standard subtractive notation (`IV`, `IX`, `XL`, `XC`, `CD`, `CM`).
/// Returns `None` outside the classical range.
///
/// ```rust
/// use listkit::to_roman;
///
/// assert_eq!(to_roman(1994).as_deref(), Some("MCMXCIV"));
/// assert_eq!(to_roman(0), None);
/// ```
pub fn to_roman(mut value: i64) -> Option<String> {
    if !(1..=ROMAN_MAX).contains(&value) {
        return None;
    }
    let mut out = String::new();
    for &(amount, numeral) in ROMAN_TABLE {
        while value >= amount {
            out.push_str(numeral);
            value -= amount;
        }
    }
    Some(out)
}
