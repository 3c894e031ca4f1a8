//! Dynamic values for the shell
//!
//! The shell binds iterables over loosely typed literals. `Value` covers the
//! primitive literal kinds and prints them the way a JS console inspects
//! them: strings quoted, integral numbers without a fractional part.

use std::fmt;

/// Magnitudes from here up print in exponent notation
const MAX_PLAIN: f64 = 1e21;

/// Magnitudes below this print in exponent notation
const MIN_PLAIN: f64 = 1e-6;

/// A primitive literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Create a number value
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a string value
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Write a number in console notation.
///
/// Magnitudes in `[1e-6, 1e21)` print as plain decimals, everything else as
/// shortest-digits exponent form with a signed exponent (`1e+300`, `1e-7`).
pub fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let magnitude = n.abs();
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        write!(f, "{}", if n.is_sign_negative() { "-0" } else { "0" })
    } else if !(MIN_PLAIN..MAX_PLAIN).contains(&magnitude) {
        let sci = format!("{:e}", n);
        match sci.split_once('e') {
            Some((digits, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", digits, exp),
            _ => write!(f, "{}", sci),
        }
    } else if n.fract() == 0.0 {
        write!(f, "{}", n as i128)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => fmt_number(f, *n),
            Value::String(s) => {
                write!(f, "'")?;
                for c in s.chars() {
                    match c {
                        '\'' => write!(f, "\\'")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "'")
            }
        }
    }
}

/// Console rendering of an array: `[ 1, 'a' ]`, or `[]` when empty.
pub struct ArrayDisplay<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for ArrayDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "[]");
        }
        write!(f, "[ ")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, " ]")
    }
}
