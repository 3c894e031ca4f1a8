//! Iterator result records
//!
//! Every advance of a protocol iterator produces an `IterResult`: either a
//! produced value (`done: false`) or the terminal record (`done: true`, no
//! value). The enum makes "done with a value" unrepresentable.

use std::fmt;

/// The `(value, done)` record returned by `IteratorProtocol::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterResult<T> {
    /// A produced element (`done: false`)
    Yield(T),
    /// Exhaustion (`done: true`, value absent)
    Done,
}

impl<T> IterResult<T> {
    /// The `done` flag of the record
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, IterResult::Done)
    }

    /// Borrow the value, `None` for the terminal record
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            IterResult::Yield(v) => Some(v),
            IterResult::Done => None,
        }
    }

    /// Convert into the `Option` shape used by `std::iter::Iterator::next`
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            IterResult::Yield(v) => Some(v),
            IterResult::Done => None,
        }
    }

    /// Map the produced value, leaving the terminal record untouched
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> IterResult<U> {
        match self {
            IterResult::Yield(v) => IterResult::Yield(f(v)),
            IterResult::Done => IterResult::Done,
        }
    }
}

impl<T> From<Option<T>> for IterResult<T> {
    #[inline]
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => IterResult::Yield(v),
            None => IterResult::Done,
        }
    }
}

impl<T> From<IterResult<T>> for Option<T> {
    #[inline]
    fn from(res: IterResult<T>) -> Self {
        res.into_option()
    }
}

/// Prints the record the way a JS console shows `{ value, done }` objects.
impl<T: fmt::Display> fmt::Display for IterResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterResult::Yield(v) => write!(f, "{{ value: {}, done: false }}", v),
            IterResult::Done => write!(f, "{{ value: undefined, done: true }}"),
        }
    }
}
