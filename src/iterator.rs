//! Protocol iterators
//!
//! An iterator here is a small struct owning a private cursor plus a borrow
//! of the backing sequence. Each call to `advance` yields the next element
//! or the terminal record.
//!
//! # Cursor states
//! - `Active(i)`: the next advance reads index `i`
//! - `Exhausted`: the terminal record has been produced; every further
//!   advance produces it again
//!
//! `Active(len)` is reachable: after the last element has been produced the
//! cursor still reports `Active(len)` until the next advance observes the end.

use std::iter::{Fuse, FusedIterator};

use crate::result::IterResult;

/// Position of a cursor in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Next advance reads this index
    Active(usize),
    /// Terminal, self-looping
    Exhausted,
}

/// The advancing half of the iteration protocol.
///
/// Implementors must keep the terminal state sticky: once `advance` has
/// returned `IterResult::Done`, every later call returns `Done` too.
pub trait IteratorProtocol {
    /// Type of the produced values
    type Item;

    /// Produce the next result record
    fn advance(&mut self) -> IterResult<Self::Item>;

    /// Consume this iterator with `for`/`collect`, the way a for..of loop
    /// drives `next()` until `done`.
    #[inline]
    fn for_of(self) -> ForOf<Self>
    where
        Self: Sized,
    {
        ForOf { inner: self }
    }
}

impl<I: IteratorProtocol + ?Sized> IteratorProtocol for &mut I {
    type Item = I::Item;

    #[inline]
    fn advance(&mut self) -> IterResult<Self::Item> {
        (**self).advance()
    }
}

/// Detached cursor over an ordered sequence.
///
/// The cursor does not hold the sequence; every `step` is given the slice to
/// read from. Stepping one cursor over different slices has no defined
/// meaning: callers must always pass the sequence the cursor was started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Index of the next element to produce; never decreases
    index: usize,
    /// Set once the terminal record has been produced
    exhausted: bool,
}

impl Cursor {
    /// A cursor in state `Active(0)`
    #[inline]
    pub const fn new() -> Self {
        Cursor {
            index: 0,
            exhausted: false,
        }
    }

    /// Current state
    #[inline]
    pub const fn state(&self) -> State {
        if self.exhausted {
            State::Exhausted
        } else {
            State::Active(self.index)
        }
    }

    /// Number of elements produced so far
    #[inline]
    pub const fn position(&self) -> usize {
        self.index
    }

    /// Whether the terminal record has been produced
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Elements still to come from a sequence of length `len`
    #[inline]
    pub const fn remaining(&self, len: usize) -> usize {
        if self.exhausted {
            0
        } else {
            len.saturating_sub(self.index)
        }
    }

    /// Advance over `seq`, yielding `(index, element)` or the terminal record.
    #[inline]
    pub fn step<'a, T>(&mut self, seq: &'a [T]) -> IterResult<(usize, &'a T)> {
        if self.exhausted {
            return IterResult::Done;
        }

        match seq.get(self.index) {
            Some(value) => {
                let index = self.index;
                self.index += 1;
                IterResult::Yield((index, value))
            }
            None => self.finish(),
        }
    }

    /// Advance over the code points of `text`.
    ///
    /// For text the index is a byte offset: each step moves it past the
    /// UTF-8 encoding of the produced `char`.
    #[inline]
    pub fn step_char(&mut self, text: &str) -> IterResult<(usize, char)> {
        if self.exhausted {
            return IterResult::Done;
        }

        match text.get(self.index..).and_then(|rest| rest.chars().next()) {
            Some(c) => {
                let offset = self.index;
                self.index += c.len_utf8();
                IterResult::Yield((offset, c))
            }
            None => self.finish(),
        }
    }

    fn finish<U>(&mut self) -> IterResult<U> {
        self.exhausted = true;
        tracing::trace!(position = self.index, "cursor exhausted");
        IterResult::Done
    }
}

// Shared std plumbing: `next` forwards to `advance`, and the remaining count
// comes straight from the cursor, so the size hint is exact.
macro_rules! impl_std_iterator {
    ($name:ident, $item:ty) => {
        impl<'a, T> Iterator for $name<'a, T> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.advance().into_option()
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                let n = self.cursor.remaining(self.seq.len());
                (n, Some(n))
            }
        }

        impl<'a, T> ExactSizeIterator for $name<'a, T> {}

        impl<'a, T> FusedIterator for $name<'a, T> {}

        impl<'a, T> $name<'a, T> {
            /// Start a fresh iterator at index 0 of `seq`
            #[inline]
            pub fn new(seq: &'a [T]) -> Self {
                $name {
                    seq,
                    cursor: Cursor::new(),
                }
            }

            /// The iterator's cursor (state and position)
            #[inline]
            pub fn cursor(&self) -> Cursor {
                self.cursor
            }
        }
    };
}

/// Iterator over the elements of a sequence (the default iterator).
#[derive(Debug, Clone)]
pub struct Values<'a, T> {
    seq: &'a [T],
    cursor: Cursor,
}

impl<'a, T> IteratorProtocol for Values<'a, T> {
    type Item = &'a T;

    #[inline]
    fn advance(&mut self) -> IterResult<&'a T> {
        self.cursor.step(self.seq).map(|(_, value)| value)
    }
}

impl_std_iterator!(Values, &'a T);

/// Iterator over the indices of a sequence.
#[derive(Debug, Clone)]
pub struct Keys<'a, T> {
    seq: &'a [T],
    cursor: Cursor,
}

impl<'a, T> IteratorProtocol for Keys<'a, T> {
    type Item = usize;

    #[inline]
    fn advance(&mut self) -> IterResult<usize> {
        self.cursor.step(self.seq).map(|(index, _)| index)
    }
}

impl_std_iterator!(Keys, usize);

/// Iterator over `(index, element)` pairs of a sequence.
#[derive(Debug, Clone)]
pub struct Entries<'a, T> {
    seq: &'a [T],
    cursor: Cursor,
}

impl<'a, T> IteratorProtocol for Entries<'a, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn advance(&mut self) -> IterResult<(usize, &'a T)> {
        self.cursor.step(self.seq)
    }
}

impl_std_iterator!(Entries, (usize, &'a T));

/// Iterator over the code points of a string.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    text: &'a str,
    cursor: Cursor,
}

impl<'a> CodePoints<'a> {
    /// Start at the first code point of `text`
    #[inline]
    pub fn new(text: &'a str) -> Self {
        CodePoints {
            text,
            cursor: Cursor::new(),
        }
    }

    /// The iterator's cursor; its position is a byte offset
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl IteratorProtocol for CodePoints<'_> {
    type Item = char;

    #[inline]
    fn advance(&mut self) -> IterResult<char> {
        self.cursor.step_char(self.text).map(|(_, c)| c)
    }
}

impl Iterator for CodePoints<'_> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        self.advance().into_option()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let bytes = self.cursor.remaining(self.text.len());
        (bytes.div_ceil(4), Some(bytes))
    }
}

impl FusedIterator for CodePoints<'_> {}

/// Drives any `IteratorProtocol` as a `std::iter::Iterator`.
#[derive(Debug, Clone)]
pub struct ForOf<I> {
    inner: I,
}

impl<I> ForOf<I> {
    /// Recover the wrapped protocol iterator
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: IteratorProtocol> Iterator for ForOf<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.advance().into_option()
    }
}

/// Exposes any `std::iter::Iterator` through the advance protocol.
///
/// The inner iterator is fused, so the terminal record stays sticky even
/// for iterators that would resume after returning `None`.
#[derive(Debug, Clone)]
pub struct ProtocolAdapter<I> {
    inner: Fuse<I>,
}

impl<I: Iterator> ProtocolAdapter<I> {
    /// Wrap a std iterator
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        ProtocolAdapter {
            inner: iter.into_iter().fuse(),
        }
    }
}

impl<I: Iterator> IteratorProtocol for ProtocolAdapter<I> {
    type Item = I::Item;

    #[inline]
    fn advance(&mut self) -> IterResult<I::Item> {
        self.inner.next().into()
    }
}
