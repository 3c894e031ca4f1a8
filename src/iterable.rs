//! Iterables
//!
//! An iterable is anything that can hand out fresh protocol iterators over
//! its data. `ArrayIterable` is the dense, fixed-at-construction sequence
//! wrapper; slices and vectors are iterable as well, and strings iterate
//! their code points. Keyed collections live in `map`.

use std::ops::Index;

use crate::iterator::{CodePoints, Entries, IteratorProtocol, Keys, Values};

/// Capability to produce independent iterators.
///
/// Each call to `obtain_iterator` returns an iterator positioned at the
/// start, regardless of how far previously obtained iterators have gone.
pub trait Iterable {
    /// The iterator type handed out for a borrow of `self`
    type Iter<'a>: IteratorProtocol
    where
        Self: 'a;

    /// Return a new iterator starting at position 0
    fn obtain_iterator(&self) -> Self::Iter<'_>;
}

impl<T> Iterable for [T] {
    type Iter<'a>
        = Values<'a, T>
    where
        Self: 'a;

    #[inline]
    fn obtain_iterator(&self) -> Values<'_, T> {
        Values::new(self)
    }
}

impl<T> Iterable for Vec<T> {
    type Iter<'a>
        = Values<'a, T>
    where
        Self: 'a;

    #[inline]
    fn obtain_iterator(&self) -> Values<'_, T> {
        Values::new(self.as_slice())
    }
}

impl Iterable for str {
    type Iter<'a>
        = CodePoints<'a>
    where
        Self: 'a;

    #[inline]
    fn obtain_iterator(&self) -> CodePoints<'_> {
        CodePoints::new(self)
    }
}

impl Iterable for String {
    type Iter<'a>
        = CodePoints<'a>
    where
        Self: 'a;

    #[inline]
    fn obtain_iterator(&self) -> CodePoints<'_> {
        CodePoints::new(self.as_str())
    }
}

/// An immutable ordered sequence that acts as an iterator factory.
///
/// The elements are fixed when the iterable is built. Iterators borrow the
/// storage, so the sequence cannot change while any of them is alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ArrayIterable<T> {
    /// Element storage
    elements: Box<[T]>,
}

impl<T> ArrayIterable<T> {
    /// Wrap a sequence. Any length is accepted, including zero.
    pub fn new(sequence: Vec<T>) -> Self {
        ArrayIterable {
            elements: sequence.into_boxed_slice(),
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if there are no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`, if in range
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// The backing sequence
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Default iterator; same as `values()`
    #[inline]
    pub fn obtain_iterator(&self) -> Values<'_, T> {
        Values::new(&self.elements)
    }

    /// Iterator over the elements
    #[inline]
    pub fn values(&self) -> Values<'_, T> {
        Values::new(&self.elements)
    }

    /// Iterator over the indices `0..len`
    #[inline]
    pub fn keys(&self) -> Keys<'_, T> {
        Keys::new(&self.elements)
    }

    /// Iterator over `(index, element)` pairs
    #[inline]
    pub fn entries(&self) -> Entries<'_, T> {
        Entries::new(&self.elements)
    }
}

impl<T> Iterable for ArrayIterable<T> {
    type Iter<'a>
        = Values<'a, T>
    where
        Self: 'a;

    #[inline]
    fn obtain_iterator(&self) -> Values<'_, T> {
        ArrayIterable::obtain_iterator(self)
    }
}

impl<T> From<Vec<T>> for ArrayIterable<T> {
    fn from(values: Vec<T>) -> Self {
        ArrayIterable::new(values)
    }
}

impl<T: Clone> From<&[T]> for ArrayIterable<T> {
    fn from(values: &[T]) -> Self {
        ArrayIterable {
            elements: values.into(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for ArrayIterable<T> {
    fn from(values: [T; N]) -> Self {
        ArrayIterable::new(Vec::from(values))
    }
}

impl<T> FromIterator<T> for ArrayIterable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ArrayIterable::new(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for ArrayIterable<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<'a, T> IntoIterator for &'a ArrayIterable<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T>;

    #[inline]
    fn into_iter(self) -> Values<'a, T> {
        self.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::IterResult;

    #[test]
    fn test_new_and_access() {
        let it = ArrayIterable::new(vec![1, 2, 3]);
        assert_eq!(it.len(), 3);
        assert!(!it.is_empty());
        assert_eq!(it.get(1), Some(&2));
        assert_eq!(it.get(3), None);
        assert_eq!(it[2], 3);
        assert_eq!(it.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_empty_is_valid() {
        let it: ArrayIterable<i32> = ArrayIterable::new(Vec::new());
        assert!(it.is_empty());
        assert_eq!(it.obtain_iterator().advance(), IterResult::Done);
    }

    #[test]
    fn test_fresh_iterators_start_at_zero() {
        let data = ArrayIterable::from([1, 2, 3]);

        let mut first = data.obtain_iterator();
        first.advance();
        first.advance();

        let mut second = data.obtain_iterator();
        assert_eq!(second.advance(), IterResult::Yield(&1));
        assert_eq!(first.advance(), IterResult::Yield(&3));
    }

    #[test]
    fn test_for_loop_and_spread() {
        let data: ArrayIterable<i32> = (1..=4).collect();

        let mut sum = 0;
        for x in &data {
            sum += x;
        }
        assert_eq!(sum, 10);

        let spread: Vec<i32> = data.values().copied().collect();
        assert_eq!(spread, [1, 2, 3, 4]);
    }

    #[test]
    fn test_generic_over_iterables() {
        fn first<I: Iterable + ?Sized>(source: &I) -> bool {
            !source.obtain_iterator().advance().is_done()
        }

        let v = vec!['a'];
        let empty: &[char] = &[];
        assert!(first(&v));
        assert!(first(v.as_slice()));
        assert!(!first(empty));
        assert!(first(&ArrayIterable::from(v.as_slice())));
    }

    #[test]
    fn test_strings_iterate_code_points() {
        let word = String::from("día");
        let mut it = word.obtain_iterator();
        assert_eq!(it.advance(), IterResult::Yield('d'));
        assert_eq!(it.advance(), IterResult::Yield('í'));
        assert_eq!(it.advance(), IterResult::Yield('a'));
        assert_eq!(it.advance(), IterResult::Done);

        let spread: Vec<char> = "日本".obtain_iterator().collect();
        assert_eq!(spread, ['日', '本']);
        assert!(first_is_done(""));
    }

    fn first_is_done<I: Iterable + ?Sized>(source: &I) -> bool {
        source.obtain_iterator().advance().is_done()
    }
}
