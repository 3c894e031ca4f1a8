//! Keyed iterables
//!
//! `MapIterable` is an insertion-ordered key/value collection. Its default
//! iterator yields `(key, value)` entries; `keys` and `values` give the two
//! projections. All three walk the same dense entry table with a `Cursor`, so
//! they share the state machine of the sequence iterators.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::iterable::Iterable;
use crate::iterator::{Cursor, IteratorProtocol};
use crate::result::IterResult;

/// An immutable map that iterates in insertion order.
///
/// A key inserted twice keeps the position of its first insertion and the
/// value of its last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapIterable<K, V> {
    /// Entries in insertion order, keys unique
    entries: Box<[(K, V)]>,
}

impl<K: Eq + Hash, V> MapIterable<K, V> {
    /// Build from `(key, value)` pairs.
    pub fn new<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut table: HashMap<K, (usize, V)> = HashMap::new();
        for (key, value) in pairs {
            let next = table.len();
            match table.entry(key) {
                Entry::Occupied(mut slot) => slot.get_mut().1 = value,
                Entry::Vacant(slot) => {
                    slot.insert((next, value));
                }
            }
        }

        let mut ordered: Vec<(usize, K, V)> = table
            .into_iter()
            .map(|(key, (position, value))| (position, key, value))
            .collect();
        ordered.sort_unstable_by_key(|(position, _, _)| *position);

        MapIterable {
            entries: ordered.into_iter().map(|(_, k, v)| (k, v)).collect(),
        }
    }

    /// Value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| K::borrow(k) == key)
            .map(|(_, v)| v)
    }

    /// Check if `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K, V> MapIterable<K, V> {
    /// Number of distinct keys
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default iterator; same as `entries()`
    #[inline]
    pub fn obtain_iterator(&self) -> MapEntries<'_, K, V> {
        MapEntries::new(&self.entries)
    }

    /// Iterator over the keys in insertion order
    #[inline]
    pub fn keys(&self) -> MapKeys<'_, K, V> {
        MapKeys::new(&self.entries)
    }

    /// Iterator over the values in insertion order
    #[inline]
    pub fn values(&self) -> MapValues<'_, K, V> {
        MapValues::new(&self.entries)
    }

    /// Iterator over `(key, value)` pairs in insertion order
    #[inline]
    pub fn entries(&self) -> MapEntries<'_, K, V> {
        MapEntries::new(&self.entries)
    }
}

impl<K, V> Default for MapIterable<K, V> {
    fn default() -> Self {
        MapIterable {
            entries: Box::default(),
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for MapIterable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapIterable::new(iter)
    }
}

impl<K: Eq + Hash, V, const N: usize> From<[(K, V); N]> for MapIterable<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        MapIterable::new(pairs)
    }
}

impl<K, V> Iterable for MapIterable<K, V> {
    type Iter<'a>
        = MapEntries<'a, K, V>
    where
        Self: 'a;

    #[inline]
    fn obtain_iterator(&self) -> MapEntries<'_, K, V> {
        MapIterable::obtain_iterator(self)
    }
}

impl<'a, K, V> IntoIterator for &'a MapIterable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapEntries<'a, K, V>;

    #[inline]
    fn into_iter(self) -> MapEntries<'a, K, V> {
        self.entries()
    }
}

macro_rules! map_iterator {
    ($(#[$doc:meta])* $name:ident, $item:ty, |$k:ident, $v:ident| $project:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name<'a, K, V> {
            seq: &'a [(K, V)],
            cursor: Cursor,
        }

        impl<'a, K, V> $name<'a, K, V> {
            /// Start at the first entry of `seq`
            #[inline]
            pub fn new(seq: &'a [(K, V)]) -> Self {
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

        impl<'a, K, V> IteratorProtocol for $name<'a, K, V> {
            type Item = $item;

            #[inline]
            fn advance(&mut self) -> IterResult<$item> {
                self.cursor.step(self.seq).map(|(_, ($k, $v))| $project)
            }
        }

        impl<'a, K, V> Iterator for $name<'a, K, V> {
            type Item = $item;

            #[inline]
            fn next(&mut self) -> Option<$item> {
                self.advance().into_option()
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                let n = self.cursor.remaining(self.seq.len());
                (n, Some(n))
            }
        }

        impl<'a, K, V> ExactSizeIterator for $name<'a, K, V> {}

        impl<'a, K, V> FusedIterator for $name<'a, K, V> {}
    };
}

map_iterator!(
    /// Iterator over the keys of a map.
    MapKeys, &'a K, |k, _v| k
);
map_iterator!(
    /// Iterator over the values of a map.
    MapValues, &'a V, |_k, v| v
);
map_iterator!(
    /// Iterator over the entries of a map (the default iterator).
    MapEntries, (&'a K, &'a V), |k, v| (k, v)
);
