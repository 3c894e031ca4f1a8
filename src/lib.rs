//! iterproto - a pull-based iteration protocol
//!
//! The protocol has two halves:
//! - an **iterable** hands out fresh iterators (`Iterable::obtain_iterator`)
//! - an **iterator** owns a private cursor and produces one result record per
//!   `advance` call, ending in a sticky terminal record
//!
//! Arrays (`ArrayIterable`, slices, `Vec`), strings and the insertion-ordered
//! `MapIterable` are all iterable.
//!
//! Protocol iterators also implement `std::iter::Iterator`, so they plug into
//! `for` loops and `collect` directly.
//!
//! # Example
//! ```
//! use iterproto::{ArrayIterable, IterResult, IteratorProtocol};
//!
//! let data = ArrayIterable::from([10, 20, 30]);
//! let mut it = data.obtain_iterator();
//!
//! assert_eq!(it.advance(), IterResult::Yield(&10));
//! assert_eq!(it.advance(), IterResult::Yield(&20));
//! assert_eq!(it.advance(), IterResult::Yield(&30));
//! assert_eq!(it.advance(), IterResult::Done);
//! assert_eq!(it.advance(), IterResult::Done);
//! ```
//!
//! # Caveat
//! Borrowing iterators keep their sequence frozen for as long as they live.
//! The detached `Cursor` does not; stepping it over a sequence other than the
//! one it started on gives unspecified results.

// Core protocol
pub mod iterable;
pub mod iterator;
pub mod map;
pub mod result;

// Shell support
pub mod shell;
pub mod value;

// Re-export main types
pub use iterable::{ArrayIterable, Iterable};
pub use iterator::{CodePoints, Cursor, Entries, ForOf, IteratorProtocol, Keys, ProtocolAdapter, State, Values};
pub use map::{MapEntries, MapIterable, MapKeys, MapValues};
pub use result::IterResult;
pub use value::Value;
