//! Safet Range - lazy cursor pipelines
//!
//! Pipelines are built from cursors: positions in a sequence whose current
//! element can be dereferenced repeatedly without recomputation. Adaptors
//! compose by value and nothing runs until a terminal operation pulls
//! elements through.
//!
//! # Overview
//!
//! - [`range`] starts a pipeline from anything iterable
//! - [`Range::filter`], [`Range::map`], [`Range::map_boxed`], [`Range::join`]
//!   and [`Range::join_same`] add lazy stages
//! - [`Range::fold`], [`Range::each`], [`Range::collect`] and friends consume it
//!
//! Each stage that computes its element keeps it in a [`ValueCache`], so a
//! transform or predicate runs at most once per position. Cloning a pipeline
//! copies its inline caches, while copies of a [`BoxedCache`] position share
//! one value.
//!
//! ```
//! use safet_range::range;
//!
//! let total = range(vec![1, 2])
//!     .join(range(vec![3, 4]))
//!     .fold(0, |acc, x| acc + x);
//! assert_eq!(total, 10);
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod cursor;
pub mod filter;
pub mod join;
pub mod map;
pub mod range;

pub use cache::{BoxedCache, InlineCache, ValueCache};
pub use cursor::{Cursor, IterCursor};
pub use filter::Filtered;
pub use join::{Joined, JoinedCurrent, JoinedSame};
pub use map::Mapped;
pub use range::{range, Range, RangeIter};
