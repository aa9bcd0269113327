//! Owning pipeline wrapper and its terminal operations.

use std::iter::FusedIterator;

use safet_kernel::Optional;

use crate::cache::{BoxedCache, InlineCache};
use crate::cursor::{Cursor, IterCursor};
use crate::filter::Filtered;
use crate::join::{Joined, JoinedSame};
use crate::map::Mapped;

/// Starts a pipeline over `source`.
///
/// The element category follows the source: `&Vec<T>` yields `&T`,
/// `&mut Vec<T>` yields `&mut T`, and `Vec<T>` moves each element out.
///
/// ```
/// use safet_range::range;
///
/// let squares: Vec<i32> = range(vec![1, 2, 3, 4, 5])
///     .filter(|x| *x > 2)
///     .map(|x| x * x)
///     .collect();
/// assert_eq!(squares, [9, 16, 25]);
/// ```
pub fn range<S: IntoIterator>(source: S) -> Range<IterCursor<S::IntoIter>> {
    Range::new(IterCursor::new(source.into_iter()))
}

/// A lazily evaluated sequence built from cursor adaptors.
///
/// Adaptor methods (`filter`, `map`, `join`, ...) consume the range and
/// return a new one; nothing is evaluated until a terminal operation
/// (`fold`, `each`, `collect`, ...) or iteration pulls elements through.
#[derive(Clone, Debug)]
#[must_use = "ranges are lazy and do nothing unless consumed"]
pub struct Range<C> {
    cursor: C,
}

impl<C: Cursor> Range<C> {
    /// Wraps an existing cursor.
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// The predicate borrows each element mutably. Over a `&mut` source it
    /// can write through to the source elements:
    ///
    /// ```
    /// use safet_range::range;
    ///
    /// let mut values = vec![1, 2, 3];
    /// let kept = range(&mut values)
    ///     .filter(|x| {
    ///         **x += 1;
    ///         **x > 2
    ///     })
    ///     .count();
    /// assert_eq!(kept, 2);
    /// assert_eq!(values, [2, 3, 4]);
    /// ```
    pub fn filter<P>(self, predicate: P) -> Range<Filtered<C, P>>
    where
        P: FnMut(&mut C::Item) -> bool,
    {
        Range::new(Filtered::new(self.cursor, predicate))
    }

    /// Transforms every element, caching each result inline.
    pub fn map<U, F>(self, transform: F) -> Range<Mapped<C, F, InlineCache<U>>>
    where
        F: FnMut(C::Item) -> U,
    {
        Range::new(Mapped::new(self.cursor, transform))
    }

    /// Transforms every element, caching each result in a shared heap cell.
    ///
    /// The pipeline stays `Clone` when `U` is not, and copies taken on the
    /// same position share its value.
    pub fn map_boxed<U, F>(self, transform: F) -> Range<Mapped<C, F, BoxedCache<U>>>
    where
        F: FnMut(C::Item) -> U,
    {
        Range::new(Mapped::new(self.cursor, transform))
    }

    /// Appends the elements of `other`, which may be a different pipeline
    /// with the same item type.
    pub fn join<B>(self, other: Range<B>) -> Range<Joined<C, B>>
    where
        B: Cursor<Item = C::Item>,
    {
        Range::new(Joined::new(self.cursor, other.cursor))
    }

    /// Appends the elements of a pipeline of the same type.
    pub fn join_same(self, other: Self) -> Range<JoinedSame<C>> {
        Range::new(JoinedSame::new(self.cursor, other.cursor))
    }

    /// Left fold over every element, starting from `seed`.
    pub fn fold<T, F>(mut self, seed: T, mut f: F) -> T
    where
        F: FnMut(T, C::Item) -> T,
    {
        let mut acc = seed;
        while let Optional::Set(item) = self.cursor.take() {
            acc = f(acc, item);
        }
        acc
    }

    /// Calls `f` on every element in order.
    pub fn each<F>(mut self, mut f: F)
    where
        F: FnMut(C::Item),
    {
        while let Optional::Set(item) = self.cursor.take() {
            f(item);
        }
    }

    /// Materialises the elements into a new container.
    pub fn collect<B>(self) -> B
    where
        B: FromIterator<C::Item>,
    {
        self.into_iter().collect()
    }

    /// Appends the elements to an existing container.
    pub fn collect_into<B>(self, target: &mut B) -> &mut B
    where
        B: Extend<C::Item>,
    {
        target.extend(self);
        target
    }

    /// Number of elements.
    pub fn count(self) -> usize {
        self.fold(0, |n, _| n + 1)
    }

    /// The first element, if any.
    pub fn first(mut self) -> Optional<C::Item> {
        self.cursor.take()
    }

    /// Returns `true` if the range has no elements.
    pub fn is_empty(&mut self) -> bool {
        self.cursor.is_end()
    }

    /// Borrows the underlying cursor.
    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    /// Unwraps the underlying cursor.
    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> IntoIterator for Range<C> {
    type Item = C::Item;
    type IntoIter = RangeIter<C>;

    fn into_iter(self) -> RangeIter<C> {
        RangeIter {
            cursor: self.cursor,
        }
    }
}

/// Iterator draining a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter<C> {
    cursor: C,
}

impl<C: Cursor> Iterator for RangeIter<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        self.cursor.take().into()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<C: Cursor> FusedIterator for RangeIter<C> {}
