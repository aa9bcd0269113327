//! Cursor abstraction and the iterator-backed source cursor.
//!
//! A cursor is a position in a lazily evaluated sequence. It is either on an
//! element or at the end. Unlike `Iterator::next`, dereferencing the current
//! element ([`Cursor::current`]) does not move the cursor and may be repeated;
//! adaptors cache whatever they compute so repeated dereferences of the same
//! position do the work once.

use std::fmt;
use std::iter::Fuse;
use std::ops::DerefMut;

use safet_kernel::Optional;

use crate::cache::{InlineCache, ValueCache};

/// A position in a lazy sequence.
pub trait Cursor {
    /// Element type produced at each position.
    type Item;

    /// Borrow of the current element handed out by [`current`](Self::current).
    ///
    /// Plain `&mut Item` for cursors that own their element, a runtime-checked
    /// guard for cursors whose element lives in a shared cell.
    type Current<'a>: DerefMut<Target = Self::Item>
    where
        Self: 'a;

    /// Borrows the element at the current position, `Unset` at the end.
    ///
    /// The element is computed at most once per position.
    fn current(&mut self) -> Optional<Self::Current<'_>>;

    /// Moves to the next position. No effect at the end.
    fn advance(&mut self);

    /// Moves the current element out and advances past it.
    fn take(&mut self) -> Optional<Self::Item>;

    /// Returns `true` once no element is left.
    fn is_end(&mut self) -> bool {
        self.current().is_empty()
    }

    /// Bounds on the number of remaining elements, as for
    /// [`Iterator::size_hint`].
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// Cursor over any iterator, looking ahead by at most one element.
pub struct IterCursor<I: Iterator> {
    iter: Fuse<I>,
    lookahead: InlineCache<I::Item>,
}

impl<I: Iterator> IterCursor<I> {
    /// Wraps `iter`. Nothing is pulled until the first dereference.
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            lookahead: InlineCache::default(),
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;
    type Current<'a> = &'a mut I::Item where Self: 'a;

    fn current(&mut self) -> Optional<&mut I::Item> {
        let Self { iter, lookahead } = self;
        lookahead.try_get_or_instantiate(|| iter.next().into())
    }

    fn advance(&mut self) {
        if self.lookahead.take().is_empty() {
            self.iter.next();
        }
    }

    fn take(&mut self) -> Optional<I::Item> {
        let iter = &mut self.iter;
        self.lookahead.take().or_else(|| iter.next().into())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let cached = usize::from(!self.lookahead.is_empty());
        let (low, high) = self.iter.size_hint();
        (
            low.saturating_add(cached),
            high.and_then(|high| high.checked_add(cached)),
        )
    }
}

impl<I> Clone for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            lookahead: self.lookahead.clone(),
        }
    }
}

impl<I> fmt::Debug for IterCursor<I>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterCursor")
            .field("iter", &self.iter)
            .field("lookahead", &self.lookahead)
            .finish()
    }
}
