//! Concatenation adaptors.
//!
//! [`Joined`] concatenates two cursors of different types with the same item
//! type. Its position is a [`Variant2`] holding whichever cursor is active;
//! the second cursor waits in an [`Optional`] until the first is exhausted and
//! is moved into place exactly once.
//!
//! [`JoinedSame`] does the same for two cursors of one type, where no variant
//! is needed.

use std::ops::{Deref, DerefMut};

use safet_kernel::{Optional, Variant2};
use tracing::trace;

use crate::cursor::Cursor;

/// Cursor over the elements of `A` followed by those of `B`.
#[derive(Clone, Debug)]
pub struct Joined<A, B> {
    position: Variant2<A, B>,
    pending: Optional<B>,
}

impl<A, B> Joined<A, B>
where
    A: Cursor,
    B: Cursor<Item = A::Item>,
{
    /// Joins `first` and `second`, starting in `first`.
    pub fn new(first: A, second: B) -> Self {
        Self {
            position: Variant2::V0(first),
            pending: Optional::Set(second),
        }
    }

    /// Returns `true` once the join has moved into the second cursor.
    pub fn in_second(&self) -> bool {
        self.position.index() == 1
    }

    fn cross_over_if_exhausted(&mut self) {
        let exhausted = match self.position.get_at_mut::<0>() {
            Optional::Set(first) => first.is_end(),
            Optional::Unset => false,
        };
        if exhausted {
            if let Optional::Set(second) = self.pending.take() {
                self.position.emplace_at::<1>(second);
                trace!("join crossed into second range");
            }
        }
    }
}

/// Borrow of the current element of a [`Joined`], from whichever side is
/// active.
#[derive(Debug)]
pub struct JoinedCurrent<X, Y>(Variant2<X, Y>);

impl<X, Y, T> Deref for JoinedCurrent<X, Y>
where
    X: Deref<Target = T>,
    Y: Deref<Target = T>,
    T: ?Sized,
{
    type Target = T;

    fn deref(&self) -> &T {
        match &self.0 {
            Variant2::V0(first) => &**first,
            Variant2::V1(second) => &**second,
        }
    }
}

impl<X, Y, T> DerefMut for JoinedCurrent<X, Y>
where
    X: DerefMut<Target = T>,
    Y: DerefMut<Target = T>,
    T: ?Sized,
{
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.0 {
            Variant2::V0(first) => &mut **first,
            Variant2::V1(second) => &mut **second,
        }
    }
}

impl<A, B> Cursor for Joined<A, B>
where
    A: Cursor,
    B: Cursor<Item = A::Item>,
{
    type Item = A::Item;
    type Current<'a> = JoinedCurrent<A::Current<'a>, B::Current<'a>> where Self: 'a;

    fn current(&mut self) -> Optional<Self::Current<'_>> {
        self.cross_over_if_exhausted();
        match &mut self.position {
            Variant2::V0(first) => first
                .current()
                .into_if_set(|item| JoinedCurrent(Variant2::V0(item))),
            Variant2::V1(second) => second
                .current()
                .into_if_set(|item| JoinedCurrent(Variant2::V1(item))),
        }
    }

    fn advance(&mut self) {
        self.cross_over_if_exhausted();
        match &mut self.position {
            Variant2::V0(first) => first.advance(),
            Variant2::V1(second) => second.advance(),
        }
    }

    fn take(&mut self) -> Optional<A::Item> {
        self.cross_over_if_exhausted();
        match &mut self.position {
            Variant2::V0(first) => first.take(),
            Variant2::V1(second) => second.take(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = match &self.position {
            Variant2::V0(first) => first.size_hint(),
            Variant2::V1(second) => second.size_hint(),
        };
        let (pending_low, pending_high) = match &self.pending {
            Optional::Set(second) => second.size_hint(),
            Optional::Unset => (0, Some(0)),
        };
        let high = match (high, pending_high) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (low.saturating_add(pending_low), high)
    }
}

/// Cursor over the elements of one cursor followed by another of the same
/// type.
#[derive(Clone, Debug)]
pub struct JoinedSame<C> {
    active: C,
    next: Optional<C>,
}

impl<C: Cursor> JoinedSame<C> {
    /// Joins `first` and `second`, starting in `first`.
    pub fn new(first: C, second: C) -> Self {
        Self {
            active: first,
            next: Optional::Set(second),
        }
    }

    /// Returns `true` once the join has moved into the second cursor.
    pub fn in_second(&self) -> bool {
        self.next.is_empty()
    }

    fn cross_over_if_exhausted(&mut self) {
        if self.next.is_set() && self.active.is_end() {
            if let Optional::Set(second) = self.next.take() {
                self.active = second;
                trace!("join crossed into second range");
            }
        }
    }
}

impl<C: Cursor> Cursor for JoinedSame<C> {
    type Item = C::Item;
    type Current<'a> = C::Current<'a> where Self: 'a;

    fn current(&mut self) -> Optional<C::Current<'_>> {
        self.cross_over_if_exhausted();
        self.active.current()
    }

    fn advance(&mut self) {
        self.cross_over_if_exhausted();
        self.active.advance();
    }

    fn take(&mut self) -> Optional<C::Item> {
        self.cross_over_if_exhausted();
        self.active.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = self.active.size_hint();
        match &self.next {
            Optional::Set(next) => {
                let (next_low, next_high) = next.size_hint();
                let high = match (high, next_high) {
                    (Some(a), Some(b)) => a.checked_add(b),
                    _ => None,
                };
                (low.saturating_add(next_low), high)
            }
            Optional::Unset => (low, high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::IterCursor;
    use crate::filter::Filtered;

    fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item> {
        let mut out = Vec::new();
        while let Optional::Set(item) = cursor.take() {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_heterogeneous_join() {
        let first = IterCursor::new(vec![1, 2].into_iter());
        let second = Filtered::new(IterCursor::new(3..=6), |x: &mut i32| *x != 5);
        assert_eq!(drain(Joined::new(first, second)), [1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_crosses_over_once() {
        let mut joined = Joined::new(
            IterCursor::new(vec![1, 2].into_iter()),
            IterCursor::new(3..=4),
        );
        assert!(!joined.in_second());
        assert_eq!(joined.take(), Optional::Set(1));
        assert_eq!(joined.take(), Optional::Set(2));
        assert!(!joined.in_second());
        assert_eq!(joined.current().into_if_set(|x| *x), Optional::Set(3));
        assert!(joined.in_second());
        if let Optional::Set(mut x) = joined.current() {
            *x += 10;
        }
        assert_eq!(joined.current().into_if_set(|x| *x), Optional::Set(13));
        joined.advance();
        assert_eq!(joined.take(), Optional::Set(4));
        assert!(joined.is_end());
        assert!(joined.is_end());
    }

    #[test]
    fn test_empty_sides() {
        let empty = || IterCursor::new(Vec::<i32>::new().into_iter());
        assert_eq!(drain(Joined::new(empty(), IterCursor::new(1..=2))), [1, 2]);
        assert_eq!(drain(Joined::new(IterCursor::new(1..=2), empty())), [1, 2]);
        assert!(Joined::new(empty(), empty()).is_end());
    }

    #[test]
    fn test_homogeneous_join() {
        let mut joined = JoinedSame::new(IterCursor::new(1..=2), IterCursor::new(3..=4));
        assert_eq!(joined.size_hint(), (4, Some(4)));
        joined.advance();
        joined.advance();
        assert!(!joined.in_second());
        assert_eq!(joined.take(), Optional::Set(3));
        assert!(joined.in_second());
        assert_eq!(drain(joined), [4]);
    }

    #[test]
    fn test_joined_size_hint() {
        let joined = Joined::new(
            IterCursor::new(vec![1, 2].into_iter()),
            IterCursor::new(3..6),
        );
        assert_eq!(joined.size_hint(), (5, Some(5)));
    }
}
