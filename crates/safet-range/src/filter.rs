//! Filtering adaptor.

use std::fmt;

use safet_kernel::Optional;
use tracing::trace;

use crate::cursor::Cursor;

/// Cursor over the elements of `base` that satisfy a predicate.
///
/// The cursor is always either at the end or on an accepted element: rejected
/// elements are skipped on construction and after every move. The predicate
/// sees each element once, through the base cursor's cached current value,
/// and may modify it: the element it accepts is the element yielded. On a
/// source of `&mut T` it can also write through to the source.
#[derive(Clone)]
pub struct Filtered<C, P> {
    base: C,
    predicate: P,
}

impl<C, P> Filtered<C, P>
where
    C: Cursor,
    P: FnMut(&mut C::Item) -> bool,
{
    /// Wraps `base` and moves to its first accepted element.
    pub fn new(base: C, predicate: P) -> Self {
        let mut filtered = Self { base, predicate };
        filtered.skip_rejected();
        filtered
    }

    fn skip_rejected(&mut self) {
        let mut skipped = 0_usize;
        loop {
            let rejected = match self.base.current() {
                Optional::Set(mut item) => !(self.predicate)(&mut *item),
                Optional::Unset => false,
            };
            if !rejected {
                break;
            }
            self.base.advance();
            skipped += 1;
        }
        if skipped > 0 {
            trace!(skipped, "filter skipped rejected elements");
        }
    }
}

impl<C, P> Cursor for Filtered<C, P>
where
    C: Cursor,
    P: FnMut(&mut C::Item) -> bool,
{
    type Item = C::Item;
    type Current<'a> = C::Current<'a> where Self: 'a;

    #[inline]
    fn current(&mut self) -> Optional<C::Current<'_>> {
        self.base.current()
    }

    fn advance(&mut self) {
        self.base.advance();
        self.skip_rejected();
    }

    fn take(&mut self) -> Optional<C::Item> {
        let item = self.base.take();
        self.skip_rejected();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.base.size_hint().1)
    }
}

impl<C: fmt::Debug, P> fmt::Debug for Filtered<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtered")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
