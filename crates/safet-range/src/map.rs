//! Mapping adaptor.

use std::fmt;

use safet_kernel::Optional;

use crate::cache::ValueCache;
use crate::cursor::Cursor;

/// Cursor applying a transform to every element of `base`, lazily.
///
/// The transform runs the first time a position is dereferenced and its
/// result is kept in the cache `K` until the cursor moves on. Positions that
/// are skipped without being dereferenced are never transformed.
///
/// With a [`BoxedCache`](crate::cache::BoxedCache) the cursor is `Clone`
/// even when the transformed values are not, and copies taken on the same
/// position share its value.
#[derive(Clone)]
pub struct Mapped<C, F, K> {
    base: C,
    transform: F,
    cache: K,
}

impl<C, F, K> Mapped<C, F, K>
where
    C: Cursor,
    K: ValueCache,
    F: FnMut(C::Item) -> K::Value,
{
    /// Wraps `base` with an empty cache.
    pub fn new(base: C, transform: F) -> Self {
        Self {
            base,
            transform,
            cache: K::default(),
        }
    }
}

impl<C, F, K> Cursor for Mapped<C, F, K>
where
    C: Cursor,
    K: ValueCache,
    F: FnMut(C::Item) -> K::Value,
{
    type Item = K::Value;
    type Current<'a> = K::BorrowedMut<'a> where Self: 'a;

    fn current(&mut self) -> Optional<K::BorrowedMut<'_>> {
        let Self {
            base,
            transform,
            cache,
        } = self;
        // a cached value means `base` has already moved past this position
        cache.try_get_or_instantiate(|| base.take().into_if_set(transform))
    }

    fn advance(&mut self) {
        if self.cache.is_empty() {
            self.base.advance();
        }
        self.cache.clear();
    }

    fn take(&mut self) -> Optional<K::Value> {
        let Self {
            base,
            transform,
            cache,
        } = self;
        cache.take().or_else(|| base.take().into_if_set(transform))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let cached = usize::from(!self.cache.is_empty());
        let (low, high) = self.base.size_hint();
        (
            low.saturating_add(cached),
            high.and_then(|high| high.checked_add(cached)),
        )
    }
}

impl<C: fmt::Debug, F, K: fmt::Debug> fmt::Debug for Mapped<C, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapped")
            .field("base", &self.base)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
