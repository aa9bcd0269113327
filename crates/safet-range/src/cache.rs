//! Per-position value caches for cursor adaptors.
//!
//! An adaptor that computes its element (a mapped value, a looked-ahead
//! element) stores it in a cache so that repeated dereferences of the same
//! position reuse one computation. The owning cursor clears the cache when it
//! advances.
//!
//! Two storage strategies are available and chosen per adaptor:
//!
//! - [`InlineCache`] keeps the value inside the cursor, and a clone copies it
//! - [`BoxedCache`] keeps it in a reference-counted heap cell, so a clone
//!   costs a pointer copy and needs no `Clone` on the value

use std::cell::{self, RefCell};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use safet_kernel::Optional;

/// Storage for at most one computed value.
pub trait ValueCache: Default {
    /// The cached value type.
    type Value;

    /// Shared borrow of the cached value.
    type Borrowed<'a>: Deref<Target = Self::Value>
    where
        Self: 'a;

    /// Exclusive borrow of the cached value.
    type BorrowedMut<'a>: DerefMut<Target = Self::Value>
    where
        Self: 'a;

    /// Borrows the cached value without computing it.
    fn peek(&self) -> Optional<Self::Borrowed<'_>>;

    /// Mutably borrows the cached value without computing it.
    fn peek_mut(&mut self) -> Optional<Self::BorrowedMut<'_>>;

    /// Returns the cached value, computing it with `f` first if empty.
    fn get_or_instantiate<F>(&mut self, f: F) -> Self::BorrowedMut<'_>
    where
        F: FnOnce() -> Self::Value;

    /// Like [`get_or_instantiate`](Self::get_or_instantiate) for producers
    /// that may have nothing to give. The cache stays empty if `f` returns
    /// `Unset`.
    fn try_get_or_instantiate<F>(&mut self, f: F) -> Optional<Self::BorrowedMut<'_>>
    where
        F: FnOnce() -> Optional<Self::Value>;

    /// Replaces the cached value.
    fn emplace(&mut self, value: Self::Value) -> Self::BorrowedMut<'_>;

    /// Moves the cached value out, leaving the cache empty.
    fn take(&mut self) -> Optional<Self::Value>;

    /// Drops the cached value.
    fn clear(&mut self);

    /// Returns `true` if nothing is cached.
    fn is_empty(&self) -> bool {
        self.peek().is_empty()
    }
}

/// Cache that holds its value inline.
#[derive(Clone, Debug)]
pub struct InlineCache<V> {
    slot: Optional<V>,
}

impl<V> Default for InlineCache<V> {
    fn default() -> Self {
        Self {
            slot: Optional::Unset,
        }
    }
}

impl<V> ValueCache for InlineCache<V> {
    type Value = V;
    type Borrowed<'a> = &'a V where Self: 'a;
    type BorrowedMut<'a> = &'a mut V where Self: 'a;

    #[inline]
    fn peek(&self) -> Optional<&V> {
        self.slot.as_ref()
    }

    #[inline]
    fn peek_mut(&mut self) -> Optional<&mut V> {
        self.slot.as_mut()
    }

    #[inline]
    fn get_or_instantiate<F>(&mut self, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.slot.emplace_if_empty(f)
    }

    fn try_get_or_instantiate<F>(&mut self, f: F) -> Optional<&mut V>
    where
        F: FnOnce() -> Optional<V>,
    {
        if self.slot.is_empty() {
            self.slot = f();
        }
        self.slot.as_mut()
    }

    #[inline]
    fn emplace(&mut self, value: V) -> &mut V {
        self.slot.emplace(value)
    }

    #[inline]
    fn take(&mut self) -> Optional<V> {
        self.slot.take()
    }

    #[inline]
    fn clear(&mut self) {
        self.slot.clear();
    }
}

/// Cache that holds its value in a reference-counted heap cell.
///
/// Clones share the cell, so every copy of a cursor sitting on the same
/// position sees (and mutates) one cached value. A copy leaves the shared
/// cell when it moves on: [`clear`](ValueCache::clear) detaches it and the
/// other copies keep the value, while [`take`](ValueCache::take) moves the
/// value out for every copy. An empty cell is never filled while shared, so
/// copies that have diverged never observe each other's elements.
///
/// # Panics
///
/// Borrows are checked at runtime. Accessing a copy while a borrow handed out
/// by another copy of the same position is still alive panics.
pub struct BoxedCache<V> {
    cell: Rc<RefCell<Optional<V>>>,
}

impl<V> BoxedCache<V> {
    /// Returns `true` if another copy shares this cache's cell.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.cell) > 1
    }

    fn detach(&mut self) {
        match Rc::get_mut(&mut self.cell) {
            Some(cell) => cell.get_mut().clear(),
            None => self.cell = Rc::default(),
        }
    }

    fn unshare_if_empty(&mut self) {
        if self.is_shared() && self.cell.borrow().is_empty() {
            self.cell = Rc::default();
        }
    }
}

impl<V> Default for BoxedCache<V> {
    fn default() -> Self {
        Self {
            cell: Rc::default(),
        }
    }
}

impl<V> Clone for BoxedCache<V> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for BoxedCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedCache")
            .field("cell", &self.cell)
            .field("copies", &Rc::strong_count(&self.cell))
            .finish()
    }
}

impl<V> ValueCache for BoxedCache<V> {
    type Value = V;
    type Borrowed<'a> = cell::Ref<'a, V> where Self: 'a;
    type BorrowedMut<'a> = cell::RefMut<'a, V> where Self: 'a;

    fn peek(&self) -> Optional<cell::Ref<'_, V>> {
        cell::Ref::filter_map(self.cell.borrow(), |slot| Option::<&V>::from(slot.as_ref()))
            .ok()
            .into()
    }

    fn peek_mut(&mut self) -> Optional<cell::RefMut<'_, V>> {
        cell::RefMut::filter_map(self.cell.borrow_mut(), |slot| {
            Option::<&mut V>::from(slot.as_mut())
        })
        .ok()
        .into()
    }

    fn get_or_instantiate<F>(&mut self, f: F) -> cell::RefMut<'_, V>
    where
        F: FnOnce() -> V,
    {
        self.unshare_if_empty();
        cell::RefMut::map(self.cell.borrow_mut(), |slot| slot.emplace_if_empty(f))
    }

    fn try_get_or_instantiate<F>(&mut self, f: F) -> Optional<cell::RefMut<'_, V>>
    where
        F: FnOnce() -> Optional<V>,
    {
        self.unshare_if_empty();
        let mut slot = self.cell.borrow_mut();
        if slot.is_empty() {
            *slot = f();
        }
        cell::RefMut::filter_map(slot, |slot| Option::<&mut V>::from(slot.as_mut()))
            .ok()
            .into()
    }

    fn emplace(&mut self, value: V) -> cell::RefMut<'_, V> {
        self.unshare_if_empty();
        cell::RefMut::map(self.cell.borrow_mut(), |slot| slot.emplace(value))
    }

    fn take(&mut self) -> Optional<V> {
        let value = self.cell.borrow_mut().take();
        self.detach();
        value
    }

    fn clear(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn exercise<K: ValueCache<Value = String>>() {
        let calls = Cell::new(0);
        let mut cache = K::default();
        assert!(cache.is_empty());

        let make = || {
            calls.set(calls.get() + 1);
            String::from("v")
        };
        cache.get_or_instantiate(make).push('1');
        cache.get_or_instantiate(make).push('2');
        assert_eq!(calls.get(), 1);
        assert_eq!(
            cache.peek().into_if_set(|v| v.clone()),
            Optional::Set(String::from("v12"))
        );

        assert_eq!(cache.take(), Optional::Set(String::from("v12")));
        assert!(cache.is_empty());

        assert!(cache.try_get_or_instantiate(|| Optional::Unset).is_empty());
        assert!(cache.is_empty());

        cache.emplace(String::from("w"));
        let kept = cache
            .try_get_or_instantiate(|| Optional::Set(String::from("x")))
            .into_if_set(|v| v.clone());
        assert_eq!(kept, Optional::Set(String::from("w")));
        cache.clear();
        assert!(cache.peek_mut().is_empty());
    }

    #[test]
    fn test_inline_cache() {
        exercise::<InlineCache<String>>();
    }

    #[test]
    fn test_boxed_cache() {
        exercise::<BoxedCache<String>>();
    }

    #[test]
    fn test_boxed_cache_address_survives_move() {
        let mut cache = BoxedCache::default();
        let before = {
            let value = cache.emplace(5);
            &*value as *const i32
        };
        let moved = cache;
        let after = moved.peek().into_if_set(|value| &*value as *const i32);
        assert_eq!(after, Optional::Set(before));
    }

    #[test]
    fn test_clone_copies_value() {
        let mut cache = InlineCache::default();
        cache.emplace(vec![1, 2]);
        let mut copy = cache.clone();
        if let Optional::Set(v) = copy.peek_mut() {
            v.push(3);
        }
        assert_eq!(cache.peek(), Optional::Set(&vec![1, 2]));
        assert_eq!(copy.peek(), Optional::Set(&vec![1, 2, 3]));
    }

    #[derive(Debug, PartialEq)]
    struct Token(u32);

    #[test]
    fn test_boxed_clone_shares_value() {
        let mut cache = BoxedCache::default();
        cache.emplace(Token(1));
        let mut copy = cache.clone();
        assert!(cache.is_shared());

        if let Optional::Set(mut token) = copy.peek_mut() {
            token.0 = 2;
        }
        assert_eq!(cache.peek().into_if_set(|t| t.0), Optional::Set(2));

        copy.clear();
        assert!(!cache.is_shared());
        assert!(copy.is_empty());
        assert_eq!(cache.take(), Optional::Set(Token(2)));
    }

    #[test]
    fn test_boxed_take_consumes_for_every_copy() {
        let mut cache = BoxedCache::default();
        cache.emplace(Token(7));
        let mut copy = cache.clone();
        assert_eq!(copy.take(), Optional::Set(Token(7)));
        assert!(cache.is_empty());
        assert!(!cache.is_shared());
    }

    #[test]
    fn test_boxed_empty_clone_fills_separately() {
        let mut cache = BoxedCache::default();
        let mut copy = cache.clone();
        cache.get_or_instantiate(|| Token(1));
        copy.get_or_instantiate(|| Token(2));
        assert_eq!(cache.take(), Optional::Set(Token(1)));
        assert_eq!(copy.take(), Optional::Set(Token(2)));
    }
}
