//! Optional type and operations
//!
//! `Optional<T>` holds at most one value of type `T`. It is either `Set(T)`
//! or `Unset`. Borrowed payloads are spelled as reference types
//! (`Optional<&T>`, `Optional<&mut T>`): the slot then holds a borrow and never
//! drops the referent, and assigning a new referent always rebinds rather than
//! writing through the old one.
//!
//! # Access paths
//!
//! Most combinators come in three flavours, selected by how the Optional is
//! reached:
//!
//! - `&self` methods (`if_set`, `and_then`, `value_or`, ...) lend `&T`
//! - `&mut self` methods (`if_set_mut`, `and_then_mut`, ...) lend `&mut T`
//! - `self` methods (`into_if_set`, `into_and_then`, ...) move `T` out
//!
//! # Reading values
//!
//! There is no bare `unwrap`. A value is read through a combinator that also
//! says what happens when it is absent (`value_or`, `handle`, `if_set` chained
//! with `if_unset`), or converted into a `Result` with [`Optional::require`].
//!
//! # Ordering
//!
//! `Unset` orders before every `Set` value; two `Set` values compare by their
//! payloads.

use std::cmp::Ordering;
use std::fmt;

use crate::collapse::Collapse;
use crate::error::{KernelError, Result};

/// A single-slot cell holding at most one value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
    /// No value
    Unset,
    /// Contains a value
    Set(T),
}

impl<T> Optional<T> {
    /// Creates an empty Optional.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Optional::Unset
    }

    /// Returns `true` if a value is held.
    #[inline]
    pub const fn is_set(&self) -> bool {
        matches!(self, Optional::Set(_))
    }

    /// Returns `true` if no value is held.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Optional::Unset)
    }

    /// Converts from `&Optional<T>` to `Optional<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> Optional<&T> {
        match *self {
            Optional::Unset => Optional::Unset,
            Optional::Set(ref x) => Optional::Set(x),
        }
    }

    /// Converts from `&mut Optional<T>` to `Optional<&mut T>`.
    #[inline]
    pub fn as_mut(&mut self) -> Optional<&mut T> {
        match *self {
            Optional::Unset => Optional::Unset,
            Optional::Set(ref mut x) => Optional::Set(x),
        }
    }

    /// Stores `value`, dropping any previously held value first.
    ///
    /// For `Optional<&T>` this rebinds the borrow; the old referent is left
    /// untouched.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.clear();
        self.engage(value)
    }

    /// Drops any held value, then stores the result of `f`.
    ///
    /// If `f` panics the Optional is left `Unset`.
    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.clear();
        let value = f();
        self.engage(value)
    }

    /// Returns the held value, constructing it from `f` first if empty.
    pub fn emplace_if_empty<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self {
            Optional::Set(value) => value,
            Optional::Unset => self.engage(f()),
        }
    }

    /// Drops the held value, if any.
    #[inline]
    pub fn clear(&mut self) {
        *self = Optional::Unset;
    }

    /// Moves the held value out, leaving `Unset` behind.
    #[inline]
    pub fn take(&mut self) -> Optional<T> {
        std::mem::replace(self, Optional::Unset)
    }

    /// Stores `value` and returns the previously held value.
    #[inline]
    pub fn replace(&mut self, value: T) -> Optional<T> {
        std::mem::replace(self, Optional::Set(value))
    }

    /// Applies `f` to the held value, wrapping its result.
    ///
    /// Returns `Unset` without calling `f` when empty. Chained with
    /// [`if_unset`](Self::if_unset) this forms an exhaustive if/else.
    #[inline]
    pub fn if_set<'a, R, F>(&'a self, f: F) -> Optional<R>
    where
        F: FnOnce(&'a T) -> R,
    {
        match self {
            Optional::Set(x) => Optional::Set(f(x)),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Applies `f` to the held value by mutable borrow, wrapping its result.
    #[inline]
    pub fn if_set_mut<'a, R, F>(&'a mut self, f: F) -> Optional<R>
    where
        F: FnOnce(&'a mut T) -> R,
    {
        match self {
            Optional::Set(x) => Optional::Set(f(x)),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Moves the held value into `f`, wrapping its result.
    #[inline]
    pub fn into_if_set<R, F>(self, f: F) -> Optional<R>
    where
        F: FnOnce(T) -> R,
    {
        match self {
            Optional::Set(x) => Optional::Set(f(x)),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Calls `f` only when empty, wrapping its result.
    #[inline]
    pub fn if_unset<R, F>(&self, f: F) -> Optional<R>
    where
        F: FnOnce() -> R,
    {
        match self {
            Optional::Set(_) => Optional::Unset,
            Optional::Unset => Optional::Set(f()),
        }
    }

    /// Calls `f` with the held value and returns `self` for chaining.
    #[inline]
    pub fn when_set<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&T),
    {
        if let Optional::Set(x) = self {
            f(x);
        }
        self
    }

    /// Calls `f` with the held value by mutable borrow and returns `self`.
    #[inline]
    pub fn when_set_mut<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut T),
    {
        if let Optional::Set(x) = self {
            f(x);
        }
        self
    }

    /// Calls `f` when empty and returns `self` for chaining.
    #[inline]
    pub fn when_unset<F>(&self, f: F) -> &Self
    where
        F: FnOnce(),
    {
        if self.is_empty() {
            f();
        }
        self
    }

    /// Calls `f` when empty and returns `self` mutably for chaining.
    #[inline]
    pub fn when_unset_mut<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(),
    {
        if self.is_empty() {
            f();
        }
        self
    }

    /// Applies an Optional-returning function to the held value, flattening
    /// one level.
    #[inline]
    pub fn and_then<'a, U, F>(&'a self, f: F) -> Optional<U>
    where
        F: FnOnce(&'a T) -> Optional<U>,
    {
        match self {
            Optional::Set(x) => f(x),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Like [`and_then`](Self::and_then), lending the value mutably.
    #[inline]
    pub fn and_then_mut<'a, U, F>(&'a mut self, f: F) -> Optional<U>
    where
        F: FnOnce(&'a mut T) -> Optional<U>,
    {
        match self {
            Optional::Set(x) => f(x),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Like [`and_then`](Self::and_then), moving the value into `f`.
    #[inline]
    pub fn into_and_then<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Optional::Set(x) => f(x),
            Optional::Unset => Optional::Unset,
        }
    }

    /// Returns a clone of the held value, or the result of `f` when empty.
    ///
    /// `f` is only evaluated when needed.
    #[inline]
    pub fn value_or<F>(&self, f: F) -> T
    where
        T: Clone,
        F: FnOnce() -> T,
    {
        match self {
            Optional::Set(x) => x.clone(),
            Optional::Unset => f(),
        }
    }

    /// Returns the held value, or the result of `f` when empty.
    #[inline]
    pub fn into_value_or<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Optional::Set(x) => x,
            Optional::Unset => f(),
        }
    }

    /// Dispatches to exactly one of two handlers.
    #[inline]
    pub fn handle<'a, R, S, U>(&'a self, on_set: S, on_unset: U) -> R
    where
        S: FnOnce(&'a T) -> R,
        U: FnOnce() -> R,
    {
        match self {
            Optional::Set(x) => on_set(x),
            Optional::Unset => on_unset(),
        }
    }

    /// Dispatches to exactly one of two handlers, lending the value mutably.
    #[inline]
    pub fn handle_mut<'a, R, S, U>(&'a mut self, on_set: S, on_unset: U) -> R
    where
        S: FnOnce(&'a mut T) -> R,
        U: FnOnce() -> R,
    {
        match self {
            Optional::Set(x) => on_set(x),
            Optional::Unset => on_unset(),
        }
    }

    /// Dispatches to exactly one of two handlers, moving the value.
    #[inline]
    pub fn into_handle<R, S, U>(self, on_set: S, on_unset: U) -> R
    where
        S: FnOnce(T) -> R,
        U: FnOnce() -> R,
    {
        match self {
            Optional::Set(x) => on_set(x),
            Optional::Unset => on_unset(),
        }
    }

    /// Borrows the held value only if `condition` also holds.
    #[inline]
    pub fn and_if(&self, condition: bool) -> Optional<&T> {
        match self {
            Optional::Set(x) if condition => Optional::Set(x),
            _ => Optional::Unset,
        }
    }

    /// Mutably borrows the held value only if `condition` also holds.
    #[inline]
    pub fn and_if_mut(&mut self, condition: bool) -> Optional<&mut T> {
        match self {
            Optional::Set(x) if condition => Optional::Set(x),
            _ => Optional::Unset,
        }
    }

    /// Keeps the held value only if `condition` also holds.
    #[inline]
    pub fn into_and_if(self, condition: bool) -> Optional<T> {
        match self {
            Optional::Set(x) if condition => Optional::Set(x),
            _ => Optional::Unset,
        }
    }

    /// Returns `self` if set, otherwise the Optional produced by `f`.
    #[inline]
    pub fn or_else<F>(self, f: F) -> Optional<T>
    where
        F: FnOnce() -> Optional<T>,
    {
        match self {
            Optional::Set(x) => Optional::Set(x),
            Optional::Unset => f(),
        }
    }

    /// Returns `true` if a value is held and it equals `value`.
    #[inline]
    pub fn holds<U>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Optional::Set(x) => x == value,
            Optional::Unset => false,
        }
    }

    /// Compares against a bare value. An empty Optional orders less.
    #[inline]
    pub fn cmp_value<U>(&self, value: &U) -> Option<Ordering>
    where
        T: PartialOrd<U>,
    {
        match self {
            Optional::Set(x) => x.partial_cmp(value),
            Optional::Unset => Some(Ordering::Less),
        }
    }

    /// Converts into a `Result`, naming the value in the error when empty.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Unset`] if no value is held.
    pub fn require(self, what: impl Into<String>) -> Result<T> {
        match self {
            Optional::Set(x) => Ok(x),
            Optional::Unset => Err(KernelError::Unset { what: what.into() }),
        }
    }

    /// Flattens every nesting level into an Optional of the innermost type.
    ///
    /// The innermost type is named by the caller (usually through a type
    /// annotation on the result); any empty level yields `Unset`.
    ///
    /// ```
    /// use safet_kernel::Optional;
    ///
    /// let nested = Optional::Set(Optional::Set(Optional::Set(7)));
    /// let flat: Optional<i32> = nested.collapse();
    /// assert_eq!(flat, Optional::Set(7));
    /// ```
    #[inline]
    pub fn collapse<I, D>(self) -> Optional<I>
    where
        Self: Collapse<I, D>,
    {
        Collapse::collapse_levels(self)
    }

    /// Returns an iterator over the held value.
    #[inline]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        Option::<&T>::from(self.as_ref()).into_iter()
    }

    /// Returns an iterator over the held value by mutable borrow.
    #[inline]
    pub fn iter_mut(&mut self) -> std::option::IntoIter<&mut T> {
        Option::<&mut T>::from(self.as_mut()).into_iter()
    }

    fn engage(&mut self, value: T) -> &mut T {
        *self = Optional::Set(value);
        match self {
            Optional::Set(value) => value,
            Optional::Unset => unreachable!("an Optional was just set"),
        }
    }
}

impl<T> Optional<Optional<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Optional<T> {
        self.into_and_then(|inner| inner)
    }
}

impl<T: Copy> Optional<&T> {
    /// Copies the borrowed value.
    #[inline]
    pub fn copied(self) -> Optional<T> {
        self.into_if_set(|x| *x)
    }
}

impl<T: Copy> Optional<&mut T> {
    /// Copies the mutably borrowed value.
    #[inline]
    pub fn copied(self) -> Optional<T> {
        self.into_if_set(|x| *x)
    }
}

impl<T: Clone> Optional<&T> {
    /// Clones the borrowed value.
    #[inline]
    pub fn cloned(self) -> Optional<T> {
        self.into_if_set(T::clone)
    }
}

impl<T> Default for Optional<T> {
    /// Returns `Unset`.
    #[inline]
    fn default() -> Self {
        Optional::Unset
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optional::Unset => write!(f, "Unset"),
            Optional::Set(x) => f.debug_tuple("Set").field(x).finish(),
        }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Optional::Unset,
            Some(x) => Optional::Set(x),
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        match optional {
            Optional::Unset => None,
            Optional::Set(x) => Some(x),
        }
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Option::<T>::from(self).into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Optional<T> {
    type Item = &'a mut T;
    type IntoIter = std::option::IntoIter<&'a mut T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
