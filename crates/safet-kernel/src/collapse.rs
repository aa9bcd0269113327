//! Flattening of nested Optionals.
//!
//! `Optional<Optional<...<T>>>` collapses to `Optional<T>`. The nesting depth
//! is tracked by a type-level marker (`Innermost`, `Nested<Innermost>`, ...)
//! that the compiler infers from the requested innermost type, so each depth
//! has exactly one matching impl.

use std::marker::PhantomData;

use crate::optional::Optional;

/// Depth marker: the Optional's payload is the innermost type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Innermost;

/// Depth marker: the Optional's payload is itself an Optional of depth `D`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nested<D>(PhantomData<D>);

/// Collapses every nesting level down to `Optional<I>`.
pub trait Collapse<I, D> {
    /// Flattens all levels. Any empty level yields `Unset`.
    fn collapse_levels(self) -> Optional<I>;
}

impl<T> Collapse<T, Innermost> for Optional<T> {
    #[inline]
    fn collapse_levels(self) -> Optional<T> {
        self
    }
}

impl<T, I, D> Collapse<I, Nested<D>> for Optional<T>
where
    T: Collapse<I, D>,
{
    #[inline]
    fn collapse_levels(self) -> Optional<I> {
        self.into_and_then(T::collapse_levels)
    }
}
