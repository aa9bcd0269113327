//! Visitors over the active alternative of a variant.
//!
//! A visitor implements [`Visitor<T>`] once per alternative type it handles.
//! Alternatives that share a type are handled by the same impl, so the set of
//! distinct alternative types is the visitor's effective signature. A single
//! blanket impl (`impl<T: Debug> Visitor<T> for ...`) handles every
//! alternative at once.
//!
//! The value category passed to the visitor follows the access path:
//! `visit` lends `&T`, `visit_mut` lends `&mut T`, `into_visit` moves `T`.
//!
//! Co-visiting two variants dispatches on the active pair: the first variant
//! is visited with a [`Cofirst`] adapter that visits the second variant with a
//! [`Cosecond`] adapter, which finally calls the user's [`Covisitor`].

/// Handles one alternative type of a variant.
pub trait Visitor<T> {
    /// The result produced for every alternative.
    type Output;

    /// Consumes the visitor with the active value.
    fn visit(self, value: T) -> Self::Output;
}

/// Handles one pair of alternative types from two variants.
pub trait Covisitor<X, Y> {
    /// The result produced for every pair of alternatives.
    type Output;

    /// Consumes the visitor with both active values.
    fn covisit(self, first: X, second: Y) -> Self::Output;
}

/// A variant access path that can dispatch a visitor.
///
/// Implemented for `&Variant`, `&mut Variant` and `Variant` whenever the
/// visitor handles every alternative with a common output type.
pub trait Visitable<V> {
    /// The visitor's output.
    type Output;

    /// Calls the visitor with the active alternative.
    fn accept(self, visitor: V) -> Self::Output;
}

/// First stage of a co-visit: holds the second variant and the user visitor.
#[derive(Debug)]
pub struct Cofirst<O, V> {
    other: O,
    visitor: V,
}

impl<O, V> Cofirst<O, V> {
    pub(crate) fn new(other: O, visitor: V) -> Self {
        Self { other, visitor }
    }
}

impl<X, O, V> Visitor<X> for Cofirst<O, V>
where
    O: Visitable<Cosecond<X, V>>,
{
    type Output = O::Output;

    fn visit(self, first: X) -> Self::Output {
        self.other.accept(Cosecond {
            first,
            visitor: self.visitor,
        })
    }
}

/// Second stage of a co-visit: holds the first active value.
#[derive(Debug)]
pub struct Cosecond<X, V> {
    first: X,
    visitor: V,
}

impl<X, Y, V> Visitor<Y> for Cosecond<X, V>
where
    V: Covisitor<X, Y>,
{
    type Output = V::Output;

    fn visit(self, second: Y) -> Self::Output {
        self.visitor.covisit(self.first, second)
    }
}
