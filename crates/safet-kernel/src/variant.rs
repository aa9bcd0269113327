//! Closed tagged unions of two to eight alternatives.
//!
//! `VariantN<A, B, ...>` holds exactly one alternative at a time. Each
//! alternative is identified by its position (`V0`, `V1`, ...), which is also
//! its [`index`](Variant2::index). There is no valueless state: replacing the
//! active alternative drops the old value once and the variant is then
//! holding the new one.
//!
//! Alternatives are reached two ways:
//!
//! - By type, through [`Alternative`]. The position is inferred, so
//!   `v.get::<String, _>()` finds the `String` alternative. When two
//!   alternatives share a type the call is ambiguous and does not compile;
//!   positional access is then required.
//! - By position, through [`At`]. `v.get_at::<1>()`. Positions beyond the
//!   last alternative have no impl and are rejected at compile time.
//!
//! # Trait Instances
//!
//! - `Eq`/`Ord`: ordered by index first, then by the contained value
//! - `Default`: the first alternative, default constructed
//! - `Hash`, `Clone`, `Copy`, `Debug`: derived per alternative

use crate::error::{KernelError, Result};
use crate::optional::Optional;
use crate::visit::{Cofirst, Visitable, Visitor};

/// Type-level alternative position, used to disambiguate [`Alternative`]
/// impls. Never constructed.
#[derive(Debug, Clone, Copy)]
pub struct Index<const N: usize>;

/// Access to the alternative of type `T`.
///
/// `I` is an [`Index`] marker chosen by inference; callers write `_`.
pub trait Alternative<T, I>: Sized {
    /// Position of the alternative.
    const POSITION: usize;

    /// Makes a variant holding `value`.
    fn wrap(value: T) -> Self;

    /// Borrows the alternative if it is active.
    fn peek(&self) -> Optional<&T>;

    /// Mutably borrows the alternative if it is active.
    fn peek_mut(&mut self) -> Optional<&mut T>;

    /// Moves the alternative out, or hands the variant back.
    fn unwrap_into(self) -> std::result::Result<T, Self>;

    /// Replaces the active alternative with `value` and borrows it.
    fn place(&mut self, value: T) -> &mut T;
}

/// Access to the alternative at position `N`.
pub trait At<const N: usize>: Sized {
    /// The alternative's type.
    type Output;

    /// Makes a variant holding `value` at position `N`.
    fn wrap_at(value: Self::Output) -> Self;

    /// Borrows the alternative if it is active.
    fn at(&self) -> Optional<&Self::Output>;

    /// Mutably borrows the alternative if it is active.
    fn at_mut(&mut self) -> Optional<&mut Self::Output>;

    /// Moves the alternative out if it is active.
    fn into_at(self) -> Optional<Self::Output>;

    /// Replaces the active alternative and borrows the new value.
    fn place_at(&mut self, value: Self::Output) -> &mut Self::Output;
}

macro_rules! variant_alternative {
    ($name:ident, [$($g:ident),+], $idx:tt, $v:ident, $t:ident) => {
        impl<$($g),+> Alternative<$t, Index<$idx>> for $name<$($g),+> {
            const POSITION: usize = $idx;

            #[inline]
            fn wrap(value: $t) -> Self {
                $name::$v(value)
            }

            #[inline]
            fn peek(&self) -> Optional<&$t> {
                match self {
                    $name::$v(value) => Optional::Set(value),
                    _ => Optional::Unset,
                }
            }

            #[inline]
            fn peek_mut(&mut self) -> Optional<&mut $t> {
                match self {
                    $name::$v(value) => Optional::Set(value),
                    _ => Optional::Unset,
                }
            }

            #[inline]
            fn unwrap_into(self) -> std::result::Result<$t, Self> {
                match self {
                    $name::$v(value) => Ok(value),
                    other => Err(other),
                }
            }

            #[inline]
            fn place(&mut self, value: $t) -> &mut $t {
                *self = $name::$v(value);
                match self {
                    $name::$v(value) => value,
                    _ => unreachable!("alternative {} was just placed", $idx),
                }
            }
        }

        impl<$($g),+> At<$idx> for $name<$($g),+> {
            type Output = $t;

            #[inline]
            fn wrap_at(value: $t) -> Self {
                $name::$v(value)
            }

            #[inline]
            fn at(&self) -> Optional<&$t> {
                <Self as Alternative<$t, Index<$idx>>>::peek(self)
            }

            #[inline]
            fn at_mut(&mut self) -> Optional<&mut $t> {
                <Self as Alternative<$t, Index<$idx>>>::peek_mut(self)
            }

            #[inline]
            fn into_at(self) -> Optional<$t> {
                <Self as Alternative<$t, Index<$idx>>>::unwrap_into(self)
                    .ok()
                    .into()
            }

            #[inline]
            fn place_at(&mut self, value: $t) -> &mut $t {
                <Self as Alternative<$t, Index<$idx>>>::place(self, value)
            }
        }
    };
}

macro_rules! variant {
    (
        $(#[$meta:meta])*
        $name:ident $generics:tt {
            $first_idx:tt => $first_v:ident($first_t:ident)
            $(, $idx:tt => $v:ident($t:ident))+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name<$first_t $(, $t)+> {
            #[doc = concat!("Alternative at position ", stringify!($first_idx), ".")]
            $first_v($first_t),
            $(
                #[doc = concat!("Alternative at position ", stringify!($idx), ".")]
                $v($t),
            )+
        }

        variant_alternative!($name, $generics, $first_idx, $first_v, $first_t);
        $(variant_alternative!($name, $generics, $idx, $v, $t);)+

        impl<$first_t $(, $t)+> $name<$first_t $(, $t)+> {
            /// Position of the active alternative.
            #[inline]
            pub const fn index(&self) -> usize {
                match self {
                    $name::$first_v(_) => $first_idx,
                    $($name::$v(_) => $idx,)+
                }
            }

            /// Makes a variant holding `value` in the alternative of its type.
            #[inline]
            pub fn from_value<T, I>(value: T) -> Self
            where
                Self: Alternative<T, I>,
            {
                <Self as Alternative<T, I>>::wrap(value)
            }

            /// Makes a variant holding `value` at position `N`.
            #[inline]
            pub fn from_at<const N: usize>(value: <Self as At<N>>::Output) -> Self
            where
                Self: At<N>,
            {
                <Self as At<N>>::wrap_at(value)
            }

            /// Position of the alternative of type `T`.
            #[inline]
            pub const fn position_of<T, I>() -> usize
            where
                Self: Alternative<T, I>,
            {
                <Self as Alternative<T, I>>::POSITION
            }

            /// Returns `true` if the alternative of type `T` is active.
            #[inline]
            pub fn holds<T, I>(&self) -> bool
            where
                Self: Alternative<T, I>,
            {
                self.index() == Self::position_of::<T, I>()
            }

            /// Borrows the alternative of type `T`, `Unset` if another is active.
            #[inline]
            pub fn get<T, I>(&self) -> Optional<&T>
            where
                Self: Alternative<T, I>,
            {
                <Self as Alternative<T, I>>::peek(self)
            }

            /// Mutably borrows the alternative of type `T`.
            #[inline]
            pub fn get_mut<T, I>(&mut self) -> Optional<&mut T>
            where
                Self: Alternative<T, I>,
            {
                <Self as Alternative<T, I>>::peek_mut(self)
            }

            /// Moves out the alternative of type `T`.
            #[inline]
            pub fn into_get<T, I>(self) -> Optional<T>
            where
                Self: Alternative<T, I>,
            {
                <Self as Alternative<T, I>>::unwrap_into(self).ok().into()
            }

            /// Borrows the alternative at position `N`.
            #[inline]
            pub fn get_at<const N: usize>(&self) -> Optional<&<Self as At<N>>::Output>
            where
                Self: At<N>,
            {
                <Self as At<N>>::at(self)
            }

            /// Mutably borrows the alternative at position `N`.
            #[inline]
            pub fn get_at_mut<const N: usize>(&mut self) -> Optional<&mut <Self as At<N>>::Output>
            where
                Self: At<N>,
            {
                <Self as At<N>>::at_mut(self)
            }

            /// Moves out the alternative at position `N`.
            #[inline]
            pub fn into_at<const N: usize>(self) -> Optional<<Self as At<N>>::Output>
            where
                Self: At<N>,
            {
                <Self as At<N>>::into_at(self)
            }

            /// Moves out the alternative at position `N`, reporting the active
            /// position on mismatch.
            pub fn try_into_at<const N: usize>(self) -> Result<<Self as At<N>>::Output>
            where
                Self: At<N>,
            {
                let active = self.index();
                match <Self as At<N>>::into_at(self) {
                    Optional::Set(value) => Ok(value),
                    Optional::Unset => Err(KernelError::WrongAlternative {
                        expected: N,
                        active,
                    }),
                }
            }

            /// Replaces the active alternative with `value` in the alternative
            /// of its type. The previous value is dropped exactly once.
            #[inline]
            pub fn emplace<T, I>(&mut self, value: T) -> &mut T
            where
                Self: Alternative<T, I>,
            {
                <Self as Alternative<T, I>>::place(self, value)
            }

            /// Replaces the active alternative with `value` at position `N`.
            #[inline]
            pub fn emplace_at<const N: usize>(
                &mut self,
                value: <Self as At<N>>::Output,
            ) -> &mut <Self as At<N>>::Output
            where
                Self: At<N>,
            {
                <Self as At<N>>::place_at(self, value)
            }

            /// Calls `visitor` with a shared borrow of the active alternative.
            #[inline]
            pub fn visit<'a, V>(&'a self, visitor: V) -> <&'a Self as Visitable<V>>::Output
            where
                &'a Self: Visitable<V>,
            {
                <&'a Self as Visitable<V>>::accept(self, visitor)
            }

            /// Calls `visitor` with a mutable borrow of the active alternative.
            #[inline]
            pub fn visit_mut<'a, V>(&'a mut self, visitor: V) -> <&'a mut Self as Visitable<V>>::Output
            where
                &'a mut Self: Visitable<V>,
            {
                <&'a mut Self as Visitable<V>>::accept(self, visitor)
            }

            /// Calls `visitor` with the active alternative, moved out.
            #[inline]
            pub fn into_visit<V>(self, visitor: V) -> <Self as Visitable<V>>::Output
            where
                Self: Visitable<V>,
            {
                <Self as Visitable<V>>::accept(self, visitor)
            }

            /// Calls the covisitor with borrows of both active alternatives.
            #[inline]
            pub fn covisit<'a, 'b, V>(
                &'a self,
                other: &'b Self,
                visitor: V,
            ) -> <&'a Self as Visitable<Cofirst<&'b Self, V>>>::Output
            where
                &'a Self: Visitable<Cofirst<&'b Self, V>>,
            {
                <&'a Self as Visitable<Cofirst<&'b Self, V>>>::accept(
                    self,
                    Cofirst::new(other, visitor),
                )
            }

            /// Calls the covisitor with mutable borrows of both active alternatives.
            #[inline]
            pub fn covisit_mut<'a, 'b, V>(
                &'a mut self,
                other: &'b mut Self,
                visitor: V,
            ) -> <&'a mut Self as Visitable<Cofirst<&'b mut Self, V>>>::Output
            where
                &'a mut Self: Visitable<Cofirst<&'b mut Self, V>>,
            {
                <&'a mut Self as Visitable<Cofirst<&'b mut Self, V>>>::accept(
                    self,
                    Cofirst::new(other, visitor),
                )
            }

            /// Calls the covisitor with both active alternatives, moved out.
            #[inline]
            pub fn into_covisit<V>(
                self,
                other: Self,
                visitor: V,
            ) -> <Self as Visitable<Cofirst<Self, V>>>::Output
            where
                Self: Visitable<Cofirst<Self, V>>,
            {
                <Self as Visitable<Cofirst<Self, V>>>::accept(self, Cofirst::new(other, visitor))
            }
        }

        impl<$first_t: Default $(, $t)+> Default for $name<$first_t $(, $t)+> {
            #[inline]
            fn default() -> Self {
                $name::$first_v($first_t::default())
            }
        }

        impl<'a, $first_t $(, $t)+, Vis, Out> Visitable<Vis> for &'a $name<$first_t $(, $t)+>
        where
            Vis: Visitor<&'a $first_t, Output = Out>,
            $(Vis: Visitor<&'a $t, Output = Out>,)+
        {
            type Output = Out;

            #[inline]
            fn accept(self, visitor: Vis) -> Out {
                match self {
                    $name::$first_v(value) => <Vis as Visitor<&'a $first_t>>::visit(visitor, value),
                    $($name::$v(value) => <Vis as Visitor<&'a $t>>::visit(visitor, value),)+
                }
            }
        }

        impl<'a, $first_t $(, $t)+, Vis, Out> Visitable<Vis> for &'a mut $name<$first_t $(, $t)+>
        where
            Vis: Visitor<&'a mut $first_t, Output = Out>,
            $(Vis: Visitor<&'a mut $t, Output = Out>,)+
        {
            type Output = Out;

            #[inline]
            fn accept(self, visitor: Vis) -> Out {
                match self {
                    $name::$first_v(value) => {
                        <Vis as Visitor<&'a mut $first_t>>::visit(visitor, value)
                    }
                    $($name::$v(value) => <Vis as Visitor<&'a mut $t>>::visit(visitor, value),)+
                }
            }
        }

        impl<$first_t $(, $t)+, Vis, Out> Visitable<Vis> for $name<$first_t $(, $t)+>
        where
            Vis: Visitor<$first_t, Output = Out>,
            $(Vis: Visitor<$t, Output = Out>,)+
        {
            type Output = Out;

            #[inline]
            fn accept(self, visitor: Vis) -> Out {
                match self {
                    $name::$first_v(value) => <Vis as Visitor<$first_t>>::visit(visitor, value),
                    $($name::$v(value) => <Vis as Visitor<$t>>::visit(visitor, value),)+
                }
            }
        }
    };
}

variant! {
    /// A value that is one of two alternatives.
    Variant2 [A, B] {
        0 => V0(A),
        1 => V1(B),
    }
}

variant! {
    /// A value that is one of three alternatives.
    Variant3 [A, B, C] {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
    }
}

variant! {
    /// A value that is one of four alternatives.
    Variant4 [A, B, C, D] {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
    }
}

variant! {
    /// A value that is one of five alternatives.
    Variant5 [A, B, C, D, E] {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
    }
}

variant! {
    /// A value that is one of six alternatives.
    Variant6 [A, B, C, D, E, F] {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
        5 => V5(F),
    }
}

variant! {
    /// A value that is one of seven alternatives.
    Variant7 [A, B, C, D, E, F, G] {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
        5 => V5(F),
        6 => V6(G),
    }
}

variant! {
    /// A value that is one of eight alternatives.
    Variant8 [A, B, C, D, E, F, G, H] {
        0 => V0(A),
        1 => V1(B),
        2 => V2(C),
        3 => V3(D),
        4 => V4(E),
        5 => V5(F),
        6 => V6(G),
        7 => V7(H),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::Covisitor;
    use std::fmt::Debug;

    type Number = Variant3<i32, String, f64>;

    /// Renders whatever alternative is active.
    struct Render;

    impl<T: Debug> Visitor<T> for Render {
        type Output = String;

        fn visit(self, value: T) -> String {
            format!("{value:?}")
        }
    }

    /// Distinguishes alternatives by type.
    struct Kind;

    impl Visitor<&i32> for Kind {
        type Output = &'static str;

        fn visit(self, _: &i32) -> &'static str {
            "int"
        }
    }

    impl Visitor<&String> for Kind {
        type Output = &'static str;

        fn visit(self, _: &String) -> &'static str {
            "string"
        }
    }

    impl Visitor<&f64> for Kind {
        type Output = &'static str;

        fn visit(self, _: &f64) -> &'static str {
            "float"
        }
    }

    struct Double;

    impl Visitor<&mut i32> for Double {
        type Output = ();

        fn visit(self, value: &mut i32) {
            *value *= 2;
        }
    }

    impl Visitor<&mut String> for Double {
        type Output = ();

        fn visit(self, value: &mut String) {
            *value = value.repeat(2);
        }
    }

    impl Visitor<&mut f64> for Double {
        type Output = ();

        fn visit(self, value: &mut f64) {
            *value *= 2.0;
        }
    }

    struct Pair;

    impl<X: Debug, Y: Debug> Covisitor<X, Y> for Pair {
        type Output = String;

        fn covisit(self, first: X, second: Y) -> String {
            format!("{first:?}/{second:?}")
        }
    }

    #[test]
    fn test_index() {
        assert_eq!(Number::V0(1).index(), 0);
        assert_eq!(Number::V1("a".into()).index(), 1);
        assert_eq!(Number::V2(1.5).index(), 2);
    }

    #[test]
    fn test_from_value_picks_alternative_by_type() {
        let v = Number::from_value(String::from("hi"));
        assert_eq!(v.index(), 1);
        assert!(v.holds::<String, _>());
        assert!(!v.holds::<i32, _>());
    }

    #[test]
    fn test_position_of_matches_index() {
        assert_eq!(Number::position_of::<i32, _>(), 0);
        assert_eq!(Number::position_of::<f64, _>(), 2);
        const TEXT: usize = Number::position_of::<String, _>();
        assert_eq!(Number::V1("a".into()).index(), TEXT);
        assert!(Number::V2(0.5).holds::<f64, _>());
        assert!(!Number::V2(0.5).holds::<String, _>());
    }

    #[test]
    fn test_plain_value_prefers_owned_alternative() {
        let x = 7;
        let owned = Variant2::<i32, &i32>::from_value(5);
        assert_eq!(owned.index(), 0);

        let borrowed = Variant2::<i32, &i32>::from_value(&x);
        assert_eq!(borrowed.index(), 1);
        assert_eq!(borrowed.get_at::<1>().copied(), Optional::Set(&7));
    }

    #[test]
    fn test_get_by_type() {
        let v = Number::V0(3);
        assert_eq!(v.get::<i32, _>(), Optional::Set(&3));
        assert_eq!(v.get::<f64, _>(), Optional::Unset);
        assert_eq!(v.into_get::<i32, _>(), Optional::Set(3));
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut v = Number::V1("a".into());
        if let Optional::Set(s) = v.get_mut::<String, _>() {
            s.push('b');
        }
        assert_eq!(v, Number::V1("ab".into()));
    }

    #[test]
    fn test_positional_access_with_duplicate_types() {
        let v = Variant2::<i32, i32>::from_at::<1>(4);
        assert_eq!(v.index(), 1);
        assert_eq!(v.get_at::<0>(), Optional::Unset);
        assert_eq!(v.get_at::<1>(), Optional::Set(&4));
        assert_eq!(v.into_at::<1>(), Optional::Set(4));
    }

    #[test]
    fn test_try_into_at_reports_active_position() {
        let v = Number::V2(0.5);
        assert_eq!(
            v.clone().try_into_at::<0>(),
            Err(KernelError::WrongAlternative {
                expected: 0,
                active: 2
            })
        );
        assert_eq!(v.try_into_at::<2>(), Ok(0.5));
    }

    #[test]
    fn test_emplace_switches_alternative() {
        let mut v = Number::V0(1);
        let s = v.emplace(String::from("x"));
        s.push('y');
        assert_eq!(v.index(), 1);
        assert_eq!(v.get::<String, _>(), Optional::Set(&String::from("xy")));

        *v.emplace_at::<0>(9) += 1;
        assert_eq!(v, Number::V0(10));
    }

    #[test]
    fn test_visit_dispatches_on_type() {
        assert_eq!(Number::V0(1).visit(Kind), "int");
        assert_eq!(Number::V1("s".into()).visit(Kind), "string");
        assert_eq!(Number::V2(2.0).visit(Kind), "float");
    }

    #[test]
    fn test_visit_access_paths() {
        let mut v = Number::V1("ab".into());
        assert_eq!(v.visit(Render), "\"ab\"");

        v.visit_mut(Double);
        assert_eq!(v.get::<String, _>(), Optional::Set(&String::from("abab")));

        assert_eq!(v.into_visit(Render), "\"abab\"");
    }

    #[test]
    fn test_visit_duplicate_types_share_handler() {
        let left = Variant2::<i32, i32>::V0(1);
        let right = Variant2::<i32, i32>::V1(2);
        assert_eq!(left.visit(Render), "1");
        assert_eq!(right.visit(Render), "2");
    }

    #[test]
    fn test_covisit() {
        let a = Number::V0(1);
        let b = Number::V1("b".into());
        assert_eq!(a.covisit(&b, Pair), "1/\"b\"");
        assert_eq!(b.covisit(&a, Pair), "\"b\"/1");
        assert_eq!(a.into_covisit(b, Pair), "1/\"b\"");
    }

    #[test]
    fn test_covisit_mut() {
        struct Transfer;

        impl Covisitor<&mut i32, &mut i32> for Transfer {
            type Output = ();

            fn covisit(self, first: &mut i32, second: &mut i32) {
                *first += *second;
                *second = 0;
            }
        }

        let mut a = Variant2::<i32, i32>::V0(1);
        let mut b = Variant2::<i32, i32>::V1(5);
        a.covisit_mut(&mut b, Transfer);
        assert_eq!(a, Variant2::V0(6));
        assert_eq!(b, Variant2::V1(0));
    }

    #[test]
    fn test_ord() {
        // index first, then value
        assert!(Number::V0(100) < Number::V1(String::new()));
        assert!(Number::V1("a".into()) < Number::V1("b".into()));
        assert!(Variant2::<i32, i32>::V0(9) < Variant2::V1(0));
        assert_eq!(Variant2::<i32, i32>::V1(3), Variant2::V1(3));
        assert_ne!(Variant2::<i32, i32>::V0(3), Variant2::V1(3));
    }

    #[test]
    fn test_default() {
        let v: Variant3<i32, String, f64> = Variant3::default();
        assert_eq!(v, Variant3::V0(0));

        #[derive(Debug, PartialEq)]
        struct NoDefault;
        let w: Variant2<String, NoDefault> = Variant2::default();
        assert_eq!(w.index(), 0);
    }

    #[test]
    fn test_wide_variant() {
        type Wide = Variant8<u8, u16, u32, u64, i8, i16, i32, i64>;
        let mut v = Wide::from_value(7_i16);
        assert_eq!(v.index(), 5);
        v.emplace(3_u64);
        assert_eq!(v.index(), 3);
        assert_eq!(v.get_at::<3>(), Optional::Set(&3));
        assert_eq!(v.visit(Render), "3");
    }
}
