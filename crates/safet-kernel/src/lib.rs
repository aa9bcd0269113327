//! Safet Kernel - Optional and Variant storage
//!
//! This crate provides the two value-storage primitives the rest of Safet is
//! built on, plus a small scope guard.
//!
//! # Overview
//!
//! - [`Optional<T>`]: a slot holding zero or one value, with separate
//!   borrow, mutable-borrow and move access paths for every combinator
//! - [`Variant2`] .. [`Variant8`]: closed tagged unions reached by type or by
//!   position, visited with [`Visitor`] and co-visited with [`Covisitor`]
//! - [`Finally`]: runs an action when a scope ends
//!
//! # Conventions
//!
//! - Borrowed payloads are reference types (`Optional<&T>`); assigning a new
//!   borrow rebinds the slot and never writes through the old referent
//! - No operation leaves storage half-initialised: a panicking constructor
//!   leaves an Optional `Unset`, and a Variant keeps its previous alternative
//! - Reading a value that may be absent goes through a combinator or through
//!   [`Optional::require`], which reports [`KernelError`]

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod collapse;
pub mod error;
pub mod finally;
pub mod optional;
pub mod variant;
pub mod visit;

pub use collapse::{Collapse, Innermost, Nested};
pub use error::{KernelError, Result};
pub use finally::Finally;
pub use optional::Optional;
pub use variant::{
    Alternative, At, Index, Variant2, Variant3, Variant4, Variant5, Variant6, Variant7, Variant8,
};
pub use visit::{Cofirst, Cosecond, Covisitor, Visitable, Visitor};
