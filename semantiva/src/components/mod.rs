//! Component contract and class handles.
//!
//! Components are the named, dynamically resolvable units of pipeline
//! behavior. A [`ComponentClass`] is what resolution returns; instantiating
//! it yields a fresh [`Component`].

mod class;

pub use class::{Component, ComponentClass, ComponentFactory, ComponentKind};
