//! Traits for the read side of the locator.

pub mod resolver;

pub use resolver::{Resolver, ResolverCore};
