//! # ferrous-locator
//!
//! A runtime service locator: register values, factories and constructor
//! functions under their type (optionally under a name), then resolve them
//! one at a time, all at once, by name, or as a name-keyed map.
//!
//! ## Features
//!
//! - **Two lifetimes**: static registrations run their factory at most once
//!   and memoize the outcome; per-request registrations run it every time
//! - **Named registrations**: several implementations of one type, looked up
//!   by name or collected into a map
//! - **Trait objects**: register and resolve `dyn Trait` directly
//! - **Invocation**: call any function whose parameters the container can
//!   supply, including sequences, maps and a variadic tail
//! - **Field injection**: fill the declared fields of an existing value
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_locator::{Container, Lifetime, Resolver, with_lifetime, with_name};
//! use std::sync::Arc;
//!
//! trait Store: Send + Sync {
//!     fn kind(&self) -> &'static str;
//! }
//!
//! struct Memory;
//! impl Store for Memory {
//!     fn kind(&self) -> &'static str { "memory" }
//! }
//!
//! struct Disk;
//! impl Store for Disk {
//!     fn kind(&self) -> &'static str { "disk" }
//! }
//!
//! let mut container = Container::new();
//! container.register_instance::<dyn Store>(Arc::new(Memory), &[with_name("memory")]);
//! container.register_dynamic::<dyn Store, _>(
//!     |_| Ok(Arc::new(Disk)),
//!     &[with_name("disk"), with_lifetime(Lifetime::Static)],
//! );
//!
//! assert_eq!(container.get_named::<dyn Store>("disk").unwrap().kind(), "disk");
//! assert_eq!(container.get_map::<dyn Store>().unwrap().len(), 2);
//! ```
//!
//! ## Invocation
//!
//! ```rust
//! use ferrous_locator::{invoke, Container};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let mut container = Container::new();
//! container.register_instance(Arc::new(2u64), &[ferrous_locator::with_name("two")]);
//! container.register_instance(Arc::new(3u64), &[ferrous_locator::with_name("three")]);
//!
//! let total = invoke(&container, |values: HashMap<String, Arc<u64>>| {
//!     Arc::new(values.values().map(|v| **v).sum::<u64>())
//! })
//! .unwrap();
//! assert_eq!(*total, 5);
//! ```

pub mod container;
pub mod error;
pub mod inject;
pub mod instance;
pub mod invoke;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod options;
pub mod traits;

mod registration;

pub use container::{Container, ContainerBuilder};
pub use error::{BoxError, DiError, DiResult};
pub use inject::{inject, Injectable, InjectionPoints};
pub use instance::Instance;
pub use invoke::{
    bind, invoke, Argument, Arguments, Callable, Outcome, ParamDescriptor, ParamKind, Parameter, Rest,
    ReturnShape, ReturnSlot, Signature,
};
pub use key::{key_of, TypeKey};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver};
pub use options::{with_lifetime, with_name, RegistrationOption, RegistrationOptions};
pub use registration::Factory;
pub use traits::{Resolver, ResolverCore};

pub use indexmap::IndexMap;
