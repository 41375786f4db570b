//! Field injection into records that declare their injection points.
//!
//! Rust has no runtime field reflection, so a record lists the fields it
//! wants injected through [`Injectable`]. Fields that are not listed are never
//! touched. A field listed with [`InjectionPoints::read_only`] is marked but not
//! settable and is skipped without error.

use std::sync::Arc;

use crate::error::DiResult;
use crate::instance::Instance;
use crate::key::{key_of, TypeKey};
use crate::traits::ResolverCore;

type Assign<S> = Box<dyn Fn(&mut S, Instance) -> DiResult<()> + Send + Sync>;

struct InjectionPoint<S> {
    field: &'static str,
    key: TypeKey,
    assign: Option<Assign<S>>,
}

/// Ordered list of the fields of `S` that take part in injection.
pub struct InjectionPoints<S> {
    points: Vec<InjectionPoint<S>>,
}

impl<S: 'static> InjectionPoints<S> {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Declares a settable field of type `Arc<T>`, assigned through `assign`.
    pub fn field<T, F>(mut self, field: &'static str, assign: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut S, Arc<T>) + Send + Sync + 'static,
    {
        let assign: Assign<S> = Box::new(move |target: &mut S, instance: Instance| {
            assign(target, instance.downcast::<T>()?);
            Ok(())
        });
        self.points.push(InjectionPoint {
            field,
            key: key_of::<T>(),
            assign: Some(assign),
        });
        self
    }

    /// Declares a marked field that cannot be assigned. Injection skips it.
    pub fn read_only<T: ?Sized + 'static>(mut self, field: &'static str) -> Self {
        self.points.push(InjectionPoint {
            field,
            key: key_of::<T>(),
            assign: None,
        });
        self
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.points.iter().map(|point| point.field)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<S: 'static> Default for InjectionPoints<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A record whose fields can be filled by [`inject`].
///
/// # Examples
///
/// ```
/// use ferrous_locator::{inject, Container, Injectable, InjectionPoints};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct Fixed;
/// impl Clock for Fixed {
///     fn now(&self) -> u64 { 42 }
/// }
///
/// #[derive(Default)]
/// struct Report {
///     clock: Option<Arc<dyn Clock>>,
///     title: String,
/// }
///
/// impl Injectable for Report {
///     fn injection_points() -> InjectionPoints<Self> {
///         InjectionPoints::new().field("clock", |r: &mut Report, c: Arc<dyn Clock>| r.clock = Some(c))
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_instance::<dyn Clock>(Arc::new(Fixed), &[]);
///
/// let mut report = Report::default();
/// inject(&container, &mut report).unwrap();
/// assert_eq!(report.clock.unwrap().now(), 42);
/// assert!(report.title.is_empty());
/// ```
pub trait Injectable: Sized + 'static {
    fn injection_points() -> InjectionPoints<Self>;
}

/// Resolves and assigns every settable injection point of `target`, in
/// declaration order.
///
/// The first failure is returned immediately. Fields assigned before it keep
/// their new values.
pub fn inject<S, R>(resolver: &R, target: &mut S) -> DiResult<()>
where
    S: Injectable,
    R: ResolverCore + ?Sized,
{
    for point in S::injection_points().points {
        let Some(assign) = point.assign else {
            tracing::trace!(field = point.field, "skipping read-only injection point");
            continue;
        };
        let instance = resolver.resolve(&point.key)?;
        assign(target, instance)?;
    }
    Ok(())
}
