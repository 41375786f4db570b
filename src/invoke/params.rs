//! Parameter descriptors and the types a callable may take as arguments.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::{key_of, TypeKey};

/// How a parameter is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `Arc<T>`, bound with `resolve`.
    Single,
    /// `Vec<Arc<T>>` or `[Arc<T>; N]`, bound with `resolve_all`. `len` is set
    /// for fixed arrays.
    Sequence { len: Option<usize> },
    /// [`Rest<T>`], the variadic tail, bound with `resolve_all`. Only valid as
    /// the last parameter.
    Variadic,
    /// String-keyed map of `Arc<T>`, bound with `resolve_map`.
    Map,
}

/// Descriptor of one parameter: its binding kind and the element type that
/// is looked up in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub kind: ParamKind,
    pub element: TypeKey,
}

impl ParamDescriptor {
    pub fn new(kind: ParamKind, element: TypeKey) -> Self {
        Self { kind, element }
    }
}

/// A bound argument, still erased.
#[derive(Debug, Clone)]
pub enum Argument {
    Single(Instance),
    Sequence(Vec<Instance>),
    Map(IndexMap<String, Instance>),
}

impl Argument {
    fn shape(&self) -> &'static str {
        match self {
            Argument::Single(_) => "single value",
            Argument::Sequence(_) => "sequence",
            Argument::Map(_) => "map",
        }
    }
}

/// A type usable as a parameter of an invoked callable.
///
/// The descriptor tells the engine which resolver call produces the argument;
/// `from_argument` turns the erased result back into the parameter type.
pub trait Parameter: Sized + 'static {
    fn descriptor() -> ParamDescriptor;

    fn from_argument(argument: Argument) -> DiResult<Self>;
}

fn unexpected<P>(argument: &Argument) -> DiError {
    DiError::validation(format!(
        "parameter of type '{}' cannot be bound from a {}",
        std::any::type_name::<P>(),
        argument.shape()
    ))
}

fn downcast_all<T: ?Sized + Send + Sync + 'static>(instances: Vec<Instance>) -> DiResult<Vec<Arc<T>>> {
    instances.iter().map(Instance::downcast::<T>).collect()
}

impl<T: ?Sized + Send + Sync + 'static> Parameter for Arc<T> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Single, key_of::<T>())
    }

    fn from_argument(argument: Argument) -> DiResult<Self> {
        match argument {
            Argument::Single(instance) => instance.downcast::<T>(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Parameter for Vec<Arc<T>> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Sequence { len: None }, key_of::<T>())
    }

    fn from_argument(argument: Argument) -> DiResult<Self> {
        match argument {
            Argument::Sequence(instances) => downcast_all(instances),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static, const N: usize> Parameter for [Arc<T>; N] {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Sequence { len: Some(N) }, key_of::<T>())
    }

    fn from_argument(argument: Argument) -> DiResult<Self> {
        match argument {
            Argument::Sequence(instances) => {
                let found = instances.len();
                downcast_all::<T>(instances)?.try_into().map_err(|_| {
                    DiError::validation(format!(
                        "array parameter of '{}' expects {} elements, {} registered",
                        std::any::type_name::<T>(),
                        N,
                        found
                    ))
                })
            }
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Parameter for HashMap<String, Arc<T>> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Map, key_of::<T>())
    }

    fn from_argument(argument: Argument) -> DiResult<Self> {
        match argument {
            Argument::Map(instances) => instances
                .into_iter()
                .map(|(name, instance)| Ok((name, instance.downcast::<T>()?)))
                .collect(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Parameter for IndexMap<String, Arc<T>> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Map, key_of::<T>())
    }

    fn from_argument(argument: Argument) -> DiResult<Self> {
        match argument {
            Argument::Map(instances) => instances
                .into_iter()
                .map(|(name, instance)| Ok((name, instance.downcast::<T>()?)))
                .collect(),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}

/// Variadic tail of a callable.
///
/// Every registration of `T` is passed as its own trailing argument, in
/// `resolve_all` order. Must be the last parameter.
///
/// ```rust
/// use ferrous_locator::{invoke, Container, Rest};
/// use std::sync::Arc;
///
/// let mut container = Container::new();
/// container.register_instance(Arc::new(1u32), &[]);
/// container.register_instance(Arc::new(2u32), &[]);
///
/// let sum = invoke(&container, |numbers: Rest<u32>| {
///     Arc::new(numbers.iter().map(|n| **n).sum::<u32>())
/// })
/// .unwrap();
/// assert_eq!(*sum, 3);
/// ```
pub struct Rest<T: ?Sized>(Vec<Arc<T>>);

impl<T: ?Sized> Rest<T> {
    pub fn into_vec(self) -> Vec<Arc<T>> {
        self.0
    }
}

impl<T: ?Sized> Deref for Rest<T> {
    type Target = [Arc<T>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: ?Sized> IntoIterator for Rest<T> {
    type Item = Arc<T>;
    type IntoIter = std::vec::IntoIter<Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: ?Sized> IntoIterator for &'a Rest<T> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: ?Sized> fmt::Debug for Rest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rest")
            .field("type", &std::any::type_name::<T>())
            .field("len", &self.0.len())
            .finish()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Parameter for Rest<T> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Variadic, key_of::<T>())
    }

    fn from_argument(argument: Argument) -> DiResult<Self> {
        match argument {
            Argument::Sequence(instances) => downcast_all(instances).map(Rest),
            other => Err(unexpected::<Self>(&other)),
        }
    }
}
