//! Invocation engine: binds a callable's parameters through a resolver and
//! runs it.
//!
//! A callable is any `Fn` of up to eight [`Parameter`]s returning an
//! [`Outcome`]. Its [`Signature`] is derived from those types, so the binding
//! algorithm works over descriptors rather than concrete types:
//!
//! - a [`Rest<T>`] tail takes every registration of `T` as separate trailing
//!   arguments;
//! - `Vec<Arc<T>>` and `[Arc<T>; N]` take every registration of `T` as one
//!   sequence;
//! - `HashMap<String, Arc<T>>` and `IndexMap<String, Arc<T>>` take the named
//!   registrations of `T`;
//! - `Arc<T>` takes the single selected registration of `T`.
//!
//! Every argument is bound before the callable runs, so a failed lookup never
//! leads to a partial call.
//!
//! # Examples
//!
//! ```
//! use ferrous_locator::{invoke, Container};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn name(&self) -> String;
//! }
//!
//! struct Sample(String);
//! impl Greeter for Sample {
//!     fn name(&self) -> String { self.0.clone() }
//! }
//!
//! let mut container = Container::new();
//! container.register_instance(Arc::new("hello".to_string()), &[]);
//! container.register_instance::<dyn Greeter>(Arc::new(Sample("test".into())), &[]);
//!
//! let greeting = invoke(&container, |g: Arc<dyn Greeter>, s: Arc<String>| {
//!     Arc::new(format!("{} {}", s, g.name()))
//! })
//! .unwrap();
//! assert_eq!(*greeting, "hello test");
//! ```

pub mod outcome;
pub mod params;

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::registration::Factory;
use crate::traits::ResolverCore;

pub use outcome::{Outcome, ReturnShape, ReturnSlot};
pub use params::{Argument, ParamDescriptor, ParamKind, Parameter, Rest};

/// Bound arguments in declaration order.
pub type Arguments = SmallVec<[Argument; 4]>;

/// Parameter and return descriptors of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: SmallVec<[ParamDescriptor; 4]>,
    returns: ReturnShape,
}

impl Signature {
    pub fn new(params: SmallVec<[ParamDescriptor; 4]>, returns: ReturnShape) -> Self {
        Self { params, returns }
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    pub fn returns(&self) -> &ReturnShape {
        &self.returns
    }

    /// True when the last parameter is a variadic tail.
    pub fn is_variadic(&self) -> bool {
        matches!(self.params.last(), Some(param) if param.kind == ParamKind::Variadic)
    }

    /// Checks that the signature can be invoked: a variadic tail may only
    /// appear as the last parameter.
    pub fn validate(&self) -> DiResult<()> {
        let last = self.params.len().saturating_sub(1);
        for (index, param) in self.params.iter().enumerate() {
            if param.kind == ParamKind::Variadic && index != last {
                return Err(DiError::validation(format!(
                    "variadic parameter {} of '{}' must be the last parameter",
                    index,
                    param.element.type_name()
                )));
            }
        }
        Ok(())
    }

    /// The type a constructor with this signature produces.
    ///
    /// A constructor returns exactly one value, optionally followed by an
    /// error channel. Anything else is rejected.
    pub fn constructed_key(&self) -> DiResult<TypeKey> {
        self.validate()?;
        match self.returns.slots() {
            [ReturnSlot::Value(key)] | [ReturnSlot::Value(key), ReturnSlot::Error] => Ok(*key),
            [_, _] => Err(DiError::validation(
                "if a constructor has two return values, the second must be an error",
            )),
            _ => Err(DiError::validation(
                "a constructor must return a value and an optional error",
            )),
        }
    }
}

/// A function the engine can call with resolved arguments.
///
/// Implemented for every `Fn(P1, ..., Pn) -> O` with `n <= 8`, where each
/// `Pi` is a [`Parameter`] and `O` an [`Outcome`]. `Args` is the tuple of
/// parameter types and only serves to keep the implementations apart.
pub trait Callable<Args> {
    type Output: Outcome;

    fn signature(&self) -> Signature;

    /// Converts the bound arguments and calls the function. Conversion of
    /// every argument happens before the call.
    fn call(&self, arguments: Arguments) -> DiResult<Self::Output>;
}

fn next_argument(arguments: &mut impl Iterator<Item = Argument>) -> DiResult<Argument> {
    arguments
        .next()
        .ok_or_else(|| DiError::validation("fewer arguments bound than parameters declared"))
}

macro_rules! impl_callable {
    ($($param:ident),*) => {
        impl<Func, Out, $($param,)*> Callable<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out,
            Out: Outcome,
            $($param: Parameter,)*
        {
            type Output = Out;

            fn signature(&self) -> Signature {
                Signature::new(
                    smallvec![$(<$param as Parameter>::descriptor()),*],
                    Out::shape(),
                )
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, arguments: Arguments) -> DiResult<Out> {
                let mut arguments = arguments.into_iter();
                $(
                    let $param = <$param as Parameter>::from_argument(next_argument(&mut arguments)?)?;
                )*
                Ok((self)($($param),*))
            }
        }
    };
}

impl_callable!();
impl_callable!(P1);
impl_callable!(P1, P2);
impl_callable!(P1, P2, P3);
impl_callable!(P1, P2, P3, P4);
impl_callable!(P1, P2, P3, P4, P5);
impl_callable!(P1, P2, P3, P4, P5, P6);
impl_callable!(P1, P2, P3, P4, P5, P6, P7);
impl_callable!(P1, P2, P3, P4, P5, P6, P7, P8);

fn bind_one<R: ResolverCore + ?Sized>(resolver: &R, param: &ParamDescriptor) -> DiResult<Argument> {
    match param.kind {
        ParamKind::Variadic | ParamKind::Sequence { .. } => {
            resolver.resolve_all(&param.element).map(Argument::Sequence)
        }
        ParamKind::Map => resolver.resolve_map(&param.element).map(Argument::Map),
        ParamKind::Single => resolver.resolve(&param.element).map(Argument::Single),
    }
}

/// Resolves every parameter of `signature`, stopping at the first failure.
pub fn bind<R: ResolverCore + ?Sized>(resolver: &R, signature: &Signature) -> DiResult<Arguments> {
    signature
        .params()
        .iter()
        .map(|param| bind_one(resolver, param))
        .collect()
}

/// Binds the parameters of `callable` through `resolver`, calls it and
/// normalizes its return value.
///
/// Fails with the first resolution error, with [`DiError::Validation`] for a
/// misplaced variadic tail, and with [`DiError::Factory`] when the callable
/// returns `Err`. A callable returning `Err` never yields a value.
pub fn invoke<Args, F, R>(resolver: &R, callable: F) -> DiResult<<F::Output as Outcome>::Value>
where
    F: Callable<Args>,
    R: ResolverCore + ?Sized,
{
    invoke_ref::<Args, F, R>(resolver, &callable)
}

pub(crate) fn invoke_ref<Args, F, R>(resolver: &R, callable: &F) -> DiResult<<F::Output as Outcome>::Value>
where
    F: Callable<Args>,
    R: ResolverCore + ?Sized,
{
    let signature = callable.signature();
    signature.validate()?;
    let arguments = bind(resolver, &signature)?;
    callable.call(arguments)?.settle()
}

/// Validates `constructor` and wraps it into a factory registered under the
/// type it returns.
pub(crate) fn constructor_factory<Args, F>(constructor: F) -> DiResult<(TypeKey, Factory)>
where
    F: Callable<Args> + Send + Sync + 'static,
    Args: 'static,
{
    let key = constructor.signature().constructed_key()?;
    let factory: Factory = Arc::new(move |resolver: &dyn ResolverCore| {
        let value = invoke_ref::<Args, F, dyn ResolverCore>(resolver, &constructor)?;
        <F::Output as Outcome>::erase(value).ok_or_else(|| {
            DiError::validation(format!("constructor for '{}' produced no value", key.type_name()))
        })
    });
    Ok((key, factory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn signature_of<Args, F: Callable<Args>>(callable: F) -> Signature {
        callable.signature()
    }

    #[test]
    fn signature_lists_parameters_in_order() {
        let signature = signature_of(|_: Arc<u8>, _: Vec<Arc<u16>>, _: HashMap<String, Arc<u32>>| ());
        let kinds: Vec<ParamKind> = signature.params().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![ParamKind::Single, ParamKind::Sequence { len: None }, ParamKind::Map]
        );
        assert!(!signature.is_variadic());
    }

    #[test]
    fn variadic_must_be_last() {
        let signature = signature_of(|_: Rest<u8>, _: Arc<u16>| ());
        assert!(matches!(signature.validate(), Err(DiError::Validation(_))));

        let signature = signature_of(|_: Arc<u16>, _: Rest<u8>| ());
        assert!(signature.validate().is_ok());
        assert!(signature.is_variadic());
    }

    #[test]
    fn constructor_shapes() {
        assert!(signature_of(|| Arc::new(1u8)).constructed_key().is_ok());
        assert!(signature_of(|| -> Result<Arc<u8>, std::io::Error> { Ok(Arc::new(1)) })
            .constructed_key()
            .is_ok());
        assert!(signature_of(|| ()).constructed_key().is_err());
        assert!(signature_of(|| -> Result<(), std::io::Error> { Ok(()) })
            .constructed_key()
            .is_err());
        assert!(signature_of(|| (Arc::new(1u8), Arc::new(2u16)))
            .constructed_key()
            .is_err());
    }
}
