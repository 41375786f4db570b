//! Return shapes and how they are normalized into a `DiResult`.

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::error::{BoxError, DiError, DiResult};
use crate::instance::Instance;
use crate::key::{key_of, TypeKey};

/// One declared return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnSlot {
    Value(TypeKey),
    /// The error channel of a `Result`.
    Error,
}

/// The declared return values of a callable, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReturnShape(SmallVec<[ReturnSlot; 2]>);

impl ReturnShape {
    pub fn new(slots: impl IntoIterator<Item = ReturnSlot>) -> Self {
        Self(slots.into_iter().collect())
    }

    pub fn slots(&self) -> &[ReturnSlot] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A type a callable may return.
///
/// | Return type          | Shape            |
/// |----------------------|------------------|
/// | `()`                 | nothing          |
/// | `Arc<T>`             | value            |
/// | `Result<Arc<T>, E>`  | value, error     |
/// | `Result<(), E>`      | error            |
/// | `(Arc<T>, Arc<U>)`   | value, value     |
///
/// An `Err` in the error channel becomes [`DiError::Factory`] and no value is
/// returned alongside it.
pub trait Outcome: Sized {
    /// What `invoke` hands back on success.
    type Value;

    fn shape() -> ReturnShape;

    fn settle(self) -> DiResult<Self::Value>;

    /// Erases a settled value for storage. `None` for shapes that do not
    /// produce exactly one value.
    fn erase(value: Self::Value) -> Option<Instance>;
}

impl Outcome for () {
    type Value = ();

    fn shape() -> ReturnShape {
        ReturnShape::default()
    }

    fn settle(self) -> DiResult<()> {
        Ok(())
    }

    fn erase(_value: ()) -> Option<Instance> {
        None
    }
}

impl<T: ?Sized + Send + Sync + 'static> Outcome for Arc<T> {
    type Value = Arc<T>;

    fn shape() -> ReturnShape {
        ReturnShape(smallvec![ReturnSlot::Value(key_of::<T>())])
    }

    fn settle(self) -> DiResult<Arc<T>> {
        Ok(self)
    }

    fn erase(value: Arc<T>) -> Option<Instance> {
        Some(Instance::new(value))
    }
}

impl<T, E> Outcome for Result<Arc<T>, E>
where
    T: ?Sized + Send + Sync + 'static,
    E: Into<BoxError>,
{
    type Value = Arc<T>;

    fn shape() -> ReturnShape {
        ReturnShape(smallvec![ReturnSlot::Value(key_of::<T>()), ReturnSlot::Error])
    }

    fn settle(self) -> DiResult<Arc<T>> {
        self.map_err(DiError::factory)
    }

    fn erase(value: Arc<T>) -> Option<Instance> {
        Some(Instance::new(value))
    }
}

impl<E: Into<BoxError>> Outcome for Result<(), E> {
    type Value = ();

    fn shape() -> ReturnShape {
        ReturnShape(smallvec![ReturnSlot::Error])
    }

    fn settle(self) -> DiResult<()> {
        self.map_err(DiError::factory)
    }

    fn erase(_value: ()) -> Option<Instance> {
        None
    }
}

impl<T, U> Outcome for (Arc<T>, Arc<U>)
where
    T: ?Sized + Send + Sync + 'static,
    U: ?Sized + Send + Sync + 'static,
{
    type Value = (Arc<T>, Arc<U>);

    fn shape() -> ReturnShape {
        ReturnShape(smallvec![
            ReturnSlot::Value(key_of::<T>()),
            ReturnSlot::Value(key_of::<U>())
        ])
    }

    fn settle(self) -> DiResult<Self::Value> {
        Ok(self)
    }

    fn erase(_value: Self::Value) -> Option<Instance> {
        None
    }
}
