//! Type-erased values handed between the store, the resolver and the engines.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// A type-erased `Arc<T>`.
///
/// The erased box holds the `Arc<T>` itself rather than `T`, which lets unsized
/// targets such as `dyn Trait` or `str` travel through the same channel as
/// concrete types. Cloning an `Instance` clones the inner `Arc`, so every copy
/// points at the same value.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{DiError, Instance};
/// use std::sync::Arc;
///
/// let shared = Arc::new(7u32);
/// let instance = Instance::new(shared.clone());
///
/// let back = instance.downcast::<u32>().unwrap();
/// assert!(Arc::ptr_eq(&shared, &back));
/// assert!(matches!(instance.downcast::<u64>(), Err(DiError::TypeMismatch { .. })));
/// ```
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Recovers the shared `Arc<T>`.
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.value
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(DiError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Name of the type this instance was created from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("type", &self.type_name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named: Send + Sync {
        fn name(&self) -> &str;
    }

    struct Fixed;

    impl Named for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn trait_objects_round_trip() {
        let named: Arc<dyn Named> = Arc::new(Fixed);
        let instance = Instance::new(named);
        assert!(instance.is::<dyn Named>());
        assert_eq!(instance.downcast::<dyn Named>().unwrap().name(), "fixed");
    }

    #[test]
    fn mismatch_reports_both_types() {
        let instance = Instance::new(Arc::new(1u8));
        match instance.downcast::<String>() {
            Err(DiError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "alloc::string::String");
                assert_eq!(found, "u8");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
