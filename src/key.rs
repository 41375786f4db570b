//! Type descriptors used as registry keys.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical identity of a type.
///
/// Two keys are equal exactly when they describe the same type. The type
/// name is carried for diagnostics only and takes no part in equality or
/// hashing. Trait objects are keyed by the `dyn Trait` type itself, so a
/// registration under `dyn Greeter` is never found by asking for a concrete
/// implementor.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::TypeKey;
///
/// trait Greeter {}
///
/// assert_eq!(TypeKey::of::<String>(), TypeKey::of::<String>());
/// assert_ne!(TypeKey::of::<String>(), TypeKey::of::<str>());
/// assert_eq!(TypeKey::of::<u32>().type_name(), "u32");
/// assert!(TypeKey::of::<dyn Greeter>().type_name().starts_with("dyn "));
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Descriptor for `T`. Unsized types such as `str` and `dyn Trait` are allowed.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `std::any::type_name` of the described type.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// Shorthand used throughout the registration helpers
#[inline(always)]
pub fn key_of<T: ?Sized + 'static>() -> TypeKey {
    TypeKey::of::<T>()
}
