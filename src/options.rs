//! Registration options and how defaults combine with per-call overrides.

use crate::lifetime::Lifetime;

/// One entry of the open set of registration options.
///
/// Options are applied in order, so when two entries touch the same field the
/// later one wins. A container applies its default options first and the
/// options passed to the register call after them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RegistrationOption {
    Lifetime(Lifetime),
    Name(String),
}

/// Sets the lifetime of a registration.
pub fn with_lifetime(lifetime: Lifetime) -> RegistrationOption {
    RegistrationOption::Lifetime(lifetime)
}

/// Names a registration. The empty name means anonymous.
pub fn with_name(name: impl Into<String>) -> RegistrationOption {
    RegistrationOption::Name(name.into())
}

/// The effective options of a single registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationOptions {
    pub lifetime: Lifetime,
    pub name: String,
}

impl RegistrationOptions {
    /// Builds options by applying `defaults` and then `overrides` on top of
    /// the zero value (per-request, anonymous).
    ///
    /// ```rust
    /// use ferrous_locator::{Lifetime, RegistrationOptions, with_lifetime, with_name};
    ///
    /// let options = RegistrationOptions::resolve(
    ///     &[with_lifetime(Lifetime::Static), with_name("a")],
    ///     &[with_name("b")],
    /// );
    /// assert_eq!(options.lifetime, Lifetime::Static);
    /// assert_eq!(options.name, "b");
    /// ```
    pub fn resolve(defaults: &[RegistrationOption], overrides: &[RegistrationOption]) -> Self {
        let mut options = Self::default();
        for option in defaults.iter().chain(overrides) {
            options.apply(option);
        }
        options
    }

    fn apply(&mut self, option: &RegistrationOption) {
        match option {
            RegistrationOption::Lifetime(lifetime) => self.lifetime = *lifetime,
            RegistrationOption::Name(name) => self.name = name.clone(),
        }
    }

    /// True when the registration has no name.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}
