//! The catalog of gestures an [`Estimator`] matches against.
//!
//! A [`Registry`] is built once at startup and only read afterwards. Its iteration order is the
//! registration order, which breaks ties between equally scored gestures.
//!
//! [`Estimator`]: crate::estimator::Estimator

use std::fmt;

use itertools::Itertools;

use crate::gesture::{builtin_descriptor, DescriptorError, GestureDescriptor, GestureName};

/// An ordered collection of [`GestureDescriptor`]s with unique names.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: Vec<GestureDescriptor>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing all built-in gestures, in [`GestureName::ALL`] order.
    pub fn builtin() -> Result<Self, BuildError> {
        let mut registry = Self::new();
        for name in GestureName::ALL {
            registry.register(builtin_descriptor(name)?)?;
        }
        log::debug!(
            "registered {} gestures: {}",
            registry.len(),
            registry.descriptors().iter().map(|d| d.name()).join(", ")
        );
        Ok(registry)
    }

    /// Adds a descriptor to the end of the registry.
    ///
    /// If a descriptor with the same name is already registered, this returns an error and leaves
    /// the registry unchanged.
    pub fn register(&mut self, descriptor: GestureDescriptor) -> Result<(), DuplicateGestureName> {
        if self.get(descriptor.name()).is_some() {
            return Err(DuplicateGestureName(descriptor.name().to_string()));
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Returns all registered descriptors, in registration order.
    pub fn descriptors(&self) -> &[GestureDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, name: &str) -> Option<&GestureDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Error returned by [`Registry::register`] when the gesture name is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGestureName(pub String);

impl fmt::Display for DuplicateGestureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a gesture named '{}' is already registered", self.0)
    }
}

impl std::error::Error for DuplicateGestureName {}

/// Error returned by [`Registry::builtin`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    Descriptor(DescriptorError),
    Duplicate(DuplicateGestureName),
}

impl From<DescriptorError> for BuildError {
    fn from(e: DescriptorError) -> Self {
        Self::Descriptor(e)
    }
}

impl From<DuplicateGestureName> for BuildError {
    fn from(e: DuplicateGestureName) -> Self {
        Self::Duplicate(e)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor(e) => e.fmt(f),
            Self::Duplicate(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Descriptor(e) => Some(e),
            Self::Duplicate(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::landmark::Finger;
    use crate::pose::Curl;

    use super::*;

    fn descriptor(name: &str, curl: Curl) -> GestureDescriptor {
        Finger::ALL
            .into_iter()
            .fold(GestureDescriptor::builder(name), |b, finger| {
                b.curl(finger, curl, 1.0)
            })
            .build()
            .unwrap()
    }

    #[test]
    fn registration_order_is_kept() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry.register(descriptor("b", Curl::NoCurl)).unwrap();
        registry.register(descriptor("a", Curl::NoCurl)).unwrap();
        registry.register(descriptor("c", Curl::NoCurl)).unwrap();
        let names = registry.descriptors().iter().map(|d| d.name()).collect::<Vec<_>>();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn duplicate_name_leaves_registry_unchanged() {
        let mut registry = Registry::new();
        let first = descriptor("fist", Curl::FullCurl);
        registry.register(first.clone()).unwrap();
        registry.register(descriptor("open", Curl::NoCurl)).unwrap();

        let before = registry.descriptors().to_vec();
        assert_eq!(
            registry.register(descriptor("fist", Curl::NoCurl)),
            Err(DuplicateGestureName("fist".into()))
        );
        assert_eq!(registry.descriptors(), &before[..]);
        assert_eq!(registry.get("fist"), Some(&first));
    }

    #[test]
    fn builtin_registry() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.len(), GestureName::ALL.len());
        for (desc, name) in registry.descriptors().iter().zip(GestureName::ALL) {
            assert_eq!(desc.name(), name.as_str());
        }
        assert!(registry.get("raised_fist").is_some());
        assert!(registry.get("jazz_hands").is_none());
    }
}
