//! Ordered, owning collection of a processor's parameters.
//!
//! The registry is filled once while a processor is built and is immutable
//! afterwards: there is no removal and no interior mutability beyond each
//! parameter's own atomic value. Insertion order is the order hosts display
//! and index parameters in.

#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};

use crate::error::ParamError;
use crate::param::ParamDescriptor;

/// Owns every [`ParamDescriptor`] of a processor.
///
/// # Example
///
/// ```rust
/// use crunch_core::{ParamDescriptor, ParamRegistry};
///
/// let mut registry = ParamRegistry::new();
/// registry.add(ParamDescriptor::normalized("mix", 1.0, "Mix").build()?)?;
/// registry.add(ParamDescriptor::ranged("drive", 1.0, 1.0, 25.0, "Drive").build()?)?;
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.index_of("drive"), Some(1));
/// assert!(registry.add(ParamDescriptor::normalized("mix", 0.0, "Mix").build()?).is_err());
/// # Ok::<(), crunch_core::ParamError>(())
/// ```
#[derive(Debug, Default)]
pub struct ParamRegistry {
    params: Vec<ParamDescriptor>,
}

impl ParamRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `capacity` parameters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            params: Vec::with_capacity(capacity),
        }
    }

    /// Appends a parameter, returning its host index.
    ///
    /// Fails with [`ParamError::DuplicateId`] if the identifier is taken; the
    /// rejected parameter is dropped.
    pub fn add(&mut self, param: ParamDescriptor) -> Result<usize, ParamError> {
        if self.contains(param.id().as_str()) {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = %param.id(), "rejected duplicate parameter");
            return Err(ParamError::DuplicateId(param.id().to_string()));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %param.id(), index = self.params.len(), "parameter registered");

        self.params.push(param);
        Ok(self.params.len() - 1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are registered.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter at host index `index`.
    pub fn get(&self, index: usize) -> Option<&ParamDescriptor> {
        self.params.get(index)
    }

    /// Parameter with identifier `id`.
    pub fn by_id(&self, id: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.id().as_str() == id)
    }

    /// Host index of the parameter with identifier `id`.
    ///
    /// Linear scan; meant for setup and state restore, not the audio path.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.params.iter().position(|p| p.id().as_str() == id)
    }

    /// Whether a parameter with identifier `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Parameters in host order.
    pub fn iter(&self) -> core::slice::Iter<'_, ParamDescriptor> {
        self.params.iter()
    }
}

impl<'a> IntoIterator for &'a ParamRegistry {
    type Item = &'a ParamDescriptor;
    type IntoIter = core::slice::Iter<'a, ParamDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    fn registry() -> ParamRegistry {
        let mut reg = ParamRegistry::with_capacity(3);
        reg.add(
            ParamDescriptor::ranged("mode", 0.0, 0.0, 8.0, "Mode")
                .build()
                .unwrap(),
        )
        .unwrap();
        reg.add(
            ParamDescriptor::ranged("drive", 1.0, 1.0, 25.0, "Drive")
                .with_precision(2)
                .build()
                .unwrap(),
        )
        .unwrap();
        reg.add(
            ParamDescriptor::normalized("mix", 1.0, "Mix")
                .build()
                .unwrap(),
        )
        .unwrap();
        reg
    }

    #[test]
    fn preserves_insertion_order() {
        let reg = registry();
        let ids: Vec<&str> = reg.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["mode", "drive", "mix"]);
        assert_eq!(reg.get(1).unwrap().name(), "Drive");
        assert!(reg.get(3).is_none());
    }

    #[test]
    fn lookup_by_id() {
        let reg = registry();
        assert_eq!(reg.index_of("mix"), Some(2));
        assert_eq!(reg.by_id("drive").unwrap().precision(), 2);
        assert!(reg.by_id("tone").is_none());
        assert!(reg.contains("mode"));
        assert!(!reg.contains("Mode"));
    }

    #[test]
    fn rejects_duplicates() {
        let mut reg = registry();
        let dup = ParamDescriptor::normalized("drive", 0.0, "Drive 2")
            .build()
            .unwrap();
        assert_eq!(
            reg.add(dup),
            Err(ParamError::DuplicateId("drive".to_string()))
        );
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.by_id("drive").unwrap().name(), "Drive");
    }

    #[test]
    fn empty_registry() {
        let reg = ParamRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert_eq!((&reg).into_iter().count(), 0);
    }
}
