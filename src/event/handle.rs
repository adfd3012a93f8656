use std::fmt;

use crate::key::{Key, RegistryId};

/// Removal token for one registration.
///
/// A `Handle` only means something to the [`Event`](super::Event) that
/// issued it. Removing a handle that is the sentinel, has already been
/// removed, or came from another event does nothing.
#[derive(PartialEq, Eq, Hash, Default)]
pub struct Handle {
    origin: Option<RegistryId>,
    key: Option<Key>,
}

impl Handle {

    /// The sentinel handle, returned when no handler was registered.
    pub fn none() -> Self {
        Self::default()
    }

    pub (crate) fn new(origin: RegistryId, key: Key) -> Self {
        Self {
            origin: Some(origin),
            key: Some(key),
        }
    }

    pub fn is_none(&self) -> bool {
        self.key.is_none()
    }

    pub (crate) fn is_from(&self, registry: RegistryId) -> bool {
        self.origin == Some(registry)
    }

    pub (crate) fn key(&self) -> Option<Key> {
        self.key
    }

    // Leaves the origin in place so a spent handle still reads as ours.
    pub (crate) fn invalidate(&mut self) {
        self.key = None;
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.origin, self.key) {
            (Some(origin), Some(key)) => write!(
                f,
                "Handle({}:{})",
                origin.as_u64(),
                key.as_u64()
            ),
            _ => write!(f, "Handle(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyGenerator;

    #[test]
    fn test_sentinel() {
        let handle = Handle::none();
        assert!(handle.is_none());
        assert_eq!(handle, Handle::default());
        assert_eq!(format!("{:?}", handle), "Handle(none)");
    }

    #[test]
    fn test_origin() {
        let origin = RegistryId::next();
        let other = RegistryId::next();
        let mut keys = KeyGenerator::new();
        let handle = Handle::new(origin, keys.next());
        assert!(!handle.is_none());
        assert!(handle.is_from(origin));
        assert!(!handle.is_from(other));
        assert!(!Handle::none().is_from(origin));
    }

    #[test]
    fn test_invalidate() {
        let origin = RegistryId::next();
        let mut keys = KeyGenerator::new();
        let mut handle = Handle::new(origin, keys.next());
        handle.invalidate();
        assert!(handle.is_none());
        assert!(handle.key().is_none());
        assert!(handle.is_from(origin));
    }
}
