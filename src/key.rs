use std::sync::atomic::{
    AtomicU64,
    Ordering
};

// Identifies one registration inside a single registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub (crate) struct Key(u64);

impl Key {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

// Monotonic, owned by a registry and only advanced under its lock,
// so keys are never reused for the registry's lifetime.
#[derive(Debug)]
pub (crate) struct KeyGenerator {
    next: u64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> Key {
        let key = Key(self.next);
        self.next += 1;
        key
    }
}

// Tags every handle with the registry that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub (crate) struct RegistryId(u64);

impl RegistryId {
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
