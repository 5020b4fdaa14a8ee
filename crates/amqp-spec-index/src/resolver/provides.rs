// crates/amqp-spec-index/src/resolver/provides.rs

//! Capability registries: which types provide a capability, which fields require it.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Maps a capability name to the entries that mention it, in registration order.
///
/// Used with type ids for `provides` and with (type id, field position) pairs
/// for `requires`. Capability names need not be declared types.
#[derive(Debug, Clone)]
pub(crate) struct CapabilityIndex<T> {
    by_capability: BTreeMap<String, Vec<T>>,
}

impl<T> Default for CapabilityIndex<T> {
    fn default() -> Self {
        Self {
            by_capability: BTreeMap::new(),
        }
    }
}

impl<T: Copy> CapabilityIndex<T> {
    pub(crate) fn register(&mut self, capability: &str, entry: T) {
        self.by_capability
            .entry(String::from(capability))
            .or_default()
            .push(entry);
    }

    /// Entries for `capability`, empty if nothing declared it.
    pub(crate) fn get(&self, capability: &str) -> &[T] {
        self.by_capability
            .get(capability)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Registered capability names, sorted.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.by_capability.keys().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_capability.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_order_per_capability() {
        let mut index = CapabilityIndex::default();
        index.register("delivery-state", 3usize);
        index.register("outcome", 3);
        index.register("delivery-state", 1);

        assert_eq!(index.get("delivery-state"), [3, 1]);
        assert_eq!(index.get("outcome"), [3]);
        assert!(index.get("frame").is_empty());
        assert_eq!(index.names().collect::<Vec<_>>(), ["delivery-state", "outcome"]);
        assert_eq!(index.len(), 2);
    }
}
