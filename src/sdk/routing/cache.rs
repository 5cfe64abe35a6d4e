use super::geocode::GeocodedLocation;
use std::collections::HashMap;

/// Normalized form of a free-text address used as a cache key:
/// trimmed, lowercased, runs of whitespace collapsed.
#[derive(Eq, PartialEq, Hash, Clone, Debug)]
pub struct AddressKey(String);

impl AddressKey {
    pub fn new(address: &str) -> Self {
        let normalized = address
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// In-memory, session-scoped store of resolved addresses.
#[derive(Default, Debug)]
pub struct GeoCache {
    geocodes: HashMap<AddressKey, GeocodedLocation>,
}

impl GeoCache {
    pub fn get_geocode(&self, address: &str) -> Option<GeocodedLocation> {
        self.geocodes.get(&AddressKey::new(address)).cloned()
    }

    pub fn insert_geocode(&mut self, address: &str, location: GeocodedLocation) {
        self.geocodes.insert(AddressKey::new(address), location);
    }

    pub fn len(&self) -> usize {
        self.geocodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geocodes.is_empty()
    }
}
