//! MQTT topic registry
//!
//! An ordered list of subscribed topics. The slot index is the dispatch key:
//! inbound messages are routed by the slot their topic resolves to. Slot 0
//! is the device configuration topic.
//!
//! Every mutation bumps a revision counter; the supervisor resubscribes the
//! whole registry when it sees a revision it has not subscribed yet.

use heapless::Vec;
use wio_protocol::topic::{topic, Topic, TopicError};

/// Maximum number of topics
pub const MAX_TOPICS: usize = 8;

/// Slot of the configuration topic
pub const CONFIG_SLOT: usize = 0;

/// Slot of the function topic rewritten by configuration messages
pub const FUNCTION_SLOT: usize = 1;

/// Registry mutation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No free slot
    Full,
    /// Slot index beyond the registered topics
    InvalidSlot(usize),
    /// Topic text rejected
    Topic(TopicError),
}

impl From<TopicError> for RegistryError {
    fn from(e: TopicError) -> Self {
        RegistryError::Topic(e)
    }
}

/// Dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Topic is not registered
    NotFound,
}

/// Ordered topic list
#[derive(Debug, Clone, Default)]
pub struct TopicRegistry {
    topics: Vec<Topic, MAX_TOPICS>,
    revision: u32,
}

impl TopicRegistry {
    pub const fn new() -> Self {
        Self {
            topics: Vec::new(),
            revision: 0,
        }
    }

    /// Build a registry from topics in slot order
    pub fn from_topics(topics: &[&str]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for t in topics {
            registry.push(t)?;
        }
        Ok(registry)
    }

    /// Append a topic, returning its slot
    pub fn push(&mut self, text: &str) -> Result<usize, RegistryError> {
        let t = topic(text)?;
        self.topics.push(t).map_err(|_| RegistryError::Full)?;
        self.revision = self.revision.wrapping_add(1);
        Ok(self.topics.len() - 1)
    }

    /// Replace the topic in `slot`
    ///
    /// Returns `true` if the topic changed. An unchanged topic does not bump
    /// the revision.
    pub fn set(&mut self, slot: usize, text: &str) -> Result<bool, RegistryError> {
        let t = topic(text)?;
        let current = self
            .topics
            .get_mut(slot)
            .ok_or(RegistryError::InvalidSlot(slot))?;
        if *current == t {
            return Ok(false);
        }
        *current = t;
        self.revision = self.revision.wrapping_add(1);
        Ok(true)
    }

    /// Topic in `slot`
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.topics.get(slot).map(|t| t.as_str())
    }

    /// Slot of an exactly matching topic
    ///
    /// The first match wins if a topic is registered twice.
    pub fn resolve(&self, text: &str) -> Result<usize, DispatchError> {
        self.topics
            .iter()
            .position(|t| t.as_str() == text)
            .ok_or(DispatchError::NotFound)
    }

    /// Topics in slot order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Mutation counter
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let registry = TopicRegistry::from_topics(&["cfg/device-1", "home/1OG/Heizung"]).unwrap();
        assert_eq!(registry.resolve("cfg/device-1"), Ok(0));
        assert_eq!(registry.resolve("home/1OG/Heizung"), Ok(1));
        assert_eq!(registry.resolve("home/1OG"), Err(DispatchError::NotFound));
        assert_eq!(registry.resolve(""), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_duplicate_resolves_first() {
        let registry = TopicRegistry::from_topics(&["a", "b", "a"]).unwrap();
        assert_eq!(registry.resolve("a"), Ok(0));
    }

    #[test]
    fn test_set_bumps_revision() {
        let mut registry = TopicRegistry::from_topics(&["cfg/x", "old"]).unwrap();
        let rev = registry.revision();

        assert_eq!(registry.set(1, "old"), Ok(false));
        assert_eq!(registry.revision(), rev);

        assert_eq!(registry.set(1, "new"), Ok(true));
        assert_ne!(registry.revision(), rev);
        assert_eq!(registry.get(1), Some("new"));
        assert_eq!(registry.resolve("old"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_set_invalid_slot() {
        let mut registry = TopicRegistry::from_topics(&["cfg/x"]).unwrap();
        assert_eq!(registry.set(3, "y"), Err(RegistryError::InvalidSlot(3)));
    }

    #[test]
    fn test_capacity_and_validation() {
        let mut registry = TopicRegistry::new();
        for _ in 0..MAX_TOPICS {
            registry.push("t").unwrap();
        }
        assert_eq!(registry.push("t"), Err(RegistryError::Full));
        assert_eq!(
            TopicRegistry::new().push(""),
            Err(RegistryError::Topic(TopicError::Empty))
        );
    }

    #[test]
    fn test_iter_in_slot_order() {
        let registry = TopicRegistry::from_topics(&["a", "b", "c"]).unwrap();
        let collected: Vec<&str, 4> = registry.iter().collect();
        assert_eq!(collected.as_slice(), &["a", "b", "c"]);
    }
}
