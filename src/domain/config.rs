// ============================================================================
// Book Configuration
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Initial bucket count of a side's order-id index.
pub const DEFAULT_ID_INDEX_CAPACITY: usize = 1024;

/// Configuration for creating a [`Book`](crate::engine::Book).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookConfig {
    /// Label for the instrument this book trades (used in logging and
    /// events; the core itself is single-instrument).
    pub instrument: String,

    /// Initial capacity of the per-side order-id index.
    pub id_index_capacity: usize,
}

impl BookConfig {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            id_index_capacity: DEFAULT_ID_INDEX_CAPACITY,
        }
    }

    /// Builder method: override the order-id index capacity.
    pub fn with_id_index_capacity(mut self, capacity: usize) -> Self {
        self.id_index_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.instrument.is_empty() {
            return Err("Instrument cannot be empty".to_string());
        }
        if self.id_index_capacity == 0 {
            return Err("Id index capacity must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BookConfig::default();
        assert_eq!(config.instrument, "default");
        assert_eq!(config.id_index_capacity, DEFAULT_ID_INDEX_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BookConfig::new("ACME").with_id_index_capacity(64);
        assert_eq!(config.instrument, "ACME");
        assert_eq!(config.id_index_capacity, 64);
    }

    #[test]
    fn test_validation_rejects_empty_instrument() {
        assert!(BookConfig::new("").validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let config = BookConfig::new("ACME").with_id_index_capacity(0);
        assert!(config.validate().is_err());
    }
}
