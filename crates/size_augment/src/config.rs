//! src/config.rs
//!
//! Options shared by every size augmenter.
//!
//! Example:
//! ```ignore
//! let config = AugmentConfig::builder()
//!     .seed(42)
//!     .num_workers(4)
//!     .independent(true)
//!     .build();
//! let pad = Pad::builder().px((0, 4)).config(config).build()?;
//! ```
//!
//! # Performance considerations:
//! - `num_workers`: only the application of already sampled geometry is
//!   parallelized, so workers pay off for large images or large batches.

/// Configuration shared by augmenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AugmentConfig {
    /// Seed for reproducible draws; `None` seeds from system entropy.
    pub seed: Option<u64>,
    /// Number of worker threads applying geometry (0 = single-threaded).
    pub num_workers: usize,
    /// `true`: every item of a call gets its own draw.
    /// `false`: one draw per call, shared by all items.
    pub independent: bool,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            seed: None,
            num_workers: 0,
            independent: true,
        }
    }
}

impl AugmentConfig {
    pub fn builder() -> AugmentConfigBuilder {
        AugmentConfigBuilder::default()
    }
}

/// Builder for AugmentConfig with method chaining
#[derive(Default)]
pub struct AugmentConfigBuilder {
    config: AugmentConfig,
}

impl AugmentConfigBuilder {
    /// Set the random seed.
    ///
    /// Two augmenters built with the same seed and configuration produce the
    /// same sequence of augmentations.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the number of workers
    pub fn num_workers(mut self, workers: usize) -> Self {
        self.config.num_workers = workers;
        self
    }

    /// Set whether items of one call are sampled independently
    pub fn independent(mut self, independent: bool) -> Self {
        self.config.independent = independent;
        self
    }

    pub fn build(self) -> AugmentConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AugmentConfig::builder().build();
        assert_eq!(config, AugmentConfig::default());
        assert!(config.independent);
        assert_eq!(config.num_workers, 0);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = AugmentConfig::builder()
            .seed(7)
            .num_workers(2)
            .independent(false)
            .build();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.num_workers, 2);
        assert!(!config.independent);
    }
}
