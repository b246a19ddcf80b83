//! Rotator configuration.

use crate::error::{Error, Result};
use std::time::Duration;

/// Options controlling one rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatorConfig {
    /// Id of the mount the rotator attaches to.
    pub container_id: String,
    /// Prefix for the position labels of this rotator's words.
    pub namespace: String,
    /// Time between sentence changes.
    pub interval: Duration,
    /// Length of each fade and width transition.
    pub speed: Duration,
    /// Pause while the viewport is narrower than this (0 never pauses).
    pub mobile_width: u16,
    /// Log every dispatched plan and task step at debug level.
    pub verbose: bool,
    /// Start the cycle at a random sentence, or shuffle it when `best` is off.
    pub random: bool,
    /// Order sentences to keep transitions small.
    pub best: bool,
    /// Drop the mount's prior content at once instead of fading it out.
    pub clear_original_content: bool,
    /// Settle delay before each width change.
    pub resize_delay: Duration,
    /// Frame period of the terminal runtime.
    pub frame_interval: Duration,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            container_id: "wordwheel".to_string(),
            namespace: "ww".to_string(),
            interval: Duration::from_millis(5000),
            speed: Duration::from_millis(200),
            mobile_width: 0,
            verbose: false,
            random: false,
            best: true,
            clear_original_content: true,
            resize_delay: Duration::from_millis(10),
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl RotatorConfig {
    /// Attach to the mount named `id`.
    #[must_use]
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Use `namespace` for position labels.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Change sentences every `interval`.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run transitions over `speed`.
    #[must_use]
    pub const fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    /// Pause below `width` columns.
    #[must_use]
    pub const fn with_mobile_width(mut self, width: u16) -> Self {
        self.mobile_width = width;
        self
    }

    /// Toggle per-step debug logging.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Toggle the random starting point.
    #[must_use]
    pub const fn with_random(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    /// Toggle cost-aware ordering.
    #[must_use]
    pub const fn with_best(mut self, best: bool) -> Self {
        self.best = best;
        self
    }

    /// Choose between clearing and fading out prior content.
    #[must_use]
    pub const fn with_clear_original_content(mut self, clear: bool) -> Self {
        self.clear_original_content = clear;
        self
    }

    /// Change the settle delay before width steps.
    #[must_use]
    pub const fn with_resize_delay(mut self, delay: Duration) -> Self {
        self.resize_delay = delay;
        self
    }

    /// Change the runtime frame period.
    #[must_use]
    pub const fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::InvalidConfig("interval must be greater than zero".into()));
        }
        if self.speed.is_zero() {
            return Err(Error::InvalidConfig("speed must be greater than zero".into()));
        }
        if self.frame_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "frame interval must be greater than zero".into(),
            ));
        }
        if self.container_id.is_empty() {
            return Err(Error::InvalidConfig("container id is empty".into()));
        }
        if self.namespace.is_empty() {
            return Err(Error::InvalidConfig("namespace is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RotatorConfig::default();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.speed, Duration::from_millis(200));
        assert_eq!(config.mobile_width, 0);
        assert!(config.best);
        assert!(!config.random);
        assert!(config.clear_original_content);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = RotatorConfig::default()
            .with_container_id("hero")
            .with_namespace("h")
            .with_interval(Duration::from_secs(2))
            .with_mobile_width(60)
            .with_random(true)
            .with_best(false);
        assert_eq!(config.container_id, "hero");
        assert_eq!(config.namespace, "h");
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.mobile_width, 60);
        assert!(config.random);
        assert!(!config.best);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_interval = RotatorConfig::default().with_interval(Duration::ZERO);
        assert!(matches!(zero_interval.validate(), Err(Error::InvalidConfig(_))));

        let zero_speed = RotatorConfig::default().with_speed(Duration::ZERO);
        assert!(matches!(zero_speed.validate(), Err(Error::InvalidConfig(_))));

        let zero_frame = RotatorConfig::default().with_frame_interval(Duration::ZERO);
        assert!(matches!(zero_frame.validate(), Err(Error::InvalidConfig(_))));

        let no_container = RotatorConfig::default().with_container_id("");
        assert!(matches!(no_container.validate(), Err(Error::InvalidConfig(_))));

        let no_namespace = RotatorConfig::default().with_namespace("");
        assert!(matches!(no_namespace.validate(), Err(Error::InvalidConfig(_))));
    }
}
