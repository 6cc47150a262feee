//! Construction configs for the watcher layer
//!
//! Each primitive can be built straight from its constructor. These structs
//! carry the same parameters as data, so a per-metric statistic can be chosen
//! from configuration (deserialized with the `serde` feature) and validated
//! before anything is built.
//!
//! ```
//! use std::time::Duration;
//! use watchstats::config::{EmaConfig, StatisticConfig};
//! use watchstats::traits::Statistic;
//!
//! let config = StatisticConfig::Ema(EmaConfig {
//!     half_life: Duration::from_secs(30),
//! });
//!
//! let statistic = config.build().unwrap();
//! assert_eq!(statistic.kind(), "ema");
//! assert!(statistic.is_empty());
//! ```

use core::time::Duration;

use crate::error::{Result, StatsError};
use crate::traits::Statistic;

#[cfg(feature = "averages")]
use crate::averages::ExponentialMovingAverage;
#[cfg(feature = "correlation")]
use crate::correlation::OnlineCorrelation;
#[cfg(feature = "sampling")]
use crate::sampling::Reservoir;
#[cfg(feature = "window")]
use crate::window::{Combine, TimeWindowAccumulator};

/// Reservoir parameters
#[cfg(feature = "sampling")]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReservoirConfig {
    /// Maximum retained sample size
    pub capacity: usize,
    /// Fixed seed for reproducible sampling; entropy when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

#[cfg(feature = "sampling")]
impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            seed: None,
        }
    }
}

#[cfg(feature = "sampling")]
impl ReservoirConfig {
    /// Check that the capacity is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(StatsError::InvalidConfiguration(
                "reservoir capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build an `f64` reservoir
    pub fn build(&self) -> Result<Reservoir<f64>> {
        self.validate()?;
        match self.seed {
            Some(seed) => Reservoir::with_seed(self.capacity, seed),
            None => Reservoir::new(self.capacity),
        }
    }
}

/// Time-windowed accumulator parameters
#[cfg(feature = "window")]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig {
    pub combine: Combine,
    /// Value the cell resets to
    pub base: f64,
    pub window: Duration,
}

#[cfg(feature = "window")]
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            combine: Combine::Sum,
            base: 0.0,
            window: Duration::from_secs(60),
        }
    }
}

#[cfg(feature = "window")]
impl WindowConfig {
    /// Check that the window is positive and the base finite
    pub fn validate(&self) -> Result<()> {
        if self.window.is_zero() {
            return Err(StatsError::InvalidConfiguration(
                "accumulator window must be positive".into(),
            ));
        }
        if !self.base.is_finite() {
            return Err(StatsError::InvalidConfiguration(
                "accumulator base must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Build an `f64` accumulator on the monotonic clock
    pub fn build(&self) -> Result<TimeWindowAccumulator<f64>> {
        self.validate()?;
        TimeWindowAccumulator::new(self.combine, self.base, self.window)
    }
}

/// EMA parameters
#[cfg(feature = "averages")]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmaConfig {
    pub half_life: Duration,
}

#[cfg(feature = "averages")]
impl Default for EmaConfig {
    fn default() -> Self {
        Self {
            half_life: Duration::from_secs(60),
        }
    }
}

#[cfg(feature = "averages")]
impl EmaConfig {
    /// Check that the half-life is positive
    pub fn validate(&self) -> Result<()> {
        if self.half_life.is_zero() {
            return Err(StatsError::InvalidConfiguration(
                "EMA half-life must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Build an EMA on the monotonic clock
    pub fn build(&self) -> Result<ExponentialMovingAverage> {
        self.validate()?;
        ExponentialMovingAverage::new(self.half_life)
    }
}

/// Statistic selected for one metric series
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StatisticConfig {
    #[cfg(feature = "sampling")]
    Reservoir(ReservoirConfig),
    #[cfg(feature = "window")]
    Window(WindowConfig),
    #[cfg(feature = "averages")]
    Ema(EmaConfig),
    #[cfg(feature = "correlation")]
    Correlation,
}

impl StatisticConfig {
    /// Validate whichever config is selected
    pub fn validate(&self) -> Result<()> {
        match self {
            #[cfg(feature = "sampling")]
            StatisticConfig::Reservoir(config) => config.validate(),
            #[cfg(feature = "window")]
            StatisticConfig::Window(config) => config.validate(),
            #[cfg(feature = "averages")]
            StatisticConfig::Ema(config) => config.validate(),
            #[cfg(feature = "correlation")]
            StatisticConfig::Correlation => Ok(()),
        }
    }

    /// Validate and build the configured primitive
    pub fn build(&self) -> Result<MetricStatistic> {
        match self {
            #[cfg(feature = "sampling")]
            StatisticConfig::Reservoir(config) => config.build().map(MetricStatistic::Reservoir),
            #[cfg(feature = "window")]
            StatisticConfig::Window(config) => config.build().map(MetricStatistic::Window),
            #[cfg(feature = "averages")]
            StatisticConfig::Ema(config) => config.build().map(MetricStatistic::Ema),
            #[cfg(feature = "correlation")]
            StatisticConfig::Correlation => Ok(MetricStatistic::Correlation(OnlineCorrelation::new())),
        }
    }
}

/// Primitive built from a [`StatisticConfig`]
#[derive(Debug, Clone)]
pub enum MetricStatistic {
    #[cfg(feature = "sampling")]
    Reservoir(Reservoir<f64>),
    #[cfg(feature = "window")]
    Window(TimeWindowAccumulator<f64>),
    #[cfg(feature = "averages")]
    Ema(ExponentialMovingAverage),
    #[cfg(feature = "correlation")]
    Correlation(OnlineCorrelation),
}

impl MetricStatistic {
    /// Config tag of the wrapped primitive
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sampling")]
            MetricStatistic::Reservoir(_) => "reservoir",
            #[cfg(feature = "window")]
            MetricStatistic::Window(_) => "window",
            #[cfg(feature = "averages")]
            MetricStatistic::Ema(_) => "ema",
            #[cfg(feature = "correlation")]
            MetricStatistic::Correlation(_) => "correlation",
        }
    }
}

impl Statistic for MetricStatistic {
    fn count(&self) -> u64 {
        match self {
            #[cfg(feature = "sampling")]
            MetricStatistic::Reservoir(s) => s.count(),
            #[cfg(feature = "window")]
            MetricStatistic::Window(s) => s.count(),
            #[cfg(feature = "averages")]
            MetricStatistic::Ema(s) => s.count(),
            #[cfg(feature = "correlation")]
            MetricStatistic::Correlation(s) => Statistic::count(s),
        }
    }

    fn size_bytes(&self) -> usize {
        match self {
            #[cfg(feature = "sampling")]
            MetricStatistic::Reservoir(s) => s.size_bytes(),
            #[cfg(feature = "window")]
            MetricStatistic::Window(s) => s.size_bytes(),
            #[cfg(feature = "averages")]
            MetricStatistic::Ema(s) => s.size_bytes(),
            #[cfg(feature = "correlation")]
            MetricStatistic::Correlation(s) => s.size_bytes(),
        }
    }
}

#[cfg(all(
    test,
    feature = "sampling",
    feature = "window",
    feature = "averages",
    feature = "correlation"
))]
mod tests {
    use super::*;

    #[test]
    fn test_reservoir_config() {
        let config = ReservoirConfig {
            capacity: 8,
            seed: Some(1),
        };
        let mut reservoir = config.build().unwrap();
        reservoir.add(2.0);
        assert_eq!(reservoir.capacity(), 8);
        assert_eq!(reservoir.len(), 1);
    }

    #[test]
    fn test_invalid_configs() {
        let zero_capacity = StatisticConfig::Reservoir(ReservoirConfig {
            capacity: 0,
            seed: None,
        });
        assert!(matches!(
            zero_capacity.validate(),
            Err(StatsError::InvalidConfiguration(_))
        ));
        assert!(zero_capacity.build().is_err());

        let zero_window = StatisticConfig::Window(WindowConfig {
            window: Duration::ZERO,
            ..WindowConfig::default()
        });
        assert!(zero_window.build().is_err());

        let infinite_base = StatisticConfig::Window(WindowConfig {
            base: f64::NEG_INFINITY,
            ..WindowConfig::default()
        });
        assert!(infinite_base.validate().is_err());

        let zero_half_life = StatisticConfig::Ema(EmaConfig {
            half_life: Duration::ZERO,
        });
        assert!(zero_half_life.validate().is_err());
    }

    #[test]
    fn test_build_each_kind() {
        let configs = [
            StatisticConfig::Reservoir(ReservoirConfig::default()),
            StatisticConfig::Window(WindowConfig::default()),
            StatisticConfig::Ema(EmaConfig::default()),
            StatisticConfig::Correlation,
        ];
        let kinds: Vec<&str> = configs
            .iter()
            .map(|c| c.build().unwrap().kind())
            .collect();
        assert_eq!(kinds, ["reservoir", "window", "ema", "correlation"]);
    }

    #[test]
    fn test_built_window_uses_config() {
        let config = WindowConfig {
            combine: Combine::Max,
            base: -1.0,
            window: Duration::from_secs(5),
        };
        let mut acc = config.build().unwrap();
        assert_eq!(acc.update(-3.0), -1.0);
        assert_eq!(acc.update(4.0), 4.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_statistic_config() {
        let json = r#"{"kind":"reservoir","capacity":256}"#;
        let config: StatisticConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            StatisticConfig::Reservoir(ReservoirConfig {
                capacity: 256,
                seed: None,
            })
        );

        let json = r#"{"kind":"window","combine":"max","base":0.0,"window":{"secs":30,"nanos":0}}"#;
        let config: StatisticConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config,
            StatisticConfig::Window(WindowConfig {
                combine: Combine::Max,
                ..
            })
        ));

        let config: StatisticConfig = serde_json::from_str(r#"{"kind":"correlation"}"#).unwrap();
        assert_eq!(config, StatisticConfig::Correlation);
    }
}
