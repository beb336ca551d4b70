//! Search configuration for the metro planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Flat cost of changing lines at a station (minutes).
    /// Charged regardless of which two lines are involved.
    pub transfer_cost: f64,

    /// Constant train speed used to turn distance tables into minutes (km/h).
    pub train_speed_kmh: f64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_cost: f64, train_speed_kmh: f64) -> Self {
        Self {
            transfer_cost,
            train_speed_kmh,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_cost: 3.0,
            train_speed_kmh: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.transfer_cost, 3.0);
        assert_eq!(config.train_speed_kmh, 40.0);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(5.0, 80.0);

        assert_eq!(config.transfer_cost, 5.0);
        assert_eq!(config.train_speed_kmh, 80.0);
    }
}
