//! Routing policy for the shortest-path search.

use crate::domain::RouteId;

/// A routing parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingConfigError {
    #[error("transfer penalty must be a finite, non-negative number, got {0}")]
    TransferPenalty(f64),

    #[error("average speed must be a finite, positive number, got {0}")]
    AverageSpeed(f64),
}

/// Configuration parameters for route search.
///
/// Values are checked on construction: the search stops at the first settled
/// destination state, which is only optimal while every cost is non-negative.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Cost added when boarding a different route, in kilometres.
    /// Not charged for the first boarding or for walking links.
    transfer_penalty: f64,

    /// Average vehicle speed used for travel-time estimates (km/h).
    average_speed_kmh: f64,
}

impl RoutingConfig {
    pub fn new(transfer_penalty: f64, average_speed_kmh: f64) -> Result<Self, RoutingConfigError> {
        Self::default()
            .with_transfer_penalty(transfer_penalty)?
            .with_average_speed(average_speed_kmh)
    }

    /// Set the transfer penalty.
    pub fn with_transfer_penalty(mut self, penalty: f64) -> Result<Self, RoutingConfigError> {
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(RoutingConfigError::TransferPenalty(penalty));
        }
        self.transfer_penalty = penalty;
        Ok(self)
    }

    /// Set the average speed used for time estimates.
    pub fn with_average_speed(mut self, speed_kmh: f64) -> Result<Self, RoutingConfigError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(RoutingConfigError::AverageSpeed(speed_kmh));
        }
        self.average_speed_kmh = speed_kmh;
        Ok(self)
    }

    pub fn transfer_penalty(&self) -> f64 {
        self.transfer_penalty
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    /// Whether an edge on `route` is a walking link.
    pub fn is_walk(&self, route: &RouteId) -> bool {
        route.is_walk()
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            transfer_penalty: 3.0,
            average_speed_kmh: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RoutingConfig::default();

        assert_eq!(config.transfer_penalty(), 3.0);
        assert_eq!(config.average_speed_kmh(), 30.0);
        assert!(config.is_walk(&RouteId::walk()));
        assert!(!config.is_walk(&RouteId::new("Red Line")));
    }

    #[test]
    fn custom_config() {
        let config = RoutingConfig::new(5.0, 40.0).unwrap();

        assert_eq!(config.transfer_penalty(), 5.0);
        assert_eq!(config.average_speed_kmh(), 40.0);
    }

    #[test]
    fn with_transfer_penalty() {
        let config = RoutingConfig::default().with_transfer_penalty(0.0).unwrap();
        assert_eq!(config.transfer_penalty(), 0.0);
        assert_eq!(config.average_speed_kmh(), 30.0);
    }

    #[test]
    fn rejects_negative_or_non_finite_penalty() {
        for bad in [-3.0, -0.001, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RoutingConfig::default().with_transfer_penalty(bad),
                Err(RoutingConfigError::TransferPenalty(_))
            ));
        }
        assert!(RoutingConfig::new(-1.0, 30.0).is_err());
    }

    #[test]
    fn rejects_non_positive_speed() {
        for bad in [0.0, -10.0, f64::NAN] {
            assert!(matches!(
                RoutingConfig::new(3.0, bad),
                Err(RoutingConfigError::AverageSpeed(_))
            ));
        }
    }
}
