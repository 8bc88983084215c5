//! Monte Carlo forecast bands returned by `/forecast`.
use serde::{Deserialize, Serialize};

/// Percentile bands of simulated price paths, indexed by forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Upper-cased symbol.
    pub symbol: String,
    /// Annualised drift estimate.
    #[serde(default)]
    pub mu: f64,
    /// Annualised volatility estimate.
    #[serde(default)]
    pub sigma: f64,
    /// Starting price (day 0).
    #[serde(default)]
    pub s0: f64,
    /// Forecast horizon in trading days.
    #[serde(default)]
    pub days: u32,
    /// 10th percentile per day.
    #[serde(default)]
    pub p10: Vec<f64>,
    /// Median per day.
    #[serde(default)]
    pub p50: Vec<f64>,
    /// 90th percentile per day.
    #[serde(default)]
    pub p90: Vec<f64>,
}

impl Forecast {
    /// Number of days for which all three bands have a value.
    pub fn len(&self) -> usize {
        self.p10.len().min(self.p50.len()).min(self.p90.len())
    }

    /// True when no day has all three bands.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Band values on the final usable day as `(p10, p50, p90)`.
    pub fn horizon(&self) -> Option<(f64, f64, f64)> {
        let last = self.len().checked_sub(1)?;
        Some((self.p10[last], self.p50[last], self.p90[last]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_length_is_shortest_band() {
        let forecast = Forecast {
            symbol: "MSFT".into(),
            mu: 0.1,
            sigma: 0.2,
            s0: 100.0,
            days: 3,
            p10: vec![100.0, 95.0, 90.0],
            p50: vec![100.0, 101.0],
            p90: vec![100.0, 105.0, 110.0, 115.0],
        };
        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast.horizon(), Some((95.0, 101.0, 105.0)));
    }
}
