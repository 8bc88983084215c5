//! Historical bars, sparkline closes, and descriptive info.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV bar. Wire names are single letters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time in milliseconds since the Unix epoch.
    #[serde(rename = "t")]
    pub timestamp: i64,
    /// Opening price.
    #[serde(rename = "o")]
    pub open: f64,
    /// Highest price.
    #[serde(rename = "h")]
    pub high: f64,
    /// Lowest price.
    #[serde(rename = "l")]
    pub low: f64,
    /// Closing price.
    #[serde(rename = "c")]
    pub close: f64,
    /// Traded volume.
    #[serde(rename = "v", default)]
    pub volume: f64,
}

impl Bar {
    /// Bar open time as a UTC datetime, if the timestamp is representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// True when the bar closed at or above its open.
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

/// `/history` response: bars in ascending time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Upper-cased symbol.
    pub symbol: String,
    /// Bars ordered by time ascending.
    #[serde(default)]
    pub bars: Vec<Bar>,
}

/// `/sparkline` response: the most recent closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    /// Upper-cased symbol.
    pub symbol: String,
    /// Closing prices, oldest first.
    #[serde(default)]
    pub closes: Vec<f64>,
}

/// `/info` response. Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Short display name.
    pub short_name: Option<String>,
    /// Full company name.
    pub long_name: Option<String>,
    /// Sector classification.
    pub sector: Option<String>,
    /// Industry classification.
    pub industry: Option<String>,
    /// Market capitalisation in `currency`.
    pub market_cap: Option<f64>,
    /// Trading currency.
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_bar_keys() {
        let json = r#"{"symbol":"MSFT","bars":[{"t":1700000000000,"o":1.0,"h":2.0,"l":0.5,"c":1.5,"v":10.0}]}"#;
        let history: History = serde_json::from_str(json).unwrap();
        let bar = history.bars[0];
        assert_eq!(bar.high, 2.0);
        assert!(bar.is_rising());
        assert_eq!(bar.time().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn info_tolerates_nulls() {
        let json = r#"{"shortName":"Microsoft","longName":null,"sector":"Technology","industry":null,"marketCap":3.1e12,"currency":"USD"}"#;
        let info: Info = serde_json::from_str(json).unwrap();
        assert_eq!(info.short_name.as_deref(), Some("Microsoft"));
        assert!(info.long_name.is_none());
    }
}
