//! Holdings valued at live quotes.
//!
//! Totals are derived from the fetched holdings and quotes every time they are
//! read; nothing is cached between refreshes.
use tracker_common::endpoints::DEFAULT_CURRENCY;
use tracker_common::model::{Holding, PortfolioMetrics, QuoteMap};
use tracker_common::{Result, Symbol};

use crate::api::ApiClient;
use crate::pages::{money, parse_symbols};

/// A holding with its live valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    /// Symbol identifier.
    pub symbol: String,
    /// Units held.
    pub quantity: f64,
    /// Average cost per unit.
    pub avg_cost: f64,
    /// Live price; `None` when no quote was available.
    pub price: Option<f64>,
    /// `price * quantity`, with a missing price counted as zero.
    pub value: f64,
    /// `avg_cost * quantity`.
    pub cost: f64,
    /// `value - cost`.
    pub pnl: f64,
}

/// Portfolio rows and their sums.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioTotals {
    /// One row per holding, in backend order.
    pub rows: Vec<PositionRow>,
    /// Sum of row values.
    pub total_value: f64,
    /// Sum of row costs.
    pub total_cost: f64,
    /// `total_value - total_cost`.
    pub total_pnl: f64,
}

/// Value every holding at its quoted price.
pub fn compute_totals(holdings: &[Holding], quotes: &QuoteMap) -> PortfolioTotals {
    let rows: Vec<PositionRow> = holdings
        .iter()
        .map(|h| {
            let price = quotes.get(&h.symbol).and_then(|q| q.price);
            let value = price.unwrap_or(0.0) * h.quantity;
            let cost = h.cost_basis();
            PositionRow {
                symbol: h.symbol.clone(),
                quantity: h.quantity,
                avg_cost: h.avg_cost,
                price,
                value,
                cost,
                pnl: value - cost,
            }
        })
        .collect();
    let total_value = rows.iter().map(|r| r.value).sum::<f64>();
    let total_cost = rows.iter().map(|r| r.cost).sum::<f64>();
    PortfolioTotals {
        rows,
        total_value,
        total_cost,
        total_pnl: total_value - total_cost,
    }
}

/// Upsert form. Resets to its defaults after each submission.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingForm {
    /// Symbol as typed; upper-cased on submit.
    pub symbol: String,
    /// Units held.
    pub quantity: f64,
    /// Average cost per unit.
    pub avg_cost: f64,
    /// Currency of `avg_cost`.
    pub currency: String,
}

impl Default for HoldingForm {
    fn default() -> Self {
        HoldingForm {
            symbol: "MSFT".to_string(),
            quantity: 1.0,
            avg_cost: 100.0,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Portfolio page state.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    /// Holdings as last fetched.
    pub holdings: Vec<Holding>,
    /// Quotes for `holdings`, as last fetched.
    pub quotes: QuoteMap,
}

impl Portfolio {
    /// Fetch holdings and their quotes.
    pub fn mount(client: &ApiClient) -> Result<Self> {
        let mut page = Portfolio::default();
        page.refresh(client)?;
        Ok(page)
    }

    /// Re-fetch holdings, then quotes for their symbols when there are any.
    pub fn refresh(&mut self, client: &ApiClient) -> Result<()> {
        self.holdings = client.list_holdings()?;
        if !self.holdings.is_empty() {
            let symbols = parse_symbols(self.holdings.iter().map(|h| h.symbol.as_str()));
            self.quotes = client.quotes(&symbols)?;
        }
        Ok(())
    }

    /// Derived rows and totals.
    pub fn totals(&self) -> PortfolioTotals {
        compute_totals(&self.holdings, &self.quotes)
    }

    /// Submit `form`: upsert, reset the form, refresh.
    pub fn save(&mut self, client: &ApiClient, form: &mut HoldingForm) -> Result<Holding> {
        let symbol: Symbol = form.symbol.parse()?;
        let saved = client.upsert_holding(&symbol, form.quantity, form.avg_cost, &form.currency)?;
        *form = HoldingForm::default();
        self.refresh(client)?;
        Ok(saved)
    }

    /// Remove the holding for `symbol`, then refresh.
    pub fn remove(&mut self, client: &ApiClient, symbol: &Symbol) -> Result<()> {
        client.remove_holding(symbol)?;
        self.refresh(client)
    }

    /// Totals line followed by the holdings table.
    pub fn render(&self) -> String {
        let totals = self.totals();
        let mut lines = vec![
            format!(
                "Total Value {}   Total Cost {}   P/L {}",
                money(totals.total_value),
                money(totals.total_cost),
                money(totals.total_pnl)
            ),
            String::new(),
            format!(
                "{:<10} {:>10} {:>12} {:>12} {:>12} {:>12}",
                "Symbol", "Qty", "Avg Cost", "Price", "Value", "P/L"
            ),
        ];
        for row in &totals.rows {
            let price = row.price.map(money).unwrap_or_else(|| "—".to_string());
            lines.push(format!(
                "{:<10} {:>10} {:>12} {:>12} {:>12} {:>12}",
                row.symbol,
                row.quantity,
                money(row.avg_cost),
                price,
                money(row.value),
                money(row.pnl)
            ));
        }
        lines.join("\n")
    }
}

/// Backend metrics as text.
pub fn render_metrics(metrics: &PortfolioMetrics) -> String {
    let mut lines = vec![
        format!("Positions: {}", metrics.total_positions),
        format!("Total cost: {}", money(metrics.total_cost)),
    ];
    for h in &metrics.by_symbol {
        lines.push(format!(
            "  {:<10} {:>10} @ {} {}",
            h.symbol,
            h.quantity,
            money(h.avg_cost),
            h.currency
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientConfig;
    use crate::test_support::FakeBackend;
    use tracker_common::model::Quote;

    fn holding(symbol: &str, quantity: f64, avg_cost: f64) -> Holding {
        Holding {
            id: None,
            symbol: symbol.to_string(),
            quantity,
            avg_cost,
            currency: "GBP".to_string(),
        }
    }

    fn quote(symbol: &str, price: Option<f64>) -> (String, Quote) {
        let q = Quote {
            symbol: symbol.to_string(),
            price,
            currency: Some("USD".to_string()),
            short_name: None,
        };
        (symbol.to_string(), q)
    }

    #[test]
    fn totals_for_single_holding() {
        let quotes: QuoteMap = [quote("MSFT", Some(150.0))].into_iter().collect();
        let totals = compute_totals(&[holding("MSFT", 2.0, 100.0)], &quotes);
        assert_eq!(totals.total_value, 300.0);
        assert_eq!(totals.total_cost, 200.0);
        assert_eq!(totals.total_pnl, 100.0);
        assert_eq!(totals.rows[0].pnl, 100.0);
    }

    #[test]
    fn missing_quote_counts_as_zero_value() {
        let quotes: QuoteMap = [quote("NVDA", None)].into_iter().collect();
        let totals = compute_totals(&[holding("NVDA", 3.0, 10.0), holding("BP.L", 1.0, 5.0)], &quotes);
        assert_eq!(totals.rows[0].price, None);
        assert_eq!(totals.total_value, 0.0);
        assert_eq!(totals.total_cost, 35.0);
        assert_eq!(totals.total_pnl, -35.0);
    }

    #[test]
    fn page_values_holdings_at_live_quotes() {
        let backend = FakeBackend::start()
            .with_price("MSFT", 150.0)
            .with_holding("MSFT", 2.0, 100.0);
        let api = ApiClient::new(ClientConfig::new(&backend.base_url)).unwrap();
        let page = Portfolio::mount(&api).unwrap();
        let totals = page.totals();
        assert_eq!(totals.total_value, 300.0);
        assert_eq!(totals.total_pnl, 100.0);
        assert!(page.render().contains("P/L £100.00"));
    }

    #[test]
    fn save_upper_cases_resets_and_refreshes() {
        let backend = FakeBackend::start().with_price("AAPL", 20.0);
        let api = ApiClient::new(ClientConfig::new(&backend.base_url).with_sample_fallback(false)).unwrap();
        let mut page = Portfolio::mount(&api).unwrap();
        assert!(page.holdings.is_empty());

        let mut form = HoldingForm {
            symbol: "aapl".to_string(),
            quantity: 4.0,
            avg_cost: 15.0,
            currency: "USD".to_string(),
        };
        let saved = page.save(&api, &mut form).unwrap();
        assert_eq!(saved.symbol, "AAPL");
        assert_eq!(form, HoldingForm::default());
        assert_eq!(page.holdings.len(), 1);
        assert_eq!(page.totals().total_value, 80.0);

        page.remove(&api, &"AAPL".parse().unwrap()).unwrap();
        assert!(page.holdings.is_empty());
    }

    #[test]
    fn metrics_render_lists_positions() {
        let metrics = PortfolioMetrics {
            total_positions: 1,
            total_cost: 200.0,
            best_earners: Vec::new(),
            by_symbol: vec![holding("MSFT", 2.0, 100.0)],
        };
        let text = render_metrics(&metrics);
        assert!(text.contains("Positions: 1"));
        assert!(text.contains("£200.00"));
    }
}
