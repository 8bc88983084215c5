//! Trade log and entry form.
use tracker_common::endpoints::DEFAULT_CURRENCY;
use tracker_common::model::{Side, Transaction};
use tracker_common::{Result, Symbol};

use crate::api::ApiClient;

/// Entry form. Resets to its defaults after each submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    /// Symbol as typed; upper-cased on submit.
    pub symbol: String,
    /// Units traded.
    pub qty: f64,
    /// Price per unit.
    pub price: f64,
    /// Buy or sell.
    pub side: Side,
    /// Currency of `price`.
    pub currency: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        TransactionForm {
            symbol: "MSFT".to_string(),
            qty: 1.0,
            price: 100.0,
            side: Side::Buy,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Transactions page state.
#[derive(Debug, Clone, Default)]
pub struct Transactions {
    /// Transactions as last fetched.
    pub rows: Vec<Transaction>,
}

impl Transactions {
    /// Fetch the log.
    pub fn mount(client: &ApiClient) -> Result<Self> {
        let mut page = Transactions::default();
        page.refresh(client)?;
        Ok(page)
    }

    /// Re-fetch the log.
    pub fn refresh(&mut self, client: &ApiClient) -> Result<()> {
        self.rows = client.list_transactions()?;
        Ok(())
    }

    /// Submit `form`: append, reset the form, refresh.
    pub fn save(&mut self, client: &ApiClient, form: &mut TransactionForm) -> Result<Transaction> {
        let symbol: Symbol = form.symbol.parse()?;
        let saved = client.add_transaction(&symbol, form.qty, form.price, form.side, &form.currency)?;
        *form = TransactionForm::default();
        self.refresh(client)?;
        Ok(saved)
    }

    /// The log as a table.
    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "{:>5} {:<10} {:>10} {:>12} {:<5} {:<8}",
            "ID", "Symbol", "Qty", "Price", "Side", "Currency"
        )];
        for tx in &self.rows {
            let id = tx.id.map(|id| id.to_string()).unwrap_or_else(|| "—".to_string());
            lines.push(format!(
                "{:>5} {:<10} {:>10} {:>12} {:<5} {:<8}",
                id, tx.symbol, tx.qty, tx.price, tx.side, tx.currency
            ));
        }
        lines.join("\n")
    }
}
