//! Watchlist dashboard: one ticker card per symbol.
//!
//! A card fetches its quote, then its sparkline. In live mode every card runs
//! its own `Poller`, so cards refresh independently; a card whose last refresh
//! is older than two periods is flagged stale.
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, select, unbounded};
use log::{info, warn};
use tracker_common::endpoints::{SPARK_INTERVAL, SPARK_PERIOD};
use tracker_common::{Result, Symbol};

use crate::api::ApiClient;
use crate::chart::{self, Canvas};
use crate::pages::{parse_symbols, write_chart};
use crate::poller::{Poller, Snapshot};
use crate::svg;

/// What one refresh of a card brings back.
#[derive(Debug, Clone, PartialEq)]
pub struct CardData {
    /// Last price, if the backend had one.
    pub price: Option<f64>,
    /// Trading currency, if known.
    pub currency: Option<String>,
    /// Recent closes, oldest first.
    pub trend: Vec<f64>,
}

/// Quote and sparkline for a single symbol.
#[derive(Debug, Clone)]
pub struct TickerCard {
    /// Symbol shown on the card.
    pub symbol: Symbol,
    data: Option<Snapshot<CardData>>,
}

impl TickerCard {
    /// Card in its loading state.
    pub fn new(symbol: Symbol) -> Self {
        TickerCard { symbol, data: None }
    }

    /// True until the first successful refresh.
    pub fn is_loading(&self) -> bool {
        self.data.is_none()
    }

    /// Latest data, if any.
    pub fn data(&self) -> Option<&CardData> {
        self.data.as_ref().map(Snapshot::value)
    }

    /// True when the last refresh is older than `max_age`.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.data.as_ref().is_some_and(|d| d.is_stale(max_age))
    }

    /// Quote, then sparkline. Does not touch card state so callers can fetch
    /// without holding a lock.
    pub fn fetch(client: &ApiClient, symbol: &Symbol) -> Result<CardData> {
        let quotes = client.quotes(std::slice::from_ref(symbol))?;
        let quote = quotes.get(symbol.as_str());
        let spark = client.spark(symbol, SPARK_PERIOD, SPARK_INTERVAL)?;
        Ok(CardData {
            price: quote.and_then(|q| q.price),
            currency: quote.and_then(|q| q.currency.clone()),
            trend: spark.closes,
        })
    }

    /// Replace the card contents with freshly fetched data.
    pub fn apply(&mut self, data: CardData) {
        self.data = Some(Snapshot::new(data));
    }

    /// Fetch and apply in one step.
    pub fn load(&mut self, client: &ApiClient) -> Result<()> {
        let data = Self::fetch(client, &self.symbol)?;
        self.apply(data);
        Ok(())
    }

    /// One text row: symbol, price, currency, block sparkline.
    pub fn render(&self) -> String {
        match self.data() {
            None => format!("{:<8} {:>10}", self.symbol, "…"),
            Some(data) => {
                let price = data
                    .price
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_else(|| "—".to_string());
                let currency = data.currency.as_deref().filter(|c| !c.is_empty()).unwrap_or("—");
                format!(
                    "{:<8} {:>10} {:<4} {}",
                    self.symbol,
                    price,
                    currency,
                    chart::text_sparkline(&data.trend)
                )
            }
        }
    }

    /// Card sparkline as an SVG document.
    pub fn svg(&self) -> String {
        let trend = self.data().map(|d| d.trend.as_slice()).unwrap_or_default();
        svg::sparkline(trend, Canvas::SPARKLINE)
    }
}

/// The watchlist and its cards.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Symbols in watchlist order.
    pub watch: Vec<Symbol>,
    /// One card per symbol, same order.
    pub cards: Vec<TickerCard>,
}

impl Dashboard {
    /// Load the watchlist from `/state`, or use `seed` when given.
    pub fn mount(client: &ApiClient, seed: Option<Vec<Symbol>>) -> Result<Self> {
        let watch = match seed {
            Some(symbols) => symbols,
            None => parse_symbols(client.get_state()?.watchlist),
        };
        let cards = watch.iter().cloned().map(TickerCard::new).collect();
        Ok(Dashboard { watch, cards })
    }

    /// Refresh every card once. A failing card keeps its previous contents.
    pub fn load_cards(&mut self, client: &ApiClient) {
        for card in &mut self.cards {
            if let Err(e) = card.load(client) {
                warn!("Card {} failed to load: {}", card.symbol, e);
            }
        }
    }

    /// All cards, one per line.
    pub fn render(&self) -> String {
        if self.cards.is_empty() {
            return "Watchlist is empty.".to_string();
        }
        self.cards
            .iter()
            .map(TickerCard::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write each card's sparkline to `out_dir`.
    pub fn write_charts(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        self.cards
            .iter()
            .map(|card| write_chart(out_dir, &card.symbol, "spark", &card.svg()))
            .collect()
    }
}

/// Keep every card refreshing every `interval` and print each update until
/// `shutdown` fires. Cards are polled independently.
pub fn run_live(
    client: &ApiClient,
    dashboard: Dashboard,
    interval: Duration,
    shutdown: Receiver<()>,
) -> Result<()> {
    drive_cards(client, dashboard, interval, shutdown, |line| println!("{}", line))
}

/// Poll every card and hand one rendered line to `emit` after each refresh
/// attempt. A failed attempt re-renders the old contents, so a card whose
/// data outlives two periods shows up as stale.
fn drive_cards(
    client: &ApiClient,
    dashboard: Dashboard,
    interval: Duration,
    shutdown: Receiver<()>,
    mut emit: impl FnMut(String),
) -> Result<()> {
    let (refreshed_tx, refreshed_rx) = unbounded::<usize>();
    let cards: Vec<Arc<Mutex<TickerCard>>> = dashboard
        .cards
        .into_iter()
        .map(|card| Arc::new(Mutex::new(card)))
        .collect();

    let mut pollers = Vec::with_capacity(cards.len());
    for (index, card) in cards.iter().enumerate() {
        let client = client.clone();
        let card = Arc::clone(card);
        let refreshed_tx = refreshed_tx.clone();
        let symbol = card.lock()?.symbol.clone();
        let name = format!("card-{}", symbol);

        pollers.push(Poller::spawn(&name, interval, move || {
            match TickerCard::fetch(&client, &symbol) {
                Ok(data) => {
                    if let Ok(mut card) = card.lock() {
                        card.apply(data);
                    }
                }
                Err(e) => warn!("Card {} failed to refresh: {}", symbol, e),
            }
            let _ = refreshed_tx.send(index);
        })?);
    }
    drop(refreshed_tx);
    info!("Dashboard live with {} cards, refreshing every {:?}", cards.len(), interval);

    let stale_after = interval * 2;
    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(refreshed_rx) -> msg => match msg {
                Ok(index) => {
                    let card = cards[index].lock()?;
                    let marker = if card.is_stale(stale_after) { " (stale)" } else { "" };
                    emit(format!("{}{}", card.render(), marker));
                }
                Err(_) => break,
            },
        }
    }

    drop(pollers);
    info!("Dashboard stopped");
    Ok(())
}
