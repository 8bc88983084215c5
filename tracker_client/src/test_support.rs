//! In-process fake of the tracker backend for tests.
//!
//! Holds watchlist, holdings, and transactions in memory and answers the same
//! paths and query parameters as the real service.
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use reqwest::Url;
use serde_json::{Value, json};
use tiny_http::{Header, Method, Response, Server};
use tracker_common::model::{Holding, Side, State, Transaction};

/// How the fake answers requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Serve every endpoint from memory.
    #[default]
    Healthy,
    /// HTTP 500 for everything.
    Failing,
    /// HTTP 200 with a body that is not JSON.
    Garbage,
    /// Accept requests and never answer them.
    Hanging,
}

#[derive(Default)]
struct FakeState {
    mode: Mode,
    watchlist: Vec<String>,
    holdings: Vec<Holding>,
    transactions: Vec<Transaction>,
    prices: HashMap<String, f64>,
    next_id: i64,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Running fake backend; stops when dropped.
pub struct FakeBackend {
    pub base_url: String,
    server: Arc<Server>,
    state: Arc<Mutex<FakeState>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBackend {
    /// Healthy backend seeded with the default watchlist.
    pub fn start() -> Self {
        Self::spawn(Mode::Healthy)
    }

    /// Backend that answers every request with HTTP 500.
    pub fn failing() -> Self {
        Self::spawn(Mode::Failing)
    }

    /// Backend that answers 200 with an undecodable body.
    pub fn garbage() -> Self {
        Self::spawn(Mode::Garbage)
    }

    /// Backend that never responds.
    pub fn hanging() -> Self {
        Self::spawn(Mode::Hanging)
    }

    /// Switch behaviour while clients are connected.
    pub fn set_mode(&self, mode: Mode) {
        self.state.lock().unwrap().mode = mode;
    }

    /// Set the price `/quote` reports for `symbol`.
    pub fn with_price(self, symbol: &str, price: f64) -> Self {
        self.state.lock().unwrap().prices.insert(symbol.to_string(), price);
        self
    }

    /// Seed a holding directly.
    pub fn with_holding(self, symbol: &str, quantity: f64, avg_cost: f64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            state.holdings.push(Holding {
                id: Some(id),
                symbol: symbol.to_string(),
                quantity,
                avg_cost,
                currency: "GBP".to_string(),
            });
        }
        self
    }

    fn spawn(mode: Mode) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let port = server.server_addr().to_ip().unwrap().port();
        let state = Arc::new(Mutex::new(FakeState {
            mode,
            watchlist: State::default().watchlist,
            ..FakeState::default()
        }));

        let worker_server = Arc::clone(&server);
        let worker_state = Arc::clone(&state);
        let handle = thread::spawn(move || {
            // unanswered requests stay open until the server stops
            let mut parked = Vec::new();
            for request in worker_server.incoming_requests() {
                let mut state = worker_state.lock().unwrap();
                let mode = state.mode;
                let (status, body) = match mode {
                    Mode::Healthy => {
                        let url = Url::parse(&format!("http://fake{}", request.url())).unwrap();
                        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
                        let (status, body) = route(&mut state, request.method(), url.path(), &query);
                        (status, body.to_string())
                    }
                    Mode::Failing => (500, json!({"detail": "boom"}).to_string()),
                    Mode::Garbage => (200, "<html>not json".to_string()),
                    Mode::Hanging => {
                        parked.push(request);
                        continue;
                    }
                };
                drop(state);
                let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        FakeBackend {
            base_url: format!("http://127.0.0.1:{port}"),
            server,
            state,
            handle: Some(handle),
        }
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn param<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
    query.get(key).map(String::as_str).unwrap_or_default()
}

fn number(query: &HashMap<String, String>, key: &str) -> f64 {
    param(query, key).parse().unwrap_or_default()
}

fn route(state: &mut FakeState, method: &Method, path: &str, query: &HashMap<String, String>) -> (u16, Value) {
    match (method, path) {
        (Method::Get, "/state") => (200, json!({"watchlist": state.watchlist})),
        (Method::Post, "/watchlist/add") => {
            let symbol = param(query, "symbol").to_uppercase();
            if !state.watchlist.contains(&symbol) {
                state.watchlist.push(symbol);
            }
            (200, json!({"watchlist": state.watchlist}))
        }
        (Method::Post, "/watchlist/remove") => {
            let symbol = param(query, "symbol").to_uppercase();
            state.watchlist.retain(|s| *s != symbol);
            (200, json!({"watchlist": state.watchlist}))
        }
        (Method::Get, "/quote") => {
            let tickers: Vec<&str> = param(query, "tickers").split(',').filter(|s| !s.is_empty()).collect();
            if tickers.is_empty() {
                return (400, json!({"detail": "No tickers provided"}));
            }
            let quotes: serde_json::Map<String, Value> = tickers
                .iter()
                .map(|t| {
                    let quote = json!({
                        "symbol": t,
                        "price": state.prices.get(*t),
                        "currency": "USD",
                        "shortName": null,
                    });
                    (t.to_string(), quote)
                })
                .collect();
            (200, Value::Object(quotes))
        }
        (Method::Get, "/history") => (
            200,
            json!({
                "symbol": param(query, "ticker").to_uppercase(),
                "bars": [
                    {"t": 1_700_000_000_000_i64, "o": 10.0, "h": 12.0, "l": 9.0, "c": 11.0, "v": 100.0},
                    {"t": 1_700_086_400_000_i64, "o": 11.0, "h": 11.5, "l": 10.0, "c": 10.5, "v": 120.0},
                    {"t": 1_700_172_800_000_i64, "o": 10.5, "h": 13.0, "l": 10.4, "c": 12.8, "v": 90.0},
                ],
            }),
        ),
        (Method::Get, "/sparkline") => (
            200,
            json!({"symbol": param(query, "ticker").to_uppercase(), "closes": [10.0, 10.5, 10.2, 11.0]}),
        ),
        (Method::Get, "/info") => (
            200,
            json!({
                "shortName": param(query, "ticker"),
                "longName": null,
                "sector": "Technology",
                "industry": null,
                "marketCap": 1.0e9,
                "currency": "USD",
            }),
        ),
        (Method::Get, "/forecast") => (
            200,
            json!({
                "symbol": param(query, "ticker").to_uppercase(),
                "mu": 0.1, "sigma": 0.2, "s0": 100.0, "days": 2,
                "p10": [100.0, 95.0, 91.0],
                "p50": [100.0, 101.0, 102.0],
                "p90": [100.0, 106.0, 112.0],
            }),
        ),
        (Method::Get, "/portfolio/holdings") => (200, json!(state.holdings)),
        (Method::Post, "/portfolio/holdings/upsert") => {
            let symbol = param(query, "symbol").to_string();
            let quantity = number(query, "quantity");
            let avg_cost = number(query, "avg_cost");
            let currency = param(query, "currency").to_string();
            let index = match state.holdings.iter().position(|h| h.symbol == symbol) {
                Some(index) => index,
                None => {
                    let id = state.next_id();
                    state.holdings.push(Holding {
                        id: Some(id),
                        symbol,
                        quantity: 0.0,
                        avg_cost: 0.0,
                        currency: String::new(),
                    });
                    state.holdings.len() - 1
                }
            };
            let holding = &mut state.holdings[index];
            holding.quantity = quantity;
            holding.avg_cost = avg_cost;
            holding.currency = currency;
            (200, json!(holding))
        }
        (Method::Post, "/portfolio/holdings/remove") => {
            let symbol = param(query, "symbol");
            state.holdings.retain(|h| h.symbol != symbol);
            (200, json!({"ok": true}))
        }
        (Method::Get, "/portfolio/metrics") => {
            let total_cost: f64 = state.holdings.iter().map(Holding::cost_basis).sum();
            (
                200,
                json!({
                    "total_positions": state.holdings.len(),
                    "total_cost": total_cost,
                    "best_earners": [],
                    "by_symbol": state.holdings,
                }),
            )
        }
        (Method::Get, "/portfolio/transactions") => (200, json!(state.transactions)),
        (Method::Post, "/portfolio/transactions/add") => {
            let Ok(side) = param(query, "side").parse::<Side>() else {
                return (422, json!({"detail": "bad side"}));
            };
            let id = state.next_id();
            let tx = Transaction {
                id: Some(id),
                symbol: param(query, "symbol").to_string(),
                qty: number(query, "qty"),
                price: number(query, "price"),
                side,
                currency: param(query, "currency").to_string(),
            };
            state.transactions.push(tx.clone());
            (200, json!(tx))
        }
        _ => (404, json!({"detail": "Not Found"})),
    }
}

/// Base URL of a local port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
