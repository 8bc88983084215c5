//! Tracker Client — a terminal dashboard for a watchlist and portfolio served by
//! the tracker backend. Each navigation tab of the dashboard is a subcommand:
//! it mounts the page (fetching its data), prints a text rendering, and writes
//! charts as SVG documents.
//!
//! Usage example (CLI):
//! ```bash
//! tracker_client --base-url http://127.0.0.1:8000 dashboard --live
//! tracker_client analytics --symbol BP.L
//! tracker_client portfolio upsert msft 2 100 --currency USD
//! tracker_client transactions add nvda 1 420 --side SELL
//! tracker_client status --follow
//! ```
//!
//! When the backend cannot be reached, quotes, sparklines, forecasts, and the
//! watchlist fall back to deterministic sample data unless `--no-fallback` is
//! given. Portfolio and transaction commands always need the backend.
#![warn(missing_docs)]
mod args;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossbeam_channel::{Receiver, bounded, select};
use log::{debug, error, info};
use tracker_common::endpoints::{CARD_REFRESH_INTERVAL, HEALTH_INTERVAL};
use tracker_common::symbols::SymbolParser;
use tracker_common::{Result, Symbol};

use tracker_client::api::{ApiClient, ClientConfig};
use tracker_client::connection::{ConnectionMonitor, ConnectionState};
use tracker_client::pages::Page;
use tracker_client::pages::analytics::Analytics;
use tracker_client::pages::dashboard::{self, Dashboard};
use tracker_client::pages::portfolio::{self, HoldingForm, Portfolio};
use tracker_client::pages::transactions::{TransactionForm, Transactions};
use tracker_client::pages::watchlist::{self, WatchChange};
use tracker_client::shell;

use crate::args::{Args, Command, PortfolioAction, TransactionAction, WatchAction};

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ClientConfig::new(args.base_url.clone()).with_sample_fallback(!args.no_fallback);
    let client = ApiClient::new(config)?;
    info!(
        "Using backend {} (sample fallback {})",
        client.base_url(),
        if args.no_fallback { "off" } else { "on" }
    );

    match args.command {
        Command::Dashboard { live, symbols } => {
            print_header(&client, Page::Dashboard);
            let seed = symbols.as_deref().map(read_symbols).transpose()?;
            let mut page = Dashboard::mount(&client, seed)?;
            page.load_cards(&client);
            println!("{}", page.render());
            report_charts(&page.write_charts(&args.out_dir)?);
            if live {
                dashboard::run_live(&client, page, CARD_REFRESH_INTERVAL, shutdown_signal())?;
            }
        }
        Command::Analytics { symbol } => {
            print_header(&client, Page::Analytics);
            let page = Analytics::mount(&client, symbol)?;
            println!("{}", page.render());
            report_charts(&page.write_charts(&args.out_dir)?);
        }
        Command::Portfolio { action } => {
            print_header(&client, Page::Portfolio);
            let mut page = Portfolio::mount(&client)?;
            match action.unwrap_or(PortfolioAction::Show) {
                PortfolioAction::Show => {}
                PortfolioAction::Upsert { symbol, quantity, avg_cost, currency } => {
                    let mut form = HoldingForm { symbol, quantity, avg_cost, currency };
                    let saved = page.save(&client, &mut form)?;
                    info!("Saved holding {} x{}", saved.symbol, saved.quantity);
                }
                PortfolioAction::Remove { symbol } => {
                    page.remove(&client, &symbol)?;
                    info!("Removed holding {}", symbol);
                }
                PortfolioAction::Metrics => {
                    println!("{}", portfolio::render_metrics(&client.metrics()?));
                    return Ok(());
                }
            }
            println!("{}", page.render());
        }
        Command::Transactions { action } => {
            print_header(&client, Page::Transactions);
            let mut page = Transactions::mount(&client)?;
            if let Some(TransactionAction::Add { symbol, qty, price, side, currency }) = action {
                let mut form = TransactionForm { symbol, qty, price, side, currency };
                let saved = page.save(&client, &mut form)?;
                info!("Recorded {} {} x{} @ {}", saved.side, saved.symbol, saved.qty, saved.price);
            }
            println!("{}", page.render());
        }
        Command::Watch { action } => {
            let (change, symbol) = match action {
                WatchAction::Add { symbol } => (WatchChange::Add, symbol),
                WatchAction::Remove { symbol } => (WatchChange::Remove, symbol),
            };
            let state = watchlist::apply(&client, change, &symbol)?;
            println!("{}", watchlist::render(&state));
        }
        Command::Status { follow } => {
            if follow {
                follow_status(client, shutdown_signal())?;
            } else {
                println!("{}", ConnectionState::from_probe(client.probe()));
            }
        }
    }
    Ok(())
}

fn print_header(client: &ApiClient, page: Page) {
    debug!("Mounting {}", page);
    let state = ConnectionState::from_probe(client.probe());
    println!("{}\n", shell::nav_bar(page, state));
}

fn report_charts(paths: &[PathBuf]) {
    for path in paths {
        info!("Chart written to {}", path.display());
    }
}

/// Print connectivity transitions until `shutdown` fires.
fn follow_status(client: ApiClient, shutdown: Receiver<()>) -> Result<()> {
    let monitor = ConnectionMonitor::start(client, HEALTH_INTERVAL)?;
    println!("{} {}", monitor.state()?.dot(), monitor.state()?);
    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(monitor.updates()) -> update => match update {
                Ok(state) => println!("{} {}", state.dot(), state),
                Err(_) => break,
            },
        }
    }
    Ok(())
}

/// Channel that receives once on Ctrl+C.
fn shutdown_signal() -> Receiver<()> {
    let (tx, rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down...");
        let _ = tx.try_send(());
    })
    .expect("Error setting Ctrl+C handler");
    rx
}

fn read_symbols(path: &Path) -> Result<Vec<Symbol>> {
    let file = File::open(path)?;
    let symbols = Symbol::parse_from_reader(BufReader::new(file))?;
    info!("Symbols: {:?}", symbols);
    Ok(symbols)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
