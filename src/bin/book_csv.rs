// ============================================================================
// CSV Command Driver
// Feeds a book from CSV command files and prints the results
// ============================================================================
//
// Supported commands, one per line:
//   ADD,order_id,user_id,side,price,quantity
//   REMOVE,order_id
//   SHOW_BEST | BEST_BID | BEST_ASK
//   SHOW_TOP,k          (k = 0 prints all levels)
//   SHOW_ALL_TRADES
//   GET_TRADE,trade_id
//
// Command keywords are case-insensitive. `side` is "buy" (any case);
// anything else is treated as sell. Empty lines are skipped; malformed or
// unknown lines emit a diagnostic and processing continues.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use limit_book::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Add {
        order_id: String,
        user_id: String,
        side: Side,
        price: f64,
        quantity: u64,
    },
    Remove(String),
    ShowBest,
    BestBid,
    BestAsk,
    ShowTop(usize),
    ShowAllTrades,
    GetTrade(String),
}

fn parse_side(side: &str) -> Side {
    if side.eq_ignore_ascii_case("buy") {
        Side::Buy
    } else {
        Side::Sell
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut fields = line.split(',').map(str::trim);
    let keyword = fields.next().unwrap_or("");

    if keyword.eq_ignore_ascii_case("ADD") {
        let order_id = fields.next().ok_or("ADD missing order_id")?;
        let user_id = fields.next().ok_or("ADD missing user_id")?;
        let side = fields.next().ok_or("ADD missing side")?;
        let price = fields.next().ok_or("ADD missing price")?;
        let quantity = fields.next().ok_or("ADD missing quantity")?;
        Ok(Command::Add {
            order_id: order_id.to_owned(),
            user_id: user_id.to_owned(),
            side: parse_side(side),
            price: price
                .parse()
                .map_err(|_| format!("invalid price '{price}'"))?,
            quantity: quantity
                .parse()
                .map_err(|_| format!("invalid quantity '{quantity}'"))?,
        })
    } else if keyword.eq_ignore_ascii_case("REMOVE") {
        let order_id = fields.next().ok_or("REMOVE missing order_id")?;
        Ok(Command::Remove(order_id.to_owned()))
    } else if keyword.eq_ignore_ascii_case("SHOW_BEST") {
        Ok(Command::ShowBest)
    } else if keyword.eq_ignore_ascii_case("BEST_BID") {
        Ok(Command::BestBid)
    } else if keyword.eq_ignore_ascii_case("BEST_ASK") {
        Ok(Command::BestAsk)
    } else if keyword.eq_ignore_ascii_case("SHOW_TOP") {
        let k = fields.next().ok_or("SHOW_TOP missing k")?;
        Ok(Command::ShowTop(
            k.parse().map_err(|_| format!("invalid k '{k}'"))?,
        ))
    } else if keyword.eq_ignore_ascii_case("SHOW_ALL_TRADES") {
        Ok(Command::ShowAllTrades)
    } else if keyword.eq_ignore_ascii_case("GET_TRADE") {
        let trade_id = fields.next().ok_or("GET_TRADE missing trade_id")?;
        Ok(Command::GetTrade(trade_id.to_owned()))
    } else {
        Err(format!("unrecognized command '{keyword}'"))
    }
}

fn format_trade(trade: &Trade) -> String {
    format!(
        "Trade ID: {} | Buy Order: {} (User {}) | Sell Order: {} (User {}) | Size: {} | Price: {:.2} | Timestamp: {}",
        trade.trade_id,
        trade.buy_order_id,
        trade.buy_user_id,
        trade.sell_order_id,
        trade.sell_user_id,
        trade.size,
        trade.price,
        trade.timestamp.to_rfc3339(),
    )
}

fn print_levels(label: &str, k: usize, views: &[LevelView]) {
    if k == 0 {
        println!("All {label} Levels:");
    } else {
        println!("Top {k} {label} Levels:");
    }
    for view in views {
        println!("  Price: {:.2}, Size: {}", view.price, view.size);
    }
}

fn run_command(book: &mut Book, command: Command) {
    match command {
        Command::Add {
            order_id,
            user_id,
            side,
            price,
            quantity,
        } => {
            let order = Order::new(order_id.as_str(), user_id, side, price, quantity);
            match book.submit(order) {
                Ok(trade_ids) if trade_ids.is_empty() => {
                    println!("No trades executed when adding order {order_id}.");
                }
                Ok(trade_ids) => {
                    println!(
                        "Executed {} trades when adding order {order_id}:",
                        trade_ids.len()
                    );
                    for trade_id in trade_ids {
                        println!("  Trade ID: {trade_id}");
                    }
                }
                Err(err) => warn!("rejected order {order_id}: {err}"),
            }
        }
        Command::Remove(order_id) => {
            if book.cancel(&order_id) {
                println!("Successfully removed order {order_id}.");
            } else {
                println!("Order {order_id} not found.");
            }
        }
        Command::ShowBest => {
            println!(
                "Best Bid: {:.2}, Best Ask: {:.2}",
                book.best_bid(),
                book.best_ask()
            );
        }
        Command::BestBid => println!("Best Bid: {:.2}", book.best_bid()),
        Command::BestAsk => println!("Best Ask: {:.2}", book.best_ask()),
        Command::ShowTop(k) => {
            let (bids, asks) = book.depth(k);
            print_levels("Bid", k, &bids);
            print_levels("Ask", k, &asks);
        }
        Command::ShowAllTrades => {
            let trades = book.trades();
            println!("All {} trades so far:", trades.len());
            for trade in &trades {
                println!("  {}", format_trade(trade));
            }
        }
        Command::GetTrade(trade_id) => match book.trade_by_id(&trade_id) {
            Some(trade) => println!("Trade found: {}", format_trade(trade)),
            None => println!("No trade found with ID '{trade_id}'"),
        },
    }
}

fn process_file(book: &mut Book, path: &PathBuf) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    println!("Processing file: {}", path.display());

    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_command(line) {
            Ok(command) => run_command(book, command),
            Err(reason) => warn!("skipping line '{line}': {reason}"),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let files: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if files.is_empty() {
        eprintln!("Usage: book-csv <csv_file1> [csv_file2 ...]");
        std::process::exit(1);
    }

    let mut book = Book::with_config(BookConfig::new("csv-driver"))?
        .with_event_handler(Arc::new(LoggingEventHandler));

    for path in &files {
        if let Err(err) = process_file(&mut book, path) {
            warn!("skipping file {}: {err:#}", path.display());
        }
    }

    Ok(())
}
