//! Price-Time Book - demo driver
//!
//! Replays a small worked example against the book and prints each side
//! after every step. Logging runs at DEBUG so the book's own tracing output
//! shows up alongside.

use price_time_book::types::price::{from_fixed_trimmed, to_fixed};
use price_time_book::types::time::{self, format_timestamp};
use price_time_book::{BookError, OrderBook, Side};
use tracing::Level;

fn print_summary(book: &OrderBook) {
    let show = |p: Option<u64>| p.map_or_else(|| "(none)".to_string(), from_fixed_trimmed);
    println!(
        "Top Bid: {} | Top Ask: {} | Crossed? {}",
        show(book.top_price(Side::Bid)),
        show(book.top_price(Side::Ask)),
        if book.is_crossed() { "YES" } else { "NO" }
    );
}

fn print_side(book: &OrderBook, side: Side) {
    println!("{side}s:");
    for price in book.price_levels(side) {
        print!("  Price {} ->", from_fixed_trimmed(price));
        for order in book.orders_at(side, price) {
            print!(
                " [id={}, q={}, lu={}]",
                order.id,
                order.quantity,
                format_timestamp(order.updated_at)
            );
        }
        println!();
    }
}

fn print_book(book: &OrderBook) {
    print_side(book, Side::Bid);
    print_side(book, Side::Ask);
}

fn main() -> Result<(), BookError> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let price = |s: &str| to_fixed(s).unwrap_or_default();
    let mut book = OrderBook::with_capacity(16);

    book.add("1", Side::Bid, price("50"), 400)?;
    book.add("2", Side::Bid, price("50"), 300)?;
    book.add("3", Side::Ask, price("55"), 400)?;
    book.add("4", Side::Bid, price("51"), 100)?;
    book.add("5", Side::Ask, price("56"), 200)?;

    println!("Initial book:");
    print_book(&book);
    print_summary(&book);
    println!("----");

    book.remove("1")?;
    println!("After cancelling order 1:");
    print_book(&book);
    println!("----");

    book.add("1", Side::Bid, price("50"), 400)?;
    book.amend("1", Some(price("50")), Some(500))?;
    println!("After amending order 1 to qty 500 (same price, increased qty => loses priority):");
    print_side(&book, Side::Bid);
    println!("----");

    book.amend("2", Some(price("50")), Some(200))?;
    println!("After amending order 2 to qty 200 (same price, decreased qty => keeps priority):");
    print_side(&book, Side::Bid);
    println!("----");

    println!("Simulating a fill by hand: order 6 sells 150 @ 50");
    book.remove("4")?;
    book.amend("2", Some(price("50")), Some(150))?;
    print_book(&book);
    print_summary(&book);
    println!("----");

    let created_after = book.orders_created_after(time::now());
    println!("Orders created after now: {}", created_after.len());

    if let Some(order) = book.get_order("3") {
        println!(
            "Order 3 info: side={} price={} qty={} created={}",
            order.side,
            from_fixed_trimmed(order.price),
            order.quantity,
            format_timestamp(order.created_at)
        );
    }

    match book.state_root_hex() {
        Ok(root) => println!("State root: {root}"),
        Err(e) => println!("State root unavailable: {e}"),
    }

    println!("Demo complete.");
    Ok(())
}
