mod common;

use crate::common::*;
use shard_core::prelude::*;

#[test]
fn empty_book_rest() {
    let mut book = OrderBook::new();
    let trades = book.match_order(make_order(1, 1, Side::Buy, 100, 10, 0));
    assert!(trades.is_empty());
    assert_eq!(level_state(&book, Side::Buy, 100), vec![(1, 10)]);
    assert_eq!(book.best_ask(), None);
}

#[test]
fn exact_cross_empties_the_book() {
    let mut book = OrderBook::new();
    book.match_order(make_order(1, 1, Side::Buy, 100, 10, 0));
    let trades = book.match_order(make_order(2, 1, Side::Sell, 100, 10, 1));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].buyer_id, 1);
    assert_eq!(trades[0].seller_id, 2);
    assert_eq!(trades[0].quantity, 10);
    assert!(book.is_empty());
}

#[test]
fn partial_fill_then_rest_across_two_resting_orders() {
    let mut book = OrderBook::new();
    book.match_order(make_order(1, 1, Side::Sell, 50, 5, 0));
    book.match_order(make_order(2, 1, Side::Sell, 50, 5, 1));
    let trades = book.match_order(make_order(3, 1, Side::Buy, 50, 7, 2));

    assert_eq!(trades.len(), 2);
    assert_eq!((trades[0].seller_id, trades[0].quantity), (1, 5));
    assert_eq!((trades[1].seller_id, trades[1].quantity), (2, 2));
    assert_eq!(level_state(&book, Side::Sell, 50), vec![(2, 3)]);
    assert_eq!(book.best_bid(), None);
}

#[test]
fn price_time_priority_walks_the_cheaper_level_first() {
    let mut book = OrderBook::new();
    book.match_order(make_order(1, 1, Side::Sell, 101, 10, 0));
    book.match_order(make_order(2, 1, Side::Sell, 100, 10, 1));
    let trades = book.match_order(make_order(3, 1, Side::Buy, 101, 15, 2));

    assert_eq!(trades.len(), 2);
    assert_eq!((trades[0].price, trades[0].seller_id, trades[0].quantity), (100, 2, 10));
    assert_eq!((trades[1].price, trades[1].seller_id, trades[1].quantity), (101, 1, 5));
    assert_eq!(level_state(&book, Side::Sell, 101), vec![(1, 5)]);
}

#[test]
fn non_crossing_limits_rest_on_both_sides() {
    let mut book = OrderBook::new();
    let trades1 = book.match_order(make_order(1, 1, Side::Sell, 105, 10, 0));
    let trades2 = book.match_order(make_order(2, 1, Side::Buy, 100, 10, 1));

    assert!(trades1.is_empty());
    assert!(trades2.is_empty());
    assert_eq!(level_state(&book, Side::Buy, 100), vec![(2, 10)]);
    assert_eq!(level_state(&book, Side::Sell, 105), vec![(1, 10)]);
}

#[test]
fn same_price_orders_execute_in_arrival_order() {
    let mut book = OrderBook::new();
    book.match_order(make_order(1, 1, Side::Sell, 100, 10, 0));
    book.match_order(make_order(2, 1, Side::Sell, 100, 10, 1));
    let trades = book.match_order(make_order(3, 1, Side::Buy, 100, 10, 2));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].seller_id, 1, "earlier resting order fills first");
    assert_eq!(level_state(&book, Side::Sell, 100), vec![(2, 10)]);
}

#[test]
fn book_is_never_left_crossed() {
    let mut book = OrderBook::new();
    book.match_order(make_order(1, 1, Side::Sell, 100, 5, 0));
    book.match_order(make_order(2, 1, Side::Buy, 100, 3, 1));

    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask);
    }
}

#[test]
fn conservation_of_quantity_across_a_mixed_sequence() {
    let mut book = OrderBook::new();
    let incoming = vec![
        make_order(1, 1, Side::Sell, 100, 5, 0),
        make_order(2, 1, Side::Sell, 101, 7, 1),
        make_order(3, 1, Side::Buy, 101, 9, 2),
        make_order(4, 1, Side::Buy, 99, 4, 3),
    ];

    let mut total_in: u64 = 0;
    let mut total_traded: u64 = 0;
    for order in incoming {
        total_in += order.quantity as u64;
        for trade in book.match_order(order) {
            total_traded += trade.quantity as u64;
        }
    }
    assert_eq!(total_traded + book.total_resting_quantity(), total_in);
}
