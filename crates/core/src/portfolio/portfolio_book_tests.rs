use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stockwatch_market_data::{MarketDataError, PriceProvider, Quote};

use crate::errors::Error;
use crate::lots::{CostBasis, Lot};
use crate::portfolio::PortfolioBook;
use crate::records::{RawField, RawRecord};

// --- Mock PriceProvider ---

#[derive(Default)]
struct MockPriceProvider {
    closes: HashMap<(String, NaiveDate), Decimal>,
    latest: HashMap<String, Decimal>,
    closing_calls: Mutex<Vec<(String, NaiveDate)>>,
    latest_calls: Mutex<Vec<String>>,
}

impl MockPriceProvider {
    fn with_close(mut self, symbol: &str, date: NaiveDate, close: Decimal) -> Self {
        self.closes.insert((symbol.to_string(), date), close);
        self
    }

    fn with_latest(mut self, symbol: &str, close: Decimal) -> Self {
        self.latest.insert(symbol.to_string(), close);
        self
    }

    fn closing_call_count(&self) -> usize {
        self.closing_calls.lock().unwrap().len()
    }

    fn latest_call_count(&self) -> usize {
        self.latest_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn closing_price(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Quote, MarketDataError> {
        self.closing_calls
            .lock()
            .unwrap()
            .push((symbol.to_string(), date));
        self.closes
            .get(&(symbol.to_string(), date))
            .map(|close| Quote::new(Utc::now(), *close, "MOCK".to_string()))
            .ok_or_else(|| MarketDataError::NoDataForDate {
                symbol: symbol.to_string(),
                date,
            })
    }

    async fn latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.latest_calls.lock().unwrap().push(symbol.to_string());
        self.latest
            .get(symbol)
            .map(|close| Quote::new(Utc::now(), *close, "MOCK".to_string()))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

fn explicit_lot(quantity: u64, price: Decimal) -> Lot {
    Lot::new(quantity, CostBasis::Explicit(price))
}

fn date_lot(quantity: u64, date: NaiveDate) -> Lot {
    Lot::new(quantity, CostBasis::ByDate { date, time: None })
}

fn jan_3() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 3).unwrap()
}

// --- invested_amount ---

#[tokio::test]
async fn test_invested_amount_single_explicit_lot() {
    let provider = Arc::new(MockPriceProvider::default());
    let mut book = PortfolioBook::new(provider);
    book.add_position("AAPL", vec![explicit_lot(10, dec!(150.0))]);

    assert_eq!(book.invested_amount().await.unwrap(), dec!(1500.0));
}

#[tokio::test]
async fn test_invested_amount_multiple_lots() {
    let provider = Arc::new(MockPriceProvider::default());
    let mut book = PortfolioBook::new(provider);
    book.add_position(
        "AAPL",
        vec![explicit_lot(10, dec!(150.0)), explicit_lot(5, dec!(160.0))],
    );

    assert_eq!(book.invested_amount().await.unwrap(), dec!(2300.0));
}

#[tokio::test]
async fn test_invested_amount_resolves_date_lots() {
    let provider = Arc::new(MockPriceProvider::default().with_close("AAPL", jan_3(), dec!(145.0)));
    let mut book = PortfolioBook::new(provider);
    book.add_position("AAPL", vec![date_lot(10, jan_3())]);

    assert_eq!(book.invested_amount().await.unwrap(), dec!(1450.0));
}

#[tokio::test]
async fn test_invested_amount_is_order_independent() {
    let lots = vec![
        explicit_lot(10, dec!(150.0)),
        explicit_lot(5, dec!(160.0)),
        explicit_lot(3, dec!(95.5)),
    ];
    let mut reversed = lots.clone();
    reversed.reverse();

    let mut book_a = PortfolioBook::new(Arc::new(MockPriceProvider::default()));
    book_a.add_position("AAPL", lots);
    let mut book_b = PortfolioBook::new(Arc::new(MockPriceProvider::default()));
    book_b.add_position("AAPL", reversed);

    assert_eq!(
        book_a.invested_amount().await.unwrap(),
        book_b.invested_amount().await.unwrap()
    );
}

#[tokio::test]
async fn test_cost_basis_resolved_once_and_memoized() {
    let provider = Arc::new(MockPriceProvider::default().with_close("AAPL", jan_3(), dec!(145.0)));
    let mut book = PortfolioBook::new(provider.clone());
    // Two lots sharing one acquisition date, valued three times over.
    book.add_position("AAPL", vec![date_lot(10, jan_3()), date_lot(5, jan_3())]);

    for _ in 0..3 {
        assert_eq!(book.invested_amount().await.unwrap(), dec!(2175.0));
    }
    assert_eq!(provider.closing_call_count(), 1);
}

#[tokio::test]
async fn test_invested_amount_propagates_price_unavailable() {
    // No close registered for the date: the resolver reports no data.
    let provider = Arc::new(MockPriceProvider::default());
    let mut book = PortfolioBook::new(provider);
    book.add_position("AAPL", vec![date_lot(10, jan_3())]);

    let err = book.invested_amount().await.unwrap_err();
    assert!(err.is_price_unavailable());
    assert!(matches!(
        err,
        Error::MarketData(MarketDataError::NoDataForDate { .. })
    ));
}

// --- current_amount ---

#[tokio::test]
async fn test_current_amount_prices_symbol_once() {
    let provider = Arc::new(MockPriceProvider::default().with_latest("AAPL", dec!(100.0)));
    let mut book = PortfolioBook::new(provider.clone());
    book.add_position(
        "AAPL",
        vec![explicit_lot(10, dec!(150.0)), explicit_lot(5, dec!(160.0))],
    );

    // latest_close(AAPL) * (10 + 5), never priced per lot.
    assert_eq!(book.current_amount().await.unwrap(), dec!(1500.0));
    assert_eq!(provider.latest_call_count(), 1);
}

#[tokio::test]
async fn test_current_amount_sums_across_symbols() {
    let provider = Arc::new(
        MockPriceProvider::default()
            .with_latest("AAPL", dec!(100.0))
            .with_latest("MSFT", dec!(200.0)),
    );
    let mut book = PortfolioBook::new(provider);
    book.add_position("AAPL", vec![explicit_lot(10, dec!(150.0))]);
    book.add_position("MSFT", vec![explicit_lot(2, dec!(180.0))]);

    assert_eq!(book.current_amount().await.unwrap(), dec!(1400.0));
}

#[tokio::test]
async fn test_current_amount_propagates_unknown_symbol() {
    let provider = Arc::new(MockPriceProvider::default());
    let mut book = PortfolioBook::new(provider);
    book.add_position("AAPL", vec![explicit_lot(10, dec!(150.0))]);

    let err = book.current_amount().await.unwrap_err();
    assert!(err.is_price_unavailable());
}

// --- per_symbol_profit ---

#[tokio::test]
async fn test_per_symbol_profit_uses_per_lot_cost_bases() {
    let provider = Arc::new(
        MockPriceProvider::default()
            .with_latest("AAPL", dec!(160.0))
            .with_close("AAPL", jan_3(), dec!(140.0)),
    );
    let mut book = PortfolioBook::new(provider.clone());
    // Heterogeneous cost bases: one explicit, one date-resolved.
    book.add_position(
        "AAPL",
        vec![explicit_lot(10, dec!(150.0)), date_lot(5, jan_3())],
    );

    // (160-150)*10 + (160-140)*5
    assert_eq!(book.per_symbol_profit("AAPL").await.unwrap(), dec!(200.0));
    assert_eq!(provider.latest_call_count(), 1);
}

#[tokio::test]
async fn test_per_symbol_profit_unknown_symbol() {
    let provider = Arc::new(MockPriceProvider::default());
    let book = PortfolioBook::new(provider);

    let err = book.per_symbol_profit("MSFT").await.unwrap_err();
    assert!(matches!(err, Error::UnknownSymbol(ref symbol) if symbol == "MSFT"));
}

// --- snapshot ---

#[tokio::test]
async fn test_snapshot_entries_follow_record_order() {
    let provider = Arc::new(
        MockPriceProvider::default()
            .with_latest("MSFT", dec!(200.0))
            .with_latest("AAPL", dec!(160.0)),
    );
    let mut book = PortfolioBook::new(provider);
    book.add_position("MSFT", vec![explicit_lot(2, dec!(180.0))]);
    book.add_position("AAPL", vec![explicit_lot(10, dec!(150.0))]);

    let snapshot = book.snapshot().await.unwrap();
    let symbols: Vec<&str> = snapshot
        .entries
        .iter()
        .map(|entry| entry.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["MSFT", "AAPL"]);
}

#[tokio::test]
async fn test_snapshot_reports_price_profit_and_reference() {
    let provider = Arc::new(MockPriceProvider::default().with_latest("AAPL", dec!(160.0)));
    let mut book = PortfolioBook::new(provider);
    book.add_position(
        "AAPL",
        vec![explicit_lot(10, dec!(150.0)), explicit_lot(5, dec!(160.0))],
    );

    let snapshot = book.snapshot().await.unwrap();
    assert_eq!(snapshot.entries.len(), 1);
    let entry = &snapshot.entries[0];
    assert_eq!(entry.current_price, dec!(160.0));
    // (160-150)*10 + (160-160)*5
    assert_eq!(entry.profit, dec!(100.0));
    // 2300 invested over 15 units
    assert_eq!(entry.cost_reference, dec!(2300.0) / dec!(15));
}

// --- from_records ---

#[tokio::test]
async fn test_from_records_scalar_and_list_forms_agree() {
    let scalar_records = vec![(
        "AAPL".to_string(),
        RawRecord {
            quantity: Some(RawField::Scalar("10".to_string())),
            purchase_price: Some(RawField::Scalar("150.0".to_string())),
            ..Default::default()
        },
    )];
    let list_records = vec![(
        "AAPL".to_string(),
        RawRecord {
            quantity: Some(RawField::List(vec!["10".to_string()])),
            purchase_price: Some(RawField::List(vec!["150.0".to_string()])),
            ..Default::default()
        },
    )];

    let book_a =
        PortfolioBook::from_records(&scalar_records, Arc::new(MockPriceProvider::default()))
            .unwrap();
    let book_b =
        PortfolioBook::from_records(&list_records, Arc::new(MockPriceProvider::default()))
            .unwrap();

    assert_eq!(
        book_a.invested_amount().await.unwrap(),
        book_b.invested_amount().await.unwrap()
    );
}

#[tokio::test]
async fn test_from_records_rejects_malformed_record() {
    let records = vec![(
        "AAPL".to_string(),
        RawRecord {
            quantity: Some(RawField::List(vec!["10".to_string(), "5".to_string()])),
            purchase_price: Some(RawField::List(vec!["150.0".to_string()])),
            ..Default::default()
        },
    )];

    let err = PortfolioBook::from_records(&records, Arc::new(MockPriceProvider::default()))
        .unwrap_err();
    assert!(matches!(err, Error::Record(_)));
}
