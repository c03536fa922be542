//! Text rendering surface: one log block per frame.

use rust_decimal::Decimal;
use tracing::info;

use stockwatch_core::{ProfitSnapshot, RenderSink, Result};

/// Renders snapshots as aligned text lines through tracing.
#[derive(Default)]
pub struct TextSink;

impl TextSink {
    pub fn new() -> Self {
        Self
    }
}

impl RenderSink for TextSink {
    fn render(&self, snapshot: &ProfitSnapshot) -> Result<()> {
        info!("--- portfolio @ {} ---", snapshot.taken_at.format("%H:%M:%S"));
        for entry in &snapshot.entries {
            info!(
                "{:<8} price {:>10}  avg cost {:>10}  profit {:>12}",
                entry.symbol,
                round(entry.current_price),
                round(entry.cost_reference),
                round(entry.profit),
            );
        }
        Ok(())
    }

    fn close(&self) {
        info!("--- surface closed ---");
    }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp(2)
}
