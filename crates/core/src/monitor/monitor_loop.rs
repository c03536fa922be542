//! The live-refresh loop.
//!
//! A single cooperative loop: each tick takes a profit snapshot (blocking on
//! the price provider), renders it synchronously, then waits out the
//! interval. Ticks never overlap. After a configured number of rendered
//! frames the loop closes the rendering surface and keeps going with the
//! counter reset; it only stops on cancellation or an unrecovered error.
//! This replaces the recursive restart-by-re-entry pattern with one
//! testable path and no call-stack growth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::{interval, MissedTickBehavior};

use crate::errors::Result;
use crate::portfolio::PortfolioBook;

use super::RenderSink;

/// Cooperative cancellation handle, checked at the top of each tick.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination. The loop stops at the next tick boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Monitor loop lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Rendering,
    Terminated,
}

/// Drives periodic re-valuation and rendering of the portfolio.
pub struct MonitorLoop {
    book: Arc<PortfolioBook>,
    sink: Arc<dyn RenderSink>,
    tick_interval: Duration,
    frame_limit: u32,
    cancel: CancelFlag,
}

impl MonitorLoop {
    /// `frame_limit` is the number of rendered frames per surface; the
    /// surface is closed and reopened each time it is reached. A limit of
    /// zero is treated as one.
    pub fn new(
        book: Arc<PortfolioBook>,
        sink: Arc<dyn RenderSink>,
        tick_interval: Duration,
        frame_limit: u32,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            book,
            sink,
            tick_interval,
            frame_limit: frame_limit.max(1),
            cancel,
        }
    }

    /// Run until cancelled or an unrecovered error occurs.
    ///
    /// A price-unavailable failure discards that tick's frame and the loop
    /// continues on the normal interval; any other error closes the surface
    /// and propagates.
    pub async fn run(&self) -> Result<()> {
        let mut state = LoopState::Idle;
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames: u32 = 0;

        transition(&mut state, LoopState::Running);
        loop {
            ticker.tick().await;

            if self.cancel.is_cancelled() {
                info!("Cancellation requested, terminating monitor loop");
                self.sink.close();
                transition(&mut state, LoopState::Terminated);
                return Ok(());
            }

            match self.book.snapshot().await {
                Ok(snapshot) => {
                    transition(&mut state, LoopState::Rendering);
                    if let Err(e) = self.sink.render(&snapshot) {
                        self.sink.close();
                        transition(&mut state, LoopState::Terminated);
                        return Err(e);
                    }
                    frames += 1;
                    if frames >= self.frame_limit {
                        debug!(
                            "Frame limit {} reached, restarting render surface",
                            self.frame_limit
                        );
                        self.sink.close();
                        frames = 0;
                    }
                    transition(&mut state, LoopState::Running);
                }
                Err(e) if e.is_price_unavailable() => {
                    warn!("Skipping frame, price unavailable: {}", e);
                }
                Err(e) => {
                    self.sink.close();
                    transition(&mut state, LoopState::Terminated);
                    return Err(e);
                }
            }
        }
    }
}

fn transition(state: &mut LoopState, next: LoopState) {
    debug!("Monitor loop state {:?} -> {:?}", state, next);
    *state = next;
}
