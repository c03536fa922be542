use crate::errors::Result;
use crate::portfolio::ProfitSnapshot;

/// Presentation surface for profit snapshots.
///
/// Rendering is synchronous: the monitor loop never starts a new tick while
/// a render is in flight, so implementations need no internal locking for
/// ordering.
pub trait RenderSink: Send + Sync {
    /// Draw one snapshot onto the current surface.
    fn render(&self, snapshot: &ProfitSnapshot) -> Result<()>;

    /// Close the current surface. Called when the frame limit restarts the
    /// surface and once more when the loop terminates.
    fn close(&self);
}
