//! The live-refresh monitor loop and its rendering seam.

mod monitor_loop;
mod sink;


pub use monitor_loop::{CancelFlag, LoopState, MonitorLoop};
pub use sink::RenderSink;
