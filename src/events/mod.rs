//! # Events Module
//!
//! Event-driven progress reporting for background scans and deletions.
//!
//! ## Design
//! Workers emit events through channels, allowing any UI (CLI, GUI, web)
//! to subscribe and display progress on its own thread.
//!
//! ## Example
//! ```rust,ignore
//! let handle = spawn_scan(finder, root, CancellationToken::new())?;
//!
//! for event in handle.events().iter() {
//!     if let Event::Scan(ScanEvent::Progress(p)) = event {
//!         println!("{:.0}%", p.fraction * 100.0);
//!     }
//! }
//!
//! let report = handle.join()?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender};
pub use types::*;
