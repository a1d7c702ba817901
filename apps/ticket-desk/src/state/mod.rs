//! # State Module
//!
//! Application state for the counter app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │      BatchSession        │        │       ConfigState        │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<              │        │  event (name, code)      │      │
//! │  │    Option<Batch>         │        │  currency format         │      │
//! │  │  >>                      │        │  id scheme               │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  • BatchSession: replaced whole on generate, emptied on clear          │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState};
pub use session::BatchSession;
