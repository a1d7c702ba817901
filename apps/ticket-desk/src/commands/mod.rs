//! # Commands Module
//!
//! Every operation the counter can perform, callable from the one-shot CLI
//! and from the interactive shell alike.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── batch.rs    ◄─── Preview, generate, print, export, clear
//! └── config.rs   ◄─── Configuration and class catalogue
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Pure: no state at all
//! fn preview_pricing(form: &TicketForm)
//!
//! // Only needs the session
//! fn export_batch(session: &BatchSession, path: &Path)
//!
//! // Needs both, plus the identity seams
//! fn generate_tickets(config: &ConfigState, session: &BatchSession, form, ids, clock)
//! ```

pub mod batch;
pub mod config;
