//! # Ticket Desk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ticket Desk                                      │
//! │                                                                         │
//! │  main.rs ────► ticket_desk::run()                                       │
//! │                                                                         │
//! │  lib.rs ─────► logging, configuration, clap dispatch                    │
//! │                                                                         │
//! │  commands/ ──► preview, generate, print, export, clear                  │
//! │                                                                         │
//! │  ticket-core ► pricing, allocation, identity, batch assembly            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    ticket_desk::run()
}
