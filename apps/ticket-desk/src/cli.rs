//! # Command Line
//!
//! One-shot subcommands plus the interactive `shell`.
//!
//! ```text
//! ticket-desk classes
//! ticket-desk config
//! ticket-desk preview  --class PLUS --quantity 3 --discount flat --value 100
//! ticket-desk generate --class ECONO -q 4 -d percent -v 10 --print --export batch.json
//! ticket-desk shell
//! ```
//!
//! Numeric flags are taken as raw text so the form validator, not clap,
//! decides what is acceptable (and clamps the discount value).

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ticket_core::identity::SystemClock;
use ticket_core::validation::TicketForm;

use crate::commands::{batch, config};
use crate::render::TextTicketRenderer;
use crate::shell;
use crate::state::{BatchSession, ConfigState};

#[derive(Debug, Parser)]
#[command(name = "ticket-desk", about = "Counter ticket batch generator", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List ticket classes and their default prices
    Classes,
    /// Show the active configuration
    Config,
    /// Show the pricing summary without generating tickets
    Preview(FormArgs),
    /// Generate a batch, then optionally print and export it
    Generate(GenerateArgs),
    /// Interactive counter session
    Shell,
}

/// The counter form as flags.
#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    /// Ticket class: PRIME, PLUS or ECONO
    #[arg(short = 'c', long = "class", default_value = "PRIME")]
    pub ticket_class: String,

    /// Number of tickets in the batch
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub quantity: String,

    /// Base price per ticket; the class price when omitted
    #[arg(short, long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Discount type: none, flat or percent
    #[arg(short, long, default_value = "none")]
    pub discount: String,

    /// Discount value (total amount for flat, 0-100 for percent)
    #[arg(short = 'v', long, default_value = "0", allow_hyphen_values = true)]
    pub value: String,
}

impl From<FormArgs> for TicketForm {
    fn from(args: FormArgs) -> Self {
        TicketForm {
            ticket_class: args.ticket_class,
            base_price: args.price,
            quantity: args.quantity,
            discount_type: args.discount,
            discount_value: args.value,
        }
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    form: FormArgs,

    /// Print the tickets after generating
    #[arg(long)]
    print: bool,

    /// Write the batch as JSON to this file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

impl Cli {
    /// Runs the parsed subcommand, writing results to `out`.
    pub fn run<W: Write>(self, config: &ConfigState, out: &mut W) -> anyhow::Result<()> {
        match self.command {
            Command::Classes => {
                for entry in config::list_classes(config) {
                    writeln!(out, "{:<7}{}", entry.ticket_class.as_str(), entry.display_price)?;
                }
            }
            Command::Config => {
                let current = config::get_config(config);
                writeln!(out, "{}", serde_json::to_string_pretty(&current)?)?;
            }
            Command::Preview(form) => {
                let summary = batch::preview_pricing(&form.into())?;
                for line in summary.lines(config) {
                    writeln!(out, "{}", line)?;
                }
            }
            Command::Generate(args) => {
                let session = BatchSession::new();
                let mut ids = config.id_scheme.generator();
                let summary = batch::generate_tickets(
                    config,
                    &session,
                    &args.form.into(),
                    ids.as_mut(),
                    &SystemClock,
                )?;
                for line in summary.lines(config) {
                    writeln!(out, "{}", line)?;
                }

                if args.print {
                    let renderer = TextTicketRenderer::new(config.currency.clone());
                    batch::print_batch(&session, &renderer, &mut *out)?;
                }
                if let Some(path) = args.export {
                    let count = batch::export_batch(&session, &path)?;
                    writeln!(out, "Exported {} tickets to {}", count, path.display())?;
                }
            }
            Command::Shell => {
                let stdin = std::io::stdin();
                shell::run_shell(config, &BatchSession::new(), stdin.lock(), out)
                    .context("shell session failed")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        cli.run(&ConfigState::default(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_form_args_defaults() {
        let cli = Cli::try_parse_from(["ticket-desk", "preview"]).unwrap();
        let Command::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        let form: TicketForm = args.into();
        assert_eq!(form, TicketForm::new("PRIME", "1"));
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli =
            Cli::try_parse_from(["ticket-desk", "preview", "-q", "3", "-d", "flat", "-v", "-50"])
                .unwrap();
        let Command::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(args.value, "-50");
    }

    #[test]
    fn test_classes_output() {
        let out = run(&["ticket-desk", "classes"]).unwrap();
        assert_eq!(out, "PRIME  ₹15,000\nPLUS   ₹11,000\nECONO  ₹2,500\n");
    }

    #[test]
    fn test_preview_output() {
        let out = run(&[
            "ticket-desk", "preview", "--class", "plus", "-q", "3", "-d", "flat", "-v", "100",
        ])
        .unwrap();
        assert!(out.contains("Subtotal:  ₹33,000"));
        assert!(out.contains("Discount:  ₹100"));
        assert!(out.contains("Final:     ₹32,900"));
    }

    #[test]
    fn test_generate_with_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let out = run(&[
            "ticket-desk",
            "generate",
            "-c",
            "ECONO",
            "-q",
            "2",
            "--print",
            "--export",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert!(out.contains("XYZ CONFERENCE · 2/2"));
        assert!(out.contains("Exported 2 tickets"));
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_quantity_is_an_error() {
        let err = run(&["ticket-desk", "generate", "-q", "0"]).unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }
}
