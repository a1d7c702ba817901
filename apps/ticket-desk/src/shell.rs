//! # Counter Shell
//!
//! Line-oriented session around one `BatchSession`, so a batch generated
//! once can be printed and exported afterwards.
//!
//! ```text
//! > generate -c PLUS -q 3 -d flat -v 100
//! > print
//! > export batch.json
//! > clear
//! > print
//! Please generate tickets first.
//! > quit
//! ```
//!
//! Every line is parsed by clap with the same form flags as the one-shot
//! CLI. Errors are printed and the session continues.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use ticket_core::identity::SystemClock;
use ticket_core::{Clock, IdGenerator};

use crate::cli::FormArgs;
use crate::commands::batch;
use crate::render::TextTicketRenderer;
use crate::state::{BatchSession, ConfigState};

const PROMPT: &str = "> ";

#[derive(Debug, Parser)]
#[command(name = "ticket-desk", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Show the pricing summary for a form
    Preview(FormArgs),
    /// Generate a batch, replacing the current one
    Generate(FormArgs),
    /// Print the current batch
    Print,
    /// Export the current batch as JSON
    Export { path: PathBuf },
    /// Discard the current batch
    Clear,
    /// Show whether a batch is loaded
    Status,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Runs the shell with the configured identity scheme and the system clock.
pub fn run_shell<R: BufRead, W: Write>(
    config: &ConfigState,
    session: &BatchSession,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut ids = config.id_scheme.generator();
    run_shell_with(config, session, input, output, ids.as_mut(), &SystemClock)
}

/// Runs the shell with explicit identity seams.
pub fn run_shell_with<R, W, I, C>(
    config: &ConfigState,
    session: &BatchSession,
    input: R,
    output: &mut W,
    ids: &mut I,
    clock: &C,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    I: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    info!(event = %config.event.name, scheme = %config.id_scheme, "Shell started");
    let renderer = TextTicketRenderer::new(config.currency.clone());

    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                // Covers `help` and `--help` too
                write!(output, "{}", err)?;
                write!(output, "{}", PROMPT)?;
                output.flush()?;
                continue;
            }
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Preview(form) => match batch::preview_pricing(&form.into()) {
                Ok(summary) => write_lines(output, summary.lines(config))?,
                Err(err) => writeln!(output, "{}", err.message)?,
            },
            ShellCommand::Generate(form) => {
                match batch::generate_tickets(config, session, &form.into(), &mut *ids, clock) {
                    Ok(summary) => {
                        write_lines(output, summary.lines(config))?;
                        writeln!(output, "Generated {} tickets.", summary.quantity)?;
                    }
                    Err(err) => writeln!(output, "{}", err.message)?,
                }
            }
            ShellCommand::Print => {
                if let Err(err) = batch::print_batch(session, &renderer, &mut *output) {
                    writeln!(output, "{}", err.message)?;
                }
            }
            ShellCommand::Export { path } => match batch::export_batch(session, &path) {
                Ok(count) => {
                    writeln!(output, "Exported {} tickets to {}", count, path.display())?
                }
                Err(err) => writeln!(output, "{}", err.message)?,
            },
            ShellCommand::Clear => {
                let cleared = batch::clear_batch(session);
                writeln!(output, "Cleared {} tickets.", cleared)?;
            }
            ShellCommand::Status => {
                let status = session.with_batch(|current| match current {
                    Some(b) => format!(
                        "{} x {} tickets, final {}",
                        b.ticket_class(),
                        b.len(),
                        config.format_currency(b.pricing().final_total)
                    ),
                    None => "No batch generated.".to_string(),
                });
                writeln!(output, "{}", status)?;
            }
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    info!("Shell ended");
    Ok(())
}

fn write_lines<W: Write>(output: &mut W, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(output, "{}", line)?;
    }
    Ok(())
}
