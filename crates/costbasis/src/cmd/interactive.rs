//! Interactive prompt: ask for a sale, answer one question about it, repeat.

use anyhow::Result;
use costbasis_core::LotProvider;
use costbasis_engine::CostAccountingEngine;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::io::Write;

use crate::config::Settings;
use crate::input::{is_yes, parse_price, parse_quantity};
use crate::operation::Operation;
use crate::output;

const CONTINUE_PROMPT: &str = "Do you want to perform another operation? [y/N] ";

/// What a single prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Line(String),
    /// Ctrl-C: abandon the current sale and start over.
    Interrupted,
    /// Ctrl-D: leave the prompt.
    Eof,
}

/// Source of prompt replies, so the loop can be driven without a terminal.
trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<Reply>;
}

impl Prompter for DefaultEditor {
    fn ask(&mut self, prompt: &str) -> Result<Reply> {
        match self.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.add_history_entry(trimmed);
                }
                Ok(Reply::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Reply::Interrupted),
            Err(ReadlineError::Eof) => Ok(Reply::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Run the prompt loop until the user declines to continue or sends EOF.
///
/// Prompts go to the terminal through the line editor; everything else is
/// written to `writer`.
pub fn run<P: LotProvider, W: Write>(
    engine: &CostAccountingEngine<P>,
    settings: &Settings,
    writer: &mut W,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    // Load history
    if let Some(history_path) = &settings.history {
        if let Some(parent) = history_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.load_history(history_path);
    }

    write_banner(writer, engine)?;
    let result = prompt_loop(&mut rl, engine, settings, writer);

    // Save history
    if let Some(history_path) = &settings.history {
        let _ = rl.save_history(history_path);
    }
    result
}

fn write_banner<P: LotProvider, W: Write>(
    writer: &mut W,
    engine: &CostAccountingEngine<P>,
) -> Result<()> {
    let provider = engine.provider();
    writeln!(
        writer,
        "Holding {} shares in {} lots",
        provider.total_owned_quantity(),
        provider.lots_in_fifo_order().len()
    )?;
    Ok(())
}

fn prompt_loop<R: Prompter, P: LotProvider, W: Write>(
    prompter: &mut R,
    engine: &CostAccountingEngine<P>,
    settings: &Settings,
    writer: &mut W,
) -> Result<()> {
    loop {
        match ask_sale(prompter, engine, settings, writer)? {
            Reply::Eof => break,
            Reply::Interrupted => {
                writeln!(writer, "(interrupted)")?;
                continue;
            }
            Reply::Line(_) => {}
        }

        match prompter.ask(CONTINUE_PROMPT)? {
            Reply::Line(answer) if is_yes(&answer) => {}
            Reply::Interrupted => writeln!(writer, "(interrupted)")?,
            Reply::Line(_) | Reply::Eof => break,
        }
    }
    writeln!(writer, "exit")?;
    Ok(())
}

/// Ask for one sale and print its answer or the reason it was rejected.
///
/// Returns `Reply::Line` once a round completed, whatever its outcome.
fn ask_sale<R: Prompter, P: LotProvider, W: Write>(
    prompter: &mut R,
    engine: &CostAccountingEngine<P>,
    settings: &Settings,
    writer: &mut W,
) -> Result<Reply> {
    macro_rules! next_line {
        ($prompt:expr) => {
            match prompter.ask($prompt)? {
                Reply::Line(line) => line,
                other => return Ok(other),
            }
        };
    }

    let quantity = next_line!("Please enter the number of shares to sell: ");
    let quantity = match parse_quantity(&quantity) {
        Ok(quantity) => quantity,
        Err(e) => return reject(writer, &e),
    };

    let price = next_line!("Please enter the sale price per share: ");
    let price = match parse_price(&price) {
        Ok(price) => price,
        Err(e) => return reject(writer, &e),
    };

    write!(writer, "{}", Operation::menu())?;
    let choice = next_line!("> ");
    let operation = match choice.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => return reject(writer, &e),
    };

    match operation.evaluate(engine, quantity, price) {
        Ok(answer) => {
            let price = operation.needs_price().then_some(price);
            output::write_answer(writer, settings, operation, quantity, price, answer)?;
        }
        Err(e) => {
            tracing::warn!(%e, quantity, "sale rejected");
            writeln!(writer, "error: {e}")?;
        }
    }
    Ok(Reply::Line(String::new()))
}

fn reject<W: Write>(writer: &mut W, err: &dyn std::error::Error) -> Result<Reply> {
    tracing::warn!(error = %err, "rejected input");
    writeln!(writer, "error: {err}")?;
    Ok(Reply::Line(String::new()))
}
