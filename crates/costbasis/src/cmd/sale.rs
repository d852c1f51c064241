//! Entry point for the `costbasis` command.

use crate::cmd::completions::ShellType;
use crate::config::{OutputFormat, Settings, DEFAULT_PRECISION};
use crate::input::{parse_price, parse_quantity};
use crate::operation::Operation;
use crate::{logging, lots, output};
use anyhow::Result;
use clap::{Parser, Subcommand};
use costbasis_core::LotProvider;
use costbasis_engine::CostAccountingEngine;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for a rejected input or an oversized sale.
const EXIT_FAILURE: u8 = 1;
/// Exit code when the lot file cannot be loaded.
const EXIT_LOTS_ERROR: u8 = 2;

/// Evaluate a hypothetical FIFO sale of shares.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Lot file (.csv or .json); the built-in sample holdings when omitted
    #[arg(short, long, value_name = "FILE", env = "COSTBASIS_LOTS", global = true)]
    pub lots: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Decimal places shown for money amounts
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PRECISION, global = true)]
    pub precision: u32,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    /// Operation to run; starts the interactive prompt when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// The remaining number of shares after the sale
    Remaining(SaleArgs),
    /// The cost basis per share of the sold shares
    SoldBasis(SaleArgs),
    /// The cost basis per share of the remaining shares after the sale
    RemainingBasis(SaleArgs),
    /// The total profit or loss of the sale
    Profit(PricedSaleArgs),
    /// Every answer for the sale with a per-lot breakdown
    Report(PricedSaleArgs),
    /// List the lots in FIFO order
    Lots,
    /// Start the interactive prompt
    Interactive,
}

/// A sale without a price.
#[derive(clap::Args, Debug)]
pub struct SaleArgs {
    /// Number of shares to sell
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub quantity: String,
}

/// A sale at a given price per share.
#[derive(clap::Args, Debug)]
pub struct PricedSaleArgs {
    /// Number of shares to sell
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub quantity: String,

    /// Sale price per share
    #[arg(short, long, value_name = "PRICE", allow_hyphen_values = true)]
    pub price: String,
}

/// Main entry point.
pub fn main() -> ExitCode {
    main_with_name("costbasis")
}

/// Main entry point with custom binary name.
pub fn main_with_name(bin_name: &str) -> ExitCode {
    let args = Args::parse();

    // Handle shell completion generation
    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, bin_name);
        return ExitCode::SUCCESS;
    }

    logging::init(args.verbose);
    let settings = Settings::from_args(&args);

    let provider = match lots::load_provider(settings.lots.as_deref()) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_LOTS_ERROR);
        }
    };
    let engine = CostAccountingEngine::new(provider);

    let mut stdout = io::stdout().lock();
    match run(&args, &settings, &engine, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Run the selected command against `engine`.
pub fn run<P: LotProvider, W: Write>(
    args: &Args,
    settings: &Settings,
    engine: &CostAccountingEngine<P>,
    writer: &mut W,
) -> Result<()> {
    match &args.command {
        None | Some(Command::Interactive) => {
            crate::cmd::interactive::run(engine, settings, writer)
        }
        Some(Command::Lots) => {
            let provider = engine.provider();
            output::write_lots(
                writer,
                settings,
                &provider.lots_in_fifo_order(),
                provider.total_owned_quantity(),
            )
        }
        Some(Command::Remaining(sale)) => answer(
            writer,
            settings,
            engine,
            Operation::RemainingShares,
            &sale.quantity,
            None,
        ),
        Some(Command::SoldBasis(sale)) => answer(
            writer,
            settings,
            engine,
            Operation::SoldCostBasis,
            &sale.quantity,
            None,
        ),
        Some(Command::RemainingBasis(sale)) => answer(
            writer,
            settings,
            engine,
            Operation::RemainingCostBasis,
            &sale.quantity,
            None,
        ),
        Some(Command::Profit(sale)) => answer(
            writer,
            settings,
            engine,
            Operation::Profit,
            &sale.quantity,
            Some(&sale.price),
        ),
        Some(Command::Report(sale)) => {
            let quantity = parse_quantity(&sale.quantity)?;
            let price = parse_price(&sale.price)?;
            let summary = engine.summarize(quantity, price)?;
            output::write_summary(writer, settings, &summary)
        }
    }
}

fn answer<P: LotProvider, W: Write>(
    writer: &mut W,
    settings: &Settings,
    engine: &CostAccountingEngine<P>,
    operation: Operation,
    quantity: &str,
    price: Option<&str>,
) -> Result<()> {
    let quantity = parse_quantity(quantity)?;
    let price = price.map(parse_price).transpose()?;

    let answer = operation.evaluate(engine, quantity, price.unwrap_or(Decimal::ZERO))?;
    output::write_answer(writer, settings, operation, quantity, price, answer)
}
