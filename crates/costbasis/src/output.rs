//! Rendering results as text or JSON.

use anyhow::Result;
use costbasis_core::{PurchaseLot, ShareFragment};
use costbasis_engine::SaleSummary;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

use crate::config::{OutputFormat, Settings};
use crate::operation::{Answer, Operation};

/// Format a money amount rounded to `precision` decimal places, without
/// trailing zeros.
pub fn format_decimal(value: Decimal, precision: u32) -> String {
    value.round_dp(precision).normalize().to_string()
}

/// Format an answer for text output.
pub fn format_answer(answer: Answer, precision: u32) -> String {
    match answer {
        Answer::Shares(shares) => shares.to_string(),
        Answer::Amount(amount) => format_decimal(amount, precision),
    }
}

/// JSON shape of a single answered operation.
#[derive(Debug, Serialize)]
struct AnswerRecord {
    operation: Operation,
    quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
    value: Answer,
}

/// Write the answer to one operation.
///
/// Text output is the bare value so it can be captured by scripts.
pub fn write_answer<W: Write>(
    writer: &mut W,
    settings: &Settings,
    operation: Operation,
    quantity: u64,
    price: Option<Decimal>,
    answer: Answer,
) -> Result<()> {
    match settings.format {
        OutputFormat::Text => writeln!(writer, "{}", format_answer(answer, settings.precision))?,
        OutputFormat::Json => {
            let record = AnswerRecord {
                operation,
                quantity,
                price,
                value: answer,
            };
            serde_json::to_writer_pretty(&mut *writer, &record)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Write a full sale report.
pub fn write_summary<W: Write>(
    writer: &mut W,
    settings: &Settings,
    summary: &SaleSummary,
) -> Result<()> {
    if settings.format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)?;
        return Ok(());
    }

    let money = |value| format_decimal(value, settings.precision);
    writeln!(
        writer,
        "Sale:                  {} shares @ {}",
        summary.sale_quantity,
        money(summary.sale_price)
    )?;
    writeln!(writer, "Remaining shares:      {}", summary.remaining_quantity)?;
    writeln!(
        writer,
        "Sold cost basis:       {} per share",
        money(summary.sold_cost_basis)
    )?;
    writeln!(
        writer,
        "Remaining cost basis:  {} per share",
        money(summary.remaining_cost_basis)
    )?;
    writeln!(writer, "Profit:                {}", money(summary.profit))?;

    write_fragments(writer, "Sold lots:", &summary.sold, settings.precision)?;
    write_fragments(writer, "Remaining lots:", &summary.remaining, settings.precision)?;
    Ok(())
}

fn write_fragments<W: Write>(
    writer: &mut W,
    title: &str,
    fragments: &[ShareFragment],
    precision: u32,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{title}")?;
    if fragments.is_empty() {
        writeln!(writer, "  (none)")?;
    }
    for fragment in fragments {
        writeln!(
            writer,
            "  {}: {} @ {} = {}",
            fragment.lot_id,
            fragment.quantity,
            format_decimal(fragment.unit_price, precision),
            fragment
                .cost()
                .map_or_else(|| "overflow".to_string(), |cost| format_decimal(cost, precision))
        )?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct LotListing<'a> {
    lots: &'a [PurchaseLot],
    total: u64,
}

/// Write the lots in FIFO order with their total quantity.
///
/// `total` comes from the provider, which has already checked that it fits.
pub fn write_lots<W: Write>(
    writer: &mut W,
    settings: &Settings,
    lots: &[PurchaseLot],
    total: u64,
) -> Result<()> {
    match settings.format {
        OutputFormat::Text => {
            for lot in lots {
                writeln!(writer, "{lot}")?;
            }
            writeln!(writer, "Total: {total} shares")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &LotListing { lots, total })?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use costbasis_core::{LotId, LotProvider, StaticLotProvider};
    use costbasis_engine::CostAccountingEngine;
    use rust_decimal_macros::dec;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn json_settings() -> Settings {
        Settings {
            format: OutputFormat::Json,
            ..Settings::default()
        }
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(dec!(23.684210526), 3), "23.684");
        assert_eq!(format_decimal(dec!(27.7777777), 3), "27.778");
        assert_eq!(format_decimal(dec!(22.000), 3), "22");
        assert_eq!(format_decimal(dec!(-1800), 2), "-1800");
        assert_eq!(format_decimal(Decimal::ZERO, 3), "0");
    }

    #[test]
    fn test_write_answer_text() {
        let settings = Settings::default();
        let out = render(|w| {
            write_answer(
                w,
                &settings,
                Operation::SoldCostBasis,
                190,
                None,
                Answer::Amount(dec!(4500) / dec!(190)),
            )
        });
        assert_eq!(out, "23.684\n");
    }

    #[test]
    fn test_write_answer_json() {
        let out = render(|w| {
            write_answer(
                w,
                &json_settings(),
                Operation::Profit,
                150,
                Some(dec!(40)),
                Answer::Amount(dec!(2700)),
            )
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["operation"], "profit");
        assert_eq!(value["quantity"], 150);
        assert_eq!(value["price"], "40");
        assert_eq!(value["value"], "2700");
    }

    #[test]
    fn test_write_answer_json_shares() {
        let out = render(|w| {
            write_answer(
                w,
                &json_settings(),
                Operation::RemainingShares,
                100,
                None,
                Answer::Shares(270),
            )
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["operation"], "remaining");
        assert_eq!(value["value"], 270);
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_write_summary_text() {
        let engine = CostAccountingEngine::new(StaticLotProvider::sample());
        let summary = engine.summarize(300, dec!(25)).unwrap();
        let out = render(|w| write_summary(w, &Settings::default(), &summary));

        assert!(out.contains("Sale:                  300 shares @ 25\n"), "{out}");
        assert!(out.contains("Remaining shares:      70\n"), "{out}");
        assert!(out.contains("Sold cost basis:       23.333 per share\n"), "{out}");
        assert!(out.contains("Remaining cost basis:  10 per share\n"), "{out}");
        assert!(out.contains("Profit:                500\n"), "{out}");
        assert!(out.contains("Sold lots:\n  #1: 100 @ 20 = 2000\n"), "{out}");
        assert!(out.contains("  #3: 50 @ 10 = 500\n"), "{out}");
        assert!(out.contains("Remaining lots:\n  #1: 0 @ 20 = 0\n"), "{out}");
    }

    #[test]
    fn test_write_summary_json() {
        let engine = CostAccountingEngine::new(StaticLotProvider::sample());
        let summary = engine.summarize(100, dec!(25)).unwrap();
        let out = render(|w| write_summary(w, &json_settings(), &summary));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["remaining_quantity"], 270);
        assert_eq!(value["sold"].as_array().unwrap().len(), 1);
        assert_eq!(value["remaining"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_write_lots() {
        let lots = vec![
            PurchaseLot::new(LotId(1), 120, dec!(20)),
            PurchaseLot::new(LotId(2), 70, dec!(30)),
        ];
        let out = render(|w| write_lots(w, &Settings::default(), &lots, 190));
        assert_eq!(out, "#1: 120 @ 20\n#2: 70 @ 30\nTotal: 190 shares\n");

        let out = render(|w| write_lots(w, &json_settings(), &lots, 190));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 190);
        assert_eq!(value["lots"][1]["id"], 2);
    }

    #[test]
    fn test_write_lots_near_quantity_limit() {
        let provider = StaticLotProvider::new(vec![
            PurchaseLot::new(LotId(1), u64::MAX - 1, dec!(0.0001)),
            PurchaseLot::new(LotId(2), 1, dec!(0.0001)),
        ])
        .unwrap();
        let out = render(|w| {
            write_lots(
                w,
                &Settings::default(),
                provider.lots(),
                provider.total_owned_quantity(),
            )
        });
        assert!(out.ends_with(&format!("Total: {} shares\n", u64::MAX)), "{out}");
    }

    #[test]
    fn test_fragment_cost_overflow() {
        let fragment = ShareFragment {
            lot_id: LotId(9),
            quantity: u64::MAX,
            unit_price: Decimal::MAX,
        };
        let out = render(|w| write_fragments(w, "Sold lots:", &[fragment], 3));
        assert!(out.ends_with(" = overflow\n"), "{out}");
    }
}
