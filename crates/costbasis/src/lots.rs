//! Loading purchase lots from CSV and JSON files.
//!
//! A CSV lot file has a header row naming at least `id`, `quantity` and
//! `price`, plus an optional `acquired` column holding `YYYY-MM-DD` dates:
//!
//! ```text
//! id,quantity,price,acquired
//! 1,100,20,2024-01-01
//! 2,150,30,2024-02-01
//! ```
//!
//! A JSON lot file is an array of lot objects. In both formats the order of
//! the rows is the FIFO order.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use costbasis_core::{LotId, PurchaseLot, StaticLotProvider};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Supported lot file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotFileFormat {
    /// Comma separated values with a header row.
    Csv,
    /// A JSON array of lots.
    Json,
}

impl LotFileFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load the lots from `path`, or the sample holdings when no file is given.
pub fn load_provider(path: Option<&Path>) -> Result<StaticLotProvider> {
    match path {
        Some(path) => load_file(path),
        None => {
            tracing::debug!("no lot file given, using sample holdings");
            Ok(StaticLotProvider::sample())
        }
    }
}

/// Load and validate a lot file.
pub fn load_file(path: &Path) -> Result<StaticLotProvider> {
    let Some(format) = LotFileFormat::from_path(path) else {
        bail!(
            "unsupported lot file {}: expected a .csv or .json extension",
            path.display()
        );
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read lot file {}", path.display()))?;

    let provider = load_str(&content, format)
        .with_context(|| format!("failed to load lots from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        lots = provider.len(),
        "loaded lot file"
    );
    Ok(provider)
}

/// Parse and validate lot file content.
pub fn load_str(content: &str, format: LotFileFormat) -> Result<StaticLotProvider> {
    let lots = match format {
        LotFileFormat::Csv => parse_csv(content)?,
        LotFileFormat::Json => parse_json(content)?,
    };
    Ok(StaticLotProvider::new(lots)?)
}

/// Parse lots from CSV content, keeping row order.
pub fn parse_csv(content: &str) -> Result<Vec<PurchaseLot>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let header_map: HashMap<String, usize> = reader
        .headers()
        .context("failed to read CSV header")?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_ascii_lowercase(), i))
        .collect();

    let column = |name: &str| {
        header_map
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("missing '{name}' column in CSV header"))
    };
    let id_col = column("id")?;
    let quantity_col = column("quantity")?;
    let price_col = column("price")?;
    let acquired_col = header_map.get("acquired").copied();

    let mut lots = Vec::new();
    for (row_num, result) in (1..).zip(reader.records()) {
        let record = result.with_context(|| format!("row {row_num}: malformed CSV record"))?;
        let field = |col: usize| record.get(col).unwrap_or("");

        let lot = parse_row(
            field(id_col),
            field(quantity_col),
            field(price_col),
            acquired_col.map(field),
        )
        .with_context(|| format!("row {row_num}"))?;
        lots.push(lot);
    }
    Ok(lots)
}

fn parse_row(
    id: &str,
    quantity: &str,
    price: &str,
    acquired: Option<&str>,
) -> Result<PurchaseLot> {
    let id: u32 = id.parse().with_context(|| format!("invalid lot id '{id}'"))?;
    let quantity: u64 = quantity
        .parse()
        .with_context(|| format!("invalid quantity '{quantity}'"))?;
    let price =
        Decimal::from_str(price).with_context(|| format!("invalid price '{price}'"))?;

    let lot = PurchaseLot::new(LotId(id), quantity, price);
    match acquired {
        Some(date) if !date.is_empty() => {
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
                .with_context(|| format!("invalid acquired date '{date}', expected YYYY-MM-DD"))?;
            Ok(lot.with_acquired(date))
        }
        _ => Ok(lot),
    }
}

/// Parse lots from a JSON array.
pub fn parse_json(content: &str) -> Result<Vec<PurchaseLot>> {
    serde_json::from_str(content).context("invalid JSON lot list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use costbasis_core::LotProvider;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            LotFileFormat::from_path(Path::new("lots.CSV")),
            Some(LotFileFormat::Csv)
        );
        assert_eq!(
            LotFileFormat::from_path(Path::new("a/b/lots.json")),
            Some(LotFileFormat::Json)
        );
        assert_eq!(LotFileFormat::from_path(Path::new("lots.txt")), None);
        assert_eq!(LotFileFormat::from_path(Path::new("lots")), None);
    }

    #[test]
    fn test_parse_csv() {
        let lots = parse_csv(
            "id,quantity,price,acquired\n\
             1,120,20,2024-01-01\n\
             2, 70 ,30.5,\n",
        )
        .unwrap();

        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].id, LotId(1));
        assert_eq!(lots[0].quantity, 120);
        assert_eq!(lots[0].acquired, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(lots[1].unit_price, dec!(30.5));
        assert_eq!(lots[1].acquired, None);
    }

    #[test]
    fn test_parse_csv_any_column_order() {
        let lots = parse_csv("Price,ID,Quantity\n20,7,5\n").unwrap();
        assert_eq!(lots, vec![PurchaseLot::new(LotId(7), 5, dec!(20))]);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let err = parse_csv("id,quantity\n1,10\n").unwrap_err();
        assert!(err.to_string().contains("'price'"));
    }

    #[test]
    fn test_parse_csv_reports_row() {
        let err = parse_csv("id,quantity,price\n1,10,20\n2,-3,20\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("row 2"), "{msg}");
        assert!(msg.contains("invalid quantity '-3'"), "{msg}");
    }

    #[test]
    fn test_parse_csv_bad_date() {
        let err = parse_csv("id,quantity,price,acquired\n1,10,20,01/02/2024\n").unwrap_err();
        assert!(format!("{err:#}").contains("expected YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_json() {
        let lots = parse_json(
            r#"[
                {"id": 1, "quantity": 120, "unit_price": "20"},
                {"id": 2, "quantity": 70, "price": 30, "acquired": "2024-02-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(lots[0], PurchaseLot::new(LotId(1), 120, dec!(20)));
        assert_eq!(lots[1].unit_price, dec!(30));
        assert_eq!(lots[1].acquired, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_load_str_validates() {
        let err = load_str("id,quantity,price\n1,0,20\n", LotFileFormat::Csv).unwrap_err();
        assert!(err.to_string().contains("#1"), "{err}");

        let err = load_str(
            r#"[{"id": 1, "quantity": 1, "price": 2}, {"id": 1, "quantity": 1, "price": 2}]"#,
            LotFileFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn test_load_str_rejects_quantity_overflow() {
        let err = load_str(
            "id,quantity,price\n1,18446744073709551615,1\n2,2,1\n",
            LotFileFormat::Csv,
        )
        .unwrap_err();
        assert!(err.to_string().contains("overflows at lot #2"), "{err}");
    }

    #[test]
    fn test_load_csv_file() {
        let file = write_temp(".csv", "id,quantity,price\n1,120,20\n2,70,30\n");
        let provider = load_provider(Some(file.path())).unwrap();
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.total_owned_quantity(), 190);
    }

    #[test]
    fn test_load_json_file() {
        let file = write_temp(".json", r#"[{"id": 3, "quantity": 5, "price": "1.25"}]"#);
        let provider = load_file(file.path()).unwrap();
        assert_eq!(provider.lots()[0].total_cost(), Some(dec!(6.25)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(&PathBuf::from("/nonexistent/lots.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to read lot file"));
    }

    #[test]
    fn test_load_unknown_extension() {
        let file = write_temp(".txt", "id,quantity,price\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported lot file"));
    }

    #[test]
    fn test_no_file_uses_sample() {
        let provider = load_provider(None).unwrap();
        assert_eq!(provider, StaticLotProvider::sample());
    }
}
