use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use super::model::{PriceRecord, StockDataset};

/// Column names the source CSV must carry (case-sensitive).
const REQUIRED_COLUMNS: [&str; 3] = ["Stock", "Date", "Price"];

// ---------------------------------------------------------------------------
// Sources and errors
// ---------------------------------------------------------------------------

/// Where the CSV comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Remote resource fetched over HTTP(S).
    Url(String),
    /// Local file.
    Path(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Transport-level load failure. Aborts the load; nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Structural CSV failure reported by the parser.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Fetch and parse a dataset. Blocking; the app runs this off the UI thread.
pub fn load(source: &DataSource) -> Result<StockDataset, LoadError> {
    match source {
        DataSource::Url(url) => load_url(url),
        DataSource::Path(path) => {
            let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(parse_reader(file)?)
        }
    }
}

/// Parse CSV text already in memory.
pub fn parse_str(text: &str) -> Result<StockDataset, ParseError> {
    parse_reader(text.as_bytes())
}

fn load_url(url: &str) -> Result<StockDataset, LoadError> {
    let response = reqwest::blocking::get(url).map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }
    let text = response.text().map_err(|source| LoadError::Request {
        url: url.to_string(),
        source,
    })?;
    Ok(parse_str(&text)?)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// A row as it appears in the CSV. Absent or empty fields deserialize to
/// `None`; columns beyond the three known ones are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Stock", default)]
    stock: Option<String>,
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "Price", default)]
    price: Option<String>,
}

/// Parse the CSV: header row required, one [`PriceRecord`] per data row.
///
/// A row whose price does not parse as a number is kept with a NaN price and
/// logged, not dropped. Rows with missing fields are kept with empty fields.
fn parse_reader<R: Read>(input: R) -> Result<StockDataset, ParseError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(ParseError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result?;

        let raw_price = row.price.unwrap_or_default();
        let price = match raw_price.trim() {
            "" => f64::NAN,
            trimmed => trimmed.parse::<f64>().unwrap_or_else(|_| {
                // Header is line 1; the first data row is line 2.
                log::warn!(
                    "line {}: price '{trimmed}' is not numeric, keeping row with NaN",
                    row_no + 2
                );
                f64::NAN
            }),
        };

        records.push(PriceRecord {
            symbol: row.stock.unwrap_or_default(),
            date: row.date.unwrap_or_default(),
            price,
        });
    }

    Ok(StockDataset::from_records(records))
}
