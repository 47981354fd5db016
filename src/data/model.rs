use indexmap::IndexSet;

// ---------------------------------------------------------------------------
// PriceRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single price observation (one row of the source CSV).
///
/// `symbol` and `date` keep whatever text the source carried; an empty or
/// whitespace-only value means the field was absent in that row. `price` is
/// `f64::NAN` when the source value could not be coerced to a number.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub symbol: String,
    pub date: String,
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Field – the three filterable columns
// ---------------------------------------------------------------------------

/// A filterable field of [`PriceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Symbol,
    Date,
    Price,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Symbol, Field::Date, Field::Price];

    /// The source column name, also used as the UI label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Symbol => "Stock",
            Field::Date => "Date",
            Field::Price => "Price",
        }
    }
}

/// Canonical printed form of a price, used for the price option list and for
/// filter comparison (`150.0` prints as `150`). Non-finite prices have no
/// canonical form: they never match a filter and never become an option.
pub fn price_key(price: f64) -> Option<String> {
    price.is_finite().then(|| price.to_string())
}

// ---------------------------------------------------------------------------
// StockDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed filter option lists.
///
/// Immutable once constructed; filtering only ever derives index sequences
/// from it. Option lists are taken from the *full* record set in first-seen
/// order and are only rebuilt on a reload.
#[derive(Debug, Clone)]
pub struct StockDataset {
    /// All records (rows), in source order.
    pub records: Vec<PriceRecord>,
    /// Distinct non-empty symbols, first-seen order.
    pub symbols: Vec<String>,
    /// Distinct non-empty dates, first-seen order.
    pub dates: Vec<String>,
    /// Distinct printed prices, first-seen order.
    pub prices: Vec<String>,
    /// Rows whose price had no usable numeric value.
    pub price_warnings: usize,
}

impl StockDataset {
    /// Build the option indices from the loaded records.
    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        let mut symbols: IndexSet<String> = IndexSet::new();
        let mut dates: IndexSet<String> = IndexSet::new();
        let mut prices: IndexSet<String> = IndexSet::new();
        let mut price_warnings = 0;

        for rec in &records {
            let symbol = rec.symbol.trim();
            if !symbol.is_empty() {
                symbols.insert(symbol.to_string());
            }
            let date = rec.date.trim();
            if !date.is_empty() {
                dates.insert(date.to_string());
            }
            match price_key(rec.price) {
                Some(key) => {
                    prices.insert(key);
                }
                None => price_warnings += 1,
            }
        }

        StockDataset {
            records,
            symbols: symbols.into_iter().collect(),
            dates: dates.into_iter().collect(),
            prices: prices.into_iter().collect(),
            price_warnings,
        }
    }

    /// The option list for a field.
    pub fn options(&self, field: Field) -> &[String] {
        match field {
            Field::Symbol => &self.symbols,
            Field::Date => &self.dates,
            Field::Price => &self.prices,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(symbol: &str, date: &str, price: f64) -> PriceRecord {
        PriceRecord {
            symbol: symbol.to_string(),
            date: date.to_string(),
            price,
        }
    }

    fn strs(values: &[String]) -> Vec<&str> {
        values.iter().map(String::as_str).collect()
    }

    #[test]
    fn options_are_distinct_and_first_seen_ordered() {
        let ds = StockDataset::from_records(vec![
            rec("GOOG", "2024-01-02", 140.0),
            rec("AAPL", "2024-01-02", 150.0),
            rec("GOOG", "2024-01-03", 141.5),
        ]);
        assert_eq!(strs(ds.options(Field::Symbol)), ["GOOG", "AAPL"]);
        assert_eq!(strs(ds.options(Field::Date)), ["2024-01-02", "2024-01-03"]);
        assert_eq!(strs(ds.options(Field::Price)), ["140", "150", "141.5"]);
    }

    #[test]
    fn option_values_all_occur_in_records_exactly_once() {
        let ds = StockDataset::from_records(vec![
            rec("AAPL", "2024-01-01", 150.0),
            rec("AAPL", "2024-01-02", 150.0),
            rec("GOOG", "2024-01-01", 140.0),
        ]);
        for field in Field::ALL {
            let options = ds.options(field);
            for value in options {
                assert_eq!(
                    options.iter().filter(|v| *v == value).count(),
                    1,
                    "duplicate option {value:?} for {field:?}"
                );
                let occurs = ds.records.iter().any(|r| match field {
                    Field::Symbol => r.symbol.trim() == value,
                    Field::Date => r.date.trim() == value,
                    Field::Price => price_key(r.price).as_deref() == Some(value.as_str()),
                });
                assert!(occurs, "option {value:?} not backed by any record");
            }
        }
    }

    #[test]
    fn whitespace_only_values_are_excluded_from_options() {
        let ds = StockDataset::from_records(vec![
            rec("  ", "2024-01-01", 150.0),
            rec("AAPL", "   ", f64::NAN),
        ]);
        assert_eq!(strs(ds.options(Field::Symbol)), ["AAPL"]);
        assert_eq!(strs(ds.options(Field::Date)), ["2024-01-01"]);
        assert_eq!(strs(ds.options(Field::Price)), ["150"]);
        assert_eq!(ds.price_warnings, 1);
    }

    #[test]
    fn option_values_are_trimmed() {
        let ds = StockDataset::from_records(vec![rec(" AAPL ", " 2024-01-01 ", 150.0)]);
        assert_eq!(strs(ds.options(Field::Symbol)), ["AAPL"]);
        assert_eq!(strs(ds.options(Field::Date)), ["2024-01-01"]);
    }

    #[test]
    fn price_key_is_the_printed_value() {
        assert_eq!(price_key(150.0).as_deref(), Some("150"));
        assert_eq!(price_key(140.25).as_deref(), Some("140.25"));
        assert_eq!(price_key(0.0).as_deref(), Some("0"));
        assert_eq!(price_key(f64::NAN), None);
        assert_eq!(price_key(f64::INFINITY), None);
    }
}
