use super::model::{price_key, Field, PriceRecord, StockDataset};

// ---------------------------------------------------------------------------
// Filter predicate: at most one selected value per field
// ---------------------------------------------------------------------------

/// Current user-chosen constraints, one optional value per filterable field.
/// `None` means "no constraint on this field"; a record matches when every
/// set field compares equal (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub symbol: Option<String>,
    pub date: Option<String>,
    pub price: Option<String>,
}

impl FilterSelection {
    /// The active constraint for a field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Symbol => self.symbol.as_deref(),
            Field::Date => self.date.as_deref(),
            Field::Price => self.price.as_deref(),
        }
    }

    /// Set or clear one field's constraint.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        match field {
            Field::Symbol => self.symbol = value,
            Field::Date => self.date = value,
            Field::Price => self.price = value,
        }
    }

    /// Whether no field has a constraint.
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.date.is_none() && self.price.is_none()
    }

    /// Whether a record passes every active constraint.
    ///
    /// String fields compare trimmed-exact, so a record whose field is empty
    /// never matches a non-empty constraint. The price constraint compares
    /// against the record's canonical printed price, so a NaN price never
    /// matches any price filter.
    pub fn matches(&self, record: &PriceRecord) -> bool {
        if let Some(symbol) = &self.symbol {
            if record.symbol.trim() != symbol {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if record.date.trim() != date {
                return false;
            }
        }
        if let Some(price) = &self.price {
            if price_key(record.price).as_deref() != Some(price.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Return indices of records that pass all active filters, preserving the
/// dataset's original order.
pub fn filtered_indices(dataset: &StockDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
