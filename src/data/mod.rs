/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  URL / .csv file / raw text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → StockDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ StockDataset │  Vec<PriceRecord>, filter options
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply selection → filtered indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
