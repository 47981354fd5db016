use std::sync::mpsc::{self, Receiver, TryRecvError};

use eframe::egui;

use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader::{self, DataSource, LoadError};
use crate::data::model::{Field, StockDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Owns the one canonical dataset for the session. The dataset is installed
/// through a single load-completed transition and never mutated afterwards;
/// filtering only derives index sequences from it.
pub struct AppState {
    /// Loaded dataset (None until a load completes; stays None on failure).
    pub dataset: Option<StockDataset>,

    /// Current per-field filter selections.
    pub selection: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Stable symbol → colour assignment from the full dataset.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// URL entry buffer for the top bar.
    pub url_input: String,

    /// Whether a load is in flight.
    pub loading: bool,

    /// Receiver for the in-flight load result.
    load_rx: Option<Receiver<Result<StockDataset, LoadError>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            color_map: None,
            status_message: None,
            url_input: String::new(),
            loading: false,
            load_rx: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the selection, show everything,
    /// rebuild the colour map.
    pub fn set_dataset(&mut self, dataset: StockDataset) {
        self.selection = FilterSelection::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.color_map = Some(ColorMap::new(dataset.options(Field::Symbol)));
        self.status_message = (dataset.price_warnings > 0).then(|| {
            format!(
                "{} row(s) have a non-numeric price",
                dataset.price_warnings
            )
        });
        self.dataset = Some(dataset);
        self.loading = false;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
        }
    }

    /// Apply one filter transition and refilter immediately.
    ///
    /// Ignored while a load is in flight, so the pipeline never observes a
    /// partial dataset.
    pub fn set_filter(&mut self, field: Field, value: Option<String>) {
        if self.loading {
            return;
        }
        self.selection.set(field, value);
        self.refilter();
    }

    /// Clear every filter back to "no constraint".
    pub fn clear_filters(&mut self) {
        if self.loading {
            return;
        }
        self.selection = FilterSelection::default();
        self.refilter();
    }

    /// Kick off a background load. At most one load runs at a time.
    pub fn begin_load(&mut self, source: DataSource, ctx: egui::Context) {
        if self.loading {
            return;
        }
        log::info!("loading {source}");

        let (tx, rx) = mpsc::channel();
        self.loading = true;
        self.load_rx = Some(rx);
        self.status_message = None;

        std::thread::spawn(move || {
            let result = loader::load(&source);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Collect a finished load, if any. Called once per frame.
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                log::info!(
                    "loaded {} rows ({} symbols, {} dates)",
                    dataset.len(),
                    dataset.options(Field::Symbol).len(),
                    dataset.options(Field::Date).len()
                );
                self.load_rx = None;
                self.set_dataset(dataset);
            }
            Ok(Err(e)) => {
                log::error!("load failed: {e}");
                self.load_rx = None;
                self.loading = false;
                self.status_message = Some(format!("Error: {e}"));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.load_rx = None;
                self.loading = false;
                self.status_message = Some("Error: loader thread exited".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_str;

    const SAMPLE: &str = "\
Stock,Date,Price
AAPL,2024-01-01,150
GOOG,2024-01-01,140
AAPL,2024-01-02,152.5
";

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(parse_str(SAMPLE).unwrap());
        state
    }

    #[test]
    fn set_dataset_resets_selection_and_shows_everything() {
        let mut state = AppState::default();
        state.selection.set(Field::Symbol, Some("AAPL".to_string()));
        state.set_dataset(parse_str(SAMPLE).unwrap());
        assert!(state.selection.is_empty());
        assert_eq!(state.visible_indices, [0, 1, 2]);
        assert!(state.color_map.is_some());
        assert!(!state.loading);
    }

    #[test]
    fn filter_transitions_refilter_immediately() {
        let mut state = loaded_state();
        state.set_filter(Field::Symbol, Some("AAPL".to_string()));
        assert_eq!(state.visible_indices, [0, 2]);
        state.set_filter(Field::Date, Some("2024-01-02".to_string()));
        assert_eq!(state.visible_indices, [2]);
        state.clear_filters();
        assert_eq!(state.visible_indices, [0, 1, 2]);
    }

    #[test]
    fn filter_events_are_ignored_while_loading() {
        let mut state = loaded_state();
        state.loading = true;
        state.set_filter(Field::Symbol, Some("AAPL".to_string()));
        assert!(state.selection.is_empty());
        assert_eq!(state.visible_indices, [0, 1, 2]);
    }

    #[test]
    fn refilter_without_a_dataset_is_a_noop() {
        let mut state = AppState::default();
        state.selection.set(Field::Symbol, Some("AAPL".to_string()));
        state.refilter();
        assert!(state.dataset.is_none());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn failed_load_leaves_the_dataset_empty() {
        let mut state = AppState::default();
        state.begin_load(
            DataSource::Path("/definitely/not/a/real/file.csv".into()),
            egui::Context::default(),
        );
        assert!(state.loading);

        for _ in 0..500 {
            state.poll_load();
            if !state.loading {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert!(!state.loading);
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }
}
