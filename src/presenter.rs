//! List presenter: the adapter between loaded records and a display surface.
//!
//! The presenter owns the record list for one screen lifetime. The display
//! surface asks it for [`DataProvider::row_count`] / [`DataProvider::row`] on
//! demand and reports row selections via [`ListPresenter::select`], which
//! forwards a validated URL to an [`ExternalOpener`].
//!
//! Nothing here depends on a UI toolkit; the terminal front end and the tests
//! plug in their own capabilities.

use url::Url;

use crate::records::{load_records, LoadError, LoadOutcome, Record, SkippedEntry};
use crate::resources::ResourceBundle;
use crate::util::validate_link;

// ============================================================================
// Capabilities
// ============================================================================

/// Produces the outcome of a record load.
pub trait RecordSource {
    fn load(&self) -> LoadOutcome;
}

/// Any closure returning a [`LoadOutcome`] is a record source.
impl<F> RecordSource for F
where
    F: Fn() -> LoadOutcome,
{
    fn load(&self) -> LoadOutcome {
        self()
    }
}

/// Row data consumed by a display surface.
pub trait DataProvider {
    fn row_count(&self) -> usize;
    fn row(&self, index: usize) -> Option<&Record>;
}

/// "Open this URL" request with no result or completion callback.
pub trait ExternalOpener {
    fn open_external(&mut self, url: &Url);
}

/// Opens URLs with the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open_external(&mut self, url: &Url) {
        match open::that(url.as_str()) {
            Ok(()) => tracing::info!(url = %url, "Opened link"),
            Err(e) => tracing::warn!(url = %url, error = %e, "Failed to open link"),
        }
    }
}

/// Loads records from a file in a [`ResourceBundle`].
#[derive(Debug, Clone)]
pub struct BundledRecords<'a> {
    bundle: &'a ResourceBundle,
    file_name: String,
    records_key: String,
}

impl<'a> BundledRecords<'a> {
    pub fn new(
        bundle: &'a ResourceBundle,
        file_name: impl Into<String>,
        records_key: impl Into<String>,
    ) -> Self {
        Self {
            bundle,
            file_name: file_name.into(),
            records_key: records_key.into(),
        }
    }
}

impl RecordSource for BundledRecords<'_> {
    fn load(&self) -> LoadOutcome {
        load_records(self.bundle, &self.file_name, &self.records_key)
    }
}

// ============================================================================
// State
// ============================================================================

/// Presenter lifecycle.
///
/// `Unloaded → Loading → Loaded | Empty | Failed`. `Empty` and `Failed` look
/// the same to the display surface (zero rows); `Failed` keeps the reason.
#[derive(Debug)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded(Vec<Record>),
    Empty,
    Failed(LoadError),
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Empty => "empty",
            Self::Failed(_) => "failed",
        }
    }
}

/// Result of a row selection, for callers that want feedback.
///
/// The external behavior matches a fire-and-forget selection: only
/// `Opened` reaches the opener, everything else is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Opened(Url),
    InvalidLink,
    OutOfRange,
}

// ============================================================================
// Presenter
// ============================================================================

pub struct ListPresenter<O: ExternalOpener> {
    state: LoadState,
    skipped: Vec<SkippedEntry>,
    opener: O,
}

impl<O: ExternalOpener> ListPresenter<O> {
    pub fn new(opener: O) -> Self {
        Self {
            state: LoadState::Unloaded,
            skipped: Vec::new(),
            opener,
        }
    }

    /// Load records from `source`, once.
    ///
    /// Later calls leave the presenter untouched; the list is fixed for the
    /// presenter's lifetime.
    pub fn load(&mut self, source: &impl RecordSource) {
        if !matches!(self.state, LoadState::Unloaded) {
            tracing::debug!(state = self.state.name(), "Records already loaded, ignoring load");
            return;
        }

        self.state = LoadState::Loading;
        let outcome = source.load();

        self.state = match outcome {
            LoadOutcome::Loaded { records, skipped } => {
                self.skipped = skipped;
                LoadState::Loaded(records)
            }
            LoadOutcome::Empty { skipped } => {
                self.skipped = skipped;
                LoadState::Empty
            }
            LoadOutcome::Failed(e) => LoadState::Failed(e),
        };
        tracing::debug!(state = self.state.name(), count = self.count(), "Presenter loaded");
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Entries dropped by the loader, for diagnostics.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// The load failure, if any.
    pub fn failure(&self) -> Option<&LoadError> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn records(&self) -> &[Record] {
        match &self.state {
            LoadState::Loaded(records) => records,
            _ => &[],
        }
    }

    /// Number of rows; 0 until a load produces records.
    pub fn count(&self) -> usize {
        self.records().len()
    }

    /// Record for row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`. Use [`ListPresenter::get`] when the
    /// index is not known to be in range.
    pub fn record_at(&self, index: usize) -> &Record {
        &self.records()[index]
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records().get(index)
    }

    /// Handle a selection of row `index`.
    ///
    /// A valid link is forwarded to the opener. An invalid link or an
    /// out-of-range row is dropped without raising an error.
    pub fn select(&mut self, index: usize) -> Selection {
        let Some(record) = self.records().get(index) else {
            tracing::debug!(index, count = self.count(), "Selection out of range");
            return Selection::OutOfRange;
        };

        match validate_link(&record.external_link) {
            Ok(url) => {
                self.opener.open_external(&url);
                Selection::Opened(url)
            }
            Err(e) => {
                tracing::warn!(
                    index,
                    name = %record.name,
                    link = %record.external_link,
                    error = %e,
                    "Not opening invalid link"
                );
                Selection::InvalidLink
            }
        }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }
}

impl<O: ExternalOpener> DataProvider for ListPresenter<O> {
    fn row_count(&self) -> usize {
        self.count()
    }

    fn row(&self, index: usize) -> Option<&Record> {
        self.get(index)
    }
}
