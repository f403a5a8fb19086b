use crate::keybindings::{Context, KeybindingRegistry};
use crate::theme::{StyleMap, ThemeVariant};
use instacats::config::Config;
use instacats::presenter::{DataProvider, ExternalOpener, ListPresenter, Selection, SystemOpener};
use instacats::records::Record;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashSet;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

/// Rows moved by page up/down before the first render reports the real height.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Application state for the terminal front end.
///
/// The presenter owns the records; the app only tracks which row is
/// selected and what is drawn around the list.
pub struct App<O: ExternalOpener = SystemOpener> {
    pub presenter: ListPresenter<O>,
    pub selected: usize,
    pub show_details: bool,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    /// Help table rows that fit on screen, updated on every render
    pub help_page_size: usize,
    /// Transient message and the time it was set
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Why the list is empty, shown until the app exits
    pub load_notice: Option<String>,
    pub needs_redraw: bool,
    /// Visible list rows, updated on every render
    pub page_size: usize,
    pub theme_variant: ThemeVariant,
    styles: StyleMap,
    pub keybindings: KeybindingRegistry,
}

impl<O: ExternalOpener> App<O> {
    /// Build the app around an already-loaded presenter.
    pub fn new(presenter: ListPresenter<O>, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{}", warning);
        }

        let mut app = Self {
            presenter,
            selected: 0,
            show_details: true,
            show_help: false,
            help_scroll_offset: 0,
            help_page_size: 0,
            status_message: None,
            load_notice: None,
            needs_redraw: true,
            page_size: DEFAULT_PAGE_SIZE,
            theme_variant,
            styles: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
        };
        app.announce_load();
        app
    }

    fn announce_load(&mut self) {
        let skipped = self.presenter.skipped().len();
        let failure = self.presenter.failure().map(ToString::to_string);

        match (failure, self.presenter.count()) {
            (Some(reason), _) => {
                self.load_notice = Some(format!("Could not load cats: {}", reason));
            }
            (None, 0) if skipped > 0 => {
                self.load_notice = Some(format!(
                    "No valid cats ({} invalid entries skipped)",
                    skipped
                ));
            }
            (None, 0) => {}
            (None, count) if skipped > 0 => {
                self.set_status(format!(
                    "Loaded {} cats ({} invalid entries skipped)",
                    count, skipped
                ));
            }
            (None, count) => self.set_status(format!("Loaded {} cats", count)),
        }
    }

    pub fn style(&self, role: &str) -> Style {
        self.styles.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.styles = StyleMap::from_palette(&variant.palette());
    }

    /// Switch to the next theme and return its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        self.set_theme(self.theme_variant.next());
        let name = self.theme_variant.name();
        self.set_status(format!("Theme: {}", name));
        name
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.presenter.row(self.selected)
    }

    fn last_index(&self) -> Option<usize> {
        self.presenter.row_count().checked_sub(1)
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn nav_down(&mut self) {
        if let Some(last) = self.last_index() {
            self.selected = self.selected.saturating_add(1).min(last);
        }
    }

    pub fn nav_first(&mut self) {
        self.selected = 0;
    }

    pub fn nav_last(&mut self) {
        self.selected = self.last_index().unwrap_or(0);
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size.max(1));
    }

    pub fn page_down(&mut self) {
        if let Some(last) = self.last_index() {
            self.selected = self.selected.saturating_add(self.page_size.max(1)).min(last);
        }
    }

    /// Forward the selected row to the presenter.
    ///
    /// Only a successful open is reported; invalid links are dropped quietly.
    pub fn open_selected(&mut self) -> Selection {
        let selection = self.presenter.select(self.selected);
        if let Selection::Opened(_) = selection {
            if let Some(record) = self.selected_record() {
                let msg = format!("Opening {}...", record.name);
                self.set_status(msg);
            }
        }
        selection
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll_offset = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// Rows in the help table: one heading per context, its bindings, and
    /// a blank line between groups.
    pub fn help_row_count(&self) -> usize {
        let bindings = self.keybindings.all_bindings();
        let groups: HashSet<Context> = bindings.iter().map(|(ctx, ..)| *ctx).collect();
        (bindings.len() + 2 * groups.len()).saturating_sub(1)
    }

    pub fn help_max_scroll(&self) -> usize {
        self.help_row_count().saturating_sub(self.help_page_size)
    }

    pub fn help_scroll_down(&mut self) {
        self.help_scroll_offset = (self.help_scroll_offset + 1).min(self.help_max_scroll());
    }

    pub fn help_scroll_up(&mut self) {
        self.help_scroll_offset = self.help_scroll_offset.saturating_sub(1);
    }

    /// Set status message (expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
