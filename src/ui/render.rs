//! Render functions for the TUI.
//!
//! Lays out the cat list, the optional details pane and the status bar,
//! then draws the help overlay on top when it is open.

use crate::app::App;
use instacats::presenter::ExternalOpener;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{cats, details, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 8;

/// Main render function.
pub(super) fn render<O: ExternalOpener>(f: &mut Frame, app: &mut App<O>) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_main_panels(f, app, chunks[0]);
    status::render(f, app, chunks[1]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Render the cat list, with the details pane to its right when enabled.
fn render_main_panels<O: ExternalOpener>(f: &mut Frame, app: &mut App<O>, area: Rect) {
    if !app.show_details {
        cats::render(f, app, area);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    cats::render(f, app, main_chunks[0]);
    details::render(f, app, main_chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use instacats::config::Config;
    use instacats::presenter::ListPresenter;
    use instacats::records::{LoadError, LoadOutcome, Record};
    use ratatui::{backend::TestBackend, Terminal};
    use url::Url;

    struct NoopOpener;

    impl ExternalOpener for NoopOpener {
        fn open_external(&mut self, _url: &Url) {}
    }

    fn app_with(outcome: LoadOutcome) -> App<NoopOpener> {
        let mut presenter = ListPresenter::new(NoopOpener);
        let outcome = std::cell::RefCell::new(Some(outcome));
        presenter.load(&|| {
            outcome
                .borrow_mut()
                .take()
                .unwrap_or(LoadOutcome::Empty { skipped: vec![] })
        });
        App::new(presenter, &Config::default())
    }

    fn felix_and_tom() -> LoadOutcome {
        LoadOutcome::Loaded {
            records: vec![
                Record::new("Felix", 1, "https://instagram.com/felix", None),
                Record::new("Tom", 2, "https://instagram.com/tom", Some("Chases mice".into())),
            ],
            skipped: vec![],
        }
    }

    fn draw(app: &mut App<NoopOpener>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_list_and_details() {
        let mut app = app_with(felix_and_tom());
        let screen = draw(&mut app, 80, 20);

        assert!(screen.contains("Cats (2)"));
        assert!(screen.contains("Felix"));
        assert!(screen.contains("Tom"));
        assert!(screen.contains("Hi I'm Felix"));
        assert!(screen.contains("https://instagram.com/felix"));
    }

    #[test]
    fn test_details_follow_selection() {
        let mut app = app_with(felix_and_tom());
        app.nav_down();
        let screen = draw(&mut app, 80, 20);
        assert!(screen.contains("Chases mice"));
    }

    #[test]
    fn test_details_hidden() {
        let mut app = app_with(felix_and_tom());
        app.toggle_details();
        let screen = draw(&mut app, 80, 20);
        assert!(!screen.contains("Details"));
        assert!(screen.contains("Felix"));
    }

    #[test]
    fn test_empty_list() {
        let mut app = app_with(LoadOutcome::Empty { skipped: vec![] });
        let screen = draw(&mut app, 80, 20);
        assert!(screen.contains("Cats (0)"));
        assert!(screen.contains("No cats loaded"));
    }

    #[test]
    fn test_failed_load_shows_reason() {
        let mut app = app_with(LoadOutcome::Failed(LoadError::NotFound(
            "InstaCats.json".into(),
        )));
        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("No cats loaded"));
        assert!(screen.contains("Could not load cats"));
    }

    #[test]
    fn test_status_priority() {
        let mut app = app_with(LoadOutcome::Failed(LoadError::NotFound(
            "InstaCats.json".into(),
        )));
        app.set_status("Theme: Light");
        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("Theme: Light"));
        assert!(!screen.contains("Could not load cats"));

        app.status_message = None;
        app.load_notice = None;
        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("[?]help"));
    }

    #[test]
    fn test_help_scroll_clamped_on_render() {
        let mut app = app_with(felix_and_tom());
        app.open_help();
        app.help_scroll_offset = 500;
        draw(&mut app, 80, 20);
        assert_eq!(app.help_scroll_offset, app.help_max_scroll());
        assert!(app.help_scroll_offset < app.help_row_count());
    }

    #[test]
    fn test_render_updates_page_size() {
        let mut app = app_with(felix_and_tom());
        draw(&mut app, 80, 20);
        // 20 rows - status bar - list borders
        assert_eq!(app.page_size, 17);
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app_with(felix_and_tom());
        app.open_help();
        let screen = draw(&mut app, 80, 30);
        assert!(screen.contains("Help"));
        assert!(screen.contains("Open cat's link in browser"));
    }

    #[test]
    fn test_too_small_terminal() {
        let mut app = app_with(felix_and_tom());
        let screen = draw(&mut app, 30, 6);
        assert!(screen.contains("Terminal too small"));

        let screen = draw(&mut app, 10, 2);
        assert!(screen.contains("Too small"));
    }
}
