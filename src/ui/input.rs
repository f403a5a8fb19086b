//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry, so config overrides
//! apply everywhere. The help overlay captures all keys while visible.

use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};
use instacats::presenter::ExternalOpener;

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input<O: ExternalOpener>(
    app: &mut App<O>,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    if app.show_help {
        handle_help_input(app, code, modifiers);
        return Action::Continue;
    }

    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global)
    else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::NavFirst => app.nav_first(),
        KbAction::NavLast => app.nav_last(),
        KbAction::PageDown => app.page_down(),
        KbAction::PageUp => app.page_up(),
        KbAction::OpenLink => {
            app.open_selected();
        }
        KbAction::ToggleDetails => app.toggle_details(),
        KbAction::CycleTheme => {
            app.cycle_theme();
        }
        KbAction::ShowHelp => app.open_help(),
        KbAction::CloseHelp => {}
    }
    Action::Continue
}

/// Handle input while the help overlay is visible.
///
/// Navigation keys scroll the table; the close keys dismiss it. Everything
/// else is swallowed.
fn handle_help_input<O: ExternalOpener>(app: &mut App<O>, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Help)
    {
        Some(KbAction::CloseHelp) => app.close_help(),
        Some(KbAction::NavDown) => app.help_scroll_down(),
        Some(KbAction::NavUp) => app.help_scroll_up(),
        _ => {}
    }
}
