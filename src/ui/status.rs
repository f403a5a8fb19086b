use crate::app::App;
use instacats::presenter::ExternalOpener;
use instacats::util::truncate_to_width;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

const KEY_HINTS: &str = "[j/k]move [Enter]open [d]etails [t]heme [?]help [q]uit";

/// Render the status bar.
///
/// A transient message wins over the load notice, which wins over the key
/// hints.
pub fn render<O: ExternalOpener>(f: &mut Frame, app: &App<O>, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let (text, style): (&str, _) = if let Some((msg, _)) = &app.status_message {
        (&**msg, app.style("status_bar"))
    } else if let Some(notice) = &app.load_notice {
        (notice.as_str(), app.style("status_error"))
    } else {
        (KEY_HINTS, app.style("status_bar"))
    };

    let text = truncate_to_width(text, area.width as usize).into_owned();
    f.render_widget(Paragraph::new(text).style(style), area);
}
