use crate::app::App;
use instacats::presenter::{DataProvider, ExternalOpener};
use instacats::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the cat list panel.
///
/// Also records how many rows fit, so page up/down move by a screenful.
pub fn render<O: ExternalOpener>(f: &mut Frame, app: &mut App<O>, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;
    if inner_height > 0 {
        app.page_size = inner_height;
    }

    let count = app.presenter.row_count();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(format!("Cats ({})", count));

    if count == 0 {
        let list = List::new(vec![ListItem::new("No cats loaded").style(app.style("list_empty"))])
            .block(block);
        f.render_widget(list, area);
        return;
    }

    let max_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .presenter
        .records()
        .iter()
        .map(|record| {
            let name = strip_control_chars(&record.name);
            ListItem::new(truncate_to_width(&name, max_width).into_owned())
                .style(app.style("list_normal"))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("list_selected"));

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
