use crate::app::App;
use instacats::presenter::ExternalOpener;
use instacats::util::strip_control_chars;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details panel for the selected cat.
pub fn render<O: ExternalOpener>(f: &mut Frame, app: &App<O>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title("Details");

    let Some(record) = app.selected_record() else {
        let paragraph = Paragraph::new(Line::styled("Nothing selected", app.style("list_empty")))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let label = app.style("detail_label");
    let value = app.style("detail_value");

    let lines = vec![
        Line::from(vec![
            Span::styled("Name: ", label),
            Span::styled(strip_control_chars(&record.name).into_owned(), value),
        ]),
        Line::from(vec![
            Span::styled("ID:   ", label),
            Span::styled(record.id.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Link: ", label),
            Span::styled(
                strip_control_chars(&record.external_link).into_owned(),
                app.style("detail_link"),
            ),
        ]),
        Line::from(""),
        Line::styled(strip_control_chars(&record.description).into_owned(), value),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
