//! Help overlay: scrollable keybinding table.
//!
//! Shows the bindings actually in effect, including config overrides.

use crate::app::App;
use crate::keybindings::Context;
use instacats::presenter::ExternalOpener;
use ratatui::{
    layout::{Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Context display order and labels for the help screen.
const CONTEXT_ORDER: [(Context, &str); 2] = [
    (Context::Global, "Cat List"),
    (Context::Help, "Help Overlay"),
];

/// Render the help overlay on top of the current view.
pub fn render<O: ExternalOpener>(f: &mut Frame, app: &mut App<O>) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let bindings = app.keybindings.all_bindings();
    let mut rows: Vec<Row> = Vec::new();

    for (ctx, label) in &CONTEXT_ORDER {
        let ctx_bindings: Vec<_> = bindings.iter().filter(|(c, _, _, _)| c == ctx).collect();
        if ctx_bindings.is_empty() {
            continue;
        }

        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", label),
                    app.style("help_heading"),
                )),
                Line::from(""),
            ]),
        );

        for (_, key_str, _, description) in ctx_bindings {
            rows.push(Row::new(vec![format!("  {}", key_str), description.to_string()]));
        }

        rows.push(Row::new(vec![String::new(), String::new()]));
    }

    // Drop the trailing separator
    rows.pop();

    let total_rows = rows.len();
    let visible_height = overlay.height.saturating_sub(4) as usize; // borders + header + margin
    let max_scroll = total_rows.saturating_sub(visible_height);
    app.help_page_size = visible_height;
    // A larger terminal can shrink the range after scrolling
    app.help_scroll_offset = app.help_scroll_offset.min(max_scroll);
    let scroll = app.help_scroll_offset;
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(visible_rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    app.style("help_heading")
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("help_body"));

    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint = Line::from(Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("help_hint"),
        ));
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
