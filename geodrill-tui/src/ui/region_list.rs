//! Selectable list of the features on the current map.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use geodrill_core::options::format_value;

use crate::app::{AppState, RegionRow};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(!app.map.rows.is_empty()))
        .title(format!(" Regions ({}) ", app.map.rows.len()))
        .title_style(theme::panel_title(true));

    let items: Vec<ListItem> = app.map.rows.iter().map(row_item).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected_row());

    let mut state = ListState::default();
    if !app.map.rows.is_empty() {
        state.select(Some(app.map.cursor));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn row_item(row: &RegionRow) -> ListItem<'static> {
    let (value, value_style) = match row.value {
        Some(v) => (format_value(v), theme::positive()),
        None => ("-".to_string(), theme::muted()),
    };
    let mut spans = vec![
        Span::styled(row.name.clone(), Style::default()),
        Span::raw(" "),
        Span::styled(value, value_style),
    ];
    if let Some(child) = row.drills_into {
        spans.push(Span::styled(format!("  > {}", child.label()), theme::accent()));
    }
    ListItem::new(Line::from(spans))
}
