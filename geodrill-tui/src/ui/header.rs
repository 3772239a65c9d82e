//! Header row: Back button, breadcrumb, loading badge.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![
        Span::styled(" [< Back] ", theme::back_button(app.back_enabled())),
        Span::raw(" "),
        Span::styled(app.breadcrumb(), theme::accent()),
    ];
    if app.loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(" loading... ", theme::warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
