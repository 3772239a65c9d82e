//! Map panel: region outlines on a braille canvas, filled by value.
//!
//! Terminal cells cannot be flood-filled, so each outline is stroked in the
//! color its value maps to. The selected feature is stroked last, in the
//! emphasis color, with its name printed at the center of its box.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use geodrill_core::data::Ring;
use geodrill_core::options::{format_value, tooltip_text};
use geodrill_core::scale::{EMPHASIS_COLOR, HIGH_COLOR, LOW_COLOR};
use geodrill_core::{FailedScene, MapScene};

use crate::app::{AppState, Screen};
use crate::theme;
use crate::viewport::Viewport;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.map.screen {
        Screen::Empty => render_empty(f, area, app.loading),
        Screen::Map(scene) => render_map(f, area, app, scene),
        Screen::Failed(failure) => render_failure(f, area, failure),
    }
}

fn render_empty(f: &mut Frame, area: Rect, loading: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));
    let msg = if loading {
        "Loading boundary data..."
    } else {
        "No map loaded."
    };
    let para = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(msg, theme::muted()))])
        .block(block);
    f.render_widget(para, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &AppState, scene: &MapScene) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let selected = app.map.selected().map(|r| r.name.as_str());
    let viewport: Viewport = app.map.viewport;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", scene.title))
        .title_style(theme::panel_title(true));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme::BACKGROUND)
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(|ctx| {
            for feature in &scene.boundary.features {
                let name = feature.name.as_deref();
                if name.is_some() && name == selected {
                    continue;
                }
                let value = name.and_then(|n| scene.value_of(n));
                let color = theme::region_color(scene.scale.color_for(value));
                for ring in &feature.rings {
                    draw_ring(ctx, ring, color);
                }
            }

            let Some(name) = selected else { return };
            let Some(feature) = scene.boundary.find(name) else {
                return;
            };
            ctx.layer();
            let color = theme::region_color(EMPHASIS_COLOR);
            for ring in &feature.rings {
                draw_ring(ctx, ring, color);
            }
            if let Some((x, y)) = feature.label_point() {
                ctx.print(x, y, Span::styled(name.to_string(), theme::accent_bold()));
            }
        });
    f.render_widget(canvas, chunks[0]);

    f.render_widget(Paragraph::new(legend_line(app, scene)), chunks[1]);
}

/// Tooltip for the selection, then the low/high legend.
fn legend_line<'a>(app: &AppState, scene: &MapScene) -> Line<'a> {
    let mut spans = Vec::new();
    if let Some(row) = app.map.selected() {
        spans.push(Span::styled(
            format!(" {} ", tooltip_text(&row.name, row.value)),
            theme::accent(),
        ));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(
        format!("Low {} ", format_value(scene.scale.min)),
        theme::secondary(),
    ));
    for step in 0..8 {
        let rgb = LOW_COLOR.lerp(HIGH_COLOR, step as f64 / 7.0);
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().fg(theme::region_color(rgb)),
        ));
    }
    spans.push(Span::styled(
        format!(" {} High", format_value(scene.scale.max)),
        theme::secondary(),
    ));
    if app.map.viewport.zoom() > 1.0 {
        spans.push(Span::styled(
            format!("  x{:.1}", app.map.viewport.zoom()),
            theme::muted(),
        ));
    }
    Line::from(spans)
}

/// Stroke a ring, closing it if the data left it open.
fn draw_ring(ctx: &mut Context<'_>, ring: &Ring, color: ratatui::style::Color) {
    for pair in ring.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
    if let (Some(&(x1, y1)), Some(&(x2, y2))) = (ring.last(), ring.first()) {
        if (x1, y1) != (x2, y2) {
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color,
            });
        }
    }
}

fn render_failure(f: &mut Frame, area: Rect, failure: &FailedScene) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(" {} ", failure.title))
        .title_style(theme::negative());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(failure.error.to_string(), theme::negative())),
    ];
    if let Some(url) = failure.error.url() {
        lines.push(Line::from(Span::styled(format!("last source: {url}"), theme::muted())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(failure_hint(failure), theme::neutral())));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

/// Back is only offered below the root.
fn failure_hint(failure: &FailedScene) -> &'static str {
    if failure.path.len() > 1 {
        "Press r to retry or Backspace to go back."
    } else {
        "Press r to retry."
    }
}
