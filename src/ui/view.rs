//! Draw functions for the three views (now playing, lyric list, track info).

use crate::state::Update;
use crate::ui::app::View;
use crate::ui::styles::LyricStyles;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

/// Format milliseconds as m:ss for the header clock.
pub fn format_time(ms: u64) -> String {
    let total_secs = ms / 1_000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn draw(
    frame: &mut Frame,
    update: Option<&Update>,
    position_ms: u64,
    index: Option<usize>,
    view: View,
    styles: &LyricStyles,
) {
    let area = frame.area();
    let Some(update) = update else {
        let waiting = Paragraph::new("waiting for a player...")
            .style(styles.dim)
            .alignment(Alignment::Center);
        frame.render_widget(waiting, centered_band(area, 1));
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);
    draw_header(frame, chunks[0], update, position_ms, styles);
    match view {
        View::Now => draw_now(frame, chunks[1], update, index, styles),
        View::Lines => draw_lines(frame, chunks[1], update, index, styles),
        View::Info => draw_info(frame, chunks[1], update, styles),
    }
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    update: &Update,
    position_ms: u64,
    styles: &LyricStyles,
) {
    let mut spans = vec![Span::styled(update.title.clone(), styles.header)];
    if !update.artist.is_empty() {
        spans.push(Span::raw(" - "));
        spans.push(Span::raw(update.artist.clone()));
    }
    spans.push(Span::styled(
        format!(
            " [{}/{}]",
            format_time(position_ms),
            format_time(update.duration_ms)
        ),
        styles.dim,
    ));
    if !update.playing {
        spans.push(Span::styled(" [paused]", styles.dim));
    }
    let header = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(header, area);
}

/// The main view: the active line with its neighbors, vertically centered.
fn draw_now(
    frame: &mut Frame,
    area: Rect,
    update: &Update,
    index: Option<usize>,
    styles: &LyricStyles,
) {
    if update.lines.is_empty() {
        let text = update.err.as_deref().unwrap_or("no lyrics");
        let paragraph = Paragraph::new(text)
            .style(styles.dim)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, centered_band(area, 1));
        return;
    }

    // Elapsed time past the last line: the display goes quiet.
    let Some(index) = index else {
        return;
    };

    let mut visible: Vec<Line> = Vec::with_capacity(3);
    if index > 0
        && let Some(prev) = update.lines.get(index - 1)
    {
        visible.push(Line::styled(prev.text.clone(), styles.before));
    }
    if let Some(current) = update.lines.get(index) {
        visible.push(Line::styled(current.text.clone(), styles.current));
    }
    if let Some(next) = update.lines.get(index + 1) {
        visible.push(Line::styled(next.text.clone(), styles.after));
    }

    let band = centered_band(area, visible.len() as u16);
    let paragraph = Paragraph::new(visible).alignment(Alignment::Center);
    frame.render_widget(paragraph, band);
}

/// The full lyric listing, scrolled so the active line stays in view.
fn draw_lines(
    frame: &mut Frame,
    area: Rect,
    update: &Update,
    index: Option<usize>,
    styles: &LyricStyles,
) {
    if update.lines.is_empty() {
        let paragraph = Paragraph::new("no lyrics")
            .style(styles.dim)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, centered_band(area, 1));
        return;
    }

    let lines: Vec<Line> = update
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if Some(i) == index {
                styles.current
            } else {
                styles.after
            };
            Line::styled(line.text.clone(), style)
        })
        .collect();

    let scroll = index
        .unwrap_or(0)
        .saturating_sub(area.height as usize / 2) as u16;
    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Diagnostic view: current track plus the selected candidate's raw payload.
fn draw_info(frame: &mut Frame, area: Rect, update: &Update, styles: &LyricStyles) {
    let mut lines = vec![
        Line::from(format!("Title:    {}", update.title)),
        Line::from(format!("Artist:   {}", update.artist)),
        Line::from(format!("Album:    {}", update.album)),
        Line::from(format!("Duration: {}", format_time(update.duration_ms))),
        Line::default(),
    ];
    match &update.selected {
        Some(raw) => {
            lines.push(Line::styled("Selected candidate:", styles.header));
            let pretty =
                serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
            lines.extend(pretty.split('\n').map(|l| Line::from(l.to_string())));
        }
        None => lines.push(Line::styled("no candidate selected", styles.dim)),
    }
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// A horizontal band of `height` rows, vertically centered within `area`.
fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height,
    }
}
