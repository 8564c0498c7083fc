//! The UI renders the pager state as a page with a fixed navigation bar laid over its top rows.
//!
//! The page is drawn from the first visible row down to the status line. The navigation bar is then
//! drawn on top of it, covering `nav_bar_height` rows the same way a fixed header covers content in
//! a browser. That overlap is what the tracker's nav bar offset compensates for.

use crate::app_state::{AppState, View};
use crate::config::Config;
use crate::nav::{NavKind, NavMenu};
use crate::tracker::Phase;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph, Tabs},
    Frame,
};

/// Renders the page, the navigation bar and the status line.
pub fn draw(f: &mut Frame, app: &AppState, cfg: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    draw_page(f, app, chunks[0]);

    let nav_area = Rect {
        height: cfg.nav_bar_height.min(chunks[0].height),
        ..chunks[0]
    };
    draw_nav(f, app, nav_area);
    draw_status(f, app, chunks[1]);
}

/// Rows available to the page between the top of the screen and the status line.
#[must_use]
pub fn page_rows(terminal_rows: u16) -> u16 {
    terminal_rows.saturating_sub(1)
}

fn draw_page(f: &mut Frame, app: &AppState, area: Rect) {
    let top = app.tracker.page().top_row();
    let heading_rows: Vec<usize> = app.document.headings.iter().map(|h| h.row).collect();

    let lines: Vec<Line> = app
        .document
        .lines
        .iter()
        .enumerate()
        .skip(top)
        .take(usize::from(area.height))
        .map(|(row, text)| {
            if heading_rows.contains(&row) {
                Line::from(Span::styled(
                    text.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text.as_str())
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_nav(f: &mut Frame, app: &AppState, area: Rect) {
    if area.height == 0 {
        return;
    }
    let snapshot = app.tracker.snapshot();

    let titles: Vec<Line> = app
        .nav
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let key = if i < 9 {
                format!("{} ", i + 1)
            } else {
                String::new()
            };
            let style = match item.kind {
                NavKind::Section if NavMenu::is_highlighted(item, snapshot.active) => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                NavKind::Section => Style::default().fg(Color::Gray),
                NavKind::Route => Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            };
            Line::from(vec![
                Span::styled(key, Style::default().fg(Color::DarkGray)),
                Span::styled(item.label.as_str(), style),
            ])
        })
        .collect();

    // Compact once the page has scrolled, like a header that gains a backdrop.
    let border_style = if snapshot.scrolled {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let borders = match area.height {
        1 => Borders::NONE,
        2 => Borders::BOTTOM,
        _ => Borders::ALL,
    };
    let mut block = Block::default()
        .borders(borders)
        .border_style(border_style);
    if borders == Borders::ALL {
        block = block.title(Span::styled(
            " scrollspy ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.nav.highlighted(snapshot.active))
        .highlight_style(Style::default())
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));

    f.render_widget(Clear, area);
    f.render_widget(tabs, area);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    if app.current_view == View::Command {
        let line = Line::from(vec![
            Span::styled(":", Style::default().fg(Color::Yellow)),
            Span::raw(app.command_buffer.as_str()),
        ]);
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(0)])
        .split(area);

    let snapshot = app.tracker.snapshot();
    let gauge = LineGauge::default()
        .ratio(snapshot.progress / 100.0)
        .label(format!("{:>3.0}%", snapshot.progress))
        .filled_style(Style::default().fg(Color::Cyan))
        .unfilled_style(Style::default().fg(Color::DarkGray));
    f.render_widget(gauge, chunks[0]);

    let phase = match snapshot.phase {
        Phase::Idle => String::new(),
        Phase::Navigating { id, .. } => format!(" → {id}"),
    };
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(app.href(), Style::default().fg(Color::Green)),
        Span::styled(phase, Style::default().fg(Color::Yellow)),
    ];
    match &app.message {
        Some(message) => spans.push(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        )),
        None => spans.push(Span::styled(
            "  Tab/1-9 jump  ↑↓ scroll  : command  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
