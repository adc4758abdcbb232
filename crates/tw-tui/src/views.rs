//! Rendering for the single-screen layout.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::{App, Focus};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(7), // Quick access
            Constraint::Length(3), // Talent entry
            Constraint::Length(7), // Result
            Constraint::Min(0),    // History
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_quick(frame, app, chunks[1]);
    draw_input(frame, app, chunks[2]);
    draw_result(frame, app, chunks[3]);
    draw_history(frame, app, chunks[4]);
    draw_status(frame, app, chunks[5]);

    if let Some(name) = &app.pending_karma {
        draw_karma_prompt(frame, app, name);
    }
}

/// App title, karma die selector, and workbook path.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let workbook = app
        .settings
        .workbook
        .as_ref()
        .map_or_else(|| "no workbook".to_string(), |p| p.display().to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("Talentwurf", Style::default().fg(Color::Cyan).bold()),
            Span::raw("   "),
            Span::styled(
                format!("karma die: {}", app.karma_die()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(workbook, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Quick-access buttons, one column per rank.
fn draw_quick(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Quick;
    let block = Block::default()
        .title(" Quick Access ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::Blue }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.quick.is_empty() {
        let empty = Paragraph::new("No ranked talents in this workbook.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let constraints: Vec<Constraint> = app
        .quick
        .iter()
        .map(|_| Constraint::Ratio(1, app.quick.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    let mut offset = 0usize;
    for (i, (rank, names)) in app.quick.iter().enumerate() {
        let items: Vec<ListItem> = names
            .iter()
            .map(|name| ListItem::new(name.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().title(format!(" Rank {rank} ")))
            .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
            .highlight_symbol("\u{25b6} ");

        let mut state = ListState::default();
        if focused && app.quick_cursor >= offset && app.quick_cursor < offset + names.len() {
            state.select(Some(app.quick_cursor - offset));
        }
        frame.render_stateful_widget(list, columns[i], &mut state);
        offset += names.len();
    }
}

/// Talent entry with the inline completion preview.
fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let title = if app.input.is_empty() {
        " Talent ".to_string()
    } else {
        format!(" Talent ({} matches) ", app.hits.len())
    };

    let mut spans = vec![Span::styled(
        app.input.clone(),
        Style::default().fg(Color::White),
    )];
    if focused && let Some(preview) = app.hit_preview() {
        spans.push(Span::styled(preview, Style::default().fg(Color::DarkGray)));
    }

    let entry = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::Blue })),
    );
    frame.render_widget(entry, area);
}

/// Latest roll: context line, big total, joined details.
fn draw_result(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if !app.result.heading.is_empty() {
        lines.push(Line::from(Span::styled(
            app.result.heading.clone(),
            Style::default().fg(Color::White),
        )));
    }
    if !app.result.total.is_empty() {
        lines.push(Line::from(Span::styled(
            app.result.total.clone(),
            Style::default().fg(Color::Green).bold(),
        )));
    }
    if !app.result.details.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Details: {}", app.result.details),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let result = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Result ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(result, area);
}

/// Past rolls, newest first.
fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .history
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4}  ", entry.trace.total),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(entry.label.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}", entry.trace.details()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" History ({}) ", app.history.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(list, area);
}

/// Context-sensitive key hints plus the load status.
fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if app.pending_karma.is_some() {
        "y:with karma  n:without  Esc:cancel"
    } else {
        match app.focus {
            Focus::Input => {
                "Enter:roll  Tab:complete  \u{2191}/\u{2193}:quick access  Ctrl+K:karma die  Ctrl+R:reload  Ctrl+Q:quit"
            }
            Focus::Quick => {
                "j/k:navigate  Enter:roll  i:entry  Ctrl+K:karma die  Ctrl+R:reload  q:quit"
            }
        }
    };
    let text = if app.status.is_empty() {
        hint.to_string()
    } else {
        format!("{hint}  |  {}", app.status)
    };
    let status = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, area);
}

/// The karma yes/no prompt overlay.
fn draw_karma_prompt(frame: &mut Frame, app: &App, name: &str) {
    let area = centered_rect(50, 25, frame.area());

    let text = vec![
        Line::from(Span::styled(name.to_string(), Style::default().bold())),
        Line::from(""),
        Line::from(format!("Add a karma die ({})?", app.karma_die())),
        Line::from(Span::styled(
            "y: yes   n: no   Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Karma ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Create a centered rectangle as a percentage of the given area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
