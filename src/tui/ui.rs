//! UI layout and rendering for the trace viewer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;

/// Render the main UI: source pane, variables pane, status bar.
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(44)])
        .split(main_layout[0]);

    render_source_pane(frame, app, panes[0]);
    render_variables_pane(frame, app, panes[1]);
    render_status_bar(frame, app, main_layout[1]);
}

/// Render the source with the current step's line highlighted whole-line,
/// scrolled so the highlight stays in view.
fn render_source_pane(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.current_line() as usize;
    let mut content_lines = Vec::new();

    for (i, src_line) in app.source_lines.iter().enumerate() {
        let lineno = i + 1;
        let number = format!("{lineno:>4} ");
        if lineno == current {
            content_lines.push(Line::from(vec![
                Span::styled(number, Style::default().fg(Color::Black).bg(Color::Yellow)),
                Span::styled(
                    src_line.clone(),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            content_lines.push(Line::from(vec![
                Span::styled(number, Style::default().fg(Color::DarkGray)),
                Span::raw(src_line.clone()),
            ]));
        }
    }

    // Keep the highlighted line centered once it would scroll off.
    let available_height = area.height.saturating_sub(2) as usize;
    let scroll_y = if current > available_height / 2 {
        (current - available_height / 2).min(app.source_lines.len().saturating_sub(available_height)) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(Text::from(content_lines))
        .block(Block::default().borders(Borders::ALL).title(app.file_name.clone()))
        .scroll((scroll_y, 0));
    frame.render_widget(paragraph, area);
}

/// Render the current step's variable snapshot.
fn render_variables_pane(frame: &mut Frame, app: &App, area: Rect) {
    let mut content_lines = Vec::new();

    match app.current_step() {
        Some(step) if !step.vars.is_empty() => {
            for (name, value) in &step.vars {
                content_lines.push(Line::from(vec![
                    Span::styled(
                        name.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" = "),
                    Span::styled(value.clone(), Style::default().fg(Color::LightRed)),
                ]));
            }
        }
        _ => content_lines.push(Line::from(Span::styled(
            "no locals",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let title = format!("Variables (line {})", app.current_line());
    let paragraph =
        Paragraph::new(Text::from(content_lines)).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let prev_hint = if app.at_start() { "" } else { "<-/p prev  " };
    let next_hint = if app.at_end() { "" } else { "->/n next  " };
    let status = format!(
        " step {}/{}  {}{}q quit",
        app.step_index + 1,
        app.trace.len(),
        prev_hint,
        next_hint,
    );
    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::Blue));
    frame.render_widget(paragraph, area);
}
