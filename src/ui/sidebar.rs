//! Sidebar rendering: brand header, endpoint row, ports registry, status
//! radar and the gated mode/entity/session area.

use ratatui::layout::Rect;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::radar::Health;
use crate::app::{App, FocusArea};

use super::theme::*;
use super::truncate_text;

/// Number of placeholder rows drawn while initialization is in flight.
const LOADING_PLACEHOLDER_ROWS: usize = 3;

const ENDPOINT_PLACEHOLDER: &str = "NO ENDPOINT ADDED";

pub(super) fn render_sidebar(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == FocusArea::Sessions;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(if focused { BORDER_FOCUS } else { BORDER_IDLE }))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.sidebar_collapsed {
        // Collapse changes the rendered width only; state is untouched.
        let hint = Paragraph::new("»").style(Style::default().fg(FG_DIM));
        f.render_widget(hint, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    // Header.
    lines.push(Line::from(Span::styled(
        app.brand.name.to_uppercase(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        if app.can_start_new_chat() {
            "[^N] New Chat"
        } else {
            " ^N  New Chat (empty)"
        },
        Style::default().fg(if app.can_start_new_chat() {
            FG_PRIMARY
        } else {
            FG_DIM
        }),
    )));
    lines.push(Line::default());

    // Endpoint row.
    lines.push(section_title("AgentOS"));
    match app.endpoint_editor.as_ref() {
        Some(editor) => {
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(BORDER_FOCUS)),
                Span::styled(
                    editor.text().to_string(),
                    Style::default().fg(SELECTION_FG),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                "Enter to save, Esc to cancel",
                Style::default().fg(FG_DIM),
            )));
        }
        None => {
            let display = if app.config.endpoint.is_empty() {
                ENDPOINT_PLACEHOLDER.to_string()
            } else {
                truncate_text(&app.config.endpoint, 21)
            };
            let dot = if app.endpoint_active {
                Span::styled("●", Style::default().fg(POSITIVE))
            } else {
                Span::styled("●", Style::default().fg(NEGATIVE))
            };
            let spinner = if app.is_refreshing() {
                Span::styled(" ⟳", Style::default().fg(ACCENT))
            } else {
                Span::raw("")
            };
            lines.push(Line::from(vec![
                Span::styled(display, Style::default().fg(FG_PRIMARY)),
                Span::raw(" "),
                dot,
                spinner,
            ]));
            lines.push(Line::from(Span::styled(
                "^E edit   ^R refresh",
                Style::default().fg(FG_DIM),
            )));
        }
    }
    match app.token_editor.as_ref() {
        Some(editor) => {
            lines.push(Line::from(vec![
                Span::styled("token> ", Style::default().fg(BORDER_FOCUS)),
                Span::styled(editor.text().to_string(), Style::default().fg(SELECTION_FG)),
            ]));
            lines.push(Line::from(Span::styled(
                "Enter to save, Esc to cancel",
                Style::default().fg(FG_DIM),
            )));
        }
        None => {
            // The token itself never renders; only its presence.
            let value = if app.config.auth_token.is_some() {
                "set"
            } else {
                "none"
            };
            lines.push(Line::from(vec![
                Span::styled("Token ", Style::default().fg(FG_DIM)),
                Span::styled(value, Style::default().fg(FG_PRIMARY)),
                Span::styled("   ^T edit", Style::default().fg(FG_DIM)),
            ]));
        }
    }
    lines.push(Line::default());

    // Ports registry. ^Y copies the block to the clipboard.
    lines.push(section_title("Ports Registry"));
    lines.push(kv_line("UI", "3200-3203"));
    lines.push(kv_line("API", "8600-8603"));
    lines.push(Line::from(Span::styled(
        "See /agno/PORTS.md (^Y to copy)",
        Style::default().fg(FG_DIM),
    )));
    lines.push(Line::default());

    // Agent status radar, two targets per row.
    lines.push(section_title("Agent Status"));
    let targets = app.radar.targets();
    for pair in targets.chunks(2) {
        let mut spans: Vec<Span> = Vec::new();
        for target in pair {
            spans.push(health_dot(app.radar.health(target.key)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("{:<10}", target.label.to_uppercase()),
                Style::default().fg(FG_PRIMARY),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());

    // Everything below is gated on endpoint activity.
    if app.endpoint_active {
        if app.endpoint_loading {
            lines.push(section_title("Mode"));
            for _ in 0..LOADING_PLACEHOLDER_ROWS {
                lines.push(Line::from(Span::styled(
                    "░░░░░░░░░░░░░░░░░░░░",
                    Style::default().fg(PENDING),
                )));
            }
        } else {
            lines.push(section_title("Mode"));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}]", app.mode().label().to_uppercase()),
                    Style::default().fg(ACCENT),
                ),
                Span::styled(" F2 switch", Style::default().fg(FG_DIM)),
            ]));

            let entity = entity_label(app);
            lines.push(Line::from(vec![
                Span::styled(
                    truncate_text(&entity, 21),
                    Style::default().fg(FG_PRIMARY),
                ),
                Span::styled(" F3 next", Style::default().fg(FG_DIM)),
            ]));

            if let Some(model) = app.model_display() {
                lines.push(Line::from(Span::styled(
                    truncate_text(&model.to_uppercase(), 24),
                    Style::default().fg(FG_DIM),
                )));
            }
            lines.push(Line::default());

            render_session_lines(app, &mut lines);
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().fg(FG_PRIMARY).bg(BG_PANEL));
    f.render_widget(paragraph, inner);
}

fn render_session_lines(app: &App, lines: &mut Vec<Line>) {
    lines.push(section_title("Sessions"));
    if app.sessions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No sessions yet",
            Style::default().fg(FG_DIM),
        )));
        return;
    }
    let focused = app.focus == FocusArea::Sessions;
    for (idx, session) in app.sessions.sessions().iter().enumerate() {
        let selected = idx == app.sessions.selected_index();
        let loaded = app.selected_session_id.as_deref() == Some(session.session_id.as_str());
        let marker = if loaded { "▸" } else { " " };
        let mut style = Style::default().fg(FG_PRIMARY);
        if selected && focused {
            style = Style::default().bg(SELECTION_BG).fg(SELECTION_FG);
        } else if selected {
            style = Style::default().fg(ACCENT);
        }
        lines.push(Line::from(Span::styled(
            format!("{} {}", marker, truncate_text(session.display_title(), 24)),
            style,
        )));
    }
    if focused {
        lines.push(Line::from(Span::styled(
            "Enter load   d delete",
            Style::default().fg(FG_DIM),
        )));
    }
}

fn entity_label(app: &App) -> String {
    match app.mode() {
        crate::app::Mode::Agent => app
            .selected_agent_id
            .as_deref()
            .and_then(|id| app.agents.iter().find(|agent| agent.id == id))
            .map(|agent| agent.name.clone())
            .unwrap_or_else(|| String::from("No agents available")),
        crate::app::Mode::Team => app
            .selected_team_id
            .as_deref()
            .and_then(|id| app.teams.iter().find(|team| team.id == id))
            .map(|team| team.name.clone())
            .unwrap_or_else(|| String::from("No teams available")),
    }
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_uppercase(),
        Style::default()
            .fg(SECTION_TITLE)
            .add_modifier(Modifier::BOLD),
    ))
}

fn kv_line(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<6}", key), Style::default().fg(FG_DIM)),
        Span::styled(value.to_string(), Style::default().fg(FG_PRIMARY)),
    ])
}

fn health_dot(health: Health) -> Span<'static> {
    match health {
        Health::Pending => Span::styled("●", Style::default().fg(PENDING)),
        Health::Healthy => Span::styled("●", Style::default().fg(POSITIVE)),
        Health::Unhealthy => Span::styled("●", Style::default().fg(NEGATIVE)),
    }
}
