//! Rendering: sidebar, chat area, composer and status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::{App, FocusArea, NoticeLevel};
use crate::panels::chat::ChatEntry;

mod sidebar;
mod theme;

use sidebar::render_sidebar;
use theme::*;

const SIDEBAR_WIDTH: u16 = 30;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 3;

pub fn render(app: &mut App, f: &mut Frame<'_>) {
    let size = f.size();
    if size.width < 80 || size.height < 24 {
        let block = Paragraph::new("Terminal too small, please resize to at least 80x24.")
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(app.brand.name.clone())
                    .borders(Borders::ALL)
                    .style(Style::default().fg(FG_PRIMARY).bg(BG_PANEL)),
            )
            .style(Style::default().fg(FG_PRIMARY).bg(BG_PRIMARY));
        f.render_widget(block, size);
        return;
    }

    let base = Block::default().style(Style::default().bg(BG_PRIMARY));
    f.render_widget(base, size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(size);
    let workspace = vertical[0];
    let status_area = vertical[1];

    let sidebar_width = if app.sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(workspace);

    render_sidebar(f, app, horizontal[0]);
    render_chat_column(f, app, horizontal[1]);
    render_status_bar(f, app, status_area);
}

fn render_chat_column(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);
    render_conversation(f, app, column[0]);
    render_composer(f, app, column[1]);
}

fn render_conversation(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == FocusArea::Chat;
    let block = Block::default()
        .title(app.brand.name.clone())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { BORDER_FOCUS } else { BORDER_IDLE }))
        .style(Style::default().bg(BG_PRIMARY));

    if app.chat.entries().is_empty() {
        let welcome = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                app.brand.tagline.clone(),
                Style::default().fg(FG_DIM),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("Docs: {}", app.brand.docs_url),
                Style::default().fg(FG_DIM),
            )),
            Line::from(Span::styled(
                format!("AgentOS: {}", app.brand.center_url),
                Style::default().fg(FG_DIM),
            )),
            Line::from(Span::styled(app.brand.url.clone(), Style::default().fg(FG_DIM))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(welcome, area);
        return;
    }

    let width = area.width.saturating_sub(4).max(10) as usize;
    let items: Vec<ListItem> = app
        .chat
        .entries()
        .iter()
        .map(|entry| entry_item(entry, width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Style::default().bg(SELECTION_BG).fg(SELECTION_FG)
        } else {
            Style::default()
        });
    let mut state = ListState::default();
    state.select(Some(app.chat.selected_index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn entry_item(entry: &ChatEntry, width: usize) -> ListItem<'static> {
    let (prefix, style, body) = match entry {
        ChatEntry::UserPrompt { prompt } => ("you ", Style::default().fg(ACCENT), prompt.as_str()),
        ChatEntry::Reply { content } => ("  ", Style::default().fg(FG_PRIMARY), content.as_str()),
        ChatEntry::Info { title, .. } => ("· ", Style::default().fg(FG_DIM), title.as_str()),
        ChatEntry::Error { detail, .. } => ("! ", Style::default().fg(NEGATIVE), detail.as_str()),
    };
    let mut lines: Vec<Line> = Vec::new();
    for (idx, chunk) in wrap_text(body, width).into_iter().enumerate() {
        if idx == 0 {
            lines.push(Line::from(vec![
                Span::styled(prefix.to_string(), style.add_modifier(Modifier::BOLD)),
                Span::styled(chunk, style),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(prefix.len())),
                Span::styled(chunk, style),
            ]));
        }
    }
    lines.push(Line::default());
    ListItem::new(lines)
}

fn render_composer(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.focus == FocusArea::Composer;
    let title = if app.chat.awaiting_reply() {
        "Message (waiting for reply…)"
    } else {
        "Message"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { BORDER_FOCUS } else { BORDER_IDLE }))
        .style(Style::default().bg(BG_PRIMARY));
    let inner = block.inner(area);
    let input = Paragraph::new(app.composer.text().to_string())
        .style(Style::default().fg(FG_PRIMARY))
        .block(block);
    f.render_widget(input, area);

    if focused && app.endpoint_editor.is_none() && app.token_editor.is_none() {
        let cursor_x = inner.x + app.composer.cursor_column().min(inner.width.saturating_sub(1));
        f.set_cursor(cursor_x, inner.y);
    }
}

fn render_status_bar(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let (text, fg) = match app.notice.as_ref() {
        Some(notice) => {
            let fg = match notice.level {
                NoticeLevel::Info => BAR_TEXT,
                NoticeLevel::Success => POSITIVE,
                NoticeLevel::Error => NEGATIVE,
            };
            (notice.text.clone(), fg)
        }
        None => (
            String::from(
                "Tab focus  ^E endpoint  ^R refresh  F2 mode  F3 entity  ^N new chat  ^Y ports  ^B sidebar  ^Q quit",
            ),
            BAR_TEXT,
        ),
    };
    let bar = Paragraph::new(text).style(Style::default().fg(fg).bg(BAR_BG));
    f.render_widget(bar, area);
}

/// Truncates to `max` characters, appending an ellipsis when shortened.
pub(crate) fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_width = 0usize;
        for word in raw_line.split_whitespace() {
            let word_width = word.chars().count();
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("short", 21), "short");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let result = truncate_text("http://localhost:7777/very/long/path", 21);
        assert_eq!(result.chars().count(), 21);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn wrap_splits_on_width() {
        let wrapped = wrap_text("one two three four", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four"]);
    }

    #[tokio::test]
    async fn welcome_screen_shows_brand_urls() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;
        use tempfile::TempDir;

        let dir = TempDir::new().expect("temp dir");
        let mut app = crate::app::App::new(dir.path().to_path_buf()).expect("app");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| render(&mut app, f)).expect("draw");

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains(&app.brand.center_url));
        assert!(content.contains(&app.brand.url));
    }
}
