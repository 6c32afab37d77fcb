use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use sibling_core::state::SelectionSession;

/// Render the filtered candidates, scrolled so the selection stays in view.
pub fn draw(f: &mut Frame, area: Rect, session: &SelectionSession, theme: &Theme) {
    let total = session.pool().len();
    let shown = session.candidate_count();
    let title = if shown == total {
        format!(" {total} siblings ")
    } else {
        format!(" {shown}/{total} siblings ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(theme.title)))
        .border_style(Style::default().fg(theme.border));

    if shown == 0 {
        let message = if total == 0 {
            "No sibling files"
        } else {
            "No matches"
        };
        let empty = List::new([ListItem::new(Line::from(Span::styled(
            message,
            Style::default().fg(theme.muted),
        )))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = session
        .candidates()
        .map(|entry| ListItem::new(Line::from(entry.name.as_str())))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.accent)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(session.selected);
    *list_state.offset_mut() = session.scroll_offset;
    f.render_stateful_widget(list, area, &mut list_state);
}
