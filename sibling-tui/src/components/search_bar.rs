use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use sibling_core::query::QueryInput;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct SearchBarStyle<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub border_color: Color,
    pub title_color: Color,
    pub muted_color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    caret_col: u16,
}

/// The part of `text` that fits in `max_width` columns while keeping the caret visible.
fn visible_slice(text: &str, caret: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            caret_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut boundaries: Vec<usize> = graphemes.iter().map(|(i, _)| *i).collect();
    boundaries.push(text.len());

    let caret = caret.min(text.len());
    let boundary_idx = match boundaries.binary_search(&caret) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };

    // Column at which each grapheme boundary starts.
    let mut columns = Vec::with_capacity(boundaries.len());
    let mut width = 0;
    columns.push(0);
    for (_, grapheme) in &graphemes {
        width += grapheme.width();
        columns.push(width);
    }

    let caret_col = columns[boundary_idx];
    let max_width = max_width as usize;
    let max_caret_col = max_width.saturating_sub(1);
    let scroll_col = caret_col.saturating_sub(max_caret_col);

    let start_index = columns
        .iter()
        .position(|&col| col >= scroll_col)
        .unwrap_or(0)
        .min(graphemes.len().saturating_sub(1));

    let mut end_index = start_index;
    let mut visible_width = 0;
    while let Some((_, grapheme)) = graphemes.get(end_index) {
        let g_width = grapheme.width();
        if visible_width + g_width > max_width {
            break;
        }
        visible_width += g_width;
        end_index += 1;
    }

    let caret_col = caret_col
        .saturating_sub(columns[start_index])
        .min(max_caret_col);

    VisibleSlice {
        start: boundaries[start_index],
        end: boundaries[end_index],
        caret_col: u16::try_from(caret_col).unwrap_or(u16::MAX),
    }
}

/// Render the query line and place the terminal cursor on the caret.
pub fn draw(f: &mut Frame, area: Rect, style: &SearchBarStyle<'_>, query: &QueryInput) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", style.title),
            Style::default().fg(style.title_color),
        ))
        .border_style(Style::default().fg(style.border_color));
    let inner = block.inner(area);

    let (content, caret_col) = if query.is_empty() {
        (
            Line::from(Span::styled(
                style.placeholder,
                Style::default().fg(style.muted_color),
            )),
            0,
        )
    } else {
        let slice = visible_slice(query.as_str(), query.caret, inner.width);
        (
            Line::from(Span::raw(&query.as_str()[slice.start..slice.end])),
            slice.caret_col,
        )
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x.saturating_add(caret_col), inner.y));
    }
}
