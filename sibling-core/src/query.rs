use unicode_segmentation::UnicodeSegmentation;

/// Editable search text with a caret that always sits on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    pub text: String,
    /// Byte offset into `text`.
    pub caret: usize,
}

#[derive(Clone, Copy)]
struct GraphemeSpan {
    start: usize,
    end: usize,
    is_whitespace: bool,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole text and put the caret at the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = self.text.len();
    }

    fn grapheme_spans(&self) -> Vec<GraphemeSpan> {
        self.text
            .grapheme_indices(true)
            .map(|(start, grapheme)| GraphemeSpan {
                start,
                end: start + grapheme.len(),
                is_whitespace: grapheme.chars().all(char::is_whitespace),
            })
            .collect()
    }

    fn grapheme_boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.text.len());
        boundaries
    }

    fn boundary_index_at_or_before(boundaries: &[usize], caret: usize) -> usize {
        match boundaries.binary_search(&caret) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    fn clamp_caret_to_boundary(&mut self, boundaries: &[usize]) -> usize {
        let caret = self.caret.min(self.text.len());
        let idx = Self::boundary_index_at_or_before(boundaries, caret);
        self.caret = boundaries.get(idx).copied().unwrap_or(0);
        idx
    }

    fn prev_word_boundary(&self, from: usize) -> usize {
        let spans = self.grapheme_spans();
        if spans.is_empty() {
            return 0;
        }
        let mut boundaries: Vec<usize> = spans.iter().map(|s| s.start).collect();
        boundaries.push(self.text.len());
        let caret = from.min(self.text.len());
        let mut idx = Self::boundary_index_at_or_before(&boundaries, caret).saturating_sub(1);

        while let Some(span) = spans.get(idx) {
            if !span.is_whitespace {
                break;
            }
            if idx == 0 {
                return 0;
            }
            idx -= 1;
        }

        while let Some(span) = spans.get(idx) {
            if span.is_whitespace {
                return span.end;
            }
            if idx == 0 {
                return 0;
            }
            idx -= 1;
        }

        0
    }

    fn next_word_boundary(&self, from: usize) -> usize {
        let spans = self.grapheme_spans();
        if spans.is_empty() {
            return 0;
        }
        let mut boundaries: Vec<usize> = spans.iter().map(|s| s.start).collect();
        boundaries.push(self.text.len());
        let caret = from.min(self.text.len());
        let mut idx = Self::boundary_index_at_or_before(&boundaries, caret);

        while let Some(span) = spans.get(idx) {
            if !span.is_whitespace {
                break;
            }
            idx += 1;
        }

        while let Some(span) = spans.get(idx) {
            if span.is_whitespace {
                return span.start;
            }
            idx += 1;
        }

        self.text.len()
    }

    pub fn caret_left(&mut self) {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_caret_to_boundary(&boundaries);
        if idx > 0 {
            self.caret = boundaries[idx - 1];
        }
    }

    pub fn caret_right(&mut self) {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_caret_to_boundary(&boundaries);
        if idx + 1 < boundaries.len() {
            self.caret = boundaries[idx + 1];
        }
    }

    pub fn caret_start(&mut self) {
        self.caret = 0;
    }

    pub fn caret_end(&mut self) {
        self.caret = self.text.len();
    }

    pub fn caret_word_left(&mut self) {
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        self.caret = self.prev_word_boundary(self.caret);
    }

    pub fn caret_word_right(&mut self) {
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        self.caret = self.next_word_boundary(self.caret);
    }

    pub fn insert_char(&mut self, c: char) {
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        self.text.insert(self.caret, c);
        self.caret += c.len_utf8();
    }

    /// Remove the grapheme before the caret. Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_caret_to_boundary(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.text.drain(prev..self.caret);
        self.caret = prev;
        true
    }

    /// Remove the grapheme under the caret. Returns whether anything was removed.
    pub fn delete_forward_char(&mut self) -> bool {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_caret_to_boundary(&boundaries);
        if idx + 1 >= boundaries.len() {
            return false;
        }
        let end = boundaries[idx + 1];
        self.text.drain(self.caret..end);
        true
    }

    pub fn delete_word(&mut self) {
        if self.text.is_empty() || self.caret == 0 {
            return;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        let new_caret = self.prev_word_boundary(self.caret);
        self.text.drain(new_caret..self.caret);
        self.caret = new_caret;
    }

    pub fn delete_word_forward(&mut self) {
        if self.text.is_empty() || self.caret >= self.text.len() {
            return;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        let end = self.next_word_boundary(self.caret);
        self.text.drain(self.caret..end);
    }

    pub fn delete_to_start(&mut self) {
        if self.caret == 0 {
            return;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        self.text.drain(..self.caret);
        self.caret = 0;
    }

    pub fn delete_to_end(&mut self) {
        if self.caret >= self.text.len() {
            return;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_caret_to_boundary(&boundaries);
        self.text.truncate(self.caret);
    }
}
