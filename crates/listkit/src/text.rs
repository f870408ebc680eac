//! Plain-text backend for rendered lists.
//!
//! [`TextRenderer`] flattens [`RenderedList`] trees into terminal lines:
//!
//! ```text
//!  • Parsers
//!     1. Lexing turns the input into tokens and keeps
//!        going until the end.
//!     2. Parsing
//!  • Codecs
//! ```
//!
//! Markers sit where their [`MarkerGeometry`](crate::MarkerGeometry) puts
//! them. Text is word-wrapped to the configured width, continuation lines
//! start at the hanging indent and nested lists open under the body column.

use console::Style;

use crate::output::OutputMode;
use crate::rendered::{Block, Marker, RenderedItem, RenderedList};
use crate::theme::{Theme, MARKER_STYLE, STRONG_STYLE};
use crate::util::{display_width, spaces, wrap};

/// Lays out rendered lists as text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    width: Option<usize>,
    theme: Theme,
    mode: OutputMode,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(Theme::standard())
    }
}

impl TextRenderer {
    /// Unbounded width, auto-detected color.
    pub fn new(theme: Theme) -> Self {
        Self {
            width: None,
            theme,
            mode: OutputMode::Auto,
        }
    }

    /// Wraps body text so no line exceeds `width` columns. `None` disables wrapping.
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Renders a single list.
    pub fn render_list(&self, list: &RenderedList) -> String {
        let mut lines = Vec::new();
        self.list_lines(list, 0, &mut lines);
        lines.join("\n")
    }

    /// Renders a sequence of top-level paragraphs and lists.
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        let mut lines = Vec::new();
        for block in blocks {
            match block {
                Block::Text(text) => self.text_lines(text, 0, 0, &mut lines),
                Block::List(list) => self.list_lines(list, 0, &mut lines),
            }
        }
        lines.join("\n")
    }

    fn list_lines(&self, list: &RenderedList, offset: usize, lines: &mut Vec<String>) {
        push_blank(lines, list.padding);
        for (index, item) in list.items.iter().enumerate() {
            if index > 0 {
                push_blank(lines, list.padding);
            }
            self.item_lines(item, offset, lines);
        }
        push_blank(lines, list.padding);
    }

    fn item_lines(&self, item: &RenderedItem, offset: usize, lines: &mut Vec<String>) {
        let geometry = item.geometry;
        let marker_width = display_width(&item.marker.text);
        let marker_line = format!(
            "{}{}",
            spaces(offset + geometry.marker_column),
            self.style_marker(&item.marker)
        );
        let hang = offset + geometry.hang;

        let mut blocks = item.body.iter();
        match blocks.next() {
            Some(Block::Text(text)) if !geometry.own_line => {
                let body_column = offset + geometry.body_column;
                let gap = geometry
                    .body_column
                    .saturating_sub(geometry.marker_column + marker_width);
                let mut wrapped = wrap(text, self.wrap_width(body_column.max(hang))).into_iter();
                let first = wrapped.next().unwrap_or_default();
                lines.push(trim_line(format!("{}{}{}", marker_line, spaces(gap), first)));
                for line in wrapped {
                    lines.push(trim_line(format!("{}{}", spaces(hang), line)));
                }
            }
            Some(Block::Text(text)) => {
                lines.push(marker_line);
                self.text_lines(text, offset + geometry.body_column, hang, lines);
            }
            Some(Block::List(list)) => {
                lines.push(marker_line);
                self.list_lines(list, hang, lines);
            }
            None => lines.push(marker_line),
        }

        for block in blocks {
            match block {
                Block::Text(text) => self.text_lines(text, hang, hang, lines),
                Block::List(list) => self.list_lines(list, hang, lines),
            }
        }
    }

    fn text_lines(&self, text: &str, first: usize, rest: usize, lines: &mut Vec<String>) {
        let width = self.wrap_width(first.max(rest));
        for (index, line) in wrap(text, width).into_iter().enumerate() {
            let indent = if index == 0 { first } else { rest };
            lines.push(trim_line(format!("{}{}", spaces(indent), line)));
        }
    }

    fn wrap_width(&self, indent: usize) -> usize {
        match self.width {
            // Keep at least one column so wrapping never disables itself.
            Some(width) => width.saturating_sub(indent).max(1),
            None => 0,
        }
    }

    fn style_marker(&self, marker: &Marker) -> String {
        let name = if marker.strong {
            STRONG_STYLE
        } else {
            MARKER_STYLE
        };

        if self.mode.is_debug() {
            return format!("[{}]{}[/{}]", name, marker.text, name);
        }
        if !self.mode.should_use_color() {
            return marker.text.clone();
        }

        let style = self
            .theme
            .get(name)
            .or_else(|| self.theme.get(MARKER_STYLE))
            .cloned()
            .unwrap_or_else(Style::new);
        style.force_styling(true).apply_to(&marker.text).to_string()
    }
}

fn push_blank(lines: &mut Vec<String>, count: usize) {
    lines.extend(std::iter::repeat(String::new()).take(count));
}

fn trim_line(line: String) -> String {
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::rendered::Block;

    fn item(layout: Layout, token: &str, body: Vec<Block>, hsep: usize) -> RenderedItem {
        layout.compose(token, body, hsep)
    }

    fn list(kind: &str, items: Vec<RenderedItem>) -> RenderedList {
        RenderedList {
            kind: kind.to_string(),
            indent: 3,
            padding: 0,
            items,
        }
    }

    fn text_renderer() -> TextRenderer {
        TextRenderer::default().with_mode(OutputMode::Text)
    }

    #[test]
    fn test_aligned_bullets() {
        let rendered = list(
            "itemize-1",
            vec![
                item(Layout::aligned(), "•", vec![Block::text("one")], 3),
                item(Layout::aligned(), "•", vec![Block::text("two")], 3),
            ],
        );
        assert_eq!(text_renderer().render_list(&rendered), " • one\n • two");
    }

    #[test]
    fn test_wrapped_body_hangs() {
        let dot = Layout::builtin("aligned-dot").unwrap();
        let rendered = list(
            "enumerate-1",
            vec![item(dot, "1", vec![Block::text("alpha beta gamma")], 3)],
        );
        let output = text_renderer()
            .with_width(Some(14))
            .render_list(&rendered);
        assert_eq!(output, "1. alpha beta\n   gamma");
    }

    #[test]
    fn test_nested_list_indents_under_body() {
        let inner = list(
            "itemize-2",
            vec![item(Layout::aligned(), "◦", vec![Block::text("inner")], 3)],
        );
        let outer = list(
            "itemize-1",
            vec![item(
                Layout::aligned(),
                "•",
                vec![Block::text("outer"), Block::List(inner)],
                3,
            )],
        );
        assert_eq!(text_renderer().render_list(&outer), " • outer\n    ◦ inner");
    }

    #[test]
    fn test_long_layout_puts_body_below() {
        let long = Layout::builtin("long-compact-strong-dot").unwrap();
        let rendered = list(
            "description-long",
            vec![item(long, "Term", vec![Block::text("meaning")], 4)],
        );
        assert_eq!(text_renderer().render_list(&rendered), "  Term.\n    meaning");
    }

    #[test]
    fn test_padding_inserts_blank_lines() {
        let mut rendered = list(
            "itemize-1",
            vec![
                item(Layout::aligned(), "•", vec![Block::text("a")], 3),
                item(Layout::aligned(), "•", vec![Block::text("b")], 3),
            ],
        );
        rendered.padding = 1;
        assert_eq!(text_renderer().render_list(&rendered), "\n • a\n\n • b\n");
    }

    #[test]
    fn test_debug_mode_tags_markers() {
        let strong = Layout::builtin("compact-strong-dot").unwrap();
        let rendered = list(
            "description",
            vec![item(strong, "Key", vec![Block::text("value")], 3)],
        );
        let output = TextRenderer::default()
            .with_mode(OutputMode::TermDebug)
            .render_list(&rendered);
        assert_eq!(output, " [item-strong]Key.[/item-strong] value");
    }

    #[test]
    fn test_term_mode_applies_strong_style() {
        let strong = Layout::builtin("aligned-strong-dot").unwrap();
        let rendered = list("x", vec![item(strong, "1", vec![Block::text("a")], 3)]);
        let output = TextRenderer::default()
            .with_mode(OutputMode::Term)
            .render_list(&rendered);
        assert_eq!(output, "\x1b[1m1.\x1b[0m a");
    }

    #[test]
    fn test_render_blocks_mixes_paragraphs() {
        let rendered = list(
            "itemize-1",
            vec![item(Layout::aligned(), "•", vec![Block::text("x")], 3)],
        );
        let blocks = vec![Block::text("Intro"), Block::List(rendered)];
        assert_eq!(text_renderer().render_blocks(&blocks), "Intro\n • x");
    }

    #[test]
    fn test_empty_body_prints_marker() {
        let rendered = list("x", vec![item(Layout::aligned(), "•", vec![], 3)]);
        assert_eq!(text_renderer().render_list(&rendered), " •");
    }
}
