//! Markdown rendering for assistant replies using pulldown-cmark.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Render markdown text to styled lines. `base` is patched under every span.
pub fn render_markdown(input: &str, base: Style) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = MarkdownRenderer::new(base);
    for event in Parser::new_ext(input, options) {
        renderer.handle_event(event);
    }
    renderer.flush_line();

    // Paragraph ends leave a trailing blank line
    while renderer.lines.last().is_some_and(|l| l.width() == 0) {
        renderer.lines.pop();
    }
    renderer.lines
}

struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    base: Style,
    style_stack: Vec<Style>,
    current_spans: Vec<Span<'static>>,
    // One entry per open list: Some(next number) for ordered lists
    list_stack: Vec<Option<u64>>,
    pending_list_marker: Option<String>,
    in_code_block: bool,
    in_blockquote: bool,
}

impl MarkdownRenderer {
    fn new(base: Style) -> Self {
        Self {
            lines: Vec::new(),
            base,
            style_stack: Vec::new(),
            current_spans: Vec::new(),
            list_stack: Vec::new(),
            pending_list_marker: None,
            in_code_block: false,
            in_blockquote: false,
        }
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                self.style_stack.push(heading_style(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush_line();
                self.style_stack.pop();
            }

            Event::Start(Tag::Emphasis) => {
                self.style_stack.push(Style::default().add_modifier(Modifier::ITALIC));
            }
            Event::Start(Tag::Strong) => {
                self.style_stack.push(Style::default().add_modifier(Modifier::BOLD));
            }
            Event::Start(Tag::Strikethrough) => {
                self.style_stack.push(Style::default().add_modifier(Modifier::CROSSED_OUT));
            }
            Event::Start(Tag::Link { .. }) => {
                self.style_stack.push(
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                );
            }
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link) => {
                self.style_stack.pop();
            }

            Event::Start(Tag::CodeBlock(_)) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
            }

            Event::Start(Tag::List(start)) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.pending_list_marker = Some(marker);
            }
            Event::End(TagEnd::Item) => {
                // Items with no inline content never consume their marker
                self.pending_list_marker = None;
                self.flush_line();
            }

            Event::Start(Tag::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = true;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = false;
            }

            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.lines.push(Line::default());
                }
            }

            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => {
                self.start_inline();
                let style = self.base.patch(Style::default().fg(Color::Cyan));
                self.current_spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => self.add_text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::styled(
                    "───",
                    self.base.patch(Style::default().fg(Color::DarkGray)),
                ));
            }

            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.in_code_block {
            let style = self.base.patch(Style::default().fg(Color::Cyan));
            for line in text.lines() {
                self.current_spans.push(Span::styled(format!("  {line}"), style));
                self.flush_line();
            }
            return;
        }

        self.start_inline();
        let style = self.current_style();
        self.current_spans.push(Span::styled(text.to_string(), style));
    }

    /// Emit the list marker or quote bar that must precede the first inline
    /// span of a line.
    fn start_inline(&mut self) {
        if let Some(marker) = self.pending_list_marker.take() {
            self.current_spans.push(Span::styled(
                marker,
                self.base.patch(Style::default().fg(Color::DarkGray)),
            ));
        }

        if self.in_blockquote && self.current_spans.is_empty() {
            self.current_spans.push(Span::styled(
                "│ ",
                self.base.patch(Style::default().fg(Color::DarkGray)),
            ));
        }
    }

    fn current_style(&self) -> Style {
        self.style_stack
            .iter()
            .fold(self.base, |style, s| style.patch(*s))
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}
