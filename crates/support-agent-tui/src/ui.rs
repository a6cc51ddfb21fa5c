use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use support_agent_core::{
    CategoryIcon, Message, Role, SentimentBadge, SuggestionIcon, SUGGESTIONS,
};

use crate::app::{App, InputMode};
use crate::markdown::render_markdown;

const WELCOME_TITLE: &str = "How can I help you?";
const WELCOME_SUBTITLE: &str = "I can assist with technical issues, billing questions, and general inquiries. Choose a topic or type your question below.";
const DISCLAIMER: &str = "AI responses are generated and may not always be accurate";
const PLACEHOLDER: &str = "Type your message...";

fn suggestion_glyph(icon: SuggestionIcon) -> &'static str {
    match icon {
        SuggestionIcon::Wrench => "🔧",
        SuggestionIcon::CreditCard => "💳",
        SuggestionIcon::HelpCircle => "❓",
        SuggestionIcon::Zap => "⚡",
    }
}

fn category_glyph(icon: CategoryIcon) -> &'static str {
    match icon {
        CategoryIcon::Technical => "🔧",
        CategoryIcon::Billing => "💳",
        CategoryIcon::General => "❓",
    }
}

fn sentiment_style(badge: SentimentBadge) -> Style {
    match badge {
        SentimentBadge::Positive => Style::default().fg(Color::Black).bg(Color::Green),
        SentimentBadge::Negative => Style::default().fg(Color::White).bg(Color::Red),
        SentimentBadge::Neutral => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, chat, input, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .areas(area);

    render_header(frame, header_area);

    if app.conversation.is_empty() {
        render_welcome(app, frame, chat_area);
    } else {
        render_messages(app, frame, chat_area);
    }

    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Support Agent ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::styled(
            "Powered by AI · Always here to help",
            Style::default().fg(Color::Gray),
        ),
    ]);
    let badge = Line::from(Span::styled(
        " ✦ AI ",
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    ));

    let style = Style::default().bg(Color::DarkGray);
    frame.render_widget(Paragraph::new(title).style(style), area);
    frame.render_widget(
        Paragraph::new(badge).alignment(Alignment::Right).style(style),
        area,
    );
}

fn chat_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_welcome(app: &mut App, frame: &mut Frame, area: Rect) {
    app.chat_area = Some(area);

    let block = chat_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [intro_area, list_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(0),
    ])
    .areas(inner);

    let intro = Text::from(vec![
        Line::default(),
        Line::styled(WELCOME_TITLE, Style::default().fg(Color::Cyan).bold()),
        Line::styled(WELCOME_SUBTITLE, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(
        Paragraph::new(intro)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        intro_area,
    );

    let items: Vec<ListItem> = SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} ", suggestion_glyph(s.icon))),
                Span::raw(s.text),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    // Highlight only matters while navigating in normal mode
    if app.input_mode == InputMode::Normal {
        frame.render_stateful_widget(list, list_area, &mut app.suggestion_state);
    } else {
        frame.render_widget(list, list_area);
    }
}

fn message_lines(msg: &Message) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    match msg.role {
        Role::User => {
            lines.push(Line::styled(
                "You:",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            // User text is shown verbatim, never as markdown
            for line in msg.content.lines() {
                lines.push(Line::raw(line.to_string()));
            }
        }
        Role::Assistant => {
            lines.push(Line::styled(
                "Agent:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));

            if msg.is_rate_limited() {
                let notice = Style::default().fg(Color::LightYellow);
                lines.push(Line::styled(
                    "⏳ Slow down!",
                    notice.add_modifier(Modifier::BOLD),
                ));
                lines.push(Line::styled(msg.content.clone(), notice));
            } else if msg.is_error() {
                let error = Style::default().fg(Color::LightRed);
                lines.extend(render_markdown(&msg.content, error));
            } else {
                lines.extend(render_markdown(&msg.content, Style::default()));
            }

            if msg.has_badges() {
                lines.push(badge_line(msg));
            }
        }
    }

    lines.push(Line::default());
    lines
}

fn badge_line(msg: &Message) -> Line<'static> {
    let mut spans = Vec::new();

    if let Some(category) = msg.category_label() {
        let glyph = category_glyph(CategoryIcon::classify(category));
        spans.push(Span::styled(
            format!(" {} {} ", glyph, category),
            Style::default().fg(Color::White).bg(Color::Magenta),
        ));
    }
    if let Some(sentiment) = msg.sentiment_label() {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} ", sentiment),
            sentiment_style(SentimentBadge::classify(sentiment)),
        ));
    }

    Line::from(spans)
}

fn render_messages(app: &mut App, frame: &mut Frame, area: Rect) {
    app.chat_area = Some(area);

    let mut lines: Vec<Line> = app
        .conversation
        .messages()
        .iter()
        .flat_map(message_lines)
        .collect();

    if app.conversation.is_pending() {
        lines.push(Line::styled(
            "Agent:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        // Animated dots: cycles through one, two, three
        let dots = "●".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::styled(
            format!("Agent is typing {}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));
    }

    let block = chat_block();
    let inner = block.inner(area);

    let chat = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

    // Keep the newest entry in view unless the user scrolled away
    app.max_scroll = max_scroll(chat.line_count(inner.width), inner.height);
    if app.follow_latest {
        app.scroll = app.max_scroll;
    } else {
        app.scroll = app.scroll.min(app.max_scroll);
    }

    frame.render_widget(chat.block(block).scroll((app.scroll, 0)), area);
}

/// Furthest scroll offset for `total` wrapped lines, saturating at `u16::MAX`
fn max_scroll(total: usize, height: u16) -> u16 {
    u16::try_from(total)
        .unwrap_or(u16::MAX)
        .saturating_sub(height)
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let pending = app.conversation.is_pending();
    let editing = app.input_mode == InputMode::Editing;

    let border_color = if pending {
        Color::DarkGray
    } else if editing {
        Color::Yellow
    } else {
        Color::Gray
    };
    let title = if pending {
        " Waiting for reply... "
    } else if app.conversation.can_submit() {
        " Message (Enter to send) "
    } else {
        " Message "
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let draft = app.conversation.draft();

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.draft_cursor;

    // Scroll horizontally to keep the cursor visible
    let scroll_offset = if inner_width == 0 || cursor_pos < inner_width {
        0
    } else {
        cursor_pos - inner_width + 1
    };

    let input = if draft.is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        let visible_text: String = draft.chars().skip(scroll_offset).take(inner_width).collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_text, mode_style) = match app.input_mode {
        InputMode::Normal => (" NORMAL ", Style::default().bg(Color::Blue).fg(Color::White)),
        InputMode::Editing => (" TYPING ", Style::default().bg(Color::Yellow).fg(Color::Black)),
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match app.input_mode {
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" stop typing ", label_style),
        ],
        InputMode::Normal if app.conversation.is_empty() => vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" choose ", label_style),
            Span::styled(" 1-4 ", key_style),
            Span::styled(" ask ", label_style),
            Span::styled(" i ", key_style),
            Span::styled(" type ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        InputMode::Normal => vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" g/G ", key_style),
            Span::styled(" top/bottom ", label_style),
            Span::styled(" i ", key_style),
            Span::styled(" type ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let [hints_area, disclaimer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(footer_content).style(Style::default().bg(Color::Black)),
        hints_area,
    );
    frame.render_widget(
        Paragraph::new(DISCLAIMER)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        disclaimer_area,
    );
}
