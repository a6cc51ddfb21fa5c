use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use support_agent_core::{ChatClient, ChatError, ChatReply, ChatRequest, ConversationState, SUGGESTIONS};
use tracing::debug;

use crate::tui::{AppEvent, EventSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,

    pub conversation: ConversationState,
    pub client: ChatClient,
    pub draft_cursor: usize, // char index into the draft

    // Welcome screen
    pub suggestion_state: ListState,

    // Chat scroll state, max_scroll and chat_area are refreshed on every render
    pub scroll: u16,
    pub max_scroll: u16,
    pub follow_latest: bool,
    pub chat_area: Option<Rect>,

    pub animation_frame: u8, // 0-2 for the typing indicator
}

impl App {
    pub fn new(client: ChatClient) -> Self {
        let mut suggestion_state = ListState::default();
        suggestion_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,

            conversation: ConversationState::new(),
            client,
            draft_cursor: 0,

            suggestion_state,

            scroll: 0,
            max_scroll: 0,
            follow_latest: true,
            chat_area: None,

            animation_frame: 0,
        }
    }

    /// Submit the draft. Does nothing while a reply is pending or the draft is blank.
    pub fn submit_draft(&mut self, tx: &EventSender) {
        if let Some(request) = self.conversation.submit(None) {
            self.draft_cursor = 0;
            self.dispatch(request, tx);
        }
    }

    pub fn select_suggestion(&mut self, index: usize, tx: &EventSender) {
        if let Some(request) = self.conversation.select_suggestion(index) {
            self.draft_cursor = 0;
            self.dispatch(request, tx);
        }
    }

    pub fn select_highlighted_suggestion(&mut self, tx: &EventSender) {
        if let Some(index) = self.suggestion_state.selected() {
            self.select_suggestion(index, tx);
        }
    }

    /// Send the request on a background task. Its settlement comes back
    /// through the event channel as `AppEvent::Reply`.
    fn dispatch(&mut self, request: ChatRequest, tx: &EventSender) {
        self.animation_frame = 0;
        self.scroll_to_bottom();

        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = client.send(&request).await;
            if tx.send(AppEvent::Reply(outcome)).is_err() {
                debug!("Event loop gone before reply arrived");
            }
        });
    }

    pub fn apply_reply(&mut self, outcome: Result<ChatReply, ChatError>) {
        if self.conversation.settle(outcome).is_some() {
            self.scroll_to_bottom();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.conversation.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll);
        if self.scroll >= self.max_scroll {
            self.follow_latest = true;
        }
    }

    pub fn scroll_up(&mut self) {
        if self.follow_latest {
            self.scroll = self.max_scroll;
        }
        self.follow_latest = false;
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_to_top(&mut self) {
        self.follow_latest = false;
        self.scroll = 0;
    }

    /// Re-attach to the newest entry; the next render pins the view there
    pub fn scroll_to_bottom(&mut self) {
        self.follow_latest = true;
        self.scroll = self.max_scroll;
    }

    pub fn suggestion_nav_down(&mut self) {
        let i = match self.suggestion_state.selected() {
            Some(i) => (i + 1).min(SUGGESTIONS.len() - 1),
            None => 0,
        };
        self.suggestion_state.select(Some(i));
    }

    pub fn suggestion_nav_up(&mut self) {
        let i = self.suggestion_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.suggestion_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::EventHandler;

    fn test_app() -> App {
        App::new(ChatClient::new("http://127.0.0.1:1/chat"))
    }

    #[test]
    fn test_new_app_starts_editing_on_welcome() {
        let app = test_app();
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.conversation.is_empty());
        assert_eq!(app.suggestion_state.selected(), Some(0));
        assert!(app.follow_latest);
    }

    #[test]
    fn test_suggestion_nav_clamps() {
        let mut app = test_app();
        app.suggestion_nav_up();
        assert_eq!(app.suggestion_state.selected(), Some(0));

        for _ in 0..10 {
            app.suggestion_nav_down();
        }
        assert_eq!(app.suggestion_state.selected(), Some(SUGGESTIONS.len() - 1));
    }

    #[test]
    fn test_scroll_detaches_and_reattaches() {
        let mut app = test_app();
        app.max_scroll = 5;
        app.scroll = 5;

        app.scroll_up();
        assert!(!app.follow_latest);
        assert_eq!(app.scroll, 4);

        app.scroll_down();
        assert!(app.follow_latest);
        assert_eq!(app.scroll, 5);

        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
        assert!(!app.follow_latest);
    }

    #[test]
    fn test_tick_only_animates_while_pending() {
        let mut app = test_app();
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);
    }

    #[tokio::test]
    async fn test_blank_draft_dispatches_nothing() {
        let mut app = test_app();
        let events = EventHandler::detached();

        app.conversation.set_draft("   ");
        app.submit_draft(&events.sender());

        assert!(app.conversation.is_empty());
        assert!(!app.conversation.is_pending());
    }

    #[tokio::test]
    async fn test_reply_reattaches_scroll() {
        let mut app = test_app();
        let events = EventHandler::detached();

        app.select_suggestion(0, &events.sender());
        assert!(app.conversation.is_pending());
        app.tick_animation();
        assert_eq!(app.animation_frame, 1);

        app.scroll_to_top();
        app.apply_reply(Ok(ChatReply::new("Let's reset your password.")));

        assert!(app.follow_latest);
        assert!(!app.conversation.is_pending());
        assert_eq!(app.conversation.messages().len(), 2);
    }
}
