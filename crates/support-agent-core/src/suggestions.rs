/// Icon shown next to a suggested prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionIcon {
    Wrench,
    CreditCard,
    HelpCircle,
    Zap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub text: &'static str,
    pub icon: SuggestionIcon,
}

/// Prompts offered on an empty conversation, in display order
pub static SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        text: "I can't login to my account",
        icon: SuggestionIcon::Wrench,
    },
    Suggestion {
        text: "I need help with my billing",
        icon: SuggestionIcon::CreditCard,
    },
    Suggestion {
        text: "How do I change my password?",
        icon: SuggestionIcon::HelpCircle,
    },
    Suggestion {
        text: "My app is crashing on startup",
        icon: SuggestionIcon::Zap,
    },
];
