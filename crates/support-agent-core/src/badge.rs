//! Display-only classification of reply metadata.
//!
//! Both classifiers are case-insensitive substring matches over free text the
//! endpoint produces, so "Very Positive" and "positive." land on the same badge.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBadge {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBadge {
    pub fn classify(sentiment: &str) -> Self {
        let s = sentiment.to_lowercase();
        if s.contains("positive") {
            SentimentBadge::Positive
        } else if s.contains("negative") {
            SentimentBadge::Negative
        } else {
            SentimentBadge::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Technical,
    Billing,
    General,
}

impl CategoryIcon {
    pub fn classify(category: &str) -> Self {
        let c = category.to_lowercase();
        if c.contains("technical") {
            CategoryIcon::Technical
        } else if c.contains("billing") {
            CategoryIcon::Billing
        } else {
            CategoryIcon::General
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_substring_match() {
        assert_eq!(SentimentBadge::classify("Very Positive"), SentimentBadge::Positive);
        assert_eq!(SentimentBadge::classify("somewhat negative"), SentimentBadge::Negative);
        assert_eq!(SentimentBadge::classify("Neutral"), SentimentBadge::Neutral);
        assert_eq!(SentimentBadge::classify(""), SentimentBadge::Neutral);
    }

    #[test]
    fn test_positive_wins_over_negative() {
        assert_eq!(
            SentimentBadge::classify("positive, not negative"),
            SentimentBadge::Positive
        );
    }

    #[test]
    fn test_category_icon() {
        assert_eq!(CategoryIcon::classify("Technical"), CategoryIcon::Technical);
        assert_eq!(CategoryIcon::classify("'BILLING'"), CategoryIcon::Billing);
        assert_eq!(CategoryIcon::classify("General"), CategoryIcon::General);
        assert_eq!(CategoryIcon::classify("Shipping"), CategoryIcon::General);
    }
}
