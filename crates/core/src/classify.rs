//! Topic classification.

use crate::types::TopicCategory;

const HEALTH_KEYWORDS: &[&str] = &["health", "medical"];

const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "technology",
    "software",
    "programming",
    "ai",
    "data",
    "mining",
    "algorithm",
    "apriori",
];

const BUSINESS_KEYWORDS: &[&str] = &["business", "marketing"];

/// Categorize a free-text topic.
///
/// Keywords are matched as case-insensitive substrings, checked in the
/// order health, technology, business. Anything else is `General`.
pub fn classify_topic(topic: &str) -> TopicCategory {
    let lower = topic.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(HEALTH_KEYWORDS) {
        TopicCategory::Health
    } else if contains_any(TECHNOLOGY_KEYWORDS) {
        TopicCategory::Technology
    } else if contains_any(BUSINESS_KEYWORDS) {
        TopicCategory::Business
    } else {
        TopicCategory::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_category() {
        assert_eq!(classify_topic("Medical imaging"), TopicCategory::Health);
        assert_eq!(classify_topic("Apriori algorithm"), TopicCategory::Technology);
        assert_eq!(classify_topic("Content MARKETING"), TopicCategory::Business);
        assert_eq!(classify_topic("urban beekeeping"), TopicCategory::General);
    }

    #[test]
    fn test_health_wins_over_technology() {
        assert_eq!(classify_topic("Health data platforms"), TopicCategory::Health);
    }

    #[test]
    fn test_technology_wins_over_business() {
        assert_eq!(classify_topic("Software business models"), TopicCategory::Technology);
    }

    #[test]
    fn test_substring_matching_is_loose() {
        // "ai" appears inside "sustainable".
        assert_eq!(classify_topic("Sustainable farming"), TopicCategory::Technology);
    }
}
