//! Prompt construction for the generative-text service.

use crate::library::ContentLibrary;
use crate::types::{Detail, TitleStyle, TopicCategory};
use serde::{Deserialize, Serialize};

/// Sampling parameters sent along with a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampling {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 4000,
            top_p: 0.9,
        }
    }
}

/// Builds the prompt for one generation attempt.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    topic: &'a str,
    content_count: usize,
    category: TopicCategory,
    style: TitleStyle,
    detail: Detail,
}

impl<'a> PromptBuilder<'a> {
    /// Start a prompt for `content_count` content slides about `topic`.
    pub fn new(topic: &'a str, content_count: usize, category: TopicCategory) -> Self {
        Self {
            topic,
            content_count,
            category,
            style: TitleStyle::for_content_count(content_count),
            detail: Detail::Standard,
        }
    }

    /// Set the bullet density.
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Override the title style.
    pub fn with_title_style(mut self, style: TitleStyle) -> Self {
        self.style = style;
        self
    }

    /// Build the prompt, preferring the library's specialized template.
    pub fn build(&self, library: &dyn ContentLibrary) -> String {
        library
            .prompt(
                self.topic,
                self.content_count,
                self.category,
                self.style,
                self.detail,
            )
            .unwrap_or_else(|| self.generic())
    }

    /// The generic template used for every topic without a specialized one.
    pub fn generic(&self) -> String {
        let bullets = self.detail.bullets_per_slide();
        let title_tone = match self.style {
            TitleStyle::Short => "creative and engaging",
            TitleStyle::Descriptive => "professional and structured",
        };

        let mut prompt = format!(
            "You are an expert in {category}. Create EXACTLY {count} completely different slides about \"{topic}\".\n\
             \n\
             Each slide must have:\n\
             - A unique title ({title_tone})\n\
             - {bullets} bullet points with SPECIFIC, FACTUAL information\n\
             - NO repetitive content between slides\n\
             - Real data, statistics, examples, and case studies\n\
             \n\
             Make each slide focus on a completely different aspect of {topic}.\n\
             \n\
             FORMAT:\n\
             SLIDE 2: CONTENT\n\
             Title: [unique title]\n\
             • [specific fact with data/statistics - 50+ words]\n\
             • [real-world example with companies/case studies - 50+ words]\n\
             • [technical detail with processes/methods - 50+ words]\n\
             • [actionable insight with recommendations - 50+ words]\n",
            category = self.category,
            count = self.content_count,
            topic = self.topic,
        );

        if bullets == 5 {
            prompt.push_str("• [advanced insight with future trends - 50+ words]\n");
        }

        prompt.push_str(&format!(
            "\nContinue for {} slides with completely different content.",
            self.content_count
        ));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{AprioriLibrary, GenericLibrary};

    #[test]
    fn test_generic_prompt_mentions_count_and_markers() {
        let prompt = PromptBuilder::new("urban beekeeping", 4, TopicCategory::General)
            .build(&GenericLibrary);

        assert!(prompt.starts_with("You are an expert in general."));
        assert!(prompt.contains("Create EXACTLY 4 completely different slides about \"urban beekeeping\""));
        assert!(prompt.contains("SLIDE 2: CONTENT\nTitle: [unique title]\n•"));
        assert!(prompt.contains("- 4 bullet points"));
        assert!(prompt.contains("creative and engaging"));
        assert!(!prompt.contains("advanced insight"));
    }

    #[test]
    fn test_extended_detail_asks_for_five_bullets() {
        let prompt = PromptBuilder::new("Rust", 12, TopicCategory::Technology)
            .with_detail(Detail::Extended)
            .generic();

        assert!(prompt.contains("- 5 bullet points"));
        assert!(prompt.contains("advanced insight with future trends"));
        assert!(prompt.contains("professional and structured"));
    }

    #[test]
    fn test_library_prompt_takes_precedence() {
        let prompt = PromptBuilder::new("Apriori algorithm", 4, TopicCategory::Technology)
            .build(&AprioriLibrary);
        assert!(prompt.starts_with("You are a Data Mining expert professor."));
    }

    #[test]
    fn test_default_sampling() {
        let sampling = Sampling::default();
        assert_eq!(sampling.max_output_tokens, 4000);
        assert!((sampling.temperature - 0.7).abs() < f32::EPSILON);
    }
}
