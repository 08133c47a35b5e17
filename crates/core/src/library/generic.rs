//! Generic templated content for any topic.

use super::ContentLibrary;
use crate::types::{Detail, Slide, TitleStyle};

/// Aspect labels rotated through generic slide titles.
pub const ASPECT_LABELS: [&str; 10] = [
    "Introduction and Key Concepts",
    "Technical Implementation Details",
    "Real-World Applications",
    "Performance and Optimization",
    "Advanced Features and Benefits",
    "Industry Best Practices",
    "Case Studies and Examples",
    "Future Trends and Developments",
    "Expert Recommendations",
    "Strategic Implementation",
];

/// Boilerplate content parameterized by topic and aspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericLibrary;

impl GenericLibrary {
    fn aspect(index: usize) -> &'static str {
        ASPECT_LABELS[index % ASPECT_LABELS.len()]
    }

    fn bullets(topic: &str, aspect: &str, detail: Detail) -> Vec<String> {
        let aspect = aspect.to_lowercase();
        let mut bullets = vec![
            format!(
                "Professional analysis of {topic} with a focus on {aspect} demonstrates significant impact \
                 across industry sectors, with leading organizations reporting measurable improvements in \
                 operational efficiency, strategic outcomes, and competitive positioning through systematic \
                 implementation of evidence-based methodologies."
            ),
            format!(
                "Research findings indicate that {topic} applications deliver quantifiable benefits including \
                 enhanced performance metrics, cost optimization opportunities, and scalable solutions that \
                 address complex business challenges while maintaining compliance with industry standards and \
                 regulatory requirements."
            ),
            format!(
                "Expert recommendations emphasize the importance of structured approaches to {topic}, \
                 incorporating proven frameworks, stakeholder engagement strategies, and continuous improvement \
                 processes that ensure successful outcomes and sustainable value creation for organizations and \
                 end users."
            ),
            format!(
                "Implementation strategies for {topic} require comprehensive planning, resource allocation, and \
                 change management protocols that facilitate smooth adoption, minimize risks, and maximize return \
                 on investment through careful attention to technical requirements and organizational readiness \
                 factors."
            ),
        ];

        if detail == Detail::Extended {
            bullets.push(format!(
                "Future developments in {topic} indicate emerging opportunities for innovation, technological \
                 advancement, and market expansion that will shape industry landscapes and create new \
                 possibilities for organizations willing to invest in cutting-edge capabilities and strategic \
                 positioning."
            ));
        }

        bullets
    }
}

impl ContentLibrary for GenericLibrary {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _topic: &str) -> bool {
        true
    }

    fn content_slide(&self, topic: &str, index: usize, style: TitleStyle, detail: Detail) -> Slide {
        let aspect = Self::aspect(index);
        let title = match style {
            TitleStyle::Short => format!("{}: {}", topic, aspect),
            TitleStyle::Descriptive => format!("{} of {}", aspect, topic),
        };
        Slide::content(title, Self::bullets(topic, aspect, detail))
    }

    fn fallback_title(&self, topic: &str, index: usize, _style: TitleStyle) -> String {
        format!("{} - Key Aspect {}", topic, index + 1)
    }

    fn filler_bullets(&self, topic: &str) -> Vec<String> {
        vec![format!(
            "Important aspect of {} that provides valuable insights and practical applications for \
             professionals working in this field with measurable outcomes and strategic benefits.",
            topic
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_titles_rotate_aspects() {
        let library = GenericLibrary;
        let first = library.content_slide("urban beekeeping", 0, TitleStyle::Short, Detail::Standard);
        let eleventh =
            library.content_slide("urban beekeeping", 10, TitleStyle::Short, Detail::Standard);

        assert_eq!(first.title, "urban beekeeping: Introduction and Key Concepts");
        assert_eq!(eleventh.title, first.title);
    }

    #[test]
    fn test_descriptive_titles() {
        let slide = GenericLibrary.content_slide("Rust", 2, TitleStyle::Descriptive, Detail::Standard);
        assert_eq!(slide.title, "Real-World Applications of Rust");
    }

    #[test]
    fn test_bullet_count_follows_detail() {
        let library = GenericLibrary;
        let standard = library.content_slide("Rust", 0, TitleStyle::Short, Detail::Standard);
        let extended = library.content_slide("Rust", 0, TitleStyle::Short, Detail::Extended);

        assert_eq!(standard.bullets().len(), 4);
        assert_eq!(extended.bullets().len(), 5);
        assert!(standard.editable);
    }

    #[test]
    fn test_bullets_mention_topic_and_aspect() {
        let slide = GenericLibrary.content_slide("Rust", 1, TitleStyle::Short, Detail::Standard);
        assert!(slide.bullets()[0].contains("technical implementation details"));
        assert!(slide.bullets().iter().all(|b| b.contains("Rust")));
    }
}
