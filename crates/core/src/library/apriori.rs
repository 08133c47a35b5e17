//! Pre-written content for decks about the Apriori algorithm.

use super::{ContentLibrary, GenericLibrary};
use crate::types::{Detail, Slide, TitleStyle, TopicCategory};

const KEYWORD: &str = "apriori";

struct PrewrittenSlide {
    short_title: &'static str,
    descriptive_title: &'static str,
    bullets: [&'static str; 4],
    /// Fifth bullet, only shown in extended detail.
    extra: &'static str,
}

static SLIDES: [PrewrittenSlide; 5] = [
    PrewrittenSlide {
        short_title: "Understanding the Apriori Principle Foundation",
        descriptive_title: "Fundamental Concepts and Core Principles of the Apriori Principle",
        bullets: [
            "The Apriori principle, formulated by Rakesh Agrawal and Ramakrishnan Srikant in 1994, establishes that if an itemset is frequent in a transaction database, then all of its subsets must also be frequent. This anti-monotone property forms the theoretical foundation for efficient association rule mining algorithms.",
            "Mathematical formalization states that for itemsets X and Y, if support(X ∪ Y) ≥ minimum support threshold, then support(X) ≥ minimum support and support(Y) ≥ minimum support. This downward closure property enables systematic pruning of the exponential search space.",
            "The algorithm operates through iterative passes over the transaction database: Pass 1 identifies all frequent 1-itemsets, Pass 2 generates candidate 2-itemsets from frequent 1-itemsets and tests their frequency, continuing until no new frequent itemsets can be discovered.",
            "Support and confidence metrics quantify association strength: Support(A → B) = P(A ∪ B) measures how often itemsets appear together, while Confidence(A → B) = P(B|A) = Support(A ∪ B)/Support(A) indicates the reliability of the association rule.",
        ],
        extra: "Lift metric provides additional insight by measuring how much more likely B occurs when A is present compared to when A is absent: Lift(A → B) = Confidence(A → B)/Support(B), with values greater than 1 indicating positive correlation.",
    },
    PrewrittenSlide {
        short_title: "Apriori Algorithm Implementation Mechanics",
        descriptive_title: "Technical Implementation and Best Practices of the Apriori Principle",
        bullets: [
            "The join step systematically combines frequent (k-1)-itemsets to generate candidate k-itemsets by merging itemsets that share the same first (k-2) items but differ in their last item, ensuring complete coverage without generating duplicate candidates.",
            "The prune step applies the Apriori principle to eliminate candidate k-itemsets that contain any infrequent (k-1)-subset, typically reducing the candidate space by 70-90% in sparse transaction databases and significantly improving computational efficiency.",
            "Hash tree data structures optimize the support counting phase by organizing candidate itemsets in a tree structure that enables efficient subset operations, reducing the time complexity of checking which candidates are contained in each transaction.",
            "Transaction reduction techniques progressively eliminate transactions from consideration if they cannot possibly contain any frequent k-itemsets, shrinking the effective database size by 40-60% in later algorithm iterations and accelerating processing.",
        ],
        extra: "Memory management strategies include candidate itemset compression, incremental database scanning, and vertical data format representation to handle large-scale datasets that exceed available system memory while maintaining algorithm correctness.",
    },
    PrewrittenSlide {
        short_title: "Real-World Apriori Success Stories",
        descriptive_title: "Industry Applications and Case Studies of the Apriori Principle",
        bullets: [
            "Walmart applies Apriori-based market basket analysis to process over 267 million customer transactions weekly, discovering unexpected product associations such as the famous \"beer and diapers\" correlation with 32% lift, leading to strategic product placement that increased cross-selling revenue by $1.2 billion annually.",
            "Amazon leverages Apriori principles in their recommendation engine to analyze billions of customer browsing and purchasing sessions, identifying item association patterns that drive their \"customers who bought this item also bought\" feature, contributing to approximately 35% of total company sales revenue.",
            "JPMorgan Chase employs Apriori algorithms for fraud detection by analyzing transaction patterns across 5 billion monthly transactions, identifying suspicious activity combinations with 94% accuracy and preventing an estimated $2.3 billion in fraudulent transactions through early detection systems.",
            "Netflix utilizes modified Apriori techniques on viewing pattern data containing 200+ million subscriber interactions daily, discovering genre and content associations that improved recommendation accuracy by 28% and reduced customer churn by 15% through personalized content suggestions.",
        ],
        extra: "Pharmaceutical companies apply Apriori to adverse drug reaction databases containing 15+ million reports, identifying dangerous drug interaction patterns that led to 23 new FDA safety warnings and prevented an estimated 50,000 serious adverse events annually.",
    },
    PrewrittenSlide {
        short_title: "Apriori Performance and Modern Alternatives",
        descriptive_title: "Performance Optimization and Scalability Challenges of the Apriori Principle",
        bullets: [
            "Scalability limitations emerge with large itemset spaces: for datasets containing 1,000 unique items, the potential number of 2-itemsets reaches 499,500 combinations, creating exponential memory and computational requirements that challenge traditional Apriori implementations on standard hardware.",
            "FP-Growth algorithm addresses Apriori limitations by eliminating candidate generation entirely, using compressed Frequent Pattern trees and recursive pattern mining to achieve 10x performance improvements while maintaining identical result sets for association rule discovery.",
            "Distributed implementations using Apache Spark and Hadoop MapReduce enable Apriori processing of petabyte-scale transaction databases across thousands of compute nodes, with major technology companies achieving 95% parallel efficiency on datasets containing billions of transaction records.",
            "Memory optimization techniques include transaction projection to remove infrequent items early, vertical database representation for efficient intersection operations, and incremental mining algorithms for real-time streaming data applications with bounded memory requirements.",
        ],
        extra: "Modern variants include Eclat using vertical tidset intersections, CHARM incorporating closed itemset mining to reduce output size by 90%, and parallel algorithms designed for GPU computing achieving 100x speedups on dense transaction datasets.",
    },
    PrewrittenSlide {
        short_title: "Future of Apriori and Association Mining",
        descriptive_title: "Advanced Variations and Future Trends of the Apriori Principle",
        bullets: [
            "Machine learning integration combines Apriori with deep learning models to discover complex, non-linear associations in high-dimensional data spaces, enabling pattern discovery in image, text, and sensor data that traditional itemset mining cannot effectively process.",
            "Stream mining adaptations handle continuous data flows from IoT devices and social media platforms, processing millions of transactions per second while maintaining approximate frequent itemsets within bounded error margins using sliding window and landmark window techniques.",
            "Privacy-preserving extensions implement differential privacy and secure multi-party computation protocols, allowing collaborative association rule mining across organizations while protecting sensitive transaction data and maintaining regulatory compliance requirements.",
            "Temporal association mining incorporates time-based constraints to discover sequential patterns and seasonal trends, revealing how purchasing behaviors and user interactions evolve over time with applications in supply chain optimization and customer lifecycle management.",
        ],
        extra: "Quantum computing applications explore exponential speedups for itemset enumeration problems, with early research demonstrating potential 1000x performance improvements for specific association mining tasks using quantum superposition and entanglement principles.",
    },
];

/// Titles handed to parsed blocks that arrived without one.
const PARSED_TITLES: [&str; 5] = [
    "Fundamental Apriori Algorithm Concepts",
    "Implementation and Technical Details",
    "Real-World Applications and Case Studies",
    "Performance Optimization Techniques",
    "Advanced Variations and Extensions",
];

const FILLER_BULLETS: [&str; 4] = [
    "The Apriori principle leverages the downward closure property of frequent itemsets, stating that all subsets of a frequent itemset must also be frequent, enabling efficient pruning of the exponential search space.",
    "Implementation involves iterative database scans where each pass k generates candidate k-itemsets from frequent (k-1)-itemsets, followed by support counting and pruning steps.",
    "Performance optimization includes hash tree structures for efficient subset checking, transaction reduction techniques, and parallel processing approaches for large-scale datasets.",
    "Real applications span retail market basket analysis, web usage mining, bioinformatics sequence analysis, and fraud detection systems across various industries.",
];

/// Example slides embedded in the specialized prompt: (short title, descriptive title, bullets).
static PROMPT_EXAMPLES: [(&str, &str, [&str; 4]); 4] = [
    (
        "Core Concepts of the Apriori Principle",
        "Fundamental Concepts and Core Principles of the Apriori Principle",
        [
            "The Apriori principle, introduced by Rakesh Agrawal and Ramakrishnan Srikant in 1994, states that if an itemset is frequent, then all of its subsets must also be frequent. This anti-monotone property enables efficient pruning of candidate itemsets during association rule mining.",
            "Mathematical foundation: If support(X ∪ Y) ≥ min_support, then support(X) ≥ min_support and support(Y) ≥ min_support. This downward closure property allows the algorithm to eliminate exponential search spaces.",
            "The algorithm operates in iterative passes: Pass 1 identifies frequent 1-itemsets, Pass 2 generates candidate 2-itemsets from frequent 1-itemsets, continuing until no frequent k-itemsets can be found.",
            "Support and confidence are key metrics: Support(X → Y) = P(X ∪ Y) measures itemset frequency, while Confidence(X → Y) = Support(X ∪ Y)/Support(X) measures association strength.",
        ],
    ),
    (
        "Apriori Algorithm Implementation Details",
        "Technical Implementation and Best Practices of the Apriori Principle",
        [
            "The join step combines frequent (k-1)-itemsets to generate candidate k-itemsets by merging itemsets that differ only in their last item, ensuring systematic candidate generation without duplicates.",
            "The prune step eliminates candidates containing infrequent (k-1)-subsets using the Apriori principle, reducing computational overhead by 70-90% in typical sparse transaction databases.",
            "Hash tree data structures optimize subset checking during support counting, reducing time complexity from O(n×m) to O(log n×m) where n is candidates and m is transactions.",
            "Transaction reduction techniques eliminate transactions that cannot contain frequent k-itemsets after each pass, shrinking database size by 40-60% in later iterations.",
        ],
    ),
    (
        "Real-World Apriori Applications",
        "Industry Applications and Case Studies of the Apriori Principle",
        [
            "Market basket analysis at Walmart processes 267 million weekly transactions using Apriori variants, discovering product associations like \"beer and diapers\" with 32% lift, increasing cross-selling revenue by $1.2 billion annually.",
            "Web usage mining at Amazon applies Apriori to clickstream data containing billions of user sessions, identifying navigation patterns that drive 35% of total sales through \"customers who bought this also bought\" recommendations.",
            "Fraud detection systems at major banks use Apriori on transaction patterns, analyzing 5 billion monthly transactions to identify suspicious activity with 94% accuracy, preventing $2.3 billion in fraudulent transactions.",
            "Bioinformatics research applies Apriori to protein sequence analysis, processing datasets with millions of sequences to discover functional motifs, contributing to drug discovery with 15+ FDA-approved medications.",
        ],
    ),
    (
        "Apriori Performance and Optimization",
        "Performance Optimization and Scalability Challenges of the Apriori Principle",
        [
            "Scalability challenges: Traditional Apriori struggles with dense datasets due to exponential candidate generation - with 1000 items, potential 2-itemsets reach 499,500 combinations, requiring optimized memory management.",
            "FP-Growth algorithm eliminates candidate generation entirely, achieving 10x speedup over Apriori by using compressed FP-tree structures and recursive mining patterns without multiple database scans.",
            "Parallel implementations using MapReduce process petabyte-scale datasets across 1000+ nodes, with Google's distributed Apriori achieving 95% efficiency on transaction databases containing billions of records.",
            "Memory optimization techniques include transaction projection, vertical database formats, and incremental mining for streaming data, reducing memory footprint by 80% while maintaining algorithm correctness.",
        ],
    ),
];

/// Library for topics mentioning "apriori".
///
/// Holds five fully written slides. Decks asking for more continue with
/// generic slides so the requested count can always be met.
#[derive(Debug, Clone, Copy, Default)]
pub struct AprioriLibrary;

impl ContentLibrary for AprioriLibrary {
    fn name(&self) -> &'static str {
        "apriori"
    }

    fn matches(&self, topic: &str) -> bool {
        topic.to_lowercase().contains(KEYWORD)
    }

    fn content_slide(&self, topic: &str, index: usize, style: TitleStyle, detail: Detail) -> Slide {
        let Some(prewritten) = SLIDES.get(index) else {
            return GenericLibrary.content_slide(topic, index, style, detail);
        };

        let title = match style {
            TitleStyle::Short => prewritten.short_title,
            TitleStyle::Descriptive => prewritten.descriptive_title,
        };
        let mut bullets: Vec<String> = prewritten.bullets.iter().map(|b| b.to_string()).collect();
        if detail == Detail::Extended {
            bullets.push(prewritten.extra.to_string());
        }

        Slide::content(title, bullets)
    }

    fn fallback_title(&self, _topic: &str, index: usize, style: TitleStyle) -> String {
        match style {
            TitleStyle::Short => PARSED_TITLES[index % PARSED_TITLES.len()].to_string(),
            TitleStyle::Descriptive => SLIDES[index % SLIDES.len()].descriptive_title.to_string(),
        }
    }

    fn filler_bullets(&self, _topic: &str) -> Vec<String> {
        FILLER_BULLETS.iter().map(|b| b.to_string()).collect()
    }

    fn prompt(
        &self,
        topic: &str,
        content_count: usize,
        _category: TopicCategory,
        style: TitleStyle,
        _detail: Detail,
    ) -> Option<String> {
        let mut prompt = format!(
            "You are a Data Mining expert professor. Create EXACTLY {} completely different slides \
             about \"{}\". Each slide must cover a UNIQUE aspect with SPECIFIC details.\n\n",
            content_count, topic
        );

        // The fourth example is only shown when the deck has room for it.
        let shown = if content_count > 3 { 4 } else { 3 };
        for (offset, (short, descriptive, bullets)) in PROMPT_EXAMPLES.iter().take(shown).enumerate() {
            let title = match style {
                TitleStyle::Short => short,
                TitleStyle::Descriptive => descriptive,
            };
            prompt.push_str(&format!("SLIDE {}: CONTENT\nTitle: {}\n", offset + 2, title));
            for bullet in bullets {
                prompt.push_str("• ");
                prompt.push_str(bullet);
                prompt.push('\n');
            }
            prompt.push('\n');
        }

        prompt.push_str(&format!(
            "Generate {} slides with completely different content for each slide.",
            content_count
        ));
        Some(prompt)
    }
}
