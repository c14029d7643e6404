//! SEO metrics fixture and content recommendations
//!
//! The metrics are a fixed, read-only dataset. Nothing creates, updates or
//! deletes them, and deleting a blog post leaves its metric entry in place.

use serde::{Deserialize, Serialize};

use crate::store::Lookup;

pub const MIN_TITLE_CHARS: usize = 30;
pub const MIN_CONTENT_CHARS: usize = 300;
pub const MIN_KEYWORDS: usize = 3;

pub const TITLE_TOO_SHORT: &str =
    "Consider making your title longer (at least 30 characters) to improve click-through rates.";
pub const CONTENT_TOO_SHORT: &str = "Your content is quite short. \
    Aim for at least 300 characters to give search engines more context.";
pub const TOO_FEW_KEYWORDS: &str =
    "Add more target keywords (at least 3) to broaden the search terms this post can rank for.";
pub const META_DESCRIPTION: &str =
    "Add a meta description that summarizes the post in 150-160 characters.";
pub const HEADER_STRUCTURE: &str =
    "Structure your content with headers (H2, H3) to improve readability and keyword relevance.";
pub const INTERNAL_LINKING: &str =
    "Link to related tools and posts on the site to strengthen internal linking.";

/// Trend of a metric compared to the previous period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Neutral,
}

impl std::fmt::Display for ChangeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeDirection::Up => "up",
            ChangeDirection::Down => "down",
            ChangeDirection::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Search performance of one blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetric {
    pub post_id: String,
    pub title: String,
    pub score: u32,
    pub clicks: u64,
    pub impressions: u64,
    pub position: f64,
    pub change: ChangeDirection,
    pub change_percent: f64,
}

/// Aggregate view over a set of metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoSummary {
    pub total_posts: usize,
    pub total_clicks: u64,
    pub total_impressions: u64,
    pub click_through_rate: f64,
    pub average_score: f64,
    pub average_position: f64,
    pub trending_up: usize,
    pub trending_down: usize,
    pub neutral: usize,
}

/// The fixed metrics dataset
pub fn fixture_metrics() -> Vec<SeoMetric> {
    vec![
        SeoMetric {
            post_id: "1".to_string(),
            title: "Getting the most out of the unit converter".to_string(),
            score: 85,
            clicks: 1240,
            impressions: 15600,
            position: 3.2,
            change: ChangeDirection::Up,
            change_percent: 12.5,
        },
        SeoMetric {
            post_id: "2".to_string(),
            title: "Five text tools that save time every day".to_string(),
            score: 72,
            clicks: 890,
            impressions: 12300,
            position: 5.7,
            change: ChangeDirection::Down,
            change_percent: 3.2,
        },
        SeoMetric {
            post_id: "3".to_string(),
            title: "Formatting and validating JSON in the browser".to_string(),
            score: 68,
            clicks: 540,
            impressions: 8900,
            position: 8.1,
            change: ChangeDirection::Neutral,
            change_percent: 0.0,
        },
    ]
}

pub fn find_metric(metrics: &[SeoMetric], post_id: &str) -> Lookup<SeoMetric> {
    metrics
        .iter()
        .find(|m| m.post_id == post_id)
        .cloned()
        .into()
}

/// Build content recommendations for a draft post
///
/// Conditional rules run first, in fixed order: title length, content
/// length, keyword count. The three generic recommendations always follow.
/// Lengths are counted in characters and all thresholds are strict.
pub fn generate_recommendations<S: AsRef<str>>(
    content: &str,
    title: &str,
    keywords: &[S],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if title.chars().count() < MIN_TITLE_CHARS {
        recommendations.push(TITLE_TOO_SHORT.to_string());
    }

    if content.chars().count() < MIN_CONTENT_CHARS {
        recommendations.push(CONTENT_TOO_SHORT.to_string());
    }

    if keywords.len() < MIN_KEYWORDS {
        recommendations.push(TOO_FEW_KEYWORDS.to_string());
    }

    recommendations.extend(
        [META_DESCRIPTION, HEADER_STRUCTURE, INTERNAL_LINKING]
            .iter()
            .map(|r| r.to_string()),
    );

    recommendations
}

pub fn summarize(metrics: &[SeoMetric]) -> SeoSummary {
    let total_clicks: u64 = metrics.iter().map(|m| m.clicks).sum();
    let total_impressions: u64 = metrics.iter().map(|m| m.impressions).sum();
    let count = |direction: ChangeDirection| {
        metrics
            .iter()
            .filter(|m| m.change == direction)
            .count()
    };

    let (average_score, average_position) = if metrics.is_empty() {
        (0.0, 0.0)
    } else {
        let n = metrics.len() as f64;
        (
            metrics.iter().map(|m| m.score as f64).sum::<f64>() / n,
            metrics.iter().map(|m| m.position).sum::<f64>() / n,
        )
    };

    let click_through_rate = if total_impressions == 0 {
        0.0
    } else {
        total_clicks as f64 / total_impressions as f64
    };

    SeoSummary {
        total_posts: metrics.len(),
        total_clicks,
        total_impressions,
        click_through_rate,
        average_score,
        average_position,
        trending_up: count(ChangeDirection::Up),
        trending_down: count(ChangeDirection::Down),
        neutral: count(ChangeDirection::Neutral),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED: [&str; 3] = [META_DESCRIPTION, HEADER_STRUCTURE, INTERNAL_LINKING];

    // ============================================================================
    // generate_recommendations tests
    // ============================================================================

    #[test]
    fn test_recommendations_empty_input() {
        let keywords: [&str; 0] = [];
        let recs = generate_recommendations("", "", &keywords);

        assert_eq!(
            recs,
            vec![
                TITLE_TOO_SHORT,
                CONTENT_TOO_SHORT,
                TOO_FEW_KEYWORDS,
                META_DESCRIPTION,
                HEADER_STRUCTURE,
                INTERNAL_LINKING,
            ]
        );
    }

    #[test]
    fn test_recommendations_complete_input() {
        let title = "t".repeat(40);
        let content = "c".repeat(500);
        let keywords = ["a", "b", "c", "d", "e"];

        assert_eq!(generate_recommendations(&content, &title, &keywords), FIXED);
    }

    #[test]
    fn test_recommendations_thresholds_are_strict() {
        let title = "t".repeat(MIN_TITLE_CHARS);
        let content = "c".repeat(MIN_CONTENT_CHARS);
        let keywords = ["a", "b", "c"];

        assert_eq!(generate_recommendations(&content, &title, &keywords), FIXED);
    }

    #[test]
    fn test_recommendations_one_below_threshold() {
        let title = "t".repeat(MIN_TITLE_CHARS - 1);
        let content = "c".repeat(MIN_CONTENT_CHARS);
        let keywords = ["a", "b"];

        let recs = generate_recommendations(&content, &title, &keywords);
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0], TITLE_TOO_SHORT);
        assert_eq!(recs[1], TOO_FEW_KEYWORDS);
        assert_eq!(&recs[2..], FIXED);
    }

    #[test]
    fn test_recommendations_count_characters_not_bytes() {
        // 30 characters, 60 bytes
        let title = "é".repeat(30);
        let content = "c".repeat(MIN_CONTENT_CHARS);
        let keywords = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        assert_eq!(generate_recommendations(&content, &title, &keywords), FIXED);
    }

    // ============================================================================
    // fixture and summary tests
    // ============================================================================

    #[test]
    fn test_find_metric() {
        let metrics = fixture_metrics();
        assert_eq!(
            find_metric(&metrics, "2").map(|m| m.score),
            Lookup::Found(72)
        );
        assert_eq!(find_metric(&metrics, "404"), Lookup::NotFound);
    }

    #[test]
    fn test_change_direction_serializes_lowercase() {
        let json = serde_json::to_value(&fixture_metrics()[0]).unwrap();
        assert_eq!(json["change"], "up");
        assert_eq!(json["postId"], "1");
    }

    #[test]
    fn test_summarize_fixture() {
        let summary = summarize(&fixture_metrics());

        assert_eq!(summary.total_posts, 3);
        assert_eq!(summary.total_clicks, 2670);
        assert_eq!(summary.total_impressions, 36800);
        assert!((summary.average_score - 75.0).abs() < 1e-9);
        assert!((summary.average_position - 17.0 / 3.0).abs() < 1e-9);
        assert!((summary.click_through_rate - 2670.0 / 36800.0).abs() < 1e-9);
        assert_eq!(
            (summary.trending_up, summary.trending_down, summary.neutral),
            (1, 1, 1)
        );
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_posts, 0);
        assert_eq!(summary.click_through_rate, 0.0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.average_position, 0.0);
    }
}
