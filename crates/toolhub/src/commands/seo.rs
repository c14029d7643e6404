use colored::Colorize;
use toolhub::service::SeoService;
use toolhub::Lookup;
use toolhub_core::seo::{ChangeDirection, SeoMetric, SeoSummary};

use super::{format_json, truncate_text, Global};
use crate::prelude::{println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "seo")]
#[command(about = "SEO metrics and content recommendations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List metrics for every tracked post
    #[clap(name = "metrics")]
    Metrics(OutputOptions),

    /// Show metrics for one post
    #[clap(name = "post")]
    Post(PostOptions),

    /// Aggregate clicks, impressions and trends
    #[clap(name = "summary")]
    Summary(OutputOptions),

    /// Suggest improvements for a draft post
    #[clap(name = "recommend")]
    Recommend(RecommendOptions),
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PostOptions {
    /// Blog post ID
    #[arg(value_name = "POST_ID")]
    pub post_id: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RecommendOptions {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub content: String,

    /// Comma-separated list of target keywords, counted as given
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    #[clap(flatten)]
    pub output: OutputOptions,
}

pub async fn run(app: App, global: Global) -> Result<()> {
    let seo = SeoService::new(global.config());

    match app.command {
        Commands::Metrics(output) => {
            let metrics = seo.get_all_metrics().await;
            if output.json {
                println!("{}", format_json(&metrics)?);
            } else {
                println!("{}", format_metrics_text(&metrics));
            }
        }
        Commands::Post(options) => {
            let metric = seo.get_metrics_for_post(&options.post_id).await;
            match (&metric, options.output.json) {
                (_, true) => println!("{}", format_json(&metric)?),
                (Lookup::Found(metric), false) => {
                    println!("{}", format_metrics_text(std::slice::from_ref(metric)))
                }
                (Lookup::NotFound, false) => println!(
                    "{} {}",
                    "No metrics for post".yellow(),
                    options.post_id.bright_white()
                ),
            }
        }
        Commands::Summary(output) => {
            let summary = seo.get_summary().await;
            if output.json {
                println!("{}", format_json(&summary)?);
            } else {
                println!("{}", format_summary_text(&summary));
            }
        }
        Commands::Recommend(options) => {
            let recommendations = seo
                .generate_recommendations(&options.content, &options.title, &options.keywords)
                .await;
            if options.output.json {
                println!("{}", format_json(&recommendations)?);
            } else {
                println!("{}", format_recommendations_text(&recommendations));
            }
        }
    }

    Ok(())
}

fn format_change(metric: &SeoMetric) -> String {
    let label = format!("{:.1}%", metric.change_percent);
    match metric.change {
        ChangeDirection::Up => format!("+{}", label).green().to_string(),
        ChangeDirection::Down => format!("-{}", label).red().to_string(),
        ChangeDirection::Neutral => label.bright_black().to_string(),
    }
}

fn format_metrics_text(metrics: &[SeoMetric]) -> String {
    let mut result = format!("\n{}\n", "SEO METRICS".bright_cyan().bold());

    if metrics.is_empty() {
        result.push_str(&format!("\n{}\n", "No metrics found.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Post".bold().cyan(),
        "Title".bold().cyan(),
        "Score".bold().cyan(),
        "Clicks".bold().cyan(),
        "Impressions".bold().cyan(),
        "Position".bold().cyan(),
        "Change".bold().cyan()
    ]);

    for metric in metrics {
        table.add_row(prettytable::row![
            metric.post_id.bright_white(),
            truncate_text(&metric.title, 40),
            metric.score.to_string().bright_yellow(),
            metric.clicks,
            metric.impressions,
            format!("{:.1}", metric.position),
            format_change(metric)
        ]);
    }

    result.push_str(&table.to_string());
    result
}

fn format_summary_text(summary: &SeoSummary) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["Posts".bold().cyan(), summary.total_posts]);
    table.add_row(prettytable::row!["Clicks".bold().cyan(), summary.total_clicks]);
    table.add_row(prettytable::row![
        "Impressions".bold().cyan(),
        summary.total_impressions
    ]);
    table.add_row(prettytable::row![
        "CTR".bold().cyan(),
        format!("{:.2}%", summary.click_through_rate * 100.0)
    ]);
    table.add_row(prettytable::row![
        "Average score".bold().cyan(),
        format!("{:.1}", summary.average_score)
    ]);
    table.add_row(prettytable::row![
        "Average position".bold().cyan(),
        format!("{:.1}", summary.average_position)
    ]);
    table.add_row(prettytable::row![
        "Trending".bold().cyan(),
        format!(
            "{} up / {} down / {} neutral",
            summary.trending_up, summary.trending_down, summary.neutral
        )
    ]);

    format!("\n{}\n{}", "SEO SUMMARY".bright_cyan().bold(), table)
}

fn format_recommendations_text(recommendations: &[String]) -> String {
    let mut result = format!("\n{}\n\n", "RECOMMENDATIONS".bright_cyan().bold());
    for (idx, recommendation) in recommendations.iter().enumerate() {
        result.push_str(&format!(
            "{} {}\n",
            format!("[{}]", idx + 1).yellow().bold(),
            recommendation
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolhub_core::seo::{fixture_metrics, summarize};

    #[test]
    fn test_format_change_signs() {
        colored::control::set_override(false);
        let metrics = fixture_metrics();

        assert_eq!(format_change(&metrics[0]), "+12.5%");
        assert_eq!(format_change(&metrics[1]), "-3.2%");
        assert_eq!(format_change(&metrics[2]), "0.0%");
    }

    #[test]
    fn test_format_recommendations_numbered() {
        colored::control::set_override(false);
        let text = format_recommendations_text(&["first".to_string(), "second".to_string()]);

        assert!(text.contains("[1] first"));
        assert!(text.contains("[2] second"));
    }

    #[test]
    fn test_format_summary_text() {
        colored::control::set_override(false);
        let text = format_summary_text(&summarize(&fixture_metrics()));

        assert!(text.contains("2670"));
        assert!(text.contains("1 up / 1 down / 1 neutral"));
    }

    #[test]
    fn test_recommend_parses_keyword_list() {
        use clap::Parser;

        #[derive(Debug, clap::Parser)]
        struct Harness {
            #[command(subcommand)]
            command: Commands,
        }

        let parsed =
            Harness::try_parse_from(["seo", "recommend", "--keywords", "json,format,tools"])
                .unwrap();
        match parsed.command {
            Commands::Recommend(options) => {
                assert_eq!(options.keywords, vec!["json", "format", "tools"]);
                assert_eq!(options.title, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_recommend_counts_empty_keywords() {
        use clap::Parser;
        use toolhub_core::seo::{HEADER_STRUCTURE, INTERNAL_LINKING, META_DESCRIPTION};

        #[derive(Debug, clap::Parser)]
        struct Harness {
            #[command(subcommand)]
            command: Commands,
        }

        let parsed = Harness::try_parse_from(["seo", "recommend", "--keywords", "a,,b"]).unwrap();
        let Commands::Recommend(options) = parsed.command else {
            panic!("expected the recommend command");
        };

        assert_eq!(options.keywords, vec!["a", "", "b"]);
        assert_eq!(
            toolhub_core::seo::generate_recommendations(
                &"c".repeat(300),
                &"t".repeat(30),
                &options.keywords
            ),
            vec![META_DESCRIPTION, HEADER_STRUCTURE, INTERNAL_LINKING]
        );
    }
}
