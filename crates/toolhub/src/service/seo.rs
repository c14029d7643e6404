use toolhub_core::seo::{self, fixture_metrics, SeoMetric, SeoSummary};
use toolhub_core::store::Lookup;

use super::ServiceConfig;

/// Read-only SEO metrics and content recommendations
#[derive(Debug, Clone)]
pub struct SeoService {
    metrics: Vec<SeoMetric>,
    config: ServiceConfig,
}

impl SeoService {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_metrics(fixture_metrics(), config)
    }

    pub fn with_metrics(metrics: Vec<SeoMetric>, config: ServiceConfig) -> Self {
        Self { metrics, config }
    }

    pub async fn get_all_metrics(&self) -> Vec<SeoMetric> {
        self.config.simulate_latency().await;
        self.metrics.clone()
    }

    pub async fn get_metrics_for_post(&self, post_id: &str) -> Lookup<SeoMetric> {
        self.config.simulate_latency().await;
        seo::find_metric(&self.metrics, post_id)
    }

    pub async fn get_summary(&self) -> SeoSummary {
        self.config.simulate_latency().await;
        seo::summarize(&self.metrics)
    }

    pub async fn generate_recommendations<K: AsRef<str>>(
        &self,
        content: &str,
        title: &str,
        keywords: &[K],
    ) -> Vec<String> {
        self.config.simulate_latency().await;
        seo::generate_recommendations(content, title, keywords)
    }
}
