//! GenerateRecommendations - one recommendation cycle for a user.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;

use crate::domain::catalog::Tool;
use crate::domain::foundation::{DomainError, ToolId, UserId};
use crate::domain::profile::UserProfile;
use crate::domain::recommendation::RecommendationEntry;
use crate::domain::scoring::{score, ActivitySummary, ScoredTool};
use crate::ports::{
    ActivityLog, ProfileReader, ReasonEnricher, RecommendationStore, ToolCatalog,
};

/// Entries produced per cycle unless the caller asks otherwise.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;

/// How many recent viewed-tool signals feed the activity summary.
const RECENT_VIEWS_WINDOW: usize = 20;

/// Command to run a recommendation cycle.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsCommand {
    pub user_id: UserId,
    /// Overrides the configured set size.
    pub limit: Option<usize>,
}

/// Handler orchestrating scoring over the catalog.
///
/// Each cycle replaces the user's full active set: actives not
/// re-produced are superseded, while dismissed and implemented entries
/// are untouched and permanently excluded from the candidate pool.
pub struct GenerateRecommendationsHandler {
    profiles: Arc<dyn ProfileReader>,
    catalog: Arc<dyn ToolCatalog>,
    recommendations: Arc<dyn RecommendationStore>,
    activity_log: Arc<dyn ActivityLog>,
    /// Optional advisory enrichment; None disables it entirely.
    enricher: Option<Arc<dyn ReasonEnricher>>,
    default_limit: usize,
}

impl GenerateRecommendationsHandler {
    pub fn new(
        profiles: Arc<dyn ProfileReader>,
        catalog: Arc<dyn ToolCatalog>,
        recommendations: Arc<dyn RecommendationStore>,
        activity_log: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            profiles,
            catalog,
            recommendations,
            activity_log,
            enricher: None,
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    /// Attaches the advisory reason enricher.
    pub fn with_enricher(mut self, enricher: Arc<dyn ReasonEnricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Overrides the default set size.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateRecommendationsCommand,
    ) -> Result<Vec<RecommendationEntry>, DomainError> {
        // A missing profile degrades to an empty set; recommending
        // nothing is always a valid output of an under-specified input.
        let Some(profile) = self.profiles.find_by_user(&cmd.user_id).await? else {
            tracing::debug!(user_id = %cmd.user_id, "no profile, returning empty recommendation set");
            return Ok(Vec::new());
        };

        let excluded: HashSet<ToolId> = self
            .recommendations
            .list_for_user(&cmd.user_id)
            .await?
            .into_iter()
            .filter(|e| e.excludes_from_candidates())
            .map(|e| e.tool_id)
            .collect();

        let summary = self.activity_summary(&cmd.user_id).await?;

        let mut scored: Vec<(Tool, ScoredTool)> = self
            .catalog
            .active_tools()
            .await?
            .into_iter()
            .filter(|tool| !excluded.contains(&tool.id))
            .map(|tool| {
                let result = score(&tool, &profile, &summary);
                (tool, result)
            })
            .collect();

        // Score descending, then popularity descending, then name
        // ascending for full determinism.
        scored.sort_by(|(tool_a, a), (tool_b, b)| {
            b.value
                .cmp(&a.value)
                .then_with(|| {
                    tool_b
                        .popularity_score
                        .partial_cmp(&tool_a.popularity_score)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| tool_a.name.cmp(&tool_b.name))
        });

        let limit = cmd.limit.unwrap_or(self.default_limit);
        scored.truncate(limit);

        let entries = self.build_entries(&cmd.user_id, &profile, scored).await;
        self.recommendations
            .replace_active_set(&cmd.user_id, &entries)
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            count = entries.len(),
            "recommendation cycle completed"
        );
        Ok(entries)
    }

    async fn activity_summary(&self, user_id: &UserId) -> Result<ActivitySummary, DomainError> {
        let events = self.activity_log.events_for_user(user_id).await?;
        let recently_viewed = events
            .iter()
            .rev()
            .filter_map(|e| match &e.kind {
                crate::domain::activity::ActivityKind::Viewed { tool_id } => Some(tool_id.clone()),
                _ => None,
            })
            .take(RECENT_VIEWS_WINDOW)
            .collect();
        Ok(ActivitySummary { recently_viewed })
    }

    /// Builds active entries, enriching reasons concurrently when an
    /// enricher is attached. Enrichment failures are logged and fall
    /// back to the deterministic reason.
    async fn build_entries(
        &self,
        user_id: &UserId,
        profile: &UserProfile,
        scored: Vec<(Tool, ScoredTool)>,
    ) -> Vec<RecommendationEntry> {
        let enrichments = join_all(scored.iter().map(|(tool, result)| async {
            match &self.enricher {
                Some(enricher) => {
                    match enricher.enrich(profile, tool, &result.reason).await {
                        Ok(text) => Some(text),
                        Err(err) => {
                            tracing::warn!(
                                tool_id = %tool.id,
                                error = %err,
                                "advisory enrichment failed, using deterministic reason"
                            );
                            None
                        }
                    }
                }
                None => None,
            }
        }))
        .await;

        scored
            .into_iter()
            .zip(enrichments)
            .map(|((tool, result), enriched)| {
                RecommendationEntry::active(
                    user_id.clone(),
                    tool.id,
                    result.value,
                    enriched.unwrap_or(result.reason),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryActivityLog, InMemoryProfileReader, InMemoryRecommendationStore,
        InMemoryToolCatalog,
    };
    use crate::domain::catalog::{PricingModel, SetupDifficulty, TimeToValue, ToolStatus};
    use crate::domain::profile::AiExperience;
    use crate::domain::recommendation::RecommendationStatus;
    use crate::ports::AdvisoryError;
    use async_trait::async_trait;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            user_id: user(),
            role: "Manager".to_string(),
            industry: "Technology".to_string(),
            company_size: "11-50".to_string(),
            ai_experience: AiExperience::Never,
            goals: vec!["Save time".to_string()],
            time_availability: "2-4 hours/week".to_string(),
        }
    }

    fn tool(id: &str, name: &str, popularity: f64) -> Tool {
        Tool {
            id: ToolId::new(id).unwrap(),
            name: name.to_string(),
            category: "Productivity".to_string(),
            pricing_model: PricingModel::Free,
            pricing_amount: 0,
            setup_difficulty: SetupDifficulty::Easy,
            time_to_value: TimeToValue::Minutes,
            target_roles: vec!["Manager".to_string()],
            target_industries: vec!["Technology".to_string()],
            user_rating: 4.5,
            popularity_score: popularity,
            status: ToolStatus::Active,
        }
    }

    struct Fixture {
        handler: GenerateRecommendationsHandler,
        profiles: Arc<InMemoryProfileReader>,
        catalog: Arc<InMemoryToolCatalog>,
        recommendations: Arc<InMemoryRecommendationStore>,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryProfileReader::new());
        let catalog = Arc::new(InMemoryToolCatalog::new());
        let recommendations = Arc::new(InMemoryRecommendationStore::new());
        let activity_log = Arc::new(InMemoryActivityLog::new());
        let handler = GenerateRecommendationsHandler::new(
            profiles.clone(),
            catalog.clone(),
            recommendations.clone(),
            activity_log,
        );
        Fixture {
            handler,
            profiles,
            catalog,
            recommendations,
        }
    }

    fn generate() -> GenerateRecommendationsCommand {
        GenerateRecommendationsCommand {
            user_id: user(),
            limit: None,
        }
    }

    #[tokio::test]
    async fn missing_profile_returns_empty_set() {
        let f = fixture();
        f.catalog.insert(tool("t1", "Tool One", 50.0)).await;

        let result = f.handler.handle(generate()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn entries_are_ranked_and_persisted_active() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        f.catalog.insert(tool("t1", "Tool One", 50.0)).await;
        let mut weaker = tool("t2", "Tool Two", 90.0);
        weaker.setup_difficulty = SetupDifficulty::Hard;
        weaker.time_to_value = TimeToValue::Days;
        f.catalog.insert(weaker).await;

        let result = f.handler.handle(generate()).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].tool_id.as_str(), "t1");
        assert!(result[0].score > result[1].score);

        let stored = f
            .recommendations
            .find(&user(), &ToolId::new("t1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RecommendationStatus::Active);
    }

    #[tokio::test]
    async fn ties_break_by_popularity_then_name() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        f.catalog.insert(tool("alpha", "Alpha", 10.0)).await;
        f.catalog.insert(tool("beta", "Beta", 80.0)).await;
        f.catalog.insert(tool("gamma", "Gamma", 10.0)).await;

        let result = f.handler.handle(generate()).await.unwrap();
        let names: Vec<&str> = result.iter().map(|e| e.tool_id.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma"]);
    }

    #[tokio::test]
    async fn limit_truncates_the_set() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        for i in 0..10 {
            f.catalog
                .insert(tool(&format!("t{i}"), &format!("Tool {i}"), f64::from(i)))
                .await;
        }

        let result = f
            .handler
            .handle(GenerateRecommendationsCommand {
                user_id: user(),
                limit: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn dismissed_tools_never_reappear() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        f.catalog.insert(tool("t1", "Tool One", 99.0)).await;
        f.catalog.insert(tool("t2", "Tool Two", 1.0)).await;

        f.handler.handle(generate()).await.unwrap();
        let mut entry = f
            .recommendations
            .find(&user(), &ToolId::new("t1").unwrap())
            .await
            .unwrap()
            .unwrap();
        entry.dismiss().unwrap();
        f.recommendations.upsert(&entry).await.unwrap();

        let result = f.handler.handle(generate()).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tool_id.as_str(), "t2");
    }

    #[tokio::test]
    async fn superseded_tools_return_to_the_pool() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        f.catalog.insert(tool("t1", "Tool One", 99.0)).await;
        f.catalog.insert(tool("t2", "Tool Two", 1.0)).await;

        f.handler
            .handle(GenerateRecommendationsCommand {
                user_id: user(),
                limit: Some(1),
            })
            .await
            .unwrap();
        // t2 was never surfaced; t1 active. A full-width cycle brings
        // both back.
        let result = f.handler.handle(generate()).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    struct FailingEnricher;

    #[async_trait]
    impl ReasonEnricher for FailingEnricher {
        async fn enrich(
            &self,
            _profile: &UserProfile,
            _tool: &Tool,
            _deterministic_reason: &str,
        ) -> Result<String, AdvisoryError> {
            Err(AdvisoryError::Timeout)
        }
    }

    struct UpbeatEnricher;

    #[async_trait]
    impl ReasonEnricher for UpbeatEnricher {
        async fn enrich(
            &self,
            _profile: &UserProfile,
            tool: &Tool,
            _deterministic_reason: &str,
        ) -> Result<String, AdvisoryError> {
            Ok(format!("{} fits your workflow perfectly", tool.name))
        }
    }

    #[tokio::test]
    async fn enricher_failure_falls_back_to_deterministic_reason() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        f.catalog.insert(tool("t1", "Tool One", 50.0)).await;
        let handler = f.handler.with_enricher(Arc::new(FailingEnricher));

        let result = handler.handle(generate()).await.unwrap();
        assert!(result[0].reason.contains("Simple setup process"));
    }

    #[tokio::test]
    async fn enricher_success_replaces_reason() {
        let f = fixture();
        f.profiles.insert(profile()).await;
        f.catalog.insert(tool("t1", "Tool One", 50.0)).await;
        let handler = f.handler.with_enricher(Arc::new(UpbeatEnricher));

        let result = handler.handle(generate()).await.unwrap();
        assert_eq!(result[0].reason, "Tool One fits your workflow perfectly");
    }
}
