//! RecordActivity - command handler applying one activity event to the
//! ledger.

use std::sync::Arc;

use crate::domain::activity::{ActivityEvent, ActivityKind};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::gamification::Achievement;
use crate::domain::progression::{StatsDelta, UserStats};
use crate::ports::{ActivityLog, StatsStore};

use super::EvaluateAchievementsHandler;

/// Command to record one activity event.
#[derive(Debug, Clone)]
pub struct RecordActivityCommand {
    pub user_id: UserId,
    pub kind: ActivityKind,
    /// Explicit event time for replays and backfills; defaults to now.
    pub occurred_at: Option<Timestamp>,
}

/// Result of applying an activity event.
#[derive(Debug, Clone)]
pub struct RecordActivityResult {
    pub stats: UserStats,
    /// False when the event was a replay of an already-counted
    /// state transition.
    pub recorded: bool,
    pub newly_earned: Vec<Achievement>,
}

/// Handler deriving stats from activity events.
///
/// State-transition events (implemented, module/guide completed) are
/// deduplicated by key before their counter delta is applied, so a
/// replay never double-counts. Every event, replayed or not, still
/// counts as presence for the day's streak.
pub struct RecordActivityHandler {
    activity_log: Arc<dyn ActivityLog>,
    stats_store: Arc<dyn StatsStore>,
    achievements: Arc<EvaluateAchievementsHandler>,
}

impl RecordActivityHandler {
    pub fn new(
        activity_log: Arc<dyn ActivityLog>,
        stats_store: Arc<dyn StatsStore>,
        achievements: Arc<EvaluateAchievementsHandler>,
    ) -> Self {
        Self {
            activity_log,
            stats_store,
            achievements,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordActivityCommand,
    ) -> Result<RecordActivityResult, DomainError> {
        let event = match cmd.occurred_at {
            Some(ts) => ActivityEvent::at(cmd.user_id.clone(), cmd.kind, ts),
            None => ActivityEvent::new(cmd.user_id.clone(), cmd.kind),
        };

        let recorded = match event.kind.dedup_key() {
            Some(key) => self.activity_log.insert_keyed(&event, &key).await?,
            None => {
                self.activity_log.append(&event).await?;
                true
            }
        };

        let delta = if recorded {
            StatsDelta::for_kind(&event.kind)
        } else {
            tracing::debug!(
                user_id = %event.user_id,
                event_id = %event.id,
                "replayed activity event, counters unchanged"
            );
            StatsDelta::default()
        };

        let activity_day = event.occurred_at.calendar_date();
        let stats = self
            .stats_store
            .apply(&event.user_id, &delta, Some(activity_day))
            .await?;

        let newly_earned = self.achievements.evaluate(&event.user_id, &stats).await?;
        let stats = if newly_earned.is_empty() {
            stats
        } else {
            // Pick up the reward points and achievement count.
            self.stats_store
                .find(&event.user_id)
                .await?
                .unwrap_or(stats)
        };

        Ok(RecordActivityResult {
            stats,
            recorded,
            newly_earned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAchievementStore, InMemoryActivityLog, InMemoryStatsStore,
    };
    use crate::domain::foundation::ToolId;
    use chrono::{TimeZone, Utc};

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn tool() -> ToolId {
        ToolId::new("notion-ai").unwrap()
    }

    fn at_day(d: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap())
    }

    fn handler() -> (RecordActivityHandler, Arc<InMemoryActivityLog>) {
        let log = Arc::new(InMemoryActivityLog::new());
        let stats = Arc::new(InMemoryStatsStore::new());
        let achievements = Arc::new(InMemoryAchievementStore::new());
        let evaluator = Arc::new(EvaluateAchievementsHandler::new(
            stats.clone(),
            achievements,
        ));
        (
            RecordActivityHandler::new(log.clone(), stats, evaluator),
            log,
        )
    }

    fn implemented(d: u32) -> RecordActivityCommand {
        RecordActivityCommand {
            user_id: user(),
            kind: ActivityKind::Implemented { tool_id: tool() },
            occurred_at: Some(at_day(d)),
        }
    }

    #[tokio::test]
    async fn implemented_event_increments_tools_counter() {
        let (handler, _) = handler();
        let result = handler.handle(implemented(10)).await.unwrap();
        assert!(result.recorded);
        assert_eq!(result.stats.tools_implemented, 1);
    }

    #[tokio::test]
    async fn replayed_implemented_event_does_not_double_count() {
        let (handler, log) = handler();
        handler.handle(implemented(10)).await.unwrap();
        let replay = handler.handle(implemented(11)).await.unwrap();

        assert!(!replay.recorded);
        assert_eq!(replay.stats.tools_implemented, 1);
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn replayed_event_still_counts_for_the_streak() {
        let (handler, _) = handler();
        handler.handle(implemented(10)).await.unwrap();
        let replay = handler.handle(implemented(11)).await.unwrap();
        assert_eq!(replay.stats.streak_days, 2);
    }

    #[tokio::test]
    async fn consecutive_days_grow_streak_and_gap_resets_it() {
        let (handler, _) = handler();
        let session = |d: u32| RecordActivityCommand {
            user_id: user(),
            kind: ActivityKind::Session { minutes: 10 },
            occurred_at: Some(at_day(d)),
        };

        handler.handle(session(10)).await.unwrap();
        let second = handler.handle(session(11)).await.unwrap();
        assert_eq!(second.stats.streak_days, 2);

        let after_gap = handler.handle(session(14)).await.unwrap();
        assert_eq!(after_gap.stats.streak_days, 1);
    }

    #[tokio::test]
    async fn same_day_events_leave_streak_unchanged() {
        let (handler, _) = handler();
        let session = RecordActivityCommand {
            user_id: user(),
            kind: ActivityKind::Session { minutes: 10 },
            occurred_at: Some(at_day(10)),
        };
        handler.handle(session.clone()).await.unwrap();
        let second = handler.handle(session).await.unwrap();
        assert_eq!(second.stats.streak_days, 1);
    }

    #[tokio::test]
    async fn session_minutes_accumulate() {
        let (handler, _) = handler();
        let session = |minutes| RecordActivityCommand {
            user_id: user(),
            kind: ActivityKind::Session { minutes },
            occurred_at: Some(at_day(10)),
        };
        handler.handle(session(25)).await.unwrap();
        let result = handler.handle(session(35)).await.unwrap();
        assert_eq!(result.stats.total_time_invested_minutes, 60);
    }

    #[tokio::test]
    async fn first_implementation_unlocks_achievement_with_reward() {
        let (handler, _) = handler();
        let result = handler.handle(implemented(10)).await.unwrap();

        assert_eq!(result.newly_earned.len(), 1);
        assert_eq!(result.newly_earned[0].id.as_str(), "first-tool");
        // Returned stats include the reward applied by the evaluator.
        assert_eq!(result.stats.total_points, 50);
        assert_eq!(result.stats.achievements_earned, 1);
    }

    #[tokio::test]
    async fn module_and_guide_completions_count_separately() {
        let (handler, _) = handler();
        let module = RecordActivityCommand {
            user_id: user(),
            kind: ActivityKind::ModuleCompleted { slug: "intro".to_string() },
            occurred_at: Some(at_day(10)),
        };
        let guide = RecordActivityCommand {
            user_id: user(),
            kind: ActivityKind::GuideCompleted { slug: "intro".to_string() },
            occurred_at: Some(at_day(10)),
        };
        handler.handle(module).await.unwrap();
        let result = handler.handle(guide).await.unwrap();
        assert_eq!(result.stats.modules_completed, 1);
        assert_eq!(result.stats.guides_completed, 1);
    }
}
