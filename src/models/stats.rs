//! Per-user activity statistics, derived on request from the activity log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, ActivityType};
use crate::streak::calculate_streak;
use crate::time_utils::calendar_day;

/// Current and best runs of consecutive active days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Most recent active day (`YYYY-MM-DD`), if any
    pub last_active_date: Option<String>,
}

/// Dashboard statistics for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserStats {
    // ─── Activity Counts ─────────────────────────────────────────
    pub total_activities: u32,
    pub views: u32,
    pub favorites: u32,
    pub shares: u32,

    // ─── Current State ───────────────────────────────────────────
    /// Quotes currently in the user's favorites
    pub favorites_count: u32,
    /// Distinct UTC days with any activity
    pub active_days: u32,

    // ─── Streaks ─────────────────────────────────────────────────
    pub streak: StreakResult,
}

impl UserStats {
    /// Aggregate a user's activity log as of `today`.
    pub fn from_activities(activities: &[Activity], favorites_count: usize, today: NaiveDate) -> Self {
        let mut stats = UserStats {
            favorites_count: favorites_count as u32,
            ..Default::default()
        };
        let mut days: BTreeSet<String> = BTreeSet::new();

        for activity in activities {
            stats.total_activities += 1;
            match activity.kind {
                ActivityType::View => stats.views += 1,
                ActivityType::Favorite => stats.favorites += 1,
                ActivityType::Share => stats.shares += 1,
            }
            days.insert(calendar_day(activity.timestamp));
        }

        stats.active_days = days.len() as u32;
        stats.streak = calculate_streak(&days, today);
        stats
    }
}
