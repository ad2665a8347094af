// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Plan tiers and monthly usage accounting

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::QuotaError;

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
}

/// Caps for a tier. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    pub scrubs_per_month: Option<u32>,
    pub custom_rules: Option<u32>,
}

impl PlanTier {
    pub fn limits(&self) -> PlanLimits {
        match self {
            PlanTier::Free => PlanLimits {
                scrubs_per_month: Some(50),
                custom_rules: Some(3),
            },
            PlanTier::Pro => PlanLimits {
                scrubs_per_month: None,
                custom_rules: None,
            },
        }
    }
}

/// Actions gated by the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Scrub,
    AddCustomRule,
}

/// Quota service consulted by callers around a redaction
pub trait UsageTracker {
    fn can_perform_action(&self, kind: ActionKind) -> bool;

    /// Count one scrub, returning the new total for the period
    fn record_scrub(&mut self) -> Result<u32, QuotaError>;
}

/// Monthly counters for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub plan: PlanTier,
    pub scrub_count: u32,
    pub custom_rule_count: u32,
    pub period_start: DateTime<Utc>,
    pub reset_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(plan: PlanTier, now: DateTime<Utc>) -> Self {
        Self {
            plan,
            scrub_count: 0,
            custom_rule_count: 0,
            period_start: now,
            reset_at: next_month_start(now),
        }
    }

    /// Start a new period if `now` has passed the reset point.
    /// The custom rule count is a stored total, not a monthly figure, so it is kept.
    pub fn roll_over(&mut self, now: DateTime<Utc>) {
        if now >= self.reset_at {
            self.scrub_count = 0;
            self.period_start = now;
            self.reset_at = next_month_start(now);
        }
    }

    pub fn can_perform_at(&self, kind: ActionKind, now: DateTime<Utc>) -> bool {
        let limits = self.plan.limits();
        match kind {
            ActionKind::Scrub => {
                let used = if now >= self.reset_at {
                    0
                } else {
                    self.scrub_count
                };
                limits.scrubs_per_month.map_or(true, |cap| used < cap)
            }
            ActionKind::AddCustomRule => limits
                .custom_rules
                .map_or(true, |cap| self.custom_rule_count < cap),
        }
    }

    pub fn record_scrub_at(&mut self, now: DateTime<Utc>) -> Result<u32, QuotaError> {
        self.roll_over(now);
        if let Some(limit) = self.plan.limits().scrubs_per_month {
            if self.scrub_count >= limit {
                return Err(QuotaError::ScrubLimitReached { limit });
            }
        }
        self.scrub_count = self.scrub_count.saturating_add(1);
        Ok(self.scrub_count)
    }

    /// Scrubs left in the current period, `None` when unlimited
    pub fn remaining_scrubs(&self, now: DateTime<Utc>) -> Option<u32> {
        let used = if now >= self.reset_at {
            0
        } else {
            self.scrub_count
        };
        self.plan
            .limits()
            .scrubs_per_month
            .map(|cap| cap.saturating_sub(used))
    }
}

impl UsageTracker for UsageRecord {
    fn can_perform_action(&self, kind: ActionKind) -> bool {
        self.can_perform_at(kind, Utc::now())
    }

    fn record_scrub(&mut self) -> Result<u32, QuotaError> {
        self.record_scrub_at(Utc::now())
    }
}

/// First instant of the calendar month after `now` (UTC)
fn next_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|| now + Duration::days(30))
}
