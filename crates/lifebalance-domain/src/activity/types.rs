use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DateKey;
use crate::shared::{DomainError, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeDomain {
    Mind,
    Body,
    Soul,
}

impl LifeDomain {
    pub const ALL: [LifeDomain; 3] = [LifeDomain::Mind, LifeDomain::Body, LifeDomain::Soul];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifeDomain::Mind => "mind",
            LifeDomain::Body => "body",
            LifeDomain::Soul => "soul",
        }
    }
}

/// Tag separating independent streak/aggregate series for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActivityKind {
    Checklist,
    Sleep,
    Goal(LifeDomain),
}

impl ActivityKind {
    pub fn as_tag(&self) -> String {
        match self {
            ActivityKind::Checklist => "checklist".to_string(),
            ActivityKind::Sleep => "sleep".to_string(),
            ActivityKind::Goal(domain) => format!("goal:{}", domain.as_str()),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_tag())
    }
}

impl FromStr for ActivityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checklist" => Ok(ActivityKind::Checklist),
            "sleep" => Ok(ActivityKind::Sleep),
            "goal:mind" => Ok(ActivityKind::Goal(LifeDomain::Mind)),
            "goal:body" => Ok(ActivityKind::Goal(LifeDomain::Body)),
            "goal:soul" => Ok(ActivityKind::Goal(LifeDomain::Soul)),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown activity kind: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ActivityKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_tag()
    }
}

/// What a record measures: a checklist completion ratio or a raw amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ActivityValue {
    Ratio(f64),
    Measurement(f64),
}

impl ActivityValue {
    /// Completion ratio, clamped into 0.0..=1.0.
    pub fn ratio(value: f64) -> Result<Self, DomainError> {
        if value.is_nan() {
            return Err(DomainError::Validation(
                "Completion ratio cannot be NaN".to_string(),
            ));
        }
        Ok(ActivityValue::Ratio(value.clamp(0.0, 1.0)))
    }

    pub fn measurement(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::Validation(
                "Measurement must be a finite number".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(DomainError::Validation(
                "Measurement cannot be negative".to_string(),
            ));
        }
        Ok(ActivityValue::Measurement(value))
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            ActivityValue::Ratio(v) | ActivityValue::Measurement(v) => *v,
        }
    }

    pub fn kind_tag(&self) -> &'static str {
        match self {
            ActivityValue::Ratio(_) => "ratio",
            ActivityValue::Measurement(_) => "measurement",
        }
    }

    /// Rebuild from the persisted tag/number pair.
    pub fn from_parts(tag: &str, value: f64) -> Result<Self, DomainError> {
        match tag {
            "ratio" => Self::ratio(value),
            "measurement" => Self::measurement(value),
            other => Err(DomainError::DataIntegrity(format!(
                "Unknown activity value kind: {}",
                other
            ))),
        }
    }
}

/// One day's worth of one tracked activity for one user.
///
/// `(user_id, kind, date_key)` is the identity; writing the same triple again
/// replaces the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    user_id: UserId,
    kind: ActivityKind,
    date_key: DateKey,
    value: ActivityValue,
    updated_at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(
        user_id: UserId,
        kind: ActivityKind,
        date_key: DateKey,
        value: ActivityValue,
    ) -> Result<Self, DomainError> {
        if user_id.as_str().is_empty() {
            return Err(DomainError::Validation(
                "Activity record user id cannot be empty".to_string(),
            ));
        }

        match (kind, value) {
            (ActivityKind::Checklist, ActivityValue::Measurement(_)) => {
                return Err(DomainError::Validation(
                    "Checklist records must carry a completion ratio".to_string(),
                ));
            }
            (ActivityKind::Sleep, ActivityValue::Ratio(_)) => {
                return Err(DomainError::Validation(
                    "Sleep records must carry a measurement".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            user_id,
            kind,
            date_key,
            value,
            updated_at: Utc::now(),
        })
    }

    pub fn restore(
        user_id: UserId,
        kind: ActivityKind,
        date_key: DateKey,
        value: ActivityValue,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            kind,
            date_key,
            value,
            updated_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn date_key(&self) -> DateKey {
        self.date_key
    }

    pub fn value(&self) -> ActivityValue {
        self.value
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
