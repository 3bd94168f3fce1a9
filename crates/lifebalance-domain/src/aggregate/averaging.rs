use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::activity::LifeDomain;

/// Identity and audit columns of a goals row; never progress values.
pub const DEFAULT_EXCLUDED_COLUMNS: [&str; 4] = ["id", "user_id", "created_at", "updated_at"];

/// Rounded mean of every numeric field whose key is not excluded.
///
/// Non-numeric values are skipped rather than failing the whole row. With no
/// eligible field the result is `0`.
pub fn average_progress(fields: &Map<String, Value>, excluded: &HashSet<&str>) -> i64 {
    let (sum, count) = fields
        .iter()
        .filter(|(key, _)| !excluded.contains(key.as_str()))
        .filter_map(|(_, value)| value.as_f64())
        .filter(|value| value.is_finite())
        .fold((0.0_f64, 0u32), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        return 0;
    }

    (sum / count as f64).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifeDomainProgress {
    pub mind: i64,
    pub body: i64,
    pub soul: i64,
}

impl LifeDomainProgress {
    pub fn get(&self, domain: LifeDomain) -> i64 {
        match domain {
            LifeDomain::Mind => self.mind,
            LifeDomain::Body => self.body,
            LifeDomain::Soul => self.soul,
        }
    }
}

/// Average each life domain's goal row independently; a missing row is `0`.
pub fn life_domain_progress(rows: &HashMap<LifeDomain, Map<String, Value>>) -> LifeDomainProgress {
    let excluded: HashSet<&str> = DEFAULT_EXCLUDED_COLUMNS.into_iter().collect();
    let average_for = |domain: LifeDomain| {
        rows.get(&domain)
            .map(|row| average_progress(row, &excluded))
            .unwrap_or(0)
    };

    LifeDomainProgress {
        mind: average_for(LifeDomain::Mind),
        body: average_for(LifeDomain::Body),
        soul: average_for(LifeDomain::Soul),
    }
}
