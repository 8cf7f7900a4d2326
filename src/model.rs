use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_played: String,
    #[serde(default)]
    pub selected_char: Option<String>,
}

/// One player's cumulative stats for a report date. Counters may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricStats {
    #[serde(deserialize_with = "null_as_default")]
    pub player_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_joined: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_played: String,
    pub selected_character: Option<String>,
    pub selected_lp: Option<i64>,
    pub selected_mr: Option<i64>,
    pub casual_matches: Option<i64>,
    pub custom_matches: Option<i64>,
    pub hub_matches: Option<i64>,
    pub ranked_matches: Option<i64>,
    pub arcade_time: Option<i64>,
    pub casual_time: Option<i64>,
    pub custom_time: Option<i64>,
    pub extreme_time: Option<i64>,
    pub hub_time: Option<i64>,
    pub practice_time: Option<i64>,
    pub ranked_time: Option<i64>,
    pub versus_time: Option<i64>,
    pub wt_time: Option<i64>,
    pub thumbs: Option<i64>,
    pub total_kudos: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_tagline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_plate: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankedResult {
    #[serde(deserialize_with = "null_as_default")]
    pub lp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mr: i64,
}

/// Activity delta between `prev_date` and `date`. Times are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunchCard {
    #[serde(deserialize_with = "null_as_default")]
    pub player_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_date: String,
    pub selected_char: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_matches: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub casual_matches: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_matches: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hub_matches: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ranked_matches: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub arcade_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub casual_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub extreme_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hub_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub practice_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ranked_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub versus_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub wt_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub kudos_gained: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbs_gained: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ranked_changes: BTreeMap<String, RankedResult>,
}

impl PunchCard {
    /// Zero logged time and no thumbs means nothing happened in the period.
    pub fn is_empty(&self) -> bool {
        self.total_time == 0 && self.thumbs_gained == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
}

impl ChartTrace {
    /// Points placed on the shared axis: x is the position of this trace's
    /// label within `labels`. Samples without a value or a known label are
    /// skipped.
    pub fn points(&self, labels: &[String]) -> Vec<(f64, f64)> {
        self.y
            .iter()
            .zip(&self.x)
            .filter_map(|(y, label)| {
                let y = (*y)?;
                let pos = labels.iter().position(|l| l == label)?;
                Some((pos as f64, y))
            })
            .collect()
    }
}

/// One plot: the traces we draw plus the layout, which is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub title: Option<String>,
    pub traces: Vec<ChartTrace>,
    pub layout: serde_json::Value,
}

impl ChartPayload {
    /// Union of x labels across traces, in first-seen order.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for trace in &self.traces {
            for x in &trace.x {
                if !labels.contains(x) {
                    labels.push(x.clone());
                }
            }
        }
        labels
    }

    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.traces.iter().flat_map(|t| t.y.iter().flatten().copied());
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartMetric {
    Lp,
    Mr,
}

impl ChartMetric {
    pub fn toggle(self) -> Self {
        match self {
            ChartMetric::Lp => ChartMetric::Mr,
            ChartMetric::Mr => ChartMetric::Lp,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartMetric::Lp => "League Points",
            ChartMetric::Mr => "Master Rate",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingGraph {
    pub lp: Option<ChartPayload>,
    pub mr: Option<ChartPayload>,
}

impl RankingGraph {
    pub fn chart(&self, metric: ChartMetric) -> Option<&ChartPayload> {
        match metric {
            ChartMetric::Lp => self.lp.as_ref(),
            ChartMetric::Mr => self.mr.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lp.is_none() && self.mr.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidDates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidPhases {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phases: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Board {
    MrAll,
    LpAll,
}

impl Board {
    pub fn toggle(self) -> Self {
        match self {
            Board::MrAll => Board::LpAll,
            Board::LpAll => Board::MrAll,
        }
    }

    pub fn query_value(self) -> &'static str {
        match self {
            Board::MrAll => "mr-all",
            Board::LpAll => "lp-all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Board::MrAll => "Master Rate (all)",
            Board::LpAll => "League Points (all)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardPlayer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_id: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboard {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<LeaderboardPlayer>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
