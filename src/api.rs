use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http_client::http_client;
use crate::model::{
    Board, ChartPayload, ChartTrace, HistoricStats, Leaderboard, PunchCard, RankingGraph,
    RosterEntry, ValidDates, ValidPhases,
};

/// Query shared by the overview and ranking-graph endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeQuery {
    pub player_id: String,
    pub date_start: String,
    pub date_end: String,
    pub phase: u32,
    pub fetch_range: bool,
}

impl RangeQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("player_id", self.player_id.clone()),
            ("date_start", self.date_start.clone()),
            ("date_end", self.date_end.clone()),
            ("phase", self.phase.to_string()),
            ("fetch_range", self.fetch_range.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PunchCardQuery {
    pub player_id: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardQuery {
    pub date: String,
    pub board: Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Data,
    /// The filter combination has nothing behind it.
    NoData,
    Error,
}

/// 2xx is data, 404/422 mean "nothing for this filter", anything else is a
/// backend error.
pub fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        return StatusClass::Data;
    }
    match status {
        StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => StatusClass::NoData,
        _ => StatusClass::Error,
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base, timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base.clone(), config.timeout)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{path}", self.base);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|err| ApiError::Invalid {
            what: "url",
            detail: format!("{raw}: {err}"),
        })
    }

    pub fn roster_url(&self) -> Result<Url> {
        self.url("/roster/", &[])
    }

    pub fn overview_url(&self, query: &RangeQuery) -> Result<Url> {
        self.url("/player/overview", &query.params())
    }

    pub fn punch_card_url(&self, query: &PunchCardQuery) -> Result<Url> {
        self.url(
            "/punchcard",
            &[
                ("player_id", query.player_id.clone()),
                ("date", query.date.clone()),
            ],
        )
    }

    pub fn ranking_graph_url(&self, query: &RangeQuery) -> Result<Url> {
        self.url("/player/ranking/graph", &query.params())
    }

    pub fn valid_dates_url(&self) -> Result<Url> {
        self.url("/leaderboards/dates", &[])
    }

    pub fn valid_phases_url(&self) -> Result<Url> {
        self.url("/leaderboards/phases", &[])
    }

    pub fn leaderboard_url(&self, query: &LeaderboardQuery) -> Result<Url> {
        self.url(
            "/leaderboards/",
            &[
                ("date", query.date.clone()),
                ("board", query.board.query_value().to_string()),
            ],
        )
    }

    /// `Ok(None)` when the backend says there is nothing for this request.
    fn get_body(&self, url: Url) -> Result<Option<String>> {
        let client = http_client(self.timeout)?;
        let url_text = url.to_string();
        let resp = client.get(url).send().map_err(|source| ApiError::Http {
            url: url_text.clone(),
            source,
        })?;
        let status = resp.status();
        debug!(url = %url_text, %status, "backend response");
        match classify_status(status) {
            StatusClass::Data => {}
            StatusClass::NoData => return Ok(None),
            StatusClass::Error => {
                warn!(url = %url_text, %status, "backend error status");
                return Err(ApiError::Status {
                    url: url_text,
                    status,
                });
            }
        }
        let body = resp.text().map_err(|source| ApiError::Body {
            url: url_text,
            source,
        })?;
        Ok(Some(body))
    }

    #[instrument(skip(self))]
    pub fn roster(&self) -> Result<Vec<RosterEntry>> {
        match self.get_body(self.roster_url()?)? {
            Some(body) => parse_roster_json(&body),
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self))]
    pub fn overview(&self, query: &RangeQuery) -> Result<Option<HistoricStats>> {
        match self.get_body(self.overview_url(query)?)? {
            Some(body) => parse_overview_json(&body),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub fn punch_card(&self, query: &PunchCardQuery) -> Result<Option<PunchCard>> {
        match self.get_body(self.punch_card_url(query)?)? {
            Some(body) => parse_punch_card_json(&body),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub fn ranking_graph(&self, query: &RangeQuery) -> Result<Option<RankingGraph>> {
        match self.get_body(self.ranking_graph_url(query)?)? {
            Some(body) => {
                let graph = parse_ranking_graph_json(&body)?;
                Ok((!graph.is_empty()).then_some(graph))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub fn valid_dates(&self) -> Result<ValidDates> {
        let url = self.valid_dates_url()?;
        let url_text = url.to_string();
        match self.get_body(url)? {
            Some(body) => parse_valid_dates_json(&body),
            None => Err(ApiError::Invalid {
                what: "valid dates",
                detail: format!("{url_text} has no data"),
            }),
        }
    }

    #[instrument(skip(self))]
    pub fn valid_phases(&self) -> Result<ValidPhases> {
        let url = self.valid_phases_url()?;
        let url_text = url.to_string();
        match self.get_body(url)? {
            Some(body) => parse_valid_phases_json(&body),
            None => Err(ApiError::Invalid {
                what: "valid phases",
                detail: format!("{url_text} has no data"),
            }),
        }
    }

    #[instrument(skip(self))]
    pub fn leaderboard(&self, query: &LeaderboardQuery) -> Result<Option<Leaderboard>> {
        match self.get_body(self.leaderboard_url(query)?)? {
            Some(body) => parse_leaderboard_json(&body),
            None => Ok(None),
        }
    }
}

fn parse_value(raw: &str, what: &'static str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|source| ApiError::Decode {
        context: what.to_string(),
        source,
    })
}

fn from_value<T: DeserializeOwned>(value: Value, what: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        context: what.to_string(),
        source,
    })
}

pub fn parse_roster_json(raw: &str) -> Result<Vec<RosterEntry>> {
    match parse_value(raw, "roster")? {
        Value::Null => Ok(Vec::new()),
        value => from_value(value, "roster"),
    }
}

/// The endpoint answers with an array; the first record is the requested date.
pub fn parse_overview_json(raw: &str) -> Result<Option<HistoricStats>> {
    let value = parse_value(raw, "player overview")?;
    let first = match value {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(map) => Some(Value::Object(map)),
        _ => None,
    };
    let Some(first) = first.filter(|v| v.get("player_id").is_some()) else {
        return Ok(None);
    };
    from_value(first, "player overview").map(Some)
}

/// Error-shaped bodies (no `player_id`/`date`) count as no data.
pub fn parse_punch_card_json(raw: &str) -> Result<Option<PunchCard>> {
    let value = parse_value(raw, "punch card")?;
    if value.get("player_id").is_none() || value.get("date").is_none() {
        return Ok(None);
    }
    from_value(value, "punch card").map(Some)
}

pub fn parse_ranking_graph_json(raw: &str) -> Result<RankingGraph> {
    let root = parse_value(raw, "ranking graph")?;
    if !root.is_object() && !root.is_null() {
        return Err(ApiError::Invalid {
            what: "ranking graph",
            detail: "expected an object keyed by metric".to_string(),
        });
    }
    Ok(RankingGraph {
        lp: root.get("lp").and_then(parse_chart),
        mr: root.get("mr").and_then(parse_chart),
    })
}

/// Accepts a plotly figure (`data` + `layout`, possibly JSON-encoded in a
/// string) or the `all_dates` + `characters` series map. Returns `None` when
/// nothing drawable is present.
fn parse_chart(value: &Value) -> Option<ChartPayload> {
    if let Value::String(encoded) = value {
        let decoded: Value = serde_json::from_str(encoded).ok()?;
        return parse_chart(&decoded);
    }

    let payload = if value.get("data").is_some() {
        parse_plotly_chart(value)
    } else if value.get("characters").is_some() {
        parse_series_chart(value)
    } else {
        return None;
    };
    (!payload.traces.is_empty()).then_some(payload)
}

fn parse_plotly_chart(value: &Value) -> ChartPayload {
    let layout = value.get("layout").cloned().unwrap_or(Value::Null);
    let title = layout
        .get("title")
        .and_then(|t| t.get("text").or(Some(t)))
        .and_then(Value::as_str)
        .map(str::to_string);

    let traces = value
        .get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| {
                    let x: Vec<String> = item
                        .get("x")
                        .and_then(Value::as_array)?
                        .iter()
                        .map(value_as_label)
                        .collect();
                    let y: Vec<Option<f64>> = item
                        .get("y")
                        .and_then(Value::as_array)?
                        .iter()
                        .map(value_as_f64)
                        .collect();
                    let name = item
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("trace {}", idx + 1));
                    Some(ChartTrace { name, x, y })
                })
                .collect()
        })
        .unwrap_or_default();

    ChartPayload {
        title,
        traces,
        layout,
    }
}

fn parse_series_chart(value: &Value) -> ChartPayload {
    let dates: Vec<String> = value
        .get("all_dates")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_as_label).collect())
        .unwrap_or_default();

    let traces = value
        .get("characters")
        .and_then(Value::as_object)
        .map(|chars| {
            chars
                .iter()
                .map(|(name, by_date)| {
                    let y = dates
                        .iter()
                        .map(|date| {
                            let cell = by_date.get(date)?;
                            match cell {
                                Value::Array(values) => values.first().and_then(value_as_f64),
                                other => value_as_f64(other),
                            }
                        })
                        .collect();
                    ChartTrace {
                        name: name.clone(),
                        x: dates.clone(),
                        y,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    ChartPayload {
        title: None,
        traces,
        layout: Value::Null,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Non-negative integers that fit a `u32`, given as numbers or strings.
fn value_as_phase(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => u32::try_from(n.as_u64()?).ok(),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn value_as_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Accepts `{"dates": [...]}` or a bare array.
pub fn parse_valid_dates_json(raw: &str) -> Result<ValidDates> {
    match parse_value(raw, "valid dates")? {
        Value::Array(items) => Ok(ValidDates {
            dates: items.iter().map(value_as_label).collect(),
        }),
        Value::Null => Ok(ValidDates::default()),
        value => from_value(value, "valid dates"),
    }
}

/// Accepts `{"phases": [...]}` or a bare array.
pub fn parse_valid_phases_json(raw: &str) -> Result<ValidPhases> {
    match parse_value(raw, "valid phases")? {
        Value::Array(items) => Ok(ValidPhases {
            phases: items
                .iter()
                .filter_map(value_as_phase)
                .collect(),
        }),
        Value::Null => Ok(ValidPhases::default()),
        value => from_value(value, "valid phases"),
    }
}

pub fn parse_leaderboard_json(raw: &str) -> Result<Option<Leaderboard>> {
    let value = parse_value(raw, "leaderboard")?;
    if value.get("players").is_none() {
        return Ok(None);
    }
    from_value(value, "leaderboard").map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:5000/", Duration::from_secs(5))
    }

    #[test]
    fn status_policy_separates_no_data_from_errors() {
        assert_eq!(classify_status(StatusCode::OK), StatusClass::Data);
        assert_eq!(classify_status(StatusCode::NOT_FOUND), StatusClass::NoData);
        assert_eq!(
            classify_status(StatusCode::UNPROCESSABLE_ENTITY),
            StatusClass::NoData
        );
        assert_eq!(classify_status(StatusCode::BAD_REQUEST), StatusClass::Error);
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            StatusClass::Error
        );
    }

    #[test]
    fn overview_url_carries_every_param() {
        let url = client()
            .overview_url(&RangeQuery {
                player_id: "42".to_string(),
                date_start: "2025-04-20".to_string(),
                date_end: "2025-04-20".to_string(),
                phase: 3,
                fetch_range: false,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/player/overview?player_id=42&date_start=2025-04-20&date_end=2025-04-20&phase=3&fetch_range=false"
        );
    }

    #[test]
    fn leaderboard_url_uses_board_slug() {
        let url = client()
            .leaderboard_url(&LeaderboardQuery {
                date: "2025-04-20".to_string(),
                board: Board::LpAll,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/leaderboards/?date=2025-04-20&board=lp-all"
        );
    }

    #[test]
    fn plotly_chart_encoded_as_string_is_decoded() {
        let inner = r#"{"data":[{"name":"Ryu","x":["2025-04-19","2025-04-20"],"y":[1500,"1512"]}],"layout":{"title":{"text":"MR"}}}"#;
        let raw = serde_json::json!({ "mr": inner }).to_string();
        let graph = parse_ranking_graph_json(&raw).unwrap();
        assert!(graph.lp.is_none());
        let mr = graph.mr.unwrap();
        assert_eq!(mr.title.as_deref(), Some("MR"));
        assert_eq!(mr.traces[0].y, vec![Some(1500.0), Some(1512.0)]);
    }

    #[test]
    fn chart_without_traces_is_dropped() {
        let graph = parse_ranking_graph_json(r#"{"lp":{"data":[]},"mr":{"other":1}}"#).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn ranking_graph_rejects_non_object_root() {
        assert!(parse_ranking_graph_json("[1,2]").is_err());
    }

    #[test]
    fn phases_accept_bare_array() {
        let phases = parse_valid_phases_json("[1, 2, \"3\"]").unwrap();
        assert_eq!(phases.phases, vec![1, 2, 3]);
    }

    #[test]
    fn phases_drop_negative_fractional_and_oversized_values() {
        let phases = parse_valid_phases_json("[-1, 2.7, 4294967296, \"x\", 4]").unwrap();
        assert_eq!(phases.phases, vec![4]);
    }
}
