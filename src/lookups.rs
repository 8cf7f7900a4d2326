use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::api::ApiClient;
use crate::model::{ValidDates, ValidPhases};

/// Report dates and competitive phases, resolved once before the UI starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookups {
    /// Newest first.
    dates: Vec<String>,
    /// Ascending.
    phases: Vec<u32>,
}

impl Lookups {
    pub fn resolve(api: &ApiClient) -> Result<Self> {
        let dates = api
            .valid_dates()
            .with_context(|| format!("fetching valid dates from {}", api.base()))?;
        let phases = api
            .valid_phases()
            .with_context(|| format!("fetching valid phases from {}", api.base()))?;
        Self::from_records(dates, phases)
    }

    pub fn from_records(dates: ValidDates, phases: ValidPhases) -> Result<Self> {
        let mut parsed = Vec::with_capacity(dates.dates.len());
        for raw in &dates.dates {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid report date {raw:?}"))?;
            parsed.push(date);
        }
        parsed.sort_unstable_by(|a, b| b.cmp(a));
        parsed.dedup();

        let mut phases = phases.phases;
        phases.sort_unstable();
        phases.dedup();

        if parsed.is_empty() {
            bail!("backend reported no valid dates");
        }
        if phases.is_empty() {
            bail!("backend reported no valid phases");
        }

        Ok(Self {
            dates: parsed
                .into_iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            phases,
        })
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn phases(&self) -> &[u32] {
        &self.phases
    }

    pub fn latest_date(&self) -> &str {
        &self.dates[0]
    }

    pub fn earliest_date(&self) -> &str {
        &self.dates[self.dates.len() - 1]
    }

    pub fn latest_phase(&self) -> u32 {
        self.phases[self.phases.len() - 1]
    }

    pub fn date_index(&self, date: &str) -> Option<usize> {
        self.dates.iter().position(|d| d == date)
    }

    /// One step back in time from `date`, if there is one.
    pub fn older_date(&self, date: &str) -> Option<&str> {
        let idx = self.date_index(date)?;
        self.dates.get(idx + 1).map(String::as_str)
    }

    pub fn newer_date(&self, date: &str) -> Option<&str> {
        let idx = self.date_index(date)?;
        idx.checked_sub(1)
            .and_then(|i| self.dates.get(i))
            .map(String::as_str)
    }

    pub fn next_phase(&self, phase: u32) -> u32 {
        match self.phases.iter().position(|p| *p == phase) {
            Some(idx) => self.phases[(idx + 1) % self.phases.len()],
            None => self.latest_phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> Lookups {
        Lookups::from_records(
            ValidDates {
                dates: vec![
                    "2025-04-18".to_string(),
                    "2025-04-20".to_string(),
                    "2025-04-19".to_string(),
                    "2025-04-20".to_string(),
                ],
            },
            ValidPhases {
                phases: vec![3, 1, 2],
            },
        )
        .unwrap()
    }

    #[test]
    fn dates_sorted_newest_first_without_duplicates() {
        let l = lookups();
        assert_eq!(l.dates(), ["2025-04-20", "2025-04-19", "2025-04-18"]);
        assert_eq!(l.latest_date(), "2025-04-20");
        assert_eq!(l.earliest_date(), "2025-04-18");
        assert_eq!(l.latest_phase(), 3);
    }

    #[test]
    fn date_navigation_stops_at_the_ends() {
        let l = lookups();
        assert_eq!(l.older_date("2025-04-20"), Some("2025-04-19"));
        assert_eq!(l.older_date("2025-04-18"), None);
        assert_eq!(l.newer_date("2025-04-19"), Some("2025-04-20"));
        assert_eq!(l.newer_date("2025-04-20"), None);
        assert_eq!(l.older_date("1999-01-01"), None);
    }

    #[test]
    fn phases_cycle() {
        let l = lookups();
        assert_eq!(l.next_phase(1), 2);
        assert_eq!(l.next_phase(3), 1);
        assert_eq!(l.next_phase(99), 3);
    }

    #[test]
    fn empty_or_malformed_sets_fail_startup() {
        assert!(
            Lookups::from_records(ValidDates::default(), ValidPhases { phases: vec![1] }).is_err()
        );
        assert!(
            Lookups::from_records(
                ValidDates {
                    dates: vec!["2025-04-20".to_string()]
                },
                ValidPhases::default()
            )
            .is_err()
        );
        assert!(
            Lookups::from_records(
                ValidDates {
                    dates: vec!["April 20".to_string()]
                },
                ValidPhases { phases: vec![1] }
            )
            .is_err()
        );
    }
}
