use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub timeout: Duration,
    pub start_route: String,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Reads `FSN_*` variables. Call after the `.env` files are loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup("FSN_API_BASE")
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let timeout_secs = lookup("FSN_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let start_route = lookup("FSN_START_ROUTE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| "/".to_string());
        let log_file = lookup("FSN_LOG_FILE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            api_base,
            timeout: Duration::from_secs(timeout_secs),
            start_route,
            log_file,
        }
    }

    /// A route given on the command line overrides `FSN_START_ROUTE`.
    pub fn with_start_route_arg(mut self, arg: Option<String>) -> Self {
        if let Some(route) = arg.map(|raw| raw.trim().to_string())
            && !route.is_empty()
        {
            self.start_route = route;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base, "http://localhost:5000");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.start_route, "/");
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn trims_base_url_and_clamps_timeout() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("FSN_API_BASE", " https://api.fightstreeter.com/ "),
            ("FSN_HTTP_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg.api_base, "https://api.fightstreeter.com");
        assert_eq!(cfg.timeout, Duration::from_secs(1));
    }

    #[test]
    fn cli_route_overrides_env() {
        let cfg = Config::from_lookup(lookup_from(&[("FSN_START_ROUTE", "/leaderboards")]))
            .with_start_route_arg(Some("/player/42".to_string()));
        assert_eq!(cfg.start_route, "/player/42");

        let cfg = Config::from_lookup(lookup_from(&[("FSN_START_ROUTE", "/leaderboards")]))
            .with_start_route_arg(Some("  ".to_string()));
        assert_eq!(cfg.start_route, "/leaderboards");
    }
}
