#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Roster,
    Leaderboards,
    Player { player_id: String },
    NotFound { path: String },
}

impl Route {
    /// Maps `/`, `/roster`, `/leaderboards` and `/player/:playerId`; anything
    /// else is not found. Query strings, fragments and trailing slashes are
    /// ignored.
    pub fn parse(raw: &str) -> Self {
        let path = raw
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["roster"] => Route::Roster,
            ["leaderboards"] => Route::Leaderboards,
            ["player", player_id] => Route::Player {
                player_id: (*player_id).to_string(),
            },
            _ => Route::NotFound {
                path: raw.trim().to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Roster => "/roster".to_string(),
            Route::Leaderboards => "/leaderboards".to_string(),
            Route::Player { player_id } => format!("/player/{player_id}"),
            Route::NotFound { path } => path.clone(),
        }
    }
}
