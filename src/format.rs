use chrono::{NaiveDate, NaiveDateTime};

/// Seconds to hours with two decimals, e.g. `3600` -> `"1.00 Hours"`.
pub fn convert_to_hours(seconds: Option<i64>) -> String {
    let seconds = seconds.unwrap_or(0);
    format!("{:.2} Hours", seconds as f64 / 3600.0)
}

/// Integer with `,` thousands separators, e.g. `1000` -> `"1,000"`.
pub fn add_commas(value: Option<i64>) -> String {
    let value = value.unwrap_or(0);
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn punch_card_number(date: &str, player_id: &str) -> String {
    let digits: String = date.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("No. {digits}-{}", player_id.trim())
}

const LEAGUE_RANKS: [(i64, &str); 36] = [
    (0, "Rookie 1"),
    (200, "Rookie 2"),
    (400, "Rookie 3"),
    (600, "Rookie 4"),
    (800, "Rookie 5"),
    (1000, "Iron 1"),
    (1400, "Iron 2"),
    (1800, "Iron 3"),
    (2200, "Iron 4"),
    (2600, "Iron 5"),
    (3000, "Bronze 1"),
    (3400, "Bronze 2"),
    (3800, "Bronze 3"),
    (4200, "Bronze 4"),
    (4600, "Bronze 5"),
    (5000, "Silver 1"),
    (5800, "Silver 2"),
    (6600, "Silver 3"),
    (7400, "Silver 4"),
    (8200, "Silver 5"),
    (9000, "Gold 1"),
    (9800, "Gold 2"),
    (10600, "Gold 3"),
    (11400, "Gold 4"),
    (12200, "Gold 5"),
    (13000, "Platinum 1"),
    (14200, "Platinum 2"),
    (15400, "Platinum 3"),
    (16600, "Platinum 4"),
    (17800, "Platinum 5"),
    (19000, "Diamond 1"),
    (20200, "Diamond 2"),
    (21400, "Diamond 3"),
    (22600, "Diamond 4"),
    (23800, "Diamond 5"),
    (25000, "Master"),
];

/// League name for a league-point total.
pub fn league_rank(lp: i64) -> &'static str {
    if lp < 0 {
        return "Unranked";
    }
    LEAGUE_RANKS
        .iter()
        .rev()
        .find(|(floor, _)| lp >= *floor)
        .map(|(_, name)| *name)
        .unwrap_or("Unranked")
}

pub fn format_last_played(raw: &str) -> String {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    let cleaned = raw.trim();
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    cleaned.to_string()
}
