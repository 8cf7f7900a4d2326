use crate::model::PunchCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StampCategory {
    Arcade,
    Casual,
    Custom,
    Extreme,
    Hub,
    Practice,
    Ranked,
    Versus,
    WorldTour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub category: StampCategory,
    pub icon: &'static str,
    pub label: &'static str,
}

impl StampCategory {
    pub fn stamp(self) -> Stamp {
        let (icon, label) = match self {
            StampCategory::Arcade => ("bi bi-joystick", "HIGH SCORER"),
            StampCategory::Casual => ("bi bi-joystick", "KEEPING IT CASUAL"),
            StampCategory::Custom => ("bi bi-door-closed", "BACKROOM BRAWLER"),
            StampCategory::Extreme => ("bi bi-exclamation-octagon", "X GAMES MODE"),
            StampCategory::Hub => ("bi bi-chat-right-text", "HUB CRITTER"),
            StampCategory::Practice => ("bi bi-mortarboard", "BACK TO THE LAB AGAIN"),
            StampCategory::Ranked => ("bi bi-trophy", "RISE AND GRIND"),
            StampCategory::Versus => ("bi bi-people-fill", "KEEPING IT LOCAL"),
            StampCategory::WorldTour => ("bi bi-globe2", "WORLD TOURIST"),
        };
        Stamp {
            category: self,
            icon,
            label,
        }
    }

    /// Terminal stand-in for the icon class.
    pub fn glyph(self) -> &'static str {
        match self {
            StampCategory::Arcade | StampCategory::Casual => "🕹",
            StampCategory::Custom => "🚪",
            StampCategory::Extreme => "⚠",
            StampCategory::Hub => "💬",
            StampCategory::Practice => "🎓",
            StampCategory::Ranked => "🏆",
            StampCategory::Versus => "👥",
            StampCategory::WorldTour => "🌐",
        }
    }
}

fn time_list(card: &PunchCard) -> [(StampCategory, i64); 9] {
    [
        (StampCategory::Arcade, card.arcade_time),
        (StampCategory::Casual, card.casual_time),
        (StampCategory::Custom, card.custom_time),
        (StampCategory::Extreme, card.extreme_time),
        (StampCategory::Hub, card.hub_time),
        (StampCategory::Practice, card.practice_time),
        (StampCategory::Ranked, card.ranked_time),
        (StampCategory::Versus, card.versus_time),
        (StampCategory::WorldTour, card.wt_time),
    ]
}

fn match_list(card: &PunchCard) -> [(StampCategory, i64); 4] {
    [
        (StampCategory::Casual, card.casual_matches),
        (StampCategory::Custom, card.custom_matches),
        (StampCategory::Hub, card.hub_matches),
        (StampCategory::Ranked, card.ranked_matches),
    ]
}

/// Only a strictly greater value replaces the running best.
fn first_max(list: &[(StampCategory, i64)]) -> (StampCategory, i64) {
    let mut best = list[0];
    for entry in &list[1..] {
        if entry.1 > best.1 {
            best = *entry;
        }
    }
    best
}

/// Dominant activity for the period: most time played, else most matches.
///
/// The match-count fallback applies even when every count is zero, so an
/// all-zero card still gets the first match category's stamp.
pub fn select_stamp(card: &PunchCard) -> Stamp {
    let (time_category, time_value) = first_max(&time_list(card));
    if time_value > 0 {
        return time_category.stamp();
    }
    let (match_category, _) = first_max(&match_list(card));
    match_category.stamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_greatest_time_wins() {
        let card = PunchCard {
            hub_time: 500,
            ranked_time: 900,
            practice_time: 899,
            ..PunchCard::default()
        };
        assert_eq!(select_stamp(&card).category, StampCategory::Ranked);
        assert_eq!(select_stamp(&card).label, "RISE AND GRIND");
    }

    #[test]
    fn ties_keep_first_declared_time_category() {
        let card = PunchCard {
            extreme_time: 300,
            versus_time: 300,
            wt_time: 300,
            ..PunchCard::default()
        };
        assert_eq!(select_stamp(&card).category, StampCategory::Extreme);

        let card = PunchCard {
            arcade_time: 10,
            wt_time: 10,
            ..PunchCard::default()
        };
        assert_eq!(select_stamp(&card).category, StampCategory::Arcade);
    }

    #[test]
    fn zero_time_falls_back_to_match_counts() {
        let card = PunchCard {
            custom_matches: 4,
            ranked_matches: 4,
            hub_matches: 2,
            ..PunchCard::default()
        };
        let stamp = select_stamp(&card);
        assert_eq!(stamp.category, StampCategory::Custom);
        assert_eq!(stamp.icon, "bi bi-door-closed");
    }

    #[test]
    fn all_zero_card_still_gets_first_match_stamp() {
        let stamp = select_stamp(&PunchCard::default());
        assert_eq!(stamp.category, StampCategory::Casual);
        assert_eq!(stamp.label, "KEEPING IT CASUAL");
    }

    #[test]
    fn negative_time_deltas_do_not_count_as_play() {
        let card = PunchCard {
            hub_time: -20,
            hub_matches: 3,
            ..PunchCard::default()
        };
        assert_eq!(select_stamp(&card).category, StampCategory::Hub);
    }
}
