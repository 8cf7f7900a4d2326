use ratatui::style::Color;

/// Card art for a character plus what the terminal draws in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCard {
    pub name: &'static str,
    pub asset: &'static str,
    pub tag: &'static str,
    pub color: Color,
}

const fn card(name: &'static str, asset: &'static str, tag: &'static str, color: Color) -> CharCard {
    CharCard {
        name,
        asset,
        tag,
        color,
    }
}

pub const RANDOM: CharCard = card("Random", "img/card/card_random.jpg", "???", Color::DarkGray);

const CARDS: [CharCard; 26] = [
    card("A.K.I.", "img/card/card_aki.jpg", "AKI", Color::Magenta),
    card("Blanka", "img/card/card_blanka.jpg", "BLA", Color::Green),
    card("Cammy", "img/card/card_cammy.jpg", "CAM", Color::LightGreen),
    card("Chun-Li", "img/card/card_chunli.jpg", "CHU", Color::Blue),
    card("Dee Jay", "img/card/card_deejay.jpg", "DJ", Color::Yellow),
    card("Dhalsim", "img/card/card_dhalsim.jpg", "DHA", Color::LightRed),
    card("Ed", "img/card/card_ed.jpg", "ED", Color::LightBlue),
    card("Akuma", "img/card/card_gouki.jpg", "AKU", Color::Red),
    card("Guile", "img/card/card_guile.jpg", "GUI", Color::Green),
    card("E. Honda", "img/card/card_honda.jpg", "HON", Color::LightBlue),
    card("Jamie", "img/card/card_jamie.jpg", "JAM", Color::Yellow),
    card("JP", "img/card/card_jp.jpg", "JP", Color::Magenta),
    card("Juri", "img/card/card_juri.jpg", "JUR", Color::LightMagenta),
    card("Ken", "img/card/card_ken.jpg", "KEN", Color::Red),
    card("Kimberly", "img/card/card_kimberly.jpg", "KIM", Color::LightYellow),
    card("Lily", "img/card/card_lily.jpg", "LIL", Color::LightCyan),
    card("Luke", "img/card/card_luke.jpg", "LUK", Color::Cyan),
    card("Mai", "img/card/card_mai.jpg", "MAI", Color::LightRed),
    card("Manon", "img/card/card_manon.jpg", "MAN", Color::White),
    card("Marisa", "img/card/card_marisa.jpg", "MAR", Color::LightYellow),
    card("Rashid", "img/card/card_rashid.jpg", "RAS", Color::LightGreen),
    card("Ryu", "img/card/card_ryu.jpg", "RYU", Color::White),
    card("Terry", "img/card/card_terry.jpg", "TER", Color::Red),
    card("M. Bison", "img/card/card_vega.jpg", "BIS", Color::LightMagenta),
    card("Zangief", "img/card/card_zangief.jpg", "ZAN", Color::LightRed),
    RANDOM,
];

/// Absent or unknown names fall back to the "Random" card.
pub fn char_card(name: Option<&str>) -> CharCard {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return RANDOM;
    };
    CARDS
        .iter()
        .find(|c| c.name == name)
        .copied()
        .unwrap_or(RANDOM)
}
