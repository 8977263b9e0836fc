use crate::core::models::equipment::Equipment;
use crate::engine::safety::SafetyAlert;
use crate::engine::state::{BeakerContents, ReactingFlag};

const MIN_LIQUID_LEVEL: u32 = 15;
const MAX_LIQUID_LEVEL: u32 = 85;
const LEVEL_PER_ITEM: u32 = 10;

const SHOWN_ELEMENTS: usize = 3;
const SHOWN_COMPOUNDS: usize = 2;
const SHOWN_ITEMS_LIMIT: usize = 5;
const SHOWN_REACTIONS: usize = 2;

const TRANSPARENT: &str = "transparent";
const FALLBACK_LIQUID: &str = "#87ceeb";

/// Colour pairs that tint the liquid when both are present, checked in order.
const MIXED_COLORS: &[(&str, &str, &str)] = &[
    ("#ff0d0d", "#3050f8", "#8B4CB8"), // oxygen + nitrogen
    ("#ab5cf2", "#87ceeb", "#FFB84D"), // sodium + water
    ("#c88033", "#ffff99", "#66BB6A"), // copper + hydrochloric acid
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cool,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn of(celsius: f64) -> Self {
        if celsius > 100.0 {
            TemperatureBand::Hot
        } else if celsius > 50.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Cool
        }
    }
}

/// Everything a renderer needs to draw the beaker, derived from session state on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct BeakerView {
    pub liquid_level_percent: u32,
    pub liquid_color: String,
    pub temperature: f64,
    pub temperature_band: TemperatureBand,
    /// `None` while the beaker is empty.
    pub ph: Option<f64>,
    pub badges: Vec<String>,
    pub recent_reactions: Vec<String>,
    pub alert: Option<SafetyAlert>,
    pub reacting: bool,
    pub selected_equipment: Option<String>,
    pub can_clear: bool,
}

impl BeakerView {
    pub fn new(
        contents: &BeakerContents,
        alert: Option<SafetyAlert>,
        reacting: ReactingFlag,
        selected_equipment: Option<&Equipment>,
    ) -> Self {
        let has_contents = !contents.is_empty();
        let skip = contents.reactions.len().saturating_sub(SHOWN_REACTIONS);
        Self {
            liquid_level_percent: liquid_level(contents.item_count()),
            liquid_color: liquid_color(contents),
            temperature: contents.temperature,
            temperature_band: TemperatureBand::of(contents.temperature),
            ph: has_contents.then_some(contents.ph),
            badges: badges(contents),
            recent_reactions: contents.reactions[skip..].to_vec(),
            alert,
            reacting: reacting == ReactingFlag::Reacting,
            selected_equipment: selected_equipment.map(|e| e.name.clone()),
            can_clear: has_contents,
        }
    }
}

fn liquid_level(item_count: usize) -> u32 {
    let raw = u32::try_from(item_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(LEVEL_PER_ITEM)
        .saturating_add(MIN_LIQUID_LEVEL);
    raw.clamp(MIN_LIQUID_LEVEL, MAX_LIQUID_LEVEL)
}

fn liquid_color(contents: &BeakerContents) -> String {
    if contents.is_empty() {
        return TRANSPARENT.to_string();
    }

    let colors: Vec<&str> = contents
        .elements
        .iter()
        .map(|e| e.color.as_str())
        .chain(contents.compounds.iter().map(|c| c.color.as_str()))
        .collect();
    let has = |wanted: &str| colors.iter().any(|c| c.eq_ignore_ascii_case(wanted));

    for (a, b, mixed) in MIXED_COLORS {
        if has(a) && has(b) {
            return mixed.to_string();
        }
    }

    colors.last().copied().unwrap_or(FALLBACK_LIQUID).to_string()
}

fn badges(contents: &BeakerContents) -> Vec<String> {
    let mut badges: Vec<String> = contents
        .elements
        .iter()
        .take(SHOWN_ELEMENTS)
        .map(|e| e.symbol.clone())
        .chain(
            contents
                .compounds
                .iter()
                .take(SHOWN_COMPOUNDS)
                .map(|c| c.formula.clone()),
        )
        .collect();

    let total = contents.item_count();
    if total > SHOWN_ITEMS_LIMIT {
        badges.push(format!("+{} more", total - SHOWN_ITEMS_LIMIT));
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    fn contents_with(elements: &[&str], compounds: &[&str]) -> BeakerContents {
        let catalog = Catalog::builtin().unwrap();
        let mut contents = BeakerContents::default();
        for key in elements {
            contents.elements.push(catalog.element(key).unwrap().clone());
        }
        for key in compounds {
            contents.compounds.push(catalog.compound(key).unwrap().clone());
        }
        contents
    }

    fn view_of(contents: &BeakerContents) -> BeakerView {
        BeakerView::new(contents, None, ReactingFlag::Idle, None)
    }

    #[test]
    fn empty_beaker_is_transparent_and_cannot_be_cleared() {
        let view = view_of(&BeakerContents::default());
        assert_eq!(view.liquid_level_percent, 15);
        assert_eq!(view.liquid_color, "transparent");
        assert_eq!(view.ph, None);
        assert!(view.badges.is_empty());
        assert!(!view.can_clear);
    }

    #[test]
    fn liquid_level_grows_per_item_and_caps() {
        assert_eq!(liquid_level(1), 25);
        assert_eq!(liquid_level(7), 85);
        assert_eq!(liquid_level(100), 85);
    }

    #[test]
    fn known_mixtures_tint_the_liquid() {
        assert_eq!(view_of(&contents_with(&["O", "N"], &[])).liquid_color, "#8B4CB8");
        assert_eq!(view_of(&contents_with(&["Na"], &["H2O"])).liquid_color, "#FFB84D");
        assert_eq!(view_of(&contents_with(&["Cu"], &["HCl"])).liquid_color, "#66BB6A");
    }

    #[test]
    fn other_mixtures_take_the_last_colour() {
        let view = view_of(&contents_with(&["Fe"], &["KI"]));
        assert_eq!(view.liquid_color, "#ffccff");
    }

    #[test]
    fn badges_truncate_with_remainder_count() {
        let contents = contents_with(&["H", "He", "Li", "Be"], &["NaCl", "KCl", "KI"]);
        let view = view_of(&contents);
        assert_eq!(
            view.badges,
            vec!["H", "He", "Li", "NaCl", "KCl", "+2 more"]
        );
    }

    #[test]
    fn only_the_last_two_reactions_are_shown() {
        let mut contents = contents_with(&["Na"], &["H2O"]);
        contents.reactions = vec!["a".into(), "b".into(), "c".into()];
        let view = view_of(&contents);
        assert_eq!(view.recent_reactions, vec!["b", "c"]);
        assert_eq!(view.ph, Some(7.0));
    }

    #[test]
    fn temperature_bands_follow_thresholds() {
        assert_eq!(TemperatureBand::of(20.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::of(50.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::of(70.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(100.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(120.0), TemperatureBand::Hot);
    }
}
