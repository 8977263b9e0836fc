use crate::core::models::compound::{Compound, CompoundKind};
use crate::core::models::element::Element;
use std::fmt;

/// The single active safety warning. A fresh evaluation replaces whatever was active before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyAlert {
    AcidBaseMix,
    AlkaliMetalWater,
}

impl SafetyAlert {
    pub fn message(&self) -> &'static str {
        match self {
            SafetyAlert::AcidBaseMix => {
                "Mixing acids and bases can produce heat and gas. Exercise caution!"
            }
            SafetyAlert::AlkaliMetalWater => {
                "Alkali metals react violently with water! This would be dangerous in real life."
            }
        }
    }
}

impl fmt::Display for SafetyAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks run in priority order; the acid/base warning wins when both apply.
pub fn check_safety(elements: &[Element], compounds: &[Compound]) -> Option<SafetyAlert> {
    let has_acid = compounds.iter().any(|c| c.kind == CompoundKind::Acid);
    let has_base = compounds.iter().any(|c| c.kind == CompoundKind::Base);
    if has_acid && has_base {
        return Some(SafetyAlert::AcidBaseMix);
    }

    let has_alkali_metal = elements.iter().any(Element::is_alkali_metal);
    if has_alkali_metal && compounds.iter().any(Compound::is_water) {
        return Some(SafetyAlert::AlkaliMetalWater);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    struct Fixtures {
        catalog: Catalog,
    }

    impl Fixtures {
        fn new() -> Self {
            Self {
                catalog: Catalog::builtin().unwrap(),
            }
        }
        fn el(&self, key: &str) -> Element {
            self.catalog.element(key).unwrap().clone()
        }
        fn co(&self, key: &str) -> Compound {
            self.catalog.compound(key).unwrap().clone()
        }
    }

    #[test]
    fn empty_beaker_is_safe() {
        assert_eq!(check_safety(&[], &[]), None);
    }

    #[test]
    fn acid_and_base_raise_alert() {
        let f = Fixtures::new();
        let compounds = vec![f.co("HCl"), f.co("NaOH")];
        assert_eq!(check_safety(&[], &compounds), Some(SafetyAlert::AcidBaseMix));
    }

    #[test]
    fn acid_alone_or_base_alone_is_safe() {
        let f = Fixtures::new();
        assert_eq!(check_safety(&[], &[f.co("HCl"), f.co("HNO3")]), None);
        assert_eq!(check_safety(&[], &[f.co("NH3"), f.co("KOH")]), None);
    }

    #[test]
    fn organic_acid_does_not_count_as_acid() {
        let f = Fixtures::new();
        assert_eq!(check_safety(&[], &[f.co("CH3COOH"), f.co("NaOH")]), None);
    }

    #[test]
    fn alkali_metal_and_water_raise_alert() {
        let f = Fixtures::new();
        assert_eq!(
            check_safety(&[f.el("K")], &[f.co("H2O")]),
            Some(SafetyAlert::AlkaliMetalWater)
        );
    }

    #[test]
    fn non_alkali_metal_with_water_is_safe() {
        let f = Fixtures::new();
        assert_eq!(check_safety(&[f.el("Mg")], &[f.co("H2O")]), None);
    }

    #[test]
    fn acid_base_takes_precedence_over_alkali_water() {
        let f = Fixtures::new();
        let elements = vec![f.el("Na")];
        let compounds = vec![f.co("H2O"), f.co("HCl"), f.co("KOH")];
        assert_eq!(
            check_safety(&elements, &compounds),
            Some(SafetyAlert::AcidBaseMix)
        );
    }

    #[test]
    fn message_text_is_stable() {
        assert!(SafetyAlert::AcidBaseMix.to_string().starts_with("Mixing acids and bases"));
        assert!(SafetyAlert::AlkaliMetalWater.message().contains("react violently with water"));
    }
}
