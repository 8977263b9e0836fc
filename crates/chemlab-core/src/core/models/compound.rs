use crate::core::utils::formula;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundKind {
    #[serde(rename = "acid")]
    Acid,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "salt")]
    Salt,
    #[serde(rename = "molecular")]
    Molecular,
    #[serde(rename = "alcohol")]
    Alcohol,
    #[serde(rename = "ether")]
    Ether,
    #[serde(rename = "organic acid")]
    OrganicAcid,
    #[serde(rename = "aromatic")]
    Aromatic,
}

impl CompoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundKind::Acid => "acid",
            CompoundKind::Base => "base",
            CompoundKind::Salt => "salt",
            CompoundKind::Molecular => "molecular",
            CompoundKind::Alcohol => "alcohol",
            CompoundKind::Ether => "ether",
            CompoundKind::OrganicAcid => "organic acid",
            CompoundKind::Aromatic => "aromatic",
        }
    }
}

impl fmt::Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Compound {
    pub id: String,
    pub formula: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: CompoundKind,
}

impl Compound {
    /// Formula comparison ignoring Unicode subscripts, so `H₂O` matches `H2O`.
    pub fn has_formula(&self, other: &str) -> bool {
        formula::formulas_match(&self.formula, other)
    }

    pub fn is_water(&self) -> bool {
        self.name.to_lowercase().contains("water")
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Compound {
        Compound {
            id: "h2o".to_string(),
            formula: "H₂O".to_string(),
            name: "Water".to_string(),
            color: "#87ceeb".to_string(),
            kind: CompoundKind::Molecular,
        }
    }

    #[test]
    fn has_formula_matches_subscript_and_ascii_forms() {
        let c = water();
        assert!(c.has_formula("H2O"));
        assert!(c.has_formula("H₂O"));
        assert!(!c.has_formula("H2O2"));
    }

    #[test]
    fn is_water_ignores_case() {
        let mut c = water();
        assert!(c.is_water());
        c.name = "Distilled water".to_string();
        assert!(c.is_water());
        c.name = "Ammonia".to_string();
        assert!(!c.is_water());
    }

    #[test]
    fn type_key_maps_to_kind() {
        let c: Compound = serde_json::from_str(
            r##"{"id":"ch3cooh","formula":"CH3COOH","name":"Acetic Acid","color":"#fff8dc","type":"organic acid"}"##,
        )
        .unwrap();
        assert_eq!(c.kind, CompoundKind::OrganicAcid);
        assert_ne!(c.kind, CompoundKind::Acid);
    }
}
