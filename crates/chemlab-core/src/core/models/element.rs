use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementCategory {
    #[serde(rename = "nonmetal")]
    Nonmetal,
    #[serde(rename = "noble gas")]
    NobleGas,
    #[serde(rename = "alkali metal")]
    AlkaliMetal,
    #[serde(rename = "alkaline earth metal")]
    AlkalineEarthMetal,
    #[serde(rename = "metalloid")]
    Metalloid,
    #[serde(rename = "halogen")]
    Halogen,
    #[serde(rename = "transition metal")]
    TransitionMetal,
    #[serde(rename = "post-transition metal")]
    PostTransitionMetal,
}

impl ElementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Nonmetal => "nonmetal",
            ElementCategory::NobleGas => "noble gas",
            ElementCategory::AlkaliMetal => "alkali metal",
            ElementCategory::AlkalineEarthMetal => "alkaline earth metal",
            ElementCategory::Metalloid => "metalloid",
            ElementCategory::Halogen => "halogen",
            ElementCategory::TransitionMetal => "transition metal",
            ElementCategory::PostTransitionMetal => "post-transition metal",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chemical element as listed in the reference catalog.
///
/// Catalog files use kebab-case keys; drag-and-drop payloads carry the camelCase
/// `atomicNumber`, which is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Element {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(alias = "atomicNumber")]
    pub atomic_number: u32,
    pub category: ElementCategory,
    pub color: String,
}

impl Element {
    pub fn is_alkali_metal(&self) -> bool {
        self.category == ElementCategory::AlkaliMetal
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, #{})", self.name, self.symbol, self.atomic_number)
    }
}
