use crate::core::models::compound::Compound;
use crate::core::models::element::Element;
use crate::core::models::equipment::Equipment;
use crate::core::utils::formula::normalize_formula;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../../../data/catalog.toml");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    compounds: Vec<Compound>,
    #[serde(default)]
    equipment: Vec<Equipment>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG, "<builtin>")
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content).map_err(|e| CatalogError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        catalog.validate()?;
        debug!(
            "Loaded catalog from {}: {} elements, {} compounds, {} equipment.",
            origin,
            catalog.elements.len(),
            catalog.compounds.len(),
            catalog.equipment.len()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        check_unique_ids("elements", self.elements.iter().map(|e| e.id.as_str()))?;
        check_unique_ids("compounds", self.compounds.iter().map(|c| c.id.as_str()))?;
        check_unique_ids("equipment", self.equipment.iter().map(|e| e.id.as_str()))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// Looks an element up by id or symbol, ignoring case.
    pub fn element(&self, key: &str) -> Option<&Element> {
        let key = key.trim();
        self.elements
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(key) || e.symbol.eq_ignore_ascii_case(key))
    }

    /// Looks a compound up by id, formula (subscripts optional) or name, ignoring case.
    pub fn compound(&self, key: &str) -> Option<&Compound> {
        let key = key.trim();
        let normalized = normalize_formula(key);
        self.compounds.iter().find(|c| {
            c.id.eq_ignore_ascii_case(key)
                || normalize_formula(&c.formula).eq_ignore_ascii_case(&normalized)
                || c.name.eq_ignore_ascii_case(key)
        })
    }

    pub fn equipment_item(&self, key: &str) -> Option<&Equipment> {
        let key = key.trim();
        self.equipment
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(key) || e.name.eq_ignore_ascii_case(key))
    }

    pub fn search_elements(&self, term: &str) -> Vec<&Element> {
        let term = term.to_lowercase();
        self.elements
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&term) || e.symbol.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn search_compounds(&self, term: &str) -> Vec<&Compound> {
        let term = normalize_formula(&term.to_lowercase());
        self.compounds
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&term)
                    || normalize_formula(&c.formula).to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn equipment_for_grade(&self, grade: Option<u8>) -> Vec<&Equipment> {
        self.equipment
            .iter()
            .filter(|e| grade.is_none_or(|g| e.available_for_grade(g)))
            .collect()
    }
}

fn check_unique_ids<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Duplicate id '{id}' in catalog table '{table}'")]
    DuplicateId { table: &'static str, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::compound::CompoundKind;
    use crate::core::models::element::ElementCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_catalog_parses_with_expected_sizes() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.elements().len(), 56);
        assert_eq!(catalog.compounds().len(), 36);
        assert!(catalog.equipment().len() >= 40);
    }

    #[test]
    fn builtin_catalog_contains_recipe_reactants() {
        let catalog = Catalog::builtin().unwrap();
        let sodium = catalog.element("Na").unwrap();
        assert_eq!(sodium.category, ElementCategory::AlkaliMetal);
        assert!(catalog.element("cu").is_some());

        let water = catalog.compound("H2O").unwrap();
        assert_eq!(water.id, "h2o");
        let hcl = catalog.compound("hcl").unwrap();
        assert_eq!(hcl.kind, CompoundKind::Acid);
        assert_eq!(catalog.compound("Sodium Hydroxide").unwrap().kind, CompoundKind::Base);
    }

    #[test]
    fn equipment_lookup_by_id_or_name() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.equipment_item("bunsen-burner").unwrap().name, "Bunsen Burner");
        assert_eq!(catalog.equipment_item("glass rod").unwrap().id, "glass-rod");
        assert!(catalog.equipment_item("flux capacitor").is_none());
    }

    #[test]
    fn search_matches_name_symbol_and_formula() {
        let catalog = Catalog::builtin().unwrap();
        let hits: Vec<_> = catalog.search_elements("sod").iter().map(|e| e.symbol.clone()).collect();
        assert_eq!(hits, vec!["Na".to_string()]);

        let hits = catalog.search_compounds("h2so4");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "h2so4");
    }

    #[test]
    fn grade_filter_hides_advanced_equipment_for_younger_grades() {
        let catalog = Catalog::builtin().unwrap();
        let all = catalog.equipment_for_grade(None).len();
        let grade_six = catalog.equipment_for_grade(Some(6));
        assert!(grade_six.len() < all);
        assert!(grade_six.iter().all(|e| e.min_grade.is_none()));
        assert_eq!(catalog.equipment_for_grade(Some(12)).len(), all);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::from_toml_str(
            r##"
            [[compounds]]
            id = "hcl"
            formula = "HCl"
            name = "Hydrochloric Acid"
            color = "#ffff99"
            type = "acid"

            [[compounds]]
            id = "hcl"
            formula = "HCl"
            name = "Hydrochloric Acid"
            color = "#ffff99"
            type = "acid"
            "##,
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateId { table: "compounds", .. })
        ));
    }

    #[test]
    fn load_reads_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
            [[elements]]
            id = "k"
            symbol = "K"
            name = "Potassium"
            atomic-number = 19
            category = "alkali metal"
            color = "#8f40d4"
            "##
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.elements().len(), 1);
        assert!(catalog.compounds().is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let result = Catalog::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn unknown_top_level_table_is_rejected() {
        let result = Catalog::from_toml_str("[[reagents]]\nid = \"x\"\n");
        assert!(matches!(result, Err(CatalogError::Toml { .. })));
    }
}
