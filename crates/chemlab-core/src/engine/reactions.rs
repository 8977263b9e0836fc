use crate::core::models::compound::Compound;
use crate::core::models::element::Element;

/// A fixed rule: when an element with `element_symbol` and a compound with `compound_formula`
/// are both present, `equation` is recorded and `observation` is written to the notebook.
///
/// Presence alone triggers a recipe. There is no stoichiometry and no consumption of
/// reactants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub element_symbol: &'static str,
    pub compound_formula: &'static str,
    pub equation: &'static str,
    pub observation: &'static str,
}

pub const SODIUM_WATER: Recipe = Recipe {
    element_symbol: "Na",
    compound_formula: "H2O",
    equation: "2Na + 2H2O → 2NaOH + H2",
    observation: "Vigorous bubbling observed! Hydrogen gas is being produced.",
};

pub const COPPER_HYDROCHLORIC_ACID: Recipe = Recipe {
    element_symbol: "Cu",
    compound_formula: "HCl",
    equation: "Cu + 2HCl → CuCl2 + H2",
    observation: "Solution turns blue-green. Copper chloride is forming.",
};

pub static RECIPES: &[Recipe] = &[SODIUM_WATER, COPPER_HYDROCHLORIC_ACID];

impl Recipe {
    pub fn is_satisfied(&self, elements: &[Element], compounds: &[Compound]) -> bool {
        elements.iter().any(|e| e.symbol == self.element_symbol)
            && compounds.iter().any(|c| c.has_formula(self.compound_formula))
    }
}

/// Every recipe whose reactants are present, in table order. Recipes are independent, so more
/// than one may fire at once.
pub fn evaluate_reactions(elements: &[Element], compounds: &[Compound]) -> Vec<&'static Recipe> {
    RECIPES
        .iter()
        .filter(|recipe| recipe.is_satisfied(elements, compounds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn nothing_fires_for_unrelated_contents() {
        let catalog = Catalog::builtin().unwrap();
        let elements = vec![catalog.element("Fe").unwrap().clone()];
        let compounds = vec![catalog.compound("NaCl").unwrap().clone()];
        assert!(evaluate_reactions(&elements, &compounds).is_empty());
    }

    #[test]
    fn sodium_and_catalog_water_fire_despite_subscript_formula() {
        let catalog = Catalog::builtin().unwrap();
        let elements = vec![catalog.element("Na").unwrap().clone()];
        let compounds = vec![catalog.compound("h2o").unwrap().clone()];
        assert_eq!(catalog.compound("h2o").unwrap().formula, "H₂O");

        let fired = evaluate_reactions(&elements, &compounds);
        assert_eq!(fired, vec![&SODIUM_WATER]);
    }

    #[test]
    fn both_recipes_fire_together_in_table_order() {
        let catalog = Catalog::builtin().unwrap();
        let elements = vec![
            catalog.element("Cu").unwrap().clone(),
            catalog.element("Na").unwrap().clone(),
        ];
        let compounds = vec![
            catalog.compound("HCl").unwrap().clone(),
            catalog.compound("H2O").unwrap().clone(),
        ];

        let equations: Vec<_> = evaluate_reactions(&elements, &compounds)
            .iter()
            .map(|r| r.equation)
            .collect();
        assert_eq!(
            equations,
            vec!["2Na + 2H2O → 2NaOH + H2", "Cu + 2HCl → CuCl2 + H2"]
        );
    }

    #[test]
    fn one_reactant_alone_does_not_fire() {
        let catalog = Catalog::builtin().unwrap();
        let elements = vec![catalog.element("Cu").unwrap().clone()];
        assert!(evaluate_reactions(&elements, &[]).is_empty());
        let compounds = vec![catalog.compound("HCl").unwrap().clone()];
        assert!(evaluate_reactions(&[], &compounds).is_empty());
    }
}
