use phf::{Map, phf_map};

static SUBSCRIPT_DIGITS: Map<char, char> = phf_map! {
    '₀' => '0', '₁' => '1', '₂' => '2', '₃' => '3', '₄' => '4',
    '₅' => '5', '₆' => '6', '₇' => '7', '₈' => '8', '₉' => '9',
};

/// Rewrites Unicode subscript digits as ASCII digits and trims surrounding whitespace.
pub fn normalize_formula(formula: &str) -> String {
    formula
        .trim()
        .chars()
        .map(|c| SUBSCRIPT_DIGITS.get(&c).copied().unwrap_or(c))
        .collect()
}

pub fn formulas_match(a: &str, b: &str) -> bool {
    normalize_formula(a) == normalize_formula(b)
}
