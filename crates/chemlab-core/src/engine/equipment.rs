use crate::core::models::equipment::Equipment;
use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentEffect {
    /// Raise the beaker temperature by the configured step, clamped to the ceiling.
    Heat,
    /// Stir the mixture; the beaker animates briefly.
    Stir,
    /// Selecting the item has no chemical effect.
    Select,
}

static EFFECTS_BY_NAME: Map<&'static str, EquipmentEffect> = phf_map! {
    "Bunsen Burner" => EquipmentEffect::Heat,
    "Glass Rod" => EquipmentEffect::Stir,
};

impl EquipmentEffect {
    pub fn of(equipment: &Equipment) -> Self {
        Self::for_name(&equipment.name)
    }

    pub fn for_name(name: &str) -> Self {
        EFFECTS_BY_NAME
            .get(name.trim())
            .copied()
            .unwrap_or(EquipmentEffect::Select)
    }
}
