use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentCategory {
    Glassware,
    Heating,
    Measuring,
    Tools,
    Observation,
    Separation,
    Safety,
    Advanced,
    Storage,
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentCategory::Glassware => "Glassware",
            EquipmentCategory::Heating => "Heating",
            EquipmentCategory::Measuring => "Measuring",
            EquipmentCategory::Tools => "Tools",
            EquipmentCategory::Observation => "Observation",
            EquipmentCategory::Separation => "Separation",
            EquipmentCategory::Safety => "Safety",
            EquipmentCategory::Advanced => "Advanced",
            EquipmentCategory::Storage => "Storage",
        };
        f.write_str(name)
    }
}

/// A piece of laboratory equipment. Whether it is currently selected is session state and
/// lives in [`crate::workflows::session::LabSession`], not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub category: EquipmentCategory,
    /// Lowest school grade the item is shown to. `None` means every grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_grade: Option<u8>,
}

impl Equipment {
    pub fn available_for_grade(&self, grade: u8) -> bool {
        self.min_grade.is_none_or(|min| grade >= min)
    }
}
