use crate::core::models::compound::Compound;
use crate::core::models::element::Element;
use crate::engine::config::LabConfig;

/// The simulated chemical state of the beaker.
///
/// Elements and compounds keep insertion order and duplicates. Reactions only grow until the
/// beaker is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct BeakerContents {
    pub elements: Vec<Element>,
    pub compounds: Vec<Compound>,
    pub temperature: f64,
    pub ph: f64,
    pub reactions: Vec<String>,
}

impl BeakerContents {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            elements: Vec::new(),
            compounds: Vec::new(),
            temperature: config.initial_temperature,
            ph: config.initial_ph,
            reactions: Vec::new(),
        }
    }

    pub fn reset(&mut self, config: &LabConfig) {
        *self = Self::new(config);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.compounds.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.elements.len() + self.compounds.len()
    }

    /// Raises the temperature by `increment`, never past `ceiling`. Returns the new value.
    pub fn heat(&mut self, increment: f64, ceiling: f64) -> f64 {
        self.temperature = (self.temperature + increment).min(ceiling);
        self.temperature
    }
}

impl Default for BeakerContents {
    fn default() -> Self {
        Self::new(&LabConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactingFlag {
    #[default]
    Idle,
    Reacting,
}
