use crate::engine::safety::SafetyAlert;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum LabEvent {
    ElementAdded { symbol: String },
    CompoundAdded { formula: String },
    EquipmentSelected { name: String },
    TemperatureChanged { celsius: f64 },
    AlertChanged(Option<SafetyAlert>),
    ReactionStarted { due: Duration },
    ReactionResolved { equations: Vec<String> },
    Stirred { due: Duration },
    Settled,
    Cleared,
    Observation(String),
}

pub type EventCallback<'a> = Box<dyn Fn(LabEvent) + Send + Sync + 'a>;

#[derive(Default)]
pub struct EventReporter<'a> {
    callback: Option<EventCallback<'a>>,
}

impl<'a> EventReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: EventCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: LabEvent) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
