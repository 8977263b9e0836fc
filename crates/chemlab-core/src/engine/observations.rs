use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub at: Duration,
    pub text: String,
}

impl Observation {
    pub fn timestamp(&self) -> String {
        let secs = self.at.as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.timestamp(), self.text)
    }
}

/// Append-only notebook of what happened during a session.
#[derive(Debug, Clone, Default)]
pub struct ObservationLog {
    entries: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, at: Duration, text: impl Into<String>) -> &Observation {
        self.entries.push(Observation {
            at,
            text: text.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn last(&self) -> Option<&Observation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }
}
