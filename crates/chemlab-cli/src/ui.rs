use chemlab::engine::events::{EventCallback, LabEvent};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum UiEvent {
    Lab(LabEvent),
    Log(String),
}

pub struct UiManager {
    mp: Arc<MultiProgress>,
    state: SpinnerState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

/// One spinner is shown while any reaction or stir is pending.
#[derive(Default)]
struct SpinnerState {
    active_bar: Option<ProgressBar>,
    pending: usize,
    label: String,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            state: SpinnerState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        if let Some(bar) = self.state.active_bar.take() {
            bar.finish_and_clear();
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Lab(event) => self.handle_lab_event(event),
        }
    }

    fn handle_lab_event(&mut self, event: LabEvent) {
        match event {
            LabEvent::ReactionStarted { .. } => self.begin_activity("Reacting..."),
            LabEvent::Stirred { .. } => self.begin_activity("Stirring..."),
            LabEvent::ReactionResolved { equations } => {
                for equation in equations {
                    self.mp.println(format!("⚗ {}", equation)).ok();
                }
                self.end_activity();
            }
            LabEvent::Settled => self.end_activity(),
            LabEvent::AlertChanged(Some(alert)) => {
                self.mp.println(format!("⚠ {}", alert)).ok();
            }
            LabEvent::TemperatureChanged { celsius } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_message(format!("{} ({}°C)", self.state.label, celsius));
                }
            }
            LabEvent::Observation(text) => {
                self.mp.println(format!("  {}", text)).ok();
            }
            other => debug!("UI ignoring lab event: {:?}", other),
        }
    }

    fn begin_activity(&mut self, message: &str) {
        self.state.pending += 1;
        let bar = self.state.active_bar.get_or_insert_with(|| {
            let pb = self.mp.add(ProgressBar::new_spinner());
            pb.enable_steady_tick(Duration::from_millis(80));
            pb.set_style(Self::spinner_style());
            pb
        });
        bar.set_message(message.to_string());
        self.state.label = message.to_string();
    }

    fn end_activity(&mut self) {
        self.state.pending = self.state.pending.saturating_sub(1);
        if self.state.pending == 0 {
            if let Some(bar) = self.state.active_bar.take() {
                bar.finish_and_clear();
            }
            self.state.label.clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }
}

#[derive(Clone)]
pub struct SessionEventHandler {
    sender: mpsc::Sender<UiEvent>,
}

impl SessionEventHandler {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    pub fn get_callback(&self) -> EventCallback<'static> {
        let sender = self.sender.clone();
        Box::new(move |event: LabEvent| {
            if let Err(e) = sender.try_send(UiEvent::Lab(event)) {
                warn!("Failed to send lab event to UI channel: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemlab::engine::safety::SafetyAlert;

    fn setup_manager() -> (UiManager, mpsc::Sender<UiEvent>) {
        let (manager, sender, _) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        (manager, sender)
    }

    fn started() -> UiEvent {
        UiEvent::Lab(LabEvent::ReactionStarted {
            due: Duration::from_millis(2000),
        })
    }

    #[test]
    fn reaction_start_creates_spinner() {
        let (mut manager, _) = setup_manager();
        assert!(manager.state.active_bar.is_none());

        manager.handle_event(started());

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Reacting...");
        assert_eq!(manager.state.pending, 1);
    }

    #[test]
    fn overlapping_activities_share_one_spinner() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(started());
        manager.handle_event(UiEvent::Lab(LabEvent::Stirred {
            due: Duration::from_millis(1000),
        }));

        assert_eq!(manager.state.pending, 2);
        assert_eq!(
            manager.state.active_bar.as_ref().unwrap().message(),
            "Stirring..."
        );

        manager.handle_event(UiEvent::Lab(LabEvent::Settled));
        assert!(manager.state.active_bar.is_some());

        manager.handle_event(UiEvent::Lab(LabEvent::ReactionResolved {
            equations: vec!["2Na + 2H2O → 2NaOH + H2".into()],
        }));
        assert!(manager.state.active_bar.is_none());
        assert_eq!(manager.state.pending, 0);
    }

    #[test]
    fn resolution_without_start_does_not_underflow() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Lab(LabEvent::Settled));
        assert_eq!(manager.state.pending, 0);
        assert!(manager.state.active_bar.is_none());
    }

    #[test]
    fn temperature_change_keeps_activity_label() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(started());
        manager.handle_event(UiEvent::Lab(LabEvent::TemperatureChanged { celsius: 70.0 }));
        assert_eq!(
            manager.state.active_bar.as_ref().unwrap().message(),
            "Reacting... (70°C)"
        );
    }

    #[test]
    fn temperature_change_during_stir_is_labelled_as_stirring() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Lab(LabEvent::Stirred {
            due: Duration::from_millis(1000),
        }));
        manager.handle_event(UiEvent::Lab(LabEvent::TemperatureChanged { celsius: 120.0 }));
        assert_eq!(
            manager.state.active_bar.as_ref().unwrap().message(),
            "Stirring... (120°C)"
        );

        manager.handle_event(UiEvent::Lab(LabEvent::Settled));
        assert!(manager.state.label.is_empty());
    }

    #[test]
    fn printing_events_do_not_touch_spinner_state() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Log("Test log message".to_string()));
        manager.handle_event(UiEvent::Lab(LabEvent::Observation("Beaker cleared and cleaned".into())));
        manager.handle_event(UiEvent::Lab(LabEvent::AlertChanged(Some(
            SafetyAlert::AcidBaseMix,
        ))));
        manager.handle_event(UiEvent::Lab(LabEvent::Cleared));
        assert!(manager.state.active_bar.is_none());
    }

    #[tokio::test]
    async fn session_event_handler_forwards_lab_events() {
        let (sender, mut receiver) = mpsc::channel(1);
        let handler = SessionEventHandler::new(sender);
        let callback = handler.get_callback();

        callback(LabEvent::ElementAdded {
            symbol: "Na".into(),
        });

        match receiver.recv().await.unwrap() {
            UiEvent::Lab(LabEvent::ElementAdded { symbol }) => assert_eq!(symbol, "Na"),
            other => panic!("Incorrect event received: {:?}", other),
        }
    }

    #[tokio::test]
    async fn run_exits_on_shutdown_signal() {
        let (manager, sender, shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        let handle = tokio::spawn(manager.run());

        sender.send(started()).await.unwrap();
        shutdown.send(true).unwrap();

        handle.await.unwrap();
    }
}
