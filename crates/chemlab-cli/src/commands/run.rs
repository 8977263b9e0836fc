use crate::cli::RunArgs;
use crate::commands::catalog::load_catalog;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::ui::{SessionEventHandler, UiEvent};
use crate::utils::parser::{LabCommand, parse_script};
use chemlab::core::catalog::Catalog;
use chemlab::core::models::{compound::Compound, element::Element, equipment::Equipment};
use chemlab::engine::events::EventReporter;
use chemlab::workflows::session::LabSession;
use chemlab::workflows::view::{BeakerView, TemperatureBand};
use chemlab::engine::safety::SafetyAlert;
use std::fmt;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A script command with its catalog lookups already done.
#[derive(Debug, Clone)]
enum Action {
    AddElement(Element),
    AddCompound(Compound),
    Equip(Equipment),
    Drop(String),
    Clear,
    Dismiss,
    Wait(Duration),
    Show,
}

/// What a finished session leaves behind, reported once the UI has shut down.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub reactions: usize,
    pub observations: usize,
    pub ignored_drops: usize,
    /// Tasks still scheduled when the last script line ran; all of them were drained.
    pub pending_at_script_end: usize,
    pub alert: Option<SafetyAlert>,
    pub elapsed: Duration,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Session finished after {:.1}s: {} reaction(s), {} notebook entries",
            self.elapsed.as_secs_f64(),
            self.reactions,
            self.observations
        )?;
        if self.pending_at_script_end > 0 {
            write!(
                f,
                ", {} task(s) settled after the script ended",
                self.pending_at_script_end
            )?;
        }
        if self.ignored_drops > 0 {
            write!(f, ", {} malformed drop(s) ignored", self.ignored_drops)?;
        }
        if let Some(alert) = self.alert {
            write!(f, ". Active alert: {}", alert)?;
        }
        Ok(())
    }
}

pub async fn run(args: RunArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<SessionSummary> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;
    debug!("Final lab configuration: {:?}", config);

    let source = read_script(&args).await?;
    let actions = resolve_script(&source, &catalog)?;
    info!("Script resolved to {} action(s).", actions.len());

    let handler = SessionEventHandler::new(ui_sender.clone());
    let reporter = EventReporter::with_callback(handler.get_callback());
    let mut session = LabSession::with_reporter(config, reporter);
    let clock = SessionClock::new(args.instant);
    let mut ignored_drops = 0;

    for action in actions {
        clock.catch_up(&mut session);
        match action {
            Action::AddElement(element) => session.add_element(element),
            Action::AddCompound(compound) => session.add_compound(compound),
            Action::Equip(equipment) => session.apply_equipment(equipment),
            Action::Drop(raw) => {
                if let Err(e) = session.try_drop_payload(&raw) {
                    warn!("Ignoring dropped item: {}", e);
                    ignored_drops += 1;
                    log(&ui_sender, format!("⚠ Ignored dropped item: {}", e)).await;
                }
            }
            Action::Clear => session.clear(),
            Action::Dismiss => session.dismiss_alert(),
            Action::Wait(duration) => clock.wait(&mut session, duration).await,
            Action::Show => log(&ui_sender, render_view(&session.view())).await,
        }
    }

    let pending_at_script_end = session.pending_tasks();
    if pending_at_script_end > 0 {
        info!("Waiting for {} pending task(s).", pending_at_script_end);
    }
    clock.drain(&mut session).await;

    log(&ui_sender, render_view(&session.view())).await;
    log(&ui_sender, render_notebook(&session)).await;
    Ok(summarize(&session, ignored_drops, pending_at_script_end))
}

fn summarize(
    session: &LabSession<'_>,
    ignored_drops: usize,
    pending_at_script_end: usize,
) -> SessionSummary {
    SessionSummary {
        reactions: session.contents().reactions.len(),
        observations: session.observations().len(),
        ignored_drops,
        pending_at_script_end,
        alert: session.alert(),
        elapsed: session.now(),
    }
}

async fn read_script(args: &RunArgs) -> Result<String> {
    match &args.script {
        Some(path) => {
            info!("Reading session script from {:?}", path);
            Ok(tokio::fs::read_to_string(path).await?)
        }
        None => {
            info!("Reading session script from standard input.");
            let mut source = String::new();
            tokio::io::stdin().read_to_string(&mut source).await?;
            Ok(source)
        }
    }
}

/// Parses the script and looks every named item up in the catalog before anything runs.
fn resolve_script(source: &str, catalog: &Catalog) -> Result<Vec<Action>> {
    let commands = parse_script(source).map_err(|(line, e)| CliError::Script {
        line,
        message: e.to_string(),
    })?;

    commands
        .into_iter()
        .map(|(line, command)| {
            let unknown = |kind: &str, key: &str| CliError::Script {
                line,
                message: format!("Unknown {} '{}'.", kind, key),
            };
            Ok(match command {
                LabCommand::Element(key) => Action::AddElement(
                    catalog
                        .element(&key)
                        .cloned()
                        .ok_or_else(|| unknown("element", &key))?,
                ),
                LabCommand::Compound(key) => Action::AddCompound(
                    catalog
                        .compound(&key)
                        .cloned()
                        .ok_or_else(|| unknown("compound", &key))?,
                ),
                LabCommand::Equip(key) => Action::Equip(
                    catalog
                        .equipment_item(&key)
                        .cloned()
                        .ok_or_else(|| unknown("equipment", &key))?,
                ),
                LabCommand::Drop(raw) => Action::Drop(raw),
                LabCommand::Clear => Action::Clear,
                LabCommand::Dismiss => Action::Dismiss,
                LabCommand::Wait(duration) => Action::Wait(duration),
                LabCommand::Show => Action::Show,
            })
        })
        .collect()
}

/// Drives the session's logical clock, either instantly or in step with wall time.
struct SessionClock {
    instant: bool,
    started: Instant,
}

impl SessionClock {
    fn new(instant: bool) -> Self {
        Self {
            instant,
            started: Instant::now(),
        }
    }

    /// Fires anything that fell due in real time since the last action.
    fn catch_up(&self, session: &mut LabSession<'_>) {
        if self.instant {
            return;
        }
        let elapsed = self.started.elapsed().saturating_sub(session.now());
        session.advance(elapsed);
    }

    async fn wait(&self, session: &mut LabSession<'_>, duration: Duration) {
        let target = session.now() + duration;
        if self.instant {
            session.advance(duration);
            return;
        }
        while let Some(deadline) = session.next_deadline().filter(|d| *d <= target) {
            tokio::time::sleep_until(self.started + deadline).await;
            session.advance(deadline.saturating_sub(session.now()));
        }
        tokio::time::sleep_until(self.started + target).await;
        session.advance(target.saturating_sub(session.now()));
    }

    async fn drain(&self, session: &mut LabSession<'_>) {
        if self.instant {
            session.advance_to_idle();
            return;
        }
        while let Some(deadline) = session.next_deadline() {
            tokio::time::sleep_until(self.started + deadline).await;
            session.advance(deadline.saturating_sub(session.now()));
        }
    }
}

async fn log(sender: &mpsc::Sender<UiEvent>, text: String) {
    if sender.send(UiEvent::Log(text)).await.is_err() {
        debug!("UI channel closed; output dropped.");
    }
}

fn render_view(view: &BeakerView) -> String {
    let band = match view.temperature_band {
        TemperatureBand::Cool => "cool",
        TemperatureBand::Warm => "warm",
        TemperatureBand::Hot => "hot",
    };
    let ph = view
        .ph
        .map(|ph| format!("{}", ph))
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        format!(
            "Beaker: level {}%, liquid {}",
            view.liquid_level_percent, view.liquid_color
        ),
        format!("Temperature: {}°C ({})  pH: {}", view.temperature, band, ph),
    ];
    if !view.badges.is_empty() {
        lines.push(format!("Contents: {}", view.badges.join(" ")));
    }
    if let Some(name) = &view.selected_equipment {
        lines.push(format!("Equipment: {}", name));
    }
    for equation in &view.recent_reactions {
        lines.push(format!("Reaction: {}", equation));
    }
    if let Some(alert) = view.alert {
        lines.push(format!("Alert: {}", alert));
    }
    if view.reacting {
        lines.push("Status: reacting".to_string());
    }
    lines.join("\n")
}

fn render_notebook(session: &LabSession<'_>) -> String {
    let mut lines = vec![format!(
        "Lab notebook ({} entries):",
        session.observations().len()
    )];
    lines.extend(session.observations().iter().map(|o| format!("  {}", o)));
    lines.join("\n")
}
