use crate::core::models::compound::Compound;
use crate::core::models::element::Element;
use crate::core::models::equipment::Equipment;
use crate::engine::config::LabConfig;
use crate::engine::equipment::EquipmentEffect;
use crate::engine::error::EngineError;
use crate::engine::events::{EventReporter, LabEvent};
use crate::engine::observations::ObservationLog;
use crate::engine::reactions::evaluate_reactions;
use crate::engine::safety::{SafetyAlert, check_safety};
use crate::engine::scheduler::{DeferredTask, ScheduledTask, Scheduler, TaskKey};
use crate::engine::state::{BeakerContents, ReactingFlag};
use crate::workflows::drop::{DropPayload, decode_drop};
use crate::workflows::view::BeakerView;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const STIR_OBSERVATION: &str = "Stirred solution with glass rod - mixture appears more homogeneous";
const CLEAR_OBSERVATION: &str = "Beaker cleared and cleaned";

/// One lab session: the single owner of the beaker contents, the safety alert, the reacting flag,
/// the selected equipment and the notebook.
///
/// Every user action is a method. Safety is re-evaluated before an add returns; reactions are
/// resolved later, when [`LabSession::advance`] moves the session clock past their deadline.
/// A reaction check evaluates the reactants present when it was triggered and appends its
/// results to the beaker as it is when the check fires.
pub struct LabSession<'a> {
    config: LabConfig,
    contents: BeakerContents,
    alert: Option<SafetyAlert>,
    reacting: ReactingFlag,
    selected_equipment: Option<Equipment>,
    observations: ObservationLog,
    scheduler: Scheduler,
    reporter: EventReporter<'a>,
}

impl LabSession<'static> {
    pub fn new(config: LabConfig) -> Self {
        Self::with_reporter(config, EventReporter::new())
    }
}

impl<'a> LabSession<'a> {
    pub fn with_reporter(config: LabConfig, reporter: EventReporter<'a>) -> Self {
        let contents = BeakerContents::new(&config);
        Self {
            config,
            contents,
            alert: None,
            reacting: ReactingFlag::Idle,
            selected_equipment: None,
            observations: ObservationLog::new(),
            scheduler: Scheduler::new(),
            reporter,
        }
    }

    #[instrument(skip_all, fields(symbol = %element.symbol))]
    pub fn add_element(&mut self, element: Element) {
        debug!("Adding element to beaker.");
        self.reporter.report(LabEvent::ElementAdded {
            symbol: element.symbol.clone(),
        });
        self.contents.elements.push(element);
        self.on_contents_changed();
    }

    #[instrument(skip_all, fields(formula = %compound.formula))]
    pub fn add_compound(&mut self, compound: Compound) {
        debug!("Adding compound to beaker.");
        self.reporter.report(LabEvent::CompoundAdded {
            formula: compound.formula.clone(),
        });
        self.contents.compounds.push(compound);
        self.on_contents_changed();
    }

    /// Adds whatever a drag-and-drop payload carries. Malformed payloads are logged and ignored.
    pub fn drop_payload(&mut self, raw: &str) {
        if let Err(e) = self.try_drop_payload(raw) {
            warn!("Ignoring dropped item: {}", e);
        }
    }

    /// Like [`LabSession::drop_payload`], but hands a malformed payload back to the caller.
    /// The session is untouched on error.
    pub fn try_drop_payload(&mut self, raw: &str) -> Result<(), EngineError> {
        match decode_drop(raw)? {
            DropPayload::Element(element) => self.add_element(element),
            DropPayload::Compound(compound) => self.add_compound(compound),
        }
        Ok(())
    }

    #[instrument(skip_all, fields(equipment = %equipment.name))]
    pub fn apply_equipment(&mut self, equipment: Equipment) {
        let effect = EquipmentEffect::of(&equipment);
        debug!("Using equipment with effect {:?}.", effect);
        self.reporter.report(LabEvent::EquipmentSelected {
            name: equipment.name.clone(),
        });
        self.selected_equipment = Some(equipment);

        match effect {
            EquipmentEffect::Heat => {
                let celsius = self
                    .contents
                    .heat(self.config.heat_increment, self.config.max_temperature);
                self.reporter
                    .report(LabEvent::TemperatureChanged { celsius });
                self.observe(format!(
                    "Heated solution to {}°C using Bunsen burner",
                    celsius
                ));
            }
            EquipmentEffect::Stir => {
                self.observe(STIR_OBSERVATION);
                self.reacting = ReactingFlag::Reacting;
                let key = self
                    .scheduler
                    .schedule(self.config.stir_delay, DeferredTask::SettleStir);
                let due = self.due_of(key);
                self.reporter.report(LabEvent::Stirred { due });
            }
            EquipmentEffect::Select => {}
        }
    }

    /// Empties the beaker and drops the alert. Already scheduled tasks still fire and append to
    /// the emptied beaker.
    #[instrument(skip_all)]
    pub fn clear(&mut self) {
        debug!("Clearing beaker.");
        self.contents.reset(&self.config);
        self.set_alert(None);
        self.reporter.report(LabEvent::Cleared);
        self.observe(CLEAR_OBSERVATION);
    }

    pub fn dismiss_alert(&mut self) {
        self.set_alert(None);
    }

    /// Moves the session clock forward by `elapsed`, firing every task that falls due on the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        while let Some((key, task)) = self.scheduler.pop_due(target) {
            self.fire(key, task);
        }
        self.scheduler.advance_clock(target);
    }

    /// Fires every pending task, advancing the clock to the last deadline.
    pub fn advance_to_idle(&mut self) {
        while let Some(deadline) = self.scheduler.next_deadline() {
            let elapsed = deadline.saturating_sub(self.scheduler.now());
            self.advance(elapsed);
        }
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn contents(&self) -> &BeakerContents {
        &self.contents
    }

    pub fn alert(&self) -> Option<SafetyAlert> {
        self.alert
    }

    pub fn is_reacting(&self) -> bool {
        self.reacting == ReactingFlag::Reacting
    }

    pub fn selected_equipment(&self) -> Option<&Equipment> {
        self.selected_equipment.as_ref()
    }

    pub fn observations(&self) -> &ObservationLog {
        &self.observations
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn view(&self) -> BeakerView {
        BeakerView::new(
            &self.contents,
            self.alert,
            self.reacting,
            self.selected_equipment.as_ref(),
        )
    }

    fn on_contents_changed(&mut self) {
        let alert = check_safety(&self.contents.elements, &self.contents.compounds);
        self.set_alert(alert);
        self.schedule_reaction();
    }

    fn set_alert(&mut self, alert: Option<SafetyAlert>) {
        if self.alert != alert {
            debug!("Safety alert changed to {:?}.", alert);
            self.reporter.report(LabEvent::AlertChanged(alert));
        }
        self.alert = alert;
    }

    fn schedule_reaction(&mut self) {
        if self.contents.is_empty() {
            return;
        }
        self.reacting = ReactingFlag::Reacting;
        let task = DeferredTask::ResolveReaction {
            elements: self.contents.elements.clone(),
            compounds: self.contents.compounds.clone(),
        };
        let key = self.scheduler.schedule(self.config.reaction_delay, task);
        let due = self.due_of(key);
        debug!("Reaction check scheduled for {:?}.", due);
        self.reporter.report(LabEvent::ReactionStarted { due });
    }

    fn due_of(&self, key: TaskKey) -> Duration {
        self.scheduler
            .get(key)
            .map(|t| t.due)
            .unwrap_or_else(|| self.scheduler.now())
    }

    fn fire(&mut self, key: TaskKey, task: ScheduledTask) {
        debug!(
            "Firing {} ({:?}) scheduled at {:?}, due {:?}.",
            task.task.label(),
            key,
            task.scheduled_at,
            task.due
        );
        match task.task {
            DeferredTask::ResolveReaction {
                elements,
                compounds,
            } => {
                let recipes = evaluate_reactions(&elements, &compounds);
                let mut equations = Vec::with_capacity(recipes.len());
                for recipe in recipes {
                    info!("Reaction fired: {}", recipe.equation);
                    self.observe(recipe.observation);
                    equations.push(recipe.equation.to_string());
                }
                self.contents.reactions.extend(equations.iter().cloned());
                self.reacting = ReactingFlag::Idle;
                self.reporter
                    .report(LabEvent::ReactionResolved { equations });
            }
            DeferredTask::SettleStir => {
                self.reacting = ReactingFlag::Idle;
                self.reporter.report(LabEvent::Settled);
            }
        }
    }

    fn observe(&mut self, text: impl Into<String>) {
        let now = self.scheduler.now();
        let entry = self.observations.append(now, text);
        self.reporter
            .report(LabEvent::Observation(entry.to_string()));
    }
}
