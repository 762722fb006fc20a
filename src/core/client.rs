//! Game client controller.
//!
//! [`GameClient`] is the single owner of client state: UI mode, the creation
//! form, the current character snapshot, the turn phase, the message log and
//! the dice surface. User intents and backend replies enter through named
//! transition methods. Methods that start a request return it; the caller
//! sends it and feeds the reply back. Views read state through accessors and
//! never mutate it directly.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::api::{
    ApiError, CreateCharacterRequest, CreateCharacterResponse, TurnRequest, TurnResponse,
};
use super::character::Character;
use super::creation::CreationForm;
use super::dice::{DiceAnimation, DiceDisplay};
use super::markup;
use super::stats::StatKey;
use super::turn::{PendingRoll, TurnMachine, TurnPhase};

pub const ACTION_PLACEHOLDER: &str = "Describe your action (e.g. look around the platform)...";
pub const WAITING_PLACEHOLDER: &str = "The GM is preparing a response...";
pub const DEFAULT_ROLL_LABEL: &str = "Roll dice (2d6)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    CharacterCreation,
    InGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Gm,
    Player,
    System,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Gm => "GM",
            Speaker::Player => "Player",
            Speaker::System => "System",
        }
    }
}

/// One line of the narrative log. GM and system text may carry inline
/// markup; player text is exactly what was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl LogEntry {
    fn gm(text: &str) -> Self {
        Self {
            speaker: Speaker::Gm,
            text: markup::strip_speaker_label(text, Speaker::Gm.label()).to_string(),
        }
    }

    fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
        }
    }
}

/// Last authoritative roll, with the optional breakdown fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSummary {
    pub stat: String,
    pub dice: (u8, u8),
    pub modifier: Option<i32>,
    pub total: Option<i32>,
    pub outcome: Option<String>,
}

pub struct GameClient {
    mode: UiMode,
    creation: CreationForm,
    creating: bool,
    turn: TurnMachine,
    character: Option<Character>,
    log: Vec<LogEntry>,
    alert: Option<String>,
    animation: DiceAnimation<StdRng>,
    dice: DiceDisplay,
    last_roll: Option<RollSummary>,
}

impl GameClient {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic animation frames, for tests.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            mode: UiMode::CharacterCreation,
            creation: CreationForm::new(),
            creating: false,
            turn: TurnMachine::new(),
            character: None,
            log: Vec::new(),
            alert: None,
            animation: DiceAnimation::new(rng),
            dice: DiceDisplay::Idle,
            last_roll: None,
        }
    }

    // ── Read side ───────────────────────────────────────────────────────

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn creation(&self) -> &CreationForm {
        &self.creation
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Create control enabled: form valid and no creation in flight.
    pub fn can_create(&self) -> bool {
        self.mode == UiMode::CharacterCreation && !self.creating && self.creation.can_submit()
    }

    /// A backend request is in flight.
    pub fn is_waiting(&self) -> bool {
        self.creating || self.turn.in_flight()
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn inventory(&self) -> &[String] {
        self.character
            .as_ref()
            .map(|c| c.inventory.as_slice())
            .unwrap_or(&[])
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn phase(&self) -> &TurnPhase {
        self.turn.phase()
    }

    pub fn pending_roll(&self) -> Option<&PendingRoll> {
        self.turn.pending_roll()
    }

    pub fn action_input_enabled(&self) -> bool {
        self.mode == UiMode::InGame && self.turn.action_enabled()
    }

    pub fn action_placeholder(&self) -> String {
        match self.turn.phase() {
            TurnPhase::Idle => ACTION_PLACEHOLDER.to_string(),
            TurnPhase::AwaitingRoll(roll) => {
                format!("Roll the dice for a {} check to continue...", roll.display_name)
            }
            TurnPhase::AwaitingTurnResponse | TurnPhase::AwaitingRollResponse(_) => {
                WAITING_PLACEHOLDER.to_string()
            }
        }
    }

    pub fn dice_enabled(&self) -> bool {
        self.mode == UiMode::InGame && self.turn.roll_enabled()
    }

    pub fn dice_label(&self) -> String {
        match self.turn.phase() {
            TurnPhase::AwaitingRoll(roll) => format!("{} check (2d6)", roll.display_name),
            _ => DEFAULT_ROLL_LABEL.to_string(),
        }
    }

    /// Animation frame while rolling, otherwise the settled display.
    pub fn dice_display(&self) -> DiceDisplay {
        self.animation.frame().unwrap_or(self.dice)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    pub fn last_roll(&self) -> Option<&RollSummary> {
        self.last_roll.as_ref()
    }

    // ── Character creation ──────────────────────────────────────────────

    pub fn set_name(&mut self, name: &str) {
        self.creation.set_name(name);
    }

    pub fn set_inventory_text(&mut self, text: &str) {
        self.creation.set_inventory_text(text);
    }

    pub fn set_description(&mut self, text: &str) {
        self.creation.set_description(text);
    }

    pub fn increment_stat(&mut self, key: StatKey) -> bool {
        self.mode == UiMode::CharacterCreation && self.creation.increment(key)
    }

    pub fn decrement_stat(&mut self, key: StatKey) -> bool {
        self.mode == UiMode::CharacterCreation && self.creation.decrement(key)
    }

    /// Validate and package the form. A validation failure raises the
    /// blocking alert and sends nothing.
    pub fn submit_creation(&mut self) -> Option<CreateCharacterRequest> {
        if self.mode != UiMode::CharacterCreation || self.creating {
            return None;
        }
        match self.creation.build_request() {
            Ok(request) => {
                self.creating = true;
                log::info!("Submitting character '{}'", request.name);
                Some(request)
            }
            Err(e) => {
                self.alert = Some(e.to_string());
                None
            }
        }
    }

    pub fn on_character_created(
        &mut self,
        result: Result<CreateCharacterResponse, ApiError>,
    ) {
        if !self.creating {
            log::warn!("Ignoring creation reply with no request in flight");
            return;
        }
        self.creating = false;

        match result.and_then(CreateCharacterResponse::into_created) {
            Ok(created) => {
                log::info!("Character '{}' created", created.character.name);
                self.character = Some(created.character);
                self.mode = UiMode::InGame;
                if let Some(message) = created.initial_message {
                    self.log.push(LogEntry::gm(&message));
                }
            }
            Err(e) => {
                log::warn!("Character creation failed: {e}");
                self.log.push(LogEntry::gm(&format!(
                    "Failed to send the character to the backend: {e}."
                )));
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ── Turn loop ───────────────────────────────────────────────────────

    pub fn submit_action(&mut self, text: &str) -> Option<TurnRequest> {
        if self.mode != UiMode::InGame {
            return None;
        }
        let request = self.turn.submit_action(text)?;
        if let TurnRequest::Action { player_action } = &request {
            self.log.push(LogEntry::player(player_action.clone()));
        }
        Some(request)
    }

    pub fn on_turn_response(&mut self, result: Result<TurnResponse, ApiError>) {
        if self.turn.phase() != &TurnPhase::AwaitingTurnResponse {
            log::warn!("Ignoring turn reply in phase '{}'", self.turn.phase().label());
            return;
        }
        match result {
            Ok(response) => {
                let roll = response
                    .roll_request()
                    .map(|(stat, localized)| PendingRoll::new(stat, localized));
                self.log.push(LogEntry::gm(&response.story));
                if let Some(character) = response.character {
                    self.character = Some(character);
                }
                if let Some(roll) = &roll {
                    log::debug!("Backend requested a {} roll", roll.stat);
                }
                self.turn.turn_succeeded(roll);
            }
            Err(e) => {
                log::warn!("Turn request failed: {e}");
                self.log.push(LogEntry::gm(&format!(
                    "An error occurred: {e}. Please try again."
                )));
                self.turn.turn_failed();
            }
        }
    }

    pub fn request_roll(&mut self) -> Option<TurnRequest> {
        if self.mode != UiMode::InGame {
            return None;
        }
        let (request, roll) = self.turn.start_roll()?;
        self.log.push(LogEntry::player(format!(
            "Rolling the dice for a {} check...",
            roll.display_name
        )));
        self.animation.start();
        Some(request)
    }

    pub fn on_roll_response(&mut self, result: Result<TurnResponse, ApiError>) {
        let Some(rolled) = self
            .turn
            .pending_roll()
            .filter(|_| self.turn.in_flight())
            .cloned()
        else {
            log::warn!("Ignoring roll reply in phase '{}'", self.turn.phase().label());
            return;
        };

        self.animation.stop();

        let outcome = result.and_then(|response| match response.dice() {
            Some(dice) => Ok((response, dice)),
            None => Err(ApiError::MalformedResponse(
                "roll response did not include dice values".to_string(),
            )),
        });

        match outcome {
            Ok((response, (d1, d2))) => {
                self.dice = DiceDisplay::Final(d1, d2);
                self.last_roll = Some(RollSummary {
                    stat: rolled.stat,
                    dice: (d1, d2),
                    modifier: response.modifier,
                    total: response.total,
                    outcome: response.roll_outcome.clone(),
                });
                let next = response
                    .roll_request()
                    .map(|(stat, localized)| PendingRoll::new(stat, localized));
                self.log.push(LogEntry::gm(&response.story));
                if let Some(character) = response.character {
                    self.character = Some(character);
                }
                self.turn.roll_succeeded(next);
            }
            Err(e) => {
                log::warn!("Roll request for {} failed: {e}", rolled.stat);
                self.dice = DiceDisplay::Unknown;
                self.log
                    .push(LogEntry::gm(&format!("An error occurred: {e}.")));
                self.turn.roll_failed();
            }
        }
    }

    /// Advance time-driven state (the dice animation).
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.animation.advance(elapsed)
    }
}

impl Default for GameClient {
    fn default() -> Self {
        Self::new()
    }
}
