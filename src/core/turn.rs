//! Turn / roll request-response state machine.
//!
//! ```text
//! Idle ──submit_action──▶ AwaitingTurnResponse ──ok, no roll──▶ Idle
//!                                │ ok, roll ──▶ AwaitingRoll ──start_roll──▶ AwaitingRollResponse
//!                                │ err ──▶ Idle                                  │ ok ──▶ Idle | AwaitingRoll
//!                                                                                │ err ──▶ AwaitingRoll (same stat)
//! ```
//!
//! The machine only tracks the phase. Logging, character refresh and dice
//! display are the controller's job.

use super::api::TurnRequest;

/// A roll the backend asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRoll {
    /// Wire identifier sent back as `modifier_stat`.
    pub stat: String,
    /// Localized name when the backend sent one, otherwise `stat`.
    pub display_name: String,
}

impl PendingRoll {
    pub fn new(stat: &str, localized: Option<&str>) -> Self {
        let display_name = localized
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(stat);
        Self {
            stat: stat.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingTurnResponse,
    AwaitingRoll(PendingRoll),
    AwaitingRollResponse(PendingRoll),
}

impl TurnPhase {
    pub fn label(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::AwaitingTurnResponse => "awaiting turn",
            TurnPhase::AwaitingRoll(_) => "awaiting roll",
            TurnPhase::AwaitingRollResponse(_) => "rolling",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TurnMachine {
    phase: TurnPhase,
}

impl TurnMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn action_enabled(&self) -> bool {
        matches!(self.phase, TurnPhase::Idle)
    }

    pub fn roll_enabled(&self) -> bool {
        matches!(self.phase, TurnPhase::AwaitingRoll(_))
    }

    pub fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            TurnPhase::AwaitingTurnResponse | TurnPhase::AwaitingRollResponse(_)
        )
    }

    /// The roll that is offered or being resolved.
    pub fn pending_roll(&self) -> Option<&PendingRoll> {
        match &self.phase {
            TurnPhase::AwaitingRoll(roll) | TurnPhase::AwaitingRollResponse(roll) => Some(roll),
            _ => None,
        }
    }

    /// `Idle → AwaitingTurnResponse`. Blank text or any other phase is refused.
    pub fn submit_action(&mut self, text: &str) -> Option<TurnRequest> {
        let text = text.trim();
        if text.is_empty() || !self.action_enabled() {
            return None;
        }
        self.phase = TurnPhase::AwaitingTurnResponse;
        Some(TurnRequest::Action {
            player_action: text.to_string(),
        })
    }

    /// Turn reply arrived. Returns `false` if no turn was in flight.
    pub fn turn_succeeded(&mut self, roll: Option<PendingRoll>) -> bool {
        if self.phase != TurnPhase::AwaitingTurnResponse {
            return false;
        }
        self.phase = roll.map_or(TurnPhase::Idle, TurnPhase::AwaitingRoll);
        true
    }

    /// Turn request failed. Actions are only accepted from `Idle`, so no
    /// roll can be pending here and the input simply comes back.
    pub fn turn_failed(&mut self) -> bool {
        if self.phase != TurnPhase::AwaitingTurnResponse {
            return false;
        }
        self.phase = TurnPhase::Idle;
        true
    }

    /// `AwaitingRoll → AwaitingRollResponse`.
    pub fn start_roll(&mut self) -> Option<(TurnRequest, PendingRoll)> {
        let TurnPhase::AwaitingRoll(roll) = &self.phase else {
            return None;
        };
        let roll = roll.clone();
        self.phase = TurnPhase::AwaitingRollResponse(roll.clone());
        Some((
            TurnRequest::Roll {
                modifier_stat: roll.stat.clone(),
            },
            roll,
        ))
    }

    pub fn roll_succeeded(&mut self, next: Option<PendingRoll>) -> bool {
        if !matches!(self.phase, TurnPhase::AwaitingRollResponse(_)) {
            return false;
        }
        self.phase = next.map_or(TurnPhase::Idle, TurnPhase::AwaitingRoll);
        true
    }

    /// Roll request failed: offer the same roll again.
    pub fn roll_failed(&mut self) -> bool {
        let TurnPhase::AwaitingRollResponse(roll) = &self.phase else {
            return false;
        };
        self.phase = TurnPhase::AwaitingRoll(roll.clone());
        true
    }
}
