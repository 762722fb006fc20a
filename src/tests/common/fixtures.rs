//! Test Fixtures
//!
//! Backend replies, a sample character, key events, and service handles
//! wired to a mocked game master.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::core::api::{CreateCharacterResponse, MockGameMaster, TurnResponse};
use crate::core::character::Character;
use crate::core::client::GameClient;
use crate::core::stats::{StatKey, Stats};
use crate::tui::events::AppEvent;
use crate::tui::services::Services;
use crate::tui::views::creation::CreationViewState;

// =============================================================================
// Backend Payloads
// =============================================================================

pub fn sample_character() -> Character {
    Character {
        name: "Mira".to_string(),
        stats: Stats {
            strength: 3,
            agility: 2,
            intelligence: 1,
            senses: 1,
            willpower: 1,
        },
        hp: 14,
        max_hp: 14,
        sp: 5,
        max_sp: 5,
        location: Some("Sillim Station".to_string()),
        current_scenario_state: None,
        scene_id: Some("sillim_platform".to_string()),
        description: None,
        inventory: vec!["rope".to_string(), "lantern".to_string()],
    }
}

pub fn created_response(character: Character) -> CreateCharacterResponse {
    CreateCharacterResponse {
        status: "success".to_string(),
        character: Some(character),
        initial_message: Some(
            "<strong>GM:</strong> Your journey begins at Sillim Station.".to_string(),
        ),
        message: Some("Character created".to_string()),
    }
}

/// Plain narrative reply with no roll and no character update.
pub fn turn_response(story: &str) -> TurnResponse {
    TurnResponse {
        story: story.to_string(),
        character: None,
        require_roll: Some(false),
        roll_stat: None,
        roll_stat_ko: None,
        dice1: None,
        dice2: None,
        total: None,
        modifier: None,
        roll_outcome: None,
    }
}

pub fn roll_response(dice1: u8, dice2: u8, story: &str) -> TurnResponse {
    TurnResponse {
        dice1: Some(dice1),
        dice2: Some(dice2),
        modifier: Some(0),
        total: Some(i32::from(dice1) + i32::from(dice2)),
        roll_outcome: Some("success".to_string()),
        ..turn_response(story)
    }
}

// =============================================================================
// Controller Fixtures
// =============================================================================

/// A client that already finished character creation.
pub fn in_game_client() -> GameClient {
    let mut client = GameClient::with_rng(StdRng::seed_from_u64(9));
    client.set_name("Mira");
    for key in [StatKey::Strength, StatKey::Strength, StatKey::Agility] {
        client.increment_stat(key);
    }
    let _ = client.submit_creation();
    client.on_character_created(Ok(created_response(sample_character())));
    client
}

// =============================================================================
// Services
// =============================================================================

pub fn services_with(
    mock: MockGameMaster,
) -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Services::new(Arc::new(mock), tx), rx)
}

/// Services whose backend must never be called.
pub fn idle_services() -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
    services_with(MockGameMaster::new())
}

// =============================================================================
// Input
// =============================================================================

pub fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn type_text(
    state: &mut CreationViewState,
    client: &mut GameClient,
    services: &Services,
    text: &str,
) {
    for c in text.chars() {
        state.handle_input(&press(KeyCode::Char(c)), client, services);
    }
}
