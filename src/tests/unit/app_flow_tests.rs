//! App Loop Flow Tests
//!
//! Drives `AppState` with key events against a mocked game master and
//! checks the controller state after each backend reply:
//! - Character creation success and failure
//! - Action turns with and without a roll request
//! - Roll success, chained rolls, and retry after failure

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::api::{ApiError, MockGameMaster, TurnRequest};
use crate::core::client::{GameClient, Speaker, UiMode};
use crate::core::dice::DiceDisplay;
use crate::core::stats::StatKey;
use crate::tests::common::fixtures::{
    created_response, press, roll_response, sample_character, services_with, turn_response,
};
use crate::tui::app::AppState;

const TICK: Duration = Duration::from_millis(50);

fn app_with(mock: MockGameMaster) -> AppState {
    let (services, rx) = services_with(mock);
    AppState::new(
        GameClient::with_rng(StdRng::seed_from_u64(3)),
        rx,
        services,
        TICK,
    )
}

fn key(app: &mut AppState, code: KeyCode) {
    app.handle_event(crate::tui::events::AppEvent::Input(press(code)));
}

fn ctrl(app: &mut AppState, c: char) {
    app.handle_event(crate::tui::events::AppEvent::Input(Event::Key(KeyEvent::new(
        KeyCode::Char(c),
        KeyModifiers::CONTROL,
    ))));
}

fn type_str(app: &mut AppState, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

async fn next_reply(app: &mut AppState) {
    let processed = tokio::time::timeout(Duration::from_secs(2), app.process_backend_event())
        .await
        .expect("backend reply should arrive");
    assert!(processed);
}

/// Fill the creation form through the UI: name, then Str 3 / Agi 2.
fn fill_form(app: &mut AppState) {
    type_str(app, "Mira");
    key(app, KeyCode::Tab); // Stats
    key(app, KeyCode::Right);
    key(app, KeyCode::Right);
    key(app, KeyCode::Down);
    key(app, KeyCode::Right);
}

fn expect_created(mock: &mut MockGameMaster) {
    mock.expect_create_character()
        .withf(|req| req.name == "Mira" && req.stats.strength == 3 && req.stats.agility == 2)
        .times(1)
        .returning(|_| Ok(created_response(sample_character())));
}

// =============================================================================
// Character Creation
// =============================================================================

#[tokio::test]
async fn test_create_character_through_ui() {
    let mut mock = MockGameMaster::new();
    expect_created(&mut mock);
    let mut app = app_with(mock);

    fill_form(&mut app);
    assert!(app.client.can_create());
    ctrl(&mut app, 's');
    assert!(app.client.is_creating());

    next_reply(&mut app).await;

    assert_eq!(app.client.mode(), UiMode::InGame);
    assert_eq!(app.client.character().unwrap().name, "Mira");
    assert!(app.client.action_input_enabled());
    assert_eq!(app.client.log()[0].speaker, Speaker::Gm);
}

#[tokio::test]
async fn test_alert_blocks_input_until_dismissed() {
    let mut app = app_with(MockGameMaster::new());

    ctrl(&mut app, 's');
    assert!(app.client.alert().is_some());

    // Typing is swallowed while the alert is up.
    type_str(&mut app, "Z");
    assert_eq!(app.client.creation().name(), "");

    key(&mut app, KeyCode::Enter);
    assert!(app.client.alert().is_none());
    type_str(&mut app, "Z");
    assert_eq!(app.client.creation().name(), "Z");
}

#[tokio::test]
async fn test_creation_backend_failure_keeps_form() {
    let mut mock = MockGameMaster::new();
    mock.expect_create_character()
        .times(1)
        .returning(|_| Err(ApiError::Network("connection refused".into())));
    let mut app = app_with(mock);

    fill_form(&mut app);
    ctrl(&mut app, 's');
    next_reply(&mut app).await;

    assert_eq!(app.client.mode(), UiMode::CharacterCreation);
    assert!(app.client.can_create());
    assert!(app.client.log()[0]
        .text
        .starts_with("Failed to send the character to the backend"));
}

// =============================================================================
// Turn Cycle
// =============================================================================

async fn created_app(mut mock: MockGameMaster) -> AppState {
    expect_created(&mut mock);
    let mut app = app_with(mock);
    fill_form(&mut app);
    ctrl(&mut app, 's');
    next_reply(&mut app).await;
    app
}

#[tokio::test]
async fn test_action_without_roll() {
    let mut mock = MockGameMaster::new();
    mock.expect_game_turn()
        .withf(|req| {
            *req == TurnRequest::Action {
                player_action: "look around".into(),
            }
        })
        .times(1)
        .returning(|_| Ok(turn_response("Dust drifts over the tracks.")));
    let mut app = created_app(mock).await;

    type_str(&mut app, "look around");
    key(&mut app, KeyCode::Enter);
    assert!(!app.client.action_input_enabled());
    assert_eq!(app.game.input_text(), "");

    next_reply(&mut app).await;

    assert!(app.client.action_input_enabled());
    assert!(!app.client.dice_enabled());
    let log = app.client.log();
    assert_eq!(log[log.len() - 2].speaker, Speaker::Player);
    assert_eq!(log[log.len() - 1].text, "Dust drifts over the tracks.");
}

#[tokio::test]
async fn test_action_then_roll_then_chained_roll() {
    let mut mock = MockGameMaster::new();
    let mut seq = mockall::Sequence::new();
    mock.expect_game_turn()
        .withf(|req| matches!(req, TurnRequest::Action { .. }))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            let mut resp = turn_response("The gap is wide.");
            resp.require_roll = Some(true);
            resp.roll_stat = Some("agility".into());
            Ok(resp)
        });
    mock.expect_game_turn()
        .withf(|req| {
            *req == TurnRequest::Roll {
                modifier_stat: "agility".into(),
            }
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            let mut resp = roll_response(2, 6, "You land badly.");
            resp.require_roll = Some(true);
            resp.roll_stat = Some("willpower".into());
            resp.roll_stat_ko = Some("의지".into());
            Ok(resp)
        });
    let mut app = created_app(mock).await;

    type_str(&mut app, "jump the gap");
    key(&mut app, KeyCode::Enter);
    next_reply(&mut app).await;
    assert!(app.client.dice_enabled());
    assert_eq!(app.client.dice_label(), "agility check (2d6)");

    // Typing is ignored while a roll is pending.
    type_str(&mut app, "x");
    assert_eq!(app.game.input_text(), "");

    key(&mut app, KeyCode::Enter);
    assert!(app.client.is_animating());
    app.handle_event(crate::tui::events::AppEvent::Tick);
    app.handle_event(crate::tui::events::AppEvent::Tick);

    next_reply(&mut app).await;
    assert!(!app.client.is_animating());
    assert_eq!(app.client.dice_display(), DiceDisplay::Final(2, 6));
    assert!(app.client.dice_enabled());
    assert_eq!(app.client.dice_label(), "의지 check (2d6)");
    assert_eq!(app.client.pending_roll().unwrap().stat, "willpower");
}

#[tokio::test]
async fn test_failed_roll_can_be_retried() {
    let mut mock = MockGameMaster::new();
    let mut seq = mockall::Sequence::new();
    mock.expect_game_turn()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            let mut resp = turn_response("Steady yourself.");
            resp.require_roll = Some(true);
            resp.roll_stat = Some("senses".into());
            Ok(resp)
        });
    mock.expect_game_turn()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Err(ApiError::Status {
                status: 500,
                message: "The GM is confused.".into(),
            })
        });
    mock.expect_game_turn()
        .withf(|req| {
            *req == TurnRequest::Roll {
                modifier_stat: "senses".into(),
            }
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(roll_response(5, 5, "You spot the seam.")));
    let mut app = created_app(mock).await;

    type_str(&mut app, "search the wall");
    key(&mut app, KeyCode::Enter);
    next_reply(&mut app).await;

    ctrl(&mut app, 'r');
    next_reply(&mut app).await;
    assert_eq!(app.client.dice_display(), DiceDisplay::Unknown);
    assert!(app.client
        .log()
        .last()
        .unwrap()
        .text
        .contains("The GM is confused."));
    assert!(app.client.dice_enabled());

    ctrl(&mut app, 'r');
    next_reply(&mut app).await;
    assert_eq!(app.client.dice_display(), DiceDisplay::Final(5, 5));
    assert!(app.client.action_input_enabled());
}

#[tokio::test]
async fn test_turn_failure_reenables_action_input() {
    let mut mock = MockGameMaster::new();
    mock.expect_game_turn()
        .times(1)
        .returning(|_| Err(ApiError::Network("timed out".into())));
    let mut app = created_app(mock).await;

    type_str(&mut app, "wait");
    key(&mut app, KeyCode::Enter);
    next_reply(&mut app).await;

    assert!(app.client.action_input_enabled());
    assert!(!app.client.dice_enabled());
    assert_eq!(
        app.client.log().last().unwrap().text,
        "An error occurred: network error: timed out. Please try again."
    );
}

#[tokio::test]
async fn test_stat_buttons_respect_bounds() {
    let mut app = app_with(MockGameMaster::new());
    key(&mut app, KeyCode::Tab);
    for _ in 0..5 {
        key(&mut app, KeyCode::Right);
    }
    let allocation = app.client.creation().allocation();
    assert_eq!(allocation.value(StatKey::Strength), 3);
    assert_eq!(allocation.remaining(), 1);
    for _ in 0..5 {
        key(&mut app, KeyCode::Left);
    }
    assert_eq!(app.client.creation().allocation().value(StatKey::Strength), 1);
}

#[tokio::test]
async fn test_quit_keys() {
    let mut app = app_with(MockGameMaster::new());
    ctrl(&mut app, 'c');
    assert!(!app.running);
}
