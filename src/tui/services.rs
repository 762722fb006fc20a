use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::api::{self, CreateCharacterRequest, GameMaster, HttpGameMaster, TurnRequest};

use super::events::AppEvent;

/// Handle to the game-master backend.
///
/// Each call runs on its own tokio task and reports back through the event
/// channel, so the UI loop never blocks on the network. Ordering and the
/// one-request-at-a-time rule are enforced by the controller, not here.
#[derive(Clone)]
pub struct Services {
    pub game_master: Arc<dyn GameMaster>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(
        game_master: Arc<dyn GameMaster>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            game_master,
            event_tx,
        }
    }

    /// Build the HTTP adapter for `base_url`.
    ///
    /// Failures here are fatal; the client cannot run without a backend.
    pub fn init(base_url: &str, event_tx: mpsc::UnboundedSender<AppEvent>) -> api::Result<Self> {
        let game_master = HttpGameMaster::new(base_url)?;
        log::info!("Game master backend at {}", game_master.base_url());
        Ok(Self::new(Arc::new(game_master), event_tx))
    }

    pub fn create_character(&self, request: CreateCharacterRequest) {
        let gm = Arc::clone(&self.game_master);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = gm.create_character(&request).await;
            let _ = tx.send(AppEvent::CharacterCreated(result));
        });
    }

    pub fn submit_turn(&self, request: TurnRequest) {
        self.spawn_turn(request, AppEvent::TurnResolved);
    }

    pub fn submit_roll(&self, request: TurnRequest) {
        self.spawn_turn(request, AppEvent::RollResolved);
    }

    fn spawn_turn(
        &self,
        request: TurnRequest,
        wrap: fn(api::Result<api::TurnResponse>) -> AppEvent,
    ) {
        let gm = Arc::clone(&self.game_master);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = gm.game_turn(&request).await;
            let _ = tx.send(wrap(result));
        });
    }
}
