use crate::core::api::{self, CreateCharacterResponse, TurnResponse};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for the dice animation.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// `POST /create-character` finished.
    CharacterCreated(api::Result<CreateCharacterResponse>),
    /// `POST /game-turn` with an action finished.
    TurnResolved(api::Result<TurnResponse>),
    /// `POST /game-turn` with a roll finished.
    RollResolved(api::Result<TurnResponse>),
}

/// High-level actions dispatched by the global keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ShowHelp,
    CloseHelp,
    DismissAlert,
    ScrollLogUp,
    ScrollLogDown,
    Quit,
}

/// Which creation-form control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Name,
    Stats,
    Inventory,
    Description,
    Create,
}

impl Focus {
    pub const ALL: [Focus; 5] = [
        Focus::Name,
        Focus::Stats,
        Focus::Inventory,
        Focus::Description,
        Focus::Create,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Name => "Name",
            Focus::Stats => "Stats",
            Focus::Inventory => "Inventory",
            Focus::Description => "Description",
            Focus::Create => "Create",
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, Focus::Name | Focus::Inventory | Focus::Description)
    }
}
