pub mod creation;
pub mod dice_panel;
pub mod game;
pub mod sheet;
