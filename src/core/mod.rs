pub mod api;
pub mod character;
pub mod client;
pub mod creation;
pub mod dice;
pub mod logging;
pub mod markup;
pub mod stats;
pub mod turn;
