/// trpg-client - terminal client for an AI game-master backend
///
/// Point-buy character creation, the turn and roll request cycle, and a
/// cosmetic dice animation, driven over HTTP/JSON.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
