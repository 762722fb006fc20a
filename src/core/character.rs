//! Character snapshot as returned by the game-master backend.

use serde::{Deserialize, Serialize};

use super::stats::Stats;

/// Shown when the backend omits location or scenario text.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Server-authoritative character state.
///
/// The client never edits a snapshot; each backend reply that carries one
/// replaces the previous value wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub stats: Stats,
    pub hp: i32,
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
    pub sp: i32,
    #[serde(rename = "maxSp")]
    pub max_sp: i32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub current_scenario_state: Option<String>,
    #[serde(default)]
    pub scene_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inventory: Vec<String>,
}

impl Character {
    pub fn location_label(&self) -> &str {
        non_empty(self.location.as_deref()).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn scenario_label(&self) -> &str {
        non_empty(self.current_scenario_state.as_deref()).unwrap_or(UNKNOWN_LABEL)
    }

    /// HP bar fill, `hp / maxHp × 100` clamped to `[0, 100]`.
    pub fn hp_percent(&self) -> u16 {
        percent(self.hp, self.max_hp)
    }

    /// SP bar fill, `sp / maxSp × 100` clamped to `[0, 100]`.
    pub fn sp_percent(&self) -> u16 {
        percent(self.sp, self.max_sp)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A zero or negative maximum renders as an empty bar.
pub fn percent(current: i32, maximum: i32) -> u16 {
    if maximum <= 0 {
        return 0;
    }
    let ratio = f64::from(current) / f64::from(maximum) * 100.0;
    ratio.clamp(0.0, 100.0).round() as u16
}
