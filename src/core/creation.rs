//! Character-creation form: draft allocation plus the free-text fields.

use thiserror::Error;

use super::api::CreateCharacterRequest;
use super::stats::{StatAllocation, StatKey};

/// Reasons a creation submit is blocked before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    #[error("Please enter a name for your character.")]
    EmptyName,

    #[error("Please allocate all stat points ({0} remaining).")]
    UnallocatedPoints(i32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationForm {
    name: String,
    inventory_text: String,
    description: String,
    allocation: StatAllocation,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn inventory_text(&self) -> &str {
        &self.inventory_text
    }

    pub fn set_inventory_text(&mut self, text: &str) {
        self.inventory_text = text.to_string();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    pub fn allocation(&self) -> &StatAllocation {
        &self.allocation
    }

    pub fn increment(&mut self, key: StatKey) -> bool {
        self.allocation.increment(key)
    }

    pub fn decrement(&mut self, key: StatKey) -> bool {
        self.allocation.decrement(key)
    }

    /// Budget exhausted and a non-blank name entered.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), CreationError> {
        if self.name.trim().is_empty() {
            return Err(CreationError::EmptyName);
        }
        let remaining = self.allocation.remaining();
        if remaining != 0 {
            return Err(CreationError::UnallocatedPoints(remaining));
        }
        Ok(())
    }

    pub fn build_request(&self) -> Result<CreateCharacterRequest, CreationError> {
        self.validate()?;
        let description = self.description.trim();
        Ok(CreateCharacterRequest {
            name: self.name.trim().to_string(),
            stats: self.allocation.stats(),
            inventory: parse_inventory(&self.inventory_text),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Comma-separated items, trimmed, blanks dropped, order kept.
pub fn parse_inventory(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
