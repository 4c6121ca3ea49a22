use serde::{Deserialize, Serialize};

use crate::DomainError;

/// An operating region. Users and nodes reference regions by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub desc: String,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: desc.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(DomainError::BadBodyRequest);
        }
        Ok(())
    }
}
