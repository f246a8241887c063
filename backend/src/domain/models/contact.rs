use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainContactRelation {
    Family,
    Doctor,
    Other,
}

/// A family member or doctor reachable from the shortcut screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainContact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub relation: DomainContactRelation,
}

impl DomainContact {
    pub fn generate_id(now_millis: u64) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("contact::{}::{}", now_millis, &suffix[..8])
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("Contact name cannot be empty")]
    EmptyName,
    #[error("Phone number cannot be empty")]
    EmptyPhone,
    #[error("Phone number '{0}' may only contain digits, spaces, '+' and '-'")]
    InvalidPhone(String),
}

impl ContactValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyPhone | Self::InvalidPhone(_) => "phone",
        }
    }
}
