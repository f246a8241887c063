//! Contact service: family and doctor phone shortcuts.

use chrono::Utc;
use tracing::info;

use crate::domain::commands::contacts::ContactCommand;
use crate::domain::models::contact::{ContactValidationError, DomainContact};
use crate::storage::{ContactRepository, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Contact not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct ContactService {
    repository: ContactRepository,
}

impl ContactService {
    pub fn new(repository: ContactRepository) -> Self {
        Self { repository }
    }

    pub async fn create_contact(&self, command: ContactCommand) -> Result<DomainContact, ContactError> {
        let (name, phone) = Self::validate(&command)?;
        let contact = DomainContact {
            id: DomainContact::generate_id(Utc::now().timestamp_millis() as u64),
            name,
            phone,
            relation: command.relation,
        };

        self.repository.store_contact(&contact).await?;
        info!("Created contact {} ({:?})", contact.id, contact.relation);
        Ok(contact)
    }

    pub async fn list_contacts(&self) -> Result<Vec<DomainContact>, ContactError> {
        Ok(self.repository.list_contacts().await?)
    }

    pub async fn update_contact(&self, id: &str, command: ContactCommand) -> Result<DomainContact, ContactError> {
        let (name, phone) = Self::validate(&command)?;
        let contact = DomainContact {
            id: id.to_string(),
            name,
            phone,
            relation: command.relation,
        };

        if !self.repository.update_contact(&contact).await? {
            return Err(ContactError::NotFound(id.to_string()));
        }
        info!("Updated contact {}", id);
        Ok(contact)
    }

    pub async fn delete_contact(&self, id: &str) -> Result<(), ContactError> {
        if !self.repository.delete_contact(id).await? {
            return Err(ContactError::NotFound(id.to_string()));
        }
        info!("Deleted contact {}", id);
        Ok(())
    }

    /// Trimmed name and phone, or the first problem found
    fn validate(command: &ContactCommand) -> Result<(String, String), ContactValidationError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }

        let phone = command.phone.trim();
        if phone.is_empty() {
            return Err(ContactValidationError::EmptyPhone);
        }
        let allowed = phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-');
        if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(ContactValidationError::InvalidPhone(phone.to_string()));
        }

        Ok((name.to_string(), phone.to_string()))
    }
}
