//! # Contact Repository
//!
//! Family and doctor shortcuts under `contacts`.

use std::sync::Arc;

use super::json_collection::{CollectionRecord, JsonCollection};
use crate::domain::models::contact::DomainContact;
use crate::storage::{KeyValueStore, StorageError};

pub const CONTACTS_KEY: &str = "contacts";

impl CollectionRecord for DomainContact {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct ContactRepository {
    collection: JsonCollection<DomainContact>,
}

impl ContactRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: JsonCollection::new(store, CONTACTS_KEY),
        }
    }

    /// Contacts ordered by name, case-insensitive
    pub async fn list_contacts(&self) -> Result<Vec<DomainContact>, StorageError> {
        let mut contacts = self.collection.load().await?;
        contacts.sort_by_key(|c| c.name.to_lowercase());
        Ok(contacts)
    }

    pub async fn store_contact(&self, contact: &DomainContact) -> Result<(), StorageError> {
        self.collection.insert(contact.clone()).await
    }

    pub async fn update_contact(&self, contact: &DomainContact) -> Result<bool, StorageError> {
        self.collection.replace(contact.clone()).await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.collection.remove(id).await?.is_some())
    }
}
