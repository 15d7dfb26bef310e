use crate::{
    error::{AppError, Result},
    models::{Booking, BookingRequest, Contact, ContactRequest},
    store::{CollectionStore, RemoveOutcome},
};
use serde_json::Value;
use tracing::info;

#[derive(Clone)]
pub struct IntakeService {
    store: CollectionStore,
}

impl IntakeService {
    pub fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Validates the request before any storage access, then appends the new
    /// booking to the bookings collection.
    pub async fn submit_booking(&self, request: BookingRequest) -> Result<Booking> {
        let booking = request.into_booking()?;

        self.store
            .append(&booking)
            .await
            .map_err(|e| AppError::storage("Failed to save booking", e))?;

        info!(id = %booking.id, "New booking");
        Ok(booking)
    }

    pub async fn submit_contact(&self, request: ContactRequest) -> Result<Contact> {
        let contact = request.into_contact()?;

        self.store
            .append(&contact)
            .await
            .map_err(|e| AppError::storage("Failed to save contact", e))?;

        info!(id = %contact.id, name = %contact.name, "New contact");
        Ok(contact)
    }

    /// The stored bookings exactly as persisted, including records this
    /// service did not write itself.
    pub async fn list_bookings(&self) -> Result<Vec<Value>> {
        self.store
            .load::<Booking>()
            .await
            .map_err(|e| AppError::storage("Failed to read bookings", e))
    }

    /// Succeeds whether or not a booking matched; fails with `NotFound` only
    /// when no bookings collection exists yet.
    pub async fn delete_booking(&self, id: &str) -> Result<()> {
        let outcome = self
            .store
            .remove_by_id::<Booking>(id)
            .await
            .map_err(|e| AppError::storage("Failed to delete", e))?;

        match outcome {
            RemoveOutcome::CollectionMissing => Err(AppError::NotFound("Not found".to_string())),
            RemoveOutcome::Removed(removed) => {
                info!(id, removed, "Deleted booking");
                Ok(())
            }
        }
    }
}
