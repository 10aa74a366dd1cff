//! Driving port for tour and lookup mutations.

use async_trait::async_trait;

use crate::domain::{
    City, CityDraft, Error, EventType, LookupName, PackageItem, Tour, TourDraft, TourId,
};

/// Inbound contract for writing tours and shared lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourCommand: Send + Sync {
    /// Create a tour stamped with the current time.
    ///
    /// # Errors
    /// `InvalidRequest` when a lookup id is unknown.
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, Error>;

    /// Replace a tour and all its collections.
    ///
    /// # Errors
    /// `NotFound` when the tour does not exist; `InvalidRequest` for unknown
    /// lookup ids.
    async fn update_tour(&self, id: TourId, draft: TourDraft) -> Result<Tour, Error>;

    /// Delete a tour. `NotFound` when it does not exist.
    async fn delete_tour(&self, id: TourId) -> Result<(), Error>;

    async fn create_city(&self, draft: CityDraft) -> Result<City, Error>;

    async fn create_event_type(&self, name: LookupName) -> Result<EventType, Error>;

    async fn create_package_item(&self, name: LookupName) -> Result<PackageItem, Error>;
}

/// Command fixture that accepts creations and reports every id as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTourCommand;

#[async_trait]
impl TourCommand for FixtureTourCommand {
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, Error> {
        Ok(Tour {
            id: TourId::new(1),
            fields: draft.fields().clone(),
            cities: Vec::new(),
            event_types: Vec::new(),
            package_items: Vec::new(),
            additional_images: draft.additional_images().to_vec(),
            created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        })
    }

    async fn update_tour(&self, id: TourId, _draft: TourDraft) -> Result<Tour, Error> {
        Err(Error::not_found(format!("tour {id} not found")))
    }

    async fn delete_tour(&self, id: TourId) -> Result<(), Error> {
        Err(Error::not_found(format!("tour {id} not found")))
    }

    async fn create_city(&self, draft: CityDraft) -> Result<City, Error> {
        Ok(City {
            id: 1,
            name: draft.name.to_string(),
            image_url: draft.image_url,
            wiki_url: draft.wiki_url,
        })
    }

    async fn create_event_type(&self, name: LookupName) -> Result<EventType, Error> {
        Ok(EventType {
            id: 1,
            name: name.to_string(),
        })
    }

    async fn create_package_item(&self, name: LookupName) -> Result<PackageItem, Error> {
        Ok(PackageItem {
            id: 1,
            name: name.to_string(),
        })
    }
}
