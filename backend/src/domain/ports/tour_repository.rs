//! Port for tour aggregate and shared lookup persistence.
//!
//! A tour is spread over the root row, three join tables onto shared lookups
//! and an owned image table. Implementations must write all of them inside
//! one transaction and read them back as a consistent snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{City, CityDraft, EventType, LookupName, PackageItem, Tour, TourDraft, TourId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tour repository adapters.
    pub enum TourRepositoryError {
        /// No connection could be checked out.
        Connection { message: String } => ServiceUnavailable:
            "tour repository connection failed: {message}",
        /// A statement failed; any open transaction was rolled back.
        Query { message: String } => InternalError:
            "tour repository query failed: {message}",
        /// A draft referenced a lookup row that does not exist.
        UnknownReference { message: String } => InvalidRequest:
            "tour references an unknown lookup: {message}",
        /// A lookup with the same name already exists.
        DuplicateName { name: String } => InvalidRequest:
            "a lookup named {name} already exists",
    }
}

/// Persistence port for tours and their lookups.
///
/// Not-found is reported as `Ok(None)` / `Ok(false)`; services turn that into
/// a domain error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// All tours, newest first (`created_at DESC, id DESC`), collections
    /// attached.
    async fn list_tours(&self) -> Result<Vec<Tour>, TourRepositoryError>;

    /// One tour with its collections.
    async fn find_tour(&self, id: TourId) -> Result<Option<Tour>, TourRepositoryError>;

    /// Insert the root and every child row atomically and return the stored
    /// aggregate.
    async fn create_tour(
        &self,
        draft: &TourDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Tour, TourRepositoryError>;

    /// Overwrite the root scalars and replace all four collections.
    ///
    /// Returns `Ok(None)` when the tour does not exist; nothing is written.
    async fn update_tour(
        &self,
        id: TourId,
        draft: &TourDraft,
    ) -> Result<Option<Tour>, TourRepositoryError>;

    /// Delete the tour and its child rows. `false` when it did not exist.
    async fn delete_tour(&self, id: TourId) -> Result<bool, TourRepositoryError>;

    async fn list_cities(&self) -> Result<Vec<City>, TourRepositoryError>;

    async fn create_city(&self, draft: &CityDraft) -> Result<City, TourRepositoryError>;

    async fn list_event_types(&self) -> Result<Vec<EventType>, TourRepositoryError>;

    async fn create_event_type(&self, name: &LookupName)
    -> Result<EventType, TourRepositoryError>;

    async fn list_package_items(&self) -> Result<Vec<PackageItem>, TourRepositoryError>;

    async fn create_package_item(
        &self,
        name: &LookupName,
    ) -> Result<PackageItem, TourRepositoryError>;
}

/// Empty store: lists nothing, finds nothing, and echoes writes back with
/// identifier `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTourRepository;

#[async_trait]
impl TourRepository for FixtureTourRepository {
    async fn list_tours(&self) -> Result<Vec<Tour>, TourRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_tour(&self, _id: TourId) -> Result<Option<Tour>, TourRepositoryError> {
        Ok(None)
    }

    async fn create_tour(
        &self,
        draft: &TourDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Tour, TourRepositoryError> {
        Ok(Tour {
            id: TourId::new(1),
            fields: draft.fields().clone(),
            cities: Vec::new(),
            event_types: Vec::new(),
            package_items: Vec::new(),
            additional_images: draft.additional_images().to_vec(),
            created_at,
        })
    }

    async fn update_tour(
        &self,
        _id: TourId,
        _draft: &TourDraft,
    ) -> Result<Option<Tour>, TourRepositoryError> {
        Ok(None)
    }

    async fn delete_tour(&self, _id: TourId) -> Result<bool, TourRepositoryError> {
        Ok(false)
    }

    async fn list_cities(&self) -> Result<Vec<City>, TourRepositoryError> {
        Ok(Vec::new())
    }

    async fn create_city(&self, draft: &CityDraft) -> Result<City, TourRepositoryError> {
        Ok(City {
            id: 1,
            name: draft.name.to_string(),
            image_url: draft.image_url.clone(),
            wiki_url: draft.wiki_url.clone(),
        })
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, TourRepositoryError> {
        Ok(Vec::new())
    }

    async fn create_event_type(
        &self,
        name: &LookupName,
    ) -> Result<EventType, TourRepositoryError> {
        Ok(EventType {
            id: 1,
            name: name.to_string(),
        })
    }

    async fn list_package_items(&self) -> Result<Vec<PackageItem>, TourRepositoryError> {
        Ok(Vec::new())
    }

    async fn create_package_item(
        &self,
        name: &LookupName,
    ) -> Result<PackageItem, TourRepositoryError> {
        Ok(PackageItem {
            id: 1,
            name: name.to_string(),
        })
    }
}
