//! Tour domain services implementing the tour driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    TourCommand, TourPriceResponse, TourQuery, TourRepository, TourRepositoryError,
};
use crate::domain::{
    City, CityDraft, Error, EventType, LookupName, PackageItem, Tour, TourDraft, TourId,
};

fn map_repository_error(error: TourRepositoryError) -> Error {
    match error {
        TourRepositoryError::UnknownReference { message } => {
            Error::invalid_request("tour references an unknown city, event type or package item")
                .with_details(json!({ "code": "unknown_reference", "reason": message }))
        }
        TourRepositoryError::DuplicateName { name } => {
            Error::invalid_request(format!("a lookup named {name} already exists"))
                .with_details(json!({ "field": "name", "code": "duplicate", "value": name }))
        }
        other => Error::new(other.code(), other.to_string()),
    }
}

fn tour_not_found(id: TourId) -> Error {
    Error::not_found(format!("tour {id} not found")).with_details(json!({ "id": id }))
}

/// Tour write service.
#[derive(Clone)]
pub struct TourCommandService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TourCommandService<R> {
    /// Create the service over a repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> TourCommand for TourCommandService<R>
where
    R: TourRepository,
{
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, Error> {
        self.repo
            .create_tour(&draft, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn update_tour(&self, id: TourId, draft: TourDraft) -> Result<Tour, Error> {
        self.repo
            .update_tour(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| tour_not_found(id))
    }

    async fn delete_tour(&self, id: TourId) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete_tour(id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(tour_not_found(id))
        }
    }

    async fn create_city(&self, draft: CityDraft) -> Result<City, Error> {
        self.repo
            .create_city(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn create_event_type(&self, name: LookupName) -> Result<EventType, Error> {
        self.repo
            .create_event_type(&name)
            .await
            .map_err(map_repository_error)
    }

    async fn create_package_item(&self, name: LookupName) -> Result<PackageItem, Error> {
        self.repo
            .create_package_item(&name)
            .await
            .map_err(map_repository_error)
    }
}

/// Tour read service.
#[derive(Clone)]
pub struct TourQueryService<R> {
    repo: Arc<R>,
}

impl<R> TourQueryService<R> {
    /// Create the service over a repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TourQuery for TourQueryService<R>
where
    R: TourRepository,
{
    async fn list_tours(&self) -> Result<Vec<Tour>, Error> {
        self.repo.list_tours().await.map_err(map_repository_error)
    }

    async fn get_tour(&self, id: TourId) -> Result<Tour, Error> {
        self.repo
            .find_tour(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| tour_not_found(id))
    }

    async fn quote_price(
        &self,
        id: TourId,
        registration_date: NaiveDate,
        returning_university: bool,
    ) -> Result<TourPriceResponse, Error> {
        let tour = self.get_tour(id).await?;
        Ok(TourPriceResponse {
            tour_id: tour.id,
            registration_date,
            quote: tour.price_for(registration_date, returning_university),
            registration_open: tour.registration_open(registration_date),
        })
    }

    async fn list_cities(&self) -> Result<Vec<City>, Error> {
        self.repo.list_cities().await.map_err(map_repository_error)
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, Error> {
        self.repo
            .list_event_types()
            .await
            .map_err(map_repository_error)
    }

    async fn list_package_items(&self) -> Result<Vec<PackageItem>, Error> {
        self.repo
            .list_package_items()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "tour_service_tests.rs"]
mod tests;
