//! Driving port for reading tours, prices and lookups.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{City, Error, EventType, PackageItem, PriceQuote, Tour, TourId};

/// Price of one registration together with the registration window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourPriceResponse {
    pub tour_id: TourId,
    pub registration_date: NaiveDate,
    #[serde(flatten)]
    pub quote: PriceQuote,
    /// Informational; registration is not blocked when `false`.
    pub registration_open: bool,
}

/// Inbound contract for tour reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourQuery: Send + Sync {
    /// Every tour, newest first.
    async fn list_tours(&self) -> Result<Vec<Tour>, Error>;

    /// One tour. `NotFound` when absent.
    async fn get_tour(&self, id: TourId) -> Result<Tour, Error>;

    /// Price a registration for a tour. `NotFound` when the tour is absent.
    async fn quote_price(
        &self,
        id: TourId,
        registration_date: NaiveDate,
        returning_university: bool,
    ) -> Result<TourPriceResponse, Error>;

    async fn list_cities(&self) -> Result<Vec<City>, Error>;

    async fn list_event_types(&self) -> Result<Vec<EventType>, Error>;

    async fn list_package_items(&self) -> Result<Vec<PackageItem>, Error>;
}

/// Query fixture backed by an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTourQuery;

#[async_trait]
impl TourQuery for FixtureTourQuery {
    async fn list_tours(&self) -> Result<Vec<Tour>, Error> {
        Ok(Vec::new())
    }

    async fn get_tour(&self, id: TourId) -> Result<Tour, Error> {
        Err(Error::not_found(format!("tour {id} not found")))
    }

    async fn quote_price(
        &self,
        id: TourId,
        _registration_date: NaiveDate,
        _returning_university: bool,
    ) -> Result<TourPriceResponse, Error> {
        Err(Error::not_found(format!("tour {id} not found")))
    }

    async fn list_cities(&self) -> Result<Vec<City>, Error> {
        Ok(Vec::new())
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, Error> {
        Ok(Vec::new())
    }

    async fn list_package_items(&self) -> Result<Vec<PackageItem>, Error> {
        Ok(Vec::new())
    }
}
