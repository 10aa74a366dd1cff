//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters and
//! return domain [`Error`](crate::domain::Error)s. Driven ports
//! (`*Repository`, [`MachineTranslator`]) are implemented by outbound
//! adapters and return their own port error enums.

mod macros;
pub(crate) use macros::define_port_error;

mod machine_translator;
mod page_content_command;
mod page_content_query;
mod page_content_repository;
mod tour_command;
mod tour_query;
mod tour_repository;
mod translation_command;
mod translation_query;
mod translation_repository;

#[cfg(test)]
pub use machine_translator::MockMachineTranslator;
pub use machine_translator::{MachineTranslator, MachineTranslatorError};
#[cfg(test)]
pub use page_content_command::MockPageContentCommand;
pub use page_content_command::{
    FixturePageContentCommand, PageContentCommand, PatchPageItemRequest,
};
#[cfg(test)]
pub use page_content_query::MockPageContentQuery;
pub use page_content_query::{FixturePageContentQuery, PageContentQuery};
#[cfg(test)]
pub use page_content_repository::MockPageContentRepository;
pub use page_content_repository::{
    FixturePageContentRepository, PageContentRepository, PageContentRepositoryError, SavedPage,
};
#[cfg(test)]
pub use tour_command::MockTourCommand;
pub use tour_command::{FixtureTourCommand, TourCommand};
#[cfg(test)]
pub use tour_query::MockTourQuery;
pub use tour_query::{FixtureTourQuery, TourPriceResponse, TourQuery};
#[cfg(test)]
pub use tour_repository::MockTourRepository;
pub use tour_repository::{FixtureTourRepository, TourRepository, TourRepositoryError};
#[cfg(test)]
pub use translation_command::MockTranslationCommand;
pub use translation_command::{FixtureTranslationCommand, TranslationCommand};
#[cfg(test)]
pub use translation_query::MockTranslationQuery;
pub use translation_query::{FixtureTranslationQuery, TranslationQuery};
#[cfg(test)]
pub use translation_repository::MockTranslationRepository;
pub use translation_repository::{
    FixtureTranslationRepository, TranslationRepository, TranslationRepositoryError,
};
