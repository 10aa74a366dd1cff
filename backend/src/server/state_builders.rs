//! Builders for HTTP state ports and repository-backed service pairs.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use tourbook::domain::ports::{
    FixturePageContentCommand, FixturePageContentQuery, FixtureTourCommand, FixtureTourQuery,
    FixtureTranslationCommand, FixtureTranslationQuery, PageContentCommand, PageContentQuery,
    TourCommand, TourQuery, TranslationCommand, TranslationQuery,
};
use tourbook::domain::{
    PageContentCommandService, PageContentQueryService, TourCommandService, TourQueryService,
    TranslationCommandService, TranslationQueryService, TranslationSuggester,
};
use tourbook::inbound::http::state::{HttpState, HttpStatePorts};
use tourbook::outbound::persistence::{
    DbPool, DieselPageContentRepository, DieselTourRepository, DieselTranslationRepository,
};

use super::ServerConfig;

/// Build a command/query pair using real services when a pool is available,
/// otherwise using fixture implementations.
fn build_service_pair<Pool, Cmd, Query, MakePair>(
    pool: &Option<Pool>,
    make_pair: MakePair,
    fixtures: (Arc<Cmd>, Arc<Query>),
) -> (Arc<Cmd>, Arc<Query>)
where
    Cmd: ?Sized,
    Query: ?Sized,
    MakePair: FnOnce(&Pool) -> (Arc<Cmd>, Arc<Query>),
{
    match pool {
        Some(pool) => make_pair(pool),
        None => fixtures,
    }
}

/// Generates a builder wiring one Diesel repository into its command and
/// query services.
macro_rules! build_repository_pair {
    (
        $fn_name:ident,
        $cmd_trait:ty,
        $query_trait:ty,
        $repo:ident,
        $cmd_service:ident,
        $query_service:ident,
        $fixture_cmd:path,
        $fixture_query:path
    ) => {
        fn $fn_name(
            pool: &Option<DbPool>,
            clock: &Arc<dyn Clock>,
        ) -> (Arc<$cmd_trait>, Arc<$query_trait>) {
            build_service_pair(
                pool,
                |pool| {
                    let repo = Arc::new($repo::new(pool.clone()));
                    (
                        Arc::new($cmd_service::new(repo.clone(), clock.clone())) as Arc<$cmd_trait>,
                        Arc::new($query_service::new(repo)) as Arc<$query_trait>,
                    )
                },
                (
                    Arc::new($fixture_cmd) as Arc<$cmd_trait>,
                    Arc::new($fixture_query) as Arc<$query_trait>,
                ),
            )
        }
    };
}

build_repository_pair!(
    build_tours_pair,
    dyn TourCommand,
    dyn TourQuery,
    DieselTourRepository,
    TourCommandService,
    TourQueryService,
    FixtureTourCommand,
    FixtureTourQuery
);

build_repository_pair!(
    build_pages_pair,
    dyn PageContentCommand,
    dyn PageContentQuery,
    DieselPageContentRepository,
    PageContentCommandService,
    PageContentQueryService,
    FixturePageContentCommand,
    FixturePageContentQuery
);

build_repository_pair!(
    build_translations_pair,
    dyn TranslationCommand,
    dyn TranslationQuery,
    DieselTranslationRepository,
    TranslationCommandService,
    TranslationQueryService,
    FixtureTranslationCommand,
    FixtureTranslationQuery
);

fn build_ports(pool: &Option<DbPool>, clock: &Arc<dyn Clock>) -> HttpStatePorts {
    let (tours, tours_query) = build_tours_pair(pool, clock);
    let (pages, pages_query) = build_pages_pair(pool, clock);
    let (translations, translations_query) = build_translations_pair(pool, clock);
    HttpStatePorts {
        tours,
        tours_query,
        pages,
        pages_query,
        translations,
        translations_query,
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
///
/// No machine translation engine is wired, so the suggester serves the
/// built-in phrase dictionary and reports itself unavailable.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    web::Data::new(HttpState::new(
        build_ports(&config.db_pool, &clock),
        Arc::new(TranslationSuggester::dictionary_only()),
    ))
}
