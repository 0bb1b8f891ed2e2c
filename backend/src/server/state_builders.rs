//! Builders for the HTTP state backed by configured adapters.

use std::sync::Arc;

use actix_web::web;

use exhibitflow::domain::StallService;
use exhibitflow::domain::ports::{StallCommand, StallQuery};
use exhibitflow::inbound::http::state::HttpState;
use exhibitflow::outbound::events::BroadcastEventSink;
use exhibitflow::outbound::persistence::{DieselStallRepository, InMemoryStallStore};

use super::ServerConfig;

/// Build the stall command/query pair.
///
/// Uses the Diesel-backed store when a pool is configured, otherwise the
/// in-memory store so the server also runs without a database.
fn build_stall_services(
    config: &ServerConfig,
    events: Arc<BroadcastEventSink>,
) -> (Arc<dyn StallCommand>, Arc<dyn StallQuery>) {
    match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(StallService::new(
                Arc::new(DieselStallRepository::new(pool.clone())),
                events,
            ));
            (
                service.clone() as Arc<dyn StallCommand>,
                service as Arc<dyn StallQuery>,
            )
        }
        None => {
            let service = Arc::new(StallService::new(
                Arc::new(InMemoryStallStore::new()),
                events,
            ));
            (
                service.clone() as Arc<dyn StallCommand>,
                service as Arc<dyn StallQuery>,
            )
        }
    }
}

/// Build the shared HTTP state from configured ports.
pub(super) fn build_http_state(
    config: &ServerConfig,
    events: Arc<BroadcastEventSink>,
) -> web::Data<HttpState> {
    let (stalls, stalls_query) = build_stall_services(config, events);
    web::Data::new(HttpState::new(stalls, stalls_query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use exhibitflow::domain::stall::{NewStall, StallCode, StallStatus};

    #[tokio::test]
    async fn pool_absent_falls_back_to_in_memory_store() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket addr"));
        let state = build_http_state(&config, Arc::new(BroadcastEventSink::new()));

        let created = state
            .stalls
            .create(NewStall {
                code: StallCode::new("A-001").expect("valid code"),
                size: exhibitflow::domain::stall::StallSize::Small,
                location: "Hall A".to_owned(),
                price: BigDecimal::from(100),
            })
            .await
            .expect("create succeeds without a database");

        assert_eq!(created.status, StallStatus::Available);
        let fetched = state
            .stalls_query
            .get(&created.id)
            .await
            .expect("created stall is readable");
        assert_eq!(fetched, created);
    }
}
