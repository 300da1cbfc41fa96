//! Entity CRUD routes built from the kind registry.
//! Each kind gets its own sub-router carrying the kind as an extension, so one set of
//! handlers serves all six resources.

use crate::config::KindRegistry;
use crate::handlers::entity::{create, create_nested, delete, list, list_nested, read, update};
use crate::state::AppState;
use axum::{routing::get, Extension, Router};

pub fn entity_routes(kinds: &KindRegistry) -> Router<AppState> {
    let mut router = Router::new();
    for spec in kinds.iter() {
        let mut kind_router = Router::new().route(
            &format!("/{}/:id", spec.path_segment),
            get(read).put(update).delete(delete),
        );
        match spec.parent {
            None => {
                kind_router = kind_router.route(&format!("/{}", spec.path_segment), get(list).post(create));
            }
            Some(parent) => {
                if let Ok(owner) = kinds.spec(parent.kind) {
                    kind_router = kind_router.route(
                        &format!("/{}/:id/{}", owner.path_segment, spec.path_segment),
                        get(list_nested).post(create_nested),
                    );
                }
            }
        }
        router = router.merge(kind_router.layer(Extension(spec.kind)));
    }
    router
}
