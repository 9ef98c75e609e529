mod impls;

use crate::request_context::RequestDispatchContext;

pub const USER_AGENT: &str = concat!("mercadolibre-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Marketplace API client. Cloning is cheap; clones share one credential
/// broker, so a refresh by any clone is seen by all of them.
#[derive(Clone)]
pub struct MeliClient {
    context: RequestDispatchContext,
}
