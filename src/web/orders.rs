//! Orders of the signed-in account.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use super::{ApiError, ApiResult, AppState};
use crate::models::OrderWithDetails;
use crate::store::{OrderStore, StoreResult};

/// Name of the cookie carrying the session.
pub const SESSION_COOKIE: &str = "session";

/// Session data carried in the `session` cookie as URL-encoded JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Logged-in account
    pub account_id: Uuid,
    /// Account email
    #[serde(default)]
    pub email: Option<String>,
    /// Account role
    #[serde(default)]
    pub role: Option<String>,
}

impl Session {
    /// Reads the session from request headers.
    ///
    /// Returns `None` when the cookie is missing, is not JSON or carries no
    /// valid account id.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|cookies| cookie_value(cookies, SESSION_COOKIE))?;

        let decoded = urlencoding::decode(raw).ok()?;
        match serde_json::from_str(&decoded) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("Rejecting session cookie: {}", e);
                None
            }
        }
    }
}

/// Finds `name` in a `Cookie` header value (`a=1; b=2`).
fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Orders list response.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    /// Orders, newest first.
    pub orders: Vec<OrderWithDetails>,
}

/// Loads an account's orders, then the items and payments of each order
/// with one query per order.
pub fn orders_with_details(
    store: &dyn OrderStore,
    account_id: Uuid,
) -> StoreResult<Vec<OrderWithDetails>> {
    store
        .orders_for_account(account_id)?
        .into_iter()
        .map(|order| {
            let items = store.items_for_order(order.id)?;
            let payments = store.payments_for_order(order.id)?;
            Ok(OrderWithDetails {
                order,
                items,
                payments,
            })
        })
        .collect()
}

fn fetch_failed() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("Failed to fetch orders")),
    )
}

/// List the signed-in account's orders.
pub(super) async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<OrdersResponse> {
    let Some(session) = Session::from_headers(&headers) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiError::new("Unauthorized")),
        ));
    };

    let store = Arc::clone(&state.store);
    let account_id = session.account_id;
    let orders =
        tokio::task::spawn_blocking(move || orders_with_details(store.as_ref(), account_id))
            .await
            .map_err(|e| {
                error!("Order query task failed: {}", e);
                fetch_failed()
            })?
            .map_err(|e| {
                error!("Error fetching orders for {}: {}", account_id, e);
                fetch_failed()
            })?;

    Ok(Json(OrdersResponse { orders }))
}
