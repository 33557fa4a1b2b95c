//! Projection of upstream GraphQL bodies into the dashboard's JSON contracts.
//!
//! Every normalizer checks the response in the same order: the GraphQL error
//! list first, then the presence of the requested entity, and only then the
//! shape of the payload.

pub mod github;
pub mod leetcode;

pub use github::{normalize_github, normalize_viewer};
pub use leetcode::normalize_leetcode;

use serde_json::Value;

use crate::error::{DashboardError, Result};
use crate::types::GraphQLResponse;

/// Returns the `data` object of a GraphQL response, failing with the first
/// reported error message when the upstream returned an error list.
pub(crate) fn response_data(raw: Value) -> Result<Option<Value>> {
    let response: GraphQLResponse = serde_json::from_value(raw)?;

    if let Some(first) = response.errors.as_ref().and_then(|errors| errors.first()) {
        return Err(DashboardError::UpstreamGraphQLError(first.message.clone()));
    }

    Ok(response.data)
}

/// Takes `field` out of `data`, treating a missing or null value as absent
pub(crate) fn take_field(data: Option<Value>, field: &str) -> Option<Value> {
    match data {
        Some(Value::Object(mut map)) => match map.remove(field) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        },
        _ => None,
    }
}
