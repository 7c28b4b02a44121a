//! Typed client for the commercetools Platform API.
//!
//! - [`PlatformClient`]: Authenticated client for one project
//! - [`CustomerGroup`] and friends: Models and request builders for `customer-groups`
//! - [`PlatformError`] and [`ErrorResponse`]: API error handling

mod client;
mod customer_group;
mod errors;

pub use client::PlatformClient;
pub use customer_group::{
    CustomerGroup, CustomerGroupByPathRequestBuilder, CustomerGroupDraft, CustomerGroupRequest,
    CustomerGroupUpdate, CustomerGroupUpdateAction, CustomerGroupsRequestBuilder,
};
pub use errors::{ErrorObject, ErrorResponse, PlatformError};
