//! Resource types managed by the provider.

pub mod customer_group;

pub use customer_group::{handle_commercetools_error, CustomerGroupResource};
