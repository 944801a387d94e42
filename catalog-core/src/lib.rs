//! Client-side core of the clothing catalog: the product model, the rules a
//! draft must pass before it is sent, the search predicate, the local store of
//! fetched data and the edit-session state machine.
//!
//! Nothing here renders or reads a clock. The egui front end in `web-ui`
//! drives these types and supplies "today" and "now".

pub mod config;
pub mod draft;
pub mod filter;
pub mod http_client;
pub mod model;
pub mod service;
pub mod session;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{CatalogConfig, ConfigError, ServiceConfig, UiConfig};
pub use draft::{Draft, ProductFields};
pub use filter::ProductFilter;
pub use http_client::CollectionClient;
pub use model::{
    Category, CategoryId, NewProduct, Product, ProductId, RecordId, UNKNOWN_CATEGORY,
};
pub use service::{CatalogError, CollectionService};
pub use session::{EditSession, Notice, NoticeKind, SessionPhase, SubmitError};
pub use store::{CatalogStore, ProductRow};
pub use validation::{validate, Field, ValidationError};
