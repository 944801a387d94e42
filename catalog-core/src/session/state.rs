use thiserror::Error;

use crate::draft::Draft;
use crate::model::{NewProduct, Product, ProductId};
use crate::service::{self, CatalogError, CollectionService};
use crate::validation::ValidationError;

/// Identifies one save request so a late completion can be matched (or not)
/// against the session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveTicket(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open(Draft),
    Submitting { draft: Draft, ticket: SaveTicket },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Closed,
    OpenNew,
    OpenExisting,
    Submitting,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Closed => SessionPhase::Closed,
            SessionState::Open(Draft::New(_)) => SessionPhase::OpenNew,
            SessionState::Open(Draft::Existing(..)) => SessionPhase::OpenExisting,
            SessionState::Submitting { .. } => SessionPhase::Submitting,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            SessionState::Closed => None,
            SessionState::Open(draft) | SessionState::Submitting { draft, .. } => Some(draft),
        }
    }
}

/// The remote write a validated draft turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOp {
    Create(NewProduct),
    Replace(ProductId, Product),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub ticket: SaveTicket,
    pub op: SaveOp,
}

impl SaveRequest {
    pub async fn send<S>(&self, service: &S) -> service::Result<()>
    where
        S: CollectionService + ?Sized,
    {
        match &self.op {
            SaveOp::Create(product) => service.create_product(product).await,
            SaveOp::Replace(id, product) => service.replace_product(id, product).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A save is already in progress")]
    SaveInFlight,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No product is being edited")]
    NoDraft,
    #[error("A save is already in progress")]
    SaveInFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Error updating product")]
    Transport(#[source] CatalogError),
}
