use chrono::NaiveDate;

use super::notice::{Notice, NoticeBoard};
use super::state::{
    SaveOp, SaveRequest, SaveTicket, SessionError, SessionPhase, SessionState, SubmitError,
};
use crate::config::UiConfig;
use crate::draft::{Draft, ProductFields};
use crate::model::Product;
use crate::service::{self, CollectionService};
use crate::store::CatalogStore;
use crate::validation;

pub const SAVE_SUCCESS_MESSAGE: &str = "Product updated successfully!";
pub const SAVE_FAILURE_MESSAGE: &str = "Error updating product";

/// Owns the single draft and drives add/edit → validate → save → refresh.
///
/// The controller never reads a clock: callers pass `today` for validation and
/// a millisecond timestamp for notice scheduling.
pub struct EditSession {
    state: SessionState,
    notices: NoticeBoard,
    notice_duration_ms: u64,
    next_ticket: u64,
}

impl EditSession {
    pub fn new(notice_duration_ms: u64) -> Self {
        Self {
            state: SessionState::Closed,
            notices: NoticeBoard::new(),
            notice_duration_ms,
            next_ticket: 0,
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(config.notice_duration_ms)
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.state.draft()
    }

    /// Editable draft fields. `None` while closed or while a save is in flight.
    pub fn fields_mut(&mut self) -> Option<&mut ProductFields> {
        match &mut self.state {
            SessionState::Open(draft) => Some(draft.fields_mut()),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn notice_clear_due(&self) -> Option<u64> {
        self.notices.clear_due_at()
    }

    /// Closes the current notice before its deadline.
    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    /// Runs the notice auto-clear. Call once per frame.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.notices.tick(now_ms)
    }

    /// "Add": start an empty draft, replacing any open one.
    pub fn open_new(&mut self) -> Result<(), SessionError> {
        self.open(Draft::empty())
    }

    /// "Edit": start a draft copied from `product`, replacing any open one.
    pub fn open_existing(&mut self, product: &Product) -> Result<(), SessionError> {
        self.open(Draft::from_product(product))
    }

    fn open(&mut self, draft: Draft) -> Result<(), SessionError> {
        if self.is_submitting() {
            log::debug!("Ignoring open request while a save is in flight");
            return Err(SessionError::SaveInFlight);
        }

        log::debug!("Opening edit session for {:?}", draft.id());
        self.state = SessionState::Open(draft);
        Ok(())
    }

    /// Discard the draft without confirmation. A save already sent is not
    /// aborted; its completion will no longer reopen or close anything.
    pub fn cancel(&mut self) {
        if let SessionState::Submitting { ticket, .. } = &self.state {
            log::debug!("Edit session cancelled while save {:?} is in flight", ticket);
        }
        self.state = SessionState::Closed;
    }

    /// Check the draft and, if it passes, move to Submitting and hand back the
    /// request to send. A rejected draft stays open and unchanged, with the
    /// reason shown as a notice.
    pub fn begin_submit(&mut self, today: NaiveDate, now_ms: u64) -> Result<SaveRequest, SubmitError> {
        let draft = match std::mem::take(&mut self.state) {
            SessionState::Open(draft) => draft,
            submitting @ SessionState::Submitting { .. } => {
                self.state = submitting;
                log::debug!("Rejecting submit: a save is already in flight");
                return Err(SubmitError::SaveInFlight);
            }
            SessionState::Closed => return Err(SubmitError::NoDraft),
        };

        let product = match validation::prepare(draft.fields(), today) {
            Ok(product) => product,
            Err(e) => {
                log::debug!("Draft rejected: {}", e);
                self.show(Notice::error(e.to_string()), now_ms);
                self.state = SessionState::Open(draft);
                return Err(e.into());
            }
        };

        let op = match &draft {
            Draft::New(_) => SaveOp::Create(product),
            Draft::Existing(id, _) => SaveOp::Replace(id.clone(), product.with_id(id.clone())),
        };

        let ticket = SaveTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = SessionState::Submitting { draft, ticket };

        Ok(SaveRequest { ticket, op })
    }

    /// Apply the outcome of a save. Success closes the session; failure
    /// returns to the open draft. Either way a notice is shown. The outcome is
    /// handed back so the caller knows whether to refresh the product list.
    pub fn complete_submit(
        &mut self,
        ticket: SaveTicket,
        outcome: service::Result<()>,
        now_ms: u64,
    ) -> service::Result<()> {
        let is_current =
            matches!(&self.state, SessionState::Submitting { ticket: current, .. } if *current == ticket);

        match &outcome {
            Ok(()) => {
                if is_current {
                    self.state = SessionState::Closed;
                } else {
                    log::debug!("Save {:?} finished after its session was closed", ticket);
                }
                self.show(Notice::success(SAVE_SUCCESS_MESSAGE), now_ms);
            }
            Err(e) => {
                log::error!("Error updating product: {}", e);
                if is_current {
                    if let SessionState::Submitting { draft, .. } = std::mem::take(&mut self.state) {
                        self.state = SessionState::Open(draft);
                    }
                }
                self.show(Notice::error(SAVE_FAILURE_MESSAGE), now_ms);
            }
        }

        outcome
    }

    /// Whole save pipeline: validate, send, close, refresh the store.
    pub async fn submit<S, C>(
        &mut self,
        service: &S,
        store: &mut CatalogStore,
        today: NaiveDate,
        now_ms: C,
    ) -> Result<(), SubmitError>
    where
        S: CollectionService + ?Sized,
        C: Fn() -> u64,
    {
        let request = self.begin_submit(today, now_ms())?;
        let outcome = request.send(service).await;

        self.complete_submit(request.ticket, outcome, now_ms())
            .map_err(SubmitError::Transport)?;

        store.refresh_products(service).await;
        Ok(())
    }

    fn show(&mut self, notice: Notice, now_ms: u64) {
        self.notices.show(notice, now_ms, self.notice_duration_ms);
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}
