pub mod manager;
pub mod notice;
pub mod state;

#[cfg(test)]
mod tests;

pub use manager::{EditSession, SAVE_FAILURE_MESSAGE, SAVE_SUCCESS_MESSAGE};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use state::{
    SaveOp, SaveRequest, SaveTicket, SessionError, SessionPhase, SessionState, SubmitError,
};
