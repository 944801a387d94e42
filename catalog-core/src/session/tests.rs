use chrono::NaiveDate;

use crate::draft::ProductFields;
use crate::model::RecordId;
use crate::service::CatalogError;
use crate::session::{
    EditSession, NoticeKind, SaveOp, SessionError, SessionPhase, SubmitError, SAVE_FAILURE_MESSAGE,
    SAVE_SUCCESS_MESSAGE,
};
use crate::store::CatalogStore;
use crate::test_support::{product, InMemoryCollection, Write};
use crate::validation::{Field, ValidationError};

const NOTICE_MS: u64 = 3000;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn fill(fields: &mut ProductFields) {
    fields.code = "C9".to_string();
    fields.name = "Shirt".to_string();
    fields.import_date = "01/01/2020".to_string();
    fields.quantity = "5".to_string();
    fields.category_id = Some(RecordId::number(1));
}

#[test]
fn test_session_starts_closed() {
    let session = EditSession::new(NOTICE_MS);

    assert_eq!(session.phase(), SessionPhase::Closed);
    assert!(session.draft().is_none());
    assert!(session.notice().is_none());
}

#[test]
fn test_add_opens_empty_draft() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();

    assert_eq!(session.phase(), SessionPhase::OpenNew);
    assert_eq!(session.draft().and_then(|d| d.id()), None);
}

#[test]
fn test_edit_opens_prefilled_draft() {
    let source = product(4, "Linen Shirt", 7, 1);
    let mut session = EditSession::new(NOTICE_MS);
    session.open_existing(&source).unwrap();

    assert_eq!(session.phase(), SessionPhase::OpenExisting);
    let draft = session.draft().unwrap();
    assert_eq!(draft.id(), Some(&RecordId::number(4)));
    assert_eq!(draft.fields().name, "Linen Shirt");
    assert_eq!(draft.fields().quantity, "7");
}

#[test]
fn test_opening_again_replaces_the_draft() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_existing(&product(4, "Linen Shirt", 7, 1)).unwrap();
    session.open_new().unwrap();

    assert_eq!(session.phase(), SessionPhase::OpenNew);
}

#[tokio::test]
async fn test_cancel_from_existing_leaves_store_untouched() {
    let service = InMemoryCollection::with_products(vec![product(4, "Linen Shirt", 7, 1)]);
    let mut store = CatalogStore::new();
    store.refresh_products(&service).await;
    let before = store.current_products().to_vec();

    let mut session = EditSession::new(NOTICE_MS);
    session.open_existing(&store.current_products()[0]).unwrap();
    let fields = session.fields_mut().unwrap();
    fields.name = "Something else".to_string();
    fields.quantity = "99".to_string();
    session.cancel();

    assert_eq!(session.phase(), SessionPhase::Closed);
    assert_eq!(store.current_products(), before.as_slice());
    assert!(service.writes().is_empty());
}

#[tokio::test]
async fn test_submit_new_draft_creates_and_refreshes() {
    let service = InMemoryCollection::with_products(vec![product(1, "Coat", 10, 1)]);
    let mut store = CatalogStore::new();
    store.refresh_products(&service).await;

    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    fill(session.fields_mut().unwrap());

    session.submit(&service, &mut store, today(), || 1_000).await.unwrap();

    assert_eq!(session.phase(), SessionPhase::Closed);
    assert!(matches!(service.writes().as_slice(), [Write::Create(p)] if p.name == "Shirt"));
    assert_eq!(store.current_products().len(), 2);
    assert_eq!(store.current_products()[0].name, "Shirt");

    let notice = session.notice().unwrap();
    assert_eq!(notice.text, SAVE_SUCCESS_MESSAGE);
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(session.notice_clear_due(), Some(4_000));
}

#[tokio::test]
async fn test_submit_existing_draft_replaces_by_id() {
    let service = InMemoryCollection::with_products(vec![product(4, "Linen Shirt", 7, 1)]);
    let mut store = CatalogStore::new();
    store.refresh_products(&service).await;

    let mut session = EditSession::new(NOTICE_MS);
    session.open_existing(&store.current_products()[0]).unwrap();
    session.fields_mut().unwrap().quantity = "3".to_string();

    session.submit(&service, &mut store, today(), || 0).await.unwrap();

    match service.writes().as_slice() {
        [Write::Replace(id, body)] => {
            assert_eq!(id, &RecordId::number(4));
            assert_eq!(body.id, RecordId::number(4));
            assert_eq!(body.quantity, 3);
        }
        other => panic!("unexpected writes: {other:?}"),
    }
    assert_eq!(store.product(&RecordId::number(4)).map(|p| p.quantity), Some(3));
}

#[test]
fn test_validation_failure_keeps_draft_and_shows_reason() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    let fields = session.fields_mut().unwrap();
    fill(fields);
    fields.import_date = "31/02/2024".to_string();
    let before = session.draft().cloned();

    let result = session.begin_submit(today(), 500);

    assert!(matches!(
        result,
        Err(SubmitError::Invalid(ValidationError::InvalidDateFormat))
    ));
    assert_eq!(session.phase(), SessionPhase::OpenNew);
    assert_eq!(session.draft().cloned(), before);

    let notice = session.notice().unwrap();
    assert_eq!(notice.text, "Invalid date format. Use DD/MM/YYYY");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(session.notice_clear_due(), Some(3_500));
}

#[test]
fn test_missing_category_is_reported_before_rules() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    let fields = session.fields_mut().unwrap();
    fill(fields);
    fields.category_id = None;

    let result = session.begin_submit(today(), 0);

    assert!(matches!(
        result,
        Err(SubmitError::Invalid(ValidationError::MissingField(Field::Category)))
    ));
}

#[test]
fn test_second_submit_while_in_flight_is_rejected() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    fill(session.fields_mut().unwrap());

    let request = session.begin_submit(today(), 0).unwrap();
    assert!(matches!(request.op, SaveOp::Create(_)));
    assert_eq!(session.phase(), SessionPhase::Submitting);

    assert!(matches!(session.begin_submit(today(), 0), Err(SubmitError::SaveInFlight)));
    assert_eq!(session.phase(), SessionPhase::Submitting);
    assert!(session.fields_mut().is_none());
    assert_eq!(session.open_new(), Err(SessionError::SaveInFlight));
}

#[test]
fn test_submit_without_draft_is_rejected() {
    let mut session = EditSession::new(NOTICE_MS);
    assert!(matches!(session.begin_submit(today(), 0), Err(SubmitError::NoDraft)));
}

#[tokio::test]
async fn test_transport_failure_keeps_draft_for_retry() {
    let service = InMemoryCollection::with_products(vec![product(4, "Linen Shirt", 7, 1)]);
    service.fail_writes(true);
    let mut store = CatalogStore::new();
    store.refresh_products(&service).await;

    let mut session = EditSession::new(NOTICE_MS);
    session.open_existing(&store.current_products()[0]).unwrap();
    session.fields_mut().unwrap().name = "Linen Shirt v2".to_string();

    let result = session.submit(&service, &mut store, today(), || 0).await;

    assert!(matches!(result, Err(SubmitError::Transport(_))));
    assert_eq!(session.phase(), SessionPhase::OpenExisting);
    assert_eq!(session.draft().unwrap().fields().name, "Linen Shirt v2");
    assert_eq!(session.notice().unwrap().text, SAVE_FAILURE_MESSAGE);
    assert_eq!(service.stored(4).unwrap().name, "Linen Shirt");

    service.fail_writes(false);
    session.submit(&service, &mut store, today(), || 0).await.unwrap();
    assert_eq!(service.stored(4).unwrap().name, "Linen Shirt v2");
}

#[test]
fn test_completion_after_cancel_does_not_reopen() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    fill(session.fields_mut().unwrap());
    let request = session.begin_submit(today(), 0).unwrap();

    session.cancel();
    session.open_new().unwrap();

    let outcome = session.complete_submit(
        request.ticket,
        Err(CatalogError::ServerError { status: 500 }),
        100,
    );

    assert!(outcome.is_err());
    assert_eq!(session.phase(), SessionPhase::OpenNew);
    assert_eq!(session.draft().unwrap().fields(), &ProductFields::default());
    assert_eq!(session.notice().unwrap().text, SAVE_FAILURE_MESSAGE);
}

#[test]
fn test_late_success_still_reports_refresh() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    fill(session.fields_mut().unwrap());
    let request = session.begin_submit(today(), 0).unwrap();
    session.cancel();

    let outcome = session.complete_submit(request.ticket, Ok(()), 10);

    assert!(outcome.is_ok());
    assert_eq!(session.phase(), SessionPhase::Closed);
    assert_eq!(session.notice().unwrap().text, SAVE_SUCCESS_MESSAGE);
}

#[test]
fn test_new_notice_supersedes_pending_clear() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();

    // Missing fields: first notice at t=0.
    assert!(session.begin_submit(today(), 0).is_err());
    fill(session.fields_mut().unwrap());
    session.fields_mut().unwrap().quantity = "0".to_string();

    // Second notice at t=2000 replaces the first and its clear.
    assert!(session.begin_submit(today(), 2_000).is_err());
    assert!(!session.tick(3_000));
    assert_eq!(
        session.notice().unwrap().text,
        "Quantity must be a positive integer"
    );

    assert!(session.tick(5_000));
    assert!(session.notice().is_none());
}

#[test]
fn test_dismissed_notice_does_not_come_back() {
    let mut session = EditSession::new(NOTICE_MS);
    session.open_new().unwrap();
    assert!(session.begin_submit(today(), 0).is_err());
    assert!(session.notice().is_some());

    session.dismiss_notice();

    assert!(session.notice().is_none());
    assert_eq!(session.notice_clear_due(), None);
    assert!(!session.tick(NOTICE_MS));
    assert_eq!(session.phase(), SessionPhase::OpenNew);
}
