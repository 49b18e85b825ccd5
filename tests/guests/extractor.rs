//! Guest extraction from individual checkout sessions

#[path = "../common/mod.rs"]
mod common;

use common::*;

fn vip_catalog() -> PaymentLinkCatalog {
    catalog(&[("pl_1", "VIP"), ("pl_2", "Standard")])
}

#[test]
fn test_extracts_name_email_and_category() {
    let session = paid_session("cs_1", "pl_1", Some("Ann"), Some("ann@x.com"));

    let record = extract_guest(&session, &vip_catalog()).unwrap().unwrap();

    assert_eq!(record.to_row(), row("Ann", "ann@x.com", "VIP"));
}

#[test]
fn test_category_comes_from_matching_link() {
    let session = paid_session("cs_1", "pl_2", Some("Bo"), Some("bo@x.com"));

    let record = extract_guest(&session, &vip_catalog()).unwrap().unwrap();

    assert_eq!(record.category, "Standard");
}

#[test]
fn test_missing_name_and_email_become_na() {
    let catalog = vip_catalog();

    let no_name = paid_session("cs_1", "pl_1", None, Some("ann@x.com"));
    assert_eq!(
        extract_guest(&no_name, &catalog).unwrap().unwrap().to_row(),
        row("NA", "ann@x.com", "VIP")
    );

    let no_email = paid_session("cs_2", "pl_1", Some("Ann"), None);
    assert_eq!(
        extract_guest(&no_email, &catalog).unwrap().unwrap().to_row(),
        row("Ann", "NA", "VIP")
    );

    let neither = paid_session("cs_3", "pl_1", None, None);
    assert_eq!(
        extract_guest(&neither, &catalog).unwrap().unwrap().to_row(),
        row("NA", "NA", "VIP")
    );
}

#[test]
fn test_ineligible_sessions_yield_none() {
    let catalog = vip_catalog();

    let mut not_payment = paid_session("cs_1", "pl_1", Some("Ann"), None);
    not_payment.mode = SessionMode::Other;
    assert!(extract_guest(&not_payment, &catalog).unwrap().is_none());

    let mut expired = paid_session("cs_2", "pl_1", Some("Ann"), None);
    expired.status = Some(SessionStatus::Other);
    assert!(extract_guest(&expired, &catalog).unwrap().is_none());

    let mut open = paid_session("cs_3", "pl_1", Some("Ann"), None);
    open.status = None;
    assert!(extract_guest(&open, &catalog).unwrap().is_none());

    let mut no_details = paid_session("cs_4", "pl_1", Some("Ann"), None);
    no_details.customer_details = None;
    assert!(extract_guest(&no_details, &catalog).unwrap().is_none());
}

#[test]
fn test_ineligible_session_with_unknown_link_is_not_an_error() {
    let mut session = paid_session("cs_1", "pl_unknown", Some("Ann"), None);
    session.customer_details = None;

    assert!(extract_guest(&session, &vip_catalog()).unwrap().is_none());
}

#[test]
fn test_unknown_payment_link_is_an_error() {
    let session = paid_session("cs_9", "pl_unknown", Some("Ann"), Some("ann@x.com"));

    match extract_guest(&session, &vip_catalog()) {
        Err(AppError::CategoryLookup {
            session_id,
            payment_link_id,
        }) => {
            assert_eq!(session_id, "cs_9");
            assert_eq!(payment_link_id.as_deref(), Some("pl_unknown"));
        }
        other => panic!("expected CategoryLookup, got {:?}", other),
    }
}

#[test]
fn test_missing_payment_link_is_an_error() {
    let mut session = paid_session("cs_9", "pl_1", Some("Ann"), Some("ann@x.com"));
    session.payment_link = None;

    assert!(matches!(
        extract_guest(&session, &vip_catalog()),
        Err(AppError::CategoryLookup {
            payment_link_id: None,
            ..
        })
    ));
}
