// tests/session_state.rs
use html_report::config::state::{Phase, Session, Upload};
use html_report::error::ReportError;
use html_report::pipeline::RunOutcome;

fn upload(name: &str) -> Upload {
    Upload::new(name, b"<table></table>".to_vec()).unwrap()
}

#[test]
fn upload_alone_does_not_start_work() {
    let mut session = Session::default();
    assert!(!session.can_convert());
    session.accept_upload(upload("a.html")).unwrap();
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.can_convert());
}

#[test]
fn begin_requires_an_upload() {
    let mut session = Session::default();
    assert!(matches!(session.begin(), Err(ReportError::NoUpload)));
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn processing_rejects_a_second_run_and_new_uploads() {
    let mut session = Session::default();
    session.accept_upload(upload("a.html")).unwrap();
    let started = session.begin().unwrap();
    assert_eq!(started.name, "a.html");
    assert!(session.is_processing());
    assert!(!session.can_convert());

    assert!(matches!(session.begin(), Err(ReportError::Busy)));
    assert!(matches!(session.accept_upload(upload("b.html")), Err(ReportError::Busy)));
    assert_eq!(session.upload().map(|u| u.name.as_str()), Some("a.html"));

    session.complete(Ok(RunOutcome::NoTable));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(matches!(session.outcome(), Some(Ok(RunOutcome::NoTable))));
}

#[test]
fn failure_still_returns_to_idle() {
    let mut session = Session::default();
    session.accept_upload(upload("a.html")).unwrap();
    session.begin().unwrap();
    session.complete(Err(ReportError::InvalidExpectedTotal));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.can_convert());
    assert!(matches!(session.outcome(), Some(Err(_))));

    // A new upload clears the stale outcome
    session.accept_upload(upload("b.html")).unwrap();
    assert!(session.outcome().is_none());
}

#[test]
fn only_html_uploads_are_accepted() {
    assert!(matches!(Upload::new("data.csv", vec![]), Err(ReportError::Upload(_))));
    assert!(Upload::new("PAGE.HTM", vec![]).is_ok());
}
