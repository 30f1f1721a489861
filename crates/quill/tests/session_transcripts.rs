#![forbid(unsafe_code)]

//! End-to-end transcripts through the session loop.
//!
//! Each test feeds a script to [`Session::run`] and checks both the printed
//! feedback and the final document, the way a user at the prompt would see
//! them.
//!
//! Run:
//!   cargo test -p quill --test session_transcripts

use quill::session::Session;
use quill_core::{HistoryConfig, HistoryEngine, InvalidOpPolicy};

fn run(engine: HistoryEngine, script: &str) -> (String, Session) {
    let mut session = Session::new(engine);
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).expect("in-memory io");
    (String::from_utf8(out).expect("utf-8 transcript"), session)
}

#[test]
fn insert_delete_undo_redo_walkthrough() {
    let script = "\
insert 0 hello
show
delete 1 3
show
undo
show
undo
show
redo
show
exit
";
    let (out, _) = run(HistoryEngine::default(), script);
    assert_eq!(
        out,
        "Document: \"hello\"\n\
         Document: \"ho\"\n\
         Document: \"hello\"\n\
         Document: \"\"\n\
         Document: \"hello\"\n"
    );
}

#[test]
fn replace_round_trip_with_menu_numbers() {
    let script = "3 0 5 HELLO\n6\n4\n6\n5\n6\n7\n";
    let engine = HistoryEngine::with_text("hello", HistoryConfig::default());
    let (out, _) = run(engine, script);
    assert_eq!(
        out,
        "Document: \"HELLO\"\nDocument: \"hello\"\nDocument: \"HELLO\"\n"
    );
}

#[test]
fn clamped_delete_then_undo() {
    let engine = HistoryEngine::with_text("hello", HistoryConfig::default());
    let (out, session) = run(engine, "delete 2 100\nshow\nundo\n");
    assert_eq!(out, "Document: \"he\"\n");
    assert_eq!(session.engine().current_text(), "hello");
}

#[test]
fn boundary_messages() {
    let engine = HistoryEngine::with_text("abc", HistoryConfig::default());
    let (out, session) = run(engine, "insert 3 !\ndelete 4 1\nshow\n");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2, "{out}");
    assert!(lines[0].starts_with("Delete: invalid position 4"));
    assert_eq!(lines[1], "Document: \"abc!\"");
    // The failed delete is still on the undo stack under the default policy.
    assert_eq!(session.engine().undo_depth(), 2);
}

#[test]
fn reject_policy_keeps_redo_history() {
    let config = HistoryConfig::default().with_invalid_ops(InvalidOpPolicy::Reject);
    let script = "insert 0 abc\nundo\nreplace 9 1 x\nredo\nshow\n";
    let (out, session) = run(HistoryEngine::new(config), script);
    let lines: Vec<_> = out.lines().collect();
    assert!(lines[0].starts_with("Replace: invalid position 9"));
    assert_eq!(lines[1], "Document: \"abc\"");
    assert_eq!(session.engine().undo_depth(), 1);
}

#[test]
fn new_edit_discards_redo() {
    let script = "insert 0 one\ninsert 3 two\nundo\ninsert 3 six\nredo\nshow\n";
    let (out, session) = run(HistoryEngine::default(), script);
    assert_eq!(out, "Nothing to redo\nDocument: \"onesix\"\n");
    assert_eq!(session.engine().redo_depth(), 0);
}

#[test]
fn unicode_positions_are_chars() {
    let script = "insert 0 naïve café\nreplace 2 1 i\nshow\nundo\nshow\n";
    let (out, _) = run(HistoryEngine::default(), script);
    assert_eq!(out, "Document: \"naive café\"\nDocument: \"naïve café\"\n");
}

#[test]
fn end_of_input_without_exit() {
    let (out, session) = run(HistoryEngine::default(), "insert 0 tail");
    assert_eq!(out, "");
    assert_eq!(session.into_engine().current_text(), "tail");
}
