#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quill_core::{HistoryConfig, HistoryEngine, InvalidOpPolicy, Operation};

// Positions are u8 so that in-bounds and out-of-bounds edits both occur.
#[derive(Debug, Arbitrary)]
enum Step {
    Insert { pos: u8, text: String },
    Delete { pos: u8, len: u8 },
    Replace { pos: u8, len: u8, text: String },
    Undo,
    Redo,
}

#[derive(Debug, Arbitrary)]
struct Input {
    initial: String,
    reject_invalid: bool,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let policy = if input.reject_invalid {
        InvalidOpPolicy::Reject
    } else {
        InvalidOpPolicy::Track
    };
    let config = HistoryConfig::unlimited().with_invalid_ops(policy);
    let mut engine = HistoryEngine::with_text(&input.initial, config);

    for step in input.steps {
        let _ = match step {
            Step::Insert { pos, text } => engine.execute(Operation::insert(pos.into(), text)),
            Step::Delete { pos, len } => engine.execute(Operation::delete(pos.into(), len.into())),
            Step::Replace { pos, len, text } => {
                engine.execute(Operation::replace(pos.into(), len.into(), text))
            }
            Step::Undo => engine.undo(),
            Step::Redo => engine.redo(),
        };
        assert_eq!(
            engine.buffer().len_chars(),
            engine.current_text().chars().count(),
            "length must track the text"
        );
    }

    // Walk to the newest state, then all the way back and forth again. Both
    // directions must land exactly where they started, no-op edits included.
    while engine.can_redo() {
        let _ = engine.redo();
    }
    let latest = engine.current_text();
    let depth = engine.undo_depth();
    while engine.can_undo() {
        let _ = engine.undo();
    }
    let earliest = engine.current_text();
    for _ in 0..depth {
        let _ = engine.redo();
    }
    assert_eq!(engine.current_text(), latest);
    for _ in 0..depth {
        let _ = engine.undo();
    }
    assert_eq!(engine.current_text(), earliest);
});
