#![no_main]

use libfuzzer_sys::fuzz_target;
use quill::command::{Command, parse};
use quill_core::Operation;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    // Never panics, and edit text is always taken verbatim from the line.
    if let Ok(Some(Command::Edit(op))) = parse(line) {
        match op {
            Operation::Insert { text, .. } | Operation::Replace { new_text: text, .. } => {
                assert!(!text.is_empty());
                assert!(line.contains(text.as_str()));
            }
            Operation::Delete { removed, .. } => assert!(removed.is_empty()),
        }
    }
});
