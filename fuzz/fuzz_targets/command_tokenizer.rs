#![no_main]

use cmdbench::argv::{build_argv, tokenize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Unbalanced quotes must surface as errors, not panics
        let _ = tokenize(input);
        if let Ok(argv) = build_argv(input, Some("sh -c")) {
            assert_eq!(argv.last().map(String::as_str), Some(input));
        }
    }
});
