#![no_main]

use cmdbench::csv_output::{parse_sample_row, parse_summary_row, split_row};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(row) = std::str::from_utf8(data) {
        let _ = split_row(row);
        let _ = parse_sample_row(row);
        let _ = parse_summary_row(row);
    }
});
