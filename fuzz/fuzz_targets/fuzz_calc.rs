#![no_main]

use calculation::{CalcError, calc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Limit input size to keep runs fast on long digit runs
    if data.len() > 4096 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        match calc(s) {
            Ok(_) | Err(CalcError::DivideByZero) => {}
            Err(e) => assert!(e.is_invalid_expression(), "unexpected error kind: {e}"),
        }
    }
});
