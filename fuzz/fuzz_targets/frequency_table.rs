#![no_main]

use compare_mt::frequency::FrequencyTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed lines must surface as errors, never panics
        if let Ok(table) = FrequencyTable::from_counts_str(input) {
            let _ = table.frequency("the");
        }
    }
});
