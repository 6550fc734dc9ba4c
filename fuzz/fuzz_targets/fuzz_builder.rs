#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        let builder = jsonquery::QueryBuilder::new();
        if let Ok(out) = builder.build_str(s) {
            assert!(out.get_array("$and").is_ok());
        }
    }
});
