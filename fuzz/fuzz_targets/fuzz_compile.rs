#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // Any JSON text either compiles or yields an error; never a panic
        let _ = jsonquery::compile_str(s);
    }
});
