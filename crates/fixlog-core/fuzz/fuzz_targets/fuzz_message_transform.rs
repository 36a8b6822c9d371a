#![no_main]

use fixlog_core::message::{render_entry, transform, unprettify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(t) = transform(text) {
            let line = render_entry(&t.prose, "0123456789", Some("RC1"));
            let _ = unprettify(&line);
        }
    }
});
