#![no_main]

use fixlog_core::{CategoryTree, parse, render};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let log = parse(text, CategoryTree::default(), &["RC1"]);
        let rendered = render(&log);
        let again = parse(&rendered, CategoryTree::default(), &["RC1"]);
        assert_eq!(again.counts(), log.counts());
    }
});
