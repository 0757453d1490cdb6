#![no_main]

use libfuzzer_sys::fuzz_target;
use svn2git_log::LogParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        if let Ok(revisions) = LogParser::new().parse_str(xml) {
            let len = revisions.len();
            let sorted = revisions.into_chronological();
            assert!(sorted.is_chronological());
            assert_eq!(sorted.pairs().count(), len.saturating_sub(1));
        }
    }
});
