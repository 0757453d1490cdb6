#![no_main]

use libfuzzer_sys::fuzz_target;
use svn2git_log::AuthorMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = AuthorMap::parse_str(text);
    }
});
