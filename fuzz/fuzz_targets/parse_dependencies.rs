#![no_main]

//! Fuzz target for dependency-text parsing.
//!
//! Arbitrary text must either fail with a located error or parse into a set
//! whose canonical text parses back to the same set.

use fdkit_domain::DependencySet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    match DependencySet::parse(s) {
        Ok(fds) => {
            let text = fds.to_string();
            let back = DependencySet::parse(&text).expect("canonical text parses");
            assert_eq!(back, fds);
        }
        Err(err) => {
            assert!(err.line >= 1);
            assert!(err.line <= s.lines().count());
        }
    }
});
