#![no_main]

//! Fuzz target for report JSON parsing.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Should never panic, and anything accepted must serialize again.
    if let Ok(report) = serde_json::from_str::<fdkit_types::report::AnalysisReport>(s) {
        let json = serde_json::to_string(&report).expect("serialize accepted report");
        let back: fdkit_types::report::AnalysisReport =
            serde_json::from_str(&json).expect("reparse");
        assert_eq!(back, report);
    }
    let _ = serde_json::from_str::<fdkit_types::report::ClosureReport>(s);
    let _ = serde_json::from_str::<fdkit_types::report::VerdictReport>(s);
});
