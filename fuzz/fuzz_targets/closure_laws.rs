#![no_main]

//! Fuzz target for closure, key and cover invariants over small schemas.

use arbitrary::Arbitrary;
use fdkit_domain::{AttributeSet, DependencySet, FunctionalDependency};
use libfuzzer_sys::fuzz_target;

const ALPHABET: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

#[derive(Debug, Arbitrary)]
struct Input {
    fds: Vec<(u8, u8)>,
    source: u8,
}

fn attrs(mask: u8) -> AttributeSet {
    ALPHABET
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| *c)
        .collect()
}

fuzz_target!(|input: Input| {
    let fds: DependencySet = input
        .fds
        .iter()
        .take(8)
        .filter(|(l, r)| l & 0x3f != 0 && r & 0x3f != 0)
        .map(|(l, r)| FunctionalDependency::new(attrs(*l), attrs(*r)))
        .collect();
    let source = attrs(input.source);

    let closed = fds.closure_attrs(&source);
    assert!(closed.has_subset(&source));
    assert_eq!(fds.closure_attrs(&closed), closed);

    for key in fds.keys() {
        assert!(fds.is_superkey(key));
    }

    let (cover, _) = fds.minimal_cover();
    assert!(cover.is_equivalent(&fds));
});
