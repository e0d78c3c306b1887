//! Provider name collision detection
//!
//! Partitions a pass's declarations into the accepted name → declaration
//! mapping and the set of names seen more than once. The first occurrence
//! of a name in discovery order keeps its slot; later occurrences only mark
//! the name as duplicated. A non-empty duplicate set aborts the pass: a
//! wrong mapping could silently route traffic to the wrong provider, so
//! partial generation under ambiguity is never acceptable.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use adc_domain::{Declaration, Error, GenerationResult, Result};

/// Partition declarations by provider name
pub fn detect(declarations: &[Declaration]) -> GenerationResult {
    let mut accepted: BTreeMap<String, Declaration> = BTreeMap::new();
    let mut duplicates: BTreeSet<String> = BTreeSet::new();

    for declaration in declarations {
        match accepted.entry(declaration.provider_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(declaration.clone());
            }
            Entry::Occupied(_) => {
                // First-seen entry stays; record the name once no matter
                // how often it repeats.
                duplicates.insert(declaration.provider_name.clone());
            }
        }
    }

    GenerationResult {
        accepted,
        duplicates,
    }
}

/// Reject accepted declarations whose derived wrapper names collide
///
/// Two providers in different modules may share a simple type name; their
/// wrappers would land on the same file in the flat generated package.
/// Generation fails closed instead of letting one shadow the other.
pub fn ensure_distinct_wrapper_names(accepted: &BTreeMap<String, Declaration>) -> Result<()> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut clashes: BTreeSet<String> = BTreeSet::new();

    for declaration in accepted.values() {
        let wrapper = declaration.wrapper_name();
        if !seen.insert(wrapper.clone()) {
            clashes.insert(wrapper);
        }
    }

    if clashes.is_empty() {
        Ok(())
    } else {
        Err(Error::wrapper_name_clash(clashes))
    }
}
