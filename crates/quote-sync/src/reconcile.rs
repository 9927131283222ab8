//! Server-authoritative merge keyed on quote text.

use quote_core::{Quote, QuoteCollection};

/// Result of merging one remote batch into a local collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub merged: QuoteCollection,
    pub changed: bool,
    /// Remote quotes whose text was not present locally.
    pub added: usize,
    /// Local quotes whose category ended up different from before the merge.
    pub updated: usize,
}

/// Merge `remote` into `local`.
///
/// For each remote quote, in order: the first local quote with the same
/// text is replaced when its category differs, left alone when equal, and
/// the remote quote is appended when no local text matches. The remote side
/// always wins a category conflict, so a local category edit on an existing
/// text is overwritten by the next sync.
pub fn reconcile(local: QuoteCollection, remote: &[Quote]) -> ReconcileOutcome {
    let original = local.clone();
    let mut merged = local;

    for incoming in remote {
        match merged.position_by_text(&incoming.text) {
            None => merged.push(incoming.clone()),
            Some(index) => {
                let differs = merged
                    .get(index)
                    .is_some_and(|existing| existing.category != incoming.category);
                if differs {
                    merged.replace_at(index, incoming.clone());
                }
            }
        }
    }

    // Counted on the final state so in-batch flip-flops that cancel out
    // are not reported as changes.
    let added = merged.len() - original.len();
    let updated = original
        .iter()
        .zip(merged.iter())
        .filter(|(before, after)| before != after)
        .count();

    ReconcileOutcome {
        merged,
        changed: added + updated > 0,
        added,
        updated,
    }
}
