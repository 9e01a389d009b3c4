//! Keyed enter/update/exit diff.
//!
//! [`reconcile`] is the pure core shared by every plot leaf: given the keys
//! of the elements currently rendered and a new ordered data set with a key
//! function, it partitions the union of old and new keys into entering,
//! updating and exiting sets.

use crate::render::element::ElementKey;
use std::collections::HashSet;

/// Partition of one data join
#[derive(Debug)]
pub struct Reconciliation<'a, T> {
    /// New items with no existing element, in data order
    pub enter: Vec<&'a T>,
    /// New items matching an existing element, in data order
    pub update: Vec<&'a T>,
    /// Existing keys absent from the new data, in existing order
    pub exit: Vec<ElementKey>,
    /// Items skipped because an earlier item had the same key
    pub duplicates: usize,
}

impl<T> Reconciliation<'_, T> {
    /// Size of the partition, equal to `|old keys ∪ new keys|`
    pub fn total(&self) -> usize {
        self.enter.len() + self.update.len() + self.exit.len()
    }
}

/// Join `items` against `existing` keys.
///
/// When two items share a key the first one wins and the rest are counted
/// in [`Reconciliation::duplicates`].
pub fn reconcile<'a, T, I, F>(existing: I, items: &'a [T], key_fn: F) -> Reconciliation<'a, T>
where
    I: IntoIterator<Item = ElementKey>,
    F: Fn(&T) -> ElementKey,
{
    let existing: Vec<ElementKey> = existing.into_iter().collect();
    let existing_set: HashSet<&ElementKey> = existing.iter().collect();

    let mut seen: HashSet<ElementKey> = HashSet::with_capacity(items.len());
    let mut enter = Vec::new();
    let mut update = Vec::new();
    let mut duplicates = 0;

    for item in items {
        let key = key_fn(item);
        if seen.contains(&key) {
            duplicates += 1;
            continue;
        }
        if existing_set.contains(&key) {
            update.push(item);
        } else {
            enter.push(item);
        }
        seen.insert(key);
    }

    let exit = existing
        .iter()
        .filter(|key| !seen.contains(*key))
        .cloned()
        .collect();

    Reconciliation {
        enter,
        update,
        exit,
        duplicates,
    }
}
