//! Property-based tests for keyed reconciliation and element layers.
//!
//! 1. The partition covers exactly the union of old and new keys.
//! 2. After one full transition, a layer holds exactly the new keys.
//! 3. Settled elements are fully opaque at their target.
//! 4. Filtering and indexing never panic and keep domains finite.

use flowplot_rs::pipeline::{filter_points, index_points, Filter, IndexMode, LineRange};
use flowplot_rs::render::{reconcile, Attrs, ElementData, ElementKey, ElementKind, ElementLayer, ElementSpec};
use flowplot_rs::FlowPoint;
use proptest::prelude::*;
use std::collections::BTreeSet;

const DURATION: f64 = 700.0;

fn key_set() -> impl Strategy<Value = BTreeSet<u64>> {
    prop::collection::btree_set(0u64..40, 0..20)
}

fn join(layer: &mut ElementLayer, keys: &[u64], now: f64) {
    layer.join(
        keys,
        |k| ElementKey::Step(*k),
        |k| ElementSpec {
            kind: ElementKind::FlowPoint,
            data: ElementData::default(),
            enter_from: Attrs::new(*k as f64, 0.0, 1.0, 1.0, 0.0),
            target: Attrs::new(*k as f64, 10.0, 1.0, 1.0, 1.0),
        },
        |e| e.attrs.with_opacity(0.0),
        now,
    );
}

fn points_strategy() -> impl Strategy<Value = Vec<FlowPoint>> {
    prop::collection::vec((1u32..60, 0.0f64..5.0), 0..40).prop_map(|visits| {
        let mut clock = 0.0;
        visits
            .into_iter()
            .enumerate()
            .map(|(i, (line, dt))| {
                let enter = clock;
                clock += dt;
                FlowPoint::new(i as u64, enter, clock, "p.py", line, "x", vec![])
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn partition_covers_union(old in key_set(), new in key_set()) {
        let existing: Vec<ElementKey> = old.iter().map(|k| ElementKey::Step(*k)).collect();
        let items: Vec<u64> = new.iter().copied().collect();
        let rec = reconcile(existing, &items, |k| ElementKey::Step(*k));

        let union: BTreeSet<u64> = old.union(&new).copied().collect();
        prop_assert_eq!(rec.total(), union.len());
        prop_assert_eq!(rec.update.len(), old.intersection(&new).count());
        prop_assert!(rec.enter.iter().all(|k| !old.contains(*k)));
    }

    #[test]
    fn layer_converges_to_new_keys(first in key_set(), second in key_set(), gap in 0.0f64..1400.0) {
        let mut layer = ElementLayer::new(DURATION);
        let first: Vec<u64> = first.into_iter().collect();
        let second: Vec<u64> = second.into_iter().collect();

        join(&mut layer, &first, 0.0);
        layer.tick(gap);
        join(&mut layer, &second, gap);
        prop_assert!(!layer.tick(gap + DURATION + 1.0));

        let keys: BTreeSet<ElementKey> = layer.keys().cloned().collect();
        let expected: BTreeSet<ElementKey> = second.iter().map(|k| ElementKey::Step(*k)).collect();
        prop_assert_eq!(keys, expected);
        for element in layer.iter() {
            prop_assert_eq!(element.attrs.opacity, 1.0);
            prop_assert_eq!(element.attrs.y, 10.0);
        }
    }

    #[test]
    fn indexing_keeps_domains_finite(points in points_strategy(), a in 0u32..70, b in 0u32..70) {
        let filter = Filter::lines([LineRange::new(a, b)]);
        let filtered = filter_points(&points, &filter);
        prop_assert!(filtered.iter().all(|p| filter.active_range().unwrap().contains(p.line_number)));

        for mode in IndexMode::all() {
            let data = index_points(&filtered, *mode);
            prop_assert!(data.index_domain.min.is_finite());
            prop_assert!(data.index_domain.max.is_finite());
            prop_assert!(data.index_domain.min <= data.index_domain.max);
            if !filtered.is_empty() {
                let span = data.code_lines_domain.max - data.code_lines_domain.min + 1;
                prop_assert_eq!(data.code_lines.len() as u32, span);
            }
        }
    }
}
