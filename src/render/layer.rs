//! Element layers: the persistent rendered state of one component.
//!
//! A layer remembers the elements it created, keyed by [`ElementKey`], and
//! applies a [`reconcile`] partition to them: entering elements start from an
//! off state and fade in, persisting elements transition from wherever they
//! currently are, and exiting elements fade out and are dropped only once
//! their transition has finished.

use crate::render::element::{Attrs, ElementData, ElementKey, ElementKind, Phase, VisualElement};
use crate::render::reconcile::reconcile;
use crate::render::transition::Transition;
use std::collections::HashMap;

/// What a leaf wants one data item to look like
#[derive(Debug, Clone)]
pub struct ElementSpec {
    pub kind: ElementKind,
    pub data: ElementData,
    /// Starting attributes if the element is new
    pub enter_from: Attrs,
    /// Settled attributes
    pub target: Attrs,
}

/// Counts from one [`ElementLayer::join`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl JoinSummary {
    pub fn total(&self) -> usize {
        self.entered + self.updated + self.exited
    }
}

/// Keyed collection of visual elements in paint order
#[derive(Debug, Clone)]
pub struct ElementLayer {
    elements: Vec<VisualElement>,
    positions: HashMap<ElementKey, usize>,
    duration: f64,
}

impl ElementLayer {
    /// Create an empty layer whose transitions last `duration` milliseconds
    pub fn new(duration: f64) -> Self {
        Self {
            elements: Vec::new(),
            positions: HashMap::new(),
            duration,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, key: &ElementKey) -> Option<&VisualElement> {
        self.positions.get(key).map(|&i| &self.elements[i])
    }

    pub fn get_mut(&mut self, key: &ElementKey) -> Option<&mut VisualElement> {
        self.positions.get(key).map(|&i| &mut self.elements[i])
    }

    pub fn keys(&self) -> impl Iterator<Item = &ElementKey> {
        self.elements.iter().map(|e| &e.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut VisualElement> {
        self.elements.iter_mut()
    }

    /// Elements that are not on their way out
    pub fn live(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter().filter(|e| !e.is_exiting())
    }

    /// Insert an element that appears immediately, without a transition
    pub fn insert_static(&mut self, element: VisualElement) {
        match self.positions.get(&element.key) {
            Some(&i) => self.elements[i] = element,
            None => {
                self.positions.insert(element.key.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
    }

    /// Reconcile the layer against `items`.
    ///
    /// `spec_fn` describes each item; `exit_fn` gives the off-state target of
    /// an element whose key disappeared. Every join replaces in-flight
    /// transitions on entering and updated keys. An element already fading
    /// out keeps its exit transition while its key stays absent, so it is
    /// removed on schedule however often the layer is joined.
    pub fn join<T, K, S, X>(
        &mut self,
        items: &[T],
        key_fn: K,
        spec_fn: S,
        exit_fn: X,
        now: f64,
    ) -> JoinSummary
    where
        K: Fn(&T) -> ElementKey,
        S: Fn(&T) -> ElementSpec,
        X: Fn(&VisualElement) -> Attrs,
    {
        let existing: Vec<ElementKey> = self.keys().cloned().collect();
        let partition = reconcile(existing, items, &key_fn);
        if partition.duplicates > 0 {
            tracing::warn!("Skipped {} items with duplicate keys", partition.duplicates);
        }

        for item in &partition.enter {
            let spec = spec_fn(item);
            let mut element =
                VisualElement::new(key_fn(item), spec.kind, spec.data, spec.enter_from);
            element.phase = Phase::Entering;
            element.transition = Some(Transition::new(
                spec.enter_from,
                spec.target,
                now,
                self.duration,
            ));
            self.positions
                .insert(element.key.clone(), self.elements.len());
            self.elements.push(element);
        }

        let duration = self.duration;
        for item in &partition.update {
            let spec = spec_fn(item);
            if let Some(element) = self.get_mut(&key_fn(item)) {
                let current = element.attrs_at(now);
                element.attrs = current;
                element.kind = spec.kind;
                element.data = spec.data;
                // an exiting element whose key came back is revived
                if element.phase == Phase::Exiting {
                    element.phase = Phase::Present;
                }
                element.transition = Some(Transition::new(current, spec.target, now, duration));
            }
        }

        let mut exited = 0;
        for key in &partition.exit {
            if let Some(element) = self.get_mut(key) {
                if element.is_exiting() {
                    continue;
                }
                exited += 1;
                let current = element.attrs_at(now);
                let target = exit_fn(element);
                element.attrs = current;
                element.phase = Phase::Exiting;
                element.transition = Some(Transition::new(current, target, now, duration));
            }
        }

        JoinSummary {
            entered: partition.enter.len(),
            updated: partition.update.len(),
            exited,
        }
    }

    /// Advance transitions to `now`.
    ///
    /// Settles finished transitions, removes elements whose exit completed,
    /// and returns whether anything is still animating.
    pub fn tick(&mut self, now: f64) -> bool {
        let mut animating = false;
        let mut removed = false;

        for element in &mut self.elements {
            let Some(transition) = element.transition else {
                continue;
            };
            element.attrs = transition.sample(now);
            if transition.is_complete(now) {
                element.transition = None;
                match element.phase {
                    Phase::Exiting => removed = true,
                    Phase::Entering => element.phase = Phase::Present,
                    Phase::Present => {}
                }
            } else {
                animating = true;
            }
        }

        if removed {
            self.elements
                .retain(|e| !(e.phase == Phase::Exiting && e.transition.is_none()));
            self.reindex();
        }
        animating
    }

    /// Whether any element still has an in-flight transition
    pub fn is_animating(&self) -> bool {
        self.elements.iter().any(|e| e.transition.is_some())
    }

    /// Drop every element immediately
    pub fn clear(&mut self) {
        self.elements.clear();
        self.positions.clear();
    }

    fn reindex(&mut self) {
        self.positions = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();
    }
}
