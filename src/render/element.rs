//! Abstract visual element handles.
//!
//! A [`VisualElement`] is what a rendering backend draws: an identity key,
//! a kind, static per-datum payload and a set of animatable attributes.
//! Nothing here knows about pixels or a drawing library.

use crate::render::transition::Transition;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

/// A point or translation on the render surface
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, point: Offset) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Axis tick value usable as a map key.
///
/// Compared by bit pattern after folding `-0.0` into `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct TickValue(pub f64);

impl TickValue {
    fn bits(self) -> u64 {
        if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for TickValue {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for TickValue {}

impl Hash for TickValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl PartialOrd for TickValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TickValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Stable identity of a visual element across updates
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKey {
    /// Flow point, by step UID
    Step(u64),
    /// Anything indexed by source line number
    Line(u32),
    /// Axis tick, by its value
    Tick(TickValue),
    /// Text label, by its content
    Label(String),
    /// Fixed decoration, by name
    Static(&'static str),
}

impl ElementKey {
    pub fn tick(value: f64) -> Self {
        ElementKey::Tick(TickValue(value))
    }

    pub fn label(text: impl Into<String>) -> Self {
        ElementKey::Label(text.into())
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKey::Step(uid) => write!(f, "step:{}", uid),
            ElementKey::Line(n) => write!(f, "line:{}", n),
            ElementKey::Tick(v) => write!(f, "tick:{}", v.0),
            ElementKey::Label(s) => write!(f, "label:{}", s),
            ElementKey::Static(s) => write!(f, "static:{}", s),
        }
    }
}

/// How an element's (x, y) relates to its box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    /// x is the left edge, y the vertical centre
    CenterLeft,
    /// x is the right edge, y the vertical centre
    CenterRight,
    /// x and y are the centre
    Center,
}

/// What an element represents, which decides how a backend draws it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    FlowPoint,
    IndexNumber,
    IndexAxisLabel,
    CodeLineNumber,
    CodeAxisLabel,
    CodeLine,
    IndexBarSelector,
    CodeBarSelector,
    AxisBar,
    CodeTextLine,
}

impl ElementKind {
    pub fn anchor(self) -> Anchor {
        match self {
            ElementKind::FlowPoint
            | ElementKind::IndexBarSelector
            | ElementKind::CodeBarSelector
            | ElementKind::AxisBar => Anchor::TopLeft,
            ElementKind::IndexNumber | ElementKind::IndexAxisLabel | ElementKind::CodeAxisLabel => {
                Anchor::Center
            }
            ElementKind::CodeLineNumber => Anchor::CenterRight,
            ElementKind::CodeLine | ElementKind::CodeTextLine => Anchor::CenterLeft,
        }
    }

    /// Whether the kind draws text rather than a filled box
    pub fn is_text(self) -> bool {
        !matches!(self.anchor(), Anchor::TopLeft)
    }

    /// Pointer priority; `None` means the element never takes hover
    pub fn hit_priority(self) -> Option<u8> {
        match self {
            ElementKind::FlowPoint => Some(3),
            ElementKind::CodeLine | ElementKind::CodeLineNumber => Some(2),
            ElementKind::CodeBarSelector => Some(1),
            _ => None,
        }
    }
}

/// Animatable attributes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attrs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
}

impl Attrs {
    pub fn new(x: f64, y: f64, width: f64, height: f64, opacity: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            opacity,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Linear blend; `t` is clamped to `[0, 1]`
    pub fn lerp(&self, to: &Attrs, t: f64) -> Attrs {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Attrs {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            width: mix(self.width, to.width),
            height: mix(self.height, to.height),
            opacity: mix(self.opacity, to.opacity),
        }
    }

    /// Box in local coordinates for the given anchor
    pub fn bounds(&self, anchor: Anchor) -> Rect {
        let (x, y) = match anchor {
            Anchor::TopLeft => (self.x, self.y),
            Anchor::CenterLeft => (self.x, self.y - self.height / 2.0),
            Anchor::CenterRight => (self.x - self.width, self.y - self.height / 2.0),
            Anchor::Center => (self.x - self.width / 2.0, self.y - self.height / 2.0),
        };
        Rect {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Static payload carried by an element, refreshed on every update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementData {
    /// Text content for text kinds
    pub text: String,
    /// Leading whitespace width preserved in front of `text`
    pub indent: usize,
    /// Source line this element shares with others in the tree
    pub line_number: Option<u32>,
    /// Position on the index axis (tick value or flow point index)
    pub index_value: Option<f64>,
    /// Extent on the index axis
    pub index_length: f64,
    pub step_uid: Option<u64>,
    pub side_effect: Option<String>,
    pub has_side_effect: bool,
    /// Drawn without ink (blank source rows)
    pub placeholder: bool,
}

/// Lifecycle phase of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Present,
    /// Fading out; removed once its transition completes
    Exiting,
}

/// A persistent visual element owned by one layer
#[derive(Debug, Clone)]
pub struct VisualElement {
    pub key: ElementKey,
    pub kind: ElementKind,
    pub data: ElementData,
    /// Attributes as of the last tick
    pub attrs: Attrs,
    pub transition: Option<Transition>,
    pub phase: Phase,
    pub selected: bool,
}

impl VisualElement {
    pub fn new(key: ElementKey, kind: ElementKind, data: ElementData, attrs: Attrs) -> Self {
        Self {
            key,
            kind,
            data,
            attrs,
            transition: None,
            phase: Phase::Present,
            selected: false,
        }
    }

    /// Attributes at time `now`, following any in-flight transition
    pub fn attrs_at(&self, now: f64) -> Attrs {
        match &self.transition {
            Some(t) => t.sample(now),
            None => self.attrs,
        }
    }

    /// Where the element will settle
    pub fn target(&self) -> Attrs {
        match &self.transition {
            Some(t) => t.to,
            None => self.attrs,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.phase == Phase::Exiting
    }

    /// Current box in surface coordinates
    pub fn bounds(&self, origin: Offset) -> Rect {
        let mut rect = self.attrs.bounds(self.kind.anchor());
        rect.x += origin.x;
        rect.y += origin.y;
        rect
    }
}
