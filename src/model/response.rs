use glam::{Mat3, Vec3};
use rustc_hash::FxHashMap;

/// One computed response of the structure, as seen by the scene builder.
///
/// Implementations expose, per element, a position delta and a rotation
/// matrix for every station. Rotation matrices must be orthonormal with a
/// determinant of +1; nothing downstream checks this.
pub trait ResponseState {
    /// Names of the elements this state carries data for.
    fn element_names(&self) -> Vec<&str>;

    /// Per-station displacement of the section origin.
    fn position_deltas(&self, element: &str) -> Option<&[Vec3]>;

    /// Per-station section rotation.
    fn rotations(&self, element: &str) -> Option<&[Mat3]>;

    /// Global end displacement vector (six terms per end) used for the
    /// elastic centerline. Most states don't carry it.
    fn end_displacements(&self, _element: &str) -> Option<&[f32]> {
        None
    }
}

/// Response data for a single element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementResponse {
    pub position_deltas: Vec<Vec3>,
    pub rotations: Vec<Mat3>,
    pub end_displacements: Option<Vec<f32>>,
}

impl ElementResponse {
    #[must_use]
    pub fn new(position_deltas: Vec<Vec3>, rotations: Vec<Mat3>) -> Self {
        Self {
            position_deltas,
            rotations,
            end_displacements: None,
        }
    }

    /// Every station moved by `delta` without rotating.
    #[must_use]
    pub fn uniform_translation(stations: usize, delta: Vec3) -> Self {
        Self::new(vec![delta; stations], vec![Mat3::IDENTITY; stations])
    }

    #[must_use]
    pub fn with_end_displacements(mut self, displacements: Vec<f32>) -> Self {
        self.end_displacements = Some(displacements);
        self
    }
}

/// In-memory [`ResponseState`] keyed by element name.
#[derive(Debug, Clone, Default)]
pub struct BasicState {
    elements: FxHashMap<String, ElementResponse>,
}

impl BasicState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>, response: ElementResponse) -> Self {
        self.insert(name, response);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, response: ElementResponse) {
        self.elements.insert(name.into(), response);
    }

    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ElementResponse> {
        self.elements.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ResponseState for BasicState {
    fn element_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn position_deltas(&self, element: &str) -> Option<&[Vec3]> {
        self.elements
            .get(element)
            .map(|r| r.position_deltas.as_slice())
    }

    fn rotations(&self, element: &str) -> Option<&[Mat3]> {
        self.elements.get(element).map(|r| r.rotations.as_slice())
    }

    fn end_displacements(&self, element: &str) -> Option<&[f32]> {
        self.elements
            .get(element)
            .and_then(|r| r.end_displacements.as_deref())
    }
}

/// Either one response state or a named collection of them.
///
/// Named states are replayed in the order given, one clock step apart.
#[derive(Debug, Clone)]
pub enum ResponseInput<S> {
    Single(S),
    Named(Vec<(String, S)>),
}

impl<S> ResponseInput<S> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Named(states) => states.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
