//! Structural model and response collaborators
//!
//! The scene builder consumes these through two traits:
//! - [`FrameModel`]: element iteration and cross-section outline lookup
//! - [`ResponseState`]: per-station displacements and rotations of one response
//!
//! [`Model`] and [`BasicState`] are the in-memory implementations.

pub mod element;
pub mod outline;
pub mod response;

use rustc_hash::FxHashMap;

pub use element::{FrameElement, Station};
pub use outline::CrossSectionOutline;
pub use response::{BasicState, ElementResponse, ResponseInput, ResponseState};

/// Source of frame elements and their cross-section outlines.
pub trait FrameModel {
    /// Elements in a stable iteration order. Joint and vertex indices follow it.
    fn elements(&self) -> &[FrameElement];

    /// Outline of `element` at station `station`, or `None` when unavailable.
    fn outline(&self, element: &str, station: usize) -> Option<CrossSectionOutline>;

    fn element(&self, name: &str) -> Option<&FrameElement> {
        self.elements().iter().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone, Default)]
struct SectionAssignment {
    default: Option<CrossSectionOutline>,
    stations: FxHashMap<usize, CrossSectionOutline>,
}

/// In-memory [`FrameModel`].
///
/// Each element may carry a default outline applied to every station plus
/// per-station overrides.
#[derive(Debug, Clone, Default)]
pub struct Model {
    elements: Vec<FrameElement>,
    sections: FxHashMap<String, SectionAssignment>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element and returns its position in iteration order.
    pub fn add_element(&mut self, element: FrameElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Assigns the same outline to every station of `element`.
    pub fn set_outline(&mut self, element: &str, outline: CrossSectionOutline) {
        self.sections.entry(element.to_string()).or_default().default = Some(outline);
    }

    /// Overrides the outline of a single station.
    pub fn set_station_outline(&mut self, element: &str, station: usize, outline: CrossSectionOutline) {
        self.sections
            .entry(element.to_string())
            .or_default()
            .stations
            .insert(station, outline);
    }
}

impl FrameModel for Model {
    fn elements(&self) -> &[FrameElement] {
        &self.elements
    }

    fn outline(&self, element: &str, station: usize) -> Option<CrossSectionOutline> {
        let section = self.sections.get(element)?;
        section
            .stations
            .get(&station)
            .or(section.default.as_ref())
            .cloned()
    }
}
