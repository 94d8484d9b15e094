use glam::Vec3;
use rustc_hash::FxHashMap;

/// Global joint index; also the `JOINTS_0` value of the bound vertices.
pub type JointIndex = u16;

/// Joint created for one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointEntry {
    pub index: JointIndex,
    /// Reference coordinate of the station.
    pub reference: Vec3,
}

/// `(element, station) -> joint` lookup produced by extrusion.
///
/// Stations of an element are stored densely in station order, so an element
/// appears here only if every one of its stations received a joint.
#[derive(Debug, Clone, Default)]
pub struct JointMap {
    elements: FxHashMap<String, Vec<JointEntry>>,
    joint_count: usize,
}

impl JointMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the joints of every station of `element`, in station order.
    pub fn insert_element(&mut self, element: impl Into<String>, joints: Vec<JointEntry>) {
        self.joint_count += joints.len();
        if let Some(previous) = self.elements.insert(element.into(), joints) {
            self.joint_count -= previous.len();
        }
    }

    #[must_use]
    pub fn get(&self, element: &str, station: usize) -> Option<&JointEntry> {
        self.elements.get(element)?.get(station)
    }

    /// Joints of `element` in station order.
    #[must_use]
    pub fn element(&self, element: &str) -> Option<&[JointEntry]> {
        self.elements.get(element).map(Vec::as_slice)
    }

    /// Total number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joint_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joint_count == 0
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}
