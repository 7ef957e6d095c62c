use super::InterfaceId;

/// The single VLAN of a simulated switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vlan {
    id: u16,
    tagged: Vec<InterfaceId>,
    untagged: Vec<InterfaceId>,
    root: InterfaceId,
    rstp_priority: Option<u16>,
}

impl Vlan {
    pub(crate) fn new(id: u16, root: InterfaceId) -> Self {
        Self {
            id,
            tagged: Vec::new(),
            untagged: Vec::new(),
            root,
            rstp_priority: None,
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    /// Trunked members, in the order they were added.
    pub fn tagged(&self) -> &[InterfaceId] {
        &self.tagged
    }

    /// Access members, ordered by id.
    pub fn untagged(&self) -> &[InterfaceId] {
        &self.untagged
    }

    /// RSTP root port.
    pub fn root(&self) -> InterfaceId {
        self.root
    }

    /// RSTP bridge priority, never configured.
    pub fn rstp_priority(&self) -> Option<u16> {
        self.rstp_priority
    }

    pub(crate) fn add_tagged(&mut self, id: InterfaceId) {
        if !self.tagged.contains(&id) {
            self.tagged.push(id);
        }
    }

    pub(crate) fn add_untagged(&mut self, id: InterfaceId) {
        if !self.untagged.contains(&id) {
            self.untagged.push(id);
        }
    }
}
