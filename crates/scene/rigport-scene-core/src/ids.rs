//! Identifiers for scene objects.

use serde::{Deserialize, Serialize};

/// Stable identifier for a node owned by the scene host. Opaque externally;
/// never derived from the node's name, so renames cannot invalidate it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Monotonic allocator for NodeId. Ids are never reused, even after deletion.
#[derive(Default, Debug)]
pub struct NodeIdAllocator {
    next: u32,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = NodeIdAllocator::new();
        assert_eq!(alloc.alloc(), NodeId(0));
        assert_eq!(alloc.alloc(), NodeId(1));
        assert_eq!(alloc.alloc(), NodeId(2));
    }
}
