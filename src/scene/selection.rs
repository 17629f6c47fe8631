//! Cube selection

use crate::core::types::CubeId;

/// Ordered set of selected cubes, bounded by a capacity
#[derive(Clone, Debug)]
pub struct CubeSelection {
    ids: Vec<CubeId>,
    capacity: usize,
}

impl CubeSelection {
    pub fn new(capacity: usize) -> Self {
        Self { ids: Vec::with_capacity(capacity), capacity }
    }

    pub fn contains(&self, id: CubeId) -> bool {
        self.ids.contains(&id)
    }

    /// Append a cube. Returns false when full or already selected.
    pub fn push(&mut self, id: CubeId) -> bool {
        if self.is_full() || self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: CubeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| *s != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) -> Vec<CubeId> {
        std::mem::take(&mut self.ids)
    }

    pub fn ids(&self) -> &[CubeId] {
        &self.ids
    }

    /// Both cubes when the selection holds exactly a pair
    pub fn pair(&self) -> Option<(CubeId, CubeId)> {
        match self.ids.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity() {
        let mut sel = CubeSelection::new(2);
        let (a, b, c) = (CubeId::new(), CubeId::new(), CubeId::new());
        assert!(sel.push(a));
        assert!(!sel.push(a));
        assert!(sel.push(b));
        assert!(sel.is_full());
        assert!(!sel.push(c));
        assert_eq!(sel.pair(), Some((a, b)));

        assert!(sel.remove(a));
        assert_eq!(sel.ids(), &[b]);
        assert_eq!(sel.clear(), vec![b]);
        assert!(sel.is_empty());
    }
}
