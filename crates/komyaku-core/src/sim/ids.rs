/// Identifier of a blob, unique for the lifetime of its simulation
pub type BlobId = u64;

/// Monotonic id source owned by one simulation. Ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: BlobId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first id is `first`
    pub fn starting_at(first: BlobId) -> Self {
        Self { next: first }
    }

    pub fn allocate(&mut self) -> BlobId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Id the next call to `allocate` will hand out
    pub fn peek(&self) -> BlobId {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_monotonically() {
        let mut ids = IdAllocator::starting_at(100);
        assert_eq!(ids.allocate(), 100);
        assert_eq!(ids.allocate(), 101);
        assert_eq!(ids.peek(), 102);
    }
}
