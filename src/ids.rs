//! Element id generation.
//!
//! The engine owns a boxed [`IdSource`]. Production hosts use [`UuidIds`];
//! tests inject [`SequentialIds`] to get predictable ids.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use uuid::Uuid;

use crate::doc::{ElementId, ElementKind};

pub trait IdSource {
    /// A fresh id for an element of `kind`.
    fn next_id(&mut self, kind: ElementKind) -> ElementId;
}

/// Random ids of the form `<prefix>_<uuid>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, kind: ElementKind) -> ElementId {
        format!("{}_{}", kind.id_prefix(), Uuid::new_v4().simple())
    }
}

/// Counter ids of the form `<prefix>_<n>`, shared across kinds.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, kind: ElementKind) -> ElementId {
        self.next += 1;
        format!("{}_{}", kind.id_prefix(), self.next)
    }
}
