//! Session clipboard: full element records captured on copy and re-issued
//! with fresh ids and an offset on paste.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::doc::{Element, ElementId, ElementKind, FloorPlanData};
use crate::ids::IdSource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    elements: Vec<Element>,
}

impl Clipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every element of `plan` whose id is in `ids`, in collection order.
    #[must_use]
    pub fn copy_from(plan: &FloorPlanData, ids: &BTreeSet<ElementId>) -> Self {
        let elements: Vec<Element> = plan.elements().into_iter().filter(|e| ids.contains(e.id())).collect();
        debug!(count = elements.len(), "copy");
        Self { elements }
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Build the elements a paste would insert into `plan`.
    ///
    /// Every element gets an id not present in `plan` and is shifted by
    /// `offset` on both axes. Doors and windows come along only when their
    /// wall was copied too, and are re-pointed at the pasted wall.
    pub fn paste(&self, plan: &FloorPlanData, ids: &mut dyn IdSource, offset: f64) -> Vec<Element> {
        let mut taken = plan.ids();
        let mut wall_ids: HashMap<&str, ElementId> = HashMap::new();
        let mut out = Vec::with_capacity(self.elements.len());

        for element in self.elements.iter().filter(|e| e.wall_id().is_none()) {
            let id = fresh_id(ids, element.kind(), &mut taken);
            if element.kind() == ElementKind::Wall {
                wall_ids.insert(element.id(), id.clone());
            }
            out.push(element.clone().with_id(id).translated(offset, offset));
        }

        for element in &self.elements {
            let Some(new_wall) = element.wall_id().and_then(|w| wall_ids.get(w)) else {
                continue;
            };
            let id = fresh_id(ids, element.kind(), &mut taken);
            let opening = match element.clone().with_id(id) {
                Element::Door(mut d) => {
                    d.wall_id.clone_from(new_wall);
                    Element::Door(d)
                }
                Element::Window(mut w) => {
                    w.wall_id.clone_from(new_wall);
                    Element::Window(w)
                }
                other => other,
            };
            out.push(opening);
        }

        debug!(count = out.len(), skipped = self.elements.len() - out.len(), "paste");
        out
    }
}

/// Draw ids until one is unused, then reserve it.
fn fresh_id(ids: &mut dyn IdSource, kind: ElementKind, taken: &mut BTreeSet<ElementId>) -> ElementId {
    loop {
        let id = ids.next_id(kind);
        if taken.insert(id.clone()) {
            return id;
        }
    }
}
