//! Selection state shared with the host: one primary selection plus a lasso
//! multi-selection, both referencing elements by id only.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::doc::{ElementId, ElementKind, FloorPlanData};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    pub selected_id: Option<ElementId>,
    pub selected_type: Option<ElementKind>,
    pub multi_selected_ids: BTreeSet<ElementId>,
    pub multi_selected_types: BTreeMap<ElementId, ElementKind>,
}

impl SelectionState {
    /// Nothing selected.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single element as the sole selection.
    #[must_use]
    pub fn single(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self { selected_id: Some(id.into()), selected_type: Some(kind), ..Self::default() }
    }

    /// A multi-selection replacing any single selection.
    #[must_use]
    pub fn multi(entries: impl IntoIterator<Item = (ElementId, ElementKind)>) -> Self {
        let multi_selected_types: BTreeMap<_, _> = entries.into_iter().collect();
        Self {
            selected_id: None,
            selected_type: None,
            multi_selected_ids: multi_selected_types.keys().cloned().collect(),
            multi_selected_types,
        }
    }

    /// Whether `id` is the single selection or a member of the multi-selection.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id.as_deref() == Some(id) || self.multi_selected_ids.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_id.is_none() && self.multi_selected_ids.is_empty()
    }

    #[must_use]
    pub fn has_multi(&self) -> bool {
        !self.multi_selected_ids.is_empty()
    }

    /// Union of the multi-selection and the single selection.
    #[must_use]
    pub fn selected_ids(&self) -> BTreeSet<ElementId> {
        let mut ids = self.multi_selected_ids.clone();
        if let Some(id) = &self.selected_id {
            ids.insert(id.clone());
        }
        ids
    }

    /// Drop every id that no longer exists in `plan`.
    #[must_use]
    pub fn pruned(&self, plan: &FloorPlanData) -> Self {
        let keep_single = self.selected_id.as_deref().is_some_and(|id| plan.contains_id(id));
        let multi_selected_types: BTreeMap<_, _> = self
            .multi_selected_types
            .iter()
            .filter(|(id, _)| plan.contains_id(id))
            .map(|(id, kind)| (id.clone(), *kind))
            .collect();
        Self {
            selected_id: if keep_single { self.selected_id.clone() } else { None },
            selected_type: if keep_single { self.selected_type } else { None },
            multi_selected_ids: self.multi_selected_ids.iter().filter(|id| plan.contains_id(id)).cloned().collect(),
            multi_selected_types,
        }
    }
}
