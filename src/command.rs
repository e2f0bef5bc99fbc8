//! Reversible document edits.
//!
//! A [`Command`] turns one plan revision into the next with `execute` and
//! back with `undo`. Both take the plan by reference and return a new value.
//! Removal commands record where each element sat so that
//! `undo(execute(plan)) == plan` holds with ordered collections.
//!
//! Commands never fail. Anything that cannot apply (an unknown id, a trade
//! layer without the matching data block) is a no-op in both directions.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use crate::doc::{
    ArcWall, DamageZone, DimensionLine, DoorPlacement, Element, ElementId, ElementKind, FixturePlacement, FloorLabel,
    FloorPlanData, TradeElement, TradeLayer, TradePath, Wall, WindowPlacement,
};

/// An element taken out of the plan, with the slot it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub kind: ElementKind,
    pub index: usize,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddWall(Wall),
    AddArcWall(ArcWall),
    AddDoor(DoorPlacement),
    AddWindow(WindowPlacement),
    AddFixture(FixturePlacement),
    AddLabel(FloorLabel),
    AddDimension(DimensionLine),
    /// Insert a batch of elements in order (paste).
    AddElements(Vec<Element>),
    /// Remove one element of any kind, plus the openings of a removed wall.
    RemoveElement { id: ElementId, removed: Vec<Removed> },
    /// Remove several elements of any kind, plus the openings of removed walls.
    RemoveMultiple { ids: Vec<ElementId>, removed: Vec<Removed> },
    /// Swap an element for a new value with the same id and kind.
    ReplaceElement { element: Element, previous: Option<Element> },
    AddTradeLayer(TradeLayer),
    AddTradeElement { layer_id: ElementId, element: TradeElement, applied: bool },
    AddTradePath { layer_id: ElementId, path: TradePath, applied: bool },
    AddDamageZone { layer_id: ElementId, zone: DamageZone, applied: bool },
}

impl Command {
    /// Wrap a freshly built element in its add command.
    #[must_use]
    pub fn add(element: Element) -> Self {
        match element {
            Element::Wall(w) => Self::AddWall(w),
            Element::ArcWall(a) => Self::AddArcWall(a),
            Element::Door(d) => Self::AddDoor(d),
            Element::Window(w) => Self::AddWindow(w),
            Element::Fixture(f) => Self::AddFixture(f),
            Element::Label(l) => Self::AddLabel(l),
            Element::Dimension(d) => Self::AddDimension(d),
        }
    }

    #[must_use]
    pub fn remove(id: impl Into<ElementId>) -> Self {
        Self::RemoveElement { id: id.into(), removed: Vec::new() }
    }

    #[must_use]
    pub fn remove_many(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self::RemoveMultiple { ids: ids.into_iter().collect(), removed: Vec::new() }
    }

    #[must_use]
    pub fn replace(element: Element) -> Self {
        Self::ReplaceElement { element, previous: None }
    }

    #[must_use]
    pub fn add_trade_element(layer_id: impl Into<ElementId>, element: TradeElement) -> Self {
        Self::AddTradeElement { layer_id: layer_id.into(), element, applied: false }
    }

    #[must_use]
    pub fn add_trade_path(layer_id: impl Into<ElementId>, path: TradePath) -> Self {
        Self::AddTradePath { layer_id: layer_id.into(), path, applied: false }
    }

    #[must_use]
    pub fn add_damage_zone(layer_id: impl Into<ElementId>, zone: DamageZone) -> Self {
        Self::AddDamageZone { layer_id: layer_id.into(), zone, applied: false }
    }

    /// Short name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddWall(_) => "add wall",
            Self::AddArcWall(_) => "add arc wall",
            Self::AddDoor(_) => "add door",
            Self::AddWindow(_) => "add window",
            Self::AddFixture(_) => "add fixture",
            Self::AddLabel(_) => "add label",
            Self::AddDimension(_) => "add dimension",
            Self::AddElements(_) => "add elements",
            Self::RemoveElement { .. } => "remove element",
            Self::RemoveMultiple { .. } => "remove elements",
            Self::ReplaceElement { .. } => "replace element",
            Self::AddTradeLayer(_) => "add trade layer",
            Self::AddTradeElement { .. } => "add trade element",
            Self::AddTradePath { .. } => "add trade path",
            Self::AddDamageZone { .. } => "add damage zone",
        }
    }

    /// Apply the edit to a copy of `plan`.
    ///
    /// Takes `&mut self` because removal and replacement remember what they
    /// displaced for `undo`. Re-executing (redo) recomputes that record.
    pub fn execute(&mut self, plan: &FloorPlanData) -> FloorPlanData {
        let mut next = plan.clone();
        match self {
            Self::AddWall(w) => next.walls.push(w.clone()),
            Self::AddArcWall(a) => next.arc_walls.push(a.clone()),
            Self::AddDoor(d) => next.doors.push(d.clone()),
            Self::AddWindow(w) => next.windows.push(w.clone()),
            Self::AddFixture(f) => next.fixtures.push(f.clone()),
            Self::AddLabel(l) => next.labels.push(l.clone()),
            Self::AddDimension(d) => next.dimensions.push(d.clone()),
            Self::AddElements(elements) => {
                for element in elements.iter() {
                    next.push(element.clone());
                }
            }
            Self::RemoveElement { id, removed } => {
                *removed = remove_cascading(&mut next, std::slice::from_ref(id));
            }
            Self::RemoveMultiple { ids, removed } => {
                *removed = remove_cascading(&mut next, ids);
            }
            Self::ReplaceElement { element, previous } => {
                *previous = match next.locate(element.id()) {
                    Some((kind, index)) if kind == element.kind() => next.replace_at(index, element.clone()),
                    _ => None,
                };
            }
            Self::AddTradeLayer(layer) => next.trade_layers.push(layer.clone()),
            Self::AddTradeElement { layer_id, element, applied } => {
                let data = next.trade_layers.iter_mut().find(|l| l.id == *layer_id).and_then(|l| l.trade_data.as_mut());
                *applied = data.is_some();
                if let Some(data) = data {
                    data.elements.push(element.clone());
                }
            }
            Self::AddTradePath { layer_id, path, applied } => {
                let data = next.trade_layers.iter_mut().find(|l| l.id == *layer_id).and_then(|l| l.trade_data.as_mut());
                *applied = data.is_some();
                if let Some(data) = data {
                    data.paths.push(path.clone());
                }
            }
            Self::AddDamageZone { layer_id, zone, applied } => {
                let data = next.trade_layers.iter_mut().find(|l| l.id == *layer_id).and_then(|l| l.damage_data.as_mut());
                *applied = data.is_some();
                if let Some(data) = data {
                    data.zones.push(zone.clone());
                }
            }
        }
        next
    }

    /// Reverse the last `execute` on a copy of `plan`.
    #[must_use]
    pub fn undo(&self, plan: &FloorPlanData) -> FloorPlanData {
        let mut prev = plan.clone();
        match self {
            Self::AddWall(w) => remove_added(&mut prev, &w.id),
            Self::AddArcWall(a) => remove_added(&mut prev, &a.id),
            Self::AddDoor(d) => remove_added(&mut prev, &d.id),
            Self::AddWindow(w) => remove_added(&mut prev, &w.id),
            Self::AddFixture(f) => remove_added(&mut prev, &f.id),
            Self::AddLabel(l) => remove_added(&mut prev, &l.id),
            Self::AddDimension(d) => remove_added(&mut prev, &d.id),
            Self::AddElements(elements) => {
                for element in elements.iter().rev() {
                    remove_added(&mut prev, element.id());
                }
            }
            Self::RemoveElement { removed, .. } | Self::RemoveMultiple { removed, .. } => {
                for entry in removed.iter().rev() {
                    prev.insert_at(entry.index, entry.element.clone());
                }
            }
            Self::ReplaceElement { element, previous } => {
                if let (Some(old), Some((_, index))) = (previous, prev.locate(element.id())) {
                    prev.replace_at(index, old.clone());
                }
            }
            Self::AddTradeLayer(layer) => {
                if let Some(i) = prev.trade_layers.iter().rposition(|l| l.id == layer.id) {
                    prev.trade_layers.remove(i);
                }
            }
            Self::AddTradeElement { layer_id, element, applied } => {
                if *applied {
                    if let Some(data) = prev.trade_layers.iter_mut().find(|l| l.id == *layer_id).and_then(|l| l.trade_data.as_mut()) {
                        if let Some(i) = data.elements.iter().rposition(|e| e.id == element.id) {
                            data.elements.remove(i);
                        }
                    }
                }
            }
            Self::AddTradePath { layer_id, path, applied } => {
                if *applied {
                    if let Some(data) = prev.trade_layers.iter_mut().find(|l| l.id == *layer_id).and_then(|l| l.trade_data.as_mut()) {
                        if let Some(i) = data.paths.iter().rposition(|p| p.id == path.id) {
                            data.paths.remove(i);
                        }
                    }
                }
            }
            Self::AddDamageZone { layer_id, zone, applied } => {
                if *applied {
                    if let Some(data) = prev.trade_layers.iter_mut().find(|l| l.id == *layer_id).and_then(|l| l.damage_data.as_mut()) {
                        if let Some(i) = data.zones.iter().rposition(|z| z.id == zone.id) {
                            data.zones.remove(i);
                        }
                    }
                }
            }
        }
        prev
    }
}

/// Remove `ids` and every door or window hung on a removed wall, recording
/// each removal in the order it happened.
fn remove_cascading(plan: &mut FloorPlanData, ids: &[ElementId]) -> Vec<Removed> {
    let mut targets: Vec<(ElementId, ElementKind)> = Vec::new();
    {
        let kinds = plan.kind_index();
        let mut push = |id: &str| {
            if let Some(&kind) = kinds.get(id) {
                if !targets.iter().any(|(t, _)| t == id) {
                    targets.push((id.to_owned(), kind));
                }
            }
        };
        for id in ids {
            push(id.as_str());
            if kinds.get(id.as_str()) == Some(&ElementKind::Wall) {
                for opening in plan.openings_on_wall(id) {
                    push(opening.as_str());
                }
            }
        }
    }

    let mut removed = Vec::with_capacity(targets.len());
    for (id, kind) in &targets {
        let Some(index) = plan.position_in(*kind, id) else {
            continue;
        };
        if let Some(element) = plan.remove_at(*kind, index) {
            removed.push(Removed { kind: *kind, index, element });
        }
    }
    removed
}

/// Undo of an add. Ids are unique, so the appended element is the only match.
fn remove_added(plan: &mut FloorPlanData, id: &str) {
    plan.remove_by_id(id);
}
