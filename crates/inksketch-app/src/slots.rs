//! Rendered-element bookkeeping for hosts.

use inksketch_core::StrokeId;

/// Rendered elements, one slot per stroke, back to front.
///
/// A slot stays in place when its element could not be created, so the
/// slots line up with the document's strokes and popping the topmost slot
/// always removes the topmost stroke's element.
#[derive(Debug, Clone)]
pub struct PathSlots<E> {
    slots: Vec<(StrokeId, Option<E>)>,
}

impl<E> Default for PathSlots<E> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<E> PathSlots<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot on top, with or without an element.
    pub fn push(&mut self, id: StrokeId, element: Option<E>) {
        self.slots.push((id, element));
    }

    /// Element rendered for a stroke, if any.
    pub fn get(&self, id: StrokeId) -> Option<&E> {
        self.slots
            .iter()
            .rev()
            .find(|(slot_id, _)| *slot_id == id)
            .and_then(|(_, element)| element.as_ref())
    }

    /// Remove the topmost slot, returning its element.
    pub fn pop(&mut self) -> Option<E> {
        self.slots.pop().and_then(|(_, element)| element)
    }

    /// Remove every slot, returning the elements that exist.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.slots.drain(..).filter_map(|(_, element)| element)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
