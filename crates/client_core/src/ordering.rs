//! Drag-to-reorder gesture for the selected list.
//!
//! A gesture goes `Idle -> Dragging -> Committing -> Idle` when it ends in a
//! drop, or `Idle -> Dragging -> Idle` when it is abandoned. The source index
//! captured at drag start travels with the gesture as its payload.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging {
        source: usize,
    },
    Committing {
        source: usize,
        target: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Reordered { from: usize, to: usize },
    /// Dropped onto its own row.
    Unchanged,
    /// No active gesture, or the target is not a row.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    Committed,
    Abandoned,
    NoGesture,
}

#[derive(Debug, Default)]
pub struct DragController {
    phase: GesturePhase,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Row currently showing the drag indicator.
    pub fn dragging_index(&self) -> Option<usize> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Dragging { source } => Some(source),
            GesturePhase::Committing { target, .. } => Some(target),
        }
    }

    pub fn begin(&mut self, index: usize, len: usize) -> bool {
        if self.phase != GesturePhase::Idle || index >= len {
            debug!(index, len, phase = ?self.phase, "drag start ignored");
            return false;
        }
        self.phase = GesturePhase::Dragging { source: index };
        true
    }

    /// Whether a drop on `target` would be accepted.
    pub fn hover(&self, target: usize, len: usize) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. }) && target < len
    }

    /// Resolves a drop on `target`. A `Reordered` outcome is the move the
    /// caller applies to the list with [`move_element`].
    pub fn drop_on(&mut self, target: usize, len: usize) -> DropOutcome {
        let GesturePhase::Dragging { source } = self.phase else {
            return DropOutcome::Rejected;
        };
        if target >= len || source >= len {
            debug!(source, target, len, "drop rejected");
            return DropOutcome::Rejected;
        }

        self.phase = GesturePhase::Committing { source, target };
        if source == target {
            DropOutcome::Unchanged
        } else {
            DropOutcome::Reordered {
                from: source,
                to: target,
            }
        }
    }

    pub fn end(&mut self) -> GestureEnd {
        let ended = match self.phase {
            GesturePhase::Idle => GestureEnd::NoGesture,
            GesturePhase::Dragging { .. } => GestureEnd::Abandoned,
            GesturePhase::Committing { .. } => GestureEnd::Committed,
        };
        self.phase = GesturePhase::Idle;
        ended
    }
}

/// Moves the element at `from` to `to`, shifting everything between by one.
/// Returns false when nothing moved.
pub fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
#[path = "tests/ordering_tests.rs"]
mod tests;
