//! Interactive editing session for one load layout.
//!
//! A `LayoutSession` owns the arrangement for the duration of an edit. Every
//! discrete gesture (drag release, rotation toggle, auto-arrange) returns
//! exactly one [`Commit`] carrying a complete copy of the new arrangement;
//! callers never see a half-applied gesture.

use std::collections::HashMap;

use thiserror::Error;

use crate::capacity::CapacityResolution;
use crate::geometry::{clamp_axis, clamp_into, point_inside};
use crate::layout::{LayoutConfig, auto_arrange, place_sequentially};
use crate::model::{CargoItem, LoadSurface, PlacedItem};
use crate::report::LayoutReport;
use crate::types::{Footprint, Positioned, Vec2};

/// Session-level switches set by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Items may also be dragged across the deck width. Off: long axis only.
    pub allow_y_axis: bool,
    /// Items may be turned a quarter.
    pub allow_rotation: bool,
    /// Disables dragging and rotating; reports stay available.
    pub read_only: bool,
}

/// Gesture rejected by the session. The arrangement is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session is read-only")]
    ReadOnly,
    #[error("Rotation is locked for this session")]
    RotationLocked,
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("No drag in progress")]
    NotDragging,
    #[error("A drag is in progress")]
    DragInProgress,
}

/// Kind of gesture that produced a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    DragRelease,
    Rotation,
    AutoArrange,
}

/// Consistent snapshot of the arrangement after one gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    /// Increases by one with every commit of this session.
    pub revision: u64,
    pub gesture: Gesture,
    pub items: Vec<PlacedItem>,
}

#[derive(Clone, Debug, PartialEq)]
struct DragState {
    index: usize,
    /// Pointer position minus item position at pointer-down.
    offset: Vec2,
    /// Item position at pointer-down, restored on cancel.
    origin: Vec2,
}

/// Interaction state of the session.
#[derive(Clone, Debug, PartialEq, Default)]
enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
}

/// Editing session for the arrangement of cargo on one deck.
#[derive(Clone, Debug)]
pub struct LayoutSession {
    surface: LoadSurface,
    items: Vec<PlacedItem>,
    index: HashMap<String, usize>,
    options: SessionOptions,
    config: LayoutConfig,
    interaction: Interaction,
    revision: u64,
}

impl LayoutSession {
    /// Starts a session with the cargo placed sequentially in input order.
    pub fn new(surface: LoadSurface, cargo: Vec<CargoItem>) -> Self {
        Self::with_config(surface, cargo, SessionOptions::default(), LayoutConfig::default())
    }

    pub fn with_config(
        surface: LoadSurface,
        cargo: Vec<CargoItem>,
        options: SessionOptions,
        config: LayoutConfig,
    ) -> Self {
        let mut session = Self {
            surface,
            items: Vec::new(),
            index: HashMap::new(),
            options,
            config,
            interaction: Interaction::Idle,
            revision: 0,
        };
        session.set_items(&cargo);
        session
    }

    /// Resumes editing an arrangement the caller captured from an earlier commit.
    ///
    /// Positions and rotations are taken over as they are.
    pub fn from_arrangement(
        surface: LoadSurface,
        placed: Vec<PlacedItem>,
        options: SessionOptions,
        config: LayoutConfig,
    ) -> Self {
        let mut session = Self::with_config(surface, Vec::new(), options, config);
        session.replace_items(placed);
        session
    }

    /// Replaces the cargo list and resets to sequential placement.
    ///
    /// Any drag in progress is dropped.
    pub fn set_items(&mut self, cargo: &[CargoItem]) {
        self.interaction = Interaction::Idle;
        let placed = place_sequentially(cargo, &self.surface, &self.config);
        self.replace_items(placed);
        log::debug!(
            "session reset with {} items on {}",
            self.items.len(),
            self.surface.name
        );
    }

    /// Swaps the deck. Item positions are kept as they are.
    pub fn set_surface(&mut self, surface: LoadSurface) {
        self.surface = surface;
    }

    pub fn set_allow_y_axis(&mut self, allow: bool) {
        self.options.allow_y_axis = allow;
    }

    pub fn set_allow_rotation(&mut self, allow: bool) {
        self.options.allow_rotation = allow;
    }

    /// Switches read-only mode. Entering it cancels an active drag.
    pub fn set_read_only(&mut self, read_only: bool) {
        if read_only {
            self.cancel_drag();
        }
        self.options.read_only = read_only;
    }

    pub fn surface(&self) -> &LoadSurface {
        &self.surface
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&PlacedItem> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging(_))
    }

    /// Id of the item being dragged, if any.
    pub fn dragged_item(&self) -> Option<&str> {
        match &self.interaction {
            Interaction::Dragging(drag) => Some(self.items[drag.index].id()),
            Interaction::Idle => None,
        }
    }

    /// Topmost item under a surface-space point (last placed wins).
    pub fn item_at(&self, point: Vec2) -> Option<&PlacedItem> {
        self.items.iter().rev().find(|p| point_inside(point, p))
    }

    /// Pointer-down on an item: enters dragging.
    ///
    /// # Parameters
    /// * `id` - Item under the pointer
    /// * `pointer` - Pointer position in surface space (m)
    pub fn begin_drag(&mut self, id: &str, pointer: Vec2) -> Result<(), SessionError> {
        if self.options.read_only {
            log::warn!("drag of {} rejected: session is read-only", id);
            return Err(SessionError::ReadOnly);
        }
        let index = self.index_of(id)?;
        let origin = self.items[index].position();
        self.interaction = Interaction::Dragging(DragState {
            index,
            offset: pointer - origin,
            origin,
        });
        Ok(())
    }

    /// Pointer-move while dragging.
    ///
    /// Moves the dragged item so it keeps its offset to the pointer. X is
    /// clamped into the deck; Y follows (clamped) only when Y movement is
    /// allowed and stays unchanged otherwise.
    ///
    /// # Returns
    /// The new position of the dragged item
    pub fn drag_to(&mut self, pointer: Vec2) -> Result<Vec2, SessionError> {
        let Interaction::Dragging(drag) = &self.interaction else {
            return Err(SessionError::NotDragging);
        };
        let candidate = pointer - drag.offset;
        let surface = self.surface.dims();
        let allow_y = self.options.allow_y_axis;

        let placed = &mut self.items[drag.index];
        let footprint = placed.footprint();
        placed.position_x = clamp_axis(candidate.x, footprint.x, surface.x);
        if allow_y {
            placed.position_y = clamp_axis(candidate.y, footprint.y, surface.y);
        }
        Ok(Vec2::new(placed.position_x, placed.position_y))
    }

    /// Pointer-up: leaves dragging and commits the arrangement.
    pub fn end_drag(&mut self) -> Result<Commit, SessionError> {
        match std::mem::take(&mut self.interaction) {
            Interaction::Dragging(drag) => {
                log::debug!("drag of {} released", self.items[drag.index].id());
                Ok(self.commit(Gesture::DragRelease))
            }
            Interaction::Idle => Err(SessionError::NotDragging),
        }
    }

    /// Pointer-leave: commits like pointer-up if a drag is active.
    pub fn pointer_leave(&mut self) -> Option<Commit> {
        self.end_drag().ok()
    }

    /// Abandons an active drag and restores the item's original position.
    ///
    /// No commit is produced.
    pub fn cancel_drag(&mut self) {
        if let Interaction::Dragging(drag) = std::mem::take(&mut self.interaction) {
            let placed = &mut self.items[drag.index];
            placed.position_x = drag.origin.x;
            placed.position_y = drag.origin.y;
        }
    }

    /// Turns an item a quarter and commits.
    ///
    /// If the new footprint sticks out of the deck, the item is shifted the
    /// minimum amount needed to bring it back inside. Rejected while a drag
    /// is in progress; finish or cancel the drag first.
    pub fn toggle_rotation(&mut self, id: &str) -> Result<Commit, SessionError> {
        if self.options.read_only {
            log::warn!("rotation of {} rejected: session is read-only", id);
            return Err(SessionError::ReadOnly);
        }
        if !self.options.allow_rotation {
            log::warn!("rotation of {} rejected: rotation locked", id);
            return Err(SessionError::RotationLocked);
        }
        if self.is_dragging() {
            log::warn!("rotation of {} rejected: drag in progress", id);
            return Err(SessionError::DragInProgress);
        }
        let index = self.index_of(id)?;

        let bounds = self.surface.dims();
        let placed = &mut self.items[index];
        placed.rotated = !placed.rotated;
        let position = clamp_into(placed.position(), placed.footprint(), bounds);
        placed.position_x = position.x;
        placed.position_y = position.y;

        Ok(self.commit(Gesture::Rotation))
    }

    /// Reorders by descending weight, places sequentially and commits.
    ///
    /// Rotation is reset for all items. An active drag is abandoned.
    pub fn auto_arrange(&mut self) -> Commit {
        self.cancel_drag();
        let arranged = auto_arrange(&self.items, &self.surface, &self.config);
        self.replace_items(arranged);
        self.commit(Gesture::AutoArrange)
    }

    /// Validation, collisions and balance of the current arrangement against this deck.
    pub fn report(&self) -> LayoutReport {
        self.report_against(&CapacityResolution::from(&self.surface))
    }

    /// Same as [`report`](Self::report) with externally resolved deck limits.
    pub fn report_against(&self, capacity: &CapacityResolution) -> LayoutReport {
        LayoutReport::compute(&self.items, capacity, &self.surface, &self.config)
    }

    fn index_of(&self, id: &str) -> Result<usize, SessionError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))
    }

    fn replace_items(&mut self, items: Vec<PlacedItem>) {
        self.index = items
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id().to_string(), idx))
            .collect();
        self.items = items;
    }

    fn commit(&mut self, gesture: Gesture) -> Commit {
        self.revision += 1;
        log::debug!("commit #{} after {:?}", self.revision, gesture);
        Commit {
            revision: self.revision,
            gesture,
            items: self.items.clone(),
        }
    }
}
