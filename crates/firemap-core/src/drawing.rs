use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotation::{Annotation, Draft, ShapeKind};
use crate::consts::ANNOTATION_FILL;
use crate::geometry::{Rgba, ScreenPos, SurfaceBox};
use crate::viewport::Viewport;

/// Active pointer tool on the map surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapTool {
    #[default]
    Select,
    Pan,
    DrawCircle,
    DrawRectangle,
}

impl MapTool {
    pub const ALL: &[Self] = &[Self::Select, Self::Pan, Self::DrawCircle, Self::DrawRectangle];

    /// Shape produced by this tool, if it is a draw tool.
    pub fn draw_kind(&self) -> Option<ShapeKind> {
        match self {
            Self::DrawCircle => Some(ShapeKind::Circle),
            Self::DrawRectangle => Some(ShapeKind::Rectangle),
            Self::Select | Self::Pan => None,
        }
    }

    pub fn cursor(&self) -> CursorHint {
        match self {
            Self::Select => CursorHint::Default,
            Self::Pan => CursorHint::Grab,
            Self::DrawCircle | Self::DrawRectangle => CursorHint::Crosshair,
        }
    }
}

impl fmt::Display for MapTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "Select"),
            Self::Pan => write!(f, "Pan"),
            Self::DrawCircle => write!(f, "Draw Circle"),
            Self::DrawRectangle => write!(f, "Draw Rectangle"),
        }
    }
}

/// Cursor the surface should show for the active tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Crosshair,
}

/// What happens to an in-progress draft when the pointer leaves the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeavePolicy {
    /// Commit the partial shape, exactly like a pointer-up.
    #[default]
    Commit,
    /// Drop the partial shape and keep the draw tool active.
    Discard,
}

impl fmt::Display for LeavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => write!(f, "Commit"),
            Self::Discard => write!(f, "Discard"),
        }
    }
}

/// Pointer interaction state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// Pan drag in progress; `last` is the previous pointer position.
    Panning { last: ScreenPos },
    Drawing(Draft),
}

/// Result of a pointer-up or pointer-leave.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
    Nothing,
    PanEnded,
    Committed(String),
    Discarded,
}

/// Turns pointer gestures into committed annotations and pan drags.
pub struct DrawingEngine {
    tool: MapTool,
    interaction: Interaction,
    annotations: Vec<Annotation>,
    next_id: u64,
    leave_policy: LeavePolicy,
    color: Rgba,
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new(LeavePolicy::default())
    }
}

impl DrawingEngine {
    pub fn new(leave_policy: LeavePolicy) -> Self {
        Self {
            tool: MapTool::default(),
            interaction: Interaction::Idle,
            annotations: Vec::new(),
            next_id: 1,
            leave_policy,
            color: ANNOTATION_FILL,
        }
    }

    pub fn tool(&self) -> MapTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: MapTool) {
        if self.tool != tool {
            debug!(from = %self.tool, to = %tool, "map tool changed");
        }
        self.tool = tool;
    }

    pub fn leave_policy(&self) -> LeavePolicy {
        self.leave_policy
    }

    pub fn set_leave_policy(&mut self, policy: LeavePolicy) {
        self.leave_policy = policy;
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.interaction, Interaction::Drawing(_))
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.interaction, Interaction::Panning { .. })
    }

    /// The in-progress shape, if any.
    pub fn draft(&self) -> Option<&Draft> {
        match &self.interaction {
            Interaction::Drawing(d) => Some(d),
            _ => None,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn pointer_down(&mut self, pos: ScreenPos, surface: &SurfaceBox) {
        if !matches!(self.interaction, Interaction::Idle) {
            return;
        }
        if self.tool == MapTool::Pan {
            self.interaction = Interaction::Panning { last: pos };
        } else if let Some(kind) = self.tool.draw_kind() {
            let anchor = surface.to_surface_percent(pos);
            let id = format!("shape-{}", self.next_id);
            self.next_id += 1;
            debug!(%id, %kind, x = anchor.x, y = anchor.y, "drawing started");
            self.interaction = Interaction::Drawing(Draft::new(id, kind, anchor, self.color));
        }
    }

    pub fn pointer_move(&mut self, pos: ScreenPos, surface: &SurfaceBox, viewport: &mut Viewport) {
        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::Panning { last } => {
                viewport.pan(pos.x - last.x, pos.y - last.y);
                *last = pos;
            }
            Interaction::Drawing(draft) => draft.update(surface.to_surface_percent(pos)),
        }
    }

    /// Finish the current gesture. A draft is committed and the tool
    /// reverts to [`MapTool::Select`].
    pub fn pointer_up(&mut self, pos: Option<ScreenPos>, surface: &SurfaceBox) -> PointerOutcome {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => PointerOutcome::Nothing,
            Interaction::Panning { .. } => PointerOutcome::PanEnded,
            Interaction::Drawing(mut draft) => {
                if let Some(p) = pos {
                    draft.update(surface.to_surface_percent(p));
                }
                let annotation = draft.commit();
                let id = annotation.id().to_string();
                debug!(%id, kind = %annotation.kind(), "annotation committed");
                self.annotations.push(annotation);
                self.tool = MapTool::Select;
                PointerOutcome::Committed(id)
            }
        }
    }

    /// Pointer left the surface. Drafts follow the configured [`LeavePolicy`].
    pub fn pointer_leave(
        &mut self,
        pos: Option<ScreenPos>,
        surface: &SurfaceBox,
    ) -> PointerOutcome {
        if self.is_drawing() && self.leave_policy == LeavePolicy::Discard {
            self.interaction = Interaction::Idle;
            debug!("draft discarded on pointer leave");
            return PointerOutcome::Discarded;
        }
        self.pointer_up(pos, surface)
    }

    /// Remove every annotation and abort any in-progress draft.
    pub fn clear(&mut self) {
        self.annotations.clear();
        if self.is_drawing() {
            self.interaction = Interaction::Idle;
        }
    }

    /// Remove one committed annotation. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id() != id);
        self.annotations.len() != before
    }
}
