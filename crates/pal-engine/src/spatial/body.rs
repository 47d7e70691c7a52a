use std::collections::HashMap;
use std::fmt;

use glam::DVec2;

use crate::api::types::{BodyId, Color, EntityId, Scope, SurfaceId};
use crate::core::rect::Rect;
use crate::renderer::traits::Renderer;
use crate::spatial::registry::BodyRegistry;

/// What a body is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Reports overlaps only.
    Trigger,
    /// Reports overlaps and blocks movement resolved through
    /// [`BodyRegistry::try_move`].
    Collider,
}

/// Overlap transition for a (body, peer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// The pair started overlapping this update.
    Enter,
    /// The pair overlaps this update (fired every update, including the entering one).
    Collide,
    /// The pair stopped overlapping this update.
    Exit,
}

/// One overlap transition, recorded in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEvent {
    pub kind: OverlapKind,
    /// The body being updated.
    pub body: BodyId,
    /// The peer it overlaps (or stopped overlapping).
    pub other: BodyId,
}

/// Overlap callback. Receives the registry so it can add, remove or reconfigure bodies,
/// followed by `(body, other)`.
pub type BodyCallback = Box<dyn FnMut(&mut BodyRegistry, BodyId, BodyId)>;

/// Something that can report where a body owner currently is.
pub trait OwnerPositions {
    /// Position of `owner`, or `None` if it no longer exists.
    fn owner_position(&self, owner: EntityId) -> Option<DVec2>;
}

impl OwnerPositions for () {
    fn owner_position(&self, _owner: EntityId) -> Option<DVec2> {
        None
    }
}

impl OwnerPositions for HashMap<EntityId, DVec2> {
    fn owner_position(&self, owner: EntityId) -> Option<DVec2> {
        self.get(&owner).copied()
    }
}

/// Construction parameters for a body.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: DVec2,
    pub size: DVec2,
    /// Offset from the owner's position, when an owner is attached.
    pub offset: DVec2,
    pub scope: Scope,
    pub owner: Option<EntityId>,
    /// Outline colour for the diagnostic overlay.
    pub draw_color: Color,
}

impl BodyDesc {
    pub fn trigger(position: DVec2, size: DVec2) -> Self {
        Self {
            kind: BodyKind::Trigger,
            position,
            size,
            offset: DVec2::ZERO,
            scope: Scope::Global,
            owner: None,
            draw_color: Color::YELLOW,
        }
    }

    pub fn collider(position: DVec2, size: DVec2) -> Self {
        Self {
            kind: BodyKind::Collider,
            draw_color: Color::RED,
            ..Self::trigger(position, size)
        }
    }

    // -- Builder pattern --

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_draw_color(mut self, color: Color) -> Self {
        self.draw_color = color;
        self
    }
}

/// An axis-aligned box that can follow an owner and tracks which peers it overlaps.
pub struct SpatialBody {
    pub(crate) id: BodyId,
    pub(crate) kind: BodyKind,
    pub(crate) rect: Rect,
    pub(crate) offset: DVec2,
    pub(crate) owner: Option<EntityId>,
    pub(crate) scope: Scope,
    /// Peers currently overlapping, in order of entry.
    pub(crate) overlapping: Vec<BodyId>,
    pub draw_color: Color,
    pub(crate) on_enter: Option<BodyCallback>,
    pub(crate) on_collide: Option<BodyCallback>,
    pub(crate) on_exit: Option<BodyCallback>,
}

impl SpatialBody {
    pub(crate) fn from_desc(id: BodyId, desc: BodyDesc) -> Self {
        Self {
            id,
            kind: desc.kind,
            rect: Rect::new(desc.position, desc.size),
            offset: desc.offset,
            owner: desc.owner,
            scope: desc.scope,
            overlapping: Vec::new(),
            draw_color: desc.draw_color,
            on_enter: None,
            on_collide: None,
            on_exit: None,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Absolute box in scene coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn position(&self) -> DVec2 {
        self.rect.position
    }

    pub fn size(&self) -> DVec2 {
        self.rect.size
    }

    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Peers currently overlapping this body.
    pub fn overlapping(&self) -> &[BodyId] {
        &self.overlapping
    }

    pub fn is_overlapping(&self, other: BodyId) -> bool {
        self.overlapping.contains(&other)
    }

    /// Whether `other` takes part in overlap tests with this body.
    pub fn shares_partition(&self, other: &SpatialBody) -> bool {
        self.id != other.id && self.scope == other.scope && self.kind == other.kind
    }

    pub(crate) fn callback_slot(&mut self, kind: OverlapKind) -> &mut Option<BodyCallback> {
        match kind {
            OverlapKind::Enter => &mut self.on_enter,
            OverlapKind::Collide => &mut self.on_collide,
            OverlapKind::Exit => &mut self.on_exit,
        }
    }

    /// Diagnostic overlay: box outline plus a `[x, y, w, h]` label.
    /// Triggers turn green while overlapping something.
    pub fn draw<R: Renderer>(&self, renderer: &mut R, surface: SurfaceId) {
        let color = match self.kind {
            BodyKind::Trigger if !self.overlapping.is_empty() => Color::GREEN,
            _ => self.draw_color,
        };
        renderer.stroke_rect(surface, self.rect, color, 1.0);

        let r = self.rect;
        let label = format!("[{}, {}, {}, {}]", r.left(), r.top(), r.size.x, r.size.y);
        let label_pos = match self.kind {
            BodyKind::Trigger => DVec2::new(r.left(), r.top() - 12.0),
            BodyKind::Collider => DVec2::new(r.left(), r.bottom() + 2.0),
        };
        renderer.draw_text(surface, &label, label_pos, color);
    }
}

impl fmt::Debug for SpatialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialBody")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("rect", &self.rect)
            .field("offset", &self.offset)
            .field("owner", &self.owner)
            .field("scope", &self.scope)
            .field("overlapping", &self.overlapping)
            .finish_non_exhaustive()
    }
}
