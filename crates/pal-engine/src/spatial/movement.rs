//! Movement queries against colliders.
//!
//! Motion is resolved one axis at a time: X first using the start Y, then Y using the
//! resolved X. A blocked axis stops flush against the nearest blocking edge, which lets
//! a body slide along a wall instead of sticking to it. Colliders already overlapped at
//! the start position never block, so a body spawned inside a wall can walk out of it.

use glam::DVec2;

use crate::api::types::BodyId;
use crate::core::rect::Rect;
use crate::spatial::body::BodyKind;
use crate::spatial::registry::BodyRegistry;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, v: DVec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn set(self, v: &mut DVec2, value: f64) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }
}

impl BodyRegistry {
    /// Colliders that would overlap collider `id` if its owner stood at `owner_position`.
    /// Empty for triggers and unknown ids.
    pub fn would_collide(&self, id: BodyId, owner_position: DVec2) -> Vec<BodyId> {
        let Some(body) = self.get(id) else {
            return Vec::new();
        };
        if body.kind() != BodyKind::Collider {
            return Vec::new();
        }
        let probe = Rect::new(owner_position + body.offset(), body.size());
        self.iter()
            .filter(|other| body.shares_partition(other))
            .filter(|other| probe.intersects(&other.rect()))
            .map(|other| other.id())
            .collect()
    }

    /// Where an owner moving from `from` to `to` can actually go without collider `id`
    /// newly overlapping another collider.
    ///
    /// Unknown ids and triggers move freely.
    pub fn try_move(&self, id: BodyId, from: DVec2, to: DVec2) -> DVec2 {
        let Some(body) = self.get(id) else {
            log::warn!("try_move: unknown body {:?}", id);
            return to;
        };
        if body.kind() != BodyKind::Collider {
            return to;
        }
        let size = body.size();
        let offset = body.offset();

        let embedded = self.would_collide(id, from);

        let mut resolved = from;
        for axis in [Axis::X, Axis::Y] {
            let start = axis.get(from);
            let target = axis.get(to);
            let mut probe = resolved;
            axis.set(&mut probe, target);

            let mut hits = self.would_collide(id, probe);
            hits.retain(|h| !embedded.contains(h));
            let value = if hits.is_empty() {
                target
            } else if target > start {
                // Flush against the nearest leading edge, never behind the start.
                let edge = hits
                    .iter()
                    .filter_map(|&h| self.get(h))
                    .map(|h| axis.get(h.rect().min()))
                    .fold(f64::INFINITY, f64::min);
                (edge - axis.get(size) - axis.get(offset)).max(start)
            } else if target < start {
                let edge = hits
                    .iter()
                    .filter_map(|&h| self.get(h))
                    .map(|h| axis.get(h.rect().max()))
                    .fold(f64::NEG_INFINITY, f64::max);
                (edge - axis.get(offset)).min(start)
            } else {
                start
            };
            axis.set(&mut resolved, value);
        }
        resolved
    }
}
