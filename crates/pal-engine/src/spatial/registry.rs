//! Explicit owner of every [`SpatialBody`].
//!
//! Bodies are created and destroyed through the registry. Overlap tests only ever
//! compare bodies that share a kind and a scope, so triggers never see colliders and
//! bodies from one scene never see another scene's bodies.

use glam::DVec2;

use crate::api::types::{BodyId, EntityId, Scope, SurfaceId};
use crate::renderer::traits::Renderer;
use crate::spatial::body::{
    BodyCallback, BodyDesc, BodyKind, OverlapEvent, OverlapKind, OwnerPositions, SpatialBody,
};

/// Slot storage for bodies. Ids are never reused.
pub struct BodyRegistry {
    bodies: Vec<Option<SpatialBody>>,
    live: usize,
    events: Vec<OverlapEvent>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(64),
            live: 0,
            events: Vec::with_capacity(64),
        }
    }

    /// Register a new body and return its id.
    pub fn create(&mut self, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        log::debug!(
            "registered {:?} {:?} at {:?} size {:?} in {:?}",
            desc.kind,
            id,
            desc.position,
            desc.size,
            desc.scope
        );
        self.bodies.push(Some(SpatialBody::from_desc(id, desc)));
        self.live += 1;
        id
    }

    /// Unregister a body. Peers forget it without an exit notification.
    pub fn remove(&mut self, id: BodyId) -> bool {
        let removed = self
            .bodies
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .is_some();
        if !removed {
            log::warn!("remove: unknown body {:?}", id);
            return false;
        }
        self.live -= 1;
        for body in self.bodies.iter_mut().flatten() {
            body.overlapping.retain(|&peer| peer != id);
        }
        log::debug!("removed {:?}", id);
        true
    }

    pub fn get(&self, id: BodyId) -> Option<&SpatialBody> {
        self.bodies.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut SpatialBody> {
        self.bodies.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live bodies in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SpatialBody> {
        self.bodies.iter().flatten()
    }

    /// Ids of the live bodies in `scope`, in creation order.
    pub fn ids_in_scope(&self, scope: Scope) -> Vec<BodyId> {
        self.iter()
            .filter(|b| b.scope == scope)
            .map(|b| b.id)
            .collect()
    }

    // -- Configuration --

    /// Attach or detach the entity whose position this body follows.
    pub fn set_owner(&mut self, id: BodyId, owner: Option<EntityId>) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.owner = owner;
                true
            }
            None => {
                log::warn!("set_owner: unknown body {:?}", id);
                false
            }
        }
    }

    /// Move a body to another scope. Overlap state with its old peers is dropped
    /// silently, on both sides.
    pub fn set_scope(&mut self, id: BodyId, scope: Scope) -> bool {
        let Some(body) = self.get_mut(id) else {
            log::warn!("set_scope: unknown body {:?}", id);
            return false;
        };
        if body.scope == scope {
            return true;
        }
        body.scope = scope;
        body.overlapping.clear();
        for other in self.bodies.iter_mut().flatten() {
            other.overlapping.retain(|&peer| peer != id);
        }
        true
    }

    /// Place an unowned body directly.
    pub fn set_position(&mut self, id: BodyId, position: DVec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.rect.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_size(&mut self, id: BodyId, size: DVec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.rect.size = size;
                true
            }
            None => false,
        }
    }

    pub fn set_offset(&mut self, id: BodyId, offset: DVec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.offset = offset;
                true
            }
            None => false,
        }
    }

    pub fn on_enter(
        &mut self,
        id: BodyId,
        callback: impl FnMut(&mut BodyRegistry, BodyId, BodyId) + 'static,
    ) -> bool {
        self.install(id, OverlapKind::Enter, Box::new(callback))
    }

    pub fn on_collide(
        &mut self,
        id: BodyId,
        callback: impl FnMut(&mut BodyRegistry, BodyId, BodyId) + 'static,
    ) -> bool {
        self.install(id, OverlapKind::Collide, Box::new(callback))
    }

    pub fn on_exit(
        &mut self,
        id: BodyId,
        callback: impl FnMut(&mut BodyRegistry, BodyId, BodyId) + 'static,
    ) -> bool {
        self.install(id, OverlapKind::Exit, Box::new(callback))
    }

    /// Install all three callbacks at once. `None` clears a slot.
    pub fn set_callbacks(
        &mut self,
        id: BodyId,
        on_enter: Option<BodyCallback>,
        on_collide: Option<BodyCallback>,
        on_exit: Option<BodyCallback>,
    ) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.on_enter = on_enter;
                body.on_collide = on_collide;
                body.on_exit = on_exit;
                true
            }
            None => {
                log::warn!("callbacks on unknown body {:?}", id);
                false
            }
        }
    }

    /// Remove every callback from a body.
    pub fn clear_callbacks(&mut self, id: BodyId) {
        if let Some(body) = self.get_mut(id) {
            body.on_enter = None;
            body.on_collide = None;
            body.on_exit = None;
        }
    }

    fn install(&mut self, id: BodyId, kind: OverlapKind, callback: BodyCallback) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                *body.callback_slot(kind) = Some(callback);
                true
            }
            None => {
                log::warn!("{:?} callback on unknown body {:?}", kind, id);
                false
            }
        }
    }

    // -- Per-frame update --

    /// Reposition one body from its owner, then test it against its peers.
    pub fn update<O: OwnerPositions + ?Sized>(&mut self, id: BodyId, owners: &O) {
        self.reposition(id, owners);
        self.test_overlaps(id);
    }

    /// Update every live body. All bodies are repositioned before any overlap is tested,
    /// so results do not depend on creation order.
    pub fn update_all<O: OwnerPositions + ?Sized>(&mut self, owners: &O) {
        let ids: Vec<BodyId> = self.iter().map(|b| b.id).collect();
        self.update_batch(&ids, owners);
    }

    /// Update the bodies of one scope, in the same two phases as [`update_all`](Self::update_all).
    pub fn update_scope<O: OwnerPositions + ?Sized>(&mut self, scope: Scope, owners: &O) {
        let ids = self.ids_in_scope(scope);
        self.update_batch(&ids, owners);
    }

    fn update_batch<O: OwnerPositions + ?Sized>(&mut self, ids: &[BodyId], owners: &O) {
        for &id in ids {
            self.reposition(id, owners);
        }
        for &id in ids {
            self.test_overlaps(id);
        }
    }

    fn reposition<O: OwnerPositions + ?Sized>(&mut self, id: BodyId, owners: &O) {
        let Some(body) = self.get_mut(id) else {
            return;
        };
        // An owner that has gone away leaves the box where it was.
        if let Some(owner_pos) = body.owner.and_then(|owner| owners.owner_position(owner)) {
            body.rect.position = owner_pos + body.offset;
        }
    }

    fn test_overlaps(&mut self, id: BodyId) {
        let Some(body) = self.get(id) else {
            return;
        };
        let peers: Vec<BodyId> = self
            .iter()
            .filter(|other| body.shares_partition(other))
            .map(|other| other.id)
            .collect();

        for peer in peers {
            // Callbacks may have removed or rescoped either body since the snapshot.
            let Some(body) = self.get(id) else {
                return;
            };
            let Some(other) = self.get(peer) else {
                continue;
            };
            if !body.shares_partition(other) {
                continue;
            }
            let hit = body.rect.intersects(&other.rect);
            let was = body.is_overlapping(peer);

            if hit {
                if !was {
                    self.fire(OverlapKind::Enter, id, peer);
                    if !self.still_paired(id, peer) {
                        continue;
                    }
                    if let Some(body) = self.get_mut(id) {
                        if !body.overlapping.contains(&peer) {
                            body.overlapping.push(peer);
                        }
                    }
                }
                self.fire(OverlapKind::Collide, id, peer);
            } else if was {
                self.fire(OverlapKind::Exit, id, peer);
                if let Some(body) = self.get_mut(id) {
                    body.overlapping.retain(|&p| p != peer);
                }
            }
        }
    }

    /// Both bodies still live and still test against each other.
    fn still_paired(&self, id: BodyId, peer: BodyId) -> bool {
        match (self.get(id), self.get(peer)) {
            (Some(body), Some(other)) => body.shares_partition(other),
            _ => false,
        }
    }

    fn fire(&mut self, kind: OverlapKind, body: BodyId, other: BodyId) {
        if !self.contains(body) || !self.contains(other) {
            return;
        }
        self.events.push(OverlapEvent { kind, body, other });
        if kind != OverlapKind::Collide {
            log::trace!("{:?}: {:?} / {:?}", kind, body, other);
        }

        let callback = self
            .get_mut(body)
            .and_then(|b| b.callback_slot(kind).take());
        if let Some(mut callback) = callback {
            callback(self, body, other);
            // Restore unless the body went away or the callback installed a replacement.
            if let Some(b) = self.get_mut(body) {
                let slot = b.callback_slot(kind);
                if slot.is_none() {
                    *slot = Some(callback);
                }
            }
        }
    }

    /// Overlap transitions recorded since the last [`clear_events`](Self::clear_events).
    pub fn events(&self) -> &[OverlapEvent] {
        &self.events
    }

    /// Drop recorded events. Call once per frame.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn drain_events(&mut self) -> Vec<OverlapEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Diagnostics --

    /// Draw one body's diagnostic overlay. Unknown ids draw nothing.
    pub fn draw<R: Renderer>(&self, id: BodyId, renderer: &mut R, surface: SurfaceId) {
        if let Some(body) = self.get(id) {
            body.draw(renderer, surface);
        }
    }

    /// Draw the diagnostic overlay for every body in `scope`.
    pub fn draw_scope<R: Renderer>(&self, scope: Scope, renderer: &mut R, surface: SurfaceId) {
        for body in self.iter().filter(|b| b.scope == scope) {
            body.draw(renderer, surface);
        }
    }

    /// Number of live bodies of `kind`.
    pub fn count_kind(&self, kind: BodyKind) -> usize {
        self.iter().filter(|b| b.kind == kind).count()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::api::types::SceneId;

    fn trigger(reg: &mut BodyRegistry, x: f64, y: f64, w: f64, h: f64) -> BodyId {
        reg.create(BodyDesc::trigger(DVec2::new(x, y), DVec2::new(w, h)))
    }

    fn kinds(reg: &BodyRegistry) -> Vec<(OverlapKind, BodyId, BodyId)> {
        reg.events().iter().map(|e| (e.kind, e.body, e.other)).collect()
    }

    #[test]
    fn create_and_remove() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 1.0, 1.0);
        let b = trigger(&mut reg, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(reg.len(), 2);
        assert!(reg.remove(a));
        assert!(!reg.remove(a));
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(b));
        // Ids are not reused.
        let c = trigger(&mut reg, 0.0, 0.0, 1.0, 1.0);
        assert_ne!(c, a);
    }

    #[test]
    fn enter_collide_exit_sequence() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);

        reg.update(a, &());
        assert_eq!(
            kinds(&reg),
            vec![(OverlapKind::Enter, a, b), (OverlapKind::Collide, a, b)]
        );
        assert!(reg.get(a).unwrap().is_overlapping(b));
        reg.clear_events();

        reg.update(a, &());
        assert_eq!(kinds(&reg), vec![(OverlapKind::Collide, a, b)]);
        reg.clear_events();

        reg.set_position(b, DVec2::new(50.0, 50.0));
        reg.update(a, &());
        assert_eq!(kinds(&reg), vec![(OverlapKind::Exit, a, b)]);
        assert!(reg.get(a).unwrap().overlapping().is_empty());
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        trigger(&mut reg, 10.0, 0.0, 10.0, 10.0);
        reg.update(a, &());
        assert!(reg.events().is_empty());
    }

    #[test]
    fn zero_size_body_never_overlaps() {
        let mut reg = BodyRegistry::new();
        trigger(&mut reg, 5.0, 5.0, 0.0, 0.0);
        trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        reg.update_all(&());
        assert!(reg.events().is_empty());
    }

    #[test]
    fn triggers_and_colliders_are_partitioned() {
        let mut reg = BodyRegistry::new();
        let t = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        reg.create(BodyDesc::collider(DVec2::ZERO, DVec2::splat(10.0)));
        reg.update(t, &());
        assert!(reg.events().is_empty());
        assert_eq!(reg.count_kind(BodyKind::Collider), 1);
    }

    #[test]
    fn scopes_are_isolated() {
        let mut reg = BodyRegistry::new();
        let a = reg.create(
            BodyDesc::trigger(DVec2::ZERO, DVec2::splat(10.0)).with_scope(Scope::Scene(SceneId(1))),
        );
        reg.create(
            BodyDesc::trigger(DVec2::ZERO, DVec2::splat(10.0)).with_scope(Scope::Scene(SceneId(2))),
        );
        reg.update(a, &());
        assert!(reg.events().is_empty());
        assert_eq!(reg.ids_in_scope(Scope::Scene(SceneId(1))), vec![a]);
    }

    #[test]
    fn owner_drives_position() {
        let mut reg = BodyRegistry::new();
        let a = reg.create(
            BodyDesc::trigger(DVec2::ZERO, DVec2::splat(4.0))
                .with_owner(EntityId(7))
                .with_offset(DVec2::new(1.0, 2.0)),
        );
        let mut owners = HashMap::new();
        owners.insert(EntityId(7), DVec2::new(100.0, 200.0));
        reg.update(a, &owners);
        assert_eq!(reg.get(a).unwrap().position(), DVec2::new(101.0, 202.0));

        // Missing owner leaves the box in place.
        owners.clear();
        reg.update(a, &owners);
        assert_eq!(reg.get(a).unwrap().position(), DVec2::new(101.0, 202.0));
    }

    #[test]
    fn callbacks_receive_pair() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        let log: Rc<RefCell<Vec<(&str, BodyId, BodyId)>>> = Rc::default();

        let l = log.clone();
        reg.on_enter(a, move |_, me, other| l.borrow_mut().push(("enter", me, other)));
        let l = log.clone();
        reg.on_collide(a, move |_, me, other| l.borrow_mut().push(("collide", me, other)));
        let l = log.clone();
        reg.on_exit(a, move |_, me, other| l.borrow_mut().push(("exit", me, other)));

        reg.update(a, &());
        reg.update(a, &());
        reg.set_position(b, DVec2::splat(100.0));
        reg.update(a, &());

        assert_eq!(
            *log.borrow(),
            vec![
                ("enter", a, b),
                ("collide", a, b),
                ("collide", a, b),
                ("exit", a, b)
            ]
        );
    }

    #[test]
    fn collide_fires_once_per_pair_per_update() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        trigger(&mut reg, 1.0, 1.0, 10.0, 10.0);
        trigger(&mut reg, 2.0, 2.0, 10.0, 10.0);
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        reg.on_collide(a, move |_, _, _| *c.borrow_mut() += 1);
        reg.update(a, &());
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn callback_may_remove_peer() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        let c = trigger(&mut reg, 6.0, 6.0, 10.0, 10.0);
        reg.on_enter(a, move |reg, _, other| {
            if other == b {
                reg.remove(c);
            }
        });
        reg.update(a, &());
        assert!(!reg.contains(c));
        assert_eq!(reg.get(a).unwrap().overlapping(), &[b]);
        // The callback is still installed afterwards.
        assert!(reg.get(a).unwrap().on_enter.is_some());
    }

    #[test]
    fn enter_callback_may_remove_the_peer() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        let collided = Rc::new(RefCell::new(Vec::new()));
        let log = collided.clone();
        reg.on_enter(a, |reg, _, other| {
            reg.remove(other);
        });
        reg.on_collide(a, move |_, _, other| log.borrow_mut().push(other));

        reg.update(a, &());
        assert!(!reg.contains(b));
        assert!(reg.get(a).unwrap().overlapping().is_empty());
        assert_eq!(kinds(&reg), vec![(OverlapKind::Enter, a, b)]);
        assert!(collided.borrow().is_empty());

        for _ in 0..3 {
            reg.update(a, &());
        }
        assert!(reg.get(a).unwrap().overlapping().is_empty());
        assert_eq!(reg.events().len(), 1);
    }

    #[test]
    fn collide_callback_may_remove_the_peer() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        let exits = Rc::new(RefCell::new(0));
        let e = exits.clone();
        reg.on_collide(a, |reg, _, other| {
            reg.remove(other);
        });
        reg.on_exit(a, move |_, _, _| *e.borrow_mut() += 1);

        reg.update(a, &());
        assert!(!reg.contains(b));
        assert!(reg.get(a).unwrap().overlapping().is_empty());

        reg.clear_events();
        reg.update(a, &());
        reg.update(a, &());
        assert!(reg.events().is_empty());
        assert!(reg.get(a).unwrap().overlapping().is_empty());
        // Removal is silent: no exit for a body that no longer exists.
        assert_eq!(*exits.borrow(), 0);
    }

    #[test]
    fn enter_collide_exit_as_a_peer_comes_and_goes() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 20.0, 0.0, 10.0, 10.0);

        reg.update(a, &());
        assert!(reg.events().is_empty());

        reg.set_position(b, DVec2::new(5.0, 0.0));
        reg.update(a, &());
        assert_eq!(
            kinds(&reg),
            vec![(OverlapKind::Enter, a, b), (OverlapKind::Collide, a, b)]
        );

        for _ in 0..3 {
            reg.clear_events();
            reg.update(a, &());
            assert_eq!(kinds(&reg), vec![(OverlapKind::Collide, a, b)]);
        }

        reg.clear_events();
        reg.set_position(b, DVec2::new(20.0, 0.0));
        reg.update(a, &());
        assert_eq!(kinds(&reg), vec![(OverlapKind::Exit, a, b)]);

        reg.clear_events();
        reg.update(a, &());
        assert!(reg.events().is_empty());
    }

    #[test]
    fn callback_may_remove_itself() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        trigger(&mut reg, 6.0, 6.0, 10.0, 10.0);
        reg.on_enter(a, |reg, me, _| {
            reg.remove(me);
        });
        reg.update(a, &());
        assert!(!reg.contains(a));
        assert_eq!(reg.events().len(), 1);
    }

    #[test]
    fn remove_clears_peer_sets_silently() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        reg.update_all(&());
        reg.clear_events();
        reg.remove(b);
        reg.update(a, &());
        assert!(reg.get(a).unwrap().overlapping().is_empty());
        assert!(reg.events().is_empty());
    }

    #[test]
    fn update_all_is_symmetric() {
        let mut reg = BodyRegistry::new();
        let a = reg.create(
            BodyDesc::trigger(DVec2::ZERO, DVec2::splat(4.0)).with_owner(EntityId(1)),
        );
        let b = reg.create(
            BodyDesc::trigger(DVec2::splat(100.0), DVec2::splat(4.0)).with_owner(EntityId(2)),
        );
        let mut owners = HashMap::new();
        owners.insert(EntityId(1), DVec2::splat(50.0));
        owners.insert(EntityId(2), DVec2::splat(51.0));
        reg.update_all(&owners);
        assert!(reg.get(a).unwrap().is_overlapping(b));
        assert!(reg.get(b).unwrap().is_overlapping(a));
    }

    #[test]
    fn set_scope_drops_stale_overlaps() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        reg.update_all(&());
        reg.set_scope(b, Scope::Scene(SceneId(3)));
        assert!(reg.get(a).unwrap().overlapping().is_empty());
        assert!(reg.get(b).unwrap().overlapping().is_empty());
    }

    #[test]
    fn set_callbacks_replaces_all_slots() {
        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let _b = trigger(&mut reg, 5.0, 5.0, 10.0, 10.0);
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        reg.on_exit(a, |_, _, _| {});
        assert!(reg.set_callbacks(
            a,
            None,
            Some(Box::new(move |_: &mut BodyRegistry, _: BodyId, _: BodyId| {
                *h.borrow_mut() += 1
            })),
            None,
        ));
        assert!(reg.get(a).unwrap().on_exit.is_none());
        reg.update(a, &());
        reg.update(a, &());
        assert_eq!(*hits.borrow(), 2);
        assert!(!reg.set_callbacks(BodyId(99), None, None, None));
    }

    #[test]
    fn draw_single_body() {
        use crate::renderer::recorder::{DrawCommand, RecordingRenderer};

        let mut reg = BodyRegistry::new();
        let a = trigger(&mut reg, 0.0, 0.0, 10.0, 10.0);
        let mut r = RecordingRenderer::new();
        reg.draw(a, &mut r, SurfaceId(0));
        assert!(matches!(r.commands()[0], DrawCommand::StrokeRect { .. }));

        r.clear();
        reg.draw(BodyId(42), &mut r, SurfaceId(0));
        assert!(r.is_empty());
    }
}
