//! Body arena and minimal physics
//!
//! Bodies live in a generational arena: removal invalidates the key, and
//! existence checks are direct lookups rather than null comparisons. The
//! "physics" is all an avoid game needs - constant-velocity integration and
//! circle-overlap contact queries.

use glam::Vec2;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to one body; dead handles stop resolving
    pub struct BodyKey;
}

/// What a body is. Checked at the contact boundary to decide what a
/// collision means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    FallingObject,
    Player,
}

/// A circular body
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Spawn template for falling bodies
#[derive(Debug, Clone, Copy)]
pub struct ObstacleTemplate {
    pub radius: f32,
    /// Descent rate in units per second
    pub fall_speed: f32,
}

impl ObstacleTemplate {
    /// Stamp out one falling body at `pos`.
    pub fn instantiate(&self, pos: Vec2) -> Body {
        Body {
            kind: BodyKind::FallingObject,
            pos,
            vel: Vec2::new(0.0, -self.fall_speed),
            radius: self.radius,
        }
    }
}

/// The body table
#[derive(Debug, Default)]
pub struct World {
    bodies: SlotMap<BodyKey, Body>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body. Returns whether the key still resolved.
    pub fn despawn(&mut self, key: BodyKey) -> bool {
        self.bodies.remove(key).is_some()
    }

    pub fn contains(&self, key: BodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    pub fn get(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    pub fn get_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    pub fn position_of(&self, key: BodyKey) -> Option<Vec2> {
        self.bodies.get(key).map(|b| b.pos)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &Body)> {
        self.bodies.iter()
    }

    /// Advance every body by its velocity over one fixed step.
    pub fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.pos += body.vel * dt;
        }
    }

    /// Every body overlapping `key`, reported the step the contact occurs.
    pub fn contacts_with(&self, key: BodyKey) -> Vec<(BodyKey, BodyKind)> {
        let Some(subject) = self.bodies.get(key) else {
            return Vec::new();
        };
        self.bodies
            .iter()
            .filter(|(other_key, _)| *other_key != key)
            .filter(|(_, other)| {
                let reach = subject.radius + other.radius;
                subject.pos.distance_squared(other.pos) < reach * reach
            })
            .map(|(other_key, other)| (other_key, other.kind))
            .collect()
    }
}
