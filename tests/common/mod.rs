//! Scripted physics double: bodies stay where they are put and every `step`
//! returns the next queued list of contact batches.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;
use pile_stack::sim::{
    BodyConfig, BodyHandle, ContactEvents, ContactPair, PhysicsWorld, ShapeDescriptor,
};

#[derive(Debug, Default)]
pub struct ScriptedWorld {
    positions: BTreeMap<BodyHandle, Vec2>,
    dynamic: BTreeMap<BodyHandle, bool>,
    queued: VecDeque<Vec<ContactEvents>>,
    next_id: u32,
}

impl ScriptedWorld {
    pub fn place(&mut self, body: BodyHandle, position: Vec2) {
        self.positions.insert(body, position);
    }

    pub fn is_dynamic(&self, body: BodyHandle) -> bool {
        self.dynamic.get(&body).copied().unwrap_or(false)
    }

    /// Queue one step made of a single sub-step batch
    pub fn queue(&mut self, begin: Vec<ContactPair>, sustained: Vec<ContactPair>) {
        self.queued.push_back(vec![ContactEvents { begin, sustained }]);
    }

    fn insert(&mut self, position: Vec2, config: BodyConfig) -> BodyHandle {
        self.next_id += 1;
        let id = BodyHandle(self.next_id);
        self.positions.insert(id, position);
        self.dynamic.insert(id, !config.is_static);
        id
    }
}

impl PhysicsWorld for ScriptedWorld {
    fn create_static_body(
        &mut self,
        _shape: &ShapeDescriptor,
        position: Vec2,
        config: BodyConfig,
    ) -> BodyHandle {
        self.insert(position, config)
    }

    fn create_polygon_body(
        &mut self,
        _vertices: &[Vec2],
        position: Vec2,
        config: BodyConfig,
    ) -> BodyHandle {
        self.insert(position, config)
    }

    fn set_dynamic(&mut self, body: BodyHandle, dynamic: bool) {
        self.dynamic.insert(body, dynamic);
    }

    fn set_velocity_x(&mut self, _body: BodyHandle, _vx: f32) {}

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        self.positions.insert(body, position);
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.positions.get(&body).copied()
    }

    fn step(&mut self, _dt: f32) -> Vec<ContactEvents> {
        self.queued.pop_front().unwrap_or_default()
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.dynamic.clear();
        self.queued.clear();
    }
}
