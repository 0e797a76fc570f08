//! Rapier-backed physics world
//!
//! Scene units are pixels with +y pointing down, so gravity is positive y.
//! Suspended pieces and the floor are fixed bodies; a drop flips the piece to
//! dynamic. Contact pairs are diffed against the previous sub-step to produce
//! begin and sustained batches.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use glam::Vec2;
use rapier2d::na::{Point2, Vector2};
use rapier2d::prelude::{
    BroadPhaseBvh, CCDSolver, Collider, ColliderBuilder, ColliderHandle, ColliderSet,
    ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, RigidBodyType,
};

use crate::sim::{
    BodyConfig, BodyHandle, ContactEvents, ContactPair, Dimensions, PhysicsWorld, ShapeDescriptor,
};

/// Downward acceleration in px/s²
const GRAVITY: f32 = 980.0;
/// Sub-steps per `step` call
const SUBSTEPS: u32 = 4;
/// Pixels per physics length unit, so solver tolerances scale to screen sizes
const PIXELS_PER_METER: f32 = 100.0;

fn to_na(v: Vec2) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

/// Rigid-body world built on `rapier2d`
pub struct RapierWorld {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    handles: BTreeMap<BodyHandle, RigidBodyHandle>,
    owners: HashMap<RigidBodyHandle, BodyHandle>,
    /// Pairs touching at the end of the previous sub-step
    touching: BTreeSet<ContactPair>,
    next_id: u32,
    pub gravity: f32,
    pub substeps: u32,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters {
                length_unit: PIXELS_PER_METER,
                ..IntegrationParameters::default()
            },
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            handles: BTreeMap::new(),
            owners: HashMap::new(),
            touching: BTreeSet::new(),
            next_id: 1,
            gravity: GRAVITY,
            substeps: SUBSTEPS,
        }
    }
}

impl RapierWorld {
    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    pub fn is_dynamic(&self, body: BodyHandle) -> Option<bool> {
        self.body(body).map(|b| b.is_dynamic())
    }

    fn body(&self, body: BodyHandle) -> Option<&rapier2d::prelude::RigidBody> {
        self.handles.get(&body).and_then(|h| self.bodies.get(*h))
    }

    fn body_mut(&mut self, body: BodyHandle) -> Option<&mut rapier2d::prelude::RigidBody> {
        let handle = *self.handles.get(&body)?;
        self.bodies.get_mut(handle)
    }

    fn insert(&mut self, collider: Collider, position: Vec2, config: BodyConfig) -> BodyHandle {
        let builder = if config.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let rb = builder
            .translation(to_na(position))
            .ccd_enabled(true)
            .build();
        let rb_handle = self.bodies.insert(rb);
        self.colliders
            .insert_with_parent(collider, rb_handle, &mut self.bodies);

        let id = BodyHandle(self.next_id);
        self.next_id += 1;
        self.handles.insert(id, rb_handle);
        self.owners.insert(rb_handle, id);
        id
    }

    fn owner(&self, collider: ColliderHandle) -> Option<BodyHandle> {
        let parent = self.colliders.get(collider)?.parent()?;
        self.owners.get(&parent).copied()
    }

    /// Pairs with at least one active contact point, smaller handle first
    fn active_pairs(&self) -> BTreeSet<ContactPair> {
        self.narrow_phase
            .contact_pairs()
            .filter(|pair| {
                pair.manifolds
                    .iter()
                    .any(|m| m.data.num_active_contacts() > 0)
            })
            .filter_map(|pair| {
                let a = self.owner(pair.collider1)?;
                let b = self.owner(pair.collider2)?;
                Some(ContactPair::new(a.min(b), a.max(b)))
            })
            .collect()
    }

    fn substep(&mut self, h: f32) -> ContactEvents {
        self.params.dt = h;
        self.pipeline.step(
            &Vector2::new(0.0, self.gravity),
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            &(),
            &(),
        );

        let now = self.active_pairs();
        let events = ContactEvents {
            begin: now.difference(&self.touching).copied().collect(),
            sustained: now.intersection(&self.touching).copied().collect(),
        };
        self.touching = now;
        events
    }
}

/// Convex hull collider centred on the outline's vertex mean
fn hull_collider(vertices: &[Vec2]) -> Option<ColliderBuilder> {
    if vertices.is_empty() {
        return None;
    }
    let centre = vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32;
    let points: Vec<Point2<f32>> = vertices
        .iter()
        .map(|v| Point2::new(v.x - centre.x, v.y - centre.y))
        .collect();
    ColliderBuilder::convex_hull(&points)
}

/// Box matching the outline's extent, for degenerate hulls
fn extent_collider(vertices: &[Vec2]) -> ColliderBuilder {
    let extent = vertices.iter().fold(Vec2::ZERO, |max, v| max.max(*v));
    ColliderBuilder::cuboid(extent.x / 2.0, extent.y / 2.0)
}

fn with_material(builder: ColliderBuilder, config: BodyConfig) -> Collider {
    builder
        .friction(config.friction)
        .restitution(config.restitution)
        .build()
}

impl PhysicsWorld for RapierWorld {
    fn create_static_body(
        &mut self,
        shape: &ShapeDescriptor,
        position: Vec2,
        config: BodyConfig,
    ) -> BodyHandle {
        let builder = match shape.dimensions {
            Dimensions::Rect { width, height } => {
                ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            }
            Dimensions::Radius(_) => {
                hull_collider(&shape.vertices).unwrap_or_else(|| extent_collider(&shape.vertices))
            }
        };
        self.insert(with_material(builder, config), position, config)
    }

    fn create_polygon_body(
        &mut self,
        vertices: &[Vec2],
        position: Vec2,
        config: BodyConfig,
    ) -> BodyHandle {
        let builder = hull_collider(vertices).unwrap_or_else(|| {
            log::warn!("Degenerate outline of {} vertices, using its box", vertices.len());
            extent_collider(vertices)
        });
        self.insert(with_material(builder, config), position, config)
    }

    fn set_dynamic(&mut self, body: BodyHandle, dynamic: bool) {
        if let Some(b) = self.body_mut(body) {
            if dynamic {
                b.set_body_type(RigidBodyType::Dynamic, true);
            } else {
                b.set_body_type(RigidBodyType::Fixed, true);
                b.set_linvel(Vector2::zeros(), true);
            }
        }
    }

    fn set_velocity_x(&mut self, body: BodyHandle, vx: f32) {
        if let Some(b) = self.body_mut(body) {
            let vy = b.linvel().y;
            b.set_linvel(Vector2::new(vx, vy), true);
        }
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.set_translation(to_na(position), true);
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.body(body).map(|b| {
            let t = b.translation();
            Vec2::new(t.x, t.y)
        })
    }

    fn step(&mut self, dt: f32) -> Vec<ContactEvents> {
        let substeps = self.substeps.max(1);
        let h = dt / substeps as f32;
        (0..substeps).map(|_| self.substep(h)).collect()
    }

    fn clear(&mut self) {
        *self = Self {
            next_id: self.next_id,
            gravity: self.gravity,
            substeps: self.substeps,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{make_polygon, make_rectangle};

    fn floor(world: &mut RapierWorld) -> BodyHandle {
        // Top edge at y = 550
        world.create_static_body(
            &make_rectangle(800.0, 200.0),
            Vec2::new(400.0, 650.0),
            BodyConfig::FLOOR,
        )
    }

    fn drop_box(world: &mut RapierWorld, pos: Vec2, width: f32, height: f32) -> BodyHandle {
        let shape = make_rectangle(width, height);
        let id = world.create_static_body(&shape, pos, BodyConfig::PILE);
        world.set_dynamic(id, true);
        id
    }

    fn settle(world: &mut RapierWorld, frames: usize) -> Vec<ContactEvents> {
        (0..frames).flat_map(|_| world.step(1.0 / 60.0)).collect()
    }

    #[test]
    fn test_box_lands_on_floor() {
        let mut world = RapierWorld::default();
        let ground = floor(&mut world);
        let piece = drop_box(&mut world, Vec2::new(400.0, 300.0), 50.0, 50.0);

        let batches = settle(&mut world, 240);
        let y = world.position(piece).unwrap().y;
        assert!((y - 525.0).abs() < 1.5, "rested at {y}");

        let pair = ContactPair::new(ground, piece);
        let begins: Vec<_> = batches.iter().flat_map(|b| b.begin.iter()).collect();
        assert!(begins.contains(&&pair));
        assert!(begins.iter().all(|p| p.involves(piece)));
        assert!(batches.last().unwrap().sustained.contains(&pair));
    }

    #[test]
    fn test_begin_fires_before_sustained() {
        let mut world = RapierWorld::default();
        floor(&mut world);
        let piece = drop_box(&mut world, Vec2::new(400.0, 500.0), 40.0, 40.0);

        let batches = settle(&mut world, 60);
        let first_begin = batches.iter().position(|b| !b.begin.is_empty()).unwrap();
        let first_sustained = batches.iter().position(|b| !b.sustained.is_empty()).unwrap();
        assert!(first_begin < first_sustained);
        assert!(world.touching.iter().all(|p| p.involves(piece)));
    }

    #[test]
    fn test_overhanging_plank_topples() {
        let mut world = RapierWorld::default();
        floor(&mut world);
        let base = drop_box(&mut world, Vec2::new(400.0, 500.0), 50.0, 50.0);
        settle(&mut world, 120);
        assert!((world.position(base).unwrap().y - 525.0).abs() < 1.5);

        // Overlaps the base by 5 units, centre of mass 45 units past its edge
        let plank = drop_box(&mut world, Vec2::new(470.0, 480.0), 100.0, 20.0);
        settle(&mut world, 600);

        let pos = world.position(plank).unwrap();
        // Resting flat on the base would leave the centre at y = 490
        assert!(pos.y > 500.0, "plank still perched at {pos}");
    }

    #[test]
    fn test_static_bodies_hold_still() {
        let mut world = RapierWorld::default();
        let id = world.create_polygon_body(
            &make_polygon(6, 30.0).vertices,
            Vec2::new(100.0, 100.0),
            BodyConfig::PILE,
        );
        settle(&mut world, 60);
        assert_eq!(world.position(id), Some(Vec2::new(100.0, 100.0)));
        assert_eq!(world.is_dynamic(id), Some(false));
    }

    #[test]
    fn test_dropped_hexagon_rests_on_floor() {
        let mut world = RapierWorld::default();
        let ground = floor(&mut world);
        let hex = make_polygon(6, 30.0);
        let id =
            world.create_polygon_body(&hex.vertices, Vec2::new(400.0, 300.0), BodyConfig::PILE);
        world.set_dynamic(id, true);
        settle(&mut world, 240);

        // Flat side down: half the hexagon's height above the floor top
        let half_height = hex.extent().y / 2.0;
        let y = world.position(id).unwrap().y;
        assert!((y - (550.0 - half_height)).abs() < 1.5, "rested at {y}");
        assert!(world.touching.contains(&ContactPair::new(ground, id)));
    }

    #[test]
    fn test_fixed_bodies_do_not_touch() {
        let mut world = RapierWorld::default();
        floor(&mut world);
        // Suspended piece overlapping the floor
        world.create_static_body(
            &make_rectangle(50.0, 50.0),
            Vec2::new(400.0, 550.0),
            BodyConfig::PILE,
        );
        let batches = settle(&mut world, 10);
        assert!(batches.iter().all(ContactEvents::is_empty));
    }

    #[test]
    fn test_nudge_moves_suspended_body_exactly() {
        let mut world = RapierWorld::default();
        let id = world.create_static_body(
            &make_rectangle(50.0, 50.0),
            Vec2::new(400.0, 300.0),
            BodyConfig::PILE,
        );
        world.set_position(id, Vec2::new(399.0, 300.0));
        settle(&mut world, 1);
        assert_eq!(world.position(id), Some(Vec2::new(399.0, 300.0)));
    }

    #[test]
    fn test_clear_keeps_handles_unique() {
        let mut world = RapierWorld::default();
        let first = floor(&mut world);
        world.clear();
        assert_eq!(world.body_count(), 0);
        assert!(world.position(first).is_none());
        let second = floor(&mut world);
        assert_ne!(first, second);
    }
}
