//! Simulation constants and tuning parameters.
//!
//! These are gameplay balance values. `SimConfig` mirrors the runtime-tunable
//! subset; everything else is fixed at compile time.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Pool capacities ---

pub const MAX_UNITS: usize = 100;
pub const MAX_ASTEROIDS: usize = 500;
pub const MAX_RESOURCES: usize = 100;
pub const MAX_PARTICLES: usize = 2000;

/// Commands per unit queue.
pub const MAX_COMMANDS: usize = 16;

/// Small-cannon hardpoints per unit (unit types may use fewer).
pub const SMALL_CANNON_SLOTS: usize = 4;

/// Default cap on concurrently alive units (production waits above it).
pub const DEFAULT_UNIT_CAP: usize = 50;

// --- World generation ---

/// Side length of one celestial-body grid cell (world units).
pub const CELESTIAL_CELL_SIZE: f32 = 5000.0;

/// Probability that a cell holds a celestial body.
pub const CELESTIAL_OCCUPANCY: f32 = 0.12;

/// Fraction of the cell kept clear at each edge when placing a body.
pub const CELESTIAL_CELL_MARGIN: f32 = 0.2;

/// `type_seed` above which a body is a galaxy instead of a planet.
pub const GALAXY_TYPE_THRESHOLD: f32 = 0.95;

pub const PLANET_MIN_RADIUS: f32 = 80.0;
pub const PLANET_MAX_RADIUS: f32 = 400.0;
pub const GALAXY_MIN_RADIUS: f32 = 600.0;
pub const GALAXY_MAX_RADIUS: f32 = 1200.0;

/// Low-frequency density noise scale (1 / wavelength).
pub const DENSITY_NOISE_SCALE: f32 = 1.0 / 8000.0;
/// Detail density noise scale.
pub const DENSITY_DETAIL_SCALE: f32 = 1.0 / 2500.0;
/// Voronoi belt noise scale.
pub const DENSITY_BELT_SCALE: f32 = 1.0 / 12000.0;
/// Density floor so empty space is never completely barren.
pub const DENSITY_BASELINE: f32 = 0.05;
/// Reach of a planet's density boost, in body radii.
pub const DENSITY_PLANET_REACH: f32 = 6.0;
/// Reach of a galaxy's density boost, in body radii.
pub const DENSITY_GALAXY_REACH: f32 = 4.0;
pub const DENSITY_PLANET_BOOST: f32 = 0.35;
pub const DENSITY_GALAXY_BOOST: f32 = 0.6;

// --- Physics ---

/// Gravity strength per unit of body radius.
pub const GRAVITY_CONSTANT: f32 = 25_000.0;
/// Galaxies pull this much harder than a planet of the same radius.
pub const GALAXY_GRAVITY_MULTIPLIER: f32 = 4.0;
/// Below this distance to a body center no gravity is applied.
pub const GRAVITY_MIN_DISTANCE: f32 = 100.0;

/// Collision radius = radius * multiplier for asteroids.
pub const ASTEROID_HITBOX_MULTIPLIER: f32 = 0.8;
/// Asteroid health per unit of radius.
pub const ASTEROID_HEALTH_MULTIPLIER: f32 = 10.0;
/// Radius lost per point of (damage / health multiplier).
pub const ASTEROID_DAMAGE_SHRINK: f32 = 0.2;
pub const ASTEROID_MIN_RADIUS: f32 = 10.0;
pub const ASTEROID_MAX_SPAWN_RADIUS: f32 = 120.0;
pub const ASTEROID_MIN_SPAWN_RADIUS: f32 = 15.0;
pub const ASTEROID_MAX_SPAWN_SPEED: f32 = 40.0;
pub const ASTEROID_MAX_ROTATION_SPEED: f32 = 0.8;
/// Number of texture variants the renderer has for asteroids.
pub const ASTEROID_TEXTURE_VARIANTS: u8 = 8;

/// Smaller radius below this fraction of the larger one = size-disparity collision.
pub const COLLISION_SIZE_DISPARITY: f32 = 0.7;
/// Radius and health fraction kept by the larger asteroid in a size-disparity hit.
pub const COLLISION_SURVIVOR_FRACTION: f32 = 0.9;
/// Radii above this split into two extra fragments.
pub const ASTEROID_SPLIT_RADIUS: f32 = 40.0;
/// Direct fragment radius as a fraction of the parent.
pub const FRAGMENT_DIRECT_FRACTION: f32 = 0.5;
/// Secondary fragment radius = parent * (BASE + SPAN * u^EXPONENT), u in [0, 1).
pub const FRAGMENT_POWER_BASE: f32 = 0.25;
pub const FRAGMENT_POWER_SPAN: f32 = 0.35;
pub const FRAGMENT_POWER_EXPONENT: f32 = 2.0;
/// Max angular jitter applied to fragment launch directions (radians).
pub const FRAGMENT_ANGLE_JITTER: f32 = 0.35;
pub const FRAGMENT_MIN_SPEED: f32 = 30.0;
pub const FRAGMENT_SPEED_FACTOR: f32 = 0.8;

// --- Spawning ---

pub const DESPAWN_RADIUS: f32 = 6000.0;
pub const MAX_ANCHORS: usize = 16;
pub const SPAWN_MIN_DISTANCE: f32 = 2500.0;
pub const SPAWN_MAX_DISTANCE: f32 = 5500.0;
pub const SPAWN_SAFE_ZONE: f32 = 2000.0;
pub const SPAWN_ATTEMPTS_PER_TICK: u32 = 8;
/// Clearance required between a new asteroid and existing hitboxes.
pub const SPAWN_OVERLAP_BUFFER: f32 = 50.0;
/// Asteroid target per anchor at zero density.
pub const ASTEROID_TARGET_BASE: f32 = 10.0;
/// Additional asteroids per anchor at density 1.0.
pub const ASTEROID_TARGET_DENSITY_SCALE: f32 = 50.0;

pub const CRYSTAL_SPAWN_ATTEMPTS_PER_TICK: u32 = 2;
/// Per-candidate gate applied before consulting the celestial neighborhood.
pub const CRYSTAL_SPAWN_CHANCE: f32 = 0.02;
pub const CRYSTAL_GALAXY_PROBABILITY: f32 = 0.6;
/// Planet probability = radius / PLANET_MAX_RADIUS * this.
pub const CRYSTAL_PLANET_PROBABILITY: f32 = 0.3;
/// Crystal offset from body center, in body radii.
pub const CRYSTAL_BODY_OFFSET_MIN: f32 = 1.2;
pub const CRYSTAL_BODY_OFFSET_MAX: f32 = 2.0;
pub const CRYSTAL_CAMERA_MIN_DISTANCE: f32 = 1500.0;
pub const MAX_CRYSTAL_TARGET: usize = 40;

// --- Crystals ---

pub const CRYSTAL_MIN_RADIUS: f32 = 12.0;
pub const CRYSTAL_MAX_RADIUS: f32 = 40.0;
/// Crystal health (and yield) per unit of radius.
pub const CRYSTAL_HEALTH_MULTIPLIER: f32 = 50.0;
/// Radius lost per point of (mined / health multiplier).
pub const CRYSTAL_MINING_SHRINK: f32 = 0.1;
/// Crystals never shrink below this while they still hold yield.
pub const CRYSTAL_MIN_VISIBLE_RADIUS: f32 = 6.0;
/// Visual radius = radius * this; used for stop distance and beam ends.
pub const CRYSTAL_VISUAL_SCALE: f32 = 1.2;
pub const CRYSTAL_TEXTURE_VARIANTS: u8 = 4;
/// Chance a destroyed asteroid drops a crystal.
pub const CRYSTAL_DROP_CHANCE: f32 = 0.25;
/// Dropped crystal radius as a fraction of the asteroid's original radius.
pub const CRYSTAL_DROP_RADIUS_FRACTION: f32 = 0.3;
/// Blast radius per unit of dropped crystal radius.
pub const CRYSTAL_BLAST_RADIUS_PER_RADIUS: f32 = 6.0;
/// Blast damage per unit of dropped crystal radius.
pub const CRYSTAL_BLAST_DAMAGE_PER_RADIUS: f32 = 3.0;
/// Units take this fraction of blast damage.
pub const CRYSTAL_BLAST_UNIT_FACTOR: f32 = 0.5;

// --- Economy ---

pub const STARTING_ENERGY: f32 = 500.0;
pub const MAX_GLOBAL_ENERGY: f32 = 1000.0;
/// Global energy regenerated per second.
pub const ENERGY_REGEN_RATE: f32 = 20.0;
pub const STARTING_RESOURCES: f32 = 400.0;
/// Distance to the Mothership within which cargo unloads.
pub const UNLOAD_RANGE: f32 = 150.0;
/// Cargo transferred per second while unloading.
pub const UNLOAD_RATE: f32 = 400.0;

// --- Combat ---

/// Engagement range multiplier for Defensive units.
pub const DEFENSIVE_RANGE_FACTOR: f32 = 0.6;
/// Gather range = small-cannon range * this + target visual radius.
pub const MINING_RANGE_FACTOR: f32 = 0.8;
/// Lower targeting score is better; stickiness lowers the previous target's score by this fraction.
pub const TARGET_STICKINESS: f32 = 0.2;
/// Target score weight on target radius.
pub const TARGET_RADIUS_WEIGHT: f32 = 0.15;
/// Beam start offset, as a fraction of the firer's radius.
pub const BEAM_ORIGIN_OFFSET: f32 = 0.9;
/// Beam end stops this fraction of the target's radius short of its center.
pub const BEAM_TARGET_INSET: f32 = 0.5;
/// Interval between mining spark bursts (seconds).
pub const MINING_SPARK_INTERVAL: f32 = 0.15;

pub const REPAIR_RANGE: f32 = 200.0;
/// HP restored per second by the Mothership.
pub const REPAIR_RATE: f32 = 25.0;

// --- Movement ---

/// Distance at which a Move/Patrol/AttackMove waypoint counts as reached.
pub const ARRIVAL_DISTANCE: f32 = 25.0;
/// Return-cargo stop distance as a fraction of `UNLOAD_RANGE`.
pub const RETURN_STOP_FRACTION: f32 = 0.6;

// --- Mothership respawn ---

pub const RESPAWN_TIME: f32 = 5.0;
pub const RESPAWN_ATTEMPTS: u32 = 20;
/// Respawn positions are sampled within this radius of the death position.
pub const RESPAWN_SCATTER: f32 = 800.0;
/// Clearance from asteroid hitboxes required for a respawn position.
pub const RESPAWN_BUFFER: f32 = 100.0;

// --- Radar ---

pub const RADAR_RANGE: f32 = 5000.0;

// --- Particles ---

pub const EXPLOSION_PARTICLES_BASE: u32 = 6;
/// Extra explosion particles per 100 points of scale.
pub const EXPLOSION_PARTICLES_PER_100: f32 = 2.0;
pub const EXPLOSION_PARTICLES_MAX: u32 = 40;
pub const TRACER_LIFE: f32 = 0.12;
pub const MINING_BEAM_LIFE: f32 = 0.05;
pub const REPAIR_BEAM_LIFE: f32 = 0.08;
