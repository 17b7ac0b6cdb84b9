//! Deterministic hash and lattice noise.
//!
//! Every function here is pure: the same inputs always give the same output
//! and nothing is cached, so callers on any thread can use them freely.

use glam::Vec2;

/// Mix integer lattice coordinates and a seed into 32 well-distributed bits.
pub fn hash2(x: i32, y: i32, seed: u64) -> u32 {
    let mut h = seed ^ 0x9E37_79B9_7F4A_7C15;
    h ^= (x as u32 as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = h.rotate_left(31);
    h ^= (y as u32 as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    // splitmix64 finalizer
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 31;
    (h >> 32) as u32
}

/// Hash to a float in [0, 1). `salt` derives independent streams per cell.
pub fn hash01(x: i32, y: i32, seed: u64, salt: u32) -> f32 {
    let h = hash2(x, y, seed.wrapping_add((salt as u64).wrapping_mul(0x2545_F491_4F6C_DD1D)));
    (h >> 8) as f32 / (1u32 << 24) as f32
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothly interpolated lattice value noise in [0, 1).
pub fn value_noise(p: Vec2, seed: u64) -> f32 {
    let cell = p.floor();
    let (ix, iy) = (cell.x as i32, cell.y as i32);
    let f = p - cell;
    let (u, v) = (smoothstep(f.x), smoothstep(f.y));

    let a = hash01(ix, iy, seed, 0);
    let b = hash01(ix + 1, iy, seed, 0);
    let c = hash01(ix, iy + 1, seed, 0);
    let d = hash01(ix + 1, iy + 1, seed, 0);
    lerp(lerp(a, b, u), lerp(c, d, u), v)
}

fn gradient(ix: i32, iy: i32, seed: u64) -> Vec2 {
    let angle = hash01(ix, iy, seed, 1) * std::f32::consts::TAU;
    Vec2::new(angle.cos(), angle.sin())
}

/// Classic gradient noise, roughly in [-0.71, 0.71].
pub fn perlin(p: Vec2, seed: u64) -> f32 {
    let cell = p.floor();
    let (ix, iy) = (cell.x as i32, cell.y as i32);
    let f = p - cell;

    let n00 = gradient(ix, iy, seed).dot(f);
    let n10 = gradient(ix + 1, iy, seed).dot(f - Vec2::new(1.0, 0.0));
    let n01 = gradient(ix, iy + 1, seed).dot(f - Vec2::new(0.0, 1.0));
    let n11 = gradient(ix + 1, iy + 1, seed).dot(f - Vec2::new(1.0, 1.0));

    let (u, v) = (fade(f.x), fade(f.y));
    lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
}

/// Perlin noise remapped to [0, 1].
pub fn perlin01(p: Vec2, seed: u64) -> f32 {
    (perlin(p, seed) * std::f32::consts::FRAC_1_SQRT_2 + 0.5).clamp(0.0, 1.0)
}

/// Distances to the nearest and second-nearest Voronoi feature points.
pub fn voronoi(p: Vec2, seed: u64) -> (f32, f32) {
    let cell = p.floor();
    let (ix, iy) = (cell.x as i32, cell.y as i32);
    let mut f1 = f32::MAX;
    let mut f2 = f32::MAX;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let (cx, cy) = (ix + dx, iy + dy);
            let feature = Vec2::new(
                cx as f32 + hash01(cx, cy, seed, 2),
                cy as f32 + hash01(cx, cy, seed, 3),
            );
            let d = feature.distance(p);
            if d < f1 {
                f2 = f1;
                f1 = d;
            } else if d < f2 {
                f2 = d;
            }
        }
    }
    (f1, f2)
}
