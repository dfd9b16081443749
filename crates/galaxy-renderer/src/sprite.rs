//! CPU form of the point-sprite math in `shaders/star.wgsl`

use glam::{Mat4, Vec2, Vec4};

/// Corners of the two triangles that make up a sprite, in sprite space.
pub const QUAD_CORNERS: [Vec2; 6] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
];

/// Fragment alpha at offset `coord` from the sprite center.
/// Opaque strictly inside the unit circle, transparent on and outside it.
pub fn point_sprite_alpha(coord: Vec2) -> f32 {
    if coord.length_squared() < 1.0 {
        1.0
    } else {
        0.0
    }
}

/// Sprite edge length in pixels for a star of `size` at clip-space `w`.
pub fn screen_size(size: f32, clip_w: f32) -> f32 {
    size / clip_w
}

/// Clip-space position of one sprite corner.
pub fn sprite_corner(
    projection: Mat4,
    view: Mat4,
    position: glam::Vec3,
    size: f32,
    corner: Vec2,
    viewport: Vec2,
) -> Vec4 {
    let clip = projection * view * position.extend(1.0);
    let offset = corner * screen_size(size, clip.w) / viewport * clip.w;
    Vec4::new(clip.x + offset.x, clip.y + offset.y, clip.z, clip.w)
}
