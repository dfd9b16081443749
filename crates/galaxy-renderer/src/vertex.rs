//! Per-star vertex record and the CPU staging copy of the vertex buffer

use bytemuck::{Pod, Zeroable};
use galaxy_physics::ParticleField;

use crate::palette::StarPalette;

/// One star as the shader sees it.
///
/// Locations: 0 = position, 1 = size, 2 = color. Stepped per instance.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
}

impl StarVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x3];

    /// Byte stride between consecutive stars
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU copy of the GPU vertex buffer.
///
/// After [`StarVertexBuffer::sync`] there is exactly one record per star, in
/// field order, and [`StarVertexBuffer::as_bytes`] is what gets uploaded.
#[derive(Debug, Clone, Default)]
pub struct StarVertexBuffer {
    vertices: Vec<StarVertex>,
    palette: StarPalette,
}

impl StarVertexBuffer {
    pub fn new(palette: StarPalette) -> Self {
        Self {
            vertices: Vec::new(),
            palette,
        }
    }

    /// Rewrite every record from `field`.
    pub fn sync(&mut self, field: &ParticleField) {
        let palette = &self.palette;
        self.vertices.clear();
        self.vertices
            .extend(field.stars().iter().map(|star| StarVertex {
                position: star.position.to_array(),
                size: star.size(),
                color: palette.star_color(star).to_array(),
            }));
    }

    pub fn vertices(&self) -> &[StarVertex] {
        &self.vertices
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Size in bytes of `count` records
    pub fn byte_len(count: usize) -> u64 {
        count as u64 * StarVertex::STRIDE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_physics::Star;
    use glam::Vec3;

    #[test]
    fn test_record_layout() {
        assert_eq!(StarVertex::STRIDE, 28);
        assert_eq!(StarVertex::ATTRIBUTES[0].offset, 0);
        assert_eq!(StarVertex::ATTRIBUTES[1].offset, 12);
        assert_eq!(StarVertex::ATTRIBUTES[2].offset, 16);
        assert_eq!(StarVertex::ATTRIBUTES[2].shader_location, 2);
    }

    #[test]
    fn test_bytes_follow_records() {
        let field = ParticleField::from_stars(vec![
            Star::attractor(10.0),
            Star::orbiter(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.0),
        ])
        .unwrap();

        let mut buffer = StarVertexBuffer::default();
        buffer.sync(&field);

        let bytes = buffer.as_bytes();
        assert_eq!(bytes.len() as u64, StarVertexBuffer::byte_len(2));

        let second: &[f32] = bytemuck::cast_slice(&bytes[28..56]);
        assert_eq!(&second[..4], &[1.0, 2.0, 3.0, 2.5]);
    }

    #[test]
    fn test_resync_shrinks() {
        let big = ParticleField::from_stars(vec![
            Star::attractor(10.0),
            Star::orbiter(Vec3::X, Vec3::ZERO, 1.0),
            Star::orbiter(Vec3::Y, Vec3::ZERO, 1.0),
        ])
        .unwrap();
        let small = ParticleField::attractor_only(10.0).unwrap();

        let mut buffer = StarVertexBuffer::default();
        buffer.sync(&big);
        buffer.sync(&small);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.vertices()[0].size, small.attractor().size());
    }
}
