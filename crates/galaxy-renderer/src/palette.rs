//! Star tints from the Catppuccin Mocha palette
//!
//! Colors are converted from sRGB to linear once; the surface format applies
//! the sRGB encoding on write.

use catppuccin::PALETTE;
use galaxy_physics::{Star, MIN_STAR_MASS};
use glam::Vec3;

/// Orbiters at or above this mass get the full warm tint
const HEAVY_STAR_MASS: f32 = 2.5;

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear(color: &catppuccin::Color) -> Vec3 {
    Vec3::new(
        srgb_to_linear(color.rgb.r),
        srgb_to_linear(color.rgb.g),
        srgb_to_linear(color.rgb.b),
    )
}

/// Linear-space colors used for stars and the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPalette {
    pub attractor: Vec3,
    /// Tint of the lightest stars
    pub light: Vec3,
    /// Tint of the heaviest stars
    pub heavy: Vec3,
    pub background: Vec3,
}

impl Default for StarPalette {
    fn default() -> Self {
        let mocha = &PALETTE.mocha.colors;
        Self {
            attractor: linear(&mocha.peach),
            light: linear(&mocha.sapphire),
            heavy: linear(&mocha.yellow),
            background: linear(&mocha.base),
        }
    }
}

impl StarPalette {
    /// Tint for a star. Depends only on the attractor flag and mass.
    pub fn star_color(&self, star: &Star) -> Vec3 {
        if star.is_attractor() {
            return self.attractor;
        }
        let t = ((star.mass() - MIN_STAR_MASS) / (HEAVY_STAR_MASS - MIN_STAR_MASS)).clamp(0.0, 1.0);
        self.light.lerp(self.heavy, t)
    }

    /// Background clear color
    pub fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.background.x as f64,
            g: self.background.y as f64,
            b: self.background.z as f64,
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
        // Catppuccin Mocha base #1e1e2e
        assert!((srgb_to_linear(30) - 0.01298).abs() < 1e-4);
    }

    #[test]
    fn test_star_color_by_mass() {
        let palette = StarPalette::default();
        let light = Star::orbiter(Vec3::X, Vec3::ZERO, MIN_STAR_MASS);
        let heavy = Star::orbiter(Vec3::X, Vec3::ZERO, 10.0);
        assert!(palette.star_color(&light).abs_diff_eq(palette.light, 1e-6));
        assert!(palette.star_color(&heavy).abs_diff_eq(palette.heavy, 1e-6));
        assert_eq!(palette.star_color(&Star::attractor(1.0)), palette.attractor);
    }
}
