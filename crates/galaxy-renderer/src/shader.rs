//! Shader source handed to [`crate::StarRenderer`] at pipeline setup

use std::borrow::Cow;

/// WGSL for the star pipeline plus its entry points.
///
/// The module must declare a uniform block at `@group(0) @binding(0)` laid out
/// like [`crate::CameraUniform`] (`projection`, `view`, `viewport`) and accept
/// [`crate::StarVertex`] at locations 0..=2.
#[derive(Debug, Clone, PartialEq)]
pub struct StarShaderSource {
    pub label: Cow<'static, str>,
    pub source: Cow<'static, str>,
    pub vertex_entry: Cow<'static, str>,
    pub fragment_entry: Cow<'static, str>,
}

impl Default for StarShaderSource {
    fn default() -> Self {
        Self::wgsl(include_str!("shaders/star.wgsl"))
    }
}

impl StarShaderSource {
    /// Custom WGSL using the default `vertex` / `fragment` entry points.
    pub fn wgsl(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: Cow::Borrowed("Star Shader"),
            source: source.into(),
            vertex_entry: Cow::Borrowed("vertex"),
            fragment_entry: Cow::Borrowed("fragment"),
        }
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label.as_ref()),
            source: wgpu::ShaderSource::Wgsl(self.source.clone()),
        })
    }
}
