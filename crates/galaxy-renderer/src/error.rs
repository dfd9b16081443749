use thiserror::Error;

/// Failures while setting up or feeding the GPU.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to request adapter: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Surface not supported by adapter")]
    SurfaceNotSupported,

    /// The field does not fit into a single vertex buffer on this device.
    #[error("{stars} stars need {bytes} bytes, device allows at most {max_bytes}")]
    FieldTooLarge {
        stars: usize,
        bytes: u64,
        max_bytes: u64,
    },
}
