//! Renderer errors

/// Errors raised while creating or using GPU resources.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    /// The identity target cannot be allocated at the requested size.
    #[error("Identity framebuffer incomplete: {width}x{height} (max {max})")]
    FramebufferIncomplete { width: u32, height: u32, max: u32 },
    #[error("Failed to create pipeline '{label}': {message}")]
    Pipeline { label: String, message: String },
    #[error("Pixel readback failed: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),
    #[error("Pixel readback channel closed before the buffer was mapped")]
    ReadbackChannelClosed,
}
