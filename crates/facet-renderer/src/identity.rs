//! Off-screen identity target and single-pixel readback.
//!
//! Every texel holds `(object_id, draw_id, primitive_id, 0)` of the nearest
//! surface. Reading a pixel blocks until the GPU has finished the copy, which
//! stalls the frame; picks are only issued while the mouse button is held.

use std::sync::mpsc;

use facet_core::{IdentityPixel, PixelCoord};

use crate::constants::identity as constants;
use crate::error::RendererError;

pub struct IdentityFramebuffer {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    staging_buffer: wgpu::Buffer,
    width: u32,
    height: u32,
}

/// Check that a `width` x `height` target can be allocated.
pub fn validate_size(width: u32, height: u32, max: u32) -> Result<(), RendererError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(RendererError::FramebufferIncomplete { width, height, max });
    }
    Ok(())
}

impl IdentityFramebuffer {
    /// Allocate the color and depth attachments and the staging buffer.
    pub fn init(device: &wgpu::Device, width: u32, height: u32) -> Result<Self, RendererError> {
        validate_size(width, height, device.limits().max_texture_dimension_2d)?;

        let (texture, view) = create_identity_texture(device, width, height);
        let depth_view = create_depth_view(device, width, height);
        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Identity Staging Buffer"),
            size: constants::STAGING_BYTES_PER_ROW as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        tracing::debug!("Identity framebuffer allocated: {}x{}", width, height);
        Ok(Self {
            texture,
            view,
            depth_view,
            staging_buffer,
            width,
            height,
        })
    }

    /// Reallocate both attachments at the new size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> Result<(), RendererError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        validate_size(width, height, device.limits().max_texture_dimension_2d)?;

        self.texture.destroy();
        let (texture, view) = create_identity_texture(device, width, height);
        self.texture = texture;
        self.view = view;
        self.depth_view = create_depth_view(device, width, height);
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Begin a pass writing into the identity attachments, cleared to the
    /// background value. Writing stops when the pass is dropped.
    pub fn begin_pass<'e>(&self, encoder: &'e mut wgpu::CommandEncoder) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Identity Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    /// Copy the texel at `coord` into the staging buffer.
    pub fn copy_pixel(&self, encoder: &mut wgpu::CommandEncoder, coord: PixelCoord) {
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: coord.x,
                    y: coord.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.staging_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(constants::STAGING_BYTES_PER_ROW),
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Map the staging buffer and decode the copied texel.
    ///
    /// Must be called after the encoder holding [`Self::copy_pixel`] was submitted.
    /// Blocks until the GPU is idle.
    pub fn read_pixel(&self, device: &wgpu::Device) -> Result<IdentityPixel, RendererError> {
        let slice = self.staging_buffer.slice(..constants::TEXEL_SIZE);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|_| RendererError::ReadbackChannelClosed)??;

        let texel: [u32; 4] = {
            let data = slice.get_mapped_range();
            bytemuck::pod_read_unaligned(&data[..constants::TEXEL_SIZE as usize])
        };
        self.staging_buffer.unmap();
        Ok(IdentityPixel::from_texel(texel))
    }
}

impl Drop for IdentityFramebuffer {
    fn drop(&mut self) {
        self.texture.destroy();
        self.staging_buffer.destroy();
    }
}

fn create_identity_texture(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Identity Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: constants::COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("Identity Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: constants::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        assert!(validate_size(800, 600, 8192).is_ok());
        assert!(validate_size(8192, 8192, 8192).is_ok());
        assert!(matches!(
            validate_size(0, 600, 8192),
            Err(RendererError::FramebufferIncomplete { width: 0, .. })
        ));
        assert!(validate_size(800, 9000, 8192).is_err());
    }

    #[test]
    fn test_staging_row_fits_texel() {
        assert!(constants::TEXEL_SIZE <= constants::STAGING_BYTES_PER_ROW as u64);
        assert_eq!(
            constants::STAGING_BYTES_PER_ROW % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT,
            0
        );
    }
}
