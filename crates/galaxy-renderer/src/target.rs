//! The accumulation texture the canvas paints into.
//!
//! Unlike a swapchain image it survives between frames, which is what lets the translucent
//! fade rectangle leave trails behind moving particles.

/// Storage format. Blending happens on the raw sRGB-encoded bytes, as in a browser canvas.
pub const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// View format used when presenting to an sRGB surface, so the bytes are decoded once
pub const CANVAS_SRGB_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub(crate) struct CanvasTarget {
    _texture: wgpu::Texture,
    /// Render attachment view, raw storage format
    pub(crate) view: wgpu::TextureView,
    /// View sampled by the present pass
    pub(crate) sample_view: wgpu::TextureView,
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Set until the first paint after (re)creation has cleared the texture to black
    pub(crate) needs_clear: bool,
}

impl CanvasTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, srgb_surface: bool) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Galaxy Canvas Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[CANVAS_SRGB_FORMAT],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sample_view = if srgb_surface {
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("Galaxy Canvas sRGB View"),
                format: Some(CANVAS_SRGB_FORMAT),
                ..Default::default()
            })
        } else {
            texture.create_view(&wgpu::TextureViewDescriptor::default())
        };

        Self {
            _texture: texture,
            view,
            sample_view,
            width,
            height,
            needs_clear: true,
        }
    }

    pub(crate) fn load_op(&self) -> wgpu::LoadOp<wgpu::Color> {
        if self.needs_clear {
            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
        } else {
            wgpu::LoadOp::Load
        }
    }
}
