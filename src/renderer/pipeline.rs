//! WebGPU render pipeline setup
//!
//! One flat-colored triangle list per frame, cleared to the sky color.

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::vertex::{Vertex, colors};

/// Main render state
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Logical canvas size the scene is drawn in
    canvas: Vec2,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        canvas: Vec2,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("flappy-plane-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // No bind groups, so the layout is derived from the shader
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("flat_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(format.into())],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            size: (width, height),
            canvas,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload vertices (in canvas coordinates) and draw them over the sky
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let viewport = Vec2::new(self.size.0 as f32, self.size.1 as f32);
        let ndc: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let p = canvas_to_ndc(Vec2::from(v.position), self.canvas, viewport);
                Vertex::new(p.x, p.y, v.color)
            })
            .collect();

        // Rebuilt every frame; skipped when nothing is drawn
        let vertex_buffer = (!ndc.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("scene_vertices"),
                    contents: bytemuck::cast_slice(&ndc),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let [r, g, b, a] = colors::SKY.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if let Some(buffer) = &vertex_buffer {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..ndc.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

/// Convert canvas coordinates (origin top-left, y down) to normalized device coordinates
///
/// The canvas keeps its aspect ratio inside the viewport; the leftover band
/// (left/right or top/bottom) shows the clear color.
pub fn canvas_to_ndc(point: Vec2, canvas: Vec2, viewport: Vec2) -> Vec2 {
    let canvas_aspect = canvas.x / canvas.y;
    let viewport_aspect = viewport.x / viewport.y;

    let scale = if viewport_aspect > canvas_aspect {
        // Wider than the canvas: pillarbox
        Vec2::new(canvas_aspect / viewport_aspect, 1.0)
    } else {
        // Taller than the canvas: letterbox
        Vec2::new(1.0, viewport_aspect / canvas_aspect)
    };

    Vec2::new(
        (point.x / canvas.x * 2.0 - 1.0) * scale.x,
        (1.0 - point.y / canvas.y * 2.0) * scale.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(400.0, 600.0);

    #[test]
    fn test_matching_aspect_fills_viewport() {
        let viewport = Vec2::new(800.0, 1200.0);
        assert_eq!(canvas_to_ndc(Vec2::ZERO, CANVAS, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(canvas_to_ndc(CANVAS, CANVAS, viewport), Vec2::new(1.0, -1.0));
        assert_eq!(
            canvas_to_ndc(Vec2::new(200.0, 300.0), CANVAS, viewport),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_wide_viewport_pillarboxes() {
        // Canvas aspect 2/3 in a square viewport: x is squeezed to 2/3
        let p = canvas_to_ndc(CANVAS, CANVAS, Vec2::new(600.0, 600.0));
        assert!((p.x - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(p.y, -1.0);
    }

    #[test]
    fn test_tall_viewport_letterboxes() {
        // Canvas aspect 2/3 in a 1:2 viewport: y is squeezed to 3/4
        let p = canvas_to_ndc(Vec2::ZERO, CANVAS, Vec2::new(300.0, 600.0));
        assert_eq!(p.x, -1.0);
        assert!((p.y - 0.75).abs() < 1e-6);
    }
}
