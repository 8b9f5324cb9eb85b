use bytemuck::Zeroable;
use wgpu::util::DeviceExt;
use wgpu::*;

use crate::controller::frame_loop::{FrameLoopContext, NodeUniform};
use crate::view::mesh::{create_cylinder_mesh, create_disc_mesh, MeshBuffer, Vertex};

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

// Shared graphics setup used by native and web
pub struct CameraResources {
    pub camera_buffer: Buffer,
    pub lighting_buffer: Buffer,
    pub bind_group_layout: BindGroupLayout,
    pub camera_bind_group: BindGroup,
}

/// Per-draw transform and color
pub struct NodeResources {
    pub buffer: Buffer,
    pub bind_group: BindGroup,
}

pub fn create_depth_texture(device: &Device, width: u32, height: u32) -> (Texture, TextureView) {
    let depth_texture = device.create_texture(&TextureDescriptor {
        label: Some("depth_texture"),
        size: Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

fn uniform_entry(binding: u32, visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub fn create_camera_resources(device: &Device) -> CameraResources {
    let camera_buffer = device.create_buffer(&BufferDescriptor {
        label: Some("camera_buffer"),
        size: 64,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let lighting_buffer = device.create_buffer(&BufferDescriptor {
        label: Some("lighting_buffer"),
        size: 32,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("camera_bind_group_layout"),
        entries: &[uniform_entry(0, ShaderStages::VERTEX), uniform_entry(1, ShaderStages::FRAGMENT)],
    });

    let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
        label: Some("camera_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
            BindGroupEntry { binding: 1, resource: lighting_buffer.as_entire_binding() },
        ],
    });

    CameraResources { camera_buffer, lighting_buffer, bind_group_layout, camera_bind_group }
}

pub fn create_node_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("node_bind_group_layout"),
        entries: &[uniform_entry(0, ShaderStages::VERTEX_FRAGMENT)],
    })
}

pub fn create_node_resources(device: &Device, layout: &BindGroupLayout, label: &str, initial: &NodeUniform) -> NodeResources {
    let buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(initial),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[BindGroupEntry { binding: 0, resource: buffer.as_entire_binding() }],
    });
    NodeResources { buffer, bind_group }
}

pub fn create_scene_pipeline(
    device: &Device,
    format: TextureFormat,
    camera_layout: &BindGroupLayout,
    node_layout: &BindGroupLayout,
) -> RenderPipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("scene_pipeline_layout"),
        bind_group_layouts: &[camera_layout, node_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState { format, blend: Some(BlendState::ALPHA_BLENDING), write_mask: ColorWrites::ALL })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: Some(Face::Back),
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    })
}

/// GPU-side state for one viewer surface
pub struct RenderState {
    pub format: TextureFormat,
    pub alpha_mode: CompositeAlphaMode,
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,

    pub pipeline: RenderPipeline,
    pub camera: CameraResources,
    pub depth_view: TextureView,

    pub platform_mesh: MeshBuffer,
    pub platform_node: NodeResources,
    pub marker_mesh: MeshBuffer,
    pub marker_node: NodeResources,
    pub show_marker: bool,

    // UI
    pub egui_renderer: egui_wgpu::Renderer,
    pub egui_primitives: Option<Vec<egui::ClippedPrimitive>>,
    pub egui_textures: egui::TexturesDelta,
    pub egui_dpr: f32,
}

impl RenderState {
    /// Build every GPU resource the scene needs and upload the initial uniforms.
    pub fn new(
        device: &Device,
        queue: &Queue,
        config: &SurfaceConfiguration,
        frame: &FrameLoopContext,
    ) -> Self {
        let scene = &frame.config;
        let camera = create_camera_resources(device);
        queue.write_buffer(&camera.camera_buffer, 0, bytemuck::bytes_of(&frame.camera_uniform()));
        queue.write_buffer(&camera.lighting_buffer, 0, bytemuck::bytes_of(&frame.lighting_uniform()));

        let node_layout = create_node_layout(device);
        let pipeline = create_scene_pipeline(device, config.format, &camera.bind_group_layout, &node_layout);
        let (_, depth_view) = create_depth_texture(device, config.width, config.height);

        let platform_mesh = create_cylinder_mesh(scene.platform_radius, scene.platform_height, scene.platform_segments)
            .upload(device, "platform");
        let platform_node = create_node_resources(device, &node_layout, "platform_node", &frame.platform_uniform());
        // unit disc, scaled to the marker radius by its node transform
        let marker_mesh = create_disc_mesh(1.0, 32).upload(device, "marker");
        let marker_node = create_node_resources(device, &node_layout, "marker_node", &NodeUniform::zeroed());

        let [r, g, b] = scene.background;
        let egui_renderer = egui_wgpu::Renderer::new(device, config.format, egui_wgpu::RendererOptions::default());

        Self {
            format: config.format,
            alpha_mode: config.alpha_mode,
            width: config.width,
            height: config.height,
            clear_color: Color { r, g, b, a: 1.0 },
            pipeline,
            camera,
            depth_view,
            platform_mesh,
            platform_node,
            marker_mesh,
            marker_node,
            show_marker: false,
            egui_renderer,
            egui_primitives: None,
            egui_textures: egui::TexturesDelta::default(),
            egui_dpr: 1.0,
        }
    }

    pub fn surface_config(&self) -> SurfaceConfiguration {
        SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: self.format,
            width: self.width,
            height: self.height,
            present_mode: PresentMode::Fifo,
            alpha_mode: self.alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    /// Reconfigure the surface and depth buffer for a new size. Zero sizes are ignored.
    pub fn resize(&mut self, device: &Device, surface: &Surface, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        surface.configure(device, &self.surface_config());
        self.depth_view = create_depth_texture(device, width, height).1;
    }

    pub fn set_ui(&mut self, primitives: Vec<egui::ClippedPrimitive>, textures: egui::TexturesDelta, dpr: f32) {
        self.egui_primitives = Some(primitives);
        self.egui_textures.append(textures);
        self.egui_dpr = dpr;
    }

    pub fn draw_frame(&mut self, device: &Device, queue: &Queue, surface: &Surface) -> Result<(), SurfaceError> {
        let frame = surface.get_current_texture()?;
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor { label: Some("encoder") });

        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations { load: LoadOp::Clear(self.clear_color), store: StoreOp::Store },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations { load: LoadOp::Clear(1.0), store: StoreOp::Store }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_pipeline(&self.pipeline);
            rp.set_bind_group(0, &self.camera.camera_bind_group, &[]);

            let mut draw = |mesh: &MeshBuffer, node: &NodeResources| {
                rp.set_bind_group(1, &node.bind_group, &[]);
                rp.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rp.set_index_buffer(mesh.index_buffer.slice(..), IndexFormat::Uint32);
                rp.draw_indexed(0..mesh.index_count, 0, 0..1);
            };
            draw(&self.platform_mesh, &self.platform_node);
            if self.show_marker {
                draw(&self.marker_mesh, &self.marker_node);
            }
        }

        if let Some(primitives) = self.egui_primitives.take() {
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.width, self.height],
                pixels_per_point: self.egui_dpr,
            };
            let textures = std::mem::take(&mut self.egui_textures);
            for (id, image_delta) in &textures.set {
                self.egui_renderer.update_texture(device, queue, *id, image_delta);
            }
            self.egui_renderer
                .update_buffers(device, queue, &mut encoder, &primitives, &screen_descriptor);

            {
                let egui_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: Operations { load: LoadOp::Load, store: StoreOp::Store },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                self.egui_renderer
                    .render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
            }

            for id in &textures.free {
                self.egui_renderer.free_texture(id);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
