//! WebGPU binding for the backdrop scene: one vertex buffer and uniform slot
//! per node, three small pipelines, a 4x multisampled color target resolved
//! straight to the (transparent) canvas surface.

use web_sys as web;
use wgpu::util::DeviceExt;

use backdrop_core::{
    LightRig, SceneGeometry, SceneState, CONNECTION_COLOR, MSAA_SAMPLES, PARTICLE_COLOR,
    PARTICLE_OPACITY, PARTICLE_SIZE, SPHERE_COLOR, SPHERE_EMISSIVE, SPHERE_EMISSIVE_INTENSITY,
    SPHERE_OPACITY,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct NodeUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightUniforms {
    ambient: [f32; 4],
    directional_dir: [f32; 4],
    directional_color: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
}

impl LightUniforms {
    fn from_rig(rig: &LightRig) -> Self {
        let [ar, ag, ab] = rig.ambient.color;
        let [dr, dg, db] = rig.directional.color;
        let [pr, pg, pb] = rig.point.color;
        let dir = rig.directional.direction.normalize();
        let pos = rig.point.position;
        Self {
            ambient: [ar, ag, ab, rig.ambient.intensity],
            directional_dir: [dir.x, dir.y, dir.z, rig.directional.intensity],
            directional_color: [dr, dg, db, 0.0],
            point_pos: [pos.x, pos.y, pos.z, rig.point.intensity],
            point_color: [pr, pg, pb, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshVertex {
    pos: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LinkVertex {
    pos: [f32; 3],
    opacity: f32,
}

impl LinkVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];

    fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LinkVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// Billboard corners for one particle quad, in clip-space offset units.
const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const PARTICLE_INSTANCE_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x3];

// Overlapping particles sum brightness instead of occluding.
const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Per-node GPU resources: the immutable vertex data plus one uniform slot.
struct NodeBinding {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    msaa_view: wgpu::TextureView,

    sphere_pipeline: wgpu::RenderPipeline,
    links_pipeline: wgpu::RenderPipeline,
    particles_pipeline: wgpu::RenderPipeline,

    quad_buffer: wgpu::Buffer,
    sphere: NodeBinding,
    links: NodeBinding,
    particles: NodeBinding,

    width: u32,
    height: u32,
}

impl GpuState {
    /// Bind the renderer to the canvas and upload the generated geometry.
    ///
    /// Fails explicitly when the surface cannot yield a rendering context
    /// (no WebGPU adapter/device, e.g. hardware acceleration disabled) so the
    /// host can keep its static background instead of a blank canvas.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        geometry: &SceneGeometry,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU adapter available"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        // the page gradient must show through, so prefer a transparent
        // compositing mode when the surface offers one
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes[0]
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let msaa_view = create_msaa_target(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(backdrop_core::SCENE_WGSL.into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("node_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("node_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let sphere_pipeline = build_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            "sphere_pipeline",
            "vs_sphere",
            "fs_sphere",
            &[MeshVertex::layout()],
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            format,
        );
        let links_pipeline = build_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            "links_pipeline",
            "vs_links",
            "fs_links",
            &[LinkVertex::layout()],
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            format,
        );
        let particles_pipeline = build_pipeline(
            &device,
            &shader,
            &pipeline_layout,
            "particles_pipeline",
            "vs_particles",
            "fs_particles",
            &[
                wgpu::VertexBufferLayout {
                    array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &QUAD_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &PARTICLE_INSTANCE_ATTRS,
                },
            ],
            wgpu::PrimitiveTopology::TriangleList,
            ADDITIVE_BLENDING,
            format,
        );

        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lights"),
            contents: bytemuck::bytes_of(&LightUniforms::from_rig(&LightRig::fixed())),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_quad"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let sphere_vertices: Vec<MeshVertex> = geometry
            .sphere_wireframe
            .iter()
            .map(|p| MeshVertex { pos: p.to_array() })
            .collect();
        let link_vertices: Vec<LinkVertex> = geometry
            .connections
            .iter()
            .flat_map(|c| {
                [
                    LinkVertex {
                        pos: c.start.to_array(),
                        opacity: c.opacity,
                    },
                    LinkVertex {
                        pos: c.end.to_array(),
                        opacity: c.opacity,
                    },
                ]
            })
            .collect();
        let particle_instances: Vec<MeshVertex> = geometry
            .particles
            .iter()
            .map(|p| MeshVertex { pos: p.to_array() })
            .collect();

        let sphere = make_node(
            &device,
            &bgl,
            &light_buffer,
            "sphere",
            bytemuck::cast_slice(&sphere_vertices),
            sphere_vertices.len() as u32,
        );
        let links = make_node(
            &device,
            &bgl,
            &light_buffer,
            "links",
            bytemuck::cast_slice(&link_vertices),
            link_vertices.len() as u32,
        );
        let particles = make_node(
            &device,
            &bgl,
            &light_buffer,
            "particles",
            bytemuck::cast_slice(&particle_instances),
            particle_instances.len() as u32,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            msaa_view,
            sphere_pipeline,
            links_pipeline,
            particles_pipeline,
            quad_buffer,
            sphere,
            links,
            particles,
            width,
            height,
        })
    }

    /// Match the renderer output to the drawing surface. Redundant calls with
    /// the current dimensions are no-ops; zero dimensions are ignored.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.msaa_view = create_msaa_target(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, state: &SceneState) -> Result<(), wgpu::SurfaceError> {
        let view_proj = state.camera.view_proj().to_cols_array_2d();
        let proj = state.camera.projection_matrix();
        // clip-space half-size keeps the billboards at a fixed world size
        // with perspective attenuation after the divide
        let half = 0.5 * PARTICLE_SIZE;
        let particle_params = [half * proj.x_axis.x, half * proj.y_axis.y, 0.0, 0.0];

        let [sr, sg, sb] = SPHERE_COLOR;
        let [er, eg, eb] = SPHERE_EMISSIVE;
        let [lr, lg, lb] = CONNECTION_COLOR;
        let [pr, pg, pb] = PARTICLE_COLOR;
        self.write_node_uniforms(
            &self.sphere,
            NodeUniforms {
                view_proj,
                model: state.sphere.matrix().to_cols_array_2d(),
                color: [sr, sg, sb, SPHERE_OPACITY],
                emissive: [er, eg, eb, SPHERE_EMISSIVE_INTENSITY],
                params: [0.0; 4],
            },
        );
        self.write_node_uniforms(
            &self.links,
            NodeUniforms {
                view_proj,
                model: state.connections.matrix().to_cols_array_2d(),
                color: [lr, lg, lb, 1.0],
                emissive: [0.0; 4],
                params: [0.0; 4],
            },
        );
        self.write_node_uniforms(
            &self.particles,
            NodeUniforms {
                view_proj,
                model: state.particles.matrix().to_cols_array_2d(),
                color: [pr, pg, pb, PARTICLE_OPACITY],
                emissive: [0.0; 4],
                params: particle_params,
            },
        );

        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("backdrop_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("backdrop_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&surface_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.sphere_pipeline);
            rpass.set_bind_group(0, &self.sphere.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
            rpass.draw(0..self.sphere.vertex_count, 0..1);

            rpass.set_pipeline(&self.links_pipeline);
            rpass.set_bind_group(0, &self.links.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.links.vertex_buffer.slice(..));
            rpass.draw(0..self.links.vertex_count, 0..1);

            rpass.set_pipeline(&self.particles_pipeline);
            rpass.set_bind_group(0, &self.particles.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.particles.vertex_buffer.slice(..));
            rpass.draw(
                0..QUAD_CORNERS.len() as u32,
                0..self.particles.vertex_count,
            );
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_node_uniforms(&self, node: &NodeBinding, uniforms: NodeUniforms) {
        self.queue
            .write_buffer(&node.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

fn create_msaa_target(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa_target"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: MSAA_SAMPLES,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

fn make_node(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
    label: &str,
    vertex_bytes: &[u8],
    vertex_count: u32,
) -> NodeBinding {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: vertex_bytes,
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<NodeUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: light_buffer.as_entire_binding(),
            },
        ],
    });
    NodeBinding {
        vertex_buffer,
        vertex_count,
        uniform_buffer,
        bind_group,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    label: &str,
    vs_entry: &str,
    fs_entry: &str,
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: MSAA_SAMPLES,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
