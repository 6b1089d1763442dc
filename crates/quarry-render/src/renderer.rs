use glam::Mat4;
use wgpu::util::DeviceExt;

use quarry_core::constants::{
    BASE_RED, SENTINEL_GRAY, TIER_BRIGHT, TIER_DARK, TIER_MID, VERTICES_PER_FACE,
};
use quarry_core::types::Vertex;
use quarry_mesh::ChunkMesh;

/// Depth attachment format the chunk pipeline is built against.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// GPU-uploadable camera uniforms. Must match CameraUniforms in chunk.wgsl.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
}

impl From<Mat4> for CameraUniforms {
    fn from(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// GPU-uploadable model uniforms. Must match ModelUniforms in chunk.wgsl.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
}

impl From<Mat4> for ModelUniforms {
    fn from(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Vertex buffer layout for the chunk pipeline: position at location 0,
/// color at location 1, both Float32x3.
pub const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
        },
    ],
};

/// WGSL preamble carrying the shared constants. Prepended to chunk.wgsl
/// so the shader ladder and the Rust stages read the same values.
fn constants_preamble() -> String {
    format!(
        "const VERTICES_PER_FACE: u32 = {}u;\n\
         const TIER_DARK: f32 = {:?};\n\
         const TIER_MID: f32 = {:?};\n\
         const TIER_BRIGHT: f32 = {:?};\n\
         const BASE_RED: vec3<f32> = vec3<f32>({:?}, {:?}, {:?});\n\
         const SENTINEL_GRAY: vec4<f32> = vec4<f32>({:?}, {:?}, {:?}, {:?});\n",
        VERTICES_PER_FACE,
        TIER_DARK,
        TIER_MID,
        TIER_BRIGHT,
        BASE_RED[0],
        BASE_RED[1],
        BASE_RED[2],
        SENTINEL_GRAY[0],
        SENTINEL_GRAY[1],
        SENTINEL_GRAY[2],
        SENTINEL_GRAY[3],
    )
}

/// Mesh buffers uploaded to the device, ready to bind.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    face_code_bind_group: wgpu::BindGroup,
    index_count: u32,
}

impl GpuMesh {
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Fixed-function configuration for the chunk face pipeline. All GPU
/// resources except per-mesh buffers are created at init time.
pub struct ChunkRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_bind_group: wgpu::BindGroup,
    camera_uniform_buffer: wgpu::Buffer,
    model_uniform_buffer: wgpu::Buffer,
    face_code_bgl: wgpu::BindGroupLayout,
}

impl ChunkRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        // -- Shader source composition --
        let chunk_wgsl = include_str!("../../../shaders/render/chunk.wgsl");
        let chunk_source = format!("{}\n{chunk_wgsl}", constants_preamble());

        let chunk_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("chunk-shader"),
            source: wgpu::ShaderSource::Wgsl(chunk_source.into()),
        });

        // -- Uniform buffers --
        let camera_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera-uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let model_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("model-uniforms"),
            size: std::mem::size_of::<ModelUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // -- Bind group layouts --
        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("chunk-uniform-bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let face_code_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("face-code-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("chunk-uniform-bg"),
            layout: &uniform_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: model_uniform_buffer.as_entire_binding(),
                },
            ],
        });

        // -- Render pipeline --
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("chunk-pipeline-layout"),
            bind_group_layouts: &[&uniform_bgl, &face_code_bgl],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("chunk-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &chunk_module,
                entry_point: Some("vs_main"),
                buffers: &[VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Both windings rasterize; visibility comes from the
                // depth test alone.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &chunk_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        log::info!("chunk pipeline created (target {surface_format:?})");

        Self {
            pipeline,
            uniform_bind_group,
            camera_uniform_buffer,
            model_uniform_buffer,
            face_code_bgl,
        }
    }

    /// Upload a chunk mesh: vertex, index, and face-code buffers plus the
    /// bind group exposing the codes to the fragment stage.
    pub fn upload_mesh(&self, device: &wgpu::Device, mesh: &ChunkMesh) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let face_code_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-face-codes"),
            contents: bytemuck::cast_slice(&mesh.face_codes),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let face_code_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("face-code-bg"),
            layout: &self.face_code_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: face_code_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "uploaded mesh: {} vertices, {} indices, {} faces",
            mesh.vertices.len(),
            mesh.indices.len(),
            mesh.face_codes.len()
        );

        GpuMesh {
            vertex_buffer,
            index_buffer,
            face_code_bind_group,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Upload camera uniforms once per frame.
    pub fn update_camera(&self, queue: &wgpu::Queue, uniforms: CameraUniforms) {
        queue.write_buffer(
            &self.camera_uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );
    }

    /// Upload model uniforms once per draw.
    pub fn update_model(&self, queue: &wgpu::Queue, uniforms: ModelUniforms) {
        queue.write_buffer(&self.model_uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Bind and issue the indexed draw for one uploaded mesh.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_bind_group(1, &mesh.face_code_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
