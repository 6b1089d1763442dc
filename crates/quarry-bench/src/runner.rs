use std::time::Instant;

use glam::Mat4;
use quarry_core::QuarryError;
use quarry_mesh::mesh_chunk;
use quarry_render::{CameraUniforms, ChunkRenderer, ModelUniforms, DEPTH_FORMAT};

use crate::scenes::SceneConfig;

const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const BYTES_PER_PIXEL: u32 = 4;
const CHANNEL_TOLERANCE: u8 = 2;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Per-tier pixel counts read back from the final frame.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PixelTally {
    pub dark: u32,
    pub mid: u32,
    pub bright: u32,
    pub sentinel: u32,
    pub background: u32,
    pub other: u32,
}

impl PixelTally {
    pub fn shaded(&self) -> u32 {
        self.dark + self.mid + self.bright
    }
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub face_count: u32,
    pub solid_blocks: u32,
    pub frame_count: u32,
    pub timings: TimingSeries,
    pub tally: PixelTally,
}

/// Runs benchmarks on a native GPU with an offscreen target.
pub struct BenchmarkRunner {
    device: wgpu::Device,
    queue: wgpu::Queue,
    frame_count: u32,
    width: u32,
    height: u32,
}

impl BenchmarkRunner {
    /// Initialize wgpu natively. Blocks on async adapter request.
    pub fn new(frame_count: u32, width: u32, height: u32) -> Result<Self, QuarryError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| QuarryError::AdapterNotFound("no suitable GPU adapter".into()))?;

        log::info!("Benchmark adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("bench-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .map_err(|e| QuarryError::DeviceRequestFailed(e.to_string()))?;

        Ok(Self {
            device,
            queue,
            frame_count,
            width,
            height,
        })
    }

    /// Run a single benchmark scene and return timing plus shading results.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<BenchmarkResult, QuarryError> {
        let chunk = (config.build)();
        let mesh = mesh_chunk(&chunk);
        log::info!(
            "Running scene '{}' ({} faces, {} solid blocks)...",
            config.name,
            mesh.face_count(),
            chunk.solid_count()
        );

        let renderer = ChunkRenderer::new(&self.device, COLOR_FORMAT);
        let gpu_mesh = renderer.upload_mesh(&self.device, &mesh);

        let camera = config.camera();
        let view_proj = camera.view_proj(self.width as f32, self.height as f32);
        renderer.update_camera(&self.queue, CameraUniforms::from(view_proj));
        renderer.update_model(&self.queue, ModelUniforms::from(Mat4::IDENTITY));

        let color_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("bench-color"),
            size: wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("bench-depth"),
            size: wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut frame_times = Vec::with_capacity(self.frame_count as usize);

        for _ in 0..self.frame_count {
            let frame_start = Instant::now();

            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("bench-encoder"),
                });

            {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("bench-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &color_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

                renderer.render(&mut pass, &gpu_mesh);
            }

            self.queue.submit(std::iter::once(encoder.finish()));
            self.device.poll(wgpu::Maintain::Wait);

            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);
        }

        let pixels = self.read_back(&color_texture)?;
        let tally = tally_pixels(&pixels);

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, shaded pixels={}",
            timings.mean_ms,
            timings.p95_ms,
            tally.shaded()
        );

        Ok(BenchmarkResult {
            scene_name: config.name.to_string(),
            face_count: mesh.face_count() as u32,
            solid_blocks: chunk.solid_count() as u32,
            frame_count: self.frame_count,
            timings,
            tally,
        })
    }

    /// Copy the color target into a staging buffer and read it on the CPU.
    /// Row padding required by the 256-byte copy alignment is stripped here.
    fn read_back(&self, texture: &wgpu::Texture) -> Result<Vec<[u8; 4]>, QuarryError> {
        let unpadded_bytes_per_row = self.width * BYTES_PER_PIXEL;
        let padded = padded_bytes_per_row(unpadded_bytes_per_row);

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bench-readback"),
            size: (padded * self.height) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("bench-readback-encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| QuarryError::ReadbackFailed(e.to_string()))?
            .map_err(|e| QuarryError::ReadbackFailed(e.to_string()))?;

        let data = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((self.width * self.height) as usize);
        for row in 0..self.height {
            let start = (row * padded) as usize;
            let end = start + unpadded_bytes_per_row as usize;
            pixels.extend_from_slice(bytemuck::cast_slice(&data[start..end]));
        }
        drop(data);
        staging.unmap();

        Ok(pixels)
    }
}

/// Round a row byte count up to the copy alignment wgpu requires.
pub fn padded_bytes_per_row(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (unpadded + align - 1) / align * align
}

/// What a read-back pixel resolved to after shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    Dark,
    Mid,
    Bright,
    Sentinel,
    Background,
    Other,
}

/// Classify an Rgba8Unorm pixel against the shading ladder. Channel values
/// carry quantization error from the float-to-byte conversion, so each
/// reference value gets a small tolerance.
pub fn classify_pixel(px: [u8; 4]) -> PixelClass {
    let near = |a: u8, b: u8| a.abs_diff(b) <= CHANNEL_TOLERANCE;
    let [r, g, b, _] = px;

    if near(r, 0) && near(g, 0) && near(b, 0) {
        return PixelClass::Background;
    }
    if near(g, 0) && near(b, 0) {
        if near(r, 77) {
            return PixelClass::Dark;
        }
        if near(r, 128) {
            return PixelClass::Mid;
        }
        if near(r, 191) {
            return PixelClass::Bright;
        }
    }
    if near(r, 128) && near(g, 128) && near(b, 128) {
        return PixelClass::Sentinel;
    }
    PixelClass::Other
}

pub fn tally_pixels(pixels: &[[u8; 4]]) -> PixelTally {
    let mut tally = PixelTally::default();
    for &px in pixels {
        match classify_pixel(px) {
            PixelClass::Dark => tally.dark += 1,
            PixelClass::Mid => tally.mid += 1,
            PixelClass::Bright => tally.bright += 1,
            PixelClass::Sentinel => tally.sentinel += 1,
            PixelClass::Background => tally.background += 1,
            PixelClass::Other => tally.other += 1,
        }
    }
    tally
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
