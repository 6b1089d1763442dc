//! Minimal CPU rasterizer that executes the core shading stages under the
//! GPU's execution model: one vertex-stage call per index value, one
//! fragment-stage call per covered pixel, no shared mutable state between
//! invocations. Used to verify the pipeline semantics without a device.

use glam::{Mat4, Vec2, Vec3};

use quarry_core::stage::{shade_fragment, transform_vertex, FragmentInput, VertexInput, VertexOutput};
use quarry_core::types::Flat;
use quarry_mesh::ChunkMesh;

use crate::framebuffer::Framebuffer;

#[derive(Clone, Copy)]
struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    color: Vec3,
}

/// Perspective divide and viewport map. None when the vertex sits on or
/// behind the camera plane; such triangles are skipped, not clipped.
fn to_screen(out: &VertexOutput, width: u32, height: u32) -> Option<ScreenVertex> {
    let clip = out.clip_position;
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(ScreenVertex {
        pos: Vec2::new(
            (ndc.x + 1.0) * 0.5 * width as f32,
            (1.0 - ndc.y) * 0.5 * height as f32,
        ),
        depth: ndc.z,
        color: out.color,
    })
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Walk the triangle's bounding box and emit one fragment per covered
/// pixel center. Color interpolates in screen-space barycentrics; the
/// face slot is the provoking value, identical for every fragment.
fn rasterize_triangle(
    width: u32,
    height: u32,
    tri: &[ScreenVertex; 3],
    face_slot: Flat<u32>,
    emit: &mut impl FnMut(u32, u32, f32, FragmentInput),
) {
    let area = edge(tri[0].pos, tri[1].pos, tri[2].pos);
    if area == 0.0 {
        return;
    }

    let min_x = tri.iter().map(|v| v.pos.x).fold(f32::INFINITY, f32::min);
    let max_x = tri.iter().map(|v| v.pos.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = tri.iter().map(|v| v.pos.y).fold(f32::INFINITY, f32::min);
    let max_y = tri.iter().map(|v| v.pos.y).fold(f32::NEG_INFINITY, f32::max);

    let x0 = (min_x.floor().max(0.0)) as u32;
    let y0 = (min_y.floor().max(0.0)) as u32;
    let x1 = (max_x.ceil().min(width as f32 - 1.0)).max(0.0) as u32;
    let y1 = (max_y.ceil().min(height as f32 - 1.0)).max(0.0) as u32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(tri[1].pos, tri[2].pos, p);
            let w1 = edge(tri[2].pos, tri[0].pos, p);
            let w2 = edge(tri[0].pos, tri[1].pos, p);

            // Both windings rasterize; culling stays disabled.
            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if !inside {
                continue;
            }

            let b0 = w0 / area;
            let b1 = w1 / area;
            let b2 = w2 / area;
            let depth = b0 * tri[0].depth + b1 * tri[1].depth + b2 * tri[2].depth;
            let color = b0 * tri[0].color + b1 * tri[1].color + b2 * tri[2].color;
            emit(
                x,
                y,
                depth,
                FragmentInput {
                    color,
                    face_slot,
                },
            );
        }
    }
}

/// Draw an indexed mesh. Mirrors one wgpu draw_indexed call: the vertex
/// stage runs per index value, the flat face slot comes from the first
/// vertex of each triangle, and fragments depth-test with Less.
pub fn draw_mesh(fb: &mut Framebuffer, mesh: &ChunkMesh, camera: Mat4, model: Mat4) {
    let mut skipped = 0usize;
    for tri_indices in mesh.indices.chunks_exact(3) {
        let outputs: Vec<VertexOutput> = tri_indices
            .iter()
            .map(|&i| {
                let v = &mesh.vertices[i as usize];
                transform_vertex(
                    &VertexInput {
                        position: Vec3::from(v.position),
                        color: Vec3::from(v.color),
                        vertex_index: i,
                    },
                    camera,
                    model,
                )
            })
            .collect();

        let face_slot = outputs[0].face_slot;

        let screen: Option<Vec<ScreenVertex>> = outputs
            .iter()
            .map(|o| to_screen(o, fb.width, fb.height))
            .collect();
        let Some(screen) = screen else {
            skipped += 1;
            continue;
        };
        let tri = [screen[0], screen[1], screen[2]];

        rasterize_triangle(fb.width, fb.height, &tri, face_slot, &mut |x, y, depth, frag| {
            let color = shade_fragment(&frag, &mesh.face_codes);
            fb.write(x, y, depth, color);
        });
    }
    if skipped > 0 {
        log::trace!("skipped {skipped} triangles at or behind the camera plane");
    }
}
