use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

/// Vertex layout shared by every globe layer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Non-indexed triangle list approximating a sphere.
///
/// Triangles do not share vertices so that seam and pole UVs can be fixed
/// per triangle.
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    pub radius: f32,
    pub detail: u32,
    pub vertices: Vec<SphereVertex>,
}

const T: f32 = 1.618_034; // golden ratio

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, T, 0.0],
    [1.0, T, 0.0],
    [-1.0, -T, 0.0],
    [1.0, -T, 0.0],
    [0.0, -1.0, T],
    [0.0, 1.0, T],
    [0.0, -1.0, -T],
    [0.0, 1.0, -T],
    [T, 0.0, -1.0],
    [T, 0.0, 1.0],
    [-T, 0.0, -1.0],
    [-T, 0.0, 1.0],
];

// Counter-clockwise when seen from outside
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

impl SphereGeometry {
    /// Subdivided icosahedron: each face is split into `(detail + 1)^2` triangles
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let positions = subdivide(detail);

        let vertices = positions
            .chunks_exact(3)
            .flat_map(|tri| {
                let uvs = triangle_uvs([tri[0], tri[1], tri[2]]);
                (0..3).map(move |i| SphereVertex {
                    position: (tri[i] * radius).to_array(),
                    normal: tri[i].to_array(),
                    uv: uvs[i].to_array(),
                })
            })
            .collect();

        Self {
            radius,
            detail,
            vertices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[SphereVertex]> {
        self.vertices.chunks_exact(3)
    }
}

/// Unit-sphere positions, three per triangle
fn subdivide(detail: u32) -> Vec<Vec3> {
    let cols = detail as usize + 1;
    let mut out = Vec::with_capacity(20 * cols * cols * 3);

    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| Vec3::from_array(ICOSAHEDRON_VERTICES[i]));

        // rows[i][j]: i steps from edge ab towards c, j steps along the row
        let rows: Vec<Vec<Vec3>> = (0..=cols)
            .map(|i| {
                let t = i as f32 / cols as f32;
                let aj = a.lerp(c, t);
                let bj = b.lerp(c, t);
                let len = cols - i;
                (0..=len)
                    .map(|j| {
                        if len == 0 {
                            aj
                        } else {
                            aj.lerp(bj, j as f32 / len as f32)
                        }
                    })
                    .collect()
            })
            .collect();

        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [rows[i][k + 1], rows[i + 1][k], rows[i][k]]
                } else {
                    [rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]
                };
                out.extend(tri.iter().map(|p| p.normalize()));
            }
        }
    }

    out
}

/// Longitude around +Y, zero facing -X
pub fn azimuth(p: Vec3) -> f32 {
    p.z.atan2(-p.x)
}

/// Latitude measured downwards, -π/2 at the north pole
pub fn inclination(p: Vec3) -> f32 {
    (-p.y).atan2((p.x * p.x + p.z * p.z).sqrt())
}

/// Equirectangular mapping: north pole at v = 0 (top image row)
pub fn equirect_uv(p: Vec3) -> Vec2 {
    Vec2::new(azimuth(p) / TAU + 0.5, inclination(p) / PI + 0.5)
}

const POLE_EPSILON: f32 = 1e-6;
const SEAM_WRAP: f32 = 0.9;

fn triangle_uvs(tri: [Vec3; 3]) -> [Vec2; 3] {
    let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
    let centroid_azimuth = azimuth(centroid);

    let mut uvs = tri.map(equirect_uv);

    for (uv, p) in uvs.iter_mut().zip(tri) {
        // Pole vertices have no longitude of their own
        if p.x.abs() < POLE_EPSILON && p.z.abs() < POLE_EPSILON {
            uv.x = centroid_azimuth / TAU + 0.5;
        }
        if centroid_azimuth < 0.0 && uv.x >= 1.0 {
            uv.x -= 1.0;
        }
    }

    // Triangles straddling the antimeridian wrap their low side past 1.0
    let max_u = uvs.iter().map(|uv| uv.x).fold(f32::MIN, f32::max);
    let min_u = uvs.iter().map(|uv| uv.x).fold(f32::MAX, f32::min);
    if max_u > SEAM_WRAP && min_u < 1.0 - SEAM_WRAP {
        for uv in uvs.iter_mut() {
            if uv.x < 0.2 {
                uv.x += 1.0;
            }
        }
    }

    uvs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_faces_point_outward() {
        for face in ICOSAHEDRON_FACES {
            let [a, b, c] = face.map(|i| Vec3::from_array(ICOSAHEDRON_VERTICES[i]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "face {:?} winds inward", face);
        }
    }

    #[test]
    fn poles_map_to_texture_edges() {
        assert!(equirect_uv(Vec3::Y).y.abs() < 1e-6);
        assert!((equirect_uv(-Vec3::Y).y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn prime_meridian_faces_negative_x() {
        let uv = equirect_uv(Vec3::NEG_X);
        assert!((uv.x - 0.5).abs() < 1e-6);
        assert!((uv.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn detail_zero_is_plain_icosahedron() {
        let geo = SphereGeometry::icosahedron(1.0, 0);
        assert_eq!(geo.triangle_count(), 20);
    }
}
