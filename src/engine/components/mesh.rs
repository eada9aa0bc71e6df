use std::f32::consts::PI;

/// Shape parameters for [`Mesh::torus`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Subdivisions around the main axis.
    pub slices: u32,
    /// Subdivisions around the tube's cross-section.
    pub stacks: u32,
}

impl TorusParams {
    pub fn new(outer_radius: f32, inner_radius: f32, slices: u32, stacks: u32) -> Self {
        Self { outer_radius, inner_radius, slices, stacks }
    }

    /// Distance from the main axis to the center of the tube.
    pub fn center_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    pub fn tube_radius(&self) -> f32 {
        self.outer_radius - self.center_radius()
    }
}

impl Default for TorusParams {
    fn default() -> Self {
        Self::new(0.5, 0.5 / 3.0, 32, 16)
    }
}

/// CPU-side mesh data. Attribute vectors are index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Samples a torus around the Z axis.
    ///
    /// Produces `(slices + 1) * (stacks + 1)` vertices: the first and last
    /// column (and row) coincide in space so texture coordinates can run the
    /// full `[0, 1]` range without wrapping. Triangles wind counter-clockwise
    /// when seen from outside the surface.
    pub fn torus(params: &TorusParams) -> Self {
        let slices = params.slices;
        let stacks = params.stacks;
        let vertex_count = (slices as usize + 1) * (stacks as usize + 1);

        let du = (2.0 * PI) / slices as f32;
        let dv = (2.0 * PI) / stacks as f32;
        let center_radius = params.center_radius();
        let tube_radius = params.tube_radius();

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut tex_coords = Vec::with_capacity(vertex_count);

        for j in 0..=stacks {
            let v = -PI + j as f32 * dv;
            let (sin_v, cos_v) = v.sin_cos();
            for i in 0..=slices {
                let u = i as f32 * du;
                let (sin_u, cos_u) = u.sin_cos();
                let ring = center_radius + tube_radius * cos_v;

                positions.push([cos_u * ring, sin_u * ring, sin_v * tube_radius]);
                normals.push([cos_u * cos_v, sin_u * cos_v, sin_v]);
                tex_coords.push([i as f32 / slices as f32, j as f32 / stacks as f32]);
            }
        }

        let mut triangles = Vec::with_capacity(2 * (slices as usize) * (stacks as usize));
        for j in 0..stacks {
            let row1 = j * (slices + 1);
            let row2 = (j + 1) * (slices + 1);
            for i in 0..slices {
                triangles.push([row1 + i, row2 + i + 1, row2 + i]);
                triangles.push([row1 + i, row1 + i + 1, row2 + i + 1]);
            }
        }

        Self { positions, normals, tex_coords, triangles }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Triangle indices as one flat list, ready for an element buffer.
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::utils::math::{ vec3_cross, vec3_dot, vec3_length, vec3_sub };
    use approx::assert_relative_eq;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn params_from(outer: u8, inner: u8, slices: u8, stacks: u8) -> TorusParams {
        let outer_radius = 1.0 + (outer as f32) / 16.0;
        let inner_radius = outer_radius * ((inner % 100) as f32) / 100.0;
        TorusParams::new(outer_radius, inner_radius, 3 + (slices as u32 % 62), 3 + (stacks as u32 % 62))
    }

    #[quickcheck]
    fn counts_follow_the_grid(outer: u8, inner: u8, slices: u8, stacks: u8) -> bool {
        let p = params_from(outer, inner, slices, stacks);
        let mesh = Mesh::torus(&p);
        let vertices = ((p.slices + 1) * (p.stacks + 1)) as usize;
        mesh.vertex_count() == vertices &&
            mesh.normals.len() == vertices &&
            mesh.tex_coords.len() == vertices &&
            mesh.index_count() == (6 * p.slices * p.stacks) as usize &&
            mesh.indices().len() == mesh.index_count()
    }

    #[quickcheck]
    fn normals_are_unit_length(outer: u8, inner: u8, slices: u8, stacks: u8) -> bool {
        let mesh = Mesh::torus(&params_from(outer, inner, slices, stacks));
        mesh.normals.iter().all(|n| (vec3_length(*n) - 1.0).abs() < 1e-5)
    }

    #[quickcheck]
    fn indices_stay_in_range(outer: u8, inner: u8, slices: u8, stacks: u8) -> bool {
        let mesh = Mesh::torus(&params_from(outer, inner, slices, stacks));
        let count = mesh.vertex_count() as u32;
        mesh.indices().iter().all(|&i| i < count)
    }

    #[quickcheck]
    fn triangles_face_outward(outer: u8, inner: u8, slices: u8, stacks: u8) -> TestResult {
        let p = params_from(outer, inner, slices, stacks);
        // A zero inner radius pinches the inner equator onto the axis.
        if p.tube_radius() < 1e-3 || p.inner_radius < 0.05 {
            return TestResult::discard();
        }
        let mesh = Mesh::torus(&p);
        let outward = mesh.triangles.iter().all(|&[a, b, c]| {
            let (pa, pb, pc) = (
                mesh.positions[a as usize],
                mesh.positions[b as usize],
                mesh.positions[c as usize],
            );
            let face = vec3_cross(vec3_sub(pb, pa), vec3_sub(pc, pa));
            let n = mesh.normals[a as usize];
            let m = mesh.normals[b as usize];
            let averaged = [n[0] + m[0], n[1] + m[1], n[2] + m[2]];
            vec3_dot(face, averaged) > 0.0
        });
        TestResult::from_bool(outward)
    }

    #[test]
    fn seam_tex_coords_are_exact() {
        let p = TorusParams::new(3.0, 1.0, 64, 32);
        let mesh = Mesh::torus(&p);
        let row = (p.slices + 1) as usize;
        for j in 0..=p.stacks as usize {
            let t = j as f32 / p.stacks as f32;
            assert_eq!(mesh.tex_coords[j * row], [0.0, t]);
            assert_eq!(mesh.tex_coords[j * row + p.slices as usize], [1.0, t]);
        }
    }

    #[test]
    fn seam_positions_coincide() {
        let p = TorusParams::new(3.0, 1.0, 16, 8);
        let mesh = Mesh::torus(&p);
        let row = (p.slices + 1) as usize;
        for j in 0..=p.stacks as usize {
            let first = mesh.positions[j * row];
            let last = mesh.positions[j * row + p.slices as usize];
            for k in 0..3 {
                assert_relative_eq!(first[k], last[k], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn outer_equator_sits_on_outer_radius() {
        let p = TorusParams::new(3.0, 1.0, 64, 32);
        assert_relative_eq!(p.center_radius(), 2.0);
        assert_relative_eq!(p.tube_radius(), 1.0);

        let mesh = Mesh::torus(&p);
        let row = (p.slices + 1) as usize;
        let [x, y, z] = mesh.positions[(p.stacks as usize / 2) * row];
        assert_relative_eq!((x * x + y * y).sqrt(), 3.0, epsilon = 1e-5);
        assert_relative_eq!(z, 0.0, epsilon = 1e-6);
        assert_eq!(mesh.normals[(p.stacks as usize / 2) * row], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn first_cell_winding() {
        let mesh = Mesh::torus(&TorusParams::new(3.0, 1.0, 4, 3));
        assert_eq!(mesh.triangles[0], [0, 6, 5]);
        assert_eq!(mesh.triangles[1], [0, 1, 6]);
    }

    #[test]
    fn default_params_match_generator_defaults() {
        let p = TorusParams::default();
        assert_relative_eq!(p.inner_radius, p.outer_radius / 3.0);
        assert_eq!((p.slices, p.stacks), (32, 16));
    }

    #[test]
    fn generation_is_deterministic() {
        let p = TorusParams::new(2.5, 0.5, 12, 7);
        assert_eq!(Mesh::torus(&p), Mesh::torus(&p));
    }
}
