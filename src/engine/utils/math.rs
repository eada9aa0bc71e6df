//! Row-major matrix helpers.
//!
//! Matrices are stored row by row and uploaded with `transpose = true`, so
//! `m[row * 4 + col]` reads the way the math is written on paper.

pub type Mat4x4 = [f32; 16];
pub type Mat3x3 = [f32; 9];
pub type Vec3 = [f32; 3];

pub fn mat4x4_identity() -> Mat4x4 {
    [
      1.0, 0.0, 0.0, 0.0,
      0.0, 1.0, 0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat3x3_identity() -> Mat3x3 {
    [
      1.0, 0.0, 0.0,
      0.0, 1.0, 0.0,
      0.0, 0.0, 1.0
    ]
}

/// Right-handed rotation about +Y.
pub fn mat4x4_rot_y(angle: f32) -> Mat4x4 {
    let c = angle.cos();
    let s = angle.sin();

    [
       c,  0.0,  s,  0.0,
      0.0, 1.0, 0.0, 0.0,
      -s,  0.0,  c,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn vec4_dot(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

pub fn mat4x4_row(mat: &Mat4x4, row: usize) -> [f32; 4] {
    let start_idx = row * 4;
    [mat[start_idx], mat[start_idx + 1], mat[start_idx + 2], mat[start_idx + 3]]
}

pub fn mat4x4_col(mat: &Mat4x4, col: usize) -> [f32; 4] {
    [mat[col], mat[4 + col], mat[8 + col], mat[12 + col]]
}

pub fn mat4x4_mul(a: Mat4x4, b: Mat4x4) -> Mat4x4 {
    let mut ret = [0.0; 16];
    for (i, out) in ret.iter_mut().enumerate() {
        let row = i / 4;
        let col = i % 4;
        *out = vec4_dot(mat4x4_row(&a, row), mat4x4_col(&b, col));
    }
    ret
}

pub fn mat4x4_perspective(fov_y_radians: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4x4 {
    let f = 1.0 / (fov_y_radians * 0.5).tan();
    let range_inv = 1.0 / (near - far);

    [
        f / aspect_ratio, 0.0, 0.0,                          0.0,
        0.0,              f,   0.0,                          0.0,
        0.0,              0.0, (near + far) * range_inv,     (2.0 * near * far) * range_inv,
        0.0,              0.0, -1.0,                         0.0,
    ]
}

pub fn vec3_sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn vec3_dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn vec3_cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn vec3_length(v: Vec3) -> f32 {
    vec3_dot(v, v).sqrt()
}

/// Returns `v` unchanged when it has zero length.
pub fn vec3_normalize(v: Vec3) -> Vec3 {
    let len = vec3_length(v);
    if len == 0.0 {
        return v;
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// View matrix looking from `eye` towards `center`.
pub fn mat4x4_look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4x4 {
    let forward = vec3_normalize(vec3_sub(center, eye));
    let side = vec3_normalize(vec3_cross(forward, up));
    let up = vec3_cross(side, forward);

    [
        side[0],     side[1],     side[2],     -vec3_dot(side, eye),
        up[0],       up[1],       up[2],       -vec3_dot(up, eye),
        -forward[0], -forward[1], -forward[2], vec3_dot(forward, eye),
        0.0,         0.0,         0.0,         1.0,
    ]
}

/// Inverse-transpose of the upper-left 3x3 block, used to carry normals into
/// eye space. `None` when the block is singular.
pub fn mat3x3_normal_from_mat4x4(m: &Mat4x4) -> Option<Mat3x3> {
    let (a00, a01, a02) = (m[0], m[1], m[2]);
    let (a10, a11, a12) = (m[4], m[5], m[6]);
    let (a20, a21, a22) = (m[8], m[9], m[10]);

    // Cofactor matrix; divided by the determinant it is the inverse transpose.
    let c00 = a11 * a22 - a12 * a21;
    let c01 = a12 * a20 - a10 * a22;
    let c02 = a10 * a21 - a11 * a20;
    let c10 = a02 * a21 - a01 * a22;
    let c11 = a00 * a22 - a02 * a20;
    let c12 = a01 * a20 - a00 * a21;
    let c20 = a01 * a12 - a02 * a11;
    let c21 = a02 * a10 - a00 * a12;
    let c22 = a00 * a11 - a01 * a10;

    let det = a00 * c00 + a01 * c01 + a02 * c02;
    if det.abs() <= f32::EPSILON {
        return None;
    }
    let inv = 1.0 / det;

    Some([
        c00 * inv, c01 * inv, c02 * inv,
        c10 * inv, c11 * inv, c12 * inv,
        c20 * inv, c21 * inv, c22 * inv,
    ])
}

pub fn mat4x4_transform_point(m: &Mat4x4, p: Vec3) -> Vec3 {
    let v = [p[0], p[1], p[2], 1.0];
    [
        vec4_dot(mat4x4_row(m, 0), v),
        vec4_dot(mat4x4_row(m, 1), v),
        vec4_dot(mat4x4_row(m, 2), v),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_is_neutral_for_mul() {
        let m = mat4x4_rot_y(0.7);
        assert_eq!(mat4x4_mul(mat4x4_identity(), m), m);
        assert_eq!(mat4x4_mul(m, mat4x4_identity()), m);
    }

    #[test]
    fn rot_y_quarter_turn_maps_x_to_minus_z() {
        let p = mat4x4_transform_point(&mat4x4_rot_y(FRAC_PI_2), [1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(p[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(p[2], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let view = mat4x4_look_at([0.0, 0.0, 10.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let eye = mat4x4_transform_point(&view, [0.0, 0.0, 10.0]);
        let target = mat4x4_transform_point(&view, [0.0, 0.0, 0.0]);
        for c in eye {
            assert_relative_eq!(c, 0.0, epsilon = 1e-6);
        }
        // The target sits straight ahead, down -Z in eye space.
        assert_relative_eq!(target[2], -10.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let p = mat4x4_perspective(1.0, 1.5, 0.1, 20.0);
        let clip = [
            vec4_dot(mat4x4_row(&p, 2), [0.0, 0.0, -0.1, 1.0]),
            vec4_dot(mat4x4_row(&p, 3), [0.0, 0.0, -0.1, 1.0]),
        ];
        assert_relative_eq!(clip[0] / clip[1], -1.0, epsilon = 1e-5);
    }

    #[test]
    fn normal_matrix_of_rotation_is_the_rotation() {
        let m = mat4x4_mul(
            mat4x4_look_at([0.0, 0.0, 10.0], [0.0; 3], [0.0, 1.0, 0.0]),
            mat4x4_rot_y(0.3),
        );
        let n = mat3x3_normal_from_mat4x4(&m).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(n[row * 3 + col], m[row * 4 + col], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let mut m = mat4x4_identity();
        m[0] = 2.0;
        let n = mat3x3_normal_from_mat4x4(&m).unwrap();
        assert_relative_eq!(n[0], 0.5);
        assert_relative_eq!(n[4], 1.0);
    }

    #[test]
    fn singular_matrix_has_no_normal_matrix() {
        let mut m = mat4x4_identity();
        m[10] = 0.0;
        assert!(mat3x3_normal_from_mat4x4(&m).is_none());
    }
}
