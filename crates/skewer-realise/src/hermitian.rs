//! Hermitian symmetrisation of Fourier amplitudes.
//!
//! A real configuration-space field has `F(-k) = conj(F(k))`. On a
//! discrete grid `-k` of index `i` is `(N - i) mod N` on every axis; even
//! axes have a second self-reflected index at the Nyquist plane.

use num_complex::Complex64;
use skewer_coords::reflect_index;
use skewer_core::ComplexField;

/// Return a Hermitian copy of `field`.
///
/// For each pair of point-reflected voxels, the member with the lower flat
/// index keeps its amplitude and its partner becomes the conjugate.
/// Self-reflected voxels (origin, and Nyquist planes of even axes) keep
/// only their real part.
pub fn make_hermitian(field: &ComplexField) -> ComplexField {
    let (nx, ny, nz) = field.dim();
    let flat = |i: usize, j: usize, l: usize| (i * ny + j) * nz + l;
    let mut out = field.clone();
    for ((i, j, l), v) in field.indexed_iter() {
        let (ri, rj, rl) = (reflect_index(i, nx), reflect_index(j, ny), reflect_index(l, nz));
        let here = flat(i, j, l);
        let there = flat(ri, rj, rl);
        if here == there {
            out[[i, j, l]] = Complex64::new(v.re, 0.0);
        } else if here < there {
            out[[ri, rj, rl]] = v.conj();
        }
    }
    out
}

/// Whether `field[reflect(c)] == conj(field[c])` for every voxel, within
/// `tol` in absolute value.
pub fn is_hermitian(field: &ComplexField, tol: f64) -> bool {
    let (nx, ny, nz) = field.dim();
    field.indexed_iter().all(|((i, j, l), v)| {
        let partner = field[[reflect_index(i, nx), reflect_index(j, ny), reflect_index(l, nz)]];
        (partner - v.conj()).norm() <= tol
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use proptest::prelude::*;

    fn ramp(shape: (usize, usize, usize)) -> ComplexField {
        Array3::from_shape_fn(shape, |(i, j, l)| {
            Complex64::new((i * 31 + j * 7 + l) as f64, 1.0 + (i + 2 * j + 3 * l) as f64)
        })
    }

    #[test]
    fn even_axes_self_reflected_voxels_are_real() {
        let h = make_hermitian(&ramp((4, 4, 4)));
        for &idx in &[[0, 0, 0], [2, 0, 0], [0, 2, 0], [0, 0, 2], [2, 2, 2], [2, 0, 2]] {
            assert_eq!(h[idx].im, 0.0, "voxel {idx:?}");
        }
        assert!(is_hermitian(&h, 0.0));
    }

    #[test]
    fn odd_axes_only_origin_is_self_reflected() {
        let h = make_hermitian(&ramp((3, 5, 3)));
        let real_count = h.iter().filter(|v| v.im == 0.0).count();
        assert_eq!(real_count, 1);
        assert!(is_hermitian(&h, 0.0));
    }

    #[test]
    fn lower_index_member_is_kept() {
        let field = ramp((4, 3, 2));
        let h = make_hermitian(&field);
        assert_eq!(h[[1, 1, 1]], field[[1, 1, 1]]);
        assert_eq!(h[[3, 2, 1]], field[[1, 1, 1]].conj());
    }

    #[test]
    fn already_hermitian_is_fixed_point() {
        let h = make_hermitian(&ramp((4, 5, 6)));
        assert_eq!(make_hermitian(&h), h);
    }

    #[test]
    fn ramp_is_not_hermitian() {
        assert!(!is_hermitian(&ramp((2, 2, 2)), 1e-12));
    }

    proptest! {
        #[test]
        fn any_shape_becomes_hermitian(nx in 1usize..7, ny in 1usize..7, nz in 1usize..7) {
            let h = make_hermitian(&ramp((nx, ny, nz)));
            prop_assert!(is_hermitian(&h, 0.0));
        }
    }
}
