//! GEMM kernel behind `Matrix::dot`.
//!
//! - default: a plain triple loop over row-major buffers
//! - optional: the `matrixmultiply` backend (feature `matrixmultiply`)

/// Computes `c = a · b` where `a` is `(m, k)`, `b` is `(k, n)` and `c` is `(m, n)`,
/// all contiguous row-major. `c` is overwritten.
#[inline]
pub(crate) fn gemm_f32(m: usize, n: usize, k: usize, a: &[f32], b: &[f32], c: &mut [f32]) {
    debug_assert!(m > 0 && n > 0 && k > 0);
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);

    #[cfg(feature = "matrixmultiply")]
    {
        // SAFETY: lengths are checked above and every stride stays inside its buffer.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a.as_ptr(),
                k as isize,
                1,
                b.as_ptr(),
                n as isize,
                1,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc = 0.0_f32;
            for (p, &av) in a_row.iter().enumerate() {
                acc = av.mul_add(b[p * n + j], acc);
            }
            c[i * n + j] = acc;
        }
    }
}
