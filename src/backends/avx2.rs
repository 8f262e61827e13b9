//! AVX2 backend implementation (x86_64 advanced SIMD)
//!
//! This backend uses AVX2 intrinsics for 256-bit SIMD operations with FMA.
//! AVX2 is available on Intel Haswell (2013+) and AMD Excavator (2015+) CPUs.
//!
//! # Performance
//!
//! Expected speedup: 4x for operations on f64 vectors (4 elements per register)
//! FMA provides additional speedup for dot product operations.
//!
//! # Safety
//!
//! All AVX2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::VectorBackend;

/// AVX2 backend (256-bit SIMD for x86_64)
pub struct Avx2Backend;

/// Horizontal sum of the four f64 lanes of a 256-bit register
#[target_feature(enable = "avx2")]
unsafe fn horizontal_sum(acc: __m256d) -> f64 {
    let high = _mm256_extractf128_pd(acc, 1);
    let low = _mm256_castpd256_pd128(acc);
    let sum2 = _mm_add_pd(low, high);
    let hi64 = _mm_unpackhi_pd(sum2, sum2);
    _mm_cvtsd_f64(_mm_add_sd(sum2, hi64))
}

impl VectorBackend for Avx2Backend {
    #[target_feature(enable = "avx2")]
    unsafe fn add(a: &[f64], b: &[f64], result: &mut [f64]) {
        let len = a.len();
        let mut i = 0;

        // Process 4 elements at a time using AVX2 (256-bit = 4 x f64)
        while i + 4 <= len {
            let va = _mm256_loadu_pd(a.as_ptr().add(i));
            let vb = _mm256_loadu_pd(b.as_ptr().add(i));

            let vresult = _mm256_add_pd(va, vb);

            _mm256_storeu_pd(result.as_mut_ptr().add(i), vresult);

            i += 4;
        }

        // Handle remaining elements with scalar code
        for j in i..len {
            result[j] = a[j] + b[j];
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn accumulate(target: &mut [f64], src: &[f64]) {
        let len = src.len();
        let mut i = 0;

        while i + 4 <= len {
            let vt = _mm256_loadu_pd(target.as_ptr().add(i));
            let vs = _mm256_loadu_pd(src.as_ptr().add(i));

            let vresult = _mm256_add_pd(vt, vs);

            _mm256_storeu_pd(target.as_mut_ptr().add(i), vresult);

            i += 4;
        }

        for j in i..len {
            target[j] += src[j];
        }
    }

    #[target_feature(enable = "avx2")]
    unsafe fn scale(a: &[f64], k: f64, result: &mut [f64]) {
        let len = a.len();
        let mut i = 0;

        // Broadcast k to all 4 lanes
        let vk = _mm256_set1_pd(k);

        while i + 4 <= len {
            let va = _mm256_loadu_pd(a.as_ptr().add(i));
            let vresult = _mm256_mul_pd(va, vk);
            _mm256_storeu_pd(result.as_mut_ptr().add(i), vresult);
            i += 4;
        }

        for j in i..len {
            result[j] = a[j] * k;
        }
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn dot(a: &[f64], b: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        let mut acc = _mm256_setzero_pd();

        while i + 4 <= len {
            let va = _mm256_loadu_pd(a.as_ptr().add(i));
            let vb = _mm256_loadu_pd(b.as_ptr().add(i));

            // Fused multiply-add: acc += va * vb
            acc = _mm256_fmadd_pd(va, vb, acc);

            i += 4;
        }

        let mut sum = horizontal_sum(acc);

        for j in i..len {
            sum += a[j] * b[j];
        }

        sum
    }

    #[target_feature(enable = "avx2")]
    unsafe fn total(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        let mut acc = _mm256_setzero_pd();

        while i + 4 <= len {
            let va = _mm256_loadu_pd(a.as_ptr().add(i));
            acc = _mm256_add_pd(acc, va);
            i += 4;
        }

        let mut total = horizontal_sum(acc);

        for j in i..len {
            total += a[j];
        }

        total
    }

    #[target_feature(enable = "avx2")]
    unsafe fn max(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        // Seed all lanes with the first element (caller guarantees non-empty)
        let mut vmax = _mm256_set1_pd(a[0]);

        while i + 4 <= len {
            let va = _mm256_loadu_pd(a.as_ptr().add(i));
            vmax = _mm256_max_pd(vmax, va);
            i += 4;
        }

        let high = _mm256_extractf128_pd(vmax, 1);
        let low = _mm256_castpd256_pd128(vmax);
        let max2 = _mm_max_pd(low, high);
        let hi64 = _mm_unpackhi_pd(max2, max2);
        let mut maximum = _mm_cvtsd_f64(_mm_max_sd(max2, hi64));

        for j in i..len {
            if a[j] > maximum {
                maximum = a[j];
            }
        }

        maximum
    }
}
