//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! This backend uses SSE2 intrinsics for 128-bit SIMD operations.
//! SSE2 is available on all x86_64 CPUs as a baseline requirement.
//!
//! # Performance
//!
//! Expected speedup: 2x for operations on f64 vectors (2 elements per register)
//!
//! # Safety
//!
//! All SSE2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness through comprehensive testing.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::VectorBackend;

/// SSE2 backend (128-bit SIMD for x86_64)
pub struct Sse2Backend;

impl VectorBackend for Sse2Backend {
    #[target_feature(enable = "sse2")]
    unsafe fn add(a: &[f64], b: &[f64], result: &mut [f64]) {
        let len = a.len();
        let mut i = 0;

        // Process 2 elements at a time using SSE2 (128-bit = 2 x f64)
        while i + 2 <= len {
            let va = _mm_loadu_pd(a.as_ptr().add(i));
            let vb = _mm_loadu_pd(b.as_ptr().add(i));

            let vresult = _mm_add_pd(va, vb);

            _mm_storeu_pd(result.as_mut_ptr().add(i), vresult);

            i += 2;
        }

        // Handle the remaining element with scalar code
        for j in i..len {
            result[j] = a[j] + b[j];
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn accumulate(target: &mut [f64], src: &[f64]) {
        let len = src.len();
        let mut i = 0;

        while i + 2 <= len {
            let vt = _mm_loadu_pd(target.as_ptr().add(i));
            let vs = _mm_loadu_pd(src.as_ptr().add(i));

            let vresult = _mm_add_pd(vt, vs);

            _mm_storeu_pd(target.as_mut_ptr().add(i), vresult);

            i += 2;
        }

        for j in i..len {
            target[j] += src[j];
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn scale(a: &[f64], k: f64, result: &mut [f64]) {
        let len = a.len();
        let mut i = 0;

        // Broadcast k to both lanes
        let vk = _mm_set1_pd(k);

        while i + 2 <= len {
            let va = _mm_loadu_pd(a.as_ptr().add(i));
            let vresult = _mm_mul_pd(va, vk);
            _mm_storeu_pd(result.as_mut_ptr().add(i), vresult);
            i += 2;
        }

        for j in i..len {
            result[j] = a[j] * k;
        }
    }

    #[target_feature(enable = "sse2")]
    unsafe fn dot(a: &[f64], b: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        let mut acc = _mm_setzero_pd();

        while i + 2 <= len {
            let va = _mm_loadu_pd(a.as_ptr().add(i));
            let vb = _mm_loadu_pd(b.as_ptr().add(i));
            acc = _mm_add_pd(acc, _mm_mul_pd(va, vb));
            i += 2;
        }

        // Horizontal sum of the two lanes
        let high = _mm_unpackhi_pd(acc, acc);
        let mut sum = _mm_cvtsd_f64(_mm_add_sd(acc, high));

        for j in i..len {
            sum += a[j] * b[j];
        }

        sum
    }

    #[target_feature(enable = "sse2")]
    unsafe fn total(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        let mut acc = _mm_setzero_pd();

        while i + 2 <= len {
            let va = _mm_loadu_pd(a.as_ptr().add(i));
            acc = _mm_add_pd(acc, va);
            i += 2;
        }

        let high = _mm_unpackhi_pd(acc, acc);
        let mut total = _mm_cvtsd_f64(_mm_add_sd(acc, high));

        for j in i..len {
            total += a[j];
        }

        total
    }

    #[target_feature(enable = "sse2")]
    unsafe fn max(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        // Seed both lanes with the first element (caller guarantees non-empty)
        let mut vmax = _mm_set1_pd(a[0]);

        while i + 2 <= len {
            let va = _mm_loadu_pd(a.as_ptr().add(i));
            vmax = _mm_max_pd(vmax, va);
            i += 2;
        }

        let high = _mm_unpackhi_pd(vmax, vmax);
        let mut maximum = _mm_cvtsd_f64(_mm_max_sd(vmax, high));

        for j in i..len {
            if a[j] > maximum {
                maximum = a[j];
            }
        }

        maximum
    }
}
