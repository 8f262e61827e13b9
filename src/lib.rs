//! Suma: Multi-Backend Vector Summation Library
//!
//! **Suma** (Spanish: "sum") provides element-wise summation of collections of
//! equal-length f64 vectors, plus the small family of vector math operations
//! and generic scalar reductions that naturally accompany it.
//!
//! # Design Principles
//!
//! - **Write once, optimize everywhere**: Single algorithm, multiple backends
//! - **Runtime dispatch**: Auto-select best implementation based on CPU features
//! - **Zero unsafe in public API**: Safety via type system, `unsafe` isolated in backends
//! - **Fail on unequal lengths**: Operands are validated before any arithmetic
//!
//! # Quick Start
//!
//! ```rust
//! use suma::{sum, Vector};
//!
//! let a = Vector::from_slice(&[1.0, 0.0, 3.0]);
//! let b = Vector::from_slice(&[0.0, 1.0, -2.0]);
//!
//! // Auto-selects best backend (AVX2/SSE2/scalar)
//! let result = sum(&[a, b]).unwrap();
//! assert_eq!(result.as_slice(), &[1.0, 1.0, 1.0]);
//! ```
//!
//! Generic scalar reductions live in [`reduce`]:
//!
//! ```rust
//! assert_eq!(suma::reduce::total(&[1, 2, 3]), 6);
//! ```

pub mod backends;
pub mod error;
pub mod reduce;
pub mod vector;

pub use error::{Result, SumaError};
pub use vector::{sum, Vector};

/// Backend execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Scalar fallback (no SIMD)
    Scalar,
    /// SSE2 (x86_64 baseline)
    SSE2,
    /// AVX (256-bit)
    AVX,
    /// AVX2 (256-bit with FMA)
    AVX2,
    /// AVX-512 (512-bit)
    AVX512,
    /// ARM NEON
    NEON,
    /// WebAssembly SIMD128
    WasmSIMD,
    /// Auto-select best available
    Auto,
}

impl Backend {
    /// Select the best available backend for the current platform
    ///
    /// This is a convenience wrapper around `select_best_available_backend()`
    pub fn select_best() -> Self {
        select_best_available_backend()
    }
}

/// Detect best SIMD backend for x86/x86_64 platforms
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
fn detect_x86_backend() -> Backend {
    if is_x86_feature_detected!("avx512f") {
        return Backend::AVX512;
    }
    if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
        return Backend::AVX2;
    }
    if is_x86_feature_detected!("avx") {
        return Backend::AVX;
    }
    if is_x86_feature_detected!("sse2") {
        return Backend::SSE2;
    }
    Backend::Scalar
}

/// Detect best SIMD backend for ARM platforms
#[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
fn detect_arm_backend() -> Backend {
    #[cfg(target_feature = "neon")]
    {
        Backend::NEON
    }
    #[cfg(not(target_feature = "neon"))]
    {
        Backend::Scalar
    }
}

/// Detect best SIMD backend for WebAssembly
#[cfg(target_arch = "wasm32")]
fn detect_wasm_backend() -> Backend {
    #[cfg(target_feature = "simd128")]
    {
        Backend::WasmSIMD
    }
    #[cfg(not(target_feature = "simd128"))]
    {
        Backend::Scalar
    }
}

/// Select the best available backend for the current platform
///
/// This function performs runtime CPU feature detection and selects the most
/// optimized backend available. The selection follows this priority:
///
/// **x86/x86_64**:
/// 1. AVX-512 (if `avx512f` feature detected)
/// 2. AVX2 (if `avx2` and `fma` features detected)
/// 3. AVX (if `avx` feature detected)
/// 4. SSE2 (baseline for x86_64)
/// 5. Scalar (fallback)
///
/// **ARM**: NEON (if available), else Scalar
///
/// **WASM**: SIMD128 (if available), else Scalar
///
/// **Other platforms**: Scalar
///
/// # Examples
///
/// ```
/// use suma::select_best_available_backend;
///
/// let backend = select_best_available_backend();
/// println!("Using backend: {:?}", backend);
/// ```
pub fn select_best_available_backend() -> Backend {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        detect_x86_backend()
    }

    #[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
    {
        detect_arm_backend()
    }

    #[cfg(target_arch = "wasm32")]
    {
        detect_wasm_backend()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "wasm32"
    )))]
    {
        Backend::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_enum() {
        assert_eq!(Backend::Scalar, Backend::Scalar);
        assert_ne!(Backend::Scalar, Backend::AVX2);
    }

    #[test]
    fn test_select_best_available_backend() {
        let backend = select_best_available_backend();

        // On x86_64, we should get at least SSE2 (baseline for x86_64)
        #[cfg(target_arch = "x86_64")]
        {
            assert_ne!(backend, Backend::Scalar);
            assert!(matches!(
                backend,
                Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512
            ));
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            assert!(matches!(
                backend,
                Backend::Scalar
                    | Backend::SSE2
                    | Backend::AVX
                    | Backend::AVX2
                    | Backend::AVX512
                    | Backend::NEON
                    | Backend::WasmSIMD
            ));
        }
    }

    #[test]
    fn test_backend_selection_is_deterministic() {
        let backend1 = select_best_available_backend();
        let backend2 = select_best_available_backend();
        assert_eq!(backend1, backend2);
    }

    #[test]
    fn test_select_best_wrapper() {
        assert_eq!(Backend::select_best(), select_best_available_backend());
    }
}
