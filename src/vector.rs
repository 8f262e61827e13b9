//! Vector type with multi-backend support

#[cfg(target_arch = "x86_64")]
use crate::backends::avx2::Avx2Backend;
use crate::backends::scalar::ScalarBackend;
#[cfg(target_arch = "x86_64")]
use crate::backends::sse2::Sse2Backend;
use crate::backends::VectorBackend;
use crate::{Backend, Result, SumaError};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Workload size above which `sum` partitions the output across threads
#[cfg(feature = "parallel")]
const PAR_THRESHOLD: usize = 1 << 16;

/// Chunk size for the parallel accumulation path
#[cfg(feature = "parallel")]
const PAR_CHUNK: usize = 1 << 14;

/// Vector of f64 elements with multi-backend support
///
/// # Examples
///
/// ```
/// use suma::Vector;
///
/// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
/// let result = a.add(&b).unwrap();
///
/// assert_eq!(result.as_slice(), &[5.0, 7.0, 9.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
    backend: Backend,
}

impl<T> Vector<T>
where
    T: Clone,
{
    /// Create vector from slice using the auto-selected optimal backend
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(v.len(), 4);
    /// ```
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
            backend: crate::select_best_available_backend(),
        }
    }

    /// Create vector with a specific backend (for benchmarking or testing)
    ///
    /// `Backend::Auto` is resolved to the best available backend at
    /// construction time.
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::{Backend, Vector};
    ///
    /// let v = Vector::from_slice_with_backend(&[1.0, 2.0], Backend::Scalar);
    /// assert_eq!(v.backend(), Backend::Scalar);
    /// ```
    pub fn from_slice_with_backend(data: &[T], backend: Backend) -> Self {
        let resolved_backend = match backend {
            Backend::Auto => crate::select_best_available_backend(),
            _ => backend,
        };

        Self {
            data: data.to_vec(),
            backend: resolved_backend,
        }
    }

    /// Get underlying data as slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get vector length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the backend being used
    pub fn backend(&self) -> Backend {
        self.backend
    }
}

impl From<Vec<f64>> for Vector<f64> {
    fn from(data: Vec<f64>) -> Self {
        Self {
            data,
            backend: crate::select_best_available_backend(),
        }
    }
}

impl Vector<f64> {
    /// Element-wise addition
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::Vector;
    ///
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// let result = a.add(&b).unwrap();
    ///
    /// assert_eq!(result.as_slice(), &[5.0, 7.0, 9.0]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SumaError::LengthMismatch`] if the vectors have different lengths.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(SumaError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }

        let mut result = vec![0.0; self.len()];

        // Dispatch to the appropriate backend
        unsafe {
            match self.backend {
                Backend::Scalar => {
                    ScalarBackend::add(&self.data, &other.data, &mut result);
                }
                #[cfg(target_arch = "x86_64")]
                Backend::SSE2 | Backend::AVX => {
                    Sse2Backend::add(&self.data, &other.data, &mut result);
                }
                #[cfg(target_arch = "x86_64")]
                Backend::AVX2 | Backend::AVX512 => {
                    Avx2Backend::add(&self.data, &other.data, &mut result);
                }
                #[cfg(not(target_arch = "x86_64"))]
                Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => {
                    // Fallback to scalar on non-x86_64
                    ScalarBackend::add(&self.data, &other.data, &mut result);
                }
                Backend::NEON | Backend::WasmSIMD | Backend::Auto => {
                    // Not yet implemented, use scalar
                    ScalarBackend::add(&self.data, &other.data, &mut result);
                }
            }
        }

        Ok(Self {
            data: result,
            backend: self.backend,
        })
    }

    /// Multiply every element by a scalar
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(v.scale(2.0).as_slice(), &[2.0, 4.0, 6.0]);
    /// ```
    pub fn scale(&self, k: f64) -> Self {
        let mut result = vec![0.0; self.len()];

        unsafe {
            match self.backend {
                Backend::Scalar => {
                    ScalarBackend::scale(&self.data, k, &mut result);
                }
                #[cfg(target_arch = "x86_64")]
                Backend::SSE2 | Backend::AVX => {
                    Sse2Backend::scale(&self.data, k, &mut result);
                }
                #[cfg(target_arch = "x86_64")]
                Backend::AVX2 | Backend::AVX512 => {
                    Avx2Backend::scale(&self.data, k, &mut result);
                }
                #[cfg(not(target_arch = "x86_64"))]
                Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => {
                    ScalarBackend::scale(&self.data, k, &mut result);
                }
                Backend::NEON | Backend::WasmSIMD | Backend::Auto => {
                    ScalarBackend::scale(&self.data, k, &mut result);
                }
            }
        }

        Self {
            data: result,
            backend: self.backend,
        }
    }

    /// Dot product
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::Vector;
    ///
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// let result = a.dot(&b).unwrap();
    ///
    /// assert_eq!(result, 32.0); // 1*4 + 2*5 + 3*6 = 32
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SumaError::LengthMismatch`] if the vectors have different lengths.
    pub fn dot(&self, other: &Self) -> Result<f64> {
        if self.len() != other.len() {
            return Err(SumaError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }

        let result = unsafe {
            match self.backend {
                Backend::Scalar => ScalarBackend::dot(&self.data, &other.data),
                #[cfg(target_arch = "x86_64")]
                Backend::SSE2 | Backend::AVX => Sse2Backend::dot(&self.data, &other.data),
                #[cfg(target_arch = "x86_64")]
                Backend::AVX2 | Backend::AVX512 => Avx2Backend::dot(&self.data, &other.data),
                #[cfg(not(target_arch = "x86_64"))]
                Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => {
                    ScalarBackend::dot(&self.data, &other.data)
                }
                Backend::NEON | Backend::WasmSIMD | Backend::Auto => {
                    ScalarBackend::dot(&self.data, &other.data)
                }
            }
        };

        Ok(result)
    }

    /// Sum of all elements; 0.0 for the empty vector
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(v.total(), 10.0);
    /// ```
    pub fn total(&self) -> f64 {
        unsafe {
            match self.backend {
                Backend::Scalar => ScalarBackend::total(&self.data),
                #[cfg(target_arch = "x86_64")]
                Backend::SSE2 | Backend::AVX => Sse2Backend::total(&self.data),
                #[cfg(target_arch = "x86_64")]
                Backend::AVX2 | Backend::AVX512 => Avx2Backend::total(&self.data),
                #[cfg(not(target_arch = "x86_64"))]
                Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => {
                    ScalarBackend::total(&self.data)
                }
                Backend::NEON | Backend::WasmSIMD | Backend::Auto => {
                    ScalarBackend::total(&self.data)
                }
            }
        }
    }

    /// Find the maximum element
    ///
    /// # Errors
    ///
    /// Returns [`SumaError::EmptyVector`] if the vector is empty.
    pub fn max(&self) -> Result<f64> {
        if self.data.is_empty() {
            return Err(SumaError::EmptyVector);
        }

        let result = unsafe {
            match self.backend {
                Backend::Scalar => ScalarBackend::max(&self.data),
                #[cfg(target_arch = "x86_64")]
                Backend::SSE2 | Backend::AVX => Sse2Backend::max(&self.data),
                #[cfg(target_arch = "x86_64")]
                Backend::AVX2 | Backend::AVX512 => Avx2Backend::max(&self.data),
                #[cfg(not(target_arch = "x86_64"))]
                Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => {
                    ScalarBackend::max(&self.data)
                }
                Backend::NEON | Backend::WasmSIMD | Backend::Auto => {
                    ScalarBackend::max(&self.data)
                }
            }
        };

        Ok(result)
    }

    /// Arithmetic mean of the elements
    ///
    /// # Examples
    ///
    /// ```
    /// use suma::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(v.mean().unwrap(), 2.0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SumaError::EmptyVector`] if the vector is empty.
    pub fn mean(&self) -> Result<f64> {
        if self.data.is_empty() {
            return Err(SumaError::EmptyVector);
        }

        Ok(self.total() / self.data.len() as f64)
    }
}

/// In-place accumulation dispatched on `backend`: target[i] += src[i]
fn accumulate_into(backend: Backend, target: &mut [f64], src: &[f64]) {
    unsafe {
        match backend {
            Backend::Scalar => ScalarBackend::accumulate(target, src),
            #[cfg(target_arch = "x86_64")]
            Backend::SSE2 | Backend::AVX => Sse2Backend::accumulate(target, src),
            #[cfg(target_arch = "x86_64")]
            Backend::AVX2 | Backend::AVX512 => Avx2Backend::accumulate(target, src),
            #[cfg(not(target_arch = "x86_64"))]
            Backend::SSE2 | Backend::AVX | Backend::AVX2 | Backend::AVX512 => {
                ScalarBackend::accumulate(target, src)
            }
            Backend::NEON | Backend::WasmSIMD | Backend::Auto => {
                ScalarBackend::accumulate(target, src)
            }
        }
    }
}

/// Element-wise sum of zero or more vectors of the same length
///
/// Every operand contributes to the result, which has the same length as the
/// operands. Accumulation runs on the first operand's backend; with the
/// `parallel` feature, large workloads are partitioned into disjoint output
/// chunks processed across threads.
///
/// # Examples
///
/// ```
/// use suma::{sum, Vector};
///
/// let a = Vector::from_slice(&[1.0, 0.0, 3.0]);
/// let b = Vector::from_slice(&[0.0, 1.0, -2.0]);
/// let result = sum(&[a, b]).unwrap();
///
/// assert_eq!(result.as_slice(), &[1.0, 1.0, 1.0]);
/// ```
///
/// Zero operands yield an empty vector; a single operand yields a copy of it:
///
/// ```
/// use suma::{sum, Vector};
///
/// assert!(sum(&[]).unwrap().is_empty());
///
/// let v = Vector::from_slice(&[4.0, 2.0]);
/// assert_eq!(sum(&[v]).unwrap().as_slice(), &[4.0, 2.0]);
/// ```
///
/// # Errors
///
/// Returns [`SumaError::LengthMismatch`] if any operand's length differs from
/// the first operand's length. The check runs before any arithmetic.
#[cfg_attr(
    feature = "tracing",
    instrument(skip(vectors), fields(count = vectors.len()))
)]
pub fn sum(vectors: &[Vector<f64>]) -> Result<Vector<f64>> {
    match vectors {
        [] => {
            return Ok(Vector {
                data: Vec::new(),
                backend: crate::select_best_available_backend(),
            })
        }
        [only] => {
            return Ok(Vector {
                data: only.data.clone(),
                backend: only.backend,
            })
        }
        _ => {}
    }

    let expected = vectors[0].len();
    for v in &vectors[1..] {
        if v.len() != expected {
            return Err(SumaError::LengthMismatch {
                expected,
                actual: v.len(),
            });
        }
    }

    let backend = vectors[0].backend;
    let mut data = vec![0.0; expected];

    #[cfg(feature = "parallel")]
    {
        if expected >= PAR_THRESHOLD {
            use rayon::prelude::*;

            // Disjoint output chunks, so threads never write the same region.
            // Each chunk accumulates the matching range of every operand.
            data.par_chunks_mut(PAR_CHUNK)
                .enumerate()
                .for_each(|(idx, chunk)| {
                    let start = idx * PAR_CHUNK;
                    for v in vectors {
                        accumulate_into(backend, chunk, &v.data[start..start + chunk.len()]);
                    }
                });

            return Ok(Vector { data, backend });
        }
    }

    for v in vectors {
        accumulate_into(backend, &mut data, &v.data);
    }

    Ok(Vector { data, backend })
}
