//! Behavioral tests for multi-vector summation
//!
//! Each case exercises the `sum` contract end to end: element-wise results,
//! the unequal-length failure, and the degenerate zero- and one-operand
//! inputs.

use suma::{reduce, sum, Backend, SumaError, Vector};

#[test]
fn sum_of_two_equal_length_vectors_is_elementwise() {
    let a = Vector::from_slice(&[1.0, 0.0, 3.0]);
    let b = Vector::from_slice(&[0.0, 1.0, -2.0]);

    let result = sum(&[a, b]).expect("equal-length vectors should sum");

    assert_eq!(result.as_slice(), &[1.0, 1.0, 1.0]);
}

#[test]
fn sum_result_length_equals_operand_length() {
    let a = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    let b = Vector::from_slice(&[5.0, 6.0, 7.0, 8.0]);
    let c = Vector::from_slice(&[9.0, 10.0, 11.0, 12.0]);

    let result = sum(&[a, b, c]).unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(result.as_slice(), &[15.0, 18.0, 21.0, 24.0]);
}

#[test]
fn sum_counts_the_first_operand() {
    // Distinct magnitude per operand makes a dropped operand visible
    let a = Vector::from_slice(&[1.0, 1.0, 1.0]);
    let b = Vector::from_slice(&[10.0, 10.0, 10.0]);
    let c = Vector::from_slice(&[100.0, 100.0, 100.0]);

    let result = sum(&[a, b, c]).unwrap();

    assert_eq!(result.as_slice(), &[111.0, 111.0, 111.0]);
}

#[test]
fn sum_fails_when_a_length_differs_from_the_first() {
    let a = Vector::from_slice(&[1.0, 0.0, 3.0]);
    let b = Vector::from_slice(&[0.0, 1.0]);

    let err = sum(&[a, b]).unwrap_err();

    assert_eq!(
        err,
        SumaError::LengthMismatch {
            expected: 3,
            actual: 2,
        }
    );
    assert_eq!(err.to_string(), "vector lengths unequal: expected 3, got 2");
}

#[test]
fn sum_of_no_vectors_is_empty_without_failure() {
    let result = sum(&[]).expect("zero operands should not fail");

    assert!(result.is_empty());
    assert_eq!(result.len(), 0);
}

#[test]
fn sum_of_one_vector_is_an_independent_copy() {
    let v = Vector::from_slice(&[4.0, 2.0, 7.0]);

    let result = sum(std::slice::from_ref(&v)).unwrap();

    assert_eq!(result.as_slice(), v.as_slice());
    assert_ne!(result.as_slice().as_ptr(), v.as_slice().as_ptr());
}

#[test]
fn sum_agrees_across_backends() {
    let data_a: Vec<f64> = (0..1000).map(|i| f64::from(i) * 0.25).collect();
    let data_b: Vec<f64> = (0..1000).map(|i| 250.0 - f64::from(i)).collect();

    let scalar = sum(&[
        Vector::from_slice_with_backend(&data_a, Backend::Scalar),
        Vector::from_slice_with_backend(&data_b, Backend::Scalar),
    ])
    .unwrap();
    let auto = sum(&[
        Vector::from_slice(&data_a),
        Vector::from_slice(&data_b),
    ])
    .unwrap();

    // Element-wise addition performs identical per-index arithmetic on every
    // backend, so the results match exactly.
    assert_eq!(scalar.as_slice(), auto.as_slice());
}

#[test]
fn total_of_int_slice() {
    let s = [1, 2, 3];
    assert_eq!(reduce::total(&s), 6);
}

#[test]
fn total_of_empty_int_slice_is_zero() {
    let s: [i32; 0] = [];
    assert_eq!(reduce::total(&s), 0);
}

#[test]
fn total_leaves_the_input_unchanged() {
    let s = vec![1, 2, 3];
    let _ = reduce::total(&s);
    assert_eq!(s, vec![1, 2, 3]);
}
