use ndarray::ArrayViewMut2;

/// Computes softmax along the last dimension of a 2D array
///
/// Each row is shifted by its maximum before exponentiation so that
/// large-magnitude scores do not overflow.
pub fn softmax_rows(matrix: &mut ArrayViewMut2<f32>) {
    for mut row in matrix.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |a, &b| a.max(b));

        // Compute exp(x - max) and sum
        let mut sum = 0.0f32;
        for val in row.iter_mut() {
            *val = (*val - max).exp();
            sum += *val;
        }

        // Normalize with protection against division by zero
        sum = sum.max(1e-20);
        for val in row.iter_mut() {
            *val /= sum;
        }
    }
}
