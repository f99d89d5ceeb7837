use ndarray::{Array2, ArrayView2};

use crate::error::AttentionError;
use crate::math::softmax_rows;

/// Scaled dot-product attention for a single head.
///
/// # Arguments
/// * `q` - Query matrix [n, d_k]
/// * `k` - Key matrix [m, d_k]
/// * `v` - Value matrix [m, d_v]
///
/// Returns the attention weight matrix [n, m] together with the output
/// [n, d_v]. Each weight row is a probability distribution over the m keys,
/// so each output row is a convex combination of the value rows.
pub fn scaled_dot_product_attention(
    q: ArrayView2<f32>,
    k: ArrayView2<f32>,
    v: ArrayView2<f32>,
) -> Result<(Array2<f32>, Array2<f32>), AttentionError> {
    let d_k = q.ncols();
    if k.ncols() != d_k {
        return Err(AttentionError::ShapeMismatch(format!(
            "query dimension {} does not match key dimension {}",
            d_k,
            k.ncols()
        )));
    }
    if k.nrows() != v.nrows() {
        return Err(AttentionError::ShapeMismatch(format!(
            "key count {} does not match value count {}",
            k.nrows(),
            v.nrows()
        )));
    }

    // Scores = Q * K^T / sqrt(d_k)
    let scale = (d_k as f32).sqrt();
    let mut weights = q.dot(&k.t());
    weights.mapv_inplace(|x| x / scale);

    softmax_rows(&mut weights.view_mut());

    // Output = weights * V
    let output = weights.dot(&v);

    Ok((weights, output))
}
