use ndarray::{concatenate, Array, Array2, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::attention::scaled_dot_product_attention;
use crate::error::AttentionError;

/// Configuration for a multi-head attention layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionConfig {
    pub model_dim: usize,
    pub num_heads: usize,
}

/// Projection weights for a single attention head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionHead {
    pub w_q: Array2<f32>, // [model_dim, head_dim]
    pub w_k: Array2<f32>, // [model_dim, head_dim]
    pub w_v: Array2<f32>, // [model_dim, head_dim]
}

/// Multi-head attention layer
///
/// Holds an ordered sequence of per-head projections plus the output
/// projection. Heads are evaluated independently and their outputs are
/// concatenated in stored order before the final projection, so head
/// evaluation order never affects the result.
#[derive(Debug, Serialize, Deserialize)]
pub struct MultiHeadAttention {
    pub heads: Vec<AttentionHead>,
    pub w_o: Array2<f32>, // [num_heads * head_dim, model_dim]
}

impl MultiHeadAttention {
    /// Creates a layer with randomly initialized projection weights.
    pub fn new(config: AttentionConfig) -> Result<Self, AttentionError> {
        if config.num_heads == 0 {
            return Err(AttentionError::InvalidConfig(
                "num_heads must be at least 1".to_string(),
            ));
        }
        if config.model_dim % config.num_heads != 0 {
            return Err(AttentionError::InvalidConfig(format!(
                "model_dim {} must be divisible by num_heads {}",
                config.model_dim, config.num_heads
            )));
        }
        let head_dim = config.model_dim / config.num_heads;

        // Scale initialization by fan-in
        let qkv_std = (1.0 / config.model_dim as f32).sqrt();
        let o_std = (1.0 / (config.num_heads * head_dim) as f32).sqrt();
        let qkv_normal = Normal::new(0.0, qkv_std)
            .map_err(|e| AttentionError::InitializationError(e.to_string()))?;
        let o_normal = Normal::new(0.0, o_std)
            .map_err(|e| AttentionError::InitializationError(e.to_string()))?;

        let head_shape = (config.model_dim, head_dim);
        let heads = (0..config.num_heads)
            .map(|_| AttentionHead {
                w_q: Array::random(head_shape, qkv_normal),
                w_k: Array::random(head_shape, qkv_normal),
                w_v: Array::random(head_shape, qkv_normal),
            })
            .collect();
        let w_o = Array::random((config.num_heads * head_dim, config.model_dim), o_normal);

        Ok(Self { heads, w_o })
    }

    /// Builds a layer from caller-supplied weights, validating their shapes.
    pub fn from_weights(
        heads: Vec<AttentionHead>,
        w_o: Array2<f32>,
    ) -> Result<Self, AttentionError> {
        if heads.is_empty() {
            return Err(AttentionError::InvalidConfig(
                "at least one head is required".to_string(),
            ));
        }

        let mut concat_width = 0;
        for (i, head) in heads.iter().enumerate() {
            if head.w_q.ncols() != head.w_k.ncols() {
                return Err(AttentionError::ShapeMismatch(format!(
                    "head {}: query projection width {} does not match key projection width {}",
                    i,
                    head.w_q.ncols(),
                    head.w_k.ncols()
                )));
            }
            if head.w_q.nrows() != head.w_k.nrows() || head.w_q.nrows() != head.w_v.nrows() {
                return Err(AttentionError::ShapeMismatch(format!(
                    "head {}: projection input dimensions disagree ({}, {}, {})",
                    i,
                    head.w_q.nrows(),
                    head.w_k.nrows(),
                    head.w_v.nrows()
                )));
            }
            concat_width += head.w_v.ncols();
        }

        if w_o.nrows() != concat_width {
            return Err(AttentionError::ShapeMismatch(format!(
                "output projection expects input width {}, concatenated heads produce {}",
                w_o.nrows(),
                concat_width
            )));
        }

        Ok(Self { heads, w_o })
    }

    /// Multi-head attention forward pass.
    ///
    /// Projects `q`, `k`, `v` through each head's weights, runs scaled
    /// dot-product attention per head, concatenates the per-head outputs
    /// along the value axis, and applies the output projection. Returns a
    /// matrix of shape [n, model_dim].
    pub fn forward(
        &self,
        q: ArrayView2<f32>,
        k: ArrayView2<f32>,
        v: ArrayView2<f32>,
    ) -> Result<Array2<f32>, AttentionError> {
        let mut head_outputs = Vec::with_capacity(self.heads.len());

        for (i, head) in self.heads.iter().enumerate() {
            if q.ncols() != head.w_q.nrows() {
                return Err(AttentionError::ShapeMismatch(format!(
                    "head {}: input dimension {} does not match query projection input {}",
                    i,
                    q.ncols(),
                    head.w_q.nrows()
                )));
            }
            if k.ncols() != head.w_k.nrows() || v.ncols() != head.w_v.nrows() {
                return Err(AttentionError::ShapeMismatch(format!(
                    "head {}: key/value dimensions ({}, {}) do not match projection inputs ({}, {})",
                    i,
                    k.ncols(),
                    v.ncols(),
                    head.w_k.nrows(),
                    head.w_v.nrows()
                )));
            }

            let q_i = q.dot(&head.w_q);
            let k_i = k.dot(&head.w_k);
            let v_i = v.dot(&head.w_v);

            let (_, output) =
                scaled_dot_product_attention(q_i.view(), k_i.view(), v_i.view())?;
            head_outputs.push(output);
        }

        let views: Vec<_> = head_outputs.iter().map(|o| o.view()).collect();
        let merged = concatenate(Axis(1), &views)
            .map_err(|e| AttentionError::ShapeMismatch(e.to_string()))?;

        if merged.ncols() != self.w_o.nrows() {
            return Err(AttentionError::ShapeMismatch(format!(
                "concatenated head width {} does not match output projection input {}",
                merged.ncols(),
                self.w_o.nrows()
            )));
        }

        Ok(merged.dot(&self.w_o))
    }
}
