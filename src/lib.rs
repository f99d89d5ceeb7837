//! Scaled dot-product and multi-head attention over dense f32 matrices.

pub mod attention;
pub use attention::{scaled_dot_product_attention, AttentionConfig, AttentionHead, MultiHeadAttention};

pub mod error;
pub use error::AttentionError;

pub mod math;
pub use math::softmax_rows;
