//! Attention mechanisms
mod scaled;
pub use scaled::scaled_dot_product_attention;

mod multihead;
pub use multihead::{AttentionConfig, AttentionHead, MultiHeadAttention};
