//! 分词模块
//!
//! 将原始文本转换为词典感知的 token 序列

pub mod normalize;
pub mod segmenter;

// 导出核心类型
pub use normalize::{normalize, split_sentences};
pub use segmenter::{Segmenter, Token, TokenKind};
