//! 情绪评分模块
//!
//! Emotion Scoring Engine - 类别得分、归一化、主情绪与文本强度
//!
//! 核心组件：
//! - `weights`: 类别权重与上下文权重
//! - `engine`: 类别评分与主情绪
//! - `intensity`: 标点 / 程度词强度
//! - `conclusion`: 中文分析结论

pub mod conclusion;
pub mod engine;
pub mod intensity;
pub mod weights;

// 导出核心类型
pub use conclusion::{Balance, ConclusionWriter};
pub use engine::{EmotionScores, MainEmotion, ScoringEngine, MAX_SCORE};
pub use intensity::{IntensityCalculator, MAX_INTENSITY, MIN_INTENSITY};
pub use weights::{CategoryWeights, ContextWeights};
