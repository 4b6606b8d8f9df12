//! 评分权重
//!
//! 类别权重参与评分；上下文权重（否定、转折、距离衰减）目前只保存在配置中，评分尚未使用。

use crate::lexicon::EmotionCategory;
use serde::{Deserialize, Serialize};

/// 情绪类别权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub confidence: f64,
    pub achievement: f64,
    pub determination: f64,
    pub unity: f64,
    pub challenge: f64,
    pub pressure: f64,
    pub urgency: f64,
}

impl CategoryWeights {
    /// 类别权重
    pub fn get(&self, category: EmotionCategory) -> f64 {
        match category {
            EmotionCategory::Confidence => self.confidence,
            EmotionCategory::Achievement => self.achievement,
            EmotionCategory::Determination => self.determination,
            EmotionCategory::Unity => self.unity,
            EmotionCategory::Challenge => self.challenge,
            EmotionCategory::Pressure => self.pressure,
            EmotionCategory::Urgency => self.urgency,
        }
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            confidence: 1.2,
            achievement: 1.3,
            determination: 1.1,
            unity: 1.0,
            challenge: 0.8,
            pressure: 0.7,
            urgency: 0.9,
        }
    }
}

/// 上下文权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextWeights {
    /// 否定词权重
    pub negation: f64,
    /// 转折词权重
    pub transition: f64,
    /// 距离衰减因子
    pub distance: f64,
}

impl Default for ContextWeights {
    fn default() -> Self {
        Self {
            negation: -0.8,
            transition: 0.5,
            distance: 0.9,
        }
    }
}
