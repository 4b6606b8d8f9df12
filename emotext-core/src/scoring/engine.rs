//! 情绪评分引擎
//!
//! 按类别加权计数，归一化到 [0, 5]，并选出主情绪。

use crate::lexicon::{EmotionCategory, Lexicon};
use crate::scoring::weights::CategoryWeights;
use crate::segment::Token;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 归一化后的最高分
pub const MAX_SCORE: f64 = 5.0;

/// 七个类别的得分（固定顺序）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmotionScores {
    values: [f64; 7],
}

impl EmotionScores {
    /// 全零得分
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, category: EmotionCategory) -> f64 {
        self.values[category as usize]
    }

    pub(crate) fn add(&mut self, category: EmotionCategory, amount: f64) {
        self.values[category as usize] += amount;
    }

    /// 按类别顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, f64)> + '_ {
        EmotionCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// 最高分（全零时为 0）
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// 是否所有类别都为零
    pub fn is_neutral(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// 归一化：最高分映射到 5，保留两位小数；全零时保持不变
    pub fn normalized(&self) -> Self {
        let max = self.max();
        if max <= 0.0 {
            return *self;
        }

        let mut values = self.values;
        for value in values.iter_mut() {
            *value = round2(*value / max * MAX_SCORE);
        }
        Self { values }
    }

    /// 主情绪
    ///
    /// 第一个严格大于当前最高分的类别胜出；全零时返回 `None`（中性）。
    pub fn main_emotion(&self) -> Option<MainEmotion> {
        let mut best: Option<MainEmotion> = None;

        for (emotion, score) in self.iter() {
            let current = best.map_or(0.0, |b| b.score);
            if score > current {
                best = Some(MainEmotion { emotion, score });
            }
        }

        best
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.name(), &score)?;
        }
        map.end()
    }
}

/// 主情绪
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MainEmotion {
    pub emotion: EmotionCategory,
    pub score: f64,
}

/// 评分引擎
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: CategoryWeights,
}

impl ScoringEngine {
    /// 创建评分引擎
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// 原始得分
    ///
    /// 每个与类别词精确相等的 token 贡献该类别的权重；
    /// 同一 token 命中多个类别时分别计入。
    pub fn raw_scores(&self, tokens: &[Token], lexicon: &Lexicon) -> EmotionScores {
        let mut scores = EmotionScores::zero();

        for token in tokens {
            for category in EmotionCategory::ALL {
                if lexicon.terms(category).iter().any(|t| t == token.as_str()) {
                    scores.add(category, self.weights.get(category));
                }
            }
        }

        scores
    }

    /// 归一化得分
    pub fn score(&self, tokens: &[Token], lexicon: &Lexicon) -> EmotionScores {
        self.raw_scores(tokens, lexicon).normalized()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
