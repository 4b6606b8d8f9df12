//! 情感关键词提取
//!
//! 统计 token 中出现的情感词。与评分不同，这里用子串包含而不是精确匹配。

use crate::lexicon::{EmotionCategory, Lexicon, Polarity};
use crate::segment::Token;
use serde::Serialize;

/// 关键词及出现次数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// 按极性分组的关键词
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmotionKeywords {
    pub positive: Vec<KeywordCount>,
    pub negative: Vec<KeywordCount>,
}

impl EmotionKeywords {
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// 关键词提取器
pub struct KeywordExtractor;

impl KeywordExtractor {
    /// 提取关键词
    ///
    /// 每个 token 与每个情感词比较，token 包含该词即计数一次；
    /// 结果按次数降序，次数相同保持首次发现顺序。
    pub fn extract(tokens: &[Token], lexicon: &Lexicon) -> EmotionKeywords {
        EmotionKeywords {
            positive: Self::count_polarity(tokens, lexicon, Polarity::Positive),
            negative: Self::count_polarity(tokens, lexicon, Polarity::Negative),
        }
    }

    fn count_polarity(tokens: &[Token], lexicon: &Lexicon, polarity: Polarity) -> Vec<KeywordCount> {
        let mut counts: Vec<KeywordCount> = Vec::new();

        for token in tokens {
            for category in EmotionCategory::of_polarity(polarity) {
                for term in lexicon.terms(*category) {
                    if term.is_empty() || !token.as_str().contains(term.as_str()) {
                        continue;
                    }
                    match counts.iter_mut().find(|k| &k.keyword == term) {
                        Some(entry) => entry.count += 1,
                        None => counts.push(KeywordCount {
                            keyword: term.clone(),
                            count: 1,
                        }),
                    }
                }
            }
        }

        // 稳定排序
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}
