//! Theme Extractor - 主题句提取
//!
//! 与词典无关的独立管道：分段 → 提取有效句 → 按规则分类 → 多因子评分 → 按配额选取。

use crate::theme::patterns::{
    is_valid_sentence, keyword_density, CONCLUSION_RE, KEY_POINT_RE, MAX_SENTENCE_CHARS,
    MIN_SENTENCE_CHARS, SENTENCE_RE, TOPIC_RE,
};
use serde::Serialize;
use std::collections::HashSet;

/// 默认主题数上限
pub const DEFAULT_MAX_THEMES: usize = 8;

/// 位置得分权重
const POSITION_WEIGHT: f64 = 0.3;
/// 长度得分权重
const LENGTH_WEIGHT: f64 = 0.2;
/// 关键词得分权重
const KEYWORD_WEIGHT: f64 = 0.5;

/// 主题分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeCategory {
    /// 主要主题
    MainThemes,
    /// 相关主题
    SubThemes,
    /// 关键要点
    KeyPoints,
}

impl ThemeCategory {
    /// 按规则分类，优先级：主题 > 结论 > 要点；都不匹配时返回 `None`
    pub fn classify(sentence: &str) -> Option<Self> {
        if TOPIC_RE.is_match(sentence) {
            Some(ThemeCategory::MainThemes)
        } else if CONCLUSION_RE.is_match(sentence) {
            Some(ThemeCategory::KeyPoints)
        } else if KEY_POINT_RE.is_match(sentence) {
            Some(ThemeCategory::SubThemes)
        } else {
            None
        }
    }
}

/// 主题句及得分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeSentence {
    pub phrase: String,
    pub score: f64,
}

/// 已分类、已评分的句子
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub text: String,
    pub category: ThemeCategory,
    pub score: f64,
}

/// 主题提取结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeReport {
    pub main_themes: Vec<ThemeSentence>,
    pub sub_themes: Vec<ThemeSentence>,
    pub key_points: Vec<ThemeSentence>,
}

impl ThemeReport {
    pub fn bucket(&self, category: ThemeCategory) -> &Vec<ThemeSentence> {
        match category {
            ThemeCategory::MainThemes => &self.main_themes,
            ThemeCategory::SubThemes => &self.sub_themes,
            ThemeCategory::KeyPoints => &self.key_points,
        }
    }

    fn bucket_mut(&mut self, category: ThemeCategory) -> &mut Vec<ThemeSentence> {
        match category {
            ThemeCategory::MainThemes => &mut self.main_themes,
            ThemeCategory::SubThemes => &mut self.sub_themes,
            ThemeCategory::KeyPoints => &mut self.key_points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main_themes.is_empty() && self.sub_themes.is_empty() && self.key_points.is_empty()
    }
}

/// 主题提取器
pub struct ThemeExtractor;

impl ThemeExtractor {
    /// 提取主题句
    ///
    /// 每个分类最多 `ceil(max_themes / 3)` 条。
    pub fn extract_themes(text: &str, max_themes: usize) -> ThemeReport {
        let sentences = Self::extract_sentences(text);
        let scored = Self::score_sentences(&sentences);
        let report = Self::select_themes(scored, max_themes);

        tracing::debug!(
            "主题提取: {} 个有效句 → main={}, sub={}, key={}",
            sentences.len(),
            report.main_themes.len(),
            report.sub_themes.len(),
            report.key_points.len()
        );
        report
    }

    /// 按换行分段，逐段提取有效句
    pub fn extract_sentences(text: &str) -> Vec<String> {
        text.split(['\n', '\r'])
            .map(str::trim)
            .filter(|para| !para.is_empty())
            .flat_map(|para| SENTENCE_RE.find_iter(para).map(|m| m.as_str().trim()))
            .filter(|sentence| is_valid_sentence(sentence))
            .map(str::to_string)
            .collect()
    }

    /// 分类并评分
    ///
    /// 输出顺序：先全部主要主题，再相关主题，再关键要点，各自保持原文顺序；
    /// 重复句只保留一次，位置取首次出现处。
    pub fn score_sentences(sentences: &[String]) -> Vec<ScoredSentence> {
        let total = sentences.len() as f64;
        let mut seen = HashSet::new();
        let mut scored = Vec::new();

        let classified: Vec<(ThemeCategory, &String)> = sentences
            .iter()
            .filter_map(|s| ThemeCategory::classify(s).map(|c| (c, s)))
            .collect();

        for category in [
            ThemeCategory::MainThemes,
            ThemeCategory::SubThemes,
            ThemeCategory::KeyPoints,
        ] {
            for (_, sentence) in classified.iter().filter(|(c, _)| *c == category) {
                if !seen.insert(sentence.as_str()) {
                    continue;
                }

                let position = sentences
                    .iter()
                    .position(|s| s == *sentence)
                    .unwrap_or_default() as f64;

                let position_score = 1.0 - position / total;
                let length_score = (sentence.chars().count() as f64 - MIN_SENTENCE_CHARS as f64)
                    / (MAX_SENTENCE_CHARS - MIN_SENTENCE_CHARS) as f64;
                let keyword_score = keyword_density(sentence);

                let score = position_score * POSITION_WEIGHT
                    + length_score * LENGTH_WEIGHT
                    + keyword_score * KEYWORD_WEIGHT;

                scored.push(ScoredSentence {
                    text: (*sentence).clone(),
                    category,
                    score: round2(score),
                });
            }
        }

        scored
    }

    /// 按分数从高到低选取，已满的分类跳过
    pub fn select_themes(mut scored: Vec<ScoredSentence>, max_themes: usize) -> ThemeReport {
        let quota = max_themes.div_ceil(3);
        let mut report = ThemeReport::default();

        // 稳定排序，同分保持分类顺序
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        for item in scored {
            let bucket = report.bucket_mut(item.category);
            if bucket.len() < quota {
                bucket.push(ThemeSentence {
                    phrase: item.text,
                    score: item.score,
                });
            }
        }

        report
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
