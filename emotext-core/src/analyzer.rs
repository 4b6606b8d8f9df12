//! 情绪分析入口
//!
//! 串联 词典仓库 → 分词 → 评分 → 关键词 → 强度，以及独立的主题句提取。

use crate::config::EmotextConfig;
use crate::error::{EmotextError, EmotextResult};
use crate::keywords::{EmotionKeywords, KeywordExtractor};
use crate::lexicon::{Lexicon, LexiconRepository};
use crate::scoring::{
    CategoryWeights, ConclusionWriter, EmotionScores, IntensityCalculator, MainEmotion,
    ScoringEngine,
};
use crate::segment::Segmenter;
use crate::theme::{ThemeExtractor, ThemeReport};
use serde::Serialize;
use std::sync::Arc;

/// 情绪分析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionReport {
    /// 归一化后的类别得分
    pub scores: EmotionScores,
    pub keywords: EmotionKeywords,
    /// 文本强度 [0.5, 2.0]
    pub intensity: f64,
    /// 主情绪，全零得分时为 `None`（中性）
    pub main_emotion: Option<MainEmotion>,
    /// 中文结论，中性时为 `None`
    pub conclusion: Option<String>,
}

impl EmotionReport {
    pub fn is_neutral(&self) -> bool {
        self.main_emotion.is_none()
    }
}

/// 情绪 + 主题的完整结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub emotion: EmotionReport,
    pub themes: ThemeReport,
}

/// 情绪分析器
pub struct EmotionAnalyzer {
    repository: Arc<LexiconRepository>,
    engine: ScoringEngine,
}

impl EmotionAnalyzer {
    /// 使用默认类别权重创建
    pub fn new(repository: Arc<LexiconRepository>) -> Self {
        Self::with_weights(repository, CategoryWeights::default())
    }

    pub fn with_weights(repository: Arc<LexiconRepository>, weights: CategoryWeights) -> Self {
        Self {
            repository,
            engine: ScoringEngine::new(weights),
        }
    }

    /// 按配置创建仓库和分析器
    pub fn from_config(config: &EmotextConfig) -> Self {
        let repository = Arc::new(LexiconRepository::from_config(config));
        Self::with_weights(repository, config.scoring.weights.clone())
    }

    pub fn repository(&self) -> &Arc<LexiconRepository> {
        &self.repository
    }

    /// 分析文本
    ///
    /// 先等待词典初始化完成；空白文本返回 [`EmotextError::EmptyInput`]。
    pub async fn analyze(&self, text: &str) -> EmotextResult<EmotionReport> {
        Self::check_input(text)?;
        let lexicon = self.repository.snapshot().await;
        Ok(self.analyze_with(text, &lexicon))
    }

    /// 使用当前已就绪的词典同步分析
    ///
    /// 词典尚未初始化时退回内置默认词典。
    pub fn analyze_now(&self, text: &str) -> EmotextResult<EmotionReport> {
        Self::check_input(text)?;
        let lexicon = match self.repository.current() {
            Some(lexicon) => lexicon,
            None => {
                tracing::warn!("词典尚未初始化，使用默认词典");
                Arc::new(Lexicon::builtin())
            }
        };
        Ok(self.analyze_with(text, &lexicon))
    }

    /// 用给定词典分析（纯函数）
    pub fn analyze_with(&self, text: &str, lexicon: &Lexicon) -> EmotionReport {
        let tokens = Segmenter::segment(text, lexicon);
        let scores = self.engine.score(&tokens, lexicon);
        let keywords = KeywordExtractor::extract(&tokens, lexicon);
        let intensity = IntensityCalculator::calculate(text, lexicon);
        let main_emotion = scores.main_emotion();
        let conclusion = ConclusionWriter::write(&scores, intensity, main_emotion.as_ref());

        match &main_emotion {
            Some(main) => tracing::debug!("主情绪: {} ({:.2})", main.emotion, main.score),
            None => tracing::debug!("未检测到情绪词，结果为中性"),
        }

        EmotionReport {
            scores,
            keywords,
            intensity,
            main_emotion,
            conclusion,
        }
    }

    /// 情绪分析与主题提取合并
    pub async fn analyze_document(
        &self,
        text: &str,
        max_themes: usize,
    ) -> EmotextResult<DocumentReport> {
        let emotion = self.analyze(text).await?;
        let themes = ThemeExtractor::extract_themes(text, max_themes);
        Ok(DocumentReport { emotion, themes })
    }

    fn check_input(text: &str) -> EmotextResult<()> {
        if text.trim().is_empty() {
            return Err(EmotextError::EmptyInput);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{EmotionCategory, LexiconCache};
    use tempfile::TempDir;

    fn analyzer_in(dir: &TempDir) -> EmotionAnalyzer {
        let cache = LexiconCache::new(dir.path().join("cache.json"), chrono::Duration::hours(24));
        let repository = LexiconRepository::new(
            cache,
            dir.path().join("missing-positive.txt"),
            dir.path().join("missing-degree.txt"),
        );
        EmotionAnalyzer::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_blank_input_rejected() {
        let dir = TempDir::new().unwrap();
        let analyzer = analyzer_in(&dir);

        for text in ["", "   ", "\n\t"] {
            let err = analyzer.analyze(text).await.unwrap_err();
            assert!(matches!(err, EmotextError::EmptyInput));
        }
        // 空输入不触发词典加载
        assert_eq!(analyzer.repository().sourcing_attempts(), 0);
    }

    #[tokio::test]
    async fn test_analyze_rally_sentence() {
        let dir = TempDir::new().unwrap();
        let analyzer = analyzer_in(&dir);

        let report = analyzer
            .analyze("我们坚定信心，克服困难，取得了重大成功！")
            .await
            .unwrap();

        let main = report.main_emotion.unwrap();
        assert!(matches!(
            main.emotion,
            EmotionCategory::Confidence | EmotionCategory::Achievement
        ));
        assert_eq!(main.score, 5.0);
        assert!(report.scores.get(EmotionCategory::Confidence) >= report.scores.get(EmotionCategory::Challenge));
        assert!(report.scores.get(EmotionCategory::Achievement) >= report.scores.get(EmotionCategory::Challenge));
        assert!(report.keywords.negative.iter().any(|k| k.keyword == "困难"));
        assert!(report.intensity >= 0.5 && report.intensity <= 2.0);

        let conclusion = report.conclusion.unwrap();
        assert!(conclusion.contains("积极"));
    }

    #[test]
    fn test_no_matches_is_neutral() {
        let dir = TempDir::new().unwrap();
        let analyzer = analyzer_in(&dir);

        let report = analyzer.analyze_with("今天天气晴朗", &Lexicon::builtin());
        assert!(report.is_neutral());
        assert!(report.scores.is_neutral());
        assert!(report.keywords.is_empty());
        assert_eq!(report.conclusion, None);
    }

    #[test]
    fn test_analyze_now_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let analyzer = analyzer_in(&dir);

        let report = analyzer.analyze_now("团结一致，共同奋斗").unwrap();
        assert_eq!(report.main_emotion.unwrap().emotion, EmotionCategory::Unity);
        assert_eq!(analyzer.repository().sourcing_attempts(), 0);
    }

    #[tokio::test]
    async fn test_analyze_document() {
        let dir = TempDir::new().unwrap();
        let analyzer = analyzer_in(&dir);

        let text = "一、我们坚定信心推进重点工作。\n总之，困难再大也要取得成功。";
        let report = analyzer.analyze_document(text, 8).await.unwrap();

        assert!(!report.emotion.is_neutral());
        assert_eq!(report.themes.main_themes.len(), 1);
        assert_eq!(report.themes.key_points.len(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["emotion"]["mainEmotion"]["emotion"].is_string());
        assert!(json["emotion"]["scores"]["confidence"].is_number());
        assert!(json["themes"]["mainThemes"].is_array());
    }

    #[test]
    fn test_neutral_serializes_null() {
        let dir = TempDir::new().unwrap();
        let analyzer = analyzer_in(&dir);

        let report = analyzer.analyze_with("天气", &Lexicon::builtin());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["mainEmotion"].is_null());
        assert!(json["conclusion"].is_null());
    }
}
