//! 词表文件解析器
//!
//! 解析随包分发的行式词表：每行一个词，`#` 开头为注释，空行忽略。
//! 程度词表可选地用 `[high]` / `[medium]` / `[low]` 分节。

use crate::error::{EmotextError, EmotextResult};
use crate::lexicon::model::{DegreeLevel, DegreeTerms};
use std::path::Path;

/// 词表解析器
pub struct WordListParser;

impl WordListParser {
    /// 解析普通词表
    ///
    /// 格式：
    /// ```text
    /// # 注释
    /// 信心十足
    /// 圆满成功
    /// ```
    ///
    /// 行内只取第一个空白分隔字段，兼容 `词 权重` 形式的旧词表。
    pub fn parse_words(content: &str) -> Vec<String> {
        content
            .lines()
            .filter_map(Self::term_of)
            .map(str::to_string)
            .collect()
    }

    /// 解析程度词表
    ///
    /// 格式：
    /// ```text
    /// [high]
    /// 极其
    /// [low]
    /// 略微
    /// ```
    ///
    /// 出现在任何分节标题之前的词归入 `medium`。
    pub fn parse_degree(content: &str) -> EmotextResult<DegreeTerms> {
        let mut degree = DegreeTerms::default();
        let mut current = DegreeLevel::Medium;

        for (line_num, raw) in content.lines().enumerate() {
            let line = raw.trim();

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = DegreeLevel::from_name(header).ok_or_else(|| EmotextError::LexiconParse {
                    line: line_num + 1,
                    reason: format!("unknown degree section '{}'", header),
                })?;
                continue;
            }

            if let Some(term) = Self::term_of(line) {
                degree.level_mut(current).push(term.to_string());
            }
        }

        Ok(degree)
    }

    /// 读取普通词表文件
    pub async fn load_words(path: &Path) -> EmotextResult<Vec<String>> {
        let content = Self::read(path).await?;
        Ok(Self::parse_words(&content))
    }

    /// 读取程度词表文件
    pub async fn load_degree(path: &Path) -> EmotextResult<DegreeTerms> {
        let content = Self::read(path).await?;
        Self::parse_degree(&content)
    }

    async fn read(path: &Path) -> EmotextResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EmotextError::LexiconFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn term_of(line: &str) -> Option<&str> {
        let line = line.trim();

        // 跳过空行和注释
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        line.split_whitespace().next()
    }
}
