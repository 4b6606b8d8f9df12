//! 主题句提取模块

pub mod extractor;
pub mod patterns;

pub use extractor::{
    ScoredSentence, ThemeCategory, ThemeExtractor, ThemeReport, ThemeSentence, DEFAULT_MAX_THEMES,
};
