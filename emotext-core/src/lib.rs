//! Emotext Core Engine
//!
//! 基于词典的中文文本情绪分析与主题句提取引擎

#![warn(rust_2018_idioms)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod keywords;
pub mod lexicon;
pub mod scoring;
pub mod segment;
pub mod theme;

// Re-export key types
pub use analyzer::{DocumentReport, EmotionAnalyzer, EmotionReport};
pub use config::EmotextConfig;
pub use error::{EmotextError, EmotextResult};
pub use keywords::{EmotionKeywords, KeywordCount, KeywordExtractor};
pub use lexicon::{EmotionCategory, Lexicon, LexiconRepository};
pub use scoring::{EmotionScores, MainEmotion, ScoringEngine};
pub use segment::{Segmenter, Token};
pub use theme::{ThemeExtractor, ThemeReport, ThemeSentence};

/// 初始化日志系统
///
/// 生产模式: 静默运行
/// 调试模式 (--features debug-logs): 由 EMOTEXT_LOG 控制级别，默认 warn
///
/// 注意: 此函数可以安全地多次调用
pub fn init_logging() {
    #[cfg(feature = "debug-logs")]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_env("EMOTEXT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // 使用 try_init() 代替 init()，避免重复初始化时 panic
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .try_init();
    }
}
