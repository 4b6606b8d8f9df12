//! 情绪词典模块
//!
//! Lexicon Repository - 版本化情绪词典的加载、合并、扩充与缓存

pub mod cache;
pub mod enrichment;
pub mod model;
pub mod parser;
pub mod repository;

// 导出核心类型
pub use cache::{LexiconCache, LexiconSnapshot};
pub use enrichment::{HttpSemanticClient, LexiconEnricher, SemanticRelations, SemanticSource};
pub use model::{DegreeLevel, EmotionCategory, Lexicon, LexiconData, Polarity};
pub use parser::WordListParser;
pub use repository::{BundledLexicon, LexiconRepository, LexiconSource};
