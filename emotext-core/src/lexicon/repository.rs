//! 词典仓库
//!
//! 负责词典的来源链与一次性初始化：
//! 1. 新鲜的本地缓存
//! 2. 随包词表（与默认词典合并后写回缓存）
//! 3. 远程语义扩充（启用时）
//! 4. 内置默认词典
//!
//! 任何一级失败都只记录警告并进入下一级，调用方最差拿到内置默认词典。

use crate::config::EmotextConfig;
use crate::lexicon::cache::{LexiconCache, LexiconSnapshot};
use crate::lexicon::enrichment::{HttpSemanticClient, LexiconEnricher};
use crate::lexicon::model::{DegreeTerms, EmotionCategory, Lexicon, LexiconData};
use crate::lexicon::parser::WordListParser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::OnceCell;

/// 随包词表合并规则：正面词中含有任一标记子串的词并入对应类别
const MERGE_MARKERS: [(EmotionCategory, &[&str]); 4] = [
    (EmotionCategory::Confidence, &["信心", "重要", "成功", "发展"]),
    (EmotionCategory::Achievement, &["成功", "实现", "完成", "突破"]),
    (EmotionCategory::Determination, &["决心", "目标", "意志", "坚定"]),
    (EmotionCategory::Unity, &["团结", "合作", "共同", "一致"]),
];

/// 从随包词表读到的内容
#[derive(Debug, Clone, Default)]
pub struct BundledLexicon {
    /// 正面词表（文件缺失时为 `None`）
    pub positive: Option<Vec<String>>,
    /// 程度词表（文件缺失时为 `None`）
    pub degree: Option<DegreeTerms>,
}

impl BundledLexicon {
    /// 两个文件都不可用
    pub fn is_unavailable(&self) -> bool {
        self.positive.is_none() && self.degree.is_none()
    }

    /// 与默认词典合并
    ///
    /// 四个积极类别追加带标记的正面词；程度词非空时整体替换；
    /// 消极、否定、转折保持默认。结果去重并过滤词长。
    pub fn merge_into_default(&self) -> Lexicon {
        let mut data = LexiconData::builtin();

        if let Some(positive) = &self.positive {
            for (category, markers) in MERGE_MARKERS {
                let matched = positive
                    .iter()
                    .filter(|word| markers.iter().any(|m| word.contains(m)))
                    .cloned();
                data.category_mut(category).extend(matched);
            }
        }

        if let Some(degree) = &self.degree {
            if !degree.is_empty() {
                data.degree = degree.clone();
            }
        }

        Lexicon::new(data.optimize())
    }
}

/// 词典来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconSource {
    /// 本地缓存
    Cache,
    /// 随包词表
    Bundled,
    /// 远程扩充
    Enrichment,
    /// 内置默认
    Builtin,
}

/// 词典仓库
pub struct LexiconRepository {
    cache: LexiconCache,
    positive_words_path: PathBuf,
    degree_words_path: PathBuf,
    enricher: Option<LexiconEnricher>,
    initialized: OnceCell<Arc<Lexicon>>,
    refreshed: RwLock<Option<Arc<Lexicon>>>,
    sourcing_attempts: AtomicUsize,
}

impl LexiconRepository {
    /// 创建仓库（不启用远程扩充）
    pub fn new(
        cache: LexiconCache,
        positive_words_path: impl Into<PathBuf>,
        degree_words_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cache,
            positive_words_path: positive_words_path.into(),
            degree_words_path: degree_words_path.into(),
            enricher: None,
            initialized: OnceCell::new(),
            refreshed: RwLock::new(None),
            sourcing_attempts: AtomicUsize::new(0),
        }
    }

    /// 按配置创建仓库
    ///
    /// 扩充客户端创建失败时记录警告并关闭扩充。
    pub fn from_config(config: &EmotextConfig) -> Self {
        let interval = chrono::Duration::hours(i64::from(config.lexicon.update_interval_hours));
        let cache = LexiconCache::new(config.lexicon.cache_path.clone(), interval);
        let repository = Self::new(
            cache,
            config.lexicon.positive_words_path.clone(),
            config.lexicon.degree_words_path.clone(),
        );

        if !config.enrichment.enabled {
            return repository;
        }

        let enrichment = &config.enrichment;
        match HttpSemanticClient::new(
            enrichment.endpoint.clone(),
            enrichment.resolved_api_key(),
            enrichment.timeout(),
        ) {
            Ok(client) => repository.with_enricher(
                LexiconEnricher::new(Arc::new(client), enrichment.timeout())
                    .with_total_timeout(enrichment.total_timeout()),
            ),
            Err(e) => {
                tracing::warn!("语义扩充客户端创建失败，已关闭扩充: {}", e);
                repository
            }
        }
    }

    /// 启用远程扩充
    pub fn with_enricher(mut self, enricher: LexiconEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// 是否启用远程扩充
    pub fn enrichment_enabled(&self) -> bool {
        self.enricher.is_some()
    }

    /// 初始化词典
    ///
    /// 只有第一次调用会执行来源链；并发调用者等待同一结果，
    /// 之后的调用直接返回缓存的快照。
    pub async fn initialize(&self) -> Arc<Lexicon> {
        self.initialized
            .get_or_init(|| async {
                let (lexicon, source) = self.run_sourcing_chain(true).await;
                tracing::info!("词典初始化完成: 来源={:?}, 词条={}", source, lexicon.term_count());
                Arc::new(lexicon)
            })
            .await
            .clone()
    }

    /// 已初始化的快照（未完成时为 `None`）
    pub fn current(&self) -> Option<Arc<Lexicon>> {
        let refreshed = self
            .refreshed
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        refreshed.or_else(|| self.initialized.get().cloned())
    }

    /// 分析用的快照：刷新过则取最新，否则等待初始化
    pub async fn snapshot(&self) -> Arc<Lexicon> {
        match self.current() {
            Some(lexicon) => lexicon,
            None => self.initialize().await,
        }
    }

    /// 重新获取词典
    ///
    /// 跳过缓存新鲜度检查，生成新的快照；已经发出的快照不受影响。
    pub async fn refresh(&self) -> Arc<Lexicon> {
        let (lexicon, source) = self.run_sourcing_chain(false).await;
        tracing::info!("词典已刷新: 来源={:?}, 词条={}", source, lexicon.term_count());

        let lexicon = Arc::new(lexicon);
        *self
            .refreshed
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(lexicon.clone());
        lexicon
    }

    /// 获取远程扩充后的词典
    ///
    /// 未启用或失败时返回内置默认词典。
    pub async fn fetch_latest_dictionary(&self) -> Lexicon {
        let Some(enricher) = &self.enricher else {
            tracing::debug!("语义扩充未启用，使用默认词典");
            return Lexicon::builtin();
        };

        match enricher.fetch_latest_dictionary().await {
            Ok(lexicon) => lexicon,
            Err(e) => {
                tracing::warn!("语义词典获取失败，使用默认词典: {}", e);
                Lexicon::builtin()
            }
        }
    }

    /// 已执行来源链的次数
    pub fn sourcing_attempts(&self) -> usize {
        self.sourcing_attempts.load(Ordering::SeqCst)
    }

    /// 读取随包词表
    pub async fn load_bundled(&self) -> BundledLexicon {
        let positive = match WordListParser::load_words(&self.positive_words_path).await {
            Ok(words) => Some(words),
            Err(e) => {
                tracing::warn!("无法加载正面词表: {}", e);
                None
            }
        };

        let degree = match WordListParser::load_degree(&self.degree_words_path).await {
            Ok(degree) => Some(degree),
            Err(e) => {
                tracing::warn!("无法加载程度词表: {}", e);
                None
            }
        };

        BundledLexicon { positive, degree }
    }

    async fn run_sourcing_chain(&self, use_cache: bool) -> (Lexicon, LexiconSource) {
        self.sourcing_attempts.fetch_add(1, Ordering::SeqCst);

        if use_cache {
            if let Some(snapshot) = self.cache.load_fresh().await {
                return (snapshot.dictionary, LexiconSource::Cache);
            }
        }

        let bundled = self.load_bundled().await;
        if !bundled.is_unavailable() {
            let lexicon = bundled.merge_into_default();
            self.persist(&lexicon).await;
            return (lexicon, LexiconSource::Bundled);
        }

        if let Some(enricher) = &self.enricher {
            match enricher.fetch_latest_dictionary().await {
                Ok(lexicon) => {
                    self.persist(&lexicon).await;
                    return (lexicon, LexiconSource::Enrichment);
                }
                Err(e) => tracing::warn!("语义词典获取失败: {}", e),
            }
        }

        tracing::warn!("使用默认词典");
        (Lexicon::builtin(), LexiconSource::Builtin)
    }

    async fn persist(&self, lexicon: &Lexicon) {
        let snapshot = LexiconSnapshot::now(lexicon.clone());
        if let Err(e) = self.cache.save(&snapshot).await {
            tracing::warn!("保存词典到本地缓存失败: {}", e);
        }
    }
}
