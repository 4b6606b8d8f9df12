//! 远程语义扩充
//!
//! 从外部语义服务获取情感词及其同义、反义、上位、下位关系，
//! 在默认词典基础上追加同义词和上位情感词。扩充只增不减。

use crate::error::{EmotextError, EmotextResult};
use crate::lexicon::model::{EmotionCategory, Lexicon, LexiconData, Polarity};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 积极情感义原
pub const POSITIVE_SEMEMES: &[&str] = &["POS", "happiness", "satisfaction", "confidence"];

/// 消极情感义原
pub const NEGATIVE_SEMEMES: &[&str] = &["NEG", "anger", "sadness", "fear", "anxiety"];

/// 情感字符（用于判断上位词是否为情感词）
const EMOTION_CHARS: &[char] = &[
    '情', '感', '好', '坏', '爱', '恨', '喜', '怒', '哀', '乐', '积', '极', '消', '正', '面', '负',
    '满', '意', '不',
];

/// 词语的语义关系
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticRelations {
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub hypernyms: Vec<String>,
    #[serde(default)]
    pub hyponyms: Vec<String>,
}

/// 按极性收集的情感词（保持插入顺序、去重）
#[derive(Debug, Clone, Default)]
pub struct EmotionWordSets {
    positive: Vec<String>,
    negative: Vec<String>,
    seen: HashMap<Polarity, HashSet<String>>,
}

impl EmotionWordSets {
    /// 加入一个词
    pub fn insert(&mut self, polarity: Polarity, word: String) {
        if self.seen.entry(polarity).or_default().insert(word.clone()) {
            match polarity {
                Polarity::Positive => self.positive.push(word),
                Polarity::Negative => self.negative.push(word),
            }
        }
    }

    pub fn contains(&self, polarity: Polarity, word: &str) -> bool {
        self.seen.get(&polarity).map_or(false, |set| set.contains(word))
    }

    /// 词的极性（同时属于两者时积极优先）
    pub fn polarity_of(&self, word: &str) -> Option<Polarity> {
        if self.contains(Polarity::Positive, word) {
            Some(Polarity::Positive)
        } else if self.contains(Polarity::Negative, word) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    /// 全部情感词，先积极后消极
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.positive.iter().chain(self.negative.iter())
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 语义服务
#[async_trait]
pub trait SemanticSource: Send + Sync {
    /// 按义原查询情感词
    async fn emotion_words(&self, sememe: &str) -> EmotextResult<Vec<String>>;

    /// 查询单个词的语义关系
    async fn word_relations(&self, word: &str) -> EmotextResult<SemanticRelations>;
}

#[derive(Debug, Serialize)]
struct SememeRequest<'a> {
    sememe: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct WordsResponse {
    #[serde(default)]
    words: Vec<String>,
}

#[derive(Debug, Serialize)]
struct WordRequest<'a> {
    word: &'a str,
}

/// 基于 HTTP 的语义服务客户端
///
/// 请求格式仅作示意：
/// - `POST {endpoint}words` `{sememe, language}` → `{words: [...]}`
/// - `POST {endpoint}word_semantic` `{word}` → `{synonyms, antonyms, hypernyms, hyponyms}`
#[derive(Debug, Clone)]
pub struct HttpSemanticClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSemanticClient {
    /// 创建客户端
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> EmotextResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let mut endpoint = endpoint.into();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.post(format!("{}{}", self.endpoint, path));
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl SemanticSource for HttpSemanticClient {
    async fn emotion_words(&self, sememe: &str) -> EmotextResult<Vec<String>> {
        let response = self
            .post("words")
            .json(&SememeRequest {
                sememe,
                language: "zh",
            })
            .send()
            .await?
            .error_for_status()?;

        let body: WordsResponse = response.json().await?;
        Ok(body.words)
    }

    async fn word_relations(&self, word: &str) -> EmotextResult<SemanticRelations> {
        let response = self
            .post("word_semantic")
            .json(&WordRequest { word })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// 进程内语义关系缓存（只追加）
#[derive(Debug, Default)]
pub struct SemanticCache {
    entries: Mutex<HashMap<String, SemanticRelations>>,
}

impl SemanticCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<SemanticRelations> {
        self.lock().get(word).cloned()
    }

    pub fn insert(&self, word: String, relations: SemanticRelations) {
        self.lock().entry(word).or_insert(relations);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SemanticRelations>> {
        // 缓存只做插入，持锁线程 panic 后数据仍然可用
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 简单的情感词判断
pub fn is_emotion_word(word: &str) -> bool {
    word.chars().any(|ch| EMOTION_CHARS.contains(&ch))
}

/// 整个扩充过程默认最多允许的单次请求超时倍数
const DEFAULT_TOTAL_TIMEOUT_FACTOR: u32 = 3;

/// 词典扩充器
pub struct LexiconEnricher {
    source: Arc<dyn SemanticSource>,
    cache: SemanticCache,
    timeout: Duration,
    total_timeout: Duration,
}

impl LexiconEnricher {
    /// 创建扩充器
    ///
    /// `timeout` 限制单次请求；整个扩充过程默认限制为它的 3 倍。
    pub fn new(source: Arc<dyn SemanticSource>, timeout: Duration) -> Self {
        Self {
            source,
            cache: SemanticCache::new(),
            timeout,
            total_timeout: timeout * DEFAULT_TOTAL_TIMEOUT_FACTOR,
        }
    }

    /// 设置整个扩充过程的超时
    pub fn with_total_timeout(mut self, total_timeout: Duration) -> Self {
        self.total_timeout = total_timeout;
        self
    }

    /// 语义关系缓存
    pub fn cache(&self) -> &SemanticCache {
        &self.cache
    }

    /// 获取扩充后的词典
    ///
    /// 失败、超时或没有拿到任何情感词时返回错误，由调用方决定降级。
    pub async fn fetch_latest_dictionary(&self) -> EmotextResult<Lexicon> {
        within(self.total_timeout, self.enrich()).await
    }

    async fn enrich(&self) -> EmotextResult<Lexicon> {
        let words = self.fetch_emotion_words().await?;
        if words.is_empty() {
            return Err(EmotextError::EnrichmentEmpty);
        }

        let relations = self.fetch_semantic_relations(&words).await;

        tracing::info!(
            "语义扩充: {} 个情感词, {} 组语义关系",
            words.len(),
            relations.len()
        );

        Ok(Self::build_emotion_dictionary(&words, &relations))
    }

    /// 按义原获取情感词
    ///
    /// 单个义原返回非成功状态时跳过；传输错误或超时则整体失败。
    pub async fn fetch_emotion_words(&self) -> EmotextResult<EmotionWordSets> {
        let mut words = EmotionWordSets::default();

        for (polarity, sememes) in [
            (Polarity::Positive, POSITIVE_SEMEMES),
            (Polarity::Negative, NEGATIVE_SEMEMES),
        ] {
            for sememe in sememes {
                match self.bounded(self.source.emotion_words(sememe)).await {
                    Ok(found) => {
                        for word in found {
                            words.insert(polarity, word);
                        }
                    }
                    Err(EmotextError::EnrichmentStatus { status, url }) => {
                        tracing::warn!("义原 {} 查询失败: {} {}", sememe, status, url);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(words)
    }

    /// 获取每个情感词的语义关系
    ///
    /// 已缓存的词不再请求；单个词失败时记录并跳过。
    pub async fn fetch_semantic_relations(
        &self,
        words: &EmotionWordSets,
    ) -> Vec<(String, SemanticRelations)> {
        let mut relations = Vec::new();

        for word in words.all() {
            if let Some(cached) = self.cache.get(word) {
                relations.push((word.clone(), cached));
                continue;
            }

            match self.bounded(self.source.word_relations(word)).await {
                Ok(found) => {
                    self.cache.insert(word.clone(), found.clone());
                    relations.push((word.clone(), found));
                }
                Err(e) => {
                    tracing::warn!("获取词语\"{}\"的语义关系失败: {}", word, e);
                }
            }
        }

        relations
    }

    /// 在默认词典上追加扩充词
    ///
    /// 积极词的同义词并入 confidence，消极词的同义词并入 challenge；
    /// 上位词只有本身像情感词时才并入。最后统一去重并过滤词长。
    pub fn build_emotion_dictionary(
        words: &EmotionWordSets,
        relations: &[(String, SemanticRelations)],
    ) -> Lexicon {
        let mut data = LexiconData::builtin();

        for (word, rel) in relations {
            let target = match words.polarity_of(word) {
                Some(Polarity::Positive) => EmotionCategory::Confidence,
                Some(Polarity::Negative) => EmotionCategory::Challenge,
                None => continue,
            };

            let list = data.category_mut(target);
            list.extend(rel.synonyms.iter().cloned());
            list.extend(
                rel.hypernyms
                    .iter()
                    .filter(|h| is_emotion_word(h))
                    .cloned(),
            );
        }

        Lexicon::new(data.optimize())
    }

    async fn bounded<T>(&self, fut: impl Future<Output = EmotextResult<T>>) -> EmotextResult<T> {
        within(self.timeout, fut).await
    }
}

async fn within<T>(
    limit: Duration,
    fut: impl Future<Output = EmotextResult<T>>,
) -> EmotextResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(EmotextError::EnrichmentTimeout {
            millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}
