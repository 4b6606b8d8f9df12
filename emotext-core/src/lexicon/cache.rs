//! 词典持久化缓存
//!
//! 单条记录 `{dictionary, lastUpdateTime}`，以 JSON 整体读写。
//! 读取失败或内容损坏一律视为未命中。

use crate::error::{EmotextError, EmotextResult};
use crate::lexicon::model::Lexicon;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 缓存记录的固定键名（同时作为默认文件名）
pub const CACHE_KEY: &str = "emotionDictionary";

/// 默认缓存文件名：`emotionDictionary.json`
pub fn default_file_name() -> String {
    format!("{}.json", CACHE_KEY)
}

/// 默认更新间隔（小时）
pub const DEFAULT_UPDATE_INTERVAL_HOURS: u32 = 24;

/// 持久化的词典快照
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconSnapshot {
    /// 词典内容
    pub dictionary: Lexicon,
    /// 最后更新时间（Unix 毫秒）
    pub last_update_time: i64,
    /// 词典版本（可为空）
    #[serde(default)]
    pub version: String,
}

impl LexiconSnapshot {
    /// 以当前时间创建快照
    pub fn now(dictionary: Lexicon) -> Self {
        Self {
            dictionary,
            last_update_time: Utc::now().timestamp_millis(),
            version: String::new(),
        }
    }

    /// 最后更新时间
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_update_time)
    }

    /// 在 `now` 时刻是否仍然新鲜（`now - lastUpdateTime <= interval`）
    pub fn is_fresh_at(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        match self.updated_at() {
            Some(updated) => now.signed_duration_since(updated) <= interval,
            None => false,
        }
    }
}

/// 词典缓存
#[derive(Debug, Clone)]
pub struct LexiconCache {
    path: PathBuf,
    update_interval: Duration,
}

impl LexiconCache {
    /// 创建缓存
    pub fn new(path: impl Into<PathBuf>, update_interval: Duration) -> Self {
        Self {
            path: path.into(),
            update_interval,
        }
    }

    /// 缓存文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 更新间隔
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// 读取快照
    ///
    /// 文件不存在、无法读取或无法解析时返回 `None`。
    pub async fn load(&self) -> Option<LexiconSnapshot> {
        match self.try_load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("从本地缓存加载词典失败: {}", e);
                None
            }
        }
    }

    async fn try_load(&self) -> EmotextResult<Option<LexiconSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| EmotextError::Cache(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(snapshot))
    }

    /// 读取仍然新鲜的快照
    pub async fn load_fresh(&self) -> Option<LexiconSnapshot> {
        let snapshot = self.load().await?;
        if snapshot.is_fresh_at(Utc::now(), self.update_interval) {
            Some(snapshot)
        } else {
            tracing::info!("缓存词典已过期: {:?}", snapshot.updated_at());
            None
        }
    }

    /// 写入快照
    pub async fn save(&self, snapshot: &LexiconSnapshot) -> EmotextResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec(snapshot)?;
        tokio::fs::write(&self.path, json).await?;

        tracing::debug!("词典已写入缓存: {}", self.path.display());
        Ok(())
    }
}
