//! Emotext 配置模块
//!
//! 统一的配置管理，从 ~/.config/emotext/config.toml 加载

use crate::error::{EmotextError, EmotextResult};
use crate::lexicon::cache::{default_file_name, DEFAULT_UPDATE_INTERVAL_HOURS};
use crate::scoring::{CategoryWeights, ContextWeights};
use crate::theme::DEFAULT_MAX_THEMES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 覆盖配置文件路径的环境变量
pub const CONFIG_ENV: &str = "EMOTEXT_CONFIG";

/// 覆盖扩充服务密钥的环境变量
pub const ENRICHMENT_KEY_ENV: &str = "EMOTEXT_ENRICHMENT_KEY";

/// Emotext 完整配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotextConfig {
    /// 词典来源配置
    pub lexicon: LexiconConfig,
    /// 远程扩充配置
    pub enrichment: EnrichmentConfig,
    /// 评分配置
    pub scoring: ScoringConfig,
    /// 主题提取配置
    pub themes: ThemeConfig,
}

/// 词典来源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// 正面词表
    pub positive_words_path: PathBuf,
    /// 程度词表
    pub degree_words_path: PathBuf,
    /// 持久化缓存
    pub cache_path: PathBuf,
    /// 缓存有效期（小时）
    pub update_interval_hours: u32,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        let data_dir = app_dir(dirs::config_dir()).join("lexicon");
        let cache_dir = app_dir(dirs::cache_dir());

        Self {
            positive_words_path: data_dir.join("positive.txt"),
            degree_words_path: data_dir.join("degree.txt"),
            cache_path: cache_dir.join(default_file_name()),
            update_interval_hours: DEFAULT_UPDATE_INTERVAL_HOURS,
        }
    }
}

/// 远程扩充配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// 是否启用（默认关闭）
    pub enabled: bool,
    /// 服务地址（示意）
    pub endpoint: String,
    /// 访问密钥
    pub api_key: Option<String>,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
    /// 整个扩充过程的超时（秒）
    pub total_timeout_secs: u64,
}

impl EnrichmentConfig {
    /// 实际使用的密钥，环境变量优先
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(ENRICHMENT_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// 整体超时，不小于单次超时
    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(self.total_timeout_secs).max(self.timeout())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.hownet.com/v2/".to_string(),
            api_key: None,
            timeout_secs: 10,
            total_timeout_secs: 30,
        }
    }
}

/// 评分配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// 类别权重
    pub weights: CategoryWeights,
    /// 上下文权重（评分暂未使用）
    pub context: ContextWeights,
}

/// 主题提取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// 主题数上限（每类 ceil(max_themes / 3) 条）
    pub max_themes: usize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            max_themes: DEFAULT_MAX_THEMES,
        }
    }
}

impl EmotextConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时使用默认配置。
    pub fn load() -> EmotextResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 从指定路径加载
    pub fn load_from(path: &Path) -> EmotextResult<Self> {
        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| EmotextError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!("📋 加载配置成功: {:?}", path);
        tracing::debug!(
            "词典: positive={:?}, degree={:?}, cache={:?}, 扩充={}",
            config.lexicon.positive_words_path,
            config.lexicon.degree_words_path,
            config.lexicon.cache_path,
            config.enrichment.enabled
        );
        Ok(config)
    }

    /// 保存配置文件
    pub fn save(&self) -> EmotextResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// 保存到指定路径
    pub fn save_to(&self, path: &Path) -> EmotextResult<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| EmotextError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content)?;

        tracing::info!("保存配置成功: {:?}", path);
        Ok(())
    }

    /// 获取配置文件路径
    pub fn config_path() -> EmotextResult<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir().ok_or(EmotextError::ConfigDirUnavailable)?;
        Ok(config_dir.join("emotext").join("config.toml"))
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("emotext")
}
