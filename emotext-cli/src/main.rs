//! emotext - 中文文本情绪分析命令行工具
//!
//! ```bash
//! # 分析一段文字
//! emotext "我们坚定信心，克服困难，取得了重大成功！"
//!
//! # 分析文件，输出可读文本
//! emotext --file report.txt --format text
//!
//! # 忽略缓存重新获取词典
//! emotext --refresh "团结协作，共同发展"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use emotext_core::{DocumentReport, EmotextConfig, EmotextError, EmotionAnalyzer};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, info};

/// Emotext - 基于词典的中文情绪分析与主题句提取
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// 待分析文本（省略时读取 --file 或标准输入）
    text: Option<String>,

    /// 从文件读取文本
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// 配置文件路径（覆盖 EMOTEXT_CONFIG）
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 主题数上限（默认取配置）
    #[arg(long, value_name = "N")]
    max_themes: Option<usize>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// 跳过缓存，重新获取词典
    #[arg(long)]
    refresh: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("EMOTEXT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => EmotextConfig::load_from(path),
        None => EmotextConfig::load(),
    }
    .context("failed to load configuration")?;

    let text = read_input(&args)?;
    if text.trim().is_empty() {
        anyhow::bail!(EmotextError::EmptyInput);
    }

    let analyzer = EmotionAnalyzer::from_config(&config);
    if args.refresh {
        let lexicon = analyzer.repository().refresh().await;
        info!("词典已刷新: {} 个词条", lexicon.term_count());
    }

    let max_themes = args.max_themes.unwrap_or(config.themes.max_themes);
    debug!("分析 {} 字符, max_themes={}", text.chars().count(), max_themes);

    let report = analyzer.analyze_document(&text, max_themes).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("failed to read standard input")?;
    Ok(text)
}

fn render_text(report: &DocumentReport) -> String {
    let emotion = &report.emotion;
    let mut out = String::new();

    match &emotion.main_emotion {
        Some(main) => out.push_str(&format!("主情绪: {} ({:.2})\n", main.emotion.label(), main.score)),
        None => out.push_str("主情绪: 中性\n"),
    }
    out.push_str(&format!("强度: {:.2}\n", emotion.intensity));

    out.push_str("得分:\n");
    for (category, score) in emotion.scores.iter() {
        out.push_str(&format!("  {}  {:.2}\n", category.label(), score));
    }

    if let Some(conclusion) = &emotion.conclusion {
        out.push_str(&format!("结论: {}\n", conclusion));
    }

    for (label, keywords) in [
        ("正面关键词", &emotion.keywords.positive),
        ("负面关键词", &emotion.keywords.negative),
    ] {
        if keywords.is_empty() {
            continue;
        }
        let joined: Vec<String> = keywords
            .iter()
            .map(|k| format!("{}×{}", k.keyword, k.count))
            .collect();
        out.push_str(&format!("{}: {}\n", label, joined.join(", ")));
    }

    let themes = &report.themes;
    for (label, bucket) in [
        ("主要主题", &themes.main_themes),
        ("相关主题", &themes.sub_themes),
        ("关键要点", &themes.key_points),
    ] {
        if bucket.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", label));
        for theme in bucket {
            out.push_str(&format!("  [{:.2}] {}\n", theme.score, theme.phrase));
        }
    }

    out
}
