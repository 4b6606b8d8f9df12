//! 主题句规则
//!
//! 句子切分、有效句判断与分类所用的预编译正则。

use once_cell::sync::Lazy;
use regex::Regex;

/// 最短有效句（字符）
pub const MIN_SENTENCE_CHARS: usize = 10;
/// 最长有效句（字符）
pub const MAX_SENTENCE_CHARS: usize = 50;

/// 句末标点
pub const TERMINAL_MARKS: &[char] = &['。', '！', '？', '；', '.', '!', '?', ';'];

/// 不能作为句首的虚词
const LEADING_FUNCTION_CHARS: &[char] = &[
    '的', '了', '和', '是', '就', '都', '而', '及', '与', '这', '那', '有', '在', '中', '为',
];

/// 强调关键词（每出现一个加 0.1）
pub const EMPHASIS_KEYWORDS: &[&str] = &[
    "表明", "说明", "证明", "体现", "反映",
    "重要", "关键", "核心", "主要", "基本",
    "特点", "特征", "特色", "优势", "问题",
];

/// 句子：非句末字符串 + 可选句末标点
pub static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^。！？；.!?;]+[。！？；.!?;]*").expect("valid sentence regex"));

/// 主题句：序号开头、"关于/对于/就对/针对" 开头，或含 主/题/重/点
pub static TOPIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[一二三四五六七八九十][、.\s]|^第[一二三四五六七八九十]|[主题重点]|^关于|^对于|^[就针]对")
        .expect("valid topic regex")
});

/// 结论句
pub static CONCLUSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"总之|总结|概括|小结|归纳|综上|结论|总的来说|最后").expect("valid conclusion regex")
});

/// 要点句
pub static KEY_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"关键|核心|要点|特点|特征|特色|主要|基本|重要|关于|表明").expect("valid key point regex")
});

/// 是否为有效句
///
/// 长度 10~50 字符、以句末标点结尾、不以虚词开头。
pub fn is_valid_sentence(sentence: &str) -> bool {
    let len = sentence.chars().count();
    if !(MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len) {
        return false;
    }

    let starts_with_function_char = sentence
        .chars()
        .next()
        .map_or(false, |ch| LEADING_FUNCTION_CHARS.contains(&ch));
    let ends_with_terminal = sentence
        .chars()
        .last()
        .map_or(false, |ch| TERMINAL_MARKS.contains(&ch));

    !starts_with_function_char && ends_with_terminal
}

/// 强调关键词得分，上限 1.0
pub fn keyword_density(sentence: &str) -> f64 {
    let matches = EMPHASIS_KEYWORDS
        .iter()
        .filter(|kw| sentence.contains(*kw))
        .count();
    (matches as f64 * 0.1).min(1.0)
}
