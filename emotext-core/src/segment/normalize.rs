//! 文本预处理
//!
//! 规范化空白、剔除允许集合之外的字符、把次要标点换成空格。

/// 句末标点（分句用）
pub const SENTENCE_TERMINALS: &[char] = &['。', '！', '？', '\n'];

/// 次要标点，预处理时替换为空格
const MINOR_PUNCTUATION: &[char] = &['，', '、', '；', '：'];

/// 保留的标点
const ALLOWED_PUNCTUATION: &[char] = &[
    '。', '！', '？', '，', '、', '；', '：', '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '（', '）', '【', '】', '《', '》',
];

/// 是否为 CJK 统一表意文字（U+4E00 ~ U+9FA5）
pub fn is_cjk(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&ch)
}

fn is_allowed(ch: char) -> bool {
    is_cjk(ch) || ch.is_whitespace() || ALLOWED_PUNCTUATION.contains(&ch)
}

/// 预处理文本
///
/// 1. 连续空白折叠为一个空格
/// 2. 删除中文、空白和常用标点以外的字符
/// 3. 次要标点（，、；：）替换为空格
/// 4. 去掉首尾空白
pub fn normalize(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(ch);
            in_space = false;
        }
    }

    collapsed
        .chars()
        .filter(|ch| is_allowed(*ch))
        .map(|ch| if MINOR_PUNCTUATION.contains(&ch) { ' ' } else { ch })
        .collect::<String>()
        .trim()
        .to_string()
}

/// 按句末标点分句，丢弃空句
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_TERMINALS)
        .filter(|s| !s.trim().is_empty())
        .collect()
}
