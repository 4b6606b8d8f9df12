//! Segmenter - 基于词典的分词器
//!
//! 贪心最长匹配（4 → 3 → 2 字），未命中时输出单字；
//! 另外输出句内所有命中词典的 2~4 字片段。两类 token 会重叠，评分时都计数。

use crate::lexicon::model::{Lexicon, MAX_TERM_CHARS, MIN_TERM_CHARS};
use crate::segment::normalize::{normalize, split_sentences};

/// Token 来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// 贪心分词结果
    Greedy,
    /// N-gram 候选
    Ngram,
}

/// 分词结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token 文本（1~4 个字符）
    pub text: String,
    /// 来源
    pub kind: TokenKind,
}

impl Token {
    /// 创建新的 Token
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Segmenter - 词典分词器
pub struct Segmenter;

impl Segmenter {
    /// 对文本分词
    ///
    /// 规则：
    /// - 先预处理，再按句末标点分句
    /// - 每句先输出贪心分词结果，再输出 N-gram 候选
    /// - 纯函数：相同输入总是得到相同输出
    pub fn segment(text: &str, lexicon: &Lexicon) -> Vec<Token> {
        let normalized = normalize(text);
        let mut tokens = Vec::new();

        for sentence in split_sentences(&normalized) {
            let chars: Vec<char> = sentence.chars().collect();
            tokens.extend(Self::greedy(&chars, lexicon));
            tokens.extend(Self::ngrams(&chars, lexicon, MIN_TERM_CHARS, MAX_TERM_CHARS));
        }

        tracing::debug!("分词完成: {} 字符 → {} tokens", text.chars().count(), tokens.len());
        tokens
    }

    /// 贪心最长匹配
    ///
    /// 每个位置依次尝试 4、3、2 字，命中任一词表即输出并跳过；
    /// 否则输出单字。不回溯。
    pub fn greedy(chars: &[char], lexicon: &Lexicon) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let matched = (MIN_TERM_CHARS..=MAX_TERM_CHARS)
                .rev()
                .filter(|len| i + len <= chars.len())
                .map(|len| chars[i..i + len].iter().collect::<String>())
                .find(|word| lexicon.contains(word));

            match matched {
                Some(word) => {
                    i += word.chars().count();
                    tokens.push(Token::new(word, TokenKind::Greedy));
                }
                None => {
                    tokens.push(Token::new(chars[i].to_string(), TokenKind::Greedy));
                    i += 1;
                }
            }
        }

        tokens
    }

    /// 提取命中词典的 N-gram
    ///
    /// 按长度从短到长、从左到右输出，与贪心结果的边界无关。
    pub fn ngrams(chars: &[char], lexicon: &Lexicon, min_len: usize, max_len: usize) -> Vec<Token> {
        let mut tokens = Vec::new();

        for len in min_len..=max_len {
            if len > chars.len() {
                break;
            }
            for window in chars.windows(len) {
                let gram: String = window.iter().collect();
                if lexicon.contains(&gram) {
                    tokens.push(Token::new(gram, TokenKind::Ngram));
                }
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_greedy_longest_match() {
        let lexicon = Lexicon::builtin();
        let tokens = Segmenter::greedy(&chars("推进一体化建设"), &lexicon);
        assert_eq!(texts(&tokens), vec!["推进", "一体化", "建", "设"]);
    }

    #[test]
    fn test_greedy_unknown_chars() {
        let lexicon = Lexicon::builtin();
        let tokens = Segmenter::greedy(&chars("天气晴"), &lexicon);
        assert_eq!(texts(&tokens), vec!["天", "气", "晴"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Greedy));
    }

    #[test]
    fn test_ngrams_overlap() {
        let lexicon = Lexicon::builtin();
        let tokens = Segmenter::ngrams(&chars("坚定信心"), &lexicon, 2, 4);
        assert_eq!(texts(&tokens), vec!["坚定", "信心"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Ngram));
    }

    #[test]
    fn test_ngrams_short_sentence() {
        let lexicon = Lexicon::builtin();
        assert!(Segmenter::ngrams(&chars("好"), &lexicon, 2, 4).is_empty());
    }

    #[test]
    fn test_segment_counts_both_passes() {
        let lexicon = Lexicon::builtin();
        let tokens = Segmenter::segment("我们坚定信心，克服困难，取得了重大成功！", &lexicon);
        let words = texts(&tokens);

        assert_eq!(words.iter().filter(|w| **w == "信心").count(), 2);
        assert_eq!(words.iter().filter(|w| **w == "困难").count(), 2);
        assert_eq!(words.iter().filter(|w| **w == "成功").count(), 2);
        assert_eq!(words.iter().filter(|w| **w == "重大").count(), 2);
    }

    #[test]
    fn test_segment_deterministic() {
        let lexicon = Lexicon::builtin();
        let text = "全面推进改革。加快发展，确保如期完成任务！";
        assert_eq!(
            Segmenter::segment(text, &lexicon),
            Segmenter::segment(text, &lexicon)
        );
    }

    #[test]
    fn test_segment_empty() {
        let lexicon = Lexicon::builtin();
        assert!(Segmenter::segment("", &lexicon).is_empty());
        assert!(Segmenter::segment("hello 123", &lexicon).is_empty());
    }

    #[test]
    fn test_token_length_bounds() {
        let lexicon = Lexicon::builtin();
        let tokens = Segmenter::segment("统筹协同一体化合力攻坚，风险挑战并存。", &lexicon);
        assert!(tokens
            .iter()
            .all(|t| (1..=4).contains(&t.text.chars().count())));
    }
}
