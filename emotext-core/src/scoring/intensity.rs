//! 情绪强度
//!
//! 基于标点和程度词密度的文本级强度，与类别得分无关，结果总在 [0.5, 2.0]。

use crate::lexicon::{DegreeLevel, Lexicon};

/// 强度下限
pub const MIN_INTENSITY: f64 = 0.5;
/// 强度上限
pub const MAX_INTENSITY: f64 = 2.0;

/// 标点权重表（字面匹配）
pub const PUNCTUATION_WEIGHTS: &[(&str, f64)] = &[
    ("!", 1.5),
    ("?", 0.7),
    ("。", 1.0),
    ("...", 1.3),
    ("！", 1.5),
    ("？", 0.7),
];

/// 程度级别的强度系数
pub fn degree_multiplier(level: DegreeLevel) -> f64 {
    match level {
        DegreeLevel::High => 0.5,
        DegreeLevel::Medium => 0.3,
        DegreeLevel::Low => 0.1,
    }
}

/// 强度计算器
pub struct IntensityCalculator;

impl IntensityCalculator {
    /// 计算文本强度
    ///
    /// - 起始值 1.0
    /// - 每个标点：强度加 `(权重 - 1) * 次数`，总权重加次数
    /// - 每个程度词：强度加 `系数 * 次数`，总权重加次数
    /// - 乘以长度因子 `1 + log10(长度 + 1) / 2`
    /// - 结果为 `强度 / (总权重 + 1)`，截断到 [0.5, 2.0]
    pub fn calculate(text: &str, lexicon: &Lexicon) -> f64 {
        let mut intensity = 1.0;
        let mut total_weight = 0.0;

        for (mark, weight) in PUNCTUATION_WEIGHTS {
            let count = text.matches(mark).count() as f64;
            intensity += (weight - 1.0) * count;
            total_weight += count;
        }

        for level in DegreeLevel::ALL {
            let multiplier = degree_multiplier(level);
            for word in lexicon.degree_terms(level) {
                if word.is_empty() {
                    continue;
                }
                let count = text.matches(word.as_str()).count() as f64;
                intensity += multiplier * count;
                total_weight += count;
            }
        }

        let text_length = text.chars().count() as f64;
        intensity *= 1.0 + (text_length + 1.0).log10() / 2.0;

        (intensity / (total_weight + 1.0)).clamp(MIN_INTENSITY, MAX_INTENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let lexicon = Lexicon::builtin();
        assert_eq!(IntensityCalculator::calculate("", &lexicon), 1.0);
    }

    #[test]
    fn test_exclamation_weight() {
        let lexicon = Lexicon::builtin();
        let text = "我们坚定信心，克服困难，取得了重大成功！";

        // 1.0 + 0.5(！) + 0.5(重大) = 2.0；总权重 2
        let expected = 2.0 * (1.0 + (21.0_f64).log10() / 2.0) / 3.0;
        let intensity = IntensityCalculator::calculate(text, &lexicon);
        assert!((intensity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ellipsis_is_literal() {
        let lexicon = Lexicon::builtin();
        let with_dots = IntensityCalculator::calculate("好吧...", &lexicon);
        let without = IntensityCalculator::calculate("好吧abc", &lexicon);
        assert!(with_dots != without);
    }

    #[test]
    fn test_bounds_hold() {
        let lexicon = Lexicon::builtin();
        let long = "平".repeat(5000);
        let samples: [&str; 7] = [
            "",
            "。",
            "？？？？？？？？？？",
            "！！！！！！！！！！！！！！！！！！！！",
            "非常非常非常特别格外极其显著重大全面深入充分！",
            "略微一些基本初步有所稍微",
            long.as_str(),
        ];

        for sample in samples {
            let intensity = IntensityCalculator::calculate(sample, &lexicon);
            assert!(
                (MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity),
                "{} out of range for {:?}",
                intensity,
                sample
            );
        }
    }

    #[test]
    fn test_long_plain_text_is_clamped_high() {
        let lexicon = Lexicon::builtin();
        let intensity = IntensityCalculator::calculate(&"平".repeat(100_000), &lexicon);
        // 1 + log10(100001)/2 ≈ 3.5，超过上限
        assert_eq!(intensity, MAX_INTENSITY);
    }
}
