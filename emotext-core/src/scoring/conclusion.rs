//! 分析结论
//!
//! 根据主情绪、强度和正负面平衡生成一句中文结论。

use crate::lexicon::{EmotionCategory, Polarity};
use crate::scoring::engine::{EmotionScores, MainEmotion};

/// 强烈情绪的强度下限（不含）
pub const STRONG_INTENSITY: f64 = 1.5;
/// 中等情绪的强度下限（不含）
pub const MODERATE_INTENSITY: f64 = 1.0;
/// 正负面最高分差距小于该值时视为平衡
pub const BALANCE_MARGIN: f64 = 1.0;

/// 正负面平衡
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    /// 两者接近
    Even,
    /// 正面占优
    Positive,
    /// 负面占优
    Negative,
}

impl Balance {
    /// 比较正面、负面类别各自的最高分
    pub fn of(scores: &EmotionScores) -> Self {
        let top = |polarity| {
            EmotionCategory::of_polarity(polarity)
                .iter()
                .map(|c| scores.get(*c))
                .fold(0.0, f64::max)
        };
        let positive = top(Polarity::Positive);
        let negative = top(Polarity::Negative);

        if (positive - negative).abs() < BALANCE_MARGIN {
            Balance::Even
        } else if positive > negative {
            Balance::Positive
        } else {
            Balance::Negative
        }
    }
}

/// 结论生成器
pub struct ConclusionWriter;

impl ConclusionWriter {
    /// 生成结论；没有主情绪（中性）时返回 `None`
    pub fn write(
        scores: &EmotionScores,
        intensity: f64,
        main: Option<&MainEmotion>,
    ) -> Option<String> {
        let main = main?;

        let mut conclusion = String::from(Self::tone(main.emotion.polarity(), intensity));
        conclusion.push_str(Self::detail(main.emotion));
        conclusion.push_str(match Balance::of(scores) {
            Balance::Even => "文本情绪较为平衡，同时包含积极因素和现实挑战。",
            Balance::Positive => "整体上保持乐观和建设性的态度。",
            Balance::Negative => "建议关注压力管理和积极因素的培养。",
        });

        Some(conclusion)
    }

    fn tone(polarity: Polarity, intensity: f64) -> &'static str {
        match polarity {
            Polarity::Positive if intensity > STRONG_INTENSITY => "文本表现出强烈的积极情绪，",
            Polarity::Positive if intensity > MODERATE_INTENSITY => "文本整体呈现积极向上的态度，",
            Polarity::Positive => "文本带有温和的积极倾向，",
            Polarity::Negative if intensity > STRONG_INTENSITY => "文本表现出明显的紧迫感和压力，",
            Polarity::Negative if intensity > MODERATE_INTENSITY => "文本反映出一定的挑战性，",
            Polarity::Negative => "文本显示出轻微的压力特征，",
        }
    }

    fn detail(emotion: EmotionCategory) -> &'static str {
        match emotion {
            EmotionCategory::Confidence => "体现出较强的信心和确定性。",
            EmotionCategory::Achievement => "突出展现了成就感和进步。",
            EmotionCategory::Determination => "表达了坚定的决心和目标导向。",
            EmotionCategory::Unity => "强调了团结协作的重要性。",
            EmotionCategory::Challenge => "指出了需要面对的挑战和问题。",
            EmotionCategory::Pressure => "反映出工作或任务的压力。",
            EmotionCategory::Urgency => "强调了时间紧迫性和快速行动的需求。",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores_of(pairs: &[(EmotionCategory, f64)]) -> EmotionScores {
        let mut scores = EmotionScores::zero();
        for (category, value) in pairs {
            scores.add(*category, *value);
        }
        scores
    }

    fn main_of(scores: &EmotionScores) -> MainEmotion {
        scores.main_emotion().unwrap()
    }

    #[test]
    fn test_neutral_has_no_conclusion() {
        let scores = EmotionScores::zero();
        assert_eq!(ConclusionWriter::write(&scores, 1.2, None), None);
    }

    #[test]
    fn test_positive_intensity_tiers() {
        let scores = scores_of(&[(EmotionCategory::Confidence, 5.0)]);
        let main = main_of(&scores);

        let strong = ConclusionWriter::write(&scores, 1.8, Some(&main)).unwrap();
        assert!(strong.starts_with("文本表现出强烈的积极情绪，体现出较强的信心和确定性。"));

        let moderate = ConclusionWriter::write(&scores, 1.5, Some(&main)).unwrap();
        assert!(moderate.starts_with("文本整体呈现积极向上的态度，"));

        let mild = ConclusionWriter::write(&scores, 1.0, Some(&main)).unwrap();
        assert!(mild.starts_with("文本带有温和的积极倾向，"));
    }

    #[test]
    fn test_negative_intensity_tiers() {
        let scores = scores_of(&[(EmotionCategory::Urgency, 5.0)]);
        let main = main_of(&scores);

        let strong = ConclusionWriter::write(&scores, 2.0, Some(&main)).unwrap();
        assert!(strong.starts_with("文本表现出明显的紧迫感和压力，强调了时间紧迫性和快速行动的需求。"));

        let moderate = ConclusionWriter::write(&scores, 1.2, Some(&main)).unwrap();
        assert!(moderate.starts_with("文本反映出一定的挑战性，"));

        let mild = ConclusionWriter::write(&scores, 0.5, Some(&main)).unwrap();
        assert!(mild.starts_with("文本显示出轻微的压力特征，"));
    }

    #[test]
    fn test_balance_branches() {
        let even = scores_of(&[(EmotionCategory::Unity, 5.0), (EmotionCategory::Challenge, 4.2)]);
        assert_eq!(Balance::of(&even), Balance::Even);
        let text = ConclusionWriter::write(&even, 1.2, Some(&main_of(&even))).unwrap();
        assert!(text.ends_with("文本情绪较为平衡，同时包含积极因素和现实挑战。"));

        let positive = scores_of(&[(EmotionCategory::Unity, 5.0), (EmotionCategory::Challenge, 2.0)]);
        assert_eq!(Balance::of(&positive), Balance::Positive);
        let text = ConclusionWriter::write(&positive, 1.2, Some(&main_of(&positive))).unwrap();
        assert!(text.ends_with("整体上保持乐观和建设性的态度。"));

        let negative = scores_of(&[(EmotionCategory::Pressure, 5.0), (EmotionCategory::Achievement, 1.0)]);
        assert_eq!(Balance::of(&negative), Balance::Negative);
        let text = ConclusionWriter::write(&negative, 1.2, Some(&main_of(&negative))).unwrap();
        assert!(text.starts_with("文本反映出一定的挑战性，反映出工作或任务的压力。"));
        assert!(text.ends_with("建议关注压力管理和积极因素的培养。"));
    }

    #[test]
    fn test_balance_margin_is_exclusive() {
        let scores = scores_of(&[(EmotionCategory::Confidence, 5.0), (EmotionCategory::Pressure, 4.0)]);
        assert_eq!(Balance::of(&scores), Balance::Positive);
    }
}
