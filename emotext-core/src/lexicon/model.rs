//! 词典数据模型
//!
//! 情绪类别、程度级别，以及不可变的词典快照 `Lexicon`。
//! `LexiconData` 是可编辑的草稿（也是持久化格式），构造 `Lexicon` 时建立成员索引。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 最短词长（字符）
pub const MIN_TERM_CHARS: usize = 2;
/// 最长词长（字符）
pub const MAX_TERM_CHARS: usize = 4;

/// 情感极性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// 情绪类别（固定顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    /// 信心
    Confidence,
    /// 成就
    Achievement,
    /// 决心
    Determination,
    /// 团结
    Unity,
    /// 挑战
    Challenge,
    /// 压力
    Pressure,
    /// 紧迫
    Urgency,
}

impl EmotionCategory {
    /// 全部类别，按迭代顺序
    pub const ALL: [EmotionCategory; 7] = [
        EmotionCategory::Confidence,
        EmotionCategory::Achievement,
        EmotionCategory::Determination,
        EmotionCategory::Unity,
        EmotionCategory::Challenge,
        EmotionCategory::Pressure,
        EmotionCategory::Urgency,
    ];

    pub const POSITIVE: [EmotionCategory; 4] = [
        EmotionCategory::Confidence,
        EmotionCategory::Achievement,
        EmotionCategory::Determination,
        EmotionCategory::Unity,
    ];

    pub const NEGATIVE: [EmotionCategory; 3] = [
        EmotionCategory::Challenge,
        EmotionCategory::Pressure,
        EmotionCategory::Urgency,
    ];

    /// 类别名称
    pub fn name(self) -> &'static str {
        match self {
            EmotionCategory::Confidence => "confidence",
            EmotionCategory::Achievement => "achievement",
            EmotionCategory::Determination => "determination",
            EmotionCategory::Unity => "unity",
            EmotionCategory::Challenge => "challenge",
            EmotionCategory::Pressure => "pressure",
            EmotionCategory::Urgency => "urgency",
        }
    }

    /// 中文名称
    pub fn label(self) -> &'static str {
        match self {
            EmotionCategory::Confidence => "信心",
            EmotionCategory::Achievement => "成就",
            EmotionCategory::Determination => "决心",
            EmotionCategory::Unity => "团结",
            EmotionCategory::Challenge => "挑战",
            EmotionCategory::Pressure => "压力",
            EmotionCategory::Urgency => "紧迫",
        }
    }

    /// 所属极性
    pub fn polarity(self) -> Polarity {
        match self {
            EmotionCategory::Confidence
            | EmotionCategory::Achievement
            | EmotionCategory::Determination
            | EmotionCategory::Unity => Polarity::Positive,
            _ => Polarity::Negative,
        }
    }

    /// 按极性列出类别
    pub fn of_polarity(polarity: Polarity) -> &'static [EmotionCategory] {
        match polarity {
            Polarity::Positive => &Self::POSITIVE,
            Polarity::Negative => &Self::NEGATIVE,
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 程度级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeLevel {
    High,
    Medium,
    Low,
}

impl DegreeLevel {
    pub const ALL: [DegreeLevel; 3] = [DegreeLevel::High, DegreeLevel::Medium, DegreeLevel::Low];

    /// 级别名称
    pub fn name(self) -> &'static str {
        match self {
            DegreeLevel::High => "high",
            DegreeLevel::Medium => "medium",
            DegreeLevel::Low => "low",
        }
    }

    /// 从名称解析（用于词表分节标题）
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "high" => Some(DegreeLevel::High),
            "medium" => Some(DegreeLevel::Medium),
            "low" => Some(DegreeLevel::Low),
            _ => None,
        }
    }
}

/// 积极情绪词
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositiveTerms {
    #[serde(default)]
    pub confidence: Vec<String>,
    #[serde(default)]
    pub achievement: Vec<String>,
    #[serde(default)]
    pub determination: Vec<String>,
    #[serde(default)]
    pub unity: Vec<String>,
}

/// 消极情绪词
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegativeTerms {
    #[serde(default)]
    pub challenge: Vec<String>,
    #[serde(default)]
    pub pressure: Vec<String>,
    #[serde(default)]
    pub urgency: Vec<String>,
}

/// 程度词
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DegreeTerms {
    #[serde(default)]
    pub high: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
    #[serde(default)]
    pub low: Vec<String>,
}

impl DegreeTerms {
    /// 是否没有任何程度词
    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.medium.is_empty() && self.low.is_empty()
    }

    pub fn level(&self, level: DegreeLevel) -> &Vec<String> {
        match level {
            DegreeLevel::High => &self.high,
            DegreeLevel::Medium => &self.medium,
            DegreeLevel::Low => &self.low,
        }
    }

    pub fn level_mut(&mut self, level: DegreeLevel) -> &mut Vec<String> {
        match level {
            DegreeLevel::High => &mut self.high,
            DegreeLevel::Medium => &mut self.medium,
            DegreeLevel::Low => &mut self.low,
        }
    }
}

/// 词典草稿
///
/// 字段结构与持久化 JSON 一致：
/// `{positive: {confidence: [...]}, negative: {...}, degree: {...}, negation: [...], transition: [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconData {
    #[serde(default)]
    pub positive: PositiveTerms,
    #[serde(default)]
    pub negative: NegativeTerms,
    #[serde(default)]
    pub degree: DegreeTerms,
    /// 否定词（评分暂未使用）
    #[serde(default)]
    pub negation: Vec<String>,
    /// 转折词（评分暂未使用）
    #[serde(default)]
    pub transition: Vec<String>,
}

impl LexiconData {
    /// 内置默认词典
    pub fn builtin() -> Self {
        Self {
            positive: PositiveTerms {
                confidence: terms(&[
                    "重要", "强调", "坚定", "信心", "成果", "提高", "优化", "创新", "发展", "推进",
                    "积极", "良好", "有效",
                ]),
                achievement: terms(&[
                    "实现", "完成", "建成", "圆满", "突破", "提升", "成就", "进步", "成功", "胜利",
                    "达成",
                ]),
                determination: terms(&[
                    "使命", "目标", "战略", "部署", "规划", "蓝图", "任务", "决心", "意志", "毅力",
                ]),
                unity: terms(&[
                    "统筹", "协同", "一体化", "合力", "融合", "支撑", "团结", "协作", "配合", "联合",
                ]),
            },
            negative: NegativeTerms {
                challenge: terms(&[
                    "问题", "矛盾", "挑战", "堵点", "卡点", "腐败", "困难", "障碍", "风险",
                ]),
                pressure: terms(&[
                    "要求", "督促", "监管", "审计", "检验", "压力", "紧张", "严格",
                ]),
                urgency: terms(&[
                    "加紧", "加快", "确保", "如期", "收官", "迫切", "立即", "马上",
                ]),
            },
            degree: DegreeTerms {
                high: terms(&[
                    "全面", "重大", "深入", "充分", "显著", "极其", "非常", "特别", "格外",
                ]),
                medium: terms(&["持续", "不断", "逐步", "稳步", "较为", "比较", "相当"]),
                low: terms(&["基本", "初步", "有所", "略微", "稍微", "一些"]),
            },
            negation: terms(&["不", "没", "无", "非", "未", "别", "莫", "勿", "决不", "绝不"]),
            transition: terms(&[
                "但是", "然而", "不过", "可是", "尽管", "虽然", "即使", "反而",
            ]),
        }
    }

    pub fn category(&self, category: EmotionCategory) -> &Vec<String> {
        match category {
            EmotionCategory::Confidence => &self.positive.confidence,
            EmotionCategory::Achievement => &self.positive.achievement,
            EmotionCategory::Determination => &self.positive.determination,
            EmotionCategory::Unity => &self.positive.unity,
            EmotionCategory::Challenge => &self.negative.challenge,
            EmotionCategory::Pressure => &self.negative.pressure,
            EmotionCategory::Urgency => &self.negative.urgency,
        }
    }

    pub fn category_mut(&mut self, category: EmotionCategory) -> &mut Vec<String> {
        match category {
            EmotionCategory::Confidence => &mut self.positive.confidence,
            EmotionCategory::Achievement => &mut self.positive.achievement,
            EmotionCategory::Determination => &mut self.positive.determination,
            EmotionCategory::Unity => &mut self.positive.unity,
            EmotionCategory::Challenge => &mut self.negative.challenge,
            EmotionCategory::Pressure => &mut self.negative.pressure,
            EmotionCategory::Urgency => &mut self.negative.urgency,
        }
    }

    /// 遍历所有词表（情绪类别、程度级别、否定词、转折词）
    fn lists(&self) -> impl Iterator<Item = &Vec<String>> {
        EmotionCategory::ALL
            .into_iter()
            .map(move |c| self.category(c))
            .chain(DegreeLevel::ALL.into_iter().map(move |l| self.degree.level(l)))
            .chain([&self.negation, &self.transition])
    }

    fn lists_mut(&mut self) -> Vec<&mut Vec<String>> {
        let LexiconData {
            positive,
            negative,
            degree,
            negation,
            transition,
        } = self;

        vec![
            &mut positive.confidence,
            &mut positive.achievement,
            &mut positive.determination,
            &mut positive.unity,
            &mut negative.challenge,
            &mut negative.pressure,
            &mut negative.urgency,
            &mut degree.high,
            &mut degree.medium,
            &mut degree.low,
            negation,
            transition,
        ]
    }

    /// 去重并过滤词长
    ///
    /// 每个词表内去重（保留首次出现顺序），只保留 2-4 个字符的词。
    pub fn optimize(mut self) -> Self {
        for list in self.lists_mut() {
            let mut seen = HashSet::new();
            list.retain(|term| {
                let len = term.chars().count();
                (MIN_TERM_CHARS..=MAX_TERM_CHARS).contains(&len) && seen.insert(term.clone())
            });
        }
        self
    }
}

fn terms(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// 不可变词典快照
///
/// 创建后不再修改；刷新时生成新的快照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LexiconData", into = "LexiconData")]
pub struct Lexicon {
    data: LexiconData,
    members: HashSet<String>,
}

impl Lexicon {
    /// 从草稿构建快照
    pub fn new(data: LexiconData) -> Self {
        let members = data
            .lists()
            .flat_map(|list| list.iter())
            .filter(|term| !term.is_empty())
            .cloned()
            .collect();

        Self { data, members }
    }

    /// 内置默认词典
    pub fn builtin() -> Self {
        Self::new(LexiconData::builtin())
    }

    /// 词是否在词典任一词表中（精确匹配）
    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    /// 某情绪类别的词表
    pub fn terms(&self, category: EmotionCategory) -> &[String] {
        self.data.category(category)
    }

    /// 某程度级别的词表
    pub fn degree_terms(&self, level: DegreeLevel) -> &[String] {
        self.data.degree.level(level)
    }

    pub fn negation(&self) -> &[String] {
        &self.data.negation
    }

    pub fn transition(&self) -> &[String] {
        &self.data.transition
    }

    /// 词条总数（含跨类别重复）
    pub fn term_count(&self) -> usize {
        self.data.lists().map(|list| list.len()).sum()
    }

    /// 底层数据
    pub fn data(&self) -> &LexiconData {
        &self.data
    }

    /// 取回草稿，用于派生新快照
    pub fn into_data(self) -> LexiconData {
        self.data
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl From<LexiconData> for Lexicon {
    fn from(data: LexiconData) -> Self {
        Self::new(data)
    }
}

impl From<Lexicon> for LexiconData {
    fn from(lexicon: Lexicon) -> Self {
        lexicon.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_membership() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains("信心"));
        assert!(lexicon.contains("一体化"));
        assert!(lexicon.contains("重大"));
        assert!(lexicon.contains("但是"));
        assert!(lexicon.contains("不"));
        assert!(!lexicon.contains("信"));
        assert!(!lexicon.contains("坚定信心"));
    }

    #[test]
    fn test_category_polarity() {
        assert_eq!(EmotionCategory::Unity.polarity(), Polarity::Positive);
        assert_eq!(EmotionCategory::Urgency.polarity(), Polarity::Negative);
        assert_eq!(EmotionCategory::of_polarity(Polarity::Negative).len(), 3);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(EmotionCategory::Confidence.label(), "信心");
        assert_eq!(EmotionCategory::Urgency.label(), "紧迫");

        let labels: std::collections::HashSet<_> =
            EmotionCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), EmotionCategory::ALL.len());
    }

    #[test]
    fn test_optimize_dedup_and_length() {
        let mut data = LexiconData::builtin();
        data.positive.confidence.push("信心".to_string());
        data.positive.confidence.push("好".to_string());
        data.positive.confidence.push("非常非常好".to_string());
        data.degree.high.push("全面".to_string());

        let data = data.optimize();
        let confidence = &data.positive.confidence;
        assert_eq!(confidence.iter().filter(|t| *t == "信心").count(), 1);
        assert!(!confidence.contains(&"好".to_string()));
        assert!(!confidence.contains(&"非常非常好".to_string()));
        assert_eq!(data.degree.high.iter().filter(|t| *t == "全面").count(), 1);

        for list in data.lists() {
            for term in list {
                let len = term.chars().count();
                assert!((2..=4).contains(&len), "term {} has length {}", term, len);
            }
        }
    }

    #[test]
    fn test_optimize_keeps_order() {
        let mut data = LexiconData::default();
        data.positive.unity = terms(&["团结", "协作", "团结", "合力"]);
        let data = data.optimize();
        assert_eq!(data.positive.unity, terms(&["团结", "协作", "合力"]));
    }

    #[test]
    fn test_json_shape() {
        let lexicon = Lexicon::builtin();
        let json = serde_json::to_value(&lexicon).unwrap();
        assert!(json["positive"]["confidence"].is_array());
        assert!(json["degree"]["high"].is_array());
        assert!(json["negation"].is_array());

        let back: Lexicon = serde_json::from_value(json).unwrap();
        assert_eq!(back, lexicon);
        assert!(back.contains("成功"));
    }

    #[test]
    fn test_category_terms() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.terms(EmotionCategory::Urgency).len(), 8);
        assert!(lexicon.terms(EmotionCategory::Confidence).contains(&"坚定".to_string()));
        assert!(lexicon.terms(EmotionCategory::Achievement).contains(&"成功".to_string()));
    }

    #[test]
    fn test_degree_level_from_name() {
        assert_eq!(DegreeLevel::from_name("High"), Some(DegreeLevel::High));
        assert_eq!(DegreeLevel::from_name(" low "), Some(DegreeLevel::Low));
        assert_eq!(DegreeLevel::from_name("extreme"), None);
    }
}
