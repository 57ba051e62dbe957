//! Narrative composer: turns computed facts into reading text.
//!
//! Every category draws one line uniformly from a fixed table, independently
//! of the other categories. Output is non-deterministic; callers should only
//! rely on each line belonging to its table.

use std::collections::BTreeMap;

use crate::fortune::bazi::BaZiChart;
use crate::fortune::random::RandomSource;
use crate::fortune::symbols::{Element, LuckTier};

// ────────────────────────────────────────────────────────────────────────────
// BaZi tables
// ────────────────────────────────────────────────────────────────────────────

pub const BAZI_PERSONALITY: [&str; 5] = [
    "性格特點：您天性聰穎，思維敏捷，富有創造力。為人正直善良，樂於助人。",
    "性格特點：您性格沉穩內斂，做事謹慎周密，具有很強的責任心和執行力。",
    "性格特點：您個性開朗活潑，溝通能力強，善於處理人際關係，具有領導才能。",
    "性格特點：您心思細膩，感性豐富，具有藝術天賦，對美有獨特的感知能力。",
    "性格特點：您意志堅定，目標明確，不輕易放棄，具有很強的抗壓能力。",
];

pub const BAZI_CAREER: [&str; 5] = [
    "事業運勢：工作穩定向上，貴人相助，有升遷加薪的機會。宜從事文職或管理類工作。",
    "事業運勢：事業發展順利，創業運佳，適合自主創業或投資理財。財運亨通。",
    "事業運勢：工作中表現突出，深受上司賞識。適合從事技術性或專業性強的工作。",
    "事業運勢：事業平穩發展，雖無大起大落，但步步為營，前景看好。",
    "事業運勢：工作運勢旺盛，多有新的機遇和挑戰。適合拓展新業務或轉換跑道。",
];

pub const BAZI_LOVE: [&str; 5] = [
    "感情運勢：感情生活和諧美滿，與伴侶感情深厚。單身者有望遇到心儀對象。",
    "感情運勢：桃花運旺盛，感情機會多。已婚者夫妻恩愛，家庭和睦。",
    "感情運勢：感情路較為波折，需要耐心經營。真愛需要時間來證明。",
    "感情運勢：感情穩定發展，適合談婚論嫁。家庭生活幸福美滿。",
    "感情運勢：感情運勢一般，需要主動出擊。多參與社交活動有助感情發展。",
];

pub const BAZI_HEALTH: [&str; 5] = [
    "健康運勢：身體健康狀況良好，精力充沛。注意作息規律，適度運動。",
    "健康運勢：整體健康運佳，但需注意腸胃保養。多吃清淡食物，少熬夜。",
    "健康運勢：身體狀況尚可，注意情緒調節，避免壓力過大影響睡眠。",
    "健康運勢：健康運勢平穩，注意季節變化，預防感冒。定期體檢很重要。",
    "健康運勢：體質較佳，抵抗力強。適合戶外運動，多接觸大自然。",
];

// ────────────────────────────────────────────────────────────────────────────
// Name tables
// ────────────────────────────────────────────────────────────────────────────

pub const NAME_MEANING: [&str; 5] = [
    "姓名寓意：您的姓名數理暗示富貴榮華，一生多貴人相助，事業蒸蒸日上。",
    "姓名寓意：您的姓名暗示智慧過人，學識淵博，適合發展文化教育事業。",
    "姓名寓意：您的姓名象徵堅毅不拔，意志堅強，能在困境中開創新局。",
    "姓名寓意：您的姓名預示人緣極佳，善於交際，在團隊中能發揮重要作用。",
    "姓名寓意：您的姓名暗含創新精神，具有開拓進取的特質，適合創業發展。",
];

pub const NAME_PERSONALITY: [&str; 5] = [
    "性格影響：性格溫和親切，富有同情心，容易得到他人信任和喜愛。",
    "性格影響：性格堅毅果斷，處事冷靜理性，具有很強的領導組織能力。",
    "性格影響：性格活潑開朗，樂觀向上，善於化解困難，適應能力強。",
    "性格影響：性格謹慎細心，做事一絲不苟，責任心強，值得信賴。",
    "性格影響：性格獨立自主，思想前衛，不拘一格，具有創新思維。",
];

pub const NAME_DESTINY: [&str; 5] = [
    "運勢影響：整體運勢佳，前景光明。財運亨通，事業有成，家庭幸福。",
    "運勢影響：運勢平穩上升，雖進展緩慢但根基穩固，晚年運勢特別好。",
    "運勢影響：早年運勢一般，中年後運勢轉旺，適合大器晚成型發展。",
    "運勢影響：運勢波動較大，需要積極面對挑戰，危機中往往蘊含轉機。",
    "運勢影響：運勢穩中有升，貴人運旺，適合與他人合作發展事業。",
];

// ────────────────────────────────────────────────────────────────────────────
// Daily tip tables, bucketed by score: [≥80, ≥60, below]
// ────────────────────────────────────────────────────────────────────────────

pub type TieredTips = [[&'static str; 5]; 3];

pub const LOVE_TIPS: TieredTips = [
    [
        "• 感情運勢極佳，適合表白或求婚",
        "• 愛情甜蜜，與伴侶關係和諧",
        "• 桃花運旺盛，單身者易遇良緣",
        "• 感情穩定發展，可考慮進一步發展",
        "• 夫妻恩愛，家庭和睦幸福",
    ],
    [
        "• 感情運勢平穩，需要用心經營",
        "• 多與伴侶溝通，增進彼此了解",
        "• 保持耐心，感情需要時間培養",
        "• 適合約會或增進感情的活動",
        "• 單身者可多參與社交活動",
    ],
    [
        "• 感情運勢較弱，避免爭吵衝突",
        "• 多包容理解，化解感情危機",
        "• 不宜討論敏感話題，保持冷靜",
        "• 給彼此一些空間和時間",
        "• 單身者暫時不宜主動追求",
    ],
];

pub const CAREER_TIPS: TieredTips = [
    [
        "• 工作運勢極佳，適合承接重要項目",
        "• 表現突出，有升遷加薪機會",
        "• 適合提出新的想法或建議",
        "• 貴人運旺，容易得到上司賞識",
        "• 創業或投資項目有好的發展",
    ],
    [
        "• 工作穩定進展，按部就班即可",
        "• 適合學習新技能提升自己",
        "• 與同事保持良好合作關係",
        "• 完成手頭工作，不宜操之過急",
        "• 可以規劃未來的職業發展",
    ],
    [
        "• 工作上宜謹慎行事，避免出錯",
        "• 不宜做重大決定或冒險",
        "• 多聽取他人意見，三思而後行",
        "• 專注完成基本工作任務",
        "• 避免與上司或同事發生衝突",
    ],
];

pub const WEALTH_TIPS: TieredTips = [
    [
        "• 財運極佳，投資理財有好收益",
        "• 適合購買或出售重要物品",
        "• 可考慮新的賺錢機會",
        "• 偏財運旺，可適度嘗試投資",
        "• 收入有增加的機會",
    ],
    [
        "• 財運平穩，收支基本平衡",
        "• 適合儲蓄，為未來做準備",
        "• 理性消費，避免衝動購物",
        "• 可學習理財投資知識",
        "• 小額投資需謹慎評估",
    ],
    [
        "• 財運較弱，避免大額投資",
        "• 控制支出，減少不必要花費",
        "• 不宜借貸或擔保他人",
        "• 謹慎處理金錢相關事務",
        "• 保守理財，以穩為主",
    ],
];

pub const HEALTH_TIPS: TieredTips = [
    [
        "• 身體狀況極佳，精力充沛",
        "• 適合進行體能訓練或運動",
        "• 身體抵抗力強，不易生病",
        "• 可以嘗試新的健身方式",
        "• 保持良好的生活習慣",
    ],
    [
        "• 健康狀況良好，注意維持",
        "• 適度運動，保持身體活力",
        "• 注意飲食營養均衡",
        "• 保持充足睡眠和休息",
        "• 可進行輕度的戶外活動",
    ],
    [
        "• 注意身體健康，多休息",
        "• 避免過度勞累和熬夜",
        "• 飲食清淡，避免刺激性食物",
        "• 如有不適應及時就醫",
        "• 調節情緒，避免壓力過大",
    ],
];

/// Score bucket index into a `TieredTips` table.
pub fn score_tier(score: u32) -> usize {
    if score >= 80 {
        0
    } else if score >= 60 {
        1
    } else {
        2
    }
}

fn tiered_tip(table: &TieredTips, score: u32, rng: &dyn RandomSource) -> &'static str {
    rng.pick(&table[score_tier(score)])
}

// ────────────────────────────────────────────────────────────────────────────
// Composers
// ────────────────────────────────────────────────────────────────────────────

/// Header with the four pillars, zodiac and element tally, then one line
/// each for personality, career, love and health.
pub fn compose_bazi_analysis(chart: &BaZiChart, rng: &dyn RandomSource) -> String {
    let pillars = chart
        .pillars()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut analysis = format!("您的生辰八字為：{pillars}\n");
    analysis.push_str(&format!("生肖：{}\n\n", chart.zodiac));
    analysis.push_str("五行分析：\n");
    analysis.push_str(&format_elements(&chart.elements));
    analysis.push_str("\n\n");

    let lines = [
        rng.pick(&BAZI_PERSONALITY),
        rng.pick(&BAZI_CAREER),
        rng.pick(&BAZI_LOVE),
        rng.pick(&BAZI_HEALTH),
    ];
    analysis.push_str(&lines.join("\n"));
    analysis
}

pub fn compose_name_analysis(
    name: &str,
    total_strokes: u32,
    element: Element,
    rng: &dyn RandomSource,
) -> String {
    let mut analysis = format!("姓名：{name}\n");
    analysis.push_str(&format!("總筆劃：{total_strokes}畫\n"));
    analysis.push_str(&format!("主要五行：{element}\n\n"));

    let lines = [
        rng.pick(&NAME_MEANING),
        rng.pick(&NAME_PERSONALITY),
        rng.pick(&NAME_DESTINY),
    ];
    analysis.push_str(&lines.join("\n"));
    analysis
}

/// Sub-scores for the daily suggestion; each selects its own tip bucket.
#[derive(Debug, Clone, Copy)]
pub struct DailyScores {
    pub love: u32,
    pub career: u32,
    pub wealth: u32,
    pub health: u32,
}

pub fn compose_daily_suggestion(
    luck: LuckTier,
    scores: DailyScores,
    rng: &dyn RandomSource,
) -> String {
    let mut suggestion = format!("今日運勢：{}\n\n", luck.label());
    suggestion.push_str("建議：\n");

    let tips = [
        tiered_tip(&LOVE_TIPS, scores.love, rng),
        tiered_tip(&CAREER_TIPS, scores.career, rng),
        tiered_tip(&WEALTH_TIPS, scores.wealth, rng),
        tiered_tip(&HEALTH_TIPS, scores.health, rng),
    ];
    suggestion.push_str(&tips.join("\n"));
    suggestion
}

fn format_elements(elements: &BTreeMap<Element, u8>) -> String {
    elements
        .iter()
        .map(|(element, count)| format!("{element}：{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}
