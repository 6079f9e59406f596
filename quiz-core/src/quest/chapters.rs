//! Quest content: chapters, dungeons, bosses and the quest question bank.
//!
//! Each chapter themes one strand. A dungeon or boss battle draws random
//! questions from its chapter's strand.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strands as the quest groups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStrand {
    Number,
    Algebra,
    Data,
    Spatial,
    Financial,
}

impl QuestStrand {
    pub fn name(&self) -> &'static str {
        match self {
            QuestStrand::Number => "number",
            QuestStrand::Algebra => "algebra",
            QuestStrand::Data => "data",
            QuestStrand::Spatial => "spatial",
            QuestStrand::Financial => "financial",
        }
    }

    pub fn all() -> [QuestStrand; 5] {
        [
            QuestStrand::Number,
            QuestStrand::Algebra,
            QuestStrand::Data,
            QuestStrand::Spatial,
            QuestStrand::Financial,
        ]
    }
}

impl fmt::Display for QuestStrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// XP granted for answering a question of this difficulty correctly.
    pub fn xp_reward(&self) -> u64 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 25,
        }
    }

    /// Gold granted for answering a question of this difficulty correctly.
    pub fn gold_reward(&self) -> u64 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A multiple-choice battle question. `correct_answer` indexes `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestQuestion {
    pub id: String,
    pub strand: QuestStrand,
    pub topic: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub xp_reward: u64,
    pub gold_reward: u64,
}

impl QuestQuestion {
    /// Build a question whose rewards follow its difficulty.
    pub fn new(
        id: impl Into<String>,
        strand: QuestStrand,
        topic: impl Into<String>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        options: &[&str],
        correct_answer: usize,
    ) -> Self {
        Self {
            id: id.into(),
            strand,
            topic: topic.into(),
            difficulty,
            prompt: prompt.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
            explanation: None,
            xp_reward: difficulty.xp_reward(),
            gold_reward: difficulty.gold_reward(),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_rewards(mut self, xp: u64, gold: u64) -> Self {
        self.xp_reward = xp;
        self.gold_reward = gold;
        self
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dungeon {
    pub id: String,
    pub chapter_id: String,
    pub name: String,
    pub description: String,
    pub question_count: usize,
    /// Stars the player must hold in this chapter before entering.
    pub required_stars: u32,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boss {
    pub id: String,
    pub name: String,
    pub description: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub strand: QuestStrand,
    pub description: String,
    pub required_level: u32,
    pub dungeons: Vec<Dungeon>,
    pub boss: Boss,
}

impl Chapter {
    pub fn dungeon(&self, id: &str) -> Option<&Dungeon> {
        self.dungeons.iter().find(|d| d.id == id)
    }

    /// Most stars the chapter's dungeons can award.
    pub fn max_stars(&self) -> u32 {
        self.dungeons.len() as u32 * 3
    }
}

/// Battle id used for a chapter's boss fight.
pub fn boss_battle_id(chapter_id: &str) -> String {
    format!("{chapter_id}-boss")
}

// ============================================================================
// Chapter table
// ============================================================================

const DUNGEON_QUESTIONS: usize = 10;
const BOSS_QUESTIONS: usize = 5;

struct DungeonDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    required_stars: u32,
    topics: &'static [&'static str],
    difficulty: Difficulty,
}

fn chapter(
    id: &str,
    name: &str,
    strand: QuestStrand,
    description: &str,
    required_level: u32,
    dungeons: &[DungeonDef],
    boss: (&str, &str),
) -> Chapter {
    Chapter {
        id: id.to_string(),
        name: name.to_string(),
        strand,
        description: description.to_string(),
        required_level,
        dungeons: dungeons
            .iter()
            .map(|d| Dungeon {
                id: d.id.to_string(),
                chapter_id: id.to_string(),
                name: d.name.to_string(),
                description: d.description.to_string(),
                question_count: DUNGEON_QUESTIONS,
                required_stars: d.required_stars,
                topics: d.topics.iter().map(|t| t.to_string()).collect(),
                difficulty: d.difficulty,
            })
            .collect(),
        boss: Boss {
            id: boss_battle_id(id),
            name: boss.0.to_string(),
            description: boss.1.to_string(),
            question_count: BOSS_QUESTIONS,
        },
    }
}

lazy_static::lazy_static! {
    /// The quest chapters, in map order.
    pub static ref CHAPTERS: Vec<Chapter> = vec![
        chapter(
            "number", "The Number Realm", QuestStrand::Number,
            "Fractions, integers and percents guard the gates of the realm.",
            1,
            &[
                DungeonDef {
                    id: "fraction-caverns", name: "Fraction Caverns",
                    description: "Twisting tunnels where every path splits into parts.",
                    required_stars: 0, topics: &["Fractions", "Integers", "Percents"],
                    difficulty: Difficulty::Easy,
                },
                DungeonDef {
                    id: "tower-of-powers", name: "Tower of Powers",
                    description: "Each floor squares the danger of the last.",
                    required_stars: 2, topics: &["Exponents", "Square roots", "Decimals"],
                    difficulty: Difficulty::Medium,
                },
            ],
            ("Numerion the Calculator", "A living abacus that never miscounts."),
        ),
        chapter(
            "algebra", "Algebra Archipelago", QuestStrand::Algebra,
            "Islands of unknowns, linked by bridges of equations.",
            2,
            &[
                DungeonDef {
                    id: "pattern-shores", name: "Pattern Shores",
                    description: "Waves that repeat with a rule you must discover.",
                    required_stars: 0, topics: &["Patterns", "Expressions"],
                    difficulty: Difficulty::Easy,
                },
                DungeonDef {
                    id: "equation-isle", name: "Equation Isle",
                    description: "Balance the scales or be swept away.",
                    required_stars: 2, topics: &["Equations", "Inequalities", "Coding"],
                    difficulty: Difficulty::Medium,
                },
            ],
            ("The Variable Hydra", "Solve for one head and two more appear."),
        ),
        chapter(
            "data", "Data Desert", QuestStrand::Data,
            "Shifting sands of numbers hide the truth in their centre.",
            3,
            &[
                DungeonDef {
                    id: "mean-dunes", name: "Mean Dunes",
                    description: "Find the centre before the sand swallows you.",
                    required_stars: 0, topics: &["Mean", "Median", "Mode", "Range"],
                    difficulty: Difficulty::Easy,
                },
                DungeonDef {
                    id: "chance-oasis", name: "Oasis of Chance",
                    description: "Nothing here is certain, only likely.",
                    required_stars: 2, topics: &["Probability", "Graphs"],
                    difficulty: Difficulty::Medium,
                },
            ],
            ("The Probability Sphinx", "Answers riddles with dice and demands the odds."),
        ),
        chapter(
            "spatial", "Geometry Peaks", QuestStrand::Spatial,
            "Climb through circles, prisms and reflections.",
            4,
            &[
                DungeonDef {
                    id: "circle-summit", name: "Circle Summit",
                    description: "A path that always comes back to where it began.",
                    required_stars: 0, topics: &["Metric", "Circles", "Transformations"],
                    difficulty: Difficulty::Easy,
                },
                DungeonDef {
                    id: "prism-vault", name: "Prism Vault",
                    description: "Chambers measured by the cubic centimetre.",
                    required_stars: 2, topics: &["Volume", "Surface area", "Dilations"],
                    difficulty: Difficulty::Medium,
                },
            ],
            ("The Circle Golem", "Built from perfect circles, weak only to π."),
        ),
        chapter(
            "financial", "Merchant's Citadel", QuestStrand::Financial,
            "Where every coin counts and every deal has a catch.",
            5,
            &[
                DungeonDef {
                    id: "market-maze", name: "Market Maze",
                    description: "Stalls and budgets as far as the eye can see.",
                    required_stars: 0, topics: &["Budgeting", "Saving", "Exchange rates"],
                    difficulty: Difficulty::Easy,
                },
                DungeonDef {
                    id: "treasury", name: "The Treasury",
                    description: "Interest compounds on every mistake.",
                    required_stars: 2, topics: &["Interest", "Sales tax", "Unit price"],
                    difficulty: Difficulty::Medium,
                },
            ],
            ("The Gold Dragon", "Hoards gold and checks every receipt."),
        ),
    ];
}

pub fn chapters() -> &'static [Chapter] {
    &CHAPTERS
}

pub fn get_chapter(id: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.id == id)
}

pub fn get_dungeon(chapter_id: &str, dungeon_id: &str) -> Option<(&'static Chapter, &'static Dungeon)> {
    let chapter = get_chapter(chapter_id)?;
    let dungeon = chapter.dungeon(dungeon_id)?;
    Some((chapter, dungeon))
}

// ============================================================================
// Quest question bank
// ============================================================================

lazy_static::lazy_static! {
    /// Battle questions for every quest strand.
    pub static ref QUEST_QUESTIONS: Vec<QuestQuestion> = {
        use Difficulty::*;
        use QuestStrand::*;
        vec![
            // Number
            QuestQuestion::new("n-01", Number, "Fractions", Easy,
                "What is 1/2 + 1/4?", &["3/4", "2/6", "1/6", "2/4"], 0)
                .with_explanation("1/2 = 2/4, and 2/4 + 1/4 = 3/4."),
            QuestQuestion::new("n-02", Number, "Integers", Easy,
                "What is -5 + 8?", &["-3", "3", "13", "-13"], 1),
            QuestQuestion::new("n-03", Number, "Percents", Easy,
                "What is 10% of 250?", &["2.5", "250", "25", "10"], 2)
                .with_explanation("10% is one tenth: 250 ÷ 10 = 25."),
            QuestQuestion::new("n-04", Number, "Exponents", Easy,
                "What is 3²?", &["6", "5", "8", "9"], 3),
            QuestQuestion::new("n-05", Number, "Square roots", Medium,
                "What is √81?", &["7", "8", "9", "10"], 2),
            QuestQuestion::new("n-06", Number, "GCF", Medium,
                "What is the greatest common factor of 24 and 36?", &["6", "12", "18", "4"], 1),
            QuestQuestion::new("n-07", Number, "Decimals", Medium,
                "What is 0.6 × 0.4?", &["2.4", "0.024", "0.24", "24"], 2)
                .with_explanation("6 × 4 = 24 with two decimal places: 0.24."),
            QuestQuestion::new("n-08", Number, "Integers", Medium,
                "What is -12 - (-5)?", &["-17", "-7", "7", "17"], 1)
                .with_explanation("Subtracting -5 adds 5: -12 + 5 = -7."),
            QuestQuestion::new("n-09", Number, "Fractions", Hard,
                "What is 3/4 ÷ 3/8?", &["2", "1/2", "9/32", "3/2"], 0)
                .with_explanation("3/4 × 8/3 = 24/12 = 2."),
            QuestQuestion::new("n-10", Number, "Percents", Hard,
                "An $80 jacket is 25% off. What is the sale price?", &["$55", "$60", "$20", "$65"], 1)
                .with_explanation("25% of $80 is $20, and $80 - $20 = $60."),
            QuestQuestion::new("n-11", Number, "Rational numbers", Hard,
                "Which list is ordered from least to greatest?",
                &["-1.5, -3/4, 0.2, 1/2", "-3/4, -1.5, 0.2, 1/2", "0.2, 1/2, -3/4, -1.5", "-1.5, 0.2, -3/4, 1/2"], 0),
            QuestQuestion::new("n-12", Number, "LCM", Hard,
                "What is the lowest common multiple of 6, 8 and 12?", &["24", "48", "12", "96"], 0),
            // Algebra
            QuestQuestion::new("a-01", Algebra, "Patterns", Easy,
                "What comes next: 2, 4, 6, 8, ...?", &["9", "10", "12", "16"], 1),
            QuestQuestion::new("a-02", Algebra, "Expressions", Easy,
                "What is x + 7 when x = 3?", &["10", "4", "21", "37"], 0),
            QuestQuestion::new("a-03", Algebra, "Equations", Easy,
                "Solve x + 6 = 14.", &["20", "8", "6", "7"], 1),
            QuestQuestion::new("a-04", Algebra, "Patterns", Easy,
                "A pattern starts at 5 and adds 3 each time. What is the third term?",
                &["11", "14", "8", "9"], 0)
                .with_explanation("5, 8, 11."),
            QuestQuestion::new("a-05", Algebra, "Equations", Medium,
                "Solve 4x = 28.", &["24", "7", "32", "112"], 1),
            QuestQuestion::new("a-06", Algebra, "Expressions", Medium,
                "Evaluate 2a + 3b when a = 4 and b = 2.", &["14", "12", "18", "24"], 0)
                .with_explanation("2 × 4 + 3 × 2 = 8 + 6 = 14."),
            QuestQuestion::new("a-07", Algebra, "Monomials", Medium,
                "Simplify 3x + 5x.", &["8x", "15x", "8x²", "2x"], 0),
            QuestQuestion::new("a-08", Algebra, "Inequalities", Medium,
                "Which value satisfies 2x < 10?", &["5", "6", "4", "10"], 2)
                .with_explanation("x must be less than 5."),
            QuestQuestion::new("a-09", Algebra, "Equations", Hard,
                "Solve 3x - 7 = 11.", &["4/3", "6", "18", "3"], 1)
                .with_explanation("3x = 18, so x = 6."),
            QuestQuestion::new("a-10", Algebra, "Patterns", Hard,
                "Which expression gives term n of 7, 11, 15, 19, ...?",
                &["4n + 3", "3n + 4", "n + 4", "7n"], 0)
                .with_explanation("The pattern grows by 4, and 4 × 1 + 3 = 7."),
            QuestQuestion::new("a-11", Algebra, "Inequalities", Hard,
                "Solve 5 - x > 2.", &["x > 3", "x < 3", "x < -3", "x > -3"], 1)
                .with_explanation("-x > -3, and dividing by -1 flips the sign: x < 3."),
            QuestQuestion::new("a-12", Algebra, "Coding", Hard,
                "x starts at 2. The code repeats `x = x * 2` three times. What is x?",
                &["8", "16", "6", "32"], 1)
                .with_explanation("2 → 4 → 8 → 16."),
            // Data
            QuestQuestion::new("d-01", Data, "Mean", Easy,
                "What is the mean of 2, 4 and 6?", &["4", "6", "12", "3"], 0),
            QuestQuestion::new("d-02", Data, "Mode", Easy,
                "What is the mode of 3, 5, 5, 7, 9?", &["3", "5", "7", "9"], 1),
            QuestQuestion::new("d-03", Data, "Probability", Easy,
                "What is the probability that a fair coin lands heads?", &["1/2", "1/4", "1", "0"], 0),
            QuestQuestion::new("d-04", Data, "Range", Easy,
                "What is the range of 4, 9, 15, 2?", &["13", "15", "11", "9"], 0)
                .with_explanation("15 - 2 = 13."),
            QuestQuestion::new("d-05", Data, "Median", Medium,
                "What is the median of 8, 3, 10, 6?", &["6", "7", "8", "6.5"], 1)
                .with_explanation("In order: 3, 6, 8, 10. The middle two average to 7."),
            QuestQuestion::new("d-06", Data, "Percents in data", Medium,
                "12 of 48 students chose soccer. What percent is that?", &["12%", "25%", "48%", "4%"], 1),
            QuestQuestion::new("d-07", Data, "Probability", Medium,
                "A bag holds 3 red and 5 blue marbles. What is P(red)?", &["3/5", "3/8", "5/8", "1/3"], 1),
            QuestQuestion::new("d-08", Data, "Graphs", Medium,
                "Which graph best shows parts of a whole?",
                &["Circle graph", "Line graph", "Scatter plot", "Stem-and-leaf plot"], 0),
            QuestQuestion::new("d-09", Data, "Probability", Hard,
                "Two dice are rolled. What is the probability the sum is 7?",
                &["1/12", "1/6", "7/36", "1/7"], 1)
                .with_explanation("6 of the 36 outcomes sum to 7."),
            QuestQuestion::new("d-10", Data, "Mean", Hard,
                "The mean of 5 numbers is 12. What is their sum?", &["17", "60", "12", "2.4"], 1),
            QuestQuestion::new("d-11", Data, "Independent events", Hard,
                "A coin is flipped twice. What is the probability of two heads?",
                &["1/2", "1/4", "1/3", "3/4"], 1)
                .with_explanation("1/2 × 1/2 = 1/4."),
            QuestQuestion::new("d-12", Data, "Central tendency", Hard,
                "Adding 100 to the data 2, 3, 4 changes which measure the most?",
                &["Mean", "Median", "Mode", "None of them"], 0),
            // Spatial
            QuestQuestion::new("s-01", Spatial, "Metric", Easy,
                "How many millimetres are in 4 cm?", &["40", "400", "0.4", "4"], 0),
            QuestQuestion::new("s-02", Spatial, "3D shapes", Easy,
                "How many vertices does a cube have?", &["6", "8", "12", "4"], 1),
            QuestQuestion::new("s-03", Spatial, "Circles", Easy,
                "A circle has radius 5 cm. What is its diameter?",
                &["10 cm", "2.5 cm", "25 cm", "15 cm"], 0),
            QuestQuestion::new("s-04", Spatial, "Transformations", Easy,
                "Translate (2, 3) right 4 units. Where does it land?",
                &["(6, 3)", "(2, 7)", "(-2, 3)", "(6, 7)"], 0),
            QuestQuestion::new("s-05", Spatial, "Circles", Medium,
                "What is the circumference of a circle with diameter 20 cm? Use π ≈ 3.14.",
                &["31.4 cm", "62.8 cm", "125.6 cm", "314 cm"], 1),
            QuestQuestion::new("s-06", Spatial, "Circles", Medium,
                "What is the area of a circle with radius 10 cm? Use π ≈ 3.14.",
                &["31.4 cm²", "62.8 cm²", "314 cm²", "628 cm²"], 2)
                .with_explanation("3.14 × 10 × 10 = 314 cm²."),
            QuestQuestion::new("s-07", Spatial, "Volume", Medium,
                "A prism has base area 12 cm² and height 5 cm. What is its volume?",
                &["17 cm³", "60 cm³", "120 cm³", "600 cm³"], 1),
            QuestQuestion::new("s-08", Spatial, "Transformations", Medium,
                "Reflect (-4, 1) in the y-axis.", &["(4, 1)", "(-4, -1)", "(4, -1)", "(1, -4)"], 0),
            QuestQuestion::new("s-09", Spatial, "Volume", Hard,
                "A cylinder has radius 2 cm and height 10 cm. What is its volume? Use π ≈ 3.14.",
                &["125.6 cm³", "62.8 cm³", "251.2 cm³", "40 cm³"], 0)
                .with_explanation("3.14 × 2² × 10 = 125.6 cm³."),
            QuestQuestion::new("s-10", Spatial, "Surface area", Hard,
                "A cylinder has radius 1 cm and height 2 cm. What is its surface area? Use π ≈ 3.14.",
                &["18.84 cm²", "12.56 cm²", "6.28 cm²", "9.42 cm²"], 0)
                .with_explanation("2πr² + 2πrh = 6.28 + 12.56 = 18.84 cm²."),
            QuestQuestion::new("s-11", Spatial, "Dilations", Hard,
                "A 3 cm by 5 cm rectangle is dilated by a scale factor of 3. What is the new area?",
                &["45 cm²", "135 cm²", "15 cm²", "225 cm²"], 1)
                .with_explanation("The image is 9 cm by 15 cm."),
            QuestQuestion::new("s-12", Spatial, "Unit conversions", Hard,
                "How many cubic centimetres are in 2 L?", &["200", "2000", "20", "20000"], 1),
            // Financial
            QuestQuestion::new("f-01", Financial, "Budgeting", Easy,
                "You earn $40 and spend $25. How much is left?", &["$15", "$65", "$25", "$10"], 0),
            QuestQuestion::new("f-02", Financial, "Saving", Easy,
                "You save $5 a week for 8 weeks. How much have you saved?",
                &["$13", "$40", "$35", "$45"], 1),
            QuestQuestion::new("f-03", Financial, "Exchange rates", Easy,
                "1 euro is worth $1.50 CAD. How many Canadian dollars is 10 euros?",
                &["$15", "$6.67", "$11.50", "$150"], 0),
            QuestQuestion::new("f-04", Financial, "Decisions", Easy,
                "Which is a need rather than a want?",
                &["A winter coat", "A video game", "A concert ticket", "Designer shoes"], 0),
            QuestQuestion::new("f-05", Financial, "Interest", Medium,
                "How much simple interest does $200 earn at 5% for one year?",
                &["$10", "$5", "$20", "$100"], 0),
            QuestQuestion::new("f-06", Financial, "Exchange rates", Medium,
                "1 US dollar is worth $1.35 CAD. How many US dollars is $27 CAD?",
                &["$36.45", "$20", "$25", "$27"], 1)
                .with_explanation("27 ÷ 1.35 = 20."),
            QuestQuestion::new("f-07", Financial, "Budgeting", Medium,
                "A $600 monthly budget puts 50% toward rent. How much is rent?",
                &["$200", "$250", "$300", "$350"], 2),
            QuestQuestion::new("f-08", Financial, "Sales tax", Medium,
                "What is the total for a $40 item with 13% HST?",
                &["$45.20", "$43.00", "$53.00", "$40.13"], 0)
                .with_explanation("13% of $40 is $5.20."),
            QuestQuestion::new("f-09", Financial, "Unit price", Hard,
                "Which is the best buy?",
                &["500 mL for $2.50", "750 mL for $3.60", "1 L for $5.20", "2 L for $10.60"], 1)
                .with_explanation("750 mL for $3.60 works out to $0.48 per 100 mL, the lowest."),
            QuestQuestion::new("f-10", Financial, "Discounts", Hard,
                "A $120 bike is 20% off, then 13% tax is added. What is the final price?",
                &["$108.48", "$111.36", "$96.00", "$135.60"], 0)
                .with_explanation("$120 × 0.8 = $96, and $96 × 1.13 = $108.48."),
            QuestQuestion::new("f-11", Financial, "Saving", Hard,
                "Your goal is $450. You have $90 and save $30 a week. How many more weeks?",
                &["12", "15", "3", "18"], 0)
                .with_explanation("($450 - $90) ÷ $30 = 12."),
            QuestQuestion::new("f-12", Financial, "Interest", Hard,
                "$1000 earns 4% simple interest for 3 years. What is it worth at the end?",
                &["$1040", "$1120", "$1200", "$1012"], 1)
                .with_explanation("Interest is $1000 × 0.04 × 3 = $120."),
        ]
    };
}

/// All quest questions for one strand, in bank order.
pub fn quest_questions_for(strand: QuestStrand) -> Vec<&'static QuestQuestion> {
    QUEST_QUESTIONS.iter().filter(|q| q.strand == strand).collect()
}

/// Up to `count` distinct quest questions from a strand, in random order.
pub fn random_quest_questions<R: Rng + ?Sized>(
    strand: QuestStrand,
    count: usize,
    rng: &mut R,
) -> Vec<QuestQuestion> {
    let mut pool = quest_questions_for(strand);
    pool.shuffle(rng);
    pool.into_iter().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_every_strand_fills_a_dungeon() {
        for strand in QuestStrand::all() {
            assert!(
                quest_questions_for(strand).len() >= DUNGEON_QUESTIONS,
                "{strand} has too few questions"
            );
        }
    }

    #[test]
    fn test_answers_index_into_options() {
        for q in QUEST_QUESTIONS.iter() {
            assert!(q.correct_option().is_some(), "{} answer out of range", q.id);
            assert_eq!(q.options.len(), 4, "{}", q.id);
        }
    }

    #[test]
    fn test_rewards_follow_difficulty() {
        let q = QUEST_QUESTIONS.iter().find(|q| q.id == "n-09").unwrap();
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.xp_reward, 25);
        assert_eq!(q.gold_reward, 12);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = QUEST_QUESTIONS.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), QUEST_QUESTIONS.len());

        let mut battle_ids = HashSet::new();
        for c in chapters() {
            for d in &c.dungeons {
                assert!(battle_ids.insert(d.id.clone()));
                assert_eq!(d.chapter_id, c.id);
            }
            assert!(battle_ids.insert(c.boss.id.clone()));
        }
    }

    #[test]
    fn test_lookups() {
        let chapter = get_chapter("data").unwrap();
        assert_eq!(chapter.strand, QuestStrand::Data);
        assert_eq!(chapter.boss.id, "data-boss");
        assert_eq!(chapter.max_stars(), 6);

        let (c, d) = get_dungeon("number", "tower-of-powers").unwrap();
        assert_eq!(c.id, "number");
        assert_eq!(d.required_stars, 2);

        assert!(get_dungeon("number", "mean-dunes").is_none());
        assert!(get_chapter("space").is_none());
    }

    #[test]
    fn test_chapters_unlock_in_level_order() {
        let levels: Vec<_> = chapters().iter().map(|c| c.required_level).collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
        assert_eq!(levels[0], 1);
    }

    #[test]
    fn test_random_quest_questions() {
        let mut rng = StdRng::seed_from_u64(42);
        let picked = random_quest_questions(QuestStrand::Spatial, 10, &mut rng);
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|q| q.strand == QuestStrand::Spatial));
        let ids: HashSet<_> = picked.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 10);

        // Same seed, same draw
        let mut again = StdRng::seed_from_u64(42);
        let repeat = random_quest_questions(QuestStrand::Spatial, 10, &mut again);
        assert_eq!(picked, repeat);
    }
}
