//! Practice question bank for the curriculum browser.
//!
//! Every question is attached to one expectation code. Answers are compared
//! as text; numeric-input questions also accept any spelling of the same
//! number ("10.5" and "10.50").

use crate::curriculum::get_expectation;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    NumericInput,
    TrueFalse,
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::NumericInput => "numeric-input",
            QuestionKind::TrueFalse => "true-false",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Code of the expectation this question practices.
    pub expectation: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub prompt: String,
    /// Choices for multiple-choice and true/false questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub explanation: String,
}

impl Question {
    pub fn multiple_choice(
        id: impl Into<String>,
        expectation: impl Into<String>,
        prompt: impl Into<String>,
        choices: &[&str],
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            expectation: expectation.into(),
            kind: QuestionKind::MultipleChoice,
            prompt: prompt.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_answer: correct_answer.into(),
            hint: None,
            explanation: String::new(),
        }
    }

    pub fn numeric(
        id: impl Into<String>,
        expectation: impl Into<String>,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            expectation: expectation.into(),
            kind: QuestionKind::NumericInput,
            prompt: prompt.into(),
            choices: Vec::new(),
            correct_answer: correct_answer.into(),
            hint: None,
            explanation: String::new(),
        }
    }

    pub fn true_false(
        id: impl Into<String>,
        expectation: impl Into<String>,
        prompt: impl Into<String>,
        correct: bool,
    ) -> Self {
        Self {
            id: id.into(),
            expectation: expectation.into(),
            kind: QuestionKind::TrueFalse,
            prompt: prompt.into(),
            choices: vec!["True".to_string(), "False".to_string()],
            correct_answer: if correct { "True" } else { "False" }.to_string(),
            hint: None,
            explanation: String::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Check a typed or selected answer.
    ///
    /// Comparison ignores surrounding whitespace and letter case. For
    /// numeric-input questions, two answers that parse to the same number
    /// are also equal.
    pub fn is_correct(&self, answer: &str) -> bool {
        let given = answer.trim();
        let expected = self.correct_answer.trim();

        if given.to_lowercase() == expected.to_lowercase() {
            return true;
        }

        if self.kind == QuestionKind::NumericInput {
            if let (Ok(a), Ok(b)) = (given.parse::<f64>(), expected.parse::<f64>()) {
                return (a - b).abs() < 1e-9;
            }
        }

        false
    }
}

// ============================================================================
// Question bank
// ============================================================================

lazy_static::lazy_static! {
    /// All practice questions, grouped by expectation in curriculum order.
    pub static ref QUESTIONS: Vec<Question> = vec![
        // B1 Number Sense
        Question::multiple_choice(
            "b1.1-a", "B1.1",
            "Which number is 4 × 10⁸ + 2 × 10⁶ + 5 × 10³?",
            &["402 005 000", "420 005 000", "402 050 000", "4 025 000"],
            "402 005 000",
        )
        .with_hint("10⁸ is one hundred million.")
        .with_explanation("400 000 000 + 2 000 000 + 5 000 = 402 005 000."),
        Question::true_false("b1.1-b", "B1.1", "One billion is equal to one thousand millions.", true)
            .with_explanation("1 000 × 1 000 000 = 1 000 000 000."),
        Question::numeric("b1.2-a", "B1.2", "What is the square root of 144?", "12")
            .with_hint("Which number times itself is 144?")
            .with_explanation("12 × 12 = 144, so √144 = 12."),
        Question::multiple_choice(
            "b1.2-b", "B1.2",
            "Which of these numbers is a perfect square?",
            &["48", "64", "72", "90"],
            "64",
        )
        .with_explanation("64 = 8 × 8. The others are not the square of a whole number."),
        Question::multiple_choice(
            "b1.3-a", "B1.3",
            "Which number is greatest?",
            &["-0.75", "-1/2", "-0.125", "-3/4"],
            "-0.125",
        )
        .with_hint("For negative numbers, the one closest to zero is greatest.")
        .with_explanation("-0.125 is closest to zero, so it is the greatest."),
        Question::true_false("b1.3-b", "B1.3", "-2/3 is less than -0.6.", true)
            .with_explanation("-2/3 ≈ -0.667, which is further from zero than -0.6."),
        Question::multiple_choice(
            "b1.4-a", "B1.4",
            "Simplify 18/24.",
            &["3/4", "6/8", "9/12", "2/3"],
            "3/4",
        )
        .with_hint("Divide the numerator and denominator by their greatest common factor.")
        .with_explanation("The GCF of 18 and 24 is 6, and 18/24 = 3/4."),
        Question::numeric("b1.6-a", "B1.6", "Round 7.846 to the nearest hundredth.", "7.85")
            .with_hint("Look at the thousandths digit.")
            .with_explanation("The thousandths digit is 6, so the hundredths digit rounds up: 7.85."),
        Question::numeric("b1.6-b", "B1.6", "Round 3.14159 to the nearest tenth.", "3.1")
            .with_explanation("The hundredths digit is 4, so the tenths digit stays: 3.1."),
        Question::multiple_choice(
            "b1.7-a", "B1.7",
            "What is 3/8 written as a percent?",
            &["37.5%", "38%", "3.8%", "0.375%"],
            "37.5%",
        )
        .with_explanation("3 ÷ 8 = 0.375, and 0.375 × 100 = 37.5%."),
        Question::numeric("b1.7-b", "B1.7", "Write 0.45 as a percent (number only).", "45")
            .with_explanation("0.45 × 100 = 45%."),
        // B2 Operations
        Question::numeric("b2.1-a", "B2.1", "Evaluate 6 + 4 × (5 - 2).", "18")
            .with_hint("Brackets first, then multiplication, then addition.")
            .with_explanation("5 - 2 = 3, 4 × 3 = 12, 6 + 12 = 18."),
        Question::multiple_choice(
            "b2.1-b", "B2.1",
            "Which property says that a × b = b × a?",
            &["Commutative", "Associative", "Distributive", "Identity"],
            "Commutative",
        )
        .with_explanation("The commutative property lets you change the order of the factors."),
        Question::numeric("b2.3-a", "B2.3", "What is 25% of 80?", "20")
            .with_hint("25% is one quarter.")
            .with_explanation("80 ÷ 4 = 20."),
        Question::numeric("b2.3-b", "B2.3", "Increase 60 by 10%.", "66")
            .with_explanation("10% of 60 is 6, and 60 + 6 = 66."),
        Question::numeric("b2.4-a", "B2.4", "Calculate (-7) + 12.", "5")
            .with_explanation("Start at -7 and move 12 to the right: 5."),
        Question::numeric("b2.4-b", "B2.4", "Calculate (-3) - (-8).", "5")
            .with_hint("Subtracting a negative is the same as adding a positive.")
            .with_explanation("(-3) - (-8) = -3 + 8 = 5."),
        Question::multiple_choice(
            "b2.5-a", "B2.5",
            "What is 1/4 + 2/3?",
            &["11/12", "3/7", "3/12", "2/7"],
            "11/12",
        )
        .with_hint("Use a common denominator of 12.")
        .with_explanation("1/4 = 3/12 and 2/3 = 8/12, so the sum is 11/12."),
        Question::numeric("b2.6-a", "B2.6", "What is the greatest common factor of 36 and 48?", "12")
            .with_explanation("The common factors are 1, 2, 3, 4, 6 and 12. The greatest is 12."),
        Question::numeric("b2.6-b", "B2.6", "What is the lowest common multiple of 4, 6 and 10?", "60")
            .with_hint("List multiples of 10 and test each one.")
            .with_explanation("60 is the first multiple of 10 that 4 and 6 both divide."),
        Question::numeric("b2.7-a", "B2.7", "Evaluate 2⁵.", "32")
            .with_explanation("2 × 2 × 2 × 2 × 2 = 32."),
        Question::true_false("b2.7-b", "B2.7", "3⁴ is equal to 4³.", false)
            .with_explanation("3⁴ = 81 but 4³ = 64."),
        Question::multiple_choice(
            "b2.8-a", "B2.8",
            "What is 2/3 ÷ 4/9?",
            &["3/2", "8/27", "1/6", "27/8"],
            "3/2",
        )
        .with_hint("Multiply by the reciprocal of the divisor.")
        .with_explanation("2/3 × 9/4 = 18/12 = 3/2."),
        Question::numeric("b2.9-a", "B2.9", "Calculate 1.2 × 0.3.", "0.36")
            .with_explanation("12 × 3 = 36, with two decimal places: 0.36."),
        Question::multiple_choice(
            "b2.10-a", "B2.10",
            "Which situation is proportional?",
            &[
                "Buying apples at $2 each",
                "A taxi fare of $5 plus $1 per km",
                "A child's age and height",
                "A phone plan with a monthly fee plus a per-minute charge",
            ],
            "Buying apples at $2 each",
        )
        .with_hint("A proportional situation has no starting amount.")
        .with_explanation("Zero apples cost $0 and the cost grows at a constant rate."),
        Question::numeric(
            "b2.10-b", "B2.10",
            "If 3 notebooks cost $4.50, how many dollars do 7 notebooks cost?",
            "10.50",
        )
        .with_explanation("One notebook costs $1.50, and 7 × 1.50 = 10.50."),
        // C1 Patterns and Relationships
        Question::numeric("c1.1-a", "C1.1", "What is the next term: 3, 7, 11, 15, ...?", "19")
            .with_explanation("The pattern adds 4 each time."),
        Question::numeric(
            "c1.3-a", "C1.3",
            "A pattern has the rule 5n + 2. What is the value of term 10?",
            "52",
        )
        .with_explanation("5 × 10 + 2 = 52."),
        Question::numeric("c1.4-a", "C1.4", "What is the next term: 8, 5, 2, -1, ...?", "-4")
            .with_hint("How much does the pattern change each time?")
            .with_explanation("The pattern subtracts 3 each time: -1 - 3 = -4."),
        // C2 Equations and Inequalities
        Question::true_false("c2.1-a", "C2.1", "3x and 3x² are like terms.", false)
            .with_explanation("Like terms need the same variable raised to the same exponent."),
        Question::numeric("c2.2-a", "C2.2", "Evaluate 4a - 3 when a = 5.", "17")
            .with_explanation("4 × 5 - 3 = 17."),
        Question::numeric("c2.3-a", "C2.3", "Solve for x: 3x + 5 = 20.", "5")
            .with_hint("Subtract 5 from both sides first.")
            .with_explanation("3x = 15, so x = 5."),
        Question::numeric("c2.3-b", "C2.3", "Solve for n: n/4 - 2 = 3.", "20")
            .with_explanation("n/4 = 5, so n = 20."),
        Question::multiple_choice(
            "c2.4-a", "C2.4",
            "Which value of x satisfies x + 4 > 9?",
            &["6", "5", "4", "-5"],
            "6",
        )
        .with_explanation("x must be greater than 5, and only 6 is."),
        // C3 Coding
        Question::numeric(
            "c3.2-a", "C3.2",
            "total starts at 0. The loop `for i in 1..=4 { total += i }` runs. What is total?",
            "10",
        )
        .with_explanation("1 + 2 + 3 + 4 = 10."),
        // D1 Data Literacy
        Question::numeric(
            "d1.1-a", "D1.1",
            "In a class of 25 students, 15 walk to school. What percent walk?",
            "60",
        )
        .with_explanation("15 ÷ 25 = 0.6 = 60%."),
        Question::numeric("d1.5-a", "D1.5", "What is the mean of 4, 8, 9 and 11?", "8")
            .with_explanation("The sum is 32 and 32 ÷ 4 = 8."),
        Question::numeric("d1.5-b", "D1.5", "What is the median of 3, 9, 4, 7 and 12?", "7")
            .with_hint("Put the numbers in order first.")
            .with_explanation("In order: 3, 4, 7, 9, 12. The middle value is 7."),
        Question::multiple_choice(
            "d1.5-c", "D1.5",
            "Which measure of central tendency is most affected by an outlier?",
            &["Mean", "Median", "Mode", "None of them"],
            "Mean",
        )
        .with_explanation("The mean uses every value, so one extreme value pulls it."),
        // D2 Probability
        Question::true_false(
            "d2.1-a", "D2.1",
            "Flipping a coin and rolling a die are independent events.",
            true,
        )
        .with_explanation("The coin result does not change the die's probabilities."),
        Question::multiple_choice(
            "d2.2-a", "D2.2",
            "What is the probability of rolling an even number on a standard die?",
            &["1/2", "1/3", "1/6", "2/3"],
            "1/2",
        )
        .with_explanation("Three of the six faces (2, 4, 6) are even."),
        Question::numeric(
            "d2.2-b", "D2.2",
            "A coin is flipped and a die is rolled. How many outcomes are in the sample space?",
            "12",
        )
        .with_explanation("2 × 6 = 12."),
        // E1 Geometric and Spatial Reasoning
        Question::multiple_choice(
            "e1.1-a", "E1.1",
            "How many faces does a triangular prism have?",
            &["5", "6", "4", "9"],
            "5",
        )
        .with_explanation("Two triangular bases and three rectangular sides."),
        Question::multiple_choice(
            "e1.4-a", "E1.4",
            "The point (3, -2) is reflected in the x-axis. Where is its image?",
            &["(3, 2)", "(-3, -2)", "(-3, 2)", "(2, 3)"],
            "(3, 2)",
        )
        .with_hint("A reflection in the x-axis changes the sign of the y-coordinate.")
        .with_explanation("(x, y) maps to (x, -y)."),
        // E2 Measurement
        Question::numeric("e2.1-a", "E2.1", "How many centimetres are in 3.5 m?", "350")
            .with_explanation("1 m = 100 cm, so 3.5 m = 350 cm."),
        Question::numeric("e2.2-a", "E2.2", "How many square centimetres are in 1 m²?", "10000")
            .with_hint("A square metre is 100 cm by 100 cm.")
            .with_explanation("100 × 100 = 10 000 cm²."),
        Question::numeric(
            "e2.3-a", "E2.3",
            "A circle has a diameter of 10 cm. What is its circumference in cm? Use π ≈ 3.14.",
            "31.4",
        )
        .with_explanation("C = πd = 3.14 × 10 = 31.4 cm."),
        Question::numeric(
            "e2.5-a", "E2.5",
            "What is the area in cm² of a circle with radius 3 cm? Use π ≈ 3.14.",
            "28.26",
        )
        .with_hint("A = πr².")
        .with_explanation("3.14 × 3 × 3 = 28.26 cm²."),
        Question::numeric(
            "e2.7-a", "E2.7",
            "A rectangular prism measures 4 cm by 5 cm by 6 cm. What is its volume in cm³?",
            "120",
        )
        .with_explanation("Base area 20 cm² times height 6 cm = 120 cm³."),
        // F1 Money and Finances
        Question::numeric(
            "f1.1-a", "F1.1",
            "If 1 US dollar is worth 1.35 Canadian dollars, how many Canadian dollars is 20 US dollars?",
            "27",
        )
        .with_explanation("20 × 1.35 = 27."),
        Question::true_false("f1.3-a", "F1.3", "A budget should track income but not expenses.", false)
            .with_explanation("A budget compares income against expenses."),
        Question::multiple_choice(
            "f1.3-b", "F1.3",
            "Maya earns $50 a week and saves 20% of it. How much does she save in 6 weeks?",
            &["$60", "$10", "$50", "$300"],
            "$60",
        )
        .with_explanation("20% of $50 is $10 a week, and 6 × $10 = $60."),
    ];
}

/// Questions for one expectation, in bank order.
pub fn questions_for_expectation(code: &str) -> Vec<&'static Question> {
    QUESTIONS.iter().filter(|q| q.expectation == code).collect()
}

/// Every question whose expectation belongs to the given strand.
pub fn questions_for_strand(strand_id: &str) -> Vec<&'static Question> {
    QUESTIONS
        .iter()
        .filter(|q| {
            get_expectation(&q.expectation)
                .map(|entry| entry.strand.id == strand_id)
                .unwrap_or(false)
        })
        .collect()
}

/// Up to `count` distinct questions from a strand, in random order.
pub fn random_questions_for_strand<R: Rng + ?Sized>(
    strand_id: &str,
    count: usize,
    rng: &mut R,
) -> Vec<&'static Question> {
    let mut questions = questions_for_strand(strand_id);
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}

pub fn get_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_every_question_targets_a_known_expectation() {
        for question in QUESTIONS.iter() {
            assert!(
                get_expectation(&question.expectation).is_some(),
                "{} points at unknown {}",
                question.id,
                question.expectation
            );
        }
    }

    #[test]
    fn test_choice_questions_contain_their_answer() {
        for question in QUESTIONS.iter() {
            match question.kind {
                QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
                    assert!(
                        question.choices.contains(&question.correct_answer),
                        "{} answer missing from choices",
                        question.id
                    );
                }
                QuestionKind::NumericInput => assert!(question.choices.is_empty()),
            }
        }
    }

    #[test]
    fn test_question_ids_are_unique() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_answer_check_ignores_case_and_whitespace() {
        let q = get_question("b2.1-b").unwrap();
        assert!(q.is_correct("commutative"));
        assert!(q.is_correct("  COMMUTATIVE "));
        assert!(!q.is_correct("Associative"));

        let tf = get_question("b1.1-b").unwrap();
        assert!(tf.is_correct("true"));
        assert!(!tf.is_correct("false"));
    }

    #[test]
    fn test_numeric_answers_compare_by_value() {
        let q = get_question("b2.10-b").unwrap();
        assert!(q.is_correct("10.50"));
        assert!(q.is_correct("10.5"));
        assert!(!q.is_correct("10.05"));
        assert!(!q.is_correct("ten"));

        // Multiple choice never compares numerically
        let mc = get_question("b1.2-b").unwrap();
        assert!(!mc.is_correct("64.0"));
    }

    #[test]
    fn test_questions_for_expectation() {
        let qs = questions_for_expectation("D1.5");
        assert_eq!(qs.len(), 3);
        assert!(qs.iter().all(|q| q.expectation == "D1.5"));
        assert!(questions_for_expectation("D1.4").is_empty());
    }

    #[test]
    fn test_questions_for_strand() {
        let qs = questions_for_strand("F");
        assert_eq!(qs.len(), 3);
        assert!(questions_for_strand("Z").is_empty());
    }

    #[test]
    fn test_random_questions_for_strand() {
        let mut rng = StdRng::seed_from_u64(7);
        let qs = random_questions_for_strand("B", 5, &mut rng);
        assert_eq!(qs.len(), 5);
        let ids: HashSet<_> = qs.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(qs.iter().all(|q| q.expectation.starts_with('B')));

        // Asking for more than exist returns them all
        let all = random_questions_for_strand("F", 50, &mut rng);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let q = get_question("b1.2-a").unwrap();
        let json = serde_json::to_value(q).unwrap();
        assert_eq!(json["type"], "numeric-input");
        assert_eq!(json["correctAnswer"], "12");
        assert!(json.get("choices").is_none());
    }
}
