//! Ontario Grade 7 mathematics curriculum tree.
//!
//! Strands contain substrands, substrands contain expectations. The tree is
//! built once from the static table below and never mutated.

use serde::{Deserialize, Serialize};

/// A single curriculum learning objective, e.g. `B1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    pub code: String,
    pub title: String,
    pub description: String,
}

impl Expectation {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A group of expectations inside a strand, e.g. `B1 Number Sense`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substrand {
    pub id: String,
    pub name: String,
    pub expectations: Vec<Expectation>,
}

impl Substrand {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expectations: Vec::new(),
        }
    }

    pub fn with_expectations(mut self, expectations: Vec<Expectation>) -> Self {
        self.expectations = expectations;
        self
    }
}

/// A top-level curriculum strand, e.g. `B Number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strand {
    pub id: String,
    pub name: String,
    pub description: String,
    pub substrands: Vec<Substrand>,
}

impl Strand {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            substrands: Vec::new(),
        }
    }

    pub fn with_substrands(mut self, substrands: Vec<Substrand>) -> Self {
        self.substrands = substrands;
        self
    }

    /// All expectations of the strand, in curriculum order.
    pub fn expectations(&self) -> impl Iterator<Item = &Expectation> {
        self.substrands.iter().flat_map(|s| s.expectations.iter())
    }

    pub fn substrand(&self, id: &str) -> Option<&Substrand> {
        self.substrands.iter().find(|s| s.id == id)
    }
}

/// Where an expectation lives in the tree.
#[derive(Debug, Clone, Copy)]
pub struct ExpectationEntry<'a> {
    pub strand: &'a Strand,
    pub substrand: &'a Substrand,
    pub expectation: &'a Expectation,
}

// ============================================================================
// Curriculum table
// ============================================================================

lazy_static::lazy_static! {
    /// The Grade 7 strands, in curriculum order.
    pub static ref STRANDS: Vec<Strand> = vec![
        Strand::new(
            "B",
            "Number",
            "Demonstrate an understanding of numbers and make connections to the way numbers are used in everyday life.",
        )
        .with_substrands(vec![
            Substrand::new("B1", "Number Sense").with_expectations(vec![
                Expectation::new(
                    "B1.1",
                    "Whole Numbers to One Billion",
                    "Represent and compare whole numbers up to and including one billion, including in expanded form using powers of ten, and describe various ways they are used in everyday life",
                ),
                Expectation::new(
                    "B1.2",
                    "Perfect Squares and Square Roots",
                    "Identify and represent perfect squares, and determine their square roots, in various contexts",
                ),
                Expectation::new(
                    "B1.3",
                    "Rational Numbers",
                    "Read, represent, compare, and order rational numbers, including positive and negative fractions and decimal numbers to thousandths, in various contexts",
                ),
                Expectation::new(
                    "B1.4",
                    "Equivalent Fractions",
                    "Use equivalent fractions to simplify fractions, when appropriate, in various contexts",
                ),
                Expectation::new(
                    "B1.5",
                    "Fractions and Decimals Between Quantities",
                    "Generate fractions and decimal numbers between any two quantities",
                ),
                Expectation::new(
                    "B1.6",
                    "Rounding Decimals",
                    "Round decimal numbers to the nearest tenth, hundredth, or whole number, as applicable, in various contexts",
                ),
                Expectation::new(
                    "B1.7",
                    "Converting Fractions, Decimals, and Percents",
                    "Convert between fractions, decimal numbers, and percents, in various contexts",
                ),
            ]),
            Substrand::new("B2", "Operations").with_expectations(vec![
                Expectation::new(
                    "B2.1",
                    "Properties and Order of Operations",
                    "Use the properties and order of operations, and the relationships between operations, to solve problems involving whole numbers, decimal numbers, fractions, ratios, rates, and percents, including those requiring multiple steps or multiple operations",
                ),
                Expectation::new(
                    "B2.2",
                    "Percent, Fraction, and Decimal Equivalents",
                    "Understand and recall commonly used percents, fractions, and decimal equivalents",
                ),
                Expectation::new(
                    "B2.3",
                    "Mental Math with Percents",
                    "Use mental math strategies to increase and decrease a whole number by 1%, 5%, 10%, 25%, 50%, and 100%, and explain the strategies used",
                ),
                Expectation::new(
                    "B2.4",
                    "Addition and Subtraction of Integers",
                    "Use objects, diagrams, and equations to represent, describe, and solve situations involving addition and subtraction of integers",
                ),
                Expectation::new(
                    "B2.5",
                    "Addition and Subtraction of Fractions",
                    "Add and subtract fractions, including by creating equivalent fractions, in various contexts",
                ),
                Expectation::new(
                    "B2.6",
                    "GCF and LCM",
                    "Determine the greatest common factor for a variety of whole numbers up to 144 and the lowest common multiple for two and three whole numbers",
                ),
                Expectation::new(
                    "B2.7",
                    "Exponents",
                    "Evaluate and express repeated multiplication of whole numbers using exponential notation, in various contexts",
                ),
                Expectation::new(
                    "B2.8",
                    "Multiplying and Dividing Fractions",
                    "Multiply and divide fractions by fractions, using tools in various contexts",
                ),
                Expectation::new(
                    "B2.9",
                    "Multiplying and Dividing Decimals",
                    "Multiply and divide decimal numbers by decimal numbers, in various contexts",
                ),
                Expectation::new(
                    "B2.10",
                    "Proportional Reasoning",
                    "Identify proportional and non-proportional situations and apply proportional reasoning to solve problems",
                ),
            ]),
        ]),
        Strand::new(
            "C",
            "Algebra",
            "Demonstrate an understanding of variables, expressions, equalities, and inequalities, and apply them to various contexts.",
        )
        .with_substrands(vec![
            Substrand::new("C1", "Patterns and Relationships").with_expectations(vec![
                Expectation::new(
                    "C1.1",
                    "Identifying Patterns",
                    "Identify and compare a variety of repeating, growing, and shrinking patterns, including patterns found in real-life contexts, and compare linear growing patterns on the basis of their constant rates and initial values",
                ),
                Expectation::new(
                    "C1.2",
                    "Creating and Translating Patterns",
                    "Create and translate repeating, growing, and shrinking patterns involving whole numbers and decimal numbers using various representations, including algebraic expressions and equations for linear growing patterns",
                ),
                Expectation::new(
                    "C1.3",
                    "Pattern Rules and Predictions",
                    "Determine pattern rules and use them to extend patterns, make and justify predictions, and identify missing elements in patterns involving whole numbers and decimal numbers, and use algebraic representations of the pattern rules to solve for unknown values in linear growing patterns",
                ),
                Expectation::new(
                    "C1.4",
                    "Integer Patterns",
                    "Create and describe patterns to illustrate relationships among integers",
                ),
            ]),
            Substrand::new("C2", "Equations and Inequalities").with_expectations(vec![
                Expectation::new(
                    "C2.1",
                    "Monomials",
                    "Add and subtract monomials with a degree of 1 that involve whole numbers, using tools",
                ),
                Expectation::new(
                    "C2.2",
                    "Evaluating Expressions",
                    "Evaluate algebraic expressions that involve whole numbers and decimal numbers",
                ),
                Expectation::new(
                    "C2.3",
                    "Solving Equations",
                    "Solve equations that involve multiple terms, whole numbers, and decimal numbers in various contexts, and verify solutions",
                ),
                Expectation::new(
                    "C2.4",
                    "Solving Inequalities",
                    "Solve inequalities that involve multiple terms and whole numbers, and verify and graph the solutions",
                ),
            ]),
            Substrand::new("C3", "Coding").with_expectations(vec![
                Expectation::new(
                    "C3.1",
                    "Writing Code",
                    "Solve problems and create computational representations of mathematical situations by writing and executing code, including code that involves sequential, concurrent, and repeating events",
                ),
                Expectation::new(
                    "C3.2",
                    "Reading and Altering Code",
                    "Read and alter existing code, including code that involves sequential, concurrent, and repeating events, and describe how changes to the code affect the outcomes",
                ),
            ]),
        ]),
        Strand::new(
            "D",
            "Data",
            "Manage, analyse, and use data to make convincing arguments and informed decisions.",
        )
        .with_substrands(vec![
            Substrand::new("D1", "Data Literacy").with_expectations(vec![
                Expectation::new(
                    "D1.1",
                    "Percentages in Data",
                    "Explain why percentages are used to represent the distribution of a variable for a population or sample in large sets of data, and provide examples",
                ),
                Expectation::new(
                    "D1.2",
                    "Collecting and Organizing Data",
                    "Collect qualitative data and discrete and continuous quantitative data to answer questions of interest, and organize the sets of data as appropriate, including using percentages",
                ),
                Expectation::new(
                    "D1.3",
                    "Selecting and Creating Graphs",
                    "Select from among a variety of graphs, including circle graphs, the type of graph best suited to represent various sets of data; display the data in the graphs with proper sources, titles, and labels, and appropriate scales; and justify their choice of graphs",
                ),
                Expectation::new(
                    "D1.4",
                    "Infographics",
                    "Create an infographic about a data set, representing the data in appropriate ways, including in tables and circle graphs, and incorporating any other relevant information that helps to tell the story of the data",
                ),
                Expectation::new(
                    "D1.5",
                    "Measures of Central Tendency",
                    "Determine the impact of adding or removing data from a data set on a measure of central tendency, and describe how these changes alter the shape and distribution of the data",
                ),
                Expectation::new(
                    "D1.6",
                    "Analysing Data and Graphs",
                    "Analyse different sets of data presented in various ways, including in circle graphs and in misleading graphs, by asking and answering questions about the data, challenging preconceived notions, and drawing conclusions",
                ),
            ]),
            Substrand::new("D2", "Probability").with_expectations(vec![
                Expectation::new(
                    "D2.1",
                    "Independent and Dependent Events",
                    "Describe the difference between independent and dependent events, and explain how the probability of each type of event is calculated",
                ),
                Expectation::new(
                    "D2.2",
                    "Theoretical and Experimental Probability",
                    "Determine and compare the theoretical and experimental probabilities of two independent events happening and of two dependent events happening",
                ),
            ]),
        ]),
        Strand::new(
            "E",
            "Spatial Sense",
            "Describe and represent shape, location, and movement by applying geometric properties and spatial relationships.",
        )
        .with_substrands(vec![
            Substrand::new("E1", "Geometric and Spatial Reasoning").with_expectations(vec![
                Expectation::new(
                    "E1.1",
                    "Classifying 3D Shapes",
                    "Describe and classify cylinders, pyramids, and prisms according to their geometric properties, including plane and rotational symmetry",
                ),
                Expectation::new(
                    "E1.2",
                    "Drawing Views of Objects",
                    "Draw top, front, and side views, as well as perspective views, of objects and physical spaces, using appropriate scales",
                ),
                Expectation::new(
                    "E1.3",
                    "Dilations and Similarity",
                    "Perform dilations and describe the similarity between the image and the original shape",
                ),
                Expectation::new(
                    "E1.4",
                    "Transformations on a Cartesian Plane",
                    "Describe and perform translations, reflections, and rotations on a Cartesian plane, and predict the results of these transformations",
                ),
            ]),
            Substrand::new("E2", "Measurement").with_expectations(vec![
                Expectation::new(
                    "E2.1",
                    "Metric Conversions",
                    "Solve problems involving perimeter, area, and volume that require converting from one metric unit to another",
                ),
                Expectation::new(
                    "E2.2",
                    "Area and Volume Conversions",
                    "Solve problems that require conversions involving metric units of area and units of volume",
                ),
                Expectation::new(
                    "E2.3",
                    "Circumference of a Circle",
                    "Use the relationships between the radius, diameter, and circumference of a circle to explain the formula for finding the circumference and to solve related problems",
                ),
                Expectation::new(
                    "E2.4",
                    "Constructing Circles",
                    "Construct circles when given the radius, diameter, or circumference",
                ),
                Expectation::new(
                    "E2.5",
                    "Area of a Circle",
                    "Show the relationships between the radius, diameter, and area of a circle, and use these relationships to explain the formula for measuring the area of a circle and to solve related problems",
                ),
                Expectation::new(
                    "E2.6",
                    "Surface Area of Cylinders",
                    "Represent cylinders as nets and determine their surface area by adding the areas of their parts",
                ),
                Expectation::new(
                    "E2.7",
                    "Volume of Prisms and Cylinders",
                    "Show that the volume of a prism or cylinder can be determined by multiplying the area of its base by its height, and apply this relationship to find the area of the base, volume, and height of prisms and cylinders when given two of the three measurements",
                ),
            ]),
        ]),
        Strand::new(
            "F",
            "Financial Literacy",
            "Demonstrate the knowledge and skills needed to make informed financial decisions.",
        )
        .with_substrands(vec![
            Substrand::new("F1", "Money and Finances").with_expectations(vec![
                Expectation::new(
                    "F1.1",
                    "Exchange Rates",
                    "Identify and compare exchange rates, and convert foreign currencies to Canadian dollars and vice versa",
                ),
                Expectation::new(
                    "F1.2",
                    "Financial Information Sources",
                    "Identify and describe various reliable sources of information that can help with planning for and reaching a financial goal",
                ),
                Expectation::new(
                    "F1.3",
                    "Budgeting",
                    "Create, track, and adjust sample budgets designed to meet longer-term financial goals for various scenarios",
                ),
                Expectation::new(
                    "F1.4",
                    "Financial Decision Making",
                    "Identify various societal and personal factors that may influence financial decision making, and describe the effects that each might have",
                ),
            ]),
        ]),
    ];
}

/// All strands, in curriculum order.
pub fn strands() -> &'static [Strand] {
    &STRANDS
}

pub fn get_strand(id: &str) -> Option<&'static Strand> {
    STRANDS.iter().find(|s| s.id == id)
}

/// Look up a substrand by its strand id and its own id.
pub fn get_substrand(
    strand_id: &str,
    substrand_id: &str,
) -> Option<(&'static Strand, &'static Substrand)> {
    let strand = get_strand(strand_id)?;
    let substrand = strand.substrand(substrand_id)?;
    Some((strand, substrand))
}

/// Look up an expectation by code, along with its strand and substrand.
pub fn get_expectation(code: &str) -> Option<ExpectationEntry<'static>> {
    STRANDS.iter().find_map(|strand| {
        strand.substrands.iter().find_map(|substrand| {
            substrand
                .expectations
                .iter()
                .find(|e| e.code == code)
                .map(|expectation| ExpectationEntry {
                    strand,
                    substrand,
                    expectation,
                })
        })
    })
}

/// Number of expectations in the whole curriculum.
pub fn total_expectations() -> usize {
    STRANDS.iter().map(|s| s.expectations().count()).sum()
}
