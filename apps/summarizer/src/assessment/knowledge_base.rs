//! Knowledge Base: the fixed table of pre-approved interpretation text.
//!
//! Keyed by (assessment type, competency, tier). Overall Leadership and
//! Reasoning & Problem Solving entries are shared by both assessment types;
//! the six core competencies carry one variant per assessment type.
//!
//! The text is verbatim approved wording, typos included. Do not edit it.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::assessment::classifier::ClassificationError;

/// Lowest valid score.
pub const MIN_SCORE: f64 = 1.0;
/// Highest valid score (inclusive).
pub const MAX_SCORE: f64 = 5.0;
/// Scores at or above this are Moderate.
pub const MODERATE_THRESHOLD: f64 = 2.5;
/// Scores at or above this are High.
pub const HIGH_THRESHOLD: f64 = 3.5;

// ────────────────────────────────────────────────────────────────────────────
// Keys
// ────────────────────────────────────────────────────────────────────────────

/// Assessment variant. Selects which core-competency texts apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssessmentType {
    Apply,
    Shape,
}

impl AssessmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentType::Apply => "Apply",
            AssessmentType::Shape => "Shape",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: only "Apply" and "Shape" are accepted.
impl FromStr for AssessmentType {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Apply" => Ok(AssessmentType::Apply),
            "Shape" => Ok(AssessmentType::Shape),
            other => Err(ClassificationError::UnknownAssessmentType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tier {
    Low,
    Moderate,
    High,
}

/// A score band. Closed at the bottom; open at the top except for the top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub lower: f64,
    pub upper: f64,
    pub upper_inclusive: bool,
}

impl ScoreRange {
    pub fn contains(&self, score: f64) -> bool {
        if self.upper_inclusive {
            score >= self.lower && score <= self.upper
        } else {
            score >= self.lower && score < self.upper
        }
    }
}

impl fmt::Display for ScoreRange {
    /// Renders the band as the rulebook prints it, e.g. `2.50 - 3.49`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper = if self.upper_inclusive {
            self.upper
        } else {
            self.upper - 0.01
        };
        write!(f, "{:.2} - {:.2}", self.lower, upper)
    }
}

impl Tier {
    /// Tiers in the order the rulebook lists them.
    pub const DISPLAY_ORDER: [Tier; 3] = [Tier::High, Tier::Moderate, Tier::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Moderate => "Moderate",
            Tier::High => "High",
        }
    }

    pub fn score_range(self) -> ScoreRange {
        match self {
            Tier::Low => ScoreRange {
                lower: MIN_SCORE,
                upper: MODERATE_THRESHOLD,
                upper_inclusive: false,
            },
            Tier::Moderate => ScoreRange {
                lower: MODERATE_THRESHOLD,
                upper: HIGH_THRESHOLD,
                upper_inclusive: false,
            },
            Tier::High => ScoreRange {
                lower: HIGH_THRESHOLD,
                upper: MAX_SCORE,
                upper_inclusive: true,
            },
        }
    }

    /// Resolves the tier for a score. `None` for NaN or anything outside [1.00, 5.00].
    pub fn for_score(score: f64) -> Option<Tier> {
        [Tier::Low, Tier::Moderate, Tier::High]
            .into_iter()
            .find(|tier| tier.score_range().contains(score))
    }
}

/// One of the six competencies used for strength/development selection.
///
/// Declaration order is the canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoreCompetency {
    Drive,
    Learning,
    People,
    Strategic,
    Execution,
    Change,
}

impl CoreCompetency {
    pub const CANONICAL_ORDER: [CoreCompetency; 6] = [
        CoreCompetency::Drive,
        CoreCompetency::Learning,
        CoreCompetency::People,
        CoreCompetency::Strategic,
        CoreCompetency::Execution,
        CoreCompetency::Change,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            CoreCompetency::Drive => "Drive Potential",
            CoreCompetency::Learning => "Learning Potential",
            CoreCompetency::People => "People Potential",
            CoreCompetency::Strategic => "Strategic Potential",
            CoreCompetency::Execution => "Execution Potential",
            CoreCompetency::Change => "Change Potential",
        }
    }
}

impl Serialize for CoreCompetency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column_name())
    }
}

impl fmt::Display for CoreCompetency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Any of the eight scored dimensions on a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Competency {
    OverallLeadership,
    ReasoningProblemSolving,
    Core(CoreCompetency),
}

impl Competency {
    /// All scored dimensions, in input-table column order.
    pub const ALL: [Competency; 8] = [
        Competency::OverallLeadership,
        Competency::ReasoningProblemSolving,
        Competency::Core(CoreCompetency::Drive),
        Competency::Core(CoreCompetency::Learning),
        Competency::Core(CoreCompetency::People),
        Competency::Core(CoreCompetency::Strategic),
        Competency::Core(CoreCompetency::Execution),
        Competency::Core(CoreCompetency::Change),
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Competency::OverallLeadership => "Overall Leadership",
            Competency::ReasoningProblemSolving => "Reasoning & Problem Solving",
            Competency::Core(core) => core.column_name(),
        }
    }
}

impl From<CoreCompetency> for Competency {
    fn from(core: CoreCompetency) -> Self {
        Competency::Core(core)
    }
}

impl Serialize for Competency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column_name())
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Parses an exact (case-sensitive) column name.
impl FromStr for Competency {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Competency::ALL
            .into_iter()
            .find(|c| c.column_name() == s)
            .ok_or_else(|| ClassificationError::UnknownCompetency(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KnowledgeBaseEntry {
    /// `None` means the entry applies to every assessment type.
    pub assessment_type: Option<AssessmentType>,
    pub competency: Competency,
    pub tier: Tier,
    pub text: &'static str,
}

impl KnowledgeBaseEntry {
    pub fn score_range(&self) -> ScoreRange {
        self.tier.score_range()
    }

    fn applies_to(&self, assessment_type: AssessmentType) -> bool {
        self.assessment_type.map_or(true, |t| t == assessment_type)
    }
}

const fn shared(competency: Competency, tier: Tier, text: &'static str) -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        assessment_type: None,
        competency,
        tier,
        text,
    }
}

const fn apply(core: CoreCompetency, tier: Tier, text: &'static str) -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        assessment_type: Some(AssessmentType::Apply),
        competency: Competency::Core(core),
        tier,
        text,
    }
}

const fn shape(core: CoreCompetency, tier: Tier, text: &'static str) -> KnowledgeBaseEntry {
    KnowledgeBaseEntry {
        assessment_type: Some(AssessmentType::Shape),
        competency: Competency::Core(core),
        tier,
        text,
    }
}

use CoreCompetency::{Change, Drive, Execution, Learning, People, Strategic};
use Tier::{High, Low, Moderate};

/// The full rulebook. Immutable for the life of the process.
pub const KNOWLEDGE_BASE: &[KnowledgeBaseEntry] = &[
    // Initial evaluations, shared by Apply and Shape
    shared(Competency::OverallLeadership, High, "Demonstrates high potential with a strong capacity for growth and success in a more complex role."),
    shared(Competency::OverallLeadership, Moderate, "Demonstrates moderate potential with a reasonable capacity for growth and success in a more complex role."),
    shared(Competency::OverallLeadership, Low, "Demonstrates low potential with limited capacity for growth and success in a more complex role."),
    shared(Competency::ReasoningProblemSolving, High, "His/Her reasoning and problem-solving ability is higher-than-average as compared to a group of peers, implying a solid foundation for analytical thinking and judgment."),
    shared(Competency::ReasoningProblemSolving, Moderate, "His/Her reasoning and problem-solving ability is average, implying a reasonable level of logical thinking and problem solving aptitude."),
    shared(Competency::ReasoningProblemSolving, Low, "His/Her reasoning and problem-solving ability is below-average as compared to a group of peers."),
    // Apply
    apply(Drive, High, "Consistently demonstrates high motivation and initiative to exceed expectations. A strong drive to achieve goals, targets, and results. Seeks fulfillment through impact. High focus on achieving outcomes against set targets and delivers consistent performance to exceed own goals. Shows perseverance and determination to achieve tasks and goals despite challenges."),
    apply(Drive, Moderate, "Demonstrates motivation and takes initiative occasionally. Demonstrates a drive to achieve goals, but may need support. Interest in making an impact is present but not sustained. Moderate focus on outcomes and performance tracking; may occasionally lack focus. Shows perseverance to achieve tasks but may require support in overcoming setbacks or challenges."),
    apply(Drive, Low, "Demonstrates limited motivation or initiative; may meet expectations but does not show a consistent drive to exceed them. Fulfillment from work or desire to make an impact is not clearly evident. Low focus on outcomes; may not track performance against goals consistently. There may be a lack of perseverance and problem-solving when faced with setbacks."),
    apply(Learning, High, "Consistently takes time to focus on both personal and professional growth - for both self and others. Actively pursues continuous improvement and excellence; shows clear willingness to learn and unlearn. Strong ability to resolve problems with team members proactively and achieve common goals. Makes contributions on a continual basis, creates trust and teamwork."),
    apply(Learning, Moderate, "Focuses on personal and professional growth and engages in learning activities but may not do so consistently. Moderate openness to learning and unlearning. Cooperates with team members in most situations but may need guidance to work through conflicts. Makes contributions intermittently and may not always address conflicts when they arise."),
    apply(Learning, Low, "Rarely focuses on personal or professional growth. Engagement in learning is limited and may resist feedback or change. Seldom works collaboratively with team members. Rarely contributes meaningfully and may avoid resolving conflicts, often leaving issues unaddressed."),
    apply(People, High, "Consistently shows capability to lead and inspire others. Displays strong empathy, understanding, and a focus on people. Builds relationships with ease and enjoys social interaction. Strong ability to identify and build relationships and connections. Understands stakeholder needs and mutual interests. Works to build long-term relationships."),
    apply(People, Moderate, "Displays some ability to relate to and lead others. May show empathy and focus on people but not consistently. Builds relationships but may need support. May have only partial understanding of stakeholder needs and mutual interests. Works to build long-term relationships but may be inconsistent."),
    apply(People, Low, "Demonstrtaes limited capability in leading or inspiring others. Social interaction may be minimal or strained. Struggles to build and maintain relationships. Demonstrates limited understanding of stakeholder needs or interdependencies, and does not work to build long-term relationships."),
    apply(Strategic, High, "Approaches work with a strong focus on the bigger picture. Operates independently with minimal guidance. Demonstrates a commercial and strategic mindset, regularly anticipating trends and their impact. Understands potential risks and seeks guidance to address the issues. Strong ability to revise strategies based on team needs while prioritising tasks accordingly in order to meet set deadlines."),
    apply(Strategic, Moderate, "Demonstrates awareness of the bigger picture but may need occasional guidance. Understands strategy in parts but may not consistently anticipate trends or broader implications. Can identify risks with some guidance and seeks input occasionally to address issues. Demonstrates some ability to revise plans but may need reminders to prioritise effectively."),
    apply(Strategic, Low, "Focus tends to be on immediate tasks. Requires frequent guidance. Displays limited awareness of trends or the strategic impact of work. Low ability to align goals with team direction and recognise potential risks. Requires frequent support to address issues and struggles to revise plans independently."),
    apply(Execution, High, "Consistently addresses problems and challenges with confidence and resilience. Takes a diligent, practical, and solution-focused approach to solving issues. Will likely remain composed in the face of setbacks and approach problems with a positive \u{201c}can do\u{201d} attitude."),
    apply(Execution, Moderate, "Demonstrates ability to address problems but may need support or time to build confidence and resilience. Attempts a practical approach but not always solution-focused. Moderate ability to identify issues proactively, and takes action when promoted. Sometimes may struggle to remain composed under pressure."),
    apply(Execution, Low, "Struggles to address problems confidently. May rely heavily on others and may not take a practical or solution-oriented approach. Does not prioritise working with others to solve problems and identify solutions. Struggles to remain composed under pressure or maintain a positive approach."),
    apply(Change, High, "Thrives in change and complexity in the workplace. Manages new ways of working with adaptability, flexibility, and decisiveness during uncertainty. Supports implementation of new change initiatives and takes appropriate follow-up action."),
    apply(Change, Moderate, "Generally copes with change and can adapt when needed. May need support to remain flexible or decisive in uncertain situations. Operates with a degree of comfort when facts are not fully available and support change initiatives, but follow-up action may be delayed or inconsistent."),
    apply(Change, Low, "Struggles with change or uncertainty. May resist new ways of working and has difficulty adapting or deciding in changing circumstances. May be uncomfortable operating when facts are unclear and is unlikely to support change initiatives."),
    // Shape
    shape(Drive, High, "Consistently demonstrates high motivation and initiative to exceed expectations. A strong drive to achieve goals, targets, and results. Seeks fulfillment through impact. Drives a high-performance culture across teams and demonstrates grit and persistence when working toward ambitious targets."),
    shape(Drive, Moderate, "Demonstrates motivation and takes initiative occasionally. Demonstrates a drive to achieve goals, but may need support. Interest in making an impact is present but not sustained. Moderate ability to articulate performance standards that contribute to achieving organisational goals. Occasionally supports performance across teams and shows persistence when working towards goals."),
    shape(Drive, Low, "Demonstrates limited motivation or initiative; may meet expectations but does not show a consistent drive to exceed them. Fulfillment from work or desire to make an impact is not clearly evident. Low ability to articulate performance standards that support organisational goals. Needs development in fostering a high-performance culture and in maintaining persistence when faced with challenging goals."),
    shape(Learning, High, "Consistently takes time to focus on both personal and professional growth - for both self and others. Actively pursues continuous improvement and excellence; shows clear willingness to learn and unlearn. Strongly supports development of others by identifying and leveraging individual strengths. Advocates for learning and career growth, contributing to a culture of learning and continuous improvement."),
    shape(Learning, Moderate, "Focuses on personal and professional growth for self and others and engages in learning activities but may not do so consistently. Displays willingness to learn and unlearn. Recognizes others\u{2019} development needs and offers support, though may not consistently nurture growth or advocate for talent advancement."),
    shape(Learning, Low, "Rarely focuses on personal or professional growth- for both self and others. Engagement in learning is limited and may resist feedback or change. Shows minimal interest in developing others or contributing to a learning environment. May neglect or avoid growth conversations."),
    shape(People, High, "Consistently shows capability to lead and inspire others. Displays strong empathy, understanding, and a focus on people. Builds relationships with ease and enjoys social interaction. Demonstrates strong ability to engage key stakeholders, build trust-based relationships, and find synergies for mutual outcomes. Proactively networks and stays connected across internal and external touchpoints"),
    shape(People, Moderate, "Displays some ability to lead and inspire others. May show empathy and focus on people inconsistently. Moderate ability to maintain and build relationships with key stakeholders. Often identifies synergies for positive outcomes. Occasionally proactively networks."),
    shape(People, Low, "Demonstrates limited capability in leading or inspiring others. Social interaction may be minimal or strained. Struggles to build and maintain relationships. Rarely engages with stakeholders and does not leverage relationships for mutual outcomes. Limited presence in networks or cross-functional collaboration."),
    shape(Strategic, High, "Approaches work with a strong focus on the bigger picture. Operates independently with minimal guidance. Demonstrates a commercial and strategic mindset, regularly anticipating trends and their impact. Effectively balances short-term goals with long-term organizational value. Translates complex goals into clear team actions and helps others understand broader implications."),
    shape(Strategic, Moderate, "Demonstrates some awareness of the bigger picture but may need occasional guidance. Understands strategy in parts but may not consistently anticipate trends or broader implications. Occasionally translates organisational goals into meaningful actions. Can focus on both immediate and longer-term needs but may favor one over the other."),
    shape(Strategic, Low, "Focus tends to be on immediate tasks. Requires frequent guidance. Displays limited awareness of trends or the strategic impact of work. Needs ongoing guidance to connect work with strategic direction. Struggles to translate organizational priorities into meaningful tasks or influence direction."),
    shape(Execution, High, "Consistently addresses problems and challenges with confidence and resilience. Takes a diligent, practical, and solution-focused approach. Comfortable navigating ambiguity and complexity. Makes sound decisions under pressure and thrives in environments with multiple demands."),
    shape(Execution, Moderate, "Has the ability to address problems but may need time or support to build confidence and resilience. Attempts a practical approach but not always solution-focused. Moderate ability to handle ambiguity and complex envrionments. Shows some confidence in leading through uncertain environments"),
    shape(Execution, Low, "Struggles to address problems confidently. May rely heavily on others. Practical or solution-oriented approaches are limited. Avoids complexity and ambiguity. Rarely takes initiative in resolving obstacles."),
    shape(Change, High, "Thrives in change and complexity. Manages new ways of working with adaptability, flexibility, and decisiveness during change. Plays an active role in transformation initiatives, shows strong resilience, and enables buy-in and alignment from others during change."),
    shape(Change, Moderate, "Demonstrates ability to cope with change and can adapt when needed. May need support to remain flexible or decisive in uncertain situations. Contributes to organisational change initiatives, may enable buy-in and shows resilience during challenging times."),
    shape(Change, Low, "Struggles with change or uncertainty. May resist new ways of working and has difficulty adapting or deciding in changing circumstances. Rarely contributes to transformation efforts and finds it difficult to stay resilient under shifting demands. Has difficulty enabling buy-in and support."),
];

/// Finds the interpretation entry for a (type, competency, tier) key.
pub fn lookup(
    assessment_type: AssessmentType,
    competency: Competency,
    tier: Tier,
) -> Option<&'static KnowledgeBaseEntry> {
    KNOWLEDGE_BASE
        .iter()
        .find(|e| e.competency == competency && e.tier == tier && e.applies_to(assessment_type))
}

/// Entries for one competency in rulebook order (High, Moderate, Low).
///
/// With `assessment_type = None` only the shared entries are returned.
pub fn entries_for(
    competency: Competency,
    assessment_type: Option<AssessmentType>,
) -> Vec<&'static KnowledgeBaseEntry> {
    Tier::DISPLAY_ORDER
        .into_iter()
        .filter_map(|tier| {
            KNOWLEDGE_BASE.iter().find(|e| {
                e.competency == competency && e.tier == tier && e.assessment_type == assessment_type
            })
        })
        .collect()
}
