use enum_iterator::Sequence;
use strum::{Display, EnumString, IntoStaticStr};

/// Register of the drafted email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Tone {
    VeryFormal,
    Formal,
    Neutral,
    Friendly,
    Casual,
    Assertive,
    Apologetic,
}

impl Tone {
    pub fn describe(self) -> &'static str {
        match self {
            Tone::VeryFormal => "very formal and professional",
            Tone::Formal => "formal but approachable",
            Tone::Neutral => "balanced and neutral",
            Tone::Friendly => "friendly and conversational",
            Tone::Casual => "casual and relaxed",
            Tone::Assertive => "direct and assertive, confident without being rude",
            Tone::Apologetic => "sincerely apologetic and accountable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Length {
    Short,
    Medium,
    Long,
}

impl Length {
    pub fn describe(self) -> &'static str {
        match self {
            Length::Short => "short (2-4 sentences, under 100 words)",
            Length::Medium => "medium (2-3 short paragraphs)",
            Length::Long => "long and thorough (4 or more paragraphs)",
        }
    }
}

/// What the email is for. Selects the system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Purpose {
    General,
    ColdOutreach,
    FollowUp,
    Introduction,
    Application,
    Negotiation,
    Decline,
    Acceptance,
    CounterOffer,
}

/// Output languages. Closed set of twelve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Japanese,
    Chinese,
    Korean,
    Arabic,
    Hindi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Audience {
    Executive,
    Manager,
    Colleague,
    Client,
    Customer,
    Recruiter,
    Vendor,
    General,
}

impl Audience {
    pub fn describe(self) -> &'static str {
        match self {
            Audience::Executive => "a senior executive with little time; lead with the point",
            Audience::Manager => "a manager; be clear about decisions and next steps",
            Audience::Colleague => "a colleague; collegial and practical",
            Audience::Client => "a client; attentive and service-minded",
            Audience::Customer => "a customer; helpful and plain-spoken",
            Audience::Recruiter => "a recruiter; professional and specific about fit",
            Audience::Vendor => "a vendor or supplier; courteous and precise",
            Audience::General => "a general reader",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Industry {
    General,
    Legal,
    Technical,
    Sales,
    Marketing,
    Finance,
    Healthcare,
    Education,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Urgency {
    Low,
    Normal,
    High,
}

impl Urgency {
    pub fn describe(self) -> &'static str {
        match self {
            Urgency::Low => "no time pressure; do not imply a deadline",
            Urgency::Normal => "ordinary priority",
            Urgency::High => "time-sensitive; state the deadline or required action early, without sounding pushy",
        }
    }
}

/// Whether the email starts a thread or answers one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ReplyType {
    #[default]
    New,
    Reply,
}

/// A fully validated generation request.
///
/// Only [`crate::validator::validate`] builds one, so every categorical
/// field is known to be in its closed set and the free-text fields are
/// within their bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub(crate) tone: Tone,
    pub(crate) length: Length,
    pub(crate) purpose: Purpose,
    pub(crate) language: Language,
    pub(crate) audience: Audience,
    pub(crate) industry: Industry,
    pub(crate) urgency: Urgency,
    pub(crate) reply_type: ReplyType,
    pub(crate) key_points: String,
    pub(crate) recipient_name: Option<String>,
    pub(crate) sender_name: Option<String>,
    pub(crate) incoming_email: Option<String>,
}

impl GenerationRequest {
    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn reply_type(&self) -> ReplyType {
        self.reply_type
    }

    pub fn key_points(&self) -> &str {
        &self.key_points
    }

    pub fn recipient_name(&self) -> Option<&str> {
        self.recipient_name.as_deref()
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    pub fn incoming_email(&self) -> Option<&str> {
        self.incoming_email.as_deref()
    }
}

/// Reading speed used for the read-time estimate.
pub const WORDS_PER_MINUTE: u64 = 200;

/// A validated model reply.
///
/// Built only by [`crate::parser::parse_reply`]. Word count and read time
/// are computed from `body` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub(crate) subject: String,
    pub(crate) subject_variants: [String; 2],
    pub(crate) body: String,
    pub(crate) spam_score: u8,
    pub(crate) spam_warnings: Vec<String>,
}

impl GenerationResult {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn subject_variants(&self) -> &[String; 2] {
        &self.subject_variants
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn spam_score(&self) -> u8 {
        self.spam_score
    }

    pub fn spam_warnings(&self) -> &[String] {
        &self.spam_warnings
    }

    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Seconds at [`WORDS_PER_MINUTE`], half-way values rounded up.
    pub fn read_time_seconds(&self) -> u64 {
        (self.word_count() as u64 * 60 + WORDS_PER_MINUTE / 2) / WORDS_PER_MINUTE
    }

    pub fn read_time_display(&self) -> String {
        let seconds = self.read_time_seconds();
        if seconds < 60 {
            "<1 min read".to_string()
        } else {
            format!("{} min read", seconds.div_ceil(60))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enum_iterator::{all, cardinality};
    use std::str::FromStr;

    fn result_with_body(body: String) -> GenerationResult {
        GenerationResult {
            subject: "Subject".to_string(),
            subject_variants: ["A".to_string(), "B".to_string()],
            body,
            spam_score: 0,
            spam_warnings: vec![],
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_language_set_has_twelve_members() {
        assert_eq!(cardinality::<Language>(), 12);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Purpose::from_str("follow-up").unwrap(), Purpose::FollowUp);
        assert_eq!(Purpose::from_str("counter-offer").unwrap(), Purpose::CounterOffer);
        assert_eq!(Tone::from_str("very-formal").unwrap(), Tone::VeryFormal);
        assert_eq!(Language::from_str("English").unwrap(), Language::English);
        let name: &'static str = Purpose::ColdOutreach.into();
        assert_eq!(name, "cold-outreach");
    }

    #[test]
    fn test_wire_names_are_case_sensitive() {
        assert!(Tone::from_str("Formal").is_err());
        assert!(Language::from_str("english").is_err());
    }

    #[test]
    fn test_every_variant_round_trips_through_its_name() {
        for tone in all::<Tone>() {
            let name: &'static str = tone.into();
            assert_eq!(Tone::from_str(name).unwrap(), tone);
        }
        for language in all::<Language>() {
            assert_eq!(Language::from_str(&language.to_string()).unwrap(), language);
        }
    }

    #[test]
    fn test_read_time_for_200_words() {
        let result = result_with_body(words(200));
        assert_eq!(result.word_count(), 200);
        assert_eq!(result.read_time_seconds(), 60);
        assert_eq!(result.read_time_display(), "1 min read");
    }

    #[test]
    fn test_read_time_for_100_words() {
        let result = result_with_body(words(100));
        assert_eq!(result.read_time_seconds(), 30);
        assert_eq!(result.read_time_display(), "<1 min read");
    }

    #[test]
    fn test_read_time_rounds_up_to_whole_minutes() {
        // 250 words -> 75s -> 2 min
        let result = result_with_body(words(250));
        assert_eq!(result.read_time_seconds(), 75);
        assert_eq!(result.read_time_display(), "2 min read");
    }

    #[test]
    fn test_read_time_half_seconds_round_up() {
        assert_eq!(result_with_body(words(5)).read_time_seconds(), 2);
        assert_eq!(result_with_body(words(205)).read_time_seconds(), 62);
        assert_eq!(result_with_body(words(1)).read_time_seconds(), 0);
        assert_eq!(result_with_body(String::new()).read_time_seconds(), 0);
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        let result = result_with_body("Dear Ann,\n\n  thanks   again.\t\nBest".to_string());
        assert_eq!(result.word_count(), 5);
    }
}
