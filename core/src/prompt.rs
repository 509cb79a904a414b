//! Deterministic prompt construction.
//!
//! The system instruction is picked by [`Purpose`] and always ends with
//! [`OUTPUT_CONTRACT`]. The user instruction lists every request field in a
//! fixed order; absent optional values get an explicit placeholder so no
//! field is ever left out.

use std::fmt::Write as _;

use crate::model::{GenerationRequest, Purpose, ReplyType};

/// Output format every system instruction ends with.
pub const OUTPUT_CONTRACT: &str = r#"Respond with a single JSON object and nothing else: no prose, no explanation and no code fences outside the object. The object must contain exactly these keys:
{
  "subject": "Your primary subject line",
  "subject_variants": ["Alternative subject 1", "Alternative subject 2"],
  "body": "The full email body",
  "spam_score": 0,
  "spam_warnings": ["Short description of each spam trigger found"]
}

RULES:
- "subject_variants" must contain exactly 2 alternative subject lines.
- "spam_score" is an integer from 0 to 100 estimating how likely spam filters are to flag the email (0 = very unlikely).
- "spam_warnings" lists the concrete spam-trigger phrases or patterns in the email; use an empty array when there are none.
- NEVER use emojis anywhere in the subject or body.
- Format the body with blank lines: after the greeting, between paragraphs and before the sign-off.
- Use \n for newlines inside JSON strings."#;

const RECIPIENT_PLACEHOLDER: &str = "not provided (use a neutral greeting)";
const SENDER_PLACEHOLDER: &str = "not provided (end with a sign-off but no name)";

/// A compiled prompt, split the way chat-completion providers expect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrompt {
    pub system: String,
    pub user: String,
}

impl CompiledPrompt {
    /// Both parts as one text, for single-string providers and auditing.
    pub fn to_text(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Base instruction for each purpose.
pub fn purpose_instruction(purpose: Purpose) -> &'static str {
    match purpose {
        Purpose::General => {
            "You are an expert email writer. Write clear, professional emails based on the given parameters."
        }
        Purpose::ColdOutreach => {
            "You are an expert at writing cold outreach emails. Write emails that:
- Hook the reader in the first line with something relevant to them
- Provide immediate value or insight
- Keep the body extremely concise
- Have a single, clear ask
- Avoid sounding salesy, generic or templated"
        }
        Purpose::FollowUp => {
            "You are an expert at writing follow-up emails. Write follow-ups that:
- Reference the previous interaction naturally
- Add new value rather than just \"checking in\"
- Stay shorter than the original exchange
- Make responding easy
- Keep appropriate urgency without being pushy"
        }
        Purpose::Introduction => {
            "You are an expert at writing introduction emails. Write warm, professional introductions that:
- Establish who the sender is clearly and memorably
- Explain the context or connection
- State the purpose naturally
- Make it easy for the recipient to respond"
        }
        Purpose::Application => {
            "You are an expert at writing job and opportunity applications. Write compelling application emails that:
- Open with a specific hook showing genuine interest
- Highlight relevant qualifications concisely
- Show knowledge of the company or opportunity
- End with a clear call to action"
        }
        Purpose::Negotiation => {
            "You are an expert negotiator writing by email. Write negotiation emails that:
- Are firm on the sender's position but collaborative in tone
- Anchor on concrete terms and the reasons behind them
- Acknowledge the other party's interests
- Propose a clear next step toward agreement"
        }
        Purpose::Decline => {
            "You are an expert at writing gracious decline emails. Write declines that:
- Thank the recipient sincerely for the offer or request
- State the decision clearly and early, without over-explaining
- Stay warm and preserve the relationship
- Leave the door open where appropriate"
        }
        Purpose::Acceptance => {
            "You are an expert at writing acceptance emails. Write acceptances that:
- Confirm the acceptance unambiguously in the opening
- Express genuine appreciation
- Restate the key terms or details being accepted
- Outline the next steps"
        }
        Purpose::CounterOffer => {
            "You are an expert at writing counter-offer emails. Write counter-offers that:
- Show appreciation for the original offer
- Present the counter-proposal with specific figures or terms
- Justify each requested change briefly and factually
- Keep the tone constructive and invite further discussion"
        }
    }
}

/// Render a validated request into its prompt. Pure: equal requests give
/// byte-identical output.
pub fn compile(request: &GenerationRequest) -> CompiledPrompt {
    let system = format!(
        "{}\nNEVER use emojis in any part of the email.\n\n{}",
        purpose_instruction(request.purpose()),
        OUTPUT_CONTRACT
    );

    let mut user = String::from("Write an email with the following specifications:\n");
    let _ = writeln!(user, "- Purpose: {}", request.purpose());
    let _ = writeln!(user, "- Tone: {} ({})", request.tone(), request.tone().describe());
    let _ = writeln!(user, "- Length: {} ({})", request.length(), request.length().describe());
    let _ = writeln!(
        user,
        "- Audience: {} ({})",
        request.audience(),
        request.audience().describe()
    );
    let _ = writeln!(
        user,
        "- Industry: {} (use the vocabulary and conventions of this field)",
        request.industry()
    );
    let _ = writeln!(user, "- Urgency: {} ({})", request.urgency(), request.urgency().describe());
    let _ = writeln!(
        user,
        "- Language: write the subject lines and body entirely in {}",
        request.language()
    );
    let _ = writeln!(
        user,
        "- Recipient name: {}",
        request.recipient_name().unwrap_or(RECIPIENT_PLACEHOLDER)
    );
    let _ = writeln!(
        user,
        "- Sender name: {}",
        request.sender_name().unwrap_or(SENDER_PLACEHOLDER)
    );
    match (request.reply_type(), request.incoming_email()) {
        (ReplyType::Reply, Some(incoming)) => {
            let _ = writeln!(
                user,
                "- Message type: REPLY to the following email:\n```\n{incoming}\n```"
            );
        }
        (_, incoming) => {
            let _ = writeln!(user, "- Message type: NEW email (not a reply)");
            if let Some(incoming) = incoming {
                let _ = writeln!(user, "- Related context:\n```\n{incoming}\n```");
            }
        }
    }
    let _ = write!(user, "\nKey points to cover:\n{}", request.key_points());

    CompiledPrompt { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{tests::follow_up_params, validate};
    use enum_iterator::all;
    use std::collections::HashSet;

    fn compiled(overrides: &[(&str, &str)]) -> CompiledPrompt {
        let mut raw = follow_up_params();
        for (k, v) in overrides {
            raw.insert(k.to_string(), v.to_string());
        }
        compile(&validate(&raw).unwrap())
    }

    #[test]
    fn test_compile_is_deterministic() {
        let raw = follow_up_params();
        let a = compile(&validate(&raw).unwrap());
        let b = compile(&validate(&raw).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.to_text().as_bytes(), b.to_text().as_bytes());
    }

    #[test]
    fn test_every_field_is_interpolated() {
        let prompt = compiled(&[
            ("recipient_name", "Dana"),
            ("sender_name", "Lee"),
            ("language", "Japanese"),
            ("urgency", "high"),
        ]);
        for needle in [
            "Purpose: follow-up",
            "Tone: formal",
            "Length: short",
            "Audience: client",
            "Industry: sales",
            "Urgency: high",
            "entirely in Japanese",
            "Recipient name: Dana",
            "Sender name: Lee",
            "NEW email",
            "thank them for the meeting",
        ] {
            assert!(prompt.user.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn test_absent_names_get_placeholders() {
        let prompt = compiled(&[]);
        assert!(prompt.user.contains(&format!("Recipient name: {RECIPIENT_PLACEHOLDER}")));
        assert!(prompt.user.contains(&format!("Sender name: {SENDER_PLACEHOLDER}")));
    }

    #[test]
    fn test_reply_includes_incoming_email() {
        let prompt = compiled(&[
            ("reply_type", "reply"),
            ("incoming_email", "Are you free Thursday?"),
        ]);
        assert!(prompt.user.contains("REPLY to the following email"));
        assert!(prompt.user.contains("Are you free Thursday?"));
    }

    #[test]
    fn test_system_ends_with_output_contract() {
        let prompt = compiled(&[]);
        assert!(prompt.system.ends_with(OUTPUT_CONTRACT));
        for key in ["subject", "subject_variants", "body", "spam_score", "spam_warnings"] {
            assert!(OUTPUT_CONTRACT.contains(&format!("\"{key}\"")));
        }
    }

    #[test]
    fn test_each_purpose_has_distinct_instruction() {
        let instructions: HashSet<_> = all::<Purpose>().map(purpose_instruction).collect();
        assert_eq!(instructions.len(), enum_iterator::cardinality::<Purpose>());

        assert!(purpose_instruction(Purpose::Decline).contains("gracious"));
        assert!(purpose_instruction(Purpose::Negotiation).contains("firm"));
    }

    #[test]
    fn test_purpose_selects_system_instruction() {
        let decline = compiled(&[("purpose", "decline")]);
        let negotiation = compiled(&[("purpose", "negotiation")]);
        assert!(decline.system.starts_with(purpose_instruction(Purpose::Decline)));
        assert_ne!(decline.system, negotiation.system);
    }
}
