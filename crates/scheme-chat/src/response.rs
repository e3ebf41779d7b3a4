//! Reply text for every dialogue outcome.
//!
//! All user-facing wording lives here so the orchestrator only decides
//! *which* reply to give.

use scheme_core::{CategoryConfig, Scheme};

use crate::eligibility::Verdict;

/// Descriptions longer than this many characters are shortened.
const DESCRIPTION_LIMIT: usize = 150;
const DESCRIPTION_KEEP: usize = 147;

const SHOW_MORE_HINT: &str = "💡 Want to see more schemes? Just say 'show more'!";

const FOLLOW_UP_EXAMPLES: &str = "📌 **To learn more about any scheme, just ask:**\n\
• 'Tell me more about scheme 1'\n\
• 'What are the benefits of the first scheme?'\n\
• 'Am I eligible for scheme 2?'\n\
• 'How do I apply for the third scheme?'";

// =============================================================================
// ResponseGenerator
// =============================================================================

pub struct ResponseGenerator {
    clarification: String,
}

impl ResponseGenerator {
    pub fn new(categories: &[CategoryConfig]) -> Self {
        let names = categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" or ");
        Self {
            clarification: format!(
                "To help you better, could you please tell me what type of support you're looking for? ({})",
                names
            ),
        }
    }

    // -- Pages --

    /// Render one page of schemes under `intro`.
    ///
    /// `offset` is the position of the page's first scheme in the full list,
    /// so numbers match what the user can refer back to.
    pub fn render_page(&self, intro: &str, page: &[Scheme], offset: usize, has_more: bool) -> String {
        let mut out = format!("{}\n\n{}", intro, format_schemes_brief(page, offset));
        if has_more {
            out.push_str("\n\n");
            out.push_str(SHOW_MORE_HINT);
        }
        out.push_str("\n\n");
        out.push_str(FOLLOW_UP_EXAMPLES);
        out
    }

    pub fn search_intro(&self, count: usize, result_noun: &str) -> String {
        format!(
            "I found {} {} that might help you. Let me show you the options:",
            count, result_noun
        )
    }

    pub fn more_schemes_intro(&self) -> &'static str {
        "Here are more schemes:"
    }

    pub fn all_schemes_seen(&self) -> &'static str {
        "You've seen all available schemes. Is there anything else I can help you with?"
    }

    // -- Clarifications and failures --

    pub fn clarification(&self) -> &str {
        &self.clarification
    }

    pub fn no_schemes_yet(&self) -> &'static str {
        "I don't have any schemes to show you yet. Please tell me what you're looking for."
    }

    pub fn unresolved_reference(&self) -> &'static str {
        "I'm not sure which scheme you're referring to. Could you please specify the scheme number (1, 2, 3, etc.)?"
    }

    pub fn search_failed(&self, error: &str) -> String {
        format!("I encountered an error while searching for schemes: {}", error)
    }

    pub fn unknown_category(&self, category_id: &str) -> String {
        format!("I'm sorry, I don't have schemes for the category: {}", category_id)
    }

    // -- Scheme details --

    pub fn eligibility_offer(&self, scheme: &Scheme) -> String {
        format!(
            "**{}**\n\n\
             I can help you check if you're eligible for this scheme! 🎯\n\n\
             I'll ask you a few simple questions to determine your eligibility.\n\n\
             Ready to start? (Just say 'yes' or 'start')",
            scheme.name
        )
    }

    pub fn benefits(&self, scheme: &Scheme) -> String {
        let mut out = format!("**{}**\n\n", scheme.name);
        if scheme.benefits.is_empty() {
            out.push_str("I don't have specific benefit details for this scheme.\n\n");
        } else {
            out.push_str(&format!("💰 **Benefits:**\n{}\n\n", scheme.benefits));
        }
        out.push_str("Would you like to:\n• Check if you're eligible?\n• Learn how to apply?");
        out
    }

    pub fn application(&self, scheme: &Scheme) -> String {
        let mut out = format!("**{}**\n\n", scheme.name);
        if scheme.application_process.is_empty() {
            out.push_str("Application process details are not available.\n\n");
        } else {
            out.push_str(&format!("📝 **How to Apply:**\n{}\n\n", scheme.application_process));
        }
        if !scheme.url.is_empty() {
            out.push_str(&format!("🔗 **Apply here:** {}\n\n", scheme.url));
        }
        out.push_str("Do you have any questions about the application process?");
        out
    }

    pub fn description(&self, scheme: &Scheme) -> String {
        format!(
            "**{}**\n\n\
             📝 **Description:**\n{}\n\n\
             What would you like to know?\n\
             • Benefits of this scheme\n\
             • Check eligibility (I'll ask you a few questions)\n\
             • How to apply",
            scheme.name, scheme.description
        )
    }

    // -- Eligibility interview --

    pub fn question(&self, number: usize, total: usize, text: &str) -> String {
        format!(
            "**Question {}/{}**\n\n❓ {}\n\nPlease answer with 'yes' or 'no'.",
            number, total, text
        )
    }

    pub fn interview_declined(&self) -> &'static str {
        "No problem! Let me know if you'd like to explore other schemes or need any other help."
    }

    pub fn verdict(&self, scheme: &Scheme, verdict: Verdict) -> String {
        let mut out = format!("**{}**\n\n📊 **Eligibility Assessment Result:**\n\n", scheme.name);
        match verdict {
            Verdict::Ineligible => {
                out.push_str("❌ **Unfortunately, you may not be eligible** for this scheme.\n\n");
                out.push_str("Based on your answers, government employees, constitutional post holders, and income tax payers are excluded from this scheme.\n\n");
                out.push_str("💡 However, I can help you find other schemes you might be eligible for!");
            }
            Verdict::Eligible => {
                out.push_str("✅ **Great news! You appear to be eligible** for this scheme! 🎉\n\n");
                if !scheme.benefits.is_empty() {
                    out.push_str(&format!("💰 **Benefits you'll receive:**\n{}\n\n", scheme.benefits));
                }
                out.push_str("Would you like to know how to apply?");
            }
            Verdict::Partial => {
                out.push_str("⚠️ **You may have limited eligibility** for this scheme.\n\n");
                out.push_str("Based on your answers, you might not meet all the criteria. However, I recommend:\n");
                out.push_str("• Checking with the local agriculture/MSME office\n");
                out.push_str("• Looking at other similar schemes\n\n");
                out.push_str("Would you like me to show you more schemes?");
            }
        }
        out
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Cut a description to the first 147 characters plus "..." when it is
/// longer than 150 characters.
pub fn short_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let kept: String = description.chars().take(DESCRIPTION_KEEP).collect();
        format!("{}...", kept)
    } else {
        description.to_string()
    }
}

fn format_schemes_brief(page: &[Scheme], offset: usize) -> String {
    if page.is_empty() {
        return "I couldn't find any schemes matching your requirements. Please try rephrasing your query.".to_string();
    }
    page.iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "\n**{}. {}**\n   {}\n",
                offset + i + 1,
                s.name,
                short_description(&s.description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Tests
// =============================================================================
