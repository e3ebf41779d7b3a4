//! Scripted yes/no eligibility interview.
//!
//! Questions are derived from the scheme's name and eligibility text; the
//! verdict is a fixed heuristic over the verbatim answers. State lives in
//! [`ConversationContext`] so the interview survives across turns.

use tracing::{debug, info};

use scheme_core::Scheme;

use crate::types::{ConversationContext, EligibilityAnswers};

// =============================================================================
// Question lists
// =============================================================================

pub const FARMER_QUESTIONS: &[&str] = &[
    "Do you own cultivable agricultural land?",
    "Is the land registered in your name or your family's name?",
    "Are you currently using this land for farming/cultivation?",
    "Are you an Indian citizen and resident of India?",
    "Are you or any family member a government employee, constitutional post holder, or income tax payer?",
];

pub const MSME_QUESTIONS: &[&str] = &[
    "Do you own or operate a micro, small, or medium enterprise?",
    "Is your business registered?",
    "Is your business involved in manufacturing or service activities?",
    "Is your enterprise located in India?",
];

pub const FALLBACK_QUESTIONS: &[&str] = &[
    "Are you interested in applying for this scheme?",
    "Do you meet the basic criteria mentioned in the scheme description?",
];

/// Answer key of the farmer exclusion question. A "yes" here disqualifies.
const EXCLUSION_KEY: &str = "q5";

const AFFIRMATIVE_WORDS: &[&str] = &["yes", "start", "ok", "sure", "ready"];

/// Questions for `scheme`, in asking order. Never empty.
pub fn derive_questions(scheme: &Scheme) -> Vec<&'static str> {
    let name = scheme.name.to_lowercase();
    if name.contains("farmer") || name.contains("kisan") {
        return FARMER_QUESTIONS.to_vec();
    }
    if name.contains("msme") || name.contains("business") {
        return MSME_QUESTIONS.to_vec();
    }

    let text = scheme.eligibility.to_lowercase();
    let mut questions = Vec::new();
    if text.contains("land") {
        questions.push("Do you own agricultural land?");
    }
    if text.contains("farmer") {
        questions.push("Are you engaged in farming activities?");
    }
    if text.contains("business") {
        questions.push("Do you own or operate a business?");
    }
    if text.contains("age") || text.contains("18") {
        questions.push("Are you 18 years of age or older?");
    }
    if text.contains("citizen") || text.contains("resident") {
        questions.push("Are you an Indian citizen/resident?");
    }

    if questions.is_empty() {
        FALLBACK_QUESTIONS.to_vec()
    } else {
        questions
    }
}

// =============================================================================
// Verdict
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Eligible,
    Ineligible,
    Partial,
}

/// Substring counts over the answers. A reply like "not now, yes" counts
/// toward both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerTally {
    pub yes: usize,
    pub no: usize,
}

impl AnswerTally {
    pub fn count(answers: &EligibilityAnswers) -> Self {
        let mut tally = Self::default();
        for answer in answers.values() {
            let lowered = answer.to_lowercase();
            if lowered.contains("yes") {
                tally.yes += 1;
            }
            if lowered.contains("no") {
                tally.no += 1;
            }
        }
        tally
    }
}

/// Exclusion answer first, then "all but one said yes".
pub fn evaluate(answers: &EligibilityAnswers, question_count: usize) -> (Verdict, AnswerTally) {
    let tally = AnswerTally::count(answers);
    let excluded = answers
        .get(EXCLUSION_KEY)
        .is_some_and(|a| a.to_lowercase().contains("yes"));

    let verdict = if excluded {
        Verdict::Ineligible
    } else if tally.yes + 1 >= question_count {
        Verdict::Eligible
    } else {
        Verdict::Partial
    };
    (verdict, tally)
}

// =============================================================================
// Interview state machine
// =============================================================================

/// What the interview produced for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewStep {
    /// The offer was not taken up; the interview is reset.
    Declined,
    Question {
        number: usize,
        total: usize,
        text: &'static str,
    },
    Completed {
        verdict: Verdict,
        tally: AnswerTally,
    },
}

/// Drives the interview over a session's context.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityInterview;

impl EligibilityInterview {
    pub fn new() -> Self {
        Self
    }

    /// Offer an interview for `scheme`. The next turn decides whether it
    /// starts.
    pub fn offer(&self, ctx: &mut ConversationContext, scheme: &Scheme) {
        ctx.eligibility_check_in_progress = true;
        ctx.eligibility_scheme_id = Some(scheme.id.clone());
        ctx.eligibility_answers.clear();
        ctx.current_eligibility_question = 0;
        debug!(session_id = %ctx.session_id, scheme_id = %scheme.id, "Eligibility check offered");
    }

    /// Whether the session is waiting on an offer reply or an answer.
    pub fn is_active(&self, ctx: &ConversationContext) -> bool {
        ctx.eligibility_check_in_progress
    }

    /// Consume one user message while the interview is active.
    pub fn handle_turn(
        &self,
        ctx: &mut ConversationContext,
        scheme: &Scheme,
        message: &str,
    ) -> InterviewStep {
        if ctx.current_eligibility_question == 0 {
            let lowered = message.to_lowercase();
            if !AFFIRMATIVE_WORDS.iter().any(|w| lowered.contains(w)) {
                ctx.reset_eligibility();
                debug!(session_id = %ctx.session_id, "Eligibility check declined");
                return InterviewStep::Declined;
            }
            ctx.eligibility_check_in_progress = true;
            ctx.eligibility_scheme_id = Some(scheme.id.clone());
            ctx.last_discussed_scheme = Some(scheme.clone());
            ctx.eligibility_answers.clear();
            info!(session_id = %ctx.session_id, scheme_id = %scheme.id, "Eligibility check started");
        } else {
            let number = ctx.current_eligibility_question;
            ctx.eligibility_answers.record(number, message);
        }
        self.next_step(ctx, scheme)
    }

    fn next_step(&self, ctx: &mut ConversationContext, scheme: &Scheme) -> InterviewStep {
        let questions = derive_questions(scheme);
        let total = questions.len();

        if ctx.current_eligibility_question >= total {
            let (verdict, tally) = evaluate(&ctx.eligibility_answers, total);
            ctx.reset_eligibility();
            info!(
                session_id = %ctx.session_id,
                scheme_id = %scheme.id,
                verdict = ?verdict,
                yes = tally.yes,
                no = tally.no,
                "Eligibility check completed"
            );
            return InterviewStep::Completed { verdict, tally };
        }

        let text = questions[ctx.current_eligibility_question];
        ctx.current_eligibility_question += 1;
        InterviewStep::Question {
            number: ctx.current_eligibility_question,
            total,
            text,
        }
    }
}
