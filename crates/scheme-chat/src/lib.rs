//! Dialogue engine for the scheme assistant.
//!
//! Classifies what a user needs, searches the matching category, pages
//! through results, answers follow-ups about individual schemes, and runs
//! the yes/no eligibility interview. All state is per session and held in
//! memory.

pub mod classifier;
pub mod eligibility;
pub mod error;
pub mod orchestrator;
pub mod resolver;
pub mod response;
pub mod session;
pub mod types;

pub use classifier::IntentClassifier;
pub use eligibility::{EligibilityInterview, InterviewStep, Verdict};
pub use error::ChatError;
pub use orchestrator::DialogueOrchestrator;
pub use resolver::{ReferenceKind, ResolvedScheme, SchemeReferenceResolver};
pub use response::ResponseGenerator;
pub use session::SessionStore;
pub use types::{
    Classification, ConversationContext, DetailIntent, DialogueResponse, EligibilityAnswers,
};
