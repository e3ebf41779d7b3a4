//! Dialogue orchestrator: the per-turn state machine.
//!
//! Each turn is handled start-to-finish in this order:
//! 1. an active eligibility interview consumes the message;
//! 2. a scheme inquiry resolves a scheme and answers about it;
//! 3. a show-more request pages through the stored results;
//! 4. an unpinned session is classified (UNCLEAR asks for clarification);
//! 5. the pinned category is searched and the first page rendered.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use scheme_catalog::SchemeSearch;
use scheme_core::{AppConfig, CategoryConfig, Role, Scheme};

use crate::classifier::IntentClassifier;
use crate::eligibility::{EligibilityInterview, InterviewStep};
use crate::error::ChatError;
use crate::resolver::SchemeReferenceResolver;
use crate::response::ResponseGenerator;
use crate::session::SessionStore;
use crate::types::{Classification, ConversationContext, DetailIntent, DialogueResponse};

/// Central coordinator wiring classifier, resolver, interview, session
/// store, and search backend.
pub struct DialogueOrchestrator {
    classifier: IntentClassifier,
    resolver: SchemeReferenceResolver,
    interview: EligibilityInterview,
    responses: ResponseGenerator,
    store: SessionStore,
    search: Arc<dyn SchemeSearch>,
    categories: Vec<CategoryConfig>,
    page_size: usize,
    search_top_k: usize,
    max_query_length: usize,
}

impl DialogueOrchestrator {
    pub fn new(config: &AppConfig, search: Arc<dyn SchemeSearch>) -> Self {
        info!(
            categories = ?config.category_ids(),
            page_size = config.dialogue.schemes_per_page,
            "Dialogue orchestrator initialised"
        );
        Self {
            classifier: IntentClassifier::new(&config.categories),
            resolver: SchemeReferenceResolver::new(),
            interview: EligibilityInterview::new(),
            responses: ResponseGenerator::new(&config.categories),
            store: SessionStore::new(),
            search,
            categories: config.categories.clone(),
            page_size: config.dialogue.schemes_per_page.max(1),
            search_top_k: config.dialogue.search_top_k,
            max_query_length: config.dialogue.max_query_length,
        }
    }

    /// Handle one user message.
    ///
    /// A missing or empty `session_id` starts a new session. Only input
    /// validation and a poisoned session lock produce errors; backend
    /// failures come back as a normal response with no schemes.
    pub fn handle_query(
        &self,
        query: &str,
        session_id: Option<&str>,
        show_more: bool,
    ) -> Result<DialogueResponse, ChatError> {
        if query.trim().is_empty() {
            return Err(ChatError::EmptyQuery);
        }
        if query.chars().count() > self.max_query_length {
            return Err(ChatError::QueryTooLong(self.max_query_length));
        }

        let sid = match session_id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        let mut ctx = self.store.get_or_create(&sid)?;
        ctx.add_message(Role::User, query);

        let response = self.dispatch(&mut ctx, query, show_more);

        ctx.add_message(Role::Assistant, &response.response);
        self.store.save(ctx)?;
        Ok(response)
    }

    /// Snapshot of an existing session.
    pub fn session(&self, session_id: &str) -> Result<ConversationContext, ChatError> {
        self.store
            .get(session_id)?
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete_session(&self, session_id: &str) -> Result<bool, ChatError> {
        self.store.delete(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    // -- Turn routing --

    fn dispatch(&self, ctx: &mut ConversationContext, query: &str, show_more: bool) -> DialogueResponse {
        if self.interview.is_active(ctx) {
            match ctx.eligibility_scheme() {
                Some(scheme) => return self.interview_turn(ctx, &scheme, query),
                None => {
                    warn!(session_id = %ctx.session_id, "Interview scheme no longer available, resetting");
                    ctx.reset_eligibility();
                }
            }
        }

        if self.resolver.is_scheme_inquiry(query, &ctx.schemes) {
            return self.scheme_inquiry(ctx, query);
        }

        if (show_more || self.resolver.is_show_more(query))
            && ctx.category.is_some()
            && !ctx.schemes.is_empty()
        {
            return self.show_more(ctx);
        }

        let category_id = match ctx.category.clone() {
            Some(id) => id,
            None => match self.classifier.classify(query, &ctx.history_text()) {
                Classification::Unclear => {
                    debug!(session_id = %ctx.session_id, "Intent unclear, asking for clarification");
                    return self.bare_response(
                        ctx,
                        self.responses.clarification().to_string(),
                        Some(Classification::UNCLEAR.to_string()),
                    );
                }
                Classification::Category(id) => {
                    info!(session_id = %ctx.session_id, category = %id, "Session category pinned");
                    ctx.category = Some(id.clone());
                    id
                }
            },
        };

        self.search_category(ctx, &category_id, query)
    }

    fn interview_turn(
        &self,
        ctx: &mut ConversationContext,
        scheme: &Scheme,
        query: &str,
    ) -> DialogueResponse {
        let text = match self.interview.handle_turn(ctx, scheme, query) {
            InterviewStep::Declined => self.responses.interview_declined().to_string(),
            InterviewStep::Question { number, total, text } => {
                self.responses.question(number, total, text)
            }
            InterviewStep::Completed { verdict, .. } => self.responses.verdict(scheme, verdict),
        };
        self.single_scheme_response(ctx, text, scheme)
    }

    fn scheme_inquiry(&self, ctx: &mut ConversationContext, query: &str) -> DialogueResponse {
        if ctx.schemes.is_empty() {
            let category = ctx.category.clone();
            return self.bare_response(ctx, self.responses.no_schemes_yet().to_string(), category);
        }

        let last = ctx.last_discussed_scheme.as_ref();
        let Some(resolved) = self.resolver.resolve(query, &ctx.schemes, last) else {
            let category = ctx.category.clone();
            let text = self.responses.unresolved_reference().to_string();
            return self.bare_response(ctx, text, category);
        };

        let scheme = resolved.scheme;
        ctx.last_discussed_scheme = Some(scheme.clone());

        let text = match self.resolver.detect_detail_intent(query) {
            DetailIntent::Eligibility => {
                self.interview.offer(ctx, &scheme);
                self.responses.eligibility_offer(&scheme)
            }
            DetailIntent::Benefits => self.responses.benefits(&scheme),
            DetailIntent::Application => self.responses.application(&scheme),
            DetailIntent::Description => self.responses.description(&scheme),
        };
        self.single_scheme_response(ctx, text, &scheme)
    }

    fn show_more(&self, ctx: &mut ConversationContext) -> DialogueResponse {
        let intro = if ctx.advance_page(self.page_size) {
            debug!(session_id = %ctx.session_id, page = ctx.current_page, "Advanced page");
            self.responses.more_schemes_intro()
        } else {
            self.responses.all_schemes_seen()
        };
        self.page_response(ctx, intro)
    }

    fn search_category(
        &self,
        ctx: &mut ConversationContext,
        category_id: &str,
        query: &str,
    ) -> DialogueResponse {
        let Some(category) = self.categories.iter().find(|c| c.id == category_id) else {
            warn!(session_id = %ctx.session_id, category = %category_id, "No configuration for category");
            let category = ctx.category.clone();
            return self.bare_response(ctx, self.responses.unknown_category(category_id), category);
        };

        match self.search.search(category_id, query, self.search_top_k) {
            Ok(schemes) => {
                info!(
                    session_id = %ctx.session_id,
                    category = %category_id,
                    count = schemes.len(),
                    "Search completed"
                );
                let intro = self.responses.search_intro(schemes.len(), &category.result_noun);
                ctx.set_schemes(schemes);
                self.page_response(ctx, &intro)
            }
            Err(e) => {
                error!(session_id = %ctx.session_id, category = %category_id, error = %e, "Scheme search failed");
                let category = ctx.category.clone();
                self.bare_response(ctx, self.responses.search_failed(&e.to_string()), category)
            }
        }
    }

    // -- Response builders --

    fn page_response(&self, ctx: &ConversationContext, intro: &str) -> DialogueResponse {
        let size = self.page_size;
        let page = ctx.current_page_schemes(size).to_vec();
        let has_more = ctx.has_more(size);
        let text = self
            .responses
            .render_page(intro, &page, ctx.page_offset(size), has_more);
        DialogueResponse {
            session_id: ctx.session_id.clone(),
            response: text,
            schemes: page,
            has_more,
            category: ctx.category.clone(),
            total_schemes: ctx.schemes.len(),
            shown_schemes: (ctx.current_page + 1) * size,
        }
    }

    fn single_scheme_response(
        &self,
        ctx: &ConversationContext,
        text: String,
        scheme: &Scheme,
    ) -> DialogueResponse {
        DialogueResponse {
            session_id: ctx.session_id.clone(),
            response: text,
            schemes: vec![scheme.clone()],
            has_more: false,
            category: ctx.category.clone(),
            total_schemes: ctx.schemes.len(),
            shown_schemes: 0,
        }
    }

    fn bare_response(
        &self,
        ctx: &ConversationContext,
        text: String,
        category: Option<String>,
    ) -> DialogueResponse {
        DialogueResponse {
            session_id: ctx.session_id.clone(),
            response: text,
            schemes: Vec::new(),
            has_more: false,
            category,
            total_schemes: 0,
            shown_schemes: 0,
        }
    }
}
