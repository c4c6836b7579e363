//! Session state: the single source of truth the UI renders from.
//!
//! One explicit struct with mutators; no ambient context. Model calls are
//! split into issue/apply halves so the session never lives across an
//! `.await` on the UI task:
//!
//! - `submit()` / `assist()` / `request_newsletter()` / `request_analysis()`
//!   validate, move the state machine, and hand back a job with a ticket.
//! - The job runs anywhere (spawned task, inline await).
//! - `apply_*()` writes the result back, dropping stale tickets.
//!
//! ```text
//! Form ──submit──▶ Loading ──ok/err──▶ Result ──regenerate/assist──▶ Loading
//!   ▲                                    │
//!   └────────────── reset (any) ─────────┘      Dashboard ◀── navigate (any)
//! ```

pub mod preview;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::catalog::{self, resolve_language};
use crate::dashboard::DashboardSnapshot;
use crate::generation::{GenerationError, SiteGenerator, WebsiteRequest};
use crate::prompts::is_html_document;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Form,
    Loading,
    Result,
    Dashboard,
}

/// Navigation targets a user can pick directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Form,
    Result,
    Dashboard,
}

/// Editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserName,
    BusinessName,
    UserEmail,
    UserPhone,
    Description,
    Modification,
}

/// The user's in-progress form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub user_name: String,
    pub business_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub description: String,
    pub palette: Option<String>,
}

impl FormFields {
    /// Required for submission: description, name, business name, palette.
    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty()
            && !self.user_name.trim().is_empty()
            && !self.business_name.trim().is_empty()
            && self.palette.is_some()
    }

    /// Contact details block is filled (gates the description step in the UI).
    pub fn details_complete(&self) -> bool {
        [
            &self.user_name,
            &self.business_name,
            &self.user_email,
            &self.user_phone,
        ]
        .iter()
        .all(|f| !f.trim().is_empty())
    }

    fn to_request(&self, modification: Option<String>) -> WebsiteRequest {
        let palette_name = self.palette.clone().unwrap_or_default();
        WebsiteRequest {
            description: self.description.clone(),
            user_name: self.user_name.clone(),
            business_name: self.business_name.clone(),
            user_email: self.user_email.clone(),
            user_phone: self.user_phone.clone(),
            palette_details: catalog::palette_details(&palette_name).to_string(),
            palette_name,
            modification,
        }
    }
}

/// User-visible failures. Validation, transport, invalid output, and speech
/// errors stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please fill out all fields and select a style.")]
    FormIncomplete,

    #[error("Please provide instructions for the assistant.")]
    AssistantEmpty,

    #[error("A website is already being generated.")]
    Busy,

    #[error("The AI returned an invalid response. Your last working version is shown.")]
    InvalidResponse,

    #[error("Failed to generate website: {0}")]
    Generation(GenerationError),

    #[error("Failed to generate newsletter: {0}")]
    Newsletter(GenerationError),

    #[error("Failed to analyze dashboard: {0}")]
    Analysis(GenerationError),

    #[error("{0}")]
    Speech(String),
}

/// Identifies one issued request. Only the latest ticket of each kind is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What `apply_website` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Valid HTML; artifact replaced.
    Accepted,
    /// Model answered with something other than an HTML document.
    Rejected,
    /// Transport or API failure.
    Failed,
    /// Superseded by a newer request or a reset; ignored.
    Stale,
}

/// A website generation to run.
#[derive(Debug, Clone)]
pub struct WebsiteJob {
    pub ticket: Ticket,
    pub request: WebsiteRequest,
    cancel: CancellationToken,
}

impl WebsiteJob {
    pub async fn run(&self, generator: &SiteGenerator) -> Result<String, GenerationError> {
        generator
            .generate_website_cancellable(&self.request, &self.cancel)
            .await
    }
}

/// A marketing-text generation to run.
#[derive(Debug, Clone)]
pub struct NewsletterJob {
    pub ticket: Ticket,
    pub description: String,
    pub business_name: String,
}

impl NewsletterJob {
    pub async fn run(&self, generator: &SiteGenerator) -> Result<String, GenerationError> {
        generator
            .generate_newsletter(&self.description, &self.business_name)
            .await
    }
}

/// A dashboard analysis to run.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub ticket: Ticket,
    pub snapshot: DashboardSnapshot,
    pub language: String,
}

impl AnalysisJob {
    pub async fn run(&self, generator: &SiteGenerator) -> Result<String, GenerationError> {
        generator
            .analyze_dashboard(&self.snapshot.render(), &self.language)
            .await
    }
}

/// In-memory session. Never persisted.
#[derive(Debug, Default)]
pub struct Session {
    mode: PageMode,
    form: FormFields,
    modification: String,
    artifact: String,
    preview_url: String,
    newsletter: String,
    analysis: Option<String>,
    error: Option<SessionError>,
    language: String,

    next_seq: u64,
    website_seq: Option<u64>,
    website_is_modification: bool,
    website_cancel: Option<CancellationToken>,
    newsletter_seq: Option<u64>,
    analysis_seq: Option<u64>,
}

impl Session {
    pub fn new(language: &str) -> Self {
        Self {
            language: resolve_language(language).code.to_string(),
            ..Self::default()
        }
    }

    // ── Read access ──

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::UserName => &self.form.user_name,
            Field::BusinessName => &self.form.business_name,
            Field::UserEmail => &self.form.user_email,
            Field::UserPhone => &self.form.user_phone,
            Field::Description => &self.form.description,
            Field::Modification => &self.modification,
        }
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    pub fn newsletter(&self) -> &str {
        &self.newsletter
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn language(&self) -> &str {
        if self.language.is_empty() {
            catalog::LANGUAGES[0].code
        } else {
            &self.language
        }
    }

    pub fn is_generating_newsletter(&self) -> bool {
        self.newsletter_seq.is_some()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis_seq.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.mode != PageMode::Loading && self.form.is_complete()
    }

    // ── Form mutators ──

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::UserName => self.form.user_name = value,
            Field::BusinessName => self.form.business_name = value,
            Field::UserEmail => self.form.user_email = value,
            Field::UserPhone => self.form.user_phone = value,
            Field::Description => self.form.description = value,
            Field::Modification => self.modification = value,
        }
    }

    /// Select a palette by name. Unknown names are refused.
    pub fn select_palette(&mut self, name: &str) -> bool {
        match catalog::find_palette(name) {
            Some(p) => {
                self.form.palette = Some(p.name.to_string());
                true
            }
            None => false,
        }
    }

    /// Switch UI language. Unknown codes resolve to the first supported one.
    pub fn set_language(&mut self, code: &str) {
        self.language = resolve_language(code).code.to_string();
    }

    /// Fill the description from the examples menu and go back to the form.
    pub fn select_example(&mut self, prompt: &str) {
        if self.mode == PageMode::Loading {
            return;
        }
        self.form.description = prompt.to_string();
        self.mode = PageMode::Form;
    }

    /// Speech-to-text result for a field. Replaces the field's content.
    pub fn apply_transcript(&mut self, field: Field, transcript: &str) {
        self.set_field(field, transcript);
    }

    /// Inline, non-fatal speech failure.
    pub fn set_speech_error(&mut self, message: impl Into<String>) {
        self.error = Some(SessionError::Speech(message.into()));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ── Navigation ──

    /// Move between screens. Dashboard is reachable from anywhere; leaving
    /// Loading any other way is refused, as is showing an empty Result.
    pub fn navigate(&mut self, page: Page) -> bool {
        let allowed = match page {
            Page::Dashboard => true,
            Page::Form => self.mode != PageMode::Loading,
            Page::Result => {
                self.mode != PageMode::Loading
                    && (!self.artifact.is_empty() || self.error.is_some())
            }
        };
        if allowed {
            self.mode = match page {
                Page::Form => PageMode::Form,
                Page::Result => PageMode::Result,
                Page::Dashboard => PageMode::Dashboard,
            };
        }
        allowed
    }

    /// Clear everything back to an empty form. Language is kept.
    pub fn reset(&mut self) {
        if let Some(token) = self.website_cancel.take() {
            token.cancel();
        }
        let language = std::mem::take(&mut self.language);
        let next_seq = self.next_seq;
        *self = Self {
            language,
            next_seq,
            ..Self::default()
        };
        debug!("session reset");
    }

    // ── Website generation ──

    /// Generate a fresh site from the form.
    pub fn submit(&mut self) -> Result<WebsiteJob, SessionError> {
        self.issue_website(None)
    }

    /// Regenerate with the assistant's modification instruction.
    pub fn assist(&mut self) -> Result<WebsiteJob, SessionError> {
        let instruction = self.modification.trim().to_string();
        if instruction.is_empty() {
            self.error = Some(SessionError::AssistantEmpty);
            return Err(SessionError::AssistantEmpty);
        }
        self.issue_website(Some(instruction))
    }

    fn issue_website(&mut self, modification: Option<String>) -> Result<WebsiteJob, SessionError> {
        if self.mode == PageMode::Loading {
            return Err(SessionError::Busy);
        }
        if !self.form.is_complete() {
            self.error = Some(SessionError::FormIncomplete);
            return Err(SessionError::FormIncomplete);
        }

        if let Some(token) = self.website_cancel.take() {
            token.cancel();
        }
        let cancel = CancellationToken::new();
        let ticket = self.next_ticket();

        self.website_seq = Some(ticket.seq);
        self.website_is_modification = modification.is_some();
        self.website_cancel = Some(cancel.clone());
        self.mode = PageMode::Loading;
        self.error = None;
        self.preview_url.clear();
        self.newsletter.clear();

        info!(seq = ticket.seq, modification = modification.is_some(), "website requested");

        Ok(WebsiteJob {
            ticket,
            request: self.form.to_request(modification),
            cancel,
        })
    }

    /// Write a website response back. Always lands in Result unless stale.
    pub fn apply_website(
        &mut self,
        ticket: Ticket,
        result: Result<String, GenerationError>,
    ) -> Applied {
        if self.website_seq != Some(ticket.seq) {
            debug!(seq = ticket.seq, "dropping stale website response");
            return Applied::Stale;
        }
        self.website_seq = None;
        self.website_cancel = None;
        if std::mem::take(&mut self.website_is_modification) {
            self.modification.clear();
        }
        self.mode = PageMode::Result;

        match result {
            Ok(html) if is_html_document(&html) => {
                self.preview_url = preview::data_uri(&html);
                self.artifact = html;
                self.error = None;
                info!(seq = ticket.seq, bytes = self.artifact.len(), "website accepted");
                Applied::Accepted
            }
            Ok(other) => {
                let head: String = other.chars().take(80).collect();
                warn!(seq = ticket.seq, "received non-HTML response: {head:?}");
                self.error = Some(SessionError::InvalidResponse);
                Applied::Rejected
            }
            Err(e) => {
                warn!(seq = ticket.seq, "website generation failed: {e}");
                self.error = Some(SessionError::Generation(e));
                Applied::Failed
            }
        }
    }

    /// Abandon the in-flight website request.
    pub fn cancel_generation(&mut self) -> bool {
        if self.mode != PageMode::Loading {
            return false;
        }
        if let Some(token) = self.website_cancel.take() {
            token.cancel();
        }
        self.website_seq = None;
        self.website_is_modification = false;
        self.mode = if self.artifact.is_empty() {
            PageMode::Form
        } else {
            // The prior site is still the accepted one.
            self.preview_url = preview::data_uri(&self.artifact);
            PageMode::Result
        };
        true
    }

    // ── Marketing text ──

    /// Needs a description, business name, and an accepted site.
    pub fn request_newsletter(&mut self) -> Option<NewsletterJob> {
        if self.form.description.is_empty()
            || self.form.business_name.is_empty()
            || self.preview_url.is_empty()
            || self.newsletter_seq.is_some()
        {
            return None;
        }
        let ticket = self.next_ticket();
        self.newsletter_seq = Some(ticket.seq);
        self.error = None;
        Some(NewsletterJob {
            ticket,
            description: self.form.description.clone(),
            business_name: self.form.business_name.clone(),
        })
    }

    pub fn apply_newsletter(
        &mut self,
        ticket: Ticket,
        result: Result<String, GenerationError>,
    ) -> bool {
        if self.newsletter_seq != Some(ticket.seq) {
            return false;
        }
        self.newsletter_seq = None;
        match result {
            Ok(text) => {
                self.newsletter = text;
                true
            }
            Err(e) => {
                warn!("newsletter generation failed: {e}");
                self.error = Some(SessionError::Newsletter(e));
                false
            }
        }
    }

    // ── Dashboard analysis ──

    pub fn dashboard_snapshot(&self) -> Option<DashboardSnapshot> {
        if self.form.business_name.trim().is_empty() {
            None
        } else {
            Some(DashboardSnapshot::for_business(&self.form.business_name))
        }
    }

    /// Needs a business name; one analysis at a time.
    pub fn request_analysis(&mut self) -> Option<AnalysisJob> {
        if self.analysis_seq.is_some() {
            return None;
        }
        let snapshot = self.dashboard_snapshot()?;
        let ticket = self.next_ticket();
        self.analysis_seq = Some(ticket.seq);
        self.analysis = None;
        self.error = None;
        Some(AnalysisJob {
            ticket,
            snapshot,
            language: self.language().to_string(),
        })
    }

    /// Store the summary. Returns it when accepted so the caller can speak it.
    pub fn apply_analysis(
        &mut self,
        ticket: Ticket,
        result: Result<String, GenerationError>,
    ) -> Option<&str> {
        if self.analysis_seq != Some(ticket.seq) {
            return None;
        }
        self.analysis_seq = None;
        match result {
            Ok(text) => {
                self.analysis = Some(text);
                self.analysis.as_deref()
            }
            Err(e) => {
                warn!("dashboard analysis failed: {e}");
                self.error = Some(SessionError::Analysis(e));
                None
            }
        }
    }

    // ── Inline drivers (CLI, tests) ──

    pub async fn run_website(&mut self, generator: &SiteGenerator) -> Result<Applied, SessionError> {
        let job = self.submit()?;
        let result = job.run(generator).await;
        Ok(self.apply_website(job.ticket, result))
    }

    pub async fn run_assist(&mut self, generator: &SiteGenerator) -> Result<Applied, SessionError> {
        let job = self.assist()?;
        let result = job.run(generator).await;
        Ok(self.apply_website(job.ticket, result))
    }

    pub async fn run_newsletter(&mut self, generator: &SiteGenerator) -> bool {
        let Some(job) = self.request_newsletter() else {
            return false;
        };
        let result = job.run(generator).await;
        self.apply_newsletter(job.ticket, result)
    }

    pub async fn run_analysis(&mut self, generator: &SiteGenerator) -> Option<String> {
        let job = self.request_analysis()?;
        let result = job.run(generator).await;
        self.apply_analysis(job.ticket, result).map(str::to_string)
    }

    fn next_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        Ticket { seq: self.next_seq }
    }
}
