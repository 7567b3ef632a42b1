// src/services/controller.rs

use std::{fmt, sync::Arc};

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    models::{
        EditError, GenerationParams, PaperEdits, PaperSnapshot, ParamsUpdate, QuestionPaper,
    },
    services::generator::PaperGenerator,
};

/// The only message a user ever sees for a failed generation.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate the paper. Please try again with more specific details.";

/// Rejected controller transitions.
#[derive(Debug)]
pub enum ControllerError {
    MissingSubject,
    AlreadyGenerating,
    NoPaper,
    InvalidEdit(EditError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::MissingSubject => write!(f, "a subject is required to generate a paper"),
            ControllerError::AlreadyGenerating => write!(f, "a paper is already being generated"),
            ControllerError::NoPaper => write!(f, "no paper has been generated yet"),
            ControllerError::InvalidEdit(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ControllerError {}

/// Handed out by [`PaperController::start_generate`]; identifies the
/// pending generation and carries the parameters it was started with.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub id: Uuid,
    pub params: GenerationParams,
}

/// State container behind the workspace page.
///
/// Every change goes through one of the transition methods; views only
/// read it.
#[derive(Debug, Default)]
pub struct PaperController {
    params: GenerationParams,
    paper: Option<PaperSnapshot>,
    pending: Option<Uuid>,
    error: Option<String>,
}

/// Serializable read-only view of the controller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerState {
    pub params: GenerationParams,
    pub paper: Option<PaperSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
    pub can_generate: bool,
}

impl PaperController {
    pub fn new(params: GenerationParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn paper(&self) -> Option<&PaperSnapshot> {
        self.paper.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mirrors the state of the generate button.
    pub fn can_generate(&self) -> bool {
        !self.is_loading() && self.params.has_subject()
    }

    pub fn state(&self) -> ControllerState {
        ControllerState {
            params: self.params.clone(),
            paper: self.paper.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
            can_generate: self.can_generate(),
        }
    }

    /// Merges a partial parameter update. No validation.
    pub fn update_params(&mut self, update: ParamsUpdate) -> &GenerationParams {
        self.params.merge(update);
        &self.params
    }

    pub fn start_generate(&mut self) -> Result<GenerationTicket, ControllerError> {
        if self.is_loading() {
            return Err(ControllerError::AlreadyGenerating);
        }
        if !self.params.has_subject() {
            return Err(ControllerError::MissingSubject);
        }

        let id = Uuid::new_v4();
        self.pending = Some(id);
        self.error = None;

        Ok(GenerationTicket {
            id,
            params: self.params.clone(),
        })
    }

    pub fn generate_succeeded(&mut self, ticket: &GenerationTicket, paper: QuestionPaper) {
        if !self.finish(ticket) {
            return;
        }
        self.paper = Some(PaperSnapshot::new(paper));
    }

    /// Records a failure. The previous paper, if any, stays on display.
    pub fn generate_failed(&mut self, ticket: &GenerationTicket) {
        if !self.finish(ticket) {
            return;
        }
        self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
    }

    /// Replaces the current snapshot with an edited copy.
    pub fn commit_edits(&mut self, edits: &PaperEdits) -> Result<&PaperSnapshot, ControllerError> {
        let current = self.paper.as_ref().ok_or(ControllerError::NoPaper)?;
        let edited = current
            .paper
            .with_edits(edits)
            .map_err(ControllerError::InvalidEdit)?;
        let next = current.next_revision(edited);
        Ok(self.paper.insert(next))
    }

    fn finish(&mut self, ticket: &GenerationTicket) -> bool {
        if self.pending != Some(ticket.id) {
            tracing::warn!(ticket = %ticket.id, "ignoring outcome of a generation that is not pending");
            return false;
        }
        self.pending = None;
        true
    }
}

/// Result of an attempt that was allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Succeeded,
    Failed,
}

/// Runs one generation attempt against `controller`.
///
/// The attempt runs on its own task, so it still settles the controller
/// when the caller is dropped mid-request. The lock is released while the
/// generator runs. Errors from the generator are logged and collapsed into
/// [`GENERATION_FAILED_MESSAGE`]; only rejected starts are returned.
pub async fn generate(
    controller: Arc<Mutex<PaperController>>,
    generator: Arc<dyn PaperGenerator>,
) -> Result<GenerationOutcome, ControllerError> {
    let ticket = controller.lock().await.start_generate()?;

    tracing::info!(
        ticket = %ticket.id,
        subject = %ticket.params.subject,
        count = ticket.params.question_count,
        "generating paper"
    );

    let attempt = tokio::spawn(run_attempt(controller.clone(), generator, ticket.clone()));

    match attempt.await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::error!(ticket = %ticket.id, "generation task aborted: {}", e);
            controller.lock().await.generate_failed(&ticket);
            Ok(GenerationOutcome::Failed)
        }
    }
}

async fn run_attempt(
    controller: Arc<Mutex<PaperController>>,
    generator: Arc<dyn PaperGenerator>,
    ticket: GenerationTicket,
) -> GenerationOutcome {
    let outcome = generator.generate(&ticket.params).await;

    let mut controller = controller.lock().await;
    match outcome {
        Ok(paper) => {
            tracing::info!(ticket = %ticket.id, questions = paper.questions.len(), "paper generated");
            controller.generate_succeeded(&ticket, paper);
            GenerationOutcome::Succeeded
        }
        Err(e) => {
            tracing::error!(ticket = %ticket.id, "paper generation failed: {}", e);
            controller.generate_failed(&ticket);
            GenerationOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        models::{QuestionEdit, paper::fixtures::sample_paper},
        services::generator::GenerationError,
    };

    struct StubGenerator {
        succeed: bool,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn new(succeed: bool) -> Self {
            Self {
                succeed,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PaperGenerator for StubGenerator {
        async fn generate(&self, _: &GenerationParams) -> Result<QuestionPaper, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(sample_paper())
            } else {
                Err(GenerationError::EmptyResponse)
            }
        }
    }

    /// Blocks until released, so a generation can be observed in flight.
    struct GatedGenerator {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl PaperGenerator for GatedGenerator {
        async fn generate(&self, _: &GenerationParams) -> Result<QuestionPaper, GenerationError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(sample_paper())
        }
    }

    fn with_subject() -> PaperController {
        let mut controller = PaperController::default();
        controller.update_params(ParamsUpdate {
            subject: Some("Physics".into()),
            ..Default::default()
        });
        controller
    }

    #[test]
    fn start_requires_subject() {
        let mut controller = PaperController::default();
        assert!(!controller.can_generate());
        assert!(matches!(
            controller.start_generate(),
            Err(ControllerError::MissingSubject)
        ));
        assert!(!controller.is_loading());
    }

    #[test]
    fn second_start_is_rejected_while_pending() {
        let mut controller = with_subject();
        let ticket = controller.start_generate().unwrap();
        assert!(controller.is_loading());
        assert!(!controller.can_generate());
        assert!(matches!(
            controller.start_generate(),
            Err(ControllerError::AlreadyGenerating)
        ));

        controller.generate_succeeded(&ticket, sample_paper());
        assert!(!controller.is_loading());
        assert!(controller.can_generate());
    }

    #[test]
    fn failure_keeps_previous_paper() {
        let mut controller = with_subject();
        let first = controller.start_generate().unwrap();
        controller.generate_succeeded(&first, sample_paper());

        let second = controller.start_generate().unwrap();
        assert_eq!(controller.error(), None);
        controller.generate_failed(&second);

        assert!(!controller.is_loading());
        assert_eq!(controller.error(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(controller.paper().unwrap().paper, sample_paper());
    }

    #[test]
    fn start_clears_previous_error() {
        let mut controller = with_subject();
        let ticket = controller.start_generate().unwrap();
        controller.generate_failed(&ticket);
        assert!(controller.error().is_some());

        controller.start_generate().unwrap();
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut controller = with_subject();
        let ticket = controller.start_generate().unwrap();
        let stale = GenerationTicket {
            id: Uuid::new_v4(),
            params: ticket.params.clone(),
        };

        controller.generate_failed(&stale);
        assert!(controller.is_loading());
        assert_eq!(controller.error(), None);
    }

    #[test]
    fn commit_edits_creates_new_revision() {
        let mut controller = with_subject();
        assert!(matches!(
            controller.commit_edits(&PaperEdits::default()),
            Err(ControllerError::NoPaper)
        ));

        let ticket = controller.start_generate().unwrap();
        controller.generate_succeeded(&ticket, sample_paper());
        let before = controller.paper().unwrap().clone();

        let edits = PaperEdits {
            questions: vec![QuestionEdit {
                id: "q1".into(),
                answer: Some("Joule".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let after = controller.commit_edits(&edits).unwrap();

        assert_eq!(after.revision, before.revision + 1);
        assert_eq!(after.paper.questions[0].answer, "Joule");
        assert_eq!(before.paper.questions[0].answer, "Newton");
    }

    #[test]
    fn state_reflects_controller() {
        let mut controller = with_subject();
        controller.start_generate().unwrap();
        let state = controller.state();
        assert!(state.loading);
        assert!(!state.can_generate);
        assert_eq!(state.params.subject, "Physics");
    }

    #[tokio::test]
    async fn generate_stores_paper_on_success() {
        let controller = Arc::new(Mutex::new(with_subject()));
        let generator = Arc::new(StubGenerator::new(true));

        let outcome = generate(controller.clone(), generator.clone()).await.unwrap();

        let controller = controller.lock().await;
        assert_eq!(outcome, GenerationOutcome::Succeeded);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
        assert_eq!(controller.error(), None);
        assert_eq!(controller.paper().unwrap().revision, 1);
    }

    #[tokio::test]
    async fn generate_reports_fixed_message_on_failure() {
        let controller = Arc::new(Mutex::new(with_subject()));
        let generator = Arc::new(StubGenerator::new(false));

        let outcome = generate(controller.clone(), generator.clone()).await.unwrap();

        let controller = controller.lock().await;
        assert_eq!(outcome, GenerationOutcome::Failed);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
        assert!(controller.paper().is_none());
        assert_eq!(controller.error(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn generate_without_subject_never_calls_generator() {
        let controller = Arc::new(Mutex::new(PaperController::default()));
        let generator = Arc::new(StubGenerator::new(true));

        let result = generate(controller, generator.clone()).await;

        assert!(matches!(result, Err(ControllerError::MissingSubject)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    fn gated() -> Arc<GatedGenerator> {
        Arc::new(GatedGenerator {
            started: Notify::new(),
            release: Notify::new(),
        })
    }

    #[tokio::test]
    async fn overlapping_generate_is_rejected() {
        let controller = Arc::new(Mutex::new(with_subject()));
        let generator = gated();

        let first = tokio::spawn(generate(controller.clone(), generator.clone()));

        generator.started.notified().await;
        assert!(controller.lock().await.is_loading());

        let second = generate(controller.clone(), generator.clone()).await;
        assert!(matches!(second, Err(ControllerError::AlreadyGenerating)));

        generator.release.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), GenerationOutcome::Succeeded);

        let controller = controller.lock().await;
        assert!(!controller.is_loading());
        assert!(controller.paper().is_some());
    }

    #[tokio::test]
    async fn dropped_caller_still_settles_the_attempt() {
        let controller = Arc::new(Mutex::new(with_subject()));
        let generator = gated();

        let caller = tokio::spawn(generate(controller.clone(), generator.clone()));
        generator.started.notified().await;

        // the request goes away while the generator is still running
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());
        assert!(controller.lock().await.is_loading());

        generator.release.notify_one();
        tokio::time::timeout(Duration::from_secs(2), async {
            while controller.lock().await.is_loading() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("generation never settled");

        let mut controller = controller.lock().await;
        assert!(controller.paper().is_some());
        assert!(controller.start_generate().is_ok());
    }
}
