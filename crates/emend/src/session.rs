//! Review sessions: one document under review and the commands that act on it.
//!
//! A session owns the current [`ReviewLayer`] and hands out a [`BatchId`]
//! each time a new analysis is installed. Commands name the batch they
//! expect; a command for a batch that has since been replaced fails with
//! [`EmendError::NotFound`] instead of touching the new one.
//!
//! Ingestion is split in two so analysis can run elsewhere (for example in
//! a blocking task) while the session stays responsive:
//!
//! ```
//! use emend::session::ReviewSession;
//! use emend::Emend;
//!
//! let mut session = ReviewSession::new(Emend::new());
//! let ticket = session.begin_ingestion("The report is ready.");
//! let result = session.emend().analyze(ticket.document().clone()).unwrap();
//! let batch = session.complete_ingestion(ticket, result).unwrap();
//! assert_eq!(session.current_batch(), Some(batch));
//! ```
//!
//! Every ingested document is listed in [`ReviewSession::documents`] with its
//! [`DocumentState`], so a client can show which upload is being reviewed and
//! which were superseded or failed.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::demo::{demo_source, DEMO_TEXT};
use crate::document::{read_document, Document, DocumentId, DocumentSource};
use crate::emend::{AnalysisResult, Emend};
use crate::error::{EmendError, Result};
use crate::render::Segment;
use crate::review::{ReviewLayer, SnapshotStore, SuggestionStatus};
use crate::suggestion::{Category, SuggestionId};

/// Identifier of an installed suggestion batch within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub u64);

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an ingested document is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    /// Ingested, analysis not yet installed.
    Processing,
    /// Its batch is the one under review.
    Analyzed,
    /// Replaced by a later ingestion.
    Superseded,
    /// Analysis returned an error.
    Failed,
}

/// One ingested document as listed by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: DocumentId,
    pub file: String,
    pub state: DocumentState,
    /// The batch installed for this document, once analyzed.
    pub batch: Option<BatchId>,
    pub ingested_at: DateTime<Utc>,
}

/// Claim on the next batch, issued when a document is ingested.
///
/// Only the ticket for the most recent ingestion can install its analysis.
#[derive(Debug, Clone)]
pub struct IngestionTicket {
    document: Document,
}

impl IngestionTicket {
    /// The document to analyze.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_id(&self) -> &DocumentId {
        self.document.id()
    }
}

/// A single-writer review session over one document at a time.
pub struct ReviewSession {
    emend: Emend,
    current: Option<(BatchId, ReviewLayer)>,
    latest: Option<DocumentId>,
    documents: Vec<DocumentEntry>,
    next_document: u64,
    next_batch: u64,
    snapshots: Option<Box<dyn SnapshotStore>>,
    auto_save: bool,
}

impl ReviewSession {
    /// Create an empty session.
    pub fn new(emend: Emend) -> Self {
        let auto_save = emend.config().auto_save;
        Self {
            emend,
            current: None,
            latest: None,
            documents: Vec::new(),
            next_document: 1,
            next_batch: 1,
            snapshots: None,
            auto_save,
        }
    }

    /// Resume a session from a saved review layer.
    pub fn from_layer(emend: Emend, layer: ReviewLayer) -> Self {
        let mut session = Self::new(emend);
        session.next_document = layer.document.id().sequence().map_or(1, |n| n + 1);
        session.latest = Some(layer.document.id().clone());
        session.install(layer);
        session
    }

    /// Attach a store that receives a snapshot after every status change.
    pub fn with_snapshot_store(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.snapshots = Some(Box::new(store));
        self
    }

    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    pub fn emend(&self) -> &Emend {
        &self.emend
    }

    pub fn snapshot_store(&self) -> Option<&dyn SnapshotStore> {
        self.snapshots.as_deref()
    }

    /// Every document ingested in this session, oldest first.
    pub fn documents(&self) -> &[DocumentEntry] {
        &self.documents
    }

    /// The batch currently under review.
    pub fn current_batch(&self) -> Option<BatchId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    /// The current review layer, whatever its batch.
    pub fn current_layer(&self) -> Option<&ReviewLayer> {
        self.current.as_ref().map(|(_, layer)| layer)
    }

    /// Take the current review layer out of the session.
    pub fn into_layer(self) -> Option<ReviewLayer> {
        self.current.map(|(_, layer)| layer)
    }

    /// Start ingesting pasted text. The returned ticket supersedes every
    /// earlier one.
    pub fn begin_ingestion(&mut self, text: impl Into<String>) -> IngestionTicket {
        let id = self.next_document_id();
        self.issue(Document::from_text(id, text))
    }

    /// Start ingesting text with known source metadata.
    pub fn begin_ingestion_with_source(
        &mut self,
        text: impl Into<String>,
        source: DocumentSource,
    ) -> IngestionTicket {
        let id = self.next_document_id();
        self.issue(Document::new(id, text, source))
    }

    /// Install the analysis for `ticket` if it is still the latest ingestion.
    ///
    /// Returns `None` and leaves the session untouched when a newer
    /// ingestion has started since the ticket was issued.
    pub fn complete_ingestion(
        &mut self,
        ticket: IngestionTicket,
        result: AnalysisResult,
    ) -> Option<BatchId> {
        let is_latest = self.latest.as_ref() == Some(ticket.document_id());
        if !is_latest || result.document.id() != ticket.document_id() {
            self.set_state(ticket.document_id(), DocumentState::Superseded);
            warn!(
                document = %ticket.document_id(),
                latest = ?self.latest.as_ref().map(|id| id.as_str()),
                "discarding stale analysis"
            );
            return None;
        }

        Some(self.install(ReviewLayer::from_analysis(result)))
    }

    /// Record that analysis for `ticket` failed.
    pub fn abandon_ingestion(&mut self, ticket: IngestionTicket) {
        warn!(document = %ticket.document_id(), "ingestion abandoned");
        self.set_state(ticket.document_id(), DocumentState::Failed);
    }

    /// Ingest and analyze text, replacing the current batch.
    pub fn analyze(&mut self, text: impl Into<String>) -> Result<BatchId> {
        let ticket = self.begin_ingestion(text);
        self.analyze_ticket(ticket)
    }

    /// Read, ingest and analyze a file, replacing the current batch.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> Result<BatchId> {
        let ingested = read_document(path);
        let ticket = self.begin_ingestion_with_source(ingested.text, ingested.source);
        self.analyze_ticket(ticket)
    }

    /// Ingest and analyze the bundled sample report.
    pub fn load_demo(&mut self) -> Result<BatchId> {
        let ticket = self.begin_ingestion_with_source(DEMO_TEXT, demo_source());
        self.analyze_ticket(ticket)
    }

    /// Set one suggestion's status and return the new rendering.
    pub fn set_status(
        &mut self,
        batch: BatchId,
        id: SuggestionId,
        status: SuggestionStatus,
    ) -> Result<String> {
        let layer = self.layer_mut(batch)?;
        layer.set_status(id, status)?;
        let rendered = layer.rendered()?;
        let document = layer.document.id().clone();

        self.auto_save(&document, &rendered);
        Ok(rendered)
    }

    /// Move every suggestion in `from` to `to` and return the new rendering.
    pub fn bulk_transition(
        &mut self,
        batch: BatchId,
        from: SuggestionStatus,
        to: SuggestionStatus,
    ) -> Result<String> {
        self.bulk_transition_in(batch, from, to, None)
    }

    /// Like [`bulk_transition`](Self::bulk_transition), optionally limited to
    /// one category.
    pub fn bulk_transition_in(
        &mut self,
        batch: BatchId,
        from: SuggestionStatus,
        to: SuggestionStatus,
        category: Option<Category>,
    ) -> Result<String> {
        let layer = self.layer_mut(batch)?;
        layer.bulk_transition(from, to, category);
        let rendered = layer.rendered()?;
        let document = layer.document.id().clone();

        self.auto_save(&document, &rendered);
        Ok(rendered)
    }

    /// The rendered document as UTF-8 bytes.
    pub fn export(&self, batch: BatchId) -> Result<Vec<u8>> {
        Ok(self.rendered(batch)?.into_bytes())
    }

    pub fn rendered(&self, batch: BatchId) -> Result<String> {
        self.layer(batch)?.rendered()
    }

    pub fn segments(&self, batch: BatchId) -> Result<Vec<Segment>> {
        self.layer(batch)?.segments()
    }

    /// The review layer for `batch`, if it is still current.
    pub fn layer(&self, batch: BatchId) -> Result<&ReviewLayer> {
        match &self.current {
            Some((id, layer)) if *id == batch => Ok(layer),
            _ => Err(stale_batch(batch)),
        }
    }

    /// Write a snapshot of the current rendering regardless of `auto_save`.
    pub fn save_snapshot(&mut self, batch: BatchId) -> Result<()> {
        let layer = self.layer(batch)?;
        let rendered = layer.rendered()?;
        let document = layer.document.id().clone();

        match self.snapshots.as_mut() {
            Some(store) => store.save_snapshot(&document, &rendered),
            None => Err(EmendError::Config("no snapshot store attached".to_string())),
        }
    }

    fn layer_mut(&mut self, batch: BatchId) -> Result<&mut ReviewLayer> {
        match &mut self.current {
            Some((id, layer)) if *id == batch => Ok(layer),
            _ => Err(stale_batch(batch)),
        }
    }

    fn analyze_ticket(&mut self, ticket: IngestionTicket) -> Result<BatchId> {
        let result = match self.emend.analyze(ticket.document().clone()) {
            Ok(result) => result,
            Err(e) => {
                self.abandon_ingestion(ticket);
                return Err(e);
            }
        };
        let document = ticket.document_id().clone();

        self.complete_ingestion(ticket, result)
            .ok_or_else(|| EmendError::NotFound(format!("ingestion of {}", document)))
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId::sequential(self.next_document);
        self.next_document += 1;
        id
    }

    fn issue(&mut self, document: Document) -> IngestionTicket {
        info!(document = %document.id(), bytes = document.len(), "ingestion started");
        self.latest = Some(document.id().clone());

        for entry in &mut self.documents {
            if entry.state == DocumentState::Processing {
                entry.state = DocumentState::Superseded;
            }
        }
        self.documents.push(DocumentEntry {
            id: document.id().clone(),
            file: document.source().file.clone(),
            state: DocumentState::Processing,
            batch: None,
            ingested_at: document.source().ingested_at,
        });

        IngestionTicket { document }
    }

    fn install(&mut self, layer: ReviewLayer) -> BatchId {
        let batch = BatchId(self.next_batch);
        self.next_batch += 1;

        for entry in &mut self.documents {
            if entry.state == DocumentState::Analyzed {
                entry.state = DocumentState::Superseded;
            }
        }
        let id = layer.document.id();
        match self.documents.iter_mut().find(|entry| entry.id == *id) {
            Some(entry) => {
                entry.state = DocumentState::Analyzed;
                entry.batch = Some(batch);
            }
            None => self.documents.push(DocumentEntry {
                id: id.clone(),
                file: layer.document.source().file.clone(),
                state: DocumentState::Analyzed,
                batch: Some(batch),
                ingested_at: layer.document.source().ingested_at,
            }),
        }

        info!(
            batch = %batch,
            document = %layer.document.id(),
            suggestions = layer.ledger.len(),
            "installed suggestion batch"
        );
        self.current = Some((batch, layer));
        batch
    }

    fn set_state(&mut self, document: &DocumentId, state: DocumentState) {
        if let Some(entry) = self.documents.iter_mut().find(|entry| entry.id == *document) {
            entry.state = state;
        }
    }

    fn auto_save(&mut self, document: &DocumentId, rendered: &str) {
        if !self.auto_save {
            return;
        }
        if let Some(store) = self.snapshots.as_mut() {
            if let Err(e) = store.save_snapshot(document, rendered) {
                warn!(document = %document, error = %e, "auto-save failed");
            }
        }
    }
}

fn stale_batch(batch: BatchId) -> EmendError {
    EmendError::NotFound(format!("batch {} is not the current batch", batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::MemorySnapshotStore;

    const TEXT: &str = "The report is important at end of Q2.";

    #[test]
    fn test_analyze_assigns_batches() {
        let mut session = ReviewSession::new(Emend::new());
        let first = session.analyze(TEXT).unwrap();
        let second = session.analyze("Hello world").unwrap();

        assert_eq!(first, BatchId(1));
        assert_eq!(second, BatchId(2));
        assert_eq!(
            session.current_layer().unwrap().document.id().as_str(),
            "doc_002"
        );
    }

    #[test]
    fn test_stale_batch_rejected() {
        let mut session = ReviewSession::new(Emend::new());
        let old = session.analyze(TEXT).unwrap();
        let new = session.analyze(TEXT).unwrap();

        let err = session
            .set_status(old, SuggestionId(1), SuggestionStatus::Accepted)
            .unwrap_err();
        assert!(matches!(err, EmendError::NotFound(_)));
        assert_eq!(session.rendered(new).unwrap(), TEXT);
    }

    #[test]
    fn test_set_status_returns_rendering() {
        let mut session = ReviewSession::new(Emend::new());
        let batch = session.analyze(TEXT).unwrap();

        let rendered = session
            .set_status(batch, SuggestionId(3), SuggestionStatus::Accepted)
            .unwrap();
        assert_eq!(rendered, "The report is important at the end of Q2.");
        assert_eq!(session.export(batch).unwrap(), rendered.into_bytes());
    }

    #[test]
    fn test_stale_ticket_discarded() {
        let mut session = ReviewSession::new(Emend::new());
        let first = session.begin_ingestion("First draft report.");
        let second = session.begin_ingestion("Second draft.");

        let late = session.emend().analyze(first.document().clone()).unwrap();
        let fresh = session.emend().analyze(second.document().clone()).unwrap();

        let batch = session.complete_ingestion(second, fresh).unwrap();
        assert_eq!(session.complete_ingestion(first, late), None);
        assert_eq!(session.current_batch(), Some(batch));
        assert_eq!(session.rendered(batch).unwrap(), "Second draft.");
    }

    #[test]
    fn test_auto_save_snapshots() {
        let mut session =
            ReviewSession::new(Emend::new()).with_snapshot_store(MemorySnapshotStore::new());
        let batch = session.analyze(TEXT).unwrap();

        session
            .bulk_transition(batch, SuggestionStatus::Pending, SuggestionStatus::Accepted)
            .unwrap();

        let store = session.snapshot_store().unwrap();
        let saved = store.load_snapshot(&DocumentId::sequential(1)).unwrap();
        assert_eq!(
            saved.as_deref(),
            Some("The detailed report is crucial at the end of Q2.")
        );
    }

    #[test]
    fn test_auto_save_disabled() {
        let mut session = ReviewSession::new(Emend::new())
            .with_snapshot_store(MemorySnapshotStore::new())
            .with_auto_save(false);
        let batch = session.analyze(TEXT).unwrap();
        session
            .set_status(batch, SuggestionId(1), SuggestionStatus::Accepted)
            .unwrap();

        let store = session.snapshot_store().unwrap();
        assert_eq!(store.load_snapshot(&DocumentId::sequential(1)).unwrap(), None);
    }

    fn states(session: &ReviewSession) -> Vec<DocumentState> {
        session.documents().iter().map(|entry| entry.state).collect()
    }

    #[test]
    fn test_documents_track_lifecycle() {
        let mut session = ReviewSession::new(Emend::new());
        let first = session.analyze(TEXT).unwrap();
        assert_eq!(states(&session), vec![DocumentState::Analyzed]);
        assert_eq!(session.documents()[0].batch, Some(first));

        let ticket = session.begin_ingestion("Second draft.");
        assert_eq!(
            states(&session),
            vec![DocumentState::Analyzed, DocumentState::Processing]
        );

        let result = session.emend().analyze(ticket.document().clone()).unwrap();
        let second = session.complete_ingestion(ticket, result).unwrap();
        assert_eq!(
            states(&session),
            vec![DocumentState::Superseded, DocumentState::Analyzed]
        );
        assert_eq!(session.documents()[1].batch, Some(second));
        assert_eq!(session.documents()[1].file, "untitled");
    }

    #[test]
    fn test_stale_ticket_marks_document_superseded() {
        let mut session = ReviewSession::new(Emend::new());
        let first = session.begin_ingestion("First draft report.");
        let second = session.begin_ingestion("Second draft.");

        let late = session.emend().analyze(first.document().clone()).unwrap();
        assert_eq!(session.complete_ingestion(first, late), None);
        assert_eq!(
            states(&session),
            vec![DocumentState::Superseded, DocumentState::Processing]
        );

        session.abandon_ingestion(second);
        assert_eq!(
            states(&session),
            vec![DocumentState::Superseded, DocumentState::Failed]
        );
        assert_eq!(session.current_batch(), None);
    }

    #[test]
    fn test_load_demo() {
        let mut session = ReviewSession::new(Emend::new());
        let batch = session.load_demo().unwrap();
        let layer = session.layer(batch).unwrap();

        assert_eq!(layer.document.source().file, "quarterly-report.txt");
        assert!(layer.ledger.suggestions().iter().any(|s| s.original == "end of Q2"));
        assert!(layer.reference().contains("during the end of Q2 2023"));
        assert_eq!(session.documents()[0].state, DocumentState::Analyzed);
    }

    #[test]
    fn test_from_layer_lists_resumed_document() {
        let mut session = ReviewSession::new(Emend::new());
        session.analyze(TEXT).unwrap();
        let layer = session.into_layer().unwrap();

        let resumed = ReviewSession::from_layer(Emend::new(), layer);
        assert_eq!(resumed.documents().len(), 1);
        assert_eq!(resumed.documents()[0].id.as_str(), "doc_001");
        assert_eq!(resumed.documents()[0].batch, Some(BatchId(1)));
    }

    #[test]
    fn test_from_layer_continues_numbering() {
        let mut session = ReviewSession::new(Emend::new());
        session.analyze(TEXT).unwrap();
        session.analyze(TEXT).unwrap();
        let layer = session.into_layer().unwrap();

        let mut resumed = ReviewSession::from_layer(Emend::new(), layer);
        assert_eq!(resumed.current_batch(), Some(BatchId(1)));

        resumed.analyze("Hello world").unwrap();
        assert_eq!(
            resumed.current_layer().unwrap().document.id().as_str(),
            "doc_003"
        );
    }
}
