use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// Vendor-side handles for one book's knowledge base.
///
/// The IDs are opaque strings issued by whichever assistant/file-search
/// vendor is configured; this store only tracks their lifecycle.
#[derive(Debug, Clone)]
pub struct RagSession {
    pub book_id: Uuid,
    pub assistant_id: String,
    pub thread_id: String,
    pub vector_store_id: String,
    pub file_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a session already exists for book {0}")]
    AlreadyExists(Uuid),
    #[error("no session found for book {0}")]
    NotFound(Uuid),
}

/// Keyed store of RAG sessions with an explicit create/get/delete lifecycle.
///
/// One session per book. Keeping the map behind this type (rather than as
/// module-level state) means a multi-tenant process can hold one store per
/// tenant and drop it wholesale.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, RagSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session. Errors if the book already has one; callers
    /// must delete the old session first so vendor-side resources are not
    /// silently orphaned.
    pub fn create(
        &self,
        book_id: Uuid,
        assistant_id: String,
        thread_id: String,
        vector_store_id: String,
    ) -> Result<RagSession, SessionError> {
        // The duplicate check and insert must be one atomic operation, or
        // two concurrent creates for the same book could both pass the check
        // and one would silently overwrite the other.
        match self.sessions.entry(book_id) {
            Entry::Occupied(_) => Err(SessionError::AlreadyExists(book_id)),
            Entry::Vacant(vacant) => {
                let session = RagSession {
                    book_id,
                    assistant_id,
                    thread_id,
                    vector_store_id,
                    file_ids: Vec::new(),
                    created_at: Utc::now(),
                };
                vacant.insert(session.clone());
                tracing::info!(book_id = %book_id, "rag session created");
                Ok(session)
            }
        }
    }

    pub fn get(&self, book_id: Uuid) -> Option<RagSession> {
        self.sessions.get(&book_id).map(|s| s.clone())
    }

    /// Record an uploaded research file against the book's session.
    pub fn attach_file(&self, book_id: Uuid, file_id: String) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(&book_id)
            .ok_or(SessionError::NotFound(book_id))?;
        session.file_ids.push(file_id);
        Ok(())
    }

    /// Remove a session, returning it so the caller can release the
    /// vendor-side resources it references.
    pub fn delete(&self, book_id: Uuid) -> Result<RagSession, SessionError> {
        let (_, session) = self
            .sessions
            .remove(&book_id)
            .ok_or(SessionError::NotFound(book_id))?;
        tracing::info!(book_id = %book_id, files = session.file_ids.len(), "rag session deleted");
        Ok(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
