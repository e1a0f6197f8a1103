use validator::Validate;

use crate::{
    entities::contact::{ContactForm, ContactMessageDoc, PersistedDocument},
    errors::AppError,
    repositories::content_store::ContentStore,
};

/// What became of an accepted submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Persisted(PersistedDocument),
    /// No store credentials are configured; the message was accepted but
    /// not persisted. Never reachable in production (config validation
    /// refuses to start without credentials there).
    DevMode,
}

pub struct ContactHandler<S>
where
    S: ContentStore,
{
    store: Option<S>,
}

impl<S> ContactHandler<S>
where
    S: ContentStore,
{
    pub fn new(store: Option<S>) -> Self {
        ContactHandler { store }
    }

    pub fn is_persisting(&self) -> bool {
        self.store.is_some()
    }

    /// Validates the form and forwards it to the content store. There are
    /// no retries; a failed create surfaces to the caller, who resubmits.
    pub async fn submit(&self, form: ContactForm) -> Result<SubmissionOutcome, AppError> {
        form.validate()?;

        let Some(store) = &self.store else {
            tracing::warn!("content store not configured, accepting submission without persisting");
            return Ok(SubmissionOutcome::DevMode);
        };

        let doc = ContactMessageDoc::from_form(form);
        let persisted = store.create_contact_message(&doc).await?;

        tracing::info!(id = %persisted.id, "contact message persisted");

        Ok(SubmissionOutcome::Persisted(persisted))
    }
}
