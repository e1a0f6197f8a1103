use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::contact::{ContactMessageDoc, PersistedDocument},
    errors::AppError,
};

/// Create operation against the external content repository.
///
/// Callers treat any error as failure and never retry; resubmission is the
/// client's responsibility.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create_contact_message(
        &self,
        doc: &ContactMessageDoc,
    ) -> Result<PersistedDocument, AppError>;
}

#[async_trait]
impl<S> ContentStore for Arc<S>
where
    S: ContentStore + ?Sized,
{
    async fn create_contact_message(
        &self,
        doc: &ContactMessageDoc,
    ) -> Result<PersistedDocument, AppError> {
        (**self).create_contact_message(doc).await
    }
}
