use async_trait::async_trait;
use mockall::mock;
use portfolio_contact::{
    entities::contact::{ContactForm, ContactMessageDoc, PersistedDocument},
    errors::AppError,
    repositories::content_store::ContentStore,
    use_cases::contact::{ContactHandler, SubmissionOutcome},
};

mock! {
    pub Store {}

    #[async_trait]
    impl ContentStore for Store {
        async fn create_contact_message(
            &self,
            doc: &ContactMessageDoc,
        ) -> Result<PersistedDocument, AppError>;
    }
}

fn valid_form() -> ContactForm {
    ContactForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hello".to_string(),
    }
}

#[tokio::test]
async fn valid_submission_creates_one_document() {
    let mut store = MockStore::new();
    store
        .expect_create_contact_message()
        .withf(|doc| {
            doc.doc_type == "contactMessage"
                && doc.name == "Ada"
                && doc.email == "ada@example.com"
                && doc.message == "Hello"
        })
        .times(1)
        .returning(|_| {
            Ok(PersistedDocument {
                id: "abc123".to_string(),
            })
        });

    let handler = ContactHandler::new(Some(store));
    let outcome = handler.submit(valid_form()).await.unwrap();

    assert!(matches!(outcome, SubmissionOutcome::Persisted(doc) if doc.id == "abc123"));
}

#[tokio::test]
async fn invalid_form_never_reaches_the_store() {
    let mut store = MockStore::new();
    store.expect_create_contact_message().times(0);

    let handler = ContactHandler::new(Some(store));
    let err = handler
        .submit(ContactForm {
            name: String::new(),
            email: String::new(),
            message: String::new(),
        })
        .await
        .unwrap_err();

    match err {
        AppError::Validation(fields) => assert_eq!(fields.len(), 3),
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn store_failure_propagates() {
    let mut store = MockStore::new();
    store
        .expect_create_contact_message()
        .times(1)
        .returning(|_| Err(AppError::ContentStore("mutate returned 503".to_string())));

    let handler = ContactHandler::new(Some(store));
    let err = handler.submit(valid_form()).await.unwrap_err();

    assert!(matches!(err, AppError::ContentStore(_)));
}

#[tokio::test]
async fn missing_store_yields_dev_mode_after_validation() {
    let handler = ContactHandler::<MockStore>::new(None);

    let outcome = handler.submit(valid_form()).await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::DevMode));

    // Validation still gates dev mode.
    let err = handler
        .submit(ContactForm {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            message: "Hello".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
