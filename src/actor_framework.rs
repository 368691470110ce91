use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::schema::{validate_document, Document, Model, Projection, ValidationError};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and Payloads)
// =============================================================================

/// Trait that any record type must implement to be managed by [`ResourceActor`].
///
/// The record's shape comes from its [`Model`] declaration. Create payloads are
/// serialized to a [`Document`] and validated against that shape before a
/// record is built from them.
pub trait Entity: Model + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + Serialize;
    type CreatePayload: Serialize + Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Construct the full entity from its ID and an already validated document.
    fn from_document(id: Self::Id, mut doc: Document) -> Result<Self, FrameworkError> {
        let id = serde_json::to_value(id).map_err(|e| FrameworkError::Serialization(e.to_string()))?;
        doc.insert("_id".to_string(), id);
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| FrameworkError::Serialization(e.to_string()))
    }

    /// Serialize the entity back into a document for re-validation.
    fn to_document(&self) -> Result<Document, FrameworkError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(doc)) => Ok(doc),
            Ok(other) => Err(FrameworkError::Serialization(format!(
                "expected a document, got {other}"
            ))),
            Err(e) => Err(FrameworkError::Serialization(e.to_string())),
        }
    }

    // --- Lifecycle Hooks ---

    fn on_update(&mut self, patch: Self::Patch);

    /// Clear a field that the current read projection leaves out.
    fn hide_field(&mut self, _field: &str) {}
}

/// Errors produced by the resource store itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate used by [`ResourceRequest::Find`].
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    /// Matches every record.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Debug for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Filter(..)")
    }
}

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        document: Document,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        projection: Projection,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Find {
        filter: Filter<T>,
        projection: Projection,
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    // insertion order, so reads come back in the order records were written
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", fields(model = T::NAME), skip(self))]
    pub async fn run(mut self) {
        info!("Store starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { document, respond_to } => {
                    let _ = respond_to.send(self.handle_create(document));
                }
                ResourceRequest::Get { id, projection, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_get(&id, &projection)));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Find { filter, projection, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_find(&filter, &projection)));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::Shutdown => {
                    info!("Store shutting down");
                    break;
                }
            }
        }

        info!(records = self.store.len(), "Store stopped");
    }

    fn handle_create(&mut self, document: Document) -> Result<T::Id, FrameworkError> {
        debug!("Processing create request");

        let document = validate_document::<T>(document).map_err(|e| {
            warn!(error = %e, "Create rejected");
            e
        })?;
        let id = (self.next_id_fn)();
        let item = T::from_document(id.clone(), document)?;

        self.store.insert(id.clone(), item);
        self.order.push(id.clone());
        info!(id = %id, "Record created");
        Ok(id)
    }

    fn handle_get(&self, id: &T::Id, projection: &Projection) -> Option<T> {
        debug!(id = %id, "Processing get request");

        let item = self.store.get(id).map(|item| Self::project(item, projection));
        if item.is_none() {
            debug!(id = %id, "Record not found");
        }
        item
    }

    /// Patches a copy, validates it, then commits, so a rejected update leaves
    /// the stored record untouched.
    ///
    /// The committed record is rebuilt from the validated document, the same
    /// way creates are, so both paths store identical values.
    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        debug!(id = %id, "Processing update request");

        let Some(current) = self.store.get(&id) else {
            error!(id = %id, "Record not found for update");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut patched = current.clone();
        patched.on_update(patch);
        let document = validate_document::<T>(patched.to_document()?).map_err(|e| {
            warn!(id = %id, error = %e, "Update rejected");
            e
        })?;
        let updated = T::from_document(id.clone(), document)?;

        let projected = Self::project(&updated, &Projection::default());
        self.store.insert(id.clone(), updated);
        info!(id = %id, "Record updated");
        Ok(projected)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        debug!(id = %id, "Processing delete request");

        if self.store.remove(&id).is_none() {
            error!(id = %id, "Record not found for delete");
            return Err(FrameworkError::NotFound(id.to_string()));
        }
        self.order.retain(|existing| existing != &id);
        info!(id = %id, "Record deleted");
        Ok(())
    }

    fn handle_find(&self, filter: &Filter<T>, projection: &Projection) -> Vec<T> {
        debug!("Processing find request");

        let items: Vec<T> = self
            .order
            .iter()
            .filter_map(|id| self.store.get(id))
            .filter(|item| filter.matches(item))
            .map(|item| Self::project(item, projection))
            .collect();

        debug!(matched = items.len(), "Find complete");
        items
    }

    fn project(item: &T, projection: &Projection) -> T {
        let mut item = item.clone();
        for field in projection.omitted::<T>() {
            item.hide_field(field);
        }
        item
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: `T` itself need not be `Clone` for the sender to be.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError> {
        let document = match serde_json::to_value(&payload) {
            Ok(Value::Object(document)) => document,
            Ok(other) => {
                return Err(FrameworkError::Serialization(format!(
                    "expected a document, got {other}"
                )))
            }
            Err(e) => return Err(FrameworkError::Serialization(e.to_string())),
        };
        self.create_document(document).await
    }

    /// Create from an untyped document, e.g. a decoded request body.
    pub async fn create_document(&self, document: Document) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { document, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.get_with(id, Projection::default()).await
    }

    pub async fn get_with(
        &self,
        id: T::Id,
        projection: Projection,
    ) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, projection, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn find(
        &self,
        filter: Filter<T>,
        projection: Projection,
    ) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Find { filter, projection, respond_to })
            .await
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to }).await
    }

    /// Ask the store task to stop once it has drained earlier requests.
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Tag {
        #[serde(rename = "_id")]
        id: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    #[derive(Debug, Serialize)]
    struct TagCreate {
        label: String,
        note: Option<String>,
    }

    #[derive(Debug)]
    struct TagPatch {
        label: Option<String>,
    }

    impl Model for Tag {
        const NAME: &'static str = "Tags";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("label", FieldKind::String),
            FieldSpec::optional("note", FieldKind::String).hidden(),
        ];
    }

    impl Entity for Tag {
        type Id = String;
        type CreatePayload = TagCreate;
        type Patch = TagPatch;

        fn on_update(&mut self, patch: TagPatch) {
            if let Some(label) = patch.label {
                self.label = label;
            }
        }

        fn hide_field(&mut self, field: &str) {
            if field == "note" {
                self.note = None;
            }
        }
    }

    fn start() -> ResourceClient<Tag> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("tag_{}", counter.fetch_add(1, Ordering::SeqCst));

        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_crud() {
        let client = start();

        let id = client
            .create(TagCreate { label: "rust".into(), note: Some("hi".into()) })
            .await
            .unwrap();
        assert_eq!(id, "tag_1");

        let tag = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(tag.label, "rust");
        assert_eq!(tag.note, None);

        let tag = client.get_with(id.clone(), Projection::including("note")).await.unwrap().unwrap();
        assert_eq!(tag.note.as_deref(), Some("hi"));

        let updated = client
            .update(id.clone(), TagPatch { label: Some("tokio".into()) })
            .await
            .unwrap();
        assert_eq!(updated.label, "tokio");

        client.delete(id.clone()).await.unwrap();
        assert_eq!(client.get(id).await.unwrap(), None);
        assert_eq!(client.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rejected_writes_leave_store_untouched() {
        let client = start();

        let err = client
            .create(TagCreate { label: String::new(), note: None })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Validation(ref e) if e.fails_on("label")));
        assert_eq!(client.count().await.unwrap(), 0);

        let id = client.create(TagCreate { label: "keep".into(), note: None }).await.unwrap();
        let err = client
            .update(id.clone(), TagPatch { label: Some(String::new()) })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Validation(_)));
        assert_eq!(client.get(id).await.unwrap().unwrap().label, "keep");
    }

    #[tokio::test]
    async fn test_missing_records_are_reported() {
        let client = start();

        let err = client.update("nope".into(), TagPatch { label: None }).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("nope".into()));
        let err = client.delete("nope".into()).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("nope".into()));
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let client = start();
        for label in ["a", "b", "c"] {
            client.create(TagCreate { label: label.into(), note: None }).await.unwrap();
        }

        let found = client
            .find(Filter::new(|tag: &Tag| tag.label != "b"), Projection::default())
            .await
            .unwrap();
        let labels: Vec<_> = found.iter().map(|tag| tag.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_shutdown_closes_the_store() {
        let client = start();
        client.shutdown().await.unwrap();

        // the task may still be draining; once it exits the channel reports closed
        let mut result = client.count().await;
        while result.is_ok() {
            tokio::task::yield_now().await;
            result = client.count().await;
        }
        assert!(matches!(
            result,
            Err(FrameworkError::ActorClosed) | Err(FrameworkError::ActorDropped)
        ));
    }
}
