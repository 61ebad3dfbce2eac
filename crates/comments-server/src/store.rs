use std::path::PathBuf;

use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use comments_shared::{Comment, CommentsDocument, ProductComment};

/// Failures reading or rewriting the backing file. "Comment not found"
/// is not an error; those operations return `Option`/`bool` instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access comments file: {0}")]
    Io(#[from] std::io::Error),

    #[error("comments file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Caller-supplied fields for a new comment. Identity fields (`id`,
/// `timestamp`, `edited`) are always generated by the store and cannot
/// be overridden.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_name: String,
    pub content: String,
    pub rating_val: Option<serde_json::Value>,
}

/// Durable CRUD over comment records partitioned by product id, backed
/// by a single JSON file that is read and rewritten in full on every
/// mutation.
///
/// Nothing serializes access to the file: two overlapping mutations can
/// both read the document before either writes, and the later write
/// silently drops the earlier one. That lost-update window is inherent
/// to whole-document read-modify-write and is kept as-is.
#[derive(Debug, Clone)]
pub struct CommentStore {
    path: PathBuf,
}

impl CommentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the backing file with an empty document if it does not
    /// exist yet. Idempotent.
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        let initial = serde_json::to_string_pretty(&CommentsDocument::default())?;
        fs::write(&self.path, initial).await?;
        Ok(())
    }

    /// Read and parse the full document.
    pub async fn read_all(&self) -> Result<CommentsDocument, StoreError> {
        self.ensure_initialized().await?;
        let raw = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Serialize the full document and overwrite the file. No atomic
    /// rename: a crash mid-write can truncate the file.
    pub async fn write_all(&self, doc: &CommentsDocument) -> Result<(), StoreError> {
        self.ensure_initialized().await?;
        let raw = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }

    /// The stored sequence for one product, in insertion order. An
    /// unknown product yields an empty sequence, never an error.
    pub async fn list_by_product(&self, product_id: &str) -> Result<Vec<Comment>, StoreError> {
        let mut doc = self.read_all().await?;
        Ok(doc.product_comments.remove(product_id).unwrap_or_default())
    }

    /// Every comment across all products, stamped with its owning
    /// product id and sorted newest first. Equal timestamps keep
    /// whatever order the stable sort leaves.
    pub async fn list_all(&self) -> Result<Vec<ProductComment>, StoreError> {
        let doc = self.read_all().await?;

        let mut all: Vec<ProductComment> = doc
            .product_comments
            .into_iter()
            .flat_map(|(product_id, comments)| {
                comments.into_iter().map(move |comment| ProductComment {
                    comment,
                    product_id: product_id.clone(),
                })
            })
            .collect();

        all.sort_by(|a, b| b.comment.timestamp.cmp(&a.comment.timestamp));
        Ok(all)
    }

    /// Append a new comment to the product's sequence, creating the
    /// sequence if the product has none yet.
    pub async fn add(
        &self,
        product_id: &str,
        fields: NewComment,
    ) -> Result<Comment, StoreError> {
        let mut doc = self.read_all().await?;

        let comment = Comment {
            id: Uuid::new_v4(),
            timestamp: Utc::now().timestamp_millis(),
            edited: false,
            last_edit_time: None,
            user_name: fields.user_name,
            content: fields.content,
            rating_val: fields.rating_val,
        };

        doc.product_comments
            .entry(product_id.to_string())
            .or_default()
            .push(comment.clone());

        self.write_all(&doc).await?;
        Ok(comment)
    }

    /// Replace a comment's content and mark it edited. `Ok(None)` when
    /// the product or comment is unknown; the document is not touched
    /// in that case.
    pub async fn update(
        &self,
        product_id: &str,
        comment_id: Uuid,
        new_content: String,
    ) -> Result<Option<Comment>, StoreError> {
        let mut doc = self.read_all().await?;

        let Some(comments) = doc.product_comments.get_mut(product_id) else {
            return Ok(None);
        };
        let Some(comment) = comments.iter_mut().find(|c| c.id == comment_id) else {
            return Ok(None);
        };

        comment.content = new_content;
        comment.edited = true;
        comment.last_edit_time = Some(Utc::now().timestamp_millis());
        let updated = comment.clone();

        self.write_all(&doc).await?;
        Ok(Some(updated))
    }

    /// Remove a comment from the product's sequence. `Ok(false)` when
    /// nothing matched; no write happens in that case.
    pub async fn delete(&self, product_id: &str, comment_id: Uuid) -> Result<bool, StoreError> {
        let mut doc = self.read_all().await?;

        let Some(comments) = doc.product_comments.get_mut(product_id) else {
            return Ok(false);
        };

        let before = comments.len();
        comments.retain(|c| c.id != comment_id);
        if comments.len() == before {
            return Ok(false);
        }

        self.write_all(&doc).await?;
        Ok(true)
    }
}
