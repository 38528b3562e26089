pub mod error;
pub mod http_client;
pub mod models;
pub mod query;

pub use error::GatewayError;
pub use models::{Comment, NewComment, NewPost, Post, PostPatch, SortKey, UpvotePatch};

use http_client::HttpGateway;
use query::{Filter, Order};

const POSTS: &str = "posts";
const COMMENTS: &str = "comments";

/// High-level client for the OctaneNexus data gateway.
///
/// Wraps the generic collection API with the typed operations the views
/// and the CLI actually use. Construct once, share by reference.
#[derive(Debug, Clone)]
pub struct NexusClient {
    gateway: HttpGateway,
}

impl NexusClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            gateway: HttpGateway::new(base_url, api_key),
        }
    }

    /// All posts, ordered by the chosen sort key.
    pub async fn list_posts(&self, sort: SortKey) -> Result<Vec<Post>, GatewayError> {
        let order = match sort {
            SortKey::Newest => Order::desc("created_at"),
            SortKey::Popular => Order::desc("upvotes"),
        };
        self.gateway.select(POSTS, &[], Some(order)).await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, GatewayError> {
        self.gateway
            .select_one(POSTS, &[Filter::eq("id", id)])
            .await
    }

    /// Comments for a post, oldest first.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, GatewayError> {
        self.gateway
            .select(
                COMMENTS,
                &[Filter::eq("post_id", post_id)],
                Some(Order::asc("created_at")),
            )
            .await
    }

    pub async fn create_post(&self, new_post: NewPost) -> Result<Post, GatewayError> {
        tracing::debug!(title = %new_post.title, "creating post");
        self.gateway.insert(POSTS, &new_post).await
    }

    /// Overwrite the post's editable fields.
    pub async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post, GatewayError> {
        self.gateway
            .update(POSTS, &[Filter::eq("id", id)], &patch)
            .await
    }

    /// Write `current_upvotes + 1` and return the authoritative row.
    ///
    /// Read-modify-write: concurrent upvoters can lose updates, because the
    /// written value is absolute (last write wins on the counter).
    pub async fn upvote_post(&self, id: i64, current_upvotes: i64) -> Result<Post, GatewayError> {
        let patch = UpvotePatch {
            upvotes: current_upvotes + 1,
        };
        self.gateway
            .update(POSTS, &[Filter::eq("id", id)], &patch)
            .await
    }

    /// Delete a post and its comments.
    ///
    /// Comments go first so a failure partway leaves no orphaned replies
    /// behind a still-visible post.
    pub async fn delete_post(&self, id: i64) -> Result<(), GatewayError> {
        tracing::debug!(post_id = id, "deleting post and its comments");
        self.gateway
            .delete(COMMENTS, &[Filter::eq("post_id", id)])
            .await?;
        self.gateway.delete(POSTS, &[Filter::eq("id", id)]).await
    }

    /// Add a comment. Whitespace-only content is rejected locally without
    /// issuing a request.
    pub async fn add_comment(&self, new_comment: NewComment) -> Result<Comment, GatewayError> {
        let content = new_comment.content.trim();
        if content.is_empty() {
            return Err(GatewayError::EmptyComment);
        }

        let payload = NewComment {
            post_id: new_comment.post_id,
            content: content.to_string(),
        };
        self.gateway.insert(COMMENTS, &payload).await
    }
}
