use crate::models::*;
use gloo_net::http::Request;
use serde::{de::DeserializeOwned, Serialize};

const GATEWAY_URL: &str = "http://localhost:54321";
const GATEWAY_KEY: &str = "dev-anon-key";

/// Single-object `Accept` header; zero rows come back as 406.
const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotFound,
    Failed(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "not found"),
            ApiError::Failed(message) => write!(f, "{message}"),
        }
    }
}

/// Browser-side client for the data gateway. One instance per page
/// component; holds no mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: GATEWAY_URL.to_string(),
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        collection: &str,
        query: &str,
        body: Option<&impl Serialize>,
        single_object: bool,
    ) -> Result<T, ApiError> {
        let url = format!("{}/rest/v1/{}?{}", self.base_url, collection, query);

        let request_builder = match method {
            "GET" => Request::get(&url),
            "POST" => Request::post(&url),
            "PATCH" => Request::patch(&url),
            "DELETE" => Request::delete(&url),
            _ => return Err(ApiError::Failed(format!("Unsupported method: {method}"))),
        };

        let mut request_builder = request_builder
            .header("apikey", GATEWAY_KEY)
            .header("Authorization", &format!("Bearer {GATEWAY_KEY}"));

        if single_object {
            request_builder = request_builder.header("Accept", ACCEPT_SINGLE_OBJECT);
        }
        if matches!(method, "POST" | "PATCH") {
            request_builder = request_builder.header("Prefer", "return=representation");
        }

        let response = if let Some(body) = body {
            request_builder
                .json(body)
                .map_err(|e| ApiError::Failed(format!("Failed to serialize request: {e}")))?
                .send()
                .await
                .map_err(|e| ApiError::Failed(format!("Network error: {e}")))?
        } else {
            request_builder
                .send()
                .await
                .map_err(|e| ApiError::Failed(format!("Network error: {e}")))?
        };

        let status = response.status();
        if status == 404 || status == 406 {
            return Err(ApiError::NotFound);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Failed(format!("Failed to read response: {e}")))?;

        if (200..300).contains(&status) {
            serde_json::from_str(&text)
                .map_err(|e| ApiError::Failed(format!("Failed to parse response: {e}")))
        } else {
            // The gateway reports errors as {"message": "..."}.
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| format!("HTTP {status}: {text}"));
            Err(ApiError::Failed(message))
        }
    }

    /// DELETE has no response body worth parsing.
    async fn request_no_content(&self, collection: &str, query: &str) -> Result<(), ApiError> {
        let url = format!("{}/rest/v1/{}?{}", self.base_url, collection, query);

        let response = Request::delete(&url)
            .header("apikey", GATEWAY_KEY)
            .header("Authorization", &format!("Bearer {GATEWAY_KEY}"))
            .send()
            .await
            .map_err(|e| ApiError::Failed(format!("Network error: {e}")))?;

        let status = response.status();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::Failed(format!("HTTP {status}: {text}")))
        }
    }

    pub async fn list_posts(&self, sort: SortKey) -> Result<Vec<Post>, ApiError> {
        let order = match sort {
            SortKey::Newest => "created_at.desc",
            SortKey::Popular => "upvotes.desc",
        };
        self.request(
            "GET",
            "posts",
            &format!("select=*&order={order}"),
            None::<&()>,
            false,
        )
        .await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.request(
            "GET",
            "posts",
            &format!("select=*&id=eq.{id}"),
            None::<&()>,
            true,
        )
        .await
    }

    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.request(
            "GET",
            "comments",
            &format!("select=*&post_id=eq.{post_id}&order=created_at.asc"),
            None::<&()>,
            false,
        )
        .await
    }

    pub async fn create_post(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        // Inserts answer with an array of created rows.
        let mut rows: Vec<Post> = self
            .request("POST", "posts", "select=*", Some(new_post), false)
            .await?;
        rows.pop()
            .ok_or_else(|| ApiError::Failed("gateway returned no created post".into()))
    }

    pub async fn update_post(&self, id: i64, patch: &PostPatch) -> Result<Post, ApiError> {
        self.request(
            "PATCH",
            "posts",
            &format!("select=*&id=eq.{id}"),
            Some(patch),
            true,
        )
        .await
    }

    /// Writes an absolute count; see the upvote race note in DESIGN.md.
    pub async fn upvote_post(&self, id: i64, new_upvotes: i64) -> Result<Post, ApiError> {
        self.request(
            "PATCH",
            "posts",
            &format!("select=*&id=eq.{id}"),
            Some(&serde_json::json!({ "upvotes": new_upvotes })),
            true,
        )
        .await
    }

    /// Cascade: comments first, then the post row.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.request_no_content("comments", &format!("post_id=eq.{id}"))
            .await?;
        self.request_no_content("posts", &format!("id=eq.{id}")).await
    }

    pub async fn add_comment(&self, new_comment: &NewComment) -> Result<Comment, ApiError> {
        let mut rows: Vec<Comment> = self
            .request("POST", "comments", "select=*", Some(new_comment), false)
            .await?;
        rows.pop()
            .ok_or_else(|| ApiError::Failed("gateway returned no created comment".into()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
