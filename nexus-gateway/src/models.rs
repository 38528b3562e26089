use serde::{Deserialize, Serialize};

// ==================== Post models ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    #[serde(default)]
    pub upvotes: i64,
    pub created_at: String,
}

impl Post {
    /// Case-insensitive substring match on the title, as used by the
    /// list search box.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Payload for inserting a new post. The server assigns id and created_at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    pub upvotes: i64,
}

/// Full-field overwrite sent by the edit form. Every field is written,
/// including None values, so cleared inputs clear the stored columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpvotePatch {
    pub upvotes: i64,
}

// ==================== Comment models ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: i64,
    pub content: String,
}

// ==================== List ordering ====================

/// Sort key for the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently created first.
    #[default]
    Newest,
    /// Highest upvote count first.
    Popular,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> Post {
        Post {
            id: 1,
            title: title.to_string(),
            content: String::new(),
            image_url: None,
            car_make: None,
            car_model: None,
            car_year: None,
            upvotes: 0,
            created_at: "2024-05-01T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn title_match_ignores_case() {
        assert!(post("Turbo Civic").title_matches("cIvIc"));
        assert!(!post("NA Miata").title_matches("civic"));
    }

    #[test]
    fn empty_query_matches_any_title() {
        assert!(post("Turbo Civic").title_matches(""));
    }

    #[test]
    fn new_post_defaults_to_zero_upvotes() {
        let new_post = NewPost {
            title: "Turbo Civic".to_string(),
            ..NewPost::default()
        };
        assert_eq!(new_post.upvotes, 0);
        assert_eq!(new_post.car_year, None);
    }
}
