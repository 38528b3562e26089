use serde::{Deserialize, Serialize};

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
    /// The "2020 Honda Civic" line under the title; empty when no vehicle
    /// metadata was entered.
    pub fn vehicle_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(year) = self.car_year {
            parts.push(year.to_string());
        }
        if let Some(make) = &self.car_make {
            if !make.is_empty() {
                parts.push(make.clone());
            }
        }
        if let Some(model) = &self.car_model {
            if !model.is_empty() {
                parts.push(model.clone());
            }
        }
        parts.join(" ")
    }
}

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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
}

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Popular,
}
