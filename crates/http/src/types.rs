//! Wire types for the scheme-sharing API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access/refresh credential pair, stored and replaced as a whole
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Login form payload for the token-issue endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Refresh endpoint response; `refresh` is present only when the server rotates it
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshResponse {
    /// Combine with the pair that was refreshed, keeping its refresh token unless rotated
    pub fn merge_with(self, prior: &TokenPair) -> TokenPair {
        TokenPair {
            access: self.access,
            refresh: self.refresh.unwrap_or_else(|| prior.refresh.clone()),
        }
    }
}

/// Registration payload; `re_password` must repeat `password`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub re_password: String,
}

impl RegisterRequest {
    pub fn passwords_match(&self) -> bool {
        self.password == self.re_password
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: u64,
    pub username: String,
    pub email: String,
}

/// Public profile fields attached to every user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub social_telegram: String,
    #[serde(default)]
    pub social_vk: String,
}

/// Authoritative user record as returned by the `me` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub profile: Profile,
}

/// The logged-in user held by the session controller
pub type SessionUser = User;

/// Partial profile update; absent fields are left unchanged by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_vk: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileUpdate>,
}

/// Profile page of another user, with their public schemes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: u64,
    pub username: String,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub schemes: Vec<SchemeSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "EA")]
    Easy,
    #[default]
    #[serde(rename = "ME")]
    Medium,
    #[serde(rename = "HA")]
    Hard,
    #[serde(rename = "EX")]
    Expert,
}

impl Difficulty {
    /// Value accepted by the list filter, which differs from the stored code
    pub fn filter_value(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    #[serde(rename = "PUB")]
    Public,
    /// Reachable by direct link only
    #[serde(rename = "UNL")]
    Unlisted,
    /// Author only
    #[serde(rename = "PRI")]
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "XSD")]
    PatternMaker,
    #[serde(rename = "SAGA")]
    CrossStitchSaga,
    #[serde(rename = "IMG")]
    Image,
    #[default]
    #[serde(rename = "OTH")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: u64,
    pub name: String,
    pub short_name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeFile {
    pub id: u64,
    pub file: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_type: FileType,
    #[serde(default)]
    pub downloads_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeImage {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub caption: String,
}

/// Scheme as it appears in list views: related objects are flattened to names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub main_image: Option<String>,
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub views_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Full scheme detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: u64,
    pub title: String,
    pub author: User,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub license: License,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub size_stitches_width: Option<u32>,
    #[serde(default)]
    pub size_stitches_height: Option<u32>,
    #[serde(default)]
    pub number_of_colors: Option<u32>,
    #[serde(default)]
    pub recommended_canvas: String,
    #[serde(default)]
    pub recommended_threads: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub views_count: u32,
    #[serde(default)]
    pub files: Vec<SchemeFile>,
    #[serde(default)]
    pub images: Vec<SchemeImage>,
    #[serde(default)]
    pub favorited_by: Vec<u64>,
}

impl Scheme {
    pub fn is_favorited_by(&self, user_id: u64) -> bool {
        self.favorited_by.contains(&user_id)
    }
}

/// Body for creating or replacing a scheme; related objects are referenced by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeWrite {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(default)]
    pub tags: Vec<u64>,
    pub license: u64,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_stitches_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_stitches_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_colors: Option<u32>,
    #[serde(default)]
    pub recommended_canvas: String,
    #[serde(default)]
    pub recommended_threads: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentWrite {
    pub text: String,
}

/// Page of results from a paginated list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Query parameters understood by the scheme list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeFilter {
    /// Case-insensitive title substring
    pub search: Option<String>,
    pub category: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub license: Option<u64>,
    /// Tag names, any of which may match
    pub tags: Vec<String>,
    pub page: Option<u32>,
}

impl SchemeFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            query.push(("search", search.to_string()));
        }
        if let Some(category) = self.category {
            query.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            query.push(("difficulty", difficulty.filter_value().to_string()));
        }
        if let Some(license) = self.license {
            query.push(("license", license.to_string()));
        }

        let tags: Vec<&str> = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .collect();
        if !tags.is_empty() {
            query.push(("tags", tags.join(",")));
        }

        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }

        query
    }
}
