//! Scheme catalogue endpoints

use super::{ApiClient, ClientError};
use crate::types::{
    Category, Comment, CommentWrite, License, Paginated, Scheme, SchemeFilter, SchemeSummary,
    SchemeWrite, Tag,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

impl ApiClient {
    /// List public schemes matching a filter
    pub async fn list_schemes(
        &self,
        filter: &SchemeFilter,
    ) -> Result<Paginated<SchemeSummary>, ClientError> {
        let request = self
            .request(Method::GET, "/schemes/")
            .query(&filter.to_query());
        self.execute(request).await
    }

    /// Follow the `next` link of a page, if any
    pub async fn next_page<T: DeserializeOwned>(
        &self,
        page: &Paginated<T>,
    ) -> Result<Option<Paginated<T>>, ClientError> {
        self.follow_page_link(page.next.as_deref()).await
    }

    /// Follow the `previous` link of a page, if any
    pub async fn previous_page<T: DeserializeOwned>(
        &self,
        page: &Paginated<T>,
    ) -> Result<Option<Paginated<T>>, ClientError> {
        self.follow_page_link(page.previous.as_deref()).await
    }

    async fn follow_page_link<T: DeserializeOwned>(
        &self,
        link: Option<&str>,
    ) -> Result<Option<Paginated<T>>, ClientError> {
        let Some(link) = link else {
            return Ok(None);
        };

        let url = Url::parse(link)?;
        let request = self.request(Method::GET, url.as_str());
        self.execute(request).await.map(Some)
    }

    pub async fn get_scheme(&self, id: u64) -> Result<Scheme, ClientError> {
        let request = self.request(Method::GET, &format!("/schemes/{id}/"));
        self.execute(request).await
    }

    pub async fn create_scheme(&self, scheme: &SchemeWrite) -> Result<Scheme, ClientError> {
        let request = self.request(Method::POST, "/schemes/").json(scheme);
        self.execute(request).await
    }

    pub async fn update_scheme(&self, id: u64, scheme: &SchemeWrite) -> Result<Scheme, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/schemes/{id}/"))
            .json(scheme);
        self.execute(request).await
    }

    pub async fn delete_scheme(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/schemes/{id}/"));
        self.execute_empty(request).await
    }

    /// Schemes authored by the logged-in user, all visibilities
    pub async fn my_schemes(&self) -> Result<Vec<SchemeSummary>, ClientError> {
        let request = self.request(Method::GET, "/schemes/my/");
        self.execute(request).await
    }

    pub async fn favorited_schemes(
        &self,
        page: Option<u32>,
    ) -> Result<Paginated<SchemeSummary>, ClientError> {
        let mut request = self.request(Method::GET, "/schemes/favorited/");
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }
        self.execute(request).await
    }

    pub async fn add_favorite(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::POST, &format!("/schemes/{id}/favorite/"));
        self.execute_empty(request).await
    }

    pub async fn remove_favorite(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/schemes/{id}/favorite/"));
        self.execute_empty(request).await
    }

    /// Comments on a scheme, oldest first
    pub async fn list_comments(&self, scheme_id: u64) -> Result<Vec<Comment>, ClientError> {
        let request = self.request(Method::GET, &format!("/schemes/{scheme_id}/comments/"));
        self.execute(request).await
    }

    pub async fn add_comment(
        &self,
        scheme_id: u64,
        text: impl Into<String>,
    ) -> Result<Comment, ClientError> {
        let request = self
            .request(Method::POST, &format!("/schemes/{scheme_id}/comments/"))
            .json(&CommentWrite { text: text.into() });
        self.execute(request).await
    }

    pub async fn delete_comment(&self, comment_id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/comments/{comment_id}/"));
        self.execute_empty(request).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let request = self.request(Method::GET, "/categories/");
        self.execute(request).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, ClientError> {
        let request = self.request(Method::GET, "/tags/");
        self.execute(request).await
    }

    pub async fn list_licenses(&self) -> Result<Vec<License>, ClientError> {
        let request = self.request(Method::GET, "/licenses/");
        self.execute(request).await
    }
}
