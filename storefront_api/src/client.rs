//! HTTP client for the storefront admin REST API.

use std::time::Duration;

use reqwest::{multipart, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{IdQuery, ListQuery, Query},
    resource::{Categories, Products, Resource},
    types::{CategoryOption, ImageUpload, Page, Response, StatusResponse},
    Error,
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the storefront admin REST API.
///
/// Endpoint paths are resolved relative to the base URL, so
/// `http://host/api` and `http://host/api/` address the same endpoints.
/// Responses are never cached: every call goes to the backend.
pub struct Client {
    http: reqwest::Client,
    base_api_url: String,
}

impl Client {
    /// Creates a client for the given base URL with [`DEFAULT_TIMEOUT`].
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client for the given base URL and request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let mut base_api_url = base_url.to_string();
        if !base_api_url.ends_with('/') {
            base_api_url.push('/');
        }
        Ok(Self { http, base_api_url })
    }

    /// The normalized base URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(&self.base_api_url)
            .and_then(|base| base.join(path))
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("accept", "application/json, text/plain, */*")
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> Result<String, Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    async fn send_parsed<T>(&self, request: RequestBuilder) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let body = self.send(request).await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::InvalidBody
        })
    }

    async fn send_json<B>(&self, method: Method, url: Url, body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(method, url).json(body)).await?;
        Ok(())
    }

    /// Fetches one page of `R` matching the query.
    pub async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Page<R::Item>, Error> {
        let url = self.get_url(&format!("{}/list", R::PATH), Some(query))?;
        tracing::debug!("GET {}", url);
        self.send_parsed(self.request(Method::GET, url)).await
    }

    /// Creates a new `R` from the payload.
    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<(), Error> {
        let url = self.get_url(&format!("{}/create", R::PATH), None::<&IdQuery>)?;
        self.send_json(Method::POST, url, payload).await
    }

    /// Replaces the editable fields of the `R` with the given id.
    pub async fn edit<R: Resource>(&self, id: &str, payload: &R::Payload) -> Result<(), Error> {
        let url = self.get_url(&format!("{}/edit", R::PATH), Some(&IdQuery { id }))?;
        self.send_json(Method::PATCH, url, payload).await
    }

    /// Deletes the `R` with the given id.
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<(), Error> {
        let url = self.get_url(&format!("{}/delete", R::PATH), Some(&IdQuery { id }))?;
        self.send(
            self.request(Method::DELETE, url)
                .header("content-type", "application/json"),
        )
        .await?;
        Ok(())
    }

    /// Flips the active/inactive status and returns the new one.
    pub async fn toggle_status<R: Resource>(&self, id: &str) -> Result<StatusResponse, Error> {
        let url = self.get_url(&format!("{}/disable", R::PATH), Some(&IdQuery { id }))?;
        self.send_parsed(
            self.request(Method::PATCH, url)
                .header("content-type", "application/json"),
        )
        .await
    }

    /// Uploads a new image as a multipart form with a single `image` part.
    pub async fn change_image<R: Resource>(
        &self,
        id: &str,
        image: ImageUpload,
    ) -> Result<(), Error> {
        let url = self.get_url(&format!("{}/change-image", R::PATH), Some(&IdQuery { id }))?;
        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| {
                tracing::error!("Invalid image content type: {}", e);
                Error::RequestFailed
            })?;
        let form = multipart::Form::new().part("image", part);
        self.send(self.request(Method::PATCH, url).multipart(form))
            .await?;
        Ok(())
    }

    /// Fetches a page of categories.
    pub async fn list_categories(
        &self,
        query: &ListQuery,
    ) -> Result<Page<crate::types::Category>, Error> {
        self.list::<Categories>(query).await
    }

    /// Fetches a page of products.
    pub async fn list_products(
        &self,
        query: &ListQuery,
    ) -> Result<Page<crate::types::Product>, Error> {
        self.list::<Products>(query).await
    }

    /// Fetches the `{id, name}` pairs used by the product category selector.
    pub async fn list_category_options(&self) -> Result<Vec<CategoryOption>, Error> {
        let url = self.get_url("categories/list-select", None::<&IdQuery>)?;
        let resp: Response<Vec<CategoryOption>> =
            self.send_parsed(self.request(Method::GET, url)).await?;
        Ok(resp.data)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = Client::with_base_url("http://localhost:3333/api").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333/api/");
        let url = client
            .get_url("categories/list", None::<&IdQuery>)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/categories/list");
    }

    #[test]
    fn id_selector_is_appended() {
        let client = Client::with_base_url("http://localhost:3333/").unwrap();
        let url = client
            .get_url("products/edit", Some(&IdQuery { id: "a b" }))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/products/edit?id=a+b");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
    }
}
