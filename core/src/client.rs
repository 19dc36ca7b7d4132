//! Stateless HTTP request builder and response parser for the checklist API.
//!
//! # Design
//! `ChecklistClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Every path, search included, hangs off the same base URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ChecklistItem, ChecklistItemUpdate, NewChecklistItem};

/// Collection resource, relative to the base URL.
pub const COLLECTION_PATH: &str = "/api/checklist";

/// Characters `encodeURIComponent` leaves untouched.
const KEYWORD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Synchronous, stateless client for the checklist API.
#[derive(Debug, Clone)]
pub struct ChecklistClient {
    base_url: String,
}

impl ChecklistClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}{COLLECTION_PATH}", self.base_url)
    }

    fn member(&self, id: u64) -> String {
        format!("{}{COLLECTION_PATH}/{id}", self.base_url)
    }

    pub fn build_list_items(&self) -> HttpRequest {
        get(self.collection())
    }

    pub fn build_get_item(&self, id: u64) -> HttpRequest {
        get(self.member(id))
    }

    pub fn build_create_item(&self, input: &NewChecklistItem) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection(), input)
    }

    pub fn build_create_items(&self, inputs: &[NewChecklistItem]) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/bulk", self.collection()), &inputs)
    }

    pub fn build_update_item(&self, id: u64, input: &ChecklistItemUpdate) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.member(id), input)
    }

    pub fn build_delete_item(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.member(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `keyword` is sent as given; callers trim it first.
    pub fn build_search_items(&self, keyword: &str) -> HttpRequest {
        let encoded = utf8_percent_encode(keyword, KEYWORD);
        get(format!("{}/search?keyword={encoded}", self.collection()))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<ChecklistItem>, ApiError> {
        parse_list(response)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<ChecklistItem, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<ChecklistItem, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_items(&self, response: HttpResponse) -> Result<Vec<ChecklistItem>, ApiError> {
        parse_list(response)
    }

    /// A failed update is logged with its body, and the body is still given
    /// a chance to decode as an item. Only when that fails too does the
    /// status surface as an error.
    pub fn parse_update_item(&self, response: HttpResponse) -> Result<ChecklistItem, ApiError> {
        if response.is_success() {
            return decode(&response.body);
        }
        tracing::error!(status = response.status, body = %response.body, "error updating item");
        decode(&response.body).map_err(|_| status_error(&response))
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_search_items(&self, response: HttpResponse) -> Result<Vec<ChecklistItem>, ApiError> {
        parse_list(response)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: serde::Serialize + ?Sized>(
    method: HttpMethod,
    path: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Collections come back as 204 with no body when empty.
fn parse_list(response: HttpResponse) -> Result<Vec<ChecklistItem>, ApiError> {
    check_status(&response)?;
    if response.status == 204 || response.body.trim().is_empty() {
        return Ok(Vec::new());
    }
    decode(&response.body)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(status_error(response))
}

/// Map a non-success status code to the appropriate `ApiError` variant.
fn status_error(response: &HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ChecklistClient {
        ChecklistClient::new("http://localhost:8080")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = client().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/checklist");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_item_produces_correct_request() {
        let req = client().build_get_item(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/checklist/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_item_produces_correct_request() {
        let req = client().build_create_item(&NewChecklistItem::titled("Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/checklist");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["completed"], false);
    }

    #[test]
    fn build_create_items_targets_bulk_endpoint() {
        let inputs = vec![NewChecklistItem::titled("One"), NewChecklistItem::titled("Two")];
        let req = client().build_create_items(&inputs).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/checklist/bulk");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["title"], "Two");
    }

    #[test]
    fn build_update_item_sends_full_replacement() {
        let input = ChecklistItemUpdate {
            title: "Updated".to_string(),
            description: Some("notes".to_string()),
            completed: true,
            version: 2,
        };
        let req = client().build_update_item(7, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/api/checklist/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Updated");
        assert_eq!(body["description"], "notes");
        assert_eq!(body["completed"], true);
        assert_eq!(body["version"], 2);
    }

    #[test]
    fn build_delete_item_produces_correct_request() {
        let req = client().build_delete_item(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/api/checklist/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_search_items_encodes_keyword() {
        let req = client().build_search_items("milk & eggs/2");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:8080/api/checklist/search?keyword=milk%20%26%20eggs%2F2"
        );
    }

    #[test]
    fn build_search_items_keeps_unreserved_marks() {
        let req = client().build_search_items("to-do_(v1)!");
        assert!(req.path.ends_with("keyword=to-do_(v1)!"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ChecklistClient::new("http://localhost:8080/");
        assert_eq!(client.build_list_items().path, "http://localhost:8080/api/checklist");
    }

    #[test]
    fn parse_list_items_success() {
        let items = client()
            .parse_list_items(response(
                200,
                r#"[{"id":1,"title":"Test","description":null,"completed":false,"version":0}]"#,
            ))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Test");
    }

    #[test]
    fn parse_list_items_no_content_is_empty() {
        let items = client().parse_list_items(response(204, "")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn parse_list_items_bad_json() {
        let err = client().parse_list_items(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_get_item_not_found() {
        let err = client().parse_get_item(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_item_accepts_created() {
        let item = client()
            .parse_create_item(response(
                201,
                r#"{"id":5,"title":"New","description":"","completed":false,"version":0}"#,
            ))
            .unwrap();
        assert_eq!(item.id, 5);
        assert_eq!(item.title, "New");
    }

    #[test]
    fn parse_create_item_wrong_status() {
        let err = client()
            .parse_create_item(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_update_item_success() {
        let item = client()
            .parse_update_item(response(
                200,
                r#"{"id":1,"title":"Updated","completed":true,"version":2}"#,
            ))
            .unwrap();
        assert_eq!(item.title, "Updated");
        assert!(item.completed);
        assert_eq!(item.version, 2);
    }

    #[test]
    fn parse_update_item_failure_with_item_body_still_returns_item() {
        let item = client()
            .parse_update_item(response(409, r#"{"id":1,"title":"Stale","version":1}"#))
            .unwrap();
        assert_eq!(item.title, "Stale");
    }

    #[test]
    fn parse_update_item_failure_with_error_body() {
        let err = client()
            .parse_update_item(response(400, r#"{"error":"Title cannot be empty"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 400, .. }));

        let err = client().parse_update_item(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_item_accepts_text_body() {
        assert!(client()
            .parse_delete_item(response(200, "Item deleted successfully!"))
            .is_ok());
        assert!(client().parse_delete_item(response(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_item_not_found() {
        let err = client().parse_delete_item(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_search_items_no_content_is_empty() {
        assert!(client().parse_search_items(response(204, "")).unwrap().is_empty());
    }
}
