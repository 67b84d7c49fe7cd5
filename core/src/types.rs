//! DTOs for the shop backend's `/api` resources.
//!
//! # Design
//! These mirror the JSON the backend exchanges but are defined independently
//! of the mock-server crate; the integration tests catch schema drift between
//! the two. The backend's read endpoints are sparse (the category listing
//! carries only `id` and `message`, for instance), so every response field
//! other than the id tolerates being absent or `null`. Field names on the
//! wire are camelCase.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A product category as listed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Acknowledgement returned by create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryResponse {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Payload for creating or replacing a product. `user_id` names the user the
/// change is logged against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub image_urls: Vec<String>,
    pub user_id: i64,
}

/// Acknowledgement returned by product create, update and status changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub product_id: Option<i64>,
}

/// One row of a product search or category listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductStatusRequest {
    pub product_id: i64,
    pub status: String,
    pub user_id: i64,
}

/// Filters for `GET /products/search`. Unset filters are left out of the
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSearch {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub page: u32,
    pub size: u32,
}

impl Default for ProductSearch {
    fn default() -> Self {
        Self {
            keyword: None,
            category_id: None,
            page: 0,
            size: 10,
        }
    }
}

impl ProductSearch {
    pub fn keyword(mut self, keyword: &str) -> Self {
        self.keyword = Some(keyword.to_string());
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }
}

/// A page of results in the backend's paging envelope. `number` is
/// zero-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Profile fields to change; unset fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRoleRequest {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_missing_description() {
        let json = serde_json::to_value(CategoryRequest::new("Phones")).unwrap();
        assert_eq!(json, json!({"name": "Phones"}));
    }

    #[test]
    fn category_decodes_sparse_listing_row() {
        let c: Category = serde_json::from_str(r#"{"id":1,"message":null}"#).unwrap();
        assert_eq!(c.id, 1);
        assert_eq!(c.name, None);
        assert_eq!(c.description, None);
    }

    #[test]
    fn response_message_is_optional() {
        let r: CategoryResponse = serde_json::from_str(r#"{"id":5}"#).unwrap();
        assert_eq!(r, CategoryResponse { id: 5, message: None });
    }

    #[test]
    fn product_request_uses_camel_case() {
        let req = ProductRequest {
            name: "Pixel 9".to_string(),
            price: 799.0,
            category_id: 2,
            detail: None,
            image_urls: vec!["https://img.example/p9.png".to_string()],
            user_id: 1,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["imageUrls"][0], "https://img.example/p9.png");
        assert_eq!(json["userId"], 1);
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn page_decodes_backend_envelope() {
        let raw = json!({
            "content": [{"productId": 4, "name": "TV", "price": 1200.5, "categoryName": "Screens"}],
            "totalElements": 11,
            "totalPages": 2,
            "number": 1,
            "size": 10,
            "first": false,
            "last": true,
            "empty": false
        });
        let page: Page<ProductDetail> = serde_json::from_value(raw).unwrap();
        assert_eq!(page.content[0].product_id, 4);
        assert_eq!(page.content[0].category_name.as_deref(), Some("Screens"));
        assert_eq!(page.total_elements, 11);
        assert!(page.is_last());
    }

    #[test]
    fn role_serializes_upper_case() {
        let json = serde_json::to_value(UpdateUserRoleRequest { role: Role::Admin }).unwrap();
        assert_eq!(json, json!({"role": "ADMIN"}));
    }

    #[test]
    fn user_fields_are_optional() {
        let u: User = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert_eq!(u.username, None);
        assert_eq!(u.role, None);
    }
}
