//! Typed calls for the shop backend's resources.
//!
//! Every call goes through `RequestHelper`, so the busy indicator and
//! failure reporting apply unchanged. Calls that need a body treat an empty
//! success as a decode failure.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::helper::RequestHelper;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{
    Category, CategoryRequest, CategoryResponse, Page, ProductDetail, ProductRequest, ProductResponse,
    ProductSearch, Role, UpdateProductStatusRequest, UpdateUserRequest, UpdateUserRoleRequest, User,
};

const CATEGORIES: &str = "categories";
const PRODUCTS: &str = "products";
const USERS: &str = "users";

impl<T: Transport> RequestHelper<T> {
    pub fn categories(&self) -> Categories<'_, T> {
        Categories { helper: self }
    }

    pub fn products(&self) -> Products<'_, T> {
        Products { helper: self }
    }

    pub fn users(&self) -> Users<'_, T> {
        Users { helper: self }
    }

    fn fetch<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        required(self.call_json::<R, ()>(endpoint, HttpMethod::Get, None)?)
    }

    fn send<R, B>(&self, endpoint: &str, method: HttpMethod, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        required(self.call_json(endpoint, method, Some(body))?)
    }

    fn remove(&self, endpoint: &str) -> Result<(), ApiError> {
        self.call_json::<serde_json::Value, ()>(endpoint, HttpMethod::Delete, None)?;
        Ok(())
    }
}

fn required<R>(value: Option<R>) -> Result<R, ApiError> {
    value.ok_or_else(|| ApiError::Deserialization("expected a JSON body, got no content".to_string()))
}

/// `path?k=v&...` with values form-encoded. No `?` when `pairs` is empty.
fn with_query<'a>(path: &str, pairs: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        query.append_pair(key, &value);
        any = true;
    }
    if any {
        format!("{path}?{}", query.finish())
    } else {
        path.to_string()
    }
}

/// Category endpoints bound to a helper.
#[derive(Debug)]
pub struct Categories<'a, T> {
    helper: &'a RequestHelper<T>,
}

impl<T: Transport> Categories<'_, T> {
    pub fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.helper.fetch(CATEGORIES)
    }

    pub fn get(&self, id: i64) -> Result<Category, ApiError> {
        self.helper.fetch(&format!("{CATEGORIES}/{id}"))
    }

    pub fn create(&self, input: &CategoryRequest) -> Result<CategoryResponse, ApiError> {
        self.helper.send(CATEGORIES, HttpMethod::Post, input)
    }

    pub fn update(&self, id: i64, input: &CategoryRequest) -> Result<CategoryResponse, ApiError> {
        self.helper.send(&format!("{CATEGORIES}/{id}"), HttpMethod::Put, input)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.helper.remove(&format!("{CATEGORIES}/{id}"))
    }
}

/// Product endpoints bound to a helper.
#[derive(Debug)]
pub struct Products<'a, T> {
    helper: &'a RequestHelper<T>,
}

impl<T: Transport> Products<'_, T> {
    pub fn create(&self, input: &ProductRequest) -> Result<ProductResponse, ApiError> {
        self.helper.send(PRODUCTS, HttpMethod::Post, input)
    }

    pub fn update(&self, id: i64, input: &ProductRequest) -> Result<ProductResponse, ApiError> {
        self.helper.send(&format!("{PRODUCTS}/{id}"), HttpMethod::Put, input)
    }

    /// Delete product `id`, logged against `user_id`.
    pub fn delete(&self, id: i64, user_id: i64) -> Result<(), ApiError> {
        let endpoint = with_query(&format!("{PRODUCTS}/{id}"), [("userId", user_id.to_string())]);
        self.helper.remove(&endpoint)
    }

    pub fn search(&self, search: &ProductSearch) -> Result<Page<ProductDetail>, ApiError> {
        let mut pairs = Vec::new();
        if let Some(keyword) = &search.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        if let Some(category_id) = search.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        pairs.push(("page", search.page.to_string()));
        pairs.push(("size", search.size.to_string()));
        self.helper.fetch(&with_query(&format!("{PRODUCTS}/search"), pairs))
    }

    pub fn by_category(&self, category_id: i64, page: u32, size: u32) -> Result<Page<ProductDetail>, ApiError> {
        let endpoint = with_query(
            &format!("{PRODUCTS}/category/{category_id}"),
            [("page", page.to_string()), ("size", size.to_string())],
        );
        self.helper.fetch(&endpoint)
    }

    pub fn update_status(&self, input: &UpdateProductStatusRequest) -> Result<ProductResponse, ApiError> {
        self.helper.send(&format!("{PRODUCTS}/status"), HttpMethod::Put, input)
    }
}

/// User administration endpoints bound to a helper.
#[derive(Debug)]
pub struct Users<'a, T> {
    helper: &'a RequestHelper<T>,
}

impl<T: Transport> Users<'_, T> {
    pub fn list(&self) -> Result<Vec<User>, ApiError> {
        self.helper.fetch(USERS)
    }

    pub fn get(&self, id: i64) -> Result<User, ApiError> {
        self.helper.fetch(&format!("{USERS}/{id}"))
    }

    pub fn update(&self, id: i64, input: &UpdateUserRequest) -> Result<User, ApiError> {
        self.helper.send(&format!("{USERS}/{id}"), HttpMethod::Put, input)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.helper.remove(&format!("{USERS}/{id}"))
    }

    pub fn update_role(&self, id: i64, role: Role) -> Result<User, ApiError> {
        self.helper
            .send(&format!("{USERS}/{id}/role"), HttpMethod::Put, &UpdateUserRoleRequest { role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::http::{HttpRequest, HttpResponse};
    use std::sync::Mutex;

    /// Answers every request with one canned response and keeps what it saw.
    struct Canned {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    fn helper(status: u16, body: &str) -> RequestHelper<Canned> {
        RequestHelper::new(
            ApiClient::new("http://shop.test"),
            Canned {
                response: HttpResponse::new(status, body),
                seen: Mutex::new(Vec::new()),
            },
        )
        .with_reporter(|_: &ApiError| {})
    }

    fn last_url(h: &RequestHelper<Canned>) -> String {
        h.transport().seen.lock().unwrap().last().unwrap().url.clone()
    }

    #[test]
    fn category_list_accepts_sparse_rows() {
        let h = helper(200, r#"[{"id":1,"message":null},{"id":2,"message":null}]"#);
        let categories = h.categories().list().unwrap();
        assert_eq!(categories.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2]);
        assert!(categories.iter().all(|c| c.name.is_none()));
    }

    #[test]
    fn category_get_with_no_content_is_a_decode_error() {
        let h = helper(204, "");
        assert!(matches!(h.categories().get(1), Err(ApiError::Deserialization(_))));
    }

    #[test]
    fn product_search_encodes_filters() {
        let h = helper(200, r#"{"content":[],"totalElements":0,"totalPages":0,"number":0,"size":5}"#);
        let search = ProductSearch::default().keyword("smart tv").category(3).page(1, 5);
        h.products().search(&search).unwrap();
        assert_eq!(
            last_url(&h),
            "http://shop.test/api/products/search?keyword=smart+tv&categoryId=3&page=1&size=5"
        );
    }

    #[test]
    fn product_search_omits_unset_filters() {
        let h = helper(200, r#"{"content":[]}"#);
        h.products().search(&ProductSearch::default()).unwrap();
        assert_eq!(last_url(&h), "http://shop.test/api/products/search?page=0&size=10");
    }

    #[test]
    fn product_delete_passes_user_in_query() {
        let h = helper(204, "");
        h.products().delete(8, 2).unwrap();
        let seen = h.transport().seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Delete);
        assert_eq!(seen[0].url, "http://shop.test/api/products/8?userId=2");
        assert!(seen[0].body.is_none());
    }

    #[test]
    fn role_update_sends_role_body() {
        let h = helper(200, r#"{"id":4,"username":"lan","role":"ADMIN"}"#);
        let user = h.users().update_role(4, Role::Admin).unwrap();
        assert_eq!(user.role.as_deref(), Some("ADMIN"));
        let seen = h.transport().seen.lock().unwrap();
        assert_eq!(seen[0].url, "http://shop.test/api/users/4/role");
        assert_eq!(seen[0].body.as_deref(), Some(r#"{"role":"ADMIN"}"#));
    }

    #[test]
    fn with_query_without_pairs_is_bare_path() {
        assert_eq!(with_query("users", Vec::new()), "users");
    }
}
