//! In-memory stand-in for the shop backend's `/api`.
//!
//! Serves categories, products and users with Spring-style JSON error bodies
//! (`{"message": ...}`) and paging envelopes, plus an `/api/echo` route and a
//! handful of `/api/faults/*` routes that answer with deliberately awkward
//! bodies so clients can be tested against each decoding path. Two users are
//! seeded: `1` (ADMIN) and `2` (USER).

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    routing::{any, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryAck {
    pub id: i64,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub detail: Option<String>,
    pub image_urls: Vec<String>,
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub detail: Option<String>,
    pub image_urls: Vec<String>,
    pub user_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAck {
    pub message: String,
    pub product_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub category_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    pub product_id: i64,
    pub status: String,
    pub user_id: i64,
}

/// Spring Data's page envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageBody<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct UserInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct RoleInput {
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

fn not_found(what: &str) -> Failure {
    failure(StatusCode::NOT_FOUND, format!("{what} does not exist"))
}

#[derive(Debug)]
pub struct Store {
    next_category_id: i64,
    categories: BTreeMap<i64, Category>,
    next_product_id: i64,
    products: BTreeMap<i64, Product>,
    users: BTreeMap<i64, User>,
}

impl Default for Store {
    fn default() -> Self {
        let users = [(1, "admin", "ADMIN"), (2, "lan", "USER")]
            .into_iter()
            .map(|(id, username, role)| {
                let user = User {
                    id,
                    username: username.to_string(),
                    email: format!("{username}@shop.test"),
                    role: role.to_string(),
                };
                (id, user)
            })
            .collect();
        Self {
            next_category_id: 0,
            categories: BTreeMap::new(),
            next_product_id: 0,
            products: BTreeMap::new(),
            users,
        }
    }
}

impl Store {
    fn detail(&self, product: &Product) -> ProductDetail {
        ProductDetail {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            category_name: self.categories.get(&product.category_id).map(|c| c.name.clone()),
        }
    }

    fn require_user(&self, id: i64) -> Result<(), Failure> {
        self.users.contains_key(&id).then_some(()).ok_or_else(|| not_found("User"))
    }

    fn require_category(&self, id: i64) -> Result<(), Failure> {
        self.categories
            .contains_key(&id)
            .then_some(())
            .ok_or_else(|| not_found("Category"))
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/products", post(create_product))
        .route("/api/products/search", get(search_products))
        .route("/api/products/status", put(update_product_status))
        .route("/api/products/category/{category_id}", get(products_by_category))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/api/users/{id}/role", put(update_user_role))
        .route("/api/echo", any(echo))
        .route("/api/faults/empty/{status}", get(fault_empty).post(fault_empty))
        .route("/api/faults/text/{status}", get(fault_text))
        .route("/api/faults/error/{status}", get(fault_error))
        .route("/api/faults/bytes/{status}", get(fault_bytes))
        .route("/api/faults/content-length-zero", get(content_length_zero))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

fn validate_category(input: &CategoryInput) -> Result<(), Failure> {
    let len = input.name.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Category name must be between 2 and 100 characters",
        ));
    }
    if input.description.as_deref().is_some_and(|d| d.chars().count() > 500) {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Description must not exceed 500 characters",
        ));
    }
    Ok(())
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    let store = db.read().await;
    Json(store.categories.values().cloned().collect())
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<CategoryAck>), Failure> {
    validate_category(&input)?;
    let mut store = db.write().await;
    store.next_category_id += 1;
    let id = store.next_category_id;
    store.categories.insert(
        id,
        Category {
            id,
            name: input.name,
            description: input.description,
        },
    );
    tracing::info!(id, "category created");
    Ok((
        StatusCode::CREATED,
        Json(CategoryAck {
            id,
            message: "Category created".to_string(),
        }),
    ))
}

async fn get_category(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Category>, Failure> {
    let store = db.read().await;
    store
        .categories
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Category"))
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<CategoryAck>, Failure> {
    validate_category(&input)?;
    let mut store = db.write().await;
    let category = store.categories.get_mut(&id).ok_or_else(|| not_found("Category"))?;
    category.name = input.name;
    category.description = input.description;
    Ok(Json(CategoryAck {
        id,
        message: "Category updated".to_string(),
    }))
}

async fn delete_category(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    store
        .categories
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("Category"))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

fn validate_product(store: &Store, input: &ProductInput) -> Result<(), Failure> {
    if input.name.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Product name must not be blank"));
    }
    if input.price < 0.0 {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Price must be greater than or equal to 0",
        ));
    }
    store.require_category(input.category_id)?;
    store.require_user(input.user_id)
}

fn default_size() -> u32 {
    10
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub user_id: i64,
}

/// Slice `items` into page `number` of `size`. `size` must be at least one.
pub fn paginate<T>(items: Vec<T>, number: u32, size: u32) -> Result<PageBody<T>, Failure> {
    if size == 0 {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Page size must not be less than one",
        ));
    }
    let total = items.len() as u64;
    let total_pages = total.div_ceil(size as u64) as u32;
    let content: Vec<T> = items
        .into_iter()
        .skip(number as usize * size as usize)
        .take(size as usize)
        .collect();
    let count = content.len() as u32;
    Ok(PageBody {
        content,
        total_elements: total,
        total_pages,
        number,
        size,
        number_of_elements: count,
        first: number == 0,
        last: number + 1 >= total_pages,
        empty: count == 0,
    })
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<ProductAck>), Failure> {
    let mut store = db.write().await;
    validate_product(&store, &input)?;
    store.next_product_id += 1;
    let id = store.next_product_id;
    store.products.insert(
        id,
        Product {
            id,
            name: input.name,
            price: input.price,
            category_id: input.category_id,
            detail: input.detail,
            image_urls: input.image_urls,
            status: "ACTIVE".to_string(),
        },
    );
    tracing::info!(id, user_id = input.user_id, "product created");
    Ok((
        StatusCode::CREATED,
        Json(ProductAck {
            message: "Product created".to_string(),
            product_id: id,
        }),
    ))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductAck>, Failure> {
    let mut store = db.write().await;
    if !store.products.contains_key(&id) {
        return Err(not_found("Product"));
    }
    validate_product(&store, &input)?;
    let product = store.products.get_mut(&id).ok_or_else(|| not_found("Product"))?;
    product.name = input.name;
    product.price = input.price;
    product.category_id = input.category_id;
    product.detail = input.detail;
    product.image_urls.extend(input.image_urls);
    Ok(Json(ProductAck {
        message: "Product updated".to_string(),
        product_id: id,
    }))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    if !store.products.contains_key(&id) {
        return Err(not_found("Product"));
    }
    store.require_user(params.user_id)?;
    store.products.remove(&id);
    tracing::info!(id, user_id = params.user_id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn search_products(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageBody<ProductDetail>>, Failure> {
    let store = db.read().await;
    let keyword = params.keyword.as_deref().map(str::to_lowercase);
    let matches: Vec<ProductDetail> = store
        .products
        .values()
        .filter(|p| keyword.as_deref().map_or(true, |k| p.name.to_lowercase().contains(k)))
        .filter(|p| params.category_id.map_or(true, |c| p.category_id == c))
        .map(|p| store.detail(p))
        .collect();
    paginate(matches, params.page, params.size).map(Json)
}

async fn products_by_category(
    State(db): State<Db>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageBody<ProductDetail>>, Failure> {
    let store = db.read().await;
    let matches: Vec<ProductDetail> = store
        .products
        .values()
        .filter(|p| p.category_id == category_id)
        .map(|p| store.detail(p))
        .collect();
    paginate(matches, params.page, params.size).map(Json)
}

async fn update_product_status(
    State(db): State<Db>,
    Json(input): Json<StatusInput>,
) -> Result<Json<ProductAck>, Failure> {
    let mut store = db.write().await;
    store.require_user(input.user_id)?;
    let product = store
        .products
        .get_mut(&input.product_id)
        .ok_or_else(|| not_found("Product"))?;
    product.status = input.status;
    Ok(Json(ProductAck {
        message: "Product status updated".to_string(),
        product_id: input.product_id,
    }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, Failure> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or_else(|| not_found("User"))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, Failure> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(|| not_found("User"))?;
    if let Some(username) = input.username {
        user.username = username;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("User"))
}

async fn update_user_role(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<RoleInput>,
) -> Result<Json<User>, Failure> {
    if !matches!(input.role.as_str(), "ADMIN" | "USER") {
        return Err(failure(StatusCode::BAD_REQUEST, "Role must be ADMIN or USER"));
    }
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(|| not_found("User"))?;
    user.role = input.role;
    Ok(Json(user.clone()))
}

// ---------------------------------------------------------------------------
// Echo and faults
// ---------------------------------------------------------------------------

/// Reflects the method and JSON body back; an empty body echoes as `null`.
async fn echo(method: Method, body: String) -> Result<Json<serde_json::Value>, Failure> {
    let body = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&body).map_err(|e| failure(StatusCode::BAD_REQUEST, e.to_string()))?
    };
    Ok(Json(serde_json::json!({ "method": method.as_str(), "body": body })))
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn fault_empty(Path(code): Path<u16>) -> StatusCode {
    status_from(code)
}

async fn fault_text(Path(code): Path<u16>) -> (StatusCode, &'static str) {
    (status_from(code), "upstream exploded")
}

async fn fault_error(Path(code): Path<u16>) -> (StatusCode, Json<serde_json::Value>) {
    (status_from(code), Json(serde_json::json!({ "error": "not found" })))
}

/// Latin-1 encoded error page, not valid UTF-8.
async fn fault_bytes(Path(code): Path<u16>) -> (StatusCode, Vec<u8>) {
    (status_from(code), b"caf\xe9 closed".to_vec())
}

async fn content_length_zero() -> StatusCode {
    StatusCode::OK
}
