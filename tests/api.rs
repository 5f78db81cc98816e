//! End-to-end checks of the HTTP API over the in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use vendorhub::{build_app, db::memory_store::MemoryStore, AppState, Config};

const ROOT_EMAIL: &str = "root@vendorhub.test";

fn test_app() -> Router {
    test_app_with(|_| {})
}

fn test_app_with(adjust: impl FnOnce(&mut Config)) -> Router {
    let mut config = Config::default();
    config.bootstrap.super_admin_email = Some(ROOT_EMAIL.to_string());
    config.session.secret = "integration-test-secret".to_string();
    adjust(&mut config);

    let state = AppState::new(Arc::new(MemoryStore::new()), config);
    build_app(state).unwrap()
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply { status, headers, body }
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> Reply {
    send(app, Method::GET, uri, token, None).await
}

async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Reply {
    send(app, Method::POST, uri, token, Some(body)).await
}

async fn put(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Reply {
    send(app, Method::PUT, uri, token, Some(body)).await
}

/// Signs up a plain user and returns the session token.
async fn signup_user(app: &Router, email: &str, name: &str) -> String {
    let reply = post(
        app,
        "/api/auth/signup",
        None,
        json!({ "email": email, "password": "secret123", "full_name": name }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["token"].as_str().unwrap().to_string()
}

/// Signs up a vendor with a pending listing. Returns (token, vendor id).
async fn signup_vendor(app: &Router, email: &str, business: &str) -> (String, String) {
    let reply = post(
        app,
        "/api/auth/signup",
        None,
        json!({
            "email": email,
            "password": "secret123",
            "full_name": "Vendor Owner",
            "whatsapp": "+2348000000000",
            "vendor": {
                "business_name": business,
                "category": "Food",
                "location": "Yaba, Lagos",
                "phone": "08000000000"
            }
        }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    let token = reply.body["token"].as_str().unwrap().to_string();

    let listing = get(app, "/api/vendors/me", Some(&token)).await;
    assert_eq!(listing.status, StatusCode::OK);
    (token, listing.body["id"].as_str().unwrap().to_string())
}

async fn approve(app: &Router, admin: &str, vendor_id: &str) {
    let reply = put(
        app,
        &format!("/api/admin/vendors/{vendor_id}/status"),
        Some(admin),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
}

#[tokio::test]
async fn test_root_reports_uptime() {
    let app = test_app();
    let reply = get(&app, "/", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
}

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let app = test_app();
    let reply = post(
        &app,
        "/api/auth/signup",
        None,
        json!({ "email": " Ada@Example.com ", "password": "secret123", "full_name": "Ada" }),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["email"], "ada@example.com");
    assert_eq!(reply.body["roles"], json!(["user"]));
    assert_eq!(reply.body["redirect_to"], "/user-dashboard");

    let cookie = reply.headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_signup_validation_and_duplicates() {
    let app = test_app();

    let short = post(
        &app,
        "/api/auth/signup",
        None,
        json!({ "email": "a@example.com", "password": "123", "full_name": "A" }),
    )
    .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
    assert_eq!(short.body["error"], "VALIDATION_ERROR");

    signup_user(&app, "a@example.com", "A").await;
    let again = post(
        &app,
        "/api/auth/signup",
        None,
        json!({ "email": "A@example.com", "password": "secret123", "full_name": "A" }),
    )
    .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_and_me() {
    let app = test_app();
    signup_user(&app, "tunde@example.com", "Tunde").await;

    let wrong = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "tunde@example.com", "password": "nope-nope" }),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Invalid email or password");

    let unknown = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "ghost@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], wrong.body["message"]);

    let ok = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "TUNDE@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    let token = ok.body["token"].as_str().unwrap();

    assert_eq!(get(&app, "/api/auth/me", None).await.status, StatusCode::UNAUTHORIZED);

    let me = get(&app, "/api/auth/me", Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "tunde@example.com");
    assert_eq!(me.body["is_admin"], false);
}

#[tokio::test]
async fn test_bootstrap_super_admin() {
    let app = test_app();
    let reply = post(
        &app,
        "/api/auth/signup",
        None,
        json!({ "email": ROOT_EMAIL, "password": "secret123", "full_name": "Root" }),
    )
    .await;

    assert_eq!(reply.body["roles"], json!(["user", "admin", "super_admin"]));
    assert_eq!(reply.body["redirect_to"], "/admin-dashboard");
}

#[tokio::test]
async fn test_admin_routes_are_gated() {
    let app = test_app();
    let user = signup_user(&app, "user@example.com", "User").await;

    let anonymous = get(&app, "/api/admin/stats", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forbidden = get(&app, "/api/admin/stats", Some(&user)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.body["error"], "FORBIDDEN");

    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let stats = get(&app, "/api/admin/stats", Some(&root)).await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["total_users"], 2);
}

#[tokio::test]
async fn test_access_check() {
    let app = test_app();
    let user = signup_user(&app, "user@example.com", "User").await;
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;

    let anonymous = get(&app, "/api/auth/access?path=/admin-dashboard", None).await;
    assert_eq!(anonymous.body["signed_in"], false);
    assert_eq!(anonymous.body["decision"], "redirect_to_login");
    assert_eq!(anonymous.body["redirect_to"], "/login");

    let user_reply = get(&app, "/api/auth/access?path=/admin-dashboard", Some(&user)).await;
    assert_eq!(user_reply.body["decision"], "redirect_home");
    assert_eq!(user_reply.body["redirect_to"], "/");

    let admin_reply = get(&app, "/api/auth/access?path=/admin-dashboard", Some(&root)).await;
    assert_eq!(admin_reply.body["decision"], "allow");
    assert_eq!(admin_reply.body["redirect_to"], Value::Null);

    let public = get(&app, "/api/auth/access?path=/vendors", None).await;
    assert_eq!(public.body["decision"], "allow");
}

#[tokio::test]
async fn test_vendor_listing_lifecycle() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let (owner, vendor_id) = signup_vendor(&app, "owner@example.com", "Mama's Kitchen").await;

    let me = get(&app, "/api/auth/me", Some(&owner)).await;
    assert_eq!(me.body["is_vendor"], true);

    let listing = get(&app, "/api/vendors/me", Some(&owner)).await;
    assert_eq!(listing.body["status"], "pending");
    assert_eq!(listing.body["email"], "owner@example.com");
    assert_eq!(listing.body["whatsapp"], "+2348000000000");

    let directory = get(&app, "/api/vendors", None).await;
    assert_eq!(directory.body, json!([]));

    let hidden = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
    let own_view = get(&app, &format!("/api/vendors/{vendor_id}"), Some(&owner)).await;
    assert_eq!(own_view.status, StatusCode::OK);

    let second = post(
        &app,
        "/api/vendors/me",
        Some(&owner),
        json!({ "business_name": "Another", "category": "Food", "location": "Ikeja", "phone": "0801" }),
    )
    .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    approve(&app, &root, &vendor_id).await;

    let directory = get(&app, "/api/vendors?search=kitchen&category=all", None).await;
    assert_eq!(directory.body.as_array().unwrap().len(), 1);
    assert_eq!(directory.body[0]["business_name"], "Mama's Kitchen");

    let updated = put(
        &app,
        "/api/vendors/me",
        Some(&owner),
        json!({ "description": "Home-style jollof", "status": "suspended" }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["description"], "Home-style jollof");
    assert_eq!(updated.body["status"], "approved");
}

#[tokio::test]
async fn test_user_becomes_vendor_by_creating_listing() {
    let app = test_app();
    let user = signup_user(&app, "later@example.com", "Later").await;

    assert_eq!(get(&app, "/api/vendors/me", Some(&user)).await.status, StatusCode::NOT_FOUND);

    let created = post(
        &app,
        "/api/vendors/me",
        Some(&user),
        json!({ "business_name": "Quick Wash", "category": "Laundry", "location": "Surulere", "phone": "0802" }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["status"], "pending");

    let me = get(&app, "/api/auth/me", Some(&user)).await;
    assert_eq!(me.body["roles"], json!(["user", "vendor"]));
}

#[tokio::test]
async fn test_reviews_update_vendor_rating() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let (owner, vendor_id) = signup_vendor(&app, "owner@example.com", "Mama's Kitchen").await;
    let ada = signup_user(&app, "ada@example.com", "Ada").await;
    let tunde = signup_user(&app, "tunde@example.com", "Tunde").await;

    let early = post(&app, "/api/reviews", Some(&ada), json!({ "vendor_id": vendor_id, "rating": 5 })).await;
    assert_eq!(early.status, StatusCode::NOT_FOUND);

    approve(&app, &root, &vendor_id).await;

    let good = post(
        &app,
        "/api/reviews",
        Some(&ada),
        json!({ "vendor_id": vendor_id, "rating": 4, "comment": "Great jollof" }),
    )
    .await;
    assert_eq!(good.status, StatusCode::CREATED, "{}", good.body);
    assert_eq!(good.body["notify_vendor"], false);
    assert_eq!(good.body["review"]["status"], "approved");

    let bad = post(
        &app,
        "/api/reviews/quick",
        Some(&tunde),
        json!({ "vendor_name": "mama", "rating": 1, "comment": "Cold food" }),
    )
    .await;
    assert_eq!(bad.status, StatusCode::CREATED, "{}", bad.body);
    assert_eq!(bad.body["notify_vendor"], true);

    let duplicate = post(&app, "/api/reviews", Some(&ada), json!({ "vendor_id": vendor_id, "rating": 3 })).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let out_of_range = post(&app, "/api/reviews", Some(&root), json!({ "vendor_id": vendor_id, "rating": 6 })).await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let own = post(&app, "/api/reviews", Some(&owner), json!({ "vendor_id": vendor_id, "rating": 5 })).await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);

    let vendor = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(vendor.body["rating"], 2.5);
    assert_eq!(vendor.body["review_count"], 2);

    let dashboard = get(&app, "/api/vendors/me/reviews?rating=low", Some(&owner)).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert_eq!(dashboard.body["low_rated_count"], 1);
    assert_eq!(dashboard.body["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard.body["reviews"][0]["reviewer_name"], "Tunde");

    // Flagging removes the review from the aggregate.
    let review_id = bad.body["review"]["id"].as_str().unwrap();
    let flagged = put(
        &app,
        &format!("/api/admin/reviews/{review_id}/status"),
        Some(&root),
        json!({ "status": "flagged" }),
    )
    .await;
    assert_eq!(flagged.status, StatusCode::OK);

    let vendor = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(vendor.body["rating"], 4.0);
    assert_eq!(vendor.body["review_count"], 1);

    let public_reviews = get(&app, &format!("/api/vendors/{vendor_id}/reviews"), None).await;
    assert_eq!(public_reviews.body.as_array().unwrap().len(), 1);

    let mine = get(&app, "/api/reviews/mine", Some(&ada)).await;
    assert_eq!(mine.body[0]["vendor_name"], "Mama's Kitchen");
}

#[tokio::test]
async fn test_reviews_wait_for_moderation_when_not_auto_approved() {
    let app = test_app_with(|config| config.reviews.auto_approve = false);
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let (_, vendor_id) = signup_vendor(&app, "owner@example.com", "Mama's Kitchen").await;
    approve(&app, &root, &vendor_id).await;
    let ada = signup_user(&app, "ada@example.com", "Ada").await;

    let submitted = post(&app, "/api/reviews", Some(&ada), json!({ "vendor_id": vendor_id, "rating": 4 })).await;
    assert_eq!(submitted.status, StatusCode::CREATED, "{}", submitted.body);
    assert_eq!(submitted.body["review"]["status"], "pending");
    let review_id = submitted.body["review"]["id"].as_str().unwrap().to_string();

    let vendor = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(vendor.body["rating"], Value::Null);
    assert_eq!(vendor.body["review_count"], 0);
    let public_reviews = get(&app, &format!("/api/vendors/{vendor_id}/reviews"), None).await;
    assert_eq!(public_reviews.body, json!([]));

    let stats = get(&app, "/api/admin/stats", Some(&root)).await;
    assert_eq!(stats.body["pending_reviews"], 1);

    let approved = put(
        &app,
        &format!("/api/admin/reviews/{review_id}/status"),
        Some(&root),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(approved.status, StatusCode::OK, "{}", approved.body);

    let vendor = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(vendor.body["rating"], 4.0);
    assert_eq!(vendor.body["review_count"], 1);

    let stats = get(&app, "/api/admin/stats", Some(&root)).await;
    assert_eq!(stats.body["pending_reviews"], 0);
}

#[tokio::test]
async fn test_review_edit_and_delete_permissions() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let (_, vendor_id) = signup_vendor(&app, "owner@example.com", "TechFix").await;
    approve(&app, &root, &vendor_id).await;

    let ada = signup_user(&app, "ada@example.com", "Ada").await;
    let tunde = signup_user(&app, "tunde@example.com", "Tunde").await;

    let created = post(&app, "/api/reviews", Some(&ada), json!({ "vendor_id": vendor_id, "rating": 2 })).await;
    let review_id = created.body["review"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/reviews/{review_id}");

    let hijack = put(&app, &uri, Some(&tunde), json!({ "rating": 1 })).await;
    assert_eq!(hijack.status, StatusCode::FORBIDDEN);

    let edited = put(&app, &uri, Some(&ada), json!({ "rating": 5 })).await;
    assert_eq!(edited.status, StatusCode::OK);
    let vendor = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(vendor.body["rating"], 5.0);

    let denied = send(&app, Method::DELETE, &uri, Some(&tunde), None).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let removed = send(&app, Method::DELETE, &uri, Some(&root), None).await;
    assert_eq!(removed.status, StatusCode::OK);

    let vendor = get(&app, &format!("/api/vendors/{vendor_id}"), None).await;
    assert_eq!(vendor.body["rating"], Value::Null);
    assert_eq!(vendor.body["review_count"], 0);
}

#[tokio::test]
async fn test_deleting_vendor_removes_reviews() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let (_, vendor_id) = signup_vendor(&app, "owner@example.com", "Barber Joe").await;
    approve(&app, &root, &vendor_id).await;

    let ada = signup_user(&app, "ada@example.com", "Ada").await;
    post(&app, "/api/reviews", Some(&ada), json!({ "vendor_id": vendor_id, "rating": 4 })).await;

    let deleted = send(&app, Method::DELETE, &format!("/api/admin/vendors/{vendor_id}"), Some(&root), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["removed_reviews"], 1);

    let reviews = get(&app, "/api/admin/reviews", Some(&root)).await;
    assert_eq!(reviews.body, json!([]));
}

#[tokio::test]
async fn test_poll_voting() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let ada = signup_user(&app, "ada@example.com", "Ada").await;
    let tunde = signup_user(&app, "tunde@example.com", "Tunde").await;

    let too_few = post(&app, "/api/admin/polls", Some(&root), json!({ "title": "Best suya?", "options": ["Yahaya", "  "] })).await;
    assert_eq!(too_few.status, StatusCode::BAD_REQUEST);

    let created = post(
        &app,
        "/api/admin/polls",
        Some(&root),
        json!({ "title": "Best suya?", "options": [" Yahaya ", "Glover Court", ""], "duration_days": 3 }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["options"], json!(["Yahaya", "Glover Court"]));
    assert_eq!(created.body["effective_status"], "active");
    let poll_id = created.body["id"].as_str().unwrap().to_string();

    let anonymous = post(&app, &format!("/api/polls/{poll_id}/vote"), None, json!({ "option_index": 0 })).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let out_of_range = post(&app, &format!("/api/polls/{poll_id}/vote"), Some(&ada), json!({ "option_index": 2 })).await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let voted = post(&app, &format!("/api/polls/{poll_id}/vote"), Some(&ada), json!({ "option_index": 1 })).await;
    assert_eq!(voted.status, StatusCode::OK, "{}", voted.body);
    assert_eq!(voted.body["votes"], json!([0, 1]));

    let twice = post(&app, &format!("/api/polls/{poll_id}/vote"), Some(&ada), json!({ "option_index": 0 })).await;
    assert_eq!(twice.status, StatusCode::CONFLICT);

    let my_vote = get(&app, &format!("/api/polls/{poll_id}/my-vote"), Some(&ada)).await;
    assert_eq!(my_vote.body, json!({ "has_voted": true, "option_index": 1 }));
    let not_yet = get(&app, &format!("/api/polls/{poll_id}/my-vote"), Some(&tunde)).await;
    assert_eq!(not_yet.body["has_voted"], false);

    let results = get(&app, &format!("/api/polls/{poll_id}/results"), None).await;
    assert_eq!(results.body["total_votes"], 1);
    assert_eq!(results.body["results"][1]["percentage"], 100.0);

    let closed = post(&app, &format!("/api/admin/polls/{poll_id}/close"), Some(&root), json!({})).await;
    assert_eq!(closed.body["effective_status"], "closed");

    let late = post(&app, &format!("/api/polls/{poll_id}/vote"), Some(&tunde), json!({ "option_index": 0 })).await;
    assert_eq!(late.status, StatusCode::BAD_REQUEST);

    let active = get(&app, "/api/polls?status=active", None).await;
    assert_eq!(active.body, json!([]));

    let deleted = send(&app, Method::DELETE, &format!("/api/admin/polls/{poll_id}"), Some(&root), None).await;
    assert_eq!(deleted.body["removed_votes"], 1);
    assert_eq!(get(&app, &format!("/api/polls/{poll_id}"), None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;

    for name in ["Tech Repair", "Food"] {
        let created = post(&app, "/api/admin/categories", Some(&root), json!({ "name": name })).await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let duplicate = post(&app, "/api/admin/categories", Some(&root), json!({ "name": "food" })).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let listed = get(&app, "/api/categories", None).await;
    assert_eq!(listed.body[0]["name"], "Food");
    assert_eq!(listed.body[1]["name"], "Tech Repair");

    // Listings that reference a category by id take its name.
    let food_id = listed.body[0]["id"].as_str().unwrap();
    let user = signup_user(&app, "cook@example.com", "Cook").await;
    let created = post(
        &app,
        "/api/vendors/me",
        Some(&user),
        json!({ "business_name": "Amala Spot", "category_id": food_id, "location": "Ibadan", "phone": "0803" }),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["category"], "Food");
    let vendor_id = created.body["id"].as_str().unwrap().to_string();
    approve(&app, &root, &vendor_id).await;

    let clash = put(&app, &format!("/api/admin/categories/{food_id}"), Some(&root), json!({ "name": "tech repair" })).await;
    assert_eq!(clash.status, StatusCode::CONFLICT);

    let renamed = put(&app, &format!("/api/admin/categories/{food_id}"), Some(&root), json!({ "name": "Eateries" })).await;
    assert_eq!(renamed.status, StatusCode::OK, "{}", renamed.body);

    let listing = get(&app, "/api/vendors/me", Some(&user)).await;
    assert_eq!(listing.body["category"], "Eateries");
    let directory = get(&app, "/api/vendors?category=Eateries", None).await;
    assert_eq!(directory.body.as_array().unwrap().len(), 1);
    let stale = get(&app, "/api/vendors?category=Food", None).await;
    assert_eq!(stale.body, json!([]));
}

#[tokio::test]
async fn test_admin_role_management() {
    let app = test_app();
    let root = signup_user(&app, ROOT_EMAIL, "Root").await;
    let ada = signup_user(&app, "ada@example.com", "Ada").await;
    signup_user(&app, "tunde@example.com", "Tunde").await;

    let users = get(&app, "/api/admin/users?search=ada", Some(&root)).await;
    assert_eq!(users.body.as_array().unwrap().len(), 1);
    let ada_id = users.body[0]["id"].as_str().unwrap().to_string();
    let users = get(&app, "/api/admin/users?search=tunde", Some(&root)).await;
    let tunde_id = users.body[0]["id"].as_str().unwrap().to_string();

    let granted = post(&app, &format!("/api/admin/users/{ada_id}/admin"), Some(&root), json!({})).await;
    assert_eq!(granted.status, StatusCode::OK);

    let again = post(&app, &format!("/api/admin/users/{ada_id}/admin"), Some(&root), json!({})).await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    // Plain admins moderate but cannot hand out roles.
    let by_admin = post(&app, &format!("/api/admin/users/{tunde_id}/admin"), Some(&ada), json!({})).await;
    assert_eq!(by_admin.status, StatusCode::FORBIDDEN);
    assert_eq!(get(&app, "/api/admin/stats", Some(&ada)).await.status, StatusCode::OK);

    let not_admin = send(&app, Method::DELETE, &format!("/api/admin/users/{tunde_id}/admin"), Some(&root), None).await;
    assert_eq!(not_admin.status, StatusCode::NOT_FOUND);

    let revoked = send(&app, Method::DELETE, &format!("/api/admin/users/{ada_id}/admin"), Some(&root), None).await;
    assert_eq!(revoked.status, StatusCode::OK);
    assert_eq!(get(&app, "/api/admin/stats", Some(&ada)).await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_update() {
    let app = test_app();
    let user = signup_user(&app, "ada@example.com", "Ada").await;

    let updated = put(
        &app,
        "/api/profile",
        Some(&user),
        json!({ "full_name": "Ada Obi", "whatsapp": "+2348011111111" }),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["full_name"], "Ada Obi");

    let blank = put(&app, "/api/profile", Some(&user), json!({ "full_name": "   " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let fetched = get(&app, "/api/profile", Some(&user)).await;
    assert_eq!(fetched.body["whatsapp"], "+2348011111111");
}
