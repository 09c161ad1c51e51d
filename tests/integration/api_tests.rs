//! API integration tests
//!
//! These drive a running server with an empty or shared database.
//! Record names carry a random suffix so runs do not collide.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique(name: &str) -> String {
    format!("{} {}", name, uuid::Uuid::new_v4().simple())
}

async fn post_json(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn delete(client: &Client, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn create_author(client: &Client, first: &str, last: &str) -> i64 {
    let (status, body) = post_json(
        client,
        "/admin/authors",
        json!({ "first_name": first, "last_name": last }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("No author id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let (status, body) = get_json(&client, "/health").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let (status, body) = get_json(&client, "/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_language_names_unique_regardless_of_case() {
    let client = Client::new();
    let name = unique("Klingon");

    let (status, body) = post_json(&client, "/admin/languages", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = post_json(
        &client,
        "/admin/languages",
        json!({ "name": name.to_uppercase() }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");
    assert_eq!(body["message"], "Language already exists (case-insensitive match)");

    assert_eq!(delete(&client, &format!("/admin/languages/{}", id)).await, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_removes_books_and_copies() {
    let client = Client::new();
    let author_id = create_author(&client, "Cascade", &unique("Author")).await;

    let (status, book) = post_json(
        &client,
        "/admin/books",
        json!({
            "title": "Doomed",
            "author": author_id,
            "instances": [{ "imprint": "First printing", "status": "available" }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = book["id"].as_i64().unwrap();
    let instance_id = book["instances"][0]["id"].as_str().unwrap().to_string();

    assert_eq!(delete(&client, &format!("/admin/authors/{}", author_id)).await, StatusCode::NO_CONTENT);

    let (status, _) = get_json(&client, &format!("/catalog/books/{}", book_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get_json(&client, &format!("/admin/book-instances/{}", instance_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_deleting_language_keeps_books() {
    let client = Client::new();

    let (_, language) = post_json(&client, "/admin/languages", json!({ "name": unique("Esperanto") })).await;
    let language_id = language["id"].as_i64().unwrap();

    let (status, book) = post_json(
        &client,
        "/admin/books",
        json!({ "title": "La Bona Libro", "language": language_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = book["id"].as_i64().unwrap();
    assert_eq!(book["language"]["id"], language_id);

    assert_eq!(delete(&client, &format!("/admin/languages/{}", language_id)).await, StatusCode::NO_CONTENT);

    let (status, book) = get_json(&client, &format!("/catalog/books/{}", book_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(book["language"].is_null());

    delete(&client, &format!("/admin/books/{}", book_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_summary_counts_follow_the_catalog() {
    let client = Client::builder().cookie_store(true).build().unwrap();

    let (_, before) = get_json(&client, "/catalog").await;

    let author_id = create_author(&client, "J.R.R.", &unique("Tolkien")).await;
    let (status, book) = post_json(
        &client,
        "/admin/books",
        json!({
            "title": "The Hobbit",
            "author": author_id,
            "isbn": "9780261102217",
            "instances": [
                { "imprint": "Allen & Unwin, 1937", "status": "available" },
                { "imprint": "Allen & Unwin, 1951", "status": "on_loan", "due_back": "2020-01-01" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["instances"].as_array().unwrap().len(), 2);
    let book_id = book["id"].as_i64().unwrap();

    // The new book shows up in the public book list
    let (status, first) = get_json(&client, "/catalog/books?page=1").await;
    assert_eq!(status, StatusCode::OK);
    let num_pages = first["num_pages"].as_i64().unwrap();
    let mut listed = false;
    for page in (1..=num_pages).rev() {
        let (status, body) = get_json(&client, &format!("/catalog/books?page={}", page)).await;
        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        if let Some(item) = items.iter().find(|b| b["id"].as_i64() == Some(book_id)) {
            assert_eq!(item["title"], "The Hobbit");
            assert_eq!(item["author_id"].as_i64(), Some(author_id));
            listed = true;
            break;
        }
    }
    assert!(listed, "book {} missing from /catalog/books", book_id);

    let (status, after) = get_json(&client, "/catalog").await;
    assert_eq!(status, StatusCode::OK);

    let delta = |key: &str| after[key].as_i64().unwrap() - before[key].as_i64().unwrap();
    assert_eq!(delta("num_books"), 1);
    assert_eq!(delta("num_instances"), 2);
    assert_eq!(delta("num_instances_available"), 1);
    assert_eq!(delta("num_authors"), 1);
    assert_eq!(delta("num_visits"), 1);

    // Copies come back earliest due first, the overdue one flagged
    let on_loan = &book["instances"][0];
    assert_eq!(on_loan["status"], "on_loan");
    assert_eq!(on_loan["is_overdue"], true);

    let (status, author) = get_json(&client, &format!("/catalog/authors/{}", author_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["books"][0]["title"], "The Hobbit");

    delete(&client, &format!("/admin/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_visit_counter_is_per_session() {
    let client = Client::builder().cookie_store(true).build().unwrap();

    let (_, first) = get_json(&client, "/catalog").await;
    let (_, second) = get_json(&client, "/catalog").await;
    assert_eq!(first["num_visits"], 1);
    assert_eq!(second["num_visits"], 2);

    // No cookie jar: every request is a new session
    let stranger = Client::new();
    let (_, other) = get_json(&stranger, "/catalog").await;
    assert_eq!(other["num_visits"], 1);
}

#[tokio::test]
#[ignore]
async fn test_list_pages() {
    let client = Client::new();

    let (status, body) = get_json(&client, "/catalog/books?page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().len() <= 10);

    let (status, _) = get_json(&client, "/catalog/books?page=0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&client, "/catalog/authors?page=100000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_missing_records_are_not_found() {
    let client = Client::new();

    let (status, body) = get_json(&client, "/catalog/books/2147483647").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5);

    let (status, _) = get_json(&client, "/catalog/authors/2147483647").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(delete(&client, "/admin/genres/2147483647").await, StatusCode::NOT_FOUND);

    let response = client
        .put(format!("{}/admin/genres/2147483647", BASE_URL))
        .json(&json!({ "name": "Nothing" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_invalid_author_dates_rejected() {
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        "/admin/authors",
        json!({
            "first_name": "Backwards",
            "last_name": "Time",
            "date_of_birth": "1900-01-01",
            "date_of_death": "1800-01-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "date_of_death");
}

#[tokio::test]
#[ignore]
async fn test_unknown_author_reference_rejected() {
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        "/admin/books",
        json!({ "title": "Orphan", "author": 2147483647 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "author");
}

#[tokio::test]
#[ignore]
async fn test_inline_book_storage_error_names_its_row() {
    let client = Client::new();
    let author_id = create_author(&client, "Row", &unique("Numbered")).await;

    let response = client
        .put(format!("{}/admin/authors/{}", BASE_URL, author_id))
        .json(&json!({
            "first_name": "Row",
            "last_name": "Numbered",
            "books": [
                { "title": "Fine" },
                { "title": "Unknown language", "language": 2147483647 }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "books[1].language");

    // The whole save rolled back
    let (_, author) = get_json(&client, &format!("/catalog/authors/{}", author_id)).await;
    assert!(author["books"].as_array().unwrap().is_empty());

    delete(&client, &format!("/admin/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_inline_books_on_author() {
    let client = Client::new();
    let author_id = create_author(&client, "Inline", &unique("Writer")).await;

    let response = client
        .put(format!("{}/admin/authors/{}", BASE_URL, author_id))
        .json(&json!({
            "first_name": "Inline",
            "last_name": "Writer",
            "books": [{ "title": "One" }, { "title": "Two" }]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let author: Value = response.json().await.unwrap();
    let books = author["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    let first_id = books[0]["id"].as_i64().unwrap();
    let second_id = books[1]["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/admin/authors/{}", BASE_URL, author_id))
        .json(&json!({
            "first_name": "Inline",
            "last_name": "Writer",
            "books": [
                { "id": first_id, "title": "One, revised" },
                { "id": second_id, "delete": true }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let author: Value = response.json().await.unwrap();
    let books = author["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "One, revised");

    delete(&client, &format!("/admin/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_inline_row_of_another_parent_rejected() {
    let client = Client::new();
    let (_, book_a) = post_json(&client, "/admin/books", json!({ "title": unique("A") })).await;
    let (_, book_b) = post_json(
        &client,
        "/admin/books",
        json!({ "title": unique("B"), "instances": [{ "imprint": "B print" }] }),
    )
    .await;
    let foreign_copy = book_b["instances"][0]["id"].as_str().unwrap().to_string();

    let response = client
        .put(format!("{}/admin/books/{}", BASE_URL, book_a["id"]))
        .json(&json!({
            "title": book_a["title"],
            "instances": [{ "id": foreign_copy, "imprint": "stolen" }]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing of the failed save is kept
    let (_, copy) = get_json(&client, &format!("/admin/book-instances/{}", foreign_copy)).await;
    assert_eq!(copy["imprint"], "B print");

    delete(&client, &format!("/admin/books/{}", book_a["id"])).await;
    delete(&client, &format!("/admin/books/{}", book_b["id"])).await;
}

#[tokio::test]
#[ignore]
async fn test_book_instance_defaults_and_filters() {
    let client = Client::new();
    let (_, book) = post_json(&client, "/admin/books", json!({ "title": unique("Filtered") })).await;
    let book_id = book["id"].as_i64().unwrap();

    let (status, copy) = post_json(
        &client,
        "/admin/book-instances",
        json!({ "book": book_id, "imprint": "Fresh" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["status"], "maintenance");
    assert!(copy["id"].as_str().is_some());
    let copy_id = copy["id"].as_str().unwrap().to_string();

    let (status, page) = get_json(&client, "/admin/book-instances?status=maintenance&due_back=no_date").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|row| row["id"] == copy_id.as_str()));

    let (_, page) = get_json(&client, "/admin/book-instances?due_back=has_date").await;
    assert!(!page["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|row| row["id"] == copy_id.as_str()));

    let (status, body) = post_json(
        &client,
        "/admin/book-instances",
        json!({ "id": copy_id, "book": book_id, "imprint": "Duplicate" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");

    delete(&client, &format!("/admin/books/{}", book_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_layouts() {
    let client = Client::new();

    let (status, layout) = get_json(&client, "/admin/layouts/book-instances").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(layout["list_filter"], json!(["status", "due_back"]));
    assert_eq!(layout["fieldsets"][1]["name"], "Availability");

    let (status, _) = get_json(&client, "/admin/layouts/loans").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
