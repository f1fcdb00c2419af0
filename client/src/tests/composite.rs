use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, ResponseTemplate};

use crate::tests::{ana_row, TestContext};
use crate::{avatar_object_path, ApiError, AvatarUpload};

fn png_avatar() -> AvatarUpload {
    AvatarUpload {
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
        content_type: "image/png".to_string(),
    }
}

fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
}

#[test]
fn test_avatar_object_path_is_keyed_by_millis() {
    assert_eq!(avatar_object_path(1717000000000), "public/1717000000000");
}

#[tokio::test]
async fn test_create_inserts_the_derived_public_url() {
    let ctx = TestContext::new().await;

    // The service reports where the object actually landed; the
    // record must reference that location, not a locally guessed one.
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/contact-images/public/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "contact-images/public/424242"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([ana_row()])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let contact = ctx
        .supabase
        .create_contact("Ana", june_first(), png_avatar())
        .await
        .unwrap();
    assert_eq!(contact.name, "Ana");

    let insert = ctx
        .requests()
        .await
        .into_iter()
        .find(|r| r.url.path() == "/rest/v1/contacts")
        .expect("insert request was sent");
    let body: serde_json::Value = serde_json::from_slice(&insert.body).unwrap();
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["last_contact_date"], "2023-06-01");
    assert_eq!(
        body["image_url"],
        format!(
            "{}/storage/v1/object/public/contact-images/public/424242",
            ctx.server.uri()
        )
    );
}

#[tokio::test]
async fn test_create_removes_upload_when_insert_fails() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/contact-images/public/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "contact-images/public/424242"
        })))
        .mount(&ctx.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "XX000",
            "message": "insert blew up"
        })))
        .mount(&ctx.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/contact-images/public/424242"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .supabase
        .create_contact("Ana", june_first(), png_avatar())
        .await
        .unwrap_err();
    match err {
        ApiError::Service { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "insert blew up");
        }
        other => panic!("expected the insert error, got {other:?}"),
    }

    ctx.server.verify().await;
}

#[tokio::test]
async fn test_create_failed_cleanup_still_returns_insert_error() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/contact-images/public/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "contact-images/public/424242"
        })))
        .mount(&ctx.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "insert blew up"
        })))
        .mount(&ctx.server)
        .await;

    // Cleanup fails too; the caller still sees the insert error.
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/contact-images/public/424242"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .supabase
        .create_contact("Ana", june_first(), png_avatar())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("insert blew up"), "got {err}");
}

#[tokio::test]
async fn test_create_skips_insert_when_upload_fails() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/contact-images/public/\d+$"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "Unauthorized",
            "message": "bucket not writable"
        })))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .supabase
        .create_contact("Ana", june_first(), png_avatar())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));

    let requests = ctx.requests().await;
    assert!(
        requests.iter().all(|r| r.url.path() != "/rest/v1/contacts"),
        "no record write may happen after a failed upload"
    );
}

#[tokio::test]
async fn test_update_without_replacement_keeps_existing_url() {
    let ctx = TestContext::new().await;
    let id = Uuid::parse_str("11111111-1111-4111-8111-111111111111").unwrap();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ana_row()])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.supabase
        .update_contact(
            id,
            "Ana",
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            "https://cdn.example/ana.png",
            None,
        )
        .await
        .unwrap();

    let requests = ctx.requests().await;
    assert_eq!(requests.len(), 1, "only the record write happens");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["image_url"], "https://cdn.example/ana.png");
    assert_eq!(body["last_contact_date"], "2024-02-10");
}

#[tokio::test]
async fn test_update_with_replacement_sends_new_url_and_keeps_old_object() {
    let ctx = TestContext::new().await;
    let id = Uuid::parse_str("11111111-1111-4111-8111-111111111111").unwrap();

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/contact-images/public/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "contact-images/public/777"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ana_row()])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.supabase
        .update_contact(
            id,
            "Ana",
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            "https://cdn.example/prior.png",
            Some(png_avatar()),
        )
        .await
        .unwrap();

    let requests = ctx.requests().await;
    let patch = requests
        .iter()
        .find(|r| r.url.path() == "/rest/v1/contacts")
        .expect("record write was sent");
    let body: serde_json::Value = serde_json::from_slice(&patch.body).unwrap();
    assert_eq!(
        body["image_url"],
        format!(
            "{}/storage/v1/object/public/contact-images/public/777",
            ctx.server.uri()
        )
    );

    // The replaced object stays in the bucket; only uploads from
    // failed writes are removed.
    assert!(requests.iter().all(|r| r.method.to_string() != "DELETE"));
}

#[tokio::test]
async fn test_update_replacement_failure_discards_new_upload() {
    let ctx = TestContext::new().await;
    let id = Uuid::parse_str("11111111-1111-4111-8111-111111111111").unwrap();

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/contact-images/public/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "contact-images/public/777"
        })))
        .mount(&ctx.server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "row is gone"
        })))
        .mount(&ctx.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/contact-images/public/777"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .supabase
        .update_contact(
            id,
            "Ana",
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            "https://cdn.example/prior.png",
            Some(png_avatar()),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));

    ctx.server.verify().await;
}
