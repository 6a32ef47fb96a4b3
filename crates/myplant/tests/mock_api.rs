//! Mock API tests for the myplant client.
//!
//! These tests use wiremock to stand in for the MyPlant server and exercise
//! the session lifecycle without network access or real accounts.

use chrono::{TimeZone, Utc};
use myplant::{
    ActivitySignup, BaseUrl, Credential, CredentialStore, Error, FileBackend, Method,
    MyPlantClient, PostWudjeRequest, RemoveRegistration,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "pb_auth=ABC123; Expires=Wed, 01 Jan 2030 00:00:00 GMT;";

fn mock_base_url(server: &MockServer) -> BaseUrl {
    BaseUrl::new(server.uri()).unwrap()
}

fn client(server: &MockServer) -> MyPlantClient {
    MyPlantClient::with_store(mock_base_url(server), CredentialStore::in_memory()).unwrap()
}

/// A client whose store already holds `token`.
fn logged_in_client(server: &MockServer, token: &str) -> MyPlantClient {
    let store = CredentialStore::in_memory();
    store.save(&Credential::new(token, None), None);
    MyPlantClient::with_store(mock_base_url(server), store).unwrap()
}

fn user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "name": "Alice",
        "email": "alice@example.com",
        "username": "alice",
        "isAdmin": false,
        "registrationDate": "2024-09-01 12:00:00.000Z"
    })
}

fn activity_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Borrel",
        "description": "Friday drinks",
        "datetime": "2026-10-23 17:00:00.000Z",
        "committee": "AcCie",
        "totalSignUps": 3,
        "userStatus": { "signedUp": false, "onWaitlist": false }
    })
}

// ============================================================================
// Login / Logout
// ============================================================================

#[tokio::test]
async fn test_login_stores_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "hunter2"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", SESSION_COOKIE)
                .set_body_json(json!({ "success": true, "user": user_json() })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let response = client.login("alice@example.com", "hunter2").await.unwrap();

    assert_eq!(response.data.success, Some(true));
    assert_eq!(response.header.as_deref(), Some(SESSION_COOKIE));
    assert_eq!(response.credential.unwrap().token(), "ABC123");

    let session = client.session().unwrap();
    assert_eq!(session.token(), "ABC123");
    assert_eq!(
        session.expires_at(),
        Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(client.user().unwrap().username, "alice");
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.login("alice@example.com", "wrong").await.unwrap_err();

    match err {
        Error::Authentication { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid credentials");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(client.session().is_none());
}

#[tokio::test]
async fn test_login_without_cookie_stores_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "theme=dark; Path=/")
                .set_body_json(json!({ "success": true })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let response = client.login("alice@example.com", "hunter2").await.unwrap();

    assert_eq!(response.header.as_deref(), Some("theme=dark; Path=/"));
    assert!(client.session().is_none());
    assert!(client.user().is_none());
}

#[tokio::test]
async fn test_relogin_without_cookie_reports_no_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "OLD");
    let response = client.login("bob@example.com", "hunter2").await.unwrap();

    // The response says no session was issued even though one is stored.
    assert!(response.credential.is_none());
    assert_eq!(client.session().unwrap().token(), "OLD");
}

#[tokio::test]
async fn test_login_with_unexpected_user_shape_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", SESSION_COOKIE)
                .set_body_json(json!({ "user": { "id": "u1" } })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    client.login("alice@example.com", "hunter2").await.unwrap();

    assert_eq!(client.session().unwrap().token(), "ABC123");
    assert!(client.user().is_none());
}

#[tokio::test]
async fn test_logout_clears_session_without_network() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "ABC123");
    client.logout();

    assert!(client.session().is_none());
    assert!(client.user().is_none());
}

// ============================================================================
// Authentication Precheck
// ============================================================================

#[tokio::test]
async fn test_request_without_session_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);

    assert!(matches!(
        client.get_activities().await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(
        client.post_wudje(&PostWudjeRequest::new("hoi")).await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(
        client
            .authenticated_request(Method::GET, "/wudjes", None)
            .await,
        Err(Error::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_login_path_is_exempt_from_precheck() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let body = client
        .authenticated_request(Method::POST, "/login", Some(&json!({})))
        .await
        .unwrap();
    assert_eq!(body, json!({ "success": false }));
}

// ============================================================================
// Authenticated Requests
// ============================================================================

#[tokio::test]
async fn test_session_cookie_from_login_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", SESSION_COOKIE)
                .set_body_json(json!({ "success": true })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .and(header("cookie", "pb_auth=ABC123"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [activity_json("a1"), activity_json("a2")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.login("alice@example.com", "hunter2").await.unwrap();

    let activities = client.get_activities().await.unwrap();
    let ids: Vec<_> = activities.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a1", "a2"]);
}

#[tokio::test]
async fn test_get_wudjes_unwraps_items() {
    let server = MockServer::start().await;

    let items = json!([
        {
            "id": "w1",
            "message": "Goedemorgen",
            "created": "2026-10-19 08:00:00.000Z",
            "author": { "id": "u1", "name": "Alice", "username": "alice" }
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/wudjes"))
        .and(header("cookie", "pb_auth=tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "page": 1
        })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    let wudjes = client.get_wudjes().await.unwrap();

    assert_eq!(wudjes.len(), 1);
    assert_eq!(wudjes[0].message, "Goedemorgen");
    assert_eq!(wudjes[0].author.username, "alice");
}

#[tokio::test]
async fn test_get_activity_unwraps_activity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities/a7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "activity": activity_json("a7") })),
        )
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    let activity = client.get_activity("a7").await.unwrap();
    assert_eq!(activity.id, "a7");
    assert_eq!(activity.total_sign_ups, 3);
}

#[tokio::test]
async fn test_missing_envelope_field_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    assert!(matches!(
        client.get_activities().await,
        Err(Error::Decode { .. })
    ));
}

#[tokio::test]
async fn test_join_activity_posts_signup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/activities/a1"))
        .and(body_json(json!({
            "type": "waitlist",
            "answers": { "q1": "vegetarian" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    let signup = ActivitySignup::waitlist().with_answer("q1", "vegetarian");
    let response = client.join_activity("a1", &signup).await.unwrap();
    assert_eq!(response, json!({ "success": true }));
}

#[tokio::test]
async fn test_remove_activity_uses_registration_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/activities/s9"))
        .and(body_json(json!({ "type": "signout", "id": "s9" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    let response = client
        .remove_activity(&RemoveRegistration::new("s9"))
        .await
        .unwrap();
    assert!(response.is_null());
}

#[tokio::test]
async fn test_post_wudje() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wudjes"))
        .and(body_json(json!({ "message": "Hallo!" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "w2" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    let response = client
        .post_wudje(&PostWudjeRequest::new("Hallo!"))
        .await
        .unwrap();
    assert_eq!(response["id"], "w2");
}

#[tokio::test]
async fn test_non_success_status_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activities/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    let err = client.get_activity("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "request failed: 404, Not Found");
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wudjes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "tok");
    assert!(matches!(
        client
            .authenticated_request(Method::GET, "/wudjes", None)
            .await,
        Err(Error::Decode { .. })
    ));
}

// ============================================================================
// Credential Refresh
// ============================================================================

#[tokio::test]
async fn test_response_cookie_replaces_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wudjes"))
        .and(header("cookie", "pb_auth=old"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "pb_auth=new; Expires=Thu, 01 Jan 2032 00:00:00 GMT;")
                .set_body_json(json!({ "items": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/activities"))
        .and(header("cookie", "pb_auth=new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "old");
    client.get_wudjes().await.unwrap();

    let session = client.session().unwrap();
    assert_eq!(session.token(), "new");
    assert_eq!(
        session.expires_at(),
        Some(Utc.with_ymd_and_hms(2032, 1, 1, 0, 0, 0).unwrap())
    );

    client.get_activities().await.unwrap();
}

#[tokio::test]
async fn test_error_response_cookie_still_refreshes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wudjes"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("set-cookie", "pb_auth=rotated;")
                .set_body_string("boom"),
        )
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "old");
    let err = client.get_wudjes().await.unwrap_err();

    assert!(matches!(err, Error::Request { status: 500, .. }));
    assert_eq!(client.session().unwrap().token(), "rotated");
}

#[tokio::test]
async fn test_response_without_session_cookie_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wudjes"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "theme=dark")
                .set_body_json(json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let client = logged_in_client(&server, "keep");
    client.get_wudjes().await.unwrap();
    assert_eq!(client.session().unwrap().token(), "keep");
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_session_survives_client_restart_with_file_store() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let credential_path = dir.path().join("credential");

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", SESSION_COOKIE)
                .set_body_json(json!({ "success": true, "user": user_json() })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wudjes"))
        .and(header("cookie", "pb_auth=ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let file_store = || {
        let backend = FileBackend::probe(&credential_path).unwrap();
        CredentialStore::with_backends(vec![Box::new(backend)])
    };

    let first = MyPlantClient::with_store(mock_base_url(&server), file_store()).unwrap();
    first.login("alice@example.com", "hunter2").await.unwrap();
    assert_eq!(
        std::fs::read_to_string(&credential_path).unwrap(),
        "pb_auth=ABC123; Expires=Tue, 01 Jan 2030 00:00:00 GMT;"
    );

    let second = MyPlantClient::with_store(mock_base_url(&server), file_store()).unwrap();
    assert_eq!(second.user().unwrap().email, "alice@example.com");
    second.get_wudjes().await.unwrap();

    second.logout();
    assert!(!credential_path.exists());

    let third = MyPlantClient::with_store(mock_base_url(&server), file_store()).unwrap();
    assert!(third.session().is_none());
}
