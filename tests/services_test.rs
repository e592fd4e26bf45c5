mod helpers;

use aitolove::api::{auth, partner, payment, plan, preferences};
use aitolove::matching::PlanTier;
use aitolove::session::{FileStore, NoToken, Session};
use helpers::MockBackend;
use std::sync::Arc;

#[tokio::test]
async fn login_posts_credentials_and_session_reuses_token() {
    let backend = MockBackend::start().await;
    backend.respond(
        "/api/v1/user/login",
        200,
        r#"{"token":"jwt-123","user":{"id":"u1","name":"Ana","email":"ana@exemplo.com","emailVerified":true,"plan":"premium"}}"#,
    );

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("session.json")).unwrap());
    let api = backend.client(store.clone());
    let session = Session::new(store.clone());

    let response = auth::login(&api, "ana@exemplo.com", "senha123").await.unwrap();
    let req = backend.last_request();
    assert_eq!(req.method, "POST");
    assert_eq!(
        req.json(),
        serde_json::json!({ "email": "ana@exemplo.com", "password": "senha123" })
    );
    assert!(req.header("authorization").is_none());

    session.sign_in(&response.token, &response.user).unwrap();
    assert_eq!(
        session.current_user().unwrap().unwrap().plan_tier(),
        PlanTier::Premium
    );

    // Next call carries the stored token, also after reopening the file
    let reopened = Arc::new(FileStore::open(dir.path().join("session.json")).unwrap());
    let api = backend.client(reopened);
    partner::available_partners(&api).await.unwrap();
    assert_eq!(
        backend.last_request().header("authorization"),
        Some("Bearer jwt-123")
    );
}

#[tokio::test]
async fn register_sends_camel_case_body() {
    let backend = MockBackend::start().await;
    backend.respond(
        "/api/v1/user/register",
        200,
        r#"{"success":true,"userId":"new-1"}"#,
    );
    let api = backend.client(Arc::new(NoToken));

    let request = auth::RegisterRequest {
        name: "Ana".into(),
        email: "ana@exemplo.com".into(),
        password: "senha123".into(),
        cpf: "123.456.789-00".into(),
        accepted_terms_and_conditions: true,
        birthdate: "1990-05-01".into(),
    };
    let response = auth::register(&api, &request).await.unwrap();
    assert!(response.success);
    assert_eq!(response.user_id.as_deref(), Some("new-1"));

    let body = backend.last_request().json();
    assert_eq!(body["acceptedTermsAndConditions"], true);
    assert_eq!(body["birthdate"], "1990-05-01");
}

#[tokio::test]
async fn account_paths_embed_tokens() {
    let backend = MockBackend::start().await;
    backend.respond("/api/v1/user/verify-email/tok-1", 200, r#"{"success":true}"#);
    backend.respond(
        "/api/v1/user/reset-password/tok-2",
        400,
        r#"{"message":"Token expirado"}"#,
    );
    let api = backend.client(Arc::new(NoToken));

    assert!(auth::verify_email(&api, "tok-1").await.unwrap().success);
    let req = backend.last_request();
    assert_eq!(req.method, "POST");
    assert!(req.body.is_empty());

    let err = auth::reset_password(&api, "tok-2", "nova").await.unwrap_err();
    assert_eq!(err.to_string(), "Token expirado");
    assert_eq!(backend.last_request().json()["password"], "nova");

    auth::request_password_reset(&api, "ana@exemplo.com").await.unwrap();
    assert_eq!(backend.last_request().path, "/api/v1/user/forgot-password");

    auth::select_plan(&api, "new-1", "vip").await.unwrap();
    assert_eq!(
        backend.last_request().json(),
        serde_json::json!({ "userId": "new-1", "plan": "vip" })
    );
}

#[tokio::test]
async fn partner_listing_honours_success_flag() {
    let backend = MockBackend::start().await;
    let api = backend.client(Arc::new(NoToken));

    backend.respond(
        "/api/v1/partner",
        200,
        r#"{"success":true,"partners":[{"id":"p1","name":"Sofia","isPremium":true,"compatibility":92}]}"#,
    );
    let partners = partner::available_partners(&api).await.unwrap();
    assert_eq!(partners.len(), 1);
    assert!(partners[0].is_premium);

    backend.respond(
        "/api/v1/partner",
        200,
        r#"{"success":false,"partners":[{"id":"p1"}],"message":"indisponível"}"#,
    );
    assert!(partner::available_partners(&api).await.unwrap().is_empty());

    backend.respond(
        "/api/v1/partner/p9",
        200,
        r#"{"success":false,"message":"não encontrado"}"#,
    );
    assert!(partner::partner_by_id(&api, "p9").await.unwrap().is_none());

    backend.respond(
        "/api/v1/partner/p1",
        200,
        r#"{"success":true,"partner":{"id":"p1","name":"Sofia"}}"#,
    );
    let found = partner::partner_by_id(&api, "p1").await.unwrap().unwrap();
    assert_eq!(found.name, "Sofia");
}

#[tokio::test]
async fn chat_history_pages_through_headers() {
    let backend = MockBackend::start().await;
    let api = backend.client(Arc::new(NoToken));

    partner::message_history(&api, "p1", 3, 50).await.unwrap();
    let req = backend.last_request();
    assert_eq!(req.path, "/api/v1/chat/p1/history");
    assert_eq!(req.header("x-page"), Some("3"));
    assert_eq!(req.header("x-limit"), Some("50"));
    assert_eq!(req.header("content-type"), Some("application/json"));

    partner::send_message(&api, "p1", "Olá!").await.unwrap();
    let req = backend.last_request();
    assert_eq!(req.path, "/api/v1/chat/p1/message");
    assert_eq!(req.json()["message"], "Olá!");

    backend.respond("/api/v1/partner/p1/compatibility", 200, r#"{"score":87}"#);
    assert_eq!(partner::remote_compatibility(&api, "p1").await.unwrap(), 87.0);
}

#[tokio::test]
async fn plan_listing_falls_back_to_defaults() {
    let backend = MockBackend::start().await;
    let api = backend.client(Arc::new(NoToken));

    backend.respond("/api/v1/plan", 503, "down");
    let plans = plan::active_plans_or_default(&api).await;
    assert_eq!(plans, plan::default_plans());

    backend.respond("/api/v1/plan", 200, "[]");
    assert_eq!(plan::active_plans_or_default(&api).await.len(), 3);

    backend.respond(
        "/api/v1/plan",
        200,
        r#"[{"id":"x","createdAt":"2025-01-01","name":"Ouro","price":99.0}]"#,
    );
    let plans = plan::active_plans_or_default(&api).await;
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].tier(), PlanTier::Unset);

    plan::select_plan(&api, "premium_default").await.unwrap();
    assert_eq!(
        backend.last_request().json(),
        serde_json::json!({ "planId": "premium_default" })
    );
}

#[tokio::test]
async fn payment_endpoints() {
    let backend = MockBackend::start().await;
    let api = backend.client(Arc::new(NoToken));

    backend.respond(
        "/api/v1/payment",
        200,
        r#"{"success":true,"transactionId":"t1","status":"pending"}"#,
    );
    let created = payment::create_payment(&api, "u1", "vip_default").await.unwrap();
    assert_eq!(created.transaction_id.as_deref(), Some("t1"));
    assert_eq!(backend.last_request().json()["planId"], "vip_default");

    payment::payment_status(&api, "t1").await.unwrap();
    assert_eq!(backend.last_request().path, "/api/v1/payment/t1");

    payment::create_payment_session(&api, "vip_default").await.unwrap();
    assert_eq!(backend.last_request().path, "/api/v1/payment/create-session");

    payment::payment_session_status(&api, "s1").await.unwrap();
    let req = backend.last_request();
    assert_eq!(req.path, "/api/v1/payment/status/s1");
    assert_eq!(req.method, "GET");

    payment::payment_history(&api).await.unwrap();
    assert_eq!(backend.last_request().path, "/api/v1/payment/history");
}

#[tokio::test]
async fn preference_endpoints_use_expected_methods() {
    let backend = MockBackend::start().await;
    let api = backend.client(Arc::new(NoToken));

    backend.respond(
        "/api/v1/preferences",
        200,
        r#"{"id":"pr1","preferences":[{"name":"tone","category":"chat","value":"formal"}]}"#,
    );
    let mut prefs = preferences::Preference::default();
    prefs.set_value("chat", "tone", "formal");
    let saved = preferences::set_user_preferences(&api, &prefs).await.unwrap();
    assert_eq!(saved.value_of("chat", "tone"), Some("formal"));
    assert_eq!(backend.last_request().method, "POST");

    preferences::update_user_preferences(&api, &serde_json::json!({ "tone": "casual" }))
        .await
        .unwrap();
    let req = backend.last_request();
    assert_eq!(req.method, "PATCH");
    assert_eq!(req.path, "/api/v1/user/preferences");

    preferences::reset_user_preferences(&api).await.unwrap();
    let req = backend.last_request();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/v1/user/preferences/reset");

    preferences::user_preferences(&api).await.unwrap();
    assert_eq!(backend.last_request().method, "GET");
}
