// tests/pipeline.rs
//
// O pipeline contra um backend axum de verdade: token, envelope, normalização
// de erros e o tratamento de 401.

mod common;

use common::{app_at, owner_session, TestServer};
use serde_json::{json, Value};
use std::time::Duration;

use gestock_client::{
    common::error::messages,
    models::tenancy::{Business, Warehouse},
    navigation::{Navigator, Route},
    ErrorKind, RequestConfig,
};

#[tokio::test]
async fn bearer_token_is_sent_verbatim() {
    let server = TestServer::start().await;
    server
        .backend
        .respond("GET", "/gestock/warehouses", 200, r#"[{"id":1,"name":"Bodega Norte"}]"#);

    let (app, _) = app_at(&server.base_url(), "/almacenes");
    app.session.save(&owner_session(3)).unwrap();

    let warehouses: Vec<Warehouse> = app.warehouse_service.get_all().await.unwrap();
    assert_eq!(warehouses.len(), 1);

    let requests = server.backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer eyJhbGciOiJIUzI1NiJ9.owner.sig")
    );

    server.stop().await;
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/businesses", 200, "[]");

    let (app, _) = app_at(&server.base_url(), "/");
    let businesses: Vec<Business> = app.business_service.get_all().await.unwrap();
    assert!(businesses.is_empty());

    let requests = server.backend.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].authorization.is_none());

    server.stop().await;
}

#[tokio::test]
async fn envelope_is_stripped_before_reaching_the_caller() {
    let server = TestServer::start().await;
    server.backend.respond(
        "GET",
        "/gestock/businesses/7",
        200,
        r#"{"data":{"id":7,"name":"Bodega Norte"}}"#,
    );

    let (app, _) = app_at(&server.base_url(), "/");
    let business = app.business_service.get_by_id(7).await.unwrap();
    assert_eq!(business, Business { id: 7, name: "Bodega Norte".into() });

    server.stop().await;
}

#[tokio::test]
async fn unprocessable_entity_keeps_backend_message_and_field_errors() {
    let server = TestServer::start().await;
    server.backend.respond(
        "POST",
        "/gestock/warehouses",
        422,
        r#"{"message":"Nombre duplicado","errors":{"name":["ya existe"]}}"#,
    );

    let (app, _) = app_at(&server.base_url(), "/almacenes");
    app.session.save(&owner_session(3)).unwrap();

    let payload = gestock_client::models::tenancy::CreateWarehousePayload {
        name: "Bodega Norte".into(),
        address: None,
        business_id: None,
    };
    let err = app.warehouse_service.create(&payload).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::UnprocessableEntity);
    assert_eq!(err.status, 422);
    assert_eq!(err.message, "Nombre duplicado");
    assert_eq!(err.errors, Some(json!({ "name": ["ya existe"] })));

    // A sessão não é tocada por erros que não são 401
    assert!(app.session.is_authenticated());

    server.stop().await;
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_once() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/warehouses/by-business/3", 401, "");

    let (app, navigator) = app_at(&server.base_url(), "/almacenes");
    app.session.save(&owner_session(3)).unwrap();
    let mut changes = app.session.subscribe();

    let err = app.warehouse_service.get_by_business_id(Some(3)).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.status, 401);
    assert_eq!(err.message, messages::SESSION_EXPIRED);

    assert!(app.session.token().is_none());
    assert!(app.session.current_user().is_none());
    assert!(app.session.business_id().is_none());
    assert!(changes.has_changed().unwrap());
    assert!(changes.borrow_and_update().is_none());

    assert_eq!(navigator.history(), vec![Route::Login]);
    assert!(navigator.current_route().is_login());

    // Segundo 401 já na tela de login: nenhum redirecionamento novo
    let again = app.warehouse_service.get_by_business_id(Some(3)).await.unwrap_err();
    assert_eq!(again.status, 401);
    assert_eq!(navigator.history().len(), 1);

    server.stop().await;
}

#[tokio::test]
async fn unauthorized_on_login_route_does_not_navigate() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/businesses", 401, "");

    let (app, navigator) = app_at(&server.base_url(), "/auth/login?next=%2Falmacenes");
    app.session.save(&owner_session(3)).unwrap();

    let err = app.business_service.get_all().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(app.session.token().is_none());
    assert!(navigator.history().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Porta 1: nada escuta ali
    let (app, navigator) = app_at("http://127.0.0.1:1/gestock", "/almacenes");
    app.session.save(&owner_session(3)).unwrap();

    let err = app.business_service.get_all().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, 0);
    assert_eq!(err.message, messages::NETWORK);
    assert_eq!(err.code.as_deref(), Some("NETWORK_ERROR"));

    // Falha de rede não derruba a sessão
    assert!(app.session.is_authenticated());
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn silent_backend_times_out_as_network_error() {
    // Aceita a conexão e nunca responde
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let (app, navigator) = app_at(&format!("http://{addr}/gestock"), "/almacenes");
    app.session.save(&owner_session(3)).unwrap();

    let config = RequestConfig {
        timeout: Some(Duration::from_millis(200)),
        ..RequestConfig::default()
    };
    let err = app.api.get::<Value>("/businesses", &config).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, 0);
    assert_eq!(err.message, messages::NETWORK);
    assert_eq!(err.code.as_deref(), Some("TIMEOUT"));

    assert!(app.session.is_authenticated());
    assert!(navigator.history().is_empty());

    silent.abort();
}

#[tokio::test]
async fn fixed_messages_ignore_backend_json_message() {
    let server = TestServer::start().await;
    server.backend.respond(
        "GET",
        "/gestock/businesses",
        403,
        r#"{"message":"Access Denied","code":"RBAC_DENIED"}"#,
    );
    server.backend.respond("GET", "/gestock/businesses/9", 500, r#"{"message":"NullPointerException"}"#);

    let (app, navigator) = app_at(&server.base_url(), "/");

    let forbidden = app.business_service.get_all().await.unwrap_err();
    assert_eq!(forbidden.kind, ErrorKind::Authorization);
    assert_eq!(forbidden.message, messages::FORBIDDEN);
    assert_eq!(forbidden.code.as_deref(), Some("RBAC_DENIED"));

    let server_error = app.business_service.get_by_id(9).await.unwrap_err();
    assert_eq!(server_error.kind, ErrorKind::Server);
    assert_eq!(server_error.message, messages::SERVER_ERROR);

    // Rota sem roteiro: o backend falso responde 404 vazio
    let missing = app.business_service.get_by_id(404).await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);
    assert_eq!(missing.message, messages::NOT_FOUND);

    assert!(navigator.history().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn plain_text_body_overrides_the_message() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/businesses/2", 403, "Negócio de outro tenant");

    let (app, _) = app_at(&server.base_url(), "/");
    let err = app.business_service.get_by_id(2).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "Negócio de outro tenant");

    server.stop().await;
}

#[tokio::test]
async fn unmapped_status_uses_backend_message_or_default() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/businesses/1", 409, r#"{"message":"Conflito de versão"}"#);
    server.backend.respond("GET", "/gestock/businesses/2", 502, "{}");

    let (app, _) = app_at(&server.base_url(), "/");

    let conflict = app.business_service.get_by_id(1).await.unwrap_err();
    assert_eq!(conflict.kind, ErrorKind::Unknown);
    assert_eq!(conflict.status, 409);
    assert_eq!(conflict.message, "Conflito de versão");

    let bad_gateway = app.business_service.get_by_id(2).await.unwrap_err();
    assert_eq!(bad_gateway.status, 502);
    assert_eq!(bad_gateway.message, messages::COMMUNICATION);

    server.stop().await;
}

#[tokio::test]
async fn success_body_in_the_wrong_shape_is_an_invalid_response() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/businesses/5", 200, r#"{"unexpected":true}"#);

    let (app, _) = app_at(&server.base_url(), "/");
    let err = app.business_service.get_by_id(5).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.status, 200);
    assert_eq!(err.message, messages::INVALID_RESPONSE);

    server.stop().await;
}

#[tokio::test]
async fn request_config_adds_query_and_headers() {
    let server = TestServer::start().await;
    server.backend.respond("GET", "/gestock/products/by-business/3", 200, "[]");

    let (app, _) = app_at(&server.base_url(), "/");
    let config = RequestConfig::default().query("page", 2).header("X-Trace", "abc");

    let products: Value = app.api.get("/products/by-business/3", &config).await.unwrap();
    assert_eq!(products, json!([]));

    let requests = server.backend.requests();
    assert_eq!(requests[0].query.as_deref(), Some("page=2"));

    server.stop().await;
}
