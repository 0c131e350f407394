use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vayuhu_api::{ApiClient, AuthError};
use vayuhu_checkout::{
    buy_booking_visitor_pass, checkout_cart, Cart, CheckoutOrchestrator, CheckoutOutcome,
    CheckoutSettings,
};
use vayuhu_core::{
    BookingGateway, GatewayError, MemorySessionStore, MockPaymentWidget, MockWidgetBehavior,
    SessionProvider,
};
use vayuhu_shared::models::admin::{CompanyProfileUpdate, Coupon, LogoUpload};
use vayuhu_shared::models::visitor::{AdminVisitor, VisitorPass};
use vayuhu_shared::{Admin, CartItem, Identity, Session, User};
use vayuhu_store::app_config::ApiConfig;
use vayuhu_store::FileSessionStore;

const PREFIX: &str = "/vayuhu_backend";

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: Option<String>,
    auth: Option<String>,
    content_type: Option<String>,
    body: String,
}

impl Seen {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// In-process stand-in for the PHP backend. Records every request and replies from a table.
#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
    overrides: Arc<Mutex<HashMap<&'static str, (u16, Value)>>>,
}

impl Backend {
    fn reply(&self, path: &'static str, status: u16, body: Value) {
        self.overrides.lock().unwrap().insert(path, (status, body));
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn paths(&self) -> Vec<String> {
        self.seen().into_iter().map(|s| s.path).collect()
    }

    fn last(&self, path: &str) -> Seen {
        self.seen()
            .into_iter()
            .rev()
            .find(|s| s.path == path)
            .unwrap_or_else(|| panic!("{path} was never called"))
    }
}

fn default_reply(path: &str) -> Value {
    match path {
        "/login.php" => json!({
            "status": "success",
            "message": "Login successful",
            "token": "tok-abc",
            "user": {"id": "42", "name": "Priya", "email": "priya@example.com"}
        }),
        "/admin_login.php" => json!({
            "status": "success",
            "message": "Welcome back",
            "token": "tok-admin",
            "admin": {"id": 3, "name": "Root"}
        }),
        "/create_razorpay_order.php" => json!({
            "success": true, "order_id": "order_http_1", "key": "rzp_test_http", "amount": 120000
        }),
        "/get_reservations.php" => json!({
            "success": true,
            "reservations": [
                {"id": "1", "name": "Meera", "final_total": "1000", "booked_on": "2025-02-10 09:15:00"},
                {"id": 2, "name": "Arjun"}
            ]
        }),
        "/blog_list.php" => json!({
            "success": true,
            "data": [{"id": 1, "blog_heading": "Hello", "status": "active"}]
        }),
        "/get_company_profile.php" => json!({
            "success": true,
            "profile": {"company_name": "Acme", "gst_no": "GST1"}
        }),
        _ => json!({"success": true}),
    }
}

async fn handle(
    State(backend): State<Backend>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().trim_start_matches(PREFIX).to_string();
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    backend.seen.lock().unwrap().push(Seen {
        path: path.clone(),
        query: uri.query().map(str::to_string),
        auth: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, reply) = backend
        .overrides
        .lock()
        .unwrap()
        .get(path.as_str())
        .cloned()
        .unwrap_or_else(|| (200, default_reply(&path)));
    (StatusCode::from_u16(status).unwrap(), Json(reply))
}

async fn spawn_backend(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(handle).with_state(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}{PREFIX}/")
}

fn api_config(base_url: String) -> ApiConfig {
    ApiConfig {
        base_url,
        timeout_seconds: 5,
    }
}

fn user_session() -> Session {
    Session::new(
        Identity::User(User {
            id: 42,
            name: Some("Priya".to_string()),
            email: Some("priya@example.com".to_string()),
            extra: Default::default(),
        }),
        "tok-abc",
    )
}

fn admin_session() -> Session {
    Session::new(
        Identity::Admin(Admin {
            id: 3,
            name: Some("Root".to_string()),
            email: None,
            extra: Default::default(),
        }),
        "tok-admin",
    )
}

async fn client_with(session: Option<Session>) -> (Backend, Arc<ApiClient>, Arc<dyn SessionProvider>) {
    let backend = Backend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let sessions: Arc<dyn SessionProvider> = Arc::new(match session {
        Some(session) => MemorySessionStore::with_session(session),
        None => MemorySessionStore::new(),
    });
    let client = Arc::new(ApiClient::new(&api_config(base_url), sessions.clone()).unwrap());
    (backend, client, sessions)
}

#[tokio::test]
async fn test_login_persists_session_and_injects_bearer() {
    let backend = Backend::default();
    let base_url = spawn_backend(backend.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let sessions = Arc::new(FileSessionStore::open(&path).unwrap());
    let client = ApiClient::new(&api_config(base_url), sessions).unwrap();

    // Anonymous request carries no Authorization header
    let blogs = client.blogs().await.unwrap();
    assert_eq!(blogs.len(), 1);
    let seen = backend.last("/blog_list.php");
    assert_eq!(seen.auth, None);
    assert!(seen.query.unwrap_or_default().starts_with("nocache="));

    let signed_in = client.login("priya@example.com", "secret").await.unwrap();
    assert_eq!(signed_in.identity.user_id(), Some(42));
    assert_eq!(signed_in.message.as_deref(), Some("Login successful"));
    assert_eq!(
        backend.last("/login.php").json(),
        json!({"email": "priya@example.com", "password": "secret"})
    );

    let rows = client.reservations().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].final_total, Some(dec!(1000)));
    assert_eq!(
        backend.last("/get_reservations.php").auth.as_deref(),
        Some("Bearer tok-abc")
    );

    // Survives a restart
    let reopened = FileSessionStore::open(&path).unwrap();
    assert_eq!(reopened.current().unwrap().identity.id(), 42);

    client.logout().unwrap();
    assert!(client.session().is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_failed_login_leaves_no_session() {
    let (backend, client, sessions) = client_with(None).await;
    backend.reply(
        "/login.php",
        200,
        json!({"status": "error", "message": "Invalid credentials"}),
    );

    let err = client.login("priya@example.com", "wrong").await.unwrap_err();
    match err {
        AuthError::Gateway(e) => assert_eq!(e.backend_message(), Some("Invalid credentials")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(sessions.current().is_none());
}

#[tokio::test]
async fn test_admin_login_stores_admin_identity() {
    let (_backend, client, sessions) = client_with(None).await;

    let signed_in = client.admin_login("root@vayuhu.test", "pw").await.unwrap();
    assert!(signed_in.identity.is_admin());
    assert_eq!(sessions.current().unwrap().identity.id(), 3);
    assert_eq!(sessions.bearer().as_deref(), Some("Bearer tok-admin"));
}

#[tokio::test]
async fn test_envelope_and_status_errors() {
    let (backend, client, _) = client_with(Some(user_session())).await;
    backend.reply(
        "/create_razorpay_order.php",
        200,
        json!({"success": false, "message": "limit exceeded"}),
    );
    backend.reply(
        "/get_reservations.php",
        401,
        json!({"success": false, "message": "Invalid token"}),
    );
    backend.reply("/get_all_visitors.php", 200, json!({"success": true, "visitors": "nope"}));

    let err = client.create_payment_order(dec!(500)).await.unwrap_err();
    assert_eq!(err, GatewayError::rejected("limit exceeded"));
    assert_eq!(backend.last("/create_razorpay_order.php").json(), json!({"amount": 500.0}));

    let err = client.reservations().await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Status {
            status: 401,
            message: Some("Invalid token".to_string())
        }
    );

    let err = client.all_visitors().await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sessions: Arc<dyn SessionProvider> = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(&api_config(format!("http://{addr}")), sessions).unwrap();

    let err = client.monthly_revenue().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn test_user_scoped_listings() {
    let (backend, client, _) = client_with(Some(user_session())).await;
    backend.reply(
        "/get_booking_summary.php",
        200,
        json!({
            "success": true,
            "summary": {"total": 4, "upcoming": 1, "ongoing": 2, "completed": 1},
            "bookings": [{"booking_id": "9", "workspace_title": "Hot Desk"}]
        }),
    );

    let summary = client.booking_summary(42).await.unwrap();
    assert_eq!(summary.summary.ongoing, 2);
    assert_eq!(summary.bookings[0].booking_id, 9);
    assert_eq!(backend.last("/get_booking_summary.php").json(), json!({"user_id": 42}));

    let profile = client.company_profile(42).await.unwrap().unwrap();
    assert_eq!(profile.company_name.as_deref(), Some("Acme"));
    assert_eq!(
        backend.last("/get_company_profile.php").query.as_deref(),
        Some("user_id=42")
    );

    backend.reply("/get_company_profile.php", 200, json!({"success": true}));
    assert_eq!(client.company_profile(42).await.unwrap(), None);

    assert!(client.visitors(42).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_coupon_is_multipart_and_needs_session() {
    let (backend, client, sessions) = client_with(None).await;
    let coupon = Coupon {
        coupon_code: "WELCOME10".to_string(),
        discount: "10".to_string(),
        ..Default::default()
    };

    let err = client.add_coupon(&coupon).await.unwrap_err();
    assert_eq!(err, GatewayError::Unauthenticated);
    assert!(backend.seen().is_empty());

    sessions.store(admin_session()).unwrap();
    client.add_coupon(&coupon).await.unwrap();

    let seen = backend.last("/add_coupon.php");
    assert!(seen
        .content_type
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    assert!(seen.body.contains("name=\"coupon_code\""));
    assert!(seen.body.contains("WELCOME10"));
    assert!(seen.body.contains("ALL Users"));
    assert_eq!(seen.auth.as_deref(), Some("Bearer tok-admin"));
}

#[tokio::test]
async fn test_admin_walk_in_carries_admin_id() {
    let (backend, client, _) = client_with(Some(admin_session())).await;
    let visitor = AdminVisitor {
        name: "Walk In".to_string(),
        contact: "9000000000".to_string(),
        ..Default::default()
    };

    client.admin_add_visitor(&visitor).await.unwrap();

    let body = backend.last("/admin_add_visitor.php").json();
    assert_eq!(body["admin_id"], 3);
    assert_eq!(body["user_id"], Value::Null);
    assert_eq!(body["name"], "Walk In");
    assert_eq!(body["company_name"], "");
}

#[tokio::test]
async fn test_cart_checkout_over_http() {
    let (backend, client, sessions) = client_with(Some(user_session())).await;
    let widget = Arc::new(MockPaymentWidget::new(MockWidgetBehavior::Pay));
    let orchestrator =
        CheckoutOrchestrator::new(client, widget.clone(), sessions, CheckoutSettings::default());

    let mut cart = Cart::new();
    cart.add(CartItem::new(
        7,
        "Meeting Room",
        "hourly",
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        dec!(1200),
    ))
    .unwrap();

    let outcome = checkout_cart(&orchestrator, &mut cart).await.unwrap();
    let receipt = match outcome {
        CheckoutOutcome::Completed(receipt) => receipt,
        other => panic!("unexpected outcome: {other:?}"),
    };
    if let Some(notification) = receipt.notification {
        notification.await.unwrap();
    }

    assert_eq!(receipt.order_id, "order_http_1");
    assert_eq!(receipt.payment_id, "pay_mock_1");
    assert!(cart.is_empty());
    assert_eq!(widget.opened()[0].amount, 120000);
    assert_eq!(widget.opened()[0].key, "rzp_test_http");

    assert_eq!(
        backend.paths(),
        vec![
            "/create_razorpay_order.php",
            "/verify_payment.php",
            "/add_bulk_bookings.php",
            "/send_booking_email.php",
        ]
    );
    assert!(backend
        .seen()
        .iter()
        .all(|s| s.auth.as_deref() == Some("Bearer tok-abc")));

    let verify = backend.last("/verify_payment.php").json();
    assert_eq!(verify["razorpay_order_id"], "order_http_1");

    let bulk = backend.last("/add_bulk_bookings.php").json();
    let booking = &bulk["bookings"][0];
    assert_eq!(booking["user_id"], 42);
    assert_eq!(booking["space_id"], 7);
    assert_eq!(booking["payment_id"], "pay_mock_1");
    assert_eq!(booking["final_amount"], 1200.0);
    assert_eq!(booking["terms_accepted"], 1);

    let email = backend.last("/send_booking_email.php").json();
    assert_eq!(email["user_email"], "priya@example.com");
    assert_eq!(email["total_amount"], 1200.0);
}

#[tokio::test]
async fn test_booking_visitor_pass_charges_quoted_fee() {
    let (backend, client, sessions) = client_with(Some(user_session())).await;
    backend.reply(
        "/validate_visitor_date.php",
        200,
        json!({"success": true, "fee": "250.00"}),
    );
    let widget = Arc::new(MockPaymentWidget::new(MockWidgetBehavior::Pay));
    let orchestrator =
        CheckoutOrchestrator::new(client, widget, sessions, CheckoutSettings::default());

    let pass = VisitorPass {
        name: "Ravi".to_string(),
        contact: "9876543210".to_string(),
        visiting_date: "2025-06-02".to_string(),
        ..Default::default()
    };
    let outcome = buy_booking_visitor_pass(&orchestrator, 9, pass, dec!(500))
        .await
        .unwrap();
    assert!(outcome.is_completed());

    assert_eq!(
        backend.last("/validate_visitor_date.php").json(),
        json!({"booking_id": 9, "visiting_date": "2025-06-02"})
    );
    assert_eq!(backend.last("/create_razorpay_order.php").json(), json!({"amount": 250.0}));

    let visitor = backend.last("/add_visitor.php").json();
    assert_eq!(visitor["booking_id"], 9);
    assert_eq!(visitor["amount_paid"], 250.0);
    assert_eq!(visitor["visitingDate"], "2025-06-02");
    assert!(!backend.paths().contains(&"/send_booking_email.php".to_string()));
}

#[tokio::test]
async fn test_update_company_profile_sends_multipart_with_logo() {
    let (backend, client, _) = client_with(Some(user_session())).await;
    let mut update = CompanyProfileUpdate {
        user_id: 42,
        company_name: "Acme Pvt Ltd".to_string(),
        gst_no: "29ABCDE1234F1Z5".to_string(),
        contact: "9876543210".to_string(),
        address: "MG Road".to_string(),
        email: "accounts@acme.test".to_string(),
        logo: Some(LogoUpload {
            file_name: "logo.png".to_string(),
            mime: "image/png".to_string(),
            bytes: b"PNGDATA".to_vec(),
        }),
    };

    client.update_company_profile(&update).await.unwrap();

    let seen = backend.last("/update_company_profile.php");
    assert!(seen
        .content_type
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    assert_eq!(seen.auth.as_deref(), Some("Bearer tok-abc"));
    for field in ["user_id", "companyName", "gstNo", "contact", "address", "email"] {
        assert!(
            seen.body.contains(&format!("name=\"{field}\"")),
            "missing form field {field}"
        );
    }
    assert!(seen.body.contains("Acme Pvt Ltd"));
    assert!(seen.body.contains("29ABCDE1234F1Z5"));
    assert!(seen.body.contains("name=\"logo\"; filename=\"logo.png\""));
    assert!(seen.body.contains("image/png"));
    assert!(seen.body.contains("PNGDATA"));

    update.logo = None;
    client.update_company_profile(&update).await.unwrap();
    let seen = backend.last("/update_company_profile.php");
    assert!(seen.body.contains("name=\"companyName\""));
    assert!(!seen.body.contains("name=\"logo\""));

    backend.reply(
        "/update_company_profile.php",
        200,
        json!({"success": false, "message": "Invalid GST number"}),
    );
    let err = client.update_company_profile(&update).await.unwrap_err();
    assert_eq!(err.backend_message(), Some("Invalid GST number"));
}

#[tokio::test]
async fn test_company_profile_query_and_missing_profile() {
    let (backend, client, _) = client_with(Some(user_session())).await;

    let profile = client.company_profile(7).await.unwrap().unwrap();
    assert_eq!(profile.company_name.as_deref(), Some("Acme"));
    assert_eq!(profile.gst_no.as_deref(), Some("GST1"));

    let seen = backend.last("/get_company_profile.php");
    assert_eq!(seen.query.as_deref(), Some("user_id=7"));
    assert_eq!(seen.auth.as_deref(), Some("Bearer tok-abc"));

    backend.reply(
        "/get_company_profile.php",
        200,
        json!({"success": true, "profile": null}),
    );
    assert_eq!(client.company_profile(7).await.unwrap(), None);
}

#[tokio::test]
async fn test_active_bookings() {
    let (backend, client, _) = client_with(Some(user_session())).await;
    backend.reply(
        "/get_active_bookings.php",
        200,
        json!({
            "success": true,
            "bookings": [
                {"booking_id": "11", "workspace_title": "Cabin A", "start_date": "2025-06-02"},
                {"booking_id": 12, "workspace_title": "Hot Desk", "final_amount": "450.50"}
            ]
        }),
    );

    let rows = client.active_bookings(42).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].booking_id, 11);
    assert_eq!(rows[0].workspace_title.as_deref(), Some("Cabin A"));
    assert_eq!(rows[1].final_amount, Some(dec!(450.50)));

    let seen = backend.last("/get_active_bookings.php");
    assert_eq!(seen.json(), json!({"user_id": 42}));
    assert_eq!(seen.auth.as_deref(), Some("Bearer tok-abc"));

    backend.reply(
        "/get_active_bookings.php",
        200,
        json!({"success": false, "message": "No active bookings"}),
    );
    let err = client.active_bookings(42).await.unwrap_err();
    assert_eq!(err, GatewayError::rejected("No active bookings"));
}
