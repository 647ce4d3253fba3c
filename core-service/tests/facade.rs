//! End-to-end tests over the full facade: real session manager and
//! connector, mock transport and in-memory secure store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;
use mockall::predicate::always;
use serde_json::{json, Value};

use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::geolocation::{Coordinates, Geolocator};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::media::{CapturedPhoto, MediaPicker, PhotoSource};
use bridge_traits::storage::SecureStore;
use core_service::{
    CoreConfig, CoreEvent, CoreService, ReportEvent, ReportStatus, ServiceError, SessionEvent,
};

const BASE: &str = "https://staging.example.com/medioambiente";

mock! {
    Http {}

    #[async_trait]
    impl HttpClient for Http {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

struct MemoryStore {
    secrets: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            secrets: Mutex::new(HashMap::new()),
        }
    }

    fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.secrets.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
    async fn set_secret(&self, key: &str, value: &[u8]) -> BridgeResult<()> {
        self.secrets
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> BridgeResult<Option<Vec<u8>>> {
        Ok(self.secrets.lock().unwrap().get(key).cloned())
    }

    async fn delete_secret(&self, key: &str) -> BridgeResult<()> {
        self.secrets.lock().unwrap().remove(key);
        Ok(())
    }
}

struct FixedGeolocator;

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> BridgeResult<Coordinates> {
        Ok(Coordinates::new(18.4861, -69.9312))
    }
}

struct FixedPicker;

#[async_trait]
impl MediaPicker for FixedPicker {
    async fn capture_photo(&self, _source: PhotoSource) -> BridgeResult<CapturedPhoto> {
        Ok(CapturedPhoto::new("file:///tmp/foto.jpg", "aW1n"))
    }
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::new(),
        body: Bytes::from(body.to_string()),
    }
}

fn build_core(http: MockHttp, store: Arc<MemoryStore>) -> CoreService {
    let config = CoreConfig::builder()
        .api_base_url(BASE)
        .http_client(Arc::new(http))
        .secure_store(store)
        .geolocator(Arc::new(FixedGeolocator))
        .media_picker(Arc::new(FixedPicker))
        .build()
        .unwrap();

    CoreService::new(config).unwrap()
}

async fn sign_in(core: &CoreService, http_token: &str) {
    core.account().login("ana@example.com", "s3cret").await.unwrap();
    assert_eq!(
        core.account().current_session().await.token(),
        Some(http_token)
    );
}

fn login_expectation(http: &mut MockHttp, token: &'static str) {
    http.expect_execute()
        .withf(|r| r.url.ends_with("/auth/login"))
        .times(1)
        .returning(move |_| {
            Ok(response(
                200,
                &format!(r#"{{"token": "{token}", "user": {{"name": "Ana"}}}}"#),
            ))
        });
}

// ----------------------------------------------------------------------
// Session lifecycle
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_login_persists_session_and_emits_event() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|r| {
            let body: Value =
                serde_json::from_slice(r.body.as_ref().unwrap()).unwrap();
            r.method == HttpMethod::Post
                && r.url == format!("{BASE}/auth/login")
                && body == json!({"correo": "ana@example.com", "password": "s3cret"})
        })
        .times(1)
        .returning(|_| Ok(response(200, r#"{"token": "abc", "user": {"name": "A"}}"#)));

    let store = Arc::new(MemoryStore::new());
    let core = build_core(http, Arc::clone(&store));
    let mut events = core.subscribe();

    let session = core.account().login("ana@example.com", "s3cret").await.unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("abc"));
    assert_eq!(session.identity().map(|i| i.name.as_str()), Some("A"));

    // Both secure-store slots are written.
    assert_eq!(store.raw("auth_token").as_deref(), Some(b"abc".as_ref()));
    let persisted: Value =
        serde_json::from_slice(&store.raw("user").unwrap()).unwrap();
    assert_eq!(persisted["token"], "abc");

    match events.try_recv().unwrap() {
        CoreEvent::Session(SessionEvent::SignedIn { email }) => {
            assert_eq!(email, "ana@example.com");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_restart_restores_persisted_session() {
    let store = Arc::new(MemoryStore::new());

    {
        let mut http = MockHttp::new();
        login_expectation(&mut http, "abc");
        let core = build_core(http, Arc::clone(&store));
        sign_in(&core, "abc").await;
    }

    // New facade over the same store, as after an app restart.
    let core = build_core(MockHttp::new(), Arc::clone(&store));
    let session = core.start().await;

    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("abc"));
    assert_eq!(
        session.identity().map(|i| i.email.as_str()),
        Some("ana@example.com")
    );
}

#[tokio::test]
async fn test_logout_clears_both_slots() {
    let store = Arc::new(MemoryStore::new());
    let mut http = MockHttp::new();
    login_expectation(&mut http, "abc");

    let core = build_core(http, Arc::clone(&store));
    sign_in(&core, "abc").await;

    core.account().logout().await.unwrap();

    assert!(!core.account().is_authenticated().await);
    assert!(store.raw("user").is_none());
    assert!(store.raw("auth_token").is_none());
}

// ----------------------------------------------------------------------
// Access guard
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_protected_fetch_while_denied_issues_no_network_call() {
    let mut http = MockHttp::new();
    http.expect_execute().times(0);

    let core = build_core(http, Arc::new(MemoryStore::new()));

    let err = core.reports().my_reports().await.unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied));

    let err = core.catalog().regulations(Some("Ley"), None).await.unwrap_err();
    assert!(matches!(err, ServiceError::AccessDenied));
}

#[tokio::test]
async fn test_401_expires_session_and_surfaces_auth_expired() {
    let store = Arc::new(MemoryStore::new());
    let mut http = MockHttp::new();
    login_expectation(&mut http, "stale");
    http.expect_execute()
        .withf(|r| r.url == format!("{BASE}/reportes"))
        .times(1)
        .returning(|_| Ok(response(401, r#"{"message": "token vencido"}"#)));

    let core = build_core(http, Arc::clone(&store));
    sign_in(&core, "stale").await;
    let mut events = core.subscribe();

    let err = core.reports().my_reports().await.unwrap_err();

    assert!(matches!(err, ServiceError::AuthExpired));
    assert_eq!(
        err.user_message(),
        "Sesión expirada. Vuelve a iniciar sesión."
    );
    assert!(!core.account().is_authenticated().await);
    assert!(store.raw("user").is_none());

    match events.try_recv().unwrap() {
        CoreEvent::Session(SessionEvent::Expired) => {}
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_rejection_does_not_expire_anything() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .with(always())
        .returning(|_| Ok(response(401, r#"{"message": "Credenciales inválidas"}"#)));

    let core = build_core(http, Arc::new(MemoryStore::new()));

    let err = core.account().login("ana@example.com", "wrong").await.unwrap_err();
    match err {
        ServiceError::Request { status, ref message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Credenciales inválidas");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Credenciales inválidas");
}

// ----------------------------------------------------------------------
// Normalization through the facade
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_reports_normalize_status_and_string_coordinates() {
    let store = Arc::new(MemoryStore::new());
    let mut http = MockHttp::new();
    login_expectation(&mut http, "abc");
    http.expect_execute()
        .withf(|r| {
            r.url == format!("{BASE}/reportes")
                && r.headers.get("Authorization") == Some(&"Bearer abc".to_string())
        })
        .times(1)
        .returning(|_| {
            Ok(response(
                200,
                r#"[
                    {"id": 1, "titulo": "A", "estado": "En Revisión",
                     "latitud": "19.05", "longitud": "-70.51"},
                    {"id": 2, "titulo": "B", "estado": "???",
                     "latitud": "no disponible", "longitud": "-70.51"}
                ]"#,
            ))
        });

    let core = build_core(http, store);
    sign_in(&core, "abc").await;

    let reports = core.reports().my_reports().await.unwrap();
    assert_eq!(reports.len(), 2);

    assert_eq!(reports[0].status, ReportStatus::UnderReview);
    let coords = reports[0].coordinates.unwrap();
    assert_eq!(coords.latitude, 19.05);
    assert_eq!(coords.longitude, -70.51);

    assert_eq!(reports[1].status, ReportStatus::Pending);
    assert!(reports[1].coordinates.is_none());
}

#[tokio::test]
async fn test_catalog_failures_map_to_user_messages() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|r| r.url == format!("{BASE}/noticias"))
        .times(1)
        .returning(|_| Ok(response(503, r#"{"message": "Mantenimiento programado"}"#)));
    http.expect_execute()
        .withf(|r| r.url == format!("{BASE}/servicios"))
        .times(1)
        .returning(|_| Err(BridgeError::Network("dns lookup failed".to_string())));

    let core = build_core(http, Arc::new(MemoryStore::new()));

    let err = core.catalog().news().await.unwrap_err();
    assert_eq!(err.user_message(), "Mantenimiento programado");

    let err = core.catalog().services().await.unwrap_err();
    assert_eq!(err.user_message(), "No hay conexión a internet");
}

// ----------------------------------------------------------------------
// Report submission
// ----------------------------------------------------------------------

async fn filled_draft(core: &CoreService) -> core_service::SubmissionDraft {
    let mut draft = core.reports().new_draft();
    draft.title = "Vertido de residuos".to_string();
    draft.description = "Residuos industriales en la orilla del río Ozama".to_string();
    core.reports().attach_position(&mut draft).await.unwrap();
    core.reports()
        .attach_photo(&mut draft, PhotoSource::Camera)
        .await
        .unwrap();
    draft
}

#[tokio::test]
async fn test_submit_sends_payload_and_emits_tracking_code() {
    let store = Arc::new(MemoryStore::new());
    let mut http = MockHttp::new();
    login_expectation(&mut http, "abc");
    http.expect_execute()
        .withf(|r| {
            if r.method != HttpMethod::Post || r.url != format!("{BASE}/reportes") {
                return false;
            }
            let body: Value =
                serde_json::from_slice(r.body.as_ref().unwrap()).unwrap();
            r.headers.get("Authorization") == Some(&"Bearer abc".to_string())
                && body["titulo"] == "Vertido de residuos"
                && body["foto"] == "aW1n"
                && body["latitud"] == 18.4861
                && body["longitud"] == -69.9312
        })
        .times(1)
        .returning(|_| Ok(response(201, r#"{"codigo": "RPT-42"}"#)));

    let core = build_core(http, store);
    sign_in(&core, "abc").await;
    let draft = filled_draft(&core).await;
    let mut events = core.subscribe();

    let code = core.reports().submit(&draft).await.unwrap();
    assert_eq!(code.as_deref(), Some("RPT-42"));

    match events.try_recv().unwrap() {
        CoreEvent::Report(ReportEvent::Submitted { code }) => {
            assert_eq!(code.as_deref(), Some("RPT-42"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_failure_emits_failed_event_with_user_message() {
    let store = Arc::new(MemoryStore::new());
    let mut http = MockHttp::new();
    login_expectation(&mut http, "abc");
    http.expect_execute()
        .withf(|r| r.url == format!("{BASE}/reportes"))
        .times(1)
        .returning(|_| Err(BridgeError::Network("socket closed".to_string())));

    let core = build_core(http, store);
    sign_in(&core, "abc").await;
    let draft = filled_draft(&core).await;
    let mut events = core.subscribe();

    let err = core.reports().submit(&draft).await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));

    match events.try_recv().unwrap() {
        CoreEvent::Report(ReportEvent::SubmitFailed { message }) => {
            assert_eq!(message, "No hay conexión a internet");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_transport() {
    let mut http = MockHttp::new();
    login_expectation(&mut http, "abc");

    let core = build_core(http, Arc::new(MemoryStore::new()));
    sign_in(&core, "abc").await;

    let draft = core.reports().new_draft();
    let err = core.reports().submit(&draft).await.unwrap_err();

    assert!(matches!(err, ServiceError::Draft(_)));
    assert_eq!(err.user_message(), "El título es requerido");
}

#[tokio::test]
async fn test_capture_without_bridges_is_actionable() {
    let config = CoreConfig::builder()
        .api_base_url(BASE)
        .http_client(Arc::new(MockHttp::new()))
        .secure_store(Arc::new(MemoryStore::new()))
        .build()
        .unwrap();
    let core = CoreService::new(config).unwrap();

    let mut draft = core.reports().new_draft();
    let err = core.reports().attach_position(&mut draft).await.unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Capability(BridgeError::NotAvailable(_))
    ));
    assert!(draft.location.is_none());
}
