//! # API REST
//!
//! REST API implementation for Ward.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `ward-core` for all patient logic. The patient service
//! sits behind one async `RwLock`, so writes are serialised and reads see a consistent store.

#![warn(rust_2018_idioms)]

use api_shared::{
    ErrorRes, GenerateAdmissionsReq, GenerateAdmissionsRes, HealthRes, HealthService,
    ListPatientsParams, ReloadRes,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use ward_core::{
    generate_all_admission_data, load_patients, AdmissionRecord, AdmissionStatus, Address,
    BloodGroup, Bucket, CoreConfig, DashboardSummary, Gender, PatientAdmission, PatientDraft,
    PatientError, PatientPage, PatientQuery, PatientService, PatientStatistics, PeopleSource,
    StatusCounts,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    service: Arc<RwLock<PatientService>>,
    source: Arc<dyn PeopleSource>,
}

impl AppState {
    pub fn new(
        cfg: Arc<CoreConfig>,
        service: Arc<RwLock<PatientService>>,
        source: Arc<dyn PeopleSource>,
    ) -> Self {
        Self {
            cfg,
            service,
            source,
        }
    }

    pub fn service(&self) -> &Arc<RwLock<PatientService>> {
        &self.service
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        create_patient,
        get_patient,
        update_patient,
        delete_patient,
        reload_patients,
        dashboard,
        statistics,
        generate_admissions,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        ReloadRes,
        GenerateAdmissionsReq,
        GenerateAdmissionsRes,
        AdmissionRecord,
        AdmissionStatus,
        Address,
        BloodGroup,
        Gender,
        PatientAdmission,
        PatientDraft,
        PatientPage,
        DashboardSummary,
        PatientStatistics,
        StatusCounts,
        Bucket,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/reload", post(reload_patients))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/dashboard", get(dashboard))
        .route("/statistics", get(statistics))
        .route("/admissions/generate", post(generate_admissions))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorRes>);

/// Maps a core error onto an HTTP status and logs it.
fn error_response(e: PatientError) -> ApiError {
    let status = match &e {
        PatientError::InvalidArgument(_) | PatientError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        PatientError::RoomTaken(_) => StatusCode::CONFLICT,
        PatientError::Fetch(_)
        | PatientError::FetchStatus(_)
        | PatientError::Deserialization(_) => StatusCode::BAD_GATEWAY,
        PatientError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    } else {
        tracing::warn!("Request rejected: {}", e);
    }
    (status, Json(ErrorRes::new(e.to_string())))
}

fn not_found(id: u32) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorRes::new(format!("patient {id} not found"))),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports liveness together with the number of patients held and when they were loaded.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    let service = state.service.read().await;
    Json(HealthService::check_health(
        service.len(),
        service.loaded_at(),
    ))
}

#[utoipa::path(
    get,
    path = "/patients",
    params(ListPatientsParams),
    responses(
        (status = 200, description = "One page of matching patients", body = PatientPage),
        (status = 400, description = "Unknown status", body = ErrorRes)
    )
)]
/// List patients, optionally filtered by status and name, one page at a time.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<ListPatientsParams>,
) -> Result<Json<PatientPage>, ApiError> {
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<AdmissionStatus>)
        .transpose()
        .map_err(error_response)?;

    let query = PatientQuery {
        status,
        search: params.search,
        page: params.page,
    };
    let service = state.service.read().await;
    Ok(Json(service.query(&query)))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientDraft,
    responses(
        (status = 201, description = "Patient created", body = PatientAdmission),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 409, description = "Room already assigned", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// The new record gets the id one past the current maximum.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> Result<(StatusCode, Json<PatientAdmission>), ApiError> {
    let mut service = state.service.write().await;
    let created = service.create(draft).map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = u32, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = PatientAdmission),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<PatientAdmission>, ApiError> {
    let service = state.service.read().await;
    service
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = u32, Path, description = "Patient id")),
    request_body = PatientDraft,
    responses(
        (status = 200, description = "Patient updated", body = PatientAdmission),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes),
        (status = 409, description = "Room already assigned", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(draft): Json<PatientDraft>,
) -> Result<Json<PatientAdmission>, ApiError> {
    let mut service = state.service.write().await;
    match service.update(id, draft).map_err(error_response)? {
        Some(updated) => Ok(Json(updated)),
        None => Err(not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = u32, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    let mut service = state.service.write().await;
    if service.delete(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

#[utoipa::path(
    post,
    path = "/patients/reload",
    responses(
        (status = 200, description = "Patients reloaded", body = ReloadRes),
        (status = 502, description = "People source unavailable", body = ErrorRes)
    )
)]
/// Refetch people from the configured source and replace every patient.
///
/// The fetch happens before the write lock is taken; on failure the current patients are kept.
#[axum::debug_handler]
async fn reload_patients(State(state): State<AppState>) -> Result<Json<ReloadRes>, ApiError> {
    let mut rng = state.cfg.rng();
    let patients = load_patients(state.source.as_ref(), &mut rng)
        .await
        .map_err(error_response)?;
    let loaded = patients.len();
    state.service.write().await.replace_all(patients);
    Ok(Json(ReloadRes { loaded }))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    )
)]
#[axum::debug_handler]
async fn dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.service.read().await.dashboard())
}

#[utoipa::path(
    get,
    path = "/statistics",
    responses(
        (status = 200, description = "Patient statistics", body = PatientStatistics)
    )
)]
#[axum::debug_handler]
async fn statistics(State(state): State<AppState>) -> Json<PatientStatistics> {
    Json(state.service.read().await.statistics())
}

#[utoipa::path(
    post,
    path = "/admissions/generate",
    request_body = GenerateAdmissionsReq,
    responses(
        (status = 200, description = "Synthesized admission data", body = GenerateAdmissionsRes),
        (status = 400, description = "Negative total or total above the limit", body = ErrorRes)
    )
)]
/// Run the admission synthesizer on its own, without touching the store.
#[axum::debug_handler]
async fn generate_admissions(
    Json(req): Json<GenerateAdmissionsReq>,
) -> Result<Json<GenerateAdmissionsRes>, ApiError> {
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let admissions = generate_all_admission_data(req.total, &mut rng).map_err(error_response)?;
    Ok(Json(GenerateAdmissionsRes { admissions }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use ward_core::{PatientResult, PersonRecord, RoomNumber};

    struct NoSource;

    #[async_trait]
    impl PeopleSource for NoSource {
        async fn fetch_people(&self) -> PatientResult<Vec<PersonRecord>> {
            Err(PatientError::FetchStatus(503))
        }

        fn describe(&self) -> String {
            "unavailable".into()
        }
    }

    fn patient(id: u32, status: AdmissionStatus, room: Option<u16>) -> PatientAdmission {
        PatientAdmission {
            generated_id: id,
            first_name: "Liam".into(),
            last_name: format!("Garcia{id}"),
            age: 50,
            gender: Gender::Male,
            email: "liam@example.com".into(),
            phone: "+1 555 0100".into(),
            address: Address {
                address: "12 Elm Road".into(),
                city: "Denver".into(),
                postal_code: "80014".into(),
            },
            status,
            room_number: room.map(RoomNumber::from_number),
            blood_group: BloodGroup::APositive,
        }
    }

    fn app(patients: Vec<PatientAdmission>) -> (Router, AppState) {
        let cfg = Arc::new(
            CoreConfig::new("http://localhost/users".into(), 10, Some(4))
                .expect("config should be valid"),
        );
        let mut service = PatientService::new(&cfg);
        service.replace_all(patients);
        let state = AppState::new(cfg, Arc::new(RwLock::new(service)), Arc::new(NoSource));
        (router(state.clone()), state)
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .oneshot(request.body(body).unwrap())
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response should be JSON")
        };
        (status, json)
    }

    fn draft_json(status: &str, room: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "firstName": "Olivia",
            "lastName": "Martinez",
            "age": 33,
            "gender": "female",
            "email": "olivia@example.com",
            "phone": "+1 555 0101",
            "address": { "address": "9 Oak Lane", "city": "Austin", "postalCode": "73301" },
            "status": status,
            "roomNumber": room,
            "bloodGroup": "O-"
        })
    }

    #[tokio::test]
    async fn test_health_reports_patient_count() {
        let (router, _) = app(vec![patient(1, AdmissionStatus::Discharged, None)]);
        let (status, json) = send(router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        assert_eq!(json["patients"], 1);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (router, _) = app(vec![
            patient(1, AdmissionStatus::Admitted, Some(1)),
            patient(2, AdmissionStatus::Discharged, None),
        ]);
        let (status, json) =
            send(router, "GET", "/patients?status=Admitted&page=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalMatches"], 1);
        assert_eq!(json["patients"][0]["generatedId"], 1);
        assert_eq!(json["patients"][0]["roomNumber"], "1");
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_status() {
        let (router, _) = app(vec![]);
        let (status, _) = send(router, "GET", "/patients?status=pending", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let (router, state) = app(vec![patient(4, AdmissionStatus::Discharged, None)]);
        let (status, json) = send(
            router,
            "POST",
            "/patients",
            Some(draft_json("Admitted", Some("2"))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["generatedId"], 5);
        assert_eq!(state.service().read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_create_conflicting_room_is_409() {
        let (router, _) = app(vec![patient(1, AdmissionStatus::Admitted, Some(2))]);
        let (status, json) = send(
            router,
            "POST",
            "/patients",
            Some(draft_json("Admitted", Some("2"))),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].as_str().unwrap().contains("room 2"));
    }

    #[tokio::test]
    async fn test_create_admitted_without_room_is_400() {
        let (router, _) = app(vec![]);
        let (status, _) = send(
            router,
            "POST",
            "/patients",
            Some(draft_json("Admitted", None)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_ids_are_404() {
        let (router, _) = app(vec![]);
        let (status, _) = send(
            router.clone(),
            "PUT",
            "/patients/9",
            Some(draft_json("Discharged", None)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(router, "DELETE", "/patients/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let (router, state) = app(vec![
            patient(1, AdmissionStatus::Admitted, Some(1)),
            patient(2, AdmissionStatus::Admitted, Some(2)),
        ]);
        let (status, json) = send(
            router.clone(),
            "PUT",
            "/patients/2",
            Some(draft_json("Discharged", Some("2"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "Discharged");
        assert!(json.get("roomNumber").is_none());

        let (status, _) = send(router.clone(), "DELETE", "/patients/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) = send(router, "GET", "/patients/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["firstName"], "Olivia");
        assert_eq!(state.service().read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_patients() {
        let (router, state) = app(vec![patient(1, AdmissionStatus::Discharged, None)]);
        let (status, _) = send(router, "POST", "/patients/reload", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(state.service().read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_and_statistics() {
        let (router, _) = app(vec![
            patient(1, AdmissionStatus::Admitted, Some(1)),
            patient(2, AdmissionStatus::UnderObservation, None),
        ]);
        let (status, json) = send(router.clone(), "GET", "/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalPatients"], 2);
        assert_eq!(json["currentlyAdmitted"], 1);
        assert_eq!(json["freeRooms"], 39);

        let (status, json) = send(router, "GET", "/statistics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["statusCounts"]["underObservation"], 1);
    }

    #[tokio::test]
    async fn test_generate_admissions() {
        let (router, _) = app(vec![]);
        let (status, json) = send(
            router.clone(),
            "POST",
            "/admissions/generate",
            Some(serde_json::json!({ "total": 5, "seed": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let admissions = json["admissions"].as_array().unwrap();
        assert_eq!(admissions.len(), 5);
        assert_eq!(admissions[4]["generatedId"], 5);

        let (status, _) = send(
            router.clone(),
            "POST",
            "/admissions/generate",
            Some(serde_json::json!({ "total": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(
            router,
            "POST",
            "/admissions/generate",
            Some(serde_json::json!({ "total": 4_294_967_295_u64 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("at most"));
    }
}
