//! REST API for the load layout service.
//!
//! Stateless JSON endpoints around the layout engine. Each request carries the
//! deck and the arrangement; each gesture endpoint answers with the committed
//! arrangement and its fresh report. Uses Axum as the web framework and
//! supports CORS.

use std::collections::HashSet;
use std::sync::OnceLock;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};

use crate::balance::{BalanceReport, BalanceStatus};
use crate::capacity::{
    Attachment, CapacityResolution, PlatformSpec, ResolvedCapacity, TransportUnit,
    UnresolvedReason, resolve_capacity,
};
use crate::collision::CollisionPair;
use crate::config::{ApiConfig, EngineConfig};
use crate::layout::place_sequentially;
use crate::model::{CargoItem, Dimensions, LoadSurface, PlacedItem, ValidationError};
use crate::report::LayoutReport;
use crate::session::{LayoutSession, SessionError, SessionOptions};
use crate::types::{Positioned, Vec2};
use crate::validation::{
    DetailKind, Severity, ValidationDetail, ValidationReport, ValidationStatus,
};

#[derive(Clone)]
struct ApiState {
    engine: EngineConfig,
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>load-layout API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                window.ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                });
            };
        </script>
    </body>
</html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Request for the initial sequential placement of a cargo list.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "surface": { "length": 12.0, "width": 2.6, "capacityTons": 40.0, "name": "Roll-off 07" },
        "items": [
            {
                "id": "eq-1",
                "brand": "Genie",
                "model": "GS-3246",
                "category": "scissor",
                "dimensions": { "length": 2.48, "width": 1.22, "height": 2.3 },
                "weight": 3200.0
            }
        ]
    })
)]
pub struct PlaceRequest {
    pub surface: LoadSurface,
    pub items: Vec<CargoItem>,
}

/// Request carrying an existing arrangement.
#[derive(Deserialize, ToSchema)]
pub struct ArrangementRequest {
    pub surface: LoadSurface,
    pub items: Vec<PlacedItem>,
}

/// Moves one item as if dragged to the target position.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub surface: LoadSurface,
    pub items: Vec<PlacedItem>,
    pub id: String,
    /// Requested near-left corner of the item in m
    pub position: Vec2,
    #[serde(default)]
    #[schema(nullable = true)]
    pub allow_y_axis: Option<bool>,
}

/// Toggles the rotation of one item.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RotateRequest {
    pub surface: LoadSurface,
    pub items: Vec<PlacedItem>,
    pub id: String,
    #[serde(default)]
    #[schema(nullable = true)]
    pub allow_rotation: Option<bool>,
}

/// Selected transport configuration.
#[derive(Deserialize, ToSchema)]
pub struct ResolveRequest {
    #[serde(default)]
    pub unit: Option<TransportUnit>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Committed arrangement plus its evaluation.
#[derive(Serialize, ToSchema)]
pub struct ArrangementResponse {
    pub placed: Vec<PlacedItem>,
    pub report: LayoutReport,
}

impl ArrangementResponse {
    fn evaluate(placed: Vec<PlacedItem>, surface: &LoadSurface, engine: &EngineConfig) -> Self {
        let report = LayoutReport::for_surface(&placed, surface, &engine.layout_config());
        Self { placed, report }
    }
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    let body = ErrorResponse {
        error: error.into(),
        details: details.into(),
    };
    (status, Json(body)).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(err: ValidationError) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        err.to_string(),
    )
}

fn session_error(err: SessionError) -> Response {
    let status = match err {
        SessionError::UnknownItem(_) => StatusCode::NOT_FOUND,
        SessionError::ReadOnly
        | SessionError::RotationLocked
        | SessionError::NotDragging
        | SessionError::DragInProgress => StatusCode::CONFLICT,
    };
    error_response(status, "Gesture rejected", err.to_string())
}

fn unwrap_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(err) => Err(json_deserialize_error(err)),
    }
}

fn validate_cargo(items: Vec<CargoItem>) -> Result<Vec<CargoItem>, ValidationError> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| {
            let item = item.validated()?;
            if !seen.insert(item.id.clone()) {
                return Err(ValidationError::InvalidId(format!(
                    "Duplicate cargo item id: {}",
                    item.id
                )));
            }
            Ok(item)
        })
        .collect()
}

fn validate_arrangement(items: Vec<PlacedItem>) -> Result<Vec<PlacedItem>, ValidationError> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|placed| {
            if !placed.position_x.is_finite() || !placed.position_y.is_finite() {
                return Err(ValidationError::InvalidDimension(format!(
                    "Position of {} must be finite",
                    placed.item.id
                )));
            }
            let item = placed.item.validated()?;
            if !seen.insert(item.id.clone()) {
                return Err(ValidationError::InvalidId(format!(
                    "Duplicate cargo item id: {}",
                    item.id
                )));
            }
            Ok(PlacedItem { item, ..placed })
        })
        .collect()
}

fn parse_arrangement(
    surface: LoadSurface,
    items: Vec<PlacedItem>,
) -> Result<(LoadSurface, Vec<PlacedItem>), Response> {
    let surface = surface.validated().map_err(validation_error)?;
    let items = validate_arrangement(items).map_err(validation_error)?;
    Ok((surface, items))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_place,
        handle_arrange,
        handle_evaluate,
        handle_move,
        handle_rotate,
        handle_resolve
    ),
    components(
        schemas(
            PlaceRequest,
            ArrangementRequest,
            MoveRequest,
            RotateRequest,
            ResolveRequest,
            ArrangementResponse,
            ErrorResponse,
            LoadSurface,
            CargoItem,
            Dimensions,
            PlacedItem,
            Vec2,
            LayoutReport,
            ValidationReport,
            ValidationDetail,
            ValidationStatus,
            Severity,
            DetailKind,
            CollisionPair,
            BalanceReport,
            BalanceStatus,
            TransportUnit,
            PlatformSpec,
            Attachment,
            CapacityResolution,
            ResolvedCapacity,
            UnresolvedReason
        )
    ),
    tags(
        (name = "layout", description = "Placement, gestures and evaluation of load layouts"),
        (name = "capacity", description = "Deck limits of a transport configuration")
    )
)]
struct ApiDoc;

fn router(engine: EngineConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/layout/place", post(handle_place))
        .route("/layout/arrange", post(handle_arrange))
        .route("/layout/evaluate", post(handle_evaluate))
        .route("/layout/move", post(handle_move))
        .route("/layout/rotate", post(handle_rotate))
        .route("/capacity/resolve", post(handle_resolve))
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .with_state(ApiState { engine })
}

/// Starts the API server.
///
/// Blocks until the server is terminated.
pub async fn start_api_server(config: ApiConfig, engine: EngineConfig) {
    let app = router(engine);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("❌ Could not bind API server to {}: {}", addr, err);
            return;
        }
    };

    let display_host = config.display_host().to_string();
    println!(
        "🚀 Server running on http://{}:{}",
        display_host,
        config.port()
    );
    if config.binds_to_all_interfaces() && config.uses_default_host() {
        println!("💡 Local access: http://localhost:{}", config.port());
    }
    println!("📦 API Endpoints:");
    println!("   - POST /layout/place");
    println!("   - POST /layout/arrange");
    println!("   - POST /layout/evaluate");
    println!("   - POST /layout/move");
    println!("   - POST /layout/rotate");
    println!("   - POST /capacity/resolve");
    println!("📑 Documentation:");
    println!("   - GET /docs");
    println!("   - GET /docs/openapi.json");

    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("❌ API server terminated with an error: {err}");
    }
}

/// Places a cargo list sequentially along the deck.
#[utoipa::path(
    post,
    path = "/layout/place",
    request_body = PlaceRequest,
    responses(
        (status = 200, description = "Sequential placement with its report", body = ArrangementResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid deck or cargo data", body = ErrorResponse)
    ),
    tag = "layout"
)]
async fn handle_place(
    State(state): State<ApiState>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Response {
    let request = match unwrap_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let surface = match request.surface.validated() {
        Ok(surface) => surface,
        Err(err) => return validation_error(err),
    };
    let items = match validate_cargo(request.items) {
        Ok(items) => items,
        Err(err) => return validation_error(err),
    };

    println!("📥 Place request: {} items on {}", items.len(), surface.name);
    let placed = place_sequentially(&items, &surface, &state.engine.layout_config());
    let response = ArrangementResponse::evaluate(placed, &surface, &state.engine);
    (StatusCode::OK, Json(response)).into_response()
}

/// Auto-arranges an arrangement with the heaviest items first.
#[utoipa::path(
    post,
    path = "/layout/arrange",
    request_body = ArrangementRequest,
    responses(
        (status = 200, description = "Arranged layout with its report", body = ArrangementResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid deck or cargo data", body = ErrorResponse)
    ),
    tag = "layout"
)]
async fn handle_arrange(
    State(state): State<ApiState>,
    payload: Result<Json<ArrangementRequest>, JsonRejection>,
) -> Response {
    let request = match unwrap_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let (surface, items) = match parse_arrangement(request.surface, request.items) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let mut session = LayoutSession::from_arrangement(
        surface.clone(),
        items,
        state.engine.session_options(),
        state.engine.layout_config(),
    );
    let commit = session.auto_arrange();
    let response = ArrangementResponse::evaluate(commit.items, &surface, &state.engine);
    (StatusCode::OK, Json(response)).into_response()
}

/// Evaluates an arrangement without changing it.
#[utoipa::path(
    post,
    path = "/layout/evaluate",
    request_body = ArrangementRequest,
    responses(
        (status = 200, description = "Validation, collisions and balance", body = LayoutReport),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid deck or cargo data", body = ErrorResponse)
    ),
    tag = "layout"
)]
async fn handle_evaluate(
    State(state): State<ApiState>,
    payload: Result<Json<ArrangementRequest>, JsonRejection>,
) -> Response {
    let request = match unwrap_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let (surface, items) = match parse_arrangement(request.surface, request.items) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let report = LayoutReport::for_surface(&items, &surface, &state.engine.layout_config());
    (StatusCode::OK, Json(report)).into_response()
}

/// Drags one item to a target position and commits.
///
/// The target is clamped into the deck; without Y movement the item stays on
/// its current Y position.
#[utoipa::path(
    post,
    path = "/layout/move",
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Committed layout with its report", body = ArrangementResponse),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid deck or cargo data", body = ErrorResponse)
    ),
    tag = "layout"
)]
async fn handle_move(
    State(state): State<ApiState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Response {
    let request = match unwrap_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let (surface, items) = match parse_arrangement(request.surface, request.items) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let mut options = state.engine.session_options();
    if let Some(allow_y_axis) = request.allow_y_axis {
        options.allow_y_axis = allow_y_axis;
    }
    let mut session = LayoutSession::from_arrangement(
        surface.clone(),
        items,
        options,
        state.engine.layout_config(),
    );

    let commit = session
        .item(&request.id)
        .map(|placed| placed.position())
        .ok_or_else(|| SessionError::UnknownItem(request.id.clone()))
        .and_then(|origin| session.begin_drag(&request.id, origin))
        .and_then(|_| session.drag_to(request.position))
        .and_then(|_| session.end_drag());

    match commit {
        Ok(commit) => {
            let response = ArrangementResponse::evaluate(commit.items, &surface, &state.engine);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => session_error(err),
    }
}

/// Toggles the rotation of one item and commits.
#[utoipa::path(
    post,
    path = "/layout/rotate",
    request_body = RotateRequest,
    responses(
        (status = 200, description = "Committed layout with its report", body = ArrangementResponse),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse),
        (status = CONFLICT, description = "Rotation is locked", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid deck or cargo data", body = ErrorResponse)
    ),
    tag = "layout"
)]
async fn handle_rotate(
    State(state): State<ApiState>,
    payload: Result<Json<RotateRequest>, JsonRejection>,
) -> Response {
    let request = match unwrap_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let (surface, items) = match parse_arrangement(request.surface, request.items) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let mut options: SessionOptions = state.engine.session_options();
    if let Some(allow_rotation) = request.allow_rotation {
        options.allow_rotation = allow_rotation;
    }
    let mut session = LayoutSession::from_arrangement(
        surface.clone(),
        items,
        options,
        state.engine.layout_config(),
    );

    match session.toggle_rotation(&request.id) {
        Ok(commit) => {
            let response = ArrangementResponse::evaluate(commit.items, &surface, &state.engine);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => session_error(err),
    }
}

/// Resolves the deck limits of a transport configuration.
#[utoipa::path(
    post,
    path = "/capacity/resolve",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Resolved limits or the reason they are missing", body = CapacityResolution),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid JSON", body = ErrorResponse)
    ),
    tag = "capacity"
)]
async fn handle_resolve(payload: Result<Json<ResolveRequest>, JsonRejection>) -> Response {
    let request = match unwrap_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let resolution = resolve_capacity(request.unit.as_ref(), &request.attachments);
    (StatusCode::OK, Json(resolution)).into_response()
}

async fn serve_openapi_json() -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    fn state(options: SessionOptions) -> State<ApiState> {
        State(ApiState {
            engine: EngineConfig::new(crate::layout::LayoutConfig::default(), options),
        })
    }

    fn deck() -> LoadSurface {
        LoadSurface::new(12.0, 2.6, 40.0, "Roll-off 07").unwrap()
    }

    fn cargo() -> Vec<CargoItem> {
        vec![
            CargoItem::new("a", "Genie", "GS-3246", "scissor", Dimensions::new(2.48, 1.22, 2.3), 3200.0)
                .unwrap(),
            CargoItem::new("b", "JLG", "450AJ", "boom", Dimensions::new(3.07, 1.75, 2.0), 8165.0)
                .unwrap(),
        ]
    }

    fn arrangement() -> Vec<PlacedItem> {
        place_sequentially(&cargo(), &deck(), &crate::layout::LayoutConfig::default())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[test]
    fn openapi_doc_lists_expected_paths() {
        let doc = openapi_doc();
        let paths = &doc.paths.paths;
        for path in [
            "/layout/place",
            "/layout/arrange",
            "/layout/evaluate",
            "/layout/move",
            "/layout/rotate",
            "/capacity/resolve",
        ] {
            assert!(
                paths.contains_key(path),
                "OpenAPI documentation is missing the {} path",
                path
            );
        }
    }

    #[test]
    fn openapi_doc_contains_key_schemas() {
        let doc = openapi_doc();
        let components = doc
            .components
            .as_ref()
            .expect("OpenAPI documentation contains no components");
        for name in ["PlaceRequest", "ArrangementResponse", "LayoutReport", "ErrorResponse"] {
            assert!(
                components.schemas.contains_key(name),
                "Expected schema '{}' is missing from OpenAPI spec",
                name
            );
        }
    }

    #[tokio::test]
    async fn place_returns_sequential_layout() {
        let request = PlaceRequest {
            surface: deck(),
            items: cargo(),
        };
        let response = handle_place(state(SessionOptions::default()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["placed"][1]["id"], "b");
        let x = body["placed"][1]["positionX"].as_f64().unwrap();
        assert!((x - 2.68).abs() < 1e-9);
        assert_eq!(body["report"]["validation"]["status"], "ok");
    }

    #[tokio::test]
    async fn place_rejects_duplicate_ids() {
        let mut items = cargo();
        items[1].id = "a".to_string();
        let request = PlaceRequest {
            surface: deck(),
            items,
        };
        let response = handle_place(state(SessionOptions::default()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn arrange_puts_heaviest_first() {
        let request = ArrangementRequest {
            surface: deck(),
            items: arrangement(),
        };
        let response = handle_arrange(state(SessionOptions::default()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["placed"][0]["id"], "b");
        let x = body["placed"][1]["positionX"].as_f64().unwrap();
        assert!((x - 3.27).abs() < 1e-9);
    }

    #[tokio::test]
    async fn evaluate_rejects_invalid_surface() {
        let mut surface = deck();
        surface.width = 0.0;
        let request = ArrangementRequest {
            surface,
            items: arrangement(),
        };
        let response = handle_evaluate(state(SessionOptions::default()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn move_respects_y_lock_and_override() {
        let locked = MoveRequest {
            surface: deck(),
            items: arrangement(),
            id: "a".to_string(),
            position: Vec2::new(6.0, 0.0),
            allow_y_axis: None,
        };
        let body = body_json(handle_move(state(SessionOptions::default()), Ok(Json(locked))).await).await;
        assert!((body["placed"][0]["positionX"].as_f64().unwrap() - 6.0).abs() < 1e-9);
        assert!((body["placed"][0]["positionY"].as_f64().unwrap() - 0.69).abs() < 1e-9);

        let free = MoveRequest {
            surface: deck(),
            items: arrangement(),
            id: "a".to_string(),
            position: Vec2::new(6.0, 0.0),
            allow_y_axis: Some(true),
        };
        let body = body_json(handle_move(state(SessionOptions::default()), Ok(Json(free))).await).await;
        assert_eq!(body["placed"][0]["positionY"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn move_unknown_item_is_not_found() {
        let request = MoveRequest {
            surface: deck(),
            items: arrangement(),
            id: "zz".to_string(),
            position: Vec2::zero(),
            allow_y_axis: None,
        };
        let response = handle_move(state(SessionOptions::default()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rotate_is_locked_unless_allowed() {
        let locked = RotateRequest {
            surface: deck(),
            items: arrangement(),
            id: "a".to_string(),
            allow_rotation: None,
        };
        let response = handle_rotate(state(SessionOptions::default()), Ok(Json(locked))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let allowed = RotateRequest {
            surface: deck(),
            items: arrangement(),
            id: "a".to_string(),
            allow_rotation: Some(true),
        };
        let response = handle_rotate(state(SessionOptions::default()), Ok(Json(allowed))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["placed"][0]["rotated"], true);
        assert!((body["placed"][0]["positionY"].as_f64().unwrap() - 0.12).abs() < 1e-9);
    }

    #[tokio::test]
    async fn resolve_reports_missing_attachment() {
        let request = ResolveRequest {
            unit: Some(TransportUnit {
                name: "Tractor 03".to_string(),
                platform: None,
                requires_attachment: true,
            }),
            attachments: Vec::new(),
        };
        let body = body_json(handle_resolve(Ok(Json(request))).await).await;
        assert_eq!(body["status"], "unresolved");
        assert_eq!(body["reason"], "attachment_required");
    }

    #[test]
    fn move_request_parses_camel_case() {
        let json = r#"{
            "surface": {"length": 12.0, "width": 2.6, "capacityTons": 40.0, "name": "Deck"},
            "items": [],
            "id": "a",
            "position": {"x": 1.0, "y": 0.5},
            "allowYAxis": true
        }"#;
        let request: MoveRequest = serde_json::from_str(json).expect("Should parse valid JSON");
        assert_eq!(request.allow_y_axis, Some(true));
        assert_eq!(request.position, Vec2::new(1.0, 0.5));
    }
}
