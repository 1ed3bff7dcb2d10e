//! Axum HTTP server and handlers
//!
//! The store sits behind an `RwLock`: reads share the lock, every mutating
//! endpoint takes the write half, so the full-collection duplicate re-scan
//! and report rebuild inside each mutation always observe a consistent
//! snapshot.

use std::net::SocketAddr;
use std::path::Path as FsPath;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::model::{PriceRecord, RecordPatch};
use crate::observability::Logger;
use crate::parser;
use crate::report::{display_order_indices, write_text_report};
use crate::store::{PricingStore, RecordSelector, Resolution, WriteOutcome};

use super::errors::{RestError, RestResult};
use super::response::{AmbiguousResponse, LoadSummary, MutationResponse, RecordView, ReportView};

/// Path placeholder addressing the blank-GUID bucket.
const EMPTY_GUID: &str = "EMPTY";

/// Store shared between handlers.
pub type SharedStore = Arc<RwLock<PricingStore>>;

/// REST API server.
pub struct RestServer {
    store: SharedStore,
}

impl RestServer {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Builds the Axum router.
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/pricing", get(service_info))
            .route("/api/pricing/load", post(load_data))
            .route("/api/pricing/report", get(get_report))
            .route("/api/pricing/report/generate", post(generate_report))
            .route(
                "/api/pricing/records",
                get(list_records).post(create_record),
            )
            .route(
                "/api/pricing/records/:guid",
                get(get_record).put(update_record).delete(delete_record),
            )
            .route("/api/pricing/records/:guid/correct", post(correct_record))
            .layer(CorsLayer::permissive())
            .with_state(self.store)
    }

    /// Binds and serves until the process is stopped.
    pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        Logger::info("SERVER_LISTENING", &[("addr", &bound)]);
        axum::serve(listener, router).await
    }
}

fn read_store(store: &SharedStore) -> RestResult<RwLockReadGuard<'_, PricingStore>> {
    store
        .read()
        .map_err(|_| RestError::Internal("store lock poisoned".to_string()))
}

fn write_store(store: &SharedStore) -> RestResult<RwLockWriteGuard<'_, PricingStore>> {
    store
        .write()
        .map_err(|_| RestError::Internal("store lock poisoned".to_string()))
}

#[derive(Debug, Deserialize)]
struct IndexParam {
    index: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadRequest {
    #[serde(default)]
    file_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReportRequest {
    #[serde(default)]
    output_path: Option<String>,
}

/// GET /api/pricing
async fn service_info() -> Json<Value> {
    Json(json!({
        "application": "Pricing Data Validation & Reporting Utility",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "load": "POST /api/pricing/load",
            "report": "GET /api/pricing/report",
            "generateReport": "POST /api/pricing/report/generate",
            "allRecords": "GET /api/pricing/records",
            "createRecord": "POST /api/pricing/records",
            "getRecord": "GET /api/pricing/records/{instrumentGuid}",
            "updateRecord": "PUT /api/pricing/records/{instrumentGuid}",
            "deleteRecord": "DELETE /api/pricing/records/{instrumentGuid}",
            "correctRecord": "POST /api/pricing/records/{instrumentGuid}/correct"
        }
    }))
}

/// POST /api/pricing/load
async fn load_data(
    State(store): State<SharedStore>,
    Json(body): Json<LoadRequest>,
) -> RestResult<Json<LoadSummary>> {
    let path = body.file_path.trim();
    if path.is_empty() {
        return Err(RestError::InvalidRequest("filePath is required".to_string()));
    }

    let records = parser::load_file(FsPath::new(path))?;
    let mut store = write_store(&store)?;
    let report = store.load(records);
    Ok(Json(LoadSummary::new(report)))
}

/// GET /api/pricing/report
async fn get_report(State(store): State<SharedStore>) -> RestResult<Json<ReportView>> {
    let store = read_store(&store)?;
    Ok(Json(ReportView::build(&store)))
}

/// POST /api/pricing/report/generate
async fn generate_report(
    State(store): State<SharedStore>,
    Json(body): Json<GenerateReportRequest>,
) -> RestResult<Json<Value>> {
    let path = body.output_path.unwrap_or_else(|| "report.txt".to_string());
    let store = read_store(&store)?;
    write_text_report(store.report(), FsPath::new(&path))
        .map_err(|e| RestError::Internal(format!("failed to write report: {}", e)))?;
    Ok(Json(json!({
        "message": "Report generated successfully",
        "outputPath": path
    })))
}

/// GET /api/pricing/records
async fn list_records(State(store): State<SharedStore>) -> RestResult<Json<Vec<RecordView>>> {
    let store = read_store(&store)?;
    if store.is_empty() {
        return Err(RestError::NoData);
    }

    let records = store.get_all();
    let views = display_order_indices(&records)
        .into_iter()
        .map(|index| RecordView::new(Some(index), &records[index]))
        .collect();
    Ok(Json(views))
}

/// GET /api/pricing/records/:guid
async fn get_record(
    State(store): State<SharedStore>,
    Path(guid): Path<String>,
    Query(params): Query<IndexParam>,
) -> RestResult<Response> {
    let store = read_store(&store)?;
    let is_placeholder = guid.eq_ignore_ascii_case(EMPTY_GUID);
    let lookup = if is_placeholder { "" } else { guid.as_str() };

    // An explicit index short-circuits GUID resolution entirely
    if let Some(index) = params.index {
        let record = store
            .get(index)
            .ok_or_else(|| RestError::NotFound(format!("Record not found at index: {}", index)))?;
        return Ok(Json(RecordView::new(Some(index), record)).into_response());
    }

    match store.resolve(&RecordSelector::guid(lookup)) {
        Resolution::One(index) => {
            let record = store.get(index).expect("resolved index is in range");
            Ok(Json(RecordView::new(Some(index), record)).into_response())
        }
        Resolution::Ambiguous(indices) => Ok(ambiguous_conflict(&store, &guid, indices)),
        Resolution::NotFound => Err(not_found_for(&guid, is_placeholder)),
    }
}

/// PUT /api/pricing/records/:guid
async fn update_record(
    State(store): State<SharedStore>,
    Path(guid): Path<String>,
    Query(params): Query<IndexParam>,
    Json(patch): Json<RecordPatch>,
) -> RestResult<Response> {
    let mut store = write_store(&store)?;
    let selector = mutation_selector(&store, &guid, params.index)?;
    let outcome = store.update(&selector, &patch);
    mutation_response(&store, outcome, &guid, "Record updated successfully")
}

/// POST /api/pricing/records/:guid/correct
async fn correct_record(
    State(store): State<SharedStore>,
    Path(guid): Path<String>,
    Query(params): Query<IndexParam>,
    Json(patch): Json<RecordPatch>,
) -> RestResult<Response> {
    let mut store = write_store(&store)?;
    let selector = mutation_selector(&store, &guid, params.index)?;
    let outcome = store.correct(&selector, &patch);
    mutation_response(&store, outcome, &guid, "Record corrected successfully")
}

/// DELETE /api/pricing/records/:guid
async fn delete_record(
    State(store): State<SharedStore>,
    Path(guid): Path<String>,
    Query(params): Query<IndexParam>,
) -> RestResult<Response> {
    let mut store = write_store(&store)?;
    let selector = mutation_selector(&store, &guid, params.index)?;
    match store.delete(&selector) {
        WriteOutcome::Applied { index } => Ok(Json(json!({
            "message": "Record deleted successfully",
            "index": index,
            "indexNote": "Indices of later records shifted down by one"
        }))
        .into_response()),
        outcome => mutation_response(&store, outcome, &guid, ""),
    }
}

/// POST /api/pricing/records
async fn create_record(
    State(store): State<SharedStore>,
    Json(body): Json<RecordPatch>,
) -> RestResult<Response> {
    let record = PriceRecord::new(
        body.instrument_guid.clone(),
        body.trade_date,
        body.price,
        body.exchange.clone(),
        body.product_type.clone(),
    );

    let mut store = write_store(&store)?;
    match store.create(record) {
        WriteOutcome::Applied { index } => {
            let view = store.get(index).map(|r| RecordView::new(Some(index), r));
            let body = MutationResponse {
                message: "Record created successfully".to_string(),
                index,
                record: view,
            };
            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
        WriteOutcome::Rejected(reason) => Err(RestError::Rejected(reason)),
        _ => Err(RestError::Internal(
            "unexpected outcome from create".to_string(),
        )),
    }
}

/// Translates path GUID + optional index into a store selector, enforcing the
/// legacy addressing guards: an index must agree with the path GUID, and
/// blank-GUID records must be named via the `EMPTY` placeholder plus an index.
fn mutation_selector(
    store: &PricingStore,
    path_guid: &str,
    index: Option<usize>,
) -> RestResult<RecordSelector> {
    let is_placeholder = path_guid.eq_ignore_ascii_case(EMPTY_GUID);

    match index {
        Some(index) => {
            let record = store.get(index).ok_or_else(|| {
                RestError::NotFound(format!("Record not found at index: {}", index))
            })?;
            match record.guid() {
                None if !is_placeholder => Err(RestError::InvalidRequest(format!(
                    "Record at index {} has a blank GUID. Use '{}' as the GUID placeholder",
                    index, EMPTY_GUID
                ))),
                Some(actual) if !is_placeholder && actual != path_guid => {
                    Err(RestError::InvalidRequest(format!(
                        "GUID mismatch: record at index {} has GUID '{}', not '{}'",
                        index, actual, path_guid
                    )))
                }
                _ => Ok(RecordSelector::index(index)),
            }
        }
        None if is_placeholder => Err(RestError::InvalidRequest(
            "Blank-GUID records must be addressed with the ?index parameter \
             (list indices via GET /api/pricing/records)"
                .to_string(),
        )),
        None => Ok(RecordSelector::guid(path_guid)),
    }
}

fn mutation_response(
    store: &PricingStore,
    outcome: WriteOutcome,
    path_guid: &str,
    message: &str,
) -> RestResult<Response> {
    match outcome {
        WriteOutcome::Applied { index } => {
            let view = store.get(index).map(|r| RecordView::new(Some(index), r));
            Ok(Json(MutationResponse {
                message: message.to_string(),
                index,
                record: view,
            })
            .into_response())
        }
        WriteOutcome::NotFound => Err(not_found_for(
            path_guid,
            path_guid.eq_ignore_ascii_case(EMPTY_GUID),
        )),
        WriteOutcome::Ambiguous { matches } => Ok(ambiguous_conflict(store, path_guid, matches)),
        WriteOutcome::Rejected(reason) => Err(RestError::Rejected(reason)),
    }
}

fn ambiguous_conflict(store: &PricingStore, path_guid: &str, indices: Vec<usize>) -> Response {
    let is_placeholder = path_guid.eq_ignore_ascii_case(EMPTY_GUID);
    let guid_display = if is_placeholder {
        "(empty)"
    } else {
        path_guid
    };
    let views = indices
        .into_iter()
        .filter_map(|index| store.get(index).map(|r| RecordView::new(Some(index), r)))
        .collect();
    let body = AmbiguousResponse::new(guid_display, path_guid, views);
    (StatusCode::CONFLICT, Json(body)).into_response()
}

fn not_found_for(path_guid: &str, is_placeholder: bool) -> RestError {
    if is_placeholder {
        RestError::NotFound("Record not found for empty/null GUID".to_string())
    } else {
        RestError::NotFound(format!("Record not found for GUID: {}", path_guid))
    }
}
