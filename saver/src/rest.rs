use crate::db;
use crate::errors::Error;
use crate::metrics::{
    QUERIES_TOTAL, READINGS_RECEIVED_TOTAL, READINGS_REJECTED_TOTAL, READINGS_SAVED_TOTAL,
};
use crate::model::{Reading, ReadingPayload};
use crate::validate::validate;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use sqlx::SqlitePool;
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
struct AppState {
    pool: SqlitePool,
}

pub fn create_router(pool: SqlitePool) -> Router {
    let state = AppState { pool };

    Router::new()
        .route("/save", any(save))
        .route("/get", any(get_readings))
        .with_state(state)
}

async fn save(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    READINGS_RECEIVED_TOTAL.inc();

    let reading = serde_json::from_slice::<ReadingPayload>(&body)
        .map_err(Error::from)
        .and_then(ReadingPayload::into_reading)
        .and_then(|r| validate(&r).map(|()| r))
        .inspect_err(|_| READINGS_REJECTED_TOTAL.inc())?;

    let serial = db::insert_reading(&state.pool, &reading).await?;
    READINGS_SAVED_TOTAL.inc();
    debug!("Saved reading {} from device {}", serial, reading.device_id);

    Ok((StatusCode::OK, "Success!"))
}

async fn get_readings(
    method: Method,
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Vec<Reading>>, AppError> {
    if method != Method::GET {
        return Err(Error::MethodNotAllowed.into());
    }

    // First occurrence wins when deviceId is repeated.
    let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(&uri)?;
    let device_id = params
        .into_iter()
        .find(|(key, _)| key == "deviceId")
        .map(|(_, value)| value);

    let readings = match device_id.as_deref().filter(|id| !id.is_empty()) {
        Some(raw) => {
            let device_id: i64 = raw.parse().map_err(Error::from)?;
            db::fetch_by_device(&state.pool, device_id).await?
        }
        None => db::fetch_all(&state.pool).await?,
    };

    QUERIES_TOTAL.inc();
    Ok(Json(readings))
}

pub struct AppError(Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            Error::Json(_)
            | Error::Timestamp(_)
            | Error::Validation(_)
            | Error::Filter(_)
            | Error::Query(_) => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("API error: {}", self.0);
        } else {
            warn!("Rejected request: {}", self.0);
        }
        (status, format!("ERROR: {}\n", self.0)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
