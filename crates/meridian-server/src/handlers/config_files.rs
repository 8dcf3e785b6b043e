//! Config-file serving handlers: one route per output rendering.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use meridian_core::{ConfigFileFormat, OutputFormat};

use crate::error::AppError;
use crate::extractors::{ClientIp, ConfigFilePath, ConfigFileQuery};
use crate::service::ConfigFileRequest;
use crate::state::AppState;

/// Handler para GET /configfiles/{appId}/{clusterName}/{namespace}
#[instrument(skip_all, fields(
    app_id = %path.app_id,
    cluster = %path.cluster_name,
    namespace = %path.namespace
))]
pub async fn query_config_as_properties(
    State(state): State<AppState>,
    Path(path): Path<ConfigFilePath>,
    Query(query): Query<ConfigFileQuery>,
    ClientIp(peer_ip): ClientIp,
) -> Result<Response, AppError> {
    let body = serve(&state, OutputFormat::Properties, path, query, peer_ip).await?;
    Ok(payload_response(OutputFormat::Properties.content_type(), body))
}

/// Handler para GET /configfiles/json/{appId}/{clusterName}/{namespace}
#[instrument(skip_all, fields(
    app_id = %path.app_id,
    cluster = %path.cluster_name,
    namespace = %path.namespace
))]
pub async fn query_config_as_json(
    State(state): State<AppState>,
    Path(path): Path<ConfigFilePath>,
    Query(query): Query<ConfigFileQuery>,
    ClientIp(peer_ip): ClientIp,
) -> Result<Response, AppError> {
    let body = serve(&state, OutputFormat::Json, path, query, peer_ip).await?;
    Ok(payload_response(OutputFormat::Json.content_type(), body))
}

/// Handler para GET /configfiles/raw/{appId}/{clusterName}/{namespace}
/// El Content-Type sigue el sufijo del namespace pedido.
#[instrument(skip_all, fields(
    app_id = %path.app_id,
    cluster = %path.cluster_name,
    namespace = %path.namespace
))]
pub async fn query_config_as_raw(
    State(state): State<AppState>,
    Path(path): Path<ConfigFilePath>,
    Query(query): Query<ConfigFileQuery>,
    ClientIp(peer_ip): ClientIp,
) -> Result<Response, AppError> {
    let content_type = ConfigFileFormat::from_namespace(&path.namespace).content_type();
    let body = serve(&state, OutputFormat::Raw, path, query, peer_ip).await?;
    Ok(payload_response(content_type, body))
}

async fn serve(
    state: &AppState,
    output: OutputFormat,
    path: ConfigFilePath,
    query: ConfigFileQuery,
    peer_ip: Option<String>,
) -> Result<String, AppError> {
    let request = ConfigFileRequest {
        app_id: path.app_id,
        cluster: path.cluster_name,
        namespace: path.namespace,
        data_center: query.data_center(),
        client_ip: query.client_ip().or(peer_ip),
        client_label: query.client_label(),
    };

    match state.service().query_config(output, &request).await {
        Ok(Some(body)) => Ok(body),
        Ok(None) => Err(AppError::NotFound),
        Err(error) => Err(AppError::Resolver(error.to_string())),
    }
}

fn payload_response(content_type: &'static str, body: String) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}
