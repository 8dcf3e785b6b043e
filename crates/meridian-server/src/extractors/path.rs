use serde::Deserialize;

/// Extractor para rutas /configfiles/.../{appId}/{clusterName}/{namespace}.
/// El segmento namespace admite puntos (sufijos de formato incluidos).
#[derive(Debug, Deserialize)]
pub struct ConfigFilePath {
    pub app_id: String,
    pub cluster_name: String,
    pub namespace: String,
}
