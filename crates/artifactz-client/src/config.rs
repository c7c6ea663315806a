use artifactz_api::{
    ClientError,
    ClientResult,
};

pub(crate) const PUBLISH_PATH: &str = "/artifacts";
pub(crate) const PUSH_PATH: &str = "/artifacts/push";
pub(crate) const VALIDATE_PATH: &str = "/validate";

pub(crate) const DEFAULT_SENDER: &str = concat!("artifactz-rs/", env!("CARGO_PKG_VERSION"));

pub(crate) fn normalize_server_url(server_url: &str) -> ClientResult<String> {
    let trimmed = server_url.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ClientError::InvalidConfig(
            "Server URL is required".to_string(),
        ));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidConfig(format!(
            "Server URL must start with http:// or https://: {trimmed}"
        )));
    }

    Ok(trimmed.to_string())
}

pub(crate) fn endpoint(server_url: &str, path: &str) -> String {
    format!("{server_url}{path}")
}
