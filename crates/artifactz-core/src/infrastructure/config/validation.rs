use artifactz_api::FieldCheck;

use super::schema::ArtifactzConfig;

pub const SERVER_URL_MISSING: &str = "Please specify an Artifactz Service URL.";
pub const CREDENTIALS_ID_MISSING: &str = "Please select Artifactz Service credentials.";

/// A configuration field that did not pass its check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub check: FieldCheck,
}

pub fn check_server_url(value: Option<&str>) -> FieldCheck {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => FieldCheck::Ok,
        _ => FieldCheck::Warning(SERVER_URL_MISSING.to_string()),
    }
}

pub fn check_credentials_id(value: Option<&str>) -> FieldCheck {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => FieldCheck::Ok,
        _ => FieldCheck::Warning(CREDENTIALS_ID_MISSING.to_string()),
    }
}

pub fn validate_config(config: &ArtifactzConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let mut push = |field: String, check: FieldCheck| {
        if !check.is_ok() {
            issues.push(ConfigIssue { field, check });
        }
    };

    push(
        "server.url".to_string(),
        check_server_url(Some(&config.server.url)),
    );
    push(
        "server.credentials_id".to_string(),
        check_credentials_id(config.server.credentials_id.as_deref()),
    );

    if config.server.max_attempts == 0 {
        push(
            "server.max_attempts".to_string(),
            FieldCheck::Error("At least one attempt is required".to_string()),
        );
    }

    for (id, entry) in &config.credentials {
        let has_secret = entry.secret.is_some();
        let has_login = entry.username.is_some() && entry.password.is_some();
        let check = match (has_secret, has_login) {
            (true, false) | (false, true) => FieldCheck::Ok,
            (true, true) => FieldCheck::Error(
                "Set either a secret or a username and password, not both".to_string(),
            ),
            (false, false) => FieldCheck::Error(
                "A credential needs a secret or a username and password".to_string(),
            ),
        };
        push(format!("credentials.{id}"), check);
    }

    issues
}
