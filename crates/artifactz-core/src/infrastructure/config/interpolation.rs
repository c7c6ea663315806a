use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),

    #[error("Recursive interpolation limit exceeded")]
    RecursionLimit,
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

const MAX_DEPTH: usize = 10;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

/// Replaces `${VAR}` and `${VAR:-default}` with values from the environment.
/// Substituted values are not scanned again; defaults are.
pub fn interpolate(input: &str) -> InterpolationResult<String> {
    interpolate_at(input, 0)
}

fn interpolate_at(input: &str, depth: usize) -> InterpolationResult<String> {
    if depth > MAX_DEPTH {
        return Err(InterpolationError::RecursionLimit);
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for captures in VAR_PATTERN.captures_iter(input) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        output.push_str(&input[last..whole.start()]);
        output.push_str(&resolve(&captures, depth)?);
        last = whole.end();
    }

    output.push_str(&input[last..]);
    Ok(output)
}

fn resolve(captures: &Captures<'_>, depth: usize) -> InterpolationResult<String> {
    let name = &captures[1];

    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(_) => match captures.get(2) {
            Some(default) => interpolate_at(default.as_str(), depth + 1),
            None => Err(InterpolationError::RequiredVarNotFound(name.to_string())),
        },
    }
}

pub fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => {
            *s = interpolate(s)?;
        }
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                interpolate_toml(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn has_variables(input: &str) -> bool {
    VAR_PATTERN.is_match(input)
}
