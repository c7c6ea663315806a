use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use artifactz_api::FieldCheck;
use artifactz_client::HttpConnector;
use artifactz_core::infrastructure::config::validate_config;
use artifactz_core::{
    ArtifactzConfig,
    ArtifactzContext,
    ChainedCredentialStore,
    ConfigLoader,
    ConsoleLogSink,
    CredentialStore,
    EnvCredentialStore,
    ExecutionResult,
    FailureFlag,
    HostCallbacks,
    MemoryCredentialStore,
};

use crate::cli::{
    Cli,
    Command,
};

/// How the invocation ended, as seen by the calling pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
    Interrupted,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Succeeded => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::Interrupted => ExitCode::from(130),
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path),
        None => ConfigLoader::load_default(),
    }
    .context("Failed to load configuration")?;
    config.apply_overrides(cli.overrides());

    let sink = ConsoleLogSink;
    let flag = FailureFlag::new();
    let host = HostCallbacks::new(&sink, &flag);

    let outcome = match &cli.command {
        Command::Publish(args) => {
            let request = args.to_request();
            let context = registry_context(&config)?;
            let call = context.publish_service.publish(&request, &config, host);
            until_interrupted(call).await.map(|result| outcome_of(&result))
        }
        Command::Push(args) => {
            let request = args.to_request();
            let context = registry_context(&config)?;
            let call = context.push_service.push(&request, &config, host);
            until_interrupted(call).await.map(|result| {
                if let (Ok(version), Some(variable)) = (&result, &args.variable) {
                    println!("{variable}={version}");
                }
                outcome_of(&result)
            })
        }
        Command::Validate => {
            let context = registry_context(&config)?;
            let call = context.connection_service.test_connection(&config);
            until_interrupted(call).await.map(|result| match result {
                Ok(message) => {
                    println!("{message}");
                    Outcome::Succeeded
                }
                Err(failure) => {
                    println!("{failure}");
                    Outcome::Failed
                }
            })
        }
        Command::CheckConfig => Some(check_config(&config)),
    };

    Ok(match outcome {
        Some(outcome) if flag.is_failed() => {
            tracing::debug!(?outcome, failures = flag.count(), "Execution marked as failed");
            Outcome::Failed
        }
        Some(outcome) => outcome,
        None => {
            tracing::warn!("Interrupted, abandoning the registry call");
            Outcome::Interrupted
        }
    })
}

/// Credentials come from the config file first, then the environment
fn registry_context(config: &ArtifactzConfig) -> anyhow::Result<ArtifactzContext> {
    let file_store =
        MemoryCredentialStore::from_config(config).context("Invalid [credentials] section")?;
    let stores: Vec<Arc<dyn CredentialStore>> =
        vec![Arc::new(file_store), Arc::new(EnvCredentialStore::new())];
    let store: Arc<dyn CredentialStore> = Arc::new(ChainedCredentialStore::new(stores));
    Ok(ArtifactzContext::new(Arc::new(HttpConnector), store))
}

/// Runs the call unless Ctrl-C arrives first, in which case the call is
/// dropped mid-flight
async fn until_interrupted<F: Future>(call: F) -> Option<F::Output> {
    tokio::select! {
        output = call => Some(output),
        _ = tokio::signal::ctrl_c() => None,
    }
}

fn outcome_of<T>(result: &ExecutionResult<T>) -> Outcome {
    match result {
        Ok(_) => Outcome::Succeeded,
        Err(_) => Outcome::Failed,
    }
}

fn check_config(config: &ArtifactzConfig) -> Outcome {
    let issues = validate_config(config);

    if issues.is_empty() {
        println!("Configuration OK");
        return Outcome::Succeeded;
    }

    for issue in &issues {
        println!(
            "{}: {}: {}",
            issue.check.kind(),
            issue.field,
            issue.check.message().unwrap_or_default()
        );
    }

    if issues
        .iter()
        .any(|issue| matches!(issue.check, FieldCheck::Error(_)))
    {
        Outcome::Failed
    } else {
        Outcome::Succeeded
    }
}
