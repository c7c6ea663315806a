//! Command-line arguments

use std::path::PathBuf;

use artifactz_api::{
    PublishRequest,
    PushRequest,
};
use artifactz_core::ConfigOverrides;
use clap::{
    Args,
    Parser,
    Subcommand,
};

#[derive(Debug, Parser)]
#[command(name = "artifactz")]
#[command(about = "Publish and push artifact versions to an Artifactz registry")]
#[command(version)]
pub struct Cli {
    /// Configuration file, instead of the discovered one
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "ARTIFACTZ_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// Identifier of the secret used as the registry token
    #[arg(long, env = "ARTIFACTZ_CREDENTIALS_ID", global = true)]
    pub credentials_id: Option<String>,

    /// Proxy URL the registry traffic is routed through
    #[arg(long, env = "ARTIFACTZ_PROXY", global = true)]
    pub proxy: Option<String>,

    /// Identifier of the username and password for the proxy
    #[arg(long, env = "ARTIFACTZ_PROXY_CREDENTIALS_ID", global = true)]
    pub proxy_credentials_id: Option<String>,

    /// Name sent to the registry as the caller
    #[arg(long, env = "ARTIFACTZ_SENDER", global = true)]
    pub sender: Option<String>,

    #[arg(long, short = 'v', global = true, help = "Enable debug diagnostics on stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new artifact version at a stage
    Publish(PublishArgs),

    /// Move an artifact to a stage
    Push(PushArgs),

    /// Check that the registry is reachable with the configured credentials
    Validate,

    /// Report problems in the configuration without contacting the registry
    CheckConfig,
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub stage: String,

    #[arg(long)]
    pub version: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Artifact kind, e.g. JAR or DockerImage
    #[arg(long = "type")]
    pub artifact_type: Option<String>,

    #[arg(long)]
    pub group_id: Option<String>,

    #[arg(long)]
    pub artifact_id: Option<String>,

    #[arg(long)]
    pub flow: Option<String>,

    #[arg(long)]
    pub stage_description: Option<String>,
}

#[derive(Debug, Args)]
pub struct PushArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub stage: String,

    /// Explicit version; the registry picks one when omitted
    #[arg(long)]
    pub version: Option<String>,

    /// Print `NAME=<version>` on success so a pipeline can capture it
    #[arg(long, value_name = "NAME")]
    pub variable: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            server_url: self.server_url.clone(),
            credentials_id: self.credentials_id.clone(),
            sender: self.sender.clone(),
            proxy: self.proxy.clone(),
            proxy_credentials_id: self.proxy_credentials_id.clone(),
        }
    }
}

impl PublishArgs {
    pub fn to_request(&self) -> PublishRequest {
        let mut request = PublishRequest::new(&self.name, &self.stage, &self.version);
        if let Some(description) = &self.description {
            request = request.with_description(description);
        }
        if let Some(artifact_type) = &self.artifact_type {
            request = request.with_type(artifact_type);
        }
        if let Some(flow) = &self.flow {
            request = request.with_flow(flow);
        }
        if let Some(stage_description) = &self.stage_description {
            request = request.with_stage_description(stage_description);
        }
        request.with_coordinates(
            self.group_id.as_deref().unwrap_or_default(),
            self.artifact_id.as_deref().unwrap_or_default(),
        )
    }
}

impl PushArgs {
    pub fn to_request(&self) -> PushRequest {
        let request = PushRequest::new(&self.name, &self.stage);
        match &self.version {
            Some(version) => request.with_version(version),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "artifactz",
            "--server-url",
            "http://localhost:5002",
            "publish",
            "--name",
            "test-artifact",
            "--stage",
            "Development",
            "--version",
            "1.0.0",
            "--type",
            "JAR",
            "--group-id",
            "io.iktech.test",
            "--credentials-id",
            "test",
        ])
        .unwrap();

        assert_eq!(cli.server_url.as_deref(), Some("http://localhost:5002"));
        assert_eq!(cli.credentials_id.as_deref(), Some("test"));

        let Command::Publish(args) = cli.command else {
            panic!("expected publish");
        };
        let request = args.to_request();
        assert_eq!(request.name, "test-artifact");
        assert_eq!(request.artifact_type.as_deref(), Some("JAR"));
        assert_eq!(request.group_id.as_deref(), Some("io.iktech.test"));
        assert_eq!(request.artifact_id, None);
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_parse_push_without_version() {
        let cli = Cli::try_parse_from([
            "artifactz",
            "push",
            "--name",
            "test-artifact",
            "--stage",
            "Production",
            "--variable",
            "NEXT_VERSION",
        ])
        .unwrap();

        let Command::Push(args) = cli.command else {
            panic!("expected push");
        };
        assert_eq!(args.variable.as_deref(), Some("NEXT_VERSION"));
        assert_eq!(
            args.to_request(),
            PushRequest::new("test-artifact", "Production")
        );
    }

    #[test]
    fn test_publish_requires_version() {
        let result = Cli::try_parse_from([
            "artifactz",
            "publish",
            "--name",
            "test-artifact",
            "--stage",
            "Development",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_only_carry_given_flags() {
        let cli = Cli::try_parse_from([
            "artifactz",
            "--proxy",
            "http://proxy.iktech.io:3128",
            "validate",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.proxy.as_deref(), Some("http://proxy.iktech.io:3128"));
        assert!(matches!(cli.command, Command::Validate));
    }
}
