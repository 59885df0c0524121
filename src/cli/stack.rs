//! Stack synthesis commands

use crate::cli::display::TableRenderer;
use crate::domain::config::{parse_dynamic_configs, EnvironmentName};
use crate::domain::stack::StackDescriptor;
use crate::infrastructure::cloudformation::OutputFormat;
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where the deployment settings of an environment come from
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Deployment environment; settings are read from
    /// /oc-elasticsearch-cdk/config/<ENVIRONMENT>
    #[arg(long, short = 'e', env = "OC_ELASTICSEARCH_ENVIRONMENT")]
    pub environment: Option<String>,

    /// AWS region of the parameter store
    /// If not specified, uses the default AWS region resolution
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Read settings from a local JSON file instead of the parameter store
    #[arg(long, value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    /// Dynamic configuration properties to override settings (-D key=value)
    ///
    /// Settings: stack.domain-name, stack.deployment-type, stack.vpc-cidr,
    /// stack.notification-email, stack.notification-slack-url
    /// Tags: stack.tag.KEY (added to every taggable resource)
    ///
    /// Example: -Dstack.deployment-type=prod -Dstack.tag.owner=search-team
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl SourceArgs {
    /// Fails before any AWS client is created when no environment is set.
    fn environment(&self) -> anyhow::Result<EnvironmentName> {
        Ok(EnvironmentName::from_optional(self.environment.as_deref())?)
    }

    fn overrides(&self) -> anyhow::Result<BTreeMap<String, String>> {
        parse_dynamic_configs(&self.properties)
            .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))
    }

    async fn descriptor(&self) -> StackDescriptor {
        match &self.settings_file {
            Some(path) => StackDescriptor::with_settings_file(path.clone()),
            None => StackDescriptor::new(self.region.clone()).await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct SynthCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Template format (json, yaml)
    #[arg(long, short = 'f', default_value = "json")]
    pub format: OutputFormat,

    /// Write the template to this file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfilesCommand {}

impl SynthCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let environment = self.source.environment()?;
        let overrides = self.source.overrides()?;
        let descriptor = self.source.descriptor().await;

        let (stack, template) = descriptor
            .synthesize(Some(environment.as_str()), &overrides)
            .await?;
        let rendered = template.render(self.format)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered).map_err(|e| {
                    anyhow::anyhow!("Failed to write template to {}: {}", path.display(), e)
                })?;
                let renderer = TableRenderer::new();
                println!(
                    "{}",
                    renderer.render_resources(&stack.stack_name(), &template)
                );
                println!(
                    "Template for stack {} written to {}",
                    stack.stack_name(),
                    path.display()
                );
            }
            None => println!("{}", rendered),
        }

        Ok(())
    }
}

impl ConfigCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let environment = self.source.environment()?;
        let overrides = self.source.overrides()?;
        let descriptor = self.source.descriptor().await;

        let stack = descriptor
            .load_stack(Some(environment.as_str()), &overrides)
            .await?;

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_stack_config(&stack));
        Ok(())
    }
}

impl ProfilesCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let renderer = TableRenderer::new();
        println!("{}", renderer.render_profiles());
        Ok(())
    }
}
