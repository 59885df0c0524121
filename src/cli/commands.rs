// CLI command definitions

use super::stack::{ConfigCommand, ProfilesCommand, SynthCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "oc-elasticsearch",
    version,
    about = "CloudFormation synthesizer for the OpenSearch cluster stack",
    long_about = "Resolves per-environment deployment settings from SSM Parameter Store and \
                  synthesizes the VPC, security group and OpenSearch domain of the search cluster"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Synthesize the CloudFormation template of an environment
    Synth(SynthCommand),

    /// Show the resolved settings and deployment profile of an environment
    Config(ConfigCommand),

    /// List the built-in deployment profiles
    Profiles(ProfilesCommand),
}
