//! Table rendering for CLI output

use super::ColorTheme;
use crate::domain::config::{CapacityConfig, DeploymentType};
use crate::domain::stack::SearchStack;
use crate::infrastructure::cloudformation::Template;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Render the built-in deployment profiles
    pub fn render_profiles(&self) -> String {
        let mut table = Self::new_table();
        table.set_header(vec![
            Cell::new("TYPE").set_alignment(CellAlignment::Left),
            Cell::new("AZS").set_alignment(CellAlignment::Center),
            Cell::new("DATA NODES").set_alignment(CellAlignment::Left),
            Cell::new("MASTER NODES").set_alignment(CellAlignment::Left),
        ]);

        for deployment_type in DeploymentType::ALL {
            let profile = deployment_type.profile();
            table.add_row(vec![
                Cell::new(deployment_type.as_str()).fg(self.theme.search),
                Cell::new(profile.num_azs).set_alignment(CellAlignment::Center),
                Cell::new(data_nodes(&profile.capacity)),
                Cell::new(master_nodes(&profile.capacity)),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Deployment Profiles {} ─╮\n",
            format!("[{} profiles]", DeploymentType::ALL.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }

    /// Render resolved settings and the selected profile
    pub fn render_stack_config(&self, stack: &SearchStack) -> String {
        let settings = stack.settings();
        let profile = stack.profile();

        let mut table = Self::new_table();
        table.set_header(vec![Cell::new("SETTING"), Cell::new("VALUE")]);

        let rows = [
            ("Environment", stack.environment().to_string()),
            ("Stack", stack.stack_name()),
            ("Domain", settings.es_domain_name.clone()),
            ("Deployment type", settings.deployment_type.to_string()),
            ("VPC CIDR", settings.vpc_cidr.clone()),
            ("Availability zones", profile.num_azs.to_string()),
            ("Data nodes", data_nodes(&profile.capacity)),
            ("Master nodes", master_nodes(&profile.capacity)),
        ];
        for (key, value) in rows {
            table.add_row(vec![Cell::new(key).fg(self.theme.network), Cell::new(value)]);
        }

        table.add_row(vec![
            Cell::new("Notification email").fg(self.theme.network),
            optional_cell(settings.notification_email.as_deref(), &self.theme),
        ]);
        table.add_row(vec![
            Cell::new("Notification webhook").fg(self.theme.network),
            optional_cell(
                settings
                    .notification_slack_url
                    .as_deref()
                    .map(mask_url)
                    .as_deref(),
                &self.theme,
            ),
        ]);

        let tags: Vec<String> = stack
            .tags()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        table.add_row(vec![
            Cell::new("Tags").fg(self.theme.network),
            Cell::new(tags.join("\n")),
        ]);

        table.to_string()
    }

    /// Render the resources of a synthesized template
    pub fn render_resources(&self, stack_name: &str, template: &Template) -> String {
        let mut table = Self::new_table();
        table.set_header(vec![
            Cell::new("LOGICAL ID").set_alignment(CellAlignment::Left),
            Cell::new("TYPE").set_alignment(CellAlignment::Left),
            Cell::new("POLICY").set_alignment(CellAlignment::Center),
        ]);

        for (logical_id, resource) in &template.resources {
            let policy = resource
                .deletion_policy
                .map(|p| format!("{:?}", p))
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(logical_id),
                Cell::new(&resource.resource_type)
                    .fg(self.theme.get_resource_color(&resource.resource_type)),
                Cell::new(policy)
                    .fg(Color::Yellow)
                    .set_alignment(CellAlignment::Center),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Stack {} {} ─╮\n",
            stack_name,
            format!("[{} resources]", template.resources.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }
}

fn data_nodes(capacity: &CapacityConfig) -> String {
    format!("{} × {}", capacity.data_nodes, capacity.data_node_instance_type)
}

fn master_nodes(capacity: &CapacityConfig) -> String {
    format!(
        "{} × {}",
        capacity.master_nodes, capacity.master_node_instance_type
    )
}

fn optional_cell(value: Option<&str>, theme: &ColorTheme) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("(not set)").fg(theme.muted),
    }
}

/// Webhook URLs carry their secret in the path; only the host is shown.
fn mask_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let host = rest.split('/').next().unwrap_or_default();
            format!("{}://{}/***", scheme, host)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{DeploymentSettings, EnvironmentName};

    fn stack() -> SearchStack {
        SearchStack::new(
            EnvironmentName::new("dev").unwrap(),
            DeploymentSettings {
                es_domain_name: "oc-search".to_string(),
                notification_email: None,
                notification_slack_url: Some(
                    "https://hooks.slack.com/services/T000/B000/secret".to_string(),
                ),
                deployment_type: DeploymentType::Dev,
                vpc_cidr: "10.1.0.0/24".to_string(),
            },
        )
    }

    #[test]
    fn test_render_profiles() {
        let output = TableRenderer::new().render_profiles();
        assert!(output.contains("t3.medium.search"));
        assert!(output.contains("r6g.large.search"));
        assert!(output.contains("c6g.large.search"));
    }

    #[test]
    fn test_render_stack_config_masks_webhook() {
        let output = TableRenderer::new().render_stack_config(&stack());
        assert!(output.contains("oc-search-stack"));
        assert!(output.contains("https://hooks.slack.com/***"));
        assert!(!output.contains("secret"));
        assert!(output.contains("(not set)"));
    }

    #[test]
    fn test_render_resources() {
        let stack = stack();
        let template = stack.synthesize().unwrap();
        let output = TableRenderer::new().render_resources(&stack.stack_name(), &template);
        assert!(output.contains("EsDomain"));
        assert!(output.contains("AWS::OpenSearchService::Domain"));
        assert!(output.contains("Retain"));
    }

    #[test]
    fn test_mask_url() {
        assert_eq!(mask_url("not a url"), "***");
        assert_eq!(mask_url("https://example.org"), "https://example.org/***");
    }
}
