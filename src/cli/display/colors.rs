//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub network: TableColor,
    pub security: TableColor,
    pub search: TableColor,
    pub logging: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            network: TableColor::Cyan,
            security: TableColor::Yellow,
            search: TableColor::Green,
            logging: TableColor::Blue,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on the CloudFormation resource type
    pub fn get_resource_color(&self, resource_type: &str) -> TableColor {
        if resource_type == "AWS::EC2::SecurityGroup" {
            self.security
        } else if resource_type.starts_with("AWS::EC2::") {
            self.network
        } else if resource_type.starts_with("AWS::OpenSearchService::") {
            self.search
        } else if resource_type.starts_with("AWS::Logs::") {
            self.logging
        } else {
            self.muted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.network, TableColor::Cyan);
        assert_eq!(theme.search, TableColor::Green);
        assert_eq!(theme.muted, TableColor::DarkGrey);
    }

    #[test]
    fn test_get_resource_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_resource_color("AWS::EC2::Subnet"), TableColor::Cyan);
        assert_eq!(
            theme.get_resource_color("AWS::EC2::SecurityGroup"),
            TableColor::Yellow
        );
        assert_eq!(
            theme.get_resource_color("AWS::OpenSearchService::Domain"),
            TableColor::Green
        );
        assert_eq!(theme.get_resource_color("AWS::Logs::LogGroup"), TableColor::Blue);
        assert_eq!(theme.get_resource_color("AWS::S3::Bucket"), TableColor::DarkGrey);
    }
}
