use crate::core::mapping::FieldMapping;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "tax-etl")]
#[command(about = "Move tax rate records between CSV files and the HubSpot CRM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file in addition to the console
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// Log system resource usage per phase
    #[arg(long, global = true)]
    pub monitor: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import tax records from a CSV file into HubSpot
    Import(ImportArgs),
    /// Export tax objects from HubSpot
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the CSV file containing tax data
    pub csv_file: String,

    /// HubSpot portal name (default: defaultPortal from config)
    #[arg(long)]
    pub portal: Option<String>,

    /// Path to the HubSpot config file
    #[arg(long, default_value = "hubspot.config.yml")]
    pub config: String,

    /// Path to an optional TOML job config
    #[arg(long)]
    pub job_config: Option<String>,

    /// Field mapping variant to apply
    #[arg(long, value_enum)]
    pub mapping: Option<MappingVariant>,

    /// Validate the CSV without importing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// HubSpot portal name (default: defaultPortal from config)
    #[arg(long)]
    pub portal: Option<String>,

    /// Path to the HubSpot config file
    #[arg(long, default_value = "hubspot.config.yml")]
    pub config: String,

    /// Path to an optional TOML job config
    #[arg(long)]
    pub job_config: Option<String>,

    /// Page size for the list endpoint (1-100)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Path for the output file (csv and json formats)
    #[arg(long)]
    pub output: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MappingVariant {
    Jurisdiction,
    Simple,
}

impl MappingVariant {
    pub fn to_mapping(self) -> FieldMapping {
        match self {
            MappingVariant::Jurisdiction => FieldMapping::jurisdiction(),
            MappingVariant::Simple => FieldMapping::simple(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Table,
}

impl Validate for ImportArgs {
    fn validate(&self) -> Result<()> {
        validate_path("csv_file", &self.csv_file)?;
        validate_path("config", &self.config)?;

        if let Some(portal) = &self.portal {
            validate_non_empty_string("portal", portal)?;
        }

        Ok(())
    }
}

impl Validate for ExportArgs {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;

        if let Some(portal) = &self.portal {
            validate_non_empty_string("portal", portal)?;
        }

        if let Some(limit) = self.limit {
            validate_range("limit", limit, 1, 100)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_args_validation() {
        let args = ImportArgs {
            csv_file: "taxes.csv".to_string(),
            portal: None,
            config: "hubspot.config.yml".to_string(),
            job_config: None,
            mapping: None,
            dry_run: false,
        };
        assert!(args.validate().is_ok());

        let empty_path = ImportArgs {
            csv_file: String::new(),
            ..args
        };
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn test_export_args_limit_bounds() {
        let args = ExportArgs {
            portal: None,
            config: "hubspot.config.yml".to_string(),
            job_config: None,
            limit: Some(100),
            output: None,
            format: OutputFormat::Table,
        };
        assert!(args.validate().is_ok());

        let oversized = ExportArgs {
            limit: Some(101),
            ..args
        };
        assert!(oversized.validate().is_err());
    }
}
