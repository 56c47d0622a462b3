//! CLI argument parsing

use crate::config::RunConfig;
use crate::models::ReportKind;
use crate::{Error, Result};
use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCommit: ",
    env!("FARMINV_GIT_HASH"),
    " (",
    env!("FARMINV_GIT_DATE"),
    ")\nTarget: ",
    env!("FARMINV_BUILD_TARGET"),
);

#[derive(Parser, Debug, Clone)]
#[command(name = "farminv")]
#[command(about = "Inventory a farm hierarchy export into per-report CSV files")]
#[command(version, long_version = LONG_VERSION)]
pub struct CliArgs {
    /// JSON export of the hierarchy to walk
    #[arg(long, value_name = "FILE")]
    pub source: PathBuf,

    /// Directory receiving the report and error files (created if missing)
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// File name prefix for every file written by the run
    #[arg(long, value_name = "PREFIX")]
    pub prefix: String,

    /// Delete <PREFIX>*.csv and <PREFIX>*.txt in the output directory first
    #[arg(long)]
    pub clear_prior_logs: bool,

    /// Count subweb content in web sizes
    #[arg(long)]
    pub include_subweb_sizes: bool,

    /// Enable every report
    #[arg(long)]
    pub full_inventory: bool,

    #[command(flatten)]
    pub reports: ReportFlags,

    /// Emit progress updates every SECS seconds (default: 2)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub progress_interval: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// One switch per report
#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Reports")]
pub struct ReportFlags {
    #[arg(long)]
    pub farm: bool,
    #[arg(long)]
    pub solutions: bool,
    #[arg(long)]
    pub farm_features: bool,
    #[arg(long)]
    pub web_templates: bool,
    #[arg(long)]
    pub web_applications: bool,
    #[arg(long)]
    pub alternate_access_mappings: bool,
    #[arg(long)]
    pub site_collections: bool,
    #[arg(long)]
    pub site_collection_admins: bool,
    #[arg(long)]
    pub site_collection_features: bool,
    #[arg(long)]
    pub webs: bool,
    /// Requires walking every folder of each web
    #[arg(long)]
    pub web_sizes: bool,
    #[arg(long)]
    pub unique_permissions: bool,
    #[arg(long)]
    pub web_features: bool,
    #[arg(long)]
    pub site_content_types: bool,
    #[arg(long)]
    pub web_workflow_associations: bool,
    #[arg(long)]
    pub lists: bool,
    #[arg(long)]
    pub list_fields: bool,
    #[arg(long)]
    pub list_views: bool,
    #[arg(long)]
    pub list_content_types: bool,
    #[arg(long)]
    pub list_workflow_associations: bool,
    #[arg(long)]
    pub content_type_workflow_associations: bool,
    #[arg(long)]
    pub folders: bool,
    #[arg(long)]
    pub list_items: bool,
    #[arg(long)]
    pub web_parts: bool,
}

impl ReportFlags {
    /// Reports whose switch is set, in report order
    #[must_use]
    pub fn selected(&self) -> Vec<ReportKind> {
        let switches = [
            (self.farm, ReportKind::Farm),
            (self.solutions, ReportKind::Solutions),
            (self.farm_features, ReportKind::FarmFeatures),
            (self.web_templates, ReportKind::WebTemplates),
            (self.web_applications, ReportKind::WebApplications),
            (
                self.alternate_access_mappings,
                ReportKind::AlternateAccessMappings,
            ),
            (self.site_collections, ReportKind::SiteCollections),
            (self.site_collection_admins, ReportKind::SiteCollectionAdmins),
            (
                self.site_collection_features,
                ReportKind::SiteCollectionFeatures,
            ),
            (self.webs, ReportKind::Webs),
            (self.web_sizes, ReportKind::WebSizes),
            (self.unique_permissions, ReportKind::UniquePermissions),
            (self.web_features, ReportKind::WebFeatures),
            (self.site_content_types, ReportKind::SiteContentTypes),
            (
                self.web_workflow_associations,
                ReportKind::WebWorkflowAssociations,
            ),
            (self.lists, ReportKind::Lists),
            (self.list_fields, ReportKind::ListFields),
            (self.list_views, ReportKind::ListViews),
            (self.list_content_types, ReportKind::ListContentTypes),
            (
                self.list_workflow_associations,
                ReportKind::ListWorkflowAssociations,
            ),
            (
                self.content_type_workflow_associations,
                ReportKind::ContentTypeWorkflowAssociations,
            ),
            (self.folders, ReportKind::Folders),
            (self.list_items, ReportKind::ListItems),
            (self.web_parts, ReportKind::WebParts),
        ];

        switches
            .into_iter()
            .filter_map(|(on, report)| on.then_some(report))
            .collect()
    }
}

impl CliArgs {
    /// Reports requested on the command line
    #[must_use]
    pub fn selected_reports(&self) -> Vec<ReportKind> {
        if self.full_inventory {
            ReportKind::ALL.to_vec()
        } else {
            self.reports.selected()
        }
    }

    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval.unwrap_or(2))
    }

    /// Build the run configuration.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` when no report is selected or the
    /// output location is invalid.
    pub fn to_run_config(&self) -> Result<RunConfig> {
        let reports = self.selected_reports();
        if reports.is_empty() {
            return Err(Error::InvalidInput(
                "no report selected; pass at least one report flag or --full-inventory"
                    .to_string(),
            ));
        }

        Ok(RunConfig::new(&self.output_dir, &self.prefix, reports)?
            .with_clear_prior_logs(self.clear_prior_logs)
            .with_subweb_sizes(self.include_subweb_sizes))
    }
}
