//! RIMO CLI application.

use super::types::{DumpFormat, RdfOutputFormat, ReportFormat, RimoCli, RimoCommand};
use crate::config::load_rimo_config;
use crate::generator::{BaseOntologyGenerator, InstanceGenerator, OntologyGenerator};
use crate::graph::{OntologyGraph, RdfSerializationFormat};
use crate::loader::{BaseOntology, SheetReader, source_for};
use crate::namespace::Namespace;
use crate::validator::RecordValidator;
use clap::Parser;
use colored::Colorize;
use rimo_core::{KpiRecord, Result, RimoConfig, RimoError, ValidationReport, ValidationSeverity};
use std::fmt::Write as FmtWrite;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

/// Main RIMO CLI application
pub struct RimoApp {
    cli: RimoCli,
}

impl RimoApp {
    /// Create a new application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self {
            cli: RimoCli::parse(),
        }
    }

    /// Create a new application with a custom CLI configuration
    #[must_use]
    pub fn new(cli: RimoCli) -> Self {
        Self { cli }
    }

    /// Run the RIMO application
    ///
    /// # Errors
    ///
    /// Returns error if configuration, loading, generation or output fails,
    /// or if validation does not pass.
    pub async fn run(self) -> Result<()> {
        self.init_logging();
        info!("Starting RIMO builder");

        match self.execute_command().await {
            Ok(()) => {
                info!("Command completed successfully");
                Ok(())
            }
            Err(err) => {
                error!("Command failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("Error: {err}");
                }
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags
    ///
    /// Logs go to stderr so that `-o -` output stays clean.
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            tracing::Level::ERROR
        } else if self.cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    async fn execute_command(&self) -> Result<()> {
        let config = load_rimo_config(self.cli.config.as_deref())?;

        match &self.cli.command {
            RimoCommand::BuildBase {
                input,
                output,
                format,
            } => {
                self.build_base_command(&config, input.as_deref(), output, *format)
                    .await
            }
            RimoCommand::BuildInstances {
                input,
                base,
                output,
                format,
            } => {
                self.build_instances_command(
                    &config,
                    input.as_deref(),
                    base.as_deref(),
                    output,
                    *format,
                )
                .await
            }
            RimoCommand::Build {
                input,
                base_output,
                instances_output,
                format,
            } => {
                self.build_command(
                    &config,
                    input.as_deref(),
                    base_output,
                    instances_output,
                    *format,
                )
                .await
            }
            RimoCommand::Validate {
                input,
                base,
                strict,
                report,
            } => {
                self.validate_command(&config, input.as_deref(), base.as_deref(), *strict, *report)
                    .await
            }
            RimoCommand::Inspect {
                input,
                format,
                output,
            } => {
                self.inspect_command(&config, input.as_deref(), *format, output.as_deref())
                    .await
            }
        }
    }

    async fn build_base_command(
        &self,
        config: &RimoConfig,
        input: Option<&str>,
        output: &Path,
        format: RdfOutputFormat,
    ) -> Result<()> {
        let records = self.load_records(config, input).await?;
        Self::lint_for_build(config, &records, None)?;

        let generator = BaseOntologyGenerator::new(config)?;
        let graph = generator.generate(&records)?;
        write_graph(&graph, output, format.into()).await
    }

    async fn build_instances_command(
        &self,
        config: &RimoConfig,
        input: Option<&str>,
        base: Option<&Path>,
        output: &Path,
        format: RdfOutputFormat,
    ) -> Result<()> {
        let records = self.load_records(config, input).await?;
        let base = match base {
            Some(path) => Some(BaseOntology::load(path).await?),
            None => {
                warn!("No base ontology given, using configured namespace and vocabulary");
                None
            }
        };
        Self::lint_for_build(config, &records, base.as_ref())?;

        let mut generator = InstanceGenerator::new(config)?;
        if let Some(base) = &base {
            generator = generator.with_base(base)?;
        }

        let graph = generator.generate(&records)?;
        write_graph(&graph, output, format.into()).await
    }

    async fn build_command(
        &self,
        config: &RimoConfig,
        input: Option<&str>,
        base_output: &Path,
        instances_output: &Path,
        format: RdfOutputFormat,
    ) -> Result<()> {
        let records = self.load_records(config, input).await?;

        let base_generator = BaseOntologyGenerator::new(config)?;
        let base = BaseOntology::from_graph(base_generator.generate(&records)?);
        Self::lint_for_build(config, &records, Some(&base))?;
        write_graph(base.graph(), base_output, format.into()).await?;

        let instance_generator = InstanceGenerator::new(config)?.with_base(&base)?;
        let instance_graph = instance_generator.generate(&records)?;
        write_graph(&instance_graph, instances_output, format.into()).await
    }

    async fn validate_command(
        &self,
        config: &RimoConfig,
        input: Option<&str>,
        base: Option<&Path>,
        strict: bool,
        format: ReportFormat,
    ) -> Result<()> {
        let records = self.load_records(config, input).await?;

        let base = match base {
            Some(path) => Some(BaseOntology::load(path).await?),
            None => None,
        };
        let report = record_validator(config, base.as_ref())?.validate(&records);

        let rendered = match format {
            ReportFormat::Pretty => render_report_pretty(&report, strict),
            ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        };
        println!("{rendered}");

        if report.passes(strict) {
            Ok(())
        } else {
            Err(RimoError::ValidationFailed {
                errors: report.error_count(),
                warnings: report.warning_count(),
            })
        }
    }

    async fn inspect_command(
        &self,
        config: &RimoConfig,
        input: Option<&str>,
        format: DumpFormat,
        output: Option<&Path>,
    ) -> Result<()> {
        let records = self.load_records(config, input).await?;
        let body = match format {
            DumpFormat::Json => serde_json::to_string_pretty(&records)?,
            DumpFormat::Yaml => serde_yaml::to_string(&records)?,
        };

        match output {
            Some(path) => write_output(body.as_bytes(), path).await,
            None => {
                println!("{body}");
                Ok(())
            }
        }
    }

    async fn load_records(&self, config: &RimoConfig, input: Option<&str>) -> Result<Vec<KpiRecord>> {
        let location = input
            .map(str::to_string)
            .or_else(|| config.source.location.clone())
            .ok_or_else(|| {
                RimoError::config("no sheet given: pass --input or set source.location")
            })?;

        let source = source_for(
            &location,
            Duration::from_secs(config.source.timeout_secs),
            !self.cli.quiet,
        );
        let records = SheetReader::new()
            .with_skip_rows(config.source.skip_rows)
            .load(source.as_ref())
            .await?;

        if records.is_empty() {
            warn!("Sheet {} contains no KPI rows", location);
        }
        Ok(records)
    }

    /// Log blocking findings before writing; builds never fail on them
    fn lint_for_build(
        config: &RimoConfig,
        records: &[KpiRecord],
        base: Option<&BaseOntology>,
    ) -> Result<()> {
        let report = record_validator(config, base)?.validate(records);
        for message in report
            .messages
            .iter()
            .filter(|m| m.severity == ValidationSeverity::Error)
        {
            warn!("{}", message);
        }
        if report.warning_count() > 0 {
            info!(
                "{} curation warnings, run `rimo validate` for details",
                report.warning_count()
            );
        }
        Ok(())
    }
}

/// Lint set-up shared by `validate` and the build commands
///
/// With a base ontology, its categories count as known and identifiers are
/// checked in its `rimo` namespace.
fn record_validator(config: &RimoConfig, base: Option<&BaseOntology>) -> Result<RecordValidator> {
    let validator = RecordValidator::new(config.vocabulary.clone());
    match base {
        Some(base) => validator.with_base(base, &config.namespace.base),
        None => Ok(validator.with_namespace(Namespace::new(config.namespace.base.as_str())?)),
    }
}

fn render_report_pretty(report: &ValidationReport, strict: bool) -> String {
    let mut buffer = String::new();
    for message in &report.messages {
        let line = message.to_string();
        let line = match message.severity {
            ValidationSeverity::Error => line.red().to_string(),
            ValidationSeverity::Warning => line.yellow().to_string(),
            ValidationSeverity::Info => line,
        };
        let _ = writeln!(&mut buffer, "{line}");
    }

    let summary = format!(
        "{} records checked: {} errors, {} warnings",
        report.records,
        report.error_count(),
        report.warning_count()
    );
    let summary = if report.passes(strict) {
        format!("✓ {summary}").green().to_string()
    } else {
        format!("✗ {summary}").red().bold().to_string()
    };
    buffer.push_str(&summary);
    buffer
}

async fn write_graph(graph: &OntologyGraph, path: &Path, format: RdfSerializationFormat) -> Result<()> {
    let bytes = graph.serialize(format)?;
    write_output(&bytes, path).await?;
    info!("Wrote {} triples as {} to {}", graph.len(), format, path.display());
    Ok(())
}

/// Write to `path`, or to stdout when `path` is `-`
async fn write_output(bytes: &[u8], path: &Path) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(bytes).await?;
        stdout.flush().await?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, bytes).await.map_err(|e| {
        RimoError::io_error(format!("Failed to write {}: {e}", path.display()))
    })
}
