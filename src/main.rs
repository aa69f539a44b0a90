use clap::Parser;
use tax_etl::config::cli::{Cli, Command, ExportArgs, ImportArgs, MappingVariant, OutputFormat};
use tax_etl::config::job::JobConfig;
use tax_etl::core::mapping::FieldMapping;
use tax_etl::core::{csv_source, export::TaxExporter, import::TaxImporter, output};
use tax_etl::domain::ports::{Storage, TokenProvider};
use tax_etl::utils::error::{EtlError, Result};
use tax_etl::utils::monitor::SystemMonitor;
use tax_etl::utils::{logger, validation::Validate};
use tax_etl::{HubSpotClient, LocalStorage, PortalConfig};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_file.as_deref());

    tracing::info!("Starting tax-etl CLI");

    let monitor = SystemMonitor::new(cli.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let outcome = match &cli.command {
        Command::Import(args) => run_import(args, &monitor).await,
        Command::Export(args) => run_export(args, &monitor).await,
    };

    if let Err(e) = outcome {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            tax_etl::utils::error::ErrorSeverity::Low => 0,
            tax_etl::utils::error::ErrorSeverity::Medium => 2,
            tax_etl::utils::error::ErrorSeverity::High => 1,
            tax_etl::utils::error::ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_job_config(path: Option<&str>) -> Result<JobConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("📁 Loading job config from: {}", path);
            JobConfig::from_file(path)?
        }
        None => JobConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

/// 命令列的 --mapping 優先，其次是工作設定，最後退回行政區對照表
fn resolve_mapping(cli_mapping: Option<MappingVariant>, job: &JobConfig) -> Result<FieldMapping> {
    if let Some(variant) = cli_mapping {
        return Ok(variant.to_mapping());
    }

    if let Some(mapping) = job.field_mapping()? {
        return Ok(mapping);
    }

    Ok(FieldMapping::jurisdiction())
}

async fn run_import(args: &ImportArgs, monitor: &SystemMonitor) -> Result<()> {
    args.validate()?;

    let job = load_job_config(args.job_config.as_deref())?;
    let mapping = resolve_mapping(args.mapping, &job)?;
    let storage = LocalStorage::new(".".to_string());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - validating CSV without importing");
        let records = csv_source::read_records(&storage, &args.csv_file).await?;

        if !csv_source::validate_required_columns(&records, mapping.required_columns()) {
            return Err(EtlError::ValidationError {
                message: format!("CSV file '{}' failed validation", args.csv_file),
            });
        }

        println!(
            "✅ {} records validated ({} required columns present)",
            records.len(),
            mapping.required_columns().len()
        );
        return Ok(());
    }

    let portal_config = PortalConfig::from_file(&args.config)?;
    let api = HubSpotClient::new(job.base_url());

    let importer = TaxImporter::new(storage, api, portal_config, mapping)
        .with_batch_delay(job.batch_delay())
        .with_portal(args.portal.clone());

    let stats = importer.run(&args.csv_file, None).await?;
    monitor.log_stats("Import");

    println!(
        "✅ Import completed: {} successful, {} failed (of {} records)",
        stats.successful, stats.failed, stats.total
    );

    Ok(())
}

async fn run_export(args: &ExportArgs, monitor: &SystemMonitor) -> Result<()> {
    args.validate()?;

    let job = load_job_config(args.job_config.as_deref())?;
    let portal_config = PortalConfig::from_file(&args.config)?;
    let token = portal_config.access_token(args.portal.as_deref())?;

    tracing::info!(
        "🔑 Using API token for portal: {}",
        args.portal.as_deref().unwrap_or("default portal from config")
    );

    let api = HubSpotClient::new(job.base_url());
    let page_limit = args.limit.unwrap_or_else(|| job.page_limit());

    let exporter = TaxExporter::new(api, page_limit);
    let taxes = exporter.fetch_all(&token).await?;
    monitor.log_stats("Export");

    println!("Retrieved {} tax objects from HubSpot", taxes.len());
    if taxes.is_empty() {
        println!("No tax objects found.");
        return Ok(());
    }

    let storage = LocalStorage::new(".".to_string());

    match args.format {
        OutputFormat::Json => {
            let json = output::to_json(&taxes)?;
            match &args.output {
                Some(path) => {
                    storage.write_file(path, json.as_bytes()).await?;
                    println!("📁 JSON exported to {}", path);
                }
                None => println!("{}", json),
            }
        }
        OutputFormat::Csv => {
            let bytes = output::to_csv_bytes(&taxes)?;
            let path = args.output.clone().unwrap_or_else(|| {
                format!("taxes_{}.csv", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
            });
            storage.write_file(&path, &bytes).await?;
            println!("📁 CSV exported to {}", path);
        }
        OutputFormat::Table => {
            println!("{}", output::render_table(&taxes));
            println!("Sample tax object structure:");
            println!("{}", output::render_sample(&taxes[0])?);
        }
    }

    Ok(())
}
