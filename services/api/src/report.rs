use crate::cli::DatabaseArgs;
use crate::infra::{load_config, parse_status, ApplicationStore};
use clap::Args;
use job_tracker::applications::{
    ApplicationRecord, ApplicationService, ApplicationStatus, StatusCounts,
};
use job_tracker::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
    /// Only show applications with this status (Applied, Interview, Rejected, Offer)
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<ApplicationStatus>,
}

async fn open_service(
    database: DatabaseArgs,
) -> Result<ApplicationService<ApplicationStore>, AppError> {
    let config = load_config(database)?;
    let store = ApplicationStore::open(&config.database).await?;
    Ok(ApplicationService::new(Arc::new(store)))
}

pub(crate) async fn run_init_db(args: DatabaseArgs) -> Result<(), AppError> {
    let config = load_config(args)?;
    ApplicationStore::open(&config.database).await?;
    println!("Applications table ready at {}", config.database.url);
    Ok(())
}

pub(crate) async fn run_stats(args: DatabaseArgs) -> Result<(), AppError> {
    let service = open_service(args).await?;
    let counts = service.stats().await?;
    print!("{}", render_stats(&counts));
    Ok(())
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let ListArgs { database, status } = args;
    let service = open_service(database).await?;
    let listing = service.list().await?;

    let records: Vec<&ApplicationRecord> = listing
        .applications
        .iter()
        .filter(|record| status.map_or(true, |wanted| record.status == wanted))
        .collect();
    print!("{}", render_listing(&records, status));
    Ok(())
}

pub(crate) fn render_stats(counts: &StatusCounts) -> String {
    let mut out = String::from("Application statistics\n");
    out.push_str(&format!("- Total: {}\n", counts.total()));
    for status in ApplicationStatus::ALL {
        out.push_str(&format!("- {}: {}\n", status.label(), counts.get(status)));
    }
    out
}

pub(crate) fn render_listing(
    records: &[&ApplicationRecord],
    status: Option<ApplicationStatus>,
) -> String {
    let scope = status.map_or_else(|| "all statuses".to_string(), |s| format!("status {s}"));

    if records.is_empty() {
        return format!("No applications found ({scope})\n");
    }

    let mut out = format!("{} application(s), {scope}\n", records.len());
    for record in records {
        out.push_str(&format!(
            "- #{} | {} | {} | {} | {}\n",
            record.id, record.application_date, record.company_name, record.role, record.status
        ));
    }
    out
}
