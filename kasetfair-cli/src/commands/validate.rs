use anyhow::Result;
use client::dashboard::{ManagementArea, ValidationDashboard, load_dashboard};
use shared::config::client::ClientConfig;

use super::session::Session;

/// Prints the store's admission checklist and where to fix what fails.
pub async fn validate(config: &ClientConfig) -> Result<()> {
    let session = Session::open(config)?;
    let dashboard = load_dashboard(&session.api()).await?;
    print_dashboard(&dashboard);
    session.save()
}

fn print_dashboard(dashboard: &ValidationDashboard) {
    let report = dashboard.report();
    println!(
        "Store #{} \"{}\" ({}), state {}",
        report.store.id, report.store.store_name, report.store.store_type, report.store.state
    );
    if let Some(booth) = &report.store.booth_number {
        println!("Booth: {booth}");
    }
    println!("Progress: {}%", dashboard.progress());

    for section in &report.sections {
        println!("[{}] {}", mark(section.ok), section.label);
        for item in &section.items {
            match &item.message {
                Some(message) if !item.ok => {
                    println!("    [{}] {}: {message}", mark(item.ok), item.label);
                }
                _ => println!("    [{}] {}", mark(item.ok), item.label),
            }
        }
    }

    if dashboard.is_ready() {
        println!("All requirements are met.");
    } else {
        for (section, area) in dashboard.failing_sections() {
            println!(
                "Fix \"{}\" with `{}` ({})",
                section.label,
                command_for(area),
                area.path()
            );
        }
    }
}

/// CLI counterpart of a management page.
const fn command_for(area: ManagementArea) -> &'static str {
    match area {
        ManagementArea::Info => "kasetfair status",
        ManagementArea::Layout => "kasetfair store-details",
        ManagementArea::Goods => "kasetfair goods",
    }
}

const fn mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "!!" }
}
