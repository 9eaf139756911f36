//! Wizard subcommands. Each invocation is one host session: the wizard is
//! initialised from the server, one operation runs, and the result is printed.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use client::{
    DraftCache, KasetFairClient,
    storage::FileStore,
    wizard::{
        ClubInfoField, ProductField, StepKind, StepStatus, WizardController, WizardOptions,
    },
};
use shared::{config::client::ClientConfig, models::StoreType};
use tracing::info;

use super::{read_attachment, session::Session};

type Wizard = WizardController<KasetFairClient, FileStore>;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Store type to start with when no store exists yet
    #[arg(long = "type", value_name = "TYPE")]
    pub store_type: Option<StoreType>,
    /// Step to show, limited to what the store's state allows
    #[arg(long)]
    pub step: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Store type (nisit or club)
    #[arg(long = "type", value_name = "TYPE")]
    pub store_type: StoreType,
    /// Store name
    #[arg(long)]
    pub name: String,
    /// Member email; repeat for each member
    #[arg(long = "member", value_name = "EMAIL")]
    pub members: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ClubInfoArgs {
    #[arg(long)]
    pub organization: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub nisit_id: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Club application document to upload
    #[arg(long, value_name = "PATH")]
    pub application: Option<PathBuf>,
    /// Only keep the values in the local draft
    #[arg(long)]
    pub draft: bool,
}

#[derive(Args, Debug)]
pub struct StoreDetailsArgs {
    /// Booth layout description
    #[arg(long)]
    pub description: Option<String>,
    /// Booth layout file
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Product as NAME=PRICE; repeat for each product
    #[arg(long = "product", value_name = "NAME=PRICE", value_parser = parse_product)]
    pub products: Vec<(String, String)>,
}

fn parse_product(raw: &str) -> Result<(String, String), String> {
    let (name, price) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PRICE, got `{raw}`"))?;
    Ok((name.trim().to_string(), price.trim().to_string()))
}

async fn open_wizard(
    config: &ClientConfig,
    session: &Session,
    options: WizardOptions,
) -> Result<Wizard> {
    let cache = DraftCache::new(FileStore::new(config.resolved_draft_store_path()));
    let mut wizard = WizardController::new(session.api(), cache, options);
    wizard.on_init().await?;
    Ok(wizard)
}

fn default_options(config: &ClientConfig) -> WizardOptions {
    WizardOptions::from_config(config)
}

pub async fn status(config: &ClientConfig, args: StatusArgs) -> Result<()> {
    let session = Session::open(config)?;
    let options = default_options(config)
        .with_type(args.store_type)
        .with_step(args.step);
    let mut wizard = open_wizard(config, &session, options).await?;
    if let Some(step) = args.step {
        wizard.go_to_step(step);
    }
    print_progress(&wizard);
    session.save()
}

pub async fn create(config: &ClientConfig, args: CreateArgs) -> Result<()> {
    let session = Session::open(config)?;
    let options = default_options(config).with_type(Some(args.store_type));
    let mut wizard = open_wizard(config, &session, options).await?;

    if wizard.snapshot().is_none() {
        wizard.select_store_type(args.store_type)?;
    }
    wizard.set_store_name(args.name);
    wizard.set_members(args.members);
    wizard.create_store().await?;

    if let Some(progress) = wizard.snapshot() {
        info!(store_id = progress.id, "store created");
        println!("Created store #{} \"{}\"", progress.id, progress.store_name);
    }
    print_progress(&wizard);
    session.save()
}

pub async fn club_info(config: &ClientConfig, args: ClubInfoArgs) -> Result<()> {
    let session = Session::open(config)?;
    let mut wizard = open_wizard(config, &session, default_options(config)).await?;
    if wizard.store_type() != Some(StoreType::Club) {
        bail!("club information only applies to club stores");
    }

    let fields = [
        (ClubInfoField::OrganizationName, args.organization),
        (ClubInfoField::PresidentFirstName, args.first_name),
        (ClubInfoField::PresidentLastName, args.last_name),
        (ClubInfoField::PresidentNisitId, args.nisit_id),
        (ClubInfoField::PresidentEmail, args.email),
        (ClubInfoField::PresidentPhone, args.phone),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            wizard.set_club_info_field(field, value);
        }
    }
    if let Some(path) = args.application {
        wizard.attach_club_application(Some(read_attachment(&path)?));
    }

    if args.draft {
        println!("Club information draft saved.");
    } else {
        wizard.submit_club_info().await?;
        println!("Club information submitted.");
    }
    print_progress(&wizard);
    session.save()
}

pub async fn store_details(config: &ClientConfig, args: StoreDetailsArgs) -> Result<()> {
    let session = Session::open(config)?;
    let mut wizard = open_wizard(config, &session, default_options(config)).await?;
    ensure_created(&wizard)?;

    if let Some(description) = args.description {
        wizard.set_layout_description(description);
    }
    if let Some(path) = args.layout {
        wizard.attach_layout_file(Some(read_attachment(&path)?));
    }
    wizard.save_store_details().await;

    println!("Store details saved.");
    print_progress(&wizard);
    session.save()
}

pub async fn submit(config: &ClientConfig, args: SubmitArgs) -> Result<()> {
    let session = Session::open(config)?;
    let mut wizard = open_wizard(config, &session, default_options(config)).await?;
    ensure_created(&wizard)?;

    if !args.products.is_empty() {
        let previous: Vec<String> = wizard
            .products()
            .rows()
            .iter()
            .map(|row| row.id.clone())
            .collect();
        for (name, price) in args.products {
            let id = wizard.add_product();
            wizard.update_product(&id, ProductField::Name, name);
            wizard.update_product(&id, ProductField::Price, price);
        }
        for id in previous {
            wizard.remove_product(&id);
        }
    }
    wizard.submit_products().await;

    println!("Products submitted.");
    for row in wizard.products().filled() {
        println!("  - {} ({})", row.name, row.price);
    }
    print_progress(&wizard);
    session.save()
}

pub async fn leave(config: &ClientConfig) -> Result<()> {
    let session = Session::open(config)?;
    let mut wizard = open_wizard(config, &session, default_options(config)).await?;
    ensure_created(&wizard)?;

    wizard.leave_store().await?;
    println!("You have left the store.");
    session.save()
}

/// Subcommand that completes a step.
const fn command_for_step(kind: StepKind) -> &'static str {
    match kind {
        StepKind::CreateStore => "kasetfair create",
        StepKind::ClubInfo => "kasetfair club-info",
        StepKind::StoreDetails => "kasetfair store-details",
        StepKind::Products => "kasetfair submit",
    }
}

fn ensure_created(wizard: &Wizard) -> Result<()> {
    if wizard.snapshot().is_none() {
        bail!("no store yet; run `kasetfair create` first");
    }
    Ok(())
}

fn print_progress(wizard: &Wizard) {
    match wizard.snapshot() {
        Some(progress) => {
            println!(
                "Store #{} \"{}\" ({}), state {}",
                progress.id,
                progress.store_name,
                progress.store_type,
                progress.state()
            );
            for member in &progress.member_emails {
                println!("  member {} [{}]", member.email, member.status);
            }
            for email in &progress.missing_profile_emails {
                println!("  missing profile: {email}");
            }
        }
        None => match wizard.store_type() {
            Some(store_type) => println!("No store yet; type {store_type} selected."),
            None => println!("No store yet; choose a type with `--type nisit|club`."),
        },
    }

    for step in wizard.step_indicator() {
        let marker = match step.status {
            StepStatus::Completed => "x",
            StepStatus::Current => ">",
            StepStatus::Upcoming => " ",
        };
        println!("[{marker}] {}. {}", step.id, step.label);
    }
    if let Some(kind) = wizard.current_step_kind() {
        println!("next: `{}`", command_for_step(kind));
    }

    if let Some(message) = wizard.step_error() {
        println!("error: {message}");
    }
}
