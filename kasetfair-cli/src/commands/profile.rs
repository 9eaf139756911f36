use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use client::{KasetFairClient, profile::ProfileForm};
use shared::{
    config::client::ClientConfig,
    models::{NisitInfo, UpdateNisitInfoRequest},
};

use super::{read_attachment, session::Session};

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the registered nisit profile
    Show,
    /// Register a nisit profile
    Register(RegisterArgs),
    /// Change fields of the nisit profile
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub nisit_id: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    /// Student card image to upload
    #[arg(long, value_name = "PATH")]
    pub card: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
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
    /// Student card image to upload
    #[arg(long, value_name = "PATH")]
    pub card: Option<PathBuf>,
}

pub async fn run(config: &ClientConfig, action: ProfileCommand) -> Result<()> {
    let session = Session::open(config)?;
    let mut form = ProfileForm::new(session.api());

    match action {
        ProfileCommand::Show => {
            if form.load().await? {
                print_profile(&form);
            } else {
                println!("No profile yet; run `kasetfair profile register`.");
            }
        }
        ProfileCommand::Register(args) => {
            let nisit_card_media_id = upload_card(&mut form, args.card).await?;
            let info = NisitInfo {
                first_name: args.first_name,
                last_name: args.last_name,
                nisit_id: args.nisit_id,
                email: args.email,
                phone: args.phone,
                nisit_card_media_id,
            };
            form.register(&info).await?;
            print_profile(&form);
        }
        ProfileCommand::Update(args) => {
            let nisit_card_media_id = upload_card(&mut form, args.card).await?;
            let request = UpdateNisitInfoRequest {
                first_name: args.first_name,
                last_name: args.last_name,
                nisit_id: args.nisit_id,
                email: args.email,
                phone: args.phone,
                nisit_card_media_id,
            };
            form.update(&request).await?;
            print_profile(&form);
        }
    }

    session.save()
}

async fn upload_card(
    form: &mut ProfileForm<KasetFairClient>,
    card: Option<PathBuf>,
) -> Result<Option<String>> {
    let Some(path) = card else {
        return Ok(None);
    };
    let attachment = read_attachment(&path)?;
    Ok(Some(form.upload_card(&attachment).await?))
}

fn print_profile(form: &ProfileForm<KasetFairClient>) {
    let Some(info) = form.info() else {
        return;
    };
    println!("{} {} ({})", info.first_name, info.last_name, info.nisit_id);
    println!("  email: {}", info.email);
    println!("  phone: {}", info.phone);
    match &info.nisit_card_media_id {
        Some(media_id) => println!("  nisit card: {media_id}"),
        None => println!("  nisit card: not uploaded"),
    }
}
