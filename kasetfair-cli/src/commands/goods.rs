use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use client::{
    KasetFairClient,
    goods::{GoodField, GoodsCatalog},
};
use shared::{config::client::ClientConfig, models::GoodsType};

use super::{read_attachment, session::Session};

type Catalog = GoodsCatalog<KasetFairClient>;

#[derive(Subcommand, Debug)]
pub enum GoodsCommand {
    /// List the store's goods
    List {
        /// Also resolve image links
        #[arg(long)]
        images: bool,
    },
    /// Add a good
    Add(GoodArgs),
    /// Update a good
    Update {
        /// Id of the good to update
        id: String,
        #[command(flatten)]
        fields: GoodArgs,
    },
    /// Delete a good
    Delete {
        /// Id of the good to delete
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct GoodArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    /// Food or NonFood
    #[arg(long = "type", value_name = "TYPE")]
    pub goods_type: Option<GoodsType>,
    /// Image to upload for the good
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
}

pub async fn run(config: &ClientConfig, action: GoodsCommand) -> Result<()> {
    let session = Session::open(config)?;
    let mut catalog = GoodsCatalog::new(session.api());
    catalog.refresh().await?;

    match action {
        GoodsCommand::List { images } => {
            if images {
                catalog.refresh_image_links().await;
            }
            print_goods(&catalog);
        }
        GoodsCommand::Add(fields) => {
            let row_id = catalog.add_new_draft();
            apply(&mut catalog, &row_id, fields).await?;
            catalog.create_from_draft(&row_id).await?;
            if let Some(good) = catalog.goods().last() {
                println!("Added good {} \"{}\"", good.id, good.name);
            }
        }
        GoodsCommand::Update { id, fields } => {
            if !catalog.begin_edit(&id) {
                bail!("no good with id {id}");
            }
            apply(&mut catalog, &id, fields).await?;
            catalog.save_good(&id).await?;
            println!("Updated good {id}");
        }
        GoodsCommand::Delete { id } => {
            catalog.delete_good(&id).await?;
            println!("Deleted good {id}");
        }
    }

    session.save()
}

async fn apply(catalog: &mut Catalog, row_id: &str, fields: GoodArgs) -> Result<()> {
    if let Some(name) = fields.name {
        catalog.set_field(row_id, GoodField::Name, name);
    }
    if let Some(price) = fields.price {
        catalog.set_field(row_id, GoodField::Price, price);
    }
    if let Some(goods_type) = fields.goods_type {
        catalog.set_type(row_id, goods_type);
    }
    if let Some(path) = fields.image {
        let attachment = read_attachment(&path)?;
        catalog.upload_image(row_id, &attachment).await?;
    }
    Ok(())
}

fn print_goods(catalog: &Catalog) {
    if catalog.goods().is_empty() {
        println!("No goods yet.");
        return;
    }
    for good in catalog.goods() {
        println!(
            "{}  {}  {}  {}",
            good.id, good.name, good.goods_type, good.price
        );
        if let Some(link) = catalog.image_link(&good.id) {
            println!("    image: {link}");
        }
    }
}
