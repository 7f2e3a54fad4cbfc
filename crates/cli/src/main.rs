//! Deskfront CLI - Catalog browsing and wishlist/cart management.
//!
//! Works directly on the storefront's data directory. The directory has a
//! single owner at a time, so stop the service first; while it runs, every
//! command fails with a "data directory ... is in use" error.
//!
//! # Usage
//!
//! ```bash
//! # List posters, cheapest first
//! deskfront products --category posters --sort price-low
//!
//! # Save a product to the wishlist
//! deskfront wishlist add 3
//!
//! # Add two units to the cart (requires STOREFRONT_PERSIST_CART=true)
//! deskfront cart add 2 --quantity 2
//! ```
//!
//! # Commands
//!
//! - `products` / `product` - Browse the catalog
//! - `wishlist` - List, add, remove, clear, or check saved items
//! - `cart` - Show, add, update, remove, or clear cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use deskfront_core::{Category, ProductId};
use deskfront_storefront::catalog::ProductSort;

mod commands;
mod output;

use commands::Context;

#[derive(Parser)]
#[command(name = "deskfront")]
#[command(author, version, about = "Deskfront storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Only show this category (`mousepads`, `posters`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Sort order (`featured`, `price-low`, `price-high`, `rating`)
        #[arg(short, long, default_value = "featured")]
        sort: ProductSort,

        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single product
    Product {
        /// Product id
        id: ProductId,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved items
    List,
    /// Save a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a saved item
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Remove every saved item
    Clear,
    /// Check whether a product is saved
    Contains {
        /// Product id
        id: ProductId,
    },
    /// Move a saved item into the cart
    MoveToCart {
        /// Product id
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and the order summary
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Set a line's quantity (values below one are ignored)
    Update {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "deskfront=info,deskfront_storefront=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Products {
            category,
            sort,
            search,
        } => commands::products::list(&ctx, category, sort, search),
        Commands::Product { id } => commands::products::show(&ctx, &id)?,
        Commands::Wishlist { action } => {
            let mut wishlist = ctx.wishlist();
            match action {
                WishlistAction::List => commands::wishlist::list(&wishlist),
                WishlistAction::Add { id } => commands::wishlist::add(&ctx, &mut wishlist, &id)?,
                WishlistAction::Remove { id } => commands::wishlist::remove(&mut wishlist, &id),
                WishlistAction::Clear => commands::wishlist::clear(&mut wishlist),
                WishlistAction::Contains { id } => commands::wishlist::contains(&wishlist, &id),
                WishlistAction::MoveToCart { id } => {
                    let mut cart = ctx.cart();
                    commands::wishlist::move_to_cart(&mut wishlist, &mut cart, &id);
                }
            }
        }
        Commands::Cart { action } => {
            let mut cart = ctx.cart();
            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Add { id, quantity } => {
                    commands::cart::add(&ctx, &mut cart, &id, quantity)?;
                }
                CartAction::Update { id, quantity } => {
                    commands::cart::update(&mut cart, &id, quantity);
                }
                CartAction::Remove { id } => commands::cart::remove(&mut cart, &id),
                CartAction::Clear => commands::cart::clear(&mut cart),
            }
        }
    }

    output::notifications(&ctx.notifications().drain());
    Ok(())
}
