//! Farm2Door CLI - storefront state from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! f2d catalog list --category Fruits
//!
//! # Shop
//! f2d cart add f1 --qty 2
//! f2d checkout
//!
//! # Accounts
//! f2d account signup -n "Alice" -e alice@example.com -p hunter2
//! f2d account login -e admin@farm2door.local -p admin
//!
//! # Admin (requires an admin session)
//! f2d admin add-product --title "Honey Jar" --price 8.50 --category Gift
//! ```
//!
//! All state lives as JSON files under the data directory (`--data-dir`,
//! default `.farm2door`); every invocation loads it, applies one change, and
//! persists.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use farm2door_core::Price;
use farm2door_store::models::AddressFields;
use farm2door_store::{NewProduct, ProductUpdate};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "f2d")]
#[command(author, version, about = "Farm2Door storefront CLI")]
struct Cli {
    /// Directory holding the persisted JSON state
    #[arg(long, default_value = ".farm2door", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout,
    /// Browse past orders
    Orders {
        /// Show a single order by ID
        id: Option<String>,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Accounts and sessions
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Catalog and user administration (requires an admin session)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by a case-insensitive title/category substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product in full
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product (quantity is clamped to available stock)
    Add {
        /// Product ID
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Set the quantity of a cart line (minimum 1)
    Update {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(short, long)]
        qty: u32,
    },
    /// Remove a line, restoring its stock
    Remove {
        /// Product ID
        id: String,
    },
    /// Show the cart contents and subtotal
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product to the wishlist
    Add {
        /// Product ID
        id: String,
    },
    /// Remove a product from the wishlist
    Remove {
        /// Product ID
        id: String,
    },
    /// Show the wishlist
    Show,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new account and sign it in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the current session
    Whoami,
    /// Update profile fields of the signed-in user
    Update {
        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New avatar image reference
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Manage shipping addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Reset an account's password and print the new one
    ResetPassword {
        /// Email address of the account
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// Add an address
    Add(AddressArgs),
    /// Replace the fields of an address
    Edit {
        /// Address ID
        id: String,

        #[command(flatten)]
        fields: AddressArgs,
    },
    /// Remove an address
    Remove {
        /// Address ID
        id: String,
    },
}

#[derive(Args)]
struct AddressArgs {
    /// Short label, e.g. "Home"
    #[arg(long, default_value = "Home")]
    label: String,

    /// Street address line
    #[arg(long)]
    line: String,

    /// City
    #[arg(long)]
    city: String,

    /// Postal code
    #[arg(long)]
    zip: String,

    /// Country
    #[arg(long)]
    country: String,
}

impl From<AddressArgs> for AddressFields {
    fn from(args: AddressArgs) -> Self {
        Self {
            label: args.label,
            line: args.line,
            city: args.city,
            zip: args.zip,
            country: args.country,
        }
    }
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a product to the catalog
    AddProduct {
        /// Display title
        #[arg(short, long)]
        title: String,

        /// Unit price, e.g. 8.50
        #[arg(short, long, value_parser = Price::parse)]
        price: Price,

        /// Category name
        #[arg(short, long)]
        category: String,

        /// Image reference
        #[arg(long, default_value = "")]
        image: String,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Initial stock
        #[arg(short, long, default_value_t = 10)]
        stock: u32,
    },
    /// Edit fields of an existing product
    EditProduct {
        /// Product ID
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New unit price
        #[arg(short, long, value_parser = Price::parse)]
        price: Option<Price>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New image reference
        #[arg(long)]
        image: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New stock count
        #[arg(short, long)]
        stock: Option<u32>,
    },
    /// Delete a product, removing it from carts and wishlists too
    DeleteProduct {
        /// Product ID
        id: String,
    },
    /// Replace the catalog with the built-in seed list
    ResetCatalog,
    /// List all registered accounts
    Users,
    /// Delete an account
    DeleteUser {
        /// User ID
        id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut ctx = Context::open(&cli.data_dir)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, search } => {
                commands::catalog::list(&ctx, category.as_deref(), search.as_deref());
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id, qty } => commands::cart::add(&mut ctx, &id, qty)?,
            CartAction::Update { id, qty } => commands::cart::update(&mut ctx, &id, qty)?,
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id)?,
            CartAction::Show => commands::cart::show(&ctx),
        },
        Commands::Checkout => commands::cart::checkout(&mut ctx)?,
        Commands::Orders { id } => match id {
            Some(id) => commands::orders::show(&ctx, &id)?,
            None => commands::orders::list(&ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { id } => commands::wishlist::add(&mut ctx, &id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut ctx, &id)?,
            WishlistAction::Show => commands::wishlist::show(&ctx),
        },
        Commands::Account { action } => match action {
            AccountAction::Signup {
                name,
                email,
                password,
                phone,
            } => commands::account::signup(&mut ctx, name, email, password, phone)?,
            AccountAction::Login { email, password } => {
                commands::account::login(&mut ctx, &email, &password)?;
            }
            AccountAction::Logout => commands::account::logout(&mut ctx)?,
            AccountAction::Whoami => commands::account::whoami(&ctx),
            AccountAction::Update {
                name,
                phone,
                avatar,
            } => commands::account::update(&mut ctx, name, phone, avatar)?,
            AccountAction::Address { action } => match action {
                AddressAction::Add(fields) => {
                    commands::account::add_address(&mut ctx, fields.into())?;
                }
                AddressAction::Edit { id, fields } => {
                    commands::account::edit_address(&mut ctx, &id, fields.into())?;
                }
                AddressAction::Remove { id } => {
                    commands::account::remove_address(&mut ctx, &id)?;
                }
            },
            AccountAction::ResetPassword { email } => {
                commands::account::reset_password(&mut ctx, &email)?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::AddProduct {
                title,
                price,
                category,
                image,
                description,
                stock,
            } => commands::admin::add_product(
                &mut ctx,
                NewProduct {
                    title,
                    price,
                    category,
                    image,
                    description,
                    stock,
                },
            )?,
            AdminAction::EditProduct {
                id,
                title,
                price,
                category,
                image,
                description,
                stock,
            } => commands::admin::edit_product(
                &mut ctx,
                &id,
                ProductUpdate {
                    title,
                    price,
                    category,
                    image,
                    description,
                    stock,
                },
            )?,
            AdminAction::DeleteProduct { id } => commands::admin::delete_product(&mut ctx, &id)?,
            AdminAction::ResetCatalog => commands::admin::reset_catalog(&mut ctx)?,
            AdminAction::Users => commands::admin::list_users(&ctx)?,
            AdminAction::DeleteUser { id } => commands::admin::delete_user(&mut ctx, &id)?,
        },
    }
    Ok(())
}
