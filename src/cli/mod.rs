//! The view layer: the storefront's navigable routes rendered as a command
//! tree. Thin glue over the stores; all business rules live in `domain`
//! and `application`.

mod commands;

pub use commands::run;

use std::path::PathBuf;

use bigdecimal::BigDecimal;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::domain::catalog::{ComplementCategory, Size};
use crate::domain::order::{OrderStatus, PaymentMethod};

#[derive(Debug, Parser)]
#[command(name = "acai-storefront", version, about = "Açaí delivery storefront")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the product catalog
    Catalog,
    /// Show a product with its sizes and available complements
    Product { id: String },
    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Submit the cart as an order
    Checkout(CheckoutArgs),
    /// Track an order by its code
    Track { code: String },
    /// Admin dashboard
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart contents
    Show,
    /// Add a product to the cart
    Add {
        product_id: String,
        #[arg(long)]
        size: String,
        /// Complement to include; repeat for several
        #[arg(long = "complement")]
        complements: Vec<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        product_id: String,
        #[arg(long)]
        size: String,
        #[arg(long = "complement")]
        complements: Vec<String>,
    },
    /// Change a line's quantity
    SetQuantity {
        product_id: String,
        #[arg(long)]
        size: String,
        #[arg(long = "complement")]
        complements: Vec<String>,
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    /// pix, cash or card
    #[arg(long)]
    pub payment: PaymentMethod,
    /// Cash only: amount the customer will pay with
    #[arg(long)]
    pub change_for: Option<BigDecimal>,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Log in to the admin dashboard
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out
    Logout,
    /// List all orders
    Orders,
    /// Show one order
    Order { id: Uuid },
    /// Reassign an order's status (pending, preparing, ready,
    /// out-for-delivery, delivered)
    SetStatus { id: Uuid, status: OrderStatus },
    /// Manage products
    #[command(subcommand)]
    Products(ProductCommand),
    /// Manage complements
    #[command(subcommand)]
    Complements(ComplementCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Size as label=price, e.g. 500ml=16.90; repeat for several
        #[arg(long = "size", value_parser = parse_size, required = true)]
        sizes: Vec<Size>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "size", value_parser = parse_size, required = true)]
        sizes: Vec<Size>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ComplementCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        /// fruit, topping or extra
        #[arg(long)]
        category: ComplementCategory,
        #[arg(long, default_value = "0")]
        price: BigDecimal,
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: ComplementCategory,
        #[arg(long, default_value = "0")]
        price: BigDecimal,
        #[arg(long)]
        inactive: bool,
    },
    Delete { id: String },
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (label, price) = s
        .split_once('=')
        .ok_or_else(|| format!("expected label=price, got '{s}'"))?;
    let price = price
        .parse::<BigDecimal>()
        .map_err(|e| format!("invalid price '{price}': {e}"))?;
    if label.trim().is_empty() {
        return Err(format!("empty size label in '{s}'"));
    }
    Ok(Size {
        label: label.trim().to_string(),
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn parse_size_accepts_label_and_price() {
        let size = parse_size("500ml=16.90").unwrap();
        assert_eq!(size.label, "500ml");
        assert_eq!(size.price, BigDecimal::from_str("16.90").unwrap());
    }

    #[test]
    fn parse_size_rejects_bad_input() {
        assert!(parse_size("500ml").is_err());
        assert!(parse_size("=16.90").is_err());
        assert!(parse_size("500ml=very cheap").is_err());
    }

    #[test]
    fn cli_parses_cart_add() {
        let cli = Cli::try_parse_from([
            "acai-storefront",
            "cart",
            "add",
            "p1",
            "--size",
            "500ml",
            "--complement",
            "c1",
            "--complement",
            "c2",
            "--quantity",
            "2",
        ])
        .unwrap();
        match cli.command {
            Command::Cart(CartCommand::Add {
                product_id,
                size,
                complements,
                quantity,
            }) => {
                assert_eq!(product_id, "p1");
                assert_eq!(size, "500ml");
                assert_eq!(complements, ["c1", "c2"]);
                assert_eq!(quantity, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_checkout_payment() {
        let cli = Cli::try_parse_from([
            "acai-storefront",
            "checkout",
            "--name",
            "Maria",
            "--phone",
            "11987654321",
            "--address",
            "Rua X, 10",
            "--payment",
            "cash",
            "--change-for",
            "50.00",
        ])
        .unwrap();
        match cli.command {
            Command::Checkout(args) => {
                assert_eq!(args.payment, PaymentMethod::Cash);
                assert_eq!(
                    args.change_for,
                    Some(BigDecimal::from_str("50.00").unwrap())
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
