use std::path::PathBuf;
use std::time::Instant;

use bigdecimal::BigDecimal;

use crate::application::auth::{AdminCredentials, AuthStore};
use crate::application::cart::CartStore;
use crate::application::catalog::CatalogStore;
use crate::application::orders::OrderStore;
use crate::config::Config;
use crate::domain::cart::{CartLine, LineKey};
use crate::domain::catalog::{Complement, ComplementCategory};
use crate::domain::checkout::CheckoutForm;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::ports::{ComplementDraft, ImageFile, ProductDraft, SnapshotStore};
use crate::domain::selection::{ComplementPicker, ToggleOutcome};
use crate::errors::AppError;
use crate::infrastructure::rest::RestStorefrontApi;
use crate::infrastructure::snapshot::JsonFileSnapshots;

use super::{
    AdminCommand, CartCommand, CheckoutArgs, Cli, Command, ComplementCommand, ProductCommand,
};

pub async fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    let api = RestStorefrontApi::new(&config.api_base_url)?;
    let snapshots = JsonFileSnapshots::new(config.state_dir.clone());

    match cli.command {
        Command::Catalog => show_catalog(&api).await,
        Command::Product { id } => show_product(&api, &id).await,
        Command::Cart(command) => cart_command(&api, &snapshots, command).await,
        Command::Checkout(args) => checkout(&api, &snapshots, args).await,
        Command::Track { code } => track(&api, &code).await,
        Command::Admin(command) => admin_command(&api, &snapshots, &config, command).await,
    }
}

fn money(value: &BigDecimal) -> BigDecimal {
    value.with_scale(2)
}

async fn show_catalog(api: &RestStorefrontApi) -> Result<(), AppError> {
    let mut catalog = CatalogStore::new(api);
    catalog.refresh().await?;

    if catalog.products().is_empty() {
        println!("No products available.");
        return Ok(());
    }
    for product in catalog.products() {
        let from = product
            .sizes
            .iter()
            .map(|s| &s.price)
            .min()
            .cloned()
            .unwrap_or_else(|| BigDecimal::from(0));
        println!(
            "{}  {}  a partir de R$ {}",
            product.id,
            product.name,
            money(&from)
        );
    }
    Ok(())
}

async fn show_product(api: &RestStorefrontApi, id: &str) -> Result<(), AppError> {
    let mut catalog = CatalogStore::new(api);
    catalog.refresh().await?;
    let product = catalog
        .product(id)
        .ok_or_else(|| DomainError::ProductNotFound(id.to_string()))?;

    println!("{}", product.name);
    if !product.description.is_empty() {
        println!("{}", product.description);
    }
    println!("Tamanhos:");
    for size in &product.sizes {
        println!("  {}  R$ {}", size.label, money(&size.price));
    }

    let offered: Vec<&Complement> = catalog.active_complements().collect();
    if !offered.is_empty() {
        println!("Complementos:");
        for category in ComplementCategory::ALL {
            let group: Vec<_> = offered.iter().filter(|c| c.category == category).collect();
            if group.is_empty() {
                continue;
            }
            match category.limit() {
                Some(limit) => println!("  {} (máx {limit}):", category.label()),
                None => println!("  {}:", category.label()),
            }
            for complement in group {
                if complement.price > BigDecimal::from(0) {
                    println!(
                        "    {}  {}  +R$ {}",
                        complement.id,
                        complement.name,
                        money(&complement.price)
                    );
                } else {
                    println!("    {}  {}", complement.id, complement.name);
                }
            }
        }
    }
    Ok(())
}

async fn cart_command(
    api: &RestStorefrontApi,
    snapshots: &JsonFileSnapshots,
    command: CartCommand,
) -> Result<(), AppError> {
    match command {
        CartCommand::Show => {
            let cart = CartStore::load(snapshots);
            if cart.is_empty() {
                println!("The cart is empty.");
                return Ok(());
            }
            for line in cart.lines() {
                println!(
                    "{}x {} ({})  R$ {}",
                    line.quantity,
                    line.name,
                    line.size,
                    money(&line.subtotal())
                );
                for id in &line.complements {
                    println!("   + {id}");
                }
            }
            println!("Total: R$ {}", money(&cart.total()));
            Ok(())
        }
        CartCommand::Add {
            product_id,
            size,
            complements,
            quantity,
        } => cart_add(api, snapshots, &product_id, &size, &complements, quantity).await,
        CartCommand::Remove {
            product_id,
            size,
            complements,
        } => {
            let mut cart = CartStore::load(snapshots);
            cart.remove(&LineKey::new(product_id, size, complements));
            println!("Removed from cart.");
            Ok(())
        }
        CartCommand::SetQuantity {
            product_id,
            size,
            complements,
            quantity,
        } => {
            let mut cart = CartStore::load(snapshots);
            // The view clamps; the store trusts its callers.
            cart.update_quantity(&LineKey::new(product_id, size, complements), quantity.max(1));
            println!("Quantity updated.");
            Ok(())
        }
        CartCommand::Clear => {
            let mut cart = CartStore::load(snapshots);
            cart.clear();
            println!("Cart cleared.");
            Ok(())
        }
    }
}

async fn cart_add(
    api: &RestStorefrontApi,
    snapshots: &JsonFileSnapshots,
    product_id: &str,
    size_label: &str,
    complement_ids: &[String],
    quantity: u32,
) -> Result<(), AppError> {
    let mut catalog = CatalogStore::new(api);
    catalog.refresh().await?;

    let product = catalog
        .product(product_id)
        .ok_or_else(|| DomainError::ProductNotFound(product_id.to_string()))?;
    let size = product.size(size_label).ok_or_else(|| DomainError::SizeNotFound {
        product_id: product.id.clone(),
        size: size_label.to_string(),
    })?;

    let offered: Vec<Complement> = catalog.active_complements().cloned().collect();
    let mut picker = ComplementPicker::new();
    let now = Instant::now();
    for id in complement_ids {
        let complement = offered
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| DomainError::ComplementNotFound(id.clone()))?;
        if picker.toggle(complement, &offered, now) == ToggleOutcome::LimitReached {
            if let Some(warning) = picker
                .warnings(now)
                .find(|w| w.category == complement.category)
            {
                println!("{}", warning.message);
            }
        }
    }

    let line = CartLine {
        product_id: product.id.clone(),
        name: product.name.clone(),
        image: product.image.clone(),
        size: size.label.clone(),
        unit_price: size.price.clone(),
        complements: picker.into_selected(),
        quantity: quantity.max(1),
    };

    let mut cart = CartStore::load(snapshots);
    cart.add(line);
    println!("Adicionado ao carrinho!");
    Ok(())
}

async fn checkout(
    api: &RestStorefrontApi,
    snapshots: &JsonFileSnapshots,
    args: CheckoutArgs,
) -> Result<(), AppError> {
    let mut cart = CartStore::load(snapshots);
    if cart.is_empty() {
        return Err(DomainError::EmptyCart.into());
    }

    let form = CheckoutForm {
        customer_name: args.name,
        phone: args.phone,
        address: args.address,
        payment: args.payment,
        change_for: args.change_for,
    };
    form.validate()?;

    let mut catalog = CatalogStore::new(api);
    catalog.refresh().await?;

    let mut orders = OrderStore::new(api);
    let code = orders
        .create(cart.lines(), &form, catalog.products(), catalog.complements())
        .await?;
    cart.clear();

    println!("Pedido criado! Código de rastreio: {code}");
    if let Some(order) = orders.by_code(&code) {
        println!("Total: R$ {}", money(&order.total));
    }
    Ok(())
}

async fn track(api: &RestStorefrontApi, code: &str) -> Result<(), AppError> {
    let mut orders = OrderStore::new(api);
    orders.refresh().await?;
    let order = orders
        .by_code(code)
        .ok_or_else(|| DomainError::OrderNotFound(code.to_string()))?;

    print_status_tracker(order.status);
    println!();
    print_order(order);
    Ok(())
}

async fn admin_command(
    api: &RestStorefrontApi,
    snapshots: &JsonFileSnapshots,
    config: &Config,
    command: AdminCommand,
) -> Result<(), AppError> {
    let credentials = AdminCredentials {
        email: config.admin_email.clone(),
        password: config.admin_password.clone(),
    };
    let mut auth = AuthStore::load(snapshots, credentials);

    match command {
        AdminCommand::Login { email, password } => {
            auth.login(&email, &password)?;
            println!("Logged in as {email}.");
            Ok(())
        }
        AdminCommand::Logout => {
            auth.logout();
            println!("Logged out.");
            Ok(())
        }
        AdminCommand::Orders => {
            ensure_admin(&auth)?;
            let mut orders = OrderStore::new(api);
            orders.refresh().await?;
            if orders.all().is_empty() {
                println!("No orders yet.");
                return Ok(());
            }
            for order in orders.all() {
                println!(
                    "{}  {}  {}  R$ {}  {}",
                    order.tracking_code,
                    order.created_at.format("%Y-%m-%d %H:%M"),
                    order.customer_name,
                    money(&order.total),
                    order.status
                );
            }
            Ok(())
        }
        AdminCommand::Order { id } => {
            ensure_admin(&auth)?;
            let mut orders = OrderStore::new(api);
            match orders.fetch(id).await? {
                Some(order) => {
                    print_order(order);
                    Ok(())
                }
                None => Err(DomainError::OrderNotFound(id.to_string()).into()),
            }
        }
        AdminCommand::SetStatus { id, status } => {
            ensure_admin(&auth)?;
            let mut orders = OrderStore::new(api);
            orders.update_status(id, status).await?;
            println!("Order {id} is now: {status}");
            Ok(())
        }
        AdminCommand::Products(command) => {
            ensure_admin(&auth)?;
            product_command(api, command).await
        }
        AdminCommand::Complements(command) => {
            ensure_admin(&auth)?;
            complement_command(api, command).await
        }
    }
}

fn ensure_admin<S: SnapshotStore>(auth: &AuthStore<S>) -> Result<(), AppError> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(AppError::LoginRequired)
    }
}

async fn product_command(
    api: &RestStorefrontApi,
    command: ProductCommand,
) -> Result<(), AppError> {
    let mut catalog = CatalogStore::new(api);
    match command {
        ProductCommand::List => {
            catalog.refresh().await?;
            for product in catalog.products() {
                let sizes = product
                    .sizes
                    .iter()
                    .map(|s| format!("{}=R$ {}", s.label, money(&s.price)))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  {}  [{}]", product.id, product.name, sizes);
            }
            Ok(())
        }
        ProductCommand::Create {
            name,
            description,
            sizes,
            image,
        } => {
            let draft = ProductDraft {
                name,
                description,
                sizes,
                image: load_image(image)?,
            };
            let created = catalog.create_product(draft).await?;
            println!("Created product {}.", created.id);
            Ok(())
        }
        ProductCommand::Update {
            id,
            name,
            description,
            sizes,
            image,
        } => {
            let draft = ProductDraft {
                name,
                description,
                sizes,
                image: load_image(image)?,
            };
            catalog.update_product(&id, draft).await?;
            println!("Updated product {id}.");
            Ok(())
        }
        ProductCommand::Delete { id } => {
            catalog.delete_product(&id).await?;
            println!("Deleted product {id}.");
            Ok(())
        }
    }
}

async fn complement_command(
    api: &RestStorefrontApi,
    command: ComplementCommand,
) -> Result<(), AppError> {
    let mut catalog = CatalogStore::new(api);
    match command {
        ComplementCommand::List => {
            catalog.refresh().await?;
            for complement in catalog.complements() {
                println!(
                    "{}  {}  {}  R$ {}  {}",
                    complement.id,
                    complement.name,
                    complement.category,
                    money(&complement.price),
                    if complement.active { "ativo" } else { "inativo" }
                );
            }
            Ok(())
        }
        ComplementCommand::Create {
            name,
            category,
            price,
            inactive,
        } => {
            let created = catalog
                .create_complement(ComplementDraft {
                    name,
                    category,
                    price,
                    active: !inactive,
                })
                .await?;
            println!("Created complement {}.", created.id);
            Ok(())
        }
        ComplementCommand::Update {
            id,
            name,
            category,
            price,
            inactive,
        } => {
            catalog
                .update_complement(
                    &id,
                    ComplementDraft {
                        name,
                        category,
                        price,
                        active: !inactive,
                    },
                )
                .await?;
            println!("Updated complement {id}.");
            Ok(())
        }
        ComplementCommand::Delete { id } => {
            catalog.delete_complement(&id).await?;
            println!("Deleted complement {id}.");
            Ok(())
        }
    }
}

fn load_image(path: Option<PathBuf>) -> Result<Option<ImageFile>, AppError> {
    let Some(path) = path else { return Ok(None) };
    let bytes = std::fs::read(&path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("imagem")
        .to_string();
    Ok(Some(ImageFile { file_name, bytes }))
}

fn print_order(order: &Order) {
    println!("Pedido {} ({})", order.tracking_code, order.status);
    println!("Cliente: {} ({})", order.customer_name, order.phone);
    println!("Endereço: {}", order.address);
    match &order.change_for {
        Some(change) => println!(
            "Pagamento: {} (troco para R$ {})",
            order.payment,
            money(change)
        ),
        None => println!("Pagamento: {}", order.payment),
    }
    for item in &order.items {
        println!(
            "  {}x {} ({})  R$ {}",
            item.quantity,
            item.name,
            item.size,
            money(&item.subtotal())
        );
        for complement in &item.complements {
            println!("     + {}", complement.name);
        }
    }
    println!("Total: R$ {}", money(&order.total));
}

fn print_status_tracker(current: OrderStatus) {
    let reached = OrderStatus::ALL
        .iter()
        .position(|s| *s == current)
        .unwrap_or(0);
    for (index, status) in OrderStatus::ALL.iter().enumerate() {
        let marker = if index < reached {
            "x"
        } else if index == reached {
            ">"
        } else {
            " "
        };
        println!(" [{marker}] {status}");
    }
}
