// src/main.rs

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

use gestock_client::{
    config::{ApiConfig, AppState},
    models::{
        auth::LoginPayload,
        inventory::{CreateProductPayload, CreateWarehouseProductPayload, UpdateStockPayload},
        rbac::{Permission, Role},
        tenancy::CreateWarehousePayload,
    },
    services::rbac_service::{
        self, PermCreateProduct, PermCreateWarehouse, PermUpdateStock, RequirePermission,
    },
    ApiError,
};

#[derive(Parser)]
#[command(name = "gestock", about = "Cliente de linha de comando da API Gestock")]
struct Cli {
    /// Arquivo onde a sessão fica guardada entre execuções
    #[arg(long, env = "GESTOCK_SESSION_FILE", default_value = ".gestock-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "GESTOCK_PASSWORD")]
        password: String,
    },
    Logout,
    Whoami,
    /// Permissões de um papel (padrão: o papel da sessão)
    Permissions {
        #[arg(long)]
        role: Option<String>,
    },
    Businesses,
    Warehouses {
        #[arg(long)]
        business_id: Option<i64>,
    },
    Products {
        #[arg(long)]
        business_id: Option<i64>,
        #[arg(long)]
        search: Option<String>,
    },
    Stock {
        #[arg(long)]
        warehouse_id: Option<i64>,
    },
    CreateWarehouse {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: Option<String>,
    },
    CreateProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        sku: Option<String>,
    },
    SetStock {
        #[arg(long)]
        product_id: i64,
        #[arg(long)]
        warehouse_id: i64,
        #[arg(long)]
        quantity: Decimal,
        /// Cria a atribuição em vez de atualizar uma existente
        #[arg(long)]
        new: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env()?.with_session_file(cli.session_file);
    let app_state = AppState::new(config)?;

    if let Err(e) = run(&app_state, cli.command).await {
        eprintln!("{}", serde_json::to_string_pretty(&e)?);
        if app_state.navigator.current_route().is_login() {
            eprintln!("Faça login novamente: gestock login --email <email>");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(app: &AppState, command: Command) -> Result<(), ApiError> {
    let role = app.session.role();

    match command {
        Command::Login { email, password } => {
            let session = app.auth_service.login(&LoginPayload { email, password }).await?;
            println!(
                "Bem-vindo! Papel: {}",
                rbac_service::get_role_label(session.role())
            );
        }
        Command::Logout => app.auth_service.logout(),
        Command::Whoami => match app.auth_service.current_user() {
            Some(user) => {
                print_json(&user);
                println!("{}", rbac_service::get_role_label(user.role()));
            }
            None => println!("Nenhuma sessão ativa."),
        },
        Command::Permissions { role: explicit } => {
            let target = match explicit {
                Some(raw) => Role::parse(&raw),
                None => role,
            };
            let permissions = target.map(rbac_service::permissions_for).unwrap_or_default();
            println!("{}", rbac_service::get_role_label(target));
            print_json(&permissions);
        }
        Command::Businesses => {
            // Sem VIEW_ALL_BUSINESSES, só o próprio negócio
            if rbac_service::has_permission(role, Permission::ViewAllBusinesses) {
                print_json(&app.business_service.get_all().await?);
            } else {
                print_json(&app.business_service.get_current_business().await?);
            }
        }
        Command::Warehouses { business_id } => {
            print_json(&app.warehouse_service.get_by_business_id(business_id).await?);
        }
        Command::Products { business_id, search } => {
            let products = match search {
                Some(term) => app.product_service.search(&term, business_id).await?,
                None => app.product_service.get_by_business_id(business_id).await?,
            };
            print_json(&products);
        }
        Command::Stock { warehouse_id } => {
            let stock = match warehouse_id {
                Some(id) => app.warehouse_product_service.get_by_warehouse(id).await?,
                None => app.warehouse_product_service.get_by_business().await?,
            };
            print_json(&stock);
        }
        Command::CreateWarehouse { name, address } => {
            RequirePermission::<PermCreateWarehouse>::check(role)?;
            let payload = CreateWarehousePayload { name, address, business_id: None };
            print_json(&app.warehouse_service.create(&payload).await?);
        }
        Command::CreateProduct { name, price, description, sku } => {
            RequirePermission::<PermCreateProduct>::check(role)?;
            let payload = CreateProductPayload {
                name,
                price: Some(price),
                description,
                sku,
                business_id: None,
            };
            print_json(&app.product_service.create(&payload).await?);
        }
        Command::SetStock { product_id, warehouse_id, quantity, new } => {
            RequirePermission::<PermUpdateStock>::check(role)?;
            let stock = if new {
                let payload = CreateWarehouseProductPayload {
                    product_id,
                    warehouse_id,
                    quantity: Some(quantity),
                };
                app.warehouse_product_service.create(&payload).await?
            } else {
                app.warehouse_product_service
                    .update(product_id, warehouse_id, &UpdateStockPayload { quantity })
                    .await?
            };
            print_json(&stock);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Falha ao formatar a saída: {}", e),
    }
}
