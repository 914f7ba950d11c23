//! Database seeder for Partida development and testing.
//!
//! Seeds a test user, a demo company, and a small chart of accounts
//! for local development.
//!
//! Usage: cargo run --bin seeder

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use partida_core::auth::hash_password;
use partida_db::entities::{chart_of_accounts, companies, sea_orm_active_enums::UserRole, users};

/// Test company ID (consistent for all seeds)
const TEST_COMPANY_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test user ID (consistent for all seeds)
const TEST_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Demo chart: (category code, category, subcategory code, subcategory, code, name)
const DEMO_CHART: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("1", "ACTIVO", "1.1", "ACTIVO CORRIENTE", "1.1.01", "Caja"),
    ("1", "ACTIVO", "1.1", "ACTIVO CORRIENTE", "1.1.02", "Banco"),
    ("1", "ACTIVO", "1.2", "ACTIVO NO CORRIENTE", "1.2.01", "Rodados"),
    ("2", "PASIVO", "2.1", "PASIVO CORRIENTE", "2.1.01", "Proveedores"),
    ("3", "PATRIMONIO NETO", "3.1", "CAPITAL", "3.1.01", "Capital Social"),
    ("4", "RESULTADOS", "4.1", "INGRESOS", "4.1.01", "Ventas"),
    ("4", "RESULTADOS", "4.2", "EGRESOS", "4.2.01", "Costo de Ventas"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = partida_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test company...");
    seed_test_company(&db).await;

    println!("Seeding test user...");
    seed_test_user(&db).await;

    println!("Seeding chart of accounts...");
    seed_chart_of_accounts(&db).await;

    println!("Seeding complete!");
}

fn test_company_id() -> Uuid {
    Uuid::parse_str(TEST_COMPANY_ID).unwrap()
}

fn test_user_id() -> Uuid {
    Uuid::parse_str(TEST_USER_ID).unwrap()
}

/// Seeds a demo company for development.
async fn seed_test_company(db: &DatabaseConnection) {
    if companies::Entity::find_by_id(test_company_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test company already exists, skipping...");
        return;
    }

    let company = companies::ActiveModel {
        id: Set(test_company_id()),
        name: Set("Demo SA".to_string()),
        tax_id: Set(Some("30-00000000-1".to_string())),
        address: Set(Some("Av. Siempre Viva 742".to_string())),
        phone: Set(None),
        email: Set(Some("contacto@demo.test".to_string())),
        ..Default::default()
    };

    company
        .insert(db)
        .await
        .expect("Failed to insert test company");
}

/// Seeds a test user for development.
async fn seed_test_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(test_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test user already exists, skipping...");
        return;
    }

    let password_hash = hash_password("partida_dev").expect("Failed to hash password");

    let user = users::ActiveModel {
        id: Set(test_user_id()),
        username: Set("demo".to_string()),
        email: Set("demo@partida.test".to_string()),
        password_hash: Set(password_hash),
        first_name: Set("Demo".to_string()),
        last_name: Set("User".to_string()),
        role: Set(UserRole::Admin),
        company_id: Set(Some(test_company_id())),
        ..Default::default()
    };

    user.insert(db).await.expect("Failed to insert test user");
}

/// Seeds a small ACTIVO/PASIVO chart for the demo company.
async fn seed_chart_of_accounts(db: &DatabaseConnection) {
    for (category_code, category_name, subcategory_code, subcategory_name, code, name) in DEMO_CHART
    {
        let exists = chart_of_accounts::Entity::find()
            .all(db)
            .await
            .unwrap_or_default()
            .iter()
            .any(|a| a.company_id == test_company_id() && a.code == *code && a.is_active);

        if exists {
            println!("  Account {code} already exists, skipping...");
            continue;
        }

        let account = chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(test_company_id()),
            category_code: Set((*category_code).to_string()),
            category_name: Set((*category_name).to_string()),
            subcategory_code: Set((*subcategory_code).to_string()),
            subcategory_name: Set((*subcategory_name).to_string()),
            code: Set((*code).to_string()),
            name: Set((*name).to_string()),
            ..Default::default()
        };

        account
            .insert(db)
            .await
            .expect("Failed to insert chart account");
    }
}
