//! `SeaORM` entity definitions.

pub mod chart_of_accounts;
pub mod companies;
pub mod entries;
pub mod entry_lines;
pub mod purchase_records;
pub mod sale_records;
pub mod sea_orm_active_enums;
pub mod users;
