//! Initial database migration.
//!
//! Creates all core tables, enums, and indexes for the bookkeeping schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & COMPANIES
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 4: ENTRIES & LINES
        // ============================================================
        db.execute_unprepared(ENTRIES_SQL).await?;
        db.execute_unprepared(ENTRY_LINES_SQL).await?;

        // ============================================================
        // PART 5: SUB-LEDGERS
        // ============================================================
        db.execute_unprepared(PURCHASE_RECORDS_SQL).await?;
        db.execute_unprepared(SALE_RECORDS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM ('user', 'admin');
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY,
    name VARCHAR(200) NOT NULL,
    tax_id VARCHAR(20) UNIQUE,
    address VARCHAR(200),
    phone VARCHAR(50),
    email VARCHAR(100),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    role user_role NOT NULL DEFAULT 'user',
    company_id UUID REFERENCES companies(id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY,
    company_id UUID NOT NULL REFERENCES companies(id),
    category_code VARCHAR(10) NOT NULL,
    category_name VARCHAR(100) NOT NULL,
    subcategory_code VARCHAR(10) NOT NULL,
    subcategory_name VARCHAR(100) NOT NULL,
    code VARCHAR(10) NOT NULL,
    name VARCHAR(100) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_chart_company ON chart_of_accounts(company_id);

-- Account codes are unique per company among ACTIVE accounts only;
-- deactivated codes may be reused.
CREATE UNIQUE INDEX ux_chart_company_code_active
    ON chart_of_accounts(company_id, code)
    WHERE is_active;
";

const ENTRIES_SQL: &str = r"
CREATE TABLE entries (
    id UUID PRIMARY KEY,
    company_id UUID NOT NULL REFERENCES companies(id),
    user_id UUID NOT NULL REFERENCES users(id),
    entry_date DATE NOT NULL,
    entry_number INTEGER NOT NULL,
    supporting_doc VARCHAR(200),
    attached_data TEXT,
    note VARCHAR(500),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- Serializes concurrent submissions of the same entry number:
    -- the second insert fails atomically.
    CONSTRAINT ux_entries_company_number UNIQUE (company_id, entry_number)
);

CREATE INDEX idx_entries_company_date ON entries(company_id, entry_date);
";

const ENTRY_LINES_SQL: &str = r"
CREATE TABLE entry_lines (
    id UUID PRIMARY KEY,
    entry_id UUID NOT NULL REFERENCES entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES chart_of_accounts(id) ON DELETE RESTRICT,
    line_index INTEGER NOT NULL,
    debit NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (credit >= 0),

    CONSTRAINT ux_entry_lines_entry_index UNIQUE (entry_id, line_index)
);

CREATE INDEX idx_entry_lines_entry ON entry_lines(entry_id);
CREATE INDEX idx_entry_lines_account ON entry_lines(account_id);
";

const PURCHASE_RECORDS_SQL: &str = r"
CREATE TABLE purchase_records (
    id UUID PRIMARY KEY,
    company_id UUID NOT NULL REFERENCES companies(id),
    document_ref VARCHAR(200) NOT NULL,
    record_date DATE NOT NULL,
    contact VARCHAR(200),
    amount NUMERIC(15, 2) NOT NULL CHECK (amount > 0),
    terms VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_purchase_records_company_date ON purchase_records(company_id, record_date);
";

const SALE_RECORDS_SQL: &str = r"
CREATE TABLE sale_records (
    id UUID PRIMARY KEY,
    company_id UUID NOT NULL REFERENCES companies(id),
    document_ref VARCHAR(200) NOT NULL,
    record_date DATE NOT NULL,
    contact VARCHAR(200),
    amount NUMERIC(15, 2) NOT NULL CHECK (amount > 0),
    terms VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_sale_records_company_date ON sale_records(company_id, record_date);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS sale_records;
DROP TABLE IF EXISTS purchase_records;
DROP TABLE IF EXISTS entry_lines;
DROP TABLE IF EXISTS entries;
DROP TABLE IF EXISTS chart_of_accounts;
DROP TABLE IF EXISTS users;
DROP TABLE IF EXISTS companies;
DROP TYPE IF EXISTS user_role;
";
