//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod company;
pub mod entry;
pub mod report;
pub mod subledger;
pub mod user;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use company::{CompanyError, CompanyRepository, CreateCompanyInput};
pub use entry::{
    CreateEntryInput, CreateEntryLineInput, EntryError, EntryLineDetail, EntryRepository,
    EntryWithLines,
};
pub use report::{ReportError, ReportRepository};
pub use subledger::{CreateSubledgerInput, SubledgerError, SubledgerRepository};
pub use user::UserRepository;
