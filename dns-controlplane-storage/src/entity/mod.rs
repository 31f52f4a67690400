//! `SeaORM` entities, one module per table.

pub mod blacklist;
pub mod domain;
pub mod quota;
pub mod record;
pub mod recordset;
pub mod server;
pub mod tld;
pub mod tsigkey;
