// Infrastructure layer module
// Contains database adapters and the SQL they run
// Follows Hexagonal Architecture

pub mod database;
pub mod repositories;
pub mod seed;
pub mod sql;
