pub mod cli;
pub mod config;
pub mod ctx;
pub mod input;
pub mod io;
pub mod pipeline;
pub mod prepare;
pub mod schema;
pub mod timeline;
