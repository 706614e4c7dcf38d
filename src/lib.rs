pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::dispatcher::{run_session, Command, Dispatcher, Reply};
pub use crate::core::export::{DataExporter, ExportFormat};
pub use crate::core::loader::load_school_data;
pub use crate::core::query::QueryEngine;
pub use crate::domain::model::{Numeric, SchoolData, Student, Teacher};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::{Result, SchoolError};
