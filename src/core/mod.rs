pub mod dispatcher;
pub mod export;
pub mod loader;
pub mod query;

pub use crate::domain::model::{Numeric, SchoolData, Student, Teacher};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
