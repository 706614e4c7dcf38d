pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STUDENTS_FILE: &str = "list.txt";
pub const DEFAULT_TEACHERS_FILE: &str = "teachers.txt";
pub const DEFAULT_JSON_FILENAME: &str = "school_data.json";
pub const DEFAULT_XML_FILENAME: &str = "school_data.xml";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "school-search")]
#[command(about = "Interactive lookup over the student and teacher lists")]
pub struct CliConfig {
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    #[arg(long, default_value = DEFAULT_STUDENTS_FILE)]
    pub students_file: String,

    #[arg(long, default_value = DEFAULT_TEACHERS_FILE)]
    pub teachers_file: String,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long, help = "Write XML text nodes without escaping")]
    pub raw_xml: bool,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            students_file: DEFAULT_STUDENTS_FILE.to_string(),
            teachers_file: DEFAULT_TEACHERS_FILE.to_string(),
            output_dir: ".".to_string(),
            raw_xml: false,
            config: None,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn students_file(&self) -> &str {
        &self.students_file
    }

    fn teachers_file(&self) -> &str {
        &self.teachers_file
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn json_filename(&self) -> &str {
        DEFAULT_JSON_FILENAME
    }

    fn xml_filename(&self) -> &str {
        DEFAULT_XML_FILENAME
    }

    fn escape_xml(&self) -> bool {
        !self.raw_xml
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_path("data_dir", config.data_dir())?;
    validation::validate_path("output_dir", config.output_dir())?;
    validation::validate_path("students_file", config.students_file())?;
    validation::validate_path("teachers_file", config.teachers_file())?;
    validation::validate_file_name("json_filename", config.json_filename())?;
    validation::validate_file_name("xml_filename", config.xml_filename())?;
    validation::validate_distinct(
        "students_file",
        config.students_file(),
        "teachers_file",
        config.teachers_file(),
    )?;
    validation::validate_distinct(
        "json_filename",
        config.json_filename(),
        "xml_filename",
        config.xml_filename(),
    )?;
    Ok(())
}
