use crate::config::{
    validate_provider, DEFAULT_JSON_FILENAME, DEFAULT_STUDENTS_FILE, DEFAULT_TEACHERS_FILE,
    DEFAULT_XML_FILENAME,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SchoolError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub data: DataConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dir: Option<String>,
    pub students_file: Option<String>,
    pub teachers_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: Option<String>,
    pub json_filename: Option<String>,
    pub xml_filename: Option<String>,
    pub escape_xml: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchoolError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SchoolError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment variable's value; unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchoolError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        self.data.dir.as_deref().unwrap_or(".")
    }

    fn students_file(&self) -> &str {
        self.data
            .students_file
            .as_deref()
            .unwrap_or(DEFAULT_STUDENTS_FILE)
    }

    fn teachers_file(&self) -> &str {
        self.data
            .teachers_file
            .as_deref()
            .unwrap_or(DEFAULT_TEACHERS_FILE)
    }

    fn output_dir(&self) -> &str {
        self.export.output_dir.as_deref().unwrap_or(".")
    }

    fn json_filename(&self) -> &str {
        self.export
            .json_filename
            .as_deref()
            .unwrap_or(DEFAULT_JSON_FILENAME)
    }

    fn xml_filename(&self) -> &str {
        self.export
            .xml_filename
            .as_deref()
            .unwrap_or(DEFAULT_XML_FILENAME)
    }

    fn escape_xml(&self) -> bool {
        self.export.escape_xml.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
