use crate::core::{ConfigProvider, SchoolData, Storage};
use crate::utils::error::{Result, SchoolError};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xml,
}

impl FromStr for ExportFormat {
    type Err = SchoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "JSON" => Ok(ExportFormat::Json),
            "XML" => Ok(ExportFormat::Xml),
            _ => Err(SchoolError::usage(
                "Invalid format. Use JSON or XML.",
            )),
        }
    }
}

pub fn render_json(data: &SchoolData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_field(xml: &mut String, name: &str, value: impl Display) {
    xml.push_str(&format!("    <{name}>{value}</{name}>\n"));
}

/// Hand-built document, one element per line. With `escape` off, text
/// nodes are written exactly as loaded.
pub fn render_xml(data: &SchoolData, escape: bool) -> String {
    let text = |s: &str| {
        if escape {
            escape_text(s)
        } else {
            s.to_string()
        }
    };

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<school>\n<students>\n");
    for s in &data.students {
        xml.push_str("  <student>\n");
        push_field(&mut xml, "StLastName", text(&s.last_name));
        push_field(&mut xml, "StFirstName", text(&s.first_name));
        push_field(&mut xml, "Grade", s.grade);
        push_field(&mut xml, "Classroom", s.classroom);
        push_field(&mut xml, "Bus", s.bus);
        xml.push_str("  </student>\n");
    }
    xml.push_str("</students>\n<teachers>\n");
    for t in &data.teachers {
        xml.push_str("  <teacher>\n");
        push_field(&mut xml, "TLastName", text(&t.last_name));
        push_field(&mut xml, "TFirstName", text(&t.first_name));
        push_field(&mut xml, "Classroom", t.classroom);
        xml.push_str("  </teacher>\n");
    }
    xml.push_str("</teachers>\n</school>");
    xml
}

pub struct DataExporter<S: Storage> {
    storage: S,
    json_filename: String,
    xml_filename: String,
    escape_xml: bool,
}

impl<S: Storage> DataExporter<S> {
    pub fn new<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self {
            storage,
            json_filename: config.json_filename().to_string(),
            xml_filename: config.xml_filename().to_string(),
            escape_xml: config.escape_xml(),
        }
    }

    pub fn filename(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::Json => &self.json_filename,
            ExportFormat::Xml => &self.xml_filename,
        }
    }

    /// Renders the full snapshot and overwrites the target file.
    /// Returns the file name written.
    pub async fn export(&self, format: ExportFormat, data: &SchoolData) -> Result<String> {
        let content = match format {
            ExportFormat::Json => render_json(data)?,
            ExportFormat::Xml => render_xml(data, self.escape_xml),
        };

        let filename = self.filename(format);
        tracing::debug!("Writing {:?} export ({} bytes) to {}", format, content.len(), filename);
        self.storage.write_file(filename, content.as_bytes()).await?;

        tracing::info!(
            "Exported {} students and {} teachers to {}",
            data.students.len(),
            data.teachers.len(),
            filename
        );
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::core::loader::{parse_students, parse_teachers};
    use crate::core::test_support::MockStorage;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn sample() -> SchoolData {
        SchoolData::new(
            parse_students("Doe, John, 5, 101, 12\nR&D, <Al>, 6, x, 3").unwrap(),
            parse_teachers("Black, Ann, 101").unwrap(),
        )
    }

    #[test]
    fn test_format_is_case_insensitive() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("Xml".parse::<ExportFormat>().unwrap(), ExportFormat::Xml);
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_json_layout() {
        let data = SchoolData::new(
            parse_students("Doe, John, 5, 101, 12").unwrap(),
            parse_teachers("Black, Ann, 101").unwrap(),
        );
        let expected = r#"{
  "students": [
    {
      "StLastName": "Doe",
      "StFirstName": "John",
      "Grade": 5,
      "Classroom": 101,
      "Bus": 12
    }
  ],
  "teachers": [
    {
      "TLastName": "Black",
      "TFirstName": "Ann",
      "Classroom": 101
    }
  ]
}"#;
        assert_eq!(render_json(&data).unwrap(), expected);
    }

    #[test]
    fn test_json_reparses_with_integer_values() {
        let data = sample();
        let json = render_json(&data).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let students = value["students"].as_array().unwrap();
        let teachers = value["teachers"].as_array().unwrap();
        assert_eq!(students.len() + teachers.len(), 3);
        assert_eq!(students[0]["Grade"], serde_json::json!(5));
        assert!(students[1]["Classroom"].is_null());

        let back: SchoolData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_raw_xml_layout() {
        let data = SchoolData::new(
            parse_students("Doe, John, 5, 101, 12").unwrap(),
            parse_teachers("Black, Ann, 101").unwrap(),
        );
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<school>\n\
<students>\n\
\x20 <student>\n\
\x20   <StLastName>Doe</StLastName>\n\
\x20   <StFirstName>John</StFirstName>\n\
\x20   <Grade>5</Grade>\n\
\x20   <Classroom>101</Classroom>\n\
\x20   <Bus>12</Bus>\n\
\x20 </student>\n\
</students>\n\
<teachers>\n\
\x20 <teacher>\n\
\x20   <TLastName>Black</TLastName>\n\
\x20   <TFirstName>Ann</TFirstName>\n\
\x20   <Classroom>101</Classroom>\n\
\x20 </teacher>\n\
</teachers>\n\
</school>";
        assert_eq!(render_xml(&data, false), expected);
        assert_eq!(render_xml(&data, true), expected);
    }

    #[test]
    fn test_xml_escaping() {
        let data = sample();

        let escaped = render_xml(&data, true);
        assert!(escaped.contains("<StLastName>R&amp;D</StLastName>"));
        assert!(escaped.contains("<StFirstName>&lt;Al&gt;</StFirstName>"));
        assert!(escaped.contains("<Classroom>NaN</Classroom>"));

        let raw = render_xml(&data, false);
        assert!(raw.contains("<StLastName>R&D</StLastName>"));
    }

    /// Reads the document with a strict XML reader, unescaping every text
    /// node, and returns each record element with its surname.
    fn read_records(xml: &str) -> std::result::Result<Vec<(String, String)>, Box<dyn std::error::Error>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut record: Option<String> = None;
        let mut element: Option<String> = None;
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec())?;
                    if name == "student" || name == "teacher" {
                        record = Some(name.clone());
                    }
                    element = Some(name);
                }
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    if matches!(element.as_deref(), Some("StLastName" | "TLastName")) {
                        if let Some(kind) = &record {
                            records.push((kind.clone(), text));
                        }
                    }
                }
                Event::End(_) => element = None,
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(records)
    }

    #[test]
    fn test_escaped_xml_is_well_formed_and_ordered() {
        let data = SchoolData::new(
            parse_students("Doe, John, 5, 101, 12\nR&D, <Al>, 6, x, 3\nKim, Lee, 6, 101, 7").unwrap(),
            parse_teachers("Black, Ann, 101\nW<hite, Tom, 102").unwrap(),
        );

        let records = read_records(&render_xml(&data, true)).unwrap();
        assert_eq!(
            records,
            vec![
                ("student".to_string(), "Doe".to_string()),
                ("student".to_string(), "R&D".to_string()),
                ("student".to_string(), "Kim".to_string()),
                ("teacher".to_string(), "Black".to_string()),
                ("teacher".to_string(), "W<hite".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_xml_with_markup_in_names_is_rejected_by_reader() {
        let data = sample();
        assert!(read_records(&render_xml(&data, false)).is_err());
    }

    #[test]
    fn test_empty_snapshot_xml_is_well_formed() {
        let records = read_records(&render_xml(&SchoolData::default(), true)).unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_export_writes_configured_file() {
        let storage = MockStorage::new();
        let exporter = DataExporter::new(storage.clone(), &CliConfig::default());
        let data = sample();

        let written = exporter.export(ExportFormat::Json, &data).await.unwrap();
        assert_eq!(written, "school_data.json");
        let json = storage.get_file("school_data.json").await.unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), render_json(&data).unwrap());

        let written = exporter.export(ExportFormat::Xml, &data).await.unwrap();
        assert_eq!(written, "school_data.xml");
        assert!(storage.get_file("school_data.xml").await.is_some());
    }

    #[tokio::test]
    async fn test_export_overwrites() {
        let storage = MockStorage::new();
        storage.insert("school_data.json", "stale").await;
        let exporter = DataExporter::new(storage.clone(), &CliConfig::default());

        exporter
            .export(ExportFormat::Json, &SchoolData::default())
            .await
            .unwrap();

        let json = storage.get_file("school_data.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["students"], serde_json::json!([]));
        assert_eq!(value["teachers"], serde_json::json!([]));
    }
}
