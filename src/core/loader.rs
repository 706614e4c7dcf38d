use crate::core::{ConfigProvider, Numeric, SchoolData, Storage, Student, Teacher};
use crate::utils::error::Result;
use csv::{ReaderBuilder, StringRecord, Trim};

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").to_string()
}

fn numeric_field(record: &StringRecord, index: usize) -> Numeric {
    record
        .get(index)
        .map(Numeric::parse)
        .unwrap_or(Numeric::NotANumber)
}

/// Splits comma-separated text into trimmed rows, skipping lines that are
/// blank after trimming. There is no header row and no quoting.
fn parse_rows(text: &str) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

impl From<&StringRecord> for Student {
    fn from(record: &StringRecord) -> Self {
        Student {
            last_name: field(record, 0),
            first_name: field(record, 1),
            grade: numeric_field(record, 2),
            classroom: numeric_field(record, 3),
            bus: numeric_field(record, 4),
        }
    }
}

impl From<&StringRecord> for Teacher {
    fn from(record: &StringRecord) -> Self {
        Teacher {
            last_name: field(record, 0),
            first_name: field(record, 1),
            classroom: numeric_field(record, 2),
        }
    }
}

pub fn parse_students(text: &str) -> Result<Vec<Student>> {
    Ok(parse_rows(text)?.iter().map(Student::from).collect())
}

pub fn parse_teachers(text: &str) -> Result<Vec<Teacher>> {
    Ok(parse_rows(text)?.iter().map(Teacher::from).collect())
}

pub async fn load_students<S: Storage>(storage: &S, path: &str) -> Result<Vec<Student>> {
    let bytes = storage.read_file(path).await?;
    parse_students(&String::from_utf8_lossy(&bytes))
}

pub async fn load_teachers<S: Storage>(storage: &S, path: &str) -> Result<Vec<Teacher>> {
    let bytes = storage.read_file(path).await?;
    parse_teachers(&String::from_utf8_lossy(&bytes))
}

/// A failed load is reported and replaced by an empty list.
pub fn or_empty<T>(loaded: Result<Vec<T>>, path: &str) -> Vec<T> {
    match loaded {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("❌ Failed to read file '{}': {}", path, e.user_friendly_message());
            Vec::new()
        }
    }
}

pub async fn load_school_data<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> SchoolData {
    let students = or_empty(
        load_students(storage, config.students_file()).await,
        config.students_file(),
    );
    let teachers = or_empty(
        load_teachers(storage, config.teachers_file()).await,
        config.teachers_file(),
    );

    tracing::info!(
        "Loaded {} students from {} and {} teachers from {}",
        students.len(),
        config.students_file(),
        teachers.len(),
        config.teachers_file()
    );

    SchoolData::new(students, teachers)
}
