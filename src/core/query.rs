use crate::core::{Numeric, SchoolData, Student};

/// Linear-scan filters over the student snapshot. Every result keeps the
/// load order of the students.
pub struct QueryEngine<'a> {
    data: &'a SchoolData,
}

impl<'a> QueryEngine<'a> {
    pub fn new(data: &'a SchoolData) -> Self {
        Self { data }
    }

    pub fn students_with_surname(&self, surname: &str) -> Vec<&'a Student> {
        let wanted = surname.to_uppercase();
        self.data
            .students
            .iter()
            .filter(|s| s.last_name.to_uppercase() == wanted)
            .collect()
    }

    /// Students in any classroom held by a teacher with this surname.
    pub fn students_of_teacher(&self, surname: &str) -> Vec<&'a Student> {
        let wanted = surname.to_uppercase();
        let classrooms: Vec<Numeric> = self
            .data
            .teachers
            .iter()
            .filter(|t| t.last_name.to_uppercase() == wanted)
            .map(|t| t.classroom)
            .collect();

        tracing::debug!("Teacher '{}' holds classrooms {:?}", surname, classrooms);

        self.data
            .students
            .iter()
            .filter(|s| classrooms.iter().any(|c| c.matches(&s.classroom)))
            .collect()
    }

    pub fn students_in_grade(&self, grade: Numeric) -> Vec<&'a Student> {
        self.data
            .students
            .iter()
            .filter(|s| s.grade.matches(&grade))
            .collect()
    }

    pub fn students_on_bus(&self, bus: Numeric) -> Vec<&'a Student> {
        self.data
            .students
            .iter()
            .filter(|s| s.bus.matches(&bus))
            .collect()
    }

    pub fn by_student_surname(&self, surname: &str) -> Vec<String> {
        self.students_with_surname(surname)
            .into_iter()
            .map(|s| {
                format!(
                    "{} {}, Grade: {}, Bus: {}",
                    s.last_name, s.first_name, s.grade, s.bus
                )
            })
            .collect()
    }

    pub fn by_teacher_surname(&self, surname: &str) -> Vec<String> {
        self.students_of_teacher(surname)
            .into_iter()
            .map(|s| {
                format!(
                    "{} {}, Classroom: {}, Bus: {}",
                    s.last_name, s.first_name, s.classroom, s.bus
                )
            })
            .collect()
    }

    pub fn by_grade(&self, grade: Numeric) -> Vec<String> {
        self.students_in_grade(grade)
            .into_iter()
            .map(|s| format!("{} {}", s.last_name, s.first_name))
            .collect()
    }

    pub fn by_bus(&self, bus: Numeric) -> Vec<String> {
        self.students_on_bus(bus)
            .into_iter()
            .map(|s| format!("{} {}, Classroom: {}", s.last_name, s.first_name, s.classroom))
            .collect()
    }
}
