use chrono::NaiveDateTime;

/// A named category of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,                 // ⇔ projects.name (PRIMARY KEY)
    pub creation_time: NaiveDateTime, // ⇔ projects.creation_time
}
