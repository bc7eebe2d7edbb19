//! Role policy: which queries and mutations each authenticated role gets.
//!
//! Roles are a closed dispatch. Each variant carries its own read template
//! and permitted mutations, selected once at sign-in; command handlers
//! never branch on role strings.

use thiserror::Error;

use crate::models::{Role, RoleMenu, Session};

/// Closed whitelist of tables the Admin view selector may name. Table
/// names only ever come from this enum, never from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTable {
    Users,
    Departments,
    Professors,
    Students,
    Courses,
    Enrollments,
}

impl AdminTable {
    pub const ALL: [AdminTable; 6] = [
        AdminTable::Users,
        AdminTable::Departments,
        AdminTable::Professors,
        AdminTable::Students,
        AdminTable::Courses,
        AdminTable::Enrollments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTable::Users => "Users",
            AdminTable::Departments => "Departments",
            AdminTable::Professors => "Professors",
            AdminTable::Students => "Students",
            AdminTable::Courses => "Courses",
            AdminTable::Enrollments => "Enrollments",
        }
    }

    /// Resolve a selector string against the whitelist.
    pub fn parse(name: &str) -> Option<AdminTable> {
        Self::ALL.into_iter().find(|table| table.as_str() == name)
    }

    /// Column a selected row resolves to for mutations on this table.
    /// Only `Users` rows are ever mutated from the Admin view.
    fn key_column(&self) -> Option<&'static str> {
        match self {
            AdminTable::Users => Some("user_id"),
            _ => None,
        }
    }
}

/// A value bound positionally into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// A ready-to-run read: statement, positional binds, and the result
/// column (if any) whose value keys each returned row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadAction {
    pub sql: String,
    pub params: Vec<SqlParam>,
    pub key_column: Option<&'static str>,
}

/// The re-runnable identity of a rendered view. Kept alongside the grid
/// it produced so a mutation can refresh exactly the same view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    AdminTable(AdminTable),
    ProfessorRoster,
    StudentTranscript,
}

impl ViewKind {
    /// Rebuild the read action for this view under the given session.
    pub fn read_action(&self, session: &Session) -> ReadAction {
        match self {
            ViewKind::AdminTable(table) => admin_table_view(*table),
            ViewKind::ProfessorRoster => professor_roster(session.user_id),
            ViewKind::StudentTranscript => student_transcript(session.user_id),
        }
    }
}

const PROFESSOR_ROSTER_SQL: &str = r#"
    SELECT s.student_id, s.first_name, s.last_name, c.course_name, e.grade, e.enrollment_id
    FROM Professors p
    JOIN Courses c ON p.prof_id = c.prof_id
    JOIN Enrollments e ON c.course_id = e.course_id
    JOIN Students s ON e.student_id = s.student_id
    WHERE p.user_id = $1
"#;

const STUDENT_TRANSCRIPT_SQL: &str = r#"
    SELECT c.course_name, c.credits, e.grade, p.last_name AS professor
    FROM Students s
    JOIN Enrollments e ON s.student_id = e.student_id
    JOIN Courses c ON e.course_id = c.course_id
    LEFT JOIN Professors p ON c.prof_id = p.prof_id
    WHERE s.user_id = $1
"#;

/// The database cascades this into the Professors/Students profile rows.
pub const DELETE_USER_SQL: &str = "DELETE FROM Users WHERE user_id = $1";

pub const UPDATE_GRADE_SQL: &str = "UPDATE Enrollments SET grade = $1 WHERE enrollment_id = $2";

/// Admin's generic view over one whitelisted table.
pub fn admin_table_view(table: AdminTable) -> ReadAction {
    ReadAction {
        sql: format!("SELECT * FROM {}", table.as_str()),
        params: vec![],
        key_column: table.key_column(),
    }
}

/// Everything the professor teaches: students and enrollments across the
/// professor's courses, keyed by enrollment for grade updates.
pub fn professor_roster(user_id: i32) -> ReadAction {
    ReadAction {
        sql: PROFESSOR_ROSTER_SQL.to_string(),
        params: vec![SqlParam::Int(i64::from(user_id))],
        key_column: Some("enrollment_id"),
    }
}

/// The student's own enrollments. Keyless: student accounts mutate nothing.
pub fn student_transcript(user_id: i32) -> ReadAction {
    ReadAction {
        sql: STUDENT_TRANSCRIPT_SQL.to_string(),
        params: vec![SqlParam::Int(i64::from(user_id))],
        key_column: None,
    }
}

/// The view a role lands on right after sign-in. Admin picks a table first.
pub fn landing_view(role: Role) -> Option<ViewKind> {
    match role {
        Role::Admin => None,
        Role::Professor => Some(ViewKind::ProfessorRoster),
        Role::Student => Some(ViewKind::StudentTranscript),
    }
}

/// The fixed action menu for a role, computed once at sign-in.
pub fn menu(role: Role) -> RoleMenu {
    match role {
        Role::Admin => RoleMenu {
            reads: vec!["View Table".to_string()],
            writes: vec!["Delete Selected User".to_string()],
            read_only: false,
        },
        Role::Professor => RoleMenu {
            reads: vec!["My Students".to_string()],
            writes: vec!["Apply to Selected Row".to_string()],
            read_only: false,
        },
        Role::Student => RoleMenu {
            reads: vec!["My Transcript".to_string()],
            writes: vec![],
            read_only: true,
        },
    }
}

/// Table names for the Admin view selector; other roles get none.
pub fn selector_tables(role: Role) -> Vec<String> {
    match role {
        Role::Admin => AdminTable::ALL
            .into_iter()
            .map(|table| table.as_str().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// A rejection raised before anything reaches the store. The display text
/// is what the user sees in the validation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Your account does not permit this action.")]
    NotPermitted,
    #[error("Select a row in the 'Users' table to delete.")]
    SelectUsersRow,
    #[error("Select a student and enter a grade.")]
    SelectStudentAndGrade,
}

/// Admin delete: only while the Users table is the rendered view and the
/// selected row resolved to a user id.
pub fn validate_delete_user(
    session: &Session,
    view: Option<ViewKind>,
    selected_key: Option<i64>,
) -> Result<i64, PolicyError> {
    if session.role != Role::Admin {
        return Err(PolicyError::NotPermitted);
    }
    if view != Some(ViewKind::AdminTable(AdminTable::Users)) {
        return Err(PolicyError::SelectUsersRow);
    }
    selected_key.ok_or(PolicyError::SelectUsersRow)
}

/// Professor grade update: needs non-blank grade text and a selected row
/// that resolved to an enrollment id.
pub fn validate_update_grade(
    session: &Session,
    selected_key: Option<i64>,
    grade: String,
) -> Result<(i64, String), PolicyError> {
    if session.role != Role::Professor {
        return Err(PolicyError::NotPermitted);
    }
    if grade.trim().is_empty() {
        return Err(PolicyError::SelectStudentAndGrade);
    }
    let enrollment_id = selected_key.ok_or(PolicyError::SelectStudentAndGrade)?;
    Ok((enrollment_id, grade))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn admin() -> Session {
        Session { user_id: 1, role: Role::Admin }
    }

    fn professor() -> Session {
        Session { user_id: 7, role: Role::Professor }
    }

    fn student() -> Session {
        Session { user_id: 3, role: Role::Student }
    }

    #[test]
    fn whitelist_is_closed() {
        for table in AdminTable::ALL {
            assert_eq!(AdminTable::parse(table.as_str()), Some(table));
        }
        assert_eq!(AdminTable::parse("users"), None);
        assert_eq!(AdminTable::parse("Users; DROP TABLE Users"), None);
        assert_eq!(AdminTable::parse(""), None);
    }

    #[test]
    fn admin_view_selects_the_whole_table() {
        let action = admin_table_view(AdminTable::Courses);
        assert_eq!(action.sql, "SELECT * FROM Courses");
        assert!(action.params.is_empty());
        assert_eq!(action.key_column, None);
    }

    #[test]
    fn only_the_users_view_keys_its_rows() {
        assert_eq!(admin_table_view(AdminTable::Users).key_column, Some("user_id"));
        for table in AdminTable::ALL {
            if table != AdminTable::Users {
                assert_eq!(admin_table_view(table).key_column, None);
            }
        }
    }

    #[test]
    fn roster_binds_the_session_user_and_keys_by_enrollment() {
        let action = professor_roster(7);
        assert_eq!(action.params, vec![SqlParam::Int(7)]);
        assert_eq!(action.key_column, Some("enrollment_id"));
        assert!(action.sql.contains("WHERE p.user_id = $1"));
    }

    #[test]
    fn transcript_is_keyless() {
        let action = student_transcript(3);
        assert_eq!(action.params, vec![SqlParam::Int(3)]);
        assert_eq!(action.key_column, None);
        assert!(action.sql.contains("WHERE s.user_id = $1"));
    }

    #[test]
    fn landing_views_per_role() {
        assert_eq!(landing_view(Role::Admin), None);
        assert_eq!(landing_view(Role::Professor), Some(ViewKind::ProfessorRoster));
        assert_eq!(landing_view(Role::Student), Some(ViewKind::StudentTranscript));
    }

    #[test]
    fn student_menu_offers_no_writes() {
        let menu = menu(Role::Student);
        assert!(menu.writes.is_empty());
        assert!(menu.read_only);
    }

    #[test]
    fn only_admin_gets_selector_tables() {
        assert_eq!(selector_tables(Role::Admin).len(), 6);
        assert!(selector_tables(Role::Professor).is_empty());
        assert!(selector_tables(Role::Student).is_empty());
    }

    #[test]
    fn delete_requires_the_users_view() {
        assert_eq!(
            validate_delete_user(&admin(), Some(ViewKind::AdminTable(AdminTable::Courses)), Some(4)),
            Err(PolicyError::SelectUsersRow)
        );
        assert_eq!(
            validate_delete_user(&admin(), None, Some(4)),
            Err(PolicyError::SelectUsersRow)
        );
    }

    #[test]
    fn delete_requires_a_selection() {
        assert_eq!(
            validate_delete_user(&admin(), Some(ViewKind::AdminTable(AdminTable::Users)), None),
            Err(PolicyError::SelectUsersRow)
        );
    }

    #[test]
    fn delete_resolves_the_selected_user() {
        assert_eq!(
            validate_delete_user(&admin(), Some(ViewKind::AdminTable(AdminTable::Users)), Some(42)),
            Ok(42)
        );
    }

    #[test]
    fn non_admins_cannot_delete() {
        for session in [professor(), student()] {
            assert_eq!(
                validate_delete_user(&session, Some(ViewKind::AdminTable(AdminTable::Users)), Some(1)),
                Err(PolicyError::NotPermitted)
            );
        }
    }

    #[test]
    fn grade_update_rejects_blank_text() {
        assert_eq!(
            validate_update_grade(&professor(), Some(9), String::new()),
            Err(PolicyError::SelectStudentAndGrade)
        );
        assert_eq!(
            validate_update_grade(&professor(), Some(9), "   ".to_string()),
            Err(PolicyError::SelectStudentAndGrade)
        );
    }

    #[test]
    fn grade_update_requires_a_selection() {
        assert_eq!(
            validate_update_grade(&professor(), None, "A+".to_string()),
            Err(PolicyError::SelectStudentAndGrade)
        );
    }

    #[test]
    fn grade_update_resolves_the_enrollment() {
        assert_eq!(
            validate_update_grade(&professor(), Some(9), "A+".to_string()),
            Ok((9, "A+".to_string()))
        );
    }

    #[test]
    fn students_cannot_write() {
        assert_eq!(
            validate_update_grade(&student(), Some(9), "A+".to_string()),
            Err(PolicyError::NotPermitted)
        );
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        assert_eq!(
            PolicyError::SelectUsersRow.to_string(),
            "Select a row in the 'Users' table to delete."
        );
        assert_eq!(
            PolicyError::SelectStudentAndGrade.to_string(),
            "Select a student and enter a grade."
        );
    }
}
