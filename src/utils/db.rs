use dzskills_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Returns 404 `"<entity> not found"` unless a row with `id` exists in `table`.
///
/// `table` is always a literal from the calling service, never user input.
pub async fn ensure_exists(
    db: &PgPool,
    table: &'static str,
    entity: &'static str,
    id: impl Into<Uuid>,
) -> Result<(), AppError> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
    let exists = sqlx::query_scalar::<_, bool>(&query)
        .bind(id.into())
        .fetch_one(db)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(AppError::not_found(anyhow::anyhow!("{} not found", entity)))
    }
}

/// Message for a unique constraint of the schema.
fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("teachers_username_key") | Some("students_username_key") => {
            "username already exists"
        }
        Some("teachers_email_key") | Some("students_email_key") => "email already exists",
        Some("categories_name_key") => "Category with this name already exists",
        Some("exams_course_id_key") => "This course already has an exam",
        Some("course_ratings_pkey") => "Student has already rated this course",
        Some("enrollments_pkey") => "Student is already enrolled in this course",
        _ => "Resource already exists",
    }
}

/// Maps constraint violations to client errors and everything else to 500.
///
/// Unique violations become 409 with a message derived from the constraint
/// name; foreign key violations become 404 since the referenced row vanished.
pub fn map_db_error(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(
                "{}",
                conflict_message(db_err.constraint())
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!("Referenced resource not found"));
        }
    }

    AppError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            conflict_message(Some("students_email_key")),
            "email already exists"
        );
        assert_eq!(
            conflict_message(Some("teachers_username_key")),
            "username already exists"
        );
        assert_eq!(conflict_message(None), "Resource already exists");
    }

    #[test]
    fn test_non_database_errors_are_internal() {
        let err = map_db_error(sqlx::Error::RowNotFound);
        assert_eq!(err.status.as_u16(), 500);
    }
}
