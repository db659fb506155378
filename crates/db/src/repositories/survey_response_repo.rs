//! Repository for the `survey_responses` table.

use sqlx::PgConnection;
use survey_core::survey::SurveyResponse;

/// Column list shared by the create and insert statements.
///
/// Order matters: values are bound positionally in this order.
pub const SURVEY_COLUMNS: &str = "\
    name, developer_hours, python_hours, libraries, file_types, \
    sql_hours, workshop_proposed_time";

const CREATE_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS survey_responses ( \
        name TEXT, \
        developer_hours INT, \
        python_hours INT, \
        libraries TEXT, \
        file_types TEXT, \
        sql_hours INT, \
        workshop_proposed_time TEXT \
    )";

/// Provides schema setup, inserts and slot queries for survey responses.
pub struct SurveyResponseRepo;

impl SurveyResponseRepo {
    /// Create the table if it does not exist yet. Safe to call repeatedly.
    pub async fn ensure_table(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
        Ok(())
    }

    /// Insert one response as one row.
    pub async fn insert(
        conn: &mut PgConnection,
        response: &SurveyResponse,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_responses ({SURVEY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)"
        );
        sqlx::query(&query)
            .bind(&response.name)
            .bind(response.developer_hours)
            .bind(response.python_hours)
            .bind(&response.libraries)
            .bind(&response.file_types)
            .bind(response.sql_hours)
            .bind(response.workshop_proposed_time.label())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Every stored workshop slot value, one per row, unfiltered.
    ///
    /// NULLs are skipped, the same as a frequency count would skip them.
    pub async fn list_slots(conn: &mut PgConnection) -> Result<Vec<String>, sqlx::Error> {
        let slots: Vec<Option<String>> =
            sqlx::query_scalar("SELECT workshop_proposed_time FROM survey_responses")
                .fetch_all(&mut *conn)
                .await?;
        Ok(slots.into_iter().flatten().collect())
    }

    /// Votes per slot, grouped by the database.
    ///
    /// Ordered by votes descending, then by slot label.
    pub async fn count_by_slot(
        conn: &mut PgConnection,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT workshop_proposed_time, COUNT(*) AS votes \
             FROM survey_responses \
             WHERE workshop_proposed_time IS NOT NULL \
             GROUP BY workshop_proposed_time \
             ORDER BY votes DESC, workshop_proposed_time",
        )
        .fetch_all(&mut *conn)
        .await
    }
}
