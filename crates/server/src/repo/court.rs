use shared_types::{
    eq_filter, like_pattern, page_window, AppError, Court, CourtListParams, Courtroom,
    CourtroomListParams, CreateCourtRequest, CreateCourtroomRequest, CreateProsecutorRequest,
    Prosecutor, UpdateCourtRequest, UpdateCourtroomRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const COURT_COLUMNS: &str = "id, courtname, court_type, location";
const COURTROOM_COLUMNS: &str = "id, court_id, courtroom_no, capacity, availability";

// -- Courts -----------------------------------------------------------------

pub async fn create(db: impl PgExecutor<'_>, req: &CreateCourtRequest) -> Result<Court, AppError> {
    let sql = format!(
        "INSERT INTO courts (courtname, court_type, location) VALUES ($1, $2, $3) RETURNING {COURT_COLUMNS}"
    );
    sqlx::query_as::<_, Court>(&sql)
        .bind(req.courtname.as_deref().map(str::trim))
        .bind(req.court_type.as_deref().map(str::trim))
        .bind(req.location.as_deref().map(str::trim))
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Court>, AppError> {
    let sql = format!("SELECT {COURT_COLUMNS} FROM courts WHERE id = $1");
    sqlx::query_as::<_, Court>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn exists(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM courts WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list(db: impl PgExecutor<'_>, params: &CourtListParams) -> Result<Vec<Court>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {COURT_COLUMNS} FROM courts
        WHERE ($1::TEXT IS NULL OR LOWER(courtname) LIKE $1 ESCAPE '\')
          AND ($2::TEXT IS NULL OR LOWER(court_type) = $2)
          AND ($3::TEXT IS NULL OR LOWER(location) = $3)
        ORDER BY id
        LIMIT $4 OFFSET $5
        "#
    );
    sqlx::query_as::<_, Court>(&sql)
        .bind(like_pattern(params.name.as_deref()))
        .bind(eq_filter(params.court_type.as_deref()))
        .bind(eq_filter(params.location.as_deref()))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateCourtRequest,
) -> Result<Option<Court>, AppError> {
    let sql = format!(
        r#"
        UPDATE courts SET
            courtname  = COALESCE($2, courtname),
            court_type = COALESCE($3, court_type),
            location   = COALESCE($4, location)
        WHERE id = $1
        RETURNING {COURT_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Court>(&sql)
        .bind(id)
        .bind(req.courtname.as_deref())
        .bind(req.court_type.as_deref())
        .bind(req.location.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM courts WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

/// Record that a judge works in a court.
pub async fn add_judge(db: impl PgExecutor<'_>, court_id: i64, judge_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO judge_works_in (judge_id, court_id) VALUES ($1, $2)")
        .bind(judge_id)
        .bind(court_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn add_prosecutor(
    db: impl PgExecutor<'_>,
    court_id: i64,
    prosecutor_id: i64,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO prosecutor_assign (prosecutor_id, court_id) VALUES ($1, $2)")
        .bind(prosecutor_id)
        .bind(court_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

// -- Courtrooms -------------------------------------------------------------

pub async fn create_courtroom(
    db: impl PgExecutor<'_>,
    req: &CreateCourtroomRequest,
) -> Result<Courtroom, AppError> {
    let sql = format!(
        r#"
        INSERT INTO courtrooms (court_id, courtroom_no, capacity, availability)
        VALUES ($1, $2, $3, $4)
        RETURNING {COURTROOM_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Courtroom>(&sql)
        .bind(req.court_id)
        .bind(req.courtroom_no)
        .bind(req.capacity)
        .bind(req.availability)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_courtroom(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Courtroom>, AppError> {
    let sql = format!("SELECT {COURTROOM_COLUMNS} FROM courtrooms WHERE id = $1");
    sqlx::query_as::<_, Courtroom>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_courtrooms(
    db: impl PgExecutor<'_>,
    params: &CourtroomListParams,
) -> Result<Vec<Courtroom>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {COURTROOM_COLUMNS} FROM courtrooms
        WHERE ($1::BIGINT IS NULL OR court_id = $1)
        ORDER BY court_id, courtroom_no
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, Courtroom>(&sql)
        .bind(params.court_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update_courtroom(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateCourtroomRequest,
) -> Result<Option<Courtroom>, AppError> {
    let sql = format!(
        r#"
        UPDATE courtrooms SET
            courtroom_no = COALESCE($2, courtroom_no),
            capacity     = COALESCE($3, capacity),
            availability = COALESCE($4, availability)
        WHERE id = $1
        RETURNING {COURTROOM_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Courtroom>(&sql)
        .bind(id)
        .bind(req.courtroom_no)
        .bind(req.capacity)
        .bind(req.availability)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete_courtroom(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM courtrooms WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

// -- Prosecutors ------------------------------------------------------------

pub async fn create_prosecutor(
    db: impl PgExecutor<'_>,
    req: &CreateProsecutorRequest,
) -> Result<Prosecutor, AppError> {
    sqlx::query_as::<_, Prosecutor>(
        "INSERT INTO prosecutors (name, experience, status) VALUES ($1, $2, $3) RETURNING id, name, experience, status",
    )
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.experience)
    .bind(req.status.as_deref())
    .fetch_one(db)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_prosecutors(
    db: impl PgExecutor<'_>,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<Prosecutor>, AppError> {
    let (limit, offset) = page_window(limit, offset);
    sqlx::query_as::<_, Prosecutor>(
        "SELECT id, name, experience, status FROM prosecutors ORDER BY id LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn prosecutor_exists(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM prosecutors WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
