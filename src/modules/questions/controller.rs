use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use dzskills_core::{AppError, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::ids::QuestionId;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateQuestionDto, PaginatedQuestionsResponse, Question, UpdateQuestionDto};
use super::service::QuestionService;

/// Ask a question about a course
///
/// Students can only ask in their own name; teachers may file on behalf of any student.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionDto,
    responses(
        (status = 201, description = "Question created", body = Question),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Student id does not match the token"),
        (status = 404, description = "Course or student not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Questions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateQuestionDto>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    auth_user.ensure_teacher_or_student(dto.student_id.into_inner())?;
    let question = QuestionService::create_question(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    get,
    path = "/api/questions",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of questions", body = PaginatedQuestionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Questions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_questions(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedQuestionsResponse>, AppError> {
    let questions = QuestionService::get_questions(&state.db, pagination).await?;
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = Uuid, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question details", body = Question),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Question not found")
    ),
    tag = "Questions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_question_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<QuestionId>,
) -> Result<Json<Question>, AppError> {
    let question = QuestionService::get_question_by_id(&state.db, id).await?;
    Ok(Json(question))
}

#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(("id" = Uuid, Path, description = "Question ID")),
    request_body = UpdateQuestionDto,
    responses(
        (status = 200, description = "Question updated", body = Question),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Question belongs to another student"),
        (status = 404, description = "Question not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Questions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn update_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<QuestionId>,
    ValidatedJson(dto): ValidatedJson<UpdateQuestionDto>,
) -> Result<Json<Question>, AppError> {
    let existing = QuestionService::get_question_by_id(&state.db, id).await?;
    auth_user.ensure_teacher_or_student(existing.student_id.into_inner())?;

    let question = QuestionService::update_question(&state.db, id, dto).await?;
    Ok(Json(question))
}

#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(("id" = Uuid, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Question belongs to another student"),
        (status = 404, description = "Question not found")
    ),
    tag = "Questions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<QuestionId>,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = QuestionService::get_question_by_id(&state.db, id).await?;
    auth_user.ensure_teacher_or_student(existing.student_id.into_inner())?;

    QuestionService::delete_question(&state.db, id).await?;
    Ok(Json(MessageResponse::deleted("Question")))
}
