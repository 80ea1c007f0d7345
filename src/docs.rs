use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use dzskills_auth::{Claims, UserRole};
use dzskills_core::{PaginationMeta, PaginationParams};
use dzskills_models::MessageResponse;
use dzskills_models::articles::{
    Article, CreateArticleDto, PaginatedArticlesResponse, UpdateArticleDto,
};
use dzskills_models::auth::{LoginRequest, LoginResponse};
use dzskills_models::categories::{
    Category, CategoryDto, CategoryWithSubcategories, CreateSubcategoryDto,
    PaginatedCategoriesResponse, PaginatedSubcategoriesResponse, Subcategory,
    UpdateSubcategoryDto,
};
use dzskills_models::courses::{
    Course, CourseFilterParams, CourseImageResponse, CreateCourseDto, PaginatedCoursesResponse,
    UpdateCourseDto,
};
use dzskills_models::enrollments::{
    CreateEnrollmentDto, Enrollment, ExamAnswer, ExamResult, PaginatedEnrollmentsResponse,
    SubmitExamDto, UpdateEnrollmentDto,
};
use dzskills_models::exams::{CreateExamDto, Exam, PaginatedExamsResponse, UpdateExamDto};
use dzskills_models::feedbacks::{
    CreateFeedbackDto, Feedback, PaginatedFeedbacksResponse, UpdateFeedbackDto,
};
use dzskills_models::questions::{
    Answer, CreateAnswerDto, CreateQuestionDto, PaginatedAnswersResponse,
    PaginatedQuestionsResponse, Question, UpdateAnswerDto, UpdateQuestionDto,
};
use dzskills_models::quizzes::{
    CourseQuiz, CreateCourseQuizDto, CreateExamQuizDto, ExamQuiz, PaginatedCourseQuizzesResponse,
    PaginatedExamQuizzesResponse, UpdateCourseQuizDto, UpdateExamQuizDto,
};
use dzskills_models::ratings::{
    AverageRating, CourseRating, CreateRatingDto, PaginatedRatingsResponse, UpdateRatingDto,
};
use dzskills_models::students::{
    CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto,
};
use dzskills_models::teachers::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, UpdateTeacherDto,
};
use dzskills_models::videos::{CreateVideoDto, PaginatedVideosResponse, UpdateVideoDto, Video};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::courses::controller::CourseImageForm;
use crate::router::{HealthResponse, WelcomeResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::welcome,
        crate::router::health_check,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher_by_id,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student_by_id,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::feedbacks::controller::get_student_feedbacks,
        crate::modules::ratings::controller::get_student_ratings,
        crate::modules::enrollments::controller::get_student_enrollments,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category_by_id,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::subcategories::controller::get_category_subcategories,
        crate::modules::subcategories::controller::create_subcategory,
        crate::modules::subcategories::controller::get_subcategories,
        crate::modules::subcategories::controller::get_subcategory_by_id,
        crate::modules::subcategories::controller::update_subcategory,
        crate::modules::subcategories::controller::delete_subcategory,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::upload_course_image,
        crate::modules::articles::controller::get_course_articles,
        crate::modules::videos::controller::get_course_videos,
        crate::modules::course_quizzes::controller::get_course_quizzes,
        crate::modules::exams::controller::get_course_exam,
        crate::modules::ratings::controller::get_course_ratings,
        crate::modules::ratings::controller::get_course_average_rating,
        crate::modules::articles::controller::create_article,
        crate::modules::articles::controller::get_articles,
        crate::modules::articles::controller::get_article_by_id,
        crate::modules::articles::controller::update_article,
        crate::modules::articles::controller::delete_article,
        crate::modules::videos::controller::create_video,
        crate::modules::videos::controller::get_videos,
        crate::modules::videos::controller::get_video_by_id,
        crate::modules::videos::controller::update_video,
        crate::modules::videos::controller::delete_video,
        crate::modules::course_quizzes::controller::create_course_quiz,
        crate::modules::course_quizzes::controller::get_all_course_quizzes,
        crate::modules::course_quizzes::controller::get_course_quiz_by_id,
        crate::modules::course_quizzes::controller::update_course_quiz,
        crate::modules::course_quizzes::controller::delete_course_quiz,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::get_exams,
        crate::modules::exams::controller::get_exam_by_id,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
        crate::modules::exam_quizzes::controller::get_exam_quizzes,
        crate::modules::exam_quizzes::controller::create_exam_quiz,
        crate::modules::exam_quizzes::controller::get_all_exam_quizzes,
        crate::modules::exam_quizzes::controller::get_exam_quiz_by_id,
        crate::modules::exam_quizzes::controller::update_exam_quiz,
        crate::modules::exam_quizzes::controller::delete_exam_quiz,
        crate::modules::questions::controller::create_question,
        crate::modules::questions::controller::get_questions,
        crate::modules::questions::controller::get_question_by_id,
        crate::modules::questions::controller::update_question,
        crate::modules::questions::controller::delete_question,
        crate::modules::answers::controller::get_question_answers,
        crate::modules::answers::controller::create_answer,
        crate::modules::answers::controller::get_answers,
        crate::modules::answers::controller::get_answer_by_id,
        crate::modules::answers::controller::update_answer,
        crate::modules::answers::controller::delete_answer,
        crate::modules::feedbacks::controller::create_feedback,
        crate::modules::feedbacks::controller::get_feedbacks,
        crate::modules::feedbacks::controller::get_feedback_by_id,
        crate::modules::feedbacks::controller::update_feedback,
        crate::modules::feedbacks::controller::delete_feedback,
        crate::modules::ratings::controller::create_rating,
        crate::modules::ratings::controller::get_ratings,
        crate::modules::ratings::controller::get_rating,
        crate::modules::ratings::controller::update_rating,
        crate::modules::ratings::controller::delete_rating,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::update_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::enrollments::controller::submit_exam,
    ),
    components(
        schemas(
            WelcomeResponse,
            HealthResponse,
            ErrorResponse,
            MessageResponse,
            PaginationMeta,
            PaginationParams,
            LoginRequest,
            LoginResponse,
            Claims,
            UserRole,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            PaginatedTeachersResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            Category,
            CategoryDto,
            CategoryWithSubcategories,
            PaginatedCategoriesResponse,
            Subcategory,
            CreateSubcategoryDto,
            UpdateSubcategoryDto,
            PaginatedSubcategoriesResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            CourseFilterParams,
            CourseImageForm,
            CourseImageResponse,
            PaginatedCoursesResponse,
            Article,
            CreateArticleDto,
            UpdateArticleDto,
            PaginatedArticlesResponse,
            Video,
            CreateVideoDto,
            UpdateVideoDto,
            PaginatedVideosResponse,
            CourseQuiz,
            CreateCourseQuizDto,
            UpdateCourseQuizDto,
            PaginatedCourseQuizzesResponse,
            Exam,
            CreateExamDto,
            UpdateExamDto,
            PaginatedExamsResponse,
            ExamQuiz,
            CreateExamQuizDto,
            UpdateExamQuizDto,
            PaginatedExamQuizzesResponse,
            Question,
            CreateQuestionDto,
            UpdateQuestionDto,
            PaginatedQuestionsResponse,
            Answer,
            CreateAnswerDto,
            UpdateAnswerDto,
            PaginatedAnswersResponse,
            Feedback,
            CreateFeedbackDto,
            UpdateFeedbackDto,
            PaginatedFeedbacksResponse,
            CourseRating,
            CreateRatingDto,
            UpdateRatingDto,
            AverageRating,
            PaginatedRatingsResponse,
            Enrollment,
            CreateEnrollmentDto,
            UpdateEnrollmentDto,
            PaginatedEnrollmentsResponse,
            ExamAnswer,
            SubmitExamDto,
            ExamResult,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Authentication", description = "Login for teachers and students"),
        (name = "Teachers", description = "Teacher accounts"),
        (name = "Students", description = "Student accounts and their activity"),
        (name = "Categories", description = "Course categories and subcategories"),
        (name = "Subcategories", description = "Subcategory management"),
        (name = "Courses", description = "Courses and their content"),
        (name = "Articles", description = "Course reading material"),
        (name = "Videos", description = "Course video material"),
        (name = "Course Quizzes", description = "Practice quizzes attached to courses"),
        (name = "Exams", description = "Course exams and their quizzes"),
        (name = "Exam Quizzes", description = "Graded exam questions"),
        (name = "Questions", description = "Student questions about courses"),
        (name = "Answers", description = "Answers to student questions"),
        (name = "Feedbacks", description = "Platform feedback"),
        (name = "Ratings", description = "Course ratings"),
        (name = "Enrollments", description = "Enrollments, exam submission and certificates")
    ),
    info(
        title = "DZ Skills API",
        version = "0.1.0",
        description = "E-learning REST API: courses, content, exams and certificates, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_exam_submission() {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths
                .paths
                .contains_key("/api/enrollments/{student_id}/{course_id}/exam")
        );
        assert!(doc.paths.paths.contains_key("/api/courses/{id}/ratings/average"));
    }

    #[test]
    fn test_openapi_has_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
