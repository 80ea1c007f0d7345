pub use dzskills_models::quizzes::{
    CourseQuiz, CreateCourseQuizDto, PaginatedCourseQuizzesResponse, UpdateCourseQuizDto,
};
