pub use dzskills_models::quizzes::{
    CreateExamQuizDto, ExamQuiz, PaginatedExamQuizzesResponse, UpdateExamQuizDto,
};
