pub use dzskills_models::questions::{
    CreateQuestionDto, PaginatedQuestionsResponse, Question, UpdateQuestionDto,
};
