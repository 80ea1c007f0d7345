pub use dzskills_models::questions::{
    Answer, CreateAnswerDto, PaginatedAnswersResponse, UpdateAnswerDto,
};
