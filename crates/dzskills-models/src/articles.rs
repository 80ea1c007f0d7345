//! Reading material attached to a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ArticleId, CourseId};
use crate::paginated_response;

#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateArticleDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(url)]
    pub link: String,
    pub description: Option<String>,
    pub course_id: CourseId,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateArticleDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(url)]
    pub link: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<CourseId>,
}

paginated_response!(PaginatedArticlesResponse, Article);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_link_must_be_url() {
        let dto = CreateArticleDto {
            title: "Ownership".to_string(),
            link: "not a url".to_string(),
            description: None,
            course_id: CourseId::new(),
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("link"));

        let dto = CreateArticleDto {
            link: "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html".to_string(),
            ..dto
        };
        assert!(dto.validate().is_ok());
    }
}
