pub use dzskills_models::categories::{
    Category, CategoryDto, CategoryWithSubcategories, PaginatedCategoriesResponse,
};
