pub use dzskills_models::categories::{
    CreateSubcategoryDto, PaginatedSubcategoriesResponse, Subcategory, UpdateSubcategoryDto,
};
