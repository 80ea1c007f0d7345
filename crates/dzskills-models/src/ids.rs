//! Typed identifiers.
//!
//! Every table gets its own `Uuid` newtype so a `CourseId` can never be passed
//! where an `ExamId` is expected:
//!
//! ```ignore
//! use dzskills_models::ids::{CourseId, ExamId};
//!
//! fn exam_for(course: CourseId) -> Option<ExamId> { /* ... */ }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Generates a `Uuid` newtype usable as a sqlx column, a serde value, a path
/// parameter and an OpenAPI `uuid` string.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID.
            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID value.
            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <Uuid as PgHasArrayType>::array_type_info()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a teacher account.
    TeacherId
);

define_id!(
    /// Identifier of a student account.
    StudentId
);

define_id!(
    /// Identifier of a course category.
    CategoryId
);

define_id!(
    /// Identifier of a subcategory.
    SubcategoryId
);

define_id!(
    /// Identifier of a course.
    CourseId
);

define_id!(
    /// Identifier of a course article.
    ArticleId
);

define_id!(
    /// Identifier of a course video.
    VideoId
);

define_id!(
    /// Identifier of a practice quiz attached to a course.
    CourseQuizId
);

define_id!(
    /// Identifier of a course exam.
    ExamId
);

define_id!(
    /// Identifier of a graded exam question.
    ExamQuizId
);

define_id!(
    /// Identifier of a student question.
    QuestionId
);

define_id!(
    /// Identifier of a answer to a student question.
    AnswerId
);

define_id!(
    /// Identifier of a student feedback entry.
    FeedbackId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(CourseId::new(), CourseId::new());
    }

    #[test]
    fn test_from_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = ExamId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        let back: Uuid = id.into();
        assert_eq!(back, uuid);
    }

    #[test]
    fn test_debug_and_display() {
        let uuid = Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc);
        let id = StudentId::from(uuid);
        assert_eq!(format!("{:?}", id), "StudentId(12345678-1234-1234-1234-123456789abc)");
        assert_eq!(id.to_string(), "12345678-1234-1234-1234-123456789abc");
    }

    #[test]
    fn test_parse() {
        let id: TeacherId = "12345678-1234-1234-1234-123456789abc".parse().unwrap();
        assert_eq!(id.into_inner(), Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        assert!("not-a-uuid".parse::<TeacherId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&ExamQuizId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        let parsed: ExamQuizId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.into_inner(), uuid);
    }

    #[test]
    fn test_hash_set_dedup() {
        use std::collections::HashSet;
        let id = QuestionId::new();
        let set: HashSet<_> = [id, id, QuestionId::new()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
