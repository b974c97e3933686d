use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Case study row in the database backend.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case_study")]
pub struct Model {
    /// UUIDv7 primary key, assigned on insert.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub industry: String,

    /// `/uploads/<filename>` of the attached image.
    pub image_url: Option<String>,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
