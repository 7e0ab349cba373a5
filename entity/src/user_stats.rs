use sea_orm::entity::prelude::*;

/// Per-user message activity and spendable point balance.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_stats")]
pub struct Model {
    /// Discord user ID stored as text
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub messages: i64,
    pub points: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
