/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジック / extractor 実装は core.rs
 */
use super::core::PublicId;

pub enum UserTag {}
pub type PublicUserId = PublicId<UserTag>;

pub enum CategoryTag {}
pub type PublicCategoryId = PublicId<CategoryTag>;

pub enum SubsectorTag {}
pub type PublicSubsectorId = PublicId<SubsectorTag>;

pub enum ProductTag {}
pub type PublicProductId = PublicId<ProductTag>;

pub enum ArticleTag {}
pub type PublicArticleId = PublicId<ArticleTag>;
