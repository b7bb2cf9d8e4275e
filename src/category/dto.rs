//! The JSON representation of categories.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    validation::required,
};

/// A category as sent and received by the JSON API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Must be null in requests.
    #[serde(default)]
    pub id: Option<CategoryId>,
    /// The category name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: Some(category.id),
            name: Some(category.name.to_string()),
        }
    }
}

impl TryFrom<CategoryDto> for CategoryName {
    type Error = Error;

    fn try_from(dto: CategoryDto) -> Result<Self, Self::Error> {
        if dto.id.is_some() {
            return Err(Error::UnexpectedId);
        }

        CategoryName::new(&required(dto.name, "name")?)
    }
}
