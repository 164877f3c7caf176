use serde::{Deserialize, Serialize};

use super::repo_types::{Meal, MealChanges};

/// Request body for `POST /meals`. All fields required.
#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "isOnDiet")]
    pub is_on_diet: bool,
}

/// Request body for `PUT /meals/:id`. Omitted fields stay as they are.
#[derive(Debug, Default, Deserialize)]
pub struct EditMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "isOnDiet")]
    pub is_on_diet: Option<bool>,
}

impl From<EditMealRequest> for MealChanges {
    fn from(r: EditMealRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            is_on_diet: r.is_on_diet,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    #[serde(rename = "selectedMeal")]
    pub selected_meal: Meal,
}
