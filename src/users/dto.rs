use serde::{Deserialize, Serialize};

use crate::meals::metrics::MealMetrics;

/// Request body for `POST /users`, echoed back on success.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: MealMetrics,
}
