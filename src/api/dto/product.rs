//! Product request DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=` query parameter of the Update and Delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdParams {
    /// ProductID of the target product
    #[serde(alias = "Id", alias = "ID")]
    #[param(example = 1)]
    pub id: i32,
}
