//! Dashboard: the classes visible to the logged-in user.

use tracing::debug;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::class::DashboardResponseDto;
use crate::models::ClassItem;

#[derive(Debug, Clone)]
pub struct DashboardRepository {
    api: ApiClient,
}

impl DashboardRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Classes taught by (teacher) or enrolling (student) the token's owner.
    ///
    /// A response without `data` is an empty dashboard.
    pub async fn get_dashboard_classes(&self, token: &str) -> ApiResult<Vec<ClassItem>> {
        let dto: DashboardResponseDto = self.api.get_json("/class/Dashboard", token).await?;
        let classes: Vec<ClassItem> = dto
            .data
            .unwrap_or_default()
            .into_iter()
            .map(ClassItem::from)
            .collect();
        debug!(count = classes.len(), "Loaded dashboard");
        Ok(classes)
    }
}
