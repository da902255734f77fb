//! Built-in patient-record views.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::Value;

use crate::http::{ApiClient, ApiError, ApiResult};
use crate::routing::matcher::Params;
use crate::routing::view::View;

/// Collection of patients, the landing page.
pub const PACIJENTI: &str = "pacijenti";
/// Medical history of one patient.
pub const POVIJEST_BOLESTI: &str = "povijest-bolesti";
/// Examinations of one patient.
pub const PREGLEDI: &str = "pregledi";
/// Prescriptions of one patient.
pub const RECEPTI: &str = "recepti";

/// A view backed by a single `GET` on the patients resource.
///
/// Without a sub-resource it lists `pacijenti`; with one it reads
/// `pacijenti/{id}/{resource}` using the route's `id` parameter.
#[derive(Debug, Clone)]
pub struct PatientResourceView {
    name: &'static str,
    resource: Option<&'static str>,
}

impl PatientResourceView {
    pub fn list() -> Self {
        Self {
            name: PACIJENTI,
            resource: None,
        }
    }

    pub fn sub_resource(name: &'static str) -> Self {
        Self {
            name,
            resource: Some(name),
        }
    }

    /// API path (relative, before normalization) for the given parameters.
    pub fn api_path(&self, params: &Params) -> ApiResult<String> {
        let Some(resource) = self.resource else {
            return Ok(PACIJENTI.to_string());
        };
        let id = params.get("id").ok_or_else(|| {
            ApiError::InvalidInput(format!("view '{}' needs route parameter 'id'", self.name))
        })?;
        Ok(format!("{PACIJENTI}/{}/{resource}", urlencoding::encode(id)))
    }
}

impl View for PatientResourceView {
    fn name(&self) -> &str {
        self.name
    }

    fn fetch<'a>(
        &'a self,
        client: &'a ApiClient,
        params: &'a Params,
    ) -> BoxFuture<'a, ApiResult<Value>> {
        async move {
            let path = self.api_path(params)?;
            client.get_json(&path).await
        }
        .boxed()
    }
}
