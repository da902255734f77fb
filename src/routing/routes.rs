//! The application's route table.

use std::sync::Arc;

use crate::routing::router::{RouteEntry, RouteError, RouteTable};
use crate::routing::view::{LazyView, LoadError, ViewHandle};
use crate::routing::views::{
    PatientResourceView, PACIJENTI, POVIJEST_BOLESTI, PREGLEDI, RECEPTI,
};

fn lazy_patient_view(name: &'static str) -> LazyView {
    LazyView::new(move || async move {
        tracing::debug!(view = name, "Loading view");
        Ok::<ViewHandle, LoadError>(Arc::new(PatientResourceView::sub_resource(name)))
    })
}

/// Routes of the patient-records application.
///
/// The landing page is available immediately; the per-patient pages are
/// loaded on first navigation.
pub fn app_routes() -> Result<RouteTable, RouteError> {
    RouteTable::new(vec![
        RouteEntry::eager("/", PACIJENTI, Arc::new(PatientResourceView::list()))?,
        RouteEntry::lazy(
            "/pacijenti/:id/povijest-bolesti",
            POVIJEST_BOLESTI,
            lazy_patient_view(POVIJEST_BOLESTI),
        )?,
        RouteEntry::lazy(
            "/pacijenti/:id/pregledi",
            PREGLEDI,
            lazy_patient_view(PREGLEDI),
        )?,
        RouteEntry::lazy(
            "/pacijenti/:id/recepti",
            RECEPTI,
            lazy_patient_view(RECEPTI),
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::Params;

    #[test]
    fn test_app_table() {
        let table = app_routes().unwrap();
        let rows: Vec<(&str, &str, bool)> = table
            .iter()
            .map(|e| (e.path(), e.name(), e.view().is_lazy()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("/", "pacijenti", false),
                ("/pacijenti/:id/povijest-bolesti", "povijest-bolesti", true),
                ("/pacijenti/:id/pregledi", "pregledi", true),
                ("/pacijenti/:id/recepti", "recepti", true),
            ]
        );
    }

    #[test]
    fn test_resolve_pregledi() {
        let table = app_routes().unwrap();
        let m = table.resolve("/pacijenti/42/pregledi").unwrap();
        assert_eq!(m.entry.name(), "pregledi");
        assert_eq!(m.params.get("id"), Some("42"));
    }

    #[test]
    fn test_href_for_each_patient_page() {
        let table = app_routes().unwrap();
        let params: Params = [("id", "9")].into_iter().collect();
        for name in [POVIJEST_BOLESTI, PREGLEDI, RECEPTI] {
            assert_eq!(
                table.href(name, &params).unwrap(),
                format!("/pacijenti/9/{name}")
            );
        }
    }

    #[tokio::test]
    async fn test_lazy_view_loads_matching_view() {
        let table = app_routes().unwrap();
        let entry = table.by_name(RECEPTI).unwrap();
        let view = entry.view().load().await.unwrap();
        assert_eq!(view.name(), "recepti");
    }
}
