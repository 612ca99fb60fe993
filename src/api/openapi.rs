//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use super::handlers::{attendees, certificates, events, stats, system};

/// OpenAPI description of the REST surface, served by Swagger UI.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "attendance-gateway",
        description = "Event registration, check-in, and certificate issuance."
    ),
    paths(
        system::health_handler,
        system::me_handler,
        events::create_event,
        events::list_events,
        events::get_event,
        events::update_event,
        attendees::register_attendee,
        attendees::list_attendees,
        attendees::check_in,
        certificates::generate_certificate,
        certificates::get_certificate,
        certificates::download_certificate_svg,
        certificates::preview_certificate,
        certificates::list_event_certificates,
        stats::event_stats,
        stats::overview_stats,
    ),
    tags(
        (name = "System"),
        (name = "Events"),
        (name = "Attendees"),
        (name = "Certificates"),
        (name = "Statistics"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_issuance_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/certificates/generate"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
