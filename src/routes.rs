use crate::{
    api::{attendance, leave_request},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let validate_limiter = build_limiter(config.rate_validate_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(validate_limiter)
            .service(
                web::scope("/attendance")
                    // /attendance/check-in/validate
                    .service(
                        web::resource("/check-in/validate")
                            .route(web::post().to(attendance::validate_check_in)),
                    )
                    // /attendance/check-out/validate
                    .service(
                        web::resource("/check-out/validate")
                            .route(web::post().to(attendance::validate_check_out)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave/validate
                    .service(
                        web::resource("/validate")
                            .route(web::post().to(leave_request::validate_leave)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web::Data};

    use super::configure;
    use crate::config::Config;
    use crate::model::geofence::GeofenceConfig;
    use crate::model::location::Location;
    use crate::rules::leave::LeaveRuleConfig;

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: "/api/v1".to_string(),
            rate_validate_per_min: 600,
            enable_geofence: true,
            enable_geofence_day_out: false,
            geofence: GeofenceConfig {
                reference: Some(Location {
                    latitude: 0.0,
                    longitude: 0.0,
                }),
                allowed_radius_meters: 150.0,
            },
            leave_rules: LeaveRuleConfig::default(),
        }
    }

    async fn post(
        config: Config,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(config.clone()))
                .configure(|cfg| configure(cfg, config.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(uri)
            .peer_addr("127.0.0.1:9000".parse().unwrap())
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn check_in_inside_the_fence_reports_the_distance() {
        let (status, body) = post(
            test_config(),
            "/api/v1/attendance/check-in/validate",
            serde_json::json!({"employee_id": 1000, "latitude": 0.0, "longitude": 0.0005}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], true);
        assert_eq!(body["checked"], true);
        let distance = body["distance_meters"].as_f64().unwrap();
        assert!((54.0..57.0).contains(&distance), "distance was {distance}");
    }

    #[actix_web::test]
    async fn check_in_outside_the_fence_is_rejected() {
        let (status, body) = post(
            test_config(),
            "/api/v1/attendance/check-in/validate",
            serde_json::json!({"employee_id": 1000, "latitude": 0.0, "longitude": 0.01}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["allowed"], false);
        assert_eq!(body["category"], "too_far");
        assert_eq!(body["kind"], "business_rule");
        assert_eq!(body["allowed_radius_meters"], 150.0);
        assert!(body["distance_meters"].as_f64().unwrap() > 1_000.0);
    }

    #[actix_web::test]
    async fn check_in_without_a_gps_fix_is_rejected() {
        let (status, body) = post(
            test_config(),
            "/api/v1/attendance/check-in/validate",
            serde_json::json!({"employee_id": 1000}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["category"], "missing_location");
        assert_eq!(body["kind"], "missing_input");
    }

    #[actix_web::test]
    async fn disabled_check_out_passes_through_unchecked() {
        let (status, body) = post(
            test_config(),
            "/api/v1/attendance/check-out/validate",
            serde_json::json!({"employee_id": 1000}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], true);
        assert_eq!(body["checked"], false);
    }

    #[actix_web::test]
    async fn enabled_geofence_without_a_reference_fails_closed() {
        let mut config = test_config();
        config.geofence.reference = None;

        let (status, body) = post(
            config,
            "/api/v1/attendance/check-in/validate",
            serde_json::json!({"employee_id": 1000, "latitude": 0.0, "longitude": 0.0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["category"], "reference_not_set");
        assert_eq!(body["kind"], "configuration");
    }

    fn leave_json(id: u64, leave_type: &str, from: &str, to: &str, days: f64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "employee_id": 1000,
            "leave_type": leave_type,
            "date_from": from,
            "date_to": to,
            "number_of_days": days,
            "status": "approved"
        })
    }

    #[actix_web::test]
    async fn leave_within_the_monthly_quota_is_allowed() {
        let (status, body) = post(
            test_config(),
            "/api/v1/leave/validate",
            serde_json::json!({
                "candidate": leave_json(1, "Earned Leaves", "2026-03-16", "2026-03-17", 2.0),
                "history": [leave_json(10, "Earned Leaves", "2026-03-02", "2026-03-04", 3.0)]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], true);
    }

    #[actix_web::test]
    async fn leave_over_the_monthly_quota_is_rejected() {
        let (status, body) = post(
            test_config(),
            "/api/v1/leave/validate",
            serde_json::json!({
                "candidate": leave_json(1, "Earned Leaves", "2026-03-16", "2026-03-18", 3.0),
                "history": [leave_json(10, "Earned Leaves", "2026-03-02", "2026-03-04", 3.0)]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["category"], "quota_exceeded");
        assert_eq!(body["kind"], "business_rule");
    }

    #[actix_web::test]
    async fn leave_too_close_to_sick_leave_is_rejected() {
        let (status, body) = post(
            test_config(),
            "/api/v1/leave/validate",
            serde_json::json!({
                "candidate": leave_json(1, "Unpaid", "2026-03-09", "2026-03-10", 2.0),
                "history": [leave_json(10, "Sick Leave", "2026-03-04", "2026-03-06", 3.0)]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["category"], "insufficient_gap");
    }
}
