//! Request handlers for the calculator page and the consumption API.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};

use super::AppState;
use super::forms::{CalculatorForm, CalculatorInput};
use super::render::Page;
use super::types::{ConsumptionQuery, ConsumptionResponse, ErrorResponse};
use crate::calc::{ConsumptionResult, calculate_consumption};
use crate::export::csv_string;

/// Renders the empty calculator form.
///
/// `GET /` → 200 + HTML
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = Page {
        billing: &state.config.billing,
        input: CalculatorInput::from_form(&CalculatorForm::default()),
        error: None,
        result: None,
    };
    Html(page.to_string())
}

/// Validates the submitted form and re-renders the page with either the
/// computed result or the single validation error. No computation happens
/// on invalid input.
///
/// `POST /` → 200 + HTML
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CalculatorForm>,
) -> Html<String> {
    let input = CalculatorInput::from_form(&form);
    let billing = &state.config.billing;

    match input.validate() {
        Ok(()) => {
            let result = calculate_consumption(
                input.voltage,
                input.current,
                input.rate_subunits,
                billing.hours,
            );
            Html(
                Page {
                    billing,
                    input,
                    error: None,
                    result: Some(&result),
                }
                .to_string(),
            )
        }
        Err(e) => {
            tracing::debug!(?input, "rejected calculator submission");
            let message = e.to_string();
            Html(
                Page {
                    billing,
                    input,
                    error: Some(&message),
                    result: None,
                }
                .to_string(),
            )
        }
    }
}

/// Returns the computed consumption as JSON.
///
/// `GET /api/consumption?voltage=V&current=A&rate=R` → 200 + `ConsumptionResponse`
/// Non-positive or missing inputs → 400 + `ErrorResponse`
pub async fn get_consumption(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConsumptionQuery>,
) -> Result<Json<ConsumptionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let result = compute_from_query(&state, &query)?;
    Ok(Json(ConsumptionResponse::from(&result)))
}

/// Returns the cumulative hour table as a CSV download.
///
/// `GET /api/consumption.csv?voltage=V&current=A&rate=R` → 200 + `text/csv`
/// Non-positive or missing inputs → 400 + `ErrorResponse`
pub async fn get_consumption_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConsumptionQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let result = compute_from_query(&state, &query)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"consumption.csv\"",
            ),
        ],
        csv_string(&result),
    ))
}

/// Liveness probe.
///
/// `GET /healthz` → 200 + `ok`
pub async fn healthz() -> &'static str {
    "ok"
}

/// Parses and validates query inputs, then runs the calculator.
fn compute_from_query(
    state: &AppState,
    query: &ConsumptionQuery,
) -> Result<ConsumptionResult, (StatusCode, Json<ErrorResponse>)> {
    let input = CalculatorInput::from_form(&CalculatorForm {
        voltage: query.voltage.clone(),
        current: query.current.clone(),
        rate: query.rate.clone(),
    });
    input.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    Ok(calculate_consumption(
        input.voltage,
        input.current,
        input.rate_subunits,
        state.config.billing.hours,
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::web::router;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            config: AppConfig::default(),
        })
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_serves_form() {
        let app = router(make_test_state());

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("<form method=\"post\""));
        assert!(body.contains("name=\"voltage\""));
        assert!(!body.contains("alert-danger"));
    }

    #[tokio::test]
    async fn post_valid_form_renders_table() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("voltage=240&current=5&rate=50"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("Hour-by-hour table"));
        assert!(body.contains("28.80000"));
        assert!(body.contains("14.4000"));
        assert!(!body.contains("alert-danger"));
    }

    #[tokio::test]
    async fn post_comma_decimals_accepted() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("voltage=230&current=10&rate=21%2C8"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("2,300.00000 W"));
        assert!(body.contains("12.0336"));
    }

    #[tokio::test]
    async fn post_nonpositive_input_shows_error_and_no_table() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("voltage=0&current=10&rate=21.8"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("alert-danger"));
        assert!(body.contains("Please enter positive numbers"));
        assert!(!body.contains("<tbody>"));
    }

    #[tokio::test]
    async fn post_empty_form_shows_error() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(""))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains("alert-danger"));
    }

    #[tokio::test]
    async fn api_returns_consumption_json() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/api/consumption?voltage=240&current=5&rate=50")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(json["hours"], 24);
        assert!((json["power_kw"].as_f64().unwrap() - 1.2).abs() < 1e-9);
        assert!((json["rate_per_kwh"].as_f64().unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(json["rows"].as_array().map(Vec::len), Some(24));
        assert_eq!(json["rows"][0]["hour"], 1);
    }

    #[tokio::test]
    async fn api_invalid_input_returns_400() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/api/consumption?voltage=0&current=5&rate=50")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn api_missing_fields_return_400() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/api/consumption")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn csv_endpoint_returns_table() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/api/consumption.csv?voltage=240&current=5&rate=50")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = body_string(resp).await;

        assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some("hour,energy_kwh,cost"));
        assert_eq!(lines.count(), 24);
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "ok");
    }
}
