//! HTTP request handlers for the dauth server
//!
//! Routes choose their own authentication policy by inspecting the
//! middleware's `RequestAuth`: `/` and `/health` stay public, `/whoami`
//! demands a fully verified, unexpired session.

use crate::middleware::{self, RequestAuth};
use crate::server::simple_response;
use bytes::Bytes;
use chrono::Utc;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::json;
use tracing::{debug, info};

/// Main request handler: verify, then route.
pub async fn handle_request<B>(req: Request<B>) -> Result<Response<Full<Bytes>>, B::Error>
where
    B: Body,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    debug!("Handling {} {}", method, path);

    let (_req, auth) = middleware::verify(req).await?;

    let response = match (&method, path.as_str()) {
        (&Method::GET, "/") => handle_root(),

        (&Method::GET, "/health") => handle_health(),

        (&Method::GET, "/whoami") => handle_whoami(&auth),

        _ => simple_response(
            StatusCode::NOT_FOUND,
            json!({"error": "Not found"}).to_string(),
        ),
    };

    info!("{} {} -> {}", method, path, response.status());
    Ok(response)
}

/// Public root route.
fn handle_root() -> Response<Full<Bytes>> {
    simple_response(
        StatusCode::OK,
        json!({"message": "Hello, world!!!"}).to_string(),
    )
}

/// Health check handler
fn handle_health() -> Response<Full<Bytes>> {
    simple_response(
        StatusCode::OK,
        json!({
            "status": "healthy",
            "version": "0.1.0",
            "service": "dauth"
        })
        .to_string(),
    )
}

/// Authenticated route: reports the verified caller identity.
fn handle_whoami(auth: &RequestAuth) -> Response<Full<Bytes>> {
    let session = match auth.session_verified() {
        Ok(session) => session,
        Err(error) => return unauthorized(error.to_string()),
    };

    let identity = match auth.request_verified() {
        Ok(Some(identity)) => identity,
        Ok(None) => return unauthorized("Authentication required".to_string()),
        Err(error) => return unauthorized(error.to_string()),
    };

    // Expiry is carried and signed but not enforced by the core
    // verification path; this route is the consumer-side check.
    match session.expires_at() {
        Ok(expires) if expires > Utc::now() => {}
        _ => return unauthorized("Session Expired".to_string()),
    }

    simple_response(
        StatusCode::OK,
        json!({
            "domain": session.domain,
            "access_key": session.access_key,
            "session_id": session.session_id,
            "session_expires": session.session_expires,
            "resource": identity.resource,
            "action": identity.action,
        })
        .to_string(),
    )
}

fn unauthorized(reason: String) -> Response<Full<Bytes>> {
    simple_response(
        StatusCode::UNAUTHORIZED,
        json!({"error": reason}).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dauth_client::{Credentials, RequestSigner, Session};
    use http_body_util::BodyExt;

    fn signed_get(path: &str, expires: chrono::DateTime<Utc>) -> Request<Full<Bytes>> {
        let credentials = Credentials::generate();
        let session = Session::establish(&credentials, "example.com", expires).unwrap();
        let signer = RequestSigner::new(session);

        let mut request = Request::builder()
            .method("GET")
            .uri(format!("https://host.example.com{}", path))
            .body(Vec::new())
            .unwrap();
        signer.sign(&mut request).unwrap();

        let (parts, _) = request.into_parts();
        Request::from_parts(parts, Full::new(Bytes::new()))
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let response = handle_request(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_is_public() {
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let response = handle_request(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_whoami_rejects_unsigned_requests() {
        let request = Request::builder()
            .method("GET")
            .uri("/whoami")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let response = handle_request(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_whoami_reports_verified_identity() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let response = handle_request(signed_get("/whoami", expires)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["domain"], "example.com");
        assert_eq!(body["resource"], "get");
        assert_eq!(body["action"], "/whoami");
    }

    #[tokio::test]
    async fn test_whoami_rejects_expired_sessions() {
        let expires = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let response = handle_request(signed_get("/whoami", expires)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Session Expired");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder()
            .method("GET")
            .uri("/nope")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let response = handle_request(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
