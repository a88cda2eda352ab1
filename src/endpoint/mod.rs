//! Local stand-in for the holiday save endpoint
//!
//! Serves the ajax dispatcher contract on localhost: `POST <path>` with a
//! form-encoded `mass_holidays` body, answered with `{success, error?}`.
//! Every accepted post is recorded, and replies can be scripted per user,
//! which is what the integration tests and `holiday-grid stub-endpoint` use.

mod form;

pub use form::parse_form;

use std::collections::HashMap;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use tiny_http::{Response, Server};
use tracing::{debug, error, info, warn};

use crate::domain::{HolidayMap, UserId};
use crate::submit::{FORM_TYPE, SubmitResponse};

const MAX_BODY_BYTES: usize = 256 * 1024;

/// A post the stub accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedSubmission {
    pub year: i32,
    pub month: u32,
    pub user_id: UserId,
    pub holiday_data: HolidayMap,
}

/// Scripted reply for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubReply {
    Json(SubmitResponse),
    /// Answer with a bare HTTP status and no JSON body
    Status(u16),
    /// Wait before answering with the JSON body
    Delayed(Duration, SubmitResponse),
}

#[derive(Debug, Default)]
struct StubState {
    received: Vec<ReceivedSubmission>,
    replies: HashMap<UserId, StubReply>,
}

/// Running stub endpoint; stops when dropped
pub struct StubEndpoint {
    server: Arc<Server>,
    addr: SocketAddr,
    path: String,
    state: Arc<Mutex<StubState>>,
    worker: Option<JoinHandle<()>>,
}

impl StubEndpoint {
    /// Bind to `addr` (use port 0 for an ephemeral port) and serve `path`
    pub fn start(addr: &str, path: &str) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to bind stub endpoint on {}", addr))?;
        let addr = server
            .server_addr()
            .to_ip()
            .context("Stub endpoint is not bound to an IP address")?;

        let server = Arc::new(server);
        let state = Arc::new(Mutex::new(StubState::default()));
        let path = normalize_path(path);

        let worker = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            let path = path.clone();
            thread::spawn(move || serve(&server, &path, &state))
        };

        info!("[holiday-grid:stub] Listening on http://{}{}", addr, path);
        Ok(Self {
            server,
            addr,
            path,
            state,
            worker: Some(worker),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL without the endpoint path
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Full URL of the endpoint
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url(), self.path)
    }

    /// Script the reply for one user; others get `{success: true}`
    pub fn reply_for(&self, user_id: UserId, reply: StubReply) {
        lock(&self.state).replies.insert(user_id, reply);
    }

    /// Everything accepted so far, in arrival order
    pub fn received(&self) -> Vec<ReceivedSubmission> {
        lock(&self.state).received.clone()
    }

    /// Serve until the process is interrupted
    pub fn wait(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for StubEndpoint {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn lock(state: &Mutex<StubState>) -> std::sync::MutexGuard<'_, StubState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn serve(server: &Server, path: &str, state: &Mutex<StubState>) {
    for mut request in server.incoming_requests() {
        let url = request.url().to_string();
        let request_path = url.split('?').next().unwrap_or(url.as_str());
        let method = request.method().to_string();

        if method != "POST" || request_path != path || !is_ajax(&request) {
            debug!("[holiday-grid:stub] 404 for {} {}", method, url);
            let _ = request.respond(Response::from_string("Not Found").with_status_code(404));
            continue;
        }

        let mut body = String::new();
        let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
        if let Err(e) = reader.read_to_string(&mut body) {
            error!("[holiday-grid:stub] Failed to read body: {}", e);
            let _ = request.respond(Response::from_string("Bad Request").with_status_code(400));
            continue;
        }
        if body.len() > MAX_BODY_BYTES {
            let _ = request.respond(Response::from_string("Payload Too Large").with_status_code(413));
            continue;
        }

        let reply = handle_form(&body, state);
        // Replies go out on their own thread so a delayed one never holds up the rest
        thread::spawn(move || respond(request, reply));
    }
    debug!("[holiday-grid:stub] Worker stopped");
}

/// Route one form post the way the ajax dispatcher does
fn handle_form(body: &str, state: &Mutex<StubState>) -> StubReply {
    let form = parse_form(body);

    match form.get("form_type").map(String::as_str) {
        None | Some("") => return StubReply::Json(SubmitResponse::failed("Missing Form")),
        Some(FORM_TYPE) => {}
        Some(other) => {
            warn!("[holiday-grid:stub] Unknown form_type {}", other);
            return StubReply::Json(SubmitResponse::failed("Form not found"));
        }
    }

    let submission = match parse_submission(&form) {
        Ok(submission) => submission,
        Err(message) => return StubReply::Json(SubmitResponse::failed(message)),
    };

    info!(
        "[holiday-grid:stub] user {} {}-{:02}: {} day(s)",
        submission.user_id,
        submission.year,
        submission.month,
        submission.holiday_data.len()
    );

    let mut state = lock(state);
    let reply = state
        .replies
        .get(&submission.user_id)
        .cloned()
        .unwrap_or_else(|| StubReply::Json(SubmitResponse::ok()));
    state.received.push(submission);
    reply
}

fn parse_submission(form: &HashMap<String, String>) -> Result<ReceivedSubmission, String> {
    let field = |name: &str| {
        form.get(name)
            .map(String::as_str)
            .ok_or_else(|| format!("Missing field: {}", name))
    };

    let year: i32 = field("year")?
        .parse()
        .map_err(|_| "Invalid year".to_string())?;
    let month: u32 = field("month")?
        .parse()
        .map_err(|_| "Invalid month".to_string())?;
    let user_id: UserId = field("user_id")?
        .parse()
        .map_err(|_| "Invalid user_id".to_string())?;
    let holiday_data: HolidayMap = serde_json::from_str(field("holiday_data")?)
        .map_err(|e| format!("Invalid holiday_data: {}", e))?;

    Ok(ReceivedSubmission {
        year,
        month,
        user_id,
        holiday_data,
    })
}

fn is_ajax(request: &tiny_http::Request) -> bool {
    request
        .headers()
        .iter()
        .any(|h| h.field.equiv("X-Requested-With") && h.value.as_str() == "XMLHttpRequest")
}

fn json_content_type() -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static header is valid")
}

fn respond(request: tiny_http::Request, reply: StubReply) {
    let (status, body) = match reply {
        StubReply::Json(body) => (200, Some(body)),
        StubReply::Status(status) => (status, None),
        StubReply::Delayed(delay, body) => {
            thread::sleep(delay);
            (200, Some(body))
        }
    };

    let result = match body {
        Some(body) => {
            let json = serde_json::to_string(&body)
                .unwrap_or_else(|_| "{\"success\":false}".to_string());
            request.respond(
                Response::from_string(json)
                    .with_status_code(status)
                    .with_header(json_content_type()),
            )
        }
        None => request.respond(Response::from_string("").with_status_code(status)),
    };
    if let Err(e) = result {
        warn!("[holiday-grid:stub] Failed to send reply: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DayType;

    #[test]
    fn test_missing_and_unknown_form_type() {
        let state = Mutex::new(StubState::default());
        assert_eq!(
            handle_form("year=2024", &state),
            StubReply::Json(SubmitResponse::failed("Missing Form"))
        );
        assert_eq!(
            handle_form("form_type=useredit", &state),
            StubReply::Json(SubmitResponse::failed("Form not found"))
        );
        assert!(lock(&state).received.is_empty());
    }

    #[test]
    fn test_valid_form_is_recorded() {
        let state = Mutex::new(StubState::default());
        let body = "form_type=mass_holidays&year=2024&month=3\
                    &holiday_data=%7B%2215%22%3A%22HOLIS%22%7D&user_id=7";
        assert_eq!(
            handle_form(body, &state),
            StubReply::Json(SubmitResponse::ok())
        );

        let received = &lock(&state).received;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].user_id, UserId(7));
        assert_eq!(received[0].holiday_data.get(15), Some(DayType::Holiday));
    }

    #[test]
    fn test_bad_holiday_data_is_rejected() {
        let state = Mutex::new(StubState::default());
        let reply = handle_form(
            "form_type=mass_holidays&year=2024&month=3&holiday_data=%7B%2215%22%3A%22XX%22%7D&user_id=7",
            &state,
        );
        match reply {
            StubReply::Json(SubmitResponse { success: false, error: Some(msg) }) => {
                assert!(msg.starts_with("Invalid holiday_data"), "{msg}");
            }
            other => panic!("unexpected reply {other:?}"),
        }
    }
}
