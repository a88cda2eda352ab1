//! Stub endpoint command

use anyhow::Result;

use holiday_grid::UserId;
use holiday_grid::config::Config;
use holiday_grid::endpoint::{StubEndpoint, StubReply};
use holiday_grid::submit::SubmitResponse;

/// Parse `USER:MESSAGE` for `--reject`
pub fn parse_rejection(raw: &str) -> Result<(UserId, String), String> {
    let (user, message) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected USER:MESSAGE, got '{}'", raw))?;
    let user: UserId = user
        .parse()
        .map_err(|_| format!("invalid user id '{}'", user))?;
    Ok((user, message.trim().to_string()))
}

/// Serve the stub until interrupted
pub fn stub_command(port: u16, config: &Config, rejections: Vec<(UserId, String)>) -> Result<()> {
    let stub = StubEndpoint::start(&format!("127.0.0.1:{}", port), &config.endpoint.path)?;

    for (user, message) in rejections {
        println!("Rejecting user {} with \"{}\"", user, message);
        stub.reply_for(user, StubReply::Json(SubmitResponse::failed(message)));
    }

    println!("Stub endpoint listening on {} (Ctrl+C to stop)", stub.url());
    stub.wait();
    Ok(())
}
