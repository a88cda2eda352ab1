//! Saving holiday maps to the server

mod client;
mod error;
mod notice;
mod submitter;
mod types;

pub use client::AjaxClient;
pub use error::SubmitError;
pub use notice::{
    ALL_FAILURE_MESSAGE, ALL_SUCCESS_MESSAGE, Notice, NoticeKind, Notifier,
    SINGLE_SUCCESS_MESSAGE, UNKNOWN_REJECTION_MESSAGE,
};
pub use submitter::BatchSubmitter;
pub use types::{
    AggregationPolicy, FORM_TYPE, MassHolidaysRequest, SubmitAllReport, SubmitMode,
    SubmitOutcome, SubmitResponse, UserOutcome,
};
