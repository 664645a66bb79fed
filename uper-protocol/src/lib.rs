//! UPER command/report message model
//!
//! The host drives the bridge with function calls ([`Command`]); the bridge
//! answers with reports ([`Report`]) that copy the caller's type tag so the
//! host can route them. Every handler returns a [`CommandResult`].
//!
//! ```text
//! host ──Command{function, tag, args}──▶ bridge
//! host ◀──Report{function, tag, values}── bridge
//! ```
//!
//! This crate is the in-memory model only. Byte framing belongs to the
//! transport that carries it.

#![no_std]
#![deny(unsafe_code)]

pub mod function;
pub mod message;
pub mod result;

pub use function::Function;
pub use message::{
    Argument, Command, Report, ReportSink, Value, MAX_ARGS, MAX_BYTES, MAX_REPORT_ARGS,
};
pub use result::{result_code, CommandError, CommandResult, RESULT_OK};
