//! Commands and reports
//!
//! A [`Command`] borrows its byte arguments from the receive buffer it was
//! decoded from. A [`Report`] owns its values so it can be queued from
//! interrupt context and sent later.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::function::Function;
use crate::result::{CommandError, CommandResult};

/// Maximum number of arguments in one command
pub const MAX_ARGS: usize = 8;

/// Maximum number of values in one report
pub const MAX_REPORT_ARGS: usize = 4;

/// Maximum length of a byte-sequence value
///
/// Bounds every batch operation. A batch longer than this cannot be echoed
/// back in a report.
pub const MAX_BYTES: usize = 48;

/// One command argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Argument<'a> {
    Int(i32),
    Bytes(&'a [u8]),
}

/// A function call from the host
///
/// `function` stays a raw id so that unknown functions survive decoding and
/// can be rejected by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command<'a> {
    pub function: u8,
    /// Host-chosen tag copied into every report this command produces
    pub tag: u8,
    #[cfg_attr(feature = "serde", serde(borrow))]
    pub args: Vec<Argument<'a>, MAX_ARGS>,
}

impl<'a> Command<'a> {
    pub fn new(function: Function, tag: u8) -> Self {
        Self {
            function: function.id(),
            tag,
            args: Vec::new(),
        }
    }

    /// Builder-style argument append
    pub fn arg(mut self, arg: Argument<'a>) -> CommandResult<Self> {
        self.args.push(arg).map_err(|_| CommandError::ArgCount)?;
        Ok(self)
    }

    pub fn function(&self) -> Option<Function> {
        Function::from_id(self.function)
    }

    /// Fail with [`CommandError::ArgCount`] unless exactly `n` arguments
    pub fn expect_count(&self, n: usize) -> CommandResult {
        if self.args.len() == n {
            Ok(())
        } else {
            Err(CommandError::ArgCount)
        }
    }

    /// Integer argument at `index`
    pub fn int(&self, index: usize) -> CommandResult<i32> {
        match self.args.get(index) {
            Some(Argument::Int(v)) => Ok(*v),
            Some(Argument::Bytes(_)) => Err(CommandError::ArgType),
            None => Err(CommandError::ArgCount),
        }
    }
}

/// One report value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Value {
    Int(i32),
    Bytes(Vec<u8, MAX_BYTES>),
}

/// A report to the host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    pub function: Function,
    pub tag: u8,
    pub values: Vec<Value, MAX_REPORT_ARGS>,
}

impl Report {
    pub fn new(function: Function, tag: u8) -> Self {
        Self {
            function,
            tag,
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.function.name()
    }

    pub fn push_int(&mut self, value: i32) -> CommandResult {
        self.values
            .push(Value::Int(value))
            .map_err(|_| CommandError::AllocFailed)
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> CommandResult {
        let owned = Vec::from_slice(bytes).map_err(|_| CommandError::AllocFailed)?;
        self.values
            .push(Value::Bytes(owned))
            .map_err(|_| CommandError::AllocFailed)
    }
}

/// Destination for reports
///
/// The firmware's sink queues reports for the host link; tests record them.
pub trait ReportSink {
    fn send(&mut self, report: Report);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn send(&mut self, report: Report) {
        (**self).send(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_cmd<'a>(pins: &'a [u8]) -> Command<'a> {
        Command::new(Function::DigitalRead, 7)
            .arg(Argument::Bytes(pins))
            .unwrap()
    }

    #[test]
    fn test_accessors_check_kind_before_value() {
        let pins = [1u8, 2, 3];
        let cmd = read_cmd(&pins);
        assert_eq!(cmd.args[0], Argument::Bytes(&pins[..]));
        assert_eq!(cmd.int(0), Err(CommandError::ArgType));
        assert_eq!(cmd.int(1), Err(CommandError::ArgCount));
    }

    #[test]
    fn test_expect_count() {
        let cmd = Command::new(Function::PinMode, 0)
            .arg(Argument::Int(3))
            .unwrap();
        assert_eq!(cmd.expect_count(1), Ok(()));
        assert_eq!(cmd.expect_count(2), Err(CommandError::ArgCount));
    }

    #[test]
    fn test_unknown_function_survives() {
        let cmd = Command {
            function: 42,
            tag: 0,
            args: Vec::new(),
        };
        assert_eq!(cmd.function(), None);
    }

    #[test]
    fn test_too_many_args() {
        let mut cmd = Command::new(Function::PulseIn, 0);
        for i in 0..MAX_ARGS as i32 {
            cmd = cmd.arg(Argument::Int(i)).unwrap();
        }
        assert_eq!(cmd.arg(Argument::Int(0)), Err(CommandError::ArgCount));
    }

    #[test]
    fn test_report_values() {
        let mut report = Report::new(Function::DigitalRead, 3);
        report.push_bytes(&[0, 1, 1]).unwrap();
        assert_eq!(report.name(), "digitalRead");
        assert_eq!(
            report.values[0],
            Value::Bytes(Vec::from_slice(&[0, 1, 1]).unwrap())
        );
    }

    #[test]
    fn test_report_bytes_too_long() {
        let mut report = Report::new(Function::DigitalRead, 0);
        let long = [0u8; MAX_BYTES + 1];
        assert_eq!(report.push_bytes(&long), Err(CommandError::AllocFailed));
        assert!(report.values.is_empty());
    }

    #[test]
    fn test_report_values_full() {
        let mut report = Report::new(Function::Interrupt, 0);
        for i in 0..MAX_REPORT_ARGS as i32 {
            report.push_int(i).unwrap();
        }
        assert_eq!(report.push_int(9), Err(CommandError::AllocFailed));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_command_decodes_borrowed() {
        let pins = [4u8, 5];
        let cmd = read_cmd(&pins);
        let mut buf = [0u8; 32];
        let encoded = postcard::to_slice(&cmd, &mut buf).unwrap();
        let decoded: Command = postcard::from_bytes(encoded).unwrap();
        assert_eq!(decoded, cmd);
    }
}
