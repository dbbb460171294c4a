#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use seedrun::{LogLevel, SeedRunner};

pub use seedrun_test_utils::builders::{ExecutionLog, TestSeed};
pub use seedrun_test_utils::init_tracing;

/// Messages delivered to a runner's log callback.
#[derive(Debug, Clone, Default)]
pub struct CapturedLog {
    lines: Rc<RefCell<Vec<(String, LogLevel)>>>,
}

impl CapturedLog {
    pub fn lines(&self) -> Vec<(String, LogLevel)> {
        self.lines.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(_, l)| *l == level)
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(m, _)| m.contains(needle))
    }
}

/// A runner whose lifecycle messages go to a [`CapturedLog`].
pub fn capturing_runner() -> (SeedRunner, CapturedLog) {
    init_tracing();
    let captured = CapturedLog::default();
    let sink = captured.lines.clone();
    let runner = SeedRunner::new(
        true,
        Some(Box::new(move |message: &str, level: LogLevel| {
            sink.borrow_mut().push((message.to_string(), level));
        })),
    );
    (runner, captured)
}

/// `Users`, `Accounts -> Users`, `Transactions -> Accounts, Users`,
/// registered in reverse dependency order.
pub fn banking_seeds(log: &ExecutionLog) -> Vec<Box<dyn seedrun::Seed>> {
    vec![
        TestSeed::new("Transactions", log)
            .after("Accounts")
            .after("Users")
            .boxed(),
        TestSeed::new("Accounts", log).after("Users").boxed(),
        TestSeed::new("Users", log).description("Base users").boxed(),
    ]
}
