// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted CommandRunner fake and tracing setup for integration tests.

use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use rollguard::exec::{Command, CommandOutput, CommandRunner, ExecError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("rollguard=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Debug, Clone)]
struct Reply {
    output: CommandOutput,
    delay: Duration,
}

impl Reply {
    fn ok(stdout: &str) -> Self {
        Reply {
            output: CommandOutput {
                exit_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
            delay: Duration::ZERO,
        }
    }
}

struct Rule {
    pattern: String,
    /// Replayed in order; the last one repeats.
    replies: Vec<Reply>,
    hits: usize,
}

/// Fake control plane: replies are chosen by the first rule whose pattern
/// occurs in the rendered command line. Unmatched commands succeed silently.
pub struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A cluster whose rollouts complete and report the given replica counts.
    pub fn with_replicas(ready: u32, desired: u32) -> Self {
        Self::new()
            .reply("readyReplicas", &ready.to_string())
            .reply("spec.replicas", &desired.to_string())
    }

    fn rule(self, pattern: &str, replies: Vec<Reply>) -> Self {
        self.rules.lock().unwrap().push(Rule {
            pattern: pattern.to_string(),
            replies,
            hits: 0,
        });
        self
    }

    /// Succeed with `stdout`.
    pub fn reply(self, pattern: &str, stdout: &str) -> Self {
        self.rule(pattern, vec![Reply::ok(stdout)])
    }

    /// Succeed with each of `stdouts` in turn, repeating the last.
    pub fn replies(self, pattern: &str, stdouts: &[&str]) -> Self {
        self.rule(pattern, stdouts.iter().map(|s| Reply::ok(s)).collect())
    }

    /// Exit with `exit_code` and `stderr`.
    pub fn fail(self, pattern: &str, exit_code: i32, stderr: &str) -> Self {
        let reply = Reply {
            output: CommandOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
            delay: Duration::ZERO,
        };
        self.rule(pattern, vec![reply])
    }

    /// Succeed only after `delay` has passed on the tokio clock.
    pub fn slow(self, pattern: &str, delay: Duration) -> Self {
        let reply = Reply {
            delay,
            ..Reply::ok("")
        };
        self.rule(pattern, vec![reply])
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(pattern)).count()
    }

    pub fn ran(&self, pattern: &str) -> bool {
        self.count(pattern) > 0
    }

    /// Position of the first call containing `pattern`.
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.contains(pattern))
    }

    fn next_reply(&self, line: &str) -> Reply {
        let mut rules = self.rules.lock().unwrap();
        match rules.iter_mut().find(|r| line.contains(&r.pattern)) {
            Some(rule) => {
                let index = rule.hits.min(rule.replies.len() - 1);
                rule.hits += 1;
                rule.replies[index].clone()
            }
            None => Reply::ok(""),
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &Command) -> Result<CommandOutput, ExecError> {
        let line = command.to_string();
        self.calls.lock().unwrap().push(line.clone());
        let reply = self.next_reply(&line);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        Ok(reply.output)
    }
}
