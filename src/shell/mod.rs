//! Interactive Shell Module
//!
//! Line-oriented front-end over a [`ShardedStore`]. Every reply is a line of
//! JSON (HELP excepted), built here so the store itself never prints.

mod command;

use std::collections::VecDeque;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::cache::ShardedStore;

pub use command::Command;

const HELP_TEXT: &str = "Commands:
  PUT key value    - store key with value
  GET key          - retrieve value for key
  DEL key          - delete key
  LIST             - list all keys (most recent first)
  CLEAR            - remove all keys
  HISTORY          - show recent commands
  HELP             - show this message
  EXIT             - quit";

/// Result of running one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lines to print
    Reply(Vec<String>),
    /// Nothing to print (blank input)
    Silent,
    /// The session should end
    Exit,
}

/// Banner printed when a session starts.
pub fn banner() -> &'static str {
    "Store CLI started. Commands: PUT, GET, DEL, LIST, CLEAR, HELP, HISTORY, EXIT"
}

// == Shell Session ==
/// One interactive session: a store handle plus bounded command history.
pub struct Shell {
    store: Arc<ShardedStore>,
    history: VecDeque<String>,
    history_size: usize,
}

impl Shell {
    pub fn new(store: Arc<ShardedStore>, history_size: usize) -> Self {
        Self {
            store,
            history: VecDeque::with_capacity(history_size),
            history_size,
        }
    }

    /// Trims, records and runs one line of input.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if !line.is_empty() {
            self.remember(line);
        }

        match Command::parse(line) {
            Command::Empty => Outcome::Silent,
            Command::Exit => Outcome::Exit,
            Command::Help => Outcome::Reply(HELP_TEXT.lines().map(str::to_string).collect()),
            Command::List => Outcome::Reply(self.listing()),
            command => Outcome::Reply(vec![self.run(command)]),
        }
    }

    /// Recorded commands, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    fn remember(&mut self, line: &str) {
        if self.history_size == 0 {
            return;
        }
        if self.history.len() == self.history_size {
            self.history.pop_front();
        }
        self.history.push_back(line.to_string());
    }

    fn run(&self, command: Command) -> String {
        let reply = match command {
            Command::Put { key, value } => {
                self.store.put(key, value);
                json!({ "success": true })
            }
            Command::Get { key } => match self.store.get(&key) {
                Some(value) => json!({ "success": true, "value": value }),
                None => not_found(),
            },
            Command::Del { key } => {
                if self.store.del(&key) {
                    json!({ "success": true })
                } else {
                    not_found()
                }
            }
            Command::Clear => {
                self.store.clear();
                json!({ "success": true })
            }
            Command::History => {
                let history: Vec<&String> = self.history.iter().collect();
                json!({ "history": history })
            }
            Command::Usage(message) => json!({ "success": false, "error": message }),
            Command::Unknown(_) => json!({ "error": "Unknown command" }),
            Command::Help | Command::Exit | Command::Empty | Command::List => Value::Null,
        };
        reply.to_string()
    }

    // One JSON object per shard, keys most recently used first.
    fn listing(&self) -> Vec<String> {
        self.store
            .list()
            .into_iter()
            .map(|shard| {
                let entries: Map<String, Value> = shard
                    .entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect();
                let mut object = Map::new();
                object.insert(format!("shard_{}", shard.shard), Value::Object(entries));
                Value::Object(object).to_string()
            })
            .collect()
    }
}

fn not_found() -> Value {
    json!({ "success": false, "error": "Key not found" })
}
