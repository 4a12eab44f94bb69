// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::SystemTime;

/// A single log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// The severity of the entry.
    pub level: log::Level,
    /// The subsystem the entry originates from.
    pub context: String,
    /// The message itself.
    pub message: String,
    /// When the entry was created.
    pub timestamp: SystemTime,
    /// The name of the thread that created the entry, if it has one.
    pub thread: Option<String>,
}

impl LogEntry {
    /// Creates an entry stamped with the current time and thread.
    pub fn new(level: log::Level, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            context: context.into(),
            message: message.into(),
            timestamp: SystemTime::now(),
            thread: std::thread::current().name().map(str::to_owned),
        }
    }
}
