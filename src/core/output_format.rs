//! Metadata prefix formatting
//!
//! Turns a level, the active [`MetadataFlags`] and a message into the final
//! payload text handed to the queue:
//! - Text: `[level=info date=2025-01-08 time=10:30:45] Request processed`
//! - Json: `{"level":"info","date":"2025-01-08","message":"Request processed"}`
//!
//! Every payload ends with a single `\n`.

use super::flags::MetadataFlags;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::cell::RefCell;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

// Thread-local cache so the tid field doesn't re-format the id on every call
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Numeric part of the current thread's id, cached per thread.
fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let raw = format!("{:?}", std::thread::current().id());
                raw.trim_start_matches("ThreadId(")
                    .trim_end_matches(')')
                    .to_string()
            })
            .clone()
    })
}

/// Format `message` with the metadata selected by `flags`, using the current
/// local time for date/time fields.
pub fn format_message(level: LogLevel, flags: MetadataFlags, message: &str) -> String {
    format_message_at(level, flags, message, &Local::now())
}

/// Same as [`format_message`] with an explicit timestamp.
pub fn format_message_at(
    level: LogLevel,
    flags: MetadataFlags,
    message: &str,
    now: &DateTime<Local>,
) -> String {
    if flags.contains(MetadataFlags::JSON) {
        format_json(level, flags, message, now)
    } else {
        format_text(level, flags, message, now)
    }
}

fn format_text(
    level: LogLevel,
    flags: MetadataFlags,
    message: &str,
    now: &DateTime<Local>,
) -> String {
    if flags.fields().is_empty() {
        return format!("{}\n", message);
    }

    let mut fields = Vec::with_capacity(5);
    if flags.contains(MetadataFlags::LEVEL) {
        fields.push(format!("level={}", level));
    }
    if flags.contains(MetadataFlags::DATE) {
        fields.push(format!("date={}", now.format(DATE_FORMAT)));
    }
    if flags.contains(MetadataFlags::TIME) {
        fields.push(format!("time={}", now.format(TIME_FORMAT)));
    }
    if flags.contains(MetadataFlags::PID) {
        fields.push(format!("pid={}", std::process::id()));
    }
    if flags.contains(MetadataFlags::TID) {
        fields.push(format!("tid={}", current_thread_id()));
    }

    format!("[{}] {}\n", fields.join(" "), message)
}

fn format_json(
    level: LogLevel,
    flags: MetadataFlags,
    message: &str,
    now: &DateTime<Local>,
) -> String {
    let mut json_obj = Map::new();

    if flags.contains(MetadataFlags::LEVEL) {
        json_obj.insert("level".to_string(), Value::String(level.to_string()));
    }
    if flags.contains(MetadataFlags::DATE) {
        json_obj.insert(
            "date".to_string(),
            Value::String(now.format(DATE_FORMAT).to_string()),
        );
    }
    if flags.contains(MetadataFlags::TIME) {
        json_obj.insert(
            "time".to_string(),
            Value::String(now.format(TIME_FORMAT).to_string()),
        );
    }
    if flags.contains(MetadataFlags::PID) {
        json_obj.insert("pid".to_string(), Value::from(std::process::id()));
    }
    if flags.contains(MetadataFlags::TID) {
        let tid = current_thread_id();
        let value = match tid.parse::<u64>() {
            Ok(numeric) => Value::from(numeric),
            Err(_) => Value::String(tid),
        };
        json_obj.insert("tid".to_string(), value);
    }
    json_obj.insert("message".to_string(), Value::String(message.to_string()));

    let mut line = Value::Object(json_obj).to_string();
    line.push('\n');
    line
}
