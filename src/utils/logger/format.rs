//! Record encoders for the two logger modes.
//!
//! Both encoders read the same event fields: `severity` overrides the tracing
//! level label, `caller` overrides the callsite recorded by tracing, and
//! `stacktrace` is written last. Everything else besides `message` is kept as
//! an extra field.

use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    severity: Option<String>,
    caller: Option<String>,
    stacktrace: Option<String>,
    fields: Map<String, Value>,
}

impl FieldCollector {
    fn insert(&mut self, name: &str, value: Value) {
        let slot = match name {
            "message" => &mut self.message,
            "severity" => &mut self.severity,
            "caller" => &mut self.caller,
            "stacktrace" => &mut self.stacktrace,
            _ => {
                self.fields.insert(name.to_string(), value);
                return;
            }
        };
        *slot = Some(match value {
            Value::String(s) => s,
            other => other.to_string(),
        });
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field.name(), Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field.name(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field.name(), Value::String(format!("{:?}", value)));
    }
}

/// One event, flattened into the columns both encoders write.
#[derive(Serialize)]
struct Record {
    level: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<String>,
    message: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stacktrace: Option<String>,
}

impl Record {
    fn from_event(event: &Event<'_>) -> Self {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let metadata = event.metadata();
        let caller = collector.caller.or_else(|| {
            metadata
                .file()
                .zip(metadata.line())
                .map(|(file, line)| format!("{}:{}", file, line))
        });

        Self {
            level: collector
                .severity
                .unwrap_or_else(|| metadata.level().to_string()),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            caller,
            message: collector.message.unwrap_or_default(),
            fields: collector.fields,
            stacktrace: collector.stacktrace,
        }
    }
}

/// Production encoder: a single JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl<S, N> FormatEvent<S, N> for JsonFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let record = Record::from_event(event);
        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Development encoder: tab-separated console line with a colorized level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl ConsoleFormat {
    fn paint(level: &str) -> String {
        match level {
            "DEBUG" => level.magenta().to_string(),
            "INFO" => level.blue().to_string(),
            "WARN" => level.yellow().to_string(),
            _ => level.red().to_string(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let record = Record::from_event(event);

        let level = if writer.has_ansi_escapes() {
            Self::paint(&record.level)
        } else {
            record.level.clone()
        };
        write!(writer, "{}\t{}\t", record.timestamp, level)?;
        if let Some(caller) = &record.caller {
            write!(writer, "{}\t", caller)?;
        }
        write!(writer, "{}", record.message)?;
        if !record.fields.is_empty() {
            write!(writer, "\t{}", Value::Object(record.fields))?;
        }
        writeln!(writer)?;
        if let Some(stacktrace) = &record.stacktrace {
            writeln!(writer, "{}", stacktrace)?;
        }
        Ok(())
    }
}
