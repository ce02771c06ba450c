//! Call-site attribution for log records.
//!
//! Logging methods are `#[track_caller]`, so [`Location::caller`] already
//! names the code that called the logger. Larger skips walk outward through a
//! captured backtrace, which needs debug info; without it the direct caller is
//! reported.

use std::backtrace::Backtrace;
use std::panic::Location;

/// `file:line` of the frame `skip` levels above the logging call, where a
/// skip of 1 is the direct caller.
pub(crate) fn resolve(location: &Location<'_>, skip: usize) -> String {
    let direct = format!("{}:{}", location.file(), location.line());
    if skip <= 1 {
        return direct;
    }

    let trace = Backtrace::force_capture().to_string();
    outer_frame(&trace, location.file(), location.line(), skip - 1)
        .map(|(file, line)| format!("{}:{}", relative_to_cwd(file), line))
        .unwrap_or(direct)
}

/// Source locations of a rendered backtrace, innermost first.
fn frame_locations(trace: &str) -> Vec<(&str, u32)> {
    trace
        .lines()
        .filter_map(|line| {
            let at = line.trim_start().strip_prefix("at ")?;
            let mut parts = at.rsplitn(3, ':');
            let _column = parts.next()?;
            let line = parts.next()?.parse().ok()?;
            let file = parts.next()?;
            Some((file.strip_prefix("./").unwrap_or(file), line))
        })
        .collect()
}

/// Finds the frame matching `file:line` and returns the one `hops` further out.
fn outer_frame<'a>(trace: &'a str, file: &str, line: u32, hops: usize) -> Option<(&'a str, u32)> {
    let frames = frame_locations(trace);
    let start = frames
        .iter()
        .position(|(f, l)| *l == line && f.ends_with(file))?;
    frames.get(start + hops).copied()
}

fn relative_to_cwd(file: &str) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| {
            file.strip_prefix(&format!("{}/", dir.display()))
                .map(str::to_owned)
        })
        .unwrap_or_else(|| file.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:9
   1: boilerplate::utils::logger::Logger::log
             at ./src/utils/logger/mod.rs:280:22
   2: app::helper
             at /work/app/src/helper.rs:10:5
   3: app::handler
             at /work/app/src/handler.rs:42:9
   4: core::ops::function::FnOnce::call_once
   5: app::main
             at /work/app/src/main.rs:7:5
";

    #[test]
    fn test_frame_locations_skip_frames_without_source() {
        let frames = frame_locations(TRACE);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[1], ("src/utils/logger/mod.rs", 280));
        assert_eq!(frames[4], ("/work/app/src/main.rs", 7));
    }

    #[test]
    fn test_outer_frame_walks_from_the_logging_call() {
        assert_eq!(
            outer_frame(TRACE, "src/helper.rs", 10, 0),
            Some(("/work/app/src/helper.rs", 10))
        );
        assert_eq!(
            outer_frame(TRACE, "src/helper.rs", 10, 1),
            Some(("/work/app/src/handler.rs", 42))
        );
        assert_eq!(
            outer_frame(TRACE, "src/helper.rs", 10, 2),
            Some(("/work/app/src/main.rs", 7))
        );
    }

    #[test]
    fn test_outer_frame_misses() {
        // line must match as well as the file
        assert_eq!(outer_frame(TRACE, "src/helper.rs", 11, 1), None);
        assert_eq!(outer_frame(TRACE, "src/helper.rs", 10, 9), None);
    }

    #[test]
    fn test_skip_of_one_is_the_direct_caller() {
        let location = Location::caller();
        assert_eq!(
            resolve(location, 1),
            format!("{}:{}", location.file(), location.line())
        );
        assert_eq!(resolve(location, 0), resolve(location, 1));
    }
}
