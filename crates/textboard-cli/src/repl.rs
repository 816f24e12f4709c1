//! Read-dispatch-print loop

use textboard_core::errors::{ExErrorKind, Result};
use textboard_core::CommandRequest;
use textboard_core_types::CommandContext;

use crate::app::{AppContext, Flow};
use crate::console::Console;

pub const PROMPT: &str = "명령어) ";
pub const START_BANNER: &str = "== 텍스트 게시판 시작 ==";
pub const END_BANNER: &str = "== 텍스트 게시판 끝 ==";

/// Prompt for commands until `exit` or end of input
///
/// # Errors
///
/// Only console I/O failures end the loop early; command failures are
/// printed and the prompt is shown again.
pub fn run(app: &mut AppContext, console: &mut Console<'_>) -> Result<()> {
    console.println(START_BANNER)?;

    while let Some(line) = console.read_line(PROMPT)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if execute_line(app, console, line)? == Flow::Exit {
            break;
        }
    }

    console.println(END_BANNER)
}

/// Run each line once, in order, stopping early at `exit`
///
/// # Errors
///
/// Console I/O failures.
pub fn run_lines<I, S>(app: &mut AppContext, console: &mut Console<'_>, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if execute_line(app, console, line)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Parse and dispatch one trimmed line inside a request span
///
/// # Errors
///
/// Console I/O failures. Every other error is printed as `오류: ...`.
pub fn execute_line(app: &mut AppContext, console: &mut Console<'_>, line: &str) -> Result<Flow> {
    let ctx = CommandContext::new(line);
    let span = tracing::info_span!("command", request_id = %ctx.request_id);
    let _entered = span.enter();

    let request = CommandRequest::parse(ctx.raw_line.as_str());
    match app.dispatch(&request, console) {
        Ok(flow) => Ok(flow),
        Err(e) if e.kind() == ExErrorKind::Io => Err(e.with_request_id(ctx.request_id)),
        Err(e) => {
            tracing::warn!(err_code = e.code(), error = %e, "command failed");
            console.println(format!("오류: {}", e.message()))?;
            Ok(Flow::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textboard_core::MemoryArticleRepository;

    fn run_session(input: &str) -> String {
        let mut app = AppContext::with_repository(Box::new(MemoryArticleRepository::new()), 10);
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        run(&mut app, &mut Console::new(&mut input, &mut output)).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_session_ends_at_end_of_input() {
        let out = run_session("");
        assert_eq!(out, format!("{}\n{}{}\n", START_BANNER, PROMPT, END_BANNER));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let out = run_session("\n   \nexit\nhelp\n");
        assert_eq!(out.matches(PROMPT).count(), 3);
        assert!(!out.contains("명령어 목록"));
        assert!(out.ends_with(&format!("{}\n", END_BANNER)));
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let out = run_session("nope\narticle/add?title=t&body=b\n");
        assert!(out.contains("오류: 존재하지 않는 명령어입니다: nope"));
        assert!(out.contains("1번 게시물이 생성되었습니다."));
    }

    #[test]
    fn test_input_is_trimmed_before_parsing() {
        let out = run_session("   article/add?title=t&body=b   \n");
        assert!(out.contains("1번 게시물이 생성되었습니다."));
    }

    #[test]
    fn test_run_lines_stops_at_exit() {
        let mut app = AppContext::with_repository(Box::new(MemoryArticleRepository::new()), 10);
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        run_lines(
            &mut app,
            &mut Console::new(&mut input, &mut output),
            ["article/add?title=a&body=b", "exit", "article/add?title=c&body=d"],
        )
        .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert_eq!(out, "1번 게시물이 생성되었습니다.\n");
    }
}
