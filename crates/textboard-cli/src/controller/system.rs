//! Built-in commands that do not touch articles

use textboard_core::errors::Result;

use crate::console::Console;

const HELP: &[(&str, &str)] = &[
    ("article/add?title=..&body=..", "게시물 작성 (생략한 값은 입력받음)"),
    ("article/list?page=1&searchKeyword=..", "게시물 목록"),
    ("article/detail?id=1", "게시물 상세"),
    ("article/modify?id=1&title=..&body=..", "게시물 수정"),
    ("article/delete?id=1", "게시물 삭제"),
    ("system/help", "명령어 목록"),
    ("system/exit", "종료"),
];

pub fn help(console: &mut Console<'_>) -> Result<()> {
    console.println("== 명령어 목록 ==")?;
    for (usage, description) in HELP {
        console.println(format!("{:<40} {}", usage, description))?;
    }
    Ok(())
}
