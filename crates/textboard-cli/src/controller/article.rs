//! Article commands

use chrono::{DateTime, Local, Utc};
use textboard_core::errors::{BoardError, ExError, ExErrorKind, Result};
use textboard_core::{Article, ArticleQuery, ArticleService, CommandRequest};

use crate::console::Console;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ArticleController {
    service: ArticleService,
    page_size: u32,
}

impl ArticleController {
    pub fn new(service: ArticleService, page_size: u32) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
        }
    }

    pub fn add(&mut self, rq: &CommandRequest, console: &mut Console<'_>) -> Result<()> {
        let title = parameter_or_prompt(rq, "title", "제목 : ", console)?;
        let body = parameter_or_prompt(rq, "body", "내용 : ", console)?;

        let id = self.service.write(&title, &body)?;
        console.println(format!("{}번 게시물이 생성되었습니다.", id))
    }

    pub fn list(&self, rq: &CommandRequest, console: &mut Console<'_>) -> Result<()> {
        let page = match rq.parameter_as_i64("page")? {
            None => 1,
            Some(page) => u32::try_from(page).map_err(|_| BoardError::InvalidParameter {
                name: "page".to_string(),
                value: page.to_string(),
                reason: "page must be a positive number".to_string(),
            })?,
        };

        let mut query = ArticleQuery::new(page, self.page_size);
        if let Some(keyword) = rq.parameter("searchKeyword") {
            query = query.with_keyword(keyword);
        }

        let page = self.service.list(&query)?;
        if page.articles.is_empty() {
            return console.println("게시물이 존재하지 않습니다.");
        }

        console.println("번호 / 작성날짜 / 제목")?;
        for article in &page.articles {
            console.println(format!(
                "{} / {} / {}",
                article.id,
                local_time(&article.reg_date),
                article.title
            ))?;
        }
        console.println(format!(
            "페이지 {} / {} (전체 {}건)",
            page.page, page.last_page, page.total_count
        ))
    }

    pub fn detail(&self, rq: &CommandRequest, console: &mut Console<'_>) -> Result<()> {
        let id = rq.required_i64("id")?;
        let article = self.service.detail(id)?;
        print_article(&article, console)
    }

    pub fn modify(&mut self, rq: &CommandRequest, console: &mut Console<'_>) -> Result<()> {
        let id = rq.required_i64("id")?;
        // Fail before prompting when the article does not exist
        self.service.detail(id)?;

        let title = parameter_or_prompt(rq, "title", "새 제목 : ", console)?;
        let body = parameter_or_prompt(rq, "body", "새 내용 : ", console)?;

        self.service.modify(id, &title, &body)?;
        console.println(format!("{}번 게시물이 수정되었습니다.", id))
    }

    pub fn delete(&mut self, rq: &CommandRequest, console: &mut Console<'_>) -> Result<()> {
        let id = rq.required_i64("id")?;
        self.service.delete(id)?;
        console.println(format!("{}번 게시물이 삭제되었습니다.", id))
    }
}

fn parameter_or_prompt(
    rq: &CommandRequest,
    name: &str,
    prompt: &str,
    console: &mut Console<'_>,
) -> Result<String> {
    if let Some(value) = rq.parameter(name) {
        return Ok(value.to_string());
    }

    console.read_line(prompt)?.ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("read_input")
            .with_message(format!("input ended before '{}' was entered", name))
    })
}

fn print_article(article: &Article, console: &mut Console<'_>) -> Result<()> {
    console.println(format!("번호 : {}", article.id))?;
    console.println(format!("작성날짜 : {}", local_time(&article.reg_date)))?;
    console.println(format!("수정날짜 : {}", local_time(&article.update_date)))?;
    console.println(format!("제목 : {}", article.title))?;
    console.println(format!("내용 : {}", article.body))
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textboard_core::MemoryArticleRepository;

    fn controller() -> ArticleController {
        ArticleController::new(
            ArticleService::new(Box::new(MemoryArticleRepository::new())),
            2,
        )
    }

    fn run<F>(input: &str, f: F) -> (Result<()>, String)
    where
        F: FnOnce(&mut Console<'_>) -> Result<()>,
    {
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        let result = f(&mut Console::new(&mut input, &mut output));
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_add_with_parameters() {
        let mut ctl = controller();
        let rq = CommandRequest::parse("article/add?title=Hello&body=World");

        let (result, out) = run("", |c| ctl.add(&rq, c));

        result.unwrap();
        assert_eq!(out, "1번 게시물이 생성되었습니다.\n");
    }

    #[test]
    fn test_add_prompts_for_missing_fields() {
        let mut ctl = controller();
        let rq = CommandRequest::parse("article add");

        let (result, out) = run("Prompted\nBody text\n", |c| ctl.add(&rq, c));

        result.unwrap();
        assert!(out.starts_with("제목 : 내용 : "));
        assert!(out.contains("1번 게시물이 생성되었습니다."));
    }

    #[test]
    fn test_add_at_end_of_input_is_invalid_input() {
        let mut ctl = controller();
        let rq = CommandRequest::parse("article/add?title=Only");

        let (result, _) = run("", |c| ctl.add(&rq, c));

        assert_eq!(result.unwrap_err().kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_list_pages_newest_first() {
        let mut ctl = controller();
        for title in ["a", "b", "c"] {
            let rq = CommandRequest::parse(format!("article/add?title={}&body=x", title));
            run("", |c| ctl.add(&rq, c)).0.unwrap();
        }

        let (result, out) = run("", |c| ctl.list(&CommandRequest::parse("article/list"), c));
        result.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "번호 / 작성날짜 / 제목");
        assert!(lines[1].starts_with("3 / "));
        assert!(lines[2].starts_with("2 / "));
        assert_eq!(lines[3], "페이지 1 / 2 (전체 3건)");

        let (_, out) = run("", |c| {
            ctl.list(&CommandRequest::parse("article/list?page=2"), c)
        });
        assert!(out.lines().nth(1).unwrap().starts_with("1 / "));
    }

    #[test]
    fn test_list_empty_and_negative_page() {
        let ctl = controller();

        let (_, out) = run("", |c| ctl.list(&CommandRequest::parse("article/list"), c));
        assert_eq!(out, "게시물이 존재하지 않습니다.\n");

        let (result, _) = run("", |c| {
            ctl.list(&CommandRequest::parse("article/list?page=-1"), c)
        });
        assert_eq!(result.unwrap_err().kind(), ExErrorKind::InvalidParameter);
    }

    #[test]
    fn test_modify_missing_article_does_not_prompt() {
        let mut ctl = controller();
        let rq = CommandRequest::parse("article/modify?id=9");

        let (result, out) = run("t\nb\n", |c| ctl.modify(&rq, c));

        assert_eq!(result.unwrap_err().kind(), ExErrorKind::NotFound);
        assert!(out.is_empty());
    }

    #[test]
    fn test_detail_requires_id() {
        let ctl = controller();
        let (result, _) = run("", |c| ctl.detail(&CommandRequest::parse("article/detail"), c));
        assert_eq!(result.unwrap_err().kind(), ExErrorKind::MissingParameter);
    }
}
