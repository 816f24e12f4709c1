use textboard_core::{ArticleQuery, ArticleService, ExErrorKind, MemoryArticleRepository};

fn seeded_service(count: usize) -> ArticleService {
    let mut svc = ArticleService::new(Box::new(MemoryArticleRepository::new()));
    for i in 1..=count {
        svc.write(&format!("제목{}", i), &format!("내용{}", i))
            .expect("seed write");
    }
    svc
}

#[test]
fn test_write_assigns_sequential_ids() {
    let mut svc = seeded_service(0);
    assert_eq!(svc.write("first", "").unwrap(), 1);
    assert_eq!(svc.write("second", "").unwrap(), 2);
}

#[test]
fn test_list_pages_newest_first() {
    let svc = seeded_service(12);

    let page1 = svc.list(&ArticleQuery::new(1, 10)).unwrap();
    assert_eq!(page1.articles.len(), 10);
    assert_eq!(page1.articles[0].id, 12);
    assert_eq!(page1.total_count, 12);
    assert_eq!(page1.last_page, 2);

    let page2 = svc.list(&ArticleQuery::new(2, 10)).unwrap();
    let ids: Vec<i64> = page2.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_list_with_keyword() {
    let svc = seeded_service(12);
    let page = svc
        .list(&ArticleQuery::default().with_keyword("제목1"))
        .unwrap();

    // 제목1, 제목10, 제목11, 제목12
    assert_eq!(page.total_count, 4);
    assert_eq!(page.articles.first().map(|a| a.id), Some(12));
}

#[test]
fn test_modify_updates_fields() {
    let mut svc = seeded_service(1);
    let modified = svc.modify(1, "new title", "new body").unwrap();

    assert_eq!(modified.title, "new title");
    assert_eq!(modified.body, "new body");
    assert!(modified.update_date >= modified.reg_date);
}

#[test]
fn test_modify_missing_article() {
    let mut svc = seeded_service(1);
    let err = svc.modify(2, "t", "b").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_modify_blank_title_leaves_article_untouched() {
    let mut svc = seeded_service(1);
    let err = svc.modify(1, " ", "b").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidTitle);
    assert_eq!(svc.detail(1).unwrap().title, "제목1");
}

#[test]
fn test_delete_then_detail_is_not_found() {
    let mut svc = seeded_service(2);
    svc.delete(1).unwrap();

    assert_eq!(svc.detail(1).unwrap_err().kind(), ExErrorKind::NotFound);
    assert!(svc.detail(2).is_ok());
}
