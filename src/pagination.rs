use std::future::Future;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{JiraIssue, JiraWorklog, SearchResult, WorklogPage};

/// `startAt` / `maxResults` / `total` 形式でページングされるレスポンス
pub trait Page {
    type Item;

    fn total(&self) -> u32;
    fn max_results(&self) -> u32;
    fn into_items(self) -> Vec<Self::Item>;
}

impl Page for SearchResult {
    type Item = JiraIssue;

    fn total(&self) -> u32 {
        self.total
    }

    fn max_results(&self) -> u32 {
        self.max_results
    }

    fn into_items(self) -> Vec<JiraIssue> {
        self.issues
    }
}

impl Page for WorklogPage {
    type Item = JiraWorklog;

    fn total(&self) -> u32 {
        self.total
    }

    fn max_results(&self) -> u32 {
        self.max_results
    }

    fn into_items(self) -> Vec<JiraWorklog> {
        self.worklogs
    }
}

/// 全ページを順番に取得して1つのリストに連結する
///
/// `fetch_page` には開始位置（startAt）が渡される。ページサイズは毎回
/// サーバーが返す `maxResults` を使い、`startAt + maxResults >= total` で終了する。
pub async fn fetch_all_pages<P, F, Fut>(mut fetch_page: F) -> Result<Vec<P::Item>>
where
    P: Page,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut items = Vec::new();
    let mut start_at = 0u32;

    loop {
        let page = fetch_page(start_at).await?;
        let total = page.total();
        let max_results = page.max_results();
        debug!(start_at, max_results, total, "fetched page");

        items.extend(page.into_items());

        let next_start_at = start_at.saturating_add(max_results);
        if next_start_at >= total {
            break;
        }
        if max_results == 0 {
            warn!(start_at, total, "server reported a page size of zero");
            return Err(Error::InvalidData(format!(
                "maxResults is 0 at startAt {} while total is {}",
                start_at, total
            )));
        }
        start_at = next_start_at;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone)]
    struct TestPage {
        total: u32,
        max_results: u32,
        items: Vec<u32>,
    }

    impl Page for TestPage {
        type Item = u32;

        fn total(&self) -> u32 {
            self.total
        }

        fn max_results(&self) -> u32 {
            self.max_results
        }

        fn into_items(self) -> Vec<u32> {
            self.items
        }
    }

    /// total件をmax_results件ずつ返すフェイクのページ取得
    async fn collect(total: u32, max_results: u32) -> (Result<Vec<u32>>, Vec<u32>) {
        let requested = RefCell::new(Vec::new());
        let result = fetch_all_pages(|start_at| {
            requested.borrow_mut().push(start_at);
            let end = start_at.saturating_add(max_results).min(total);
            let page = TestPage {
                total,
                max_results,
                items: (start_at..end).collect(),
            };
            async move { Ok::<_, Error>(page) }
        })
        .await;
        (result, requested.into_inner())
    }

    #[tokio::test]
    async fn test_fetch_all_pages_request_count() {
        // ceil(total / maxResults) 回リクエストされること
        for (total, max_results, expected_requests) in
            [(1, 50, 1), (50, 50, 1), (51, 50, 2), (3, 2, 2), (100, 20, 5), (101, 20, 6)]
        {
            let (result, requested) = collect(total, max_results).await;

            assert_eq!(requested.len(), expected_requests, "total={} max={}", total, max_results);
            assert_eq!(result.unwrap(), (0..total).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn test_fetch_all_pages_advances_by_page_size() {
        let (_, requested) = collect(7, 3).await;

        assert_eq!(requested, vec![0, 3, 6]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_empty_result() {
        // 件数0でも1回はリクエストしてtotalを知る必要がある
        let (result, requested) = collect(0, 50).await;

        assert_eq!(requested, vec![0]);
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_pages_trusts_server_page_size() {
        // Given: ページごとにmaxResultsが変わるサーバー
        let pages = vec![
            TestPage { total: 5, max_results: 2, items: vec![1, 2] },
            TestPage { total: 5, max_results: 3, items: vec![3, 4, 5] },
        ];
        let requested = RefCell::new(Vec::new());

        // When: 全ページを取得
        let result = fetch_all_pages(|start_at| {
            let index = requested.borrow().len();
            requested.borrow_mut().push(start_at);
            let page = pages[index].clone();
            async move { Ok::<_, Error>(page) }
        })
        .await;

        // Then: 各レスポンスのmaxResultsで開始位置が進む
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(requested.into_inner(), vec![0, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_zero_page_size() {
        let result = fetch_all_pages(|_| async {
            Ok::<_, Error>(TestPage { total: 3, max_results: 0, items: Vec::new() })
        })
        .await;

        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_fetch_all_pages_propagates_error() {
        // Given: 2ページ目で失敗するサーバー
        let result = fetch_all_pages(|start_at| async move {
            if start_at == 0 {
                Ok(TestPage { total: 4, max_results: 2, items: vec![1, 2] })
            } else {
                Err(Error::ApiError { status: 500, message: "boom".to_string() })
            }
        })
        .await;

        // Then: 取得済みのページも破棄してエラーを返す
        assert!(matches!(result, Err(Error::ApiError { status: 500, .. })));
    }
}
