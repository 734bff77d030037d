//! 错误处理集成测试
//!
//! 测试抓取失败、非法来源与上游异常时的行为

use wattpad_burmese::extraction::{ExtractError, ExtractionConfig, Extractor};
use wattpad_burmese::translation::{UpstreamError, FAILURE_MARKER};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{document_translator, HtmlTestHelper, ScriptedBackend, StaticFetcher};

/// 非法 URL 与非 Wattpad 域名在抓取前被拒绝
#[test]
fn test_rejected_urls_never_reach_fetcher() {
    let cases = vec![
        "",
        "not a url",
        "ftp://www.wattpad.com/123",
        "https://example.com/story/123",
        "https://wattpad.com.example.org/123",
    ];

    for (i, url) in cases.iter().enumerate() {
        let fetcher = StaticFetcher::html(HtmlTestHelper::marked_chapter());
        let requested = fetcher.requested();
        let extractor = Extractor::new(Box::new(fetcher), ExtractionConfig::default());

        let error = extractor.extract(url).unwrap_err();
        assert!(error.is_client_error(), "case {} should be a client error: {:?}", i, error);
        assert!(requested.lock().unwrap().is_empty());
        println!("✅ URL case {}: {}", i, error);
    }
}

/// 来源站点拒绝访问时返回状态码错误
#[test]
fn test_access_denied_is_reported() {
    let extractor = Extractor::new(
        Box::new(StaticFetcher::failing(ExtractError::Status { status: 403 })),
        ExtractionConfig::default(),
    );

    let error = extractor
        .extract("https://www.wattpad.com/1-chapter")
        .unwrap_err();

    assert!(error.is_fetch_error());
    assert!(!error.is_client_error());
    assert_eq!(error.to_string(), "Wattpad Access Denied: 403");
}

#[test]
fn test_network_failure_is_fetch_error() {
    let extractor = Extractor::new(
        Box::new(StaticFetcher::failing(ExtractError::Network(
            "connection reset".to_string(),
        ))),
        ExtractionConfig::default(),
    );

    let error = extractor
        .extract("https://www.wattpad.com/1-chapter")
        .unwrap_err();
    assert!(error.is_fetch_error());
}

/// 畸形 HTML 不会导致崩溃
#[test]
fn test_malformed_html_is_tolerated() {
    let cases = vec![
        "<div>Unclosed div with enough words to keep",
        "<html><>Invalid tag</>",
        "Plain text without HTML tags",
        "<script>alert('test')</script>",
        "<!DOCTYPE html>",
    ];

    let extractor = Extractor::new(
        Box::new(StaticFetcher::html("")),
        ExtractionConfig::default(),
    );

    for (i, html) in cases.iter().enumerate() {
        match extractor.extract_from_html(html) {
            Ok(story) => println!("✅ Malformed case {}: strategy {}", i, story.strategy),
            Err(e) => {
                assert_eq!(e, ExtractError::NoContent);
                println!("✅ Malformed case {}: {}", i, e);
            }
        }
    }
}

/// 网络错误轮换密钥但不暂停，最终失败时仍返回占位文本
#[test]
fn test_network_errors_rotate_keys() {
    let backend = ScriptedBackend::new(Vec::new(), |_| {
        Err(UpstreamError::Network("timed out".to_string()))
    });
    let translator = document_translator(backend.clone(), &["k1", "k2"], 2, 1500);

    let document = translator.translate("Some text.");

    assert_eq!(backend.keys_used(), vec!["k1", "k2", "k1", "k2"]);
    assert_eq!(document.translation, FAILURE_MARKER);
}

/// 400 被视为额度耗尽，轮换到下一个密钥
#[test]
fn test_bad_request_rotates_key() {
    let backend = ScriptedBackend::failing_then_ok(
        1,
        UpstreamError::BadRequest("quota exceeded".to_string()),
    );
    let translator = document_translator(backend.clone(), &["k1", "k2"], 3, 1500);

    let document = translator.translate("Some text.");

    assert_eq!(backend.keys_used(), vec!["k1", "k2"]);
    assert_eq!(document.failed_chunks, 0);
}

/// 响应体解析失败消耗一次尝试但不轮换
#[test]
fn test_decode_errors_do_not_rotate() {
    let backend = ScriptedBackend::failing_then_ok(
        2,
        UpstreamError::Decode("missing choices".to_string()),
    );
    let translator = document_translator(backend.clone(), &["k1", "k2"], 3, 1500);

    translator.translate("Some text.");

    assert_eq!(backend.keys_used(), vec!["k1", "k1", "k1"]);
}
