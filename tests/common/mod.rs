// 集成测试公共模块
//
// 提供可编程的上游后端、静态页面抓取器与 HTML 样例

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use url::Url;

use wattpad_burmese::core::StoryRelay;
use wattpad_burmese::extraction::{ExtractError, ExtractResult, ExtractionConfig, Extractor};
use wattpad_burmese::network::PageFetcher;
use wattpad_burmese::translation::{
    ChunkTranslator, CompletionBackend, DocumentTranslator, KeyPool, RetryPolicy, UpstreamError,
    UpstreamResult,
};

/// 一次上游调用的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub key: String,
    pub chunk: String,
}

/// 按脚本返回结果的补全后端
///
/// 脚本耗尽后使用 `fallback` 生成结果。
pub struct ScriptedBackend {
    script: Mutex<VecDeque<UpstreamResult<String>>>,
    fallback: fn(&str) -> UpstreamResult<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<UpstreamResult<String>>, fallback: fn(&str) -> UpstreamResult<String>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// 始终返回 429
    pub fn always_rate_limited() -> Arc<Self> {
        Self::new(Vec::new(), |_| Err(UpstreamError::RateLimited))
    }

    /// 把分块原样加上前缀返回
    pub fn echo() -> Arc<Self> {
        Self::new(Vec::new(), |chunk| Ok(format!("MY:{}", chunk)))
    }

    /// 前 `failures` 次返回给定错误，之后成功
    pub fn failing_then_ok(failures: usize, error: UpstreamError) -> Arc<Self> {
        let mut script: Vec<UpstreamResult<String>> = (0..failures).map(|_| Err(error.clone())).collect();
        script.push(Ok("ဘာသာပြန်ပြီး".to_string()));
        Self::new(script, |_| Err(UpstreamError::RateLimited))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn keys_used(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.key).collect()
    }
}

impl CompletionBackend for ScriptedBackend {
    fn complete(&self, api_key: &str, chunk: &str) -> UpstreamResult<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            key: api_key.to_string(),
            chunk: chunk.to_string(),
        });

        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| (self.fallback)(chunk))
    }
}

/// 返回固定页面的抓取器
pub struct StaticFetcher {
    response: ExtractResult<String>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn html(html: &str) -> Self {
        Self {
            response: Ok(html.to_string()),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: ExtractError) -> Self {
        Self {
            response: Err(error),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requested)
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, url: &Url) -> ExtractResult<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.response.clone()
    }
}

/// 测试用的翻译器
pub fn document_translator(
    backend: Arc<ScriptedBackend>,
    keys: &[&str],
    retries_per_key: usize,
    chunk_size: usize,
) -> DocumentTranslator {
    let pool = Arc::new(KeyPool::new(keys.iter().copied()).unwrap());
    DocumentTranslator::new(
        chunk_size,
        ChunkTranslator::new(backend, pool, RetryPolicy::immediate(retries_per_key)),
    )
}

/// 测试用的完整装配
pub fn test_relay(fetcher: StaticFetcher, backend: Arc<ScriptedBackend>, chunk_size: usize) -> StoryRelay {
    StoryRelay::new(
        Extractor::new(Box::new(fetcher), ExtractionConfig::default()),
        document_translator(backend, &["gsk_one", "gsk_two"], 3, chunk_size),
    )
}

/// HTML 样例
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 带段落标记的章节页面，同时含有干扰段落
    pub fn marked_chapter() -> &'static str {
        r#"<!DOCTYPE html>
<html>
<head><title>Chapter One</title><script>window.ads = true;</script></head>
<body>
  <header><p>Wattpad - Where stories live. Discover now.</p></header>
  <article>
    <pre>
      <p data-p-id="a1b2">The hallway smelled like rain and cheap perfume.</p>
      <p data-p-id="c3d4">"You're late," she said, without looking up.</p>
      <p data-p-id="e5f6">Ok.</p>
      <p data-p-id="g7h8">He shrugged and dropped into the seat beside her.</p>
    </pre>
    <p>An unmarked paragraph inside the article that is plenty long.</p>
  </article>
  <footer><p>Don't forget to vote and comment on this chapter!</p></footer>
</body>
</html>"#
    }

    /// 没有段落标记，只有 article 容器
    pub fn article_chapter() -> &'static str {
        r#"<html><body>
  <nav><p>Home / Browse / Library and more links</p></nav>
  <article>
    <p>Short line.</p>
    <p>The city never slept, and neither did Mara.</p>
    <p>She counted the streetlights until the sun came up.</p>
  </article>
</body></html>"#
    }

    /// 只有类名容器
    pub fn classed_chapter() -> &'static str {
        r#"<html><body>
  <div class="panel part-content">
    <p>Rain again. She pulled her hood over her head.</p>
    <p>Tiny.</p>
  </div>
</body></html>"#
    }

    /// 只有散落的段落，夹杂样板文字
    pub fn loose_paragraphs() -> &'static str {
        r#"<html><body>
  <div><p>Please SHARE this story with your friends, it helps!</p></div>
  <div><p>Nobody in the village remembered the winter of the wolves.</p></div>
  <div><p>Too short to keep.</p></div>
</body></html>"#
    }

    /// 只有裸文本
    pub fn bare_text() -> &'static str {
        "<html><body><div>First line of text</div><div>Second line of text</div></body></html>"
    }

    /// 没有任何可见文本
    pub fn empty_page() -> &'static str {
        "<html><head><script>var x;</script></head><body>  </body></html>"
    }
}
