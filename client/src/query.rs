use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;
use url::Url;

/// Optional capability of a request value: write itself into the URL query
/// string instead of (or in addition to) the JSON body.
pub trait QueryAppender {
    fn append_to_query(&self, url: &mut Url);
}

/// A value that may be passed as a request body.
///
/// Types that also carry query parameters return themselves from
/// [`RequestBody::query_appender`]; the request builder checks it for every
/// method, while the JSON encoding is skipped for `GET`.
pub trait RequestBody: Serialize {
    fn query_appender(&self) -> Option<&dyn QueryAppender> {
        None
    }
}

impl RequestBody for serde_json::Value {}

impl RequestBody for str {}

impl RequestBody for String {}

macro_rules! plain_body {
    ($($ty:ty),*) => {
        $(impl RequestBody for $ty {})*
    };
}

plain_body!(bool, i32, i64, u32, u64, f64);

impl<T: Serialize> RequestBody for [T] {}

impl<T: Serialize> RequestBody for Vec<T> {}

impl<K: Serialize, V: Serialize, S: BuildHasher> RequestBody for HashMap<K, V, S> {}

impl<K: Serialize, V: Serialize> RequestBody for BTreeMap<K, V> {}

impl<T: RequestBody + ?Sized> RequestBody for &T {
    fn query_appender(&self) -> Option<&dyn QueryAppender> {
        (**self).query_appender()
    }
}

impl<T: RequestBody> RequestBody for Option<T> {
    fn query_appender(&self) -> Option<&dyn QueryAppender> {
        self.as_ref().and_then(|body| body.query_appender())
    }
}

/// Page selection for list endpoints (`page` / `page-size`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: Option<u32>,
    #[serde(rename = "page-size")]
    pub page_size: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

impl QueryAppender for Pagination {
    fn append_to_query(&self, url: &mut Url) {
        if self.page.is_none() && self.page_size.is_none() {
            return;
        }

        let mut pairs = url.query_pairs_mut();
        if let Some(page) = self.page {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(page_size) = self.page_size {
            pairs.append_pair("page-size", &page_size.to_string());
        }
    }
}

impl RequestBody for Pagination {
    fn query_appender(&self) -> Option<&dyn QueryAppender> {
        Some(self)
    }
}
