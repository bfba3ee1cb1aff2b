//! Token-driven pager over a list operation

use super::types::{extract_path, PageSpec, PagerState};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::request::{CallParams, OperationDescriptor};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::debug;

/// Iterates the pages of one list operation
///
/// Holds a private copy of the caller's parameters and the current
/// continuation token. Each [`get_next`](Pager::get_next) issues exactly one
/// request. A failed fetch leaves the pager untouched, so it can be retried.
pub struct Pager<T = Value> {
    client: HttpClient,
    op: &'static OperationDescriptor,
    params: CallParams,
    spec: PageSpec,
    token: Option<String>,
    state: PagerState,
    pages_fetched: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Pager<T> {
    /// Create a pager
    ///
    /// Fails if the caller already supplied the token parameter, if the
    /// operation does not declare it, or if required parameters are missing.
    pub fn new(
        client: HttpClient,
        op: &'static OperationDescriptor,
        params: CallParams,
        spec: PageSpec,
    ) -> Result<Self> {
        if op.param(&spec.token_param).is_none() {
            return Err(Error::invalid_param(
                &spec.token_param,
                format!("not a parameter of {}", op.name),
            ));
        }
        if params.is_present(&spec.token_param) {
            return Err(Error::invalid_param(
                &spec.token_param,
                "the page token is managed by the pager",
            ));
        }
        op.validate(&params)?;

        Ok(Self {
            client,
            op,
            params,
            spec,
            token: None,
            state: PagerState::Active,
            pages_fetched: 0,
            _item: PhantomData,
        })
    }

    /// Whether another page is believed to exist
    pub fn has_next(&self) -> bool {
        self.state == PagerState::Active
    }

    /// Current lifecycle state
    pub fn state(&self) -> PagerState {
        self.state
    }

    /// Token that the next request will carry
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Number of pages returned so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page and return its items
    pub async fn get_next(&mut self) -> Result<Vec<T>> {
        if !self.has_next() {
            return Err(Error::pagination(format!(
                "{} has no more pages",
                self.op.name
            )));
        }

        let mut params = self.params.clone();
        if let Some(token) = &self.token {
            params.set(self.spec.token_param.clone(), token.clone());
        }

        let body = self
            .client
            .call(self.op, &params)
            .await?
            .into_result()
            .unwrap_or(Value::Null);

        // Decode before touching state so a bad page can be re-fetched
        let items = self.items(&body)?;
        let next = self
            .spec
            .token_source
            .extract(&body)
            .filter(|t| !t.is_empty() && self.token.as_deref() != Some(t.as_str()));

        self.pages_fetched += 1;
        match next {
            Some(token) => self.token = Some(token),
            None => {
                self.token = None;
                self.state = PagerState::Exhausted;
            }
        }

        debug!(
            "{} page {}: {} items, exhausted={}",
            self.op.name,
            self.pages_fetched,
            items.len(),
            !self.has_next()
        );
        Ok(items)
    }

    /// Drain every remaining page into one ordered list
    pub async fn get_all(&mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while self.has_next() {
            all.extend(self.get_next().await?);
        }
        Ok(all)
    }

    /// Turn the pager into a stream of pages
    ///
    /// The stream ends after the last page or after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<T>>> {
        stream::unfold(Some(self), |pager| async move {
            let mut pager = pager?;
            if !pager.has_next() {
                return None;
            }
            match pager.get_next().await {
                Ok(items) => Some((Ok(items), Some(pager))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    fn items(&self, body: &Value) -> Result<Vec<T>> {
        match extract_path(body, &self.spec.items_field) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .cloned()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<T>, _>>()
                .map_err(|e| {
                    Error::decode(format!(
                        "invalid item in '{}' of {}: {e}",
                        self.spec.items_field, self.op.name
                    ))
                }),
            Some(other) => Err(Error::decode(format!(
                "'{}' of {} is not an array: {other}",
                self.spec.items_field, self.op.name
            ))),
        }
    }
}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("operation", &self.op.name)
            .field("token", &self.token)
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
