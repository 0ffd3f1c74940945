use std::collections::HashMap;

use crate::{
    error::{Error, Res},
    types::{PlayableReference, SearchKind, SearchPage},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Returns the URI of the best match for `query` among items of `kind`.
    ///
    /// Issues `GET /search?q=<query>&type=<kind>&limit=1` and reads the first
    /// item of the `<kind>s` page.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when that page is absent or has no items; an empty
    /// reference is never returned.
    pub async fn search(&self, query: &str, kind: SearchKind) -> Res<PlayableReference> {
        let request = self
            .get("/search")
            .query(&[("q", query), ("type", kind.as_str()), ("limit", "1")]);
        let res = self.fetch("Search", request).await?;
        let mut payload: HashMap<String, SearchPage> = res.json().await?;

        payload
            .remove(&kind.result_field())
            .and_then(|page| page.items.into_iter().flatten().next())
            .and_then(|item| item.uri)
            .filter(|uri| !uri.as_str().is_empty())
            .ok_or_else(|| Error::NotFound {
                query: query.to_string(),
                kind: kind.to_string(),
            })
    }
}
