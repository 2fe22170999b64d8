//! Cursor pagination.
//!
//! [`drain`] follows Slack's `next_cursor` until a page comes back without
//! one. It never fails outright: an error ends the loop and is handed back
//! next to whatever was collected, so the caller decides whether partial
//! data is acceptable.

use crate::api::Page;
use crate::error::{Result, SlackpackError};

/// Outcome of draining a paginated listing.
#[derive(Debug)]
pub struct Drained<T> {
    /// Items from every page fetched, in API order
    pub items: Vec<T>,
    /// Number of pages fetched successfully
    pub pages: usize,
    /// The error that stopped pagination early, if any
    pub error: Option<SlackpackError>,
}

impl<T> Drained<T> {
    /// Returns `true` if every page was fetched.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Treats an early stop as a failure.
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }

    /// Keeps whatever was fetched, logging an early stop.
    pub fn into_partial(self, what: &str) -> Vec<T> {
        if let Some(err) = &self.error {
            tracing::warn!(
                listing = what,
                pages = self.pages,
                kept = self.items.len(),
                error = %err,
                "pagination stopped early, keeping partial results"
            );
        }
        self.items
    }
}

/// Fetches pages until the listing is exhausted or a fetch fails.
///
/// `fetch` receives the cursor of the previous page (`None` first).
///
/// # Example
///
/// ```rust
/// use slackpack::api::Page;
/// use slackpack::export::drain;
///
/// let drained = drain(|cursor| {
///     Ok(match cursor {
///         None => Page::new(vec![1, 2], Some("c1".into())),
///         Some("c1") => Page::new(vec![3], Some("c2".into())),
///         _ => Page::last(vec![4, 5]),
///     })
/// });
///
/// assert_eq!(drained.into_result()?, vec![1, 2, 3, 4, 5]);
/// # Ok::<(), slackpack::SlackpackError>(())
/// ```
pub fn drain<T, F>(mut fetch: F) -> Drained<T>
where
    F: FnMut(Option<&str>) -> Result<Page<T>>,
{
    let mut items = Vec::new();
    let mut pages = 0;
    let mut cursor: Option<String> = None;

    loop {
        match fetch(cursor.as_deref()) {
            Ok(page) => {
                pages += 1;
                items.extend(page.items);
                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => {
                        return Drained {
                            items,
                            pages,
                            error: None,
                        };
                    }
                }
            }
            Err(err) => {
                return Drained {
                    items,
                    pages,
                    error: Some(err),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let drained = drain(|_| Ok(Page::last(vec!["a", "b"])));
        assert!(drained.is_complete());
        assert_eq!(drained.pages, 1);
        assert_eq!(drained.into_result().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_cursors_are_passed_through() {
        let mut seen = Vec::new();
        let drained = drain(|cursor| {
            seen.push(cursor.map(str::to_string));
            Ok(match cursor {
                None => Page::new(vec![1], Some("c1".into())),
                Some("c1") => Page::new(vec![2], Some("c2".into())),
                _ => Page::new(vec![3], None),
            })
        });
        assert_eq!(drained.items, vec![1, 2, 3]);
        assert_eq!(
            seen,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[test]
    fn test_error_keeps_partial_items() {
        let drained = drain(|cursor| match cursor {
            None => Ok(Page::new(vec![1, 2], Some("c1".into()))),
            _ => Err(SlackpackError::api("conversations.history", "internal_error")),
        });
        assert!(!drained.is_complete());
        assert_eq!(drained.pages, 1);
        assert_eq!(drained.into_partial("history"), vec![1, 2]);
    }

    #[test]
    fn test_error_into_result() {
        let drained: Drained<u8> =
            drain(|_| Err(SlackpackError::api("conversations.list", "invalid_auth")));
        assert!(drained.into_result().unwrap_err().is_api());
    }
}
